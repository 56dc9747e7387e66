// API client module: a small blocking HTTP client for the local Ollama
// service. It is intentionally synchronous: every call blocks the menu
// or the pipeline until the service answers.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

/// Base URL of a default local Ollama install.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

// Long-running chat calls get an hour; the liveness probe and the tag
// listing are expected to answer quickly.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);
const CHAT_TIMEOUT: Duration = Duration::from_secs(3600);
const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(30);

/// Blocking client holding the reqwest client and the service base URL.
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: String,
}

#[derive(Deserialize, Debug)]
struct TagsResponse {
    models: Vec<ModelTag>,
}

/// One locally installed model as reported by `/api/tags`.
#[derive(Deserialize, Debug, Clone)]
pub struct ModelTag {
    pub name: String,
    #[serde(default)]
    pub size: u64,
}

impl OllamaClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().build().context("构建 HTTP 客户端失败")?;
        Ok(OllamaClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Liveness probe: GET /api/version. Any success status counts;
    /// the response body is not parsed.
    pub fn version(&self) -> Result<()> {
        let url = format!("{}/api/version", &self.base_url);
        let res = self
            .client
            .get(&url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .context("无法连接 Ollama 服务")?;
        if !res.status().is_success() {
            bail!("服务返回错误状态码: {}", res.status());
        }
        Ok(())
    }

    /// List locally installed models via GET /api/tags.
    pub fn list_models(&self) -> Result<Vec<ModelTag>> {
        let url = format!("{}/api/tags", &self.base_url);
        let res = self
            .client
            .get(&url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .context("请求模型列表失败")?;
        if !res.status().is_success() {
            bail!("模型列表返回错误状态码: {}", res.status());
        }
        let tags: TagsResponse = res.json().context("解析模型列表失败")?;
        Ok(tags.models)
    }

    /// Send one user prompt to POST /api/chat and return the reply text.
    ///
    /// Retry policy: up to 3 attempts. A timeout sleeps 30 seconds and
    /// retries; a non-success status or an unparseable body retries
    /// immediately; any other transport error aborts at once.
    pub fn chat(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/api/chat", &self.base_url);
        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        for attempt in 1..=MAX_RETRIES {
            log::info!("调用模型 API (尝试 {}/{})", attempt, MAX_RETRIES);
            match self
                .client
                .post(&url)
                .timeout(CHAT_TIMEOUT)
                .json(&request)
                .send()
            {
                Ok(res) => {
                    if !res.status().is_success() {
                        log::error!("API 错误状态码: {}", res.status());
                        continue;
                    }
                    let body = res.text().context("读取模型响应失败")?;
                    match serde_json::from_str::<ChatResponse>(&body) {
                        Ok(data) => return Ok(data.message.content),
                        Err(e) => {
                            log::error!("解析模型响应失败: {}", e);
                            continue;
                        }
                    }
                }
                Err(e) if e.is_timeout() => {
                    log::warn!("请求超时 (尝试 {})", attempt);
                    if attempt < MAX_RETRIES {
                        thread::sleep(RETRY_DELAY);
                    }
                }
                Err(e) => return Err(e).context("模型 API 请求异常"),
            }
        }
        bail!("模型 API 调用失败，已重试 {} 次", MAX_RETRIES)
    }
}
