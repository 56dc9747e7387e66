// The processing pipeline behind the `novel-analyzer` binary:
// read the input, split it into chunks, run the task instruction over
// each chunk through the model, render and write the report.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::OllamaClient;
use crate::chunk;
use crate::report::{self, ChunkSummary};

pub struct Analyzer<'a> {
    api: &'a OllamaClient,
    model: String,
    chunk_size: usize,
    task: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub failed: usize,
}

/// The per-chunk prompt: the task instruction, a blank line, the text.
pub fn build_prompt(task: &str, content: &str) -> String {
    format!("{}\n\n{}", task, content)
}

impl<'a> Analyzer<'a> {
    pub fn new(
        api: &'a OllamaClient,
        model: impl Into<String>,
        chunk_size: usize,
        task: impl Into<String>,
    ) -> Self {
        Analyzer {
            api,
            model: model.into(),
            chunk_size,
            task: task.into(),
        }
    }

    /// Process one input file into one report file. Individual chunk
    /// failures are counted and logged, not fatal; read and write
    /// failures are.
    pub fn process_file(&self, input: &Path, output: &Path) -> Result<Stats> {
        let content = fs::read_to_string(input)
            .with_context(|| format!("读取文件失败: {}", input.display()))?;
        log::info!("成功读取文件: {}", input.display());

        let chunks = chunk::split_into_chunks(&content, self.chunk_size);
        log::info!("分块完成，共 {} 块", chunks.len());
        for piece in &chunks {
            log::info!("分块: {}", piece.title);
        }

        let bar = ProgressBar::new(chunks.len() as u64);
        bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}").unwrap());

        let mut results = Vec::with_capacity(chunks.len());
        for piece in &chunks {
            bar.set_message(piece.title.clone());
            let summary = match self
                .api
                .chat(&self.model, &build_prompt(&self.task, &piece.content))
            {
                Ok(text) => Some(text),
                Err(e) => {
                    log::warn!("分块处理失败: {} ({:#})", piece.title, e);
                    None
                }
            };
            results.push(ChunkSummary {
                title: piece.title.clone(),
                summary,
            });
            bar.inc(1);
        }
        bar.finish_and_clear();

        let rendered = report::render(&self.model, &self.task, &results);
        fs::write(output, rendered)
            .with_context(|| format!("写入报告文件失败: {}", output.display()))?;
        log::info!("分析报告已保存: {}", output.display());

        Ok(Stats {
            total: results.len(),
            failed: report::failed_count(&results),
        })
    }
}
