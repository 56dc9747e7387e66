// The external processor: chunked text analysis over a local Ollama
// model. Invoked by `novel-menu`, but a plain CLI in its own right.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use novel_analyzer::analyzer::Analyzer;
use novel_analyzer::api::OllamaClient;
use novel_analyzer::config::Config;
use novel_analyzer::params::{DEFAULT_CHUNK_SIZE, DEFAULT_MODEL, DEFAULT_OUTPUT, DEFAULT_TASK};

/// 小说文本分析工具：按章节/大小分块后调用本地 Ollama 模型逐块处理。
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// 输入文本文件路径
    #[arg(short, long, required_unless_present = "list_models")]
    input: Option<PathBuf>,

    /// 输出报告文件路径
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// 使用的模型名称
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    model: String,

    /// 分块大小（字符数）
    #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// 对每个分块执行的任务说明
    #[arg(short, long, default_value = DEFAULT_TASK)]
    task: String,

    /// 列出本地可用模型后退出
    #[arg(long)]
    list_models: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = Config::from_env();
    let api = OllamaClient::new(&config.ollama_base_url)?;

    if args.list_models {
        for model in api.list_models().context("获取模型列表失败")? {
            println!("{}", model.name);
        }
        return Ok(());
    }

    api.version().context("Ollama 服务不可用，请先启动服务")?;

    let input = args.input.expect("clap enforces -i unless --list-models");
    let analyzer = Analyzer::new(&api, args.model, args.chunk_size, args.task);
    let stats = analyzer.process_file(&input, &args.output)?;
    if stats.failed > 0 {
        log::warn!("{} 个分块处理失败（共 {} 块）", stats.failed, stats.total);
    }
    Ok(())
}
