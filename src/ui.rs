// UI layer: provides the interactive menu using `dialoguer`.
// The functions are small and synchronous to keep the flow easy to
// follow; every external call blocks the loop until it returns.

use std::process::Command;

use anyhow::Result;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;
use crate::invoke;
use crate::params::SessionParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Process,
    Help,
    Exit,
    Invalid,
}

/// Map the raw menu response onto a choice. Anything outside "1"-"3"
/// (leading/trailing whitespace ignored) is Invalid.
pub fn parse_choice(input: &str) -> MenuChoice {
    match input.trim() {
        "1" => MenuChoice::Process,
        "2" => MenuChoice::Help,
        "3" => MenuChoice::Exit,
        _ => MenuChoice::Invalid,
    }
}

/// Trigger the processor's own model listing and stream it to the
/// terminal. The exit code is not inspected.
pub fn list_models(config: &Config) {
    println!("本地可用模型:");
    if let Err(e) = invoke::run_list_models(&config.analyzer_cmd) {
        log::warn!("模型列表获取失败: {:#}", e);
    }
}

/// Main interactive menu. Loops until the user chooses to exit; an
/// unrecognized choice re-displays the menu with a notice.
pub fn main_menu(config: &Config) -> Result<()> {
    loop {
        println!();
        println!("====== 小说文本分析工具 ======");
        println!("1. 处理文本文件");
        println!("2. 查看帮助");
        println!("3. 退出");
        let choice: String = Input::new()
            .with_prompt("请选择操作 (1-3)")
            .allow_empty(true)
            .interact_text()?;
        match parse_choice(&choice) {
            MenuChoice::Process => handle_process(config)?,
            MenuChoice::Help => show_help(&config.pager),
            MenuChoice::Exit => break,
            MenuChoice::Invalid => println!("无效选项: {}，请输入 1-3", choice.trim()),
        }
    }
    Ok(())
}

/// Collect the five parameters, validate, invoke, report. The whole
/// sequence starts over from the defaults on the next selection.
fn handle_process(config: &Config) -> Result<()> {
    let params = collect_params()?;
    if let Err(e) = params.validate(config.strict_chunk_size) {
        println!("{}", e);
        return Ok(());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message("正在处理，请稍候...");
    let status = invoke::run(&config.analyzer_cmd, &params);
    spinner.finish_and_clear();

    match status {
        Ok(status) if !status.success() => log::warn!("处理程序退出状态异常: {}", status),
        Err(e) => log::warn!("处理程序启动失败: {:#}", e),
        Ok(_) => {}
    }
    // The completion line is printed regardless of the exit status.
    println!("处理完成！结果已保存到: {}", params.output);
    Ok(())
}

/// Prompt for each parameter with its default in the label; an empty
/// response keeps the default, anything else is taken verbatim.
fn collect_params() -> Result<SessionParams> {
    let defaults = SessionParams::default();
    let input: String = Input::new()
        .with_prompt("输入文件路径")
        .default(defaults.input)
        .interact_text()?;
    let output: String = Input::new()
        .with_prompt("输出文件路径")
        .default(defaults.output)
        .interact_text()?;
    let model: String = Input::new()
        .with_prompt("模型名称")
        .default(defaults.model)
        .interact_text()?;
    let chunk_size: String = Input::new()
        .with_prompt("分块大小")
        .default(defaults.chunk_size)
        .interact_text()?;
    let task: String = Input::new()
        .with_prompt("任务说明")
        .default(defaults.task)
        .interact_text()?;
    Ok(SessionParams {
        input,
        output,
        model,
        chunk_size,
        task,
    })
}

/// Page the local README. A missing file is left to the pager's own
/// error reporting.
fn show_help(pager: &str) {
    if let Err(e) = Command::new(pager).arg("README.md").status() {
        println!("无法打开帮助: {}", e);
    }
}
