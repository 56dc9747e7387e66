// Invoker: builds the processor command line and runs it to completion.
// The exit status is returned to the caller; the UI decides the wording.

use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};

use crate::params::SessionParams;

/// Build the processing command. Every collected value is its own argv
/// entry, so embedded spaces never split into separate arguments.
pub fn build_command(program: &str, params: &SessionParams) -> Command {
    let mut cmd = Command::new(program);
    cmd.arg("-i")
        .arg(&params.input)
        .arg("-o")
        .arg(&params.output)
        .arg("-m")
        .arg(&params.model)
        .arg("-c")
        .arg(&params.chunk_size)
        .arg("-t")
        .arg(&params.task);
    cmd
}

pub fn build_list_models(program: &str) -> Command {
    let mut cmd = Command::new(program);
    cmd.arg("--list-models");
    cmd
}

/// Run the processor synchronously and surface its exit status.
pub fn run(program: &str, params: &SessionParams) -> Result<ExitStatus> {
    build_command(program, params)
        .status()
        .with_context(|| format!("无法启动处理程序: {}", program))
}

/// Run `--list-models` with inherited stdio so the listing streams
/// straight to the terminal.
pub fn run_list_models(program: &str) -> Result<ExitStatus> {
    build_list_models(program)
        .status()
        .with_context(|| format!("无法启动处理程序: {}", program))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn build_command_maps_every_parameter_to_its_flag() {
        let params = SessionParams::default();
        let cmd = build_command("novel-analyzer", &params);
        assert_eq!(cmd.get_program().to_string_lossy(), "novel-analyzer");
        assert_eq!(
            argv(&cmd),
            [
                "-i",
                "example_input.txt",
                "-o",
                "output.txt",
                "-m",
                "qwen:14b",
                "-c",
                "4000",
                "-t",
                "总结这段内容的要点",
            ]
        );
    }

    #[test]
    fn values_with_spaces_stay_single_arguments() {
        let params = SessionParams {
            input: "my novels/book one.txt".to_string(),
            output: "out dir/report.txt".to_string(),
            model: "qwen:14b".to_string(),
            chunk_size: "2500".to_string(),
            task: "列出 每个 角色 的 关系".to_string(),
        };
        let args = argv(&build_command("novel-analyzer", &params));
        assert_eq!(args.len(), 10);
        assert_eq!(args[1], "my novels/book one.txt");
        assert_eq!(args[3], "out dir/report.txt");
        assert_eq!(args[9], "列出 每个 角色 的 关系");
    }

    #[test]
    fn non_numeric_chunk_size_is_passed_through_verbatim() {
        let params = SessionParams {
            chunk_size: "plenty".to_string(),
            ..SessionParams::default()
        };
        let args = argv(&build_command("novel-analyzer", &params));
        assert_eq!(args[7], "plenty");
    }

    #[test]
    fn list_models_uses_the_single_flag() {
        let cmd = build_list_models("novel-analyzer");
        assert_eq!(argv(&cmd), ["--list-models"]);
    }
}
