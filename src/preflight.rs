// Pre-flight checks run once, in order, before the menu is shown.
// Each check returns an outcome instead of exiting; the binary's top
// level prints the results and decides whether to terminate. The
// sequence short-circuits after the first fatal outcome.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::api::OllamaClient;
use crate::config::Config;

/// Fatal pre-flight failures. Either one ends the program before any
/// menu interaction.
#[derive(Debug, Error)]
pub enum PreflightError {
    #[error("错误: 未找到处理程序 {0}，请确认其已安装并位于 PATH 中")]
    AnalyzerNotFound(String),
    #[error("错误: 无法连接 Ollama 服务，请先运行 ollama serve ({0})")]
    ServiceUnreachable(String),
}

#[derive(Debug)]
pub enum Outcome {
    Passed,
    Warning(String),
    Fatal(PreflightError),
}

#[derive(Debug)]
pub struct Check {
    pub label: &'static str,
    pub outcome: Outcome,
}

/// Run the three start-up checks. Each runs exactly once, no retries.
pub fn run_checks(config: &Config, api: &OllamaClient) -> Vec<Check> {
    let mut checks = Vec::new();

    let analyzer = check_analyzer(&config.analyzer_cmd);
    let fatal = matches!(analyzer.outcome, Outcome::Fatal(_));
    checks.push(analyzer);
    if fatal {
        return checks;
    }

    let service = check_service(api);
    let fatal = matches!(service.outcome, Outcome::Fatal(_));
    checks.push(service);
    if fatal {
        return checks;
    }

    checks.push(check_model(api, &config.default_model));
    checks
}

pub fn first_fatal(checks: &[Check]) -> Option<&PreflightError> {
    checks.iter().find_map(|check| match &check.outcome {
        Outcome::Fatal(err) => Some(err),
        _ => None,
    })
}

fn check_analyzer(cmd: &str) -> Check {
    let outcome = match find_program(cmd) {
        Some(_) => Outcome::Passed,
        None => Outcome::Fatal(PreflightError::AnalyzerNotFound(cmd.to_string())),
    };
    Check {
        label: "处理程序可用",
        outcome,
    }
}

fn check_service(api: &OllamaClient) -> Check {
    let outcome = match api.version() {
        Ok(()) => Outcome::Passed,
        Err(e) => Outcome::Fatal(PreflightError::ServiceUnreachable(format!("{e:#}"))),
    };
    Check {
        label: "Ollama 服务连接",
        outcome,
    }
}

/// The processor cannot run without its model. If the configured model
/// is not installed, make a single `ollama pull` attempt; its exit
/// status is ignored and the presence is not re-verified. This check
/// never fails the program.
fn check_model(api: &OllamaClient, model: &str) -> Check {
    let outcome = match api.list_models() {
        Ok(models) if models.iter().any(|m| m.name == model) => Outcome::Passed,
        Ok(_) => {
            log::info!("模型 {} 不在本地，尝试拉取", model);
            let _ = Command::new("ollama").args(["pull", model]).status();
            Outcome::Warning(format!("模型 {} 不在本地，已尝试 ollama pull", model))
        }
        Err(e) => Outcome::Warning(format!("无法获取模型列表: {e:#}")),
    };
    Check {
        label: "默认模型可用",
        outcome,
    }
}

/// Resolve a command the way the shell would: an explicit path is
/// checked directly, a bare name is searched on PATH.
pub fn find_program(name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let paths = env::var_os("PATH")?;
    search_dirs(name, env::split_paths(&paths))
}

fn search_dirs(name: &str, dirs: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    dirs.into_iter().find_map(|dir| {
        let direct = dir.join(name);
        if direct.is_file() {
            return Some(direct);
        }
        if cfg!(windows) {
            let exe = dir.join(format!("{name}.exe"));
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn search_dirs_finds_a_file_in_a_listed_dir() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("novel-analyzer")).unwrap();
        let found = search_dirs(
            "novel-analyzer",
            vec![PathBuf::from("/nonexistent"), dir.path().to_path_buf()],
        );
        assert_eq!(found, Some(dir.path().join("novel-analyzer")));
    }

    #[test]
    fn search_dirs_returns_none_when_absent() {
        let dir = tempdir().unwrap();
        assert_eq!(search_dirs("novel-analyzer", vec![dir.path().to_path_buf()]), None);
    }

    #[test]
    fn find_program_checks_explicit_paths_directly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("analyzer");
        File::create(&path).unwrap();
        assert_eq!(find_program(path.to_str().unwrap()), Some(path.clone()));

        let missing = dir.path().join("gone");
        assert_eq!(find_program(missing.to_str().unwrap()), None);
    }

    #[test]
    fn first_fatal_skips_passed_and_warning_outcomes() {
        let checks = vec![
            Check {
                label: "a",
                outcome: Outcome::Passed,
            },
            Check {
                label: "b",
                outcome: Outcome::Warning("模型不在本地".to_string()),
            },
        ];
        assert!(first_fatal(&checks).is_none());

        let checks = vec![
            Check {
                label: "a",
                outcome: Outcome::Passed,
            },
            Check {
                label: "b",
                outcome: Outcome::Fatal(PreflightError::AnalyzerNotFound("x".to_string())),
            },
        ];
        let fatal = first_fatal(&checks).unwrap();
        assert!(matches!(fatal, PreflightError::AnalyzerNotFound(name) if name == "x"));
    }
}
