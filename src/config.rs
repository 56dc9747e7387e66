// Configuration is environment-driven with sensible defaults, so the
// tool runs out of the box against a stock local Ollama install.

use std::env;

use crate::api::DEFAULT_BASE_URL;
use crate::params::DEFAULT_MODEL;

/// Command the menu invokes as the external processor. Overridable for
/// setups where the binary is renamed or not on PATH.
pub const DEFAULT_ANALYZER_CMD: &str = "novel-analyzer";
pub const DEFAULT_PAGER: &str = "more";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Ollama service (`OLLAMA_BASE_URL`).
    pub ollama_base_url: String,
    /// Processor command the menu spawns (`NOVEL_ANALYZER_CMD`).
    pub analyzer_cmd: String,
    /// Model checked for during pre-flight (`NOVEL_MODEL`).
    pub default_model: String,
    /// Pager used by the help option (`PAGER`).
    pub pager: String,
    /// When set, a non-positive-integer chunk size is rejected before
    /// invocation instead of being passed through verbatim
    /// (`NOVEL_STRICT_CHUNK_SIZE`).
    pub strict_chunk_size: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            ollama_base_url: env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            analyzer_cmd: env::var("NOVEL_ANALYZER_CMD")
                .unwrap_or_else(|_| DEFAULT_ANALYZER_CMD.to_string()),
            default_model: env::var("NOVEL_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            pager: env::var("PAGER").unwrap_or_else(|_| DEFAULT_PAGER.to_string()),
            strict_chunk_size: flag_set(env::var("NOVEL_STRICT_CHUNK_SIZE").ok().as_deref()),
        }
    }
}

fn flag_set(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("1" | "true" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_set_accepts_common_truthy_values() {
        assert!(flag_set(Some("1")));
        assert!(flag_set(Some("true")));
        assert!(flag_set(Some(" yes ")));
    }

    #[test]
    fn flag_set_rejects_everything_else() {
        assert!(!flag_set(None));
        assert!(!flag_set(Some("")));
        assert!(!flag_set(Some("0")));
        assert!(!flag_set(Some("false")));
        assert!(!flag_set(Some("on")));
    }
}
