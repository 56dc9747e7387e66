// Session parameters: the five values controlling one processing
// invocation. A fresh set is collected for every "process file" menu
// selection and dropped once the invocation returns; nothing is
// persisted between iterations.

use std::path::Path;

use thiserror::Error;

pub const DEFAULT_INPUT: &str = "example_input.txt";
pub const DEFAULT_OUTPUT: &str = "output.txt";
pub const DEFAULT_MODEL: &str = "qwen:14b";
pub const DEFAULT_CHUNK_SIZE: usize = 4000;
pub const DEFAULT_TASK: &str = "总结这段内容的要点";

/// Immutable value struct passed into the invocation step.
///
/// `chunk_size` is kept as the raw prompt response: in passthrough mode
/// the string is forwarded to the processor verbatim, numeric or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParams {
    pub input: String,
    pub output: String,
    pub model: String,
    pub chunk_size: String,
    pub task: String,
}

impl Default for SessionParams {
    fn default() -> Self {
        SessionParams {
            input: DEFAULT_INPUT.to_string(),
            output: DEFAULT_OUTPUT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE.to_string(),
            task: DEFAULT_TASK.to_string(),
        }
    }
}

/// Recoverable validation failures: the menu reports them and returns
/// to the top of the loop.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("错误: 输入文件不存在: {0}")]
    InputFileMissing(String),
    #[error("错误: 分块大小必须为正整数: {0}")]
    InvalidChunkSize(String),
}

impl SessionParams {
    /// The input file must exist before an invocation is attempted.
    /// Chunk size is only checked in strict mode.
    pub fn validate(&self, strict_chunk_size: bool) -> Result<(), ParamError> {
        if !Path::new(&self.input).exists() {
            return Err(ParamError::InputFileMissing(self.input.clone()));
        }
        if strict_chunk_size {
            match self.chunk_size.trim().parse::<usize>() {
                Ok(n) if n > 0 => {}
                _ => return Err(ParamError::InvalidChunkSize(self.chunk_size.clone())),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn params_with_input(input: &str) -> SessionParams {
        SessionParams {
            input: input.to_string(),
            ..SessionParams::default()
        }
    }

    #[test]
    fn defaults_match_the_documented_values() {
        let params = SessionParams::default();
        assert_eq!(params.input, "example_input.txt");
        assert_eq!(params.output, "output.txt");
        assert_eq!(params.model, "qwen:14b");
        assert_eq!(params.chunk_size, "4000");
        assert_eq!(params.task, "总结这段内容的要点");
    }

    #[test]
    fn validate_passes_for_existing_input() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "第1章 起点").unwrap();
        let params = params_with_input(file.path().to_str().unwrap());
        assert_eq!(params.validate(false), Ok(()));
    }

    #[test]
    fn validate_rejects_missing_input() {
        let params = params_with_input("no_such_file_9941.txt");
        assert_eq!(
            params.validate(false),
            Err(ParamError::InputFileMissing("no_such_file_9941.txt".to_string()))
        );
    }

    #[test]
    fn passthrough_mode_accepts_non_numeric_chunk_size() {
        let file = NamedTempFile::new().unwrap();
        let mut params = params_with_input(file.path().to_str().unwrap());
        params.chunk_size = "abc".to_string();
        assert_eq!(params.validate(false), Ok(()));
    }

    #[test]
    fn strict_mode_rejects_non_numeric_and_zero_chunk_size() {
        let file = NamedTempFile::new().unwrap();
        let mut params = params_with_input(file.path().to_str().unwrap());

        params.chunk_size = "abc".to_string();
        assert_eq!(
            params.validate(true),
            Err(ParamError::InvalidChunkSize("abc".to_string()))
        );

        params.chunk_size = "0".to_string();
        assert_eq!(
            params.validate(true),
            Err(ParamError::InvalidChunkSize("0".to_string()))
        );

        params.chunk_size = "-4".to_string();
        assert!(params.validate(true).is_err());
    }

    #[test]
    fn strict_mode_accepts_positive_integers() {
        let file = NamedTempFile::new().unwrap();
        let mut params = params_with_input(file.path().to_str().unwrap());
        params.chunk_size = " 2500 ".to_string();
        assert_eq!(params.validate(true), Ok(()));
    }

    #[test]
    fn error_messages_are_localized() {
        let err = ParamError::InputFileMissing("a.txt".to_string());
        assert_eq!(err.to_string(), "错误: 输入文件不存在: a.txt");
    }
}
