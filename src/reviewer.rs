use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::process::{ProcessConfig, spawn_and_collect};

/// Prompt given to every reviewer CLI, instructing it to emit the payload
/// schema as JSON. Both reviewers get the identical prompt so their
/// findings are comparable.
pub const REVIEW_PROMPT: &str = include_str!("prompts/review.md");

/// One reviewer CLI invocation: binary name plus the flags needed to run
/// it headless with a prompt and JSON output. Defaults match the
/// claude/cursor CLI conventions (`-p <prompt> --output-format json`).
#[derive(Debug, Clone)]
pub struct Reviewer {
    pub command: String,
    pub prompt_arg: String,
    pub output_json_args: Vec<String>,
    pub model_arg: String,
    pub model: Option<String>,
    pub extra_args: Vec<String>,
    pub timeout: Option<Duration>,
    pub max_stdout_bytes: usize,
}

impl Reviewer {
    /// Build the argument vector for a headless review run.
    pub fn build_command(&self) -> (String, Vec<String>) {
        let mut args = vec![self.prompt_arg.clone(), REVIEW_PROMPT.to_string()];
        args.extend(self.output_json_args.iter().cloned());
        args.extend(self.extra_args.iter().cloned());

        if let Some(ref model) = self.model {
            args.push(self.model_arg.clone());
            args.push(model.clone());
        }

        (self.command.clone(), args)
    }

    /// Run the reviewer over a diff piped on stdin and return its raw
    /// stdout. The output framing is not interpreted here; extraction is
    /// the caller's problem.
    pub async fn run(&self, diff: &str, working_dir: &Path) -> Result<String> {
        let (command, args) = self.build_command();

        let config = ProcessConfig {
            command,
            args,
            working_dir: working_dir.to_path_buf(),
            timeout: self.timeout,
            log_prefix: format!("reviewer:{}", self.command),
            stdin_data: Some(diff.to_string()),
            max_stdout_bytes: self.max_stdout_bytes,
        };

        let output = spawn_and_collect(config).await?;

        if output.success() {
            return Ok(output.stdout);
        }

        if let Some(sig) = output.signal {
            return Err(Error::Reviewer(format!(
                "{} killed by signal {sig}",
                self.command
            )));
        }

        let stderr = output.stderr.trim();
        Err(Error::Reviewer(if stderr.is_empty() {
            format!("{} exited with code {}", self.command, output.exit_code)
        } else {
            format!("{} failed: {stderr}", self.command)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviewer() -> Reviewer {
        Reviewer {
            command: "claude".to_string(),
            prompt_arg: "-p".to_string(),
            output_json_args: vec!["--output-format".to_string(), "json".to_string()],
            model_arg: "--model".to_string(),
            model: None,
            extra_args: vec![],
            timeout: None,
            max_stdout_bytes: 10 * 1024 * 1024,
        }
    }

    #[test]
    fn test_build_command_defaults() {
        let (cmd, args) = reviewer().build_command();
        assert_eq!(cmd, "claude");
        assert_eq!(args[0], "-p");
        assert_eq!(args[1], REVIEW_PROMPT);
        assert_eq!(&args[2..4], ["--output-format", "json"]);
        assert_eq!(args.len(), 4);
    }

    #[test]
    fn test_build_command_with_model() {
        let mut r = reviewer();
        r.model = Some("opus".to_string());
        let (_, args) = r.build_command();
        assert_eq!(&args[args.len() - 2..], ["--model", "opus"]);
    }

    #[test]
    fn test_build_command_extra_args_before_model() {
        let mut r = reviewer();
        r.extra_args = vec!["--force".to_string()];
        r.model = Some("gpt-5".to_string());
        let (_, args) = r.build_command();
        assert_eq!(args[4], "--force");
        assert_eq!(args[5], "--model");
    }

    #[test]
    fn test_prompt_demands_schema_json() {
        assert!(REVIEW_PROMPT.contains("ONLY valid JSON"));
        assert!(REVIEW_PROMPT.contains("\"issues\""));
        assert!(REVIEW_PROMPT.contains("\"summary\""));
        assert!(REVIEW_PROMPT.contains("low|med|high"));
    }
}
