use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{Error, Result};

pub const DEFAULT_MAX_STDOUT_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_CONFIG_PATH: &str = "dualrev.toml";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub primary_command: Option<String>,
    pub secondary_command: Option<String>,
    pub primary_model: Option<String>,
    pub secondary_model: Option<String>,
    pub prompt_arg: Option<String>,
    pub output_json_args: Option<Vec<String>>,
    pub model_arg: Option<String>,
    pub extra_args: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
    pub max_stdout_bytes: Option<usize>,
    pub dry_run: Option<bool>,
}

/// Environment overrides, read once at load time. These sit between the
/// config file and CLI flags in precedence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub max_stdout_bytes: Option<usize>,
    pub primary_model: Option<String>,
    pub git_cwd: Option<PathBuf>,
    pub dry_run: bool,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let max_stdout_bytes = std::env::var("DUAL_REVIEW_STDIO_MAX_BUFFER")
            .ok()
            .and_then(|v| v.parse().ok());
        let primary_model = std::env::var("DUAL_REVIEW_DEFAULT_MODEL").ok();
        let git_cwd = std::env::var("DUAL_REVIEW_GIT_CWD").ok().map(PathBuf::from);
        let dry_run = std::env::var("DUAL_REVIEW_DRY_RUN")
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false);
        Self {
            max_stdout_bytes,
            primary_model,
            git_cwd,
            dry_run,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub primary_command: String,
    pub secondary_command: String,
    pub primary_model: Option<String>,
    pub secondary_model: Option<String>,
    pub prompt_arg: String,
    pub output_json_args: Vec<String>,
    pub model_arg: String,
    pub extra_args: Vec<String>,
    pub timeout_secs: Option<u64>,
    pub max_stdout_bytes: usize,
    pub dry_run: bool,
    pub staged: bool,
    pub cwd: PathBuf,
}

impl Config {
    /// Load configuration: TOML file, environment, then CLI flags, with
    /// later sources winning. A missing file is fine unless the path was
    /// given explicitly.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file_config = match cli.config {
            Some(ref path) => {
                if !path.exists() {
                    return Err(Error::ConfigNotFound(path.clone()));
                }
                parse_config(&std::fs::read_to_string(path)?)?
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    parse_config(&std::fs::read_to_string(path)?)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        Ok(merge(file_config, EnvOverrides::from_env(), cli))
    }
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let config: ConfigFile = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ConfigFile) -> Result<()> {
    for (name, value) in [
        ("primary_command", &config.primary_command),
        ("secondary_command", &config.secondary_command),
    ] {
        if let Some(cmd) = value
            && cmd.is_empty()
        {
            return Err(Error::ConfigValidation(format!(
                "{name} must not be empty"
            )));
        }
    }
    if let Some(timeout) = config.timeout_secs
        && timeout == 0
    {
        return Err(Error::ConfigValidation(
            "timeout_secs must be > 0".to_string(),
        ));
    }
    if let Some(bytes) = config.max_stdout_bytes
        && bytes == 0
    {
        return Err(Error::ConfigValidation(
            "max_stdout_bytes must be > 0".to_string(),
        ));
    }
    Ok(())
}

pub fn merge(file: ConfigFile, env: EnvOverrides, cli: &Cli) -> Config {
    Config {
        primary_command: cli
            .primary
            .clone()
            .or(file.primary_command)
            .unwrap_or_else(|| "claude".to_string()),
        secondary_command: cli
            .secondary
            .clone()
            .or(file.secondary_command)
            .unwrap_or_else(|| "cursor".to_string()),
        primary_model: cli
            .primary_model
            .clone()
            .or(env.primary_model)
            .or(file.primary_model),
        secondary_model: cli.secondary_model.clone().or(file.secondary_model),
        prompt_arg: cli
            .prompt_arg
            .clone()
            .or(file.prompt_arg)
            .unwrap_or_else(|| "-p".to_string()),
        output_json_args: if cli.output_json_args.is_empty() {
            file.output_json_args
                .unwrap_or_else(|| vec!["--output-format".to_string(), "json".to_string()])
        } else {
            cli.output_json_args.clone()
        },
        model_arg: cli
            .model_arg
            .clone()
            .or(file.model_arg)
            .unwrap_or_else(|| "--model".to_string()),
        extra_args: if cli.extra_args.is_empty() {
            file.extra_args.unwrap_or_default()
        } else {
            cli.extra_args.clone()
        },
        timeout_secs: cli.timeout.or(file.timeout_secs),
        max_stdout_bytes: env
            .max_stdout_bytes
            .or(file.max_stdout_bytes)
            .unwrap_or(DEFAULT_MAX_STDOUT_BYTES),
        dry_run: cli.dry_run || env.dry_run || file.dry_run.unwrap_or(false),
        staged: !cli.unstaged,
        cwd: cli
            .cwd
            .clone()
            .or(env.git_cwd)
            .unwrap_or_else(|| PathBuf::from(".")),
    }
}
