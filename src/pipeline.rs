use std::time::Duration;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::extract::extract;
use crate::git::compute_diff;
use crate::merge::reconcile;
use crate::report::render;
use crate::reviewer::Reviewer;
use crate::schema::MergeResult;

/// Outcome of a full pipeline run.
#[derive(Debug)]
pub enum RunOutcome {
    /// Dry-run mode: no reviewer was invoked.
    DryRun { diff_bytes: usize },
    Reviewed(ReviewOutcome),
}

#[derive(Debug)]
pub struct ReviewOutcome {
    pub merge: MergeResult,
    pub report: String,
}

/// Drives the dual-review flow: diff → two reviewer runs → extraction →
/// reconciliation → report. Extraction failure on either side aborts the
/// whole invocation; a one-sided comparison would produce a misleadingly
/// confident score.
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn reviewer(&self, command: &str, model: Option<&str>) -> Reviewer {
        Reviewer {
            command: command.to_string(),
            prompt_arg: self.config.prompt_arg.clone(),
            output_json_args: self.config.output_json_args.clone(),
            model_arg: self.config.model_arg.clone(),
            model: model.map(str::to_string),
            extra_args: self.config.extra_args.clone(),
            timeout: self.config.timeout_secs.map(Duration::from_secs),
            max_stdout_bytes: self.config.max_stdout_bytes,
        }
    }

    /// Run the full pipeline on the configured repository's diff.
    pub async fn run(&self) -> Result<RunOutcome> {
        let diff = compute_diff(&self.config.cwd, self.config.staged)?;
        info!(bytes = diff.len(), "computed diff");

        if self.config.dry_run {
            return Ok(RunOutcome::DryRun {
                diff_bytes: diff.len(),
            });
        }

        let primary = self.reviewer(
            &self.config.primary_command,
            self.config.primary_model.as_deref(),
        );
        let secondary = self.reviewer(
            &self.config.secondary_command,
            self.config.secondary_model.as_deref(),
        );

        info!(
            primary = %primary.command,
            secondary = %secondary.command,
            "running reviewers"
        );
        let (raw_a, raw_b) = tokio::join!(
            primary.run(&diff, &self.config.cwd),
            secondary.run(&diff, &self.config.cwd),
        );

        Ok(RunOutcome::Reviewed(self.compare(&raw_a?, &raw_b?)?))
    }

    /// Reconcile two raw reviewer outputs into a score and report.
    pub fn compare(&self, raw_a: &str, raw_b: &str) -> Result<ReviewOutcome> {
        let a = extract(raw_a)?;
        let b = extract(raw_b)?;

        let merge = reconcile(&a, &b);
        info!(
            score = merge.score,
            overlap = merge.overlap,
            union = merge.union,
            "reviews reconciled"
        );

        let report = render(&a, &b, &merge);
        Ok(ReviewOutcome { merge, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::config::{ConfigFile, EnvOverrides, merge as merge_config};
    use crate::error::Error;
    use clap::Parser;

    fn test_pipeline() -> Pipeline {
        let cli = Cli::parse_from(["dualrev"]);
        Pipeline::new(merge_config(
            ConfigFile::default(),
            EnvOverrides::default(),
            &cli,
        ))
    }

    const PLAIN: &str = r#"{"issues":[{"category":"security","severity":"high","file":"api/user.controller.ts","message":"Potential SQL injection","fix":"Use parameterized queries"}],"summary":{"counts":{"low":0,"med":0,"high":1}}}"#;

    #[test]
    fn test_compare_plain_outputs() {
        let outcome = test_pipeline().compare(PLAIN, PLAIN).unwrap();
        assert_eq!(outcome.merge.overlap, 1);
        assert_eq!(outcome.merge.union, 1);
        assert!(outcome.report.contains("**Score:**"));
    }

    #[test]
    fn test_compare_mixed_framings() {
        let fenced = format!("```json\n{PLAIN}\n```");
        let outcome = test_pipeline().compare(PLAIN, &fenced).unwrap();
        assert_eq!(outcome.merge.overlap, 1);
    }

    #[test]
    fn test_compare_fails_on_one_bad_side() {
        let err = test_pipeline()
            .compare(PLAIN, "looks good to me!")
            .unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn test_reviewer_built_from_config() {
        let pipeline = test_pipeline();
        let r = pipeline.reviewer("codex", Some("gpt-5"));
        assert_eq!(r.command, "codex");
        assert_eq!(r.prompt_arg, "-p");
        assert_eq!(r.model.as_deref(), Some("gpt-5"));
        assert_eq!(r.output_json_args, vec!["--output-format", "json"]);
    }
}
