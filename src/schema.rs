use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Security,
    Correctness,
    Reliability,
    Architecture,
    Performance,
    Tests,
    Docs,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Security => "security",
            Category::Correctness => "correctness",
            Category::Reliability => "reliability",
            Category::Architecture => "architecture",
            Category::Performance => "performance",
            Category::Tests => "tests",
            Category::Docs => "docs",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Med,
    High,
}

/// One reviewer finding. Identity for cross-review matching is the
/// `(category, file, message)` tuple — see [`Issue::key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub category: Category,
    pub severity: Severity,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub message: String,
    pub fix: String,
}

impl Issue {
    /// Matching key: deliberately excludes `severity`, `line`, and `fix`.
    /// Line numbers shift between tool invocations, and severity/fix are
    /// the tool's judgment calls rather than the finding's identity.
    pub fn key(&self) -> String {
        format!("{}|{}|{}", self.category, self.file, self.message)
    }
}

/// Declared severity counts. These are the reviewer's self-assessment and
/// may legitimately disagree with the itemized issue list; nothing in this
/// crate reconciles the two.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCounts {
    pub low: u64,
    pub med: u64,
    pub high: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub counts: SummaryCounts,
}

/// One reviewer's structured output: itemized issues plus declared counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPayload {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}

/// Result of reconciling two review payloads. Recomputed fresh on every
/// call; holds no state beyond the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeResult {
    pub score: u8,
    pub overlap: usize,
    pub union: usize,
    pub a_only_keys: Vec<String>,
    pub b_only_keys: Vec<String>,
}

/// Parse a JSON string as a [`ReviewPayload`], rejecting wrong types,
/// missing required fields, and unknown enum values.
pub fn parse_payload(json: &str) -> Result<ReviewPayload> {
    serde_json::from_str(json).map_err(|e| Error::Extraction(format!("invalid payload: {e}")))
}
