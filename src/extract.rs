use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{ReviewPayload, parse_payload};

static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)```(?:json)?\s*(.*?)```").expect("fence regex"));

/// Loose shape of a tool-call envelope some reviewer CLIs wrap their
/// output in, e.g. `{"type": "result", "result": "```json ... ```"}`.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    kind: Option<String>,
    result: Option<String>,
}

/// Recover a [`ReviewPayload`] from arbitrary reviewer stdout.
///
/// Reviewer CLIs are not reliable at obeying "output only JSON": they wrap
/// payloads in prose, tool-call envelopes, or fenced code blocks. Strategies
/// are tried strictest first so well-behaved output is validated with
/// maximum confidence:
///
/// 1. the entire trimmed text is payload JSON
/// 2. the text is an envelope whose `result` string contains the payload,
///    possibly fenced
/// 3. the first fenced block in the text, or failing that the substring
///    between the first `{` and the last `}`
pub fn extract(raw: &str) -> Result<ReviewPayload> {
    let trimmed = raw.trim();

    match parse_payload(trimmed) {
        Ok(payload) => return Ok(payload),
        Err(e) => debug!("direct parse failed: {e}"),
    }

    match serde_json::from_str::<Envelope>(trimmed) {
        Ok(Envelope {
            result: Some(inner),
            ..
        }) => match parse_payload(strip_fences(&inner)) {
            Ok(payload) => return Ok(payload),
            Err(e) => debug!("envelope result parse failed: {e}"),
        },
        Ok(_) => debug!("envelope parse: no result field"),
        Err(e) => debug!("envelope parse failed: {e}"),
    }

    match parse_payload(strip_fences(trimmed)) {
        Ok(payload) => return Ok(payload),
        Err(e) => debug!("fence-stripped parse failed: {e}"),
    }

    let head: String = trimmed.chars().take(120).collect();
    Err(Error::Extraction(format!(
        "reviewer did not emit valid review JSON (issues/summary); first 120 chars: {head}"
    )))
}

/// Return the interior of the first fenced block, or the substring between
/// the first `{` and the last `}`, or the trimmed text unchanged.
fn strip_fences(text: &str) -> &str {
    if let Some(caps) = FENCE.captures(text) {
        return caps.get(1).map_or("", |m| m.as_str()).trim();
    }
    if let (Some(first), Some(last)) = (text.find('{'), text.rfind('}'))
        && last > first
    {
        return &text[first..=last];
    }
    text.trim()
}
