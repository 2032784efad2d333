use crate::schema::{MergeResult, ReviewPayload};

fn summarize(payload: &ReviewPayload) -> String {
    let c = &payload.summary.counts;
    format!(
        "Issues: {} | High: {}, Med: {}, Low: {}",
        payload.issues.len(),
        c.high,
        c.med,
        c.low
    )
}

fn bullet_list(keys: &[String]) -> String {
    if keys.is_empty() {
        "- (none)".to_string()
    } else {
        keys.iter()
            .map(|k| format!("- {k}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render both payloads plus the merge metrics as a fixed-structure
/// Markdown report. Headings and line formats are a scrape contract for
/// downstream tooling; keep them stable.
pub fn render(a: &ReviewPayload, b: &ReviewPayload, merge: &MergeResult) -> String {
    format!(
        "# Dual Review Report\n\n\
         **Score:** {}/10\n\n\
         ## Review A\n{}\n\n\
         ## Review B\n{}\n\n\
         ## Overlap\nMatched: {} of {} unique issues\n\n\
         ## A-only (first 50)\n{}\n\n\
         ## B-only (first 50)\n{}",
        merge.score,
        summarize(a),
        summarize(b),
        merge.overlap,
        merge.union,
        bullet_list(&merge.a_only_keys),
        bullet_list(&merge.b_only_keys),
    )
}
