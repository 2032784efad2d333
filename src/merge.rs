use std::collections::HashSet;

use crate::schema::{Category, MergeResult, ReviewPayload, Severity};

/// Cap on the per-side divergence key lists in [`MergeResult`].
const MAX_ONLY_KEYS: usize = 50;

fn category_weight(category: Category) -> f64 {
    match category {
        Category::Security => 1.0,
        Category::Correctness => 0.9,
        Category::Reliability => 0.9,
        Category::Architecture => 0.7,
        Category::Performance => 0.6,
        Category::Tests => 0.5,
        Category::Docs => 0.3,
    }
}

fn severity_weight(severity: Severity) -> f64 {
    match severity {
        Severity::Low => 0.3,
        Severity::Med => 0.6,
        Severity::High => 1.0,
    }
}

fn weighted_sum(payload: &ReviewPayload) -> f64 {
    payload
        .issues
        .iter()
        .map(|i| category_weight(i.category) * severity_weight(i.severity))
        .sum()
}

/// Unique issue keys in first-occurrence order.
fn unique_keys(payload: &ReviewPayload) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for issue in &payload.issues {
        let key = issue.key();
        if seen.insert(key.clone()) {
            keys.push(key);
        }
    }
    keys
}

/// Reconcile two review payloads into a bounded 1–10 score plus overlap
/// metrics. Pure and total: defined for empty issue lists and for summary
/// counts that disagree with the itemized issues.
///
/// The score rewards agreement between the two reviewers (coverage) and
/// similar thoroughness (balance), and discounts as declared high-severity
/// findings accumulate.
pub fn reconcile(a: &ReviewPayload, b: &ReviewPayload) -> MergeResult {
    let a_keys = unique_keys(a);
    let b_keys = unique_keys(b);
    let a_set: HashSet<&str> = a_keys.iter().map(String::as_str).collect();
    let b_set: HashSet<&str> = b_keys.iter().map(String::as_str).collect();

    let overlap = a_keys.iter().filter(|k| b_set.contains(k.as_str())).count();
    let union = (a_keys.len() + b_keys.len() - overlap).max(1);

    let coverage = overlap as f64 / union as f64;

    let total = a_keys.len() + b_keys.len();
    let balance = if total == 0 {
        // Neither side reported anything: no divergence.
        1.0
    } else {
        1.0 - (a_keys.len() as f64 - b_keys.len() as f64).abs() / total as f64
    };

    let weighted = weighted_sum(a) + weighted_sum(b);

    // Declared counts are tool-controlled u64s; sum in f64 so extreme
    // values cannot overflow. The penalty is capped at 0.9 regardless.
    let declared_high = a.summary.counts.high as f64 + b.summary.counts.high as f64;
    let high_penalty = (0.3 + 0.07 * declared_high).min(0.9);

    let raw = (0.55 * coverage + 0.35 * balance + 0.10 * (weighted / 10.0).tanh()) * 10.0;
    let scored = (raw * (1.0 - high_penalty)).round();
    let score = if scored.is_finite() {
        scored.clamp(1.0, 10.0) as u8
    } else {
        1
    };

    let a_only: Vec<String> = a_keys
        .iter()
        .filter(|k| !b_set.contains(k.as_str()))
        .take(MAX_ONLY_KEYS)
        .cloned()
        .collect();
    let b_only: Vec<String> = b_keys
        .iter()
        .filter(|k| !a_set.contains(k.as_str()))
        .take(MAX_ONLY_KEYS)
        .cloned()
        .collect();

    MergeResult {
        score,
        overlap,
        union,
        a_only_keys: a_only,
        b_only_keys: b_only,
    }
}
