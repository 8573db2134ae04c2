//! Interpretation of raw model output as a question list.

/// Parse `raw` as a JSON array of strings.
///
/// A single surrounding markdown code fence is tolerated; anything else that
/// is not an array of strings yields `None`.
pub fn parse_questions(raw: &str) -> Option<Vec<String>> {
    serde_json::from_str(strip_code_fence(raw)).ok()
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. "json") on the opening line
    match body.split_once('\n') {
        Some((info, content)) if !info.trim_start().starts_with('[') => content.trim(),
        _ => body.trim(),
    }
}
