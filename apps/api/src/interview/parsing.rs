//! Turning free-form model output into typed interview values.
//!
//! Everything here is pure: raw text in, `Option`/`Vec` out. Failures are
//! expected variability of generated text and are reported as `None` so the
//! orchestrator can move on to its next tier.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::interview::defaults::{FALLBACK_OVERALL_FEEDBACK, FALLBACK_OVERALL_SCORE};
use crate::interview::types::FeedbackResult;
use crate::llm_client::strip_json_fences;

/// Leading `1.`, `2)`, `- ` or `* ` list marker. A bullet needs trailing
/// whitespace so a `**bold**` opener is not read as one.
static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\d+\s*[.)]\s*|[-*]\s+)").expect("list marker regex is valid"));

/// Leading `Q1:` / `**Question 2.**` style label.
static QUESTION_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\*{0,2}\s*q(?:uestion)?\s*\d+\s*[:.)]\s*\*{0,2}\s*")
        .expect("question label regex is valid")
});

/// Lines at or below this length are never treated as questions.
const MIN_QUESTION_LEN: usize = 10;
/// Unmarked lines without a `?` must be longer than this to count.
const LONG_LINE_LEN: usize = 30;

/// Tier 1: fence-stripped strict JSON array of strings.
///
/// Returns `None` when the text is not a JSON array or holds no usable strings.
/// Non-string elements are skipped and blank strings dropped.
pub fn parse_question_array(raw: &str, count: usize) -> Option<Vec<String>> {
    let items: Vec<Value> = serde_json::from_str(strip_json_fences(raw)).ok()?;

    let questions: Vec<String> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .take(count)
        .collect();

    (!questions.is_empty()).then_some(questions)
}

/// Tier 2: pulls question-like lines out of prose.
///
/// A line survives when, after its list marker or `Qn:` label is removed, it
/// is longer than ten characters and either contains `?`, is longer than
/// thirty characters, or was written as a numbered/bulleted/labelled item.
pub fn parse_question_lines(raw: &str, count: usize) -> Vec<String> {
    raw.lines()
        .filter_map(|line| {
            let mut text = line.trim();
            let mut listed = false;
            if let Some(m) = LIST_MARKER.find(text) {
                text = &text[m.end()..];
                listed = true;
            }
            if let Some(m) = QUESTION_LABEL.find(text) {
                text = &text[m.end()..];
                listed = true;
            }
            let text = unquote_json_element(text.trim());
            let len = text.chars().count();

            let question_like =
                len > MIN_QUESTION_LEN && (text.contains('?') || len > LONG_LINE_LEN || listed);
            question_like.then(|| text.to_string())
        })
        .filter(|text| !text.starts_with("```"))
        .take(count)
        .collect()
}

/// Unwraps a line salvaged from a broken JSON array (`"...",`). Any other
/// line is returned untouched, quotes included.
fn unquote_json_element(text: &str) -> &str {
    let candidate = text.strip_suffix(',').unwrap_or(text).trim_end();
    match candidate
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner.trim(),
        None => text,
    }
}

/// Fence-stripped strict JSON object, coerced into the feedback shape.
///
/// Only a reply that is not a JSON object yields `None`. Within an object:
/// a missing or non-object `feedback` becomes an empty map and non-string
/// entries are rendered as JSON text; `overall_score` may be a number or a
/// numeric string and is rounded and clamped to 0–100, else 70; a missing or
/// blank `overall_feedback` becomes the fallback summary.
pub fn parse_feedback(raw: &str) -> Option<FeedbackResult> {
    let parsed: Map<String, Value> = serde_json::from_str(strip_json_fences(raw)).ok()?;

    let feedback = match parsed.get("feedback") {
        Some(Value::Object(entries)) => entries
            .iter()
            .map(|(question, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (question.clone(), text)
            })
            .collect(),
        _ => BTreeMap::new(),
    };

    let overall_score = parsed
        .get("overall_score")
        .and_then(score_value)
        .filter(|s| s.is_finite())
        .map(|s| s.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(FALLBACK_OVERALL_SCORE);

    let overall_feedback = match parsed.get("overall_feedback") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => FALLBACK_OVERALL_FEEDBACK.to_string(),
    };

    Some(FeedbackResult {
        feedback,
        overall_score,
        overall_feedback,
    })
}

fn score_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Result returned when no usable feedback could be produced.
pub fn fallback_feedback() -> FeedbackResult {
    FeedbackResult {
        feedback: BTreeMap::new(),
        overall_score: FALLBACK_OVERALL_SCORE,
        overall_feedback: FALLBACK_OVERALL_FEEDBACK.to_string(),
    }
}
