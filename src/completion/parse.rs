//! Decoding the model's JSON answer.
//!
//! The model is told to return strings, but often doesn't: math answers come
//! back as numbers, `steps` as `null`. Any JSON object is accepted and its
//! fields are coerced to text; only non-JSON or non-object output fails.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::SolveError;

/// The fields we recognise in the model's JSON. Anything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModelAnswer {
    #[serde(default, deserialize_with = "lenient_text")]
    pub answer: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub steps: Vec<String>,
    #[serde(default, deserialize_with = "lenient_optional_text")]
    pub confidence: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub sources_used: Vec<String>,
}

/// Strip an optional code fence and decode what remains as a [`ModelAnswer`].
///
/// Missing or `null` fields default to empty. Text that is not JSON, or JSON
/// that is not an object, is a [`SolveError::Parse`].
pub fn parse_model_answer(text: &str) -> Result<ModelAnswer, SolveError> {
    let parse_error = |error: String| SolveError::Parse {
        error,
        raw: text.to_string(),
    };

    let value: Value =
        serde_json::from_str(extract_json(text)).map_err(|e| parse_error(e.to_string()))?;
    if !value.is_object() {
        return Err(parse_error("expected a JSON object".to_string()));
    }
    serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_to_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(value_to_text(Value::deserialize(deserializer)?))
}

// A lone scalar becomes a one-item list; null items are dropped.
fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(value_to_text).collect(),
        other => value_to_text(other).into_iter().collect(),
    })
}

/// Extract JSON from text that may be wrapped in a ```` ```lang ```` fence.
pub fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(after) = trimmed.strip_prefix("```")
        && let Some(inner) = after.strip_suffix("```")
    {
        return strip_language_tag(inner).trim();
    }

    trimmed
}

// The tag hugs the opening fence: ```json, ```JSON, ```json5.
fn strip_language_tag(s: &str) -> &str {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')))
        .unwrap_or(s.len());
    &s[end..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_json_plain() {
        assert_eq!(extract_json(r#"{"a": 1}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn extract_json_with_json_fence() {
        let input = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json(input), r#"{"a": 1}"#);
    }

    #[test]
    fn extract_json_with_plain_fence() {
        let input = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json(input), r#"{"a": 1}"#);
    }

    #[test]
    fn extract_json_with_other_tag() {
        let input = "```JSON5\n{\"a\": 1}\n```";
        assert_eq!(extract_json(input), r#"{"a": 1}"#);
    }

    #[test]
    fn extract_json_single_line_fence() {
        assert_eq!(extract_json("```{\"a\": 1}```"), r#"{"a": 1}"#);
    }

    #[test]
    fn extract_json_trims_whitespace() {
        assert_eq!(extract_json("  \n {\"a\": 1}  \n "), r#"{"a": 1}"#);
    }

    #[test]
    fn extract_json_no_closing_fence_returns_as_is() {
        let input = "```json\n{\"a\": 1}";
        assert_eq!(extract_json(input), input.trim());
    }

    #[test]
    fn parses_answer_and_steps() {
        let parsed =
            parse_model_answer(r#"{"answer": "4", "steps": ["Сложить 2 и 2", "Получить 4"]}"#)
                .unwrap();
        assert_eq!(parsed.answer, "4");
        assert_eq!(parsed.steps, vec!["Сложить 2 и 2", "Получить 4"]);
        assert!(parsed.confidence.is_none());
        assert!(parsed.sources_used.is_empty());
    }

    #[test]
    fn fenced_and_raw_decode_identically() {
        let raw = r#"{"answer": "x = 5", "steps": ["a", "b", "c"]}"#;
        let fenced = format!("```json\n{raw}\n```");
        assert_eq!(
            parse_model_answer(raw).unwrap(),
            parse_model_answer(&fenced).unwrap()
        );
    }

    #[test]
    fn missing_steps_defaults_to_empty() {
        let parsed = parse_model_answer(r#"{"answer": "42"}"#).unwrap();
        assert_eq!(parsed.answer, "42");
        assert!(parsed.steps.is_empty());
    }

    #[test]
    fn missing_answer_defaults_to_empty() {
        let parsed = parse_model_answer(r#"{"steps": ["only step"]}"#).unwrap();
        assert_eq!(parsed.answer, "");
        assert_eq!(parsed.steps.len(), 1);
    }

    #[test]
    fn grounded_fields_decoded() {
        let parsed = parse_model_answer(
            r#"{"answer": "4", "steps": [], "confidence": "высокая", "sources_used": ["Wikipedia"]}"#,
        )
        .unwrap();
        assert_eq!(parsed.confidence.as_deref(), Some("высокая"));
        assert_eq!(parsed.sources_used, vec!["Wikipedia"]);
    }

    #[test]
    fn unknown_fields_ignored() {
        let parsed = parse_model_answer(r#"{"answer": "4", "extra": {"x": 1}}"#).unwrap();
        assert_eq!(parsed.answer, "4");
    }

    #[test]
    fn invalid_json_fails() {
        let err = parse_model_answer("Ответ: 4").unwrap_err();
        match err {
            SolveError::Parse { raw, .. } => assert_eq!(raw, "Ответ: 4"),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn numeric_answer_becomes_text() {
        let parsed = parse_model_answer(r#"{"answer": 4, "steps": ["Сложить 2 и 2"]}"#).unwrap();
        assert_eq!(parsed.answer, "4");
        assert_eq!(parsed.steps, vec!["Сложить 2 и 2"]);

        let parsed = parse_model_answer(r#"{"answer": 2.5}"#).unwrap();
        assert_eq!(parsed.answer, "2.5");
        let parsed = parse_model_answer(r#"{"answer": true}"#).unwrap();
        assert_eq!(parsed.answer, "true");
    }

    #[test]
    fn null_answer_defaults_to_empty() {
        let parsed = parse_model_answer(r#"{"answer": null, "steps": ["a"]}"#).unwrap();
        assert_eq!(parsed.answer, "");
    }

    #[test]
    fn null_steps_default_to_empty() {
        let parsed = parse_model_answer(r#"{"answer": "4", "steps": null}"#).unwrap();
        assert_eq!(parsed.answer, "4");
        assert!(parsed.steps.is_empty());
    }

    #[test]
    fn scalar_step_items_become_text() {
        let parsed = parse_model_answer(r#"{"steps": [1, "два", null, 3.5]}"#).unwrap();
        assert_eq!(parsed.steps, vec!["1", "два", "3.5"]);
    }

    #[test]
    fn single_string_steps_become_one_step() {
        let parsed = parse_model_answer(r#"{"steps": "2 + 2 = 4"}"#).unwrap();
        assert_eq!(parsed.steps, vec!["2 + 2 = 4"]);
    }

    #[test]
    fn numeric_confidence_becomes_text() {
        let parsed = parse_model_answer(r#"{"confidence": 0.9, "sources_used": null}"#).unwrap();
        assert_eq!(parsed.confidence.as_deref(), Some("0.9"));
        assert!(parsed.sources_used.is_empty());
    }

    #[test]
    fn non_object_fails() {
        assert!(parse_model_answer(r#""just a string""#).is_err());
        assert!(parse_model_answer("42").is_err());
        assert!(parse_model_answer(r#"["4", ["a"]]"#).is_err());
    }
}
