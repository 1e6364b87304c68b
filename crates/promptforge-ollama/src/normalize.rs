//! Shape normalization for decoded response values
//!
//! Serving endpoints disagree on where the generated text lives. Simple
//! wrappers (`{"response": "..."}`) are probed first, then chat-completion
//! `choices`, and anything unrecognized degrades to its JSON rendering
//! instead of failing.

use serde_json::{Map, Value};

/// Top-level object keys that may carry the text, in priority order
const TEXT_KEYS: &[&str] = &["text", "result", "response", "content", "message", "output"];

/// Keys probed on each object element of an array
const ELEMENT_KEYS: &[&str] = &["text", "result", "message", "response", "content"];

/// Keys probed when a text key holds a nested object
const NESTED_KEYS: &[&str] = &["content", "text"];

/// Keys of a choice that may hold a message-like object
const CHOICE_MESSAGE_KEYS: &[&str] = &["message", "delta"];

/// Reduce one decoded JSON value to text
///
/// Never fails: shapes without a recognized text location are rendered as
/// compact JSON (an empty object becomes `{}`).
pub fn normalize(value: &Value) -> String {
    match value {
        Value::Object(map) => normalize_object(map),
        Value::Array(items) => join_elements(items),
        scalar => render(scalar),
    }
}

fn normalize_object(map: &Map<String, Value>) -> String {
    if let Some(value) = TEXT_KEYS.iter().find_map(|key| map.get(*key)) {
        return match value {
            Value::Array(items) => join_elements(items),
            Value::Object(nested) => NESTED_KEYS
                .iter()
                .find_map(|key| nested.get(*key).and_then(Value::as_str))
                .map_or_else(|| render_map(nested), ToOwned::to_owned),
            scalar => render(scalar),
        };
    }

    if let Some(Value::Array(choices)) = map.get("choices") {
        return choices.iter().map(choice_text).collect::<Vec<_>>().join("\n");
    }

    render_map(map)
}

/// Extract text from each array element and join with newlines
fn join_elements(items: &[Value]) -> String {
    items.iter().map(element_text).collect::<Vec<_>>().join("\n")
}

fn element_text(item: &Value) -> String {
    match item {
        Value::Object(map) => ELEMENT_KEYS
            .iter()
            .find_map(|key| map.get(*key))
            .map_or_else(|| render_map(map), render),
        other => render(other),
    }
}

/// Extract text from one entry of a chat-completion `choices` array
fn choice_text(choice: &Value) -> String {
    let Value::Object(map) = choice else {
        return render(choice);
    };

    if let Some(text) = map.get("text").and_then(Value::as_str) {
        return text.to_owned();
    }

    let message = first_truthy(map, CHOICE_MESSAGE_KEYS);
    if let Some(Value::Object(message)) = message
        && let Some(content) = first_truthy(message, NESTED_KEYS).and_then(Value::as_str)
    {
        return content.to_owned();
    }

    if let Some(content) = map.get("content").and_then(Value::as_str) {
        return content.to_owned();
    }

    render_map(map)
}

/// First value among `keys` that is present and non-empty
fn first_truthy<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|key| map.get(*key)).find(|value| is_truthy(value))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Strings verbatim, everything else as compact JSON
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_map(map: &Map<String, Value>) -> String {
    serde_json::to_string(map).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_key_returns_string() {
        assert_eq!(normalize(&json!({"text": "hello", "model": "m"})), "hello");
    }

    #[test]
    fn key_priority_is_fixed() {
        let value = json!({"output": "o", "message": "m", "response": "r", "result": "x"});
        assert_eq!(normalize(&value), "x");

        let value = json!({"output": "o", "content": "c"});
        assert_eq!(normalize(&value), "c");
    }

    #[test]
    fn ollama_generate_shape() {
        let value = json!({
            "model": "llama3.2:3b",
            "created_at": "2024-01-01T00:00:00Z",
            "response": "The sky is blue.",
            "done": true
        });
        assert_eq!(normalize(&value), "The sky is blue.");
    }

    #[test]
    fn non_string_scalars_are_rendered() {
        assert_eq!(normalize(&json!({"result": 42})), "42");
        assert_eq!(normalize(&json!({"result": 1.5})), "1.5");
        assert_eq!(normalize(&json!({"text": true})), "true");
        assert_eq!(normalize(&json!({"text": null})), "null");
    }

    #[test]
    fn nested_message_object_prefers_content() {
        let value = json!({"message": {"role": "assistant", "content": "hi", "text": "ignored"}});
        assert_eq!(normalize(&value), "hi");

        let value = json!({"message": {"text": "from text"}});
        assert_eq!(normalize(&value), "from text");
    }

    #[test]
    fn nested_object_without_text_is_rendered() {
        let value = json!({"output": {"tokens": 3}});
        assert_eq!(normalize(&value), r#"{"tokens":3}"#);

        // Non-string content does not count
        let value = json!({"message": {"content": ["a"]}});
        assert_eq!(normalize(&value), r#"{"content":["a"]}"#);
    }

    #[test]
    fn nested_array_joins_elements() {
        let value = json!({
            "output": [
                "plain",
                {"text": "from text"},
                {"content": "from content"},
                {"result": 7},
                {"unknown": 1},
                3
            ]
        });
        assert_eq!(
            normalize(&value),
            "plain\nfrom text\nfrom content\n7\n{\"unknown\":1}\n3"
        );
    }

    #[test]
    fn element_keys_follow_element_priority() {
        // `message` outranks `response` for elements but not for top-level objects
        let value = json!([{"response": "r", "message": "m"}]);
        assert_eq!(normalize(&value), "m");
    }

    #[test]
    fn choices_with_messages() {
        let value = json!({"choices": [{"message": {"content": "a"}}, {"message": {"content": "b"}}]});
        assert_eq!(normalize(&value), "a\nb");
    }

    #[test]
    fn choices_variants() {
        let value = json!({
            "choices": [
                {"text": "completion"},
                {"delta": {"content": "streamed"}},
                {"message": {"text": "message text"}},
                {"content": "direct"},
                {"index": 4},
                "bare"
            ]
        });
        assert_eq!(
            normalize(&value),
            "completion\nstreamed\nmessage text\ndirect\n{\"index\":4}\nbare"
        );
    }

    #[test]
    fn empty_message_falls_back_to_delta() {
        let value = json!({"choices": [{"message": {}, "delta": {"content": "d"}}]});
        assert_eq!(normalize(&value), "d");
    }

    #[test]
    fn empty_content_falls_back_to_text() {
        let value = json!({"choices": [{"message": {"content": "", "text": "t"}}]});
        assert_eq!(normalize(&value), "t");
    }

    #[test]
    fn text_keys_outrank_choices() {
        let value = json!({"response": "wrapper", "choices": [{"text": "choice"}]});
        assert_eq!(normalize(&value), "wrapper");
    }

    #[test]
    fn non_array_choices_are_ignored() {
        let value = json!({"choices": "nope"});
        assert_eq!(normalize(&value), r#"{"choices":"nope"}"#);
    }

    #[test]
    fn unrecognized_object_is_rendered() {
        assert_eq!(normalize(&json!({})), "{}");
        assert_eq!(normalize(&json!({"done": true})), r#"{"done":true}"#);
    }

    #[test]
    fn top_level_array() {
        let value = json!(["a", {"text": "b"}, {"output": "ignored for elements"}]);
        assert_eq!(normalize(&value), "a\nb\n{\"output\":\"ignored for elements\"}");
        assert_eq!(normalize(&json!([])), "");
    }

    #[test]
    fn scalars() {
        assert_eq!(normalize(&json!("plain string")), "plain string");
        assert_eq!(normalize(&json!(12)), "12");
        assert_eq!(normalize(&json!(false)), "false");
        assert_eq!(normalize(&Value::Null), "null");
    }

    #[test]
    fn plain_string_is_idempotent() {
        let once = normalize(&json!("plain string"));
        assert_eq!(normalize(&Value::String(once.clone())), once);
    }
}
