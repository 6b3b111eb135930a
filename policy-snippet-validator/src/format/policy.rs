//! Traffic policy block validation.
//!
//! A block passes when it parses and its root either carries a policy key or
//! wraps a policy in one of the recognized envelopes:
//! - agent config: `endpoints: [ { traffic_policy: { on_http_request: ... } } ]`
//! - API request body: `{ "traffic_policy": "<policy as JSON string>", "type": "cloud" }`

use serde_json::{Map, Value};
use serde_saphyr::{DuplicateKeyPolicy, Options};
use tracing::trace;

use crate::error::Rejection;
use crate::format::BlockFormat;

/// Top-level keys identifying a traffic policy document.
pub const POLICY_KEYS: [&str; 3] = ["on_http_request", "on_http_response", "on_tcp_connect"];

/// `POLICY_KEYS` as listed in rejection messages.
pub const POLICY_KEYS_HINT: &str = "on_http_request, on_http_response, on_tcp_connect";

/// Literal (non-structural) check used to pick candidate blocks.
#[must_use]
pub fn mentions_policy_key(content: &str) -> bool {
    POLICY_KEYS.iter().any(|key| content.contains(key))
}

fn has_policy_key(map: &Map<String, Value>) -> bool {
    POLICY_KEYS.iter().any(|key| map.contains_key(*key))
}

/// Decide which parser to use. The fence tag is only a hint: JSON objects are
/// sometimes fenced as `yaml` and the other way round.
#[must_use]
pub fn resolve_format(content: &str, declared: BlockFormat) -> BlockFormat {
    let raw = content.trim();
    if raw.starts_with('{') {
        BlockFormat::Json
    } else if raw
        .lines()
        .any(|line| POLICY_KEYS.iter().any(|key| line.starts_with(key)))
    {
        BlockFormat::Yaml
    } else {
        declared
    }
}

/// True when a YAML text holds no node at all (blank lines, comments and
/// document markers only).
fn is_blank_yaml(content: &str) -> bool {
    content.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

fn parse(content: &str, format: BlockFormat) -> Result<Value, Rejection> {
    match format {
        BlockFormat::Json => {
            serde_json::from_str(content).map_err(|e| Rejection::Syntax(e.to_string()))
        }
        BlockFormat::Yaml => {
            if is_blank_yaml(content) {
                return Ok(Value::Null);
            }
            // Repeated keys are accepted, the last occurrence wins.
            let options = Options {
                duplicate_keys: DuplicateKeyPolicy::LastWins,
                ..Default::default()
            };
            serde_saphyr::from_str_with_options::<Value>(content, options).map_err(|e| {
                let message = e.to_string();
                Rejection::Syntax(message.lines().next().unwrap_or_default().to_owned())
            })
        }
    }
}

/// `endpoints: [ { traffic_policy: { <policy key>: ... } } ]`
fn wraps_agent_endpoints(map: &Map<String, Value>) -> bool {
    let Some(Value::Array(endpoints)) = map.get("endpoints") else {
        return false;
    };
    endpoints.iter().any(|endpoint| {
        matches!(
            endpoint.get("traffic_policy"),
            Some(Value::Object(policy)) if has_policy_key(policy)
        )
    })
}

/// `{ "traffic_policy": "<JSON policy>", "type": "cloud" }`
fn wraps_cloud_endpoint(map: &Map<String, Value>) -> bool {
    let Some(Value::String(policy)) = map.get("traffic_policy") else {
        return false;
    };
    if map.get("type").and_then(Value::as_str) != Some("cloud") {
        return false;
    }
    // An unparsable inner policy is reported as a missing policy key.
    matches!(
        serde_json::from_str::<Value>(policy),
        Ok(Value::Object(inner)) if has_policy_key(&inner)
    )
}

/// Structural acceptance of a parsed block; first matching rule wins.
fn accept(document: &Value) -> Result<(), Rejection> {
    let map = match document {
        Value::Object(map) => map,
        Value::Null => return Err(Rejection::EmptyDocument),
        _ => return Err(Rejection::RootNotObject),
    };

    if has_policy_key(map) || wraps_agent_endpoints(map) || wraps_cloud_endpoint(map) {
        Ok(())
    } else {
        Err(Rejection::MissingPolicyKey)
    }
}

/// Validate the content of one block.
///
/// # Errors
///
/// Returns the [`Rejection`] explaining why the block is not a valid traffic
/// policy.
pub fn validate_block(content: &str, declared: BlockFormat) -> Result<(), Rejection> {
    let format = resolve_format(content, declared);
    if format != declared {
        trace!(?declared, resolved = ?format, "block format overridden by content");
    }
    accept(&parse(content, format)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING: &str =
        "missing policy key (need one of: on_http_request, on_http_response, on_tcp_connect)";

    fn reason(content: &str, declared: BlockFormat) -> Option<String> {
        validate_block(content, declared)
            .err()
            .as_ref()
            .map(ToString::to_string)
    }

    #[test]
    fn test_hint_matches_keys() {
        assert_eq!(POLICY_KEYS.join(", "), POLICY_KEYS_HINT);
    }

    #[test]
    fn test_yaml_policy_passes() {
        let content = "\
on_http_request:
  - actions:
      - type: deny
";
        assert_eq!(reason(content, BlockFormat::Yaml), None);
    }

    #[test]
    fn test_yaml_duplicate_keys_last_wins() {
        let content = "on_http_request: []\non_http_request: []\n";
        assert_eq!(reason(content, BlockFormat::Yaml), None);

        let content = "on_http_request: []\nfoo: 1\nfoo: 2\n";
        assert_eq!(reason(content, BlockFormat::Yaml), None);
    }

    #[test]
    fn test_json_policy_passes() {
        assert_eq!(
            reason(r#"{"on_tcp_connect": [{"actions": []}]}"#, BlockFormat::Json),
            None
        );
    }

    #[test]
    fn test_brace_content_tagged_yaml_is_json() {
        let content = r#"{"on_http_request": []}"#;
        assert_eq!(resolve_format(content, BlockFormat::Yaml), BlockFormat::Json);
        assert_eq!(reason(content, BlockFormat::Yaml), None);
    }

    #[test]
    fn test_policy_key_line_tagged_json_is_yaml() {
        let content = "# comment\non_http_response:\n  - actions: []\n";
        assert_eq!(resolve_format(content, BlockFormat::Json), BlockFormat::Yaml);
        assert_eq!(reason(content, BlockFormat::Json), None);
    }

    #[test]
    fn test_indented_policy_key_keeps_declared_format() {
        let content = "endpoints:\n  - traffic_policy:\n      on_http_request: []\n";
        assert_eq!(resolve_format(content, BlockFormat::Json), BlockFormat::Json);
        assert_eq!(resolve_format(content, BlockFormat::Yaml), BlockFormat::Yaml);
    }

    #[test]
    fn test_agent_endpoints_envelope_passes() {
        let content = r#"{"endpoints": [{"traffic_policy": {"on_http_request": []}}]}"#;
        assert_eq!(reason(content, BlockFormat::Json), None);

        let yaml = "\
endpoints:
  - name: first
  - url: https://example.com
    traffic_policy:
      on_http_request: []
";
        assert_eq!(reason(yaml, BlockFormat::Yaml), None);
    }

    #[test]
    fn test_agent_endpoints_without_policy_fails() {
        let content = r#"{"endpoints": [{"traffic_policy": {"on_foo": []}}, "on_http_request"]}"#;
        assert_eq!(reason(content, BlockFormat::Json).as_deref(), Some(MISSING));

        let content = r#"{"endpoints": {"traffic_policy": {"on_http_request": []}}}"#;
        assert_eq!(reason(content, BlockFormat::Json).as_deref(), Some(MISSING));
    }

    #[test]
    fn test_cloud_envelope_passes() {
        let content = r#"{"traffic_policy": "{\"on_http_request\": []}", "type": "cloud"}"#;
        assert_eq!(reason(content, BlockFormat::Json), None);
    }

    #[test]
    fn test_cloud_envelope_with_bad_inner_json_fails() {
        let content = r#"{"traffic_policy": "not json", "type": "cloud"}"#;
        assert_eq!(reason(content, BlockFormat::Json).as_deref(), Some(MISSING));
    }

    #[test]
    fn test_cloud_envelope_requires_cloud_type() {
        let content = r#"{"traffic_policy": "{\"on_http_request\": []}", "type": "agent"}"#;
        assert_eq!(reason(content, BlockFormat::Json).as_deref(), Some(MISSING));
    }

    #[test]
    fn test_missing_policy_key() {
        assert_eq!(
            reason(r#"{"foo": "bar"}"#, BlockFormat::Json).as_deref(),
            Some(MISSING)
        );
    }

    #[test]
    fn test_empty_document() {
        let content = "# on_http_request is documented below\n";
        assert_eq!(
            reason(content, BlockFormat::Yaml).as_deref(),
            Some("empty document")
        );
        assert_eq!(reason("null", BlockFormat::Json).as_deref(), Some("empty document"));
    }

    #[test]
    fn test_root_must_be_object() {
        assert_eq!(
            reason("- on_http_request\n- on_tcp_connect\n", BlockFormat::Yaml).as_deref(),
            Some("root must be an object")
        );
        assert_eq!(
            reason(r#"["on_http_request"]"#, BlockFormat::Json).as_deref(),
            Some("root must be an object")
        );
        assert_eq!(
            reason(r#""on_http_request""#, BlockFormat::Json).as_deref(),
            Some("root must be an object")
        );
    }

    #[test]
    fn test_json_syntax_error() {
        let err = validate_block(r#"{"on_http_request": [}"#, BlockFormat::Json).unwrap_err();
        assert!(matches!(err, Rejection::Syntax(_)), "got: {err:?}");
    }

    #[test]
    fn test_yaml_syntax_error_is_single_line() {
        let content = "on_http_request:\n  - actions: [unclosed\n";
        let err = validate_block(content, BlockFormat::Yaml).unwrap_err();
        let Rejection::Syntax(message) = err else {
            panic!("expected syntax error, got {err:?}");
        };
        assert!(!message.is_empty());
        assert!(!message.contains('\n'), "got: {message}");
    }
}
