//! Deserialization from interchange JSON into typed records.
//!
//! The main entry point is [`from_interchange`], which takes a
//! `&serde_json::Value` produced by the specification parser and
//! yields a [`ScreenSpec`].

use crate::types::*;

/// Errors during interchange JSON deserialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterchangeError {
    /// The bundle is missing a required top-level array.
    #[error("bundle missing required field: '{field}'")]
    MissingField { field: String },
    /// A record is missing a required field or has a field of the wrong type.
    #[error("{kind} #{index}: {message}")]
    RecordError {
        kind: String,
        index: usize,
        message: String,
    },
    /// The bundle is not a JSON object.
    #[error("invalid bundle: {0}")]
    InvalidBundle(String),
}

/// Deserialize an interchange JSON bundle into a [`ScreenSpec`].
///
/// Expects `{ "interfaces": [...], "flows": [...] }`. Unknown fields
/// are ignored for forward compatibility.
pub fn from_interchange(bundle: &serde_json::Value) -> Result<ScreenSpec, InterchangeError> {
    if !bundle.is_object() {
        return Err(InterchangeError::InvalidBundle(
            "expected a JSON object".to_string(),
        ));
    }

    let interfaces_arr = required_array(bundle, "interfaces")?;
    let flows_arr = required_array(bundle, "flows")?;

    let interfaces = interfaces_arr
        .iter()
        .enumerate()
        .map(|(index, obj)| parse_interface(obj, index))
        .collect::<Result<Vec<_>, _>>()?;

    let flows = flows_arr
        .iter()
        .enumerate()
        .map(|(index, obj)| parse_flow(obj, index))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ScreenSpec { interfaces, flows })
}

// ── Parsing helpers ─────────────────────────────────────────────────

fn required_array<'a>(
    bundle: &'a serde_json::Value,
    field: &str,
) -> Result<&'a Vec<serde_json::Value>, InterchangeError> {
    bundle
        .get(field)
        .and_then(|v| v.as_array())
        .ok_or_else(|| InterchangeError::MissingField {
            field: field.to_string(),
        })
}

fn record_error(kind: &str, index: usize, message: String) -> InterchangeError {
    InterchangeError::RecordError {
        kind: kind.to_string(),
        index,
        message,
    }
}

fn required_str(
    obj: &serde_json::Value,
    field: &str,
    kind: &str,
    index: usize,
) -> Result<String, InterchangeError> {
    obj.get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| record_error(kind, index, format!("missing '{}' field", field)))
}

fn optional_str(
    obj: &serde_json::Value,
    field: &str,
    kind: &str,
    index: usize,
) -> Result<Option<String>, InterchangeError> {
    match obj.get(field) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(record_error(
            kind,
            index,
            format!("'{}' must be a string", field),
        )),
    }
}

fn parse_interface(obj: &serde_json::Value, index: usize) -> Result<InterfaceNode, InterchangeError> {
    let name = required_str(obj, "name", "interface", index)?;

    let actions = match obj.get("actions") {
        None | Some(serde_json::Value::Null) => Vec::new(),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .map(|a| {
                a.as_str().map(|s| s.to_string()).ok_or_else(|| {
                    record_error(
                        "interface",
                        index,
                        format!("'{}': actions must be strings", name),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(record_error(
                "interface",
                index,
                format!("'{}': 'actions' must be an array", name),
            ))
        }
    };

    let node = InterfaceNode::new(name, actions);
    Ok(match optional_str(obj, "kind", "interface", index)? {
        Some(hint) => node.with_kind(InterfaceKind::from_hint(&hint)),
        None => node,
    })
}

fn parse_flow(obj: &serde_json::Value, index: usize) -> Result<FlowRecord, InterchangeError> {
    Ok(FlowRecord {
        from: required_str(obj, "from", "flow", index)?,
        to: required_str(obj, "to", "flow", index)?,
        trigger: required_str(obj, "trigger", "flow", index)?,
        label: optional_str(obj, "label", "flow", index)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_bundle() {
        let bundle = json!({
            "interfaces": [
                { "name": "home", "actions": ["open_settings"] },
                { "name": "settings" }
            ],
            "flows": [
                { "from": "home", "to": "settings", "trigger": "open_settings", "label": "Settings" }
            ]
        });

        let spec = from_interchange(&bundle).unwrap();
        assert_eq!(spec.interfaces.len(), 2);
        assert_eq!(spec.interfaces[0].kind, InterfaceKind::Main);
        assert!(spec.interfaces[1].actions.is_empty());
        assert_eq!(spec.flows[0].label.as_deref(), Some("Settings"));
    }

    #[test]
    fn test_kind_hint_overrides_name() {
        let bundle = json!({
            "interfaces": [{ "name": "landing", "kind": "entry" }],
            "flows": []
        });
        let spec = from_interchange(&bundle).unwrap();
        assert_eq!(spec.interfaces[0].kind, InterfaceKind::Main);
    }

    #[test]
    fn test_missing_flows_array() {
        let bundle = json!({ "interfaces": [] });
        let err = from_interchange(&bundle).unwrap_err();
        assert_eq!(
            err,
            InterchangeError::MissingField {
                field: "flows".to_string()
            }
        );
    }

    #[test]
    fn test_flow_missing_trigger() {
        let bundle = json!({
            "interfaces": [{ "name": "home" }],
            "flows": [{ "from": "home", "to": "home" }]
        });
        let err = from_interchange(&bundle).unwrap_err();
        assert!(matches!(err, InterchangeError::RecordError { ref kind, index: 0, .. } if kind == "flow"));
        assert!(err.to_string().contains("trigger"));
    }

    #[test]
    fn test_non_string_action_rejected() {
        let bundle = json!({
            "interfaces": [{ "name": "home", "actions": [1] }],
            "flows": []
        });
        assert!(from_interchange(&bundle).is_err());
    }

    #[test]
    fn test_not_an_object() {
        let err = from_interchange(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, InterchangeError::InvalidBundle(_)));
    }
}
