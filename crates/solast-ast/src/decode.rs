//! Decoding compiler JSON into the typed tree, and encoding it back
//!
//! Decoding is strict about shape: a missing required field or a node kind
//! that cannot fill the slot it appears in aborts the whole decode. Fields
//! the model does not know are ignored.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::node::node_type_of;
use crate::{Node, SourceUnit};

#[derive(Debug, Error)]
pub enum DecodeError {
    /// E-DECODE-001: The input is not JSON at all
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// E-DECODE-002: A node object does not match its kind's shape
    #[error("malformed {node_type} node at {path}: {message}")]
    Shape {
        /// JSON path of the offending object, e.g. `$.nodes[0].body`
        path: String,
        node_type: String,
        id: Option<i64>,
        message: String,
    },

    /// E-DECODE-003: The root object is not a source unit
    #[error("expected a SourceUnit at the root, found {found}")]
    NotASourceUnit { found: String },
}

impl DecodeError {
    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::Json(_) => "E-DECODE-001",
            DecodeError::Shape { .. } => "E-DECODE-002",
            DecodeError::NotASourceUnit { .. } => "E-DECODE-003",
        }
    }
}

/// Decode the JSON text of one source unit.
pub fn decode(json: &str) -> Result<SourceUnit, DecodeError> {
    let value: Value = serde_json::from_str(json)?;
    decode_value(&value)
}

/// Decode an already-parsed JSON value holding one source unit.
pub fn decode_value(value: &Value) -> Result<SourceUnit, DecodeError> {
    match node_type_of(value) {
        Some("SourceUnit") => {}
        Some(other) => return Err(DecodeError::NotASourceUnit { found: other.to_string() }),
        None => {
            return Err(DecodeError::NotASourceUnit {
                found: "an object without nodeType".to_string(),
            })
        }
    }

    SourceUnit::deserialize(value).map_err(|err| shape_error(value, err))
}

/// Decode a single node of any kind, such as a fragment produced elsewhere
/// for insertion into a tree.
pub fn decode_node(value: &Value) -> Result<Node, DecodeError> {
    Node::deserialize(value).map_err(|err| shape_error(value, err))
}

/// Encode a source unit back into compiler JSON.
pub fn encode(unit: &SourceUnit) -> Result<Value, serde_json::Error> {
    serde_json::to_value(unit)
}

pub fn encode_string(unit: &SourceUnit) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(unit)
}

fn shape_error(root: &Value, err: serde_json::Error) -> DecodeError {
    let located = locate_failure(root, "$");
    match located {
        Some(err) => err,
        None => DecodeError::Shape {
            path: "$".to_string(),
            node_type: node_type_of(root).unwrap_or("<unknown>").to_string(),
            id: root.get("id").and_then(Value::as_i64),
            message: err.to_string(),
        },
    }
}

/// Find the innermost node object that fails to decode on its own.
fn locate_failure(value: &Value, path: &str) -> Option<DecodeError> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if let Some(err) = locate_failure(child, &format!("{path}.{key}")) {
                    return Some(err);
                }
            }
            let node_type = node_type_of(value)?;
            let err = Node::deserialize(value).err()?;
            debug!(path, node_type, error = %err, "node failed to decode");
            Some(DecodeError::Shape {
                path: path.to_string(),
                node_type: node_type.to_string(),
                id: value.get("id").and_then(Value::as_i64),
                message: err.to_string(),
            })
        }
        Value::Array(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, item)| locate_failure(item, &format!("{path}[{i}]"))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;
    use serde_json::json;

    fn unit_json(nodes: Value) -> Value {
        json!({
            "nodeType": "SourceUnit",
            "id": 100,
            "src": "0:120:0",
            "absolutePath": "Token.sol",
            "nodes": nodes
        })
    }

    fn pragma_json() -> Value {
        json!({
            "nodeType": "PragmaDirective",
            "id": 1,
            "src": "0:23:0",
            "literals": ["solidity", "^", "0.8", ".0"]
        })
    }

    #[test]
    fn test_decode_minimal_unit() {
        let unit = decode_value(&unit_json(json!([pragma_json()]))).unwrap();
        assert_eq!(unit.id, NodeId(100));
        assert_eq!(unit.nodes.len(), 1);
        match &unit.nodes[0] {
            Declaration::PragmaDirective(p) => assert_eq!(p.literals[0], "solidity"),
            other => panic!("unexpected node: {:?}", other.kind()),
        }
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut pragma = pragma_json();
        pragma["somethingNew"] = json!({"nested": true});
        let unit = decode_value(&unit_json(json!([pragma]))).unwrap();
        assert_eq!(unit.nodes.len(), 1);
    }

    #[test]
    fn test_missing_required_field_reports_path() {
        let broken = json!({
            "nodeType": "ContractDefinition",
            "id": 7,
            "src": "25:90:0",
            "name": "Token",
            "contractKind": "contract",
            "nodes": [
                { "nodeType": "EventDefinition", "id": 8, "src": "40:20:0", "name": "Ping" }
            ]
        });
        let err = decode_value(&unit_json(json!([pragma_json(), broken]))).unwrap_err();
        match err {
            DecodeError::Shape { path, node_type, id, .. } => {
                assert_eq!(path, "$.nodes[1].nodes[0]");
                assert_eq!(node_type, "EventDefinition");
                assert_eq!(id, Some(8));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_family_in_slot_is_rejected() {
        // A statement where only expressions are allowed
        let stmt = json!({
            "nodeType": "ExpressionStatement",
            "id": 11,
            "src": "0:1:0",
            "expression": { "nodeType": "Break", "id": 12, "src": "0:1:0" }
        });
        let err = decode_node(&stmt).unwrap_err();
        assert_eq!(err.code(), "E-DECODE-002");
        match err {
            DecodeError::Shape { node_type, id, .. } => {
                assert_eq!(node_type, "ExpressionStatement");
                assert_eq!(id, Some(11));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_root_must_be_source_unit() {
        let err = decode_value(&pragma_json()).unwrap_err();
        assert!(matches!(err, DecodeError::NotASourceUnit { ref found } if found == "PragmaDirective"));
        assert!(matches!(decode("{not json"), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_encode_then_decode_is_stable() {
        let value = unit_json(json!([pragma_json()]));
        let unit = decode_value(&value).unwrap();
        let encoded = encode(&unit).unwrap();
        assert_eq!(encoded["nodeType"], "SourceUnit");
        assert_eq!(encoded["nodes"][0]["nodeType"], "PragmaDirective");
        assert_eq!(encoded["nodes"][0]["src"], "0:23:0");
        assert_eq!(decode_value(&encoded).unwrap(), unit);
    }
}
