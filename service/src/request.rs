// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON boundary: validate untyped action payloads into typed requests
//!
//! Malformed shapes are rejected here; the engine only ever sees typed,
//! well-formed requests.

use serde_json::Value;

use goban_core::{ColorId, Coord, MoveRequest};

use crate::ServiceError;

/// Parse an action payload of the form
/// `{"type": "place", "pos": {"x": 3, "y": 4}, "color": 0}`.
///
/// Unknown `type` strings yield [`ServiceError::UnknownActionType`]; a known
/// type with a bad shape yields [`ServiceError::MalformedRequest`].
pub fn parse_action(payload: &Value) -> Result<MoveRequest, ServiceError> {
    let kind = payload
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ServiceError::MalformedRequest("missing \"type\"".into()))?;

    match kind {
        "place" => Ok(MoveRequest::Place {
            pos: coord_field(payload, "pos")?,
            color: color_field(payload)?,
        }),
        "move" => Ok(MoveRequest::Move {
            from: coord_field(payload, "from")?,
            to: coord_field(payload, "to")?,
            color: color_field(payload)?,
        }),
        "remove" => Ok(MoveRequest::Remove {
            pos: coord_field(payload, "pos")?,
        }),
        other => Err(ServiceError::UnknownActionType(other.to_string())),
    }
}

fn coord_field(payload: &Value, key: &str) -> Result<Coord, ServiceError> {
    let obj = payload
        .get(key)
        .ok_or_else(|| ServiceError::MalformedRequest(format!("missing \"{key}\"")))?;
    let x = axis(obj, key, "x")?;
    let y = axis(obj, key, "y")?;
    Ok(Coord::new(x, y))
}

fn axis(obj: &Value, key: &str, axis: &str) -> Result<u8, ServiceError> {
    obj.get(axis)
        .and_then(Value::as_u64)
        .and_then(|v| u8::try_from(v).ok())
        .ok_or_else(|| ServiceError::MalformedRequest(format!("bad \"{key}.{axis}\"")))
}

fn color_field(payload: &Value) -> Result<ColorId, ServiceError> {
    payload
        .get("color")
        .and_then(Value::as_u64)
        .and_then(|v| u8::try_from(v).ok())
        .map(ColorId)
        .ok_or_else(|| ServiceError::MalformedRequest("bad \"color\"".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn place_payload_parses() {
        let req = parse_action(&json!({
            "type": "place",
            "pos": {"x": 3, "y": 4},
            "color": 1,
        }))
        .unwrap();
        assert_eq!(
            req,
            MoveRequest::Place {
                pos: Coord::new(3, 4),
                color: ColorId(1),
            }
        );
    }

    #[test]
    fn unknown_type_is_its_own_error() {
        let err = parse_action(&json!({"type": "teleport"})).unwrap_err();
        assert_eq!(err, ServiceError::UnknownActionType("teleport".into()));
    }

    #[test]
    fn malformed_shapes_never_reach_the_engine() {
        assert!(matches!(
            parse_action(&json!({"pos": {"x": 1, "y": 1}})),
            Err(ServiceError::MalformedRequest(_))
        ));
        assert!(matches!(
            parse_action(&json!({"type": "place", "pos": {"x": 300, "y": 1}, "color": 0})),
            Err(ServiceError::MalformedRequest(_))
        ));
        assert!(matches!(
            parse_action(&json!({"type": "move", "from": {"x": 1, "y": 1}, "color": 0})),
            Err(ServiceError::MalformedRequest(_))
        ));
    }
}
