//! Turns normalized level text into the typed `Level` model.
//!
//! The file is read into a dynamic `serde_json::Value` first; the few
//! fields the tool interprets are pulled out by hand so every failure can
//! say exactly which tile or action is at fault. Everything else stays in
//! the raw maps untouched.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{Action, Level, Marker, TileAngle};

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// The text is not valid structured data even after normalization.
    /// `line`/`column` are 1-based when known, 0 when the failure has no
    /// single position (the message then names the offending item).
    #[error("malformed level file: {message}")]
    Malformed {
        line: usize,
        column: usize,
        message: String,
    },
    /// A required top-level field is absent. `field` is the on-disk key.
    #[error("missing required field `{field}`{}", field_hint(.field))]
    MissingField { field: &'static str },
    /// One `angleData` entry is neither a finite number nor a known
    /// marker string. Carries the index so a shell can highlight it.
    #[error("tile {index} holds an unsupported value: {value}")]
    InvalidTileValue { index: usize, value: Value },
}

// the tile list travels under a format-specific key; say both names
fn field_hint(field: &str) -> &'static str {
    match field {
        "angleData" => " (the tiles array)",
        _ => "",
    }
}

fn structural(message: String) -> ParseError {
    ParseError::Malformed {
        line: 0,
        column: 0,
        message,
    }
}

/// Parse the whole (already normalized) level text into a `Level`.
pub fn parse(text: &str) -> Result<Level, ParseError> {
    // Grab the entire file as a dynamic value first.
    let root: Value = serde_json::from_str(text).map_err(|e| ParseError::Malformed {
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    })?;

    let root = root
        .as_object()
        .ok_or_else(|| structural("top level is not an object".into()))?;

    let settings = match root.get("settings") {
        Some(Value::Object(map)) => map.clone(),
        Some(_) => return Err(structural("`settings` is not an object".into())),
        None => return Err(ParseError::MissingField { field: "settings" }),
    };

    let tiles = match root.get("angleData") {
        Some(Value::Array(entries)) => parse_tiles(entries)?,
        Some(_) => return Err(structural("`angleData` is not an array".into())),
        None => return Err(ParseError::MissingField { field: "angleData" }),
    };

    // No actions array just means an empty timeline.
    let actions = match root.get("actions") {
        Some(Value::Array(entries)) => {
            let mut actions = Vec::with_capacity(entries.len());
            for (i, entry) in entries.iter().enumerate() {
                actions.push(parse_action(i, entry)?);
            }
            actions
        }
        Some(_) => return Err(structural("`actions` is not an array".into())),
        None => Vec::new(),
    };

    Ok(Level {
        settings,
        actions,
        tiles,
    })
}

fn parse_tiles(entries: &[Value]) -> Result<Vec<TileAngle>, ParseError> {
    let mut tiles = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let tile = match entry {
            Value::Number(n) => n
                .as_f64()
                .filter(|deg| deg.is_finite())
                .map(TileAngle::Numeric),
            Value::String(s) => Marker::from_name(s).map(TileAngle::Symbolic),
            _ => None,
        };
        match tile {
            Some(tile) => tiles.push(tile),
            None => {
                return Err(ParseError::InvalidTileValue {
                    index,
                    value: entry.clone(),
                });
            }
        }
    }
    Ok(tiles)
}

fn parse_action(i: usize, entry: &Value) -> Result<Action, ParseError> {
    let obj = entry
        .as_object()
        .ok_or_else(|| structural(format!("action {i} is not an object")))?;

    let floor = obj
        .get("floor")
        .and_then(Value::as_i64)
        .ok_or_else(|| structural(format!("action {i} missing integer `floor`")))?;

    let event_type = obj
        .get("eventType")
        .and_then(Value::as_str)
        .ok_or_else(|| structural(format!("action {i} missing `eventType` string")))?
        .to_string();

    // Whatever is left is the event's parameter record; schema varies by
    // event type and is not ours to validate.
    let mut params: Map<String, Value> = obj.clone();
    params.remove("floor");
    params.remove("eventType");

    Ok(Action {
        floor,
        event_type,
        params,
    })
}

#[cfg(test)]
mod tests {
    use super::{ParseError, parse};
    use crate::model::{Marker, TileAngle};
    use serde_json::{Value, json};

    #[test]
    fn parses_minimal_level() {
        let level = parse(r#"{"settings": {"bpm": 100}, "angleData": [0, 90.5]}"#).unwrap();
        assert_eq!(level.settings.get("bpm"), Some(&json!(100)));
        assert_eq!(
            level.tiles,
            vec![TileAngle::Numeric(0.0), TileAngle::Numeric(90.5)]
        );
        assert!(level.actions.is_empty());
    }

    #[test]
    fn maps_marker_strings() {
        let level =
            parse(r#"{"settings": {}, "angleData": ["midspin-clockwise", "no-turn"]}"#).unwrap();
        assert_eq!(
            level.tiles,
            vec![
                TileAngle::Symbolic(Marker::MidspinClockwise),
                TileAngle::Symbolic(Marker::NoTurn),
            ]
        );
    }

    #[test]
    fn actions_keep_params_opaque() {
        let text = r#"{
            "settings": {},
            "angleData": [0],
            "actions": [
                {"floor": 12, "eventType": "SetSpeed", "speedType": "Bpm", "beatsPerMinute": 252}
            ]
        }"#;
        let level = parse(text).unwrap();
        let action = &level.actions[0];
        assert_eq!(action.floor, 12);
        assert_eq!(action.event_type, "SetSpeed");
        assert_eq!(action.params.get("beatsPerMinute"), Some(&json!(252)));
        // the two interpreted fields must not leak into params
        assert!(!action.params.contains_key("floor"));
        assert!(!action.params.contains_key("eventType"));
    }

    #[test]
    fn dangling_floor_is_not_an_error() {
        let text = r#"{
            "settings": {},
            "angleData": [0, 90],
            "actions": [{"floor": 999, "eventType": "Twirl"}]
        }"#;
        let level = parse(text).unwrap();
        assert_eq!(level.actions[0].floor, 999);
    }

    #[test]
    fn missing_fields_are_reported_by_key() {
        assert_eq!(
            parse(r#"{"angleData": []}"#),
            Err(ParseError::MissingField { field: "settings" })
        );
        assert_eq!(
            parse(r#"{"settings": {}}"#),
            Err(ParseError::MissingField { field: "angleData" })
        );
    }

    #[test]
    fn missing_tile_list_names_both_vocabularies() {
        let text = parse(r#"{"settings": {}}"#).unwrap_err().to_string();
        assert!(text.contains("angleData"), "got: {text}");
        assert!(text.contains("tiles"), "got: {text}");
    }

    #[test]
    fn bad_tile_values_carry_their_index() {
        let err = parse(r#"{"settings": {}, "angleData": [0, 15, 30, null]}"#).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidTileValue {
                index: 3,
                value: Value::Null
            }
        );

        // an unknown string is just as unsupported as null
        let err = parse(r#"{"settings": {}, "angleData": ["sideways"]}"#).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidTileValue { index: 0, .. }
        ));
    }

    #[test]
    fn garbage_reports_a_position() {
        match parse("{\n  \"settings\": oops\n}") {
            Err(ParseError::Malformed { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn unknown_settings_keys_survive() {
        let level = parse(
            r#"{"settings": {"bpm": 100, "someFutureKnob": "on"}, "angleData": []}"#,
        )
        .unwrap();
        assert_eq!(level.settings.get("someFutureKnob"), Some(&json!("on")));
    }
}
