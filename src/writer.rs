//! Inverse of the parser: renders a `Level` back to level-file text.
//!
//! Output is pretty-printed strict JSON. Whitespace and key order are not
//! promised to match the input byte-for-byte, but every value is lossless:
//! feeding the output back through the parser yields a deep-equal `Level`.

use serde_json::{Map, Value};

use crate::model::{Action, Level, TileAngle};

pub fn emit(level: &Level) -> String {
    let mut root = Map::new();
    root.insert("settings".into(), Value::Object(level.settings.clone()));
    root.insert(
        "angleData".into(),
        Value::Array(level.tiles.iter().map(tile_value).collect()),
    );
    root.insert(
        "actions".into(),
        Value::Array(level.actions.iter().map(action_value).collect()),
    );

    // rendering an in-memory Value cannot fail
    serde_json::to_string_pretty(&Value::Object(root)).expect("rendering JSON value")
}

fn tile_value(tile: &TileAngle) -> Value {
    match *tile {
        TileAngle::Numeric(degrees) => Value::from(degrees),
        TileAngle::Symbolic(marker) => Value::String(marker.name().into()),
    }
}

fn action_value(action: &Action) -> Value {
    let mut obj = Map::new();
    obj.insert("floor".into(), Value::from(action.floor));
    obj.insert(
        "eventType".into(),
        Value::String(action.event_type.clone()),
    );
    for (key, value) in &action.params {
        // the parser strips these two from params, but a hand-built map
        // may still shadow them; the typed fields win
        if key == "floor" || key == "eventType" {
            continue;
        }
        obj.insert(key.clone(), value.clone());
    }
    Value::Object(obj)
}
