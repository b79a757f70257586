use std::fs;

use adofai_tools::{Marker, Match, ParseError, TileAngle};
use adofai_tools::{detect_repeats, export_level, load_level};
use serde_json::json;

#[test]
fn loads_a_hand_authored_level() {
    let raw = fs::read_to_string("tests/spiral.adofai").unwrap();
    let level = load_level(&raw).expect("valid level");

    // unquoted keys, trailing commas and the comment are all repaired
    assert_eq!(level.settings.len(), 7);
    assert_eq!(level.settings.get("bpm"), Some(&json!(126.0)));
    assert_eq!(level.settings.get("song"), Some(&json!("Spiral")));

    assert_eq!(level.tiles.len(), 11);
    assert_eq!(level.tiles[0], TileAngle::Numeric(0.0));
    assert_eq!(
        level.tiles[9],
        TileAngle::Symbolic(Marker::MidspinClockwise)
    );

    assert_eq!(level.actions.len(), 2);
    let set_speed = &level.actions[0];
    assert_eq!(set_speed.floor, 4);
    assert_eq!(set_speed.event_type, "SetSpeed");
    assert_eq!(set_speed.params.get("beatsPerMinute"), Some(&json!(252)));
}

#[test]
fn export_then_load_is_identity() {
    let raw = fs::read_to_string("tests/spiral.adofai").unwrap();
    let level = load_level(&raw).unwrap();

    let exported = export_level(&level);
    assert_eq!(load_level(&exported).unwrap(), level);
}

#[test]
fn detects_the_spiral_motif() {
    let raw = fs::read_to_string("tests/spiral.adofai").unwrap();
    let level = load_level(&raw).unwrap();

    // [0,15,15,30] repeats at tiles 0 and 4, nothing else qualifies
    assert_eq!(
        detect_repeats(&level, 2),
        vec![Match {
            start: 0,
            length: 4,
            occurrences: vec![0, 4],
        }]
    );
}

#[test]
fn inline_authoring_quirks_parse() {
    // straight from the format's tolerance contract
    let level =
        load_level(r#"{settings:{bpm:100,}, angleData:[0, "midspin-clockwise", 90,]}"#).unwrap();
    assert_eq!(level.settings.get("bpm"), Some(&json!(100)));
    assert_eq!(
        level.tiles,
        vec![
            TileAngle::Numeric(0.0),
            TileAngle::Symbolic(Marker::MidspinClockwise),
            TileAngle::Numeric(90.0),
        ]
    );
}

#[test]
fn errors_stay_typed_through_the_load_path() {
    assert_eq!(
        load_level(r#"{settings: {}}"#),
        Err(ParseError::MissingField { field: "angleData" })
    );
    assert_eq!(
        load_level(r#"{settings: {}, angleData: [0, 15, 30, null]}"#),
        Err(ParseError::InvalidTileValue {
            index: 3,
            value: serde_json::Value::Null
        })
    );
    assert!(matches!(
        load_level("tiles: what tiles"),
        Err(ParseError::Malformed { .. })
    ));
}
