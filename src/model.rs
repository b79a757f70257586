use serde_json::{Map, Value};

/// A level exactly as it comes out of the loader, 1-to-1 with the file.
///
/// Everything the tool does not interpret stays in “raw” form
/// (`serde_json` maps) so an export never loses data other tools
/// might rely on.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// Global chart options (bpm, offset, theme, …). Keys are
    /// case-sensitive and kept verbatim, including ones we never read.
    pub settings: Map<String, Value>,
    /// Editor-applied effects in timeline order.
    pub actions: Vec<Action>,
    /// The chart itself; index 0 is the starting tile and the order is
    /// playback order.
    pub tiles: Vec<TileAngle>,
}

/// One scripted event attached to a tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Index into `tiles`. Kept verbatim even when it points outside the
    /// current chart; a dangling reference is the author's problem, not
    /// a parse failure.
    pub floor: i64,
    pub event_type: String,
    /// Remaining fields of the event object. Schema depends on
    /// `event_type`; we pass them through untouched.
    pub params: Map<String, Value>,
}

/// One step of the chart: either an explicit turn angle in degrees or a
/// special marker tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TileAngle {
    /// Degrees, unnormalized. Values over 360 or negative are legal and
    /// round-trip exactly.
    Numeric(f64),
    Symbolic(Marker),
}

/// The fixed set of non-numeric tile markers the format knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    MidspinClockwise,
    MidspinCounterclockwise,
    FreeRoam,
    NoTurn,
}

impl Marker {
    pub fn from_name(name: &str) -> Option<Marker> {
        match name {
            "midspin-clockwise" => Some(Marker::MidspinClockwise),
            "midspin-counterclockwise" => Some(Marker::MidspinCounterclockwise),
            "free-roam" => Some(Marker::FreeRoam),
            "no-turn" => Some(Marker::NoTurn),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Marker::MidspinClockwise => "midspin-clockwise",
            Marker::MidspinCounterclockwise => "midspin-counterclockwise",
            Marker::FreeRoam => "free-roam",
            Marker::NoTurn => "no-turn",
        }
    }
}
