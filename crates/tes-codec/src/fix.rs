/// GPS fix records and the fixed-point coordinate scale used on the wire.
use chrono::{DateTime, Utc};

/// Flag bit 0. Believed to mark the first record of a track, but unconfirmed, so the codec
/// carries it through `raw_flags` without acting on it.
pub const FLAG_FIRST_RECORD: u16 = 1 << 0;

/// Flag bit 1, set when the marker button was pressed at this fix.
pub const FLAG_MARKER: u16 = 1 << 1;

/// Wire coordinates are integer units of 1e-7 degrees.
pub const COORD_SCALE: f64 = 10_000_000.0;

/// One GPS fix from a `.TES` log.
#[derive(Debug, Clone, PartialEq)]
pub struct GpsFix {
    /// Decimal degrees, positive north.
    pub latitude: f64,
    /// Decimal degrees, positive east.
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    /// Units are not documented by the device; passed through untouched.
    pub altitude: u16,
    /// Marker button pressed. Takes precedence over bit 1 of `raw_flags` when encoding.
    pub marker: bool,
    /// The whole flag word as read, including bits with no known meaning.
    pub raw_flags: u16,
}

impl GpsFix {
    pub fn new(timestamp: DateTime<Utc>, latitude: f64, longitude: f64, altitude: u16) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
            altitude,
            marker: false,
            raw_flags: 0,
        }
    }

    /// Build a fix from a decoded flag word, deriving `marker` from it.
    pub(crate) fn from_wire(
        raw_flags: u16,
        timestamp: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        altitude: u16,
    ) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
            altitude,
            marker: raw_flags & FLAG_MARKER != 0,
            raw_flags,
        }
    }

    /// Flag word written when encoding: `raw_flags` with the marker bit following `marker`.
    pub fn wire_flags(&self) -> u16 {
        if self.marker {
            self.raw_flags | FLAG_MARKER
        } else {
            self.raw_flags & !FLAG_MARKER
        }
    }
}

pub fn degrees_from_fixed(value: i32) -> f64 {
    value as f64 / COORD_SCALE
}

/// Rounds to the nearest wire unit, so values produced by [`degrees_from_fixed`] map back to the
/// integer they came from. Out-of-range degrees saturate at the `i32` bounds.
pub fn degrees_to_fixed(degrees: f64) -> i32 {
    (degrees * COORD_SCALE).round() as i32
}
