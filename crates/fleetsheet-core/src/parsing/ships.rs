use serde::Serialize;

use crate::model::CellValue;
use crate::parsing::text::drop_last_char;

/// Placeholder used when a vessel size cannot be read.
pub const NO_SIZE: &str = "-";

/// Leading count of a "ships used" text. Non-numeric leading tokens are
/// kept verbatim so the anomaly shows up in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VesselCount {
    Count(i64),
    Raw(String),
}

impl From<VesselCount> for CellValue {
    fn from(count: VesselCount) -> CellValue {
        match count {
            VesselCount::Count(n) => CellValue::Int(n),
            VesselCount::Raw(s) => CellValue::Text(s),
        }
    }
}

/// Split a "ships used" text such as "3 vessels from 8000-10000 TEU." into
/// its vessel count and vessel size.
///
/// - count: the first whitespace token as an integer, or the raw token;
///   `None` when the text is blank
/// - size: the text after the first "from", trimmed, minus its last
///   character (the closing period); "-" when there is no "from"
pub fn vessel_size_and_count(ships_used: &str) -> (Option<VesselCount>, String) {
    let count = ships_used.split_whitespace().next().map(|token| {
        token
            .parse::<i64>()
            .map(VesselCount::Count)
            .unwrap_or_else(|_| VesselCount::Raw(token.to_string()))
    });

    let size = match ships_used.split_once("from") {
        Some((_, rest)) => drop_last_char(rest.trim()).to_string(),
        None => NO_SIZE.to_string(),
    };

    (count, size)
}
