use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::FleetsheetError;

/// A typed, non-empty cell value. Blank cells are represented as `None`
/// wherever a value may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> CellValue {
        CellValue::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True when the cell holds exactly this string.
    pub fn is_text(&self, expected: &str) -> bool {
        self.as_text() == Some(expected)
    }

    /// Stringified form used by the text parsers.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Last 0-based column index of an Excel sheet (XFD).
pub const MAX_COL_INDEX: u32 = 16_383;

/// An A1-style cell reference, stored 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub fn new(row: u32, col: u32) -> CellRef {
        CellRef { row, col }
    }

    /// The cell `delta` columns to the right, if it is still on the sheet.
    pub fn offset_cols(self, delta: u32) -> Option<CellRef> {
        let col = self.col.checked_add(delta).filter(|&c| c <= MAX_COL_INDEX)?;
        Some(CellRef { row: self.row, col })
    }

    /// 1-based row number as shown in a spreadsheet UI.
    pub fn row_number(&self) -> u32 {
        self.row + 1
    }
}

/// Convert a column letter run ("A", "K", "AB") into a 0-based index.
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }
    let mut index: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        index = index * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    Some(index - 1)
}

pub fn column_letters(mut index: u32) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

impl FromStr for CellRef {
    type Err = FleetsheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| FleetsheetError::CellRef(s.to_string()))?;
        let (letters, digits) = s.split_at(split);
        let col = column_index(letters).ok_or_else(|| FleetsheetError::CellRef(s.to_string()))?;
        let row: u32 = digits
            .parse()
            .map_err(|_| FleetsheetError::CellRef(s.to_string()))?;
        if row == 0 {
            return Err(FleetsheetError::CellRef(s.to_string()));
        }
        Ok(CellRef { row: row - 1, col })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row + 1)
    }
}

/// Output columns of the raw sheet, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Port,
    MictServiceName,
    ServiceName,
    ServiceDesc,
    Route,
    LeadSl,
    SailingFreq,
    Participants,
    VesselOperator,
    VesselCount,
    VesselsPerRowCount,
    WeeklyCapacity,
    ShipsUsed,
    AltServiceCode,
    PortRotation,
    VesselSize,
    VesselName,
}

pub const FIELD_COUNT: usize = 17;

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Port,
        Field::MictServiceName,
        Field::ServiceName,
        Field::ServiceDesc,
        Field::Route,
        Field::LeadSl,
        Field::SailingFreq,
        Field::Participants,
        Field::VesselOperator,
        Field::VesselCount,
        Field::VesselsPerRowCount,
        Field::WeeklyCapacity,
        Field::ShipsUsed,
        Field::AltServiceCode,
        Field::PortRotation,
        Field::VesselSize,
        Field::VesselName,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Field::Port => "PORT",
            Field::MictServiceName => "MICT SERVICE NAME",
            Field::ServiceName => "SERVICE NAME",
            Field::ServiceDesc => "SERVICE DESC",
            Field::Route => "ROUTE",
            Field::LeadSl => "LEAD SL",
            Field::SailingFreq => "SAILING FREQ",
            Field::Participants => "PARTICIPANTS",
            Field::VesselOperator => "VESSEL OPERATOR",
            Field::VesselCount => "# OF VESSELS",
            Field::VesselsPerRowCount => "# OF VESSELS PER ROW COUNT",
            Field::WeeklyCapacity => "WEEKLY CAPACITY",
            Field::ShipsUsed => "SHIPS USED",
            Field::AltServiceCode => "ALT SRVC CD",
            Field::PortRotation => "PORT ROTATION",
            Field::VesselSize => "VESSEL SIZE",
            Field::VesselName => "VESSEL NAME",
        }
    }

    /// Column position in the output sheet.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn headers() -> Vec<&'static str> {
        Field::ALL.iter().map(|f| f.header()).collect()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One output row under construction. Unresolved fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowData {
    values: [Option<CellValue>; FIELD_COUNT],
}

impl RowData {
    pub fn new() -> RowData {
        RowData::default()
    }

    pub fn get(&self, field: Field) -> Option<&CellValue> {
        self.values[field.index()].as_ref()
    }

    pub fn text(&self, field: Field) -> Option<String> {
        self.get(field).map(CellValue::to_text)
    }

    pub fn set(&mut self, field: Field, value: Option<CellValue>) {
        self.values[field.index()] = value;
    }

    /// Values in header order; always `FIELD_COUNT` long.
    pub fn values(&self) -> &[Option<CellValue>] {
        &self.values
    }
}

impl Serialize for RowData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for field in Field::ALL {
            map.serialize_entry(field.header(), &self.values[field.index()])?;
        }
        map.end()
    }
}

/// A vessel listed in a service file: where its name sits and where its
/// operator sits on the same row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VesselEntry {
    pub name: CellRef,
    /// `None` when the operator offset runs past the last column.
    pub operator: Option<CellRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_ref_roundtrip_display() {
        let r: CellRef = "K14".parse().unwrap();
        assert_eq!(r, CellRef::new(13, 10));
        assert_eq!(r.to_string(), "K14");
        assert_eq!("ab3".parse::<CellRef>().unwrap().to_string(), "AB3");
    }

    #[test]
    fn test_cell_ref_rejects_garbage() {
        assert!("".parse::<CellRef>().is_err());
        assert!("C".parse::<CellRef>().is_err());
        assert!("C0".parse::<CellRef>().is_err());
        assert!("3C".parse::<CellRef>().is_err());
    }

    #[test]
    fn test_operator_offset_from_name_column() {
        let name: CellRef = "C20".parse().unwrap();
        assert_eq!(name.offset_cols(8).unwrap().to_string(), "K20");
    }

    #[test]
    fn test_operator_offset_past_last_column() {
        let name: CellRef = "C20".parse().unwrap();
        assert_eq!(name.offset_cols(MAX_COL_INDEX - 2).unwrap().col, MAX_COL_INDEX);
        assert_eq!(name.offset_cols(MAX_COL_INDEX - 1), None);
        assert_eq!(name.offset_cols(u32::MAX), None);
    }

    #[test]
    fn test_header_order() {
        assert_eq!(
            Field::headers(),
            vec![
                "PORT",
                "MICT SERVICE NAME",
                "SERVICE NAME",
                "SERVICE DESC",
                "ROUTE",
                "LEAD SL",
                "SAILING FREQ",
                "PARTICIPANTS",
                "VESSEL OPERATOR",
                "# OF VESSELS",
                "# OF VESSELS PER ROW COUNT",
                "WEEKLY CAPACITY",
                "SHIPS USED",
                "ALT SRVC CD",
                "PORT ROTATION",
                "VESSEL SIZE",
                "VESSEL NAME",
            ]
        );
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_row_data_serializes_in_header_order() {
        let mut row = RowData::new();
        row.set(Field::VesselName, Some(CellValue::text("-")));
        row.set(Field::Port, Some(CellValue::text("MICT")));
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.starts_with(r#"{"PORT":"MICT","MICT SERVICE NAME":null"#));
        assert!(json.ends_with(r#""VESSEL NAME":"-"}"#));
    }

    #[test]
    fn test_float_display_drops_trailing_zero() {
        assert_eq!(CellValue::Float(8000.0).to_text(), "8000");
        assert_eq!(CellValue::Float(2.5).to_text(), "2.5");
    }
}
