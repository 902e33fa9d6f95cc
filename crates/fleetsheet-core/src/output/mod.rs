pub mod xlsx;

use std::path::Path;

use crate::error::FleetsheetError;
use crate::model::{CellValue, Field, RowData, FIELD_COUNT};

/// The flattened raw sheet: a fixed header followed by appended rows.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSheet {
    name: String,
    rows: Vec<Vec<Option<CellValue>>>,
}

impl OutputSheet {
    pub fn new(name: impl Into<String>) -> OutputSheet {
        OutputSheet {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> Vec<&'static str> {
        Field::headers()
    }

    /// Append a fully resolved row.
    pub fn append(&mut self, row: &RowData) {
        let values = row.values().to_vec();
        debug_assert_eq!(values.len(), FIELD_COUNT);
        self.rows.push(values);
    }

    pub fn rows(&self) -> &[Vec<Option<CellValue>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Trait for persisting the finished output sheet.
pub trait SheetWriter {
    fn persist(&self, sheet: &OutputSheet, output: &Path) -> Result<(), FleetsheetError>;
}
