use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::FleetsheetError;
use crate::extraction::convert::{normalize_path, same_directory};
use crate::model::{column_index, CellRef, MAX_COL_INDEX};

/// Where facts sit inside a service report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Fixed cell holding the service description.
    pub service_desc_cell: String,
    /// First row (1-based) searched for the "Comments" label.
    pub comments_scan_row: u32,
    /// First row (1-based) searched for the "Port rotation" label.
    pub port_rotation_scan_row: u32,
    pub comments_start_phrase: String,
    pub comments_end_phrase: String,
    /// Label directly above the vessel list.
    pub vessel_marker: String,
    pub vessel_name_column: String,
    /// Columns between a vessel name and its operator (C -> K).
    pub operator_offset: u32,
    pub participants_column: String,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            service_desc_cell: "D3".into(),
            comments_scan_row: 25,
            port_rotation_scan_row: 25,
            comments_start_phrase: "Manila called at".into(),
            comments_end_phrase: "Comments - Service Chronology".into(),
            vessel_marker: "Vessel name".into(),
            vessel_name_column: "C".into(),
            operator_offset: 8,
            participants_column: "C".into(),
        }
    }
}

impl Layout {
    pub fn service_desc_ref(&self) -> Result<CellRef, FleetsheetError> {
        self.service_desc_cell.parse()
    }

    pub fn vessel_name_col(&self) -> Result<u32, FleetsheetError> {
        parse_column("vessel_name_column", &self.vessel_name_column)
    }

    pub fn participants_col(&self) -> Result<u32, FleetsheetError> {
        parse_column("participants_column", &self.participants_column)
    }

    pub fn validate(&self) -> Result<(), FleetsheetError> {
        self.service_desc_ref()?;
        self.vessel_name_col()?;
        self.participants_col()?;
        if self.comments_scan_row == 0 || self.port_rotation_scan_row == 0 {
            return Err(FleetsheetError::Config(
                "scan rows are 1-based and must be at least 1".into(),
            ));
        }
        let name_col = self.vessel_name_col()?;
        let operator_col = name_col.checked_add(self.operator_offset);
        if !matches!(operator_col, Some(col) if col <= MAX_COL_INDEX) {
            return Err(FleetsheetError::Config(format!(
                "operator_offset {} runs past the last sheet column from column {}",
                self.operator_offset, self.vessel_name_column
            )));
        }
        if self.vessel_marker.is_empty() {
            return Err(FleetsheetError::Config(
                "vessel_marker must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn parse_column(name: &str, letters: &str) -> Result<u32, FleetsheetError> {
    column_index(letters.trim()).ok_or_else(|| {
        FleetsheetError::Config(format!("{name} '{letters}' is not a column letter"))
    })
}

/// Everything a batch run needs. Paths are relative to the working
/// directory unless absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Directory holding the downloaded legacy `.xls` service files.
    pub source_dir: PathBuf,
    /// Directory the converted `.xlsx` service files are written to.
    pub dest_dir: PathBuf,
    /// Workbook listing known service codes in column A.
    pub reference_file: PathBuf,
    pub output_path: PathBuf,
    /// Existing workbook whose other sheets are carried into the output.
    pub template_path: Option<PathBuf>,
    pub sheet_name: String,
    pub file_prefix: String,
    /// Convert legacy files first; when off, `dest_dir` is read as-is.
    pub convert: bool,
    /// Drop the first row of each legacy sheet during conversion.
    pub drop_first_row: bool,
    pub layout: Layout,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            source_dir: PathBuf::from("xls"),
            dest_dir: PathBuf::from("xlsx"),
            reference_file: PathBuf::from("n4_svcs.xlsx"),
            output_path: PathBuf::from("Service Overview.xlsx"),
            template_path: None,
            sheet_name: "raw".into(),
            file_prefix: "Service_".into(),
            convert: true,
            drop_first_row: true,
            layout: Layout::default(),
        }
    }
}

/// Excel's limit on worksheet names.
const MAX_SHEET_NAME_LEN: usize = 31;

impl RunConfig {
    /// Load a configuration file. Keys missing from the file keep their
    /// defaults.
    pub fn load(path: &Path) -> Result<RunConfig, FleetsheetError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FleetsheetError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        RunConfig::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<RunConfig, FleetsheetError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, FleetsheetError> {
        toml::to_string_pretty(self).map_err(|e| FleetsheetError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), FleetsheetError> {
        let name = self.sheet_name.trim();
        if name.is_empty() {
            return Err(FleetsheetError::Config("sheet_name must not be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(FleetsheetError::Config(format!(
                "sheet_name '{name}' is longer than {MAX_SHEET_NAME_LEN} characters"
            )));
        }
        if self.convert && !same_directory(&self.source_dir, &self.dest_dir) {
            self.check_dest_dir_is_disposable()?;
        }
        self.layout.validate()
    }

    /// Conversion recreates `dest_dir`, so no input or output may live
    /// under it.
    fn check_dest_dir_is_disposable(&self) -> Result<(), FleetsheetError> {
        let dest = normalize_path(&self.dest_dir);
        let guarded = [
            ("source_dir", Some(&self.source_dir)),
            ("reference_file", Some(&self.reference_file)),
            ("template_path", self.template_path.as_ref()),
            ("output_path", Some(&self.output_path)),
        ];
        for (name, path) in guarded {
            let Some(path) = path else { continue };
            if normalize_path(path).starts_with(&dest) {
                return Err(FleetsheetError::Config(format!(
                    "{name} '{}' lies inside dest_dir '{}', which is recreated on conversion",
                    path.display(),
                    self.dest_dir.display()
                )));
            }
        }
        Ok(())
    }
}
