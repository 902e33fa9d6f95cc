use std::collections::HashSet;
use std::path::Path;

use tracing::{info, warn};

use crate::error::FleetsheetError;
use crate::extraction::WorkbookReader;
use crate::locate::column_values;

/// Substituted for a service name that needs a human to match it.
pub const MANUAL_CHECK: &str = "MANUAL CHECK";

/// Known terminal service codes, loaded once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceServiceSet {
    codes: HashSet<String>,
}

impl ReferenceServiceSet {
    pub fn new() -> ReferenceServiceSet {
        ReferenceServiceSet::default()
    }

    /// Load codes from column A of the first sheet, stopping at the first
    /// blank cell.
    pub fn load(reader: &dyn WorkbookReader, path: &Path) -> Result<Self, FleetsheetError> {
        let grid = reader
            .read_first_sheet(path)
            .map_err(|e| FleetsheetError::Reference {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let set: ReferenceServiceSet = column_values(&grid, 0)
            .iter()
            .map(|v| v.to_text())
            .collect();

        if set.is_empty() {
            warn!(file = %path.display(), "reference service list is empty");
        }
        info!(count = set.len(), "loaded reference services");
        Ok(set)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ReferenceServiceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ReferenceServiceSet {
            codes: iter
                .into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

pub fn mentions_mict(port: &str) -> bool {
    port.contains("MICT")
}

/// Keep `service_name` when it is safe to report against the MICT
/// terminal; otherwise flag it with [`MANUAL_CHECK`].
///
/// Services not calling at MICT are never reconciled.
pub fn reconcile_service_name(
    service_name: &str,
    port: &str,
    services: &ReferenceServiceSet,
) -> String {
    if !mentions_mict(port) || services.contains(service_name) {
        service_name.to_string()
    } else {
        MANUAL_CHECK.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_mict_service_kept() {
        let set: ReferenceServiceSet = ["SVC1", "SVC2"].into_iter().collect();
        assert_eq!(reconcile_service_name("SVC1", "MICT", &set), "SVC1");
    }

    #[test]
    fn test_unknown_mict_service_flagged() {
        let set: ReferenceServiceSet = ["SVC1"].into_iter().collect();
        assert_eq!(reconcile_service_name("SVCX", "MICT", &set), MANUAL_CHECK);
        assert_eq!(
            reconcile_service_name("SVCX", "MICT + ATI", &set),
            MANUAL_CHECK
        );
    }

    #[test]
    fn test_non_mict_not_reconciled() {
        let set: ReferenceServiceSet = ["SVC1"].into_iter().collect();
        assert_eq!(reconcile_service_name("SVCX", "domestic", &set), "SVCX");
        assert_eq!(reconcile_service_name("SVCX", "ATI", &set), "SVCX");
    }

    #[test]
    fn test_set_trims_and_skips_blanks() {
        let set: ReferenceServiceSet = [" SVC1 ", "", "SVC2"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("SVC1"));
    }
}
