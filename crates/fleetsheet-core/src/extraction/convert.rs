use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::FleetsheetError;
use crate::extraction::WorkbookReader;
use crate::output::xlsx::save_grid_workbook;

/// Remove `dir` if it exists, then create it empty.
pub fn prepare_directory(dir: &Path) -> Result<(), FleetsheetError> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Absolute, lexically cleaned form of `path` (`.` and `..` folded).
/// The path does not need to exist.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

pub fn same_directory(a: &Path, b: &Path) -> bool {
    normalize_path(a) == normalize_path(b)
}

/// List files in `dir` named `<prefix>*.<extension>`, sorted by file name.
pub fn list_service_files(
    dir: &Path,
    prefix: &str,
    extension: &str,
) -> Result<Vec<PathBuf>, FleetsheetError> {
    if !dir.is_dir() {
        return Err(FleetsheetError::NoServiceFiles {
            dir: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let matches_ext = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if name.starts_with(prefix) && matches_ext {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Convert every legacy `<prefix>*.xls` file in `source` into an `.xlsx`
/// file in `dest` and return the converted paths in file-name order.
///
/// `dest` is recreated from scratch. When `drop_first_row` is set the first
/// row of each legacy sheet (its column header line) is not carried over,
/// so layout coordinates refer to the converted files.
///
/// When `source` and `dest` are the same directory nothing is converted and
/// the `.xlsx` files already there are returned.
pub fn convert_legacy_files(
    source: &Path,
    dest: &Path,
    prefix: &str,
    drop_first_row: bool,
    reader: &dyn WorkbookReader,
) -> Result<Vec<PathBuf>, FleetsheetError> {
    if same_directory(source, dest) {
        info!(dir = %dest.display(), "source and destination match, skipping conversion");
        return list_service_files(dest, prefix, "xlsx");
    }
    if normalize_path(source).starts_with(normalize_path(dest)) {
        return Err(FleetsheetError::Config(format!(
            "source directory {} lies inside {}, which is recreated on conversion",
            source.display(),
            dest.display()
        )));
    }

    let legacy = list_service_files(source, prefix, "xls")?;
    if legacy.is_empty() {
        return Err(FleetsheetError::NoServiceFiles {
            dir: source.to_path_buf(),
        });
    }

    prepare_directory(dest)?;

    let mut converted = Vec::with_capacity(legacy.len());
    for path in &legacy {
        let grid = match reader.read_first_sheet(path) {
            Ok(grid) if drop_first_row => grid.without_leading_rows(1),
            Ok(grid) => grid,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping unreadable legacy file");
                continue;
            }
        };

        let Some(stem) = path.file_stem() else {
            continue;
        };
        let mut target = dest.join(stem);
        target.set_extension("xlsx");

        save_grid_workbook(&grid, &target)?;
        debug!(from = %path.display(), to = %target.display(), "converted");
        converted.push(target);
    }

    info!(
        count = converted.len(),
        backend = reader.backend_name(),
        "converted legacy service files"
    );
    Ok(converted)
}
