// Date-to-footage resolution
//
// One clip per day, named after its date: 2024-03-01.mov in the footage
// directory. Resolution is a plain existence check and runs again on
// every date change; an absent file is a normal outcome, not an error.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use directories::UserDirs;
use walkdir::WalkDir;

use crate::config::FootageConfig;
use crate::constants::{DATE_FORMAT, FOOTAGE_EXTENSION};
use crate::error::{DayreelError, Result};

/// Derive the file name a clip recorded on `date` must have.
pub fn expected_filename(date: NaiveDate) -> String {
    format!("{}.{}", date.format(DATE_FORMAT), FOOTAGE_EXTENSION)
}

/// Look up the clip for `date` in `dir`.
///
/// Returns the path only if the file exists right now; nothing is
/// cached between calls.
pub fn resolve_for_date(dir: &Path, date: NaiveDate) -> Option<PathBuf> {
    let path = dir.join(expected_filename(date));
    if path.is_file() {
        log::debug!("Resolved {} -> {}", date, path.display());
        Some(path)
    } else {
        log::debug!("No footage for {} at {}", date, path.display());
        None
    }
}

/// Parse the recording date back out of a footage file name.
pub fn date_from_footage_path(path: &Path) -> Option<NaiveDate> {
    let stem = path.file_stem()?.to_str()?;
    NaiveDate::parse_from_str(stem, DATE_FORMAT).ok()
}

/// Check if a file carries the footage extension.
///
/// Exact match: resolution joins the lowercase name, so anything else
/// would list dates that then fail to resolve.
pub fn is_footage_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(FOOTAGE_EXTENSION)
}

/// All dates with a recorded clip in `dir`, sorted ascending.
///
/// Only date-named files directly in the footage directory count;
/// subdirectories and stray files are ignored.
pub fn list_recorded_dates(dir: &Path) -> Result<Vec<NaiveDate>> {
    if !dir.is_dir() {
        return Err(DayreelError::InvalidPath(format!(
            "footage directory does not exist: {}",
            dir.display()
        )));
    }

    let mut dates = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || !is_footage_file(path) {
            continue;
        }
        if let Some(date) = date_from_footage_path(path) {
            dates.push(date);
        }
    }

    dates.sort();
    Ok(dates)
}

/// Platform documents directory, the fixed location footage is recorded to.
pub fn default_footage_dir() -> Option<PathBuf> {
    UserDirs::new().and_then(|dirs| dirs.document_dir().map(|p| p.to_path_buf()))
}

/// Pick the footage directory: CLI override, then config, then the
/// documents directory.
pub fn footage_dir(cli_override: Option<PathBuf>, cfg: &FootageConfig) -> Result<PathBuf> {
    if let Some(dir) = cli_override {
        return Ok(dir);
    }
    if let Some(ref dir) = cfg.dir {
        return Ok(dir.clone());
    }
    default_footage_dir().ok_or_else(|| {
        DayreelError::Config(
            "no documents directory available; set footage.dir or pass --footage-dir".to_string(),
        )
    })
}
