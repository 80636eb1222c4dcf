//! Review settings stored as JSON next to the spreadsheet.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use tracing::info;

use crate::{error::SettingsError, models::user_sheet::ReviewSettings};

pub const DEFAULT_SETTINGS_FILE: &str = "ean_review.json";

pub fn load_settings(path: &Path) -> Result<ReviewSettings, SettingsError> {
    let file = File::open(path).map_err(|source| SettingsError::Read { path: path.to_path_buf(), source })?;
    let settings: ReviewSettings = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| SettingsError::Parse { path: path.to_path_buf(), source })?;

    validate(&settings)?;
    info!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Falls back to the built-in defaults only when the file does not exist.
pub fn load_or_default(path: &Path) -> Result<ReviewSettings, SettingsError> {
    if path.exists() { load_settings(path) }
    else {
        info!("No settings at {}, using defaults", path.display());
        Ok(ReviewSettings::default())
    }
}

pub fn save_settings(path: &Path, settings: &ReviewSettings) -> Result<(), SettingsError> {
    validate(settings)?;
    let file = File::create(path).map_err(|source| SettingsError::Write { path: path.to_path_buf(), source })?;
    serde_json::to_writer_pretty(BufWriter::new(file), settings)
        .map_err(|source| SettingsError::Serialize { path: path.to_path_buf(), source })?;

    info!("Saved settings to {}", path.display());
    Ok(())
}

pub fn validate(settings: &ReviewSettings) -> Result<(), SettingsError> {
    if settings.view.page_size < 1 {
        return Err(SettingsError::Invalid(String::from("page_size has to be at least 1.")));
    }
    if !settings.view.lookup_url_template.contains("{ean}") {
        return Err(SettingsError::Invalid(String::from("lookup_url_template needs an {ean} placeholder.")));
    }
    if settings.sheet.header_row < 1 {
        return Err(SettingsError::Invalid(String::from("header_row starts at 1.")));
    }
    for column in settings.sheet.required_columns() {
        if column.trim().is_empty() {
            return Err(SettingsError::Invalid(String::from("EAN, Sale and decision column names can't be empty.")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn saved_settings_load_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = ReviewSettings::default();
        settings.sheet.path_to_sheet = PathBuf::from("other.xlsx");
        settings.view.page_size = 10;
        settings.view.only_undecided = true;

        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "view": { "page_size": 50 } }"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.view.page_size, 50);
        assert_eq!(settings.view.image_dir, PathBuf::from("SellerampPhoto"));
        assert_eq!(settings.sheet.col_decision, "Mua Hay Ko");
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, ReviewSettings::default());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "view": { "page_size": 0 } }"#).unwrap();
        assert!(matches!(load_settings(&path), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn broken_json_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_settings(&path), Err(SettingsError::Parse { .. })));
    }
}
