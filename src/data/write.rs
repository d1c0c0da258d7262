//! Timestamped result output.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::DataError;

/// Inserts a `_YYYYMMDD_HHMMSS` stamp before the extension of `base`.
///
/// `out/OutTimeTable.csv` at 2024-03-05 14:07:09 becomes
/// `out/OutTimeTable_20240305_140709.csv`. A base without extension gets
/// `.csv`.
pub fn timestamped_path(base: &Path, at: NaiveDateTime) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "schedule".to_string());
    let extension = base
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string());
    base.with_file_name(format!(
        "{stem}_{}.{extension}",
        at.format("%Y%m%d_%H%M%S")
    ))
}

/// Writes `header` followed by `rows` as CSV, creating parent
/// directories as needed.
pub fn write_rows(path: &Path, header: &[String], rows: &[Vec<String>]) -> Result<(), DataError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    if !header.is_empty() {
        writer.write_record(header)?;
    }
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 9)
            .unwrap()
    }

    #[test]
    fn test_timestamped_path() {
        let path = timestamped_path(Path::new("out/OutTimeTable.csv"), at());
        assert_eq!(path, PathBuf::from("out/OutTimeTable_20240305_140709.csv"));
    }

    #[test]
    fn test_timestamped_path_without_extension() {
        let path = timestamped_path(Path::new("result"), at());
        assert_eq!(path, PathBuf::from("result_20240305_140709.csv"));
    }

    #[test]
    fn test_write_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        let header = vec!["id".to_string(), "room".to_string()];
        let rows = vec![
            vec!["A1".to_string(), "OR2".to_string()],
            vec!["A2".to_string(), "OR1".to_string()],
        ];

        write_rows(&path, &header, &rows).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "id,room\nA1,OR2\nA2,OR1\n");
    }
}
