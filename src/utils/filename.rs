use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Generate default report filename with format: climate-report-{YYMMDD}.json
pub fn generate_default_report_filename() -> PathBuf {
    stamped_filename("climate-report", "json")
}

/// Generate default projection table filename with format:
/// climate-projections-{YYMMDD}.csv
pub fn generate_default_projections_filename() -> PathBuf {
    stamped_filename("climate-projections", "csv")
}

fn stamped_filename(prefix: &str, extension: &str) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100;
    let filename = format!(
        "{prefix}-{:02}{:02}{:02}.{extension}",
        year,
        now.month(),
        now.day()
    );
    PathBuf::from("output").join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_filename() {
        let filename = generate_default_report_filename();
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.starts_with("output/"));
        assert!(filename_str.contains("climate-report-"));
        assert!(filename_str.ends_with(".json"));
    }

    #[test]
    fn test_default_projections_filename() {
        let filename = generate_default_projections_filename();
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.contains("climate-projections-"));
        assert!(filename_str.ends_with(".csv"));
    }
}
