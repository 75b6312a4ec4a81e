use chrono::NaiveDate;

/// Format accepted by `--reporting`, day first.
pub const REPORT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Parses a day written as `DD.MM.YYYY`. Used as a clap value parser, so the error is shown as
/// is next to the argument.
pub fn parse_report_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), REPORT_DATE_FORMAT)
        .map_err(|e| format!("expected a date like 05.01.2024: {e}"))
}

/// This is the standard way of showing a report day in task-tracker.
pub fn date_to_report_title(date: NaiveDate) -> String {
    format!("Report for {}", date.format("%Y-%m-%d"))
}
