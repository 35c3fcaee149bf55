use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// This is the standard way of converting a date to a string in wall-of-shame.
pub fn date_to_record_name(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a date only if it's written exactly as [date_to_record_name] would write it.
/// Lenient forms like `2024-1-5` would break lexicographic ordering of the ledger.
pub fn record_name_to_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| date_to_record_name(*date) == value)
}
