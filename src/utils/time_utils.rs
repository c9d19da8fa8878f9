use chrono::{DateTime, NaiveDate};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

pub fn epoch_ms_to_utc(epoch_ms: i64) -> String {
    // Used for display purposes
    epoch_sec_to_utc(epoch_ms / TimeUtils::MS_IN_S)
}

pub fn epoch_sec_to_utc(epoch_sec: i64) -> String {
    match DateTime::from_timestamp(epoch_sec, 0) {
        Some(dt) => dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string(),
        None => String::new(),
    }
}
