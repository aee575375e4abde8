use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, Utc};

/// Today's local calendar date as `YYYY-MM-DD`.
pub fn today_date() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole days from `from` to `to`, floored. Negative when `to` is earlier.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let span = to - from;
    let days = span.num_days();
    // num_days truncates toward zero
    if span < Duration::days(days) {
        days - 1
    } else {
        days
    }
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
