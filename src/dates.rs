use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime, Time, UtcOffset};

use crate::error::{AppError, AppResult};

const ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

// `YYYY-MM-DD` (de)serialization for `Date` fields.
time::serde::format_description!(pub(crate) iso_date, Date, "[year]-[month]-[day]");

pub fn parse_date(raw: &str) -> AppResult<Date> {
    Date::parse(raw.trim(), ISO_DATE).map_err(|_| AppError::InvalidDate(raw.to_string()))
}

pub fn format_date(date: Date) -> String {
    date.format(ISO_DATE).unwrap_or_else(|_| date.to_string())
}

pub fn today(offset: UtcOffset) -> Date {
    OffsetDateTime::now_utc().to_offset(offset).date()
}

/// `[start, end)` of `date` at `offset`.
pub fn day_bounds(date: Date, offset: UtcOffset) -> (OffsetDateTime, OffsetDateTime) {
    let start = date.with_time(Time::MIDNIGHT).assume_offset(offset);
    let end = date
        .next_day()
        .map(|d| d.with_time(Time::MIDNIGHT).assume_offset(offset))
        .unwrap_or_else(|| date.with_time(Time::MAX).assume_offset(offset));
    (start, end)
}

/// Whole years between `birth` and `on`; `None` if `birth` is in the future.
pub fn age_on(birth: Date, on: Date) -> Option<u32> {
    let mut years = on.year() - birth.year();
    if (u8::from(on.month()), on.day()) < (u8::from(birth.month()), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}
