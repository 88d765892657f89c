// libs/appointment-cell/src/calendar.rs
use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDate, Offset, TimeZone, Timelike, Utc};

use crate::models::DateRange;

pub const FIRST_HOUR: u32 = 8;
pub const LAST_HOUR: u32 = 17;

/// Business-hour and calendar arithmetic in the shop's fixed UTC offset.
///
/// Instants are stored in UTC; hours and days are always read in local time.
#[derive(Debug, Clone, Copy)]
pub struct BusinessCalendar {
    offset: FixedOffset,
}

impl BusinessCalendar {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    pub fn business_hours() -> RangeInclusive<u32> {
        FIRST_HOUR..=LAST_HOUR
    }

    /// Number of bookable slots in one day.
    pub fn slots_per_day() -> usize {
        (LAST_HOUR - FIRST_HOUR + 1) as usize
    }

    pub fn is_business_hour(hour: u32) -> bool {
        Self::business_hours().contains(&hour)
    }

    fn local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }

    /// Zeroes minutes, seconds and sub-seconds in local time.
    pub fn start_of_hour(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let local = self.local(instant);
        let truncated = local
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(local);

        truncated.with_timezone(&Utc)
    }

    pub fn hour_of(&self, instant: DateTime<Utc>) -> u32 {
        self.local(instant).hour()
    }

    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local(instant).date_naive()
    }

    pub fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// The instant at `hour:00` local time on `date`.
    pub fn at(&self, date: NaiveDate, hour: u32) -> Option<DateTime<Utc>> {
        let naive = date.and_hms_opt(hour, 0, 0)?;
        self.offset
            .from_local_datetime(&naive)
            .single()
            .map(|local| local.with_timezone(&Utc))
    }

    pub fn day_range(&self, date: NaiveDate) -> Option<DateRange> {
        let start = self.at(date, 0)?;
        let end = self.at(date.succ_opt()?, 0)?;
        Some(DateRange { start, end })
    }

    pub fn month_range(&self, year: i32, month: u32) -> Option<DateRange> {
        let first = Self::date(year, month, 1)?;
        let next = first.checked_add_months(Months::new(1))?;

        Some(DateRange {
            start: self.at(first, 0)?,
            end: self.at(next, 0)?,
        })
    }

    pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
        let first = Self::date(year, month, 1)?;
        let next = first.checked_add_months(Months::new(1))?;
        Some(next.signed_duration_since(first).num_days() as u32)
    }

    pub fn format_localized(&self, instant: DateTime<Utc>, pattern: &str) -> String {
        self.local(instant)
            .format_localized(pattern, chrono::Locale::pt_BR)
            .to_string()
    }

    pub fn year_month_day(&self, instant: DateTime<Utc>) -> (i32, u32, u32) {
        let date = self.date_of(instant);
        (date.year(), date.month(), date.day())
    }
}
