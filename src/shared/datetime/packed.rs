use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

const DAY_BITS: u32 = 5;
const MONTH_BITS: u32 = 4;

const MICRO_BITS: u32 = 20;
const SECOND_BITS: u32 = 6;
const MINUTE_BITS: u32 = 6;
const HOUR_BITS: u32 = 5;

const DT_SECOND_SHIFT: u32 = MICRO_BITS;
const DT_MINUTE_SHIFT: u32 = DT_SECOND_SHIFT + SECOND_BITS;
const DT_HOUR_SHIFT: u32 = DT_MINUTE_SHIFT + MINUTE_BITS;
const DT_DAY_SHIFT: u32 = DT_HOUR_SHIFT + HOUR_BITS;
const DT_MONTH_SHIFT: u32 = DT_DAY_SHIFT + DAY_BITS;
const DT_YEAR_SHIFT: u32 = DT_MONTH_SHIFT + MONTH_BITS;

#[inline]
fn field(raw: u64, shift: u32, bits: u32) -> u32 {
    ((raw >> shift) & ((1u64 << bits) - 1)) as u32
}

/// Packed date, fields from the low bit: `day:5 | month:4 | year:23`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateV2Value(pub u32);

impl DateV2Value {
    pub fn from_ymd(year: u32, month: u32, day: u32) -> Self {
        DateV2Value((year << (DAY_BITS + MONTH_BITS)) | (month << DAY_BITS) | day)
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self::from_ymd(date.year().max(0) as u32, date.month(), date.day())
    }

    pub fn year(&self) -> u32 {
        self.0 >> (DAY_BITS + MONTH_BITS)
    }

    pub fn month(&self) -> u32 {
        field(self.0 as u64, DAY_BITS, MONTH_BITS)
    }

    pub fn day(&self) -> u32 {
        field(self.0 as u64, 0, DAY_BITS)
    }

    /// `None` when the packed fields do not form a calendar date.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year() as i32, self.month(), self.day())
    }
}

impl fmt::Display for DateV2Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

/// Packed datetime, fields from the low bit:
/// `microsecond:20 | second:6 | minute:6 | hour:5 | day:5 | month:4 | year:18`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateTimeV2Value(pub u64);

impl DateTimeV2Value {
    pub fn from_naive(ts: NaiveDateTime) -> Self {
        let date = ts.date();
        let time = ts.time();
        let micros = (time.nanosecond() / 1_000).min((1 << MICRO_BITS) - 1) as u64;
        DateTimeV2Value(
            ((date.year().max(0) as u64) << DT_YEAR_SHIFT)
                | ((date.month() as u64) << DT_MONTH_SHIFT)
                | ((date.day() as u64) << DT_DAY_SHIFT)
                | ((time.hour() as u64) << DT_HOUR_SHIFT)
                | ((time.minute() as u64) << DT_MINUTE_SHIFT)
                | ((time.second() as u64) << DT_SECOND_SHIFT)
                | micros,
        )
    }

    pub fn year(&self) -> u32 {
        (self.0 >> DT_YEAR_SHIFT) as u32
    }

    pub fn month(&self) -> u32 {
        field(self.0, DT_MONTH_SHIFT, MONTH_BITS)
    }

    pub fn day(&self) -> u32 {
        field(self.0, DT_DAY_SHIFT, DAY_BITS)
    }

    pub fn hour(&self) -> u32 {
        field(self.0, DT_HOUR_SHIFT, HOUR_BITS)
    }

    pub fn minute(&self) -> u32 {
        field(self.0, DT_MINUTE_SHIFT, MINUTE_BITS)
    }

    pub fn second(&self) -> u32 {
        field(self.0, DT_SECOND_SHIFT, SECOND_BITS)
    }

    pub fn microsecond(&self) -> u32 {
        field(self.0, 0, MICRO_BITS)
    }

    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(self.year() as i32, self.month(), self.day())?;
        let time = NaiveTime::from_hms_micro_opt(
            self.hour(),
            self.minute(),
            self.second(),
            self.microsecond(),
        )?;
        Some(NaiveDateTime::new(date, time))
    }
}

impl fmt::Display for DateTimeV2Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year(),
            self.month(),
            self.day(),
            self.hour(),
            self.minute(),
            self.second()
        )?;
        if self.microsecond() != 0 {
            write!(f, ".{:06}", self.microsecond())?;
        }
        Ok(())
    }
}
