use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::shared::datetime::packed::{DateTimeV2Value, DateV2Value};

#[test]
fn date_v2_packs_day_month_year_from_low_bits() {
    let d = DateV2Value::from_ymd(2024, 2, 29);
    assert_eq!(d.0, (2024 << 9) | (2 << 5) | 29);
    assert_eq!(d.year(), 2024);
    assert_eq!(d.month(), 2);
    assert_eq!(d.day(), 29);
    assert_eq!(d.to_string(), "2024-02-29");
}

#[test]
fn date_v2_to_naive_rejects_impossible_dates() {
    assert_eq!(
        DateV2Value::from_ymd(2023, 6, 15).to_naive(),
        NaiveDate::from_ymd_opt(2023, 6, 15)
    );
    assert!(DateV2Value::from_ymd(2023, 2, 30).to_naive().is_none());
}

#[test]
fn datetime_v2_keeps_every_field() {
    let ts = NaiveDateTime::new(
        NaiveDate::from_ymd_opt(1999, 12, 31).unwrap(),
        NaiveTime::from_hms_micro_opt(23, 59, 58, 123_456).unwrap(),
    );
    let packed = DateTimeV2Value::from_naive(ts);
    assert_eq!(packed.year(), 1999);
    assert_eq!(packed.month(), 12);
    assert_eq!(packed.day(), 31);
    assert_eq!(packed.hour(), 23);
    assert_eq!(packed.minute(), 59);
    assert_eq!(packed.second(), 58);
    assert_eq!(packed.microsecond(), 123_456);
    assert_eq!(packed.to_naive(), Some(ts));
    assert_eq!(packed.to_string(), "1999-12-31 23:59:58.123456");
}

#[test]
fn datetime_v2_display_omits_zero_microseconds() {
    let ts = NaiveDate::from_ymd_opt(2020, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();
    assert_eq!(
        DateTimeV2Value::from_naive(ts).to_string(),
        "2020-01-02 03:04:05"
    );
}
