//! Common test utilities and helpers for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - proptest configuration presets
//! - calendar and schedule generators
//! - small constructors for dates and times
#![allow(dead_code)]

use aquarist::reminder::{Frequency, Schedule};
use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

/// Standard proptest configuration with 100 iterations.
pub fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 100,
        ..ProptestConfig::default()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).expect("valid time")
}

/// Any calendar day between 2000-01-01 and roughly 2099.
pub fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..36_500).prop_map(|offset| date(2000, 1, 1) + chrono::Duration::days(offset))
}

/// A valid `HH:MM` string.
pub fn any_hhmm() -> impl Strategy<Value = String> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| format!("{h:02}:{m:02}"))
}

pub fn schedule(id: &str, time: &str, frequency: Frequency) -> Schedule {
    Schedule::new(id, time, frequency)
}

pub fn interval_schedule(id: &str, time: &str, start: &str, every: i64) -> Schedule {
    let mut s = Schedule::new(id, time, Frequency::Interval);
    s.start_date = Some(start.to_string());
    s.interval_days = Some(every);
    s
}
