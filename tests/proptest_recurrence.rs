//! Property tests for recurrence evaluation and agenda ordering.

mod common;

use aquarist::reminder::{is_due_on, upcoming_agenda, Frequency, AGENDA_LIMIT};
use chrono::{Datelike, Duration, Weekday};
use proptest::prelude::*;

use common::{any_date, any_hhmm, date, interval_schedule, schedule};

proptest! {
    #![proptest_config(common::proptest_config())]

    #[test]
    fn daily_is_due_every_day(day in any_date()) {
        prop_assert!(is_due_on(&schedule("d", "08:00", Frequency::Daily), day));
    }

    #[test]
    fn weekday_set_matches_only_listed_days(day in any_date(), specific in any::<bool>()) {
        let kind = if specific { Frequency::Specific } else { Frequency::Weekly };
        let mut s = schedule("w", "08:00", kind);
        s.days = vec!["monday".into(), "friday".into()];
        let expected = matches!(day.weekday(), Weekday::Mon | Weekday::Fri);
        prop_assert_eq!(is_due_on(&s, day), expected);
    }

    #[test]
    fn monthly_matches_day_of_month(day in any_date(), dom in 1i64..=31) {
        let mut s = schedule("m", "08:00", Frequency::Monthly);
        s.day_of_month = Some(dom);
        prop_assert_eq!(is_due_on(&s, day), i64::from(day.day()) == dom);
    }

    #[test]
    fn interval_due_on_multiples_from_start(
        start in any_date(),
        every in 1i64..=30,
        offset in -400i64..400,
    ) {
        let s = interval_schedule("i", "08:00", &start.format("%Y-%m-%d").to_string(), every);
        let day = start + Duration::days(offset);
        prop_assert_eq!(is_due_on(&s, day), offset >= 0 && offset % every == 0);
    }

    #[test]
    fn agenda_is_capped_sorted_and_stable(times in prop::collection::vec(any_hhmm(), 0..12)) {
        let schedules: Vec<_> = times
            .iter()
            .enumerate()
            .map(|(i, t)| schedule(&i.to_string(), t, Frequency::Daily))
            .collect();
        let agenda = upcoming_agenda(&schedules, date(2024, 6, 1));

        prop_assert_eq!(agenda.len(), schedules.len().min(AGENDA_LIMIT));
        for pair in agenda.windows(2) {
            prop_assert!(pair[0].time <= pair[1].time);
            if pair[0].time == pair[1].time {
                let a: usize = pair[0].id.parse().unwrap();
                let b: usize = pair[1].id.parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }
}

#[test]
fn weekday_set_over_a_full_year() {
    let mut s = schedule("w", "08:00", Frequency::Weekly);
    s.days = vec!["monday".into(), "friday".into()];
    let mut day = date(2024, 1, 1);
    let mut due = 0;
    while day.year() == 2024 {
        let expected = matches!(day.weekday(), Weekday::Mon | Weekday::Fri);
        assert_eq!(is_due_on(&s, day), expected, "{day}");
        due += usize::from(expected);
        day += Duration::days(1);
    }
    // 2024 has 53 Mondays and 52 Fridays.
    assert_eq!(due, 105);
}

#[test]
fn monthly_31_only_in_long_months() {
    let mut s = schedule("m", "08:00", Frequency::Monthly);
    s.day_of_month = Some(31);
    let mut day = date(2024, 1, 1);
    let mut months = Vec::new();
    while day.year() == 2024 {
        if is_due_on(&s, day) {
            assert_eq!(day.day(), 31);
            months.push(day.month());
        }
        day += Duration::days(1);
    }
    assert_eq!(months, vec![1, 3, 5, 7, 8, 10, 12]);
}

#[test]
fn interval_three_days_from_new_year() {
    let s = interval_schedule("i", "08:00", "2024-01-01", 3);
    for d in [1, 4, 7, 10, 13] {
        assert!(is_due_on(&s, date(2024, 1, d)), "2024-01-{d:02}");
    }
    for d in [2, 3, 5, 6, 8, 9] {
        assert!(!is_due_on(&s, date(2024, 1, d)), "2024-01-{d:02}");
    }
    let mut day = date(2023, 1, 1);
    while day < date(2024, 1, 1) {
        assert!(!is_due_on(&s, day), "{day}");
        day += Duration::days(1);
    }
}
