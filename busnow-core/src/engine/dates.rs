//! Target-date selection for day-type previews.

use chrono::NaiveDate;

use crate::domain::DayType;

/// The date whose timetable a day-type selection should show.
///
/// If today already falls under the requested day type, the target is
/// today. Otherwise it is the next calendar date that does: the upcoming
/// Saturday when previewing the holiday timetable from a weekday, the
/// upcoming Monday when previewing the weekday timetable from a weekend.
/// This lets the user ask "what does Saturday look like" on a Wednesday
/// without touching the live clock.
///
/// # Examples
///
/// ```
/// use busnow_core::domain::DayType;
/// use busnow_core::engine::target_date;
/// use chrono::NaiveDate;
///
/// // 2025-06-04 is a Wednesday.
/// let wednesday = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
/// let saturday = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();
///
/// assert_eq!(target_date(wednesday, DayType::Weekday), wednesday);
/// assert_eq!(target_date(wednesday, DayType::Holiday), saturday);
/// ```
pub fn target_date(today: NaiveDate, day_type: DayType) -> NaiveDate {
    let mut date = today;
    while !day_type.matches(date) {
        match date.succ_opt() {
            Some(next) => date = next,
            // Calendar end; unreachable for wall-clock dates.
            None => return date,
        }
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekday_today_stays_today() {
        let wednesday = date(2025, 6, 4);
        assert_eq!(target_date(wednesday, DayType::Weekday), wednesday);
    }

    #[test]
    fn holiday_from_weekday_is_next_saturday() {
        let wednesday = date(2025, 6, 4);
        let target = target_date(wednesday, DayType::Holiday);
        assert_eq!(target, date(2025, 6, 7));
        assert_eq!(target.weekday(), Weekday::Sat);
    }

    #[test]
    fn weekday_from_weekend_is_next_monday() {
        let saturday = date(2025, 6, 7);
        let sunday = date(2025, 6, 8);
        let monday = date(2025, 6, 9);

        assert_eq!(target_date(saturday, DayType::Weekday), monday);
        assert_eq!(target_date(sunday, DayType::Weekday), monday);
    }

    #[test]
    fn weekend_today_stays_today() {
        let saturday = date(2025, 6, 7);
        let sunday = date(2025, 6, 8);
        assert_eq!(target_date(saturday, DayType::Holiday), saturday);
        assert_eq!(target_date(sunday, DayType::Holiday), sunday);
    }

    #[test]
    fn friday_previews_next_day_for_holiday() {
        let friday = date(2025, 6, 6);
        assert_eq!(target_date(friday, DayType::Holiday), date(2025, 6, 7));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn any_date()(
            year in 2020i32..2100,
            month in 1u32..=12,
            day in 1u32..=28
        ) -> NaiveDate {
            NaiveDate::from_ymd_opt(year, month, day).unwrap()
        }
    }

    fn any_day_type() -> impl Strategy<Value = DayType> {
        prop_oneof![Just(DayType::Weekday), Just(DayType::Holiday)]
    }

    proptest! {
        /// The target always falls under the requested day type.
        #[test]
        fn target_matches_day_type(today in any_date(), dt in any_day_type()) {
            prop_assert!(dt.matches(target_date(today, dt)));
        }

        /// The target is never in the past and at most six days ahead.
        #[test]
        fn target_is_near_future(today in any_date(), dt in any_day_type()) {
            let target = target_date(today, dt);
            let ahead = (target - today).num_days();
            prop_assert!((0..=6).contains(&ahead));
        }

        /// No earlier date between today and the target matches: the
        /// target is the first matching date.
        #[test]
        fn target_is_first_match(today in any_date(), dt in any_day_type()) {
            let target = target_date(today, dt);
            let mut date = today;
            while date < target {
                prop_assert!(!dt.matches(date));
                date = date.succ_opt().unwrap();
            }
        }

        /// Idempotent: recomputing from the target is a fixed point.
        #[test]
        fn target_is_fixed_point(today in any_date(), dt in any_day_type()) {
            let target = target_date(today, dt);
            prop_assert_eq!(target_date(target, dt), target);
        }
    }
}
