//! Calendar helpers for monthly billing cycles.
//!
//! A mortgage's due day is a nominal day of month (1–31); months shorter
//! than the nominal day resolve to their last day, so "due on the 31st"
//! lands on Feb 28 (29 in leap years) and Apr 30.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::Mortgage;

/// Number of days in the given month, `None` when `month` is not 1–12.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    Some(next.pred_opt()?.day())
}

/// Resolves a nominal due day within a month, clamping days past the
/// month's end to its last day.
pub fn normalize_due_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let clamped = day.max(1).min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, clamped)
}

/// The mortgage's first due date: in the start month when the start date
/// falls on or before that month's clamped payment day, otherwise in the
/// following month.
pub fn first_due_date(mortgage: &Mortgage) -> Option<NaiveDate> {
    let start = mortgage.start_date;
    let in_start_month = normalize_due_date(start.year(), start.month(), mortgage.payment_day)?;
    if start <= in_start_month {
        Some(in_start_month)
    } else {
        let next = start.checked_add_months(Months::new(1))?;
        normalize_due_date(next.year(), next.month(), mortgage.payment_day)
    }
}

/// The due date in the month before `due`.
pub fn previous_due_date(due: NaiveDate, payment_day: u32) -> Option<NaiveDate> {
    let prev = due.checked_sub_months(Months::new(1))?;
    normalize_due_date(prev.year(), prev.month(), payment_day)
}

/// The mortgage's next due date strictly after `after`, never before the
/// first due date.
pub fn next_due_date(mortgage: &Mortgage, after: NaiveDate) -> Option<NaiveDate> {
    let first = first_due_date(mortgage)?;
    let mut candidate = normalize_due_date(after.year(), after.month(), mortgage.payment_day)?;
    if candidate <= after {
        let next = after.checked_add_months(Months::new(1))?;
        candidate = normalize_due_date(next.year(), next.month(), mortgage.payment_day)?;
    }
    Some(candidate.max(first))
}

/// Advances a due date by whole months, re-clamping the nominal day into
/// each target month.
pub(crate) fn advance_due(due: NaiveDate, months: u32, payment_day: u32) -> Option<NaiveDate> {
    let shifted = due.checked_add_months(Months::new(months))?;
    normalize_due_date(shifted.year(), shifted.month(), payment_day)
}

/// Start of the cycle ending at `due`: the day after the previous cycle's
/// due date, or the mortgage start date for the very first cycle.
pub(crate) fn cycle_start(
    mortgage: &Mortgage,
    due: NaiveDate,
    first_due: NaiveDate,
) -> Option<NaiveDate> {
    if due == first_due {
        Some(mortgage.start_date)
    } else {
        previous_due_date(due, mortgage.payment_day)?.checked_add_days(Days::new(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Escrow, MoneyCents, SplitMode};

    fn mortgage(start: NaiveDate, payment_day: u32) -> Mortgage {
        Mortgage::new(
            "Home".to_string(),
            MoneyCents::new(30_000_000),
            MoneyCents::new(28_000_000),
            5.5,
            360,
            start,
            payment_day,
            MoneyCents::new(180_000),
            Escrow::default(),
            SplitMode::Shares,
            Vec::new(),
        )
        .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn clamps_day_into_short_months() {
        assert_eq!(normalize_due_date(2025, 2, 31).unwrap(), date(2025, 2, 28));
        assert_eq!(normalize_due_date(2024, 2, 31).unwrap(), date(2024, 2, 29));
        assert_eq!(normalize_due_date(2025, 4, 31).unwrap(), date(2025, 4, 30));
        assert_eq!(normalize_due_date(2025, 1, 31).unwrap(), date(2025, 1, 31));
    }

    #[test]
    fn rejects_invalid_months() {
        assert!(days_in_month(2025, 0).is_none());
        assert!(days_in_month(2025, 13).is_none());
        assert!(normalize_due_date(2025, 13, 1).is_none());
    }

    #[test]
    fn first_due_stays_in_start_month_when_day_not_passed() {
        let m = mortgage(date(2025, 3, 10), 15);
        assert_eq!(first_due_date(&m).unwrap(), date(2025, 3, 15));
    }

    #[test]
    fn first_due_rolls_to_next_month_when_day_passed() {
        let m = mortgage(date(2025, 3, 20), 15);
        assert_eq!(first_due_date(&m).unwrap(), date(2025, 4, 15));
    }

    #[test]
    fn first_due_on_the_boundary_day_counts_as_current_month() {
        let m = mortgage(date(2025, 3, 15), 15);
        assert_eq!(first_due_date(&m).unwrap(), date(2025, 3, 15));
    }

    #[test]
    fn next_due_clamps_through_february() {
        let m = mortgage(date(2025, 1, 1), 31);
        assert_eq!(next_due_date(&m, date(2025, 1, 31)).unwrap(), date(2025, 2, 28));
        assert_eq!(next_due_date(&m, date(2025, 2, 28)).unwrap(), date(2025, 3, 31));
    }

    #[test]
    fn next_due_never_precedes_first_due() {
        let m = mortgage(date(2025, 6, 20), 15);
        // First due is Jul 15; asking from early June must not yield Jun 15.
        assert_eq!(next_due_date(&m, date(2025, 6, 1)).unwrap(), date(2025, 7, 15));
    }

    #[test]
    fn cycle_start_is_day_after_previous_due() {
        let m = mortgage(date(2025, 1, 1), 31);
        let first = first_due_date(&m).unwrap();
        assert_eq!(first, date(2025, 1, 31));
        // First cycle starts at the mortgage start date.
        assert_eq!(cycle_start(&m, first, first).unwrap(), date(2025, 1, 1));
        // Later cycles start the day after the previous clamped due date.
        assert_eq!(
            cycle_start(&m, date(2025, 3, 31), first).unwrap(),
            date(2025, 3, 1)
        );
    }
}
