//! Billing-cycle resolution: which cycle is current, its status, and who
//! still owes what.
//!
//! Status is a pure function of the cycle totals and the caller-supplied
//! "as of" date. Nothing here reads a clock or keeps state between calls;
//! resolving the same inputs twice yields the same cycle.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    Bill, EngineError, MoneyCents, Mortgage, Payment, Person, Splittable, payments, schedule,
    splits,
};

/// Aggregate state of a billing cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    Paid,
    PartiallyPaid,
    Unpaid,
    Overdue,
    Upcoming,
}

impl CycleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::PartiallyPaid => "partially_paid",
            Self::Unpaid => "unpaid",
            Self::Overdue => "overdue",
            Self::Upcoming => "upcoming",
        }
    }
}

impl TryFrom<&str> for CycleStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "paid" => Ok(Self::Paid),
            "partially_paid" => Ok(Self::PartiallyPaid),
            "unpaid" => Ok(Self::Unpaid),
            "overdue" => Ok(Self::Overdue),
            "upcoming" => Ok(Self::Upcoming),
            other => Err(EngineError::InvalidKind(format!(
                "invalid cycle status: {other}"
            ))),
        }
    }
}

/// One person's position within a resolved cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersonCycleShare {
    pub person_id: Uuid,
    pub owed: MoneyCents,
    pub paid: MoneyCents,
    pub remaining: MoneyCents,
}

/// A resolved billing cycle.
///
/// Built fresh on every resolution call and never cached or mutated by the
/// engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemCycle {
    pub cycle_start: NaiveDate,
    pub cycle_end: NaiveDate,
    pub due_date: NaiveDate,
    pub status: CycleStatus,
    pub total_paid: MoneyCents,
    pub total_remaining: MoneyCents,
    pub people: Vec<PersonCycleShare>,
}

/// A reference to any obligation the resolver understands.
#[derive(Clone, Copy, Debug)]
pub enum Obligation<'a> {
    Bill(&'a Bill),
    Mortgage(&'a Mortgage),
}

/// Derives the status from the cycle totals and the reference date.
///
/// The rule is ordered: settled cycles are `Paid` no matter the date, then
/// the date decides `Overdue`, then partial progress decides between
/// `PartiallyPaid` and `Unpaid`. The engine works in whole days, so "after
/// end of day of the due date" is exactly `as_of > due_date`.
fn status_for(
    total_paid: MoneyCents,
    total_remaining: MoneyCents,
    due_date: NaiveDate,
    as_of: NaiveDate,
) -> CycleStatus {
    if total_remaining.is_zero() {
        CycleStatus::Paid
    } else if as_of > due_date {
        CycleStatus::Overdue
    } else if total_paid.is_positive() {
        CycleStatus::PartiallyPaid
    } else {
        CycleStatus::Unpaid
    }
}

/// Shared cycle construction for both obligation kinds.
///
/// Callers pick the payment window; this carries the totals, the
/// per-person breakdown, and the status rule exactly once.
fn resolve_window(
    obligation: &impl Splittable,
    window_payments: &[&Payment],
    cycle_start: NaiveDate,
    cycle_end: NaiveDate,
    due_date: NaiveDate,
    as_of: NaiveDate,
    people: &[Person],
) -> ItemCycle {
    let total_owed = obligation.amount();
    let total_paid: MoneyCents = window_payments.iter().map(|p| p.amount).sum();
    let total_remaining = total_owed.remaining_after(total_paid);

    let mut shares: Vec<PersonCycleShare> = splits::resolve_splits(obligation, people)
        .into_iter()
        .map(|share| PersonCycleShare {
            person_id: share.person_id,
            owed: share.amount,
            paid: MoneyCents::ZERO,
            remaining: share.amount,
        })
        .collect();

    for payment in window_payments {
        for allocation in payments::effective_allocations(payment, obligation, people) {
            match shares.iter_mut().find(|s| s.person_id == allocation.person_id) {
                Some(share) => share.paid += allocation.amount,
                // Explicit allocations may name someone who owes nothing
                // this cycle; surface the payment instead of dropping it.
                None => shares.push(PersonCycleShare {
                    person_id: allocation.person_id,
                    owed: MoneyCents::ZERO,
                    paid: allocation.amount,
                    remaining: MoneyCents::ZERO,
                }),
            }
        }
    }
    for share in &mut shares {
        share.remaining = share.owed.remaining_after(share.paid);
    }

    ItemCycle {
        cycle_start,
        cycle_end,
        due_date,
        status: status_for(total_paid, total_remaining, due_date, as_of),
        total_paid,
        total_remaining,
        people: shares,
    }
}

/// Resolves a bill's single cycle against its full payment history.
pub fn resolve_bill_cycle(
    bill: &Bill,
    payments: &[Payment],
    people: &[Person],
    as_of: NaiveDate,
) -> ItemCycle {
    let all: Vec<&Payment> = payments.iter().collect();
    resolve_window(
        bill,
        &all,
        bill.due_date,
        bill.due_date,
        bill.due_date,
        as_of,
        people,
    )
}

/// Resolves the mortgage cycle that is current at `as_of`.
///
/// Before the first due date the cycle is `Upcoming` with the full
/// scheduled payment owed. `None` means no applicable cycle exists: the
/// computed due date precedes the first due date, which only happens with
/// defective caller-supplied dates. Callers treat `None` as "omit", never
/// as an error.
pub fn resolve_mortgage_cycle(
    mortgage: &Mortgage,
    payments: &[Payment],
    people: &[Person],
    as_of: NaiveDate,
) -> Option<ItemCycle> {
    let first_due = schedule::first_due_date(mortgage)?;

    if as_of < first_due {
        debug!(mortgage = %mortgage.id, %first_due, %as_of, "cycle not started yet");
        return Some(upcoming_cycle(mortgage, first_due, people));
    }

    let due = schedule::normalize_due_date(as_of.year(), as_of.month(), mortgage.payment_day)?;
    if due < first_due {
        debug!(mortgage = %mortgage.id, %due, %first_due, "due date precedes first cycle");
        return None;
    }

    let start = schedule::cycle_start(mortgage, due, first_due)?;
    let in_window: Vec<&Payment> = payments
        .iter()
        .filter(|p| p.paid_date >= start && p.paid_date <= due)
        .collect();
    debug!(
        mortgage = %mortgage.id,
        cycle_start = %start,
        cycle_end = %due,
        payments = in_window.len(),
        "resolved mortgage cycle window"
    );

    Some(resolve_window(
        mortgage, &in_window, start, due, due, as_of, people,
    ))
}

/// Resolves the current cycle for any obligation kind.
///
/// The bill branch always yields a cycle; the mortgage branch keeps its
/// `None` ("no applicable cycle") signal.
pub fn resolve_item_cycle(
    obligation: Obligation<'_>,
    payments: &[Payment],
    people: &[Person],
    as_of: NaiveDate,
) -> Option<ItemCycle> {
    match obligation {
        Obligation::Bill(bill) => Some(resolve_bill_cycle(bill, payments, people, as_of)),
        Obligation::Mortgage(mortgage) => {
            resolve_mortgage_cycle(mortgage, payments, people, as_of)
        }
    }
}

fn upcoming_cycle(mortgage: &Mortgage, first_due: NaiveDate, people: &[Person]) -> ItemCycle {
    let shares: Vec<PersonCycleShare> = splits::resolve_splits(mortgage, people)
        .into_iter()
        .map(|share| PersonCycleShare {
            person_id: share.person_id,
            owed: share.amount,
            paid: MoneyCents::ZERO,
            remaining: share.amount,
        })
        .collect();

    ItemCycle {
        cycle_start: mortgage.start_date,
        cycle_end: first_due,
        due_date: first_due,
        status: CycleStatus::Upcoming,
        total_paid: MoneyCents::ZERO,
        total_remaining: mortgage.scheduled_payment,
        people: shares,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn status_rule_is_ordered() {
        let due = date(2025, 5, 1);
        let zero = MoneyCents::ZERO;
        let paid = MoneyCents::new(4_000);
        let remaining = MoneyCents::new(6_000);

        // Settled wins over the date.
        assert_eq!(status_for(paid, zero, due, date(2025, 6, 1)), CycleStatus::Paid);
        // Past end-of-day of the due date.
        assert_eq!(
            status_for(paid, remaining, due, date(2025, 5, 2)),
            CycleStatus::Overdue
        );
        // On the due date itself the cycle is not overdue yet.
        assert_eq!(
            status_for(paid, remaining, due, due),
            CycleStatus::PartiallyPaid
        );
        assert_eq!(
            status_for(zero, remaining, due, date(2025, 4, 20)),
            CycleStatus::Unpaid
        );
    }

    #[test]
    fn status_round_trips_canonical_strings() {
        for status in [
            CycleStatus::Paid,
            CycleStatus::PartiallyPaid,
            CycleStatus::Unpaid,
            CycleStatus::Overdue,
            CycleStatus::Upcoming,
        ] {
            assert_eq!(CycleStatus::try_from(status.as_str()).unwrap(), status);
        }
        assert!(CycleStatus::try_from("late").is_err());
    }
}
