//! Year-to-date, lifetime, and projection statistics for a mortgage.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::{
    MoneyCents, Mortgage, Payment, PaymentBreakdown, Person, payments, schedule,
};

/// One person's accumulated payment total, for ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersonContribution {
    pub person_id: Uuid,
    pub total: MoneyCents,
}

/// Remaining-term projection for one payment scenario.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PayoffProjection {
    pub months_remaining: Option<u32>,
    pub payoff_date: Option<NaiveDate>,
    /// Set when the payment does not exceed one period's interest, so the
    /// loan cannot amortize at that payment level and no numeric projection
    /// exists.
    pub insufficient_payment: bool,
}

/// Aggregate statistics for a mortgage at a reference date.
#[derive(Clone, Debug, PartialEq)]
pub struct MortgageStats {
    pub ytd_principal: MoneyCents,
    pub ytd_interest: MoneyCents,
    pub ytd_escrow: MoneyCents,
    pub lifetime_principal: MoneyCents,
    /// Lifetime principal as a percentage of the original principal, 0 when
    /// the original principal is 0.
    pub percent_principal_paid: f64,
    /// Trailing average of voluntary extra principal, from the three
    /// largest monthly principal sums.
    pub avg_extra_principal: MoneyCents,
    /// Projection at the scheduled principal-and-interest payment.
    pub baseline: PayoffProjection,
    /// Projection at the scheduled payment plus the trailing extra.
    pub accelerated: PayoffProjection,
    /// Per-person totals for the current calendar year, sorted descending.
    pub contributions_ytd: Vec<PersonContribution>,
    /// Per-person totals across the full history, sorted descending.
    pub contributions_lifetime: Vec<PersonContribution>,
}

/// Computes mortgage statistics from the payment history.
///
/// `breakdowns` must parallel `payments` index-by-index (one
/// [`PaymentBreakdown`] per payment, typically from
/// [`crate::estimate_breakdown`]); the caller owns that pairing.
pub fn compute_stats(
    mortgage: &Mortgage,
    payments: &[Payment],
    breakdowns: &[PaymentBreakdown],
    people: &[Person],
    as_of: NaiveDate,
) -> MortgageStats {
    let mut ytd_principal = MoneyCents::ZERO;
    let mut ytd_interest = MoneyCents::ZERO;
    let mut ytd_escrow = MoneyCents::ZERO;
    let mut lifetime_principal = MoneyCents::ZERO;
    let mut monthly_principal: BTreeMap<(i32, u32), MoneyCents> = BTreeMap::new();

    for (payment, breakdown) in payments.iter().zip(breakdowns) {
        lifetime_principal += breakdown.principal;
        *monthly_principal
            .entry((payment.paid_date.year(), payment.paid_date.month()))
            .or_insert(MoneyCents::ZERO) += breakdown.principal;

        if payment.paid_date.year() == as_of.year() {
            ytd_principal += breakdown.principal;
            ytd_interest += breakdown.interest;
            ytd_escrow += breakdown.escrow;
        }
    }

    let percent_principal_paid = if mortgage.original_principal.is_positive() {
        lifetime_principal.cents() as f64 / mortgage.original_principal.cents() as f64 * 100.0
    } else {
        0.0
    };

    let avg_extra_principal = trailing_extra_principal(mortgage, &monthly_principal);

    let scheduled_pi = mortgage.principal_and_interest();
    let baseline = project_payoff(mortgage, scheduled_pi, as_of);
    let accelerated = project_payoff(mortgage, scheduled_pi + avg_extra_principal, as_of);

    let contributions_ytd = rank_contributions(
        payments.iter().filter(|p| p.paid_date.year() == as_of.year()),
        mortgage,
        people,
    );
    let contributions_lifetime = rank_contributions(payments.iter(), mortgage, people);

    MortgageStats {
        ytd_principal,
        ytd_interest,
        ytd_escrow,
        lifetime_principal,
        percent_principal_paid,
        avg_extra_principal,
        baseline,
        accelerated,
        contributions_ytd,
        contributions_lifetime,
    }
}

/// Average voluntary extra principal across the three largest monthly
/// principal sums: each sum minus the scheduled principal-and-interest
/// portion, floored at zero.
fn trailing_extra_principal(
    mortgage: &Mortgage,
    monthly_principal: &BTreeMap<(i32, u32), MoneyCents>,
) -> MoneyCents {
    let mut sums: Vec<MoneyCents> = monthly_principal.values().copied().collect();
    if sums.is_empty() {
        return MoneyCents::ZERO;
    }
    sums.sort_unstable_by(|a, b| b.cmp(a));

    let scheduled_pi = mortgage.principal_and_interest();
    let top: Vec<MoneyCents> = sums
        .into_iter()
        .take(3)
        .map(|sum| sum.remaining_after(scheduled_pi))
        .collect();
    let total: i64 = top.iter().map(|extra| extra.cents()).sum();
    MoneyCents::new(total / top.len() as i64)
}

/// Solves the remaining-term formula for a fixed-rate amortizing loan at
/// the given monthly payment.
///
/// Zero monthly rate degenerates to straight division; a payment at or
/// below one period's interest cannot amortize and reports
/// `insufficient_payment` instead of a number. The payoff date advances
/// whole due dates from the next one after `as_of`, re-clamping the
/// payment day each month.
fn project_payoff(mortgage: &Mortgage, payment: MoneyCents, as_of: NaiveDate) -> PayoffProjection {
    let principal = mortgage.current_principal;
    if !principal.is_positive() {
        return PayoffProjection {
            months_remaining: Some(0),
            payoff_date: None,
            insufficient_payment: false,
        };
    }
    if !payment.is_positive() {
        return PayoffProjection {
            months_remaining: None,
            payoff_date: None,
            insufficient_payment: true,
        };
    }

    let rate = mortgage.monthly_rate();
    let months = if rate == 0.0 {
        u32::try_from((principal.cents() as u64).div_ceil(payment.cents() as u64)).ok()
    } else {
        let balance = principal.cents() as f64;
        let p = payment.cents() as f64;
        let period_interest = balance * rate;
        if p <= period_interest {
            None
        } else {
            let n = (p / (p - period_interest)).ln() / (1.0 + rate).ln();
            Some(n.ceil() as u32)
        }
    };

    match months {
        None => PayoffProjection {
            months_remaining: None,
            payoff_date: None,
            insufficient_payment: true,
        },
        Some(n) => {
            let payoff_date = schedule::next_due_date(mortgage, as_of).and_then(|base| {
                schedule::advance_due(base, n.saturating_sub(1), mortgage.payment_day)
            });
            PayoffProjection {
                months_remaining: Some(n),
                payoff_date,
                insufficient_payment: false,
            }
        }
    }
}

fn rank_contributions<'a>(
    subset: impl Iterator<Item = &'a Payment>,
    mortgage: &Mortgage,
    people: &[Person],
) -> Vec<PersonContribution> {
    let mut totals: HashMap<Uuid, MoneyCents> = HashMap::new();
    for payment in subset {
        for allocation in payments::effective_allocations(payment, mortgage, people) {
            *totals.entry(allocation.person_id).or_insert(MoneyCents::ZERO) += allocation.amount;
        }
    }

    let mut ranking: Vec<PersonContribution> = totals
        .into_iter()
        .map(|(person_id, total)| PersonContribution { person_id, total })
        .collect();
    ranking.sort_unstable_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.person_id.cmp(&b.person_id))
    });
    ranking
}
