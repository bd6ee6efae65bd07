//! Approximate principal/interest/escrow composition of one mortgage
//! payment.

use crate::{MoneyCents, Mortgage, Payment};

/// Estimated composition of a single payment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaymentBreakdown {
    pub principal: MoneyCents,
    pub interest: MoneyCents,
    pub escrow: MoneyCents,
}

/// Estimates how a payment divided into interest, escrow, and principal.
///
/// The principal balance at the time of the payment is approximated by
/// adding the amounts of all later payments back onto the mortgage's
/// current principal. This is a heuristic, not an amortization ledger:
/// payments recorded out of chronological order, recasts, and lump
/// principal events are misattributed between interest and principal. The
/// approximation is intentional; a running ledger would change reported
/// values.
///
/// The payment amount is consumed in order (interest first, then escrow,
/// then principal), with each portion capped so the three never sum to more
/// than the payment.
pub fn estimate_breakdown(
    payment: &Payment,
    mortgage: &Mortgage,
    all_payments: &[Payment],
) -> PaymentBreakdown {
    let added_back: MoneyCents = all_payments
        .iter()
        .filter(|p| p.paid_date > payment.paid_date)
        .map(|p| p.amount)
        .sum();
    let balance_at_time = mortgage.current_principal + added_back;

    let interest_due =
        MoneyCents::new((balance_at_time.cents() as f64 * mortgage.monthly_rate()).floor() as i64);
    let interest = interest_due.max(MoneyCents::ZERO).min(payment.amount);

    let after_interest = payment.amount - interest;
    let escrow = mortgage.escrow_monthly().min(after_interest).max(MoneyCents::ZERO);

    let principal = (payment.amount - interest - escrow).max(MoneyCents::ZERO);

    PaymentBreakdown {
        principal,
        interest,
        escrow,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{Escrow, SplitMode};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mortgage(rate: f64, escrow_taxes: i64) -> Mortgage {
        Mortgage::new(
            "Home".to_string(),
            MoneyCents::new(30_000_000),
            MoneyCents::new(24_000_000),
            rate,
            360,
            date(2020, 1, 1),
            1,
            MoneyCents::new(180_000),
            Escrow {
                taxes: (escrow_taxes > 0).then_some(MoneyCents::new(escrow_taxes)),
                ..Escrow::default()
            },
            SplitMode::Shares,
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn consumes_interest_then_escrow_then_principal() {
        // $240,000 at 6% -> $1,200.00 interest for the cycle.
        let m = mortgage(6.0, 30_000);
        let payment = Payment::new(MoneyCents::new(180_000), date(2025, 3, 1));

        let breakdown = estimate_breakdown(&payment, &m, &[payment.clone()]);
        assert_eq!(breakdown.interest.cents(), 120_000);
        assert_eq!(breakdown.escrow.cents(), 30_000);
        assert_eq!(breakdown.principal.cents(), 30_000);
    }

    #[test]
    fn later_payments_raise_the_balance_at_time() {
        let m = mortgage(6.0, 0);
        let earlier = Payment::new(MoneyCents::new(180_000), date(2025, 2, 1));
        let later = Payment::new(MoneyCents::new(200_000), date(2025, 3, 1));
        let history = vec![earlier.clone(), later];

        // Balance for the earlier payment adds the later $2,000 back:
        // $242,000 at 0.5%/month -> $1,210.00 interest.
        let breakdown = estimate_breakdown(&earlier, &m, &history);
        assert_eq!(breakdown.interest.cents(), 121_000);
        assert_eq!(breakdown.principal.cents(), 59_000);
    }

    #[test]
    fn portions_never_exceed_the_payment() {
        // A token payment smaller than the cycle's interest.
        let m = mortgage(6.0, 30_000);
        let payment = Payment::new(MoneyCents::new(50_000), date(2025, 3, 1));

        let breakdown = estimate_breakdown(&payment, &m, &[payment.clone()]);
        assert_eq!(breakdown.interest.cents(), 50_000);
        assert_eq!(breakdown.escrow, MoneyCents::ZERO);
        assert_eq!(breakdown.principal, MoneyCents::ZERO);
    }

    #[test]
    fn zero_rate_has_no_interest_portion() {
        let m = mortgage(0.0, 30_000);
        let payment = Payment::new(MoneyCents::new(180_000), date(2025, 3, 1));

        let breakdown = estimate_breakdown(&payment, &m, &[payment.clone()]);
        assert_eq!(breakdown.interest, MoneyCents::ZERO);
        assert_eq!(breakdown.escrow.cents(), 30_000);
        assert_eq!(breakdown.principal.cents(), 150_000);
    }
}
