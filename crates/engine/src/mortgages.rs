//! The module contains the `Mortgage` record and its static terms.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, SplitEntry, SplitMode, Splittable};

/// Optional monthly escrow components bundled into the scheduled payment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Escrow {
    pub taxes: Option<MoneyCents>,
    pub insurance: Option<MoneyCents>,
    pub mortgage_insurance: Option<MoneyCents>,
    pub hoa: Option<MoneyCents>,
}

impl Escrow {
    /// Sum of the enabled components.
    #[must_use]
    pub fn monthly_total(&self) -> MoneyCents {
        [self.taxes, self.insurance, self.mortgage_insurance, self.hoa]
            .into_iter()
            .flatten()
            .sum()
    }
}

/// A fixed-rate mortgage whose scheduled payment recurs monthly.
///
/// The scheduled payment is the splittable obligation; the cycle resolver
/// derives one due date per month from `payment_day` (clamped to month
/// length) starting at `start_date`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mortgage {
    pub id: Uuid,
    pub name: String,
    pub original_principal: MoneyCents,
    pub current_principal: MoneyCents,
    /// Annual rate in APY percent points (e.g. `6.25`).
    pub interest_rate_apy: f64,
    pub term_months: u32,
    pub start_date: NaiveDate,
    /// Day of month the payment is due, 1–31. Days past the end of a month
    /// resolve to that month's last day.
    pub payment_day: u32,
    /// Full monthly amount due: principal and interest plus escrow.
    pub scheduled_payment: MoneyCents,
    pub escrow: Escrow,
    pub split_mode: SplitMode,
    pub splits: Vec<SplitEntry>,
}

impl Mortgage {
    /// Creates a mortgage after validating its structural terms.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        original_principal: MoneyCents,
        current_principal: MoneyCents,
        interest_rate_apy: f64,
        term_months: u32,
        start_date: NaiveDate,
        payment_day: u32,
        scheduled_payment: MoneyCents,
        escrow: Escrow,
        split_mode: SplitMode,
        splits: Vec<SplitEntry>,
    ) -> ResultEngine<Self> {
        if !(1..=31).contains(&payment_day) {
            return Err(EngineError::InvalidDate(format!(
                "payment day must be 1-31, got {payment_day}"
            )));
        }
        if term_months == 0 {
            return Err(EngineError::InvalidTerm(
                "term must be at least one month".to_string(),
            ));
        }
        if !interest_rate_apy.is_finite() || interest_rate_apy < 0.0 {
            return Err(EngineError::InvalidTerm(format!(
                "interest rate must be a non-negative percentage, got {interest_rate_apy}"
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            original_principal,
            current_principal,
            interest_rate_apy,
            term_months,
            start_date,
            payment_day,
            scheduled_payment,
            escrow,
            split_mode,
            splits,
        })
    }

    /// Periodic rate per month, as a fraction (APY percent / 100 / 12).
    #[must_use]
    pub fn monthly_rate(&self) -> f64 {
        self.interest_rate_apy / 100.0 / 12.0
    }

    /// Monthly escrow total across the enabled components.
    #[must_use]
    pub fn escrow_monthly(&self) -> MoneyCents {
        self.escrow.monthly_total()
    }

    /// Scheduled principal-and-interest portion: the scheduled payment with
    /// escrow stripped out, floored at zero.
    #[must_use]
    pub fn principal_and_interest(&self) -> MoneyCents {
        self.scheduled_payment.remaining_after(self.escrow_monthly())
    }
}

impl Splittable for Mortgage {
    fn amount(&self) -> MoneyCents {
        self.scheduled_payment
    }

    fn split_mode(&self) -> SplitMode {
        self.split_mode
    }

    fn split_entries(&self) -> &[SplitEntry] {
        &self.splits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(payment_day: u32, term_months: u32, rate: f64) -> ResultEngine<Mortgage> {
        Mortgage::new(
            "Home".to_string(),
            MoneyCents::new(40_000_000),
            MoneyCents::new(35_000_000),
            rate,
            term_months,
            NaiveDate::from_ymd_opt(2020, 6, 15).unwrap(),
            payment_day,
            MoneyCents::new(250_000),
            Escrow::default(),
            SplitMode::Shares,
            Vec::new(),
        )
    }

    #[test]
    fn validates_payment_day() {
        assert!(terms(0, 360, 5.0).is_err());
        assert!(terms(32, 360, 5.0).is_err());
        assert!(terms(31, 360, 5.0).is_ok());
    }

    #[test]
    fn validates_term_and_rate() {
        assert!(terms(1, 0, 5.0).is_err());
        assert!(terms(1, 360, -1.0).is_err());
        assert!(terms(1, 360, f64::NAN).is_err());
        assert!(terms(1, 360, 0.0).is_ok());
    }

    #[test]
    fn principal_and_interest_strips_escrow() {
        let mut mortgage = terms(1, 360, 6.0).unwrap();
        mortgage.escrow = Escrow {
            taxes: Some(MoneyCents::new(30_000)),
            insurance: Some(MoneyCents::new(10_000)),
            mortgage_insurance: None,
            hoa: Some(MoneyCents::new(5_000)),
        };

        assert_eq!(mortgage.escrow_monthly().cents(), 45_000);
        assert_eq!(mortgage.principal_and_interest().cents(), 205_000);
    }
}
