//! Payment records and proportional allocation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{MoneyCents, Person, Splittable, allocation, splits};

/// One person's explicit portion of a payment, as entered by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAllocation {
    pub person_id: Uuid,
    pub amount: MoneyCents,
}

/// A payment against a bill or a mortgage's scheduled payment.
///
/// The same record serves both obligation kinds. When `allocations` is
/// absent the engine derives a per-person split proportional to ownership;
/// when present it is trusted to sum to `amount` (the form layer validates
/// that before the record reaches the engine).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub amount: MoneyCents,
    pub paid_date: NaiveDate,
    pub method: Option<String>,
    pub note: Option<String>,
    pub allocations: Option<Vec<PaymentAllocation>>,
}

impl Payment {
    pub fn new(amount: MoneyCents, paid_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            paid_date,
            method: None,
            note: None,
            allocations: None,
        }
    }

    pub fn with_allocations(
        amount: MoneyCents,
        paid_date: NaiveDate,
        allocations: Vec<PaymentAllocation>,
    ) -> Self {
        Self {
            allocations: Some(allocations),
            ..Self::new(amount, paid_date)
        }
    }
}

/// Splits `payment_amount` across people in proportion to what each owes on
/// the obligation.
///
/// The obligation's full split is resolved first and each owed amount
/// becomes a weight, so a partial payment lands in the same proportions as
/// the full obligation. Returns no allocations when nothing is owed.
pub fn allocate_proportionally(
    payment_amount: MoneyCents,
    obligation: &impl Splittable,
    people: &[Person],
) -> Vec<PaymentAllocation> {
    let shares = splits::resolve_splits(obligation, people);
    let total_owed: MoneyCents = shares.iter().map(|share| share.amount).sum();
    if !total_owed.is_positive() {
        return Vec::new();
    }

    let raw_shares: Vec<(Uuid, f64)> = shares
        .iter()
        .filter(|share| share.amount.is_positive())
        .map(|share| {
            (
                share.person_id,
                payment_amount.cents() as f64 * share.amount.cents() as f64
                    / total_owed.cents() as f64,
            )
        })
        .collect();

    allocation::distribute(payment_amount, &raw_shares)
        .into_iter()
        .map(|(person_id, amount)| PaymentAllocation { person_id, amount })
        .collect()
}

/// The per-person breakdown of a payment: the explicit list when the user
/// entered one, otherwise proportional to ownership.
pub fn effective_allocations(
    payment: &Payment,
    obligation: &impl Splittable,
    people: &[Person],
) -> Vec<PaymentAllocation> {
    match &payment.allocations {
        Some(explicit) => explicit.clone(),
        None => allocate_proportionally(payment.amount, obligation, people),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SplitEntry, SplitMode};

    struct Obligation {
        amount: MoneyCents,
        entries: Vec<SplitEntry>,
    }

    impl Splittable for Obligation {
        fn amount(&self) -> MoneyCents {
            self.amount
        }

        fn split_mode(&self) -> SplitMode {
            SplitMode::Shares
        }

        fn split_entries(&self) -> &[SplitEntry] {
            &self.entries
        }
    }

    fn person(n: u128) -> Person {
        Person::with_id(Uuid::from_u128(n), format!("person-{n}"), "#444".to_string())
    }

    #[test]
    fn partial_payment_keeps_ownership_proportions() {
        let people = vec![person(1), person(2)];
        let obligation = Obligation {
            amount: MoneyCents::new(10_000),
            entries: vec![
                SplitEntry::new(people[0].id, 3.0),
                SplitEntry::new(people[1].id, 1.0),
            ],
        };

        let allocations = allocate_proportionally(MoneyCents::new(4_000), &obligation, &people);
        let total: MoneyCents = allocations.iter().map(|a| a.amount).sum();

        assert_eq!(total.cents(), 4_000);
        assert_eq!(allocations[0].amount.cents(), 3_000);
        assert_eq!(allocations[1].amount.cents(), 1_000);
    }

    #[test]
    fn conserves_odd_payment_amounts() {
        let people = vec![person(1), person(2), person(3)];
        let obligation = Obligation {
            amount: MoneyCents::new(10_000),
            entries: people
                .iter()
                .map(|p| SplitEntry::new(p.id, 1.0))
                .collect(),
        };

        let allocations = allocate_proportionally(MoneyCents::new(101), &obligation, &people);
        let total: MoneyCents = allocations.iter().map(|a| a.amount).sum();
        assert_eq!(total.cents(), 101);
    }

    #[test]
    fn nothing_owed_means_no_allocations() {
        let people = vec![person(1)];
        let obligation = Obligation {
            amount: MoneyCents::ZERO,
            entries: vec![SplitEntry::new(people[0].id, 1.0)],
        };

        assert!(allocate_proportionally(MoneyCents::new(500), &obligation, &people).is_empty());
    }

    #[test]
    fn deserializes_store_records() {
        // The persistence collaborator hands the engine JSON-shaped records;
        // absent allocations must come through as `None`, not an empty list.
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000007",
            "amount": 150000,
            "paid_date": "2025-03-01",
            "method": "ach",
            "note": null,
            "allocations": null
        }"#;

        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.amount.cents(), 150_000);
        assert_eq!(payment.paid_date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(payment.method.as_deref(), Some("ach"));
        assert!(payment.allocations.is_none());
    }

    #[test]
    fn explicit_allocations_win_over_derived() {
        let people = vec![person(1), person(2)];
        let obligation = Obligation {
            amount: MoneyCents::new(10_000),
            entries: vec![
                SplitEntry::new(people[0].id, 1.0),
                SplitEntry::new(people[1].id, 1.0),
            ],
        };
        let explicit = vec![PaymentAllocation {
            person_id: people[1].id,
            amount: MoneyCents::new(2_500),
        }];
        let payment = Payment::with_allocations(
            MoneyCents::new(2_500),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            explicit.clone(),
        );

        assert_eq!(effective_allocations(&payment, &obligation, &people), explicit);
    }
}
