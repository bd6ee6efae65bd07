//! Split semantics: how an obligation's total divides among people.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, Person, allocation};

/// How the raw split values of an obligation are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    FixedAmount,
    Percent,
    Shares,
}

impl SplitMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FixedAmount => "fixed_amount",
            Self::Percent => "percent",
            Self::Shares => "shares",
        }
    }
}

impl TryFrom<&str> for SplitMode {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "fixed_amount" => Ok(Self::FixedAmount),
            "percent" => Ok(Self::Percent),
            "shares" => Ok(Self::Shares),
            other => Err(EngineError::InvalidKind(format!(
                "invalid split mode: {other}"
            ))),
        }
    }
}

/// One participant's slice of an obligation's split configuration.
///
/// `value` is interpreted per [`SplitMode`]:
/// - `FixedAmount`: the amount in minor units (cents), trusted as-is.
/// - `Percent`: percentage points; the resolver normalizes, so the points
///   need not sum to 100.
/// - `Shares`: a relative weight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplitEntry {
    pub person_id: Uuid,
    pub value: f64,
}

impl SplitEntry {
    pub fn new(person_id: Uuid, value: f64) -> Self {
        Self { person_id, value }
    }
}

/// An obligation whose total amount can be divided among people.
///
/// Implemented by [`crate::Bill`] (over its amount) and [`crate::Mortgage`]
/// (over its recurring scheduled payment).
pub trait Splittable {
    /// Total amount to divide, in cents.
    fn amount(&self) -> MoneyCents;
    fn split_mode(&self) -> SplitMode;
    fn split_entries(&self) -> &[SplitEntry];
}

/// One person's resolved share of an obligation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersonShare {
    pub person_id: Uuid,
    pub amount: MoneyCents,
}

/// Resolves an obligation's split configuration into exact per-person cents.
///
/// Entries are active when their person exists in `people` and their value
/// is positive; inactive participants are excluded rather than listed at
/// zero, which matters for `Shares` where the divisor is the sum over
/// active entries only.
///
/// Degenerate inputs (amount ≤ 0, or no active entry) resolve to a zero
/// share for every person in the roster, so downstream consumers can always
/// look a person up.
///
/// For `Percent` and `Shares` the ratios go through [`allocation::distribute`]
/// and the returned amounts sum to the obligation amount exactly.
/// `FixedAmount` values are trusted raw input; validation that they sum to
/// the total belongs to the form layer.
pub fn resolve_splits(obligation: &impl Splittable, people: &[Person]) -> Vec<PersonShare> {
    let total = obligation.amount();
    let active: Vec<&SplitEntry> = obligation
        .split_entries()
        .iter()
        .filter(|entry| entry.value > 0.0 && people.iter().any(|p| p.id == entry.person_id))
        .collect();

    if !total.is_positive() || active.is_empty() {
        return people
            .iter()
            .map(|person| PersonShare {
                person_id: person.id,
                amount: MoneyCents::ZERO,
            })
            .collect();
    }

    match obligation.split_mode() {
        SplitMode::FixedAmount => active
            .iter()
            .map(|entry| PersonShare {
                person_id: entry.person_id,
                amount: MoneyCents::new(entry.value.round() as i64),
            })
            .collect(),
        // Percent values are normalized by their own sum, so both modes
        // reduce to the same ratio: total * value / sum(values).
        SplitMode::Percent | SplitMode::Shares => {
            let divisor: f64 = active.iter().map(|entry| entry.value).sum();
            let raw_shares: Vec<(Uuid, f64)> = active
                .iter()
                .map(|entry| {
                    (
                        entry.person_id,
                        total.cents() as f64 * entry.value / divisor,
                    )
                })
                .collect();
            allocation::distribute(total, &raw_shares)
                .into_iter()
                .map(|(person_id, amount)| PersonShare { person_id, amount })
                .collect()
        }
    }
}
