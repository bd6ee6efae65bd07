//! The module contains the `Bill` record: a one-off obligation with a
//! single due date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{MoneyCents, SplitEntry, SplitMode, Splittable};

/// A one-off shared bill.
///
/// The bill's only cycle is its due date; the cycle resolver matches every
/// payment for the bill against it regardless of paid date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    /// Stable identifier, generated once and persisted by the external
    /// store so the bill can be renamed without breaking references.
    pub id: Uuid,
    pub name: String,
    pub amount: MoneyCents,
    pub due_date: NaiveDate,
    pub split_mode: SplitMode,
    pub splits: Vec<SplitEntry>,
}

impl Bill {
    pub fn new(
        name: String,
        amount: MoneyCents,
        due_date: NaiveDate,
        split_mode: SplitMode,
        splits: Vec<SplitEntry>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            amount,
            due_date,
            split_mode,
            splits,
        }
    }
}

impl Splittable for Bill {
    fn amount(&self) -> MoneyCents {
        self.amount
    }

    fn split_mode(&self) -> SplitMode {
        self.split_mode
    }

    fn split_entries(&self) -> &[SplitEntry] {
        &self.splits
    }
}
