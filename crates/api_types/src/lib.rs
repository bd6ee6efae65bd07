//! Boundary records for the excluded presentation/API layers.
//!
//! Engine results are plain in-memory values; these views are their wire
//! shape. Amounts are integer minor units (`*_minor`), dates are ISO-8601
//! calendar dates, enums use canonical snake_case strings.

use serde::{Deserialize, Serialize};

/// Aggregate state of a billing cycle, as serialized for clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    Paid,
    PartiallyPaid,
    Unpaid,
    Overdue,
    Upcoming,
}

impl From<engine::CycleStatus> for CycleStatus {
    fn from(status: engine::CycleStatus) -> Self {
        match status {
            engine::CycleStatus::Paid => Self::Paid,
            engine::CycleStatus::PartiallyPaid => Self::PartiallyPaid,
            engine::CycleStatus::Unpaid => Self::Unpaid,
            engine::CycleStatus::Overdue => Self::Overdue,
            engine::CycleStatus::Upcoming => Self::Upcoming,
        }
    }
}

pub mod cycle {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;

    /// One person's position within a cycle.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PersonShareView {
        pub person_id: Uuid,
        pub owed_minor: i64,
        pub paid_minor: i64,
        pub remaining_minor: i64,
    }

    /// A resolved billing cycle.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ItemCycleView {
        /// ISO-8601 calendar date (`YYYY-MM-DD`).
        pub cycle_start: NaiveDate,
        pub cycle_end: NaiveDate,
        pub due_date: NaiveDate,
        pub status: CycleStatus,
        pub total_paid_minor: i64,
        pub total_remaining_minor: i64,
        pub people: Vec<PersonShareView>,
    }

    impl From<&engine::PersonCycleShare> for PersonShareView {
        fn from(share: &engine::PersonCycleShare) -> Self {
            Self {
                person_id: share.person_id,
                owed_minor: share.owed.cents(),
                paid_minor: share.paid.cents(),
                remaining_minor: share.remaining.cents(),
            }
        }
    }

    impl From<&engine::ItemCycle> for ItemCycleView {
        fn from(cycle: &engine::ItemCycle) -> Self {
            Self {
                cycle_start: cycle.cycle_start,
                cycle_end: cycle.cycle_end,
                due_date: cycle.due_date,
                status: cycle.status.into(),
                total_paid_minor: cycle.total_paid.cents(),
                total_remaining_minor: cycle.total_remaining.cents(),
                people: cycle.people.iter().map(PersonShareView::from).collect(),
            }
        }
    }
}

pub mod stats {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;

    /// Remaining-term projection for one payment scenario.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ProjectionView {
        pub months_remaining: Option<u32>,
        /// ISO-8601 calendar date; absent when no projection exists.
        pub payoff_date: Option<NaiveDate>,
        pub insufficient_payment: bool,
    }

    /// One person's ranked contribution total.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ContributionView {
        pub person_id: Uuid,
        pub total_minor: i64,
    }

    /// Aggregate mortgage statistics.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct MortgageStatsView {
        pub ytd_principal_minor: i64,
        pub ytd_interest_minor: i64,
        pub ytd_escrow_minor: i64,
        pub lifetime_principal_minor: i64,
        pub percent_principal_paid: f64,
        pub avg_extra_principal_minor: i64,
        pub baseline: ProjectionView,
        pub accelerated: ProjectionView,
        pub contributions_ytd: Vec<ContributionView>,
        pub contributions_lifetime: Vec<ContributionView>,
    }

    impl From<engine::PayoffProjection> for ProjectionView {
        fn from(projection: engine::PayoffProjection) -> Self {
            Self {
                months_remaining: projection.months_remaining,
                payoff_date: projection.payoff_date,
                insufficient_payment: projection.insufficient_payment,
            }
        }
    }

    impl From<engine::PersonContribution> for ContributionView {
        fn from(contribution: engine::PersonContribution) -> Self {
            Self {
                person_id: contribution.person_id,
                total_minor: contribution.total.cents(),
            }
        }
    }

    impl From<&engine::MortgageStats> for MortgageStatsView {
        fn from(stats: &engine::MortgageStats) -> Self {
            Self {
                ytd_principal_minor: stats.ytd_principal.cents(),
                ytd_interest_minor: stats.ytd_interest.cents(),
                ytd_escrow_minor: stats.ytd_escrow.cents(),
                lifetime_principal_minor: stats.lifetime_principal.cents(),
                percent_principal_paid: stats.percent_principal_paid,
                avg_extra_principal_minor: stats.avg_extra_principal.cents(),
                baseline: stats.baseline.into(),
                accelerated: stats.accelerated.into(),
                contributions_ytd: stats
                    .contributions_ytd
                    .iter()
                    .copied()
                    .map(ContributionView::from)
                    .collect(),
                contributions_lifetime: stats
                    .contributions_lifetime
                    .iter()
                    .copied()
                    .map(ContributionView::from)
                    .collect(),
            }
        }
    }
}

pub mod breakdown {
    use super::*;

    /// Estimated composition of a single mortgage payment.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PaymentBreakdownView {
        pub principal_minor: i64,
        pub interest_minor: i64,
        pub escrow_minor: i64,
    }

    impl From<engine::PaymentBreakdown> for PaymentBreakdownView {
        fn from(breakdown: engine::PaymentBreakdown) -> Self {
            Self {
                principal_minor: breakdown.principal.cents(),
                interest_minor: breakdown.interest.cents(),
                escrow_minor: breakdown.escrow.cents(),
            }
        }
    }
}
