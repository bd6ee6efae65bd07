//! Obligation-splitting and cycle-resolution engine for a shared household
//! bill/mortgage tracker.
//!
//! The engine divides shared obligations among people with exact-cent
//! reconciliation, resolves the billing cycle that is current at a
//! caller-supplied reference date, and derives amortization-based
//! projections for mortgages. It is pure computation: plain records in,
//! freshly built result values out, no I/O, no clock reads, no state
//! between calls. Persistence, HTTP, and UI live in external collaborators
//! that consume these types.

pub use allocation::distribute;
pub use bills::Bill;
pub use breakdown::{PaymentBreakdown, estimate_breakdown};
pub use cycles::{
    CycleStatus, ItemCycle, Obligation, PersonCycleShare, resolve_bill_cycle, resolve_item_cycle,
    resolve_mortgage_cycle,
};
pub use error::EngineError;
pub use money::MoneyCents;
pub use mortgages::{Escrow, Mortgage};
pub use payments::{Payment, PaymentAllocation, allocate_proportionally, effective_allocations};
pub use people::Person;
pub use schedule::{days_in_month, first_due_date, next_due_date, normalize_due_date};
pub use splits::{PersonShare, SplitEntry, SplitMode, Splittable, resolve_splits};
pub use stats::{MortgageStats, PayoffProjection, PersonContribution, compute_stats};

mod allocation;
mod bills;
mod breakdown;
mod cycles;
mod error;
mod money;
mod mortgages;
mod payments;
mod people;
mod schedule;
mod splits;
mod stats;

pub type ResultEngine<T> = Result<T, EngineError>;
