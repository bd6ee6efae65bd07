//! The module contains the `Person` record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A household member who can owe and pay shares of an obligation.
///
/// People are owned by the external people collaborator; the engine only
/// reads them. The `color` tag exists for presentation code and never
/// affects computation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Stable identifier for this person.
    ///
    /// Also the deterministic tie-breaker for penny distribution, so two
    /// resolutions of the same data always agree.
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

impl Person {
    pub fn new(name: String, color: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            color,
        }
    }

    pub fn with_id(id: Uuid, name: String, color: String) -> Self {
        Self { id, name, color }
    }
}
