//! Domain records for the front office.
//!
//! # Responsibility
//! - Define users, appointments and the five civil-registry record types.
//! - Declare each record's form schema next to the record itself.
//!
//! # Invariants
//! - Every stored record is identified by a `RecordId` that is never reused.
//! - Records carry no cross-entity references.

pub mod appointment;
pub mod id;
pub mod registration;
pub mod user;

use id::RecordId;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storable record addressed by a stable id inside one named collection.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Collection name used by storage backends.
    const COLLECTION: &'static str;

    fn id(&self) -> &RecordId;
}
