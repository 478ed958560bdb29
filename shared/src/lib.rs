//! Shared types and domain rules for the Market System
//!
//! This crate contains the entity models exchanged over the HTTP API and the
//! pure business rules (document numbering, stock ledger arithmetic, payment
//! acceptance) used by the backend. It performs no I/O.

pub mod increment;
pub mod ledger;
pub mod models;
pub mod payment;
pub mod types;
pub mod validation;

pub use increment::*;
pub use ledger::*;
pub use models::*;
pub use payment::*;
pub use types::*;
pub use validation::*;
