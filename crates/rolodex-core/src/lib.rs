//! Core types for the Rolodex contact manager.
//!
//! This crate has no HTTP or database dependencies. It holds
//! the in-memory [`store::ContactStore`], the persisted [`snapshot::Snapshot`]
//! format with the [`snapshot::SnapshotStore`] persistence seam, and the
//! [`book::AddressBook`] orchestrator that keeps the two in step.

pub mod book;
pub mod contact;
pub mod error;
pub mod snapshot;
pub mod store;

pub use error::{Error, Result};
