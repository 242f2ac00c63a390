//! Domain rules for the CFO marketplace.
//!
//! Nothing in this crate performs I/O. Status enums, transition tables,
//! pagination math and upload validation live here so the repository and
//! HTTP layers share one definition.

#[macro_use]
mod macros;

pub mod activity;
pub mod contract;
pub mod error;
pub mod invoice;
pub mod pagination;
pub mod roles;
pub mod scout;
pub mod search;
pub mod support;
pub mod tag;
pub mod types;
pub mod upload;
pub mod validation;
