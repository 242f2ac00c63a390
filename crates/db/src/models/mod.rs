//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` request DTOs for inserts and patches
//! - `Deserialize` query-parameter structs for listings

pub mod activity;
pub mod cfo;
pub mod company;
pub mod contract;
pub mod invoice;
pub mod message;
pub mod profile;
pub mod scout;
pub mod session;
pub mod stored_file;
pub mod support;
pub mod tag;
pub mod user;
