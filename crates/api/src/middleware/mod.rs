//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated account from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires an `admin` account.
//! - [`rbac::RequireCompany`] -- Requires a `company` account.
//! - [`rbac::RequireCfo`] -- Requires a `cfo` account.

pub mod auth;
pub mod rbac;
