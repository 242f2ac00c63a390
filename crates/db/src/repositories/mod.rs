//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

use cfomatch_core::pagination::PageParams;
use sqlx::{Postgres, QueryBuilder};

pub mod activity_repo;
pub mod cfo_repo;
pub mod company_repo;
pub mod contract_repo;
pub mod invoice_repo;
pub mod message_repo;
pub mod profile_repo;
pub mod scout_repo;
pub mod session_repo;
pub mod stored_file_repo;
pub mod support_ticket_repo;
pub mod tag_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use cfo_repo::CfoRepo;
pub use company_repo::CompanyRepo;
pub use contract_repo::ContractRepo;
pub use invoice_repo::InvoiceRepo;
pub use message_repo::MessageRepo;
pub use profile_repo::ProfileRepo;
pub use scout_repo::ScoutRepo;
pub use session_repo::SessionRepo;
pub use stored_file_repo::StoredFileRepo;
pub use support_ticket_repo::SupportTicketRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;

/// Append `ORDER BY … LIMIT … OFFSET …` for one page of a listing.
pub(crate) fn push_page(qb: &mut QueryBuilder<'_, Postgres>, order_by: &str, page: &PageParams) {
    qb.push(" ORDER BY ")
        .push(order_by)
        .push(" LIMIT ")
        .push_bind(page.limit())
        .push(" OFFSET ")
        .push_bind(page.offset());
}
