//! Sort orders and text-filter helpers for the company and CFO directories.

use crate::error::CoreError;

text_enum! {
    /// Sort order for `GET /companies`.
    CompanySort("company sort") {
        Newest => "newest",
        Oldest => "oldest",
        Name => "name",
    }
}

impl Default for CompanySort {
    fn default() -> Self {
        CompanySort::Newest
    }
}

impl CompanySort {
    /// `ORDER BY` clause. Always ends in a unique column so paging is stable.
    pub fn order_by(self) -> &'static str {
        match self {
            CompanySort::Newest => "c.created_at DESC, c.id DESC",
            CompanySort::Oldest => "c.created_at ASC, c.id ASC",
            CompanySort::Name => "c.name ASC, c.id ASC",
        }
    }
}

text_enum! {
    /// Sort order for `GET /cfos`.
    CfoSort("CFO sort") {
        Newest => "newest",
        Oldest => "oldest",
        Experience => "experience",
        FeeLow => "fee_low",
    }
}

impl Default for CfoSort {
    fn default() -> Self {
        CfoSort::Newest
    }
}

impl CfoSort {
    /// `ORDER BY` clause. Always ends in a unique column so paging is stable.
    pub fn order_by(self) -> &'static str {
        match self {
            CfoSort::Newest => "f.created_at DESC, f.id DESC",
            CfoSort::Oldest => "f.created_at ASC, f.id ASC",
            CfoSort::Experience => "f.years_experience DESC, f.id DESC",
            CfoSort::FeeLow => "f.monthly_fee_min ASC NULLS LAST, f.id ASC",
        }
    }
}

text_enum! {
    /// How much of their time a CFO is currently offering.
    Availability("availability") {
        FullTime => "full_time",
        PartTime => "part_time",
        Spot => "spot",
        Unavailable => "unavailable",
    }
}

/// Maximum accepted length of a free-text `q` filter.
pub const MAX_QUERY_CHARS: usize = 100;

/// Escape `%`, `_` and `\` so user input matches literally inside `ILIKE`.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Normalize a free-text filter into an `ILIKE` pattern.
///
/// Returns `Ok(None)` when the filter is absent or blank.
pub fn contains_pattern(q: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(q) = q.map(str::trim).filter(|q| !q.is_empty()) else {
        return Ok(None);
    };
    if q.chars().count() > MAX_QUERY_CHARS {
        return Err(CoreError::Validation(format!(
            "q must be at most {MAX_QUERY_CHARS} characters"
        )));
    }
    Ok(Some(format!("%{}%", escape_like(q))))
}
