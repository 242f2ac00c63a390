//! Tag categories managed from the admin console.

text_enum! {
    /// Which picker a tag appears in (`tags.category`).
    TagCategory("tag category") {
        Skill => "skill",
        Industry => "industry",
        Certification => "certification",
    }
}

/// Maximum tag name length in characters.
pub const MAX_NAME_CHARS: usize = 50;
