//! Title validation mirroring the dashboard's project form rules.
//!
//! The dashboard only requires titles to be non-blank; generated titles are
//! held to a slightly tighter shape so they render well in the catalogue.
//!
//! # Validation Rules
//!
//! - Length between [`TITLE_MIN`] and [`TITLE_MAX`] characters
//! - No leading or trailing whitespace
//! - No runs of more than one space

/// Minimum allowed length for a generated title.
pub const TITLE_MIN: usize = 3;

/// Maximum allowed length for a generated title.
pub const TITLE_MAX: usize = 80;

/// Validates a generated title.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_title;
///
/// assert!(is_valid_title("Site Revamp"));
/// assert!(!is_valid_title("ab"));            // Too short
/// assert!(!is_valid_title(" Site Revamp"));  // Leading whitespace
/// assert!(!is_valid_title("Site  Revamp"));  // Double space
/// ```
#[must_use]
pub fn is_valid_title(title: &str) -> bool {
    let length = title.chars().count();
    if !(TITLE_MIN..=TITLE_MAX).contains(&length) {
        return false;
    }
    if title.trim() != title {
        return false;
    }
    !title.contains("  ")
}

/// Collapses whitespace runs into single spaces and trims the ends.
#[must_use]
pub(crate) fn normalise_title(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
