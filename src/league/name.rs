//! Member name normalization.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::league::MemberKey;

/// Canonicalizes a display name into a [`MemberKey`].
///
/// The key is lower-cased, stripped of diacritics, trimmed and has its inner
/// whitespace collapsed to single spaces, so `" Á  NEW Member "` and
/// `"a new member"` designate the same member. Applying it twice gives the
/// same key as applying it once.
///
/// # Examples
///
/// ```
/// # use foosbot::league::normalize;
/// assert_eq!(normalize("Á New Member"), "a new member");
/// ```
pub fn normalize(raw_name: &str) -> MemberKey {
    let folded: String = raw_name
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    collapse_whitespace(&folded)
}

/// Trims a name and collapses its inner whitespace, preserving case.
pub fn collapse_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<&str>>().join(" ")
}
