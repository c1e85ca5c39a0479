//! Full-width / half-width digit detection

/// Full-width digits U+FF10..U+FF19
pub const FULLWIDTH_DIGITS: [char; 10] = ['０', '１', '２', '３', '４', '５', '６', '７', '８', '９'];

/// Half-width digits, positionally matching [`FULLWIDTH_DIGITS`]
pub const HALFWIDTH_DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Whether `c` is a full-width digit
#[must_use]
pub fn is_fullwidth_digit(c: char) -> bool {
    FULLWIDTH_DIGITS.contains(&c)
}

/// Map a full-width digit to its half-width counterpart, other chars unchanged
#[must_use]
pub fn to_halfwidth_digit(c: char) -> char {
    FULLWIDTH_DIGITS
        .iter()
        .position(|&d| d == c)
        .map_or(c, |i| HALFWIDTH_DIGITS[i])
}

/// Replace every full-width digit in `text` with its half-width counterpart
#[must_use]
pub fn normalize_digits(text: &str) -> String {
    text.chars().map(to_halfwidth_digit).collect()
}

/// Whether `a` and `b` differ only by full-width vs half-width digit glyphs.
///
/// Requires at least one full-width digit on either side and `a != b`.
/// Other full-width characters (letters, punctuation) are not normalized.
#[must_use]
pub fn is_fullwidth_halfwidth_variant(a: &str, b: &str) -> bool {
    if a == b {
        return false;
    }
    if !a.chars().chain(b.chars()).any(is_fullwidth_digit) {
        return false;
    }
    normalize_digits(a) == normalize_digits(b)
}
