//! Field heuristics shared by the diff passes

mod numeric;
mod text_field;

pub use numeric::{
    FULLWIDTH_DIGITS, HALFWIDTH_DIGITS, is_fullwidth_digit, is_fullwidth_halfwidth_variant,
    normalize_digits, to_halfwidth_digit,
};
pub use text_field::{
    LONG_VALUE_CHARS, SHORT_IDENTIFIER_CHARS, TEXT_KEY_MARKERS, TextFieldVerdict,
    classify_text_field, is_likely_text,
};
