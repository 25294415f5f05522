//! Progressive input masks for CPF and CEP fields.
//!
//! Masks are applied while the user types, so they accept partial input and only insert a
//! separator once a digit follows it. Digits beyond the document length are dropped.

use crate::{POSTAL_CODE_LEN, TAXPAYER_ID_LEN};

/// Applies the `###.###.###-##` mask to whatever digits `raw` contains.
pub fn mask_taxpayer_id(raw: &str) -> String {
    apply_mask(raw, TAXPAYER_ID_LEN, &[(3, '.'), (6, '.'), (9, '-')])
}

/// Applies the `#####-###` mask to whatever digits `raw` contains.
pub fn mask_postal_code(raw: &str) -> String {
    apply_mask(raw, POSTAL_CODE_LEN, &[(5, '-')])
}

/// Formats a CPF for display.
///
/// Returns `###.###.###-##` when `raw` holds exactly 11 digits, otherwise `raw` unchanged so
/// that malformed values remain visible to the user.
pub fn format_taxpayer_id(raw: &str) -> String {
    let count = raw.chars().filter(char::is_ascii_digit).count();
    if count == TAXPAYER_ID_LEN {
        mask_taxpayer_id(raw)
    } else {
        raw.to_owned()
    }
}

fn apply_mask(raw: &str, max_digits: usize, separators: &[(usize, char)]) -> String {
    let mut out = String::with_capacity(max_digits + separators.len());
    let mut seen = 0usize;

    for c in raw.chars().filter(char::is_ascii_digit).take(max_digits) {
        if let Some((_, sep)) = separators.iter().find(|(pos, _)| *pos == seen) {
            out.push(*sep);
        }
        out.push(c);
        seen += 1;
    }

    out
}
