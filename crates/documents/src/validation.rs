//! Checksum and length validation for CPF and CEP strings.

use crate::{DocumentError, DocumentKind, DocumentResult, POSTAL_CODE_LEN, TAXPAYER_ID_LEN};

/// Returns only the ASCII digits of `raw`, in order.
pub fn strip_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Validates a CPF (Brazilian taxpayer ID).
///
/// Non-digit characters are ignored, so both `52998224725` and `529.982.247-25` are
/// accepted. An input with no digits at all is valid.
///
/// # Errors
///
/// - [`DocumentError::WrongLength`] unless exactly 11 digits remain
/// - [`DocumentError::RepeatedDigits`] if all 11 digits are identical
/// - [`DocumentError::CheckDigit1Mismatch`] / [`DocumentError::CheckDigit2Mismatch`] if a
///   check digit does not match the weighted-sum computation
pub fn validate_taxpayer_id(raw: &str) -> DocumentResult<()> {
    let digits = digit_values(raw);

    if digits.is_empty() {
        return Ok(());
    }

    if digits.len() != TAXPAYER_ID_LEN {
        return Err(DocumentError::WrongLength {
            kind: DocumentKind::TaxpayerId,
            expected: TAXPAYER_ID_LEN,
            actual: digits.len(),
        });
    }

    if digits.iter().all(|d| *d == digits[0]) {
        return Err(DocumentError::RepeatedDigits);
    }

    let first = check_digit(&digits[..9]);
    if first != digits[9] {
        return Err(DocumentError::CheckDigit1Mismatch {
            expected: first,
            found: digits[9],
        });
    }

    let second = check_digit(&digits[..10]);
    if second != digits[10] {
        return Err(DocumentError::CheckDigit2Mismatch {
            expected: second,
            found: digits[10],
        });
    }

    Ok(())
}

/// Validates a CEP (Brazilian postal code).
///
/// Non-digit characters are ignored. An input with no digits at all is valid.
///
/// # Errors
///
/// Returns [`DocumentError::WrongLength`] unless exactly 8 digits remain.
pub fn validate_postal_code(raw: &str) -> DocumentResult<()> {
    let len = raw.chars().filter(char::is_ascii_digit).count();

    if len == 0 || len == POSTAL_CODE_LEN {
        return Ok(());
    }

    Err(DocumentError::WrongLength {
        kind: DocumentKind::PostalCode,
        expected: POSTAL_CODE_LEN,
        actual: len,
    })
}

fn digit_values(raw: &str) -> Vec<u8> {
    raw.bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}

/// Computes a CPF check digit over `digits`.
///
/// Weights run from `digits.len() + 1` down to 2; the sum is multiplied by ten, reduced
/// modulo 11, and a result of 10 collapses to 0.
fn check_digit(digits: &[u8]) -> u8 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=top).rev())
        .map(|(d, w)| u32::from(*d) * w)
        .sum();

    let rest = (sum * 10) % 11;
    if rest >= 10 {
        0
    } else {
        rest as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_taxpayer_id_accepts_masked_valid_cpf() {
        assert!(validate_taxpayer_id("529.982.247-25").is_ok());
        assert!(validate_taxpayer_id("52998224725").is_ok());
        assert!(validate_taxpayer_id(" 529 982 247 25 ").is_ok());
    }

    #[test]
    fn test_validate_taxpayer_id_accepts_empty_input() {
        assert!(validate_taxpayer_id("").is_ok());
        assert!(validate_taxpayer_id("...-").is_ok());
        assert!(validate_taxpayer_id("   ").is_ok());
    }

    #[test]
    fn test_validate_taxpayer_id_rejects_wrong_length() {
        let err = validate_taxpayer_id("529.982.247-2").expect_err("10 digits");
        assert_eq!(
            err,
            DocumentError::WrongLength {
                kind: DocumentKind::TaxpayerId,
                expected: 11,
                actual: 10,
            }
        );

        let err = validate_taxpayer_id("529982247250").expect_err("12 digits");
        assert_eq!(err.reason_code(), "WRONG_LENGTH");
    }

    #[test]
    fn test_validate_taxpayer_id_rejects_every_repeated_digit() {
        for d in 0..=9 {
            let raw = d.to_string().repeat(11);
            let err = validate_taxpayer_id(&raw).expect_err("repeated digits");
            assert_eq!(err, DocumentError::RepeatedDigits, "input {raw}");
        }
    }

    #[test]
    fn test_validate_taxpayer_id_rejects_bad_check_digits() {
        let err = validate_taxpayer_id("123.456.789-00").expect_err("invalid cpf");
        assert!(matches!(
            err,
            DocumentError::CheckDigit1Mismatch { .. } | DocumentError::CheckDigit2Mismatch { .. }
        ));
        assert_eq!(
            err,
            DocumentError::CheckDigit2Mismatch {
                expected: 9,
                found: 0
            }
        );
    }

    #[test]
    fn test_validate_taxpayer_id_rejects_first_check_digit() {
        let err = validate_taxpayer_id("529.982.247-35").expect_err("first digit off");
        assert_eq!(
            err,
            DocumentError::CheckDigit1Mismatch {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_check_digit_collapses_ten_to_zero() {
        // 1..9 weighted 10..2 sums to 210; 2100 mod 11 == 10.
        assert_eq!(check_digit(&[1, 2, 3, 4, 5, 6, 7, 8, 9]), 0);
    }

    #[test]
    fn test_validate_postal_code() {
        assert!(validate_postal_code("01310-100").is_ok());
        assert!(validate_postal_code("01310100").is_ok());
        assert!(validate_postal_code("").is_ok());

        let err = validate_postal_code("123").expect_err("short cep");
        assert_eq!(err.reason_code(), "WRONG_LENGTH");
        assert_eq!(
            err,
            DocumentError::WrongLength {
                kind: DocumentKind::PostalCode,
                expected: 8,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_strip_digits_ignores_non_ascii_digits() {
        assert_eq!(strip_digits("01310-100"), "01310100");
        assert_eq!(strip_digits("٣12a"), "12");
    }
}
