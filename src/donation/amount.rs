use std::sync::LazyLock;

use regex::Regex;

use super::DonationError;

// First run of digits with an optional currency sign and `.`/`,` thousand
// separators, e.g. "Donar $5.000" -> "5.000". Both separators are stripped
// without locale awareness, matching the campaign's link format.
static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?([0-9][0-9.,]*)").expect("amount pattern is valid"));

/// Resolve the donation amount for a click.
///
/// An explicit numeric string wins when it parses to a positive integer;
/// otherwise the amount is extracted from the control's label text. When
/// neither source yields a positive integer the donation must not proceed.
pub fn resolve_amount(explicit: Option<&str>, display_text: &str) -> Result<i64, DonationError> {
    if let Some(raw) = explicit {
        if let Ok(amount) = raw.trim().parse::<i64>() {
            if amount > 0 {
                return Ok(amount);
            }
        }
    }

    let extracted = AMOUNT_RE
        .captures(display_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace(['.', ','], ""));

    if let Some(digits) = extracted {
        if let Ok(amount) = digits.parse::<i64>() {
            if amount > 0 {
                return Ok(amount);
            }
        }
    }

    Err(DonationError::UnresolvableAmount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_amount_wins() {
        assert_eq!(resolve_amount(Some("10000"), "irrelevant").unwrap(), 10000);
    }

    #[test]
    fn amount_extracted_from_label() {
        assert_eq!(resolve_amount(None, "Donar $5.000").unwrap(), 5000);
        assert_eq!(resolve_amount(None, "Donar $10,000").unwrap(), 10000);
        assert_eq!(resolve_amount(None, "Donar 2500 pesos").unwrap(), 2500);
    }

    #[test]
    fn unparseable_explicit_falls_back_to_label() {
        assert_eq!(resolve_amount(Some("abc"), "Donar $2.500").unwrap(), 2500);
    }

    #[test]
    fn label_without_digits_fails() {
        assert!(matches!(
            resolve_amount(None, "Donar"),
            Err(DonationError::UnresolvableAmount)
        ));
    }

    #[test]
    fn zero_and_negative_amounts_fail() {
        assert!(resolve_amount(Some("0"), "").is_err());
        assert!(resolve_amount(Some("-100"), "").is_err());
        assert!(resolve_amount(None, "Donar $0").is_err());
    }
}
