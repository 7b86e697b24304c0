use regex::Regex;
use std::sync::LazyLock;

// First numeral, with at most one decimal separator of either locale.
static RATING_NUMERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+[.,]?[0-9]*").expect("static regex is valid"));

/// Extract a rating from free-form cell text.
///
/// Takes the first run of digits (optionally with one `,` or `.` separator),
/// so `"4,5 Sterne"` reads as `4.5`. Cells without digits are missing, never
/// an error.
pub fn parse_rating(cell: Option<&str>) -> Option<f64> {
    let cell = cell?.trim();
    if cell.is_empty() {
        return None;
    }
    let numeral = RATING_NUMERAL.find(cell)?.as_str().replace(',', ".");
    numeral.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Extract a review count from free-form cell text.
///
/// Every non-digit character is dropped before parsing, including separators:
/// `"1.234 reviews"` reads as `1234`, not `1.234`.
pub fn parse_review_count(cell: Option<&str>) -> Option<f64> {
    let digits: String = cell?.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_with_comma_decimal() {
        assert_eq!(parse_rating(Some("4,5 Sterne")), Some(4.5));
    }

    #[test]
    fn test_rating_with_dot_decimal() {
        assert_eq!(parse_rating(Some("4.7")), Some(4.7));
    }

    #[test]
    fn test_rating_takes_first_numeral() {
        assert_eq!(parse_rating(Some("Rating: 3.9 / 5")), Some(3.9));
    }

    #[test]
    fn test_rating_trailing_separator() {
        assert_eq!(parse_rating(Some("4, gut")), Some(4.0));
    }

    #[test]
    fn test_rating_without_digits_is_missing() {
        assert_eq!(parse_rating(Some("n/a")), None);
        assert_eq!(parse_rating(Some("")), None);
        assert_eq!(parse_rating(Some("   ")), None);
        assert_eq!(parse_rating(None), None);
    }

    #[test]
    fn test_rating_ignores_sign() {
        // the minus is not part of the numeral
        assert_eq!(parse_rating(Some("-2")), Some(2.0));
    }

    #[test]
    fn test_count_digits_only() {
        assert_eq!(parse_review_count(Some("1.234 reviews")), Some(1234.0));
        assert_eq!(parse_review_count(Some("(87)")), Some(87.0));
        assert_eq!(parse_review_count(Some("12,5")), Some(125.0));
    }

    #[test]
    fn test_count_without_digits_is_missing() {
        assert_eq!(parse_review_count(Some("keine")), None);
        assert_eq!(parse_review_count(Some("")), None);
        assert_eq!(parse_review_count(None), None);
    }

    #[test]
    fn test_count_zero() {
        assert_eq!(parse_review_count(Some("0 Bewertungen")), Some(0.0));
    }
}
