//! Entry input validation
//!
//! Raw text from the presentation layer is checked here before any list edit.
//! Invalid input is not an error: the edit is skipped and nothing is reported.

/// A validated description and calorie amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInput {
    pub description: String,
    pub amount: u32,
}

/// Validate raw input: trimmed description must be non-empty, amount must start
/// with an integer >= 0
pub fn parse_entry_input(description: &str, amount: &str) -> Option<EntryInput> {
    let description = description.trim();
    if description.is_empty() {
        return None;
    }

    let amount = parse_amount(amount)?;

    Some(EntryInput {
        description: description.to_string(),
        amount,
    })
}

/// Leading integer of a form field: surrounding whitespace and anything after
/// the digits are ignored ("2.5" is 2, "12abc" is 12), a `0x` prefix reads hex.
/// Negative values and fields without digits are rejected; values past
/// `u32::MAX` saturate.
fn parse_amount(raw: &str) -> Option<u32> {
    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: u64 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        seen_digit = true;
        value = value.saturating_mul(u64::from(radix)).saturating_add(u64::from(d));
    }

    if !seen_digit || (negative && value > 0) {
        return None;
    }
    Some(u32::try_from(value).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_description() {
        assert_eq!(
            parse_entry_input("  Toast  ", " 120 "),
            Some(EntryInput { description: "Toast".to_string(), amount: 120 })
        );
        assert_eq!(parse_entry_input("Water", "0").map(|i| i.amount), Some(0));
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert_eq!(parse_entry_input("", "50"), None);
        assert_eq!(parse_entry_input("   ", "50"), None);
        assert_eq!(parse_entry_input("Toast", "-5"), None);
        assert_eq!(parse_entry_input("Toast", "abc"), None);
        assert_eq!(parse_entry_input("Toast", ""), None);
        assert_eq!(parse_entry_input("Toast", "-1.5"), None);
        assert_eq!(parse_entry_input("Toast", ".5"), None);
        assert_eq!(parse_entry_input("Toast", "0x"), None);
    }

    #[test]
    fn test_amount_reads_leading_integer() {
        let amount = |raw: &str| parse_entry_input("Toast", raw).map(|i| i.amount);
        assert_eq!(amount("2.5"), Some(2));
        assert_eq!(amount("12abc"), Some(12));
        assert_eq!(amount("1e3"), Some(1));
        assert_eq!(amount("-0"), Some(0));
        assert_eq!(amount("+45"), Some(45));
        assert_eq!(amount("0x1A"), Some(26));
        assert_eq!(amount("  300 kcal"), Some(300));
        assert_eq!(amount("5000000000"), Some(u32::MAX));
    }
}
