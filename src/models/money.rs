//! Naira formatting and amount parsing shared by the payment screens.

/// `245000` -> `"₦245,000"`
pub fn format_naira(amount: u64) -> String {
    format!("₦{}", group_thousands(amount))
}

/// `245000` -> `"₦ 245,000.00"`, as shown on balances and receipts
pub fn format_naira_decimal(amount: u64) -> String {
    format!("₦ {}.00", group_thousands(amount))
}

pub fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Parse a typed amount, tolerating thousands separators and a leading `₦`
pub fn parse_amount(input: &str) -> Option<u64> {
    let cleaned: String = input
        .trim()
        .trim_start_matches('₦')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(5_000_000), "5,000,000");
    }

    #[test]
    fn test_format_naira() {
        assert_eq!(format_naira(90_000), "₦90,000");
        assert_eq!(format_naira_decimal(245_000), "₦ 245,000.00");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("90,000"), Some(90_000));
        assert_eq!(parse_amount("₦1,200"), Some(1_200));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("12a"), None);
        assert_eq!(parse_amount("-5"), None);
    }
}
