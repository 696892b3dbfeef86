//! Indian digit grouping.
//!
//! The last three integer digits form one group and every group above it
//! has two digits: `1234567` becomes `12,34,567`.

/// Insert Indian-style thousands separators into a plain decimal string
/// such as `-1234567.25`. Input that is not a plain decimal is returned
/// unchanged.
pub fn group_indian(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return number.to_string();
    }

    // Walk digits from the right: a comma after the first three, then
    // after every two.
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 2);
    for (count, c) in int_part.chars().rev().enumerate() {
        if count == 3 || (count > 3 && count % 2 == 1) {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    let mut out = String::from(sign);
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_numbers_untouched() {
        assert_eq!(group_indian("7"), "7");
        assert_eq!(group_indian("999"), "999");
        assert_eq!(group_indian("42.5"), "42.5");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(group_indian("1000"), "1,000");
        assert_eq!(group_indian("12345"), "12,345");
        assert_eq!(group_indian("123456"), "1,23,456");
        assert_eq!(group_indian("1234567"), "12,34,567");
        assert_eq!(group_indian("123456789"), "12,34,56,789");
    }

    #[test]
    fn test_sign_and_fraction_preserved() {
        assert_eq!(group_indian("-1234567.125"), "-12,34,567.125");
    }

    #[test]
    fn test_non_numeric_passthrough() {
        assert_eq!(group_indian("NaN"), "NaN");
        assert_eq!(group_indian("inf"), "inf");
        assert_eq!(group_indian(""), "");
    }
}
