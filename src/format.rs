// 💲 Display formatting for metric values and table cells

/// Group the digits of a non-negative integer with commas: 1247 → "1,247"
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Currency with no decimals: 45000.0 → "$45,000", -1200.4 → "-$1,200"
pub fn money(value: f64) -> String {
    let rounded = value.round();
    let body = thousands(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// Percentage with one decimal: 41.133 → "41.1%"
pub fn percent1(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Integer with an explicit sign: 24 → "+24", -3 → "-3"
pub fn signed(n: i64) -> String {
    format!("{:+}", n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1247), "1,247");
        assert_eq!(thousands(331000), "331,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_money() {
        assert_eq!(money(45000.0), "$45,000");
        assert_eq!(money(55166.67), "$55,167");
        assert_eq!(money(-1200.4), "-$1,200");
        assert_eq!(money(0.0), "$0");
    }

    #[test]
    fn test_percent_and_signed() {
        assert_eq!(percent1(41.1333), "41.1%");
        assert_eq!(percent1(-5.7), "-5.7%");
        assert_eq!(signed(24), "+24");
        assert_eq!(signed(-3), "-3");
        assert_eq!(signed(0), "+0");
    }
}
