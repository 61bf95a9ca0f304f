use chrono::NaiveDate;

/// Case-insensitive substring test.
/// `needle` must already be lowercased.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Format a salary as whole US dollars with thousands separators: `$125,000`.
pub fn format_salary(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}${}", sign, grouped)
}

/// Format a phone number for display
/// Normalizes 10-digit (or 1 + 10-digit) US numbers to (XXX) XXX-XXXX
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let local = match digits.len() {
        10 => &digits[..],
        11 if digits.starts_with('1') => &digits[1..],
        _ => return phone.to_string(),
    };
    format!("({}) {}-{}", &local[0..3], &local[3..6], &local[6..10])
}

/// Truncate a string to a maximum number of characters, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Hire dates as shown in listings: `Mar 15, 2022`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Sarah Johnson", "johnson"));
        assert!(contains_ignore_case("EMP001", "emp"));
        assert!(!contains_ignore_case("Sales", "eng"));
    }

    #[test]
    fn test_format_salary() {
        assert_eq!(format_salary(125000.0), "$125,000");
        assert_eq!(format_salary(999.4), "$999");
        assert_eq!(format_salary(1000.0), "$1,000");
        assert_eq!(format_salary(1234567.5), "$1,234,568");
        assert_eq!(format_salary(0.0), "$0");
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("5551234567"), "(555) 123-4567");
        assert_eq!(format_phone("+1 (555) 123-4567"), "(555) 123-4567");
        assert_eq!(format_phone("555-123-4567"), "(555) 123-4567");
        assert_eq!(format_phone("+44 20 7946 0958"), "+44 20 7946 0958");
        assert_eq!(format_phone("123"), "123");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Senior Software Engineer", 12), "Senior So...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Ünïcödé", 5), "Ün...");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2022, 3, 15).unwrap();
        assert_eq!(format_date(date), "Mar 15, 2022");
    }
}
