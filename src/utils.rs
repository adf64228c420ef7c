/// Rounds to a whole number and groups digits with commas: `1234567.4` -> `1,234,567`.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn format_currency(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", format_thousands(-value))
    } else {
        format!("${}", format_thousands(value))
    }
}

pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// File name stem for an exported report, with path separators and other
/// unsafe characters replaced by `_`.
pub fn report_file_stem(firm_name: &str) -> String {
    let safe: String = firm_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.' | '&' | ',') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_RIA_Report", safe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(1_234_567.4), "1,234,567");
        assert_eq!(format_thousands(1_234_567.6), "1,234,568");
        assert_eq!(format_thousands(-45_000.0), "-45,000");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(2_500_000_000.0), "$2,500,000,000");
        assert_eq!(format_currency(-12.0), "-$12");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("overview"), "Overview");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_report_file_stem() {
        assert_eq!(report_file_stem("Acme Capital"), "Acme Capital_RIA_Report");
        assert_eq!(
            report_file_stem("A/B Partners: LLC"),
            "A_B Partners_ LLC_RIA_Report"
        );
    }
}
