//! Display Formatting

/// `HH:MM:SS` for a non-negative number of seconds (fraction dropped)
pub fn format_elapsed(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 { seconds.floor() as u64 } else { 0 };
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// `R$ 25.00`
pub fn format_money(value: f64) -> String {
    format!("R$ {:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0.0), "00:00:00");
        assert_eq!(format_elapsed(59.9), "00:00:59");
        assert_eq!(format_elapsed(3661.0), "01:01:01");
        assert_eq!(format_elapsed(100.0 * 3600.0), "100:00:00");
        assert_eq!(format_elapsed(-5.0), "00:00:00");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(25.0), "R$ 25.00");
        assert_eq!(format_money(0.126), "R$ 0.13");
    }
}
