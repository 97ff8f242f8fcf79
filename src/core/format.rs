//! Text formatting for axis ticks, on-chart labels and tooltips.

use serde::{Deserialize, Serialize};

/// Axis labels keep this many characters ("January" -> "Jan").
pub const AXIS_LABEL_CHARS: usize = 3;

/// Truncates to at most `max_chars` characters (not bytes).
#[must_use]
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    label.chars().take(max_chars).collect()
}

/// Rounds half away from zero to `decimals` places.
#[must_use]
pub fn round_to(value: f64, decimals: u8) -> f64 {
    let factor = 10_f64.powi(i32::from(decimals));
    (value * factor).round() / factor
}

/// Rounds to the nearest integer and inserts `,` thousands separators.
#[must_use]
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    let lead = digits.len() % 3;
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (index + 3 - lead) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Share in `[0, 1]` rendered as a one-decimal percentage ("40.0%").
#[must_use]
pub fn format_percent(share: f64) -> String {
    format!("{:.1}%", round_to(share * 100.0, 1))
}

/// Number style for on-chart text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// `$45k`: thousands rounded to an integer, dollar prefix.
    CurrencyThousands,
    /// `1.2k`: thousands with a fixed number of decimals.
    Thousands { decimals: u8 },
    /// `$12,345`.
    Currency,
    /// `12,345`.
    Integer,
}

impl ValueFormat {
    #[must_use]
    pub fn format(self, value: f64) -> String {
        match self {
            Self::CurrencyThousands => format!("${:.0}k", round_to(value / 1000.0, 0)),
            Self::Thousands { decimals } => {
                let precision = usize::from(decimals);
                format!("{:.*}k", precision, round_to(value / 1000.0, decimals))
            }
            Self::Currency => format!("${}", group_thousands(value)),
            Self::Integer => group_thousands(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ValueFormat, format_percent, group_thousands, truncate_label};

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.4), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(1_234_567.6), "1,234,568");
        assert_eq!(group_thousands(-45_210.0), "-45,210");
    }

    #[test]
    fn value_formats_match_dashboard_labels() {
        assert_eq!(ValueFormat::CurrencyThousands.format(45_499.0), "$45k");
        assert_eq!(ValueFormat::Thousands { decimals: 1 }.format(1_250.0), "1.3k");
        assert_eq!(ValueFormat::Currency.format(12_345.4), "$12,345");
        assert_eq!(ValueFormat::Integer.format(2_500.5), "2,501");
    }

    #[test]
    fn percent_and_truncation() {
        assert_eq!(format_percent(0.4), "40.0%");
        assert_eq!(format_percent(0.03), "3.0%");
        assert_eq!(truncate_label("January", 3), "Jan");
        assert_eq!(truncate_label("Mai", 3), "Mai");
        assert_eq!(truncate_label("Ökonomie", 3), "Öko");
    }
}
