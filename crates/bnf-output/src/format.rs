//! Output formats and human-readable number rendering.

use std::fmt;
use std::str::FromStr;

use bnf_model::to_currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// File format for an exported grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected csv or json)")),
        }
    }
}

/// Inserts `,` between groups of three digits.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn with_sign(negative: bool, body: String) -> String {
    if negative { format!("-{body}") } else { body }
}

/// Renders an item count as `1,234`.
pub fn format_count(value: i64) -> String {
    with_sign(value < 0, group_thousands(&value.unsigned_abs().to_string()))
}

/// Renders a quantity truncated towards zero as `12,345`.
pub fn format_quantity(value: Decimal) -> String {
    let whole = value.trunc();
    let negative = whole.is_sign_negative() && !whole.is_zero();
    with_sign(negative, group_thousands(&whole.abs().normalize().to_string()))
}

/// Renders a cost as `£1,234.50`.
pub fn format_gbp(value: Decimal) -> String {
    let pence = to_currency(value);
    let negative = pence.is_sign_negative() && !pence.is_zero();
    let text = pence.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    with_sign(negative, format!("£{}.{fraction}", group_thousands(whole)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn counts() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1234), "1,234");
        assert_eq!(format_count(1_234_567), "1,234,567");
        assert_eq!(format_count(-4500), "-4,500");
    }

    #[test]
    fn quantities_are_truncated() {
        assert_eq!(format_quantity(dec!(12345.99)), "12,345");
        assert_eq!(format_quantity(dec!(0.5)), "0");
        assert_eq!(format_quantity(dec!(-0.5)), "0");
        assert_eq!(format_quantity(dec!(1000.00)), "1,000");
    }

    #[test]
    fn currency() {
        assert_eq!(format_gbp(dec!(0)), "£0.00");
        assert_eq!(format_gbp(dec!(12.5)), "£12.50");
        assert_eq!(format_gbp(dec!(1234.505)), "£1,234.51");
        assert_eq!(format_gbp(dec!(-98765.4)), "-£98,765.40");
    }

    #[test]
    fn format_names() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert!("xlsx".parse::<OutputFormat>().is_err());
    }
}
