//! Display currencies and money formatting

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Currencies the storefront displays prices in
///
/// Formatting is display-only; quotes are computed in the base unit and
/// no conversion is applied.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Mexican peso
    #[default]
    Mxn,
    /// US dollar
    Usd,
    /// Euro
    Eur,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Mxn => "MXN",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    /// Currency symbol shown before the amount
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Mxn | Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MXN" => Ok(Currency::Mxn),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            _ => Err(format!("Invalid currency: {}. Use MXN, USD, or EUR", s)),
        }
    }
}

/// Format a monetary amount for display: symbol, thousands separators,
/// two decimals, currency code
///
/// Pure formatting over the given amount; the numeric quote values are
/// never modified.
pub fn format_amount(amount: f64, currency: Currency) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    format!(
        "{}{}{}.{:02} {}",
        if negative { "-" } else { "" },
        currency.symbol(),
        group_thousands(whole),
        frac,
        currency.code()
    )
}

/// Insert a ',' every three digits from the right
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_reference_total() {
        assert_eq!(format_amount(560.0, Currency::Mxn), "$560.00 MXN");
    }

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(format_amount(1234.5, Currency::Usd), "$1,234.50 USD");
        assert_eq!(
            format_amount(1_234_567.89, Currency::Eur),
            "€1,234,567.89 EUR"
        );
    }

    #[test]
    fn test_format_small_amounts() {
        assert_eq!(format_amount(0.0, Currency::Mxn), "$0.00 MXN");
        assert_eq!(format_amount(0.05, Currency::Eur), "€0.05 EUR");
        assert_eq!(format_amount(999.99, Currency::Usd), "$999.99 USD");
    }

    #[test]
    fn test_format_negative_amount() {
        assert_eq!(format_amount(-12.5, Currency::Usd), "-$12.50 USD");
    }

    #[test]
    fn test_formatting_does_not_alter_value() {
        let amount = 1234.56;
        let _ = format_amount(amount, Currency::Mxn);
        assert_eq!(amount, 1234.56);
    }

    #[test]
    fn test_currency_parse_roundtrip() {
        for currency in [Currency::Mxn, Currency::Usd, Currency::Eur] {
            let parsed: Currency = currency.code().parse().unwrap();
            assert_eq!(parsed, currency);
        }
        assert!("GBP".parse::<Currency>().is_err());
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
    }
}
