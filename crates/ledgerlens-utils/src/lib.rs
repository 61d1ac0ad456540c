//! Number, currency and calendar label formatting helpers
//!
//! The report engine only emits raw numeric structures. Everything that turns
//! those numbers into text for a human (currency symbols, separators, signed
//! percentages, month names) lives here.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

// ==================== Locale ====================

/// Language used for calendar labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    /// Brazilian Portuguese
    #[serde(rename = "pt-br")]
    PtBr,
    /// English
    #[serde(rename = "en")]
    En,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::PtBr
    }
}

impl std::str::FromStr for Locale {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Ok(Locale::PtBr),
            "en" | "en-us" => Ok(Locale::En),
            _ => Err(format!("Invalid locale: {}", s)),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::PtBr => write!(f, "pt-br"),
            Locale::En => write!(f, "en"),
        }
    }
}

const MONTH_ABBREV_PT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

const MONTH_ABBREV_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTH_NAME_PT: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho",
    "julho", "agosto", "setembro", "outubro", "novembro", "dezembro",
];

const MONTH_NAME_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Short month label for a zero-based month index (0 = January)
///
/// Indices outside 0..=11 wrap around.
pub fn month_abbrev(month0: u32, locale: Locale) -> &'static str {
    let idx = (month0 % 12) as usize;
    match locale {
        Locale::PtBr => MONTH_ABBREV_PT[idx],
        Locale::En => MONTH_ABBREV_EN[idx],
    }
}

/// Full month name for a zero-based month index (0 = January)
pub fn month_name(month0: u32, locale: Locale) -> &'static str {
    let idx = (month0 % 12) as usize;
    match locale {
        Locale::PtBr => MONTH_NAME_PT[idx],
        Locale::En => MONTH_NAME_EN[idx],
    }
}

/// Title for a month window, e.g. "janeiro de 2024" or "January 2024"
pub fn month_title(year: i32, month0: u32, locale: Locale) -> String {
    match locale {
        Locale::PtBr => format!("{} de {}", month_name(month0, locale), year),
        Locale::En => format!("{} {}", month_name(month0, locale), year),
    }
}

// ==================== Numbers ====================

/// Currency symbol position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Before,
    After,
}

impl Default for SymbolPosition {
    fn default() -> Self {
        SymbolPosition::Before
    }
}

/// How amounts are rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberStyle {
    pub symbol: String,
    pub decimal_places: u32,
    pub thousands_separator: String,
    pub decimal_separator: String,
    pub symbol_position: SymbolPosition,
}

impl Default for NumberStyle {
    fn default() -> Self {
        Self {
            symbol: "R$".to_string(),
            decimal_places: 2,
            thousands_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            symbol_position: SymbolPosition::Before,
        }
    }
}

/// Insert a separator every three digits, counting from the right
pub fn group_thousands(digits: &str, separator: &str) -> String {
    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

/// Round half away from zero and pad to exactly `places` decimals.
fn fixed(value: Decimal, places: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(places);
    rounded
}

/// Format a decimal with the style's separators, without a currency symbol
pub fn format_decimal(value: Decimal, style: &NumberStyle) -> String {
    let fixed = fixed(value, style.decimal_places);
    let negative = fixed.is_sign_negative();
    let text = fixed.abs().to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part, &style.thousands_separator));
    if let Some(frac) = frac_part {
        out.push_str(&style.decimal_separator);
        out.push_str(frac);
    }
    out
}

/// Format a monetary amount, e.g. "R$ 1.234,56" or "-R$ 10,00"
pub fn format_currency(value: Decimal, style: &NumberStyle) -> String {
    let body = format_decimal(value.abs(), style);
    let sign = if fixed(value, style.decimal_places).is_sign_negative() { "-" } else { "" };
    match style.symbol_position {
        SymbolPosition::Before => format!("{}{} {}", sign, style.symbol, body),
        SymbolPosition::After => format!("{}{} {}", sign, body, style.symbol),
    }
}

/// Signed percentage with one decimal: "+12.5%", "-3.0%", "0.0%"
///
/// The plus sign is only shown for strictly positive values.
pub fn format_percentage(value: Decimal) -> String {
    let rounded = fixed(value, 1);
    let sign = if rounded > Decimal::ZERO { "+" } else { "" };
    format!("{}{}%", sign, rounded)
}

/// Share of a whole with one decimal, no sign: "54.5%"
pub fn format_share(value: Decimal) -> String {
    format!("{}%", fixed(value, 1))
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1", "."), "1");
        assert_eq!(group_thousands("123", "."), "123");
        assert_eq!(group_thousands("1234", "."), "1.234");
        assert_eq!(group_thousands("1234567", ","), "1,234,567");
    }

    #[test]
    fn test_format_currency_default_style() {
        let style = NumberStyle::default();
        assert_eq!(format_currency(dec!(1234.5), &style), "R$ 1.234,50");
        assert_eq!(format_currency(dec!(0), &style), "R$ 0,00");
        assert_eq!(format_currency(dec!(-10), &style), "-R$ 10,00");
        assert_eq!(format_currency(dec!(1000000), &style), "R$ 1.000.000,00");
    }

    #[test]
    fn test_format_currency_symbol_after() {
        let style = NumberStyle {
            symbol: "EUR".to_string(),
            decimal_places: 2,
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            symbol_position: SymbolPosition::After,
        };
        assert_eq!(format_currency(dec!(2500.125), &style), "2,500.13 EUR");
    }

    #[test]
    fn test_format_decimal_rounds_half_away_from_zero() {
        let style = NumberStyle::default();
        assert_eq!(format_decimal(dec!(0.005), &style), "0,01");
        assert_eq!(format_decimal(dec!(-0.004), &style), "0,00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(dec!(12.54)), "+12.5%");
        assert_eq!(format_percentage(dec!(-3)), "-3.0%");
        assert_eq!(format_percentage(dec!(0)), "0.0%");
        assert_eq!(format_percentage(dec!(100)), "+100.0%");
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(dec!(54.5454)), "54.5%");
        assert_eq!(format_share(dec!(0)), "0.0%");
    }

    #[test]
    fn test_month_labels() {
        assert_eq!(month_abbrev(0, Locale::PtBr), "jan");
        assert_eq!(month_abbrev(1, Locale::PtBr), "fev");
        assert_eq!(month_abbrev(11, Locale::En), "Dec");
        assert_eq!(month_name(2, Locale::PtBr), "março");
        assert_eq!(month_title(2024, 0, Locale::PtBr), "janeiro de 2024");
        assert_eq!(month_title(2024, 0, Locale::En), "January 2024");
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("pt-BR".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("pt_br".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }
}
