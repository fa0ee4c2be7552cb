//! Supported currencies and money formatting
//!
//! The money calculation is currency-agnostic. The code stored on the
//! profile only selects the symbol used when amounts are shown.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
}

const fn currency(code: &'static str, name: &'static str, symbol: &'static str) -> Currency {
    Currency { code, name, symbol }
}

pub static CURRENCIES: [Currency; 20] = [
    currency("USD", "US Dollar", "$"),
    currency("EUR", "Euro", "€"),
    currency("GBP", "British Pound", "£"),
    currency("JPY", "Japanese Yen", "¥"),
    currency("AUD", "Australian Dollar", "A$"),
    currency("CAD", "Canadian Dollar", "C$"),
    currency("CHF", "Swiss Franc", "CHF"),
    currency("CNY", "Chinese Yuan", "¥"),
    currency("INR", "Indian Rupee", "₹"),
    currency("NZD", "New Zealand Dollar", "NZ$"),
    currency("ZAR", "South African Rand", "R"),
    currency("RUB", "Russian Ruble", "₽"),
    currency("BRL", "Brazilian Real", "R$"),
    currency("MXN", "Mexican Peso", "$"),
    currency("SGD", "Singapore Dollar", "S$"),
    currency("HKD", "Hong Kong Dollar", "HK$"),
    currency("SEK", "Swedish Krona", "kr"),
    currency("NOK", "Norwegian Krone", "kr"),
    currency("DKK", "Danish Krone", "kr"),
    currency("PLN", "Polish Złoty", "zł"),
];

/// Look up a currency by ISO code, ignoring case
pub fn find_currency(code: &str) -> Option<&'static Currency> {
    let code = code.trim();
    CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Symbol for `code`
///
/// Unknown codes are shown as-is; an empty code falls back to `$`.
pub fn currency_symbol(code: &str) -> &str {
    match find_currency(code) {
        Some(currency) => currency.symbol,
        None if code.trim().is_empty() => "$",
        None => code.trim(),
    }
}

/// Format an amount with two decimals behind `symbol`
///
/// ```
/// use quitstat_core::currency::format_money;
///
/// assert_eq!(format_money("€", 12.5), "€12.50");
/// assert_eq!(format_money("$", -3.456), "-$3.46");
/// ```
pub fn format_money(symbol: &str, amount: f64) -> String {
    let amount = crate::numeric::finite_or_zero(amount);
    if amount < 0.0 {
        format!("-{symbol}{:.2}", -amount)
    } else {
        format!("{symbol}{amount:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<_> = CURRENCIES.iter().map(|c| c.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), CURRENCIES.len());
    }

    #[test]
    fn test_find_currency() {
        assert_eq!(find_currency("gbp").unwrap().symbol, "£");
        assert_eq!(find_currency(" PLN ").unwrap().name, "Polish Złoty");
        assert!(find_currency("XYZ").is_none());
    }

    #[test]
    fn test_currency_symbol_fallback() {
        assert_eq!(currency_symbol("USD"), "$");
        assert_eq!(currency_symbol("THB"), "THB");
        assert_eq!(currency_symbol(""), "$");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money("$", 100.0), "$100.00");
        assert_eq!(format_money("kr", 0.004), "kr0.00");
        assert_eq!(format_money("$", f64::NAN), "$0.00");
    }
}
