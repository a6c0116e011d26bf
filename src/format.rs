//! Display formatting for money amounts and dates.
//!
//! Amounts are stored as integer cents throughout the application and only
//! become floating point numbers here, at display time.

use numfmt::{Formatter, Precision};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// Process-wide locale constants for display formatting.
///
/// These are injected into [crate::AppState] at start-up rather than read
/// from module-level globals so tests can override them.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// The symbol printed before currency amounts.
    pub currency_symbol: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_owned(),
        }
    }
}

/// Formats integer cent amounts as currency strings with thousands
/// separators and two decimal places, e.g. `123456` becomes `"$1,234.56"`.
pub struct CurrencyFormatter {
    positive_fmt: Formatter,
    negative_fmt: Formatter,
    zero_string: String,
}

impl CurrencyFormatter {
    /// Create a formatter using the currency symbol from `locale`.
    ///
    /// # Errors
    /// Returns [Error::InvalidCurrencySymbol] if the symbol cannot be used
    /// as a number prefix.
    pub fn new(locale: &LocaleConfig) -> Result<Self, Error> {
        let symbol = &locale.currency_symbol;
        let invalid_symbol = |_| Error::InvalidCurrencySymbol(symbol.to_owned());

        let positive_fmt = Formatter::currency(symbol)
            .map_err(invalid_symbol)?
            .precision(Precision::Decimals(2));
        let negative_fmt = Formatter::currency(&format!("-{symbol}"))
            .map_err(invalid_symbol)?
            .precision(Precision::Decimals(2));

        Ok(Self {
            positive_fmt,
            negative_fmt,
            zero_string: format!("{symbol}0.00"),
        })
    }

    /// Format an amount of minor currency units (cents) for display.
    pub fn format_cents(&self, cents: i64) -> String {
        // Integer division would lose the minor unit fraction.
        self.format_amount(cents as f64 / 100.0)
    }

    fn format_amount(&self, amount: f64) -> String {
        let mut formatted_string = if amount < 0.0 {
            self.negative_fmt.fmt_string(amount.abs())
        } else if amount > 0.0 {
            self.positive_fmt.fmt_string(amount)
        } else {
            // Zero is hardcoded as "0", so we must specify the formatted string for zero
            return self.zero_string.clone();
        };

        // numfmt omits the last trailing zero, so we must add it ourselves
        // For example, "12.30" is rendered as "12.3" so we append "0".
        if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
            formatted_string = format!("{formatted_string}0");
        }

        formatted_string
    }
}

const DATE_INPUT_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

const DATE_DISPLAY_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [day padding:none], [year]");

/// Parse `date_string` as a `YYYY-MM-DD` calendar date and format it for
/// display, e.g. `"2023-11-05"` becomes `"Nov 5, 2023"`.
///
/// # Errors
/// Returns [Error::UnparseableDate] if `date_string` is not a valid date.
pub fn format_date(date_string: &str) -> Result<String, Error> {
    let date = Date::parse(date_string, DATE_INPUT_FORMAT)
        .map_err(|_| Error::UnparseableDate(date_string.to_owned()))?;

    format_date_value(date)
}

/// Format an already-parsed date for display, e.g. `"Nov 5, 2023"`.
///
/// # Errors
/// Returns [Error::InvalidDateFormat] if the date cannot be rendered.
pub fn format_date_value(date: Date) -> Result<String, Error> {
    date.format(DATE_DISPLAY_FORMAT)
        .map_err(|error| Error::InvalidDateFormat(error.to_string(), date.to_string()))
}
