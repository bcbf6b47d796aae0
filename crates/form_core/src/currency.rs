//! Display-only currency formatting. The stored amount is always a plain
//! digit string; separators exist only in what the user sees.

/// Thousands-separator convention for the amount field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrencyLocale {
    /// Indonesian grouping, e.g. "150.000".
    #[default]
    Id,
    /// English grouping, e.g. "150,000".
    En,
}

impl CurrencyLocale {
    pub fn thousands_separator(self) -> char {
        match self {
            CurrencyLocale::Id => '.',
            CurrencyLocale::En => ',',
        }
    }
}

/// Drops everything that is not an ASCII digit. Applied to user keystrokes
/// before the amount is stored.
pub fn strip_non_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Renders a digit string with thousands separators. Non-digits in the input
/// are stripped first; the digits themselves are not otherwise normalized,
/// so `strip_non_digits(format_amount(d, l)) == d` for every digit string.
pub fn format_amount(raw: &str, locale: CurrencyLocale) -> String {
    let digits = strip_non_digits(raw);
    if digits.is_empty() {
        return String::new();
    }

    let separator = locale.thousands_separator();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Banner-friendly rendering of a settled amount, e.g. "Rp 150.000".
pub fn rupiah(value: u64, locale: CurrencyLocale) -> String {
    format!("Rp {}", format_amount(&value.to_string(), locale))
}
