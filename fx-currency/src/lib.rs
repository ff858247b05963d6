//! Supported Currency Catalogue
//!
//! The conversion service only ever deals with a fixed, closed set of
//! ISO-style currency codes. They are defined declaratively with a macro that
//! generates the [`CurrencyCode`] enum together with its metadata, parsing and
//! listing helpers.
//!
//! # Adding a Currency
//! Add a line to the `define_currencies!` invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     VND => ("VND", "Vietnamese Dong", "₫"),
//! }
//! ```
//!
//! # Example
//! ```
//! use fx_currency::CurrencyCode;
//!
//! let eur: CurrencyCode = "eur".parse().unwrap();
//! assert_eq!(eur, CurrencyCode::EUR);
//! assert_eq!(eur.to_string(), "EUR");
//! assert_eq!(CurrencyCode::all().len(), 40);
//! ```

/// Reasons a string is not accepted as a [`CurrencyCode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurrencyParseError {
    #[error("Currency code must be exactly 3 letters, got {0:?}")]
    InvalidFormat(String),

    #[error("Unsupported currency: {0}")]
    Unsupported(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the CurrencyCode enum, metadata and runtime lookup
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define the supported currencies.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Variant => ("CODE", "Display name", "SYMBOL"),
/// }
/// ```
///
/// Declaration order is the canonical listing order returned by
/// `CurrencyCode::all()`.
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $display:literal, $symbol:literal)
        ),* $(,)?
    ) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize, utoipa::ToSchema,
        )]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $display),*
                }
            }

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $symbol),*
                }
            }

            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }

            /// Parses a code case-insensitively.
            pub fn parse(s: &str) -> Result<Self, CurrencyParseError> {
                if s.chars().count() != 3 {
                    return Err(CurrencyParseError::InvalidFormat(s.to_string()));
                }
                match s.to_uppercase().as_str() {
                    $($code => Ok(CurrencyCode::$name),)*
                    other => Err(CurrencyParseError::Unsupported(other.to_string())),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    USD => ("USD", "US Dollar", "$"),
    EUR => ("EUR", "Euro", "€"),
    GBP => ("GBP", "British Pound", "£"),
    JPY => ("JPY", "Japanese Yen", "¥"),
    AUD => ("AUD", "Australian Dollar", "A$"),
    CAD => ("CAD", "Canadian Dollar", "C$"),
    CHF => ("CHF", "Swiss Franc", "CHF"),
    CNY => ("CNY", "Chinese Yuan", "¥"),
    SEK => ("SEK", "Swedish Krona", "kr"),
    NZD => ("NZD", "New Zealand Dollar", "NZ$"),
    MXN => ("MXN", "Mexican Peso", "MX$"),
    SGD => ("SGD", "Singapore Dollar", "S$"),
    HKD => ("HKD", "Hong Kong Dollar", "HK$"),
    NOK => ("NOK", "Norwegian Krone", "kr"),
    TRY => ("TRY", "Turkish Lira", "₺"),
    RUB => ("RUB", "Russian Ruble", "₽"),
    INR => ("INR", "Indian Rupee", "₹"),
    BRL => ("BRL", "Brazilian Real", "R$"),
    ZAR => ("ZAR", "South African Rand", "R"),
    KRW => ("KRW", "South Korean Won", "₩"),
    PLN => ("PLN", "Polish Zloty", "zł"),
    CZK => ("CZK", "Czech Koruna", "Kč"),
    HUF => ("HUF", "Hungarian Forint", "Ft"),
    RON => ("RON", "Romanian Leu", "lei"),
    BGN => ("BGN", "Bulgarian Lev", "лв"),
    HRK => ("HRK", "Croatian Kuna", "kn"),
    DKK => ("DKK", "Danish Krone", "kr"),
    ISK => ("ISK", "Icelandic Krona", "kr"),
    THB => ("THB", "Thai Baht", "฿"),
    MYR => ("MYR", "Malaysian Ringgit", "RM"),
    PHP => ("PHP", "Philippine Peso", "₱"),
    IDR => ("IDR", "Indonesian Rupiah", "Rp"),
    AED => ("AED", "UAE Dirham", "د.إ"),
    SAR => ("SAR", "Saudi Riyal", "﷼"),
    EGP => ("EGP", "Egyptian Pound", "E£"),
    ILS => ("ILS", "Israeli New Shekel", "₪"),
    CLP => ("CLP", "Chilean Peso", "CLP$"),
    PEN => ("PEN", "Peruvian Sol", "S/"),
    COP => ("COP", "Colombian Peso", "COL$"),
    ARS => ("ARS", "Argentine Peso", "AR$"),
}

impl CurrencyCode {
    /// Codes of every supported currency, in canonical order.
    pub fn all_codes() -> Vec<&'static str> {
        Self::all().iter().map(CurrencyCode::code).collect()
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = CurrencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::parse(s)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_has_forty_codes() {
        assert_eq!(CurrencyCode::all().len(), 40);
    }

    #[test]
    fn test_canonical_order() {
        let all = CurrencyCode::all();
        assert_eq!(all[0], CurrencyCode::USD);
        assert_eq!(all[1], CurrencyCode::EUR);
        assert_eq!(all[39], CurrencyCode::ARS);
    }

    #[test]
    fn test_code_matches_variant_name() {
        for code in CurrencyCode::all() {
            assert_eq!(code.code(), format!("{:?}", code));
            assert_eq!(code.code().len(), 3);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("USD".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert_eq!("eur".parse::<CurrencyCode>().unwrap(), CurrencyCode::EUR);
        assert_eq!("gBp".parse::<CurrencyCode>().unwrap(), CurrencyCode::GBP);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(matches!(
            CurrencyCode::parse("US"),
            Err(CurrencyParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            CurrencyCode::parse("USDX"),
            Err(CurrencyParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            CurrencyCode::parse(""),
            Err(CurrencyParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_code() {
        assert_eq!(
            CurrencyCode::parse("xxx"),
            Err(CurrencyParseError::Unsupported("XXX".to_string()))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CurrencyCode::JPY.to_string(), "JPY");
    }

    #[test]
    fn test_serde_uses_uppercase_codes() {
        let json = serde_json::to_string(&CurrencyCode::CHF).unwrap();
        assert_eq!(json, "\"CHF\"");
        let back: CurrencyCode = serde_json::from_str("\"ARS\"").unwrap();
        assert_eq!(back, CurrencyCode::ARS);
    }

    #[test]
    fn test_all_codes_listing() {
        let codes = CurrencyCode::all_codes();
        assert_eq!(codes.len(), 40);
        assert!(codes.contains(&"HRK"));
        assert!(!codes.contains(&"XXX"));
    }
}
