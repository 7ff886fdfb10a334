//! Company records and their validated fields.
//!
//! A [`CompanyDraft`] is the validated input for create and update; a
//! [`Company`] is a persisted record with a storage-assigned [`CompanyId`] and
//! audit timestamps. The [`Isin`] is the natural key.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum length of a company name.
pub const NAME_MAX: usize = 255;
/// Maximum length of a stock ticker.
pub const STOCK_TICKER_MAX: usize = 50;
/// Maximum length of an exchange name.
pub const EXCHANGE_MAX: usize = 100;
/// Maximum length of a website URL.
pub const WEBSITE_MAX: usize = 255;
/// Exact length of an ISIN.
pub const ISIN_LEN: usize = 12;

/// Validation errors raised while building a [`CompanyDraft`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompanyValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("stockTicker must not be empty")]
    EmptyStockTicker,
    #[error("stockTicker must be at most {max} characters")]
    StockTickerTooLong { max: usize },
    #[error("exchange must not be empty")]
    EmptyExchange,
    #[error("exchange must be at most {max} characters")]
    ExchangeTooLong { max: usize },
    #[error("isin must be exactly {expected} characters")]
    IsinLength { expected: usize },
    #[error("isin must be 2 uppercase letters followed by 9 letters or digits and a check digit")]
    IsinFormat,
    #[error("website must be at most {max} characters")]
    WebsiteTooLong { max: usize },
    #[error("website must be an absolute http or https URL")]
    InvalidWebsite,
}

impl CompanyValidationError {
    /// JSON field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::EmptyStockTicker | Self::StockTickerTooLong { .. } => "stockTicker",
            Self::EmptyExchange | Self::ExchangeTooLong { .. } => "exchange",
            Self::IsinLength { .. } | Self::IsinFormat => "isin",
            Self::WebsiteTooLong { .. } | Self::InvalidWebsite => "website",
        }
    }

    /// Machine-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::EmptyStockTicker | Self::EmptyExchange => "empty",
            Self::NameTooLong { .. }
            | Self::StockTickerTooLong { .. }
            | Self::ExchangeTooLong { .. }
            | Self::WebsiteTooLong { .. } => "too_long",
            Self::IsinLength { .. } => "invalid_length",
            Self::IsinFormat | Self::InvalidWebsite => "invalid_format",
        }
    }
}

/// Storage-assigned company identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(i32);

impl CompanyId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static ISIN_RE: OnceLock<Regex> = OnceLock::new();

fn isin_regex() -> &'static Regex {
    ISIN_RE.get_or_init(|| {
        Regex::new("^[A-Z]{2}[A-Z0-9]{9}[0-9]$")
            .unwrap_or_else(|error| panic!("isin regex failed to compile: {error}"))
    })
}

/// International Securities Identification Number.
///
/// ## Invariants
/// - Exactly 12 ASCII characters.
/// - Matches `^[A-Z]{2}[A-Z0-9]{9}[0-9]$`; no case folding is applied.
///
/// # Examples
/// ```
/// use company_api::domain::Isin;
///
/// let isin = Isin::new("US0378331005").expect("valid ISIN");
/// assert_eq!(isin.as_ref(), "US0378331005");
/// assert!(Isin::new("us0378331005").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isin(String);

impl Isin {
    /// Validate and construct an ISIN.
    pub fn new(raw: impl Into<String>) -> Result<Self, CompanyValidationError> {
        let raw = raw.into();
        if raw.chars().count() != ISIN_LEN {
            return Err(CompanyValidationError::IsinLength { expected: ISIN_LEN });
        }
        if !isin_regex().is_match(&raw) {
            return Err(CompanyValidationError::IsinFormat);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for Isin {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Isin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Isin> for String {
    fn from(value: Isin) -> Self {
        value.0
    }
}

impl TryFrom<String> for Isin {
    type Error = CompanyValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

fn bounded(
    value: &str,
    max: usize,
    empty: CompanyValidationError,
    too_long: CompanyValidationError,
) -> Result<String, CompanyValidationError> {
    if value.trim().is_empty() {
        return Err(empty);
    }
    if value.chars().count() > max {
        return Err(too_long);
    }
    Ok(value.to_owned())
}

fn website(value: Option<&str>) -> Result<Option<String>, CompanyValidationError> {
    let Some(raw) = value.filter(|raw| !raw.trim().is_empty()) else {
        return Ok(None);
    };
    if raw.chars().count() > WEBSITE_MAX {
        return Err(CompanyValidationError::WebsiteTooLong { max: WEBSITE_MAX });
    }
    let parsed = url::Url::parse(raw).map_err(|_| CompanyValidationError::InvalidWebsite)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CompanyValidationError::InvalidWebsite);
    }
    Ok(Some(raw.to_owned()))
}

/// Validated company fields supplied by callers on create and update.
///
/// # Examples
/// ```
/// use company_api::domain::CompanyDraft;
///
/// let draft = CompanyDraft::try_from_parts(
///     "Apple Inc",
///     "AAPL",
///     "NASDAQ",
///     "US0378331005",
///     Some("https://www.apple.com"),
/// )
/// .expect("valid draft");
/// assert_eq!(draft.isin().as_ref(), "US0378331005");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyDraft {
    name: String,
    stock_ticker: String,
    exchange: String,
    isin: Isin,
    website: Option<String>,
}

impl CompanyDraft {
    /// Validate raw inputs. A blank website is treated as absent.
    pub fn try_from_parts(
        name: &str,
        stock_ticker: &str,
        exchange: &str,
        isin: &str,
        website_url: Option<&str>,
    ) -> Result<Self, CompanyValidationError> {
        Ok(Self {
            name: bounded(
                name,
                NAME_MAX,
                CompanyValidationError::EmptyName,
                CompanyValidationError::NameTooLong { max: NAME_MAX },
            )?,
            stock_ticker: bounded(
                stock_ticker,
                STOCK_TICKER_MAX,
                CompanyValidationError::EmptyStockTicker,
                CompanyValidationError::StockTickerTooLong {
                    max: STOCK_TICKER_MAX,
                },
            )?,
            exchange: bounded(
                exchange,
                EXCHANGE_MAX,
                CompanyValidationError::EmptyExchange,
                CompanyValidationError::ExchangeTooLong { max: EXCHANGE_MAX },
            )?,
            isin: Isin::new(isin)?,
            website: website(website_url)?,
        })
    }

    /// Display name as supplied.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ticker symbol.
    pub fn stock_ticker(&self) -> &str {
        &self.stock_ticker
    }

    /// Listing exchange.
    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    /// Validated ISIN.
    pub fn isin(&self) -> &Isin {
        &self.isin
    }

    /// Website URL, absent when none was given.
    ///
    /// ```
    /// use company_api::domain::CompanyDraft;
    ///
    /// let draft = CompanyDraft::try_from_parts("Heineken NV", "HEIA", "Euronext", "NL0000009165", Some("  "))
    ///     .expect("valid draft");
    /// assert_eq!(draft.website(), None);
    /// assert_eq!(draft.name(), "Heineken NV");
    /// ```
    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }
}

/// Persisted company record.
///
/// Serialises as the camelCase JSON view returned by the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub stock_ticker: String,
    pub exchange: String,
    pub isin: Isin,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Copy of this record with every mutable field taken from `draft`.
    ///
    /// `id` and `created_at` are kept; `updated_at` is replaced.
    pub fn revised(&self, draft: &CompanyDraft, updated_at: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            name: draft.name.clone(),
            stock_ticker: draft.stock_ticker.clone(),
            exchange: draft.exchange.clone(),
            isin: draft.isin.clone(),
            website: draft.website.clone(),
            created_at: self.created_at,
            updated_at,
        }
    }
}
