use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the repository on first persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdId(pub u64);

impl fmt::Display for AdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted sponsored listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    pub id: AdId,
    pub title: String,
    pub publisher: String,
    pub content: String,
    pub landing_url: String,
    pub price: f64,
    #[serde(default)]
    pub clicked: u64,
}

impl Ad {
    /// Fresh ads start with no engagement.
    pub fn new(id: AdId, content: AdContent) -> Self {
        Self {
            id,
            title: content.title,
            publisher: content.publisher,
            content: content.content,
            landing_url: content.landing_url,
            price: content.price,
            clicked: 0,
        }
    }

    /// Replace the editable attributes, keeping identity and engagement.
    pub fn apply(&mut self, content: AdContent) {
        self.title = content.title;
        self.publisher = content.publisher;
        self.content = content.content;
        self.landing_url = content.landing_url;
        self.price = content.price;
    }

    /// Form prefill for edit and copy modes.
    pub fn to_draft(&self) -> AdDraft {
        AdDraft {
            title: self.title.clone(),
            publisher: self.publisher.clone(),
            content: self.content.clone(),
            landing_url: self.landing_url.clone(),
            price: Some(PriceInput::Number(self.price)),
        }
    }
}

/// Validated, normalized attribute set handed to the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdContent {
    pub title: String,
    pub publisher: String,
    pub content: String,
    pub landing_url: String,
    pub price: f64,
}

/// Candidate record as submitted by the ad form. Missing keys deserialize as blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdDraft {
    pub title: String,
    pub publisher: String,
    pub content: String,
    pub landing_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceInput>,
}

impl AdDraft {
    pub fn value_of(&self, field: AdField) -> FieldValue<'_> {
        match field {
            AdField::Title => FieldValue::from_text(&self.title),
            AdField::Publisher => FieldValue::from_text(&self.publisher),
            AdField::Content => FieldValue::from_text(&self.content),
            AdField::LandingUrl => FieldValue::from_text(&self.landing_url),
            AdField::Price => match &self.price {
                None => FieldValue::Missing,
                Some(PriceInput::Text(raw)) => FieldValue::from_text(raw),
                Some(PriceInput::Number(value)) => FieldValue::Number(*value),
            },
        }
    }

    /// Parse the price once; every text attribute is carried over untouched.
    pub fn normalize(&self) -> Result<AdContent, PriceError> {
        let price = match &self.price {
            Some(input) => input.normalize()?,
            None => return Err(PriceError::Missing),
        };

        Ok(AdContent {
            title: self.title.clone(),
            publisher: self.publisher.clone(),
            content: self.content.clone(),
            landing_url: self.landing_url.clone(),
            price,
        })
    }
}

/// Editable ad attributes addressable from the form schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdField {
    Title,
    Publisher,
    Content,
    LandingUrl,
    Price,
}

impl AdField {
    pub const ALL: [AdField; 5] = [
        AdField::Title,
        AdField::Publisher,
        AdField::Content,
        AdField::LandingUrl,
        AdField::Price,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AdField::Title => "title",
            AdField::Publisher => "publisher",
            AdField::Content => "content",
            AdField::LandingUrl => "landingUrl",
            AdField::Price => "price",
        }
    }
}

impl fmt::Display for AdField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Bid as it crosses the boundary: forms post text, API clients post numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    pub fn normalize(&self) -> Result<f64, PriceError> {
        let value = match self {
            PriceInput::Number(value) => *value,
            PriceInput::Text(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(PriceError::Missing);
                }
                trimmed
                    .parse::<f64>()
                    .map_err(|_| PriceError::Unparsable(raw.clone()))?
            }
        };

        if !value.is_finite() || value < 0.0 {
            return Err(PriceError::OutOfRange(value));
        }
        Ok(value)
    }
}

impl From<f64> for PriceInput {
    fn from(value: f64) -> Self {
        PriceInput::Number(value)
    }
}

impl From<&str> for PriceInput {
    fn from(value: &str) -> Self {
        PriceInput::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PriceError {
    #[error("price is missing")]
    Missing,
    #[error("price '{0}' is not a number")]
    Unparsable(String),
    #[error("price {0} must be a finite, non-negative amount")]
    OutOfRange(f64),
}

/// A candidate attribute viewed through the loose truthiness the form applies.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Missing,
    Text(&'a str),
    Number(f64),
}

impl<'a> FieldValue<'a> {
    fn from_text(raw: &'a str) -> Self {
        if raw.is_empty() {
            FieldValue::Missing
        } else {
            FieldValue::Text(raw)
        }
    }

    /// Absent, empty, zero and NaN all count as not filled in.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Missing => true,
            FieldValue::Text(raw) => raw.is_empty(),
            FieldValue::Number(value) => *value == 0.0 || value.is_nan(),
        }
    }

    /// Text the pattern and length rules read. Numbers use `f64` display, which never switches
    /// to exponent notation: `1e21` reads as 22 digits, not `1e+21`.
    pub fn as_text(&self) -> Cow<'a, str> {
        match self {
            FieldValue::Missing => Cow::Borrowed(""),
            FieldValue::Text(raw) => Cow::Borrowed(raw),
            FieldValue::Number(value) => Cow::Owned(value.to_string()),
        }
    }
}
