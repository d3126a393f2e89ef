use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::super::domain::AdField;

/// Input family declared for a field; decides the rendered control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "text")]
    SingleLine,
    #[serde(rename = "textarea")]
    MultiLine,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "number")]
    Numeric,
}

impl FieldKind {
    /// HTML input type used by single-line controls.
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::SingleLine | FieldKind::MultiLine => "text",
            FieldKind::Url => "url",
            FieldKind::Numeric => "number",
        }
    }
}

/// Regular expression compiled once when the schema is loaded.
#[derive(Debug, Clone)]
pub struct FieldPattern(Regex);

impl FieldPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self)
    }

    /// Unanchored search, the same way a browser-side `RegExp.test` treats the pattern.
    pub fn is_match(&self, value: &str) -> bool {
        self.0.is_match(value)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for FieldPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for FieldPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        FieldPattern::new(&raw)
            .map_err(|err| serde::de::Error::custom(format!("invalid pattern '{raw}': {err}")))
    }
}

/// Numeric step hint; browsers also accept the keyword `any`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepHint {
    Value(f64),
    Keyword(String),
}

/// Declarative description of one editable ad attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: AdField,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<FieldPattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<StepHint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: AdField, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name,
            label: label.into(),
            kind,
            required: false,
            placeholder: None,
            max_length: None,
            pattern: None,
            min: None,
            step: None,
            suffix: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn pattern(mut self, pattern: FieldPattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn numeric_hints(mut self, min: f64, step: StepHint, suffix: impl Into<String>) -> Self {
        self.min = Some(min);
        self.step = Some(step);
        self.suffix = Some(suffix.into());
        self
    }
}

const LANDING_URL_PATTERN: &str = "https?://.*";

/// Ordered, immutable ad form schema. Field names are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FormConfigDocument")]
pub struct FormConfig {
    fields: Vec<FieldDescriptor>,
}

#[derive(Deserialize)]
struct FormConfigDocument {
    fields: Vec<FieldDescriptor>,
}

impl TryFrom<FormConfigDocument> for FormConfig {
    type Error = FormConfigError;

    fn try_from(document: FormConfigDocument) -> Result<Self, Self::Error> {
        FormConfig::new(document.fields)
    }
}

impl FormConfig {
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, FormConfigError> {
        let mut seen = BTreeSet::new();
        for field in &fields {
            if !seen.insert(field.name) {
                return Err(FormConfigError::DuplicateField(field.name));
            }
        }

        Ok(Self { fields })
    }

    /// The ad form the wall ships with.
    pub fn standard() -> Self {
        let landing_pattern =
            FieldPattern::new(LANDING_URL_PATTERN).expect("landing url pattern compiles");

        Self {
            fields: vec![
                FieldDescriptor::new(AdField::Title, "广告标题", FieldKind::SingleLine)
                    .required()
                    .placeholder("请输入广告标题")
                    .max_length(50),
                FieldDescriptor::new(AdField::Publisher, "发布人", FieldKind::SingleLine)
                    .required()
                    .placeholder("请输入发布人")
                    .max_length(20),
                FieldDescriptor::new(AdField::Content, "内容文案", FieldKind::MultiLine)
                    .required()
                    .placeholder("请输入广告内容")
                    .max_length(500),
                FieldDescriptor::new(AdField::LandingUrl, "落地页", FieldKind::Url)
                    .required()
                    .placeholder("请输入落地页URL")
                    .pattern(landing_pattern),
                FieldDescriptor::new(AdField::Price, "出价", FieldKind::Numeric)
                    .required()
                    .numeric_hints(0.0, StepHint::Value(0.01), "元"),
            ],
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FormConfigError> {
        serde_json::from_reader(reader).map_err(FormConfigError::Parse)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FormConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FormConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: AdField) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormConfigError {
    #[error("form config declares '{0}' more than once")]
    DuplicateField(AdField),
    #[error("failed to read form config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse form config: {0}")]
    Parse(#[source] serde_json::Error),
}
