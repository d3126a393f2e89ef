use serde::Serialize;

use super::super::domain::AdField;
use super::config::{FieldDescriptor, FieldKind, FormConfig, StepHint};

/// Rows shown by multi-line controls.
pub const TEXTAREA_ROWS: u8 = 4;

/// Input control a field renders as.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    #[serde(rename_all = "camelCase")]
    SingleLine { input_type: &'static str },
    MultiLine { rows: u8 },
    /// Single-line number input carrying presentation hints only.
    Numeric {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        step: Option<StepHint>,
        #[serde(skip_serializing_if = "Option::is_none")]
        suffix: Option<String>,
    },
}

impl Control {
    pub fn for_field(field: &FieldDescriptor) -> Self {
        match field.kind {
            FieldKind::MultiLine => Control::MultiLine {
                rows: TEXTAREA_ROWS,
            },
            FieldKind::Numeric => Control::Numeric {
                min: field.min,
                step: field.step.clone(),
                suffix: field.suffix.clone(),
            },
            kind => Control::SingleLine {
                input_type: kind.input_type(),
            },
        }
    }

    pub fn is_single_line(&self) -> bool {
        !matches!(self, Control::MultiLine { .. })
    }
}

/// Render descriptor for one form row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldLayout {
    pub name: AdField,
    pub label: String,
    pub required: bool,
    pub placeholder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub control: Control,
}

impl FieldLayout {
    pub fn for_field(field: &FieldDescriptor) -> Self {
        Self {
            name: field.name,
            label: field.label.clone(),
            required: field.required,
            placeholder: field
                .placeholder
                .clone()
                .unwrap_or_else(|| format!("请输入{}", field.label)),
            max_length: field.max_length,
            pattern: field.pattern.as_ref().map(|pattern| pattern.as_str().to_string()),
            control: Control::for_field(field),
        }
    }
}

impl FormConfig {
    /// Render order follows declaration order.
    pub fn layout(&self) -> Vec<FieldLayout> {
        self.fields().iter().map(FieldLayout::for_field).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn standard_form_maps_kinds_to_controls() {
        let layout = FormConfig::standard().layout();
        let controls: Vec<(AdField, Control)> = layout
            .iter()
            .map(|row| (row.name, row.control.clone()))
            .collect();

        assert_eq!(
            controls,
            vec![
                (AdField::Title, Control::SingleLine { input_type: "text" }),
                (AdField::Publisher, Control::SingleLine { input_type: "text" }),
                (AdField::Content, Control::MultiLine { rows: 4 }),
                (AdField::LandingUrl, Control::SingleLine { input_type: "url" }),
                (
                    AdField::Price,
                    Control::Numeric {
                        min: Some(0.0),
                        step: Some(StepHint::Value(0.01)),
                        suffix: Some("元".to_string()),
                    },
                ),
            ]
        );
        assert_eq!(
            layout
                .iter()
                .filter(|row| row.control.is_single_line())
                .count(),
            4
        );
    }

    #[test]
    fn placeholder_falls_back_to_label_prompt() {
        let field = FieldDescriptor::new(AdField::Price, "出价", FieldKind::Numeric);

        assert_eq!(FieldLayout::for_field(&field).placeholder, "请输入出价");
    }

    #[test]
    fn layout_serializes_tagged_controls() {
        let layout = FormConfig::standard().layout();
        let value = serde_json::to_value(&layout).unwrap();

        assert_eq!(value[0]["control"], json!({ "control": "single_line", "inputType": "text" }));
        assert_eq!(value[2]["control"], json!({ "control": "multi_line", "rows": 4 }));
        assert_eq!(value[3]["pattern"], json!("https?://.*"));
        assert_eq!(value[4]["control"]["suffix"], json!("元"));
        assert_eq!(value[0]["maxLength"], json!(50));
    }
}
