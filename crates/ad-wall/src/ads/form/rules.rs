use std::borrow::Cow;

use serde::Serialize;

use super::super::domain::FieldValue;
use super::config::FieldDescriptor;

/// Checks a field descriptor can declare, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Required,
    Pattern,
    MaxLength,
}

/// One row of the rule table: a violation predicate and the message it produces.
pub(crate) struct Rule {
    pub(crate) kind: RuleKind,
    violated: fn(&FieldDescriptor, &FieldValue<'_>) -> bool,
    message: fn(&FieldDescriptor) -> String,
}

impl Rule {
    pub(crate) fn check(&self, field: &FieldDescriptor, value: &FieldValue<'_>) -> Option<String> {
        if (self.violated)(field, value) {
            Some((self.message)(field))
        } else {
            None
        }
    }
}

/// Precedence is the table order; the first violated row wins for a field.
pub(crate) const RULES: [Rule; 3] = [
    Rule {
        kind: RuleKind::Required,
        violated: required_violated,
        message: required_message,
    },
    Rule {
        kind: RuleKind::Pattern,
        violated: pattern_violated,
        message: invalid_message,
    },
    Rule {
        kind: RuleKind::MaxLength,
        violated: max_length_violated,
        message: max_length_message,
    },
];

pub(crate) fn first_violation(
    field: &FieldDescriptor,
    value: &FieldValue<'_>,
) -> Option<(RuleKind, String)> {
    RULES
        .iter()
        .find_map(|rule| rule.check(field, value).map(|message| (rule.kind, message)))
}

fn stringified<'a>(value: &FieldValue<'a>) -> Cow<'a, str> {
    if value.is_blank() {
        Cow::Borrowed("")
    } else {
        value.as_text()
    }
}

fn required_violated(field: &FieldDescriptor, value: &FieldValue<'_>) -> bool {
    field.required && value.is_blank()
}

fn pattern_violated(field: &FieldDescriptor, value: &FieldValue<'_>) -> bool {
    match &field.pattern {
        Some(pattern) if !value.is_blank() => !pattern.is_match(&value.as_text()),
        _ => false,
    }
}

fn max_length_violated(field: &FieldDescriptor, value: &FieldValue<'_>) -> bool {
    match field.max_length {
        Some(max) => stringified(value).chars().count() > max,
        None => false,
    }
}

fn required_message(field: &FieldDescriptor) -> String {
    format!("{}不能为空", field.label)
}

/// Also used when a price passes the declarative checks but fails to normalize.
pub(crate) fn invalid_message(field: &FieldDescriptor) -> String {
    format!("请输入有效的{}", field.label)
}

fn max_length_message(field: &FieldDescriptor) -> String {
    format!(
        "{}不能超过{}个字符",
        field.label,
        field.max_length.unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ads::domain::AdField;
    use crate::ads::form::config::{FieldKind, FieldPattern};

    fn title() -> FieldDescriptor {
        FieldDescriptor::new(AdField::Title, "标题", FieldKind::SingleLine)
    }

    #[test]
    fn table_order_is_required_pattern_max_length() {
        let kinds: Vec<RuleKind> = RULES.iter().map(|rule| rule.kind).collect();
        assert_eq!(
            kinds,
            vec![RuleKind::Required, RuleKind::Pattern, RuleKind::MaxLength]
        );
    }

    #[test]
    fn optional_blank_field_passes_every_rule() {
        let field = title()
            .max_length(3)
            .pattern(FieldPattern::new("^x$").unwrap());

        assert_eq!(first_violation(&field, &FieldValue::Missing), None);
    }

    #[test]
    fn pattern_wins_over_length_when_both_fail() {
        let field = title()
            .max_length(3)
            .pattern(FieldPattern::new("^[0-9]+$").unwrap());

        let (kind, message) =
            first_violation(&field, &FieldValue::Text("abcdef")).expect("violation");
        assert_eq!(kind, RuleKind::Pattern);
        assert_eq!(message, "请输入有效的标题");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let field = title().max_length(2);

        assert_eq!(first_violation(&field, &FieldValue::Text("广告")), None);
        let (kind, message) =
            first_violation(&field, &FieldValue::Text("广告墙")).expect("too long");
        assert_eq!(kind, RuleKind::MaxLength);
        assert_eq!(message, "标题不能超过2个字符");
    }

    #[test]
    fn zero_counts_as_blank_for_required_numbers() {
        let field = FieldDescriptor::new(AdField::Price, "出价", FieldKind::Numeric).required();

        let (kind, message) =
            first_violation(&field, &FieldValue::Number(0.0)).expect("blank price");
        assert_eq!(kind, RuleKind::Required);
        assert_eq!(message, "出价不能为空");
        assert_eq!(first_violation(&field, &FieldValue::Number(0.01)), None);
    }
}
