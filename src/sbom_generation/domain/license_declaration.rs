use serde_json::Value;

/// A single raw license entry after unwrapping `{ "type": ... }`
#[derive(Debug, Clone, PartialEq)]
pub enum LicenseValue {
    Text(String),
    /// Anything that is not a string after unwrapping, kept for diagnostics
    Invalid(Value),
}

/// Normalized form of a package's polymorphic `license` field
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LicenseDeclaration {
    #[default]
    Absent,
    Single(LicenseValue),
    Many(Vec<LicenseValue>),
}

impl LicenseDeclaration {
    /// Normalizes a raw manifest value.
    ///
    /// Missing, `null`, `false` and `""` are absent. A list keeps its
    /// length even when it is empty.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) | Some(Value::Bool(false)) => Self::Absent,
            Some(Value::String(s)) if s.is_empty() => Self::Absent,
            Some(Value::Array(items)) => Self::Many(items.iter().map(Self::entry).collect()),
            Some(other) => Self::Single(Self::entry(other)),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Single(LicenseValue::Text(value.into()))
    }

    pub fn texts<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Many(
            values
                .into_iter()
                .map(|v| LicenseValue::Text(v.into()))
                .collect(),
        )
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Entries in declaration order; empty when absent
    pub fn values(&self) -> &[LicenseValue] {
        match self {
            Self::Absent => &[],
            Self::Single(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }

    fn entry(value: &Value) -> LicenseValue {
        match value {
            Value::String(s) => LicenseValue::Text(s.clone()),
            Value::Object(map) => match map.get("type") {
                Some(Value::String(t)) if !t.is_empty() => LicenseValue::Text(t.clone()),
                _ => LicenseValue::Invalid(value.clone()),
            },
            other => LicenseValue::Invalid(other.clone()),
        }
    }
}
