//! Domain types for the edition → boxes dependent dropdown.
//!
//! The boxes endpoint returns a JSON array of records shaped like
//! `{"id": 3, "ordinal": 1}`. Django primary keys normally serialize as
//! integers, but hand-written endpoints often emit them as strings, so both
//! `id` and `ordinal` accept either form. The id is only ever echoed back as
//! an option value, so it is kept as its string form.

use serde::Deserialize;

/// Label of the empty-value option that always leads the box dropdown.
pub const PLACEHOLDER_LABEL: &str = "---------";

/// A selected edition. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditionId(String);

impl EditionId {
    /// Interprets a raw control value. The empty string means "no edition
    /// selected" and yields `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.is_empty() {
            None
        } else {
            Some(Self(value.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EditionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a box record, echoed back as the option value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoxId(String);

impl BoxId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BoxId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl<'de> Deserialize<'de> for BoxId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// Display position of a box within its edition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Ordinal {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for Ordinal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ordinal::Number(n) => write!(f, "{n}"),
            Ordinal::Text(s) => f.write_str(s),
        }
    }
}

/// One element of the boxes endpoint response. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoxRecord {
    pub id: BoxId,
    pub ordinal: Ordinal,
}

/// A `(value, label)` pair in a single-choice control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// The empty-value `---------` option.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new("", PLACEHOLDER_LABEL)
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

impl From<&BoxRecord> for SelectOption {
    fn from(record: &BoxRecord) -> Self {
        Self::new(record.id.as_str(), format!("Box N°: {}", record.ordinal))
    }
}

/// Builds the full option list for the box control: the placeholder
/// followed by one option per record, in server order.
#[must_use]
pub fn box_options(records: &[BoxRecord]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::placeholder())
        .chain(records.iter().map(SelectOption::from))
        .collect()
}

#[cfg(test)]
#[path = "boxes_test.rs"]
mod tests;
