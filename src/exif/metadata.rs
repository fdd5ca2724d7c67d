use std::collections::BTreeMap;
use std::fmt;

use super::ratio::Ratio;
use crate::error::{Error, Result};

/// A decoded EXIF value.
///
/// Single-element arrays are collapsed to the scalar variant; longer ones
/// become [`MetaValue::List`].
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Text(String),
    Integer(i64),
    Rational(Ratio),
    Float(f64),
    Bytes(Vec<u8>),
    List(Vec<MetaValue>),
}

impl MetaValue {
    /// First element of a list, or the value itself.
    pub fn scalar(&self) -> &MetaValue {
        match self {
            Self::List(items) => items.first().map(MetaValue::scalar).unwrap_or(self),
            other => other,
        }
    }

    /// Builds a value from an iterator of scalars, collapsing singletons.
    pub(crate) fn collapse(items: impl IntoIterator<Item = MetaValue>) -> Self {
        let mut items: Vec<MetaValue> = items.into_iter().collect();
        if items.len() == 1 {
            items.remove(0)
        } else {
            Self::List(items)
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Rational(r) => write!(f, "{r}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bytes(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for MetaValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<Ratio> for MetaValue {
    fn from(r: Ratio) -> Self {
        Self::Rational(r)
    }
}

impl From<f64> for MetaValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

/// Metadata of one image, keyed by canonical EXIF tag name
/// (`Model`, `ExposureTime`, ...). Tags without a known name are keyed by
/// their decimal tag number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    fields: BTreeMap<String, MetaValue>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<MetaValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&MetaValue> {
        self.fields.get(name)
    }

    /// Like [`get`](Self::get), but absence is an [`Error::MissingField`].
    pub fn require(&self, name: &'static str) -> Result<&MetaValue> {
        self.get(name).ok_or(Error::MissingField(name))
    }

    pub fn remove(&mut self, name: &str) -> Option<MetaValue> {
        self.fields.remove(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<MetaValue>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (k, v) in iter {
            metadata.insert(k, v);
        }
        metadata
    }
}
