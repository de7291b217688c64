use std::sync::Arc;

use super::DataValue;

/// One row as an ordered field-name -> value mapping.
///
/// Records read from storage list their fields in column order. Records built
/// by callers keep insertion order; inserting an existing field replaces its
/// value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(Arc<str>, DataValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn with(mut self, field: &str, value: impl Into<DataValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Returns the previous value when the field was already present.
    pub fn insert(&mut self, field: &str, value: impl Into<DataValue>) -> Option<DataValue> {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| k.as_ref() == field) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.fields.push((Arc::from(field), value));
                None
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&DataValue> {
        self.fields
            .iter()
            .find(|(k, _)| k.as_ref() == field)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// The generated key, when this record came from storage.
    pub fn id(&self) -> Option<i64> {
        self.get("id").and_then(DataValue::as_int)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataValue)> {
        self.fields.iter().map(|(k, v)| (k.as_ref(), v))
    }
}

impl<K: AsRef<str>, V: Into<DataValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k.as_ref(), v);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (Arc<str>, DataValue);
    type IntoIter = std::vec::IntoIter<(Arc<str>, DataValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
