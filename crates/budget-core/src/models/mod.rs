use std::{fmt::Display, sync::Arc};

use time::{macros::format_description, Date};

mod record;

pub use record::Record;

/// A single cell value as it is stored.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Null,
    Int(i64),
    Real(f64),
    Text(Arc<str>),
    Blob(Vec<u8>),
}

impl DataValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            DataValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen, since REAL columns may hand back whole numbers.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            DataValue::Real(r) => Some(*r),
            DataValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(&**s),
            _ => None,
        }
    }

    /// Parses an ISO `YYYY-MM-DD` text value.
    pub fn as_date(&self) -> Option<Date> {
        let text = self.as_text()?;
        Date::parse(text, format_description!("[year]-[month]-[day]")).ok()
    }
}

pub(crate) fn date_to_str(d: Date) -> String {
    format!("{:04}-{:02}-{:02}", d.year(), d.month() as u8, d.day())
}

impl Display for DataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataValue::Null => f.write_str("null"),
            DataValue::Int(i) => write!(f, "{}", i),
            DataValue::Real(r) => write!(f, "{}", r),
            DataValue::Text(s) => f.write_str(s),
            DataValue::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<i64> for DataValue {
    fn from(v: i64) -> Self {
        DataValue::Int(v)
    }
}

impl From<i32> for DataValue {
    fn from(v: i32) -> Self {
        DataValue::Int(v.into())
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        DataValue::Real(v)
    }
}

impl From<&str> for DataValue {
    fn from(v: &str) -> Self {
        DataValue::Text(Arc::from(v))
    }
}

impl From<String> for DataValue {
    fn from(v: String) -> Self {
        DataValue::Text(Arc::from(v))
    }
}

impl From<Arc<str>> for DataValue {
    fn from(v: Arc<str>) -> Self {
        DataValue::Text(v)
    }
}

impl From<Vec<u8>> for DataValue {
    fn from(v: Vec<u8>) -> Self {
        DataValue::Blob(v)
    }
}

impl From<Date> for DataValue {
    fn from(d: Date) -> Self {
        DataValue::Text(Arc::from(date_to_str(d)))
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(DataValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    #[test]
    fn test_dates_are_stored_as_iso_text() {
        let d = Date::from_calendar_date(2024, Month::March, 7).unwrap();
        let value = DataValue::from(d);
        assert_eq!(value.as_text(), Some("2024-03-07"));
        assert_eq!(value.as_date(), Some(d));
    }

    #[test]
    fn test_free_text_is_not_a_date() {
        assert_eq!(DataValue::from("monthly").as_date(), None);
        assert_eq!(DataValue::Null.as_date(), None);
    }

    #[test]
    fn test_option_maps_none_to_null() {
        assert!(DataValue::from(None::<f64>).is_null());
        assert_eq!(DataValue::from(Some(2.5)), DataValue::Real(2.5));
    }

    #[test]
    fn test_as_real_widens_integers() {
        assert_eq!(DataValue::Int(3000).as_real(), Some(3000.0));
        assert_eq!(DataValue::from("3000").as_real(), None);
        assert_eq!(DataValue::Real(1.5).as_int(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(DataValue::Null.to_string(), "null");
        assert_eq!(DataValue::from("TestBank").to_string(), "TestBank");
        assert_eq!(DataValue::Int(42).to_string(), "42");
        assert_eq!(DataValue::Blob(vec![1, 2, 3]).to_string(), "<3 bytes>");
    }
}
