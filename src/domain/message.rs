use super::log_entry::Record;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// One argument of a logging call, classified before normalization.
///
/// Plain values are stringified at conversion time using their `Display`
/// form. Structured records stay structured.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Text(String),
    Record(Record),
}

impl Message {
    /// Wraps any displayable value as a plain argument.
    pub fn display(value: impl fmt::Display) -> Self {
        Message::Text(value.to_string())
    }

    /// Builds a record from `(field, value)` pairs, keeping their order.
    pub fn record<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Message::Record(
            fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Serializes a value: objects become records, anything else becomes text.
    pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::from(serde_json::to_value(value)?))
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Message::Record(_))
    }
}

impl From<Record> for Message {
    fn from(record: Record) -> Self {
        Message::Record(record)
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(record) => Message::Record(record),
            Value::String(text) => Message::Text(text),
            other => Message::Text(other.to_string()),
        }
    }
}

impl From<Cow<'_, str>> for Message {
    fn from(text: Cow<'_, str>) -> Self {
        Message::Text(text.into_owned())
    }
}

macro_rules! impl_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Message {
                fn from(value: $ty) -> Self {
                    Message::Text(value.to_string())
                }
            }
        )*
    };
}

impl_from_display!(
    &str, String, &String, char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128,
    usize, f32, f64,
);

/// Builds a `Vec<Message>` from heterogeneous arguments.
///
/// ```
/// use rask_log_dispatch::{messages, Message};
///
/// let args = messages!["epoch", 3, "loss", 0.25];
/// assert_eq!(args.len(), 4);
/// assert_eq!(args[1], Message::Text("3".to_string()));
/// ```
#[macro_export]
macro_rules! messages {
    () => {
        ::std::vec::Vec::<$crate::Message>::new()
    };
    ($($msg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Message::from($msg)),+]
    };
}

/// Builds a [`Record`](crate::Record) with fields in the written order.
///
/// ```
/// use rask_log_dispatch::record;
///
/// let metrics = record! { "epoch" => 3, "loss" => 0.25 };
/// assert_eq!(metrics.keys().next().map(String::as_str), Some("epoch"));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::Record::new();
        $(
            record.insert(::std::string::String::from($key), $crate::Value::from($value));
        )+
        record
    }};
}
