//! Caller-attached metadata for schedules.
//!
//! `UserInfo` is an ordered string-keyed map whose values are drawn from
//! a closed set of serialisable kinds. The schedule engine carries it
//! untouched.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use super::time::Date;

/// A single metadata value.
///
/// # Examples
///
/// ```
/// use careplan_core::types::UserInfoValue;
///
/// let dose = UserInfoValue::from(2.5);
/// assert_eq!(dose.kind_name(), "number");
/// assert_eq!(dose.as_f64(), Some(2.5));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", content = "value", rename_all = "snake_case")
)]
pub enum UserInfoValue {
    /// UTF-8 text.
    String(String),
    /// IEEE-754 double.
    ///
    /// Serialised as a plain number when finite and as `"NaN"`, `"inf"` or
    /// `"-inf"` otherwise.
    Number(#[cfg_attr(feature = "serde", serde(with = "number_repr"))] f64),
    /// Boolean flag.
    Boolean(bool),
    /// Gregorian calendar date.
    Date(Date),
    /// Nested mapping.
    Map(UserInfo),
}

impl UserInfoValue {
    /// Returns the lowercase name of this value's kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            UserInfoValue::String(_) => "string",
            UserInfoValue::Number(_) => "number",
            UserInfoValue::Boolean(_) => "boolean",
            UserInfoValue::Date(_) => "date",
            UserInfoValue::Map(_) => "map",
        }
    }

    /// Returns the text if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            UserInfoValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the number if this is a numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            UserInfoValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the flag if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            UserInfoValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the date if this is a date value.
    pub fn as_date(&self) -> Option<Date> {
        match self {
            UserInfoValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the nested map if this is a map value.
    pub fn as_map(&self) -> Option<&UserInfo> {
        match self {
            UserInfoValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Structural equality in which numbers compare by bit pattern.
    ///
    /// Unlike `==` on `f64`, a `NaN` equals itself, so a value that
    /// survived a persistence round trip compares equal to the original.
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (UserInfoValue::String(a), UserInfoValue::String(b)) => a == b,
            (UserInfoValue::Number(a), UserInfoValue::Number(b)) => a.to_bits() == b.to_bits(),
            (UserInfoValue::Boolean(a), UserInfoValue::Boolean(b)) => a == b,
            (UserInfoValue::Date(a), UserInfoValue::Date(b)) => a == b,
            (UserInfoValue::Map(a), UserInfoValue::Map(b)) => a.same_as(b),
            _ => false,
        }
    }
}

impl PartialEq for UserInfoValue {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl From<&str> for UserInfoValue {
    fn from(value: &str) -> Self {
        UserInfoValue::String(value.to_string())
    }
}

impl From<String> for UserInfoValue {
    fn from(value: String) -> Self {
        UserInfoValue::String(value)
    }
}

impl From<f64> for UserInfoValue {
    fn from(value: f64) -> Self {
        UserInfoValue::Number(value)
    }
}

impl From<bool> for UserInfoValue {
    fn from(value: bool) -> Self {
        UserInfoValue::Boolean(value)
    }
}

impl From<Date> for UserInfoValue {
    fn from(value: Date) -> Self {
        UserInfoValue::Date(value)
    }
}

impl From<UserInfo> for UserInfoValue {
    fn from(value: UserInfo) -> Self {
        UserInfoValue::Map(value)
    }
}

impl fmt::Display for UserInfoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserInfoValue::String(s) => write!(f, "{}", s),
            UserInfoValue::Number(n) => write!(f, "{}", n),
            UserInfoValue::Boolean(b) => write!(f, "{}", b),
            UserInfoValue::Date(d) => write!(f, "{}", d),
            UserInfoValue::Map(m) => write!(f, "{{{} entries}}", m.len()),
        }
    }
}

#[cfg(feature = "serde")]
mod number_repr {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(NumberVisitor)
    }

    struct NumberVisitor;

    impl Visitor<'_> for NumberVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or one of \"NaN\", \"inf\", \"-inf\"")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            match v {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }
    }
}

/// Ordered metadata map attached to a schedule.
///
/// # Examples
///
/// ```
/// use careplan_core::types::{Date, UserInfo};
///
/// let mut info = UserInfo::new();
/// info.insert("medication", "ibuprofen");
/// info.insert("dose_mg", 200.0);
/// info.insert("prescribed", Date::from_ymd(2016, 1, 1).unwrap());
///
/// assert_eq!(info.len(), 3);
/// assert_eq!(info.get("medication").and_then(|v| v.as_str()), Some("ibuprofen"));
///
/// // Keys iterate in sorted order
/// let keys: Vec<&str> = info.keys().collect();
/// assert_eq!(keys, ["dose_mg", "medication", "prescribed"]);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UserInfo(BTreeMap<String, UserInfoValue>);

impl UserInfo {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts a value, returning the previous value under the key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<UserInfoValue>,
    ) -> Option<UserInfoValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&UserInfoValue> {
        self.0.get(key)
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<UserInfoValue> {
        self.0.remove(key)
    }

    /// Returns whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, UserInfoValue> {
        self.0.iter()
    }

    /// Deep structural equality, see [`UserInfoValue::same_as`].
    pub fn same_as(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va.same_as(vb))
    }
}

impl PartialEq for UserInfo {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<K, V> FromIterator<(K, V)> for UserInfo
where
    K: Into<String>,
    V: Into<UserInfoValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a UserInfo {
    type Item = (&'a String, &'a UserInfoValue);
    type IntoIter = btree_map::Iter<'a, String, UserInfoValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
