use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::MalformedQuery;

/// Parameter name to the ordered raw values supplied for it.
///
/// This is the percent-decoded form of an `application/x-www-form-urlencoded`
/// query string: `a=1&a=2&b=x` becomes `{"a": ["1", "2"], "b": ["x"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues {
    entries: IndexMap<String, Vec<String>>,
}

impl QueryValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string, without the leading `?`.
    ///
    /// Empty segments are skipped and a key without `=` maps to `""`.
    /// Unlike lossy form decoders, a bad percent-escape, a `;` separator or
    /// non-UTF-8 decoded bytes reject the whole string.
    pub fn parse(query: &str) -> Result<Self, MalformedQuery> {
        let mut values = Self::new();
        for segment in query.split('&').filter(|s| !s.is_empty()) {
            if segment.contains(';') {
                return Err(MalformedQuery::Semicolon {
                    segment: segment.to_string(),
                });
            }
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            let key = decode_component(key, segment)?;
            let value = decode_component(value, segment)?;
            values.append(key, value);
        }
        Ok(values)
    }

    /// Values supplied for `name`, in input order.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// Replace every value supplied for `name`.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.entries.insert(name.into(), values);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<K, V> FromIterator<(K, V)> for QueryValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (k, v) in iter {
            values.append(k, v);
        }
        values
    }
}

impl From<HashMap<String, Vec<String>>> for QueryValues {
    fn from(map: HashMap<String, Vec<String>>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }
}

fn decode_component(component: &str, segment: &str) -> Result<String, MalformedQuery> {
    let bytes = component.as_bytes();
    for (i, _) in bytes.iter().enumerate().filter(|(_, b)| **b == b'%') {
        let valid = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(MalformedQuery::InvalidEscape {
                segment: segment.to_string(),
            });
        }
    }

    let plus_as_space = component.replace('+', " ");
    urlencoding::decode(&plus_as_space)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| MalformedQuery::InvalidUtf8 {
            segment: segment.to_string(),
        })
}
