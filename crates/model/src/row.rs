use serde::{Deserialize, Serialize};

/// A row as produced by a source adapter: original header text mapped to the
/// raw cell value, in column order.
///
/// Insertion semantics match a plain object/map: writing an existing key
/// overwrites its value but keeps the key's original position. That ordering
/// is load-bearing — normalized-key collisions resolve last-writer-wins over
/// it, so it must be deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a field. The key keeps its first-insertion position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value.into(),
            None => self.fields.push((key, value.into())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, String)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// A normalized row: sanitized header keys mapped to string values, plus the
/// same values in header order for positional access.
///
/// Invariant: for the sheet's header list `headers`, `values[i]` equals
/// `data[headers[i]]` for every position `i`. Absent cells are empty strings,
/// never missing entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRow {
    data: Vec<(String, String)>,
    values: Vec<String>,
}

impl CanonicalRow {
    /// Build a row from (sanitized header, value) pairs. `values` is derived
    /// by reading the pairs back in the order given, so duplicate headers see
    /// the overwriting value at every position they occupy.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut data: Vec<(String, String)> = Vec::new();
        let mut order: Vec<String> = Vec::new();
        for (key, value) in pairs {
            order.push(key.clone());
            match data.iter_mut().find(|(k, _)| *k == key) {
                Some((_, v)) => *v = value,
                None => data.push((key, value)),
            }
        }
        let values = order
            .iter()
            .map(|key| {
                data.iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v.clone())
                    .unwrap_or_default()
            })
            .collect();
        Self { data, values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value at the given key, or "" when the key is absent.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// (key, value) pairs in column order (duplicates collapsed).
    pub fn data(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.iter().map(|(k, _)| k.as_str())
    }

    /// Values aligned to the owning sheet's header order.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}
