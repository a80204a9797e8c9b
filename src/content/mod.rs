use std::collections::BTreeMap;

pub mod frontmatter;

pub use frontmatter::parse_frontmatter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

/// Key/value header of a post. Only scalars and flat string lists exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    fields: BTreeMap<String, FieldValue>,
}

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Scalar value of `key`. Lists are not coerced.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(FieldValue::Scalar(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// List value of `key`. A non-empty scalar is seen as a single item.
    #[cfg(test)]
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        match self.fields.get(key)? {
            FieldValue::List(items) => Some(items.clone()),
            FieldValue::Scalar(s) if s.is_empty() => Some(vec![]),
            FieldValue::Scalar(s) => Some(vec![s.clone()]),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn set(&mut self, key: &str, value: FieldValue) {
        self.fields.insert(key.to_string(), value);
    }

    pub(crate) fn push_item(&mut self, key: &str, item: String) {
        let entry = self
            .fields
            .entry(key.to_string())
            .or_insert_with(|| FieldValue::List(vec![]));

        match entry {
            FieldValue::List(items) => items.push(item),
            FieldValue::Scalar(_) => *entry = FieldValue::List(vec![item]),
        }
    }
}
