//! Ordered multi-map of submitted form fields.

use serde::{Deserialize, Serialize};

/// Flat key/value pairs as submitted by a form.
///
/// Keeps submission order and duplicate keys, like the browser `FormData`
/// object it stands in for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one field, keeping any earlier value for the same key.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Builder-style variant of [`FormData::append`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(key, value);
        self
    }

    /// Returns the first value submitted for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns every value submitted for `key`, in submission order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == key)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FormData;

    #[test]
    fn get_returns_first_value_and_get_all_keeps_order() {
        let form = FormData::new()
            .with("docs[]", "a.pdf")
            .with("nome", "Ana")
            .with("docs[]", "b.pdf");

        assert_eq!(form.get("docs[]"), Some("a.pdf"));
        assert_eq!(form.get_all("docs[]"), vec!["a.pdf", "b.pdf"]);
        assert_eq!(form.get("missing"), None);
        assert_eq!(form.len(), 3);
    }

    #[test]
    fn collects_from_pairs() {
        let form: FormData = [("tipo", "Outro"), ("hora", "10:00")].into_iter().collect();
        assert!(form.contains_key("hora"));
        assert!(!form.is_empty());
    }
}
