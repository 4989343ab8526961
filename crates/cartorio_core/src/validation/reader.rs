//! Declarative field rules evaluated over a flattened submission.
//!
//! # Invariants
//! - Rules never short-circuit: every rule records its own error and the
//!   caller keeps evaluating the remaining fields.
//! - Required rules return `None` exactly when they recorded an error.
//! - Optional rules treat missing, empty, and blank values as absent.

use crate::form::FormValue;
use crate::validation::errors::ValidationErrors;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Reads typed values below one path prefix of a [`FormValue`] tree.
pub struct FieldReader<'a> {
    fields: Option<&'a BTreeMap<String, FormValue>>,
    path: Vec<String>,
    errors: &'a mut ValidationErrors,
}

impl<'a> FieldReader<'a> {
    /// Creates a reader over the submission root.
    pub fn new(root: &'a FormValue, errors: &'a mut ValidationErrors) -> Self {
        Self {
            fields: root.as_map(),
            path: Vec::new(),
            errors,
        }
    }

    /// Path segments of this reader's prefix.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Records an error for `key` below this reader's prefix.
    pub fn error(&mut self, key: &str, message: impl Into<String>) {
        let path = self.field_path(key);
        self.errors.push(path, message);
    }

    /// Returns whether any non-blank value was submitted below this prefix.
    pub fn has_content(&self) -> bool {
        self.fields
            .is_some_and(|fields| fields.values().any(FormValue::has_content))
    }

    /// Required text with at least `min_chars` characters after trimming.
    pub fn text(&mut self, key: &str, min_chars: usize, message: &str) -> Option<String> {
        match self.trimmed(key) {
            Some(value) if value.chars().count() >= min_chars.max(1) => Some(value.to_string()),
            _ => {
                self.error(key, message);
                None
            }
        }
    }

    /// Required text with exactly `chars` characters after trimming.
    pub fn text_len(&mut self, key: &str, chars: usize, message: &str) -> Option<String> {
        match self.trimmed(key) {
            Some(value) if value.chars().count() == chars => Some(value.to_string()),
            _ => {
                self.error(key, message);
                None
            }
        }
    }

    pub fn optional_text(&mut self, key: &str) -> Option<String> {
        self.present(key).map(str::to_string)
    }

    /// Optional text that, when present, has at least `min_chars` characters.
    pub fn optional_text_min(&mut self, key: &str, min_chars: usize, message: &str) -> Option<String> {
        let value = self.present(key)?;
        if value.chars().count() < min_chars {
            self.error(key, message);
            return None;
        }
        Some(value.to_string())
    }

    /// Optional text that, when present, has at most `max_chars` characters.
    pub fn optional_text_max(&mut self, key: &str, max_chars: usize, message: &str) -> Option<String> {
        let value = self.present(key)?;
        if value.chars().count() > max_chars {
            self.error(key, message);
            return None;
        }
        Some(value.to_string())
    }

    /// Required text accepted by `matches`.
    pub fn pattern(&mut self, key: &str, matches: fn(&str) -> bool, message: &str) -> Option<String> {
        match self.trimmed(key) {
            Some(value) if matches(value) => Some(value.to_string()),
            _ => {
                self.error(key, message);
                None
            }
        }
    }

    /// Required text with distinct messages for "missing" and "malformed".
    pub fn required_pattern(
        &mut self,
        key: &str,
        required: &str,
        matches: fn(&str) -> bool,
        malformed: &str,
    ) -> Option<String> {
        let Some(value) = self.present(key) else {
            self.error(key, required);
            return None;
        };
        if !matches(value) {
            self.error(key, malformed);
            return None;
        }
        Some(value.to_string())
    }

    pub fn optional_pattern(
        &mut self,
        key: &str,
        matches: fn(&str) -> bool,
        message: &str,
    ) -> Option<String> {
        let value = self.present(key)?;
        if !matches(value) {
            self.error(key, message);
            return None;
        }
        Some(value.to_string())
    }

    /// Required member of a closed set, parsed from its submitted label.
    pub fn choice<E: FromStr>(&mut self, key: &str, message: &str) -> Option<E> {
        match self.trimmed(key).and_then(|value| value.parse::<E>().ok()) {
            Some(parsed) => Some(parsed),
            None => {
                self.error(key, message);
                None
            }
        }
    }

    pub fn optional_choice<E: FromStr>(&mut self, key: &str, message: &str) -> Option<E> {
        let value = self.present(key)?;
        match value.parse::<E>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.error(key, message);
                None
            }
        }
    }

    /// Optional strictly positive integer; empty means absent, not zero.
    pub fn optional_positive_int(
        &mut self,
        key: &str,
        not_a_number: &str,
        not_positive: &str,
    ) -> Option<u32> {
        let value = self.present(key)?;
        // Numeric notation is accepted as long as it names a whole number ("3.0", "1e2").
        let number = match value.parse::<f64>() {
            Ok(number) if number.is_finite() && number.fract() == 0.0 => number,
            _ => {
                self.error(key, not_a_number);
                return None;
            }
        };
        if number <= 0.0 {
            self.error(key, not_positive);
            return None;
        }
        if number > f64::from(u32::MAX) {
            self.error(key, not_a_number);
            return None;
        }
        Some(number as u32)
    }

    /// Checkbox state: `on` or `true` is checked, anything else is not.
    pub fn checkbox(&self, key: &str) -> bool {
        matches!(self.trimmed(key), Some("on" | "true"))
    }

    /// Optional list of non-blank strings submitted with `key[]`.
    pub fn optional_list(&mut self, key: &str) -> Option<Vec<String>> {
        let values: Vec<String> = match self.raw(key)? {
            FormValue::List(items) => items
                .iter()
                .filter_map(FormValue::as_text)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect(),
            FormValue::Text(value) if !value.trim().is_empty() => vec![value.trim().to_string()],
            _ => Vec::new(),
        };
        (!values.is_empty()).then_some(values)
    }

    /// Required nested object; a missing object reports each required field.
    pub fn group<T>(
        &mut self,
        key: &str,
        read: impl FnOnce(&mut FieldReader<'_>) -> Option<T>,
    ) -> Option<T> {
        let fields = self.raw(key).and_then(FormValue::as_map);
        let path = self.field_path(key);
        let mut child = FieldReader {
            fields,
            path,
            errors: &mut *self.errors,
        };
        read(&mut child)
    }

    /// Optional nested object, absent when nothing below it was filled in.
    pub fn optional_group<T>(
        &mut self,
        key: &str,
        read: impl FnOnce(&mut FieldReader<'_>) -> Option<T>,
    ) -> Option<T> {
        let value = self.raw(key)?;
        if !value.has_content() {
            return None;
        }
        self.group(key, read)
    }

    /// Optional list of nested objects such as `filhosComuns[n].campo`.
    ///
    /// Returns `None` when the list is absent or any item is invalid.
    pub fn optional_group_list<T>(
        &mut self,
        key: &str,
        mut read: impl FnMut(&mut FieldReader<'_>) -> Option<T>,
    ) -> Option<Vec<T>> {
        let items = self.raw(key).and_then(FormValue::as_list)?;
        let base = self.field_path(key);
        let mut parsed = Vec::with_capacity(items.len());
        let mut valid = true;

        for (index, item) in items.iter().enumerate() {
            let mut path = base.clone();
            path.push(index.to_string());
            let mut child = FieldReader {
                fields: item.as_map(),
                path,
                errors: &mut *self.errors,
            };
            match read(&mut child) {
                Some(value) => parsed.push(value),
                None => valid = false,
            }
        }

        (valid && !parsed.is_empty()).then_some(parsed)
    }

    fn field_path(&self, key: &str) -> Vec<String> {
        let mut path = self.path.clone();
        path.push(key.to_string());
        path
    }

    fn raw(&self, key: &str) -> Option<&'a FormValue> {
        self.fields.and_then(|fields| fields.get(key))
    }

    fn trimmed(&self, key: &str) -> Option<&'a str> {
        self.raw(key).and_then(FormValue::as_text).map(str::trim)
    }

    fn present(&self, key: &str) -> Option<&'a str> {
        self.trimmed(key).filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::FieldReader;
    use crate::form::{flatten, FlattenOptions, FormData};
    use crate::validation::errors::ValidationErrors;
    use crate::validation::patterns::is_cpf;

    fn value_of(pairs: &[(&str, &str)]) -> crate::form::FormValue {
        let form: FormData = pairs.iter().copied().collect();
        flatten(&form, &FlattenOptions::new())
    }

    #[test]
    fn collects_every_error_in_one_pass() {
        let value = value_of(&[("nome", ""), ("cpf", "123"), ("idade", "abc")]);
        let mut errors = ValidationErrors::new();
        let mut reader = FieldReader::new(&value, &mut errors);

        assert_eq!(reader.text("nome", 1, "Nome é obrigatório"), None);
        assert_eq!(reader.pattern("cpf", is_cpf, "CPF inválido"), None);
        assert_eq!(
            reader.optional_positive_int("idade", "Idade deve ser um número", "Idade deve ser positiva"),
            None
        );

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.messages_for("idade"), vec!["Idade deve ser um número"]);
    }

    #[test]
    fn optional_rules_treat_blank_as_absent() {
        let value = value_of(&[("cpf", "  "), ("idade", ""), ("obs", "")]);
        let mut errors = ValidationErrors::new();
        let mut reader = FieldReader::new(&value, &mut errors);

        assert_eq!(reader.optional_pattern("cpf", is_cpf, "CPF inválido"), None);
        assert_eq!(reader.optional_positive_int("idade", "x", "y"), None);
        assert_eq!(reader.optional_text("obs"), None);
        assert!(errors.is_empty());
    }

    #[test]
    fn positive_int_rejects_zero_and_negative() {
        let value = value_of(&[("a", "0"), ("b", "-3"), ("c", "42")]);
        let mut errors = ValidationErrors::new();
        let mut reader = FieldReader::new(&value, &mut errors);

        assert_eq!(reader.optional_positive_int("a", "nan", "positiva"), None);
        assert_eq!(reader.optional_positive_int("b", "nan", "positiva"), None);
        assert_eq!(reader.optional_positive_int("c", "nan", "positiva"), Some(42));
        assert_eq!(errors.messages_for("a"), vec!["positiva"]);
    }

    #[test]
    fn positive_int_accepts_whole_numbers_in_any_notation() {
        let options = FlattenOptions::new().absent_when_not_numeric(&["a", "b", "c", "d"]);
        let form: FormData = [("a", "3.0"), ("b", "1e2"), ("c", "2.5"), ("d", "inf")]
            .into_iter()
            .collect();
        let value = flatten(&form, &options);
        let mut errors = ValidationErrors::new();
        let mut reader = FieldReader::new(&value, &mut errors);

        assert_eq!(reader.optional_positive_int("a", "nan", "positiva"), Some(3));
        assert_eq!(reader.optional_positive_int("b", "nan", "positiva"), Some(100));
        assert_eq!(reader.optional_positive_int("c", "nan", "positiva"), None);
        assert_eq!(reader.optional_positive_int("d", "nan", "positiva"), None);

        assert_eq!(errors.messages_for("c"), vec!["nan"]);
        assert!(errors.messages_for("a").is_empty());
        assert!(errors.messages_for("d").is_empty());
    }

    #[test]
    fn checkbox_accepts_on_and_true_only() {
        let value = value_of(&[("a", "on"), ("b", "true"), ("c", "off")]);
        let mut errors = ValidationErrors::new();
        let reader = FieldReader::new(&value, &mut errors);

        assert!(reader.checkbox("a"));
        assert!(reader.checkbox("b"));
        assert!(!reader.checkbox("c"));
        assert!(!reader.checkbox("missing"));
    }

    #[test]
    fn missing_group_reports_nested_paths() {
        let value = value_of(&[]);
        let mut errors = ValidationErrors::new();
        let mut reader = FieldReader::new(&value, &mut errors);

        let parsed = reader.group("declarante", |group| {
            group.text("nomeCompleto", 1, "Nome completo do declarante é obrigatório")
        });

        assert_eq!(parsed, None);
        assert_eq!(
            errors.messages_for("declarante.nomeCompleto"),
            vec!["Nome completo do declarante é obrigatório"]
        );
    }

    #[test]
    fn optional_group_is_absent_when_blank() {
        let value = value_of(&[("testemunha1.nomeCompleto", ""), ("testemunha1.rg", " ")]);
        let mut errors = ValidationErrors::new();
        let mut reader = FieldReader::new(&value, &mut errors);

        let parsed = reader.optional_group("testemunha1", |group| group.text("nomeCompleto", 1, "obrigatório"));

        assert_eq!(parsed, None);
        assert!(errors.is_empty());
    }

    #[test]
    fn group_list_reports_indexed_paths() {
        let value = value_of(&[
            ("filhosComuns[0].nomeCompleto", "Caio"),
            ("filhosComuns[1].nomeCompleto", ""),
        ]);
        let mut errors = ValidationErrors::new();
        let mut reader = FieldReader::new(&value, &mut errors);

        let parsed = reader.optional_group_list("filhosComuns", |item| {
            item.text("nomeCompleto", 1, "Nome completo do filho é obrigatório")
        });

        assert_eq!(parsed, None);
        assert_eq!(
            errors.messages_for("filhosComuns.1.nomeCompleto"),
            vec!["Nome completo do filho é obrigatório"]
        );
    }
}
