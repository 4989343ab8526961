//! Field-level validation errors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One failed rule, addressed by its path inside the submitted object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Path segments, e.g. `["noivo1", "cpf"]` or `["filhosComuns", "0", "nomeCompleto"]`.
    pub path: Vec<String>,
    pub message: String,
}

impl FieldError {
    pub fn new(path: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// Dotted form of `path`; empty for form-level errors.
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

/// Every error collected during one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: Vec<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(path, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Messages recorded for one dotted path.
    pub fn messages_for(&self, dotted_path: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|error| error.dotted_path() == dotted_path)
            .map(|error| error.message.as_str())
            .collect()
    }

    /// Groups messages by dotted path for form display.
    pub fn by_field(&self) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for error in &self.errors {
            grouped
                .entry(error.dotted_path())
                .or_default()
                .push(error.message.clone());
        }
        grouped
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} invalid field(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "; {}: {}", error.dotted_path(), error.message)?;
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::ValidationErrors;

    #[test]
    fn by_field_groups_messages_under_dotted_paths() {
        let mut errors = ValidationErrors::new();
        errors.push(vec!["noivo1".into(), "cpf".into()], "CPF inválido");
        errors.push(vec!["hora".into()], "Formato de hora inválido (HH:MM).");
        errors.push(vec!["noivo1".into(), "cpf".into()], "outro");

        let grouped = errors.by_field();
        assert_eq!(grouped["noivo1.cpf"], vec!["CPF inválido", "outro"]);
        assert_eq!(errors.messages_for("hora"), vec!["Formato de hora inválido (HH:MM)."]);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn serializes_as_tagged_list() {
        let mut errors = ValidationErrors::new();
        errors.push(vec!["hora".into()], "inválida");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!([{ "path": ["hora"], "message": "inválida" }]));
    }
}
