//! Submission validation pipeline.
//!
//! # Responsibility
//! - Turn a raw `FormData` submission into a typed form struct or a complete
//!   list of field errors.
//! - Keep per-record rules declarative through `FormSchema` implementations.
//!
//! # Invariants
//! - Validation is synchronous and total; it never panics on user input.
//! - `parse_form` returns `Err` whenever at least one rule failed.

mod errors;
pub mod patterns;
mod reader;

pub use errors::{FieldError, ValidationErrors};
pub use reader::FieldReader;

use crate::form::{flatten, FlattenOptions, FormData, FormValue};

const INVALID_FORM_MESSAGE: &str = "Formulário inválido.";

/// Typed form struct built from a flattened submission.
pub trait FormSchema: Sized {
    /// Coercions applied while flattening submissions for this schema.
    fn flatten_options() -> FlattenOptions {
        FlattenOptions::new()
    }

    /// Applies every field rule, returning `None` if any required rule failed.
    fn read(reader: &mut FieldReader<'_>) -> Option<Self>;
}

/// Flattens and validates one submission against schema `S`.
pub fn parse_form<S: FormSchema>(form: &FormData) -> Result<S, ValidationErrors> {
    let value = flatten(form, &S::flatten_options());
    validate_value(&value)
}

/// Validates an already flattened value against schema `S`.
pub fn validate_value<S: FormSchema>(value: &FormValue) -> Result<S, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let parsed = S::read(&mut FieldReader::new(value, &mut errors));

    match parsed {
        Some(parsed) if errors.is_empty() => Ok(parsed),
        _ => {
            if errors.is_empty() {
                errors.push(Vec::new(), INVALID_FORM_MESSAGE);
            }
            Err(errors)
        }
    }
}
