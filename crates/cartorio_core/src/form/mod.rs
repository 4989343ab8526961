//! Raw form submissions and their nested projection.
//!
//! # Responsibility
//! - Hold browser-style flat key/value submissions (`FormData`).
//! - Rebuild nested objects/lists from dotted and bracketed keys.
//!
//! # Invariants
//! - Flattening is total: every submission produces a `FormValue::Map` root.
//! - Empty-value coercion is declared per record type through
//!   `FlattenOptions`, never hard-coded per call site.

mod flatten;
mod form_data;

pub use flatten::{flatten, split_path, FlattenOptions, FormValue, MAX_LIST_INDEX};
pub use form_data::FormData;
