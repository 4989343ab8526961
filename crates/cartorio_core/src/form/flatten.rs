//! Flat-key to nested-value projection shared by every record schema.
//!
//! # Invariants
//! - Keys split on `.`, `[` and `]`; empty segments are ignored.
//! - A container is a list when the following segment is all digits,
//!   otherwise a map.
//! - A trailing `[]` appends the value to a list at that path.
//! - Coercion to "absent" drops the leaf; parent containers may still exist.

use crate::form::FormData;
use log::warn;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Largest list index accepted from a submitted key.
pub const MAX_LIST_INDEX: usize = 256;

/// Nested value rebuilt from a flat submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FormValue {
    Text(String),
    List(Vec<FormValue>),
    Map(BTreeMap<String, FormValue>),
}

impl FormValue {
    pub fn empty_map() -> Self {
        Self::Map(BTreeMap::new())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, FormValue>> {
        match self {
            Self::Map(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FormValue]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Looks up a direct child of a map value.
    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.as_map().and_then(|fields| fields.get(key))
    }

    /// Follows a dotted path such as `filhosComuns.0.nomeCompleto`.
    pub fn get_path(&self, path: &str) -> Option<&FormValue> {
        path.split('.')
            .try_fold(self, |current, segment| match current {
                Self::Map(fields) => fields.get(segment),
                Self::List(items) => parse_index(segment).and_then(|index| items.get(index)),
                Self::Text(_) => None,
            })
    }

    /// Returns whether any text leaf below this value is non-blank.
    pub fn has_content(&self) -> bool {
        match self {
            Self::Text(text) => !text.trim().is_empty(),
            Self::List(items) => items.iter().any(Self::has_content),
            Self::Map(fields) => fields.values().any(Self::has_content),
        }
    }
}

/// Per-record-type coercion rules applied while flattening.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenOptions {
    absent_when_empty: BTreeSet<&'static str>,
    absent_when_not_numeric: BTreeSet<&'static str>,
    array_paths: BTreeSet<&'static str>,
}

impl FlattenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leaf names whose empty value is treated as not submitted.
    pub fn absent_when_empty(mut self, fields: &[&'static str]) -> Self {
        self.absent_when_empty.extend(fields.iter().copied());
        self
    }

    /// Leaf names dropped when empty or not parseable as a finite number.
    pub fn absent_when_not_numeric(mut self, fields: &[&'static str]) -> Self {
        self.absent_when_not_numeric.extend(fields.iter().copied());
        self
    }

    /// Top-level list fields whose blank items are removed.
    ///
    /// The field itself is removed when no item survives.
    pub fn array_paths(mut self, fields: &[&'static str]) -> Self {
        self.array_paths.extend(fields.iter().copied());
        self
    }

    fn keeps(&self, leaf: &str, value: &str) -> bool {
        if self.absent_when_not_numeric.contains(leaf) {
            let trimmed = value.trim();
            return !trimmed.is_empty()
                && trimmed.parse::<f64>().is_ok_and(|number| number.is_finite());
        }
        !(value.is_empty() && self.absent_when_empty.contains(leaf))
    }
}

/// Splits a submitted key into path segments.
pub fn split_path(key: &str) -> Vec<&str> {
    key.split(['.', '[', ']'])
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Rebuilds the nested value described by `form` keys.
pub fn flatten(form: &FormData, options: &FlattenOptions) -> FormValue {
    let mut root = FormValue::empty_map();

    for (key, value) in form.entries() {
        let segments = split_path(key);
        let Some(leaf) = segments.last().copied() else {
            continue;
        };

        if segments
            .iter()
            .any(|segment| parse_index(segment).is_some_and(|index| index > MAX_LIST_INDEX))
        {
            warn!(
                "event=form_flatten module=form status=skipped reason=list_index_out_of_range key={key}"
            );
            continue;
        }

        if !options.keeps(leaf, value) {
            continue;
        }

        insert(&mut root, &segments, value, key.ends_with("[]"));
    }

    prune_array_paths(&mut root, options);
    root
}

fn insert(root: &mut FormValue, segments: &[&str], value: &str, append: bool) {
    let mut current = root;

    for (position, segment) in segments.iter().enumerate() {
        match segments.get(position + 1) {
            Some(next) => {
                current = slot(current, segment);
                ensure_container(current, parse_index(next).is_some());
            }
            None => {
                let target = slot(current, segment);
                if append {
                    if !matches!(target, FormValue::List(_)) {
                        *target = FormValue::List(Vec::new());
                    }
                    if let FormValue::List(items) = target {
                        items.push(FormValue::Text(value.to_string()));
                    }
                } else {
                    *target = FormValue::Text(value.to_string());
                }
                return;
            }
        }
    }
}

/// Returns the child slot for `segment`, reshaping `container` when its
/// current kind cannot hold that segment.
fn slot<'v>(container: &'v mut FormValue, segment: &str) -> &'v mut FormValue {
    match (container, parse_index(segment)) {
        (FormValue::List(items), Some(index)) => {
            if items.len() <= index {
                items.resize_with(index + 1, FormValue::empty_map);
            }
            &mut items[index]
        }
        (container, _) => {
            if !matches!(container, FormValue::Map(_)) {
                *container = FormValue::empty_map();
            }
            match container {
                FormValue::Map(fields) => fields
                    .entry(segment.to_string())
                    .or_insert_with(FormValue::empty_map),
                other => other,
            }
        }
    }
}

fn ensure_container(value: &mut FormValue, wants_list: bool) {
    let replace = match value {
        FormValue::Text(_) => true,
        FormValue::Map(fields) => wants_list && fields.is_empty(),
        FormValue::List(_) => false,
    };
    if replace {
        *value = if wants_list {
            FormValue::List(Vec::new())
        } else {
            FormValue::empty_map()
        };
    }
}

fn prune_array_paths(root: &mut FormValue, options: &FlattenOptions) {
    let FormValue::Map(fields) = root else {
        return;
    };

    for path in &options.array_paths {
        let emptied = match fields.get_mut(*path) {
            Some(FormValue::List(items)) => {
                items.retain(FormValue::has_content);
                items.is_empty()
            }
            _ => false,
        };
        if emptied {
            fields.remove(*path);
        }
    }
}

fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{flatten, split_path, FlattenOptions, FormValue};
    use crate::form::FormData;

    fn text(value: &FormValue, path: &str) -> Option<String> {
        value
            .get_path(path)
            .and_then(FormValue::as_text)
            .map(str::to_string)
    }

    #[test]
    fn split_path_handles_dots_and_brackets() {
        assert_eq!(
            split_path("filhosComuns[0].nomeCompleto"),
            vec!["filhosComuns", "0", "nomeCompleto"]
        );
        assert_eq!(split_path("docs[]"), vec!["docs"]);
        assert!(split_path("..").is_empty());
    }

    #[test]
    fn builds_nested_maps_and_lists() {
        let form = FormData::new()
            .with("noivo1.nomeCompleto", "Ana Silva")
            .with("noivo1.cpf", "12345678900")
            .with("filhosComuns[1].nomeCompleto", "Bia")
            .with("regimeBens", "Comunhão Parcial de Bens");

        let value = flatten(&form, &FlattenOptions::new());

        assert_eq!(text(&value, "noivo1.nomeCompleto").as_deref(), Some("Ana Silva"));
        assert_eq!(text(&value, "filhosComuns.1.nomeCompleto").as_deref(), Some("Bia"));
        let children = value.get("filhosComuns").and_then(FormValue::as_list).unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0], FormValue::empty_map());
    }

    #[test]
    fn bracket_suffix_appends_to_list() {
        let form = FormData::new()
            .with("documentosConvivente1Urls[]", "rg.pdf")
            .with("documentosConvivente1Urls[]", "cpf.pdf");

        let value = flatten(&form, &FlattenOptions::new());
        let docs = value
            .get("documentosConvivente1Urls")
            .and_then(FormValue::as_list)
            .unwrap();
        assert_eq!(
            docs,
            &[
                FormValue::Text("rg.pdf".to_string()),
                FormValue::Text("cpf.pdf".to_string())
            ]
        );
    }

    #[test]
    fn empty_values_for_declared_fields_become_absent() {
        let form = FormData::new()
            .with("falecido.cpf", "")
            .with("falecido.nomeCompleto", "");
        let options = FlattenOptions::new().absent_when_empty(&["cpf"]);

        let value = flatten(&form, &options);

        assert!(value.get_path("falecido.cpf").is_none());
        assert_eq!(text(&value, "falecido.nomeCompleto").as_deref(), Some(""));
    }

    #[test]
    fn non_numeric_values_for_declared_fields_become_absent() {
        let form = FormData::new()
            .with("natimorto.pesoAoNascerGramas", "abc")
            .with("natimorto.tempoGestacaoSemanas", " 32 ")
            .with("mae.idadeEpocaParto", "NaN");
        let options = FlattenOptions::new()
            .absent_when_not_numeric(&["pesoAoNascerGramas", "tempoGestacaoSemanas", "idadeEpocaParto"]);

        let value = flatten(&form, &options);

        assert!(value.get_path("natimorto.pesoAoNascerGramas").is_none());
        assert!(value.get_path("mae.idadeEpocaParto").is_none());
        assert_eq!(
            text(&value, "natimorto.tempoGestacaoSemanas").as_deref(),
            Some(" 32 ")
        );
    }

    #[test]
    fn later_structural_key_replaces_scalar() {
        let form = FormData::new()
            .with("pai", "texto solto")
            .with("pai.nomeCompleto", "José");

        let value = flatten(&form, &FlattenOptions::new());
        assert_eq!(text(&value, "pai.nomeCompleto").as_deref(), Some("José"));
    }

    #[test]
    fn out_of_range_index_is_skipped() {
        let form = FormData::new().with("filhosComuns[100000].nomeCompleto", "X");
        let value = flatten(&form, &FlattenOptions::new());
        assert!(value.get("filhosComuns").is_none());
    }

    #[test]
    fn array_paths_drop_blank_items_and_empty_lists() {
        let form = FormData::new()
            .with("filhosComuns[0].nomeCompleto", "")
            .with("filhosComuns[0].dataNascimento", "")
            .with("filhosComuns[1].nomeCompleto", "Caio")
            .with("outros[0].nome", "");
        let options = FlattenOptions::new().array_paths(&["filhosComuns", "outros"]);

        let value = flatten(&form, &options);

        let children = value.get("filhosComuns").and_then(FormValue::as_list).unwrap();
        assert_eq!(children.len(), 1);
        assert!(value.get("outros").is_none());
    }
}
