//! Decoding of list documents
//!
//! A file handed to podcheck holds either a typed list (`PodList`,
//! `NamespaceList`) or a generic `List` whose items each declare their own
//! kind. Both shapes decode into the same `Vec<K>`.

use std::path::Path;

use k8s_openapi::{ListableResource, Resource};
use serde::de::DeserializeOwned;
use serde_yaml::Value;

use crate::error::{Result, SourceError};

/// Kind of the heterogeneous list used by `kubectl get -o yaml` on mixed output
const GENERIC_LIST_KIND: &str = "List";

/// Decode a YAML (or JSON) list document into objects of kind `K`
///
/// Items are decoded one at a time so a bad item is reported by its index.
pub fn decode_list<K>(path: &Path, data: &str) -> Result<Vec<K>>
where
    K: Resource + ListableResource + DeserializeOwned,
{
    let doc: Value = serde_yaml::from_str(data)
        .map_err(|e| SourceError::decode(path, format!("invalid document: {e}")))?;

    let list_kind = match doc.get("kind") {
        None | Some(Value::Null) => "",
        Some(Value::String(kind)) => kind.as_str(),
        Some(other) => {
            return Err(SourceError::decode(
                path,
                format!("kind is not a string: {}", describe(other)),
            ));
        }
    };
    let generic = match list_kind {
        k if k == K::LIST_KIND => false,
        GENERIC_LIST_KIND => true,
        "" => {
            return Err(SourceError::decode(
                path,
                format!("expected {} or {}, got no kind", K::LIST_KIND, GENERIC_LIST_KIND),
            ));
        }
        other => {
            return Err(SourceError::decode(
                path,
                format!("expected {} or {}, got {}", K::LIST_KIND, GENERIC_LIST_KIND, other),
            ));
        }
    };

    let items = match doc.get("items") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Sequence(items)) => items,
        Some(_) => return Err(SourceError::decode(path, "items is not a sequence")),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| decode_item::<K>(path, index, item, generic))
        .collect()
}

/// Decode one list item, checking its declared kind first
///
/// Items of a generic list must declare a kind; items of a typed list may omit it.
fn decode_item<K>(path: &Path, index: usize, item: &Value, require_kind: bool) -> Result<K>
where
    K: Resource + DeserializeOwned,
{
    match item.get("kind") {
        Some(Value::String(kind)) if kind != K::KIND => {
            return Err(SourceError::decode(
                path,
                format!("item {index}: expected kind {}, got {kind}", K::KIND),
            ));
        }
        None | Some(Value::Null) if require_kind => {
            return Err(SourceError::decode(
                path,
                format!("item {index}: missing kind, expected {}", K::KIND),
            ));
        }
        Some(Value::String(_)) | None | Some(Value::Null) => {}
        Some(other) => {
            return Err(SourceError::decode(
                path,
                format!("item {index}: kind is not a string: {}", describe(other)),
            ));
        }
    }

    serde_yaml::from_value(item.clone())
        .map_err(|e| SourceError::decode(path, format!("item {index}: {e}")))
}

/// Render a YAML value inline for error messages
fn describe(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{value:?}"))
}
