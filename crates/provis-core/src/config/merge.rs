//! Layered deep merge of configuration documents

use crate::document::Document;

/// Deep-merge each override onto `base`, in list order.
///
/// For every key, nested mappings present on both sides are merged
/// recursively; any other value in the override replaces the accumulated one
/// outright. Later overrides therefore win over earlier ones at every
/// nesting level.
pub fn merge(base: Document, overrides: &[Document]) -> Document {
    overrides.iter().fold(base, |mut acc, layer| {
        acc.merge(layer);
        acc
    })
}
