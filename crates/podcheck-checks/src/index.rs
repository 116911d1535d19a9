use std::collections::HashMap;

use tracing::debug;

use podcheck_types::NamespaceInfo;

/// Lookup from namespace name to namespace
#[derive(Clone, Debug, Default)]
pub struct NamespaceIndex {
    by_name: HashMap<String, NamespaceInfo>,
}

impl NamespaceIndex {
    /// Build the index in one pass; a repeated name replaces the earlier entry
    pub fn new<I>(namespaces: I) -> Self
    where
        I: IntoIterator<Item = NamespaceInfo>,
    {
        let mut by_name = HashMap::new();
        for ns in namespaces {
            if let Some(previous) = by_name.insert(ns.name.clone(), ns) {
                debug!(namespace = %previous.name, "Duplicate namespace, keeping the later one");
            }
        }
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&NamespaceInfo> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl FromIterator<NamespaceInfo> for NamespaceIndex {
    fn from_iter<I: IntoIterator<Item = NamespaceInfo>>(iter: I) -> Self {
        Self::new(iter)
    }
}
