/*
 * Name Resolution
 *
 * Maps capability and requirement names of a component type to the
 * identifiers used by one node instance. Names without a mapping are
 * dropped.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::models::{IdSet, Ident};

/// Name mapping for one node instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NameResolver {
    /// Pass every name through unchanged
    #[serde(default)]
    identity: bool,

    #[serde(default)]
    capabilities: BTreeMap<Ident, Ident>,

    #[serde(default)]
    requirements: BTreeMap<Ident, Ident>,
}

impl NameResolver {
    /// Resolver without mappings (drops every name)
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver keeping names as they are
    pub fn identity() -> Self {
        Self {
            identity: true,
            ..Self::default()
        }
    }

    pub fn capability(mut self, from: impl Into<Ident>, to: impl Into<Ident>) -> Self {
        self.capabilities.insert(from.into(), to.into());
        self
    }

    pub fn requirement(mut self, from: impl Into<Ident>, to: impl Into<Ident>) -> Self {
        self.requirements.insert(from.into(), to.into());
        self
    }

    pub fn resolve_capabilities(&self, names: &IdSet) -> IdSet {
        self.resolve_set(names, &self.capabilities)
    }

    pub fn resolve_requirements(&self, names: &IdSet) -> IdSet {
        self.resolve_set(names, &self.requirements)
    }

    /// Rename the requirement keys of a map, dropping unmapped keys
    pub fn resolve_requirement_keys<V: Clone>(
        &self,
        map: &BTreeMap<Ident, V>,
    ) -> BTreeMap<Ident, V> {
        map.iter()
            .filter_map(|(name, value)| {
                self.lookup(name, &self.requirements)
                    .map(|resolved| (resolved, value.clone()))
            })
            .collect()
    }

    fn resolve_set(&self, names: &IdSet, mapping: &BTreeMap<Ident, Ident>) -> IdSet {
        names
            .iter()
            .filter_map(|name| self.lookup(name, mapping))
            .collect()
    }

    fn lookup(&self, name: &str, mapping: &BTreeMap<Ident, Ident>) -> Option<Ident> {
        if self.identity {
            return Some(name.to_string());
        }
        match mapping.get(name) {
            Some(resolved) => Some(resolved.clone()),
            None => {
                tracing::warn!("Did not find name for {}, dropping it", name);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_keeps_names() {
        let names = IdSet::of(["host", "db"]);
        assert_eq!(NameResolver::identity().resolve_requirements(&names), names);
    }

    #[test]
    fn test_unmapped_names_dropped() {
        let resolver = NameResolver::new()
            .requirement("host", "web_host")
            .capability("endpoint", "http");

        assert_eq!(
            resolver.resolve_requirements(&IdSet::of(["host", "db"])),
            IdSet::of(["web_host"])
        );
        assert_eq!(
            resolver.resolve_capabilities(&IdSet::of(["endpoint", "host"])),
            IdSet::of(["http"])
        );
    }

    #[test]
    fn test_requirement_keys() {
        let resolver = NameResolver::new().requirement("db", "orders_db");
        let row: BTreeMap<Ident, String> = [
            ("db".to_string(), "stopped".to_string()),
            ("host".to_string(), "gone".to_string()),
        ]
        .into_iter()
        .collect();

        let resolved = resolver.resolve_requirement_keys(&row);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved["orders_db"], "stopped");
    }

    #[test]
    fn test_deserialize_mapping() {
        let resolver: NameResolver =
            serde_yaml::from_str("requirements:\n  host: web_host\n").unwrap();
        assert_eq!(
            resolver.resolve_requirements(&IdSet::of(["host"])),
            IdSet::of(["web_host"])
        );
    }
}
