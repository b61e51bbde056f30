//! Ordered registry of service states for one configuration session.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::catalog;
use super::state::ServiceState;
use crate::domain::AppError;

/// Ordered mapping of service key to state.
///
/// Keys are unique and keep catalogue declaration order, which drives
/// processing and display order everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceRegistry {
    entries: Vec<(String, ServiceState)>,
}

impl ServiceRegistry {
    /// Registry seeded from the canonical catalogue.
    pub fn defaults() -> Self {
        let entries = catalog::default_descriptors()
            .into_iter()
            .map(|(key, descriptor)| (key, ServiceState::new(descriptor)))
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&ServiceState> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, state)| state)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ServiceState> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, state)| state)
    }

    /// Like [`get_mut`](Self::get_mut) but reports the available keys on a miss.
    pub fn require_mut(&mut self, key: &str) -> Result<&mut ServiceState, AppError> {
        if self.get(key).is_none() {
            return Err(AppError::UnknownService {
                name: key.to_string(),
                available: self.keys().collect::<Vec<_>>().join(", "),
            });
        }
        self.get_mut(key).ok_or_else(|| AppError::config_error("registry lookup failed"))
    }

    pub fn require(&self, key: &str) -> Result<&ServiceState, AppError> {
        self.get(key).ok_or_else(|| AppError::UnknownService {
            name: key.to_string(),
            available: self.keys().collect::<Vec<_>>().join(", "),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ServiceState)> {
        self.entries.iter().map(|(k, state)| (k.as_str(), state))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut ServiceState)> {
        self.entries.iter_mut().map(|(k, state)| (k.as_str(), state))
    }

    /// Restore catalogue descriptors for known keys, then reset reuse flags
    /// the descriptors forbid. Returns the keys whose reuse flag was reset.
    ///
    /// Descriptors read back from disk are not trusted: the catalogue decides
    /// defaults, health endpoints, and whether a service may be reused.
    pub fn anchor_to_catalogue(&mut self) -> Vec<String> {
        self.entries
            .iter_mut()
            .filter_map(|(key, state)| {
                if let Some(descriptor) = catalog::descriptor(key) {
                    state.replace_descriptor(descriptor);
                }
                state.enforce_reuse_policy().then(|| key.clone())
            })
            .collect()
    }
}

impl Serialize for ServiceRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, state) in &self.entries {
            map.serialize_entry(key, state)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ServiceRegistry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RegistryVisitor;

        impl<'de> Visitor<'de> for RegistryVisitor {
            type Value = ServiceRegistry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of service key to service state")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut registry = ServiceRegistry::default();
                while let Some((key, state)) = access.next_entry::<String, ServiceState>()? {
                    if registry.contains(&key) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate service key '{}'",
                            key
                        )));
                    }
                    registry.entries.push((key, state));
                }
                Ok(registry)
            }
        }

        deserializer.deserialize_map(RegistryVisitor)
    }
}
