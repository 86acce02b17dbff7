// src/registry.rs
//! The enabled-pieces registry: a process-wide on/off toggle list for the
//! catalog, shared between concurrent callers.

use std::collections::BTreeSet;
use std::sync::RwLock;

use log::info;

use crate::error::ArtError;
use crate::pieces;

/// Which catalog pieces are currently enabled.
///
/// Writes are last-writer-wins. The one invariant is that the set can never
/// become empty: a write that would disable every piece is rejected.
#[derive(Debug)]
pub struct EnabledPieces {
    enabled: RwLock<BTreeSet<String>>,
}

impl EnabledPieces {
    /// Start with every catalog piece enabled.
    pub fn all() -> Self {
        let enabled = pieces::names().iter().map(|s| s.to_string()).collect();
        Self {
            enabled: RwLock::new(enabled),
        }
    }

    /// Start from an explicit list. Empty input is rejected.
    pub fn from_names<I, S>(names: I) -> Result<Self, ArtError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let enabled: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if enabled.is_empty() {
            return Err(ArtError::EmptyRegistry);
        }
        Ok(Self {
            enabled: RwLock::new(enabled),
        })
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled
            .read()
            .expect("registry lock poisoned")
            .contains(name)
    }

    /// Snapshot of the enabled names, sorted.
    pub fn snapshot(&self) -> Vec<String> {
        self.enabled
            .read()
            .expect("registry lock poisoned")
            .iter()
            .cloned()
            .collect()
    }

    pub fn enable(&self, name: &str) {
        let mut set = self.enabled.write().expect("registry lock poisoned");
        if set.insert(name.to_string()) {
            info!("enabled piece {name:?}");
        }
    }

    /// Disable one piece; refuses to empty the registry.
    pub fn disable(&self, name: &str) -> Result<(), ArtError> {
        let mut set = self.enabled.write().expect("registry lock poisoned");
        if set.contains(name) && set.len() == 1 {
            return Err(ArtError::EmptyRegistry);
        }
        if set.remove(name) {
            info!("disabled piece {name:?}");
        }
        Ok(())
    }

    /// Replace the whole set; refuses an empty replacement.
    pub fn replace<I, S>(&self, names: I) -> Result<(), ArtError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if next.is_empty() {
            return Err(ArtError::EmptyRegistry);
        }
        *self.enabled.write().expect("registry lock poisoned") = next;
        Ok(())
    }
}

impl Default for EnabledPieces {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_the_whole_catalog() {
        let registry = EnabledPieces::all();
        assert!(registry.is_enabled("circles"));
        assert_eq!(registry.snapshot().len(), pieces::names().len());
    }

    #[test]
    fn cannot_disable_the_last_piece() {
        let registry = EnabledPieces::from_names(["circles"]).unwrap();
        assert!(matches!(
            registry.disable("circles"),
            Err(ArtError::EmptyRegistry)
        ));
        assert!(registry.is_enabled("circles"));
    }

    #[test]
    fn cannot_replace_with_nothing() {
        let registry = EnabledPieces::all();
        let names: [&str; 0] = [];
        assert!(matches!(
            registry.replace(names),
            Err(ArtError::EmptyRegistry)
        ));
    }

    #[test]
    fn disable_then_enable_round_trips() {
        let registry = EnabledPieces::all();
        registry.disable("walk").unwrap();
        assert!(!registry.is_enabled("walk"));
        registry.enable("walk");
        assert!(registry.is_enabled("walk"));
    }
}
