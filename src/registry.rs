//! Name to mode lookup
//!
//! Lookups never fail: an unknown name resolves to the rainbow mode, so callers
//! may probe names freely.

use core::fmt;

use heapless::FnvIndexMap;

use crate::mode::{ModeFault, ModeId, RenderContext};

/// Maximum number of registered names (must be a power of two)
pub const REGISTRY_CAPACITY: usize = 32;

/// Stateless user supplied render routine
pub type CustomMode = fn(&mut RenderContext<'_>) -> Result<(), ModeFault>;

/// Reference to something the engine can render
#[derive(Debug, Clone, Copy)]
pub enum ModeHandle {
    /// Built-in mode with private state kept by the engine
    Builtin(ModeId),
    /// User routine without private state
    Custom(CustomMode),
}

impl ModeHandle {
    /// Handle used whenever a lookup misses
    pub const FALLBACK: Self = Self::Builtin(ModeId::Rainbow);

    pub const fn builtin(&self) -> Option<ModeId> {
        match self {
            Self::Builtin(id) => Some(*id),
            Self::Custom(_) => None,
        }
    }
}

impl From<ModeId> for ModeHandle {
    fn from(id: ModeId) -> Self {
        Self::Builtin(id)
    }
}

/// Error returned when the registry has no room for another name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    Full,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "mode registry is full ({REGISTRY_CAPACITY} names)"),
        }
    }
}

/// Mapping from mode names to handles
#[derive(Debug, Clone)]
pub struct ModeRegistry {
    entries: FnvIndexMap<&'static str, ModeHandle, REGISTRY_CAPACITY>,
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeRegistry {
    /// Registry pre-populated with every built-in mode
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for id in ModeId::ALL {
            // Built-ins always fit: ModeId::ALL is smaller than the capacity
            let _ = registry.register(id.as_str(), ModeHandle::Builtin(id));
        }
        registry
    }

    /// Registry without any names, every lookup falls back to rainbow
    pub fn empty() -> Self {
        Self {
            entries: FnvIndexMap::new(),
        }
    }

    /// Register a name, replacing any previous handle under the same name
    pub fn register(&mut self, name: &'static str, handle: ModeHandle) -> Result<(), RegistryError> {
        self.entries
            .insert(name, handle)
            .map(|_| ())
            .map_err(|_| RegistryError::Full)
    }

    /// Exact lookup without fallback
    pub fn get(&self, name: &str) -> Option<ModeHandle> {
        self.entries.get(name).copied()
    }

    /// Resolve a name, falling back to rainbow for unknown names
    pub fn select(&self, name: &str) -> ModeHandle {
        self.get(name).unwrap_or(ModeHandle::FALLBACK)
    }

    /// Name registered for a handle, if any
    pub fn name_of(&self, id: ModeId) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, handle)| handle.builtin() == Some(id))
            .map(|(name, _)| *name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
