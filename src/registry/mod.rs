//! Level Registry
//!
//! Process-wide table of named severity levels. Built-ins are present from
//! the start; custom levels are added at runtime and never removed.

pub mod error;
pub mod policy;

pub use error::RegistryError;
pub use policy::{DuplicatePolicy, RegistryPolicy, UnknownLevelPolicy};

use crate::domain::{Color, Importance, Level, LevelSpec};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info};

static GLOBAL: LazyLock<Arc<LevelRegistry>> = LazyLock::new(|| Arc::new(LevelRegistry::new()));

/// Color given to levels created by auto-registration.
pub const AUTO_REGISTER_COLOR: Color = Color::Green;

/// Importance given to levels created by auto-registration (same as INFO).
pub const AUTO_REGISTER_IMPORTANCE: Importance = 0;

struct RegistryState {
    /// Canonical (upper case) name -> level
    levels: HashMap<String, Level>,
    policy: RegistryPolicy,
}

/// Mutual-exclusion guarded mapping from canonical name to [`Level`].
///
/// Lookups share a read lock. Every insertion re-checks for the name under
/// the write lock, so concurrent registrations of one name produce exactly
/// one level.
pub struct LevelRegistry {
    state: RwLock<RegistryState>,
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelRegistry {
    /// Create a registry holding the built-ins, with the default policy.
    pub fn new() -> Self {
        Self::with_policy(RegistryPolicy::default())
    }

    pub fn with_policy(policy: RegistryPolicy) -> Self {
        let levels = Level::BUILTINS
            .iter()
            .map(|level| (level.name().to_string(), level.clone()))
            .collect();

        Self {
            state: RwLock::new(RegistryState { levels, policy }),
        }
    }

    /// The process-wide registry used by loggers built without an explicit one.
    pub fn global() -> Arc<LevelRegistry> {
        Arc::clone(&GLOBAL)
    }

    pub fn policy(&self) -> RegistryPolicy {
        self.state.read().policy
    }

    pub fn set_policy(&self, policy: RegistryPolicy) {
        self.state.write().policy = policy;
    }

    /// Register a custom level.
    ///
    /// The name is canonicalized to upper case. Without an explicit
    /// importance the level is placed one above the highest importance
    /// registered so far, ERROR excluded.
    pub fn register(
        &self,
        name: &str,
        color: Color,
        importance: Option<Importance>,
    ) -> Result<Level, RegistryError> {
        let canonical = Level::canonical_name(name);
        if canonical.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if Level::is_builtin_name(&canonical) {
            return Err(RegistryError::ReservedLevel { name: canonical });
        }

        let mut state = self.state.write();

        let existed = state.levels.contains_key(&canonical);
        if existed && state.policy.on_duplicate == DuplicatePolicy::Reject {
            return Err(RegistryError::DuplicateLevel { name: canonical });
        }

        let importance = importance.unwrap_or_else(|| next_importance(&state.levels));
        let level = Level::custom(canonical.clone(), color, importance);
        state.levels.insert(canonical, level.clone());

        if existed {
            info!(log_level = %level, importance, color = %color, "Overwrote log level");
        } else {
            debug!(log_level = %level, importance, color = %color, "Registered log level");
        }

        Ok(level)
    }

    /// Resolve the level argument of a call. `Bare` resolves to `None`.
    pub fn resolve(&self, spec: &LevelSpec) -> Result<Option<Level>, RegistryError> {
        match spec {
            LevelSpec::Bare => Ok(None),
            LevelSpec::Level(level) => Ok(Some(level.clone())),
            LevelSpec::Name(name) => self.resolve_name(name).map(Some),
        }
    }

    /// Case-insensitive lookup, applying the unknown-level policy on a miss.
    pub fn resolve_name(&self, name: &str) -> Result<Level, RegistryError> {
        let canonical = Level::canonical_name(name);
        if canonical.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let policy = {
            let state = self.state.read();
            if let Some(level) = state.levels.get(&canonical) {
                return Ok(level.clone());
            }
            state.policy
        };

        match policy.on_unknown {
            UnknownLevelPolicy::Reject => Err(RegistryError::UnknownLevel { name: canonical }),
            UnknownLevelPolicy::AutoRegister => {
                let mut state = self.state.write();
                let level = state
                    .levels
                    .entry(canonical.clone())
                    .or_insert_with(|| {
                        debug!(log_level = %canonical, "Auto-registered log level");
                        Level::custom(
                            canonical.clone(),
                            AUTO_REGISTER_COLOR,
                            AUTO_REGISTER_IMPORTANCE,
                        )
                    })
                    .clone();
                Ok(level)
            }
        }
    }

    /// Lookup without side effects.
    pub fn get(&self, name: &str) -> Option<Level> {
        self.state
            .read()
            .levels
            .get(&Level::canonical_name(name))
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state
            .read()
            .levels
            .contains_key(&Level::canonical_name(name))
    }

    /// All levels, least severe first.
    pub fn levels(&self) -> Vec<Level> {
        let mut levels: Vec<Level> = self.state.read().levels.values().cloned().collect();
        levels.sort_by(|a, b| {
            a.importance()
                .cmp(&b.importance())
                .then_with(|| a.name().cmp(b.name()))
        });
        levels
    }

    pub fn len(&self) -> usize {
        self.state.read().levels.len()
    }

    /// Always false: the built-ins cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.state.read().levels.is_empty()
    }
}

fn next_importance(levels: &HashMap<String, Level>) -> Importance {
    levels
        .values()
        .map(Level::importance)
        .filter(|importance| *importance < Level::ERROR.importance())
        .max()
        .unwrap_or(Level::INFO.importance())
        .saturating_add(1)
}

/// Register a level in the process-wide registry.
pub fn register_level(
    name: &str,
    color: Color,
    importance: Option<Importance>,
) -> Result<Level, RegistryError> {
    GLOBAL.register(name, color, importance)
}
