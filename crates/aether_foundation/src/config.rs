//! Configuration for collections and their pools.

/// Selects whether invariant checks and diagnostics are active.
///
/// `Unchecked` is a strict subset of `Checked`: every successful operation
/// produces the same result, but duplicate-add detection, run gating, and
/// per-mutation re-validation are skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CheckMode {
    /// Fail fast on broken invariants and keep systems validated incrementally.
    Checked,
    /// Skip verification for speed. Callers only run systems they know are valid.
    Unchecked,
}

impl CheckMode {
    /// Returns true for [`CheckMode::Checked`].
    #[must_use]
    pub const fn is_checked(self) -> bool {
        matches!(self, Self::Checked)
    }
}

impl Default for CheckMode {
    /// `Checked` in builds with debug assertions, `Unchecked` otherwise.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Checked
        } else {
            Self::Unchecked
        }
    }
}

/// Configuration threaded through a collection at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcsConfig {
    /// Checked or unchecked behavior for the collection, its pools, and systems.
    pub checks: CheckMode,

    /// Initial dense capacity reserved by each lazily created pool.
    pub pool_capacity: usize,
}

impl Default for EcsConfig {
    fn default() -> Self {
        Self {
            checks: CheckMode::default(),
            pool_capacity: 0,
        }
    }
}

impl EcsConfig {
    /// Creates a configuration with all checks enabled.
    #[must_use]
    pub fn checked() -> Self {
        Self {
            checks: CheckMode::Checked,
            ..Self::default()
        }
    }

    /// Creates a configuration with all checks disabled.
    #[must_use]
    pub fn unchecked() -> Self {
        Self {
            checks: CheckMode::Unchecked,
            ..Self::default()
        }
    }

    /// Builder method to set the check mode.
    #[must_use]
    pub fn with_checks(mut self, checks: CheckMode) -> Self {
        self.checks = checks;
        self
    }

    /// Builder method to set the initial pool capacity.
    #[must_use]
    pub fn with_pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    /// Returns true if checks are enabled.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.checks.is_checked()
    }
}
