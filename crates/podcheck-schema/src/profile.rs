//! # Validation Profiles
//!
//! Options that change how individual rules judge a value. The schema
//! itself is fixed; a profile only selects between rule variants.

/// How `resources.{requests,limits}.cpu` is judged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CpuPolicy {
    /// Any base-10 integer is accepted.
    #[default]
    AnyInteger,
    /// The integer must also be greater than zero.
    Positive,
}

/// Options for one validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationProfile {
    pub cpu: CpuPolicy,
}

impl ValidationProfile {
    /// The canonical rules.
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Canonical rules plus the legacy positive-cpu check.
    pub fn strict() -> Self {
        Self {
            cpu: CpuPolicy::Positive,
        }
    }
}
