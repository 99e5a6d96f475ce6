//! Which datatype combinations a dispatch table registers.

use crate::types::Datatype;

/// Classification of a dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Coverage {
    /// Every operand has the same datatype.
    Homogeneous,
    /// Operands share a precision but mix real and complex.
    MixedDomain,
    /// Operands mix single and double precision.
    MixedPrecision,
}

impl Coverage {
    /// Classify a dispatch key.
    pub fn of(key: &[Datatype]) -> Self {
        let Some((first, rest)) = key.split_first() else {
            return Coverage::Homogeneous;
        };
        if rest.iter().all(|dt| dt == first) {
            Coverage::Homogeneous
        } else if rest.iter().all(|dt| dt.precision() == first.precision()) {
            Coverage::MixedDomain
        } else {
            Coverage::MixedPrecision
        }
    }
}

/// Mixed-type support handed to the table constructors.
///
/// A config can only narrow what the build compiled: asking for a tier whose
/// Cargo feature is off leaves it disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    mixed_domain: bool,
    mixed_precision: bool,
}

impl DispatchConfig {
    /// Homogeneous combinations only.
    pub const fn homogeneous() -> Self {
        DispatchConfig {
            mixed_domain: false,
            mixed_precision: false,
        }
    }

    /// Everything the `mixed-domain` / `mixed-precision` features compiled in.
    pub const fn from_features() -> Self {
        DispatchConfig {
            mixed_domain: cfg!(feature = "mixed-domain"),
            mixed_precision: cfg!(feature = "mixed-precision"),
        }
    }

    pub fn with_mixed_domain(mut self, enable: bool) -> Self {
        if enable && !cfg!(feature = "mixed-domain") {
            log::warn!("mixed-domain dispatch requested but the `mixed-domain` feature is off");
        }
        self.mixed_domain = enable && cfg!(feature = "mixed-domain");
        if !self.mixed_domain {
            self.mixed_precision = false;
        }
        self
    }

    /// Enabling mixed precision also enables mixed domain, since the full set
    /// of combinations includes the same-precision ones.
    pub fn with_mixed_precision(mut self, enable: bool) -> Self {
        if enable && !cfg!(feature = "mixed-precision") {
            log::warn!("mixed-precision dispatch requested but the `mixed-precision` feature is off");
        }
        self.mixed_precision = enable && cfg!(feature = "mixed-precision");
        if self.mixed_precision {
            self.mixed_domain = true;
        }
        self
    }

    pub fn mixed_domain(&self) -> bool {
        self.mixed_domain
    }

    pub fn mixed_precision(&self) -> bool {
        self.mixed_precision
    }

    /// Widest tier this config registers.
    pub fn tier(&self) -> Coverage {
        if self.mixed_precision {
            Coverage::MixedPrecision
        } else if self.mixed_domain {
            Coverage::MixedDomain
        } else {
            Coverage::Homogeneous
        }
    }

    pub fn covers(&self, key: &[Datatype]) -> bool {
        Coverage::of(key) <= self.tier()
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self::from_features()
    }
}
