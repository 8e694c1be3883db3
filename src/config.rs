//! # CPU Configuration
//!
//! Construction-time options for the core. Everything here is fixed for the life
//! of a CPU except `batch_cycles`, which the host may retune between runs.

/// How zero-page address computations that exceed 0xFF are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZeroPagePolicy {
    /// Raise `AddressRangeViolation` (the historical behavior of this core).
    #[default]
    Fault,

    /// Wrap modulo 256 within the zero page, as the silicon does.
    Wrap,
}

/// Default cycle budget for one continuous-run batch.
pub const DEFAULT_BATCH_CYCLES: u64 = 10_000;

/// CPU construction options.
///
/// # Examples
///
/// ```
/// use core6502::{CpuConfig, ZeroPagePolicy};
///
/// let config = CpuConfig::default()
///     .with_compatibility(true)
///     .with_zero_page_policy(ZeroPagePolicy::Wrap)
///     .with_batch_cycles(17_030);
///
/// assert!(config.compatibility);
/// assert_eq!(config.batch_cycles, 17_030);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CpuConfig {
    /// Reproduce the NMOS `JMP ($xxFF)` page-wrap bug.
    pub compatibility: bool,

    /// Overflow handling for zero-page indexed addressing.
    pub zero_page_policy: ZeroPagePolicy,

    /// Minimum cycles executed per continuous-run batch.
    pub batch_cycles: u64,
}

impl CpuConfig {
    pub fn with_compatibility(mut self, compatibility: bool) -> Self {
        self.compatibility = compatibility;
        self
    }

    pub fn with_zero_page_policy(mut self, policy: ZeroPagePolicy) -> Self {
        self.zero_page_policy = policy;
        self
    }

    /// Sets the batch size. A zero budget is raised to one cycle so a batch
    /// always makes progress.
    pub fn with_batch_cycles(mut self, batch_cycles: u64) -> Self {
        self.batch_cycles = batch_cycles.max(1);
        self
    }
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            compatibility: false,
            zero_page_policy: ZeroPagePolicy::Fault,
            batch_cycles: DEFAULT_BATCH_CYCLES,
        }
    }
}
