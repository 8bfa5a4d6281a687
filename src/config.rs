//! Runtime configuration.

use std::time::Duration;

/// Default tween duration when a tween's duration cell is unset.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// Configuration for a [`MotionRuntime`](crate::MotionRuntime).
///
/// # Example
///
/// ```ignore
/// let config = RuntimeConfig::default()
///     .with_default_duration(Duration::from_millis(250))
///     .with_trace_writes(true);
/// let runtime = MotionRuntime::with_config(config);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Duration used by tweens that never had `set_duration` called.
    pub default_duration: Duration,
    /// Emit a `trace!` event for every value applied through `write`.
    pub trace_writes: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_duration: DEFAULT_DURATION,
            trace_writes: false,
        }
    }
}

impl RuntimeConfig {
    pub fn with_default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    pub fn with_trace_writes(mut self, enabled: bool) -> Self {
        self.trace_writes = enabled;
        self
    }
}
