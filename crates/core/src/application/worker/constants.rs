// Worker constants (no magic values in the loop body)
use std::time::Duration;

/// Pause after consuming a queue entry (2s)
/// Deliberate throttle: the worker trades latency for a gentle, steady
/// drain rate.
pub const DEFAULT_PROCESS_INTERVAL: Duration = Duration::from_secs(2);

/// Pause when the queue showed empty (1s)
pub const DEFAULT_IDLE_INTERVAL: Duration = Duration::from_secs(1);

/// Sleep duration after a worker error before polling again (1s)
pub const ERROR_RECOVERY_SLEEP_DURATION: Duration = Duration::from_secs(1);

/// Upper bound on a single persist attempt (5s)
pub const PERSIST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default persist retry base delay (500ms)
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 500;

/// Default multiplier applied to the retry delay after each failure
pub const DEFAULT_BACKOFF_FACTOR: f64 = 2.0;

/// Default total persist attempts per record before dead-lettering
pub const DEFAULT_MAX_PERSIST_ATTEMPTS: u32 = 3;
