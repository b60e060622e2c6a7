#![forbid(unsafe_code)]

//! Env-gated scheduler tracing to stderr.
//!
//! Set `FOLIO_DEBUG_TRACE=1` to print every timer arm/cancel and frame
//! cancel with a millisecond timestamp. When unset the macro reduces to one
//! static bool load.
//!
//! ```ignore
//! use folio_runtime::debug_trace;
//! debug_trace!("timer armed: {:?}", name);
//! ```

use std::sync::LazyLock;

use web_time::Instant;

static DEBUG_TRACE_ENABLED: LazyLock<bool> = LazyLock::new(|| {
    std::env::var("FOLIO_DEBUG_TRACE")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
});

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Whether `FOLIO_DEBUG_TRACE` is set.
#[inline]
pub fn is_enabled() -> bool {
    *DEBUG_TRACE_ENABLED
}

/// Wall-clock milliseconds since first use.
#[inline]
pub fn elapsed_ms() -> u64 {
    START_TIME.elapsed().as_millis() as u64
}

/// Print a timestamped line to stderr when `FOLIO_DEBUG_TRACE=1`.
#[macro_export]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        if $crate::debug_trace::is_enabled() {
            eprintln!(
                "[FOLIO {:>8}ms] {}",
                $crate::debug_trace::elapsed_ms(),
                format_args!($($arg)*)
            );
        }
    };
}
