//! Host services for the native runner: logging setup and frame pacing.

use std::time::Duration;

use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

use crate::formatter::FrameFormatter;

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber: frame-stamped lines on stderr, filtered by `RUST_LOG`.
pub fn init_logging() -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .event_format(FrameFormatter),
        )
        .with(filter)
        .with(ErrorLayer::default())
        .try_init()
}

/// Waits out the rest of a frame. Spins for precision unless the host is idle.
pub fn sleep(duration: Duration, precise: bool) {
    if precise {
        spin_sleep::sleep(duration);
    } else {
        std::thread::sleep(duration);
    }
}
