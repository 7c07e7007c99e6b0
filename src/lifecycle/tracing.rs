//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter driven by `RUST_LOG`.
//! When `RUST_LOG` is unset it falls back to [`DEFAULT_FILTER`].
//!
//! ```bash
//! # Default: placements, transitions, connects and HTTP requests
//! cargo run
//!
//! # Full payloads and every published event
//! RUST_LOG=order_relay=debug,actor_framework=debug cargo run
//! ```
//!
//! Entry points log the full payload once at `debug` (`debug!(?order, "place called")`);
//! everything else stays on short structured fields such as `order_id`, `station` and `size`.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "order_relay=info,actor_framework=info,tower_http=info";

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type and span names identify the source
        .compact()
        .init();
}
