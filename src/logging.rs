//! Opt-in logging bootstrap.
//!
//! The hashing core is silent; only the streaming adapters in
//! [`crate::stream`] emit events (`debug!` per source, `trace!` per
//! chunk). A library must not install a global subscriber on its own,
//! so nothing here runs unless the embedding application asks for it.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Filter applied when `RUST_LOG` is unset: per-source `debug!` events
/// are shown, per-chunk `trace!` spam stays off.
const DEFAULT_DIRECTIVE: &str = "ctph=debug";

/// Installs a global subscriber that prints this crate's I/O events to
/// stderr.
///
/// `RUST_LOG` overrides the default filter. Repeated calls are no-ops,
/// as is calling it after the host application installed its own
/// subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
