pub mod build_info;

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Directive used when neither `RUST_LOG` nor the config names one.
pub const DEFAULT_LOG_DIRECTIVE: &str = "budgetcraft=info";

static TRACING_INIT: Once = Once::new();

/// Installs the global subscriber once. `RUST_LOG` wins over `directive`.
pub fn init_tracing(directive: Option<&str>) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(directive.unwrap_or(DEFAULT_LOG_DIRECTIVE))
        });

        // Another subscriber may already be installed by the host process.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
