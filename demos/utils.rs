use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, *};

/// Initialize tracing for the demos.
///
/// Set `RUST_LOG` to override the default filter.
#[allow(dead_code)]
pub fn init_tracing() {
    registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http_page_expiration=debug")),
        )
        .with(fmt::layer())
        .init();
}
