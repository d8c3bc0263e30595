mod utils;

use {
    ::axum::{http::StatusCode, routing::*, *},
    std::time::*,
    tokio::{net::*, *},
    tower_http::trace::*,
    tower_http_page_expiration::{
        expiration::{axum::*, *},
        *,
    },
};

// (See basic.rs first)
//
// Axum server with the page expiration middleware for Tower
//
// Pay attention to the tracing log to see the Cache-Control decisions!
//
// You can send requests from a web browser or via CLI. Some fun examples:
//
//   curl --verbose http://localhost:8080
//
//   curl --verbose http://localhost:8080/fresh
//
//   curl --verbose http://localhost:8080/api/status
//
//   curl --verbose http://localhost:8080/old-home
//
//   curl --verbose http://localhost:8080/secret
//
//   curl --verbose 'http://localhost:8080/admin/settings'

const DEFAULT_LIFETIME: u64 = 300; // 5 minutes

const ALTERNATIVE_LIFETIME: u64 = 86400; // 1 day, for rarely-changing pages

// Hooks may stretch lifetimes, so cap what leaves the server
const MAX_LIFETIME: u64 = 3600;

//
// CapLifetime
//

// Lifetime hook that caps the computed max-age
struct CapLifetime(u64);

impl LifetimeHook for CapLifetime {
    fn alter(&self, candidate: u64, _original: u64) -> u64 {
        candidate.min(self.0)
    }
}

//
// DenyAdminPages
//

// Request policy rule that denies caching under /admin
struct DenyAdminPages;

impl RequestPolicy for DenyAdminPages {
    fn check(&self, context: &RequestPolicyContext) -> PolicyOutcome {
        if context.uri.path().starts_with("/admin") {
            PolicyOutcome::Deny
        } else {
            PolicyOutcome::NoOpinion
        }
    }
}

#[main]
async fn main() {
    utils::init_tracing();

    let lifetimes = CacheLifetimeConfig::new(
        vec!["/about".into(), "/docs/*".into()],
        ALTERNATIVE_LIFETIME,
        DEFAULT_LIFETIME,
        StatusLifetimes {
            moved_permanently: 86400,
            found: 60,
            not_found: 120,
        },
    )
    .expect("valid path patterns");

    let router = Router::default()
        .route("/", get(("Hello, world!\n",)))
        .route("/about", get(("All about us\n",)))
        .route(
            "/fresh",
            // An upstream-decided lifetime wins over path matching
            get(async || "Refreshed every thirty seconds\n".with_cache_lifetime(Duration::from_secs(30))),
        )
        .route(
            "/api/status",
            // JSON endpoints do not support variable cache headers
            get(async || "{\"status\":\"ok\"}\n".do_not_vary_cache()),
        )
        .route(
            "/old-home",
            get(async || (StatusCode::MOVED_PERMANENTLY, [("Location", "/")], "")),
        )
        .route("/secret", get(async || StatusCode::FORBIDDEN))
        .route("/admin/settings", get(("Settings\n",)))
        .layer(
            PageExpirationLayer::new(lifetimes)
                .request_policy(SafeMethod)
                .request_policy(DenyAdminPages)
                .request_policy(NoSessionCookie::default())
                .response_policy(DenyOnSetCookie)
                .hook(CapLifetime(MAX_LIFETIME)),
        )
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind("[::]:8080")
        .await
        .expect("TcpListener::bind");
    // If IPv6 is disabled on your machine (for shame!):
    // let listener = TcpListener::bind("0.0.0.0:8080").await.expect("bind");
    tracing::info!("bound to: {:?}", listener.local_addr());
    serve(listener, router).await.expect("axum::serve");
}
