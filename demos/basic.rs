mod utils;

use {
    ::axum::{routing::*, *},
    tokio::{net::*, *},
    tower_http::trace::*,
    tower_http_page_expiration::{expiration::*, *},
};

// Axum server with the page expiration middleware for Tower
//
// Pay attention to the tracing log to see the Cache-Control decisions!
//
// You can send requests from a web browser or via CLI. Some fun examples:
//
//   curl --verbose http://localhost:8080
//
//   curl --verbose http://localhost:8080/node/1
//
//   curl --verbose http://localhost:8080/missing
//
//   curl --verbose --request POST http://localhost:8080
//
//   curl --verbose --cookie 'SESSd41d8cd9=abc' http://localhost:8080

const DEFAULT_LIFETIME: u64 = 300; // 5 minutes

const ALTERNATIVE_LIFETIME: u64 = 60;

#[main]
async fn main() {
    utils::init_tracing();

    // The lifetime configuration would usually come from a ConfigurationSource

    let lifetimes = CacheLifetimeConfig::new(
        vec!["/node/*".into()],
        ALTERNATIVE_LIFETIME,
        DEFAULT_LIFETIME,
        StatusLifetimes {
            moved_permanently: 3600,
            found: 60,
            not_found: 60,
        },
    )
    .expect("valid path patterns");

    // All you need to do is add our layer to the router

    let router = Router::default()
        .route("/", get(("Hello, world!\n",)))
        .route("/node/{id}", get(("A node\n",)))
        .layer(
            PageExpirationLayer::new(lifetimes)
                .request_policy(SafeMethod)
                .request_policy(NoSessionCookie::default())
                .response_policy(DenyOnSetCookie),
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
