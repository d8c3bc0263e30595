use super::{
    expiration::{middleware::*, *},
    service::*,
};

use {std::sync::*, tower::*};

//
// PageExpirationLayer
//

/// Page expiration layer for HTTP responses.
///
/// This layer configures and installs a [PageExpirationService], which
/// finalizes the `Cache-Control` header of every cache-policy-aware response
/// from a layered lifetime policy:
///
/// 1. An upstream-decided lifetime (the `XX-Cache-Lifetime` response header)
///    wins; otherwise the request path selects between the alternative and
///    default lifetimes of the [CacheLifetimeConfig].
/// 2. A 301, 302, 403 or 404 status overrides the result unconditionally.
///    403 is never cacheable.
/// 3. Registered [LifetimeHook]s may replace the value, in order.
/// 4. The request and response policies plus the final max-age decide
///    between `"public, max-age=..."` and `"no-cache, must-revalidate"`.
///
/// Usage notes
/// ===========
///
/// 1. The layer only ever sets the `Cache-Control` header; everything else
///    in the response is passed through as is.
///
/// 2. Responses that do not support variable cache headers (JSON APIs,
///    streams) declare so via an `XX-Cache-Variable: false` response header
///    and are passed through untouched, silently. You can flip this into an
///    opt-in scheme with [variable_by_default](Self::variable_by_default).
///    Sub-requests marked with the [SubRequest] request extension are
///    likewise passed through.
///
/// 3. The request policy chain must produce an explicit allow for a response
///    to be cacheable, so register at least one allowing rule, such as
///    [NoSessionCookie]. The response policy chain is a blocklist: only an
///    explicit deny matters.
///
/// 4. All `XX-*` control headers are removed before the response is sent
///    downstream.
#[derive(Clone)]
pub struct PageExpirationLayer {
    configuration: MiddlewareConfiguration,
}

impl PageExpirationLayer {
    /// Constructor.
    pub fn new(lifetimes: CacheLifetimeConfig) -> Self {
        Self {
            configuration: MiddlewareConfiguration::new(lifetimes),
        }
    }

    /// Add a request policy rule.
    ///
    /// Rules are checked in registration order; any deny wins, and at least
    /// one rule must allow for responses to be cacheable.
    pub fn request_policy(mut self, rule: impl RequestPolicy + 'static) -> Self {
        self.configuration.request_policy = self.configuration.request_policy.with(rule);
        self
    }

    /// Add a response policy rule.
    ///
    /// Rules are checked in registration order; only an explicit deny blocks
    /// caching.
    pub fn response_policy(mut self, rule: impl ResponsePolicy + 'static) -> Self {
        self.configuration.response_policy = self.configuration.response_policy.with(rule);
        self
    }

    /// Add a lifetime hook.
    ///
    /// Hooks run in registration order after the lifetime is resolved; each
    /// receives the running candidate and the fixed pre-hook value.
    pub fn hook(mut self, hook: impl LifetimeHook + 'static) -> Self {
        self.configuration.hooks.push(Arc::new(hook));
        self
    }

    /// If a response does not specify the `XX-Cache-Variable` header then we
    /// will assume its value is this.
    ///
    /// The default is true.
    pub fn variable_by_default(mut self, variable_by_default: bool) -> Self {
        self.configuration.variable_by_default = variable_by_default;
        self
    }
}

impl<InnerServiceT> Layer<InnerServiceT> for PageExpirationLayer {
    type Service = PageExpirationService<InnerServiceT>;

    fn layer(&self, inner_service: InnerServiceT) -> Self::Service {
        PageExpirationService::new(inner_service, self.configuration.clone())
    }
}
