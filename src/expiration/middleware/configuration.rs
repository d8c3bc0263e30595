use super::super::{configuration::*, hooks::*, policy::*};

//
// MiddlewareConfiguration
//

/// Page expiration middleware configuration.
#[derive(Clone)]
pub struct MiddlewareConfiguration {
    /// Lifetime configuration snapshot.
    pub lifetimes: CacheLifetimeConfig,

    /// Request policy rules.
    pub request_policy: RequestPolicyChain,

    /// Response policy rules.
    pub response_policy: ResponsePolicyChain,

    /// Lifetime hooks, in registration order.
    pub hooks: LifetimeHooks,

    /// Whether responses support variable cache headers unless they declare
    /// otherwise.
    pub variable_by_default: bool,
}

impl MiddlewareConfiguration {
    /// Constructor.
    pub fn new(lifetimes: CacheLifetimeConfig) -> Self {
        Self {
            lifetimes,
            request_policy: RequestPolicyChain::default(),
            response_policy: ResponsePolicyChain::default(),
            hooks: LifetimeHooks::default(),
            variable_by_default: true,
        }
    }
}
