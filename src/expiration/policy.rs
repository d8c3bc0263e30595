use super::context::*;

use {
    http::{Method, StatusCode, Uri, header::*},
    std::sync::*,
};

//
// PolicyOutcome
//

/// Outcome of a cacheability policy check.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PolicyOutcome {
    /// Caching is explicitly allowed.
    Allow,

    /// Caching is explicitly denied.
    Deny,

    /// The policy has no opinion.
    NoOpinion,
}

//
// RequestPolicyContext
//

/// Context for [RequestPolicy].
#[derive(Clone, Debug)]
pub struct RequestPolicyContext<'this> {
    /// Method.
    pub method: &'this Method,

    /// URI.
    pub uri: &'this Uri,

    /// Headers.
    pub headers: &'this HeaderMap,
}

impl<'this> RequestPolicyContext<'this> {
    /// Constructor.
    pub fn new(method: &'this Method, uri: &'this Uri, headers: &'this HeaderMap) -> Self {
        Self { method, uri, headers }
    }
}

//
// ResponsePolicyContext
//

/// Context for [ResponsePolicy].
#[derive(Clone, Debug)]
pub struct ResponsePolicyContext<'this> {
    /// Response status.
    pub status: StatusCode,

    /// Response headers.
    pub headers: &'this HeaderMap,

    /// The originating request.
    pub request: RequestPolicyContext<'this>,
}

impl<'this> ResponsePolicyContext<'this> {
    /// Constructor.
    pub fn new(
        status: StatusCode,
        headers: &'this HeaderMap,
        request: RequestPolicyContext<'this>,
    ) -> Self {
        Self {
            status,
            headers,
            request,
        }
    }
}

//
// RequestPolicy
//

/// Policy rule determining the cacheability of a request.
///
/// The primary gate: at least one rule must return
/// [Allow](PolicyOutcome::Allow) for a response to be cacheable; absence of
/// opinions is not enough.
pub trait RequestPolicy: Send + Sync {
    /// Check the request.
    fn check(&self, context: &RequestPolicyContext) -> PolicyOutcome;
}

//
// ResponsePolicy
//

/// Policy rule determining the cacheability of a response.
///
/// A blocklist: only an explicit [Deny](PolicyOutcome::Deny) blocks caching.
pub trait ResponsePolicy: Send + Sync {
    /// Check the response.
    fn check(&self, context: &ResponsePolicyContext) -> PolicyOutcome;
}

//
// RequestPolicyChain
//

/// Ordered request policy rules combined into one policy.
///
/// Any deny wins immediately; otherwise the chain allows if at least one
/// rule allowed; otherwise it has no opinion. An empty chain never allows.
#[derive(Clone, Default)]
pub struct RequestPolicyChain {
    rules: Vec<Arc<dyn RequestPolicy>>,
}

impl RequestPolicyChain {
    /// Constructor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule.
    pub fn with(mut self, rule: impl RequestPolicy + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }
}

impl RequestPolicy for RequestPolicyChain {
    fn check(&self, context: &RequestPolicyContext) -> PolicyOutcome {
        let mut outcome = PolicyOutcome::NoOpinion;

        for rule in &self.rules {
            match rule.check(context) {
                PolicyOutcome::Deny => return PolicyOutcome::Deny,
                PolicyOutcome::Allow => outcome = PolicyOutcome::Allow,
                PolicyOutcome::NoOpinion => {}
            }
        }

        outcome
    }
}

//
// ResponsePolicyChain
//

/// Ordered response policy rules combined into one policy.
///
/// The first deny wins; otherwise the chain has no opinion.
#[derive(Clone, Default)]
pub struct ResponsePolicyChain {
    rules: Vec<Arc<dyn ResponsePolicy>>,
}

impl ResponsePolicyChain {
    /// Constructor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule.
    pub fn with(mut self, rule: impl ResponsePolicy + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }
}

impl ResponsePolicy for ResponsePolicyChain {
    fn check(&self, context: &ResponsePolicyContext) -> PolicyOutcome {
        for rule in &self.rules {
            if rule.check(context) == PolicyOutcome::Deny {
                return PolicyOutcome::Deny;
            }
        }

        PolicyOutcome::NoOpinion
    }
}

//
// SafeMethod
//

/// Request policy rule that denies caching for unsafe methods.
///
/// GET and HEAD pass with no opinion; anything else is denied.
#[derive(Clone, Copy, Debug, Default)]
pub struct SafeMethod;

impl RequestPolicy for SafeMethod {
    fn check(&self, context: &RequestPolicyContext) -> PolicyOutcome {
        if context.method.is_safe() {
            PolicyOutcome::NoOpinion
        } else {
            PolicyOutcome::Deny
        }
    }
}

//
// NoSessionCookie
//

/// Request policy rule that allows caching when no session cookie is present.
///
/// This is the rule that provides the explicit allow the gate requires: a
/// request without a session is anonymous and its response may be shared.
#[derive(Clone, Debug)]
pub struct NoSessionCookie {
    session_prefix: String,
}

impl NoSessionCookie {
    /// Constructor.
    pub fn new(session_prefix: impl Into<String>) -> Self {
        Self {
            session_prefix: session_prefix.into(),
        }
    }
}

impl Default for NoSessionCookie {
    fn default() -> Self {
        Self::new("SESS")
    }
}

impl RequestPolicy for NoSessionCookie {
    fn check(&self, context: &RequestPolicyContext) -> PolicyOutcome {
        for cookies in context.headers.get_all(COOKIE) {
            if let Ok(cookies) = cookies.to_str()
                && cookies
                    .split(';')
                    .any(|cookie| cookie.trim_start().starts_with(&self.session_prefix))
            {
                return PolicyOutcome::NoOpinion;
            }
        }

        PolicyOutcome::Allow
    }
}

//
// DenyOnSetCookie
//

/// Response policy rule that denies caching for responses that set cookies.
#[derive(Clone, Copy, Debug, Default)]
pub struct DenyOnSetCookie;

impl ResponsePolicy for DenyOnSetCookie {
    fn check(&self, context: &ResponsePolicyContext) -> PolicyOutcome {
        if context.headers.contains_key(SET_COOKIE) {
            PolicyOutcome::Deny
        } else {
            PolicyOutcome::NoOpinion
        }
    }
}

/// Final cacheability gate.
///
/// True iff the request policy explicitly allowed, the response policy did
/// not deny, and the max-age is positive. The asymmetry is deliberate: the
/// request policy is the primary gate and must allow, while the response
/// policy is a blocklist for exceptional content.
pub fn is_cacheable(context: &ResponseContext, max_age: u64) -> bool {
    (context.request_policy == PolicyOutcome::Allow)
        && (context.response_policy != PolicyOutcome::Deny)
        && (max_age > 0)
}
