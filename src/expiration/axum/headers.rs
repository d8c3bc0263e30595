use super::super::header::*;

use {
    ::axum::response::{IntoResponse, Response},
    duration_str::*,
    http::header::*,
    std::{result::Result, time::*},
};

//
// ExpirationHeaders
//

/// Expiration control headers.
pub trait ExpirationHeaders<IntoResponseT>
where
    Self: Sized,
    IntoResponseT: IntoResponse,
{
    /// Set `XX-Cache-Variable` header to "false".
    ///
    /// The response will be passed through with its `Cache-Control` header
    /// untouched.
    fn do_not_vary_cache(self) -> Response;

    /// Set `XX-Cache-Lifetime` header.
    fn with_cache_lifetime(self, lifetime: Duration) -> Response;

    /// Set `XX-Cache-Lifetime` header.
    fn with_cache_lifetime_str(self, lifetime: &str) -> Result<Response, InvalidHeaderValue>;
}

impl<IntoResponseT> ExpirationHeaders<IntoResponseT> for IntoResponseT
where
    IntoResponseT: IntoResponse,
{
    fn do_not_vary_cache(self) -> Response {
        let mut response = self.into_response();
        response
            .headers_mut()
            .insert(XX_CACHE_VARIABLE, HeaderValue::from_static("false"));
        response
    }

    fn with_cache_lifetime(self, lifetime: Duration) -> Response {
        let mut response = self.into_response();
        let lifetime = HeaderValue::from_str(lifetime.human_format().as_str())
            .expect("duration in HTTP header");
        response.headers_mut().insert(XX_CACHE_LIFETIME, lifetime);
        response
    }

    fn with_cache_lifetime_str(self, lifetime: &str) -> Result<Response, InvalidHeaderValue> {
        let mut response = self.into_response();
        response
            .headers_mut()
            .insert(XX_CACHE_LIFETIME, HeaderValue::from_str(lifetime)?);
        Ok(response)
    }
}
