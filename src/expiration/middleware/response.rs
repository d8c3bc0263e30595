use super::super::header::*;

use http::response::*;

//
// ExpirableResponse
//

/// Expiration-aware response.
pub trait ExpirableResponse {
    /// Whether the response supports variable cache headers.
    ///
    /// Responses declare themselves with the `XX-Cache-Variable` header;
    /// without it (or with an unparseable value), `variable_by_default`
    /// decides.
    fn is_cache_variable(&self, variable_by_default: bool) -> bool;

    /// Parse and remove the `XX-Cache-Lifetime` header, in whole seconds.
    ///
    /// Unparseable values are discarded with a warning.
    fn take_explicit_lifetime(&mut self) -> Option<u64>;

    /// Remove the control headers before the response goes downstream.
    fn remove_control_headers(&mut self);
}

impl<ResponseBodyT> ExpirableResponse for Response<ResponseBodyT> {
    fn is_cache_variable(&self, variable_by_default: bool) -> bool {
        match self.headers().get(XX_CACHE_VARIABLE).map(|value| value.to_str()) {
            Some(Ok(value)) if value.eq_ignore_ascii_case("true") => true,
            Some(Ok(value)) if value.eq_ignore_ascii_case("false") => false,
            _ => variable_by_default,
        }
    }

    fn take_explicit_lifetime(&mut self) -> Option<u64> {
        let value = self.headers_mut().remove(XX_CACHE_LIFETIME)?;

        match value.to_str() {
            Ok(value) => match duration_str::parse(value) {
                Ok(lifetime) => Some(lifetime.as_secs()),

                Err(_) => {
                    tracing::warn!("unparseable {}: {}", XX_CACHE_LIFETIME, value);
                    None
                }
            },

            Err(_) => None,
        }
    }

    fn remove_control_headers(&mut self) {
        let headers = self.headers_mut();
        headers.remove(XX_CACHE_VARIABLE);
        headers.remove(XX_CACHE_LIFETIME);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(headers: &[(&str, &str)]) -> Response<()> {
        let mut builder = Response::builder();
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap()
    }

    #[test]
    fn variable_follows_the_default_when_undeclared() {
        let response = make_response(&[]);
        assert!(response.is_cache_variable(true));
        assert!(!response.is_cache_variable(false));
    }

    #[test]
    fn variable_declaration_wins_over_the_default() {
        let response = make_response(&[("xx-cache-variable", "false")]);
        assert!(!response.is_cache_variable(true));

        let response = make_response(&[("xx-cache-variable", "TRUE")]);
        assert!(response.is_cache_variable(false));

        let response = make_response(&[("xx-cache-variable", "maybe")]);
        assert!(response.is_cache_variable(true));
    }

    #[test]
    fn explicit_lifetime_is_parsed_and_removed() {
        let mut response = make_response(&[("xx-cache-lifetime", "90s")]);
        assert_eq!(response.take_explicit_lifetime(), Some(90));
        assert!(!response.headers().contains_key("xx-cache-lifetime"));

        let mut response = make_response(&[("xx-cache-lifetime", "5m")]);
        assert_eq!(response.take_explicit_lifetime(), Some(300));

        let mut response = make_response(&[]);
        assert_eq!(response.take_explicit_lifetime(), None);
    }

    #[test]
    fn unparseable_lifetime_is_discarded() {
        let mut response = make_response(&[("xx-cache-lifetime", "soon")]);
        assert_eq!(response.take_explicit_lifetime(), None);
        assert!(!response.headers().contains_key("xx-cache-lifetime"));
    }

    #[test]
    fn control_headers_are_removed() {
        let mut response = make_response(&[
            ("xx-cache-variable", "true"),
            ("xx-cache-lifetime", "90s"),
            ("content-type", "text/html"),
        ]);

        response.remove_control_headers();
        assert!(!response.headers().contains_key("xx-cache-variable"));
        assert!(!response.headers().contains_key("xx-cache-lifetime"));
        assert!(response.headers().contains_key("content-type"));
    }
}
