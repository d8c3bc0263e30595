use http::header::*;

/// The `Cache-Control` value for uncacheable responses.
pub const NO_CACHE: &str = "no-cache, must-revalidate";

/// Response header declaring whether the response supports variable cache
/// headers ("true" or "false").
///
/// Removed before the response is sent downstream.
pub const XX_CACHE_VARIABLE: HeaderName = HeaderName::from_static("xx-cache-variable");

/// Response header carrying an upstream-decided cache lifetime as a duration
/// string (e.g. "300s", "5m").
///
/// Removed before the response is sent downstream.
pub const XX_CACHE_LIFETIME: HeaderName = HeaderName::from_static("xx-cache-lifetime");

/// Render the final cache decision into a `Cache-Control` value.
///
/// Uncacheable responses always get `"no-cache, must-revalidate"`; the
/// max-age that made them uncacheable is not echoed. Cacheable responses get
/// `"public, max-age=<seconds>"`.
pub fn cache_control_value(cacheable: bool, max_age: u64) -> String {
    if cacheable {
        format!("public, max-age={}", max_age)
    } else {
        NO_CACHE.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncacheable_never_echoes_the_max_age() {
        for max_age in [0, 1, 300, u64::MAX] {
            assert_eq!(cache_control_value(false, max_age), "no-cache, must-revalidate");
        }
    }

    #[test]
    fn cacheable_renders_decimal_max_age() {
        assert_eq!(cache_control_value(true, 3600), "public, max-age=3600");
        assert_eq!(cache_control_value(true, 1), "public, max-age=1");
    }

    #[test]
    fn values_are_valid_header_values() {
        for value in [cache_control_value(false, 0), cache_control_value(true, 86400)] {
            assert!(HeaderValue::from_str(&value).is_ok());
        }
    }
}
