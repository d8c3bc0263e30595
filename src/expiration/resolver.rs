use super::{configuration::*, context::*};

use http::StatusCode;

/// Resolve a response's candidate max-age in seconds, before hooks run.
///
/// An upstream-decided max-age takes the place of path matching; otherwise
/// the request path selects between the alternative and default lifetimes.
/// A 301, 302, 403 or 404 status then overrides the candidate
/// unconditionally, even an upstream-decided one. 403 is never cacheable.
pub fn resolve_lifetime(configuration: &CacheLifetimeConfig, context: &ResponseContext) -> u64 {
    let max_age = match context.precomputed_max_age {
        Some(max_age) => max_age,

        None => {
            // An empty pattern set never matches
            if !configuration.alternative_paths.is_empty()
                && configuration.alternative_paths.matches(&context.path)
            {
                configuration.alternative_lifetime
            } else {
                configuration.default_lifetime
            }
        }
    };

    match context.status {
        StatusCode::MOVED_PERMANENTLY => configuration.status_lifetimes.moved_permanently,
        StatusCode::FOUND => configuration.status_lifetimes.found,
        StatusCode::FORBIDDEN => 0,
        StatusCode::NOT_FOUND => configuration.status_lifetimes.not_found,
        _ => max_age,
    }
}

#[cfg(test)]
mod tests {
    use super::{super::policy::*, *};

    fn configuration(alternatives: &[&str]) -> CacheLifetimeConfig {
        CacheLifetimeConfig::new(
            alternatives.iter().map(|pattern| pattern.to_string()).collect(),
            60,
            300,
            StatusLifetimes {
                moved_permanently: 3600,
                found: 10,
                not_found: 30,
            },
        )
        .unwrap()
    }

    fn context(status: StatusCode, path: &str, precomputed_max_age: Option<u64>) -> ResponseContext {
        ResponseContext::new(
            status,
            path.into(),
            precomputed_max_age,
            PolicyOutcome::Allow,
            PolicyOutcome::NoOpinion,
        )
    }

    #[test]
    fn default_lifetime_without_alternatives() {
        let configuration = configuration(&[]);

        for path in ["/", "/node/1", ""] {
            assert_eq!(
                resolve_lifetime(&configuration, &context(StatusCode::OK, path, None)),
                300
            );
        }
    }

    #[test]
    fn alternative_lifetime_for_matching_path() {
        let configuration = configuration(&["/node/*"]);

        assert_eq!(
            resolve_lifetime(&configuration, &context(StatusCode::OK, "/node/5", None)),
            60
        );
        assert_eq!(
            resolve_lifetime(&configuration, &context(StatusCode::OK, "/other", None)),
            300
        );
    }

    #[test]
    fn precomputed_wins_over_path_matching() {
        let configuration = configuration(&["/node/*"]);

        assert_eq!(
            resolve_lifetime(&configuration, &context(StatusCode::OK, "/node/5", Some(1234))),
            1234
        );
    }

    #[test]
    fn status_overrides_are_unconditional() {
        let configuration = configuration(&["/node/*"]);

        for (status, expected) in [
            (StatusCode::MOVED_PERMANENTLY, 3600),
            (StatusCode::FOUND, 10),
            (StatusCode::NOT_FOUND, 30),
        ] {
            assert_eq!(
                resolve_lifetime(&configuration, &context(status, "/node/5", None)),
                expected
            );
            assert_eq!(
                resolve_lifetime(&configuration, &context(status, "/other", None)),
                expected
            );
        }
    }

    #[test]
    fn status_override_beats_precomputed() {
        let configuration = configuration(&[]);

        assert_eq!(
            resolve_lifetime(
                &configuration,
                &context(StatusCode::NOT_FOUND, "/missing", Some(86400))
            ),
            30
        );
    }

    #[test]
    fn forbidden_is_never_cacheable() {
        let configuration = configuration(&["/node/*"]);

        for precomputed_max_age in [None, Some(86400)] {
            let forbidden = context(StatusCode::FORBIDDEN, "/node/5", precomputed_max_age);
            assert_eq!(resolve_lifetime(&configuration, &forbidden), 0);
            assert!(!is_cacheable(&forbidden, resolve_lifetime(&configuration, &forbidden)));
        }
    }

    #[test]
    fn other_statuses_leave_the_candidate_untouched() {
        let configuration = configuration(&[]);

        for status in [StatusCode::CREATED, StatusCode::SEE_OTHER, StatusCode::INTERNAL_SERVER_ERROR] {
            assert_eq!(
                resolve_lifetime(&configuration, &context(status, "/", None)),
                300
            );
        }
    }
}
