use {
    globset::{Glob, GlobSet, GlobSetBuilder},
    http::StatusCode,
    thiserror::*,
};

//
// ConfigurationError
//

/// Page expiration configuration error.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A required configuration field was not provided.
    ///
    /// Absent fields are never silently defaulted.
    #[error("missing configuration: {key}")]
    Missing {
        /// Configuration key.
        key: &'static str,
    },

    /// A path pattern did not compile.
    #[error("invalid path pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// Pattern.
        pattern: String,

        /// Source.
        source: globset::Error,
    },
}

//
// PathPatterns
//

/// Ordered set of request path patterns, compiled once for matching.
///
/// Patterns are globs in which `*` matches any sequence of characters,
/// including `/`, so `/node/*` matches `/node/1`. Matching is anchored to the
/// whole path and case-sensitive.
#[derive(Clone, Debug)]
pub struct PathPatterns {
    patterns: Vec<String>,
    matcher: GlobSet,
}

impl PathPatterns {
    /// Constructor.
    pub fn new(patterns: Vec<String>) -> Result<Self, ConfigurationError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            let glob = Glob::new(pattern).map_err(|source| ConfigurationError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }

        let matcher = builder
            .build()
            .map_err(|source| ConfigurationError::InvalidPattern {
                pattern: patterns.join(" "),
                source,
            })?;

        Ok(Self { patterns, matcher })
    }

    /// Whether no patterns are configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether at least one pattern matches the path.
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    /// The source patterns.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

//
// StatusLifetimes
//

/// Per-status max-age overrides, in seconds.
///
/// Only these statuses are ever overridden. 403 (Forbidden) is always 0 and
/// is not configurable.
#[derive(Clone, Copy, Debug)]
pub struct StatusLifetimes {
    /// Max-age for 301 (Moved Permanently) responses.
    pub moved_permanently: u64,

    /// Max-age for 302 (Found) responses.
    pub found: u64,

    /// Max-age for 404 (Not Found) responses.
    pub not_found: u64,
}

//
// CacheLifetimeConfig
//

/// Cache lifetime configuration.
///
/// An immutable snapshot read once per evaluation. Lifetimes are in seconds;
/// 0 means "do not cache". Safe to share between concurrent evaluations.
#[derive(Clone, Debug)]
pub struct CacheLifetimeConfig {
    /// Alternative path patterns.
    pub alternative_paths: PathPatterns,

    /// Max-age for requests matching [alternative_paths](Self::alternative_paths).
    pub alternative_lifetime: u64,

    /// System-wide fallback max-age.
    pub default_lifetime: u64,

    /// Per-status overrides.
    pub status_lifetimes: StatusLifetimes,
}

impl CacheLifetimeConfig {
    /// Constructor.
    pub fn new(
        alternative_paths: Vec<String>,
        alternative_lifetime: u64,
        default_lifetime: u64,
        status_lifetimes: StatusLifetimes,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            alternative_paths: PathPatterns::new(alternative_paths)?,
            alternative_lifetime,
            default_lifetime,
            status_lifetimes,
        })
    }

    /// Read the configuration from a [ConfigurationSource].
    ///
    /// Every field is required; an absent field is a
    /// [ConfigurationError::Missing].
    pub fn load(source: &impl ConfigurationSource) -> Result<Self, ConfigurationError> {
        let alternative_paths = source
            .alternative_paths()
            .ok_or(ConfigurationError::Missing { key: "alternatives" })?;

        let alternative_lifetime = source.alternative_lifetime().ok_or(ConfigurationError::Missing {
            key: "lifetime.alternatives",
        })?;

        let default_lifetime = source.default_lifetime().ok_or(ConfigurationError::Missing {
            key: "cache.page.max_age",
        })?;

        let status_lifetimes = StatusLifetimes {
            moved_permanently: status_lifetime(source, StatusCode::MOVED_PERMANENTLY, "lifetime.301")?,
            found: status_lifetime(source, StatusCode::FOUND, "lifetime.302")?,
            not_found: status_lifetime(source, StatusCode::NOT_FOUND, "lifetime.404")?,
        };

        Self::new(
            alternative_paths,
            alternative_lifetime,
            default_lifetime,
            status_lifetimes,
        )
    }
}

fn status_lifetime(
    source: &impl ConfigurationSource,
    status: StatusCode,
    key: &'static str,
) -> Result<u64, ConfigurationError> {
    source
        .status_lifetime(status)
        .ok_or(ConfigurationError::Missing { key })
}

//
// ConfigurationSource
//

/// Read access to externally stored expiration settings.
///
/// Queried once per [CacheLifetimeConfig::load]. Implementations return
/// [None] for fields they do not carry; only 301, 302 and 404 are ever asked
/// of [status_lifetime](Self::status_lifetime).
pub trait ConfigurationSource {
    /// Alternative path patterns.
    fn alternative_paths(&self) -> Option<Vec<String>>;

    /// Max-age in seconds for alternative paths.
    fn alternative_lifetime(&self) -> Option<u64>;

    /// System-wide fallback max-age in seconds.
    fn default_lifetime(&self) -> Option<u64>;

    /// Max-age override in seconds for a status code.
    fn status_lifetime(&self, status: StatusCode) -> Option<u64>;
}
