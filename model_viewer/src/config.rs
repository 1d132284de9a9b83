//! Env parsing and defaults.

use thiserror::Error;
use url::Url;

use crate::catalog::PresetKey;

const SITE_URL_VAR: &str = "SITE_URL";
const ROUTE_VAR: &str = "FOLIO_ROUTE";
const MATERIAL_VAR: &str = "FOLIO_MATERIAL";
const CUBE_SEED_VAR: &str = "FOLIO_CUBE_SEED";

const DEFAULT_SITE_URL: &str = "http://localhost:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL in {var}: {value:?}")]
    InvalidUrl { var: &'static str, value: String },
    #[error("invalid {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Settings read from the environment once, before the app is built.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub site_url: Url,
    /// Path opened at startup, e.g. `/project/laptop-stand`.
    pub start_route: String,
    pub material: PresetKey,
    /// Seed for the view-cube overshoot RNG. Entropy when unset.
    pub cube_seed: Option<u64>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            start_route: "/".to_string(),
            material: PresetKey::default(),
            cube_seed: None,
        }
    }
}

fn default_site_url() -> Url {
    // Constant input; parsing cannot fail.
    Url::parse(DEFAULT_SITE_URL).unwrap_or_else(|err| panic!("folio: bad default URL: {err}"))
}

/// Reads the viewer settings. Bad values are reported and replaced by defaults.
pub fn viewer_config() -> ViewerConfig {
    let mut config = ViewerConfig::default();

    match site_url() {
        Ok(Some(url)) => config.site_url = url,
        Ok(None) => {}
        Err(err) => eprintln!("folio: {err}, using {DEFAULT_SITE_URL}"),
    }

    if let Ok(route) = std::env::var(ROUTE_VAR) {
        config.start_route = route;
    }

    if let Ok(raw) = std::env::var(MATERIAL_VAR) {
        match raw.parse::<PresetKey>() {
            Ok(key) => config.material = key,
            Err(err) => eprintln!("folio: {err}, using {}", config.material),
        }
    }

    match cube_seed() {
        Ok(seed) => config.cube_seed = seed,
        Err(err) => eprintln!("folio: {err}, seeding from entropy"),
    }

    config
}

/// The public site URL used for sitemap links.
pub fn site_url() -> Result<Option<Url>, ConfigError> {
    let Ok(raw) = std::env::var(SITE_URL_VAR) else {
        return Ok(None);
    };
    raw.parse::<Url>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidUrl {
            var: SITE_URL_VAR,
            value: raw,
        })
}

fn cube_seed() -> Result<Option<u64>, ConfigError> {
    let Ok(raw) = std::env::var(CUBE_SEED_VAR) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue {
            var: CUBE_SEED_VAR,
            value: raw,
        })
}
