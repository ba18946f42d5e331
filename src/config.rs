//! Runtime configuration.
//!
//! The content [`Mode`] is decided once, when the [`Config`] is finished, and
//! then handed to everything that needs it. Nothing downstream re-derives it.

use std::fmt;
use std::str::FromStr;

use camino::Utf8PathBuf;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:1337";
pub const DEFAULT_SNAPSHOT: &str = "data.json";

/// Where content comes from for the whole lifetime of a [`Site`](crate::Site).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Serve everything from one pre-fetched JSON snapshot.
    #[default]
    Static,
    /// Query the CMS API directly, once per request.
    Live,
}

impl Mode {
    /// Derive the mode from the deployment host. Local development hosts talk
    /// to the CMS directly, everything else serves the snapshot.
    pub fn from_host(host: &str) -> Self {
        let host = host.trim();
        if host == "localhost" || host == "127.0.0.1" || host.starts_with("192.168") {
            Mode::Live
        } else {
            Mode::Static
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Static => "static",
            Mode::Live => "live",
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Mode::Static),
            "live" => Ok(Mode::Live),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings shared by every part of the renderer.
#[derive(Debug, Clone)]
pub struct Config {
    /// Content strategy, fixed for the session.
    pub mode: Mode,
    /// Base address of the CMS, used both for live queries and for resolving
    /// CMS-relative media paths.
    pub api_base: String,
    /// Location of the consolidated snapshot document.
    pub snapshot: Utf8PathBuf,
    /// Output directory for `build`.
    pub dist: Utf8PathBuf,
    /// Static assets copied into `dist` and served as a fallback.
    pub public: Utf8PathBuf,
    /// Port for the HTTP server.
    pub port: u16,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// A consuming builder for [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    mode: Option<Mode>,
    host: Option<String>,
    api_base: Option<String>,
    snapshot: Option<Utf8PathBuf>,
    dist: Option<Utf8PathBuf>,
    public: Option<Utf8PathBuf>,
    port: Option<u16>,
}

impl ConfigBuilder {
    /// Force a content mode. Takes precedence over [`ConfigBuilder::host`].
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Deployment host name, used to pick a mode when none was forced.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    pub fn snapshot(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.snapshot = Some(path.into());
        self
    }

    pub fn dist(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.dist = Some(path.into());
        self
    }

    pub fn public(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.public = Some(path.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn finish(self) -> Result<Config, ConfigError> {
        let mode = match (self.mode, self.host.as_deref()) {
            (Some(mode), _) => mode,
            (None, Some(host)) => Mode::from_host(host),
            (None, None) => Mode::default(),
        };

        if mode == Mode::Live && !cfg!(feature = "live") {
            return Err(ConfigError::LiveUnavailable);
        }

        let api_base = self
            .api_base
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        if let Err(err) = Url::parse(&api_base) {
            return Err(ConfigError::ApiBase(api_base, err));
        }

        Ok(Config {
            mode,
            api_base,
            snapshot: self.snapshot.unwrap_or_else(|| DEFAULT_SNAPSHOT.into()),
            dist: self.dist.unwrap_or_else(|| "dist".into()),
            public: self.public.unwrap_or_else(|| "public".into()),
            port: self.port.unwrap_or(8080),
        })
    }
}
