//! Configuration file management for spotty.
//!
//! Provides a TOML-based config file at `~/.config/spotty/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use spotty_api::ApiConfig;
use spotty_core::composition::Strategy;
use spotty_core::pipeline::DEFAULT_MAX_GROUP_SIZE;
use spotty_core::search::DEFAULT_MARKET;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub spotify: SpotifySection,
    #[serde(default)]
    pub search: SearchSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SpotifySection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
}

/// Defaults for `spotty generate` flags. Unset keys fall back to the
/// built-in defaults.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SearchSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_words: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookahead: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

impl SearchSection {
    /// The configured strategy, if any.
    pub fn strategy(&self) -> Result<Option<Strategy>> {
        self.strategy
            .as_deref()
            .map(|s| s.parse::<Strategy>())
            .transpose()
            .context("invalid search.strategy in config file")
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the spotty config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/spotty` or `~/.config/spotty`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("spotty");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("spotty")
}

/// Return the path to the spotty config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Only the `[search]` table; other tables are not parsed.
#[derive(Debug, Deserialize)]
struct SearchOnly {
    #[serde(default)]
    search: SearchSection,
}

/// Group-size limit for offline commands: `--max-words` >
/// `search.max_words` > default.
///
/// The config file is not opened when the flag is given. Otherwise only
/// `[search]` is read, and a file that cannot be read is logged and ignored.
pub fn offline_max_words(flag: Option<usize>) -> usize {
    if let Some(max_words) = flag {
        return max_words;
    }
    let path = config_path();
    if !path.exists() {
        return DEFAULT_MAX_GROUP_SIZE;
    }
    let parsed = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))
        .and_then(|contents| {
            toml::from_str::<SearchOnly>(&contents)
                .with_context(|| format!("failed to parse config file at {}", path.display()))
        });
    match parsed {
        Ok(file) => file.search.max_words.unwrap_or(DEFAULT_MAX_GROUP_SIZE),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "ignoring config file");
            DEFAULT_MAX_GROUP_SIZE
        }
    }
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    // The file holds an access token.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides<'a> {
    pub access_token: Option<&'a str>,
    pub market: Option<&'a str>,
    pub api_base_url: Option<&'a str>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct SpottyConfig {
    pub api: ApiConfig,
    pub market: String,
    pub search: SearchSection,
}

impl SpottyConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Access token: `--access-token` > `SPOTTY_ACCESS_TOKEN` > `spotify.access_token` > empty
    /// - Market: `--market` > `SPOTTY_MARKET` > `spotify.market` > `US`
    /// - API base URL: `--api-base-url` > `SPOTTY_API_BASE_URL` > `spotify.api_base_url` > public API
    ///
    /// A config file that exists but does not parse is an error.
    pub fn resolve(cli: CliOverrides<'_>) -> Result<Self> {
        let file_config = if config_path().exists() {
            load_config()?
        } else {
            ConfigFile::default()
        };
        let spotify = &file_config.spotify;

        let access_token = pick(cli.access_token, "SPOTTY_ACCESS_TOKEN", &spotify.access_token)
            .unwrap_or_default();
        let market = pick(cli.market, "SPOTTY_MARKET", &spotify.market)
            .unwrap_or_else(|| DEFAULT_MARKET.to_string());
        let base_url = pick(cli.api_base_url, "SPOTTY_API_BASE_URL", &spotify.api_base_url)
            .unwrap_or_else(|| ApiConfig::DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api: ApiConfig::new(base_url, access_token),
            market,
            search: file_config.search,
        })
    }

    /// Fail unless an access token was found somewhere in the chain.
    pub fn require_token(&self) -> Result<()> {
        if self.api.access_token.trim().is_empty() {
            bail!(
                "Spotify access token not found; pass --access-token, set SPOTTY_ACCESS_TOKEN, or run `spotty init --access-token <TOKEN>`"
            );
        }
        Ok(())
    }
}

fn pick(cli: Option<&str>, env_var: &str, file: &Option<String>) -> Option<String> {
    if let Some(value) = cli {
        return Some(value.to_string());
    }
    if let Ok(value) = std::env::var(env_var) {
        return Some(value);
    }
    file.clone()
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
