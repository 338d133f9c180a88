//! Configuration for the generator and its provider

use std::path::Path;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_UNLIMITED: &str = "POSTGEN_UNLIMITED";
pub const ENV_FREE_POSTS: &str = "POSTGEN_FREE_POSTS";
pub const ENV_API_BASE: &str = "POSTGEN_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "POSTGEN_TIMEOUT_SECS";

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_FREE_POSTS: u32 = 3;

/// Provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig
{   /// API base URL
    pub api_base: String
  , /// Request timeout in seconds
    pub timeout_secs: u64
}

impl Default for ProviderConfig
{   fn default() -> Self
    {   ProviderConfig
        {   api_base: DEFAULT_API_BASE.to_string()
          , timeout_secs: DEFAULT_TIMEOUT_SECS
        }
    }
}

/// Generator configuration, fixed at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig
{   /// Key used when the user supplies none
    #[serde(default)]
    pub default_api_key: Option<String>
  , /// Sessions without a user key are not metered
    #[serde(default)]
    pub unlimited_default: bool
  , /// Free generations per metered session
    #[serde(default = "default_free_posts")]
    pub free_post_limit: u32
  , #[serde(default)]
    pub provider: ProviderConfig
}

fn default_free_posts() -> u32
{   DEFAULT_FREE_POSTS
}

impl Default for GeneratorConfig
{   fn default() -> Self
    {   GeneratorConfig
        {   default_api_key: None
          , unlimited_default: false
          , free_post_limit: DEFAULT_FREE_POSTS
          , provider: ProviderConfig::default()
        }
    }
}

impl GeneratorConfig
{   /// Read configuration from the process environment, loading
    /// a `.env` file first when one exists
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   match dotenvy::dotenv()
        {   Ok(path) => debug!("Loaded {}", path.display())
          , Err(e) if e.not_found() => debug!("No .env file")
          , Err(e) => warn!("Ignoring unreadable .env: {}", e)
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any name -> value lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, crate::error::Error>
    where F: Fn(&str) -> Option<String>
    {   let mut config = GeneratorConfig::default();

        config.default_api_key = lookup(ENV_API_KEY)
          .map(|k| k.trim().to_string())
          .filter(|k| !k.is_empty());

        if let Some(raw) = lookup(ENV_UNLIMITED)
        {   config.unlimited_default = parse_flag(ENV_UNLIMITED, &raw)?;
        }
        if let Some(raw) = lookup(ENV_FREE_POSTS)
        {   config.free_post_limit = parse_number(ENV_FREE_POSTS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_API_BASE)
        {   config.provider.api_base
              = raw.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS)
        {   config.provider.timeout_secs
              = parse_number(ENV_TIMEOUT_SECS, &raw)?;
        }

        config.validate()?;
        debug!(
          "Config: unlimited_default={}, free_post_limit={}, \
           has_default_key={}",
          config.unlimited_default,
          config.free_post_limit,
          config.default_api_key.is_some()
        );
        Ok(config)
    }

    /// Read configuration from a JSON file
    pub fn from_json_file(
      path: impl AsRef<Path>
    ) -> Result<Self, crate::error::Error>
    {   let text = std::fs::read_to_string(path.as_ref())?;
        let config: GeneratorConfig = serde_json::from_str(&text)
          .map_err(|e| {
            crate::error::Error::InvalidConfiguration(e.to_string())
          })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   if self.provider.api_base.trim().is_empty()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "api_base is empty".to_string()
            ));
        }
        if self.provider.timeout_secs == 0
        {   return Err(crate::error::Error::InvalidConfiguration(
              "timeout_secs must be positive".to_string()
            ));
        }
        Ok(())
    }
}

fn parse_flag(
  name: &str
, raw: &str
) -> Result<bool, crate::error::Error>
{   match raw.trim().to_ascii_lowercase().as_str()
    {   "1" | "true" | "yes" | "on" => Ok(true)
      , "0" | "false" | "no" | "off" | "" => Ok(false)
      , other => Err(crate::error::Error::InvalidConfiguration(
          format!("{} is not a flag: {}", name, other)
        ))
    }
}

fn parse_number<T: std::str::FromStr>(
  name: &str
, raw: &str
) -> Result<T, crate::error::Error>
{   raw.trim().parse().map_err(|_| {
      crate::error::Error::InvalidConfiguration(
        format!("{} is not a number: {}", name, raw)
      )
    })
}
