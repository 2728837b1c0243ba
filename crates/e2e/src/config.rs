//! Bridge configuration
//!
//! Built once at process start and passed by reference to the execution
//! channel and the fixture operations. Nothing below this module reads the
//! environment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{E2eError, E2eResult};

/// Execution target prefix, e.g. `docker compose exec -T cli`
pub const ENV_EXEC_TARGET: &str = "DOCKER_EXEC_CLI";
pub const ENV_EXEC_MODE: &str = "FIXTURE_BRIDGE_EXEC_MODE";
pub const ENV_DRUSH: &str = "FIXTURE_BRIDGE_DRUSH";
pub const ENV_BASE_URL: &str = "DRUPAL_BASE_URL";
pub const ENV_ADMIN_BASE_URL: &str = "SITE_ADMIN_BASE_URL";
pub const ENV_INSTALL_EXTENSIONS: &str = "LDP_INSTALL_EXTENSIONS";
pub const ENV_CONTENTPOOL_PORTAL_URL: &str = "LDP_CP_PORTAL_BASE_URL_DEVPORTAL";
pub const ENV_APP_SECRET: &str = "APP_SECRET";

/// Extension that marks a contentpool installation
pub const CONTENTPOOL_EXTENSION: &str = "ldp_cp";

/// How the drush command line reaches the execution target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecMode {
    /// One command string run through `sh -c`, arguments double quoted
    Shell,
    /// Discrete process arguments, no quoting layer
    Argv,
}

impl ExecMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecMode::Shell => "shell",
            ExecMode::Argv => "argv",
        }
    }
}

impl FromStr for ExecMode {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shell" => Ok(ExecMode::Shell),
            "argv" => Ok(ExecMode::Argv),
            other => Err(E2eError::Config(format!(
                "unknown exec mode '{}', expected 'shell' or 'argv'",
                other
            ))),
        }
    }
}

impl fmt::Display for ExecMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Command prefix that runs its argument inside the backend container.
    /// `None` runs drush on the local host.
    pub exec_target: Option<String>,

    /// Explicit exec mode. Unset means `shell` with a target, `argv` without.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exec_mode: Option<ExecMode>,

    /// drush executable as seen from the execution target
    pub drush_binary: String,

    /// Backend base URL used for API requests
    pub base_url: Option<String>,

    /// Installed extensions descriptor, checked by substring
    pub install_extensions: String,

    /// Portal base URL used as canonical host on contentpool sites
    pub contentpool_portal_url: Option<String>,

    /// Shared secret for login flows. Never written to disk.
    #[serde(skip_serializing)]
    pub app_secret: Option<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            exec_target: None,
            exec_mode: None,
            drush_binary: "drush".to_string(),
            base_url: None,
            install_extensions: String::new(),
            contentpool_portal_url: None,
            app_secret: None,
        }
    }
}

impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("exec_target", &self.exec_target)
            .field("exec_mode", &self.exec_mode)
            .field("drush_binary", &self.drush_binary)
            .field("base_url", &self.base_url)
            .field("install_extensions", &self.install_extensions)
            .field("contentpool_portal_url", &self.contentpool_portal_url)
            .field("app_secret", &self.app_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl BridgeConfig {
    /// Build configuration from the process environment
    pub fn from_env() -> E2eResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> E2eResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let exec_target = get(ENV_EXEC_TARGET).map(|v| v.trim().to_string());
        let exec_mode = get(ENV_EXEC_MODE).map(|mode| mode.parse::<ExecMode>()).transpose()?;

        Ok(Self {
            exec_target,
            exec_mode,
            drush_binary: get(ENV_DRUSH).unwrap_or_else(|| "drush".to_string()),
            base_url: get(ENV_BASE_URL).or_else(|| get(ENV_ADMIN_BASE_URL)),
            install_extensions: get(ENV_INSTALL_EXTENSIONS).unwrap_or_default(),
            contentpool_portal_url: get(ENV_CONTENTPOOL_PORTAL_URL),
            app_secret: get(ENV_APP_SECRET),
        })
    }

    /// Exec mode the channel uses.
    ///
    /// Without an explicit mode, a configured target is treated as a shell
    /// fragment that expects the drush line as one argument.
    pub fn effective_mode(&self) -> ExecMode {
        match (self.exec_mode, &self.exec_target) {
            (Some(mode), _) => mode,
            (None, Some(_)) => ExecMode::Shell,
            (None, None) => ExecMode::Argv,
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> E2eResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> E2eResult<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Whether every given extension appears in the installed extensions
    pub fn extensions_enabled<S: AsRef<str>>(&self, extensions: &[S]) -> bool {
        extensions
            .iter()
            .all(|ext| self.install_extensions.contains(ext.as_ref()))
    }

    pub fn is_contentpool_site(&self) -> bool {
        !self.install_extensions.is_empty() && self.extensions_enabled(&[CONTENTPOOL_EXTENSION])
    }

    /// Absolute backend API URL for a path alias
    pub fn api_url(&self, path: &str) -> E2eResult<String> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| E2eError::Config(format!("{} or {} must be set", ENV_BASE_URL, ENV_ADMIN_BASE_URL)))?;
        Ok(format!("{}/api{}", base.trim_end_matches('/'), path))
    }

    /// Canonical URL the homepage is expected to advertise
    pub fn homepage_canonical_url(&self, frontend_url: &str) -> E2eResult<String> {
        if self.is_contentpool_site() {
            let portal = self.contentpool_portal_url.as_deref().ok_or_else(|| {
                E2eError::Config(format!(
                    "{} must be set on contentpool sites",
                    ENV_CONTENTPOOL_PORTAL_URL
                ))
            })?;
            return Ok(format!("{}/", portal));
        }
        Ok(format!("{}/", frontend_url))
    }
}
