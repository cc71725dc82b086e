use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};

/// Service name the API key is stored under.
pub const CREDENTIAL_SERVICE: &str = "LinearViewer.apiKey";

pub const DEFAULT_BRANCH_FORMAT: &str = "{id}-{title}";

const API_KEY_ENV: &str = "LINEAR_API_KEY";

/// Display preferences persisted between runs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Preferences {
    pub show_only_my_issues: bool,
    pub branch_name_format: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            show_only_my_issues: true,
            branch_name_format: DEFAULT_BRANCH_FORMAT.to_string(),
        }
    }
}

impl Preferences {
    pub fn load() -> Result<Self> {
        Self::load_from(&config_dir()?.join("preferences.toml"))
    }

    /// Missing file means defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| ViewerError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ViewerError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = config_dir()?.join("preferences.toml");
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        write_config_file(path, &contents)
    }

    /// Branch pattern, falling back to the default when blank.
    pub fn branch_format(&self) -> &str {
        if self.branch_name_format.trim().is_empty() {
            DEFAULT_BRANCH_FORMAT
        } else {
            &self.branch_name_format
        }
    }
}

/// Secret store keyed by service name. A missing entry is a valid state.
pub trait CredentialStore {
    fn get(&self, service: &str) -> Result<Option<String>>;
    fn set(&self, service: &str, secret: Option<&str>) -> Result<()>;
}

/// Credential store backed by a TOML table of `service = "secret"` pairs.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Result<Self> {
        Ok(Self::new(config_dir()?.join("credentials.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents =
            std::fs::read_to_string(&self.path).map_err(|e| ViewerError::ConfigRead {
                path: self.path.clone(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| ViewerError::ConfigParse {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, service: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(service))
    }

    fn set(&self, service: &str, secret: Option<&str>) -> Result<()> {
        let mut entries = self.read_all()?;
        match secret {
            Some(secret) => {
                entries.insert(service.to_string(), secret.to_string());
            }
            None => {
                entries.remove(service);
            }
        }

        let contents = toml::to_string(&entries)?;
        write_private_file(&self.path, &contents)
    }
}

/// Everything the fetch client and branch generator read, built once and
/// passed explicitly.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub preferences: Preferences,
    pub api_key: Option<String>,
}

impl Settings {
    pub fn new(preferences: Preferences, api_key: Option<String>) -> Self {
        Self {
            preferences,
            api_key,
        }
    }

    /// Load preferences and the stored key from the default locations.
    pub fn load() -> Result<Self> {
        let preferences = Preferences::load()?;
        let store = FileCredentialStore::default_location()?;
        Self::load_with(preferences, &store)
    }

    /// Env var takes precedence over the credential store. An unreadable
    /// store is logged and treated as "no key".
    pub fn load_with(preferences: Preferences, store: &dyn CredentialStore) -> Result<Self> {
        let api_key = match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Some(key),
            _ => match store.get(CREDENTIAL_SERVICE) {
                Ok(key) => key,
                Err(e) => {
                    tracing::warn!("Failed to read stored API key: {e}");
                    None
                }
            },
        };

        Ok(Self::new(preferences, api_key))
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "linear-viewer")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(ViewerError::NoConfigDir)
}

fn write_config_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ViewerError::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, contents).map_err(|e| ViewerError::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Like `write_config_file`, but the file is owner-only from creation, and a
/// file that already exists is narrowed to 0600 before the secret goes in.
#[cfg(unix)]
fn write_private_file(path: &Path, contents: &str) -> Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let write_err = |e| ViewerError::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .map_err(write_err)?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))
        .map_err(write_err)?;
    file.write_all(contents.as_bytes()).map_err(write_err)
}

#[cfg(not(unix))]
fn write_private_file(path: &Path, contents: &str) -> Result<()> {
    write_config_file(path, contents)
}
