//! Preferences file, credential store, and settings assembly.

use std::cell::Cell;

use linear_viewer::config::{
    CredentialStore, FileCredentialStore, Preferences, Settings, CREDENTIAL_SERVICE,
    DEFAULT_BRANCH_FORMAT,
};
use linear_viewer::error::{Result, ViewerError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn env_key_set() -> bool {
    std::env::var("LINEAR_API_KEY").is_ok_and(|k| !k.trim().is_empty())
}

struct BrokenStore {
    reads: Cell<usize>,
}

impl CredentialStore for BrokenStore {
    fn get(&self, _service: &str) -> Result<Option<String>> {
        self.reads.set(self.reads.get() + 1);
        Err(ViewerError::NoConfigDir)
    }

    fn set(&self, _service: &str, _secret: Option<&str>) -> Result<()> {
        Err(ViewerError::NoConfigDir)
    }
}

#[test]
fn missing_preferences_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let prefs = Preferences::load_from(&dir.path().join("preferences.toml")).unwrap();

    assert_eq!(prefs, Preferences::default());
    assert!(prefs.show_only_my_issues);
    assert_eq!(prefs.branch_format(), DEFAULT_BRANCH_FORMAT);
}

#[test]
fn preferences_survive_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("preferences.toml");
    let prefs = Preferences {
        show_only_my_issues: false,
        branch_name_format: "feature/{id}-{title}".to_string(),
    };

    prefs.save_to(&path).unwrap();

    assert_eq!(Preferences::load_from(&path).unwrap(), prefs);
}

#[test]
fn malformed_preferences_report_the_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.toml");
    std::fs::write(&path, "show_only_my_issues = \"maybe\"").unwrap();

    match Preferences::load_from(&path) {
        Err(ViewerError::ConfigParse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn credential_store_sets_reads_and_removes() {
    let dir = TempDir::new().unwrap();
    let store = FileCredentialStore::new(dir.path().join("credentials.toml"));

    assert_eq!(store.get(CREDENTIAL_SERVICE).unwrap(), None);

    store.set(CREDENTIAL_SERVICE, Some("lin_api_123")).unwrap();
    store.set("Other.service", Some("keep")).unwrap();
    assert_eq!(store.get(CREDENTIAL_SERVICE).unwrap().as_deref(), Some("lin_api_123"));

    store.set(CREDENTIAL_SERVICE, None).unwrap();
    assert_eq!(store.get(CREDENTIAL_SERVICE).unwrap(), None);
    assert_eq!(store.get("Other.service").unwrap().as_deref(), Some("keep"));
}

#[cfg(unix)]
#[test]
fn credential_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let store = FileCredentialStore::new(dir.path().join("credentials.toml"));
    store.set(CREDENTIAL_SERVICE, Some("secret")).unwrap();

    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[cfg(unix)]
#[test]
fn existing_readable_credential_file_is_narrowed() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("credentials.toml");
    std::fs::write(&path, "").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    let store = FileCredentialStore::new(&path);
    store.set(CREDENTIAL_SERVICE, Some("secret")).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(store.get(CREDENTIAL_SERVICE).unwrap().as_deref(), Some("secret"));
}

#[test]
fn settings_take_key_from_store() {
    if env_key_set() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let store = FileCredentialStore::new(dir.path().join("credentials.toml"));
    store.set(CREDENTIAL_SERVICE, Some("lin_api_456")).unwrap();

    let settings = Settings::load_with(Preferences::default(), &store).unwrap();

    assert_eq!(settings.api_key.as_deref(), Some("lin_api_456"));
    assert!(settings.has_api_key());
}

#[test]
fn unreadable_store_means_no_key() {
    if env_key_set() {
        return;
    }
    let store = BrokenStore { reads: Cell::new(0) };

    let settings = Settings::load_with(Preferences::default(), &store).unwrap();

    assert_eq!(settings.api_key, None);
    assert!(!settings.has_api_key());
    assert_eq!(store.reads.get(), 1);
}
