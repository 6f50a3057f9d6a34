use ideabank_core::{CredentialStore, DbCredentials, FileCredentialStore};

fn sample_credentials() -> DbCredentials {
    DbCredentials {
        server: "db.internal".to_string(),
        port: 3306,
        database: "ideas".to_string(),
        username: "app".to_string(),
        password: "s3cret".to_string(),
    }
}

#[test]
fn save_then_load_roundtrips_the_blob() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path());

    assert!(!store.exists());
    store.save(&sample_credentials()).unwrap();
    assert!(store.exists());

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded, sample_credentials());
}

#[test]
fn load_without_saved_credentials_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path());

    assert!(store.load().unwrap().is_none());
}

#[test]
fn save_replaces_previously_saved_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path());

    store.save(&sample_credentials()).unwrap();

    let mut replacement = sample_credentials();
    replacement.username = "other".to_string();
    replacement.password = "changed".to_string();
    store.save(&replacement).unwrap();

    assert_eq!(store.load().unwrap().unwrap(), replacement);
}

#[test]
fn remove_reports_whether_anything_was_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path());

    assert!(!store.remove().unwrap());

    store.save(&sample_credentials()).unwrap();
    assert!(store.remove().unwrap());
    assert!(!store.exists());
    assert!(store.load().unwrap().is_none());
}

#[test]
fn connection_string_renders_all_fields() {
    assert_eq!(
        sample_credentials().connection_string(),
        "server=db.internal;port=3306;database=ideas;user=app;password=s3cret"
    );
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("config").join("ideabank");
    let store = FileCredentialStore::new(&nested);

    store.save(&sample_credentials()).unwrap();
    assert!(store.path().is_file());
}

#[cfg(unix)]
#[test]
fn saved_blob_is_restricted_to_owner() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path());
    store.save(&sample_credentials()).unwrap();

    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
