use super::*;
use crate::util::storage::MemoryStorage;

#[test]
fn normalize_username_trims_and_rejects_blank() {
    assert_eq!(normalize_username("  老王 "), Some("老王".to_owned()));
    assert_eq!(normalize_username("   "), None);
    assert_eq!(normalize_username(""), None);
}

#[test]
fn normalize_username_caps_length() {
    let long = "a".repeat(MAX_USERNAME_CHARS + 10);
    assert_eq!(normalize_username(&long).map(|n| n.chars().count()), Some(MAX_USERNAME_CHARS));
}

#[test]
fn sign_in_persists_and_restore_reads_back() {
    let store = MemoryStorage::new();
    let mut auth = AuthState::default();
    assert_eq!(auth.sign_in(&store, " farmer "), Some("farmer".to_owned()));
    assert_eq!(auth.user.as_deref(), Some("farmer"));
    assert_eq!(AuthState::restore(&store).user.as_deref(), Some("farmer"));
}

#[test]
fn sign_in_with_blank_name_changes_nothing() {
    let store = MemoryStorage::new();
    let mut auth = AuthState::default();
    assert_eq!(auth.sign_in(&store, "  "), None);
    assert_eq!(auth, AuthState::default());
    assert_eq!(store.get(CURRENT_USER_KEY), None);
}

#[test]
fn sign_out_clears_saved_name() {
    let store = MemoryStorage::new();
    let mut auth = AuthState::default();
    auth.sign_in(&store, "farmer");
    auth.sign_out(&store);
    assert_eq!(auth.user, None);
    assert_eq!(AuthState::restore(&store), AuthState::default());
}
