use gloo_storage::{LocalStorage, Storage};

/// Local-storage keys mirrored from the original client so existing browser
/// profiles keep their sessions across the rollout.
pub mod keys {
    pub const AUTH_TOKEN: &str = "authToken";
    pub const REFRESH_TOKEN: &str = "refreshToken";
    pub const USER_DATA: &str = "userData";
    pub const USER_PROFILE: &str = "userProfile";
    pub const TOKEN_TIMESTAMP: &str = "tokenTimestamp";
    pub const SELECTED_STORE: &str = "selectedStore";
}

/// Per-feature scratch keys registered with the session manager. Pages read
/// and write these only through the manager, and teardown clears them all.
pub const SCRATCH_KEYS: [&str; 4] = ["noPago", "cliente", "liquidarFecha", "abono"];

/// Raw string key/value storage backing a session.
///
/// The browser implementation is process-global local storage; tests use an
/// in-memory map so the expiry logic runs natively.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn delete(&self, key: &str);
}

/// Browser local storage. Uses the raw `web_sys::Storage` item API so plain
/// strings land unquoted, matching the format the original client wrote.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl StorageBackend for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) {
        if LocalStorage::raw().set_item(key, value).is_err() {
            log::error!("local storage write failed for key {key}");
        }
    }

    fn delete(&self, key: &str) {
        let _ = LocalStorage::raw().remove_item(key);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::StorageBackend;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory stand-in for browser local storage.
    #[derive(Debug, Default)]
    pub struct MemoryStorage {
        items: RefCell<HashMap<String, String>>,
    }

    impl MemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn len(&self) -> usize {
            self.items.borrow().len()
        }
    }

    impl StorageBackend for MemoryStorage {
        fn read(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }

        fn write(&self, key: &str, value: &str) {
            self.items.borrow_mut().insert(key.to_string(), value.to_string());
        }

        fn delete(&self, key: &str) {
            self.items.borrow_mut().remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryStorage;
    use super::*;

    #[test]
    fn memory_storage_read_write_delete() {
        let storage = MemoryStorage::new();
        assert!(storage.read(keys::AUTH_TOKEN).is_none());

        storage.write(keys::AUTH_TOKEN, "tok-abc");
        assert_eq!(storage.read(keys::AUTH_TOKEN).as_deref(), Some("tok-abc"));

        storage.delete(keys::AUTH_TOKEN);
        assert!(storage.read(keys::AUTH_TOKEN).is_none());
        assert_eq!(storage.len(), 0);
    }

    #[test]
    fn scratch_keys_match_legacy_client() {
        assert_eq!(SCRATCH_KEYS, ["noPago", "cliente", "liquidarFecha", "abono"]);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn browser_storage_stores_raw_strings() {
        let storage = BrowserStorage;
        storage.write(keys::AUTH_TOKEN, "tok-abc");
        // Raw item API must not JSON-quote plain strings.
        assert_eq!(storage.read(keys::AUTH_TOKEN).as_deref(), Some("tok-abc"));
        storage.delete(keys::AUTH_TOKEN);
        assert!(storage.read(keys::AUTH_TOKEN).is_none());
    }
}
