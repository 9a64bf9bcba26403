use std::io;

use super::Storage;

/// Browser LocalStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> io::Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Unsupported, "LocalStorage unavailable"))
    }
}

impl Storage for LocalStorage {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| io::Error::other(format!("LocalStorage read failed: {e:?}")))
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| io::Error::other(format!("LocalStorage write failed: {e:?}")))
    }
}
