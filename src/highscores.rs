//! Best-score persistence
//!
//! A single number survives between runs. Storage is best effort: a missing,
//! unreadable or corrupt value loads as 0, and failed writes are logged and
//! dropped so they never reach the game.

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

/// LocalStorage key, also used as the file name on native
pub const STORAGE_KEY: &str = "flappy_best_score";

/// Somewhere to keep the best score
pub trait BestScoreStore {
    /// Stored best score, 0 when absent or unreadable
    fn load(&self) -> u32;
    /// Store a new best score; failures are swallowed
    fn save(&mut self, best: u32);
}

impl<S: BestScoreStore + ?Sized> BestScoreStore for Box<S> {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn save(&mut self, best: u32) {
        (**self).save(best)
    }
}

/// Coerce a stored value into a score
///
/// Accepts any finite decimal number; fractions truncate, and missing,
/// negative, non-finite or unparsable input becomes 0.
pub fn parse_best_score(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 0;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// In-process store holding the raw stored text
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
    /// Simulate unavailable storage: writes are dropped
    pub read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with arbitrary (possibly corrupt) text
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            read_only: false,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        parse_best_score(self.raw.as_deref())
    }

    fn save(&mut self, best: u32) {
        if self.read_only {
            log::warn!("Best score not saved: storage is read-only");
            return;
        }
        self.raw = Some(best.to_string());
    }
}

/// Best score kept as plain text in a file (native only)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Per-user data directory location, if the platform has one
    pub fn default_location() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "flappy-gates")
            .map(|dirs| dirs.data_dir().join(STORAGE_KEY))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl BestScoreStore for FileStore {
    fn load(&self) -> u32 {
        let raw = std::fs::read_to_string(&self.path).ok();
        let best = parse_best_score(raw.as_deref());
        log::info!("Loaded best score {} from {}", best, self.path.display());
        best
    }

    fn save(&mut self, best: u32) {
        let result = self
            .path
            .parent()
            .map_or(Ok(()), std::fs::create_dir_all)
            .and_then(|_| std::fs::write(&self.path, best.to_string()));
        match result {
            Ok(()) => log::info!("Best score {} saved", best),
            Err(e) => log::warn!("Best score not saved to {}: {}", self.path.display(), e),
        }
    }
}

/// Best score in the browser's LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl BestScoreStore for LocalStorageStore {
    fn load(&self) -> u32 {
        let raw = Self::storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
        parse_best_score(raw.as_deref())
    }

    fn save(&mut self, best: u32) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(STORAGE_KEY, &best.to_string()).is_err() {
                    log::warn!("Best score not saved: LocalStorage rejected the write");
                }
            }
            None => log::warn!("Best score not saved: LocalStorage unavailable"),
        }
    }
}
