//! Tournament persistence.
//!
//! Saving is an optimistic update: the stored version must still match the
//! version the caller loaded, otherwise the save is rejected with
//! [`TournamentError::VersionConflict`] and nothing is written. The check and
//! the write happen under one exclusive lock per tournament, so of several
//! saves made from the same loaded copy exactly one is accepted.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{TournamentError, TournamentResult};
use crate::tournament::Tournament;

/// Load/save access to tournaments, keyed by name.
pub trait TournamentStore {
    fn load(&self, name: &str) -> TournamentResult<Tournament>;

    /// Store a new tournament. Fails if the name is taken.
    fn create(&self, tournament: &Tournament) -> TournamentResult<()>;

    /// Store `tournament` if nobody saved it since it was loaded, then bump
    /// its version.
    fn save(&self, tournament: &mut Tournament) -> TournamentResult<()>;

    /// Names of all stored tournaments, sorted.
    fn list(&self) -> TournamentResult<Vec<String>>;
}

fn check_version(stored: &Tournament, tournament: &Tournament) -> TournamentResult<()> {
    if stored.version != tournament.version {
        warn!(
            tournament = %tournament.name,
            expected = tournament.version,
            actual = stored.version,
            "Rejected stale save"
        );
        return Err(TournamentError::VersionConflict {
            name: tournament.name.clone(),
            expected: tournament.version,
            actual: stored.version,
        });
    }
    Ok(())
}

/// Attempts at taking a tournament lock before giving up with
/// [`TournamentError::Locked`].
const LOCK_ATTEMPTS: u32 = 1000;
const LOCK_RETRY: Duration = Duration::from_millis(5);

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Exclusive `<stem>.lock` file, removed again on drop.
struct WriteLock {
    path: PathBuf,
}

impl WriteLock {
    fn acquire(path: PathBuf, name: &str) -> TournamentResult<Self> {
        for _ in 0..LOCK_ATTEMPTS {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => return Ok(Self { path }),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => std::thread::sleep(LOCK_RETRY),
                Err(e) => return Err(e.into()),
            }
        }
        warn!(lock = %path.display(), "Gave up waiting for tournament lock");
        Err(TournamentError::Locked(name.to_string()))
    }
}

impl Drop for WriteLock {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(lock = %self.path.display(), error = %e, "Failed to release tournament lock");
        }
    }
}

/// One pretty-printed JSON file per tournament inside `dir`.
///
/// Writers (`create`, `save`) serialize on a `<stem>.lock` file next to the
/// data file. Readers never lock: files are replaced by rename, so a reader
/// sees either the old or the new contents.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> TournamentResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> TournamentResult<PathBuf> {
        Ok(self.dir.join(format!("{}.json", file_stem(name)?)))
    }

    fn lock(&self, path: &Path, name: &str) -> TournamentResult<WriteLock> {
        WriteLock::acquire(path.with_extension("lock"), name)
    }

    /// The tournament stored at `path`, if the file exists.
    fn read(&self, path: &Path) -> TournamentResult<Option<Tournament>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// The tournament stored under exactly `name`. A different name sharing
    /// the file stem counts as missing.
    fn read_named(&self, path: &Path, name: &str) -> TournamentResult<Tournament> {
        match self.read(path)? {
            Some(tournament) if tournament.name == name => Ok(tournament),
            _ => Err(TournamentError::NotFound(name.to_string())),
        }
    }

    /// Write to a temp file unique to this write, then rename over the real file.
    fn write(&self, path: &Path, tournament: &Tournament) -> TournamentResult<()> {
        let json = serde_json::to_string_pretty(tournament)?;
        let tmp = path.with_extension(format!(
            "{}-{}.tmp",
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        let result = std::fs::write(&tmp, json).and_then(|()| std::fs::rename(&tmp, path));
        if let Err(e) = result {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!(path = %path.display(), version = tournament.version, "Tournament written");
        Ok(())
    }
}

impl TournamentStore for JsonFileStore {
    fn load(&self, name: &str) -> TournamentResult<Tournament> {
        let path = self.path_for(name)?;
        self.read_named(&path, name)
    }

    fn create(&self, tournament: &Tournament) -> TournamentResult<()> {
        let path = self.path_for(&tournament.name)?;
        let _lock = self.lock(&path, &tournament.name)?;

        if let Some(existing) = self.read(&path)? {
            return Err(if existing.name == tournament.name {
                TournamentError::AlreadyExists(tournament.name.clone())
            } else {
                TournamentError::NameClash {
                    name: tournament.name.clone(),
                    existing: existing.name,
                }
            });
        }
        self.write(&path, tournament)
    }

    fn save(&self, tournament: &mut Tournament) -> TournamentResult<()> {
        let path = self.path_for(&tournament.name)?;
        let _lock = self.lock(&path, &tournament.name)?;

        let stored = self.read_named(&path, &tournament.name)?;
        check_version(&stored, tournament)?;

        tournament.version += 1;
        if let Err(e) = self.write(&path, tournament) {
            tournament.version -= 1;
            return Err(e);
        }
        Ok(())
    }

    /// Skips `.json` files that are not tournaments written by this store.
    fn list(&self) -> TournamentResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let tournament = match self.read(&path) {
                Ok(Some(tournament)) => tournament,
                Ok(None) => continue,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable tournament file");
                    continue;
                }
            };
            if self.path_for(&tournament.name).ok().as_deref() != Some(path.as_path()) {
                warn!(path = %path.display(), tournament = %tournament.name, "Skipping misnamed tournament file");
                continue;
            }
            names.push(tournament.name);
        }
        names.sort();
        Ok(names)
    }
}

/// Turn a tournament name into a safe file stem.
///
/// ASCII letters, digits and `-` are kept (lowercased), everything else
/// becomes `_`.
pub fn file_stem(name: &str) -> TournamentResult<String> {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() || stem.chars().all(|c| c == '_') {
        return Err(TournamentError::InvalidName(name.to_string()));
    }
    Ok(stem)
}

/// In-process store, used by simulations and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tournaments: Mutex<BTreeMap<String, Tournament>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Tournament>> {
        // Every mutation is a single insert, so a poisoned map is still consistent.
        self.tournaments.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TournamentStore for MemoryStore {
    fn load(&self, name: &str) -> TournamentResult<Tournament> {
        self.lock()
            .get(name)
            .cloned()
            .ok_or_else(|| TournamentError::NotFound(name.to_string()))
    }

    fn create(&self, tournament: &Tournament) -> TournamentResult<()> {
        let mut map = self.lock();
        if map.contains_key(&tournament.name) {
            return Err(TournamentError::AlreadyExists(tournament.name.clone()));
        }
        map.insert(tournament.name.clone(), tournament.clone());
        Ok(())
    }

    fn save(&self, tournament: &mut Tournament) -> TournamentResult<()> {
        let mut map = self.lock();
        let stored = map
            .get(&tournament.name)
            .ok_or_else(|| TournamentError::NotFound(tournament.name.clone()))?;
        check_version(stored, tournament)?;

        tournament.version += 1;
        map.insert(tournament.name.clone(), tournament.clone());
        Ok(())
    }

    fn list(&self) -> TournamentResult<Vec<String>> {
        Ok(self.lock().keys().cloned().collect())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
