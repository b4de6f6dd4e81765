//! Atomic file operations for TOML and JSON documents.
//!
//! Writes go to a sibling temp file that is fsynced and renamed over the
//! target, so readers never observe a half-written document.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Errors that can occur during atomic file operations.
#[derive(Debug)]
pub enum AtomicFileError {
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML deserialization error.
    TomlError(toml::de::Error),
    /// TOML serialization error.
    TomlSerError(toml::ser::Error),
    /// JSON (de)serialization error.
    JsonError(serde_json::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for AtomicFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicFileError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicFileError::TomlError(e) => write!(f, "TOML parse error: {}", e),
            AtomicFileError::TomlSerError(e) => write!(f, "TOML serialization error: {}", e),
            AtomicFileError::JsonError(e) => write!(f, "JSON error: {}", e),
            AtomicFileError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicFileError {}

impl From<std::io::Error> for AtomicFileError {
    fn from(e: std::io::Error) -> Self {
        AtomicFileError::IoError(e)
    }
}

impl From<toml::de::Error> for AtomicFileError {
    fn from(e: toml::de::Error) -> Self {
        AtomicFileError::TomlError(e)
    }
}

impl From<toml::ser::Error> for AtomicFileError {
    fn from(e: toml::ser::Error) -> Self {
        AtomicFileError::TomlSerError(e)
    }
}

impl From<serde_json::Error> for AtomicFileError {
    fn from(e: serde_json::Error) -> Self {
        AtomicFileError::JsonError(e)
    }
}

impl From<AtomicFileError> for mindtrack_core::MindTrackError {
    fn from(e: AtomicFileError) -> Self {
        match e {
            AtomicFileError::IoError(io) => io.into(),
            AtomicFileError::TomlError(de) => de.into(),
            AtomicFileError::TomlSerError(ser) => ser.into(),
            AtomicFileError::JsonError(json) => json.into(),
            AtomicFileError::LockError(message) => Self::io(message),
        }
    }
}

/// On-disk encoding of an [`AtomicFile`].
pub trait FileFormat {
    fn decode<T: DeserializeOwned>(content: &str) -> Result<T, AtomicFileError>;
    fn encode<T: Serialize>(data: &T) -> Result<String, AtomicFileError>;
}

/// Pretty-printed TOML.
pub struct Toml;

impl FileFormat for Toml {
    fn decode<T: DeserializeOwned>(content: &str) -> Result<T, AtomicFileError> {
        Ok(toml::from_str(content)?)
    }

    fn encode<T: Serialize>(data: &T) -> Result<String, AtomicFileError> {
        Ok(toml::to_string_pretty(data)?)
    }
}

/// Pretty-printed JSON.
pub struct Json;

impl FileFormat for Json {
    fn decode<T: DeserializeOwned>(content: &str) -> Result<T, AtomicFileError> {
        Ok(serde_json::from_str(content)?)
    }

    fn encode<T: Serialize>(data: &T) -> Result<String, AtomicFileError> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// A handle to a document file with atomic saves and locked updates.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: File locking serializes read-modify-write updates
/// - **Durability**: Explicit fsync before rename
pub struct AtomicFile<T, F> {
    path: PathBuf,
    private: bool,
    _phantom: PhantomData<(T, F)>,
}

/// TOML document file.
pub type AtomicTomlFile<T> = AtomicFile<T, Toml>;

/// JSON document file.
pub type AtomicJsonFile<T> = AtomicFile<T, Json>;

impl<T, F> AtomicFile<T, F>
where
    T: Serialize + DeserializeOwned,
    F: FileFormat,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            private: false,
            _phantom: PhantomData,
        }
    }

    /// Restricts the saved file to the owner (mode 600 on Unix).
    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and decodes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and decoded
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicFileError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(F::decode(&content)?))
    }

    /// Saves data atomically.
    pub fn save(&self, data: &T) -> Result<(), AtomicFileError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let encoded = F::encode(data)?;

        let tmp_path = self.get_temp_path()?;
        let mut tmp_file = open_temp(&tmp_path, self.private)?;
        tmp_file.write_all(encoded.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        if self.private {
            restrict_permissions(&tmp_path)?;
        }

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Performs a locked read-modify-write.
    ///
    /// `f` receives the current data (or `default_value` when the file is
    /// missing). If it returns `Ok`, the result is saved atomically and
    /// returned.
    pub fn update<R, U>(&self, default_value: T, f: U) -> Result<R, AtomicFileError>
    where
        U: FnOnce(&mut T) -> Result<R, AtomicFileError>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        let result = f(&mut data)?;
        self.save(&data)?;

        Ok(result)
    }

    /// Moves the file aside to `<name>.corrupt` and returns the new path.
    pub fn quarantine(&self) -> Result<PathBuf, AtomicFileError> {
        let mut corrupt = self.path.as_os_str().to_owned();
        corrupt.push(".corrupt");
        let corrupt = PathBuf::from(corrupt);
        fs::rename(&self.path, &corrupt)?;
        Ok(corrupt)
    }

    fn get_temp_path(&self) -> Result<PathBuf, AtomicFileError> {
        let parent = self.path.parent().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;

        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// Creates the temp file, owner-only from the start when `private`.
fn open_temp(path: &Path, private: bool) -> Result<File, AtomicFileError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        if private {
            options.mode(0o600);
        }
    }
    #[cfg(not(unix))]
    let _ = private;
    Ok(options.open(path)?)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), AtomicFileError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), AtomicFileError> {
    Ok(())
}

/// Exclusive lock guard, released on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicFileError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| AtomicFileError::LockError(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // best effort
        let _ = fs::remove_file(&self.lock_path);
    }
}
