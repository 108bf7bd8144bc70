use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

/// Storage backend for published files.
///
/// Every existence check and write performed by the publisher goes through
/// this trait, so a run can be simulated in memory.
pub trait FileStore {
    /// Check whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the whole file at `path`.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write `content` to `path`, creating parent directories and replacing
    /// any previous content.
    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Create `path` with `content` only if nothing exists there yet.
    ///
    /// The check and the creation are a single exclusive open, so an
    /// existing file is never truncated. A file that cannot be filled is
    /// removed again.
    fn create_new(&self, path: &Path, content: &[u8]) -> io::Result<WriteResult>;

    /// Write according to the given overwrite rule.
    fn write_with(&self, path: &Path, content: &[u8], overwrite: Overwrite) -> io::Result<WriteResult> {
        match overwrite {
            Overwrite::Always => {
                self.write(path, content)?;
                Ok(WriteResult::Written)
            }
            Overwrite::IfMissing => self.create_new(path, content),
        }
    }
}

impl<T: FileStore + ?Sized> FileStore for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }

    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        (**self).write(path, content)
    }

    fn create_new(&self, path: &Path, content: &[u8]) -> io::Result<WriteResult> {
        (**self).create_new(path, content)
    }
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (machine-owned base files)
    Always,
    /// Only create if file doesn't exist (user-owned extensions)
    IfMissing,
}

/// [`FileStore`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl DiskStore {
    pub fn new() -> Self {
        Self
    }
}

fn create_parent(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

impl FileStore for DiskStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        create_parent(path)?;
        fs::write(path, content)
    }

    fn create_new(&self, path: &Path, content: &[u8]) -> io::Result<WriteResult> {
        create_parent(path)?;
        let file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(WriteResult::Skipped),
            Err(e) => return Err(e),
        };
        fill_new(path, file, content)?;
        Ok(WriteResult::Written)
    }
}

/// Write `content` into the freshly created `path`, removing it on failure
/// so a truncated file is never mistaken for one a user owns.
fn fill_new(path: &Path, mut file: impl Write, content: &[u8]) -> io::Result<()> {
    let result = file.write_all(content).and_then(|()| file.flush());
    if let Err(e) = result {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(e);
    }
    Ok(())
}

/// In-memory [`FileStore`], used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a file.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    /// Insert or replace a file.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.lock().insert(path.into(), content.into());
    }

    /// Get the content of a file, if present and valid UTF-8.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.get_bytes(path).and_then(|bytes| String::from_utf8(bytes).ok())
    }

    /// Get the raw bytes of a file, if present.
    pub fn get_bytes(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.lock().get(path.as_ref()).cloned()
    }

    /// All stored paths, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().keys().cloned().collect()
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, Vec<u8>>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FileStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.get_bytes(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )
        })?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        self.insert(path, content);
        Ok(())
    }

    fn create_new(&self, path: &Path, content: &[u8]) -> io::Result<WriteResult> {
        let mut files = self.lock();
        if files.contains_key(path) {
            return Ok(WriteResult::Skipped);
        }
        files.insert(path.to_path_buf(), content.to_vec());
        Ok(WriteResult::Written)
    }
}
