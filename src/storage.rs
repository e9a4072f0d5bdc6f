//! Staging-area storage backends.
//!
//! While an [`Epub`](crate::Epub) is written, every archive entry is first staged
//! under a uniquely named scratch directory of a [`Storage`] backend, then
//! streamed into the archive and removed.
//!
//! Paths are relative and `/`-separated regardless of the host platform.
//!
//! Available backends:
//! - [`OsStorage`]: A directory of the host filesystem (the system temp dir by default).
//! - [`MemoryStorage`]: Entirely in-memory, for tests or sandboxed execution.

mod memory;
mod os;

pub use self::memory::MemoryStorage;
pub use self::os::OsStorage;

use std::io::{self, Read, Write};

/// An entry listed by [`Storage::read_dir`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DirEntry {
    /// The entry name (last path component).
    pub name: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

impl DirEntry {
    pub(crate) fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub(crate) fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// A hierarchical file namespace used as a staging area.
///
/// Implementations must be usable from several threads at once;
/// concurrent writers always operate on distinct paths.
pub trait Storage: Send + Sync {
    /// Creates a directory and any missing parents.
    fn create_dir(&self, path: &str) -> io::Result<()>;

    /// Creates (or truncates) a file, returning a writer to it.
    ///
    /// The parent directory must exist.
    fn create(&self, path: &str) -> io::Result<Box<dyn Write + '_>>;

    /// Opens a file for reading.
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>>;

    /// Lists the entries of a directory, sorted by name.
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>>;

    /// Removes a file or a directory with all of its contents.
    ///
    /// Removing a path that does not exist is not an error.
    fn remove_all(&self, path: &str) -> io::Result<()>;

    /// Creates (or truncates) a file with the given content.
    fn write_file(&self, path: &str, data: &[u8]) -> io::Result<()> {
        let mut file = self.create(path)?;
        file.write_all(data)?;
        file.flush()
    }

    /// Reads the entire content of a file.
    fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        let mut data = Vec::new();
        self.open(path)?.read_to_end(&mut data)?;
        Ok(data)
    }
}
