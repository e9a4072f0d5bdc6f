use crate::storage::{DirEntry, Storage};
use std::fs;
use std::io::{self, BufWriter, ErrorKind, Read, Write};
use std::path::{Component, Path, PathBuf};

/// A [`Storage`] rooted at a directory of the host filesystem.
#[derive(Clone, Debug)]
pub struct OsStorage {
    root: PathBuf,
}

impl OsStorage {
    /// Creates a storage rooted at `root`, which must already exist.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));

        // Never escape the root
        if relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir))
        {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("path escapes the storage root: {path}"),
            ));
        }
        Ok(self.root.join(relative))
    }
}

/// Rooted at [`std::env::temp_dir`].
impl Default for OsStorage {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

impl Storage for OsStorage {
    fn create_dir(&self, path: &str) -> io::Result<()> {
        fs::create_dir_all(self.resolve(path)?)
    }

    fn create(&self, path: &str) -> io::Result<Box<dyn Write + '_>> {
        let file = fs::File::create(self.resolve(path)?)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        let file = fs::File::open(self.resolve(path)?)?;
        Ok(Box::new(io::BufReader::new(file)))
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let mut entries = fs::read_dir(self.resolve(path)?)?
            .map(|entry| {
                let entry = entry?;
                Ok(DirEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    is_dir: entry.file_type()?.is_dir(),
                })
            })
            .collect::<io::Result<Vec<_>>>()?;

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn remove_all(&self, path: &str) -> io::Result<()> {
        let path = self.resolve(path)?;

        let result = match fs::symlink_metadata(&path) {
            Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(&path),
            Ok(_) => fs::remove_file(&path),
            Err(error) => Err(error),
        };
        match result {
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            result => result,
        }
    }
}
