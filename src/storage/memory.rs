use crate::storage::{DirEntry, Storage};
use crate::util::sync::Lock;
use std::collections::BTreeMap;
use std::io::{self, Cursor, ErrorKind, Read, Write};

#[derive(Debug)]
enum Node {
    Dir,
    File(Vec<u8>),
}

/// A [`Storage`] held entirely in memory.
///
/// Useful for tests and for environments without a writable filesystem.
/// The root directory (`""`) always exists.
#[derive(Default)]
pub struct MemoryStorage {
    nodes: Lock<BTreeMap<String, Node>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.nodes.lock().is_empty()
    }

    fn ensure_dir(nodes: &BTreeMap<String, Node>, path: &str) -> io::Result<()> {
        match nodes.get(path) {
            _ if path.is_empty() => Ok(()),
            Some(Node::Dir) => Ok(()),
            Some(Node::File(_)) => Err(io::Error::new(
                ErrorKind::NotADirectory,
                format!("not a directory: {path}"),
            )),
            None => Err(not_found(path)),
        }
    }
}

impl std::fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStorage")
            .field("entries", &self.nodes.lock().len())
            .finish()
    }
}

impl Storage for MemoryStorage {
    fn create_dir(&self, path: &str) -> io::Result<()> {
        let path = normalize(path);
        let mut nodes = self.nodes.lock();
        let mut end = 0;

        // Create every ancestor: `a`, `a/b`, `a/b/c`
        while end < path.len() {
            end = path[end..]
                .find('/')
                .map_or(path.len(), |index| end + index);

            let ancestor = &path[..end];
            match nodes.get(ancestor) {
                Some(Node::File(_)) => {
                    return Err(io::Error::new(
                        ErrorKind::AlreadyExists,
                        format!("a file exists at: {ancestor}"),
                    ));
                }
                Some(Node::Dir) => {}
                None => {
                    nodes.insert(ancestor.to_owned(), Node::Dir);
                }
            }
            end += 1;
        }
        Ok(())
    }

    fn create(&self, path: &str) -> io::Result<Box<dyn Write + '_>> {
        let path = normalize(path).to_owned();
        {
            let mut nodes = self.nodes.lock();
            Self::ensure_dir(&nodes, crate::util::uri::parent(&path))?;

            if let Some(Node::Dir) = nodes.get(&path) {
                return Err(io::Error::new(
                    ErrorKind::IsADirectory,
                    format!("is a directory: {path}"),
                ));
            }
            nodes.insert(path.clone(), Node::File(Vec::new()));
        }
        Ok(Box::new(MemoryFileWriter {
            storage: self,
            path,
        }))
    }

    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        let path = normalize(path);

        match self.nodes.lock().get(path) {
            Some(Node::File(data)) => Ok(Box::new(Cursor::new(data.clone()))),
            Some(Node::Dir) => Err(io::Error::new(
                ErrorKind::IsADirectory,
                format!("is a directory: {path}"),
            )),
            None => Err(not_found(path)),
        }
    }

    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let path = normalize(path);
        let nodes = self.nodes.lock();
        Self::ensure_dir(&nodes, path)?;

        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}/")
        };

        // Keys are ordered, so direct children are already sorted by name
        Ok(nodes
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter_map(|(key, node)| {
                let name = &key[prefix.len()..];
                (!name.is_empty() && !name.contains('/')).then(|| match node {
                    Node::Dir => DirEntry::dir(name),
                    Node::File(_) => DirEntry::file(name),
                })
            })
            .collect())
    }

    fn remove_all(&self, path: &str) -> io::Result<()> {
        let path = normalize(path);
        let prefix = format!("{path}/");

        self.nodes
            .lock()
            .retain(|key, _| !path.is_empty() && key != path && !key.starts_with(&prefix));
        Ok(())
    }
}

/// Appends to a file entry as bytes are written.
struct MemoryFileWriter<'a> {
    storage: &'a MemoryStorage,
    path: String,
}

impl Write for MemoryFileWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.storage.nodes.lock().get_mut(&self.path) {
            Some(Node::File(data)) => {
                data.extend_from_slice(buf);
                Ok(buf.len())
            }
            // Removed while open
            _ => Err(not_found(&self.path)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn normalize(path: &str) -> &str {
    path.trim_matches('/')
}

fn not_found(path: &str) -> io::Error {
    io::Error::new(ErrorKind::NotFound, format!("no such file or directory: {path}"))
}
