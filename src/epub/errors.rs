//! Error-related types for an [`Epub`](super::Epub).

use crate::grab::GrabError;
use std::io;
use std::path::PathBuf;

/// Alias for `Result<T, EpubError>`.
pub type EpubResult<T> = Result<T, EpubError>;

/// Possible errors when assembling or writing an [`Epub`](super::Epub).
///
/// None of these are retried internally;
/// each surfaces from the call that triggered it.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum EpubError {
    /// A filename is already registered within the same namespace.
    ///
    /// Resource filenames are unique per category (stylesheets, fonts, images,
    /// videos, audio), while section filenames are unique across all sections
    /// and subsections.
    #[error("[FilenameAlreadyUsed - `{filename}`]: Filename is already in use")]
    FilenameAlreadyUsed {
        /// The colliding filename.
        filename: String,
    },

    /// An explicitly requested filename cannot be used as a plain file name
    /// inside the archive, such as `..` or a name containing a path separator.
    #[error("[InvalidFilename - `{0}`]: Filename is not a plain file name")]
    InvalidFilename(String),

    /// A subsection was added under a filename matching no top-level section.
    #[error("[ParentDoesNotExist - `{0}`]: No top-level section has this filename")]
    ParentDoesNotExist(String),

    /// A resource source could not be retrieved.
    #[error("[FileRetrieval - `{source_locator}`]: {source}")]
    FileRetrieval {
        /// The source locator given when the resource was added.
        source_locator: String,
        /// The root cause of the error.
        source: GrabError,
    },

    /// The destination file could not be created.
    #[error("[UnableToCreateArchive - `{path:?}`]: {source}")]
    UnableToCreateArchive {
        /// The destination path.
        path: PathBuf,
        /// The root cause of the error.
        source: io::Error,
    },

    /// An IO exception occurred during writing.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl EpubError {
    pub(crate) fn filename_already_used(filename: impl Into<String>) -> Self {
        Self::FilenameAlreadyUsed {
            filename: filename.into(),
        }
    }

    pub(crate) fn file_retrieval(source_locator: &str, source: GrabError) -> Self {
        Self::FileRetrieval {
            source_locator: source_locator.to_owned(),
            source,
        }
    }
}

/// An error from [`Epub::write_to`](super::Epub::write_to),
/// carrying the number of bytes that reached the destination before it occurred.
#[derive(thiserror::Error, Debug)]
#[error("{source} ({written} bytes written)")]
pub struct WriteToError {
    /// Bytes written to the destination before the failure.
    pub written: u64,
    /// The root cause of the error.
    #[source]
    pub source: EpubError,
}

impl WriteToError {
    /// Returns the root cause, discarding the partial byte count.
    pub fn into_inner(self) -> EpubError {
        self.source
    }
}

impl From<WriteToError> for EpubError {
    fn from(error: WriteToError) -> Self {
        error.source
    }
}
