mod writer;

use crate::epub::Epub;
use crate::epub::errors::{EpubError, EpubResult, WriteToError};
use crate::epub::write::writer::EpubWriter;
use crate::writer::count::CountingWriter;
use std::cell::Cell;
use std::io::Write;
use std::path::Path;

impl Epub {
    /// Serializes the publication as an EPUB archive into `writer`.
    ///
    /// Every registered resource is retrieved, every document is staged
    /// within the configured [`Storage`](crate::storage::Storage), then the
    /// staged entries are streamed into a ZIP archive:
    /// `mimetype` first (uncompressed), followed by all other entries in
    /// sorted path order. The staging directory is removed afterwards,
    /// whether or not writing succeeded.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    /// A [`WriteToError`] wrapping the cause, along with the number of bytes
    /// written to `writer` before the failure.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<u64, WriteToError> {
        let written = Cell::new(0);

        match self.write_epub(CountingWriter::new(writer, &written)) {
            Ok(_) => Ok(written.get()),
            Err(source) => Err(WriteToError {
                written: written.get(),
                source,
            }),
        }
    }

    /// Saves the publication as an EPUB archive at `path`.
    ///
    /// The archive is written to a sibling temporary file first,
    /// then renamed to `path` once complete.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    /// A [`WriteToError`] carrying the number of bytes written to the
    /// temporary file before the failure, wrapping:
    /// - [`EpubError::UnableToCreateArchive`] if the file cannot be created.
    /// - Otherwise, any error of [`Self::write_to`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<u64, WriteToError> {
        const TEMP: &str = "epubwright.tmp";

        let path = path.as_ref();
        let temp = path.with_extension(TEMP);

        let file = std::fs::File::create(&temp).map_err(|source| WriteToError {
            written: 0,
            source: EpubError::UnableToCreateArchive {
                path: path.to_owned(),
                source,
            },
        })?;

        let mut buf = std::io::BufWriter::new(file);
        let write_result = self.write_to(&mut buf).and_then(|written| {
            // Write the remaining bytes to file
            buf.flush()
                .and_then(|_| std::fs::rename(&temp, path))
                .map(|_| written)
                .map_err(|error| WriteToError {
                    written,
                    source: error.into(),
                })
        });

        if write_result.is_err() {
            drop(buf);
            // The original error takes precedence
            if let Err(error) = std::fs::remove_file(&temp) {
                tracing::warn!(path = %temp.display(), %error, "failed to remove temporary archive");
            }
        }
        write_result
    }

    fn write_epub<W: Write>(&self, writer: W) -> EpubResult<W> {
        // Writing works on a consistent copy, leaving the publication
        // open to further changes while resources are retrieved.
        let state = self.snapshot();
        let mut writer = EpubWriter::new(&state, &self.config).write(writer)?;

        writer.flush()?;
        Ok(writer)
    }
}
