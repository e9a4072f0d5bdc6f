mod container;
mod package;
mod resource;
mod section;
mod toc;

use crate::epub::consts::{layout, mime};
use crate::epub::datetime::DateTime;
use crate::epub::navigation::{MediaTypes, PackagePlan};
use crate::epub::{EpubConfig, EpubState};
use crate::storage::{DirEntry, Storage};
use crate::util::uri;
use crate::writer::WriterResult;
use crate::writer::zip::{ZipFileOptionsExt, ZipWriter};
use std::io::{self, Read, Write};
use zip::write::SimpleFileOptions;

struct EpubWriterContext<'ebook> {
    state: &'ebook EpubState,
    config: &'ebook EpubConfig,
}

/// The staging directory of a single write: `<prefix>-<uuid>`.
struct Stage<'ebook> {
    storage: &'ebook dyn Storage,
    root: String,
}

impl<'ebook> Stage<'ebook> {
    fn new(storage: &'ebook dyn Storage, prefix: &str) -> Self {
        Self {
            root: format!("{prefix}-{}", uuid::Uuid::new_v4()),
            storage,
        }
    }

    fn path(&self, relative: &str) -> String {
        uri::join(&self.root, relative)
    }

    fn create_dir(&self, relative: &str) -> io::Result<()> {
        self.storage.create_dir(&self.path(relative))
    }

    fn write_file(&self, relative: &str, data: &[u8]) -> io::Result<()> {
        self.storage.write_file(&self.path(relative), data)
    }

    /// Creates the file at `relative` and hands it to `write`.
    fn write_document(
        &self,
        relative: &str,
        write: impl FnOnce(&mut dyn Write) -> WriterResult<()>,
    ) -> WriterResult<()> {
        let mut file = self.storage.create(&self.path(relative))?;
        write(&mut file)?;
        file.flush()?;
        Ok(())
    }

    fn open(&self, relative: &str) -> io::Result<Box<dyn Read + 'ebook>> {
        self.storage.open(&self.path(relative))
    }

    fn read_dir(&self, relative: &str) -> io::Result<Vec<DirEntry>> {
        self.storage.read_dir(&self.path(relative))
    }

    fn remove(&self) {
        if let Err(error) = self.storage.remove_all(&self.root) {
            tracing::error!(root = %self.root, %error, "failed to remove staging directory");
        }
    }
}

/// Assembles an EPUB archive in phases:
/// 1. Staging directory
/// 2. `mimetype`
/// 3. Content (`EPUB`, `EPUB/xhtml`) and `META-INF` directories
/// 4. `META-INF/container.xml`
/// 5. Resources (retrieved here; media types are resolved from their content)
/// 6. Section documents
/// 7. Navigation documents (`nav.xhtml`, `toc.ncx`)
/// 8. Package document, stamped with the current time
/// 9. ZIP stream of the staging directory
///
/// The staging directory is removed afterwards, regardless of the outcome.
pub(super) struct EpubWriter<'ebook> {
    ctx: EpubWriterContext<'ebook>,
    stage: Stage<'ebook>,
    media_types: MediaTypes,
}

impl<'ebook> EpubWriter<'ebook> {
    pub(super) fn new(state: &'ebook EpubState, config: &'ebook EpubConfig) -> Self {
        Self {
            stage: Stage::new(config.storage.as_ref(), &config.staging_prefix),
            ctx: EpubWriterContext { state, config },
            media_types: MediaTypes::new(),
        }
    }

    pub(super) fn write<W: Write>(mut self, writer: W) -> WriterResult<W> {
        tracing::info!(
            title = %self.ctx.state.metadata.title,
            stage = %self.stage.root,
            "writing epub",
        );
        let result = self.stage_and_archive(writer);

        if let Err(error) = &result {
            tracing::warn!(%error, "failed to write epub");
        }
        self.stage.remove();
        result
    }

    fn stage_and_archive<W: Write>(&mut self, writer: W) -> WriterResult<W> {
        self.stage.create_dir("")?;
        self.write_mimetype()?;
        self.create_directories()?;
        self.write_container()?;
        self.write_resources()?;
        self.write_sections()?;

        let plan = PackagePlan::new(self.ctx.state, &self.media_types);
        self.write_toc(&plan)?;

        let modified = DateTime::now();
        self.write_package(&plan, modified)?;
        self.write_archive(writer, modified)
    }

    fn write_mimetype(&mut self) -> WriterResult<()> {
        self.stage
            .write_file(layout::MIMETYPE, mime::EPUB.as_bytes())?;
        Ok(())
    }

    fn create_directories(&mut self) -> WriterResult<()> {
        self.stage
            .create_dir(&uri::join(layout::CONTENT_DIR, layout::XHTML_DIR))?;
        self.stage.create_dir(layout::META_INF_DIR)?;
        Ok(())
    }

    fn write_archive<W: Write>(&self, writer: W, modified: DateTime) -> WriterResult<W> {
        let mut zip = ZipWriter::new(
            writer,
            SimpleFileOptions::default()
                .zip_last_modified_date(modified)
                .zip_compression_level(self.ctx.config.compression),
        );

        // EPUB requires that the mimetype file must be first and uncompressed
        zip.start_uncompressed_file(layout::MIMETYPE)?;
        io::copy(&mut self.stage.open(layout::MIMETYPE)?, &mut zip)?;

        self.archive_dir(&mut zip, "")?;
        tracing::debug!("finished archive");
        zip.finish()
    }

    fn archive_dir<W: Write>(&self, zip: &mut ZipWriter<W>, dir: &str) -> WriterResult<()> {
        for entry in self.stage.read_dir(dir)? {
            let path = uri::join(dir, &entry.name);

            if entry.is_dir {
                self.archive_dir(zip, &path)?;
            } else if path != layout::MIMETYPE {
                zip.start_file(&path)?;
                io::copy(&mut self.stage.open(&path)?, zip)?;
            }
        }
        Ok(())
    }
}
