mod manifest;
mod metadata;
mod spine;

use crate::epub::consts::{layout, opf, xml};
use crate::epub::datetime::DateTime;
use crate::epub::metadata::Metadata;
use crate::epub::navigation::PackagePlan;
use crate::epub::write::writer::EpubWriter;
use crate::writer::WriterResult;
use crate::writer::xml::{XmlWriter, write_element};
use std::io::Write;

/// Writes the package document (`package.opf`).
///
/// Split across submodules by section:
/// - [`metadata`]: `<metadata>`
/// - [`manifest`]: `<manifest>`
/// - [`spine`]: `<spine>`
struct PackageWriter<'a, W> {
    metadata: &'a Metadata,
    plan: &'a PackagePlan<'a>,
    /// Stamped as `dcterms:modified`.
    modified: DateTime,
    writer: XmlWriter<'a, W>,
}

impl<'a, W: Write> PackageWriter<'a, W> {
    fn new(metadata: &'a Metadata, plan: &'a PackagePlan<'a>, modified: DateTime, writer: W) -> Self {
        Self {
            writer: XmlWriter::new(writer),
            metadata,
            plan,
            modified,
        }
    }

    fn write_opf(mut self) -> WriterResult<()> {
        self.writer.write_utf8_declaration()?;

        write_element! {
            writer: self.writer,
            tag: opf::PACKAGE,
            attributes: {
                xml::XMLNS     => opf::OPF_NS,
                opf::VERSION   => opf::PACKAGE_VERSION,
                opf::UNIQUE_ID => opf::PUB_ID,
            }
            inner_content: {
                self.write_metadata()?;
                self.write_manifest()?;
                self.write_spine()?;
            }
        }
    }
}

impl EpubWriter<'_> {
    pub(super) fn write_package(&mut self, plan: &PackagePlan<'_>, modified: DateTime) -> WriterResult<()> {
        let metadata = &self.ctx.state.metadata;

        self.stage.write_document(layout::PACKAGE_PATH, |writer| {
            PackageWriter::new(metadata, plan, modified, writer).write_opf()
        })?;
        tracing::debug!(
            items = plan.manifest.len(),
            spine = plan.spine.len(),
            %modified,
            "staged package document",
        );
        Ok(())
    }
}
