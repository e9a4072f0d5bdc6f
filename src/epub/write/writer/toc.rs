mod ncx;
mod xhtml;

use crate::epub::consts::layout;
use crate::epub::navigation::PackagePlan;
use crate::epub::write::writer::EpubWriter;
use crate::epub::write::writer::toc::ncx::NcxTocWriter;
use crate::epub::write::writer::toc::xhtml::XhtmlTocWriter;
use crate::util::uri;
use crate::writer::WriterResult;

impl EpubWriter<'_> {
    /// Writes both navigation documents from the same entries:
    /// the EPUB 3 nav document and the EPUB 2 NCX document,
    /// kept for older reading systems.
    pub(super) fn write_toc(&mut self, plan: &PackagePlan<'_>) -> WriterResult<()> {
        let metadata = &self.ctx.state.metadata;

        self.stage.write_document(
            &uri::join(layout::CONTENT_DIR, layout::NAV_FILE),
            |writer| XhtmlTocWriter::new(metadata, plan, writer).write_xhtml(),
        )?;
        self.stage.write_document(
            &uri::join(layout::CONTENT_DIR, layout::NCX_FILE),
            |writer| NcxTocWriter::new(metadata, plan, writer).write_ncx(),
        )?;

        tracing::debug!(entries = plan.navigation.len(), "staged navigation documents");
        Ok(())
    }
}
