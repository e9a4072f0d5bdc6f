use crate::epub::consts::{epub, layout, mime, xhtml, xml};
use crate::epub::section::Section;
use crate::epub::write::writer::EpubWriter;
use crate::util::uri;
use crate::writer::WriterResult;
use crate::writer::xml::{XmlWriter, write_element};
use std::io::Write;

/// Wraps a section body into a complete XHTML document.
struct SectionWriter<'a, W> {
    section: &'a Section,
    /// Untitled sections (such as the cover) use the publication title.
    title: &'a str,
    writer: XmlWriter<'a, W>,
}

impl<'a, W: Write> SectionWriter<'a, W> {
    fn new(section: &'a Section, publication_title: &'a str, writer: W) -> Self {
        Self {
            title: match section.is_titled() {
                true => &section.title,
                false => publication_title,
            },
            writer: XmlWriter::new(writer),
            section,
        }
    }

    fn write_xhtml(mut self) -> WriterResult<()> {
        self.writer
            .write_utf8_declaration()?
            .write_doctype(xhtml::DOCTYPE)?;

        write_element! {
            writer: self.writer,
            tag: xhtml::HTML,
            attributes: {
                xml::XMLNS  => xhtml::XHTML_NS,
                epub::XMLNS => epub::EPUB_NS,
            }
            inner_content: {
                self.write_head()?;
                self.write_body()?;
            }
        }
    }

    fn write_head(&mut self) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: xhtml::HEAD,
            inner_content: {
                write_element! {
                    writer: self.writer,
                    tag: xhtml::TITLE,
                    text: self.title,
                    attributes: {
                        xhtml::DIR => xhtml::AUTO,
                    }
                }?;

                if let Some(css_path) = self.section.css_path.as_deref() {
                    write_element! {
                        writer: self.writer,
                        tag: xhtml::LINK,
                        attributes: {
                            xhtml::REL  => xhtml::STYLESHEET,
                            xhtml::TYPE => mime::CSS,
                            xhtml::HREF => css_path,
                        }
                    }?;
                }
            }
        }
    }

    fn write_body(&mut self) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: xhtml::BODY,
            markup: &self.section.body,
            attributes: {
                xhtml::DIR => xhtml::AUTO,
            }
        }
    }
}

impl EpubWriter<'_> {
    pub(super) fn write_sections(&mut self) -> WriterResult<()> {
        let state = self.ctx.state;
        let directory = uri::join(layout::CONTENT_DIR, layout::XHTML_DIR);

        for (section, _) in state.sections.walk() {
            let path = uri::join(&directory, &section.filename);

            self.stage.write_document(&path, |writer| {
                SectionWriter::new(section, &state.metadata.title, writer).write_xhtml()
            })?;
        }
        tracing::debug!(sections = state.sections.len(), "staged sections");
        Ok(())
    }
}
