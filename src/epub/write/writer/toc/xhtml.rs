use crate::epub::consts::{epub, xhtml, xml};
use crate::epub::metadata::Metadata;
use crate::epub::navigation::{NavNode, PackagePlan};
use crate::writer::WriterResult;
use crate::writer::xml::{XmlWriter, write_element};
use std::io::Write;

/// Writes the EPUB 3 navigation document (`nav.xhtml`).
pub(super) struct XhtmlTocWriter<'a, W> {
    metadata: &'a Metadata,
    plan: &'a PackagePlan<'a>,
    writer: XmlWriter<'a, W>,
}

impl<'a, W: Write> XhtmlTocWriter<'a, W> {
    pub(super) fn new(metadata: &'a Metadata, plan: &'a PackagePlan<'a>, writer: W) -> Self {
        Self {
            writer: XmlWriter::new(writer),
            metadata,
            plan,
        }
    }

    pub(super) fn write_xhtml(mut self) -> WriterResult<()> {
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
                self.write_nav_head()?;
                self.write_nav_body()?;
            }
        }
    }

    fn write_nav_head(&mut self) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: xhtml::HEAD,
            inner_content: {
                write_element! {
                    writer: self.writer,
                    tag: xhtml::TITLE,
                    text: &self.metadata.title,
                }?;
            }
        }
    }

    fn write_nav_body(&mut self) -> WriterResult<()> {
        let tree = self.plan.navigation_tree();

        write_element! {
            writer: self.writer,
            tag: xhtml::BODY,
            inner_content: {
                write_element! {
                    writer: self.writer,
                    tag: xhtml::NAV,
                    attributes: {
                        epub::TYPE => epub::TOC,
                    }
                    inner_content: {
                        write_element! {
                            writer: self.writer,
                            tag: xhtml::H1,
                            text: xhtml::TOC_HEADING,
                        }?;
                        self.write_nav_list(&tree)?;
                    }
                }?;
            }
        }
    }

    fn write_nav_list(&mut self, nodes: &[NavNode<'_, '_>]) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: xhtml::ORDERED_LIST,
            inner_content: {
                for node in nodes {
                    self.write_nav_entry(node)?;
                }
            }
        }
    }

    fn write_nav_entry(&mut self, node: &NavNode<'_, '_>) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: xhtml::LIST_ITEM,
            inner_content: {
                write_element! {
                    writer: self.writer,
                    tag: xhtml::ANCHOR,
                    text: node.entry.title,
                    attributes: {
                        xhtml::HREF => node.entry.href.as_str(),
                    }
                }?;
                // Nested lists are only written for entries with subsections
                if !node.children.is_empty() {
                    self.write_nav_list(&node.children)?;
                }
            }
        }
    }
}
