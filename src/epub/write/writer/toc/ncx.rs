use crate::epub::consts::{ncx, xml};
use crate::epub::metadata::Metadata;
use crate::epub::navigation::{NavNode, PackagePlan};
use crate::writer::WriterResult;
use crate::writer::xml::{XmlWriter, write_element};
use std::io::Write;

pub(super) struct NcxTocWriter<'a, W> {
    metadata: &'a Metadata,
    plan: &'a PackagePlan<'a>,
    writer: XmlWriter<'a, W>,
}

impl<'a, W: Write> NcxTocWriter<'a, W> {
    pub(super) fn new(metadata: &'a Metadata, plan: &'a PackagePlan<'a>, writer: W) -> Self {
        Self {
            writer: XmlWriter::new(writer),
            metadata,
            plan,
        }
    }

    pub(super) fn write_ncx(mut self) -> WriterResult<()> {
        // DOCTYPE for NCX is omitted as EPUB 2 does not require it
        self.writer.write_utf8_declaration()?;

        write_element! {
            writer: self.writer,
            tag: ncx::NCX,
            attributes: {
                xml::XMLNS   => ncx::NCX_NS,
                ncx::VERSION => ncx::NCX_VERSION,
            }
            inner_content: {
                self.write_ncx_head()?;
                self.write_ncx_doc_title()?;
                self.write_ncx_nav_map()?;
            }
        }
    }

    fn write_ncx_head(&mut self) -> WriterResult<()> {
        const ZERO: &str = "0";

        let depth = self.plan.max_depth().to_string();

        write_element! {
            writer: self.writer,
            tag: ncx::HEAD,
            inner_content: {
                self.write_ncx_meta(ncx::DTB_UID, &self.metadata.identifier)?;
                self.write_ncx_meta(ncx::DTB_DEPTH, &depth)?;
                self.write_ncx_meta(ncx::DTB_TOTAL_PAGE_COUNT, ZERO)?;
                self.write_ncx_meta(ncx::DTB_MAX_PAGE_NUMBER, ZERO)?;
            }
        }
    }

    fn write_ncx_meta(&mut self, name: &str, content: &str) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: ncx::META,
            attributes: {
                ncx::NAME         => name,
                ncx::CONTENT_ATTR => content,
            }
        }
    }

    fn write_ncx_doc_title(&mut self) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: ncx::DOC_TITLE,
            inner_content: {
                self.write_ncx_text(&self.metadata.title)?;
            }
        }
    }

    fn write_ncx_text(&mut self, text: &str) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: ncx::TEXT,
            text: text,
        }
    }

    fn write_ncx_nav_map(&mut self) -> WriterResult<()> {
        let tree = self.plan.navigation_tree();

        write_element! {
            writer: self.writer,
            tag: ncx::NAV_MAP,
            inner_content: {
                for node in &tree {
                    self.write_ncx_nav_point(node)?;
                }
            }
        }
    }

    fn write_ncx_nav_point(&mut self, node: &NavNode<'_, '_>) -> WriterResult<()> {
        let entry = node.entry;
        let id = format!("{}{}", ncx::NAV_POINT_ID_PREFIX, entry.index);

        write_element! {
            writer: self.writer,
            tag: ncx::NAV_POINT,
            attributes: {
                // `playOrder` is optional and omitted
                xml::ID => id.as_str(),
            }
            inner_content: {
                write_element! {
                    writer: self.writer,
                    tag: ncx::NAV_LABEL,
                    inner_content: {
                        self.write_ncx_text(entry.title)?;
                    }
                }?;
                write_element! {
                    writer: self.writer,
                    tag: ncx::CONTENT,
                    attributes: {
                        ncx::SRC => entry.href.as_str(),
                    }
                }?;
                for child in &node.children {
                    self.write_ncx_nav_point(child)?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NcxTocWriter;
    use crate::epub::EpubState;
    use crate::epub::navigation::{MediaTypes, PackagePlan};
    use crate::epub::section::NewSection;

    fn add(state: &mut EpubState, parent: Option<&str>, title: &str, filename: &str) {
        let section = NewSection {
            body: "",
            title,
            filename: Some(filename),
            css_path: None,
        };
        state.sections.add(parent, section).unwrap();
    }

    fn render(state: &EpubState) -> String {
        let plan = PackagePlan::new(state, &MediaTypes::new());
        let mut buffer = Vec::new();
        NcxTocWriter::new(&state.metadata, &plan, &mut buffer)
            .write_ncx()
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_write_ncx() {
        let mut state = EpubState::new("Tom & Jerry");
        state.metadata.identifier = "urn:uuid:1234".to_owned();
        add(&mut state, None, "One", "one.xhtml");
        add(&mut state, Some("one.xhtml"), "One.1", "one 1.xhtml");
        add(&mut state, None, "Two", "two.xhtml");

        assert_eq!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <ncx xmlns=\"http://www.daisy.org/z3986/2005/ncx/\" version=\"2005-1\">\n  \
             <head>\n    \
             <meta name=\"dtb:uid\" content=\"urn:uuid:1234\"/>\n    \
             <meta name=\"dtb:depth\" content=\"2\"/>\n    \
             <meta name=\"dtb:totalPageCount\" content=\"0\"/>\n    \
             <meta name=\"dtb:maxPageNumber\" content=\"0\"/>\n  \
             </head>\n  \
             <docTitle>\n    \
             <text>Tom &amp; Jerry</text>\n  \
             </docTitle>\n  \
             <navMap>\n    \
             <navPoint id=\"navPoint-1\">\n      \
             <navLabel>\n        \
             <text>One</text>\n      \
             </navLabel>\n      \
             <content src=\"xhtml/one.xhtml\"/>\n      \
             <navPoint id=\"navPoint-2\">\n        \
             <navLabel>\n          \
             <text>One.1</text>\n        \
             </navLabel>\n        \
             <content src=\"xhtml/one%201.xhtml\"/>\n      \
             </navPoint>\n    \
             </navPoint>\n    \
             <navPoint id=\"navPoint-3\">\n      \
             <navLabel>\n        \
             <text>Two</text>\n      \
             </navLabel>\n      \
             <content src=\"xhtml/two.xhtml\"/>\n    \
             </navPoint>\n  \
             </navMap>\n\
             </ncx>",
            render(&state),
        );
    }

    #[test]
    fn test_empty_nav_map() {
        let xml = render(&EpubState::new("Empty"));

        assert!(xml.contains("<meta name=\"dtb:depth\" content=\"1\"/>"));
        assert!(xml.contains("<navMap>\n  </navMap>"));
    }
}
