use crate::epub::consts::{layout, opf};
use crate::epub::write::writer::package::PackageWriter;
use crate::writer::WriterResult;
use crate::writer::xml::write_element;
use std::io::Write;

impl<W: Write> PackageWriter<'_, W> {
    pub(super) fn write_spine(&mut self) -> WriterResult<()> {
        let page_direction = self.metadata.page_direction;

        write_element! {
            writer: self.writer,
            tag: opf::SPINE,
            attributes: {
                opf::TOC => layout::NCX_ID,
                opf::PAGE_PROGRESSION_DIRECTION where !page_direction.is_default() => page_direction.as_str(),
            }
            inner_content: {
                for idref in &self.plan.spine {
                    write_element! {
                        writer: self.writer,
                        tag: opf::ITEMREF,
                        attributes: {
                            opf::IDREF => idref.as_str(),
                        }
                    }?;
                }
            }
        }
    }
}
