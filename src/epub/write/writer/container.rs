use crate::epub::consts::{layout, mime, ocf, xml};
use crate::epub::write::writer::EpubWriter;
use crate::writer::WriterResult;
use crate::writer::xml::{XmlWriter, write_element};
use std::io::Write;

struct ContainerWriter<'a, W> {
    writer: XmlWriter<'a, W>,
}

impl<W: Write> ContainerWriter<'_, W> {
    fn new(writer: W) -> Self {
        Self {
            writer: XmlWriter::new(writer),
        }
    }

    fn write_container(mut self) -> WriterResult<()> {
        self.writer.write_utf8_declaration()?;

        write_element! {
            writer: self.writer,
            tag: ocf::CONTAINER,
            attributes: {
                ocf::VERSION => ocf::CONTAINER_VERSION,
                xml::XMLNS   => ocf::CONTAINER_NS,
            }
            inner_content: {
                self.write_root_files()?;
            }
        }
    }

    fn write_root_files(&mut self) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: ocf::ROOT_FILES,
            inner_content: {
                self.write_root_file()?;
            }
        }
    }

    fn write_root_file(&mut self) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: ocf::ROOT_FILE,
            attributes: {
                // Root file paths must not be prefixed with '/'
                ocf::FULL_PATH  => layout::PACKAGE_PATH,
                ocf::MEDIA_TYPE => mime::OEBPS_PACKAGE,
            }
        }
    }
}

impl EpubWriter<'_> {
    pub(super) fn write_container(&mut self) -> WriterResult<()> {
        self.stage.write_document(ocf::CONTAINER_PATH, |writer| {
            ContainerWriter::new(writer).write_container()
        })
    }
}
