use crate::epub::consts::{dc, opf, xml};
use crate::epub::write::writer::package::PackageWriter;
use crate::writer::WriterResult;
use crate::writer::xml::write_element;
use std::io::Write;

impl<W: Write> PackageWriter<'_, W> {
    pub(super) fn write_metadata(&mut self) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: opf::METADATA,
            attributes: {
                dc::XMLNS_DC => dc::DUBLIN_CORE_NS,
            }
            inner_content: {
                self.write_dublin_core()?;
                self.write_creator()?;
                self.write_modified()?;
                self.write_cover_meta()?;
            }
        }
    }

    fn write_dublin_core(&mut self) -> WriterResult<()> {
        let metadata = self.metadata;

        write_element! {
            writer: self.writer,
            tag: dc::IDENTIFIER,
            text: &metadata.identifier,
            attributes: {
                xml::ID => opf::PUB_ID,
            }
        }?;
        write_element! {
            writer: self.writer,
            tag: dc::TITLE,
            text: &metadata.title,
        }?;
        write_element! {
            writer: self.writer,
            tag: dc::LANGUAGE,
            text: &metadata.lang,
        }?;

        if !metadata.description.is_empty() {
            write_element! {
                writer: self.writer,
                tag: dc::DESCRIPTION,
                text: &metadata.description,
            }?;
        }
        Ok(())
    }

    /// The author, refined with the `aut` MARC relator role.
    fn write_creator(&mut self) -> WriterResult<()> {
        let author = &self.metadata.author;
        if author.is_empty() {
            return Ok(());
        }
        let creator_ref = format!("#{}", dc::CREATOR_ID);

        write_element! {
            writer: self.writer,
            tag: dc::CREATOR,
            text: author,
            attributes: {
                xml::ID => dc::CREATOR_ID,
            }
        }?;
        write_element! {
            writer: self.writer,
            tag: opf::META,
            text: opf::AUTHOR_ROLE,
            attributes: {
                opf::REFINES  => creator_ref.as_str(),
                opf::PROPERTY => opf::ROLE,
                opf::SCHEME   => opf::MARC_RELATORS,
                xml::ID       => opf::ROLE,
            }
        }
    }

    fn write_modified(&mut self) -> WriterResult<()> {
        let modified = self.modified.to_string();

        write_element! {
            writer: self.writer,
            tag: opf::META,
            text: &modified,
            attributes: {
                opf::PROPERTY => dc::MODIFIED,
            }
        }
    }

    /// The EPUB 2 cover entry, for reading systems ignoring `cover-image`.
    fn write_cover_meta(&mut self) -> WriterResult<()> {
        let Some(cover_image_id) = self.plan.cover_image_id.as_deref() else {
            return Ok(());
        };

        write_element! {
            writer: self.writer,
            tag: opf::META,
            attributes: {
                opf::NAME    => opf::COVER,
                opf::CONTENT => cover_image_id,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::epub::EpubState;
    use crate::epub::cover::Cover;
    use crate::epub::navigation::MediaTypes;
    use crate::epub::resource::MediaCategory;
    use crate::epub::write::writer::package::tests::render;

    #[test]
    fn test_write_full_metadata() {
        let mut state = EpubState::new("Moby <Dick>");
        state.metadata.identifier = "isbn-123".to_owned();
        state.metadata.author = "Herman Melville".to_owned();
        state.metadata.lang = "en-US".to_owned();
        state.metadata.description = "A whale & a captain".to_owned();
        state
            .resources
            .insert(MediaCategory::Image, "cover.jpg".to_owned(), "cover.jpg".to_owned());
        state.cover = Some(Cover {
            image: "cover.jpg".to_owned(),
            css: "cover.css".to_owned(),
            section: "cover.xhtml".to_owned(),
        });

        let opf = render(&state, &MediaTypes::new());
        let metadata = &opf[opf.find("<metadata").unwrap()..opf.find("<manifest>").unwrap()];

        assert_eq!(
            "<metadata xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\n    \
             <dc:identifier id=\"pub-id\">isbn-123</dc:identifier>\n    \
             <dc:title>Moby &lt;Dick&gt;</dc:title>\n    \
             <dc:language>en-US</dc:language>\n    \
             <dc:description>A whale &amp; a captain</dc:description>\n    \
             <dc:creator id=\"creator\">Herman Melville</dc:creator>\n    \
             <meta refines=\"#creator\" property=\"role\" scheme=\"marc:relators\" id=\"role\">aut</meta>\n    \
             <meta property=\"dcterms:modified\">2024-03-09T14:05:30Z</meta>\n    \
             <meta name=\"cover\" content=\"cover.jpg\"/>\n  \
             </metadata>\n  ",
            metadata,
        );
    }
}
