use crate::epub::consts::{opf, xml};
use crate::epub::navigation::ManifestItem;
use crate::epub::write::writer::package::PackageWriter;
use crate::writer::WriterResult;
use crate::writer::xml::write_element;
use std::io::Write;

impl<W: Write> PackageWriter<'_, W> {
    pub(super) fn write_manifest(&mut self) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: opf::MANIFEST,
            inner_content: {
                for item in &self.plan.manifest {
                    self.write_manifest_item(item)?;
                }
            }
        }
    }

    fn write_manifest_item(&mut self, item: &ManifestItem) -> WriterResult<()> {
        write_element! {
            writer: self.writer,
            tag: opf::ITEM,
            attributes: {
                xml::ID         => item.id.as_str(),
                opf::HREF       => item.href.as_str(),
                opf::MEDIA_TYPE => item.media_type.as_str(),
                opf::PROPERTIES => item.properties,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::epub::EpubState;
    use crate::epub::navigation::MediaTypes;
    use crate::epub::resource::MediaCategory;
    use crate::epub::section::NewSection;
    use crate::epub::write::writer::package::tests::render;

    #[test]
    fn test_write_manifest() {
        let mut state = EpubState::new("Title");
        let section = NewSection {
            body: "",
            title: "One",
            filename: Some("chapter one.xhtml"),
            css_path: None,
        };
        state.sections.add(None, section).unwrap();
        state
            .resources
            .insert(MediaCategory::Css, "main.css".to_owned(), "main.css".to_owned());
        state
            .resources
            .insert(MediaCategory::Audio, "theme.mp3".to_owned(), "theme.mp3".to_owned());

        let mut media_types = MediaTypes::new();
        media_types.insert((MediaCategory::Css, "main.css".to_owned()), "text/css".to_owned());
        media_types.insert((MediaCategory::Audio, "theme.mp3".to_owned()), "audio/mpeg".to_owned());

        let opf = render(&state, &media_types);
        let manifest = &opf[opf.find("<manifest>").unwrap()..opf.find("<spine").unwrap()];

        assert_eq!(
            "<manifest>\n    \
             <item id=\"nav\" href=\"nav.xhtml\" media-type=\"application/xhtml+xml\" properties=\"nav\"/>\n    \
             <item id=\"ncx\" href=\"toc.ncx\" media-type=\"application/x-dtbncx+xml\"/>\n    \
             <item id=\"chapterone.xhtml\" href=\"xhtml/chapter%20one.xhtml\" media-type=\"application/xhtml+xml\"/>\n    \
             <item id=\"main.css\" href=\"css/main.css\" media-type=\"text/css\"/>\n    \
             <item id=\"theme.mp3\" href=\"audio/theme.mp3\" media-type=\"audio/mpeg\"/>\n  \
             </manifest>\n  ",
            manifest,
        );
    }
}
