use crate::epub::{CSS, PNG, entry_names, new_epub, read_entry, write};
use epubwright::grab::SourceGrabber;
use epubwright::storage::MemoryStorage;
use epubwright::{Epub, EpubError};
use std::io::{self, Write};
use std::sync::Arc;
use zip::CompressionMethod;

#[test]
fn test_archive_layout() {
    let (epub, _) = new_epub("Layout");
    let css = epub.add_css(CSS, Some("style.css")).unwrap();
    epub.add_image(PNG, Some("pic.png")).unwrap();
    epub.add_section("<p>One</p>", "One", None, Some(&css)).unwrap();

    let mut archive = write(&epub);
    assert_eq!(
        vec![
            "mimetype",
            "EPUB/css/style.css",
            "EPUB/images/pic.png",
            "EPUB/nav.xhtml",
            "EPUB/package.opf",
            "EPUB/toc.ncx",
            "EPUB/xhtml/section0001.xhtml",
            "META-INF/container.xml",
        ],
        entry_names(&mut archive),
    );

    let mimetype = archive.by_index(0).unwrap();
    assert_eq!(CompressionMethod::Stored, mimetype.compression());
    drop(mimetype);
    assert_eq!("application/epub+zip", read_entry(&mut archive, "mimetype"));
    assert_eq!("body { margin: 0 }", read_entry(&mut archive, "EPUB/css/style.css"));
}

#[test]
fn test_compression_levels() {
    for (level, method) in [
        (None, CompressionMethod::Deflated),
        (Some(0), CompressionMethod::Stored),
        (Some(9), CompressionMethod::Deflated),
    ] {
        let storage = Arc::new(MemoryStorage::new());
        let mut builder = Epub::builder();
        builder.shared_storage(storage).grabber(SourceGrabber::offline());
        if let Some(level) = level {
            builder.compression(level);
        }
        let epub = builder.build("Compressed");
        epub.add_section("<p>Text</p>", "Text", None, None).unwrap();

        let mut archive = write(&epub);
        assert_eq!(CompressionMethod::Stored, archive.by_index(0).unwrap().compression());
        let package = archive.by_name("EPUB/package.opf").unwrap();
        assert_eq!(method, package.compression(), "{level:?}");
    }
}

#[test]
fn test_one_entry_per_resource() {
    let (epub, _) = new_epub("Media");
    epub.add_css(CSS, Some("style.css")).unwrap();
    epub.add_font("data:;base64,d09GRgAB", Some("serif.woff")).unwrap();
    epub.add_image(PNG, Some("pic.png")).unwrap();
    epub.add_video("data:;base64,AAAAGGZ0eXBtcDQy", Some("clip.mp4")).unwrap();
    epub.add_audio("data:;base64,SUQzBAA=", Some("song.mp3")).unwrap();

    let mut archive = write(&epub);
    let names = entry_names(&mut archive);
    let opf = read_entry(&mut archive, "EPUB/package.opf");

    #[rustfmt::skip]
    let expected = [
        ("css/style.css",    "text/css"),
        ("fonts/serif.woff", "font/woff"),
        ("images/pic.png",   "image/png"),
        ("videos/clip.mp4",  "video/mp4"),
        ("audio/song.mp3",   "audio/mpeg"),
    ];

    for (href, media_type) in expected {
        let entry = format!("EPUB/{href}");
        assert_eq!(1, names.iter().filter(|name| **name == entry).count(), "{entry}");

        let item = format!("href=\"{href}\" media-type=\"{media_type}\"/>");
        assert_eq!(1, opf.matches(&item).count(), "{item}");
    }
    assert_eq!(5 + 2, opf.matches("<item ").count());
}

#[test]
fn test_section_documents() {
    let (epub, _) = new_epub("Sections");
    let css = epub.add_css(CSS, None).unwrap();
    assert_eq!("../css/css0001.css", css);

    let parent = epub
        .add_section("<h1>Part</h1>", "Part", Some("part.xhtml"), None)
        .unwrap();
    let child = epub
        .add_subsection(&parent, "<p>Inner &amp; outer</p>", "", None, Some(&css))
        .unwrap();
    assert_eq!("section0002.xhtml", child);

    let mut archive = write(&epub);
    let part = read_entry(&mut archive, "EPUB/xhtml/part.xhtml");
    assert!(part.contains("<title dir=\"auto\">Part</title>"));
    assert!(part.contains("<body dir=\"auto\"><h1>Part</h1></body>"));
    assert!(!part.contains("<link"));

    let inner = read_entry(&mut archive, "EPUB/xhtml/section0002.xhtml");
    // Untitled sections borrow the publication title
    assert!(inner.contains("<title dir=\"auto\">Sections</title>"));
    assert!(inner.contains("<link rel=\"stylesheet\" type=\"text/css\" href=\"../css/css0001.css\"/>"));
    assert!(inner.contains("<p>Inner &amp; outer</p>"));
}

#[test]
fn test_package_document() {
    let (epub, _) = new_epub("Package");
    epub.set_author("Jane Doe");
    epub.set_lang("fr");
    epub.set_identifier("urn:isbn:9780000000000");
    epub.set_page_direction(epubwright::epub::PageDirection::RightToLeft);
    epub.add_font(PNG, Some("not really a font.ttf")).unwrap();
    epub.add_section("", "One", Some("one.xhtml"), None).unwrap();

    let mut archive = write(&epub);
    let opf = read_entry(&mut archive, "EPUB/package.opf");

    assert!(opf.contains("<dc:identifier id=\"pub-id\">urn:isbn:9780000000000</dc:identifier>"));
    assert!(opf.contains("<dc:language>fr</dc:language>"));
    assert!(opf.contains("<dc:creator id=\"creator\">Jane Doe</dc:creator>"));
    assert!(opf.contains("<meta property=\"dcterms:modified\">"));
    assert!(!opf.contains("dc:description"));
    // Media types are detected from the content
    assert!(opf.contains(
        "<item id=\"notreallyafont.ttf\" href=\"fonts/not%20really%20a%20font.ttf\" media-type=\"image/png\"/>"
    ));
    assert!(opf.contains("<spine toc=\"ncx\" page-progression-direction=\"rtl\">"));
    assert!(opf.contains("<itemref idref=\"one.xhtml\"/>"));

    let container = read_entry(&mut archive, "META-INF/container.xml");
    assert!(container.contains("full-path=\"EPUB/package.opf\""));
}

#[test]
fn test_staging_is_cleaned_up() {
    let (epub, storage) = new_epub("Cleanup");
    epub.add_section("<p>Text</p>", "Text", None, None).unwrap();

    write(&epub);
    assert!(storage.is_empty());
}

#[test]
fn test_unavailable_resource_at_write_time() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("style.css");
    std::fs::write(&path, "p {}").unwrap();

    let (epub, storage) = new_epub("Missing");
    epub.add_css(path.to_str().unwrap(), None).unwrap();
    std::fs::remove_file(&path).unwrap();

    let error = epub.write_to(Vec::new()).unwrap_err();
    assert_eq!(0, error.written);
    assert!(matches!(error.source, EpubError::FileRetrieval { .. }));
    assert!(storage.is_empty());
}

/// Accepts a fixed number of bytes, then fails.
struct FailAfter {
    remaining: usize,
}

impl Write for FailAfter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::other("sink is full"));
        }
        let written = buf.len().min(self.remaining);
        self.remaining -= written;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_to_reports_partial_count() {
    let (epub, storage) = new_epub("Partial");
    epub.add_section("<p>Text</p>", "Text", None, None).unwrap();

    let error = epub.write_to(FailAfter { remaining: 16 }).unwrap_err();
    assert_eq!(16, error.written);
    assert!(matches!(error.source, EpubError::Io(_)));
    assert!(storage.is_empty());
}

#[test]
fn test_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.epub");

    let (epub, _) = new_epub("Saved");
    epub.add_section("<p>Text</p>", "Text", None, None).unwrap();

    let written = epub.save(&path).unwrap();
    assert_eq!(std::fs::metadata(&path).unwrap().len(), written);
    // Only the archive remains
    assert_eq!(1, std::fs::read_dir(dir.path()).unwrap().count());

    let archive = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
    assert_eq!(6, archive.len());
}

#[test]
fn test_save_to_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("book.epub");

    let (epub, _) = new_epub("Unsaved");
    let error = epub.save(&path).unwrap_err();

    assert_eq!(0, error.written);
    assert!(matches!(error.source, EpubError::UnableToCreateArchive { path: p, .. } if p == path));
}

#[test]
fn test_failed_save_removes_temporary_file() {
    let dir = tempfile::tempdir().unwrap();
    let css = dir.path().join("style.css");
    std::fs::write(&css, "p { margin: 0 }").unwrap();
    let path = dir.path().join("book.epub");

    let (epub, _) = new_epub("Unsaved");
    epub.add_css(css.to_str().unwrap(), None).unwrap();
    std::fs::remove_file(&css).unwrap();

    let error = epub.save(&path).unwrap_err();
    assert!(matches!(error.source, EpubError::FileRetrieval { .. }));
    // Neither the archive nor its temporary file remain
    assert_eq!(0, std::fs::read_dir(dir.path()).unwrap().count());
}

#[test]
fn test_repeated_writes() {
    let (epub, _) = new_epub("Twice");
    epub.add_section("<p>Text</p>", "Text", None, None).unwrap();

    let mut first = write(&epub);
    epub.add_section("<p>More</p>", "More", None, None).unwrap();
    let mut second = write(&epub);

    assert!(entry_names(&mut first).len() < entry_names(&mut second).len());
}
