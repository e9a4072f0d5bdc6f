use crate::epub::{CSS, PNG, StaticHttpClient, new_epub, read_entry, write};
use epubwright::grab::{GrabError, SourceGrabber};
use epubwright::storage::MemoryStorage;
use epubwright::{Epub, EpubError};

#[test]
fn test_filename_already_used() {
    let (epub, _) = new_epub("Collisions");
    epub.add_css(CSS, Some("main.css")).unwrap();

    let error = epub.add_css(CSS, Some("main.css")).unwrap_err();
    assert!(matches!(&error, EpubError::FilenameAlreadyUsed { filename } if filename == "main.css"));
    // Each resource category is its own namespace
    epub.add_font(CSS, Some("main.css")).unwrap();

    epub.add_section("", "", Some("a.xhtml"), None).unwrap();
    let error = epub.add_section("", "", Some("a.xhtml"), None).unwrap_err();
    assert!(matches!(error, EpubError::FilenameAlreadyUsed { .. }));

    // Section filenames are shared with subsections
    let error = epub
        .add_subsection("a.xhtml", "", "", Some("a.xhtml"), None)
        .unwrap_err();
    assert!(matches!(error, EpubError::FilenameAlreadyUsed { .. }));
}

#[test]
fn test_invalid_filenames() {
    let (epub, _) = new_epub("Escapes");

    let error = epub.add_image(PNG, Some("sub/pic.png")).unwrap_err();
    assert!(matches!(&error, EpubError::InvalidFilename(name) if name == "sub/pic.png"));
    let error = epub.add_css(CSS, Some("..")).unwrap_err();
    assert!(matches!(error, EpubError::InvalidFilename(_)));

    let error = epub
        .add_section("", "", Some("../package.opf"), None)
        .unwrap_err();
    assert!(matches!(&error, EpubError::InvalidFilename(name) if name == "../package.opf"));
    let parent = epub.add_section("", "Parent", None, None).unwrap();
    let error = epub
        .add_subsection(&parent, "", "", Some("a\\b.xhtml"), None)
        .unwrap_err();
    assert!(matches!(error, EpubError::InvalidFilename(_)));

    // Rejected names leave nothing behind
    let mut archive = write(&epub);
    let package = read_entry(&mut archive, "EPUB/package.opf");
    assert!(!package.contains("pic.png"));
    assert_eq!(1, package.matches("<itemref ").count());
}

#[test]
fn test_parent_does_not_exist() {
    let (epub, _) = new_epub("Orphans");
    let error = epub
        .add_subsection("missing.xhtml", "", "", None, None)
        .unwrap_err();
    assert!(matches!(&error, EpubError::ParentDoesNotExist(parent) if parent == "missing.xhtml"));

    // Only top-level sections can have subsections
    let parent = epub.add_section("", "", None, None).unwrap();
    let child = epub.add_subsection(&parent, "", "", None, None).unwrap();
    let error = epub.add_subsection(&child, "", "", None, None).unwrap_err();
    assert!(matches!(error, EpubError::ParentDoesNotExist(_)));
}

#[test]
fn test_unretrievable_sources() {
    let (epub, _) = new_epub("Offline");

    let error = epub
        .add_image("https://example.com/a.png", None)
        .unwrap_err();
    assert!(matches!(
        error,
        EpubError::FileRetrieval {
            source: GrabError::NoHttpClient(_),
            ..
        }
    ));

    let error = epub.add_image("does/not/exist.png", None).unwrap_err();
    assert!(matches!(
        error,
        EpubError::FileRetrieval {
            source: GrabError::Io(_),
            ..
        }
    ));

    let error = epub.add_css("data:text/css;base64,!!!", None).unwrap_err();
    assert!(matches!(
        error,
        EpubError::FileRetrieval {
            source: GrabError::InvalidDataUrl(_),
            ..
        }
    ));

    // Nothing was registered
    let mut archive = write(&epub);
    let opf = read_entry(&mut archive, "EPUB/package.opf");
    assert_eq!(2, opf.matches("<item ").count());
}

#[test]
fn test_remote_sources() {
    let client = StaticHttpClient::default()
        .with("https://example.com/a.png", b"\x89PNG\r\n\x1a\n")
        .with("https://example.com/b.png", b"\x89PNG\r\n\x1a\n");
    let epub = Epub::builder()
        .storage(MemoryStorage::new())
        .grabber(SourceGrabber::with_http_client(client))
        .build("Remote");

    let error = epub
        .add_image("https://example.com/missing.png", None)
        .unwrap_err();
    assert!(matches!(
        error,
        EpubError::FileRetrieval {
            source: GrabError::HttpStatus { status: 404, .. },
            ..
        }
    ));

    assert_eq!("../images/a.png", epub.add_image("https://example.com/a.png", None).unwrap());
    epub.add_section(
        "<img src=\"https://example.com/b.png\"/><img src=\"https://example.com/missing.png\"/>",
        "Gallery",
        Some("gallery.xhtml"),
        None,
    )
    .unwrap();
    assert_eq!(1, epub.embed_images());

    let mut archive = write(&epub);
    let gallery = read_entry(&mut archive, "EPUB/xhtml/gallery.xhtml");
    assert!(gallery.contains("<img src=\"../images/b.png\"/><img src=\"https://example.com/missing.png\"/>"));
    assert!(archive.by_name("EPUB/images/b.png").is_ok());
}
