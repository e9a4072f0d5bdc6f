use crate::epub::{CSS, PNG, new_epub, read_entry, write};
use epubwright::EpubError;

#[test]
fn test_cover() {
    let (epub, _) = new_epub("Covered");
    epub.add_section("<p>One</p>", "One", Some("one.xhtml"), None)
        .unwrap();
    epub.set_cover(PNG, None).unwrap();

    let mut archive = write(&epub);
    let opf = read_entry(&mut archive, "EPUB/package.opf");
    assert!(opf.contains(
        "<item id=\"cover.png\" href=\"images/cover.png\" media-type=\"image/png\" properties=\"cover-image\"/>"
    ));
    assert!(opf.contains("<item id=\"cover.css\" href=\"css/cover.css\" media-type=\"text/css\"/>"));
    assert!(opf.contains("<meta name=\"cover\" content=\"cover.png\"/>"));

    // The cover is read first, even when added last
    let spine = &opf[opf.find("<spine").unwrap()..];
    let cover = spine.find("idref=\"cover.xhtml\"").unwrap();
    let one = spine.find("idref=\"one.xhtml\"").unwrap();
    assert!(cover < one);

    let section = read_entry(&mut archive, "EPUB/xhtml/cover.xhtml");
    assert!(section.contains("<title dir=\"auto\">Covered</title>"));
    assert!(section.contains("href=\"../css/cover.css\""));
    assert!(section.contains("<img src=\"../images/cover.png\" alt=\"Cover Image\" />"));

    let css = read_entry(&mut archive, "EPUB/css/cover.css");
    assert!(css.contains("body"));

    // Never listed in navigation
    let nav = read_entry(&mut archive, "EPUB/nav.xhtml");
    assert!(!nav.contains("cover.xhtml"));
    let ncx = read_entry(&mut archive, "EPUB/toc.ncx");
    assert!(!ncx.contains("cover.xhtml"));
}

#[test]
fn test_custom_cover_css() {
    let (epub, _) = new_epub("Styled");
    epub.set_cover(PNG, Some(CSS)).unwrap();

    let mut archive = write(&epub);
    assert_eq!("body { margin: 0 }", read_entry(&mut archive, "EPUB/css/cover.css"));
}

#[test]
fn test_replace_cover() {
    let (epub, _) = new_epub("Replaced");
    epub.set_cover(PNG, None).unwrap();
    epub.set_cover(PNG, Some(CSS)).unwrap();

    let mut archive = write(&epub);
    let opf = read_entry(&mut archive, "EPUB/package.opf");
    assert_eq!(1, opf.matches("properties=\"cover-image\"").count());
    assert_eq!(1, opf.matches("<itemref").count());
    assert_eq!("body { margin: 0 }", read_entry(&mut archive, "EPUB/css/cover.css"));
}

#[test]
fn test_cover_names_taken() {
    let (epub, _) = new_epub("Taken");
    epub.add_image(PNG, Some("cover.png")).unwrap();
    epub.add_section("", "Own cover", Some("cover.xhtml"), None)
        .unwrap();
    epub.set_cover(PNG, None).unwrap();

    let mut archive = write(&epub);
    let opf = read_entry(&mut archive, "EPUB/package.opf");
    assert!(opf.contains("href=\"images/image0002.png\" media-type=\"image/png\" properties=\"cover-image\""));

    let spine = &opf[opf.find("<spine").unwrap()..];
    assert!(spine.find("section0002.xhtml").unwrap() < spine.find("idref=\"cover.xhtml\"").unwrap());
}

#[test]
fn test_failed_cover_keeps_previous() {
    let (epub, _) = new_epub("Kept");
    epub.set_cover(PNG, None).unwrap();

    let error = epub
        .set_cover("https://example.com/cover.jpg", None)
        .unwrap_err();
    assert!(matches!(error, EpubError::FileRetrieval { .. }));

    let mut archive = write(&epub);
    let opf = read_entry(&mut archive, "EPUB/package.opf");
    assert!(opf.contains("href=\"images/cover.png\""));
}
