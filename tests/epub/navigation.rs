use crate::epub::{new_epub, read_entry, write};

#[test]
fn test_navigation_documents() {
    let (epub, _) = new_epub("Navigable");
    let one = epub.add_section("", "One", None, None).unwrap();
    epub.add_subsection(&one, "", "One.1", None, None).unwrap();
    epub.add_subsection(&one, "", "", None, None).unwrap();
    epub.add_section("", "", None, None).unwrap();
    epub.add_section("", "Two & Three", Some("two three.xhtml"), None)
        .unwrap();

    let mut archive = write(&epub);

    let nav = read_entry(&mut archive, "EPUB/nav.xhtml");
    assert!(nav.contains("<nav epub:type=\"toc\">"));
    assert!(nav.contains("<h1>Table of Contents</h1>"));
    assert!(nav.contains("<a href=\"xhtml/section0001.xhtml\">One</a>"));
    assert!(nav.contains("<a href=\"xhtml/section0002.xhtml\">One.1</a>"));
    assert!(nav.contains("<a href=\"xhtml/two%20three.xhtml\">Two &amp; Three</a>"));
    // Untitled sections are only part of the reading order
    assert_eq!(3, nav.matches("<a ").count());
    assert_eq!(2, nav.matches("<ol>").count());

    let ncx = read_entry(&mut archive, "EPUB/toc.ncx");
    let uid = format!("<meta name=\"dtb:uid\" content=\"{}\"/>", epub.identifier());
    assert!(ncx.contains(&uid));
    assert!(ncx.contains("<meta name=\"dtb:depth\" content=\"2\"/>"));
    assert!(ncx.contains("<text>Navigable</text>"));
    assert!(ncx.contains("<navPoint id=\"navPoint-3\">"));
    assert!(ncx.contains("<content src=\"xhtml/two%20three.xhtml\"/>"));
    assert_eq!(3, ncx.matches("<navPoint ").count());

    let opf = read_entry(&mut archive, "EPUB/package.opf");
    assert_eq!(5, opf.matches("<itemref").count());
}

#[test]
fn test_navigation_without_sections() {
    let (epub, _) = new_epub("Empty");

    let mut archive = write(&epub);
    let ncx = read_entry(&mut archive, "EPUB/toc.ncx");

    assert!(ncx.contains("<meta name=\"dtb:depth\" content=\"1\"/>"));
    assert!(!ncx.contains("<navPoint"));
}
