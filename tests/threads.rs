use epubwright::Epub;
use epubwright::grab::SourceGrabber;
use epubwright::storage::MemoryStorage;
use std::collections::HashSet;
use std::io::Cursor;
use std::sync::Arc;
use std::thread;

#[test]
fn multi_thread_test() {
    let epub = Arc::new(
        Epub::builder()
            .storage(MemoryStorage::new())
            .grabber(SourceGrabber::offline())
            .build("Shared"),
    );
    let mut handles = Vec::new();

    for i in 1..=5 {
        let epub = Arc::clone(&epub);
        handles.push(thread::spawn(move || {
            let parent = epub
                .add_section(&format!("<p>{i}</p>"), &format!("Thread {i}"), None, None)
                .unwrap();
            epub.add_subsection(&parent, "<p>Nested</p>", "", None, None)
                .unwrap();
            // Writing concurrently with other threads' additions
            let mut buffer = Vec::new();
            epub.write_to(&mut buffer).unwrap();
            parent
        }));
    }

    let parents: HashSet<String> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    assert_eq!(5, parents.len());

    let mut buffer = Vec::new();
    epub.write_to(&mut buffer).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(buffer)).unwrap();
    let xhtml = (0..archive.len())
        .filter(|&i| archive.by_index(i).unwrap().name().starts_with("EPUB/xhtml/"))
        .count();
    assert_eq!(10, xhtml);
}
