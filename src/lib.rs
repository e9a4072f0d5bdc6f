#![warn(missing_docs)]
//! # epubwright
//! Assemble EPUB 3 publications from content fragments and serialize them
//! into a single `.epub` archive.
//!
//! Sections (XHTML body fragments), stylesheets, fonts, images, audio and video
//! are registered on an [`Epub`]. Nothing is fetched or rendered until the
//! publication is [written](Epub::write_to) or [saved](Epub::save), at which
//! point every control document is generated in the order the format requires:
//! - `mimetype` (always the first, uncompressed archive entry)
//! - `META-INF/container.xml`
//! - every registered resource and section document
//! - `EPUB/nav.xhtml` and the legacy `EPUB/toc.ncx`
//! - `EPUB/package.opf`, stamped with the modification time
//!
//! # Examples
//! ```no_run
//! # fn main() -> epubwright::EpubResult<()> {
//! use epubwright::Epub;
//!
//! let epub = Epub::new("My Title");
//! epub.set_author("Jane Doe");
//!
//! let css = epub.add_css("assets/style.css", None)?;
//! let ch1 = epub.add_section("<h1>Chapter 1</h1><p>...</p>", "Chapter 1", None, Some(&css))?;
//! epub.add_subsection(&ch1, "<h2>Part 1.1</h2>", "Part 1.1", None, Some(&css))?;
//!
//! epub.save("my_title.epub")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Collaborators
//! - [`grab`]: Retrieval of resource bytes from URLs, local paths and `data:` URLs.
//! - [`storage`]: The staging area used while assembling the archive.

pub mod epub;
pub mod grab;
pub mod storage;

mod util;
mod writer;

pub use self::epub::Epub;
pub use self::epub::errors::{EpubError, EpubResult, WriteToError};
