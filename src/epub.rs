//! The Electronic Publication ([`Epub`]) builder.
//!
//! Produces EPUB `3` publications, with a legacy NCX table of contents
//! for EPUB `2` reading systems.
//!
//! For more information regarding the EPUB format, see:
//! <https://www.w3.org/TR/epub>

pub(crate) mod consts;
mod cover;
pub(crate) mod datetime;
mod embed;
pub mod errors;
mod metadata;
mod navigation;
mod resource;
mod section;
mod write;

pub use self::metadata::PageDirection;
pub use self::resource::MediaCategory;

use crate::epub::cover::Cover;
use crate::epub::errors::EpubResult;
use crate::epub::metadata::Metadata;
use crate::epub::resource::ResourceRegistry;
use crate::epub::section::{NewSection, SectionTree};
use crate::grab::{MediaGrabber, SourceGrabber};
use crate::storage::{OsStorage, Storage};
use crate::util::sync::Lock;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Everything registered on an [`Epub`], guarded by a single lock.
#[derive(Clone, Debug)]
pub(crate) struct EpubState {
    pub(crate) metadata: Metadata,
    pub(crate) resources: ResourceRegistry,
    pub(crate) sections: SectionTree,
    pub(crate) cover: Option<Cover>,
}

impl EpubState {
    pub(crate) fn new(title: &str) -> Self {
        Self {
            metadata: Metadata::new(title),
            resources: ResourceRegistry::default(),
            sections: SectionTree::default(),
            cover: None,
        }
    }
}

/// Construction-time configuration, shared by every write of an [`Epub`].
#[derive(Clone)]
pub(crate) struct EpubConfig {
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) grabber: Arc<dyn MediaGrabber>,
    pub(crate) compression: u8,
    pub(crate) staging_prefix: String,
}

impl EpubConfig {
    const DEFAULT_COMPRESSION: u8 = 6;
    const DEFAULT_STAGING_PREFIX: &'static str = "epubwright";
}

impl Default for EpubConfig {
    fn default() -> Self {
        Self {
            storage: Arc::new(OsStorage::default()),
            grabber: Arc::new(SourceGrabber::default()),
            compression: Self::DEFAULT_COMPRESSION,
            staging_prefix: Self::DEFAULT_STAGING_PREFIX.to_owned(),
        }
    }
}

impl Debug for EpubConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EpubConfig")
            .field("compression", &self.compression)
            .field("staging_prefix", &self.staging_prefix)
            .finish_non_exhaustive()
    }
}

/// An EPUB publication under assembly.
///
/// Sections, subsections and resources are registered in order, then the
/// publication is serialized with [`Epub::write_to`] or [`Epub::save`].
/// Resource sources are verified when added but only retrieved during
/// serialization.
///
/// Every method takes `&self`; an [`Epub`] may be shared between threads
/// (e.g., within an [`Arc`]), with all mutations serialized by an internal lock.
///
/// # Filenames
/// Each resource category ([`MediaCategory`]) has its own filename namespace,
/// while section filenames are unique across all sections and subsections.
/// When no filename is given, one is derived from the source locator or
/// generated from a template (`image0001.png`, `section0001.xhtml`).
///
/// # Examples
/// ```
/// # fn main() -> epubwright::EpubResult<()> {
/// use epubwright::Epub;
/// use epubwright::storage::MemoryStorage;
///
/// let epub = Epub::builder()
///     .storage(MemoryStorage::new())
///     .compression(9)
///     .build("My Title");
///
/// let css = epub.add_css("data:text/css,p%7Bmargin:0%7D", Some("main.css"))?;
/// assert_eq!("../css/main.css", css);
///
/// let chapter = epub.add_section("<p>Hello</p>", "Chapter 1", None, Some(&css))?;
/// assert_eq!("section0001.xhtml", chapter);
///
/// let mut archive = Vec::new();
/// let written = epub.write_to(&mut archive)?;
/// assert_eq!(archive.len() as u64, written);
/// # Ok(())
/// # }
/// ```
pub struct Epub {
    state: Lock<EpubState>,
    config: EpubConfig,
}

impl Epub {
    /// Creates a publication with the given title and the default configuration.
    ///
    /// - Language: `en`
    /// - Identifier: `urn:uuid:<random>`
    /// - Storage: [`OsStorage`] rooted at the system temp directory
    /// - Grabber: [`SourceGrabber::default`]
    pub fn new(title: &str) -> Self {
        EpubBuilder::new().build(title)
    }

    /// Returns an [`EpubBuilder`] to configure storage, retrieval and compression.
    pub fn builder() -> EpubBuilder {
        EpubBuilder::new()
    }

    fn add_resource(
        &self,
        category: MediaCategory,
        source: &str,
        filename: Option<&str>,
    ) -> EpubResult<String> {
        let mut state = self.state.lock();
        state
            .resources
            .add(self.config.grabber.as_ref(), category, source, filename)
    }

    /// Registers a stylesheet.
    ///
    /// `source` may be a URL, a local path or a `data:` URL.
    /// If `filename` is [`None`], the base name of `source` is used when
    /// available, otherwise a name such as `css0001.css` is generated.
    ///
    /// Returns the stylesheet path relative to section documents
    /// (`../css/<filename>`), suitable as a `css_path` for
    /// [`Self::add_section`].
    ///
    /// # Errors
    /// - [`EpubError::FilenameAlreadyUsed`](errors::EpubError::FilenameAlreadyUsed)
    /// - [`EpubError::FileRetrieval`](errors::EpubError::FileRetrieval)
    pub fn add_css(&self, source: &str, filename: Option<&str>) -> EpubResult<String> {
        self.add_resource(MediaCategory::Css, source, filename)
    }

    /// Registers a font, returning its path relative to section documents (`../fonts/<filename>`).
    ///
    /// See [`Self::add_css`] for filename resolution and errors.
    pub fn add_font(&self, source: &str, filename: Option<&str>) -> EpubResult<String> {
        self.add_resource(MediaCategory::Font, source, filename)
    }

    /// Registers an image, returning its path relative to section documents (`../images/<filename>`).
    ///
    /// See [`Self::add_css`] for filename resolution and errors.
    pub fn add_image(&self, source: &str, filename: Option<&str>) -> EpubResult<String> {
        self.add_resource(MediaCategory::Image, source, filename)
    }

    /// Registers a video, returning its path relative to section documents (`../videos/<filename>`).
    ///
    /// See [`Self::add_css`] for filename resolution and errors.
    pub fn add_video(&self, source: &str, filename: Option<&str>) -> EpubResult<String> {
        self.add_resource(MediaCategory::Video, source, filename)
    }

    /// Registers an audio file, returning its path relative to section documents (`../audio/<filename>`).
    ///
    /// See [`Self::add_css`] for filename resolution and errors.
    pub fn add_audio(&self, source: &str, filename: Option<&str>) -> EpubResult<String> {
        self.add_resource(MediaCategory::Audio, source, filename)
    }

    /// Appends a top-level section to the reading order.
    ///
    /// - `body`: XHTML placed within `<body>` as-is; it is not validated.
    /// - `title`: The navigation label. Untitled (empty) sections are
    ///   part of the reading order but omitted from the table of contents.
    /// - `filename`: Generated as `section0001.xhtml`, ... when [`None`].
    /// - `css_path`: A stylesheet path as returned by [`Self::add_css`].
    ///
    /// Returns the section's filename.
    ///
    /// # Errors
    /// - [`EpubError::FilenameAlreadyUsed`](errors::EpubError::FilenameAlreadyUsed)
    pub fn add_section(
        &self,
        body: &str,
        title: &str,
        filename: Option<&str>,
        css_path: Option<&str>,
    ) -> EpubResult<String> {
        self.add_section_under(None, body, title, filename, css_path)
    }

    /// Appends a subsection to the top-level section named `parent`.
    ///
    /// Subsections are read directly after their parent (and its earlier
    /// subsections) and appear nested within the table of contents when
    /// both they and their parent are titled.
    /// Subsections cannot have subsections of their own.
    ///
    /// # Errors
    /// - [`EpubError::ParentDoesNotExist`](errors::EpubError::ParentDoesNotExist)
    /// - [`EpubError::FilenameAlreadyUsed`](errors::EpubError::FilenameAlreadyUsed)
    pub fn add_subsection(
        &self,
        parent: &str,
        body: &str,
        title: &str,
        filename: Option<&str>,
        css_path: Option<&str>,
    ) -> EpubResult<String> {
        self.add_section_under(Some(parent), body, title, filename, css_path)
    }

    fn add_section_under(
        &self,
        parent: Option<&str>,
        body: &str,
        title: &str,
        filename: Option<&str>,
        css_path: Option<&str>,
    ) -> EpubResult<String> {
        let section = NewSection {
            body,
            title,
            filename,
            css_path,
        };
        self.state.lock().sections.add(parent, section)
    }

    /// Sets the cover, replacing any previous one.
    ///
    /// A cover consists of an image, a stylesheet (a built-in one when
    /// `css_source` is [`None`]) and a section displaying the image, named
    /// `cover<ext>`, `cover.css` and `cover.xhtml` respectively
    /// (or generated names if those are taken).
    /// The cover section is always first in the reading order and never
    /// appears in the table of contents.
    ///
    /// # Errors
    /// If the image or stylesheet cannot be retrieved, the previous cover
    /// (if any) is kept intact.
    pub fn set_cover(&self, image_source: &str, css_source: Option<&str>) -> EpubResult<()> {
        let mut state = self.state.lock();
        state.replace_cover(self.config.grabber.as_ref(), image_source, css_source)
    }

    /// Registers every remote (`http`/`https`) image referenced by an `<img>`
    /// element within section bodies and points each reference at the
    /// registered copy (`../images/<filename>`).
    ///
    /// References that cannot be retrieved are left unchanged.
    /// Returns the number of rewritten references.
    pub fn embed_images(&self) -> usize {
        let mut state = self.state.lock();
        state.embed_images(self.config.grabber.as_ref())
    }

    /// Sets the title (`dc:title`).
    pub fn set_title(&self, title: &str) {
        self.state.lock().metadata.title = title.to_owned();
    }

    /// The title.
    pub fn title(&self) -> String {
        self.state.lock().metadata.title.clone()
    }

    /// Sets the author (`dc:creator`, with the `aut` role).
    pub fn set_author(&self, author: &str) {
        self.state.lock().metadata.author = author.to_owned();
    }

    /// The author, empty if unset.
    pub fn author(&self) -> String {
        self.state.lock().metadata.author.clone()
    }

    /// Sets the language (`dc:language`) as a BCP 47 tag such as `en` or `pt-BR`.
    pub fn set_lang(&self, lang: &str) {
        self.state.lock().metadata.lang = lang.to_owned();
    }

    /// The language. Default: `en`
    pub fn lang(&self) -> String {
        self.state.lock().metadata.lang.clone()
    }

    /// Sets the description (`dc:description`).
    pub fn set_description(&self, description: &str) {
        self.state.lock().metadata.description = description.to_owned();
    }

    /// The description, empty if unset.
    pub fn description(&self) -> String {
        self.state.lock().metadata.description.clone()
    }

    /// Sets the unique identifier (`dc:identifier`), such as an ISBN URN.
    pub fn set_identifier(&self, identifier: &str) {
        self.state.lock().metadata.identifier = identifier.to_owned();
    }

    /// The unique identifier. Default: `urn:uuid:<random>`
    pub fn identifier(&self) -> String {
        self.state.lock().metadata.identifier.clone()
    }

    /// Sets the page progression direction of the reading order.
    pub fn set_page_direction(&self, direction: PageDirection) {
        self.state.lock().metadata.page_direction = direction;
    }

    /// The page progression direction. Default: [`PageDirection::Default`]
    pub fn page_direction(&self) -> PageDirection {
        self.state.lock().metadata.page_direction
    }

    fn snapshot(&self) -> EpubState {
        self.state.lock().clone()
    }
}

impl Debug for Epub {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Epub")
            .field("state", &*self.state.lock())
            .field("config", &self.config)
            .finish()
    }
}

/// Configures and creates an [`Epub`], accessible via [`Epub::builder`].
///
/// # Examples
/// ```
/// use epubwright::Epub;
/// use epubwright::grab::SourceGrabber;
/// use epubwright::storage::MemoryStorage;
///
/// let epub = Epub::builder()
///     .storage(MemoryStorage::new())
///     .grabber(SourceGrabber::offline())
///     .compression(0)
///     .staging_prefix("my-app")
///     .build("Offline Book");
///
/// assert_eq!("Offline Book", epub.title());
/// ```
#[derive(Clone, Debug, Default)]
pub struct EpubBuilder {
    config: EpubConfig,
}

impl EpubBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the staging area archive entries are written to before being
    /// compressed into the final archive.
    ///
    /// Default: [`OsStorage`] rooted at [`std::env::temp_dir`]
    pub fn storage(&mut self, storage: impl Storage + 'static) -> &mut Self {
        self.shared_storage(Arc::new(storage))
    }

    /// Sets a staging area that may be shared with other publications.
    pub fn shared_storage(&mut self, storage: Arc<dyn Storage>) -> &mut Self {
        self.config.storage = storage;
        self
    }

    /// Sets how resource sources are verified and retrieved.
    ///
    /// Default: [`SourceGrabber::default`]
    pub fn grabber(&mut self, grabber: impl MediaGrabber + 'static) -> &mut Self {
        self.shared_grabber(Arc::new(grabber))
    }

    /// Sets a grabber that may be shared with other publications.
    pub fn shared_grabber(&mut self, grabber: Arc<dyn MediaGrabber>) -> &mut Self {
        self.config.grabber = grabber;
        self
    }

    /// Sets the deflate compression level from `0` (stored) to `9`.
    /// Values above `9` are clamped.
    ///
    /// The `mimetype` entry is always stored uncompressed.
    ///
    /// Default: `6`
    pub fn compression(&mut self, level: u8) -> &mut Self {
        self.config.compression = level.min(9);
        self
    }

    /// Sets the prefix of the per-write staging directory (`<prefix>-<uuid>`).
    ///
    /// Default: `epubwright`
    pub fn staging_prefix(&mut self, prefix: &str) -> &mut Self {
        self.config.staging_prefix = prefix.to_owned();
        self
    }

    /// Creates an [`Epub`] with the given title.
    pub fn build(&self, title: &str) -> Epub {
        Epub {
            state: Lock::new(EpubState::new(title)),
            config: self.config.clone(),
        }
    }
}
