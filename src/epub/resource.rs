//! Registry of media resources (stylesheets, fonts, images, videos, audio).

use crate::epub::errors::{EpubError, EpubResult};
use crate::grab::{MediaGrabber, Source};
use crate::util::uri;
use std::fmt::Display;

/// The category of a registered resource.
///
/// Each category has its own folder within the archive and its own
/// filename namespace; the same filename may be used in two categories.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum MediaCategory {
    /// Stylesheets (`css/`).
    Css,
    /// Fonts (`fonts/`).
    Font,
    /// Images (`images/`).
    Image,
    /// Videos (`videos/`).
    Video,
    /// Audio (`audio/`).
    Audio,
}

impl MediaCategory {
    /// Every category, in the order resources are written to the manifest.
    pub const ALL: [MediaCategory; 5] = [
        MediaCategory::Css,
        MediaCategory::Font,
        MediaCategory::Image,
        MediaCategory::Video,
        MediaCategory::Audio,
    ];

    /// The folder (relative to the content directory) holding resources of this category.
    ///
    /// # Examples
    /// ```
    /// # use epubwright::epub::MediaCategory;
    /// assert_eq!("css", MediaCategory::Css.folder());
    /// assert_eq!("images", MediaCategory::Image.folder());
    /// ```
    pub fn folder(&self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Font => "fonts",
            Self::Image => "images",
            Self::Video => "videos",
            Self::Audio => "audio",
        }
    }

    /// Prefix of generated filenames (`image0001.png`).
    fn generated_prefix(&self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Font => "font",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }

    /// Stylesheets are always stored with a `.css` extension,
    /// as reading systems do not sniff their type.
    fn forced_extension(&self) -> Option<&'static str> {
        match self {
            Self::Css => Some(".css"),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for MediaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.folder())
    }
}

/// A registered resource: its unique filename and where to retrieve it from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Resource {
    pub(crate) filename: String,
    pub(crate) source: String,
}

/// Filename-to-source mappings for every [`MediaCategory`], in insertion order.
#[derive(Clone, Debug, Default)]
pub(crate) struct ResourceRegistry {
    categories: [Vec<Resource>; 5],
}

impl ResourceRegistry {
    /// Determines the filename a resource would be registered under,
    /// without registering it.
    ///
    /// - An explicitly requested filename is used as-is,
    ///   provided it is a [valid filename](is_valid_filename).
    /// - Otherwise the base name of `source` is used if it is a
    ///   [valid filename](is_valid_filename) not yet taken.
    /// - Otherwise a name is generated from the category template
    ///   using the category's resource count + 1.
    ///
    /// # Errors
    /// - [`EpubError::InvalidFilename`] if the requested filename is not valid.
    /// - [`EpubError::FilenameAlreadyUsed`] if the resulting
    ///   filename is already registered within the category.
    pub(crate) fn resolve_filename(
        &self,
        category: MediaCategory,
        source: &str,
        requested: Option<&str>,
    ) -> EpubResult<String> {
        let filename = match requested.filter(|requested| !requested.is_empty()) {
            Some(requested) if !is_valid_filename(requested) => {
                return Err(EpubError::InvalidFilename(requested.to_owned()));
            }
            Some(requested) => requested.to_owned(),
            None => self.derive_filename(category, source),
        };

        if self.contains(category, &filename) {
            return Err(EpubError::filename_already_used(filename));
        }
        Ok(filename)
    }

    /// Registers `source` after verifying it is retrievable.
    ///
    /// Returns the resource's path relative to section documents.
    pub(crate) fn add(
        &mut self,
        grabber: &dyn MediaGrabber,
        category: MediaCategory,
        source: &str,
        requested: Option<&str>,
    ) -> EpubResult<String> {
        let filename = self.resolve_filename(category, source, requested)?;

        grabber
            .check(source)
            .map_err(|error| EpubError::file_retrieval(source, error))?;

        let path = relative_path(category, &filename);
        tracing::debug!(%category, %filename, "registered resource");
        self.insert(category, filename, source.to_owned());
        Ok(path)
    }

    fn derive_filename(&self, category: MediaCategory, source: &str) -> String {
        let source = Source::classify(source);

        if let Some(base_name) = source.file_name()
            && is_valid_filename(&base_name)
            && !self.contains(category, &base_name)
        {
            return base_name.into_owned();
        }

        let extension = match category.forced_extension() {
            Some(extension) => extension.to_owned(),
            None => source
                .extension()
                .map(|extension| extension.into_owned())
                .unwrap_or_default(),
        };
        self.generate_filename(category, &extension)
    }

    /// `category%04d.ext`, numbered by the category's current count + 1.
    pub(crate) fn generate_filename(&self, category: MediaCategory, extension: &str) -> String {
        let index = self.len(category) + 1;
        format!("{}{index:04}{extension}", category.generated_prefix())
    }

    pub(crate) fn insert(&mut self, category: MediaCategory, filename: String, source: String) {
        self.categories[category.index()].push(Resource { filename, source });
    }

    pub(crate) fn remove(&mut self, category: MediaCategory, filename: &str) -> Option<Resource> {
        let resources = &mut self.categories[category.index()];
        let position = resources
            .iter()
            .position(|resource| resource.filename == filename)?;

        Some(resources.remove(position))
    }

    pub(crate) fn get(&self, category: MediaCategory, filename: &str) -> Option<&Resource> {
        self.resources(category)
            .iter()
            .find(|resource| resource.filename == filename)
    }

    pub(crate) fn contains(&self, category: MediaCategory, filename: &str) -> bool {
        self.get(category, filename).is_some()
    }

    pub(crate) fn resources(&self, category: MediaCategory) -> &[Resource] {
        &self.categories[category.index()]
    }

    pub(crate) fn len(&self, category: MediaCategory) -> usize {
        self.resources(category).len()
    }

    /// Every resource, grouped by category in [`MediaCategory::ALL`] order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (MediaCategory, &Resource)> {
        MediaCategory::ALL.into_iter().flat_map(move |category| {
            self.resources(category)
                .iter()
                .map(move |resource| (category, resource))
        })
    }
}

/// The path of a resource relative to a section document: `../<folder>/<filename>`.
pub(crate) fn relative_path(category: MediaCategory, filename: &str) -> String {
    format!("../{}/{}", category.folder(), uri::encode(filename))
}

/// Returns `true` if `name` can be used as-is as a file name inside the archive.
///
/// Names must be non-empty, at most 255 bytes, must not be `.` or `..`,
/// and must not contain path separators or control characters.
pub(crate) fn is_valid_filename(name: &str) -> bool {
    const MAX_LEN: usize = 255;

    !name.is_empty()
        && name.len() <= MAX_LEN
        && name != "."
        && name != ".."
        && !name.contains(|c: char| matches!(c, '/' | '\\') || c.is_control())
}
