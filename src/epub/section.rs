//! Ordered content sections, each with at most one level of subsections.

use crate::epub::errors::{EpubError, EpubResult};
use crate::epub::resource::is_valid_filename;

/// A content unit rendered into its own XHTML document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Section {
    pub(crate) filename: String,
    /// An empty title excludes the section from navigation.
    pub(crate) title: String,
    /// Preformatted XHTML placed inside `<body>` as-is.
    pub(crate) body: String,
    /// Stylesheet path relative to the section document.
    pub(crate) css_path: Option<String>,
    pub(crate) children: Vec<Section>,
}

impl Section {
    pub(crate) fn is_titled(&self) -> bool {
        !self.title.is_empty()
    }
}

/// Content passed to [`SectionTree::add`].
pub(crate) struct NewSection<'a> {
    pub(crate) body: &'a str,
    pub(crate) title: &'a str,
    pub(crate) filename: Option<&'a str>,
    pub(crate) css_path: Option<&'a str>,
}

/// Top-level sections in insertion order.
///
/// Filenames are unique across top-level sections and all subsections combined.
#[derive(Clone, Debug, Default)]
pub(crate) struct SectionTree {
    sections: Vec<Section>,
}

impl SectionTree {
    const GENERATED_PREFIX: &'static str = "section";
    const EXTENSION: &'static str = ".xhtml";

    /// Appends a section, or a subsection if `parent` is given.
    ///
    /// Returns the section's filename.
    pub(crate) fn add(&mut self, parent: Option<&str>, section: NewSection<'_>) -> EpubResult<String> {
        let filename = self.resolve_filename(section.filename)?;
        let siblings = match parent {
            None => &mut self.sections,
            Some(parent) => {
                &mut self
                    .sections
                    .iter_mut()
                    .find(|section| section.filename == parent)
                    .ok_or_else(|| EpubError::ParentDoesNotExist(parent.to_owned()))?
                    .children
            }
        };

        siblings.push(Section {
            filename: filename.clone(),
            title: section.title.to_owned(),
            body: section.body.to_owned(),
            css_path: section.css_path.filter(|path| !path.is_empty()).map(str::to_owned),
            children: Vec::new(),
        });
        Ok(filename)
    }

    fn resolve_filename(&self, requested: Option<&str>) -> EpubResult<String> {
        if let Some(requested) = requested.filter(|requested| !requested.is_empty()) {
            if !is_valid_filename(requested) {
                return Err(EpubError::InvalidFilename(requested.to_owned()));
            }
            return match self.contains(requested) {
                true => Err(EpubError::filename_already_used(requested)),
                false => Ok(requested.to_owned()),
            };
        }

        // `section0001.xhtml`, skipping numbers taken by explicit filenames
        (self.len() + 1..)
            .map(|index| format!("{}{index:04}{}", Self::GENERATED_PREFIX, Self::EXTENSION))
            .find(|filename| !self.contains(filename))
            .ok_or_else(|| EpubError::filename_already_used(Self::GENERATED_PREFIX))
    }

    pub(crate) fn contains(&self, filename: &str) -> bool {
        self.walk().any(|(section, _)| section.filename == filename)
    }

    /// Total number of sections and subsections.
    pub(crate) fn len(&self) -> usize {
        self.walk().count()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Removes a top-level section (with its subsections).
    pub(crate) fn remove(&mut self, filename: &str) -> Option<Section> {
        let position = self
            .sections
            .iter()
            .position(|section| section.filename == filename)?;

        Some(self.sections.remove(position))
    }

    /// Top-level sections in insertion order.
    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    /// Every section depth-first with its depth (`1` for top-level sections).
    pub(crate) fn walk(&self) -> impl Iterator<Item = (&Section, usize)> {
        self.sections.iter().flat_map(|section| {
            std::iter::once((section, 1)).chain(section.children.iter().map(|child| (child, 2)))
        })
    }

    /// The body of every section and subsection, in [`walk`](Self::walk) order.
    pub(crate) fn bodies_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.sections.iter_mut().flat_map(|section| {
            let Section { body, children, .. } = section;
            std::iter::once(body).chain(children.iter_mut().map(|child| &mut child.body))
        })
    }
}
