//! Manifest, spine and navigation derived from the registered content.
//!
//! Both navigation documents (`nav.xhtml` and `toc.ncx`) are rendered
//! from the same [`NavEntry`] records, produced by a single walk over
//! the section tree.

use crate::epub::EpubState;
use crate::epub::consts::{dc, layout, mime, opf};
use crate::epub::resource::MediaCategory;
use crate::grab::media_type;
use crate::util::str::to_xml_id;
use crate::util::uri;
use std::collections::{HashMap, HashSet};

/// Media types resolved while staging resources, keyed by category and filename.
pub(crate) type MediaTypes = HashMap<(MediaCategory, String), String>;

/// An `<item>` of the package manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ManifestItem {
    pub(crate) id: String,
    /// Percent-encoded; relative to the content directory.
    pub(crate) href: String,
    pub(crate) media_type: String,
    pub(crate) properties: Option<&'static str>,
}

/// A navigation record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NavEntry<'a> {
    pub(crate) title: &'a str,
    /// Percent-encoded; relative to the content directory.
    pub(crate) href: String,
    /// `1` for top-level sections, `2` for subsections.
    pub(crate) depth: usize,
    /// 1-based position in document order.
    pub(crate) index: usize,
}

/// A [`NavEntry`] with the entries nested beneath it.
#[derive(Debug)]
pub(crate) struct NavNode<'a, 'b> {
    pub(crate) entry: &'b NavEntry<'a>,
    pub(crate) children: Vec<NavNode<'a, 'b>>,
}

/// Everything the package and navigation documents reference.
#[derive(Debug)]
pub(crate) struct PackagePlan<'a> {
    pub(crate) manifest: Vec<ManifestItem>,
    /// Manifest ids in reading order.
    pub(crate) spine: Vec<String>,
    pub(crate) navigation: Vec<NavEntry<'a>>,
    pub(crate) cover_image_id: Option<String>,
}

impl<'a> PackagePlan<'a> {
    pub(crate) fn new(state: &'a EpubState, media_types: &MediaTypes) -> Self {
        let mut ids = IdGenerator::default();
        let cover = state.cover.as_ref();
        let mut manifest = vec![
            ManifestItem {
                id: layout::NAV_ID.to_owned(),
                href: layout::NAV_FILE.to_owned(),
                media_type: mime::XHTML.to_owned(),
                properties: Some(opf::NAV_PROPERTY),
            },
            ManifestItem {
                id: layout::NCX_ID.to_owned(),
                href: layout::NCX_FILE.to_owned(),
                media_type: mime::NCX.to_owned(),
                properties: None,
            },
        ];

        let mut section_ids = HashMap::new();
        for (section, _) in state.sections.walk() {
            let id = ids.generate(&section.filename);
            section_ids.insert(section.filename.as_str(), id.clone());
            manifest.push(ManifestItem {
                id,
                href: section_href(&section.filename),
                media_type: mime::XHTML.to_owned(),
                properties: None,
            });
        }

        let mut cover_image_id = None;
        for (category, resource) in state.resources.iter() {
            let id = ids.generate(&resource.filename);
            let is_cover_image = category == MediaCategory::Image
                && cover.is_some_and(|cover| cover.image == resource.filename);
            if is_cover_image {
                cover_image_id = Some(id.clone());
            }

            manifest.push(ManifestItem {
                href: resource_href(category, &resource.filename),
                media_type: media_types
                    .get(&(category, resource.filename.clone()))
                    .cloned()
                    .unwrap_or_else(|| media_type::OCTET_STREAM.to_owned()),
                properties: is_cover_image.then_some(opf::COVER_IMAGE_PROPERTY),
                id,
            });
        }

        // The cover always comes first
        let is_cover = |filename: &str| cover.is_some_and(|cover| cover.section == filename);
        let cover_section = state.sections.iter().find(|section| is_cover(&section.filename));
        let spine = cover_section
            .into_iter()
            .chain(state.sections.iter().filter(|section| !is_cover(&section.filename)))
            .flat_map(|section| std::iter::once(section).chain(&section.children))
            .filter_map(|section| section_ids.get(section.filename.as_str()).cloned())
            .collect();

        Self {
            manifest,
            spine,
            navigation: navigation_entries(state),
            cover_image_id,
        }
    }

    /// The deepest navigation level, at least `1`.
    pub(crate) fn max_depth(&self) -> usize {
        self.navigation
            .iter()
            .map(|entry| entry.depth)
            .max()
            .unwrap_or_default()
            .max(1)
    }

    /// Nests the flat navigation records by depth.
    pub(crate) fn navigation_tree(&self) -> Vec<NavNode<'a, '_>> {
        fn nest<'a, 'b>(entries: &'b [NavEntry<'a>], depth: usize) -> Vec<NavNode<'a, 'b>> {
            let mut nodes = Vec::new();
            let mut position = 0;

            while let Some(entry) = entries.get(position) {
                let end = entries[position + 1..]
                    .iter()
                    .position(|next| next.depth <= depth)
                    .map_or(entries.len(), |offset| position + 1 + offset);

                nodes.push(NavNode {
                    entry,
                    children: nest(&entries[position + 1..end], depth + 1),
                });
                position = end;
            }
            nodes
        }
        nest(&self.navigation, 1)
    }
}

/// Titled, non-cover top-level sections, each followed by its titled subsections.
///
/// Subsections of a section absent from navigation are absent too.
fn navigation_entries(state: &EpubState) -> Vec<NavEntry<'_>> {
    let cover = state.cover.as_ref().map(|cover| cover.section.as_str());
    let mut entries = Vec::new();

    let listed = state
        .sections
        .iter()
        .filter(|section| section.is_titled() && Some(section.filename.as_str()) != cover);

    for section in listed {
        let children = section.children.iter().filter(|child| child.is_titled());

        for (child, depth) in std::iter::once((section, 1)).chain(children.map(|child| (child, 2))) {
            entries.push(NavEntry {
                title: &child.title,
                href: section_href(&child.filename),
                depth,
                index: entries.len() + 1,
            });
        }
    }
    entries
}

fn section_href(filename: &str) -> String {
    uri::encode(&uri::join(layout::XHTML_DIR, filename)).into_owned()
}

fn resource_href(category: MediaCategory, filename: &str) -> String {
    uri::encode(&uri::join(category.folder(), filename)).into_owned()
}

/// Produces package-unique ids from filenames.
struct IdGenerator {
    used: HashSet<String>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        // Ids written elsewhere in the package document
        let reserved = [layout::NAV_ID, layout::NCX_ID, opf::PUB_ID, dc::CREATOR_ID, opf::ROLE];

        Self {
            used: reserved.into_iter().map(str::to_owned).collect(),
        }
    }
}

impl IdGenerator {
    fn generate(&mut self, filename: &str) -> String {
        let base = to_xml_id(filename);
        let mut id = base.clone();
        let mut count = 1;

        while !self.used.insert(id.clone()) {
            count += 1;
            id = format!("{base}-{count}");
        }
        id
    }
}
