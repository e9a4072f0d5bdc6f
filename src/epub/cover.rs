use crate::epub::EpubState;
use crate::epub::errors::{EpubError, EpubResult};
use crate::epub::resource::MediaCategory;
use crate::epub::section::NewSection;
use crate::grab::{MediaGrabber, Source};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Stylesheet used when a cover is set without one.
pub(crate) const DEFAULT_COVER_CSS: &str = "\
body {
  background-color: #FFFFFF;
  margin-bottom: 0px;
  margin-left: 0px;
  margin-right: 0px;
  margin-top: 0px;
  text-align: center;
}

img {
  max-height: 100%;
  max-width: 100%;
}";

const COVER_IMAGE_STEM: &str = "cover";
const COVER_CSS_FILENAME: &str = "cover.css";
const COVER_SECTION_FILENAME: &str = "cover.xhtml";
const COVER_IMAGE_ALT: &str = "Cover Image";

/// Filenames of the three entries making up the cover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Cover {
    pub(crate) image: String,
    pub(crate) css: String,
    pub(crate) section: String,
}

impl EpubState {
    /// Replaces the current cover (if any) with a new one.
    ///
    /// The replacement is built on a copy of the state, which is committed
    /// only once the image, stylesheet and section were all added.
    /// On error, `self` is left untouched.
    pub(crate) fn replace_cover(
        &mut self,
        grabber: &dyn MediaGrabber,
        image_source: &str,
        css_source: Option<&str>,
    ) -> EpubResult<()> {
        let mut next = self.clone();

        if let Some(previous) = next.cover.take() {
            next.resources.remove(MediaCategory::Image, &previous.image);
            next.resources.remove(MediaCategory::Css, &previous.css);
            next.sections.remove(&previous.section);
        }

        let image_name = format!(
            "{COVER_IMAGE_STEM}{}",
            Source::classify(image_source).extension().unwrap_or_default(),
        );
        let image_path = with_fallback(&image_name, |filename| {
            next.resources.add(grabber, MediaCategory::Image, image_source, filename)
        })?;

        let default_css;
        let css_source = match css_source.filter(|source| !source.is_empty()) {
            Some(source) => source,
            None => {
                default_css = default_css_source();
                &default_css
            }
        };
        let css_path = with_fallback(COVER_CSS_FILENAME, |filename| {
            next.resources.add(grabber, MediaCategory::Css, css_source, filename)
        })?;

        let body = cover_body(&image_path);
        let section = with_fallback(COVER_SECTION_FILENAME, |filename| {
            next.sections.add(
                None,
                NewSection {
                    body: &body,
                    title: "",
                    filename,
                    css_path: Some(&css_path),
                },
            )
        })?;

        next.cover = Some(Cover {
            image: file_name_of(&image_path),
            css: file_name_of(&css_path),
            section,
        });
        *self = next;
        Ok(())
    }
}

/// Tries the preferred filename, then a generated one if it is taken.
fn with_fallback(
    preferred: &str,
    mut add: impl FnMut(Option<&str>) -> EpubResult<String>,
) -> EpubResult<String> {
    match add(Some(preferred)) {
        Err(EpubError::FilenameAlreadyUsed { .. }) => add(None),
        result => result,
    }
}

fn default_css_source() -> String {
    format!("data:text/css;base64,{}", STANDARD.encode(DEFAULT_COVER_CSS))
}

fn cover_body(image_path: &str) -> String {
    format!(r#"<img src="{image_path}" alt="{COVER_IMAGE_ALT}" />"#)
}

/// `../images/cover.png` -> `cover.png`
fn file_name_of(relative_path: &str) -> String {
    let name = relative_path.rsplit('/').next().unwrap_or(relative_path);
    crate::util::uri::decode(name).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grab::SourceGrabber;

    const PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";
    const JPEG: &str = "data:image/jpeg;base64,/9j/4AAQSkZJRgABAQAAAQABAAD/2w==";

    #[test]
    fn test_default_css_source_round_trips() {
        let source = default_css_source();
        let media = SourceGrabber::offline().fetch(&source, COVER_CSS_FILENAME).unwrap();

        assert_eq!(DEFAULT_COVER_CSS.as_bytes(), media.data);
        assert_eq!("text/css", media.media_type);
    }

    #[test]
    fn test_replace_cover() {
        let grabber = SourceGrabber::offline();
        let mut state = EpubState::new("Title");

        state.replace_cover(&grabber, PNG, None).unwrap();
        let cover = state.cover.clone().unwrap();
        assert_eq!("cover.png", cover.image);
        assert_eq!("cover.css", cover.css);
        assert_eq!("cover.xhtml", cover.section);

        let section = state.sections.iter().next().unwrap();
        assert_eq!(r#"<img src="../images/cover.png" alt="Cover Image" />"#, section.body);
        assert_eq!(Some("../css/cover.css"), section.css_path.as_deref());
        assert!(section.title.is_empty());

        // The second cover fully supersedes the first
        state.replace_cover(&grabber, JPEG, None).unwrap();
        let cover = state.cover.clone().unwrap();
        assert_eq!("cover.jpg", cover.image);
        assert_eq!(1, state.resources.len(MediaCategory::Image));
        assert_eq!(1, state.resources.len(MediaCategory::Css));
        assert_eq!(1, state.sections.len());
    }

    #[test]
    fn test_replace_cover_falls_back_to_generated_names() {
        let grabber = SourceGrabber::offline();
        let mut state = EpubState::new("Title");
        state
            .resources
            .add(&grabber, MediaCategory::Image, PNG, Some("cover.png"))
            .unwrap();
        state
            .resources
            .add(&grabber, MediaCategory::Css, "data:text/css,p{}", Some("cover.css"))
            .unwrap();
        state
            .sections
            .add(None, NewSection { body: "", title: "x", filename: Some("cover.xhtml"), css_path: None })
            .unwrap();

        state.replace_cover(&grabber, PNG, None).unwrap();
        let cover = state.cover.unwrap();
        assert_eq!("image0002.png", cover.image);
        assert_eq!("css0002.css", cover.css);
        assert_eq!("section0002.xhtml", cover.section);
    }

    #[test]
    fn test_failed_replacement_keeps_previous_cover() {
        let grabber = SourceGrabber::offline();
        let mut state = EpubState::new("Title");
        state.replace_cover(&grabber, PNG, None).unwrap();

        let error = state
            .replace_cover(&grabber, "https://example.com/cover.png", None)
            .unwrap_err();
        assert!(matches!(error, EpubError::FileRetrieval { .. }));

        let cover = state.cover.unwrap();
        assert_eq!("cover.png", cover.image);
        assert!(state.resources.contains(MediaCategory::Image, "cover.png"));
        assert!(state.resources.contains(MediaCategory::Css, "cover.css"));
        assert!(state.sections.contains("cover.xhtml"));
    }
}
