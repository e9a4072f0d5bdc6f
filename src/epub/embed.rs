use crate::epub::EpubState;
use crate::epub::resource::{self, MediaCategory, ResourceRegistry};
use crate::grab::MediaGrabber;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

/// `src` attribute values of `<img>` elements that reference remote images.
static REMOTE_IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*(?:"(https?://[^"]+)"|'(https?://[^']+)')"#)
        .expect("remote image pattern should be valid")
});

impl EpubState {
    /// Registers every remote image referenced by section bodies and
    /// rewrites each reference to point at the registered copy.
    ///
    /// References that cannot be retrieved are left unchanged.
    /// Returns the number of rewritten references.
    pub(crate) fn embed_images(&mut self, grabber: &dyn MediaGrabber) -> usize {
        let EpubState {
            resources,
            sections,
            ..
        } = self;
        // Each distinct URL is checked once; `None` marks a failed retrieval
        let mut embedded: HashMap<String, Option<String>> = HashMap::new();
        let mut rewritten = 0;

        for body in sections.bodies_mut() {
            let replaced = REMOTE_IMG_SRC.replace_all(body, |captures: &Captures<'_>| {
                let element = &captures[0];
                let Some(url) = captures.get(1).or_else(|| captures.get(2)) else {
                    return element.to_owned();
                };
                let path = embedded
                    .entry(url.as_str().to_owned())
                    .or_insert_with(|| embed_image(resources, grabber, url.as_str()));

                match path {
                    Some(path) => {
                        rewritten += 1;
                        let offset = captures.get(0).map_or(0, |whole| whole.start());
                        let (start, end) = (url.start() - offset, url.end() - offset);
                        format!("{}{path}{}", &element[..start], &element[end..])
                    }
                    None => element.to_owned(),
                }
            });

            if let Cow::Owned(replaced) = replaced {
                *body = replaced;
            }
        }

        tracing::info!(rewritten, images = embedded.len(), "embedded remote images");
        rewritten
    }
}

fn embed_image(resources: &mut ResourceRegistry, grabber: &dyn MediaGrabber, url: &str) -> Option<String> {
    let existing = resources
        .resources(MediaCategory::Image)
        .iter()
        .find(|resource| resource.source == url);

    if let Some(existing) = existing {
        return Some(resource::relative_path(MediaCategory::Image, &existing.filename));
    }

    match resources.add(grabber, MediaCategory::Image, url, None) {
        Ok(path) => Some(path),
        Err(error) => {
            tracing::warn!(url, %error, "leaving image reference unchanged");
            None
        }
    }
}
