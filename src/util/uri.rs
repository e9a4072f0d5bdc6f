use percent_encoding::{AsciiSet, CONTROLS};
use std::borrow::Cow;

pub(crate) fn parent(href: &str) -> &str {
    href.rfind('/')
        .map_or("", |index| if index == 0 { "/" } else { &href[..index] })
}

pub(crate) fn decode(encoded: &str) -> Cow<'_, str> {
    percent_encoding::percent_decode_str(encoded).decode_utf8_lossy()
}

/// Percent-encodes a `/`-separated path for use as an `href`.
pub(crate) fn encode(path: &str) -> Cow<'_, str> {
    const PATH: &AsciiSet = &CONTROLS
        .add(b' ')
        .add(b'"')
        .add(b'#')
        .add(b'%')
        .add(b'<')
        .add(b'>')
        .add(b'?')
        .add(b'`')
        .add(b'{')
        .add(b'}');

    percent_encoding::utf8_percent_encode(path, PATH).into()
}

/// Joins two `/`-separated paths, ignoring empty components.
pub(crate) fn join(parent: &str, child: &str) -> String {
    let parent = parent.trim_end_matches('/');
    let child = child.trim_start_matches('/');

    match (parent.is_empty(), child.is_empty()) {
        (true, _) => child.to_owned(),
        (_, true) => parent.to_owned(),
        _ => format!("{parent}/{child}"),
    }
}

/// Removes the `?query` and `#fragment` portions of a locator.
pub(crate) fn strip_query_and_fragment(href: &str) -> &str {
    href.find(['?', '#']).map_or(href, |position| &href[..position])
}

/// The last path segment of a locator (`/`- or `\`-separated),
/// excluding any query or fragment.
///
/// Returns [`None`] if the locator ends with a separator.
pub(crate) fn file_name(href: &str) -> Option<&str> {
    let href = strip_query_and_fragment(href);
    let name = href.rsplit(['/', '\\']).next()?;

    (!name.is_empty()).then_some(name)
}

/// The extension of a file name including the leading dot (`.png`).
///
/// Hidden files without an extension (`.hidden`) have none.
pub(crate) fn extension(name: &str) -> Option<&str> {
    let name = file_name(name)?;

    match name.rfind('.') {
        Some(0) | None => None,
        Some(index) if index + 1 == name.len() => None,
        Some(index) => Some(&name[index..]),
    }
}

/// Returns `true` if the locator begins with the given scheme (case-insensitive).
pub(crate) fn has_scheme(href: &str, scheme: &str) -> bool {
    href.len() > scheme.len()
        && href.as_bytes()[scheme.len()] == b':'
        && href[..scheme.len()].eq_ignore_ascii_case(scheme)
}
