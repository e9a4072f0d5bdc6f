//! Media type detection by content signature.

use crate::util::uri;

pub(crate) const OCTET_STREAM: &str = "application/octet-stream";
pub(crate) const TEXT_PLAIN: &str = "text/plain";
pub(crate) const TEXT_CSS: &str = "text/css";
const CSS_EXTENSION: &str = ".css";

/// `(offset, magic bytes, media type)`
#[rustfmt::skip]
const SIGNATURES: &[(usize, &[u8], &str)] = &[
    (0, b"\x89PNG\r\n\x1a\n",  "image/png"),
    (0, b"\xFF\xD8\xFF",       "image/jpeg"),
    (0, b"GIF87a",             "image/gif"),
    (0, b"GIF89a",             "image/gif"),
    (0, b"BM",                 "image/bmp"),
    (0, b"\x00\x00\x01\x00",   "image/vnd.microsoft.icon"),
    (0, b"II*\x00",            "image/tiff"),
    (0, b"MM\x00*",            "image/tiff"),
    (0, b"wOFF",               "font/woff"),
    (0, b"wOF2",               "font/woff2"),
    (0, b"OTTO",               "font/otf"),
    (0, b"\x00\x01\x00\x00\x00", "font/ttf"),
    (0, b"ID3",                "audio/mpeg"),
    (0, b"\xFF\xFB",           "audio/mpeg"),
    (0, b"\xFF\xF3",           "audio/mpeg"),
    (0, b"\xFF\xF2",           "audio/mpeg"),
    (0, b"fLaC",               "audio/flac"),
    (0, b"OggS",               "audio/ogg"),
    (0, b"\x1A\x45\xDF\xA3",   "video/webm"),
    (0, b"%PDF-",              "application/pdf"),
];

/// `(RIFF form type, media type)`
const RIFF_FORMS: &[(&[u8], &str)] = &[
    (b"WEBP", "image/webp"),
    (b"WAVE", "audio/wav"),
    (b"AVI ", "video/x-msvideo"),
];

/// Detects the media type of `data` from its leading bytes.
///
/// Content without a recognizable signature is classified as
/// [`TEXT_PLAIN`] if it is valid UTF-8 text, otherwise [`OCTET_STREAM`].
pub(crate) fn sniff(data: &[u8]) -> &'static str {
    if let Some((_, _, media_type)) = SIGNATURES
        .iter()
        .find(|(offset, magic, _)| data.get(*offset..).is_some_and(|data| data.starts_with(magic)))
    {
        return media_type;
    }
    if let Some(media_type) = sniff_container(data) {
        return media_type;
    }
    sniff_text(data)
}

/// RIFF and ISO base media (`ftyp`) containers.
fn sniff_container(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(b"RIFF") {
        let form = data.get(8..12)?;
        return RIFF_FORMS
            .iter()
            .find(|(magic, _)| *magic == form)
            .map(|(_, media_type)| *media_type);
    }
    if data.get(4..8) == Some(b"ftyp".as_slice()) {
        return Some(match data.get(8..12)? {
            b"M4A " | b"M4B " => "audio/mp4",
            b"qt  " => "video/quicktime",
            b"avif" => "image/avif",
            _ => "video/mp4",
        });
    }
    None
}

fn sniff_text(data: &[u8]) -> &'static str {
    const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
    const SNIFF_LEN: usize = 512;

    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let Some(text) = as_text(data) else {
        return OCTET_STREAM;
    };
    let head = text.trim_start();
    let head = &head[..floor_char_boundary(head, SNIFF_LEN)];

    if starts_with_ignore_case(head, "<svg") || (head.starts_with("<?xml") && head.contains("<svg")) {
        "image/svg+xml"
    } else if starts_with_ignore_case(head, "<!doctype html") || starts_with_ignore_case(head, "<html") {
        "text/html"
    } else if head.starts_with("<?xml") {
        "text/xml"
    } else {
        TEXT_PLAIN
    }
}

/// Valid UTF-8 without binary control characters.
fn as_text(data: &[u8]) -> Option<&str> {
    let text = match std::str::from_utf8(data) {
        Ok(text) => text,
        // Tolerate a multibyte character cut at the end of the data
        Err(error) if error.error_len().is_none() => {
            std::str::from_utf8(&data[..error.valid_up_to()]).ok()?
        }
        Err(_) => return None,
    };
    let is_binary = text
        .bytes()
        .any(|byte| byte.is_ascii_control() && !matches!(byte, b'\t' | b'\n' | b'\r' | b'\x0C'));

    (!is_binary).then_some(text)
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    (0..=index)
        .rev()
        .find(|i| text.is_char_boundary(*i))
        .unwrap_or_default()
}

fn starts_with_ignore_case(text: &str, start: &str) -> bool {
    text.len() >= start.len()
        && text.is_char_boundary(start.len())
        && text[..start.len()].eq_ignore_ascii_case(start)
}

/// Resolves the media type of retrieved content.
///
/// Plain text with a `.css` extension (on either the source
/// or the internal filename) is reclassified as a stylesheet.
pub(crate) fn resolve(data: &[u8], names: &[&str]) -> &'static str {
    let sniffed = sniff(data);

    let is_css = |name: &&str| {
        uri::extension(name).is_some_and(|ext| ext.eq_ignore_ascii_case(CSS_EXTENSION))
    };

    if sniffed == TEXT_PLAIN && names.iter().any(is_css) {
        TEXT_CSS
    } else {
        sniffed
    }
}

/// The conventional file extension (including the dot) of a media type.
pub(crate) fn extension_of(media_type: &str) -> Option<&'static str> {
    let essence = media_type.split(';').next().unwrap_or_default().trim();

    #[rustfmt::skip]
    let extension = match essence.to_ascii_lowercase().as_str() {
        "image/png"                => ".png",
        "image/jpeg" | "image/jpg" => ".jpg",
        "image/gif"                => ".gif",
        "image/webp"               => ".webp",
        "image/svg+xml"            => ".svg",
        "image/bmp"                => ".bmp",
        "image/avif"               => ".avif",
        "image/tiff"               => ".tiff",
        "font/ttf"                 => ".ttf",
        "font/otf"                 => ".otf",
        "font/woff"                => ".woff",
        "font/woff2"               => ".woff2",
        "audio/mpeg"               => ".mp3",
        "audio/mp4"                => ".m4a",
        "audio/ogg"                => ".ogg",
        "audio/wav"                => ".wav",
        "audio/flac"               => ".flac",
        "video/mp4"                => ".mp4",
        "video/webm"               => ".webm",
        "video/ogg"                => ".ogv",
        "video/quicktime"          => ".mov",
        "text/css"                 => ".css",
        "text/plain"               => ".txt",
        _ => return None,
    };
    Some(extension)
}
