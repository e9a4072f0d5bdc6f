//! [RFC 2397](https://www.rfc-editor.org/rfc/rfc2397) `data:` URLs.

use crate::grab::GrabError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const SCHEME: &str = "data:";
const BASE64: &str = "base64";
/// The media type implied by an omitted media type.
const DEFAULT_MEDIA_TYPE: &str = "text/plain";

/// A borrowed view of a `data:[<media type>][;base64],<data>` URL.
#[derive(Debug, PartialEq)]
pub(crate) struct DataUrl<'a> {
    media_type: &'a str,
    is_base64: bool,
    payload: &'a str,
}

impl<'a> DataUrl<'a> {
    pub(crate) fn parse(url: &'a str) -> Result<Self, GrabError> {
        let rest = url
            .get(..SCHEME.len())
            .filter(|scheme| scheme.eq_ignore_ascii_case(SCHEME))
            .map(|_| &url[SCHEME.len()..])
            .ok_or_else(|| invalid(url, "missing `data:` scheme"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| invalid(url, "missing `,` separator"))?;

        let mut params = header.split(';');
        let media_type = params.next().unwrap_or_default().trim();
        let is_base64 = params.any(|param| param.trim().eq_ignore_ascii_case(BASE64));

        if !media_type.is_empty() && !media_type.contains('/') {
            return Err(invalid(url, "malformed media type"));
        }

        Ok(Self {
            media_type,
            is_base64,
            payload,
        })
    }

    /// The declared media type without parameters, lowercased.
    pub(crate) fn media_type(&self) -> String {
        match self.media_type {
            "" => DEFAULT_MEDIA_TYPE.to_owned(),
            media_type => media_type.to_ascii_lowercase(),
        }
    }

    /// Returns `true` if a media type is explicitly declared.
    pub(crate) fn has_media_type(&self) -> bool {
        !self.media_type.is_empty()
    }

    pub(crate) fn decode(&self) -> Result<Vec<u8>, GrabError> {
        let bytes: Vec<u8> = percent_encoding::percent_decode_str(self.payload).collect();

        if !self.is_base64 {
            return Ok(bytes);
        }

        let compact: Vec<u8> = bytes
            .into_iter()
            .filter(|byte| !byte.is_ascii_whitespace())
            .collect();

        STANDARD
            .decode(compact)
            .map_err(|error| GrabError::InvalidDataUrl(error.to_string()))
    }
}

fn invalid(url: &str, reason: &str) -> GrabError {
    const PREVIEW: usize = 32;

    let preview = match url.char_indices().nth(PREVIEW) {
        Some((end, _)) => &url[..end],
        None => url,
    };
    GrabError::InvalidDataUrl(format!("{reason}: `{preview}`"))
}
