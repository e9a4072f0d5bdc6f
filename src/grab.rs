//! Retrieval of resource bytes from source locators.
//!
//! A source locator is one of:
//! - An HTTP(S) URL (`https://example.com/image.png`)
//! - An [RFC 2397](https://www.rfc-editor.org/rfc/rfc2397) data URL (`data:image/png;base64,...`)
//! - A local filesystem path (`assets/image.png`)
//!
//! The classification is made from the locator's prefix alone,
//! so a locator is never tried against more than one retrieval method.

mod data_url;
pub mod http;
pub(crate) mod media_type;

use crate::grab::data_url::DataUrl;
use crate::grab::http::HttpClient;
use crate::util::uri;
use std::borrow::Cow;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Possible errors when retrieving a source.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum GrabError {
    /// The HTTP request could not be completed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server responded with a client or server error status.
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// The response status code.
        status: u16,
        /// The requested URL.
        url: String,
    },

    /// A data URL is malformed or its payload cannot be decoded.
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// Remote sources require an [`HttpClient`], which is not configured.
    #[error("No HTTP client is available to retrieve `{0}`")]
    NoHttpClient(String),

    /// A local file could not be read.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Retrieved source content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Media {
    /// The raw bytes.
    pub data: Vec<u8>,
    /// The detected IANA media type (`image/png`).
    pub media_type: String,
}

/// Resolves source locators into [`Media`].
///
/// Implementations must be shareable between threads, as a single grabber
/// may serve several publications being assembled concurrently.
pub trait MediaGrabber: Send + Sync {
    /// Verifies that `source` is retrievable without keeping its content.
    fn check(&self, source: &str) -> Result<(), GrabError>;

    /// Retrieves the content of `source`.
    ///
    /// `filename` is the internal name the content will be stored under;
    /// implementations may use it as a hint when detecting the media type.
    fn fetch(&self, source: &str, filename: &str) -> Result<Media, GrabError>;
}

/// The kind of a source locator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Source<'a> {
    Remote(&'a str),
    Data(&'a str),
    Local(&'a str),
}

impl<'a> Source<'a> {
    pub(crate) fn classify(locator: &'a str) -> Self {
        if uri::has_scheme(locator, "http") || uri::has_scheme(locator, "https") {
            Self::Remote(locator)
        } else if uri::has_scheme(locator, "data") {
            Self::Data(locator)
        } else {
            Self::Local(locator)
        }
    }

    /// The base name of the locator, if it has one.
    ///
    /// Data URLs never have a base name.
    pub(crate) fn file_name(&self) -> Option<Cow<'a, str>> {
        match *self {
            Self::Remote(url) => {
                // Ignore the authority (`https://example.com`)
                let path = url.split_once("://")?.1.split_once('/')?.1;
                uri::file_name(path).map(uri::decode)
            }
            Self::Local(path) => Path::new(path)
                .file_name()
                .map(|name| name.to_string_lossy()),
            Self::Data(_) => None,
        }
    }

    /// The file extension (including the dot) implied by the locator.
    ///
    /// For data URLs, the extension is derived from the declared media type.
    pub(crate) fn extension(&self) -> Option<Cow<'a, str>> {
        match *self {
            Self::Data(url) => DataUrl::parse(url)
                .ok()
                .filter(DataUrl::has_media_type)
                .and_then(|data_url| media_type::extension_of(&data_url.media_type()))
                .map(Cow::Borrowed),
            _ => match self.file_name()? {
                Cow::Borrowed(name) => uri::extension(name).map(Cow::Borrowed),
                Cow::Owned(name) => uri::extension(&name).map(|ext| Cow::Owned(ext.to_owned())),
            },
        }
    }
}

/// The default [`MediaGrabber`].
///
/// Remote sources are retrieved with an [`HttpClient`], which by default
/// (with the `http` feature) is a [`ReqwestClient`](http::ReqwestClient)
/// without a timeout. Callers requiring bounded retrieval should supply
/// a client configured with one via [`SourceGrabber::with_http_client`].
///
/// Failed retrievals are never retried.
#[derive(Clone)]
pub struct SourceGrabber {
    http: Option<Arc<dyn HttpClient>>,
}

impl SourceGrabber {
    /// Creates a grabber using the default HTTP client, if available.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a grabber that retrieves remote sources with `client`.
    pub fn with_http_client(client: impl HttpClient + 'static) -> Self {
        Self {
            http: Some(Arc::new(client)),
        }
    }

    /// Creates a grabber that rejects remote sources.
    pub fn offline() -> Self {
        Self { http: None }
    }

    fn http(&self, url: &str) -> Result<&dyn HttpClient, GrabError> {
        self.http
            .as_deref()
            .ok_or_else(|| GrabError::NoHttpClient(url.to_owned()))
    }
}

impl Default for SourceGrabber {
    fn default() -> Self {
        #[cfg(feature = "http")]
        let http: Option<Arc<dyn HttpClient>> = Some(Arc::new(http::ReqwestClient::new()));
        #[cfg(not(feature = "http"))]
        let http: Option<Arc<dyn HttpClient>> = None;

        Self { http }
    }
}

impl std::fmt::Debug for SourceGrabber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceGrabber")
            .field("http", &self.http.is_some())
            .finish()
    }
}

impl MediaGrabber for SourceGrabber {
    fn check(&self, source: &str) -> Result<(), GrabError> {
        match Source::classify(source) {
            Source::Remote(url) => self.http(url)?.check(url),
            Source::Data(url) => DataUrl::parse(url)?.decode().map(|_| ()),
            Source::Local(path) => {
                let metadata = std::fs::metadata(path)?;

                if metadata.is_file() {
                    Ok(())
                } else {
                    Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file").into())
                }
            }
        }
    }

    fn fetch(&self, source: &str, filename: &str) -> Result<Media, GrabError> {
        let (data, declared) = match Source::classify(source) {
            Source::Remote(url) => (self.http(url)?.get(url)?, None),
            Source::Data(url) => {
                let data_url = DataUrl::parse(url)?;
                let declared = data_url.has_media_type().then(|| data_url.media_type());
                (data_url.decode()?, declared)
            }
            Source::Local(path) => (std::fs::read(path)?, None),
        };

        let detected = media_type::resolve(&data, &[source, filename]);
        let media_type = match declared {
            // Content signatures take precedence over a data URL's declared type,
            // unless detection could only determine a generic type.
            Some(declared) if matches!(detected, media_type::TEXT_PLAIN | media_type::OCTET_STREAM) => {
                declared
            }
            _ => detected.to_owned(),
        };

        Ok(Media { data, media_type })
    }
}
