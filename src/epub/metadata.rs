//! Publication-level metadata written to the package document.

use std::fmt::{Display, Formatter};

/// The page progression direction, indicating how readable content flows.
///
/// The page direction does **not** affect the order of sections;
/// it is a hint for reading systems.
///
/// Default: [`PageDirection::Default`]
#[non_exhaustive]
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq)]
pub enum PageDirection {
    /// Pages flow from left-to-right (`ltr`).
    LeftToRight,
    /// Pages flow from right-to-left (`rtl`).
    RightToLeft,
    /// No specified page direction preference (`default`).
    ///
    /// The `page-progression-direction` attribute is omitted.
    #[default]
    Default,
}

impl PageDirection {
    const DEFAULT: &'static str = "default";
    const LEFT_TO_RIGHT: &'static str = "ltr";
    const RIGHT_TO_LEFT: &'static str = "rtl";

    /// Parses `ltr`, `rtl` or `default`.
    ///
    /// Any other value is treated as [`PageDirection::Default`].
    ///
    /// # Examples
    /// ```
    /// # use epubwright::epub::PageDirection;
    /// assert_eq!(PageDirection::RightToLeft, PageDirection::from_value("rtl"));
    /// assert_eq!(PageDirection::Default, PageDirection::from_value("sideways"));
    /// ```
    pub fn from_value(value: &str) -> Self {
        match value.trim() {
            Self::LEFT_TO_RIGHT => Self::LeftToRight,
            Self::RIGHT_TO_LEFT => Self::RightToLeft,
            _ => Self::Default,
        }
    }

    /// Returns the string representation of a [`PageDirection`] preference.
    ///
    /// # Examples
    /// ```
    /// # use epubwright::epub::PageDirection;
    /// assert_eq!("ltr", PageDirection::LeftToRight.as_str());
    /// assert_eq!("rtl", PageDirection::RightToLeft.as_str());
    /// assert_eq!("default", PageDirection::Default.as_str());
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeftToRight => Self::LEFT_TO_RIGHT,
            Self::RightToLeft => Self::RIGHT_TO_LEFT,
            Self::Default => Self::DEFAULT,
        }
    }

    /// Returns `true` if no direction preference is set.
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl Display for PageDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Metadata {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) lang: String,
    pub(crate) description: String,
    pub(crate) identifier: String,
    pub(crate) page_direction: PageDirection,
}

impl Metadata {
    const DEFAULT_LANG: &'static str = "en";
    const UUID_URN_PREFIX: &'static str = "urn:uuid:";

    pub(crate) fn new(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            author: String::new(),
            lang: Self::DEFAULT_LANG.to_owned(),
            description: String::new(),
            identifier: Self::generate_identifier(),
            page_direction: PageDirection::Default,
        }
    }

    fn generate_identifier() -> String {
        crate::util::str::prefix(Self::UUID_URN_PREFIX, &uuid::Uuid::new_v4().to_string())
    }
}
