pub(crate) mod xml {
    pub(crate) const XMLNS: &str = "xmlns";
    pub(crate) const ID: &str = "id";
}

/// Archive layout.
pub(crate) mod layout {
    pub(crate) const MIMETYPE: &str = "mimetype";
    pub(crate) const META_INF_DIR: &str = "META-INF";
    pub(crate) const CONTENT_DIR: &str = "EPUB";
    /// Directory of section documents, relative to [`CONTENT_DIR`].
    pub(crate) const XHTML_DIR: &str = "xhtml";
    pub(crate) const PACKAGE_PATH: &str = "EPUB/package.opf";
    pub(crate) const NAV_FILE: &str = "nav.xhtml";
    pub(crate) const NCX_FILE: &str = "toc.ncx";
    pub(crate) const NAV_ID: &str = "nav";
    pub(crate) const NCX_ID: &str = "ncx";
}

/// Open Container Format (`META-INF/container.xml`).
pub(crate) mod ocf {
    pub(crate) const CONTAINER_PATH: &str = "META-INF/container.xml";
    pub(crate) const CONTAINER_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:container";
    pub(crate) const CONTAINER_VERSION: &str = "1.0";

    pub(crate) const CONTAINER: &str = "container";
    pub(crate) const ROOT_FILES: &str = "rootfiles";
    pub(crate) const ROOT_FILE: &str = "rootfile";

    pub(crate) const VERSION: &str = "version";
    pub(crate) const FULL_PATH: &str = "full-path";
    pub(crate) const MEDIA_TYPE: &str = "media-type";
}

/// Open Packaging Format (`package.opf`).
pub(crate) mod opf {
    pub(crate) const OPF_NS: &str = "http://www.idpf.org/2007/opf";
    pub(crate) const PACKAGE_VERSION: &str = "3.0";
    pub(crate) const PUB_ID: &str = "pub-id";

    pub(crate) const PACKAGE: &str = "package";
    pub(crate) const METADATA: &str = "metadata";
    pub(crate) const META: &str = "meta";
    pub(crate) const MANIFEST: &str = "manifest";
    pub(crate) const ITEM: &str = "item";
    pub(crate) const SPINE: &str = "spine";
    pub(crate) const ITEMREF: &str = "itemref";

    // Package attributes
    pub(crate) const VERSION: &str = "version";
    pub(crate) const UNIQUE_ID: &str = "unique-identifier";

    // Metadata attributes
    pub(crate) const PROPERTY: &str = "property";
    pub(crate) const REFINES: &str = "refines";
    pub(crate) const SCHEME: &str = "scheme";
    pub(crate) const NAME: &str = "name";
    pub(crate) const CONTENT: &str = "content";

    // Metadata values
    pub(crate) const ROLE: &str = "role";
    pub(crate) const MARC_RELATORS: &str = "marc:relators";
    pub(crate) const AUTHOR_ROLE: &str = "aut";
    pub(crate) const COVER: &str = "cover";

    // Manifest attributes
    pub(crate) const HREF: &str = "href";
    pub(crate) const MEDIA_TYPE: &str = "media-type";
    pub(crate) const PROPERTIES: &str = "properties";
    pub(crate) const NAV_PROPERTY: &str = "nav";
    pub(crate) const COVER_IMAGE_PROPERTY: &str = "cover-image";

    // Spine attributes
    pub(crate) const TOC: &str = "toc";
    pub(crate) const IDREF: &str = "idref";
    pub(crate) const PAGE_PROGRESSION_DIRECTION: &str = "page-progression-direction";
}

/// Dublin Core metadata.
pub(crate) mod dc {
    pub(crate) const XMLNS_DC: &str = "xmlns:dc";
    pub(crate) const DUBLIN_CORE_NS: &str = "http://purl.org/dc/elements/1.1/";

    pub(crate) const IDENTIFIER: &str = "dc:identifier";
    pub(crate) const TITLE: &str = "dc:title";
    pub(crate) const LANGUAGE: &str = "dc:language";
    pub(crate) const CREATOR: &str = "dc:creator";
    pub(crate) const DESCRIPTION: &str = "dc:description";
    pub(crate) const MODIFIED: &str = "dcterms:modified";

    pub(crate) const CREATOR_ID: &str = "creator";
}

/// EPUB 2 Navigation Control file for XML (`toc.ncx`).
pub(crate) mod ncx {
    pub(crate) const NCX_NS: &str = "http://www.daisy.org/z3986/2005/ncx/";
    pub(crate) const NCX_VERSION: &str = "2005-1";

    pub(crate) const NCX: &str = "ncx";
    pub(crate) const HEAD: &str = "head";
    pub(crate) const META: &str = "meta";
    pub(crate) const DOC_TITLE: &str = "docTitle";
    pub(crate) const TEXT: &str = "text";
    pub(crate) const NAV_MAP: &str = "navMap";
    pub(crate) const NAV_POINT: &str = "navPoint";
    pub(crate) const NAV_LABEL: &str = "navLabel";
    pub(crate) const CONTENT: &str = "content";

    pub(crate) const VERSION: &str = "version";
    pub(crate) const NAME: &str = "name";
    pub(crate) const CONTENT_ATTR: &str = "content";
    pub(crate) const SRC: &str = "src";

    pub(crate) const DTB_UID: &str = "dtb:uid";
    pub(crate) const DTB_DEPTH: &str = "dtb:depth";
    pub(crate) const DTB_TOTAL_PAGE_COUNT: &str = "dtb:totalPageCount";
    pub(crate) const DTB_MAX_PAGE_NUMBER: &str = "dtb:maxPageNumber";

    pub(crate) const NAV_POINT_ID_PREFIX: &str = "navPoint-";
}

pub(crate) mod xhtml {
    pub(crate) const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";
    pub(crate) const DOCTYPE: &str = "html";

    pub(crate) const HTML: &str = "html";
    pub(crate) const HEAD: &str = "head";
    pub(crate) const TITLE: &str = "title";
    pub(crate) const LINK: &str = "link";
    pub(crate) const BODY: &str = "body";
    pub(crate) const NAV: &str = "nav";
    pub(crate) const H1: &str = "h1";
    pub(crate) const ORDERED_LIST: &str = "ol";
    pub(crate) const LIST_ITEM: &str = "li";
    pub(crate) const ANCHOR: &str = "a";

    pub(crate) const DIR: &str = "dir";
    pub(crate) const AUTO: &str = "auto";
    pub(crate) const REL: &str = "rel";
    pub(crate) const STYLESHEET: &str = "stylesheet";
    pub(crate) const TYPE: &str = "type";
    pub(crate) const HREF: &str = "href";

    pub(crate) const TOC_HEADING: &str = "Table of Contents";
}

pub(crate) mod epub {
    pub(crate) const XMLNS: &str = "xmlns:epub";
    pub(crate) const EPUB_NS: &str = "http://www.idpf.org/2007/ops";
    pub(crate) const TYPE: &str = "epub:type";
    pub(crate) const TOC: &str = "toc";
}

pub(crate) mod mime {
    pub(crate) const EPUB: &str = "application/epub+zip";
    pub(crate) const XHTML: &str = "application/xhtml+xml";
    pub(crate) const OEBPS_PACKAGE: &str = "application/oebps-package+xml";
    pub(crate) const NCX: &str = "application/x-dtbncx+xml";
    pub(crate) const CSS: &str = "text/css";
}
