pub(crate) mod count;
pub(crate) mod xml;
pub(crate) mod zip;

pub(crate) type WriterResult<T> = crate::epub::errors::EpubResult<T>;
