//! Media helpers - data URI parsing and base64 codecs

pub mod data_uri;

pub use data_uri::DataUri;
