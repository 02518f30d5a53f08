//! Data URI parsing (`data:image/png;base64,...`)

use base64::{
    alphabet,
    engine::{general_purpose::STANDARD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};

use crate::error::{AppError, Result};

/// Every accepted URI starts with this prefix
pub const IMAGE_DATA_URI_PREFIX: &str = "data:image/";

/// MIME type assumed when the header does not carry one
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

const INVALID_FORMAT: &str = "Invalid image format. Expected data URI with base64";

/// Standard alphabet, padding optional. Mobile clients are not consistent about it.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A decoded image data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    mime_type: String,
    data: Vec<u8>,
}

impl DataUri {
    /// Parse and decode an image data URI.
    ///
    /// Fails with [`AppError::InvalidRequest`] when the input is not a
    /// `data:image/` URI, has no payload, or the payload is not base64.
    pub fn parse(input: &str) -> Result<Self> {
        if !is_image_data_uri(input) {
            return Err(AppError::InvalidRequest(INVALID_FORMAT.to_string()));
        }

        let (header, payload) = input
            .split_once(',')
            .ok_or_else(|| AppError::InvalidRequest(INVALID_FORMAT.to_string()))?;

        let data = decode(payload)?;
        if data.is_empty() {
            return Err(AppError::InvalidRequest(INVALID_FORMAT.to_string()));
        }

        Ok(Self {
            mime_type: mime_type_of(header).to_string(),
            data,
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Check the `data:image/` prefix without decoding anything
pub fn is_image_data_uri(input: &str) -> bool {
    input.starts_with(IMAGE_DATA_URI_PREFIX)
}

/// MIME type from a data URI header such as `data:image/png;base64`
fn mime_type_of(header: &str) -> &str {
    header
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .map(str::trim)
        .filter(|mime| mime.len() > "image/".len())
        .unwrap_or(DEFAULT_MIME_TYPE)
}

/// Decode a base64 payload, ignoring embedded whitespace
pub fn decode(payload: &str) -> Result<Vec<u8>> {
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    LENIENT
        .decode(compact)
        .map_err(|e| AppError::InvalidRequest(format!("{}: {}", INVALID_FORMAT, e)))
}

/// Encode binary data to a standard, padded base64 string
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}
