use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum DecodeError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Transport encoding for file content: standard base64 over the UTF-8 bytes.
pub fn encode_content(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Inverse of [`encode_content`]. Line breaks are tolerated, the upstream wraps long payloads.
pub fn decode_content(encoded: &str) -> Result<String, DecodeError> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}
