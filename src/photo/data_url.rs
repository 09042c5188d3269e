use super::PhotoError;
use base64::{engine::general_purpose::STANDARD, Engine};
use regex::Regex;
use std::sync::OnceLock;

/// A decoded `data:<mime>;base64,<payload>` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DataUrl {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Parse a base64 data URL.
    ///
    /// # Errors
    ///
    /// Returns `PhotoError::InvalidDataUrl` if the string is not of the form
    /// `data:<type>/<subtype>;base64,<payload>`, or `PhotoError::Base64` if
    /// the payload does not decode.
    pub fn parse(s: &str) -> Result<Self, PhotoError> {
        let captures = data_url_pattern()
            .captures(s.trim())
            .ok_or(PhotoError::InvalidDataUrl)?;
        let payload: String = captures["data"]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let bytes = STANDARD.decode(payload)?;
        Ok(Self {
            mime: captures["mime"].to_ascii_lowercase(),
            bytes,
        })
    }

    /// Render as a `data:` URL.
    pub fn encode(&self) -> String {
        encode_data_url(&self.mime, &self.bytes)
    }
}

/// Encode `bytes` as a base64 data URL with the given MIME type.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Returns true if `s` looks like an embedded data URL rather than a link.
pub fn is_data_url(s: &str) -> bool {
    s.trim_start().starts_with("data:")
}

fn data_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)^data:(?P<mime>[\w.+-]+/[\w.+-]+);base64,(?P<data>[A-Za-z0-9+/=\s]*)$")
            .unwrap()
    })
}
