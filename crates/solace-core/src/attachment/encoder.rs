use crate::error::{Result, SolaceError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Largest accepted image, measured before encoding (5 MiB).
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// An image as selected by the user, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttachment {
    pub bytes: Vec<u8>,
    /// Size reported by the source (e.g. file metadata)
    pub declared_size: u64,
    pub mime: Option<String>,
}

impl RawAttachment {
    pub fn new(bytes: Vec<u8>) -> Self {
        let declared_size = bytes.len() as u64;
        Self {
            bytes,
            declared_size,
            mime: None,
        }
    }
}

/// Base64 text ready to be sent as `base64_image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedAttachment(String);

impl EncodedAttachment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Length of the encoded text
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Validates and encodes image attachments. Pure: no I/O, no state.
#[derive(Debug, Clone, Copy)]
pub struct AttachmentEncoder {
    limit: u64,
}

impl Default for AttachmentEncoder {
    fn default() -> Self {
        Self {
            limit: MAX_ATTACHMENT_BYTES,
        }
    }
}

impl AttachmentEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Checks a size against the limit without touching any content.
    pub fn check_size(&self, size: u64) -> Result<()> {
        if size > self.limit {
            return Err(SolaceError::SizeExceeded {
                size,
                limit: self.limit,
            });
        }
        Ok(())
    }

    /// Encodes raw bytes.
    ///
    /// The declared size is checked first, then the actual length, so an
    /// oversized input fails before any encoding work. Empty input encodes to
    /// `None`.
    pub fn encode(&self, raw: &[u8], declared_size: u64) -> Result<Option<EncodedAttachment>> {
        self.check_size(declared_size)?;
        self.check_size(raw.len() as u64)?;

        if raw.is_empty() {
            return Ok(None);
        }

        Ok(Some(EncodedAttachment(STANDARD.encode(raw))))
    }

    /// Encodes an optional attachment; absent stays absent.
    pub fn encode_optional(
        &self,
        attachment: Option<&RawAttachment>,
    ) -> Result<Option<EncodedAttachment>> {
        match attachment {
            Some(raw) => self.encode(&raw.bytes, raw.declared_size),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_declared_size_fails_fast() {
        let encoder = AttachmentEncoder::new();
        let six_mib = 6 * 1024 * 1024;

        // The declared size alone triggers the failure; the content is tiny.
        let result = encoder.encode(b"tiny", six_mib);

        assert_eq!(
            result,
            Err(SolaceError::SizeExceeded {
                size: six_mib,
                limit: MAX_ATTACHMENT_BYTES
            })
        );
    }

    #[test]
    fn test_oversized_content_fails() {
        let encoder = AttachmentEncoder::new();
        let bytes = vec![0u8; 6 * 1024 * 1024];

        let err = encoder.encode(&bytes, 0).unwrap_err();

        assert!(err.is_validation());
    }

    #[test]
    fn test_exactly_at_limit_is_accepted() {
        let encoder = AttachmentEncoder::new();
        let bytes = vec![7u8; MAX_ATTACHMENT_BYTES as usize];

        let encoded = encoder.encode(&bytes, MAX_ATTACHMENT_BYTES).unwrap();

        assert!(encoded.is_some());
    }

    #[test]
    fn test_empty_and_absent_encode_to_none() {
        let encoder = AttachmentEncoder::new();

        assert_eq!(encoder.encode(&[], 0).unwrap(), None);
        assert_eq!(encoder.encode_optional(None).unwrap(), None);
        assert_eq!(
            encoder
                .encode_optional(Some(&RawAttachment::new(Vec::new())))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_encoding_is_standard_base64() {
        let encoder = AttachmentEncoder::new();

        let encoded = encoder.encode(b"\x89PNG", 4).unwrap().unwrap();

        assert_eq!(encoded.as_str(), "iVBORw==");
        assert_eq!(
            encoder.encode(b"\x89PNG", 4).unwrap().unwrap(),
            encoded,
            "encoding must be deterministic"
        );
    }
}
