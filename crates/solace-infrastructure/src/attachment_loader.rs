//! Loads image attachments from the local file system.

use solace_core::attachment::{AttachmentEncoder, RawAttachment};
use solace_core::error::{Result, SolaceError};
use std::path::Path;

/// Reads an image file for attaching to a message.
///
/// The size reported by the file system is checked before the content is
/// read, so an oversized file is rejected without loading it.
///
/// # Errors
///
/// - `SizeExceeded` if the file is larger than the attachment limit
/// - `UnsupportedAttachment` if the path does not look like an image
/// - `Io` if the file cannot be read
pub async fn load_image(path: &Path) -> Result<RawAttachment> {
    let mime = mime_guess::from_path(path).first();
    let mime = match mime {
        Some(mime) if mime.type_() == mime_guess::mime::IMAGE => mime,
        other => {
            return Err(SolaceError::UnsupportedAttachment(format!(
                "{} is not an image ({})",
                path.display(),
                other.map(|m| m.to_string()).unwrap_or_else(|| "unknown type".to_string())
            )));
        }
    };

    let metadata = tokio::fs::metadata(path).await?;
    AttachmentEncoder::new().check_size(metadata.len())?;

    let bytes = tokio::fs::read(path).await?;
    tracing::debug!(
        "[AttachmentLoader] Loaded {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        mime
    );

    Ok(RawAttachment {
        bytes,
        declared_size: metadata.len(),
        mime: Some(mime.to_string()),
    })
}
