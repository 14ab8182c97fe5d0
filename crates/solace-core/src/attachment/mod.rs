//! Image attachments.
//!
//! An attachment is validated and encoded before it is handed to the chat
//! flow; at most one is pending per outgoing message.

mod encoder;

pub use encoder::{AttachmentEncoder, EncodedAttachment, MAX_ATTACHMENT_BYTES, RawAttachment};
