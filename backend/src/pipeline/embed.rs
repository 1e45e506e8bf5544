use crate::pipeline::submission::Attachment;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::fmt;

/// A `data:` URI carrying a whole binary resource, usable as an `src`.
///
/// The empty reference stands for "no image" and renders as nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineAsset(String);

impl InlineAsset {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for InlineAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encodes `bytes` as a base64 `data:` URI tagged with `media_type`.
pub fn embed(bytes: &[u8], media_type: &str) -> InlineAsset {
    if bytes.is_empty() {
        return InlineAsset::empty();
    }
    let media_type = if media_type.is_empty() {
        "application/octet-stream"
    } else {
        media_type
    };
    InlineAsset(format!("data:{};base64,{}", media_type, BASE64.encode(bytes)))
}

/// Embeds an optional upload; a missing upload yields the empty reference.
pub fn embed_attachment(attachment: Option<&Attachment>) -> InlineAsset {
    attachment
        .map(|a| embed(&a.bytes, &a.media_type))
        .unwrap_or_default()
}
