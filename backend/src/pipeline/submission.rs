use common::requests::fields;
use std::collections::HashMap;

/// Document used when the form does not pick one.
pub const DEFAULT_DOCUMENT_ID: &str = "acordo_extra";

const OCTET_STREAM: &str = "application/octet-stream";

/// A binary upload attached to the form, e.g. the quota screenshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

impl Attachment {
    /// Builds an attachment, trusting `declared` unless it is missing or the
    /// generic octet-stream type, in which case the type is sniffed from the
    /// image signature.
    pub fn new(bytes: Vec<u8>, declared: Option<String>) -> Self {
        let media_type = declared
            .filter(|m| !m.is_empty() && m != OCTET_STREAM)
            .or_else(|| {
                image::guess_format(&bytes)
                    .ok()
                    .map(|format| format.to_mime_type().to_string())
            })
            .unwrap_or_else(|| OCTET_STREAM.to_string());
        Self { bytes, media_type }
    }
}

/// Parsed form of a term generation request.
#[derive(Debug, Clone, Default)]
pub struct FormSubmission {
    fields: HashMap<String, String>,
    attachments: HashMap<String, Attachment>,
}

impl FormSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_field(name, value);
        self
    }

    /// Registers an upload. Empty uploads are treated as not provided.
    pub fn attach(&mut self, name: impl Into<String>, attachment: Attachment) {
        if !attachment.bytes.is_empty() {
            self.attachments.insert(name.into(), attachment);
        }
    }

    pub fn with_attachment(mut self, name: impl Into<String>, attachment: Attachment) -> Self {
        self.attach(name, attachment);
        self
    }

    /// Value of a field, `None` when absent or blank.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn attachment(&self, name: &str) -> Option<&Attachment> {
        self.attachments.get(name)
    }

    pub fn document_id(&self) -> &str {
        self.field(fields::DOCUMENT_ID)
            .unwrap_or(DEFAULT_DOCUMENT_ID)
    }

    /// Requested condominium; an absent id resolves to the empty id, which
    /// no catalog entry carries.
    pub fn condominium_id(&self) -> &str {
        self.field(fields::CONDOMINIUM_ID).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    #[test]
    fn blank_fields_read_as_missing() {
        let form = FormSubmission::new()
            .with_field("devedor", "Maria Silva")
            .with_field("telefone", "   ");
        assert_eq!(form.field("devedor"), Some("Maria Silva"));
        assert_eq!(form.field("telefone"), None);
        assert_eq!(form.field("email"), None);
    }

    #[test]
    fn document_id_defaults_to_extra_agreement() {
        assert_eq!(FormSubmission::new().document_id(), DEFAULT_DOCUMENT_ID);
        let form = FormSubmission::new().with_field(fields::DOCUMENT_ID, "confissao");
        assert_eq!(form.document_id(), "confissao");
        let blank = FormSubmission::new().with_field(fields::DOCUMENT_ID, "");
        assert_eq!(blank.document_id(), DEFAULT_DOCUMENT_ID);
    }

    #[test]
    fn empty_uploads_are_dropped() {
        let form = FormSubmission::new()
            .with_attachment(fields::QUOTA_IMAGE, Attachment::new(Vec::new(), None));
        assert!(form.attachment(fields::QUOTA_IMAGE).is_none());
    }

    #[test]
    fn media_type_is_sniffed_when_not_declared() {
        let sniffed = Attachment::new(PNG_SIGNATURE.to_vec(), None);
        assert_eq!(sniffed.media_type, "image/png");

        let generic = Attachment::new(PNG_SIGNATURE.to_vec(), Some(OCTET_STREAM.to_string()));
        assert_eq!(generic.media_type, "image/png");

        let declared = Attachment::new(b"GIF89a".to_vec(), Some("image/gif".to_string()));
        assert_eq!(declared.media_type, "image/gif");

        let unknown = Attachment::new(b"plain".to_vec(), None);
        assert_eq!(unknown.media_type, OCTET_STREAM);
    }
}
