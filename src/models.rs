use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored gallery image as returned by the backend
///
/// Records are created server-side on successful submission and are
/// read-only on the client; they are never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    /// Creation timestamp in milliseconds, assigned by the server
    pub ts: i64,
}

impl ImageRecord {
    /// Creation time as a chrono timestamp, if `ts` is in range
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.ts)
    }
}

/// One page of the image listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page {
    pub data: Vec<ImageRecord>,
    /// Opaque continuation cursor; absent or empty signals the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl Page {
    /// Returns the continuation cursor, treating an empty string as absent
    pub fn next_cursor(&self) -> Option<&str> {
        self.after.as_deref().filter(|cursor| !cursor.is_empty())
    }
}

/// Payload for creating a new image record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewImage {
    pub title: String,
    pub description: String,
    pub url: String,
}

/// A file selected for upload, held in memory until it is hosted
#[derive(Debug, Clone, PartialEq)]
pub struct DraftFile {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl DraftFile {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Transient state of the upload form while the user composes a submission
///
/// A draft is created when the form opens and reset on success or close.
/// `uploaded_url` is filled in out-of-band once the file has been uploaded
/// to the image host; submission requires it to be present.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionDraft {
    pub file: Option<DraftFile>,
    pub title: String,
    pub description: String,
    pub uploaded_url: Option<String>,
    /// Identifies one composing session. A completion carrying an old
    /// token belongs to an orphaned draft and must not apply side effects.
    pub token: Uuid,
}

impl SubmissionDraft {
    pub fn new() -> Self {
        Self {
            file: None,
            title: String::new(),
            description: String::new(),
            uploaded_url: None,
            token: Uuid::new_v4(),
        }
    }

    /// Clears all fields and starts a fresh composing session
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for SubmissionDraft {
    fn default() -> Self {
        Self::new()
    }
}
