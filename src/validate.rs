//! Upload form validation
//!
//! A pure, declarative validation pipeline for [`SubmissionDraft`]: each
//! field is checked independently by an ordered set of predicates, and all
//! violated fields are reported, one message per field. No network or
//! filesystem access happens here.

use crate::models::SubmissionDraft;
use std::fmt;

/// Largest accepted upload in bytes (10 MB)
pub const MAX_FILE_BYTES: u64 = 10_000_000;

/// MIME types the gallery accepts
pub const ACCEPTED_IMAGE_TYPES: [&str; 3] = ["image/png", "image/gif", "image/jpeg"];

/// Shortest accepted title, in characters after trimming
pub const TITLE_MIN_CHARS: usize = 2;

/// Longest accepted title, in characters after trimming
pub const TITLE_MAX_CHARS: usize = 20;

/// Longest accepted description, in characters
pub const DESCRIPTION_MAX_CHARS: usize = 65;

/// Form fields subject to validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    File,
    Title,
    Description,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::File => "file",
            Field::Title => "title",
            Field::Description => "description",
        }
    }
}

/// A single field violation
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    FileMissing,
    FileTooLarge { size: u64 },
    UnsupportedType { mime: String },
    TitleInvalid { chars: usize },
    DescriptionInvalid { chars: usize },
}

impl FieldError {
    /// The field this violation belongs to
    pub fn field(&self) -> Field {
        match self {
            FieldError::FileMissing
            | FieldError::FileTooLarge { .. }
            | FieldError::UnsupportedType { .. } => Field::File,
            FieldError::TitleInvalid { .. } => Field::Title,
            FieldError::DescriptionInvalid { .. } => Field::Description,
        }
    }

    /// Human-readable message for inline display
    pub fn message(&self) -> String {
        match self {
            FieldError::FileMissing => "An image file is required".to_string(),
            FieldError::FileTooLarge { .. } => "The file must be smaller than 10MB".to_string(),
            FieldError::UnsupportedType { .. } => {
                "Only PNG, JPEG and GIF files are accepted".to_string()
            }
            FieldError::TitleInvalid { .. } => format!(
                "The title must be between {} and {} characters",
                TITLE_MIN_CHARS, TITLE_MAX_CHARS
            ),
            FieldError::DescriptionInvalid { .. } => format!(
                "The description is required and must be at most {} characters",
                DESCRIPTION_MAX_CHARS
            ),
        }
    }
}

/// All violations of one draft, at most one per field
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for one field, if it was violated
    pub fn message_for(&self, field: Field) -> Option<String> {
        self.errors
            .iter()
            .find(|error| error.field() == field)
            .map(FieldError::message)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.field().name(), error.message())?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates a submission draft
///
/// Rules are applied independently per field; the first failing predicate
/// of a field produces that field's error. Pure function of the draft.
pub fn validate(draft: &SubmissionDraft) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if let Some(error) = check_file(draft) {
        errors.push(error);
    }
    if let Some(error) = check_title(draft) {
        errors.push(error);
    }
    if let Some(error) = check_description(draft) {
        errors.push(error);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors })
    }
}

fn check_file(draft: &SubmissionDraft) -> Option<FieldError> {
    let file = match &draft.file {
        Some(file) => file,
        None => return Some(FieldError::FileMissing),
    };

    if file.size() > MAX_FILE_BYTES {
        return Some(FieldError::FileTooLarge { size: file.size() });
    }

    if !ACCEPTED_IMAGE_TYPES.contains(&file.mime_type.as_str()) {
        return Some(FieldError::UnsupportedType {
            mime: file.mime_type.clone(),
        });
    }

    None
}

fn check_title(draft: &SubmissionDraft) -> Option<FieldError> {
    let chars = draft.title.trim().chars().count();
    if chars < TITLE_MIN_CHARS || chars > TITLE_MAX_CHARS {
        return Some(FieldError::TitleInvalid { chars });
    }
    None
}

fn check_description(draft: &SubmissionDraft) -> Option<FieldError> {
    let chars = draft.description.chars().count();
    if chars == 0 || chars > DESCRIPTION_MAX_CHARS {
        return Some(FieldError::DescriptionInvalid { chars });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DraftFile;

    fn valid_draft() -> SubmissionDraft {
        let mut draft = SubmissionDraft::new();
        draft.file = Some(DraftFile {
            name: "sunset.png".to_string(),
            mime_type: "image/png".to_string(),
            data: vec![0u8; 1024],
        });
        draft.title = "Sunset".to_string();
        draft.description = "Over the bay".to_string();
        draft
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate(&valid_draft()).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let mut draft = valid_draft();
        draft.file = None;

        let errors = validate(&draft).unwrap_err();
        assert_eq!(errors.errors(), &[FieldError::FileMissing]);
    }

    #[test]
    fn test_oversized_file() {
        let mut draft = valid_draft();
        // 15 MB, well over the limit
        draft.file.as_mut().unwrap().data = vec![0u8; 15_000_000];

        let errors = validate(&draft).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.errors(),
            &[FieldError::FileTooLarge { size: 15_000_000 }]
        );
    }

    #[test]
    fn test_file_at_limit_passes() {
        let mut draft = valid_draft();
        draft.file.as_mut().unwrap().data = vec![0u8; MAX_FILE_BYTES as usize];

        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn test_unsupported_mime_type() {
        let mut draft = valid_draft();
        draft.file.as_mut().unwrap().mime_type = "image/tiff".to_string();

        let errors = validate(&draft).unwrap_err();
        assert_eq!(
            errors.errors(),
            &[FieldError::UnsupportedType {
                mime: "image/tiff".to_string()
            }]
        );
    }

    #[test]
    fn test_short_title_is_the_only_error() {
        let mut draft = valid_draft();
        draft.title = "S".to_string();

        let errors = validate(&draft).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors(), &[FieldError::TitleInvalid { chars: 1 }]);
        assert!(errors.message_for(Field::Description).is_none());
    }

    #[test]
    fn test_title_trimmed_before_length_check() {
        let mut draft = valid_draft();
        draft.title = "  S  ".to_string();

        assert!(validate(&draft).is_err());

        draft.title = "  So  ".to_string();
        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn test_overlong_description() {
        let mut draft = valid_draft();
        draft.description = "x".repeat(66);

        let errors = validate(&draft).unwrap_err();
        assert_eq!(
            errors.errors(),
            &[FieldError::DescriptionInvalid { chars: 66 }]
        );
    }

    #[test]
    fn test_empty_description() {
        let mut draft = valid_draft();
        draft.description = String::new();

        assert!(validate(&draft).is_err());
    }

    #[test]
    fn test_all_violated_fields_reported() {
        let draft = SubmissionDraft::new();

        let errors = validate(&draft).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.message_for(Field::File).is_some());
        assert!(errors.message_for(Field::Title).is_some());
        assert!(errors.message_for(Field::Description).is_some());
    }
}
