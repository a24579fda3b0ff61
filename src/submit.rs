//! Submission workflow
//!
//! Orchestrates the path from a composed draft to a stored image record:
//! validate → confirm the hosted upload → create the record → invalidate
//! the listing → reset the draft. The file upload to the image host runs
//! out-of-band before submission, when the user attaches a file.

use crate::api::{ApiError, GalleryBackend};
use crate::models::{ImageRecord, NewImage, SubmissionDraft};
use crate::pagination::PaginationController;
use crate::validate::{self, ValidationErrors};
use image_host::{HostError, ImageHostService};

/// Error type for the submission workflow
#[derive(Debug)]
pub enum SubmissionError {
    /// The draft failed field validation; no I/O was attempted
    ValidationFailed(ValidationErrors),
    /// The file has not finished uploading to the image host yet
    UploadIncomplete,
    /// The backend rejected or failed the create call
    SubmissionFailed(ApiError),
}

impl SubmissionError {
    /// Whether the form should close after this outcome
    ///
    /// Validation and upload-incomplete failures keep the form open so
    /// the user can correct the draft; a failed create closes it, same
    /// as a successful one.
    pub fn closes_form(&self) -> bool {
        matches!(self, SubmissionError::SubmissionFailed(_))
    }
}

impl std::fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionError::ValidationFailed(errors) => {
                write!(f, "Validation failed: {}", errors)
            }
            SubmissionError::UploadIncomplete => {
                write!(f, "The image upload has not completed yet")
            }
            SubmissionError::SubmissionFailed(e) => write!(f, "Submission failed: {}", e),
        }
    }
}

impl std::error::Error for SubmissionError {}

/// Uploads the draft's file to the image host and attaches the hosted URL
///
/// Runs out-of-band when the file input changes, before submission. A
/// draft without a file is left untouched.
pub async fn attach_hosted_url(
    host: &ImageHostService,
    draft: &mut SubmissionDraft,
) -> Result<(), HostError> {
    let file = match &draft.file {
        Some(file) => file,
        None => {
            log::debug!("no file attached, nothing to upload");
            return Ok(());
        }
    };

    let url = host.upload_image(&file.name, &file.data).await?;
    log::debug!("file {} hosted at {}", file.name, url);
    draft.uploaded_url = Some(url);
    Ok(())
}

/// Submits a finished draft
///
/// Steps, each gating the next:
/// 1. validate the draft; on failure, return the field errors with zero
///    network calls and leave the draft untouched;
/// 2. require the hosted URL; the out-of-band upload may still be
///    running, which is a distinct, user-actionable condition;
/// 3. create the record via the backend;
/// 4. on success, invalidate the accumulated listing so the next fetch
///    starts from the beginning.
///
/// Whatever the create call returns, the draft is reset on the single
/// exit path of steps 3–4. Exactly one create call happens per
/// validation pass and exactly one invalidation per successful create.
pub async fn submit<B: GalleryBackend>(
    backend: &B,
    draft: &mut SubmissionDraft,
    gallery: &mut PaginationController,
) -> Result<ImageRecord, SubmissionError> {
    validate::validate(draft).map_err(SubmissionError::ValidationFailed)?;

    let url = match draft.uploaded_url.as_deref() {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => return Err(SubmissionError::UploadIncomplete),
    };

    let image = NewImage {
        title: draft.title.clone(),
        description: draft.description.clone(),
        url,
    };

    let outcome = match backend.create_image(&image).await {
        Ok(record) => {
            log::info!("image record {} created", record.id);
            gallery.refetch_from_start();
            Ok(record)
        }
        Err(e) => {
            log::error!("image record creation failed: {}", e);
            Err(SubmissionError::SubmissionFailed(e))
        }
    };

    draft.reset();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DraftFile, Page};
    use crate::pagination::FetchPhase;
    use crate::validate::{Field, FieldError};
    use std::cell::RefCell;

    /// Records create calls and answers with a canned outcome
    struct StubBackend {
        created: RefCell<Vec<NewImage>>,
        fail_create: bool,
    }

    impl StubBackend {
        fn new() -> Self {
            Self {
                created: RefCell::new(Vec::new()),
                fail_create: false,
            }
        }

        fn failing() -> Self {
            Self {
                created: RefCell::new(Vec::new()),
                fail_create: true,
            }
        }

        fn create_count(&self) -> usize {
            self.created.borrow().len()
        }
    }

    impl GalleryBackend for StubBackend {
        async fn list_images(&self, _after: Option<&str>) -> Result<Page, ApiError> {
            Ok(Page {
                data: vec![],
                after: None,
            })
        }

        async fn create_image(&self, image: &NewImage) -> Result<ImageRecord, ApiError> {
            self.created.borrow_mut().push(image.clone());
            if self.fail_create {
                return Err(ApiError::ServerError(
                    "Server returned status: 500".to_string(),
                ));
            }
            Ok(ImageRecord {
                id: "img-1".to_string(),
                title: image.title.clone(),
                description: image.description.clone(),
                url: image.url.clone(),
                ts: 1_700_000_000_000,
            })
        }
    }

    fn ready_draft() -> SubmissionDraft {
        let mut draft = SubmissionDraft::new();
        draft.file = Some(DraftFile {
            name: "sunset.png".to_string(),
            mime_type: "image/png".to_string(),
            data: vec![0u8; 1024],
        });
        draft.title = "Sunset".to_string();
        draft.description = "Over the bay".to_string();
        draft.uploaded_url = Some("https://host.example/sunset.png".to_string());
        draft
    }

    /// A controller that already holds one merged page
    fn populated_gallery() -> PaginationController {
        let mut gallery = PaginationController::new();
        gallery.begin();
        gallery.apply(Ok(Page {
            data: vec![ImageRecord {
                id: "old".to_string(),
                title: "Old".to_string(),
                description: "Old".to_string(),
                url: "https://host.example/old.png".to_string(),
                ts: 1,
            }],
            after: None,
        }));
        gallery
    }

    #[tokio::test]
    async fn test_oversized_file_fails_without_network() {
        let backend = StubBackend::new();
        let mut gallery = PaginationController::new();
        let mut draft = ready_draft();
        draft.file.as_mut().unwrap().data = vec![0u8; 15_000_000];

        let result = submit(&backend, &mut draft, &mut gallery).await;

        match result {
            Err(SubmissionError::ValidationFailed(errors)) => {
                assert!(errors.message_for(Field::File).is_some());
            }
            other => panic!("expected validation failure, got {:?}", other.map(|r| r.id)),
        }
        assert_eq!(backend.create_count(), 0);
        // Draft stays intact for correction
        assert!(draft.file.is_some());
        assert_eq!(draft.title, "Sunset");
    }

    #[tokio::test]
    async fn test_short_title_reports_exactly_one_field() {
        let backend = StubBackend::new();
        let mut gallery = PaginationController::new();
        let mut draft = ready_draft();
        draft.title = "S".to_string();

        let result = submit(&backend, &mut draft, &mut gallery).await;

        match result {
            Err(SubmissionError::ValidationFailed(errors)) => {
                assert_eq!(errors.errors(), &[FieldError::TitleInvalid { chars: 1 }]);
            }
            other => panic!("expected validation failure, got {:?}", other.map(|r| r.id)),
        }
        assert_eq!(backend.create_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_hosted_url_is_upload_incomplete() {
        let backend = StubBackend::new();
        let mut gallery = PaginationController::new();
        let mut draft = ready_draft();
        draft.uploaded_url = None;

        let result = submit(&backend, &mut draft, &mut gallery).await;

        assert!(matches!(result, Err(SubmissionError::UploadIncomplete)));
        assert_eq!(backend.create_count(), 0);
        assert!(draft.file.is_some());
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let backend = StubBackend::new();
        let mut gallery = populated_gallery();
        let mut draft = ready_draft();

        let record = submit(&backend, &mut draft, &mut gallery)
            .await
            .expect("submission should succeed");

        assert_eq!(record.title, "Sunset");
        assert_eq!(backend.create_count(), 1);
        assert_eq!(
            backend.created.borrow()[0].url,
            "https://host.example/sunset.png"
        );

        // Listing invalidated: accumulated state discarded, next fetch
        // starts from the beginning
        assert!(gallery.items().is_empty());
        assert_eq!(gallery.phase(), FetchPhase::Idle);

        // Draft cleared
        assert!(draft.file.is_none());
        assert!(draft.uploaded_url.is_none());
        assert!(draft.title.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_still_clears_draft_and_closes_form() {
        let backend = StubBackend::failing();
        let mut gallery = populated_gallery();
        let mut draft = ready_draft();

        let result = submit(&backend, &mut draft, &mut gallery).await;

        let error = result.expect_err("create should fail");
        assert!(matches!(error, SubmissionError::SubmissionFailed(_)));
        assert!(error.closes_form());
        assert_eq!(backend.create_count(), 1);

        // Cleanup holds regardless of the create outcome
        assert!(draft.file.is_none());
        assert!(draft.uploaded_url.is_none());

        // But the listing is not invalidated on failure
        assert_eq!(gallery.items().len(), 1);
    }

    #[tokio::test]
    async fn test_validation_failures_keep_form_open() {
        let backend = StubBackend::new();
        let mut gallery = PaginationController::new();
        let mut draft = SubmissionDraft::new();

        let error = submit(&backend, &mut draft, &mut gallery)
            .await
            .expect_err("empty draft cannot pass validation");

        assert!(!error.closes_form());
        assert!(!SubmissionError::UploadIncomplete.closes_form());
    }
}
