//! Dioxus UI components for the image gallery
//!
//! A thin rendering layer over the core state: the paginated card grid,
//! a fullscreen viewer and the upload form. All state transitions go
//! through [`PaginationController`] and the submission workflow; platform
//! file picking stays in the application crate, which attaches the picked
//! file to the draft and triggers the host upload.

use crate::api::{ApiError, GalleryBackend, ImageApi};
use crate::config::GalleryConfig;
use crate::models::{DraftFile, ImageRecord, SubmissionDraft};
use crate::pagination::PaginationController;
use crate::submit::{self, SubmissionError};
use crate::validate::{Field, ValidationErrors};
use base64::{engine::general_purpose, Engine as _};
use dioxus::prelude::*;
use image_host::ImageHostService;

/// Shared services for the gallery components
///
/// The application builds this once from its configuration and provides
/// it via `use_context_provider`; every component below requires it.
#[derive(Clone)]
pub struct GalleryContext {
    pub api: ImageApi,
    pub host: ImageHostService,
}

impl GalleryContext {
    pub fn new(config: &GalleryConfig) -> Result<Self, ApiError> {
        Ok(Self {
            api: ImageApi::new(config)?,
            host: ImageHostService::new(config.host_config()),
        })
    }
}

/// Renders a draft file as an inline data URL for the local preview
fn preview_data_url(file: &DraftFile) -> String {
    format!(
        "data:{};base64,{}",
        file.mime_type,
        general_purpose::STANDARD.encode(&file.data)
    )
}

/// One fetch round-trip, driven through the signal so the completion
/// lands back in the shared controller
async fn run_fetch(context: GalleryContext, mut pagination: Signal<PaginationController>) {
    let request = pagination.write().begin();
    if let Some(request) = request {
        let outcome = context.api.list_images(request.after()).await;
        pagination.write().apply(outcome);
    }
}

/// Top-level gallery screen: card grid, load-more paging, fullscreen
/// viewing and the upload form
///
/// `on_pick_file` is invoked with the draft signal when the user asks to
/// attach an image; the application opens its platform picker, stores the
/// picked file in `draft.file` and runs the out-of-band host upload.
#[component]
pub fn GalleryScreen(on_pick_file: EventHandler<Signal<SubmissionDraft>>) -> Element {
    let context = use_context::<GalleryContext>();
    let pagination = use_signal(PaginationController::new);
    let mut draft = use_signal(SubmissionDraft::new);
    let mut selected_url = use_signal(|| None::<String>);
    let mut form_open = use_signal(|| false);
    let mut notice = use_signal(|| None::<String>);

    // Initial fetch on mount
    {
        let context = context.clone();
        use_effect(move || {
            let context = context.clone();
            spawn(run_fetch(context, pagination));
        });
    }

    let retry_context = context.clone();
    let more_context = context.clone();

    let items = pagination.read().items().to_vec();
    let is_loading = pagination.read().is_loading();
    let is_error = pagination.read().is_error();
    let has_more = pagination.read().has_more();

    rsx! {
        div {
            style: "max-width: 1120px; margin: 0 auto; padding: 20px; font-family: sans-serif;",

            div {
                style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 20px;",
                h2 { "Image gallery" }
                button {
                    style: "padding: 10px 20px; background: #dd6b20; color: white; border: none; border-radius: 6px; font-size: 15px; cursor: pointer;",
                    onclick: move |_| {
                        draft.set(SubmissionDraft::new());
                        form_open.set(true);
                    },
                    "Add image"
                }
            }

            if let Some(message) = notice() {
                div {
                    style: "display: flex; justify-content: space-between; align-items: center; background: #fffaf0; color: #7b341e; padding: 10px 14px; margin-bottom: 16px; border-radius: 6px;",
                    span { "{message}" }
                    button {
                        style: "background: none; border: none; font-size: 16px; cursor: pointer; color: inherit;",
                        onclick: move |_| notice.set(None),
                        "×"
                    }
                }
            }

            if is_error {
                div {
                    style: "padding: 40px; text-align: center; background: #fff5f5; border-radius: 8px; color: #c53030;",
                    p { "The image listing could not be loaded." }
                    button {
                        style: "margin-top: 12px; padding: 10px 20px; border: none; border-radius: 6px; background: #c53030; color: white; cursor: pointer;",
                        onclick: move |_| {
                            let context = retry_context.clone();
                            spawn(run_fetch(context, pagination));
                        },
                        "Try again"
                    }
                }
            } else if items.is_empty() && is_loading {
                div {
                    style: "padding: 40px; text-align: center; color: #999;",
                    "Loading…"
                }
            } else {
                CardGrid {
                    items: items.clone(),
                    on_view: move |url| selected_url.set(Some(url)),
                }
                if has_more {
                    button {
                        style: "margin: 32px 0; padding: 10px 20px; border: none; border-radius: 6px; background: #2d3748; color: white; cursor: pointer;",
                        disabled: is_loading,
                        onclick: move |_| {
                            let context = more_context.clone();
                            spawn(run_fetch(context, pagination));
                        },
                        if is_loading {
                            "Loading…"
                        } else {
                            "Load more"
                        }
                    }
                }
            }

            if form_open() {
                UploadForm {
                    draft,
                    pagination,
                    notice,
                    on_pick_file: move |d| on_pick_file.call(d),
                    on_close: move |_| form_open.set(false),
                }
            }

            if let Some(url) = selected_url() {
                FullscreenImage {
                    url,
                    on_close: move |_| selected_url.set(None),
                }
            }
        }
    }
}

/// Grid of image cards
#[component]
pub fn CardGrid(items: Vec<ImageRecord>, on_view: EventHandler<String>) -> Element {
    if items.is_empty() {
        return rsx! {
            div {
                style: "padding: 24px; text-align: center; background: #f5f5f5; border-radius: 8px; color: #999;",
                "No images yet"
            }
        };
    }

    rsx! {
        div {
            style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 40px;",
            for record in items {
                ImageCard {
                    record: record.clone(),
                    on_view: on_view.clone(),
                }
            }
        }
    }
}

/// A single card: the hosted image with its title and description
#[component]
fn ImageCard(record: ImageRecord, on_view: EventHandler<String>) -> Element {
    let taken = record.created_at().map(|t| t.format("%Y-%m-%d").to_string());

    rsx! {
        div {
            key: "{record.id}",
            style: "border-radius: 8px; overflow: hidden; background: white; box-shadow: 0 1px 4px rgba(0, 0, 0, 0.2);",
            img {
                src: "{record.url}",
                alt: "{record.title}",
                style: "width: 100%; height: 192px; object-fit: cover; cursor: pointer;",
                onclick: {
                    let url = record.url.clone();
                    move |_| on_view.call(url.clone())
                },
            }
            div {
                style: "padding: 12px 16px;",
                h3 { style: "margin: 0 0 4px 0; font-size: 18px;", "{record.title}" }
                p { style: "margin: 0; color: #666; font-size: 14px;", "{record.description}" }
                if let Some(taken) = taken {
                    span { style: "color: #aaa; font-size: 12px;", "{taken}" }
                }
            }
        }
    }
}

/// Fullscreen viewer with a link to the original
#[component]
pub fn FullscreenImage(url: String, on_close: EventHandler<()>) -> Element {
    rsx! {
        div {
            style: "position: fixed; top: 0; left: 0; right: 0; bottom: 0; background: rgba(0, 0, 0, 0.95); z-index: 1000; display: flex; flex-direction: column;",
            div {
                style: "display: flex; justify-content: flex-end; padding: 16px; background: rgba(0, 0, 0, 0.7);",
                button {
                    style: "width: 40px; height: 40px; background: rgba(255, 255, 255, 0.2); color: white; border-radius: 50%; font-size: 24px; cursor: pointer; border: none;",
                    onclick: move |_| on_close.call(()),
                    "×"
                }
            }
            div {
                style: "flex: 1; display: flex; align-items: center; justify-content: center; padding: 20px;",
                img {
                    src: "{url}",
                    style: "max-width: 900px; max-height: 600px; object-fit: contain; border-radius: 4px;",
                }
            }
            div {
                style: "display: flex; justify-content: flex-start; padding: 12px 16px; background: rgba(0, 0, 0, 0.7);",
                a {
                    href: "{url}",
                    style: "color: #ccc; font-size: 13px;",
                    "Open original"
                }
            }
        }
    }
}

/// Modal upload form bound to a [`SubmissionDraft`]
///
/// Field errors render inline under their inputs; outcomes that close the
/// form surface their message through the shared `notice` signal.
#[component]
pub fn UploadForm(
    mut draft: Signal<SubmissionDraft>,
    mut pagination: Signal<PaginationController>,
    mut notice: Signal<Option<String>>,
    on_pick_file: EventHandler<Signal<SubmissionDraft>>,
    on_close: EventHandler<()>,
) -> Element {
    let context = use_context::<GalleryContext>();
    let mut errors = use_signal(|| None::<ValidationErrors>);
    let mut form_notice = use_signal(|| None::<String>);
    let mut is_submitting = use_signal(|| false);

    let on_submit = move |_| {
        if is_submitting() {
            return;
        }
        is_submitting.set(true);
        let context = context.clone();
        spawn(async move {
            let submitted_token = draft.read().token;
            let mut working_draft = draft.read().clone();
            let mut working_gallery = pagination.read().clone();

            let result =
                submit::submit(&context.api, &mut working_draft, &mut working_gallery).await;

            // The form may have been closed and reopened while the create
            // call was in flight; an orphaned draft applies no side effects.
            if draft.read().token != submitted_token {
                log::debug!("submission finished for an orphaned draft, dropping side effects");
                return;
            }

            match result {
                Ok(_) => {
                    draft.set(working_draft);
                    pagination.set(working_gallery);
                    errors.set(None);
                    is_submitting.set(false);
                    notice.set(Some("Your image has been added.".to_string()));
                    on_close.call(());
                    run_fetch(context, pagination).await;
                }
                Err(SubmissionError::ValidationFailed(field_errors)) => {
                    errors.set(Some(field_errors));
                    is_submitting.set(false);
                }
                Err(SubmissionError::UploadIncomplete) => {
                    form_notice.set(Some(
                        "Please attach an image and wait for the upload to finish.".to_string(),
                    ));
                    is_submitting.set(false);
                }
                Err(error) => {
                    draft.set(working_draft);
                    is_submitting.set(false);
                    notice.set(Some(
                        "Your image could not be saved. Please try again.".to_string(),
                    ));
                    if error.closes_form() {
                        on_close.call(());
                    }
                }
            }
        });
    };

    let preview = draft
        .read()
        .file
        .as_ref()
        .map(|file| (preview_data_url(file), file.name.clone()));
    let uploaded = draft.read().uploaded_url.is_some();
    let title = draft.read().title.clone();
    let description = draft.read().description.clone();

    rsx! {
        div {
            style: "position: fixed; top: 0; left: 0; right: 0; bottom: 0; background: rgba(0, 0, 0, 0.6); z-index: 1000; display: flex; align-items: center; justify-content: center;",
            div {
                style: "width: 90%; max-width: 480px; background: white; border-radius: 8px; padding: 20px;",

                h3 { style: "margin-top: 0;", "New image" }

                if let Some(message) = form_notice() {
                    div {
                        style: "background: #fffaf0; color: #7b341e; padding: 10px; margin-bottom: 16px; border-radius: 4px;",
                        "{message}"
                    }
                }

                div {
                    style: "margin-bottom: 16px;",
                    if let Some((preview, file_name)) = preview {
                        img {
                            src: "{preview}",
                            alt: "{file_name}",
                            style: "width: 100%; max-height: 200px; object-fit: contain; border-radius: 4px; background: #f0f0f0;",
                        }
                        div {
                            style: "color: #666; font-size: 13px; margin-top: 4px;",
                            if uploaded {
                                "Upload complete"
                            } else {
                                "Uploading…"
                            }
                        }
                        button {
                            style: "margin-top: 8px; padding: 6px 12px; border: 1px solid #ccc; border-radius: 4px; background: white; cursor: pointer;",
                            onclick: move |_| on_pick_file.call(draft),
                            "Choose a different image"
                        }
                    } else {
                        button {
                            style: "width: 100%; padding: 40px 0; border: 2px dashed #ccc; border-radius: 8px; background: #fafafa; color: #666; cursor: pointer;",
                            onclick: move |_| on_pick_file.call(draft),
                            "Choose image…"
                        }
                    }
                    if let Some(message) = errors.read().as_ref().and_then(|e| e.message_for(Field::File)) {
                        div { style: "color: #c00; font-size: 13px; margin-top: 4px;", "{message}" }
                    }
                }

                div {
                    style: "margin-bottom: 16px;",
                    input {
                        r#type: "text",
                        value: "{title}",
                        placeholder: "Image title…",
                        oninput: move |e| draft.write().title = e.value(),
                        style: "width: 100%; padding: 8px; border: 1px solid #ccc; border-radius: 4px;",
                    }
                    if let Some(message) = errors.read().as_ref().and_then(|e| e.message_for(Field::Title)) {
                        div { style: "color: #c00; font-size: 13px; margin-top: 4px;", "{message}" }
                    }
                }

                div {
                    style: "margin-bottom: 16px;",
                    textarea {
                        value: "{description}",
                        placeholder: "Image description…",
                        oninput: move |e| draft.write().description = e.value(),
                        style: "width: 100%; padding: 8px; border: 1px solid #ccc; border-radius: 4px; min-height: 60px;",
                    }
                    if let Some(message) = errors.read().as_ref().and_then(|e| e.message_for(Field::Description)) {
                        div { style: "color: #c00; font-size: 13px; margin-top: 4px;", "{message}" }
                    }
                }

                div {
                    style: "display: flex; gap: 10px;",
                    button {
                        style: "flex: 1; padding: 12px; background: #38a169; color: white; border: none; border-radius: 4px; font-size: 15px; cursor: pointer;",
                        disabled: is_submitting(),
                        onclick: on_submit,
                        if is_submitting() {
                            "Saving…"
                        } else {
                            "Save"
                        }
                    }
                    button {
                        style: "flex: 1; padding: 12px; background: #e2e8f0; color: #2d3748; border: none; border-radius: 4px; font-size: 15px; cursor: pointer;",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}
