use iced::widget::image::Handle;
use iced::widget::{button, column, container, horizontal_space, row, text};
use iced::{Element, Length, Task, Theme};
use rfd::AsyncFileDialog;
use std::path::PathBuf;
use std::time::{Duration, UNIX_EPOCH};
use uuid::Uuid;

mod api;
mod collage;
mod state;
mod ui;

use api::grid::{self, GridAdvice, GridOptimizeRequest};
use api::models::{CreateJobResponse, JobStatus, JobStatusResponse};
use api::{CollageClient, UploadFile};
use collage::compress::{self, PreviewProxy};
use collage::params::CollageConfig;
use state::cancel::{CancelToken, TokenSource};
use state::selection::{OrderingMode, PickedFile, Selection, MIN_IMAGES};
use state::theme::{ThemePreference, ThemeStore};

/// Quiet period after the last edit before a preview or grid request fires
const DEBOUNCE: Duration = Duration::from_millis(400);

/// Interval between render-job status polls
const POLL_INTERVAL: Duration = Duration::from_millis(800);

/// Preview request lifecycle
#[derive(Debug, Clone, PartialEq)]
enum PreviewStatus {
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// Render job lifecycle. `Pending` covers both the creation request in
/// flight (no id yet) and a queued job awaiting its first progress report.
#[derive(Debug, Clone, PartialEq)]
enum JobPhase {
    Idle,
    Pending { job_id: Option<Uuid> },
    Processing { job_id: Uuid, progress: u8 },
}

/// Main application state
struct PhotoWeave {
    client: CollageClient,
    theme_store: ThemeStore,
    selection: Selection,
    config: CollageConfig,
    /// Small JPEG stand-ins for the selected photos, in display order
    compressed: Vec<PreviewProxy>,
    is_compressing: bool,
    compress_tokens: TokenSource,
    preview_tokens: TokenSource,
    grid_tokens: TokenSource,
    job_tokens: TokenSource,
    preview_status: PreviewStatus,
    preview_handle: Option<Handle>,
    grid_advice: Option<GridAdvice>,
    job: JobPhase,
    job_error: Option<String>,
    job_notice: Option<String>,
    /// Extension of the render being produced, captured at job creation
    job_output_extension: &'static str,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    PickFiles,
    PickFilesToAppend,
    FilesPicked { files: Vec<PickedFile>, append: bool },
    RemoveImage(u64),
    RemovePhotos(usize),
    ClearAll,
    OrderingSelected(OrderingMode),
    CanvasTypeSelected(collage::params::CanvasType),
    PresetSelected(String),
    CustomWidthChanged(String),
    CustomHeightChanged(String),
    ResolutionSelected(String),
    FormatSelected(String),
    TransparencyToggled(bool),
    LayoutSelected(collage::params::LayoutType),
    SpacingChanged(f64),
    MaintainAspectToggled,
    CompressionFinished { token: CancelToken, proxies: Vec<PreviewProxy> },
    PreviewElapsed(CancelToken),
    PreviewFinished { token: CancelToken, result: Result<Vec<u8>, String> },
    RequestPreviewNow,
    GridElapsed(CancelToken),
    GridFinished { token: CancelToken, result: Result<grid::GridOptimizeResponse, String> },
    DownloadRequested,
    JobCreated { token: CancelToken, result: Result<CreateJobResponse, String> },
    JobPollTick { token: CancelToken, job_id: Uuid },
    JobStatusFetched { token: CancelToken, job_id: Uuid, result: Result<JobStatusResponse, String> },
    JobDownloaded { token: CancelToken, result: Result<Option<PathBuf>, String> },
    ToggleTheme,
}

impl PhotoWeave {
    fn new() -> (Self, Task<Message>) {
        let client = CollageClient::from_env();
        log::info!("🧵 PhotoWeave ready, rendering via {}", client.base_url());

        (
            PhotoWeave {
                client,
                theme_store: ThemeStore::load_default(),
                selection: Selection::new(),
                config: CollageConfig::default(),
                compressed: Vec::new(),
                is_compressing: false,
                compress_tokens: TokenSource::new(),
                preview_tokens: TokenSource::new(),
                grid_tokens: TokenSource::new(),
                job_tokens: TokenSource::new(),
                preview_status: PreviewStatus::Idle,
                preview_handle: None,
                grid_advice: None,
                job: JobPhase::Idle,
                job_error: None,
                job_notice: None,
                job_output_extension: "jpg",
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFiles => Task::perform(pick_files(), |files| Message::FilesPicked {
                files,
                append: false,
            }),
            Message::PickFilesToAppend => {
                Task::perform(pick_files(), |files| Message::FilesPicked {
                    files,
                    append: true,
                })
            }
            Message::FilesPicked { files, append } => {
                if files.is_empty() {
                    return Task::none();
                }
                self.selection.add_files(files, append, &mut rand::rng());
                self.after_selection_change()
            }
            Message::RemoveImage(id) => {
                self.selection.remove(id);
                self.after_selection_change()
            }
            Message::RemovePhotos(n) => {
                if self.selection.remove_from_tail(n) == 0 {
                    return Task::none();
                }
                self.after_selection_change()
            }
            Message::ClearAll => {
                self.selection.clear();
                self.compressed.clear();
                self.is_compressing = false;
                self.compress_tokens.cancel();
                self.preview_tokens.cancel();
                self.grid_tokens.cancel();
                self.preview_status = PreviewStatus::Idle;
                self.preview_handle = None;
                self.grid_advice = None;
                self.reset_job();
                Task::none()
            }
            Message::OrderingSelected(ordering) => {
                self.selection.set_ordering(ordering, &mut rand::rng());
                self.after_selection_change()
            }
            Message::CanvasTypeSelected(canvas_type) => {
                self.config.set_canvas_type(canvas_type);
                self.config_changed()
            }
            Message::PresetSelected(preset) => {
                self.config.size_preset = preset;
                self.config_changed()
            }
            Message::CustomWidthChanged(width) => {
                self.config.custom_width = width;
                self.config_changed()
            }
            Message::CustomHeightChanged(height) => {
                self.config.custom_height = height;
                self.config_changed()
            }
            Message::ResolutionSelected(resolution) => {
                self.config.resolution = resolution;
                self.config_changed()
            }
            Message::FormatSelected(format) => {
                self.config.set_format(format);
                self.config_changed()
            }
            Message::TransparencyToggled(enabled) => {
                self.config.transparency = enabled;
                self.config_changed()
            }
            Message::LayoutSelected(layout) => {
                self.config.layout = layout;
                self.config_changed()
            }
            Message::SpacingChanged(fraction) => {
                self.config.spacing = fraction;
                self.config_changed()
            }
            Message::MaintainAspectToggled => {
                self.config.maintain_aspect_ratio = !self.config.maintain_aspect_ratio;
                self.config_changed()
            }
            Message::CompressionFinished { token, proxies } => {
                if token.is_cancelled() {
                    return Task::none();
                }
                log::info!("📦 Compressed {} preview proxies", proxies.len());
                self.compressed = proxies;
                self.is_compressing = false;
                self.schedule_preview()
            }
            Message::PreviewElapsed(token) => {
                if token.is_cancelled() {
                    return Task::none();
                }
                self.dispatch_preview(token)
            }
            Message::PreviewFinished { token, result } => {
                if token.is_cancelled() {
                    return Task::none();
                }
                match result {
                    Ok(bytes) => {
                        // Replacing the handle drops the previous preview
                        self.preview_handle = Some(Handle::from_bytes(bytes));
                        self.preview_status = PreviewStatus::Ready;
                    }
                    Err(message) => {
                        // Keep the stale image visible alongside the error
                        log::warn!("Preview request failed: {message}");
                        self.preview_status = PreviewStatus::Error(message);
                    }
                }
                Task::none()
            }
            Message::RequestPreviewNow => {
                if self.selection.count() < MIN_IMAGES {
                    return Task::none();
                }
                let token = self.preview_tokens.issue();
                self.dispatch_preview(token)
            }
            Message::GridElapsed(token) => {
                if token.is_cancelled() {
                    return Task::none();
                }
                self.dispatch_grid(token)
            }
            Message::GridFinished { token, result } => {
                if token.is_cancelled() {
                    return Task::none();
                }
                match result {
                    Ok(response) => {
                        self.grid_advice = grid::interpret(&response, self.selection.count());
                    }
                    Err(message) => {
                        // Advice is best-effort; failures only clear it
                        log::warn!("Grid optimization failed: {message}");
                        self.grid_advice = None;
                    }
                }
                Task::none()
            }
            Message::DownloadRequested => self.start_job(),
            Message::JobCreated { token, result } => {
                if token.is_cancelled() {
                    return Task::none();
                }
                match result {
                    Ok(response) => {
                        log::info!("🚀 Render job {} accepted", response.job_id);
                        self.job = JobPhase::Pending {
                            job_id: Some(response.job_id),
                        };
                        schedule_poll(token, response.job_id)
                    }
                    Err(message) => {
                        self.job = JobPhase::Idle;
                        self.job_error = Some(message);
                        Task::none()
                    }
                }
            }
            Message::JobPollTick { token, job_id } => {
                if token.is_cancelled() {
                    return Task::none();
                }
                let client = self.client.clone();
                Task::perform(
                    async move { client.job_status(job_id).await.map_err(|e| e.to_string()) },
                    move |result| Message::JobStatusFetched {
                        token: token.clone(),
                        job_id,
                        result,
                    },
                )
            }
            Message::JobStatusFetched {
                token,
                job_id,
                result,
            } => {
                if token.is_cancelled() {
                    return Task::none();
                }
                self.apply_job_status(token, job_id, result)
            }
            Message::JobDownloaded { token, result } => {
                if token.is_cancelled() {
                    return Task::none();
                }
                self.job = JobPhase::Idle;
                match result {
                    Ok(Some(path)) => {
                        log::info!("✅ Collage saved to {}", path.display());
                        self.job_notice = Some(format!("Saved to {}", path.display()));
                    }
                    Ok(None) => {}
                    Err(message) => self.job_error = Some(message),
                }
                Task::none()
            }
            Message::ToggleTheme => {
                self.theme_store.toggle(ThemePreference::Dark);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let theme_label = match self.theme_store.effective(ThemePreference::Dark) {
            ThemePreference::Light => "Dark Mode",
            ThemePreference::Dark => "Light Mode",
        };
        let header = row![
            text("PhotoWeave").size(32),
            horizontal_space(),
            button(text(theme_label).size(13)).on_press(Message::ToggleTheme),
        ]
        .spacing(12);

        let can_request =
            self.selection.count() >= MIN_IMAGES && self.config.resolve().is_some();

        let panels = row![
            ui::upload::panel(&self.selection, self.is_compressing),
            ui::preview::panel(
                &self.preview_status,
                self.preview_handle.as_ref(),
                &self.job,
                self.job_error.as_deref(),
                self.job_notice.as_deref(),
                can_request,
            ),
            ui::config::panel(
                &self.config,
                self.grid_advice.as_ref(),
                self.selection.count(),
            ),
        ]
        .spacing(24);

        container(column![header, panels].spacing(24).padding(24))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn theme(&self) -> Theme {
        match self.theme_store.effective(ThemePreference::Dark) {
            ThemePreference::Light => Theme::Light,
            ThemePreference::Dark => Theme::Dark,
        }
    }

    /// Selection edits invalidate the running job, rebuild the preview
    /// proxies and re-check the grid fit. The preview itself re-fires once
    /// compression lands, so the proxies are never stale.
    fn after_selection_change(&mut self) -> Task<Message> {
        self.reset_job();
        let grid = self.schedule_grid();

        if self.selection.is_empty() {
            self.compressed.clear();
            self.is_compressing = false;
            self.compress_tokens.cancel();
            self.preview_tokens.cancel();
            self.preview_status = PreviewStatus::Idle;
            self.preview_handle = None;
            return grid;
        }

        let token = self.compress_tokens.issue();
        self.is_compressing = true;
        // Old proxies describe the previous selection; until the new batch
        // lands, preview requests fall back to the originals
        self.compressed.clear();
        let originals = self.selection.original_files();
        let compress = Task::perform(compress::compress_selection(originals), move |proxies| {
            Message::CompressionFinished {
                token: token.clone(),
                proxies,
            }
        });
        Task::batch([grid, compress])
    }

    /// Any parameter edit invalidates the running job and re-arms both
    /// debounced requests.
    fn config_changed(&mut self) -> Task<Message> {
        self.reset_job();
        Task::batch([self.schedule_preview(), self.schedule_grid()])
    }

    fn reset_job(&mut self) {
        self.job_tokens.cancel();
        self.job = JobPhase::Idle;
        self.job_error = None;
        self.job_notice = None;
    }

    /// Arm the preview debounce. Issuing a fresh token silently abandons
    /// any earlier timer or in-flight request.
    fn schedule_preview(&mut self) -> Task<Message> {
        if self.selection.count() < MIN_IMAGES {
            self.preview_tokens.cancel();
            return Task::none();
        }
        let token = self.preview_tokens.issue();
        Task::perform(tokio::time::sleep(DEBOUNCE), move |_| {
            Message::PreviewElapsed(token.clone())
        })
    }

    fn dispatch_preview(&mut self, token: CancelToken) -> Task<Message> {
        let Some(params) = self.config.resolve() else {
            // Incomplete custom dimensions; wait for further edits
            self.preview_status = PreviewStatus::Idle;
            return Task::none();
        };
        let params = params.preview_variant();
        let files = self.upload_payload();
        self.preview_status = PreviewStatus::Loading;
        let client = self.client.clone();
        Task::perform(
            async move {
                client
                    .render_preview(&params, files)
                    .await
                    .map_err(|e| e.to_string())
            },
            move |result| Message::PreviewFinished {
                token: token.clone(),
                result,
            },
        )
    }

    /// Arm the grid-advice debounce; only grid layouts with enough photos
    /// ask the service at all.
    fn schedule_grid(&mut self) -> Task<Message> {
        if self.config.layout != collage::params::LayoutType::Grid
            || self.selection.count() < MIN_IMAGES
        {
            self.grid_tokens.cancel();
            self.grid_advice = None;
            return Task::none();
        }
        let token = self.grid_tokens.issue();
        Task::perform(tokio::time::sleep(DEBOUNCE), move |_| {
            Message::GridElapsed(token.clone())
        })
    }

    fn dispatch_grid(&mut self, token: CancelToken) -> Task<Message> {
        let Some(params) = self.config.resolve() else {
            return Task::none();
        };
        let (width_mm, height_mm) = params.dimensions.size_mm();
        let request = GridOptimizeRequest {
            num_images: self.selection.count() as u32,
            width_mm,
            height_mm,
            dpi: params.dimensions.dpi(),
            spacing: params.spacing_percent,
        };
        let client = self.client.clone();
        Task::perform(
            async move {
                client
                    .optimize_grid(&request)
                    .await
                    .map_err(|e| e.to_string())
            },
            move |result| Message::GridFinished {
                token: token.clone(),
                result,
            },
        )
    }

    /// Kick off a full-resolution render. Uploads the original files, not
    /// the preview proxies.
    fn start_job(&mut self) -> Task<Message> {
        if self.job != JobPhase::Idle || self.selection.count() < MIN_IMAGES {
            return Task::none();
        }
        let Some(params) = self.config.resolve() else {
            return Task::none();
        };

        self.job_error = None;
        self.job_notice = None;
        self.job_output_extension = params.output_format.extension();
        self.job = JobPhase::Pending { job_id: None };

        let token = self.job_tokens.issue();
        let files: Vec<UploadFile> = self
            .selection
            .original_files()
            .into_iter()
            .map(|(name, bytes)| UploadFile { name, bytes })
            .collect();
        let client = self.client.clone();
        Task::perform(
            async move {
                client
                    .create_job(&params, files)
                    .await
                    .map_err(|e| e.to_string())
            },
            move |result| Message::JobCreated {
                token: token.clone(),
                result,
            },
        )
    }

    fn apply_job_status(
        &mut self,
        token: CancelToken,
        job_id: Uuid,
        result: Result<JobStatusResponse, String>,
    ) -> Task<Message> {
        let status = match result {
            Ok(status) => status,
            Err(message) => {
                self.job = JobPhase::Idle;
                self.job_error = Some(message);
                return Task::none();
            }
        };

        match status.status {
            JobStatus::Pending => {
                self.job = JobPhase::Pending {
                    job_id: Some(job_id),
                };
                schedule_poll(token, job_id)
            }
            JobStatus::Processing => {
                self.job = JobPhase::Processing {
                    job_id,
                    progress: status.progress,
                };
                schedule_poll(token, job_id)
            }
            JobStatus::Failed => {
                self.job = JobPhase::Idle;
                self.job_error = Some(
                    status
                        .error_message
                        .unwrap_or_else(|| "Rendering failed".to_string()),
                );
                Task::none()
            }
            JobStatus::Completed => {
                self.job = JobPhase::Processing {
                    job_id,
                    progress: 100,
                };
                let client = self.client.clone();
                let extension = self.job_output_extension;
                let download_token = token.clone();
                Task::perform(
                    async move { download_and_save(client, job_id, extension, download_token).await },
                    move |result| Message::JobDownloaded {
                        token: token.clone(),
                        result,
                    },
                )
            }
        }
    }

    /// The bytes the preview endpoint receives: compressed proxies when
    /// they are ready, originals as the fallback.
    fn upload_payload(&self) -> Vec<UploadFile> {
        if !self.compressed.is_empty() {
            self.compressed
                .iter()
                .map(|proxy| UploadFile {
                    name: proxy.file_name.clone(),
                    bytes: proxy.bytes.clone(),
                })
                .collect()
        } else {
            self.selection
                .original_files()
                .into_iter()
                .map(|(name, bytes)| UploadFile { name, bytes })
                .collect()
        }
    }
}

fn main() -> iced::Result {
    env_logger::init();
    iced::application("PhotoWeave", PhotoWeave::update, PhotoWeave::view)
        .theme(PhotoWeave::theme)
        .centered()
        .run_with(PhotoWeave::new)
}

/// Wait one poll interval, then ask for the job's status again
fn schedule_poll(token: CancelToken, job_id: Uuid) -> Task<Message> {
    Task::perform(tokio::time::sleep(POLL_INTERVAL), move |_| {
        Message::JobPollTick {
            token: token.clone(),
            job_id,
        }
    })
}

/// Show the native picker and read the chosen images into memory
async fn pick_files() -> Vec<PickedFile> {
    let Some(handles) = AsyncFileDialog::new()
        .set_title("Select Photos")
        .add_filter(
            "Images",
            &["jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff", "webp"],
        )
        .pick_files()
        .await
    else {
        return Vec::new();
    };

    let mut files = Vec::with_capacity(handles.len());
    for handle in handles {
        let modified_ms = file_modified_ms(handle.path());
        let bytes = handle.read().await;
        files.push(PickedFile {
            name: handle.file_name(),
            bytes,
            modified_ms,
        });
    }
    files
}

/// Filesystem mtime in milliseconds; falls back to "now" so files without
/// one still sort deterministically.
fn file_modified_ms(path: &std::path::Path) -> i64 {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis())
}

/// Filename for a finished render, derived from the output extension
fn download_file_name(extension: &str) -> String {
    format!("photoweave-collage.{extension}")
}

/// Fetch the finished render and write it to the Downloads folder.
/// `Ok(None)` means the job was cancelled while the download was in flight.
async fn download_and_save(
    client: CollageClient,
    job_id: Uuid,
    extension: &'static str,
    token: CancelToken,
) -> Result<Option<PathBuf>, String> {
    let bytes = client
        .download_job(job_id)
        .await
        .map_err(|e| e.to_string())?;
    if token.is_cancelled() {
        return Ok(None);
    }

    let downloads = dirs::download_dir()
        .ok_or_else(|| "Could not locate the Downloads directory".to_string())?;
    let path = downloads.join(download_file_name(extension));
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| format!("Could not save collage: {e}"))?;
    Ok(Some(path))
}
