/// HTTP client for the collage rendering service
///
/// This module handles:
/// - Multipart preview and job-creation uploads (mm and px endpoints)
/// - Job status polling and result download
/// - Grid-optimization requests
///
/// All methods surface failures as `ApiError`; callers at the UI boundary
/// stringify them for display.

pub mod grid;
pub mod models;

use crate::collage::params::ResolvedParams;
use grid::{GridOptimizeRequest, GridOptimizeResponse};
use models::{CreateJobResponse, JobStatusResponse};
use reqwest::multipart::{Form, Part};
use thiserror::Error;
use uuid::Uuid;

/// Base URL environment override; defaults to a local service
pub const BASE_URL_ENV: &str = "PHOTOWEAVE_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-2xx status. The message is the
    /// response body when there is one, else a generic description.
    #[error("{0}")]
    Remote(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// One file payload for a multipart upload, in display order
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct CollageClient {
    http: reqwest::Client,
    base_url: String,
}

impl CollageClient {
    pub fn new(base_url: &str) -> Self {
        CollageClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the client from `PHOTOWEAVE_API_BASE_URL`, defaulting to the
    /// local development service.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Render a preview collage; returns the encoded image bytes.
    /// Physical canvases hit the mm endpoint, pixel canvases the px one.
    pub async fn render_preview(
        &self,
        params: &ResolvedParams,
        files: Vec<UploadFile>,
    ) -> Result<Vec<u8>, ApiError> {
        let endpoint = if params.is_physical() {
            "/api/collage/preview"
        } else {
            "/api/collage/preview-pixels"
        };
        let form = multipart_form(params, files)?;
        let response = self
            .http
            .post(format!("{}{}", self.base_url, endpoint))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(remote_error("Preview", response).await);
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Create a full-resolution render job
    pub async fn create_job(
        &self,
        params: &ResolvedParams,
        files: Vec<UploadFile>,
    ) -> Result<CreateJobResponse, ApiError> {
        let endpoint = if params.is_physical() {
            "/api/collage"
        } else {
            "/api/collage/pixels"
        };
        let form = multipart_form(params, files)?;
        let response = self
            .http
            .post(format!("{}{}", self.base_url, endpoint))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(remote_error("Job creation", response).await);
        }
        Ok(response.json().await?)
    }

    /// Poll the status of a render job
    pub async fn job_status(&self, job_id: Uuid) -> Result<JobStatusResponse, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/collage/{}/status", self.base_url, job_id))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(remote_error("Status check", response).await);
        }
        Ok(response.json().await?)
    }

    /// Download the finished render as raw bytes
    pub async fn download_job(&self, job_id: Uuid) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/collage/{}/download", self.base_url, job_id))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(remote_error("Download", response).await);
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Ask for the nearest perfect grid arrangement
    pub async fn optimize_grid(
        &self,
        request: &GridOptimizeRequest,
    ) -> Result<GridOptimizeResponse, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/collage/optimize-grid", self.base_url))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(remote_error("Grid optimization", response).await);
        }
        Ok(response.json().await?)
    }
}

/// Assemble the multipart payload: ordered file parts first, then the
/// resolved parameter fields.
fn multipart_form(params: &ResolvedParams, files: Vec<UploadFile>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for file in files {
        let part = Part::bytes(file.bytes)
            .file_name(file.name.clone())
            .mime_str(mime_for_name(&file.name))?;
        form = form.part("files", part);
    }
    for (name, value) in params.form_fields() {
        form = form.text(name, value);
    }
    Ok(form)
}

/// Content type from the file extension; the service sniffs unknowns
fn mime_for_name(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Build the user-visible error for a non-2xx response: body text when the
/// service provided any, else "<operation> failed with <status>"
async fn remote_error(operation: &str, response: reqwest::Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if body.trim().is_empty() {
        ApiError::Remote(format!("{} failed with {}", operation, status.as_u16()))
    } else {
        ApiError::Remote(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = CollageClient::new("http://collage.example:8000/");
        assert_eq!(client.base_url(), "http://collage.example:8000");
    }

    #[test]
    fn test_mime_for_name() {
        assert_eq!(mime_for_name("photo.JPG"), "image/jpeg");
        assert_eq!(mime_for_name("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_for_name("photo.png"), "image/png");
        assert_eq!(mime_for_name("photo.webp"), "image/webp");
        assert_eq!(mime_for_name("photo.tiff"), "image/tiff");
        assert_eq!(mime_for_name("mystery"), "application/octet-stream");
    }

    #[test]
    fn test_multipart_form_builds_for_both_canvas_kinds() {
        use crate::collage::params::{CanvasDimensions, LayoutType, OutputFormat, ResolvedParams};

        let files = vec![UploadFile {
            name: "a.jpg".to_string(),
            bytes: vec![1, 2, 3],
        }];
        let physical = ResolvedParams {
            dimensions: CanvasDimensions::Millimeters {
                width: 400.0,
                height: 300.0,
                dpi: 150,
            },
            layout: LayoutType::Grid,
            spacing_percent: 3.0,
            background_color: "#FFFFFF",
            maintain_aspect_ratio: true,
            output_format: OutputFormat::Jpeg,
        };
        assert!(multipart_form(&physical, files.clone()).is_ok());

        let pixel = ResolvedParams {
            dimensions: CanvasDimensions::Pixels {
                width: 1920,
                height: 1080,
            },
            ..physical
        };
        assert!(multipart_form(&pixel, files).is_ok());
    }
}
