/// Wire models for the collage rendering service
///
/// Shapes mirror the service's JSON responses. Optional fields default
/// rather than fail, since the service omits nulls in some responses.

use serde::Deserialize;
use uuid::Uuid;

/// Lifecycle state of a render job on the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// Completed and failed jobs never change state again
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Response to a job creation request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateJobResponse {
    pub job_id: Uuid,
    pub status: JobStatus,
    #[serde(default)]
    pub message: String,
}

/// One poll of the job status endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    pub job_id: Uuid,
    pub status: JobStatus,
    /// 0-100; the service may omit it early in the job's life
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub output_file: Option<String>,
}
