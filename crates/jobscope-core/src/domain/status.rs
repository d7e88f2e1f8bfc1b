//! Job status records as returned by the job API.
//!
//! These types mirror the camelCase JSON shape of `jobInfo` / `jobStatus`.
//! Every field the platform may leave out is an `Option`, so "absent" and
//! "zero" stay distinguishable.

use serde::{Deserialize, Serialize};

use crate::error::JobscopeError;

/// Raw job state as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RawJobState {
    Waiting,
    Running,
    Succeeded,
    Failed,
    Stopped,
    JobNotFound,

    /// Any state string this crate does not know about.
    #[serde(other)]
    Unknown,
}

/// What the user last asked the platform to do with the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionType {
    Start,
    Stop,

    #[serde(other)]
    Other,
}

/// Platform-static explanation for a class of exit code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitSpec {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub exit_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<Vec<String>>,
}

/// Dynamic message produced by the job's runtime when it exits with a positive code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeExitMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_user_exit_code: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitMessages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<RuntimeExitMessage>,

    /// Free text from the launcher; only meaningful when the exit code is <= 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launcher: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryDetails {
    /// Retries caused by resource conflicts while waiting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<u32>,
}

/// Status of a single job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub state: RawJobState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_type: Option<ExecutionType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,

    /// Epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_launched_time: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_time: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_exit_code: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_exit_spec: Option<ExitSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_exit_messages: Option<ExitMessages>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_exit_trigger_message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_exit_trigger_task_role_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_exit_trigger_task_index: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_exit_diagnostics: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_details: Option<RetryDetails>,
}

impl JobStatus {
    /// A status with only the raw state set.
    pub fn new(state: RawJobState) -> Self {
        Self {
            state,
            execution_type: None,
            username: None,
            retries: None,
            created_time: None,
            app_launched_time: None,
            completed_time: None,
            app_exit_code: None,
            app_exit_spec: None,
            app_exit_messages: None,
            app_exit_trigger_message: None,
            app_exit_trigger_task_role_name: None,
            app_exit_trigger_task_index: None,
            app_exit_diagnostics: None,
            retry_details: None,
        }
    }

    pub fn runtime_message(&self) -> Option<&RuntimeExitMessage> {
        self.app_exit_messages.as_ref()?.runtime.as_ref()
    }

    pub fn launcher_message(&self) -> Option<&str> {
        self.app_exit_messages.as_ref()?.launcher.as_deref()
    }

    pub fn resource_retries(&self) -> Option<u32> {
        self.retry_details.as_ref()?.resource
    }
}

/// A job as returned by the job API: name, status and opaque task-role config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    pub name: String,
    pub job_status: JobStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_roles: Option<serde_json::Value>,
}

impl JobInfo {
    pub fn from_json(input: &str) -> Result<Self, JobscopeError> {
        Ok(serde_json::from_str(input)?)
    }
}
