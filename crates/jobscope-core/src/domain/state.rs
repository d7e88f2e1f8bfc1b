//! State - 表示用のジョブ状態
//!
//! プラットフォームの生の状態 (`RawJobState`) と実行種別 (`ExecutionType`)
//! から、画面に出す状態を決める。

use std::fmt;

use serde::{Deserialize, Serialize};

use super::status::{ExecutionType, JobStatus, RawJobState};

/// HumanizedState は表示用の状態
///
/// # 変換規則
/// - JOB_NOT_FOUND: NotFound
/// - WAITING / RUNNING: 停止要求 (STOP) 中なら Stopping
/// - SUCCEEDED / FAILED / STOPPED: そのまま
/// - それ以外: Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumanizedState {
    Waiting,
    Running,
    Stopping,
    Succeeded,
    Failed,
    Stopped,
    Unknown,
    NotFound,
}

impl HumanizedState {
    pub fn humanize(state: RawJobState, execution_type: Option<ExecutionType>) -> Self {
        let stopping = execution_type == Some(ExecutionType::Stop);
        match state {
            RawJobState::JobNotFound => HumanizedState::NotFound,
            RawJobState::Waiting if stopping => HumanizedState::Stopping,
            RawJobState::Waiting => HumanizedState::Waiting,
            RawJobState::Running if stopping => HumanizedState::Stopping,
            RawJobState::Running => HumanizedState::Running,
            RawJobState::Succeeded => HumanizedState::Succeeded,
            RawJobState::Failed => HumanizedState::Failed,
            RawJobState::Stopped => HumanizedState::Stopped,
            RawJobState::Unknown => HumanizedState::Unknown,
        }
    }

    /// Is the job still holding (or waiting for) resources?
    pub fn is_active(self) -> bool {
        matches!(self, HumanizedState::Waiting | HumanizedState::Running)
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            HumanizedState::Succeeded | HumanizedState::Failed | HumanizedState::Stopped
        )
    }
}

impl From<&JobStatus> for HumanizedState {
    fn from(status: &JobStatus) -> Self {
        HumanizedState::humanize(status.state, status.execution_type)
    }
}

impl fmt::Display for HumanizedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HumanizedState::Waiting => "Waiting",
            HumanizedState::Running => "Running",
            HumanizedState::Stopping => "Stopping",
            HumanizedState::Succeeded => "Succeeded",
            HumanizedState::Failed => "Failed",
            HumanizedState::Stopped => "Stopped",
            HumanizedState::Unknown => "Unknown",
            HumanizedState::NotFound => "N/A",
        };
        f.write_str(s)
    }
}
