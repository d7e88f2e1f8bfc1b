//! Hint derivation: explains why a job failed, stopped or is waiting.
//!
//! `derive_hints` is a pure function of the job status. It never fails;
//! an absent field just means the corresponding hint is left out.

use crate::domain::{Hint, HintBody, HintReport, HumanizedState, JobStatus, Severity};

pub const EXIT_CODE: &str = "Exit Code";
pub const EXIT_TYPE: &str = "Exit Type";
pub const EXIT_DIAGNOSTICS: &str = "Exit Diagnostics";
pub const EXIT_REASON: &str = "Exit Reason";
pub const EXIT_SOLUTIONS: &str = "Exit Solutions";
pub const EXIT_TRIGGER_MESSAGE: &str = "Exit Trigger Message";
pub const EXIT_TRIGGER_TASK_ROLE: &str = "Exit Trigger Task Role";
pub const EXIT_TRIGGER_TASK_INDEX: &str = "Exit Trigger Task Index";
pub const ORIGINAL_USER_EXIT_CODE: &str = "Original User Exit Code";
pub const CONFLICT_COUNT: &str = "Conflict Count";
pub const RESOLUTION: &str = "Resolution";

/// Exit type for failures caused by the user's own program.
pub const USER_FAILURE: &str = "USER_FAILURE";

const RESOLUTION_TEXT: &str = "Please adjust the resource requirement in your job config, \
     or wait till other jobs release more resources back to the system.";

/// Tunables for hint derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintPolicy {
    /// Resource-conflict retries at which a waiting job gets a warning.
    pub conflict_threshold: u32,
}

impl Default for HintPolicy {
    fn default() -> Self {
        Self {
            conflict_threshold: 3,
        }
    }
}

/// Derive the hints for a job, or `None` when there is nothing to explain.
pub fn derive_hints(status: &JobStatus, policy: &HintPolicy) -> Option<HintReport> {
    match HumanizedState::from(status) {
        HumanizedState::Failed => Some(exit_report(status, Severity::Error)),
        HumanizedState::Stopped => Some(exit_report(status, Severity::Info)),
        HumanizedState::Waiting => waiting_report(status, policy),
        _ => None,
    }
}

fn exit_report(status: &JobStatus, severity: Severity) -> HintReport {
    let exit_code = match status.app_exit_code {
        Some(code) => HintBody::Number(code),
        None => HintBody::Text("N/A".to_string()),
    };
    let mut hints = vec![Hint::new(EXIT_CODE, exit_code)];

    let exit_type = status
        .app_exit_spec
        .as_ref()
        .and_then(|spec| spec.exit_type.as_deref());
    if let Some(exit_type) = exit_type {
        hints.push(Hint::text(EXIT_TYPE, exit_type));
    }

    if exit_type == Some(USER_FAILURE) {
        hints.extend(user_failure_hints(status));
    } else {
        hints.push(Hint::new(EXIT_DIAGNOSTICS, HintBody::SeeDiagnostics));
    }

    HintReport { severity, hints }
}

fn user_failure_hints(status: &JobStatus) -> Vec<Hint> {
    let spec = status.app_exit_spec.as_ref();
    let runtime = status.runtime_message();
    let mut hints = Vec::new();

    // The runtime explains positive codes; the launcher explains the rest.
    let dynamic_reason = if status.app_exit_code.is_some_and(|code| code > 0) {
        runtime.and_then(|r| r.reason.clone())
    } else {
        status.launcher_message().map(str::to_string)
    };
    let reasons: Vec<String> = spec
        .and_then(|s| s.reason.clone())
        .into_iter()
        .chain(dynamic_reason)
        .collect();
    if !reasons.is_empty() {
        hints.push(Hint::new(EXIT_REASON, HintBody::Lines(reasons)));
    }

    let solutions: Vec<String> = runtime
        .and_then(|r| r.solution.clone())
        .into_iter()
        .chain(spec.and_then(|s| s.solution.clone()).unwrap_or_default())
        .collect();
    if !solutions.is_empty() {
        hints.push(Hint::new(EXIT_SOLUTIONS, HintBody::Lines(solutions)));
    }

    if let Some(message) = &status.app_exit_trigger_message {
        hints.push(Hint::text(EXIT_TRIGGER_MESSAGE, message.as_str()));
    }
    if let Some(role) = &status.app_exit_trigger_task_role_name {
        hints.push(Hint::text(EXIT_TRIGGER_TASK_ROLE, role.as_str()));
    }
    if let Some(index) = status.app_exit_trigger_task_index {
        hints.push(Hint::number(EXIT_TRIGGER_TASK_INDEX, index));
    }
    if let Some(code) = runtime.and_then(|r| r.original_user_exit_code) {
        hints.push(Hint::number(ORIGINAL_USER_EXIT_CODE, code));
    }

    hints
}

fn waiting_report(status: &JobStatus, policy: &HintPolicy) -> Option<HintReport> {
    let conflicts = status
        .resource_retries()
        .filter(|&n| n >= policy.conflict_threshold)?;

    Some(HintReport {
        severity: Severity::Warning,
        hints: vec![
            Hint::number(CONFLICT_COUNT, i64::from(conflicts)),
            Hint::text(RESOLUTION, RESOLUTION_TEXT),
        ],
    })
}
