//! JobView - 1 ジョブ分の表示内容
//!
//! サマリー、ヒント、（設定次第で）生の診断メッセージをまとめる。

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::hints::derive_hints;
use crate::config::ViewConfig;
use crate::domain::{HintReport, JobAction, JobInfo, JobSummary};

/// Everything the job view shows for one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobView {
    pub summary: JobSummary,
    pub actions: Vec<JobAction>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<HintReport>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<String>,
}

impl JobView {
    pub fn build(info: &JobInfo, config: &ViewConfig, now: DateTime<Utc>) -> Self {
        let summary = JobSummary::from_job_info(info, now);
        let hints = derive_hints(&info.job_status, &config.hint_policy());
        let diagnostics = if config.show_diagnostics && hints.is_some() {
            info.job_status.app_exit_diagnostics.clone()
        } else {
            None
        };

        Self {
            actions: summary.available_actions(),
            summary,
            hints,
            diagnostics,
        }
    }
}

impl fmt::Display for JobView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary)?;
        let actions: Vec<String> = self
            .actions
            .iter()
            .map(ToString::to_string)
            .collect();
        writeln!(f, "Actions:   {}", actions.join(", "))?;
        if let Some(hints) = &self.hints {
            writeln!(f)?;
            write!(f, "{hints}")?;
        }
        if let Some(diagnostics) = &self.diagnostics {
            writeln!(f)?;
            writeln!(f, "Exit diagnostics:")?;
            writeln!(f, "{diagnostics}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::hints::{CONFLICT_COUNT, EXIT_CODE};
    use crate::domain::{JobStatus, RawJobState, RetryDetails, Severity};

    fn info(status: JobStatus) -> JobInfo {
        JobInfo {
            name: "mnist".to_string(),
            job_status: status,
            task_roles: None,
        }
    }

    #[test]
    fn failed_job_view_carries_hints_and_diagnostics() {
        let mut status = JobStatus::new(RawJobState::Failed);
        status.app_exit_code = Some(1);
        status.app_exit_diagnostics = Some("stack trace".to_string());

        let view = JobView::build(&info(status), &ViewConfig::default(), Utc::now());
        let hints = view.hints.as_ref().unwrap();
        assert_eq!(hints.severity, Severity::Error);
        assert!(hints.get(EXIT_CODE).is_some());
        assert_eq!(view.diagnostics.as_deref(), Some("stack trace"));
        assert!(!view.actions.contains(&JobAction::Stop));

        let text = view.to_string();
        assert!(text.contains("Status:    Failed"));
        assert!(text.contains("Actions:   clone, view_config"));
        assert!(text.contains("stack trace"));
    }

    #[test]
    fn diagnostics_hidden_when_disabled() {
        let mut status = JobStatus::new(RawJobState::Failed);
        status.app_exit_diagnostics = Some("stack trace".to_string());
        let config = ViewConfig {
            show_diagnostics: false,
            ..ViewConfig::default()
        };

        let view = JobView::build(&info(status), &config, Utc::now());
        assert_eq!(view.diagnostics, None);
    }

    #[test]
    fn view_threshold_follows_config() {
        let mut status = JobStatus::new(RawJobState::Waiting);
        status.retry_details = Some(RetryDetails { resource: Some(2) });

        let strict = ViewConfig {
            conflict_threshold: 2,
            ..ViewConfig::default()
        };
        let view = JobView::build(&info(status.clone()), &strict, Utc::now());
        assert!(view.hints.unwrap().get(CONFLICT_COUNT).is_some());

        let view = JobView::build(&info(status), &ViewConfig::default(), Utc::now());
        assert!(view.hints.is_none());
        assert!(view.actions.contains(&JobAction::Stop));
    }

    #[test]
    fn view_serializes_to_json() {
        let view = JobView::build(
            &info(JobStatus::new(RawJobState::Running)),
            &ViewConfig::default(),
            Utc::now(),
        );
        let v = serde_json::to_value(&view).unwrap();
        assert_eq!(v["summary"]["state"], "running");
        assert_eq!(v["actions"][0], "stop");
        assert!(v.get("hints").is_none());
    }
}
