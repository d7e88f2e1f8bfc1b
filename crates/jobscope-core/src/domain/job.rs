//! Job summary and the actions the job view offers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::state::HumanizedState;
use super::status::JobInfo;

/// Actions a user can take on a job from its detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobAction {
    Stop,
    Clone,
    ViewConfig,
}

impl JobAction {
    /// Stop is only offered while the job is waiting or running.
    pub fn is_available(self, state: HumanizedState) -> bool {
        match self {
            JobAction::Stop => state.is_active(),
            JobAction::Clone | JobAction::ViewConfig => true,
        }
    }
}

impl fmt::Display for JobAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobAction::Stop => "stop",
            JobAction::Clone => "clone",
            JobAction::ViewConfig => "view_config",
        };
        f.write_str(s)
    }
}

/// Display-ready digest of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSummary {
    pub name: String,
    pub username: Option<String>,
    pub state: HumanizedState,
    pub retries: Option<u32>,
    pub exit_code: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,

    /// Run time in milliseconds: (completed or now) - (launched or created).
    pub duration_ms: Option<i64>,
}

impl JobSummary {
    pub fn from_job_info(info: &JobInfo, now: DateTime<Utc>) -> Self {
        let status = &info.job_status;
        let created_at = status.created_time.and_then(DateTime::<Utc>::from_timestamp_millis);
        let launched_at = status
            .app_launched_time
            .and_then(DateTime::<Utc>::from_timestamp_millis);
        let completed_at = status
            .completed_time
            .and_then(DateTime::<Utc>::from_timestamp_millis);

        let duration_ms = launched_at.or(created_at).map(|start| {
            let end = completed_at.unwrap_or(now);
            (end - start).num_milliseconds().max(0)
        });

        Self {
            name: info.name.clone(),
            username: status.username.clone(),
            state: HumanizedState::from(status),
            retries: status.retries,
            exit_code: status.app_exit_code,
            created_at,
            completed_at,
            duration_ms,
        }
    }

    pub fn available_actions(&self) -> Vec<JobAction> {
        [JobAction::Stop, JobAction::Clone, JobAction::ViewConfig]
            .into_iter()
            .filter(|a| a.is_available(self.state))
            .collect()
    }
}

/// Formats milliseconds as e.g. `1h 2m 3s`.
pub fn format_duration(ms: i64) -> String {
    let total = ms.max(0) / 1000;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}h {m}m {s}s")
    } else if m > 0 {
        format!("{m}m {s}s")
    } else {
        format!("{s}s")
    }
}

impl fmt::Display for JobSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Job:       {}", self.name)?;
        if let Some(user) = &self.username {
            writeln!(f, "User:      {user}")?;
        }
        writeln!(f, "Status:    {}", self.state)?;
        if let Some(retries) = self.retries {
            writeln!(f, "Retries:   {retries}")?;
        }
        if let Some(code) = self.exit_code {
            writeln!(f, "Exit code: {code}")?;
        }
        if let Some(t) = self.created_at {
            writeln!(f, "Created:   {}", t.format("%Y-%m-%d %H:%M:%S UTC"))?;
        }
        if let Some(t) = self.completed_at {
            writeln!(f, "Completed: {}", t.format("%Y-%m-%d %H:%M:%S UTC"))?;
        }
        if let Some(ms) = self.duration_ms {
            writeln!(f, "Duration:  {}", format_duration(ms))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::status::{JobStatus, RawJobState};
    use rstest::rstest;

    fn info(status: JobStatus) -> JobInfo {
        JobInfo {
            name: "mnist".to_string(),
            job_status: status,
            task_roles: None,
        }
    }

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn duration_uses_completed_time_when_present() {
        let mut status = JobStatus::new(RawJobState::Succeeded);
        status.created_time = Some(1_000);
        status.app_launched_time = Some(5_000);
        status.completed_time = Some(65_000);

        let summary = JobSummary::from_job_info(&info(status), at(999_999));
        assert_eq!(summary.duration_ms, Some(60_000));
        assert_eq!(summary.completed_at, Some(at(65_000)));
    }

    #[test]
    fn duration_runs_until_now_while_running() {
        let mut status = JobStatus::new(RawJobState::Running);
        status.created_time = Some(10_000);

        let summary = JobSummary::from_job_info(&info(status), at(40_000));
        assert_eq!(summary.duration_ms, Some(30_000));
    }

    #[test]
    fn no_start_time_means_no_duration() {
        let summary = JobSummary::from_job_info(&info(JobStatus::new(RawJobState::Waiting)), at(0));
        assert_eq!(summary.duration_ms, None);
    }

    #[rstest]
    #[case::waiting(RawJobState::Waiting, true)]
    #[case::running(RawJobState::Running, true)]
    #[case::failed(RawJobState::Failed, false)]
    #[case::succeeded(RawJobState::Succeeded, false)]
    #[case::stopped(RawJobState::Stopped, false)]
    fn stop_only_offered_while_active(#[case] raw: RawJobState, #[case] can_stop: bool) {
        let summary = JobSummary::from_job_info(&info(JobStatus::new(raw)), at(0));
        let actions = summary.available_actions();
        assert_eq!(actions.contains(&JobAction::Stop), can_stop);
        assert!(actions.contains(&JobAction::Clone));
        assert!(actions.contains(&JobAction::ViewConfig));
    }

    #[test]
    fn format_duration_picks_largest_unit() {
        assert_eq!(format_duration(3_723_000), "1h 2m 3s");
        assert_eq!(format_duration(62_000), "1m 2s");
        assert_eq!(format_duration(999), "0s");
    }
}
