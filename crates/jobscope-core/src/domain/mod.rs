//! Domain model: job status records, humanized state, hints and summaries.

pub mod hint;
pub mod job;
pub mod state;
pub mod status;

pub use hint::{Hint, HintBody, HintReport, Severity};
pub use job::{JobAction, JobSummary, format_duration};
pub use state::HumanizedState;
pub use status::{
    ExecutionType, ExitMessages, ExitSpec, JobInfo, JobStatus, RawJobState, RetryDetails,
    RuntimeExitMessage,
};
