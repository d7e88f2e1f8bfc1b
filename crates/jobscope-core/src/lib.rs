//! jobscope-core
//!
//! Explains the state of a job: why it failed, why it stopped, or why it is
//! still waiting for resources.
//!
//! # モジュール構成
//! - **domain**: ジョブ状態レコード、表示用状態、ヒント、サマリー
//! - **app**: ヒント導出と自動リフレッシュ
//! - **ports**: 外部との境界（再読込コールバック）
//! - **config**: 表示設定（YAML + 環境変数）
//! - **error**: エラー型

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

pub use app::{AutoRefresh, HintPolicy, JobView, RefreshInterval, derive_hints};
pub use config::ViewConfig;
pub use domain::{HintReport, JobInfo, JobStatus, JobSummary};
pub use error::JobscopeError;
