//! App - アプリケーション層
//!
//! domain の型を使って、画面に出す情報を組み立てる。
//!
//! # 主要コンポーネント
//! - **derive_hints**: 失敗・停止・待機の理由をヒントとして導出
//! - **AutoRefresh**: 一定間隔で再読込コールバックを呼ぶ
//! - **JobView**: サマリー + ヒント + 診断メッセージ

pub mod hints;
pub mod refresh;
pub mod view;

pub use self::hints::{HintPolicy, derive_hints};
pub use self::refresh::{AutoRefresh, RefreshInterval};
pub use self::view::JobView;
