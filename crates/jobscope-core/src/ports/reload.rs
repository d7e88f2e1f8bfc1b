//! Reloader port - ジョブ情報の再取得
//!
//! AutoRefresh は tick ごとにこの trait を呼ぶだけで、
//! 取得先 (HTTP, ファイル, ...) は知らない。

use async_trait::async_trait;

use crate::error::JobscopeError;

/// Reloader は外部から渡される再読込コールバック
///
/// 呼び出しの重複防止は実装側の責務。
#[async_trait]
pub trait Reloader: Send + Sync {
    async fn reload(&self) -> Result<(), JobscopeError>;
}
