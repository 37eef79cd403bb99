//! 取消信号：由调用方持有并转交给 tokenizer / 传输层，触发后所有进行中的请求视为失败。

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use super::range_request_error::RangeRequestError;

/// 可克隆的取消信号，所有克隆共享同一状态。
///
/// 基于 `watch` 通道：`abort()` 写入 `true`，`cancelled()` 等待该值出现。一旦触发不可复位。
#[derive(Debug, Clone)]
pub struct AbortSignal {
    sender: Arc<watch::Sender<bool>>,
}

impl Default for AbortSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl AbortSignal {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// 触发取消。重复调用无副作用。
    pub fn abort(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_aborted(&self) -> bool {
        *self.sender.borrow()
    }

    /// 挂起直到信号被触发；已触发时立即返回。
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        loop {
            let aborted = *receiver.borrow_and_update();
            if aborted {
                return;
            }
            // 发送端由 self 持有，通道不会关闭
            if receiver.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    /// 执行 `fut`，期间信号被触发则放弃它并返回 `Cancelled`。
    pub async fn until_aborted<F, T>(&self, fut: F) -> Result<T, RangeRequestError>
    where
        F: Future<Output = Result<T, RangeRequestError>>,
    {
        if self.is_aborted() {
            return Err(RangeRequestError::Cancelled);
        }
        tokio::select! {
            biased;

            _ = self.cancelled() => Err(RangeRequestError::Cancelled),
            result = fut => result,
        }
    }
}
