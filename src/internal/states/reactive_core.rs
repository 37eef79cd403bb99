//! # ReactiveProperty 响应式属性内核
//!
//! 基于 [`tokio::sync::watch`]：写入方 `update` 后所有监听者都会被唤醒，读取不阻塞。
//! 本模块不直接对外导出，通过 [`super::unlock_reactive`] 使用。

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

/// 响应式属性错误类型
#[derive(Debug, Error)]
pub enum ReactivePropertyError {
    /// 属性的所有持有者都已销毁，不会再有新值
    #[error("属性已被销毁")]
    Destroyed,
}

/// 响应式属性：可克隆，所有克隆共享同一个值。
#[derive(Debug, Clone)]
pub struct ReactiveProperty<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> ReactiveProperty<T>
where
    T: Clone + Send + Sync,
{
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(value);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// 替换为新值并通知监听者。没有监听者时同样生效。
    pub fn update(&self, new_value: T) {
        self.sender.send_replace(new_value);
    }

    /// 原地修改部分字段。
    pub fn update_field<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        self.sender.send_modify(updater);
    }

    /// 当前值的快照（会 clone）。
    pub fn get_current(&self) -> T {
        self.sender.borrow().clone()
    }

    /// 对当前值做只读计算，不 clone。
    pub fn map<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.sender.borrow())
    }

    /// 创建监听器，`changed().await` 等待下一次更新。
    pub fn watch(&self) -> PropertyWatcher<T> {
        PropertyWatcher {
            receiver: self.sender.subscribe(),
        }
    }
}

/// 属性监听器。
#[derive(Debug)]
pub struct PropertyWatcher<T> {
    receiver: watch::Receiver<T>,
}

impl<T> PropertyWatcher<T>
where
    T: Clone + Send + Sync,
{
    /// 等待值变化并返回新值；属性全部销毁后返回 `Destroyed`。
    pub async fn changed(&mut self) -> Result<T, ReactivePropertyError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| ReactivePropertyError::Destroyed)?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    /// 当前值的快照。
    pub fn borrow(&self) -> T {
        self.receiver.borrow().clone()
    }
}
