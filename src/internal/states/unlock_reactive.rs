//! # UnlockReactiveProperty
//!
//! 轻量级响应式属性容器，读写都不阻塞，适合高频更新（如请求统计）。
//!
//! ```rust,no_run
//! use range_tokenizer::states::unlock_reactive::UnlockReactiveProperty;
//!
//! let prop = UnlockReactiveProperty::new(0u64);
//! prop.update(1);
//! prop.update_field(|v| *v += 1);
//! assert_eq!(prop.get_current(), 2);
//! ```

pub use super::reactive_core::{
    PropertyWatcher, ReactivePropertyError as UnlockReactivePropertyError,
};

pub type UnlockReactiveProperty<T> = super::reactive_core::ReactiveProperty<T>;
