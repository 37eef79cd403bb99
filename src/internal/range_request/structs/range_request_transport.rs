//! 传输层能力：是否支持元数据探测在类型上显式区分，由探测逻辑按变体选择行为。

use std::fmt;
use std::sync::Arc;

use crate::internal::range_request::traits::{HeadInfoClient, RangeRequestClient};

/// 带能力标记的传输层。
#[derive(Clone)]
pub enum RangeRequestTransport {
    /// 支持元数据探测（HEAD），`head` 与 `client` 通常指向同一个对象
    WithHeadInfo {
        head: Arc<dyn HeadInfoClient>,
        client: Arc<dyn RangeRequestClient>,
    },
    /// 只支持范围请求，文件大小只能靠试探性请求获得
    RangeOnly(Arc<dyn RangeRequestClient>),
}

impl RangeRequestTransport {
    /// 包装一个同时支持 HEAD 与范围请求的客户端。
    pub fn with_head_info<C>(client: C) -> Self
    where
        C: HeadInfoClient + RangeRequestClient + 'static,
    {
        let client = Arc::new(client);
        Self::WithHeadInfo {
            head: client.clone(),
            client,
        }
    }

    /// 包装一个只支持范围请求的客户端。
    pub fn range_only<C>(client: C) -> Self
    where
        C: RangeRequestClient + 'static,
    {
        Self::RangeOnly(Arc::new(client))
    }

    /// 执行范围请求的客户端。
    pub fn client(&self) -> Arc<dyn RangeRequestClient> {
        match self {
            Self::WithHeadInfo { client, .. } => Arc::clone(client),
            Self::RangeOnly(client) => Arc::clone(client),
        }
    }
}

impl fmt::Debug for RangeRequestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WithHeadInfo { .. } => f.write_str("RangeRequestTransport::WithHeadInfo"),
            Self::RangeOnly(_) => f.write_str("RangeRequestTransport::RangeOnly"),
        }
    }
}
