//! 资源探测：确定文件大小与是否支持范围请求，然后构建 tokenizer。
//!
//! 优先使用廉价的元数据探测（HEAD）；传输层不支持、没有返回大小或配置了
//! `avoid_head_requests` 时，改为发起一次试探性范围请求 `[0, initial_chunk_size - 1]`，
//! 从 Content-Range 中取得总大小。试探性请求拿到的数据直接放入新 tokenizer 的缓存。

use log::{debug, warn};

use crate::internal::chunked_data::structs::ByteSpan;
use crate::internal::range_request::functions::round_range;

use super::abort_signal::AbortSignal;
use super::byte_range::ByteRange;
use super::head_request_info::HeadRequestInfo;
use super::range_request_config::RangeRequestConfig;
use super::range_request_error::RangeRequestError;
use super::range_request_tokenizer::RangeRequestTokenizer;
use super::range_request_transport::RangeRequestTransport;

/// 探测结果：资源描述，以及试探性请求顺带拿到的数据。
#[derive(Debug)]
struct ProbeOutcome {
    info: HeadRequestInfo,
    initial_data: Option<ByteSpan>,
}

/// tokenizer 工厂。链式配置后调用 [`RangeRequestFactory::init_tokenizer`]。
#[derive(Debug)]
pub struct RangeRequestFactory {
    transport: RangeRequestTransport,
    config: RangeRequestConfig,
}

impl RangeRequestFactory {
    pub fn new(transport: RangeRequestTransport) -> Self {
        Self {
            transport,
            config: RangeRequestConfig::default(),
        }
    }

    /// 整体替换配置。
    pub fn with_config(mut self, config: RangeRequestConfig) -> Self {
        self.config = config;
        self
    }

    /// 跳过 HEAD 探测。
    pub fn avoid_head_requests(mut self, avoid: bool) -> Self {
        self.config.avoid_head_requests = avoid;
        self
    }

    /// 设置试探性请求大小（字节）
    pub fn initial_chunk_size(mut self, size: u64) -> Self {
        self.config.initial_chunk_size = size;
        self
    }

    /// 设置每次请求的最小字节数
    pub fn minimum_chunk_size(mut self, size: u64) -> Self {
        self.config.minimum_chunk_size = size;
        self
    }

    pub fn abort_signal(mut self, signal: AbortSignal) -> Self {
        self.config.abort_signal = Some(signal);
        self
    }

    pub fn config(&self) -> &RangeRequestConfig {
        &self.config
    }

    /// 探测资源并构建 tokenizer。服务器不支持范围请求时返回 `PartialFetchUnsupported`。
    pub async fn init_tokenizer(&self) -> Result<RangeRequestTokenizer, RangeRequestError> {
        let outcome = self.probe().await?;
        if !outcome.info.accept_partial_requests {
            return Err(RangeRequestError::PartialFetchUnsupported);
        }

        let tokenizer = RangeRequestTokenizer::new(
            self.transport.client(),
            outcome.info,
            self.config.minimum_chunk_size,
            Some(self.signal()),
        )?;

        Ok(match outcome.initial_data {
            Some(span) => tokenizer.with_cached_data(span.offset, &span.data),
            None => tokenizer,
        })
    }

    /// 仅获取资源描述，不构建 tokenizer。
    pub async fn get_head_request_info(&self) -> Result<HeadRequestInfo, RangeRequestError> {
        self.probe().await.map(|outcome| outcome.info)
    }

    fn signal(&self) -> AbortSignal {
        self.config.abort_signal.clone().unwrap_or_default()
    }

    async fn probe(&self) -> Result<ProbeOutcome, RangeRequestError> {
        if self.config.avoid_head_requests {
            return self.fetch_file_info_with_get_request().await;
        }
        self.fetch_file_info_with_head_request().await
    }

    async fn fetch_file_info_with_head_request(&self) -> Result<ProbeOutcome, RangeRequestError> {
        match &self.transport {
            RangeRequestTransport::WithHeadInfo { head, .. } => {
                debug!("fetch_file_info_with_head_request()");
                let info = self.signal().until_aborted(head.get_head_info()).await?;
                // 大小为 0 与未提供同样处理：部分服务器对 HEAD 返回 Content-Length: 0
                if let Some(size) = info.size.filter(|&size| size > 0) {
                    debug!(
                        "MIME-type={:?}, content-length={size}, accept-partial-requests={}",
                        info.mime_type, info.accept_partial_requests
                    );
                    return Ok(ProbeOutcome {
                        info,
                        initial_data: None,
                    });
                }
                debug!("Content-Length not provided by the server, fallback to GET requests");
            }
            RangeRequestTransport::RangeOnly(_) => {
                debug!("transport has no head capability, fallback to GET requests");
            }
        }
        self.fetch_file_info_with_get_request().await
    }

    async fn fetch_file_info_with_get_request(&self) -> Result<ProbeOutcome, RangeRequestError> {
        if self.config.initial_chunk_size == 0 {
            return Err(RangeRequestError::InvalidConfig(
                "initial_chunk_size 不能为 0".into(),
            ));
        }
        let range = round_range(
            ByteRange::new(0, self.config.initial_chunk_size - 1),
            self.config.minimum_chunk_size,
        );

        let signal = self.signal();
        let response = signal
            .until_aborted(self.transport.client().get_response("GET", Some(range)))
            .await?;

        let content_range = match response.content_range {
            Some(cr) => cr,
            None => {
                debug!("no content-range in response, server ignored the range request");
                return Err(RangeRequestError::PartialFetchUnsupported);
            }
        };
        debug!(
            "fetch_file_info_with_get_request response: contentRange=[{}-{}/{:?}]",
            content_range.first_byte_position,
            content_range.last_byte_position,
            content_range.instance_length
        );

        let size = content_range
            .instance_length
            .ok_or(RangeRequestError::UnknownFileSize)?;

        let initial_data = match response.body.collect(content_range.len(), &signal).await {
            Ok(data) if data.len() as u64 == content_range.len() => {
                Some(ByteSpan::new(content_range.first_byte_position, data))
            }
            Ok(data) => {
                warn!(
                    "probe body has {} bytes but content-range announces {}, not cached",
                    data.len(),
                    content_range.len()
                );
                None
            }
            Err(RangeRequestError::IncompleteResponse { expected, received }) => {
                warn!("probe body exceeds content-range ({received} > {expected}), not cached");
                None
            }
            Err(e) => return Err(e),
        };

        Ok(ProbeOutcome {
            info: HeadRequestInfo {
                size: Some(size),
                mime_type: response.info.mime_type,
                accept_partial_requests: true,
                path: response.info.path,
            },
            initial_data,
        })
    }
}
