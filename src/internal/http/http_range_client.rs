//! 基于 reqwest 的 HTTP 传输层：HEAD 探测 + `Range` GET，同时实现
//! [`HeadInfoClient`] 与 [`RangeRequestClient`]。

use async_trait::async_trait;
use futures_util::StreamExt;
use log::debug;
use reqwest::header::{
    ACCEPT_RANGES, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, HeaderMap, RANGE,
};
use reqwest::{Client, Method, StatusCode};
use url::Url;

use crate::internal::range_request::functions::parse_content_range;
use crate::internal::range_request::structs::{
    AbortSignal, ByteRange, ContentRange, HeadRequestInfo, RangeRequestError,
    RangeRequestResponse, RangeRequestTransport, ResponseBody,
};
use crate::internal::range_request::traits::{HeadInfoClient, RangeRequestClient};

use super::basic_auth::BasicAuth;

/// HTTP 范围请求客户端，一个实例对应一个远程资源。
#[derive(Debug, Clone)]
pub struct HttpRangeRequestClient {
    client: Client,
    url: Url,
    abort_signal: AbortSignal,
}

impl HttpRangeRequestClient {
    /// 使用默认 reqwest 客户端。
    pub fn new(url: &str) -> Result<Self, RangeRequestError> {
        Self::builder(url).build()
    }

    /// 使用调用方已配置好的 reqwest 客户端（代理、超时等由调用方决定）。
    pub fn from_client(client: Client, url: &str) -> Result<Self, RangeRequestError> {
        Ok(Self {
            client,
            url: parse_url(url)?,
            abort_signal: AbortSignal::new(),
        })
    }

    pub fn builder(url: &str) -> HttpRangeRequestClientBuilder {
        HttpRangeRequestClientBuilder {
            url: url.to_string(),
            auth: None,
            headers: HeaderMap::new(),
            abort_signal: None,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// 包装为支持 HEAD 探测的传输层。
    pub fn into_transport(self) -> RangeRequestTransport {
        RangeRequestTransport::with_head_info(self)
    }
}

/// 链式配置 HTTP 客户端。
#[derive(Debug)]
pub struct HttpRangeRequestClientBuilder {
    url: String,
    auth: Option<BasicAuth>,
    headers: HeaderMap,
    abort_signal: Option<AbortSignal>,
}

impl HttpRangeRequestClientBuilder {
    pub fn basic_auth(mut self, username: &str, password: &str) -> Self {
        self.auth = Some(BasicAuth::new(username, password));
        self
    }

    /// 附加默认请求头，每个请求都会携带。
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// 与 tokenizer 共用同一个取消信号，`abort()` 时正在读取的响应体也会停止。
    pub fn abort_signal(mut self, signal: AbortSignal) -> Self {
        self.abort_signal = Some(signal);
        self
    }

    pub fn build(self) -> Result<HttpRangeRequestClient, RangeRequestError> {
        let mut headers = self.headers;
        if let Some(auth) = &self.auth {
            auth.apply(&mut headers)?;
        }

        let client = Client::builder()
            .http1_only()
            .default_headers(headers)
            .build()?;

        Ok(HttpRangeRequestClient {
            client,
            url: parse_url(&self.url)?,
            abort_signal: self.abort_signal.unwrap_or_default(),
        })
    }
}

fn parse_url(url: &str) -> Result<Url, RangeRequestError> {
    if url.is_empty() {
        return Err(RangeRequestError::InvalidConfig("URL 为空".into()));
    }
    Url::parse(url).map_err(|e| RangeRequestError::InvalidConfig(e.to_string()))
}

/// 从响应头提取资源信息。
pub(crate) fn head_info_from_headers(headers: &HeaderMap, path: &str) -> HeadRequestInfo {
    let size = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let mime_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let accept_partial_requests = headers
        .get(ACCEPT_RANGES)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.split(',').any(|unit| unit.trim().eq_ignore_ascii_case("bytes")));

    HeadRequestInfo {
        size,
        mime_type,
        accept_partial_requests,
        path: Some(path.to_string()),
    }
}

/// 从响应头提取 Content-Range；头不存在时为 `None`，存在但无法解析时报错。
pub(crate) fn content_range_from_headers(
    headers: &HeaderMap,
) -> Result<Option<ContentRange>, RangeRequestError> {
    match headers.get(CONTENT_RANGE) {
        None => Ok(None),
        Some(value) => {
            let value = value.to_str().map_err(|_| {
                RangeRequestError::MalformedContentRange(format!("{value:?}"))
            })?;
            parse_content_range(value).map(Some)
        }
    }
}

#[async_trait]
impl HeadInfoClient for HttpRangeRequestClient {
    async fn get_head_info(&self) -> Result<HeadRequestInfo, RangeRequestError> {
        debug!("HEAD {}", self.url);
        let resp = self
            .abort_signal
            .until_aborted(async {
                self.client
                    .head(self.url.clone())
                    .send()
                    .await
                    .map_err(RangeRequestError::from)
            })
            .await?;

        if !resp.status().is_success() {
            return Err(RangeRequestError::HttpStatus(resp.status().as_u16()));
        }
        Ok(head_info_from_headers(resp.headers(), self.url.as_str()))
    }
}

#[async_trait]
impl RangeRequestClient for HttpRangeRequestClient {
    async fn get_response(
        &self,
        method: &str,
        range: Option<ByteRange>,
    ) -> Result<RangeRequestResponse, RangeRequestError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|e| RangeRequestError::InvalidConfig(e.to_string()))?;
        let mut request = self.client.request(method.clone(), self.url.clone());
        if let Some(range) = range {
            request = request.header(RANGE, range.to_header_value());
        }
        debug!("{method} {} range={range:?}", self.url);

        let resp = self
            .abort_signal
            .until_aborted(async { request.send().await.map_err(RangeRequestError::from) })
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RangeRequestError::HttpStatus(status.as_u16()));
        }

        let mut info = head_info_from_headers(resp.headers(), self.url.as_str());
        let content_range = if status == StatusCode::PARTIAL_CONTENT {
            let content_range = content_range_from_headers(resp.headers())?;
            // 206 的 Content-Length 只是本段长度，总大小以 Content-Range 为准
            info.size = content_range.and_then(|cr| cr.instance_length);
            info.accept_partial_requests = true;
            content_range
        } else {
            // 200：服务器忽略了 Range，返回的是整个文件
            None
        };

        let signal = self.abort_signal.clone();
        let stream = resp.bytes_stream().map(move |chunk| {
            if signal.is_aborted() {
                return Err(RangeRequestError::Cancelled);
            }
            chunk.map_err(RangeRequestError::Request)
        });

        Ok(RangeRequestResponse {
            info,
            content_range,
            body: ResponseBody::from_stream(stream),
        })
    }

    fn cancel(&self) {
        self.abort_signal.abort();
    }
}
