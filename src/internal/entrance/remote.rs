use crate::internal::range_request::structs::{
    RangeRequestConfig, RangeRequestError, RangeRequestFactory, RangeRequestTokenizer,
    RangeRequestTransport,
};

/// 本库主入口：由传输层与配置直接构建范围请求 tokenizer。
///
/// 等价于 `RangeRequestFactory::new(transport).with_config(config).init_tokenizer()`。
///
/// example:
/// ```rust,no_run
/// use range_tokenizer::make_tokenizer;
/// use range_tokenizer::http::HttpRangeRequestClient;
/// use range_tokenizer::range_request::RangeRequestConfig;
///
/// # async fn example() -> Result<(), range_tokenizer::range_request::RangeRequestError> {
/// let client = HttpRangeRequestClient::new("https://example.com/audio.flac")?;
/// let tokenizer = make_tokenizer(client.into_transport(), RangeRequestConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn make_tokenizer(
    transport: RangeRequestTransport,
    config: RangeRequestConfig,
) -> Result<RangeRequestTokenizer, RangeRequestError> {
    RangeRequestFactory::new(transport)
        .with_config(config)
        .init_tokenizer()
        .await
}
