/// 远程资源描述：总大小、MIME 类型、是否支持范围请求。
///
/// 由探测阶段产生一次，之后由 tokenizer 持有且不再修改。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadRequestInfo {
    /// 资源总大小（字节），未知时为 `None`
    pub size: Option<u64>,
    pub mime_type: Option<String>,
    /// 服务器是否接受范围请求
    pub accept_partial_requests: bool,
    /// 资源标识（如 URL），仅用于日志与调试
    pub path: Option<String>,
}
