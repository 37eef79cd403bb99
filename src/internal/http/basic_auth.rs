//! HTTP Basic 认证：把账号密码编码为默认请求头，供 [`super::http_range_client`] 建立客户端时使用。

use base64::Engine;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::internal::range_request::structs::RangeRequestError;

/// 账号密码。Debug 输出不包含密码。
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub(crate) password: String,
}

impl BasicAuth {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// `Authorization: Basic <base64(username:password)>`
    pub fn header_value(&self) -> Result<HeaderValue, RangeRequestError> {
        let token = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.username, self.password));
        let mut value = HeaderValue::from_str(&format!("Basic {token}"))
            .map_err(|e| RangeRequestError::InvalidConfig(e.to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// 写入默认请求头。
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<(), RangeRequestError> {
        headers.insert(AUTHORIZATION, self.header_value()?);
        Ok(())
    }
}

/// 防止 debug 泄漏密码
impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<hidden>")
            .finish()
    }
}
