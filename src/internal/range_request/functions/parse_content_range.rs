use log::debug;

use crate::internal::range_request::structs::{ContentRange, RangeRequestError};

/// 解析 `Content-Range` 响应头，格式 `bytes <first>-<last>/<total 或 *>`，单位不区分大小写。
pub fn parse_content_range(value: &str) -> Result<ContentRange, RangeRequestError> {
    debug!("parse_content_range: {value:?}");
    let malformed = || RangeRequestError::MalformedContentRange(value.to_string());

    let trimmed = value.trim();
    let (unit, rest) = trimmed.split_once(char::is_whitespace).ok_or_else(malformed)?;
    if !unit.eq_ignore_ascii_case("bytes") {
        return Err(malformed());
    }

    let (span, total) = rest.trim_start().split_once('/').ok_or_else(malformed)?;
    let (first, last) = span.split_once('-').ok_or_else(malformed)?;

    let first_byte_position = parse_digits(first).ok_or_else(malformed)?;
    let last_byte_position = parse_digits(last).ok_or_else(malformed)?;
    if last_byte_position < first_byte_position {
        return Err(malformed());
    }

    let instance_length = match total {
        "*" => None,
        digits => Some(parse_digits(digits).ok_or_else(malformed)?),
    };

    Ok(ContentRange {
        first_byte_position,
        last_byte_position,
        instance_length,
    })
}

/// 只接受纯 ASCII 数字（`u64::from_str` 会接受前导 `+`）。
fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
