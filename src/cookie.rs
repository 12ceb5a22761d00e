//! 从 `Set-Cookie` 响应头中提取指定 cookie 的小工具。
//!
//! 登录状态藏在响应头而不是响应体里，这是远端协议的现实。
//! 每个提供商只关心一个 cookie 名，所以这里只做窄合同的
//! 片段匹配，不引入完整的 cookie jar。

/// 在一个（或多个拼接后的）`Set-Cookie` 头值中查找名为 `name` 的
/// cookie，返回它的值。
///
/// 按 `;` 和 `,` 切分片段，要求片段形如 `name=value`，
/// 取第一个命中的值。找不到时返回 `None`。
///
/// # 参数
/// * `header_value` - 原始的 `Set-Cookie` 头内容。
/// * `name` - 要查找的 cookie 名。
#[must_use]
pub fn extract(header_value: &str, name: &str) -> Option<String> {
    header_value
        .split([';', ','])
        .filter_map(|segment| segment.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_cookie() {
        let header = "qrsig=AbCdEf123; PATH=/; DOMAIN=ptlogin2.qq.com";
        assert_eq!(extract(header, "qrsig").as_deref(), Some("AbCdEf123"));
    }

    #[test]
    fn test_extract_from_joined_headers() {
        let header = "pt_guid_sig=xyz; PATH=/, qrsig=sig_value; PATH=/";
        assert_eq!(extract(header, "qrsig").as_deref(), Some("sig_value"));
        assert_eq!(extract(header, "pt_guid_sig").as_deref(), Some("xyz"));
    }

    #[test]
    fn test_extract_missing_cookie() {
        assert_eq!(extract("foo=bar; PATH=/", "qrsig"), None);
        assert_eq!(extract("", "qrsig"), None);
    }

    #[test]
    fn test_extract_first_occurrence_wins() {
        let header = "qrsig=first; qrsig=second";
        assert_eq!(extract(header, "qrsig").as_deref(), Some("first"));
    }

    #[test]
    fn test_extract_requires_exact_name() {
        let header = "xqrsig=nope; PATH=/";
        assert_eq!(extract(header, "qrsig"), None);
    }
}
