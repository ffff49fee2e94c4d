pub mod ip;
pub mod url_validator;

/// 生成随机关键字（小写字母与数字）
pub fn generate_keyword(length: usize) -> String {
    use std::iter;

    let chars = b"abcdefghijklmnopqrstuvwxyz0123456789";

    iter::repeat_with(|| chars[rand::random_range(0..chars.len())] as char)
        .take(length.max(1))
        .collect()
}

/// 只保留 ASCII 字母与数字
pub fn sanitize_keyword(keyword: &str) -> String {
    keyword.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// HTML 转义（`&`、`<`、`>`、`"`、`'`）
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_keyword() {
        let keyword = generate_keyword(6);
        assert_eq!(keyword.len(), 6);
        assert!(keyword.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_eq!(generate_keyword(0).len(), 1);
    }

    #[test]
    fn test_sanitize_keyword() {
        assert_eq!(sanitize_keyword("my-Link_01!"), "myLink01");
        assert_eq!(sanitize_keyword("../admin"), "admin");
        assert_eq!(sanitize_keyword("短链"), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
    }
}
