//! Minimal printf-style interpolation for translated templates
//!
//! Translators reorder arguments, so positional markers (`%2$s`) matter
//! more here than width or precision flags, which are not supported.

/// 支持 `%s`、`%d`、`%1$s`、`%2$d` 与 `%%`
///
/// 参数不足时对应位置输出为空；无法识别的 `%` 序列原样保留。
///
/// ```
/// use linkboard::i18n::sprintf;
/// assert_eq!(sprintf("%2$s, %1$s!", &["world", "Hello"]), "Hello, world!");
/// assert_eq!(sprintf("%d items (100%%)", &["5"]), "5 items (100%)");
/// ```
pub fn sprintf(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();
    let mut next_arg = 0usize;

    while let Some((_, ch)) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }

        match chars.peek().map(|&(_, c)| c) {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('s') | Some('d') => {
                chars.next();
                if let Some(arg) = args.get(next_arg) {
                    out.push_str(arg);
                }
                next_arg += 1;
            }
            Some(c) if c.is_ascii_digit() => {
                // 尝试解析 `%N$s`，失败时按字面输出
                let mut lookahead = chars.clone();
                let mut digits = String::new();
                while let Some(&(_, d)) = lookahead.peek() {
                    if d.is_ascii_digit() {
                        digits.push(d);
                        lookahead.next();
                    } else {
                        break;
                    }
                }
                let positional = matches!(lookahead.next(), Some((_, '$')))
                    && matches!(lookahead.next(), Some((_, 's' | 'd')));
                match digits.parse::<usize>() {
                    Ok(index) if positional && index > 0 => {
                        chars = lookahead;
                        if let Some(arg) = args.get(index - 1) {
                            out.push_str(arg);
                        }
                    }
                    _ => out.push('%'),
                }
            }
            _ => out.push('%'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_arguments() {
        assert_eq!(sprintf("%s has %d clicks", &["abc", "12"]), "abc has 12 clicks");
    }

    #[test]
    fn test_positional_arguments() {
        assert_eq!(
            sprintf("Links with %1$s than %2$s clicks.", &["more", "10"]),
            "Links with more than 10 clicks."
        );
        assert_eq!(sprintf("%2$s %1$s %2$s", &["a", "b"]), "b a b");
    }

    #[test]
    fn test_missing_arguments_render_empty() {
        assert_eq!(sprintf("[%s][%s]", &["x"]), "[x][]");
        assert_eq!(sprintf("[%3$s]", &["x"]), "[]");
    }

    #[test]
    fn test_literal_percent_sequences() {
        assert_eq!(sprintf("100%", &[]), "100%");
        assert_eq!(sprintf("%x %5", &[]), "%x %5");
        assert_eq!(sprintf("%%s", &["nope"]), "%s");
    }

    #[test]
    fn test_multibyte_template() {
        assert_eq!(sprintf("共 %d 条", &["3"]), "共 3 条");
    }
}
