/// 以單一空白字元切分一行。
///
/// 只認 `' '`，不認其他空白；開頭、結尾或連續的空白會產生空字串 token，並且保留。
pub fn tokenize(line: &str) -> impl Iterator<Item = &str> {
    line.split(' ')
}

/// 將文字切成行：`\n`、`\r\n` 與單獨的 `\r` 皆視為行結尾。
///
/// 結尾的換行不會產生額外的空行，空字串沒有任何行。
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(pos) => {
                lines.push(rest[..pos].to_string());
                let terminator_len = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + terminator_len..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple_sentence() {
        let tokens: Vec<&str> = tokenize("the cat sat on the mat").collect();
        assert_eq!(tokens, vec!["the", "cat", "sat", "on", "the", "mat"]);
    }

    #[test]
    fn test_tokenize_preserves_empty_tokens() {
        let tokens: Vec<&str> = tokenize("a  a").collect();
        assert_eq!(tokens, vec!["a", "", "a"]);

        let tokens: Vec<&str> = tokenize(" a ").collect();
        assert_eq!(tokens, vec!["", "a", ""]);
    }

    #[test]
    fn test_tokenize_only_splits_on_space() {
        let tokens: Vec<&str> = tokenize("a\tb c").collect();
        assert_eq!(tokens, vec!["a\tb", "c"]);
    }

    #[test]
    fn test_tokenize_empty_line_yields_one_empty_token() {
        let tokens: Vec<&str> = tokenize("").collect();
        assert_eq!(tokens, vec![""]);
    }

    #[test]
    fn test_split_lines_handles_all_terminators() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_split_lines_trailing_newline_and_empty_input() {
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("one\n"), vec!["one"]);
        assert_eq!(split_lines("\n"), vec![""]);
        assert_eq!(split_lines("one\n\ntwo"), vec!["one", "", "two"]);
    }
}
