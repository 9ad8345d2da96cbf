/// Word-wrap `text` to at most `width` characters per line.
///
/// Existing line breaks are kept (blank lines included). Words longer than
/// `width` are split across lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for raw in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in raw.split_whitespace() {
            let mut word = word;
            while word.chars().count() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let split = word
                    .char_indices()
                    .nth(width)
                    .map(|(idx, _)| idx)
                    .unwrap_or(word.len());
                lines.push(word[..split].to_string());
                word = &word[split..];
            }
            if word.is_empty() {
                continue;
            }

            let word_len = word.chars().count();
            if current_len > 0 && current_len + 1 + word_len > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }

        lines.push(current);
    }

    lines
}
