/// Greedy word wrap against a caller-supplied width measure.
///
/// `text` is split on Unicode whitespace (newlines included, so runs of any whitespace collapse to
/// one separator). Tokens are appended to the current line while `measure(line + " " + token)`
/// stays within `max_width`. A token that does not fit starts a new line; a token wider than
/// `max_width` on its own still gets a line to itself and is never split.
pub fn wrap_text<M>(mut measure: M, text: &str, max_width: f32) -> Vec<String>
where
    M: FnMut(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for token in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(token);
            continue;
        }

        let mut candidate = String::with_capacity(current.len() + 1 + token.len());
        candidate.push_str(&current);
        candidate.push(' ');
        candidate.push_str(token);

        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut current, token.to_owned()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
