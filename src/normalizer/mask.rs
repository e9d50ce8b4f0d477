/// Fragment text with string/char literals swapped for positional
/// placeholders, so structural rewrites can never touch literal content.
#[derive(Debug, Clone)]
pub struct MaskedText {
    pub text: String,
    pub literals: Vec<String>,
}

fn placeholder(index: usize) -> String {
    format!("__STR{}__", index)
}

/// Replace every string and character literal with a `__STR<i>__` placeholder.
///
/// The scanner tracks three states (outside, in a double-quoted literal, in a
/// single-quoted literal); a backslash always consumes exactly the next
/// character. An unterminated trailing literal is masked as if it were closed
/// at end of input, so downstream passes never see a half-open literal.
pub fn mask_literals(input: &str) -> MaskedText {
    let mut literals: Vec<String> = Vec::new();
    let mut out = String::with_capacity(input.len());
    let mut current = String::new();
    let mut in_string = false;
    let mut in_char = false;
    let mut escaped = false;

    for c in input.chars() {
        if in_string || in_char {
            current.push(c);
            if escaped {
                escaped = false;
                continue;
            }
            if c == '\\' {
                escaped = true;
            } else if in_string && c == '"' {
                in_string = false;
            } else if in_char && c == '\'' {
                in_char = false;
            }
            if !in_string && !in_char {
                out.push_str(&placeholder(literals.len()));
                literals.push(std::mem::take(&mut current));
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                current.push(c);
            }
            '\'' => {
                in_char = true;
                current.push(c);
            }
            _ => out.push(c),
        }
    }

    // Unterminated literal at end of input: close it implicitly
    if !current.is_empty() {
        out.push_str(&placeholder(literals.len()));
        literals.push(current);
    }

    MaskedText { text: out, literals }
}

/// Substitute the recorded literals back, in placeholder order. Each
/// placeholder is replaced at its first occurrence only, so literal content
/// that happens to look like a later placeholder survives intact.
pub fn unmask_literals(input: &str, literals: &[String]) -> String {
    let mut result = input.to_string();
    for (i, literal) in literals.iter().enumerate() {
        let token = placeholder(i);
        if let Some(pos) = result.find(&token) {
            result.replace_range(pos..pos + token.len(), literal);
        }
    }
    result
}
