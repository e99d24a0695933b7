//! Small string helpers shared by the pipeline stages

/// Capitalise the first letter of every alphabetic run and lower-case the
/// rest ("1 samuel 2:8ABCD" -> "1 Samuel 2:8Abcd").
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// True when the last character is an ASCII digit
pub fn ends_with_digit(s: &str) -> bool {
    s.chars().next_back().is_some_and(|c| c.is_ascii_digit())
}
