// crates/cli/src/parsers.rs

/// Worker count. `0` means one worker per logical CPU.
pub fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid worker count: {s}"))?;
    if n == 0 {
        Ok(num_cpus::get().max(1))
    } else {
        Ok(n)
    }
}

/// A set of leading characters, given as one string (`":/"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSet(pub Vec<char>);

pub fn parse_char_set(s: &str) -> Result<CharSet, String> {
    let mut chars: Vec<char> = Vec::new();
    for c in s.chars() {
        if c.is_whitespace() {
            return Err("excluded characters must not contain whitespace".to_string());
        }
        if !chars.contains(&c) {
            chars.push(c);
        }
    }
    if chars.is_empty() {
        return Err("expected at least one character".to_string());
    }
    Ok(CharSet(chars))
}
