//! Brace-block scanning for C initializer lists
//!
//! Finds every innermost `{ ... }` block (one that contains no nested brace)
//! and returns its body with comments removed. Outer blocks such as the
//! `data[N][M] = { ... }` wrapper are walked through but never returned.

use crate::error::{IconError, Result};

/// One innermost brace block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Text between the braces, comments stripped
    pub body: String,
    /// 1-based line of the opening brace
    pub line: usize,
}

struct Open {
    line: usize,
    nested: bool,
    body: String,
}

/// Extract all innermost brace blocks from `source`, in source order.
///
/// `//` and `/* */` comments are skipped, so braces inside them never open
/// or close a block.
///
/// # Examples
///
/// ```
/// use monoglyph::tokenizer::scan_blocks;
///
/// let blocks = scan_blocks("x[2][2] = {\n{1, 0}, // first\n{0, 1}\n};").unwrap();
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].body, "1, 0");
/// assert_eq!(blocks[1].line, 3);
/// ```
pub fn scan_blocks(source: &str) -> Result<Vec<Block>> {
    let mut blocks = Vec::new();
    let mut stack: Vec<Open> = Vec::new();
    let mut line = 1;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\n' => {
                line += 1;
                if let Some(top) = stack.last_mut() {
                    top.body.push(c);
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                // Line comment: drop everything up to (not including) the newline
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for inner in chars.by_ref() {
                    if inner == '\n' {
                        line += 1;
                    }
                    if prev == '*' && inner == '/' {
                        break;
                    }
                    prev = inner;
                }
            }
            '{' => {
                if let Some(top) = stack.last_mut() {
                    top.nested = true;
                }
                stack.push(Open { line, nested: false, body: String::new() });
            }
            '}' => {
                let open = stack.pop().ok_or_else(|| {
                    IconError::MalformedGlyph(format!("unmatched '}}' on line {}", line))
                })?;
                if !open.nested {
                    blocks.push(Block { body: open.body, line: open.line });
                }
            }
            _ => {
                if let Some(top) = stack.last_mut() {
                    top.body.push(c);
                }
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(IconError::MalformedGlyph(format!(
            "unterminated block opened on line {}",
            open.line
        )));
    }

    Ok(blocks)
}

/// Split a block body on `,` into trimmed tokens.
///
/// A single trailing separator is allowed, as in C initializer lists. Any
/// other empty token is kept so the caller can reject it.
pub fn split_tokens(body: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = body.split(',').map(str::trim).collect();
    if tokens.len() > 1 && tokens.last() == Some(&"") {
        tokens.pop();
    }
    tokens
}
