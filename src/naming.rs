//! Entry names for the generated icon set
//!
//! Each entry needs a constant name and an accessor method name, matching the
//! `$data_name: $method_name = $data` arm of the icon-set macro.

use heck::ToSnakeCase;
use log::warn;
use std::collections::HashSet;

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try", "gen",
];

/// Names for one generated entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryName {
    /// Constant name, e.g. `ArrowLeft`
    pub data: String,
    /// Accessor method, e.g. `arrow_left`
    pub method: String,
}

/// Whether `name` is a plain (non-keyword) Rust identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') || name == "_" {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !KEYWORDS.contains(&name)
}

fn method_ident(snake: String) -> String {
    // These cannot be raw identifiers
    if matches!(snake.as_str(), "self" | "super" | "crate") {
        format!("{}_", snake)
    } else if KEYWORDS.contains(&snake.as_str()) {
        format!("r#{}", snake)
    } else {
        snake
    }
}

fn claim(base: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(base.clone()) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", base, n);
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Names for `count` glyphs.
///
/// Configured names are used in order and their methods are snake-cased; the
/// rest fall back to `Icon<i>` / `icon_<i>`. Collisions get a numeric suffix
/// so every identifier in the generated file is unique.
///
/// # Examples
///
/// ```
/// use monoglyph::naming::entry_names;
///
/// let configured = ["ArrowLeft", "HTTPServer"].map(String::from);
/// let names = entry_names(3, &configured);
/// assert_eq!(names[0].method, "arrow_left");
/// assert_eq!(names[1].method, "http_server");
/// assert_eq!(names[2].data, "Icon2");
/// ```
pub fn entry_names(count: usize, configured: &[String]) -> Vec<EntryName> {
    if configured.len() > count {
        warn!(
            "{} names configured but only {} glyphs found; ignoring {:?}",
            configured.len(),
            count,
            &configured[count..]
        );
    }

    let mut data_taken: HashSet<String> = configured.iter().take(count).cloned().collect();
    let mut method_taken = HashSet::new();

    (0..count)
        .map(|i| {
            let (data, method) = match configured.get(i) {
                Some(name) => (name.clone(), name.to_snake_case()),
                None => (claim(format!("Icon{}", i), &mut data_taken), format!("icon_{}", i)),
            };
            // Escape first so the suffix check sees the final identifier
            let method = claim(method_ident(method), &mut method_taken);
            EntryName { data, method }
        })
        .collect()
}
