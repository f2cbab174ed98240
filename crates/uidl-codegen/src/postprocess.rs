//! Text normalization applied to printed files.

use crate::pipeline::FileType;
use regex::{Captures, Regex};
use std::sync::OnceLock;

pub trait PostProcessor: Send + Sync {
    fn name(&self) -> &'static str;

    fn process(&self, file_type: FileType, code: String) -> String;
}

/// Decodes `\uXXXX` escapes in JavaScript back to literal characters,
/// including surrogate pairs. Lone surrogates and escaped backslashes are
/// left alone.
#[derive(Debug, Default)]
pub struct UnicodeUnescape;

fn escape_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\\\\|\\u([dD][89abAB][0-9a-fA-F]{2})\\u([dD][c-fC-F][0-9a-fA-F]{2})|\\u([0-9a-fA-F]{4})")
            .expect("escape pattern is valid")
    })
}

fn unit(captures: &Captures<'_>, group: usize) -> Option<u16> {
    captures
        .get(group)
        .and_then(|m| u16::from_str_radix(m.as_str(), 16).ok())
}

impl PostProcessor for UnicodeUnescape {
    fn name(&self) -> &'static str {
        "unicode-unescape"
    }

    fn process(&self, file_type: FileType, code: String) -> String {
        if file_type != FileType::Js || !code.contains("\\u") {
            return code;
        }
        escape_pattern()
            .replace_all(&code, |captures: &Captures<'_>| {
                let units = match (unit(captures, 1), unit(captures, 2), unit(captures, 3)) {
                    (Some(high), Some(low), _) => vec![high, low],
                    (_, _, Some(single)) => vec![single],
                    _ => return captures[0].to_string(),
                };
                match String::from_utf16(&units) {
                    Ok(decoded) => decoded,
                    Err(_) => captures[0].to_string(),
                }
            })
            .into_owned()
    }
}

/// Ends every file with exactly one newline.
#[derive(Debug, Default)]
pub struct TrailingNewline;

impl PostProcessor for TrailingNewline {
    fn name(&self) -> &'static str {
        "trailing-newline"
    }

    fn process(&self, _file_type: FileType, code: String) -> String {
        let mut code = code.trim_end().to_string();
        code.push('\n');
        code
    }
}
