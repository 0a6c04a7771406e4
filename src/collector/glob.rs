//! Glob patterns for selecting content documents.
//!
//! Patterns are translated once into an anchored [`Regex`]:
//!
//! | Glob     | Matches                                   |
//! |----------|-------------------------------------------|
//! | `*`      | any run of characters except `/`          |
//! | `**/`    | zero or more whole path segments          |
//! | `**`     | anything, including `/`                   |
//! | `?`      | one character except `/`                  |
//! | `[a-z]`  | character class (`[!a-z]` negates)        |
//! | `{a,b}`  | alternation, may nest                     |
//! | `\*`     | literal `*`                               |

use crate::feed::FeedError;
use regex::Regex;
use std::fmt;

/// A compiled glob pattern, matched against `/`-separated relative paths.
#[derive(Clone)]
pub struct Glob {
    pattern: String,
    regex: Regex,
}

impl Glob {
    /// Compile a glob pattern. A leading `./` is ignored.
    pub fn new(pattern: &str) -> Result<Self, FeedError> {
        let invalid = |reason: String| {
            FeedError::Configuration(format!("invalid pattern `{pattern}`: {reason}"))
        };

        let mut trimmed = pattern.trim();
        while let Some(rest) = trimmed.strip_prefix("./") {
            trimmed = rest;
        }
        if trimmed.is_empty() {
            return Err(invalid("pattern is empty".into()));
        }

        let source = translate(trimmed).map_err(invalid)?;
        let regex = Regex::new(&source).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Check a relative path such as `blog/2024/post.mdx`.
    pub fn is_match(&self, relative: &str) -> bool {
        self.regex.is_match(relative)
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Debug for Glob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Glob").field(&self.pattern).finish()
    }
}

/// Translate glob syntax into regex source anchored at both ends.
fn translate(glob: &str) -> Result<String, String> {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::with_capacity(glob.len() * 2 + 2);
    let mut groups = 0usize;
    let mut i = 0;

    out.push('^');
    while i < chars.len() {
        match chars[i] {
            '*' => {
                let start = i;
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
                if i - start == 1 {
                    out.push_str("[^/]*");
                    continue;
                }
                // `**/` spans whole segments only when it starts a segment
                let at_segment_start = start == 0 || chars[start - 1] == '/';
                if at_segment_start && chars.get(i) == Some(&'/') {
                    out.push_str("(?:[^/]*/)*");
                    i += 1;
                } else {
                    out.push_str(".*");
                }
                continue;
            }
            '?' => out.push_str("[^/]"),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    push_class(&mut out, &chars[i + 1..end]);
                    i = end;
                }
                None => out.push_str(r"\["),
            },
            '{' => {
                groups += 1;
                out.push_str("(?:");
            }
            '}' if groups > 0 => {
                groups -= 1;
                out.push(')');
            }
            ',' if groups > 0 => out.push('|'),
            '\\' => {
                i += 1;
                let Some(&escaped) = chars.get(i) else {
                    return Err("dangling `\\` at end of pattern".into());
                };
                out.push_str(&regex::escape(escaped.encode_utf8(&mut [0; 4])));
            }
            c => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
        i += 1;
    }

    if groups > 0 {
        return Err("unclosed `{`".into());
    }
    out.push('$');
    Ok(out)
}

/// Index of the `]` closing the class opened at `open`.
///
/// A `]` right after `[` or `[!` is a literal member.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut j = open + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    (j..chars.len()).find(|&k| chars[k] == ']')
}

fn push_class(out: &mut String, body: &[char]) {
    let (negated, body) = match body.split_first() {
        Some(('!', rest)) => (true, rest),
        _ => (false, body),
    };

    out.push('[');
    if negated {
        out.push('^');
    }
    for &c in body {
        if matches!(c, '\\' | '[' | ']' | '^' | '&' | '~') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(']');
}
