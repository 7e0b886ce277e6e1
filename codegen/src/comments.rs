//! Plain comment scanning and attachment.
//!
//! `syn` drops ordinary comments, so markers written as `// capwrap:...`
//! are recovered from the raw text. A comment group attaches to the syntax
//! node whose first token sits on the line right after the group ends;
//! a blank line, a line of code, or a trailing comment breaks the group.
//!
//! Doc comments (`///`, `//!`, `/** */`, `/*! */`) are skipped here: `syn`
//! keeps them as `#[doc]` attributes and the extractor reads them there.

use std::collections::BTreeMap;

/// One plain comment, text without its delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub start_line: usize,
    pub end_line: usize,
}

/// Consecutive leading comments with no blank line between them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentGroup {
    comments: Vec<Comment>,
}

impl CommentGroup {
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.comments.iter().map(|c| c.text.as_str())
    }

    fn end_line(&self) -> usize {
        self.comments.last().map_or(0, |c| c.end_line)
    }
}

/// Comment groups of one source unit, keyed by the line they attach to.
///
/// Lines are 1-based, matching `proc_macro2::LineColumn`.
#[derive(Debug, Default)]
pub struct CommentMap {
    groups: BTreeMap<usize, CommentGroup>,
}

impl CommentMap {
    pub fn scan(source: &str) -> Self {
        let mut groups: Vec<CommentGroup> = Vec::new();
        for comment in Scanner::new(source).run() {
            match groups.last_mut() {
                Some(group) if comment.start_line <= group.end_line() + 1 => {
                    group.comments.push(comment)
                }
                _ => groups.push(CommentGroup {
                    comments: vec![comment],
                }),
            }
        }

        let groups = groups
            .into_iter()
            .map(|group| (group.end_line() + 1, group))
            .collect();
        CommentMap { groups }
    }

    /// Claims the group attached to a node starting on `line`.
    ///
    /// A group attaches at most once: when several nodes share the line,
    /// the first one asking (in source order) gets it.
    pub fn take(&mut self, line: usize) -> Option<CommentGroup> {
        self.groups.remove(&line)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

// =============================================================================
// Scanner
// =============================================================================

struct Scanner<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    source: &'a str,
    line: usize,
    /// Code seen on the current line; comments after it are trailing.
    line_has_code: bool,
    prev: Option<char>,
    before: Option<char>,
    out: Vec<Comment>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        Scanner {
            chars: source.char_indices().peekable(),
            source,
            line: 1,
            line_has_code: false,
            prev: None,
            before: None,
            out: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Comment> {
        while let Some((at, c)) = self.bump() {
            match c {
                '\n' => {}
                c if c.is_whitespace() => {}
                '/' if self.peek() == Some('/') => self.line_comment(at),
                '/' if self.peek() == Some('*') => self.block_comment(at),
                '"' => {
                    self.code();
                    self.quoted('"');
                }
                '\'' => {
                    self.code();
                    self.char_or_lifetime();
                }
                'r' | 'b' | 'c' if !self.prev_is_ident() && self.raw_string_ahead(at) => {
                    self.code();
                    self.raw_string();
                }
                _ => self.code(),
            }
        }
        self.out
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if let Some((_, c)) = next {
            if self.prev == Some('\n') {
                self.line += 1;
                self.line_has_code = false;
            }
            self.before = self.prev;
            self.prev = Some(c);
        }
        next
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn code(&mut self) {
        self.line_has_code = true;
    }

    fn prev_is_ident(&self) -> bool {
        self.before.is_some_and(|c| c.is_alphanumeric() || c == '_')
    }

    fn line_comment(&mut self, at: usize) {
        let leading = !self.line_has_code;
        let line = self.line;
        let mut end = self.source.len();
        while let Some(&(i, c)) = self.chars.peek() {
            if c == '\n' {
                end = i;
                break;
            }
            self.bump();
        }

        let raw = &self.source[at..end];
        let is_doc = (raw.starts_with("///") && !raw.starts_with("////")) || raw.starts_with("//!");
        if leading && !is_doc {
            self.out.push(Comment {
                text: raw[2..].trim_end_matches('\r').to_string(),
                start_line: line,
                end_line: line,
            });
        } else {
            self.code();
        }
    }

    fn block_comment(&mut self, at: usize) {
        let leading = !self.line_has_code;
        let start_line = self.line;
        self.bump(); // '*'

        let mut depth = 1usize;
        let mut end = self.source.len();
        while let Some((i, c)) = self.bump() {
            match c {
                '*' if self.peek() == Some('/') => {
                    self.bump();
                    depth -= 1;
                    if depth == 0 {
                        end = i + 2;
                        break;
                    }
                }
                '/' if self.peek() == Some('*') => {
                    self.bump();
                    depth += 1;
                }
                _ => {}
            }
        }

        let raw = &self.source[at..end];
        let is_doc = raw.starts_with("/*!")
            || (raw.starts_with("/**") && !raw.starts_with("/***") && raw != "/**/");
        if leading && !is_doc {
            let inner = raw
                .strip_prefix("/*")
                .and_then(|s| s.strip_suffix("*/"))
                .unwrap_or(&raw[2..]);
            self.out.push(Comment {
                text: inner.to_string(),
                start_line,
                end_line: self.line,
            });
        } else {
            self.code();
        }
    }

    /// Skips a `"..."` or `'...'` body with escapes; the opening quote is consumed.
    fn quoted(&mut self, close: char) {
        while let Some((_, c)) = self.bump() {
            match c {
                '\\' => {
                    self.bump();
                }
                c if c == close => break,
                _ => {}
            }
        }
    }

    fn char_or_lifetime(&mut self) {
        let mut ahead = self.chars.clone();
        match (ahead.next(), ahead.next()) {
            (Some((_, '\\')), _) => self.quoted('\''),
            (Some(_), Some((_, '\''))) => {
                self.bump();
                self.bump();
            }
            // lifetime or label: the identifier is ordinary code
            _ => {}
        }
    }

    /// `r"`, `r#"`, `br"`, `cr#"` ... starting at the current prefix character.
    fn raw_string_ahead(&self, at: usize) -> bool {
        let rest = &self.source[at..];
        let rest = rest
            .strip_prefix("br")
            .or_else(|| rest.strip_prefix("cr"))
            .or_else(|| rest.strip_prefix('r'));
        match rest {
            Some(tail) => tail.trim_start_matches('#').starts_with('"'),
            None => false,
        }
    }

    fn raw_string(&mut self) {
        if self.prev != Some('r') {
            self.bump(); // 'r' after 'b' / 'c'
        }
        let mut hashes = 0usize;
        while self.peek() == Some('#') {
            self.bump();
            hashes += 1;
        }
        self.bump(); // opening quote

        while let Some((_, c)) = self.bump() {
            if c != '"' {
                continue;
            }
            let mut ahead = self.chars.clone();
            if (0..hashes).all(|_| matches!(ahead.next(), Some((_, '#')))) {
                for _ in 0..hashes {
                    self.bump();
                }
                break;
            }
        }
    }
}
