//! Marker comments.
//!
//! A marker is a comment whose text (leading whitespace ignored) starts with
//! `<prefix>:<word>`:
//!
//! ```text
//! //! capwrap:namespace http_wrap
//! // capwrap:target func:"NormalWrapFunc"
//! // capwrap:require
//! ```
//!
//! Anything after the word is a tag string in `key:"value"` form.

/// A recognised marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
    Namespace(&'a str),
    Target(Tag<'a>),
    Require,
}

/// Parses one comment text. Returns `None` when it is not a marker.
pub fn parse<'a>(text: &'a str, prefix: &str) -> Option<Directive<'a>> {
    let rest = text.trim_start().strip_prefix(prefix)?.strip_prefix(':')?;
    let (word, args) = match rest.find(char::is_whitespace) {
        Some(at) => (&rest[..at], rest[at..].trim()),
        None => (rest, ""),
    };

    match word {
        "namespace" => Some(Directive::Namespace(args.split_whitespace().next()?)),
        "target" => Some(Directive::Target(Tag(args))),
        "require" => Some(Directive::Require),
        other => {
            tracing::debug!(marker = other, "ignoring unknown marker");
            None
        }
    }
}

/// First target marker among `texts`, if any.
pub fn find_target<'a, I>(texts: I, prefix: &str) -> Option<Tag<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    texts.into_iter().find_map(|text| match parse(text, prefix)? {
        Directive::Target(tag) => Some(tag),
        _ => None,
    })
}

/// Whether any of `texts` is a require marker.
pub fn has_require<'a, I>(texts: I, prefix: &str) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    texts
        .into_iter()
        .any(|text| matches!(parse(text, prefix), Some(Directive::Require)))
}

// =============================================================================
// Tag
// =============================================================================

/// Space separated `key:"value"` pairs, values double-quoted with escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a>(pub &'a str);

impl Tag<'_> {
    /// Value of `key`; `None` when absent or when the tag is malformed before it.
    pub fn lookup(&self, key: &str) -> Option<String> {
        let mut rest = self.0;
        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                return None;
            }

            let name_len = rest
                .find(|c: char| c <= ' ' || c == ':' || c == '"' || c == '\u{7f}')
                .unwrap_or(rest.len());
            if name_len == 0 || !rest[name_len..].starts_with(":\"") {
                return None;
            }
            let name = &rest[..name_len];
            rest = &rest[name_len + 2..];

            let (value, tail) = unquote(rest)?;
            if name == key {
                return Some(value);
            }
            rest = tail;
        }
    }
}

/// Reads a quoted body up to the closing quote; returns the value and what follows.
fn unquote(s: &str) -> Option<(String, &str)> {
    let mut value = String::new();
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((value, &s[i + 1..])),
            '\\' => match chars.next()?.1 {
                'n' => value.push('\n'),
                't' => value.push('\t'),
                other => value.push(other),
            },
            c => value.push(c),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_markers() {
        assert_eq!(parse(" capwrap:require", "capwrap"), Some(Directive::Require));
        assert_eq!(
            parse(" capwrap:namespace testdata", "capwrap"),
            Some(Directive::Namespace("testdata"))
        );
        assert_eq!(
            parse("capwrap:target", "capwrap"),
            Some(Directive::Target(Tag("")))
        );
        assert_eq!(parse(" capwrap:targets", "capwrap"), None);
        assert_eq!(parse(" other:target", "capwrap"), None);
        assert_eq!(parse(" capwrap:namespace", "capwrap"), None);
    }

    #[test]
    fn tag_lookup() {
        let tag = Tag(r#"json:"x" func:"FuncNameWrapFunc""#);
        assert_eq!(tag.lookup("func").as_deref(), Some("FuncNameWrapFunc"));
        assert_eq!(tag.lookup("json").as_deref(), Some("x"));
        assert_eq!(tag.lookup("yaml"), None);

        assert_eq!(Tag("").lookup("func"), None);
        assert_eq!(Tag(r#"func:"unterminated"#).lookup("func"), None);
        assert_eq!(Tag(r#"func:"a\"b""#).lookup("func").as_deref(), Some("a\"b"));
    }

    #[test]
    fn find_first_target() {
        let texts = [" plain words", r#" capwrap:target func:"Made""#, " capwrap:target"];
        let tag = find_target(texts, "capwrap").unwrap();
        assert_eq!(tag.lookup("func").as_deref(), Some("Made"));
        assert!(!has_require(texts, "capwrap"));
        assert!(has_require([" capwrap:require"], "capwrap"));
    }
}
