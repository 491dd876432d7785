//! Scanner/parser for `{{ ... }}` placeholder spans.
//!
//! One dedicated scanner replaces chained pattern-replace passes: braces
//! are located first, then the payload is classified by the presence of
//! `|` (filter pipe) or a whole-payload call shape (function). Each span
//! closes at the first `}}` after its opening braces, so neighbouring
//! placeholders on one line are always matched independently.

/// Byte range of one `{{ ... }}` span, braces included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Offset of the opening `{{`.
    pub start: usize,
    /// Offset one past the closing `}}`.
    pub end: usize,
}

impl Span {
    /// Payload between the braces, with surrounding whitespace trimmed.
    pub fn payload<'a>(&self, content: &'a str) -> &'a str {
        content[self.start + 2..self.end - 2].trim()
    }
}

/// Locate the next span at or after byte offset `from`.
pub fn next_span(content: &str, from: usize) -> Option<Span> {
    let open = from + content[from..].find("{{")?;
    let close = open + 2 + content[open + 2..].find("}}")?;
    Some(Span { start: open, end: close + 2 })
}

/// One segment of a filter pipe: `name(arg, ...)` or a bare `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSegment<'a> {
    pub name: &'a str,
    pub args: Vec<&'a str>,
}

/// Parsed payload of one placeholder span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<'a> {
    /// Bare name, matched literally against context keys.
    Variable(&'a str),
    /// `name(arg, arg)` spanning the whole payload.
    Call { name: &'a str, args: Vec<&'a str> },
    /// `expr | seg | ...` — at least one pipe; `expr` holds no pipe itself.
    Pipe { expr: &'a str, segments: Vec<FilterSegment<'a>> },
}

/// Classify a trimmed payload against the three grammars.
///
/// A pipe wins whenever a `|` is present, so `{{ f(x) | g }}` is a filter
/// pipe whose expr is the literal text `f(x)`, not a function call.
pub fn classify(payload: &str) -> Payload<'_> {
    if let Some((expr, rest)) = payload.split_once('|') {
        let segments = rest.split('|').map(|seg| parse_segment(seg.trim())).collect();
        return Payload::Pipe { expr: expr.trim(), segments };
    }
    match call_parts(payload) {
        Some((name, args)) => Payload::Call { name, args },
        None => Payload::Variable(payload),
    }
}

/// Parse one pipe segment; text that fails the call shape is treated as a
/// bare filter name (an unknown name later passes the value through).
pub fn parse_segment(segment: &str) -> FilterSegment<'_> {
    match call_parts(segment) {
        Some((name, args)) => FilterSegment { name, args },
        None => FilterSegment { name: segment, args: Vec::new() },
    }
}

/// `name(args)` where `name` is `[A-Za-z0-9_]+`, the text ends at the
/// closing paren, and the argument text contains no `)`.
fn call_parts(text: &str) -> Option<(&str, Vec<&str>)> {
    let open = text.find('(')?;
    if open == 0 || !text.ends_with(')') {
        return None;
    }
    let name = &text[..open];
    if !is_identifier(name) {
        return None;
    }
    let inner = &text[open + 1..text.len() - 1];
    if inner.contains(')') {
        return None;
    }
    let args = if inner.trim().is_empty() {
        Vec::new()
    } else {
        inner.split(',').map(str::trim).collect()
    };
    Some((name, args))
}

fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
