//! The five-stage placeholder substitution pipeline.
//!
//! Stage order is load-bearing: values are escaped once, at the point a
//! bare variable is displayed (stage 2), while function and filter
//! arguments see the raw context values and function/filter output is
//! inserted unescaped. Cleanup runs last so no placeholder syntax ever
//! reaches the final output.

use tracing::debug;

use veneer_core::{FunctionRegistry, RenderContext};

use crate::scan::{self, FilterSegment, Payload};

/// Placeholder name the shell template uses for the page body.
const CONTENT_SLOT: &str = "content";

/// Run every stage in order over `body` and return the final output text.
pub fn apply(
    body: &str,
    shell: Option<&str>,
    context: &RenderContext,
    registry: &FunctionRegistry,
) -> String {
    debug!(
        body_len = body.len(),
        entries = context.len(),
        shell = shell.is_some(),
        "applying placeholder pipeline"
    );
    let content = wrap_shell(shell, body);
    let content = substitute_variables(&content, context);
    let content = substitute_functions(&content, context, registry);
    let content = substitute_filters(&content, context, registry);
    strip_unresolved(&content)
}

/// Stage 1: splice the body into the shell's `{{ content }}` slot.
///
/// Only spans found in the shell are touched; the body lands as a literal,
/// so its own placeholders (including a literal `{{ content }}`) survive
/// for the later stages. An absent or empty shell leaves the body as-is.
pub fn wrap_shell(shell: Option<&str>, body: &str) -> String {
    let Some(shell) = shell.filter(|s| !s.is_empty()) else {
        return body.to_string();
    };
    replace_matching_spans(shell, |payload| {
        (payload == CONTENT_SLOT).then(|| body.to_string())
    })
}

/// Stage 2: replace `{{ name }}` spans for every context entry, walked in
/// insertion order. The payload must equal the key exactly (case-sensitive,
/// whitespace around the name tolerated). Values are escaped here and only
/// here.
pub fn substitute_variables(content: &str, context: &RenderContext) -> String {
    let mut current = content.to_string();
    for (name, value) in context.iter() {
        let display = value.render_as_html();
        current = replace_matching_spans(&current, |payload| {
            (payload == name).then(|| display.clone())
        });
    }
    current
}

/// Stage 3: evaluate `{{ name(args) }}` spans against registered
/// functions. An unknown name leaves the span untouched, still eligible
/// for cleanup.
pub fn substitute_functions(
    content: &str,
    context: &RenderContext,
    registry: &FunctionRegistry,
) -> String {
    replace_matching_spans(content, |payload| {
        let Payload::Call { name, args } = scan::classify(payload) else {
            return None;
        };
        let resolved = resolve_args(&args, context);
        registry.execute_function(name, &resolved)
    })
}

/// Stage 4: evaluate `{{ expr | seg | ... }}` pipes left to right. Each
/// bound filter is invoked with `[current, ...args]`; an unbound segment
/// passes the value through unchanged.
pub fn substitute_filters(
    content: &str,
    context: &RenderContext,
    registry: &FunctionRegistry,
) -> String {
    replace_matching_spans(content, |payload| {
        let Payload::Pipe { expr, segments } = scan::classify(payload) else {
            return None;
        };
        let mut current = resolve_token(expr, context);
        for segment in &segments {
            current = apply_segment(current, segment, context, registry);
        }
        Some(current)
    })
}

/// Stage 5: drop every remaining `{{ ... }}` span, one placeholder at a
/// time — text between neighbouring spans survives.
pub fn strip_unresolved(content: &str) -> String {
    replace_matching_spans(content, |_| Some(String::new()))
}

/// Walk every span in `content`, replacing those for which `resolve`
/// returns a value and copying the rest through untouched.
fn replace_matching_spans(
    content: &str,
    mut resolve: impl FnMut(&str) -> Option<String>,
) -> String {
    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;
    while let Some(span) = scan::next_span(content, cursor) {
        out.push_str(&content[cursor..span.start]);
        match resolve(span.payload(content)) {
            Some(replacement) => out.push_str(&replacement),
            None => out.push_str(&content[span.start..span.end]),
        }
        cursor = span.end;
    }
    out.push_str(&content[cursor..]);
    out
}

/// An argument token resolves to the raw (pre-escape) context value when
/// it names a context entry, else to the literal token text.
fn resolve_token(token: &str, context: &RenderContext) -> String {
    match context.get(token) {
        Some(value) => value.render_as_text(),
        None => token.to_string(),
    }
}

fn resolve_args(args: &[&str], context: &RenderContext) -> Vec<String> {
    args.iter().map(|token| resolve_token(token, context)).collect()
}

fn apply_segment(
    current: String,
    segment: &FilterSegment<'_>,
    context: &RenderContext,
    registry: &FunctionRegistry,
) -> String {
    let Some(filter) = registry.get_filter(segment.name) else {
        return current;
    };
    let mut call_args = Vec::with_capacity(segment.args.len() + 1);
    call_args.push(current);
    call_args.extend(segment.args.iter().map(|token| resolve_token(token, context)));
    filter(&call_args)
}
