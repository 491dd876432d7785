//! End-to-end placeholder scenarios through a full [`Renderer`].

use std::fs;
use std::path::PathBuf;

use chrono::{Datelike, Utc};
use rstest::rstest;
use tempfile::TempDir;
use veneer_core::RenderContext;
use veneer_renderer::{PageStatus, Renderer, RendererOptions};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write_page(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).expect("write page");
    path
}

fn renderer_in(dir: &TempDir) -> Renderer {
    Renderer::new(RendererOptions {
        root_path: Some(dir.path().to_path_buf()),
        ..RendererOptions::default()
    })
}

fn render_body(renderer: &Renderer, path: &PathBuf, data: RenderContext) -> String {
    let page = renderer.render(path, data, RenderContext::new()).expect("render");
    assert_eq!(page.status, PageStatus::Ok);
    page.body
}

// ---------------------------------------------------------------------------
// 1. Variables
// ---------------------------------------------------------------------------

#[test]
fn string_variable_is_escaped_once() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_page(&dir, "page.html", "<p>{{ message }}</p>");
    let renderer = renderer_in(&dir);

    let mut data = RenderContext::new();
    data.insert("message", "<strong>Hello, World!</strong>");
    let body = render_body(&renderer, &path, data);
    assert_eq!(body, "<p>&lt;strong&gt;Hello, World!&lt;/strong&gt;</p>");
}

#[test]
fn title_and_sequence_join() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_page(&dir, "page.html", "{{ title }}: {{ items }}");
    let renderer = renderer_in(&dir);

    let mut data = RenderContext::new();
    data.insert("title", "Hi");
    data.insert("items", vec!["a", "b"]);
    assert_eq!(render_body(&renderer, &path, data), "Hi: a<br>b");
}

#[test]
fn lang_and_title_defaults_merge_non_destructively() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_page(&dir, "page.html", "{{ lang }}/{{ title }}");
    let renderer = Renderer::new(RendererOptions {
        lang: Some("en".to_owned()),
        default_title: Some("My Site".to_owned()),
        root_path: Some(dir.path().to_path_buf()),
        ..RendererOptions::default()
    });

    assert_eq!(render_body(&renderer, &path, RenderContext::new()), "en/My Site");

    let mut data = RenderContext::new();
    data.insert("title", "Override");
    assert_eq!(render_body(&renderer, &path, data), "en/Override");
}

// ---------------------------------------------------------------------------
// 2. Functions
// ---------------------------------------------------------------------------

#[test]
fn registered_function_resolves_context_argument() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_page(&dir, "page.html", "{{ upper(name) }}");
    let mut renderer = renderer_in(&dir);
    renderer.register_function("upper", |args: &[String]| {
        args.first().map(|s| s.to_uppercase()).unwrap_or_default()
    });

    let mut data = RenderContext::new();
    data.insert("name", "bob");
    assert_eq!(render_body(&renderer, &path, data), "BOB");
}

#[test]
fn unregistered_function_is_stripped_entirely() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_page(&dir, "page.html", "{{ missingFn(x) }}");
    let renderer = renderer_in(&dir);

    assert_eq!(render_body(&renderer, &path, RenderContext::new()), "");
}

#[test]
fn current_year_builtin_renders_the_clock_year() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_page(&dir, "page.html", "© {{ currentYear() }}");
    let renderer = renderer_in(&dir);

    let body = render_body(&renderer, &path, RenderContext::new());
    let year: i32 = body.trim_start_matches("© ").parse().expect("year integer");
    assert_eq!(year, Utc::now().year());
}

#[test]
fn current_year_can_be_overridden_for_determinism() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_page(&dir, "page.html", "© {{ currentYear() }}");
    let mut renderer = renderer_in(&dir);
    renderer.register_function("currentYear", |_| "2001".to_owned());

    assert_eq!(render_body(&renderer, &path, RenderContext::new()), "© 2001");
}

// ---------------------------------------------------------------------------
// 3. Filters
// ---------------------------------------------------------------------------

#[test]
fn filter_chain_applies_left_to_right() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_page(&dir, "page.html", "{{ x | f | g }}");
    let mut renderer = renderer_in(&dir);
    renderer.register_filter("f", |args: &[String]| {
        format!("f({})", args.first().cloned().unwrap_or_default())
    });
    renderer.register_filter("g", |args: &[String]| {
        format!("g({})", args.first().cloned().unwrap_or_default())
    });

    let mut data = RenderContext::new();
    data.insert("x", "v");
    assert_eq!(render_body(&renderer, &path, data), "g(f(v))");
}

#[test]
fn raw_filter_emits_markup_unescaped() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_page(&dir, "page.html", "{{ html | raw }}");
    let renderer = renderer_in(&dir);

    let mut data = RenderContext::new();
    data.insert("html", "<em>kept</em>");
    assert_eq!(render_body(&renderer, &path, data), "<em>kept</em>");
}

#[test]
fn filter_with_argument_from_context() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_page(&dir, "page.html", "{{ name | suffix(punct) }}");
    let mut renderer = renderer_in(&dir);
    renderer.register_filter("suffix", |args: &[String]| {
        let mut parts = args.iter();
        let value = parts.next().cloned().unwrap_or_default();
        let tail = parts.next().cloned().unwrap_or_default();
        format!("{value}{tail}")
    });

    let mut data = RenderContext::new();
    data.insert("name", "bob");
    data.insert("punct", "!");
    assert_eq!(render_body(&renderer, &path, data), "bob!");
}

// ---------------------------------------------------------------------------
// 4. Shell wrapping and cleanup
// ---------------------------------------------------------------------------

#[test]
fn shell_wraps_body_and_resolves_shared_placeholders() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_page(&dir, "page.html", "<p>hi</p>");
    let renderer = Renderer::new(RendererOptions {
        default_html: Some(
            "<html lang=\"{{ lang }}\"><title>{{ title }}</title>{{ content }}</html>".to_owned(),
        ),
        lang: Some("en".to_owned()),
        root_path: Some(dir.path().to_path_buf()),
        ..RendererOptions::default()
    });

    let body = render_body(&renderer, &path, RenderContext::new());
    assert_eq!(body, "<html lang=\"en\"><title>Document</title><p>hi</p></html>");
}

#[rstest]
#[case("unknown_variable", "pre {{ nothing }} post", "pre  post")]
#[case("malformed_payload", "pre {{ ?! % }} post", "pre  post")]
#[case("two_spans_one_line", "a {{ x }} b {{ y }} c", "a  b  c")]
fn unresolved_placeholders_are_stripped(
    #[case] label: &str,
    #[case] template: &str,
    #[case] expected: &str,
) {
    let dir = TempDir::new().expect("tempdir");
    let path = write_page(&dir, "page.html", template);
    let renderer = renderer_in(&dir);

    let body = render_body(&renderer, &path, RenderContext::new());
    assert_eq!(body, expected, "[{label}]");
    assert!(!body.contains("{{"), "[{label}] braces must not survive");
    assert!(!body.contains("}}"), "[{label}] braces must not survive");
}
