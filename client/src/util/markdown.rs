//! Markdown rendering for model replies.
//!
//! SYSTEM CONTEXT
//! ==============
//! Model text is rendered to HTML and injected with `inner_html`. Raw HTML in
//! the source is dropped. Fenced `mermaid` blocks become `<pre class="mermaid">`
//! elements holding the escaped diagram source, which the mermaid script
//! (loaded by `index.html`) turns into SVG once [`render_diagrams`] runs.

#[cfg(test)]
#[path = "markdown_test.rs"]
mod markdown_test;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};

const MERMAID_LANG: &str = "mermaid";

pub fn render_markdown_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut events = Vec::new();
    let mut diagram: Option<String> = None;
    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(ref lang))) if lang.trim() == MERMAID_LANG => {
                diagram = Some(String::new());
            }
            Event::End(TagEnd::CodeBlock) if diagram.is_some() => {
                let source = diagram.take().unwrap_or_default();
                events.push(Event::Html("<pre class=\"mermaid\">".into()));
                events.push(Event::Text(source.into()));
                events.push(Event::Html("</pre>\n".into()));
            }
            Event::Text(text) if diagram.is_some() => {
                if let Some(buf) = diagram.as_mut() {
                    buf.push_str(&text);
                }
            }
            // Model output never gets to emit raw HTML.
            Event::Html(_) | Event::InlineHtml(_) => {}
            other => events.push(other),
        }
    }

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    out
}

/// Ask the page's mermaid instance to render pending `.mermaid` blocks.
pub fn render_diagrams() {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;

        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(mermaid) = js_sys::Reflect::get(&window, &"mermaid".into()) else {
            return;
        };
        if mermaid.is_undefined() {
            return;
        }
        let Ok(run) = js_sys::Reflect::get(&mermaid, &"run".into()) else {
            return;
        };
        if let Some(run) = run.dyn_ref::<js_sys::Function>() {
            if let Err(e) = run.call0(&mermaid) {
                log::warn!("mermaid render failed: {e:?}");
            }
        }
    }
}
