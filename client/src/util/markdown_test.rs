use super::*;

#[test]
fn renders_common_markdown() {
    let html = render_markdown_html("**推荐** 使用 `拖拉机`\n\n- 一\n- 二");
    assert!(html.contains("<strong>推荐</strong>"));
    assert!(html.contains("<code>拖拉机</code>"));
    assert!(html.contains("<li>一</li>"));
}

#[test]
fn renders_tables() {
    let html = render_markdown_html("| 机型 | 马力 |\n|---|---|\n| A | 120 |\n");
    assert!(html.contains("<table>"));
    assert!(html.contains("<td>120</td>"));
}

#[test]
fn drops_raw_html() {
    let html = render_markdown_html("hello <script>alert(1)</script>\n\n<div>block</div>\n");
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<div>"));
    assert!(html.contains("hello"));
}

#[test]
fn mermaid_blocks_become_diagram_containers() {
    let html = render_markdown_html("```mermaid\ngraph TD\n  A-->B\n```\n");
    assert!(html.contains("<pre class=\"mermaid\">graph TD\n  A--&gt;B\n</pre>"));
    assert!(!html.contains("<code"));
}

#[test]
fn mermaid_source_cannot_inject_markup() {
    let html = render_markdown_html("```mermaid\ngraph TD\n  A[\"<img src=x onerror=alert(1)>\"] & B\n```\n");
    assert!(!html.contains("<img"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    assert!(html.contains(" &amp; B"));
    assert!(!html.contains("<code"));
}

#[test]
fn other_code_blocks_render_as_code() {
    let html = render_markdown_html("```rust\nlet x = 1 < 2;\n```\n");
    assert!(html.contains("<pre><code class=\"language-rust\">"));
    assert!(html.contains("1 &lt; 2"));
}
