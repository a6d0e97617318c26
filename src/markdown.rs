//! Markdown to HTML with the post stylesheet's classes applied to each block.

use maud::html;
use pulldown_cmark::{html, Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

fn heading_class(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "text-3xl font-bold mt-8 mb-4 text-base-content",
        HeadingLevel::H2 => "text-2xl font-bold mt-6 mb-3 text-base-content",
        HeadingLevel::H3 => "text-xl font-bold mt-4 mb-2 text-base-content",
        HeadingLevel::H4 => "text-lg font-bold mt-3 mb-2 text-base-content",
        HeadingLevel::H5 => "text-base font-bold mt-2 mb-1 text-base-content",
        HeadingLevel::H6 => "text-sm font-bold mt-2 mb-1 text-base-content",
    }
}

pub(crate) fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_MATH);
    options
}

pub(crate) fn render(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options()).filter_map(gen_event_restyler());
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

struct PendingImage {
    src: String,
    title: String,
    alt: String,
}

#[derive(Default)]
struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell: usize,
}

/// Rewrites block openings into classed HTML. Code blocks and images are
/// buffered until their end event and emitted whole.
fn gen_event_restyler<'a>() -> impl FnMut(Event<'a>) -> Option<Event<'a>> {
    let mut code: Option<(Option<String>, String)> = None;
    let mut image: Option<PendingImage> = None;
    let mut table = TableState::default();

    move |event: Event<'a>| -> Option<Event<'a>> {
        if let Some((_, buf)) = code.as_mut() {
            match event {
                Event::Text(t) => buf.push_str(&t),
                Event::End(TagEnd::CodeBlock) => {
                    let (lang, buf) = code.take()?;
                    return Some(Event::Html(render_code_block(lang.as_deref(), &buf).into()));
                }
                _ => {}
            }
            return None;
        }
        if let Some(img) = image.as_mut() {
            match event {
                Event::Text(t) | Event::Code(t) => img.alt.push_str(&t),
                Event::End(TagEnd::Image) => {
                    let img = image.take()?;
                    return Some(Event::Html(render_figure(&img).into()));
                }
                _ => {}
            }
            return None;
        }

        let html = match event {
            Event::Start(Tag::Heading { level, .. }) => {
                format!(r#"<{level} class="{}">"#, heading_class(level))
            }
            Event::Start(Tag::Paragraph) => {
                r#"<p class="mb-4 text-lg text-base-content leading-relaxed">"#.to_string()
            }
            Event::Start(Tag::List(None)) => {
                r#"<ul class="list-disc list-inside mb-4 ml-4 text-lg text-base-content">"#
                    .to_string()
            }
            Event::Start(Tag::List(Some(start))) => {
                let start_attr = if start == 1 {
                    String::new()
                } else {
                    format!(r#" start="{start}""#)
                };
                format!(
                    r#"<ol class="list-decimal list-inside mb-4 ml-4 text-lg text-base-content"{start_attr}>"#
                )
            }
            Event::Start(Tag::Item) => r#"<li class="mb-1">"#.to_string(),
            Event::Start(Tag::BlockQuote(_)) => {
                r#"<blockquote class="border-l-4 border-primary pl-4 my-4 italic text-base-content/80">"#
                    .to_string()
            }
            Event::Start(Tag::Link {
                dest_url, title, ..
            }) => {
                let title_attr = if title.is_empty() {
                    String::new()
                } else {
                    format!(r#" title="{}""#, escape_html(&title))
                };
                format!(
                    r#"<a href="{}"{title_attr} class="text-primary hover:underline">"#,
                    escape_html(&dest_url)
                )
            }
            Event::Start(Tag::Strong) => {
                r#"<strong class="font-bold text-base-content">"#.to_string()
            }
            Event::Start(Tag::Emphasis) => r#"<em class="italic text-base-content">"#.to_string(),
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split(|c: char| c.is_whitespace() || c == ',')
                        .next()
                        .filter(|l| !l.is_empty())
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                };
                code = Some((lang, String::new()));
                return None;
            }
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => {
                image = Some(PendingImage {
                    src: dest_url.to_string(),
                    title: title.to_string(),
                    alt: String::new(),
                });
                return None;
            }
            Event::Start(Tag::Table(alignments)) => {
                table = TableState {
                    alignments,
                    ..Default::default()
                };
                r#"<div class="overflow-x-auto mb-4"><table class="table table-zebra w-full">"#
                    .to_string()
            }
            Event::Start(Tag::TableHead) => {
                table.in_head = true;
                table.cell = 0;
                "<thead><tr>".to_string()
            }
            Event::End(TagEnd::TableHead) => {
                table.in_head = false;
                "</tr></thead><tbody>".to_string()
            }
            Event::Start(Tag::TableRow) => {
                table.cell = 0;
                "<tr>".to_string()
            }
            Event::End(TagEnd::TableRow) => "</tr>".to_string(),
            Event::Start(Tag::TableCell) => {
                let style = match table.alignments.get(table.cell) {
                    Some(Alignment::Left) => r#" style="text-align: left""#,
                    Some(Alignment::Center) => r#" style="text-align: center""#,
                    Some(Alignment::Right) => r#" style="text-align: right""#,
                    _ => "",
                };
                if table.in_head {
                    format!(r#"<th class="text-base-content font-bold"{style}>"#)
                } else {
                    format!(r#"<td class="text-base-content"{style}>"#)
                }
            }
            Event::End(TagEnd::TableCell) => {
                table.cell += 1;
                let close = if table.in_head { "</th>" } else { "</td>" };
                close.to_string()
            }
            Event::End(TagEnd::Table) => "</tbody></table></div>".to_string(),
            Event::Code(text) => html! {
                code class="bg-base-300 px-1 py-0.5 rounded text-sm font-mono text-base-content" { (&*text) }
            }
            .into_string(),
            Event::InlineMath(text) => html! {
                span.math.math-inline { "\\(" (&*text) "\\)" }
            }
            .into_string(),
            Event::DisplayMath(text) => html! {
                span.math.math-display { "\\[" (&*text) "\\]" }
            }
            .into_string(),
            Event::Rule => r#"<hr class="border-base-300 my-8" />"#.to_string(),
            _ => return Some(event),
        };
        Some(Event::Html(html.into()))
    }
}

fn render_code_block(lang: Option<&str>, content: &str) -> String {
    let content = content.strip_suffix('\n').unwrap_or(content);
    html! {
        pre class="bg-base-200 rounded-lg overflow-x-auto mb-4" {
            code class=[lang.map(|l| format!("language-{l}"))] { (content) }
        }
    }
    .into_string()
}

fn render_figure(img: &PendingImage) -> String {
    let caption = if img.title.is_empty() { &img.alt } else { &img.title };
    html! {
        figure class="my-4" {
            img class="max-w-full h-auto rounded-lg" src=(img.src) alt=(img.alt)
                title=[(!img.title.is_empty()).then_some(&img.title)];
            @if !caption.is_empty() {
                figcaption class="text-sm text-center text-base-content/60 mt-2" { (caption) }
            }
        }
    }
    .into_string()
}

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_headings_all_levels() {
        let out = render("# one\n\n###### six");
        assert!(out.contains(r#"<h1 class="text-3xl font-bold mt-8 mb-4 text-base-content">one</h1>"#));
        assert!(out.contains(r#"<h6 class="text-sm font-bold mt-2 mb-1 text-base-content">six</h6>"#));
    }

    #[test]
    fn test_paragraph_and_emphasis() {
        let out = render("some *soft* and **bold** text");
        assert!(out.starts_with(r#"<p class="mb-4 text-lg text-base-content leading-relaxed">"#));
        assert!(out.contains(r#"<em class="italic text-base-content">soft</em>"#));
        assert!(out.contains(r#"<strong class="font-bold text-base-content">bold</strong>"#));
    }

    #[test]
    fn test_lists() {
        let out = render("- a\n- b\n\n3. c\n4. d");
        assert!(out.contains(r#"<ul class="list-disc"#));
        assert!(out.contains(r#"<li class="mb-1">a</li>"#));
        assert!(out.contains(r#" start="3">"#));
        assert!(out.contains("</ol>"));
    }

    #[test]
    fn test_fenced_code_block_tagged_with_language() {
        let out = render("```rust ignore\nfn main() {\n    println!(\"<hi>\");\n}\n```");
        assert_eq!(
            out,
            concat!(
                r#"<pre class="bg-base-200 rounded-lg overflow-x-auto mb-4">"#,
                r#"<code class="language-rust">fn main() {"#,
                "\n    println!(&quot;&lt;hi&gt;&quot;);\n}</code></pre>"
            )
        );
    }

    #[test]
    fn test_code_block_without_language() {
        let out = render("```\nplain\n```");
        assert!(out.contains("<code>plain</code>"));
    }

    #[test]
    fn test_inline_code_and_link() {
        let out = render("see [docs](https://example.com/?a=1&b=2 \"Docs\") and `x < y`");
        assert!(out.contains(
            r#"<a href="https://example.com/?a=1&amp;b=2" title="Docs" class="text-primary hover:underline">docs</a>"#
        ));
        assert!(out.contains(">x &lt; y</code>"));
    }

    #[test]
    fn test_blockquote_and_rule() {
        let out = render("> quoted\n\n---\n");
        assert!(out.contains(r#"<blockquote class="border-l-4"#));
        assert!(out.contains("</blockquote>"));
        assert!(out.contains(r#"<hr class="border-base-300 my-8" />"#));
    }

    #[test]
    fn test_table_wrapped_with_alignment() {
        let out = render("| a | b |\n|:--|--:|\n| 1 | 2 |\n");
        assert!(out.starts_with(r#"<div class="overflow-x-auto mb-4"><table class="table table-zebra w-full"><thead><tr>"#));
        assert!(out.contains(r#"<th class="text-base-content font-bold" style="text-align: left">a</th>"#));
        assert!(out.contains(r#"<td class="text-base-content" style="text-align: right">2</td>"#));
        assert!(out.contains("</tbody></table></div>"));
    }

    #[test]
    fn test_image_with_caption() {
        let out = render("![a cat](cat.png \"Our cat\")");
        assert!(out.contains(
            r#"<figure class="my-4"><img class="max-w-full h-auto rounded-lg" src="cat.png" alt="a cat" title="Our cat"><figcaption class="text-sm text-center text-base-content/60 mt-2">Our cat</figcaption></figure>"#
        ));

        let out = render("![just alt](dog.png)");
        assert!(out.contains(r#"alt="just alt">"#));
        assert!(out.contains(">just alt</figcaption>"));
    }

    #[test]
    fn test_math() {
        let out = render("inline $a^2 < b$ and\n\n$$\\sum x$$");
        assert!(out.contains(r#"<span class="math math-inline">\(a^2 &lt; b\)</span>"#));
        assert!(out.contains(r#"<span class="math math-display">\[\sum x\]</span>"#));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }
}
