use std::fmt::Write as _;
use std::sync::Arc;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag, TagEnd};
use pulldown_cmark_escape::{escape_href, escape_html};

use crate::config::{OutputExtension, RendererConfig};
use crate::element::ElementKind;
use crate::highlight;

/// Markdown → HTML engine for one [`RendererConfig`].
///
/// `render` is a pure function of `(text, config)`: equal inputs produce
/// structurally identical output. The config is shared immutably, so
/// cloning an engine is cheap.
#[derive(Debug, Clone)]
pub struct RendererEngine {
    config: Arc<RendererConfig>,
}

impl RendererEngine {
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Engine with every extension enabled and built-in rules.
    pub fn with_defaults() -> Self {
        Self::new(RendererConfig::default())
    }

    /// Render markdown text to HTML, wrapped in a `markdown-body` container
    /// tagged with `wrapper_class`.
    pub fn render(&self, text: &str, wrapper_class: &str) -> String {
        let mut writer = HtmlWriter::new(&self.config, text.len());
        if wrapper_class.is_empty() {
            writer.out.push_str("<div class=\"markdown-body\">\n");
        } else {
            writer.out.push_str("<div class=\"markdown-body ");
            let _ = escape_html(&mut writer.out, wrapper_class);
            writer.out.push_str("\">\n");
        }
        for event in Parser::new_ext(text, self.config.parser_options()) {
            writer.event(event);
        }
        writer.out.push_str("</div>\n");
        writer.out
    }

    /// Swap the active configuration for subsequent renders.
    pub fn update_config(&mut self, config: RendererConfig) {
        self.config = Arc::new(config);
    }

    /// Independent engine sharing the same immutable config.
    pub fn clone_engine(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
        }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }
}

impl Default for RendererEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

struct PendingImage {
    dest: String,
    title: String,
    alt: String,
}

struct HtmlWriter<'c> {
    config: &'c RendererConfig,
    out: String,
    in_code_block: bool,
    code_lang: Option<String>,
    code_buf: String,
    pending_image: Option<PendingImage>,
    in_table_head: bool,
}

impl<'c> HtmlWriter<'c> {
    fn new(config: &'c RendererConfig, input_len: usize) -> Self {
        Self {
            config,
            out: String::with_capacity(input_len * 2),
            in_code_block: false,
            code_lang: None,
            code_buf: String::new(),
            pending_image: None,
            in_table_head: false,
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if self.in_code_block {
                    self.code_buf.push_str(&text);
                } else if let Some(image) = self.pending_image.as_mut() {
                    image.alt.push_str(&text);
                } else {
                    let _ = escape_html(&mut self.out, &text);
                }
            }
            Event::Code(code) => self.inline_code(&code),
            Event::InlineMath(math) => self.math(&math, false),
            Event::DisplayMath(math) => self.math(&math, true),
            Event::Html(html) | Event::InlineHtml(html) => self.out.push_str(&html),
            Event::SoftBreak => self.out.push('\n'),
            Event::HardBreak => self.out.push_str("<br />\n"),
            Event::Rule => self.out.push_str("<hr />\n"),
            Event::TaskListMarker(checked) => {
                self.out.push_str(if checked {
                    "<input type=\"checkbox\" disabled=\"\" checked=\"\" /> "
                } else {
                    "<input type=\"checkbox\" disabled=\"\" /> "
                });
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.open("p", ElementKind::Paragraph),
            Tag::Heading { level, .. } => {
                self.open(heading_tag(level), heading_kind(level));
            }
            Tag::BlockQuote(_) => self.open("blockquote", ElementKind::BlockQuote),
            Tag::CodeBlock(kind) => {
                self.in_code_block = true;
                self.code_buf.clear();
                self.code_lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .filter(|token| !token.is_empty())
                        .map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
            }
            Tag::List(Some(start)) => {
                if start == 1 {
                    self.open("ol", ElementKind::List);
                } else {
                    self.out.push_str("<ol");
                    self.class_attr(ElementKind::List);
                    let _ = write!(self.out, " start=\"{start}\">");
                }
            }
            Tag::List(None) => self.open("ul", ElementKind::List),
            Tag::Item => self.open("li", ElementKind::ListItem),
            Tag::Emphasis => self.open("em", ElementKind::Emphasis),
            Tag::Strong => self.open("strong", ElementKind::Strong),
            Tag::Strikethrough => self.out.push_str("<del>"),
            Tag::Link { dest_url, title, .. } => {
                self.out.push_str("<a");
                self.class_attr(ElementKind::Link);
                self.out.push_str(" href=\"");
                let _ = escape_href(&mut self.out, &dest_url);
                self.out.push('"');
                if !title.is_empty() {
                    self.out.push_str(" title=\"");
                    let _ = escape_html(&mut self.out, &title);
                    self.out.push('"');
                }
                // External links open in a new tab, matching the link rule.
                self.out
                    .push_str(" target=\"_blank\" rel=\"noopener noreferrer\">");
            }
            Tag::Image { dest_url, title, .. } => {
                self.pending_image = Some(PendingImage {
                    dest: dest_url.into_string(),
                    title: title.into_string(),
                    alt: String::new(),
                });
            }
            Tag::Table(_) => {
                self.open("table", ElementKind::Table);
                self.out.push('\n');
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.out.push_str("<thead>\n<tr>");
            }
            Tag::TableRow => self.out.push_str("<tr>"),
            Tag::TableCell => {
                self.out
                    .push_str(if self.in_table_head { "<th>" } else { "<td>" });
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.out.push_str("</p>\n"),
            TagEnd::Heading(level) => {
                let _ = write!(self.out, "</{}>\n", heading_tag(level));
            }
            TagEnd::BlockQuote(_) => self.out.push_str("</blockquote>\n"),
            TagEnd::CodeBlock => self.flush_code_block(),
            TagEnd::List(true) => self.out.push_str("</ol>\n"),
            TagEnd::List(false) => self.out.push_str("</ul>\n"),
            TagEnd::Item => self.out.push_str("</li>\n"),
            TagEnd::Emphasis => self.out.push_str("</em>"),
            TagEnd::Strong => self.out.push_str("</strong>"),
            TagEnd::Strikethrough => self.out.push_str("</del>"),
            TagEnd::Link => self.out.push_str("</a>"),
            TagEnd::Image => self.flush_image(),
            TagEnd::Table => self.out.push_str("</tbody>\n</table>\n"),
            TagEnd::TableHead => {
                self.in_table_head = false;
                self.out.push_str("</tr>\n</thead>\n<tbody>\n");
            }
            TagEnd::TableRow => self.out.push_str("</tr>\n"),
            TagEnd::TableCell => {
                self.out
                    .push_str(if self.in_table_head { "</th>" } else { "</td>" });
            }
            _ => {}
        }
    }

    /// Open `tag` with the configured class for `kind`.
    fn open(&mut self, tag: &str, kind: ElementKind) {
        self.out.push('<');
        self.out.push_str(tag);
        self.class_attr(kind);
        self.out.push('>');
    }

    fn class_attr(&mut self, kind: ElementKind) {
        let class = &self.config.rule(kind).class;
        if !class.is_empty() {
            self.out.push_str(" class=\"");
            let _ = escape_html(&mut self.out, class);
            self.out.push('"');
        }
    }

    /// Inline code never invokes the highlighter.
    fn inline_code(&mut self, code: &str) {
        self.out.push_str("<code");
        self.class_attr(ElementKind::InlineCode);
        self.out.push('>');
        let _ = escape_html(&mut self.out, code);
        self.out.push_str("</code>");
    }

    fn math(&mut self, tex: &str, display: bool) {
        if self.config.has_output_extension(OutputExtension::MathRenderer) {
            if display {
                self.out.push_str("<div class=\"math math-display\">");
                let _ = escape_html(&mut self.out, tex);
                self.out.push_str("</div>\n");
            } else {
                self.out.push_str("<span class=\"math math-inline\">");
                let _ = escape_html(&mut self.out, tex);
                self.out.push_str("</span>");
            }
        } else {
            // No output-side math support: keep the source form.
            let delim = if display { "$$" } else { "$" };
            self.out.push_str(delim);
            let _ = escape_html(&mut self.out, tex);
            self.out.push_str(delim);
        }
    }

    /// A fenced block whose language hint matches no known grammar is
    /// highlighted in plain-text mode rather than failing.
    fn flush_code_block(&mut self) {
        self.in_code_block = false;
        let lang = self.code_lang.take();
        let code = std::mem::take(&mut self.code_buf);

        if self
            .config
            .has_output_extension(OutputExtension::SyntaxHighlighter)
        {
            let lang = lang.as_deref().unwrap_or("text");
            self.out.push_str("<div");
            self.class_attr(ElementKind::CodeBlock);
            self.out.push('>');
            self.out.push_str(&highlight::highlight(&code, lang));
            self.out.push_str("</div>\n");
        } else {
            self.out.push_str("<pre");
            self.class_attr(ElementKind::CodeBlock);
            self.out.push_str("><code");
            if let Some(lang) = lang {
                self.out.push_str(" class=\"language-");
                let _ = escape_html(&mut self.out, &lang);
                self.out.push('"');
            }
            self.out.push('>');
            let _ = escape_html(&mut self.out, &code);
            self.out.push_str("</code></pre>\n");
        }
    }

    fn flush_image(&mut self) {
        let Some(image) = self.pending_image.take() else {
            return;
        };
        self.out.push_str("<img src=\"");
        let _ = escape_href(&mut self.out, &image.dest);
        self.out.push_str("\" alt=\"");
        let _ = escape_html(&mut self.out, &image.alt);
        self.out.push('"');
        if !image.title.is_empty() {
            self.out.push_str(" title=\"");
            let _ = escape_html(&mut self.out, &image.title);
            self.out.push('"');
        }
        self.out.push_str(" />");
    }
}

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

fn heading_kind(level: HeadingLevel) -> ElementKind {
    match level {
        HeadingLevel::H1 => ElementKind::Heading1,
        HeadingLevel::H2 => ElementKind::Heading2,
        HeadingLevel::H3 => ElementKind::Heading3,
        HeadingLevel::H4 => ElementKind::Heading4,
        HeadingLevel::H5 => ElementKind::Heading5,
        HeadingLevel::H6 => ElementKind::Heading6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigOptions;
    use crate::element::RenderRule;
    use std::collections::HashMap;

    fn engine(options: ConfigOptions) -> RendererEngine {
        RendererEngine::new(RendererConfig::new(options))
    }

    #[test]
    fn render_is_deterministic() {
        let engine = RendererEngine::with_defaults();
        let text = "# Title\n\nSome *markdown* with `code` and $x^2$.\n";
        assert_eq!(engine.render(text, "page"), engine.render(text, "page"));
    }

    #[test]
    fn headings_and_paragraphs_carry_rules() {
        let engine = RendererEngine::with_defaults();
        let html = engine.render("# Title\n\nBody text.\n", "");
        assert!(html.contains("<h1 class=\"md-h1\">Title</h1>"));
        assert!(html.contains("<p class=\"md-paragraph\">Body text.</p>"));
        assert!(html.starts_with("<div class=\"markdown-body\">"));
    }

    #[test]
    fn wrapper_class_is_appended() {
        let engine = RendererEngine::with_defaults();
        let html = engine.render("hi", "note-view");
        assert!(html.starts_with("<div class=\"markdown-body note-view\">"));
    }

    #[test]
    fn math_enabled_produces_math_nodes() {
        let engine = RendererEngine::with_defaults();
        let html = engine.render("Euler: $x^2$\n\n$$\\int_0^1 x\\,dx$$\n", "");
        assert!(html.contains("<span class=\"math math-inline\">x^2</span>"));
        assert!(html.contains("class=\"math math-display\""));
    }

    #[test]
    fn math_disabled_leaves_source_text() {
        let engine = engine(ConfigOptions {
            math: false,
            ..ConfigOptions::default()
        });
        let html = engine.render("Euler: $x^2$\n", "");
        assert!(!html.contains("math-inline"));
        assert!(html.contains("$x^2$"));
    }

    #[test]
    fn inline_code_never_hits_the_highlighter() {
        let engine = RendererEngine::with_defaults();
        let html = engine.render("Use `let x = 1;` inline.\n", "");
        assert!(html.contains("<code class=\"md-code-inline\">let x = 1;</code>"));
    }

    #[test]
    fn fenced_block_with_unknown_language_falls_back() {
        let engine = RendererEngine::with_defaults();
        let html = engine.render("```notareallanguage\nsome body\n```\n", "");
        assert!(html.contains("<div class=\"md-code-block\">"));
        assert!(html.contains("some body"));
    }

    #[test]
    fn fenced_block_without_highlighting_is_escaped_pre() {
        let engine = engine(ConfigOptions {
            syntax_highlighting: false,
            ..ConfigOptions::default()
        });
        let html = engine.render("```rust\nlet x = \"<tag>\";\n```\n", "");
        assert!(html.contains("<pre class=\"md-code-block\"><code class=\"language-rust\">"));
        assert!(html.contains("&lt;tag&gt;"));
    }

    #[test]
    fn gfm_tables_render_when_enabled() {
        let table = "| a | b |\n|---|---|\n| 1 | 2 |\n";
        let engine = RendererEngine::with_defaults();
        let html = engine.render(table, "");
        assert!(html.contains("<table class=\"md-table\">"));
        assert!(html.contains("<th>a</th>"));
        assert!(html.contains("<td>1</td>"));

        let plain = self::engine(ConfigOptions {
            gfm: false,
            ..ConfigOptions::default()
        });
        assert!(!plain.render(table, "").contains("<table"));
    }

    #[test]
    fn task_lists_render_checkboxes() {
        let engine = RendererEngine::with_defaults();
        let html = engine.render("- [x] done\n- [ ] todo\n", "");
        assert!(html.contains("checked=\"\""));
        assert!(html.matches("type=\"checkbox\"").count() == 2);
    }

    #[test]
    fn links_are_external_and_escaped() {
        let engine = RendererEngine::with_defaults();
        let html = engine.render("[site](https://example.com?a=1&b=2)\n", "");
        assert!(html.contains("<a class=\"md-link\""));
        assert!(html.contains("rel=\"noopener noreferrer\""));
        assert!(html.contains("https://example.com?a=1&amp;b=2"));
    }

    #[test]
    fn text_is_html_escaped() {
        let engine = RendererEngine::with_defaults();
        let html = engine.render("literal <script> & stuff\n", "");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn custom_rules_flow_through() {
        let mut overrides = HashMap::new();
        overrides.insert(ElementKind::Paragraph, RenderRule::new("lead"));
        overrides.insert(ElementKind::Emphasis, RenderRule::unstyled());
        let engine = engine(ConfigOptions {
            overrides,
            ..ConfigOptions::default()
        });
        let html = engine.render("Some *emphasis* here.\n", "");
        assert!(html.contains("<p class=\"lead\">"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn clone_engine_shares_config() {
        let mut original = RendererEngine::with_defaults();
        let clone = original.clone_engine();
        let text = "# Shared\n";
        assert_eq!(original.render(text, ""), clone.render(text, ""));

        // Updating the original does not re-render the clone's view.
        original.update_config(RendererConfig::new(ConfigOptions {
            math: false,
            ..ConfigOptions::default()
        }));
        assert!(clone.config().has_output_extension(OutputExtension::MathRenderer));
        assert!(!original.config().has_output_extension(OutputExtension::MathRenderer));
    }
}
