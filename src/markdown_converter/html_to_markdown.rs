//! HTML to Markdown conversion
//!
//! htmd does the tree walk; the elements below are rendered by this crate's
//! own rule table, registered as htmd handlers. A rule replaces htmd's
//! default for every tag it lists. Lists, emphasis and other tags keep the
//! htmd defaults.

use htmd::{
    Element, HtmlToMarkdown,
    element_handler::{HandlerResult, Handlers},
    options::{BulletListMarker, Options},
};
use markup5ever_rcdom::{Node, NodeData};
use std::rc::Rc;

/// Heading syntax
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeadingStyle {
    /// `## Title`
    #[default]
    Atx,
    /// Underlined with `=` / `-` for levels 1 and 2, ATX below that
    Setext,
}

/// Marker for unordered list items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BulletMarker {
    #[default]
    Dash,
    Asterisk,
}

/// Code fence character
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FenceStyle {
    #[default]
    Backticks,
    Tildes,
}

impl FenceStyle {
    const fn marker(self) -> char {
        match self {
            Self::Backticks => '`',
            Self::Tildes => '~',
        }
    }
}

/// The configurable parts of the conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkdownOptions {
    pub heading_style: HeadingStyle,
    pub bullet_marker: BulletMarker,
    pub fence_style: FenceStyle,
}

type RenderFn = Box<dyn Fn(&dyn Handlers, Element) -> Option<HandlerResult> + Send + Sync>;

/// One entry of the rule table: the tags it renders and how
pub struct ConversionRule {
    pub name: &'static str,
    pub tags: Vec<&'static str>,
    render: RenderFn,
}

impl std::fmt::Debug for ConversionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionRule")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

fn rule<F>(name: &'static str, tags: &[&'static str], render: F) -> ConversionRule
where
    F: Fn(&dyn Handlers, Element) -> Option<HandlerResult> + Send + Sync + 'static,
{
    ConversionRule {
        name,
        tags: tags.to_vec(),
        render: Box::new(render),
    }
}

/// The fixed rule table, parameterized by `options`
#[must_use]
pub fn conversion_rules(options: MarkdownOptions) -> Vec<ConversionRule> {
    vec![
        rule("fenced-code-block", &["pre"], move |_handlers, element| {
            fenced_code_block(&element, options.fence_style)
        }),
        rule("inline-code", &["code"], inline_code),
        rule("link", &["a"], link),
        rule("image", &["img"], image),
        rule("paragraph", &["p"], paragraph),
        rule("horizontal-rule", &["hr"], |_handlers, _element| {
            Some(HandlerResult::from("\n\n---\n\n".to_string()))
        }),
        rule("blockquote", &["blockquote"], blockquote),
        rule("line-break", &["br"], |_handlers, _element| {
            Some(HandlerResult::from("  \n".to_string()))
        }),
        rule("table", &["table"], table),
        rule(
            "heading",
            &["h1", "h2", "h3", "h4", "h5", "h6"],
            move |handlers, element| heading(handlers, &element, options.heading_style),
        ),
    ]
}

/// Build an htmd converter with the rule table registered
#[must_use]
pub fn create_converter(options: MarkdownOptions) -> HtmlToMarkdown {
    let bullet_list_marker = match options.bullet_marker {
        BulletMarker::Dash => BulletListMarker::Dash,
        BulletMarker::Asterisk => BulletListMarker::Asterisk,
    };

    let mut builder = HtmlToMarkdown::builder().options(Options {
        bullet_list_marker,
        ..Default::default()
    });
    for conversion_rule in conversion_rules(options) {
        builder = builder.add_handler(conversion_rule.tags, conversion_rule.render);
    }
    builder.build()
}

/// Convert markup with the rule table. No post-processing.
pub fn convert_with_rules(html: &str, options: MarkdownOptions) -> std::io::Result<String> {
    create_converter(options).convert(html)
}

// === Rules ===

fn fenced_code_block(element: &Element, fence_style: FenceStyle) -> Option<HandlerResult> {
    let content = raw_text(element.node);
    let content = content.strip_suffix('\n').unwrap_or(&content);

    let language = find_descendant(element.node, "code")
        .and_then(|code| node_attr(&code, "class"))
        .and_then(|class| language_from_class(&class))
        .or_else(|| get_attr(element.attrs, "class").and_then(|c| language_from_class(&c)))
        .unwrap_or_default();

    let marker = fence_style.marker();
    let fence_len = (longest_run(content, marker) + 1).max(3);
    let fence: String = std::iter::repeat_n(marker, fence_len).collect();

    Some(HandlerResult::from(format!(
        "\n\n{fence}{language}\n{content}\n{fence}\n\n"
    )))
}

fn inline_code(_handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let content = raw_text(element.node);
    if is_inside(element.node, "pre") {
        return Some(HandlerResult::from(content));
    }

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Some(HandlerResult::from(String::new()));
    }

    let delimiter: String = std::iter::repeat_n('`', longest_run(trimmed, '`') + 1).collect();
    let padded = trimmed.starts_with('`') || trimmed.ends_with('`');
    let result = if padded {
        format!("{delimiter} {trimmed} {delimiter}")
    } else {
        format!("{delimiter}{trimmed}{delimiter}")
    };
    Some(HandlerResult::from(result))
}

fn link(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let text = handlers.walk_children(element.node).content;
    let text = text.trim();
    let title = get_attr(element.attrs, "title");

    let Some(href) = get_attr(element.attrs, "href") else {
        return Some(HandlerResult::from(text.to_string()));
    };

    let text = if text.is_empty() {
        get_attr(element.attrs, "aria-label")
            .or_else(|| title.clone())
            .unwrap_or_else(|| href.clone())
    } else {
        text.to_string()
    };

    let result = match title {
        Some(title) => format!("[{text}]({href} \"{}\")", escape_title(&title)),
        None => format!("[{text}]({href})"),
    };
    Some(HandlerResult::from(result))
}

fn image(_handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let Some(src) = get_attr(element.attrs, "src") else {
        return Some(HandlerResult::from(String::new()));
    };
    let alt = get_attr(element.attrs, "alt").unwrap_or_default();

    let result = match get_attr(element.attrs, "title") {
        Some(title) => format!("![{alt}]({src} \"{}\")", escape_title(&title)),
        None => format!("![{alt}]({src})"),
    };
    Some(HandlerResult::from(result))
}

fn paragraph(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let content = handlers.walk_children(element.node).content;
    let content = content.trim();
    if content.is_empty() {
        return Some(HandlerResult::from("\n\n".to_string()));
    }
    Some(HandlerResult::from(format!("\n\n{content}\n\n")))
}

fn blockquote(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let content = handlers.walk_children(element.node).content;

    let mut lines: Vec<String> = Vec::new();
    for line in content.trim_matches('\n').lines() {
        let blank = line.trim().is_empty();
        if blank && lines.last().is_some_and(|prev| prev == ">") {
            continue;
        }
        lines.push(if blank { ">".to_string() } else { format!("> {line}") });
    }
    Some(HandlerResult::from(format!("\n\n{}\n\n", lines.join("\n"))))
}

fn table(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    collect_rows(handlers, element.node, &mut rows);
    if rows.is_empty() {
        return Some(HandlerResult::from(String::new()));
    }

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        out.push('|');
        for col in 0..columns {
            out.push(' ');
            out.push_str(row.get(col).map_or("", String::as_str));
            out.push_str(" |");
        }
        out.push('\n');
        if i == 0 {
            out.push('|');
            for _ in 0..columns {
                out.push_str(" --- |");
            }
            out.push('\n');
        }
    }

    Some(HandlerResult::from(format!("\n\n{}\n\n", out.trim_end())))
}

fn heading(
    handlers: &dyn Handlers,
    element: &Element,
    style: HeadingStyle,
) -> Option<HandlerResult> {
    let level = node_name(element.node)
        .and_then(|name| name.strip_prefix('h').and_then(|n| n.parse::<usize>().ok()))
        .unwrap_or(1)
        .clamp(1, 6);

    let content = handlers.walk_children(element.node).content;
    let content = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if content.is_empty() {
        return Some(HandlerResult::from(String::new()));
    }

    let rendered = match (style, level) {
        (HeadingStyle::Setext, 1 | 2) => {
            let underline = if level == 1 { '=' } else { '-' };
            let width = content.chars().count().max(3);
            let line: String = std::iter::repeat_n(underline, width).collect();
            format!("\n\n{content}\n{line}\n\n")
        }
        _ => format!("\n\n{} {content}\n\n", "#".repeat(level)),
    };
    Some(HandlerResult::from(rendered))
}

// === Node helpers ===

fn collect_rows(handlers: &dyn Handlers, node: &Rc<Node>, rows: &mut Vec<Vec<String>>) {
    for child in node.children.borrow().iter() {
        match node_name(child).as_deref() {
            Some("tr") => {
                let cells = child
                    .children
                    .borrow()
                    .iter()
                    .filter(|cell| matches!(node_name(cell).as_deref(), Some("td" | "th")))
                    .map(|cell| table_cell(handlers, cell))
                    .collect();
                rows.push(cells);
            }
            Some("thead" | "tbody" | "tfoot") => collect_rows(handlers, child, rows),
            _ => {}
        }
    }
}

fn table_cell(handlers: &dyn Handlers, cell: &Rc<Node>) -> String {
    handlers
        .walk_children(cell)
        .content
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

fn node_name(node: &Rc<Node>) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

fn node_attr(node: &Rc<Node>, attr: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == attr)
            .map(|a| a.value.to_string())
            .filter(|v| !v.trim().is_empty()),
        _ => None,
    }
}

fn get_attr(attrs: &[html5ever::Attribute], name: &str) -> Option<String> {
    attrs
        .iter()
        .find(|a| &*a.name.local == name)
        .map(|a| a.value.to_string())
        .filter(|v| !v.trim().is_empty())
}

/// Text of a subtree exactly as parsed, whitespace included
fn raw_text(node: &Rc<Node>) -> String {
    let mut text = String::new();
    push_raw_text(node, &mut text);
    text
}

fn push_raw_text(node: &Rc<Node>, text: &mut String) {
    match &node.data {
        NodeData::Text { contents } => text.push_str(&contents.borrow()),
        NodeData::Element { .. } | NodeData::Document => {
            for child in node.children.borrow().iter() {
                push_raw_text(child, text);
            }
        }
        _ => {}
    }
}

fn find_descendant(node: &Rc<Node>, tag: &str) -> Option<Rc<Node>> {
    for child in node.children.borrow().iter() {
        if node_name(child).as_deref() == Some(tag) {
            return Some(Rc::clone(child));
        }
        if let Some(found) = find_descendant(child, tag) {
            return Some(found);
        }
    }
    None
}

fn is_inside(node: &Rc<Node>, tag: &str) -> bool {
    let mut current = node.parent.take();
    node.parent.set(current.clone());

    while let Some(weak_parent) = current {
        let Some(parent) = weak_parent.upgrade() else {
            break;
        };
        if node_name(&parent).as_deref() == Some(tag) {
            return true;
        }
        current = parent.parent.take();
        parent.parent.set(current.clone());
    }
    false
}

/// `language-rust` in a class list yields `rust`
fn language_from_class(class: &str) -> Option<String> {
    class
        .split_whitespace()
        .find_map(|c| c.strip_prefix("language-"))
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
}

fn longest_run(text: &str, marker: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == marker {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn escape_title(title: &str) -> String {
    title.replace('"', "\\\"")
}
