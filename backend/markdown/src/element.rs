use serde::{Deserialize, Serialize};

/// Markdown element kinds with a configurable presentation.
///
/// A closed set: per-element render rules are looked up by variant rather
/// than by free-form property name, so dispatch stays exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    Paragraph,
    List,
    ListItem,
    BlockQuote,
    CodeBlock,
    InlineCode,
    Link,
    Table,
    Emphasis,
    Strong,
}

impl ElementKind {
    pub const ALL: [ElementKind; 16] = [
        ElementKind::Heading1,
        ElementKind::Heading2,
        ElementKind::Heading3,
        ElementKind::Heading4,
        ElementKind::Heading5,
        ElementKind::Heading6,
        ElementKind::Paragraph,
        ElementKind::List,
        ElementKind::ListItem,
        ElementKind::BlockQuote,
        ElementKind::CodeBlock,
        ElementKind::InlineCode,
        ElementKind::Link,
        ElementKind::Table,
        ElementKind::Emphasis,
        ElementKind::Strong,
    ];

    /// Built-in presentation for this element kind.
    pub fn default_rule(self) -> RenderRule {
        let class = match self {
            ElementKind::Heading1 => "md-h1",
            ElementKind::Heading2 => "md-h2",
            ElementKind::Heading3 => "md-h3",
            ElementKind::Heading4 => "md-h4",
            ElementKind::Heading5 => "md-h5",
            ElementKind::Heading6 => "md-h6",
            ElementKind::Paragraph => "md-paragraph",
            ElementKind::List => "md-list",
            ElementKind::ListItem => "md-list-item",
            ElementKind::BlockQuote => "md-blockquote",
            ElementKind::CodeBlock => "md-code-block",
            ElementKind::InlineCode => "md-code-inline",
            ElementKind::Link => "md-link",
            ElementKind::Table => "md-table",
            ElementKind::Emphasis => "md-emphasis",
            ElementKind::Strong => "md-strong",
        };
        RenderRule::new(class)
    }
}

/// How one element kind is visually represented: the CSS class emitted on
/// the produced HTML element. An empty class emits no attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRule {
    pub class: String,
}

impl RenderRule {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
        }
    }

    /// Rule that renders the bare element with no class attribute.
    pub fn unstyled() -> Self {
        Self::new("")
    }
}
