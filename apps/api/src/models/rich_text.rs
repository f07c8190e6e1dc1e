use serde::{Deserialize, Serialize};

/// Structured rich-text document — the editor's JSON representation of
/// formatted text and the only stored form. HTML and LaTeX renderings are
/// derived from it; they are never persisted, so the two can't drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RichText {
    Doc { content: Vec<RichText> },
    Paragraph { content: Vec<RichText> },
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
}

/// Inline formatting applied to a text node. Marks are applied in sequence
/// order: a later mark wraps outside an earlier one in every rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Link { attrs: LinkAttrs },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
}

impl RichText {
    /// A single-paragraph document holding unformatted text. All placeholder
    /// content for new nodes is built through this.
    pub fn plain(text: impl Into<String>) -> Self {
        RichText::Doc {
            content: vec![RichText::Paragraph {
                content: vec![RichText::Text {
                    text: text.into(),
                    marks: Vec::new(),
                }],
            }],
        }
    }

    /// Concatenated text content with all formatting stripped.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            RichText::Doc { content } | RichText::Paragraph { content } => {
                for node in content {
                    node.collect_text(out);
                }
            }
            RichText::Text { text, .. } => out.push_str(text),
        }
    }
}
