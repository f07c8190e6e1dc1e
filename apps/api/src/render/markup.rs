//! Deterministic rich-text to HTML rendering.
//!
//! HTML is always derived from the structured document at read time; it is
//! never stored, so it cannot drift from the content it renders.

use crate::models::rich_text::{Mark, RichText};

/// Renders a structured document as an HTML fragment. Paragraph contents are
/// concatenated; marks wrap the escaped text with later marks outside
/// earlier ones.
pub fn to_html(doc: &RichText) -> String {
    match doc {
        RichText::Doc { content } | RichText::Paragraph { content } => {
            content.iter().map(to_html).collect()
        }
        RichText::Text { text, marks } => {
            let mut out = escape_html(text);
            for mark in marks {
                out = apply_mark(mark, out);
            }
            out
        }
    }
}

fn apply_mark(mark: &Mark, inner: String) -> String {
    match mark {
        Mark::Bold => format!("<strong>{inner}</strong>"),
        Mark::Italic => format!("<em>{inner}</em>"),
        Mark::Underline => format!("<u>{inner}</u>"),
        Mark::Link { attrs } => {
            format!("<a href=\"{}\">{inner}</a>", escape_html(&attrs.href))
        }
    }
}

/// Escapes text for both element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
    use crate::models::rich_text::LinkAttrs;

    fn text(s: &str, marks: Vec<Mark>) -> RichText {
        RichText::Text {
            text: s.to_string(),
            marks,
        }
    }

    fn doc(content: Vec<RichText>) -> RichText {
        RichText::Doc {
            content: vec![RichText::Paragraph { content }],
        }
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(to_html(&RichText::plain("Led a team")), "Led a team");
    }

    #[test]
    fn test_marks_map_to_elements() {
        let html = to_html(&doc(vec![
            text("bold", vec![Mark::Bold]),
            text(" and ", vec![]),
            text("slanted", vec![Mark::Italic]),
            text(" or ", vec![]),
            text("lined", vec![Mark::Underline]),
        ]));
        assert_eq!(
            html,
            "<strong>bold</strong> and <em>slanted</em> or <u>lined</u>"
        );
    }

    #[test]
    fn test_later_marks_wrap_outside_earlier_ones() {
        let html = to_html(&doc(vec![text("both", vec![Mark::Bold, Mark::Italic])]));
        assert_eq!(html, "<em><strong>both</strong></em>");
    }

    #[test]
    fn test_link_renders_href_attribute() {
        let html = to_html(&doc(vec![text(
            "site",
            vec![Mark::Link {
                attrs: LinkAttrs {
                    href: "https://example.com?a=1&b=2".to_string(),
                },
            }],
        )]));
        assert_eq!(
            html,
            "<a href=\"https://example.com?a=1&amp;b=2\">site</a>"
        );
    }

    #[test]
    fn test_text_content_is_escaped() {
        assert_eq!(
            to_html(&RichText::plain("<script>\"x\" & 'y'</script>")),
            "&lt;script&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }
}
