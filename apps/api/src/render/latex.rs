//! Resume to LaTeX rendering.
//!
//! Runs on the visibility-filtered projection, so hidden nodes and their
//! descendants never reach the output and list environments are only opened
//! around at least one visible child (an empty `itemize` is a LaTeX error).
//! All user text is escaped; LaTeX block sections are emitted verbatim.

use crate::models::resume::{BulletPoint, Item, Resume, Section, SectionKind};
use crate::models::rich_text::{Mark, RichText};
use crate::render::preview;
use crate::render::template::{CONTENT_MARKER, DOCUMENT_TEMPLATE};

/// Renders a complete compilable document for the visible projection of the
/// resume.
pub fn document(resume: &Resume) -> String {
    let visible = preview::visible(resume);
    let content: String = visible.sections.iter().map(section_latex).collect();
    DOCUMENT_TEMPLATE.replace(CONTENT_MARKER, &content)
}

fn section_latex(section: &Section) -> String {
    let (title, items) = match &section.kind {
        SectionKind::Latex { source } => return source.clone(),
        SectionKind::Outline { title, items } => (title, items),
    };

    let mut latex = format!("\\section{{{}}}\n", rich_text(title));
    if items.is_empty() {
        return latex;
    }

    latex.push_str("\\resumeSubHeadingListStart\n");
    for item in items {
        latex.push_str(&item_latex(item));
    }
    latex.push_str("\\resumeSubHeadingListEnd\n");
    latex
}

fn item_latex(item: &Item) -> String {
    let date = if !item.start_date.is_empty() && !item.end_date.is_empty() {
        format!(
            "{}---{}",
            escape_latex(&item.start_date),
            escape_latex(&item.end_date)
        )
    } else {
        String::new()
    };

    let mut latex = format!(
        "\\resumeSubheading{{{}}}{{{}}}{{{}}}{{{}}}\n",
        rich_text(&item.title),
        date,
        rich_text(&item.organization),
        escape_latex(&item.location)
    );

    if item.bullet_points.is_empty() {
        return latex;
    }

    latex.push_str("\\resumeItemListStart\n");
    for bullet in &item.bullet_points {
        latex.push_str(&bullet_latex(bullet));
    }
    latex.push_str("\\resumeItemListEnd\n");
    latex
}

fn bullet_latex(bullet: &BulletPoint) -> String {
    format!("\\resumeItem{{{}}}\n", rich_text(&bullet.content))
}

/// Compiles a structured document to LaTeX. Paragraph contents are
/// concatenated; marks wrap the escaped text with later marks outside
/// earlier ones.
pub fn rich_text(doc: &RichText) -> String {
    match doc {
        RichText::Doc { content } | RichText::Paragraph { content } => {
            content.iter().map(rich_text).collect()
        }
        RichText::Text { text, marks } => {
            let mut out = escape_latex(text);
            for mark in marks {
                out = apply_mark(mark, out);
            }
            out
        }
    }
}

fn apply_mark(mark: &Mark, inner: String) -> String {
    match mark {
        Mark::Bold => format!("\\textbf{{{inner}}}"),
        Mark::Italic => format!("\\textit{{{inner}}}"),
        Mark::Underline => format!("\\underline{{{inner}}}"),
        Mark::Link { attrs } => format!("\\href{{{}}}{{{inner}}}", escape_latex(&attrs.href)),
    }
}

/// Escapes the characters LaTeX treats as special in running text.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::ops::{self, ItemPatch};
    use crate::models::rich_text::LinkAttrs;

    // The preamble defines every resume macro, so assertions about emitted
    // content must look at the document body only.
    fn body(latex: &str) -> &str {
        let start = latex.find("\\begin{document}").unwrap();
        let end = latex.find("\\end{document}").unwrap();
        &latex[start..end]
    }

    fn marked(text: &str, marks: Vec<Mark>) -> RichText {
        RichText::Doc {
            content: vec![RichText::Paragraph {
                content: vec![RichText::Text {
                    text: text.to_string(),
                    marks,
                }],
            }],
        }
    }

    #[test]
    fn test_escape_latex_covers_special_characters() {
        assert_eq!(
            escape_latex("100% of A&B for $5 #1_x {y}"),
            "100\\% of A\\&B for \\$5 \\#1\\_x \\{y\\}"
        );
        assert_eq!(escape_latex("a~b^c\\d"),
            "a\\textasciitilde{}b\\textasciicircum{}c\\textbackslash{}d");
    }

    #[test]
    fn test_marks_nest_later_outside_earlier() {
        assert_eq!(
            rich_text(&marked("core", vec![Mark::Bold, Mark::Italic])),
            "\\textit{\\textbf{core}}"
        );
        assert_eq!(
            rich_text(&marked(
                "docs",
                vec![
                    Mark::Underline,
                    Mark::Link {
                        attrs: LinkAttrs {
                            href: "https://example.com/a_b".to_string()
                        }
                    }
                ]
            )),
            "\\href{https://example.com/a\\_b}{\\underline{docs}}"
        );
    }

    #[test]
    fn test_date_needs_both_ends() {
        let mut resume = Resume::default();
        let section = ops::add_section(&mut resume);
        let item = ops::add_item(&mut resume, section.id).unwrap();
        ops::update_item(
            &mut resume,
            section.id,
            item.id,
            ItemPatch {
                start_date: Some("Jan 2023".to_string()),
                ..ItemPatch::default()
            },
        )
        .unwrap();

        // Only a start date: no date range in the output.
        assert!(document(&resume).contains("\\resumeSubheading{New Item}{}{Organization}{}"));

        ops::update_item(
            &mut resume,
            section.id,
            item.id,
            ItemPatch {
                end_date: Some("May 2024".to_string()),
                ..ItemPatch::default()
            },
        )
        .unwrap();
        assert!(document(&resume)
            .contains("\\resumeSubheading{New Item}{Jan 2023---May 2024}{Organization}{}"));
    }

    #[test]
    fn test_hidden_nodes_and_descendants_are_absent() {
        let mut resume = Resume::default();
        let shown = ops::add_section(&mut resume);
        let hidden = ops::add_section(&mut resume);
        ops::update_section_title(&mut resume, hidden.id, RichText::plain("Secret")).unwrap();
        let item = ops::add_item(&mut resume, hidden.id).unwrap();
        ops::add_bullet(&mut resume, hidden.id, item.id).unwrap();
        ops::toggle_section_visibility(&mut resume, hidden.id).unwrap();
        let _ = shown;

        let latex = document(&resume);
        let content = body(&latex);
        assert!(content.contains("\\section{New Section}"));
        assert!(!content.contains("Secret"));
        assert!(!content.contains("\\resumeSubheading"));
    }

    #[test]
    fn test_no_empty_list_environments() {
        let mut resume = Resume::default();
        let section = ops::add_section(&mut resume);
        let item = ops::add_item(&mut resume, section.id).unwrap();
        let bullet = ops::add_bullet(&mut resume, section.id, item.id).unwrap();
        ops::toggle_bullet_visibility(&mut resume, section.id, item.id, bullet.id).unwrap();

        // The only bullet is hidden: no itemize pair may be emitted for it.
        let latex = document(&resume);
        assert!(body(&latex).contains("\\resumeSubHeadingListStart"));
        assert!(!body(&latex).contains("\\resumeItemListStart"));

        ops::toggle_item_visibility(&mut resume, section.id, item.id).unwrap();
        let latex = document(&resume);
        assert!(!body(&latex).contains("\\resumeSubHeadingListStart"));
    }

    #[test]
    fn test_latex_block_is_verbatim() {
        let mut resume = Resume::default();
        let section = ops::add_latex_section(&mut resume);
        ops::update_latex_source(
            &mut resume,
            section.id,
            "\\section{Skills} 100% custom & raw".to_string(),
        )
        .unwrap();

        assert!(document(&resume).contains("\\section{Skills} 100% custom & raw"));
    }

    #[test]
    fn test_content_replaces_the_template_marker() {
        let latex = document(&Resume::default());
        assert!(!latex.contains(CONTENT_MARKER));
        assert!(latex.contains("\\begin{document}"));
        assert!(latex.contains("\\end{document}"));
    }
}
