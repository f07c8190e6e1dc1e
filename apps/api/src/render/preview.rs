//! The preview projection: the visible subtree with derived HTML fields.

use serde::Serialize;
use uuid::Uuid;

use crate::models::resume::{Resume, SectionKind};
use crate::render::markup;

/// Prunes every node whose `visible` flag is false together with all its
/// descendants. The result is a plain `Resume`, so the LaTeX renderer and
/// the JSON preview share one filtering rule.
pub fn visible(resume: &Resume) -> Resume {
    Resume {
        sections: resume
            .sections
            .iter()
            .filter(|section| section.visible)
            .map(|section| {
                let mut section = section.clone();
                if let SectionKind::Outline { items, .. } = &mut section.kind {
                    items.retain(|item| item.visible);
                    for item in items.iter_mut() {
                        item.bullet_points.retain(|bullet| bullet.visible);
                    }
                }
                section
            })
            .collect(),
    }
}

/// The JSON preview served to a rendering frontend: visible nodes only, with
/// rich text already rendered to HTML.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumePreview {
    pub sections: Vec<PreviewSection>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSection {
    pub id: Uuid,
    #[serde(flatten)]
    pub kind: PreviewSectionKind,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PreviewSectionKind {
    Outline {
        title_html: String,
        items: Vec<PreviewItem>,
    },
    Latex {
        source: String,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewItem {
    pub id: Uuid,
    pub title_html: String,
    pub organization_html: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub bullets: Vec<PreviewBullet>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewBullet {
    pub id: Uuid,
    pub html: String,
}

pub fn preview(resume: &Resume) -> ResumePreview {
    let filtered = visible(resume);
    ResumePreview {
        sections: filtered
            .sections
            .into_iter()
            .map(|section| PreviewSection {
                id: section.id,
                kind: match section.kind {
                    SectionKind::Latex { source } => PreviewSectionKind::Latex { source },
                    SectionKind::Outline { title, items } => PreviewSectionKind::Outline {
                        title_html: markup::to_html(&title),
                        items: items
                            .into_iter()
                            .map(|item| PreviewItem {
                                id: item.id,
                                title_html: markup::to_html(&item.title),
                                organization_html: markup::to_html(&item.organization),
                                start_date: item.start_date,
                                end_date: item.end_date,
                                location: item.location,
                                bullets: item
                                    .bullet_points
                                    .into_iter()
                                    .map(|bullet| PreviewBullet {
                                        id: bullet.id,
                                        html: markup::to_html(&bullet.content),
                                    })
                                    .collect(),
                            })
                            .collect(),
                    },
                },
            })
            .collect(),
    }
}
