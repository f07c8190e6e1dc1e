use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::rich_text::RichText;

/// Leaf node of the resume outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletPoint {
    pub id: Uuid,
    pub content: RichText,
    pub visible: bool,
}

impl BulletPoint {
    pub fn new() -> Self {
        BulletPoint {
            id: Uuid::new_v4(),
            content: RichText::plain("New bullet"),
            visible: true,
        }
    }
}

impl Default for BulletPoint {
    fn default() -> Self {
        Self::new()
    }
}

/// One entry inside an outline section: a role, project, degree and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub title: RichText,
    pub organization: RichText,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub location: String,
    pub visible: bool,
    pub collapsed: bool,
    pub bullet_points: Vec<BulletPoint>,
}

impl Item {
    pub fn new() -> Self {
        Item {
            id: Uuid::new_v4(),
            title: RichText::plain("New Item"),
            organization: RichText::plain("Organization"),
            start_date: String::new(),
            end_date: String::new(),
            location: String::new(),
            visible: true,
            collapsed: false,
            bullet_points: Vec::new(),
        }
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level node of the resume outline. A section is either a standard
/// outline (titled list of items) or a raw LaTeX block emitted verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: Uuid,
    pub visible: bool,
    pub collapsed: bool,
    #[serde(flatten)]
    pub kind: SectionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SectionKind {
    Outline { title: RichText, items: Vec<Item> },
    Latex { source: String },
}

impl Section {
    pub fn new_outline() -> Self {
        Section {
            id: Uuid::new_v4(),
            visible: true,
            collapsed: false,
            kind: SectionKind::Outline {
                title: RichText::plain("New Section"),
                items: Vec::new(),
            },
        }
    }

    pub fn new_latex() -> Self {
        Section {
            id: Uuid::new_v4(),
            visible: true,
            collapsed: false,
            kind: SectionKind::Latex {
                source: String::new(),
            },
        }
    }
}

/// The persisted root: the whole resume is the unit of storage and of
/// import/export.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Resume {
    pub sections: Vec<Section>,
}

impl Resume {
    /// Checks that identifiers are unique within their containing scope:
    /// section ids across the resume, item ids within a section, bullet ids
    /// within an item. Import rejects documents that fail this.
    pub fn validate(&self) -> Result<(), String> {
        let mut section_ids = HashSet::new();
        for section in &self.sections {
            if !section_ids.insert(section.id) {
                return Err(format!("duplicate section id {}", section.id));
            }
            let SectionKind::Outline { items, .. } = &section.kind else {
                continue;
            };
            let mut item_ids = HashSet::new();
            for item in items {
                if !item_ids.insert(item.id) {
                    return Err(format!(
                        "duplicate item id {} in section {}",
                        item.id, section.id
                    ));
                }
                let mut bullet_ids = HashSet::new();
                for bullet in &item.bullet_points {
                    if !bullet_ids.insert(bullet.id) {
                        return Err(format!(
                            "duplicate bullet id {} in item {}",
                            bullet.id, item.id
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn section(&self, id: Uuid) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_mut(&mut self, id: Uuid) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_use_placeholder_content() {
        let section = Section::new_outline();
        assert!(section.visible);
        assert!(!section.collapsed);
        let SectionKind::Outline { title, items } = &section.kind else {
            panic!("expected outline section");
        };
        assert_eq!(title.plain_text(), "New Section");
        assert!(items.is_empty());

        let item = Item::new();
        assert_eq!(item.title.plain_text(), "New Item");
        assert_eq!(item.organization.plain_text(), "Organization");
        assert_eq!(item.start_date, "");

        let bullet = BulletPoint::new();
        assert_eq!(bullet.content.plain_text(), "New bullet");
        assert!(bullet.visible);
    }

    #[test]
    fn test_section_kind_is_tagged_on_the_wire() {
        let outline = serde_json::to_value(Section::new_outline()).unwrap();
        assert_eq!(outline["type"], "outline");
        assert!(outline["title"].is_object());

        let latex = serde_json::to_value(Section::new_latex()).unwrap();
        assert_eq!(latex["type"], "latex");
        assert_eq!(latex["source"], "");
    }

    #[test]
    fn test_item_fields_are_camel_case() {
        let value = serde_json::to_value(Item::new()).unwrap();
        assert!(value.get("startDate").is_some());
        assert!(value.get("endDate").is_some());
        assert!(value.get("bulletPoints").is_some());
        assert!(value.get("start_date").is_none());
    }

    #[test]
    fn test_serialization_round_trips_the_tree() {
        let mut resume = Resume::default();
        let mut section = Section::new_outline();
        let mut item = Item::new();
        item.bullet_points.push(BulletPoint::new());
        if let SectionKind::Outline { items, .. } = &mut section.kind {
            items.push(item);
        }
        resume.sections.push(section);
        resume.sections.push(Section::new_latex());

        let json = serde_json::to_string(&resume).unwrap();
        let back: Resume = serde_json::from_str(&json).unwrap();
        assert_eq!(back, resume);
    }

    #[test]
    fn test_validate_rejects_duplicate_ids_in_scope() {
        let mut resume = Resume::default();
        let section = Section::new_outline();
        resume.sections.push(section.clone());
        resume.sections.push(section);
        assert!(resume.validate().is_err());

        let mut resume = Resume::default();
        let mut section = Section::new_outline();
        let item = Item::new();
        if let SectionKind::Outline { items, .. } = &mut section.kind {
            items.push(item.clone());
            items.push(item);
        }
        resume.sections.push(section);
        assert!(resume.validate().is_err());
    }

    #[test]
    fn test_validate_allows_fresh_ids() {
        let mut resume = Resume::default();
        resume.sections.push(Section::new_outline());
        resume.sections.push(Section::new_latex());
        assert!(resume.validate().is_ok());
    }
}
