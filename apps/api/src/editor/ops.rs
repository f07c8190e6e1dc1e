//! Mutation operations over the resume tree.
//!
//! Every operation takes exclusive access to the document and changes exactly
//! the targeted node(s); sibling order is preserved except by the explicit
//! `move_*` operations. Unknown ids return `NotFound`, operations against the
//! wrong section kind return `Validation`, and reorder indices are validated
//! because they arrive over the network.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{BulletPoint, Item, Resume, Section, SectionKind};
use crate::models::rich_text::RichText;

/// Partial update for an item; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<RichText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<RichText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

pub fn add_section(resume: &mut Resume) -> Section {
    let section = Section::new_outline();
    resume.sections.push(section.clone());
    section
}

pub fn add_latex_section(resume: &mut Resume) -> Section {
    let section = Section::new_latex();
    resume.sections.push(section.clone());
    section
}

pub fn remove_section(resume: &mut Resume, section_id: Uuid) -> Result<(), AppError> {
    let index = resume
        .sections
        .iter()
        .position(|s| s.id == section_id)
        .ok_or_else(|| section_not_found(section_id))?;
    resume.sections.remove(index);
    Ok(())
}

pub fn update_section_title(
    resume: &mut Resume,
    section_id: Uuid,
    title: RichText,
) -> Result<Section, AppError> {
    let section = find_section(resume, section_id)?;
    match &mut section.kind {
        SectionKind::Outline { title: slot, .. } => *slot = title,
        SectionKind::Latex { .. } => {
            return Err(AppError::Validation(
                "LaTeX sections have no title".to_string(),
            ))
        }
    }
    Ok(section.clone())
}

pub fn update_latex_source(
    resume: &mut Resume,
    section_id: Uuid,
    source: String,
) -> Result<Section, AppError> {
    let section = find_section(resume, section_id)?;
    match &mut section.kind {
        SectionKind::Latex { source: slot } => *slot = source,
        SectionKind::Outline { .. } => {
            return Err(AppError::Validation(
                "only LaTeX sections hold raw source".to_string(),
            ))
        }
    }
    Ok(section.clone())
}

pub fn toggle_section_visibility(
    resume: &mut Resume,
    section_id: Uuid,
) -> Result<Section, AppError> {
    let section = find_section(resume, section_id)?;
    section.visible = !section.visible;
    Ok(section.clone())
}

pub fn toggle_section_collapse(
    resume: &mut Resume,
    section_id: Uuid,
) -> Result<Section, AppError> {
    let section = find_section(resume, section_id)?;
    section.collapsed = !section.collapsed;
    Ok(section.clone())
}

pub fn move_section(resume: &mut Resume, from: usize, to: usize) -> Result<(), AppError> {
    move_within(&mut resume.sections, from, to, "section")
}

pub fn add_item(resume: &mut Resume, section_id: Uuid) -> Result<Item, AppError> {
    let items = find_items(resume, section_id)?;
    let item = Item::new();
    items.push(item.clone());
    Ok(item)
}

pub fn update_item(
    resume: &mut Resume,
    section_id: Uuid,
    item_id: Uuid,
    patch: ItemPatch,
) -> Result<Item, AppError> {
    let item = find_item(resume, section_id, item_id)?;
    if let Some(title) = patch.title {
        item.title = title;
    }
    if let Some(organization) = patch.organization {
        item.organization = organization;
    }
    if let Some(start_date) = patch.start_date {
        item.start_date = start_date;
    }
    if let Some(end_date) = patch.end_date {
        item.end_date = end_date;
    }
    if let Some(location) = patch.location {
        item.location = location;
    }
    Ok(item.clone())
}

pub fn toggle_item_visibility(
    resume: &mut Resume,
    section_id: Uuid,
    item_id: Uuid,
) -> Result<Item, AppError> {
    let item = find_item(resume, section_id, item_id)?;
    item.visible = !item.visible;
    Ok(item.clone())
}

pub fn toggle_item_collapse(
    resume: &mut Resume,
    section_id: Uuid,
    item_id: Uuid,
) -> Result<Item, AppError> {
    let item = find_item(resume, section_id, item_id)?;
    item.collapsed = !item.collapsed;
    Ok(item.clone())
}

pub fn remove_item(resume: &mut Resume, section_id: Uuid, item_id: Uuid) -> Result<(), AppError> {
    let items = find_items(resume, section_id)?;
    let index = items
        .iter()
        .position(|i| i.id == item_id)
        .ok_or_else(|| item_not_found(item_id))?;
    items.remove(index);
    Ok(())
}

pub fn move_item(
    resume: &mut Resume,
    section_id: Uuid,
    from: usize,
    to: usize,
) -> Result<(), AppError> {
    let items = find_items(resume, section_id)?;
    move_within(items, from, to, "item")
}

pub fn add_bullet(
    resume: &mut Resume,
    section_id: Uuid,
    item_id: Uuid,
) -> Result<BulletPoint, AppError> {
    let item = find_item(resume, section_id, item_id)?;
    let bullet = BulletPoint::new();
    item.bullet_points.push(bullet.clone());
    Ok(bullet)
}

pub fn update_bullet_content(
    resume: &mut Resume,
    section_id: Uuid,
    item_id: Uuid,
    bullet_id: Uuid,
    content: RichText,
) -> Result<BulletPoint, AppError> {
    let bullet = find_bullet(resume, section_id, item_id, bullet_id)?;
    bullet.content = content;
    Ok(bullet.clone())
}

pub fn toggle_bullet_visibility(
    resume: &mut Resume,
    section_id: Uuid,
    item_id: Uuid,
    bullet_id: Uuid,
) -> Result<BulletPoint, AppError> {
    let bullet = find_bullet(resume, section_id, item_id, bullet_id)?;
    bullet.visible = !bullet.visible;
    Ok(bullet.clone())
}

pub fn remove_bullet(
    resume: &mut Resume,
    section_id: Uuid,
    item_id: Uuid,
    bullet_id: Uuid,
) -> Result<(), AppError> {
    let item = find_item(resume, section_id, item_id)?;
    let index = item
        .bullet_points
        .iter()
        .position(|b| b.id == bullet_id)
        .ok_or_else(|| bullet_not_found(bullet_id))?;
    item.bullet_points.remove(index);
    Ok(())
}

pub fn move_bullet(
    resume: &mut Resume,
    section_id: Uuid,
    item_id: Uuid,
    from: usize,
    to: usize,
) -> Result<(), AppError> {
    let item = find_item(resume, section_id, item_id)?;
    move_within(&mut item.bullet_points, from, to, "bullet")
}

/// Replaces the whole document (import). The incoming tree is validated
/// before anything changes, so a bad import leaves the current state intact.
pub fn replace(resume: &mut Resume, incoming: Resume) -> Result<(), AppError> {
    incoming.validate().map_err(AppError::Validation)?;
    *resume = incoming;
    Ok(())
}

/// Remove at the source index, insert at the destination, shifting the
/// nodes in between by one. Moving to the current position is a no-op.
fn move_within<T>(list: &mut Vec<T>, from: usize, to: usize, what: &str) -> Result<(), AppError> {
    if from >= list.len() || to >= list.len() {
        return Err(AppError::Validation(format!(
            "{what} reorder out of range: {from} -> {to} with {} entries",
            list.len()
        )));
    }
    if from == to {
        return Ok(());
    }
    let moved = list.remove(from);
    list.insert(to, moved);
    Ok(())
}

fn find_section(resume: &mut Resume, section_id: Uuid) -> Result<&mut Section, AppError> {
    resume
        .section_mut(section_id)
        .ok_or_else(|| section_not_found(section_id))
}

fn find_items(resume: &mut Resume, section_id: Uuid) -> Result<&mut Vec<Item>, AppError> {
    match &mut find_section(resume, section_id)?.kind {
        SectionKind::Outline { items, .. } => Ok(items),
        SectionKind::Latex { .. } => Err(AppError::Validation(
            "LaTeX sections hold no items".to_string(),
        )),
    }
}

fn find_item(resume: &mut Resume, section_id: Uuid, item_id: Uuid) -> Result<&mut Item, AppError> {
    find_items(resume, section_id)?
        .iter_mut()
        .find(|i| i.id == item_id)
        .ok_or_else(|| item_not_found(item_id))
}

fn find_bullet(
    resume: &mut Resume,
    section_id: Uuid,
    item_id: Uuid,
    bullet_id: Uuid,
) -> Result<&mut BulletPoint, AppError> {
    find_item(resume, section_id, item_id)?
        .bullet_points
        .iter_mut()
        .find(|b| b.id == bullet_id)
        .ok_or_else(|| bullet_not_found(bullet_id))
}

fn section_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Section {id} not found"))
}

fn item_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Item {id} not found"))
}

fn bullet_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Bullet point {id} not found"))
}
