pub mod resume;
pub mod rich_text;
