//! Typed HTTP client for the resume REST surface.
//!
//! One method per endpoint, nothing more: no retry, batching, or coalescing.
//! A non-2xx response maps to [`ClientError::Api`] carrying the server's
//! error envelope, and the caller's state is left for the caller to keep.
#![allow(dead_code)]

use bytes::Bytes;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::editor::ops::ItemPatch;
use crate::models::resume::{BulletPoint, Item, Resume, Section};
use crate::models::rich_text::RichText;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): [{code}] {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

#[derive(Deserialize)]
struct SectionsBody {
    sections: Vec<Section>,
}

#[derive(Deserialize)]
struct SectionBody {
    section: Section,
}

#[derive(Deserialize)]
struct ItemBody {
    item: Item,
}

#[derive(Deserialize)]
struct BulletBody {
    bullet: BulletPoint,
}

pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /sections
    pub async fn sections(&self) -> Result<Vec<Section>, ClientError> {
        let resp = self.http.get(self.url("/sections")).send().await?;
        Ok(read_json::<SectionsBody>(resp).await?.sections)
    }

    /// POST /sections/add-section
    pub async fn add_section(&self) -> Result<Section, ClientError> {
        let resp = self
            .http
            .post(self.url("/sections/add-section"))
            .send()
            .await?;
        Ok(read_json::<SectionBody>(resp).await?.section)
    }

    /// POST /sections/add-latex
    pub async fn add_latex_section(&self) -> Result<Section, ClientError> {
        let resp = self.http.post(self.url("/sections/add-latex")).send().await?;
        Ok(read_json::<SectionBody>(resp).await?.section)
    }

    /// DELETE /sections/:id
    pub async fn remove_section(&self, section_id: Uuid) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/sections/{section_id}")))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// PATCH /sections/:id/title
    pub async fn update_section_title(
        &self,
        section_id: Uuid,
        title: &RichText,
    ) -> Result<Section, ClientError> {
        let resp = self
            .http
            .patch(self.url(&format!("/sections/{section_id}/title")))
            .json(&json!({ "title": title }))
            .send()
            .await?;
        Ok(read_json::<SectionBody>(resp).await?.section)
    }

    /// PATCH /sections/:id/status
    pub async fn toggle_section_status(&self, section_id: Uuid) -> Result<Section, ClientError> {
        let resp = self
            .http
            .patch(self.url(&format!("/sections/{section_id}/status")))
            .send()
            .await?;
        Ok(read_json::<SectionBody>(resp).await?.section)
    }

    /// PATCH /sections/:id/collapse
    pub async fn toggle_section_collapse(
        &self,
        section_id: Uuid,
    ) -> Result<Section, ClientError> {
        let resp = self
            .http
            .patch(self.url(&format!("/sections/{section_id}/collapse")))
            .send()
            .await?;
        Ok(read_json::<SectionBody>(resp).await?.section)
    }

    /// POST /sections/:id/update-latex
    pub async fn update_latex(
        &self,
        section_id: Uuid,
        source: &str,
    ) -> Result<Section, ClientError> {
        let resp = self
            .http
            .post(self.url(&format!("/sections/{section_id}/update-latex")))
            .json(&json!({ "text": source }))
            .send()
            .await?;
        Ok(read_json::<SectionBody>(resp).await?.section)
    }

    /// PATCH /sections/reorder
    pub async fn reorder_sections(
        &self,
        from: usize,
        to: usize,
    ) -> Result<Vec<Section>, ClientError> {
        let resp = self
            .http
            .patch(self.url("/sections/reorder"))
            .json(&json!({ "from": from, "to": to }))
            .send()
            .await?;
        Ok(read_json::<SectionsBody>(resp).await?.sections)
    }

    /// POST /sections/:id/items
    pub async fn add_item(&self, section_id: Uuid) -> Result<Item, ClientError> {
        let resp = self
            .http
            .post(self.url(&format!("/sections/{section_id}/items")))
            .send()
            .await?;
        Ok(read_json::<ItemBody>(resp).await?.item)
    }

    /// PATCH /sections/:id/items/:item_id
    pub async fn update_item(
        &self,
        section_id: Uuid,
        item_id: Uuid,
        patch: &ItemPatch,
    ) -> Result<Item, ClientError> {
        let resp = self
            .http
            .patch(self.url(&format!("/sections/{section_id}/items/{item_id}")))
            .json(patch)
            .send()
            .await?;
        Ok(read_json::<ItemBody>(resp).await?.item)
    }

    /// PATCH /sections/:id/items/:item_id/status
    pub async fn toggle_item_status(
        &self,
        section_id: Uuid,
        item_id: Uuid,
    ) -> Result<Item, ClientError> {
        let resp = self
            .http
            .patch(self.url(&format!("/sections/{section_id}/items/{item_id}/status")))
            .send()
            .await?;
        Ok(read_json::<ItemBody>(resp).await?.item)
    }

    /// PATCH /sections/:id/items/:item_id/collapse
    pub async fn toggle_item_collapse(
        &self,
        section_id: Uuid,
        item_id: Uuid,
    ) -> Result<Item, ClientError> {
        let resp = self
            .http
            .patch(self.url(&format!("/sections/{section_id}/items/{item_id}/collapse")))
            .send()
            .await?;
        Ok(read_json::<ItemBody>(resp).await?.item)
    }

    /// DELETE /sections/:id/items/:item_id
    pub async fn remove_item(&self, section_id: Uuid, item_id: Uuid) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/sections/{section_id}/items/{item_id}")))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// PATCH /sections/:id/items/reorder
    pub async fn reorder_items(
        &self,
        section_id: Uuid,
        from: usize,
        to: usize,
    ) -> Result<Section, ClientError> {
        let resp = self
            .http
            .patch(self.url(&format!("/sections/{section_id}/items/reorder")))
            .json(&json!({ "from": from, "to": to }))
            .send()
            .await?;
        Ok(read_json::<SectionBody>(resp).await?.section)
    }

    /// POST /sections/:id/items/:item_id/bullets
    pub async fn add_bullet(
        &self,
        section_id: Uuid,
        item_id: Uuid,
    ) -> Result<BulletPoint, ClientError> {
        let resp = self
            .http
            .post(self.url(&format!("/sections/{section_id}/items/{item_id}/bullets")))
            .send()
            .await?;
        Ok(read_json::<BulletBody>(resp).await?.bullet)
    }

    /// PATCH /sections/:id/items/:item_id/bullets/:bullet_id/text
    pub async fn update_bullet_text(
        &self,
        section_id: Uuid,
        item_id: Uuid,
        bullet_id: Uuid,
        content: &RichText,
    ) -> Result<BulletPoint, ClientError> {
        let resp = self
            .http
            .patch(self.url(&format!(
                "/sections/{section_id}/items/{item_id}/bullets/{bullet_id}/text"
            )))
            .json(&json!({ "content": content }))
            .send()
            .await?;
        Ok(read_json::<BulletBody>(resp).await?.bullet)
    }

    /// PATCH /sections/:id/items/:item_id/bullets/:bullet_id/status
    pub async fn toggle_bullet_status(
        &self,
        section_id: Uuid,
        item_id: Uuid,
        bullet_id: Uuid,
    ) -> Result<BulletPoint, ClientError> {
        let resp = self
            .http
            .patch(self.url(&format!(
                "/sections/{section_id}/items/{item_id}/bullets/{bullet_id}/status"
            )))
            .send()
            .await?;
        Ok(read_json::<BulletBody>(resp).await?.bullet)
    }

    /// DELETE /sections/:id/items/:item_id/bullets/:bullet_id
    pub async fn remove_bullet(
        &self,
        section_id: Uuid,
        item_id: Uuid,
        bullet_id: Uuid,
    ) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!(
                "/sections/{section_id}/items/{item_id}/bullets/{bullet_id}"
            )))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// PATCH /sections/:id/items/:item_id/bullets/reorder
    pub async fn reorder_bullets(
        &self,
        section_id: Uuid,
        item_id: Uuid,
        from: usize,
        to: usize,
    ) -> Result<Item, ClientError> {
        let resp = self
            .http
            .patch(self.url(&format!(
                "/sections/{section_id}/items/{item_id}/bullets/reorder"
            )))
            .json(&json!({ "from": from, "to": to }))
            .send()
            .await?;
        Ok(read_json::<ItemBody>(resp).await?.item)
    }

    /// GET /preview
    pub async fn preview(&self) -> Result<serde_json::Value, ClientError> {
        let resp = self.http.get(self.url("/preview")).send().await?;
        read_json(resp).await
    }

    /// POST /latex
    pub async fn latex(&self, sections: &[Section]) -> Result<String, ClientError> {
        let resp = self
            .http
            .post(self.url("/latex"))
            .json(&json!({ "sections_json": sections }))
            .send()
            .await?;
        Ok(check(resp).await?.text().await?)
    }

    /// POST /pdf
    pub async fn pdf(&self, sections: &[Section]) -> Result<Bytes, ClientError> {
        let resp = self
            .http
            .post(self.url("/pdf"))
            .json(&json!({ "sections_json": sections }))
            .send()
            .await?;
        Ok(check(resp).await?.bytes().await?)
    }

    /// GET /export
    pub async fn export(&self) -> Result<Resume, ClientError> {
        let resp = self.http.get(self.url("/export")).send().await?;
        read_json(resp).await
    }

    /// POST /import
    pub async fn import(&self, resume: &Resume) -> Result<Vec<Section>, ClientError> {
        let resp = self
            .http
            .post(self.url("/import"))
            .json(resume)
            .send()
            .await?;
        Ok(read_json::<SectionsBody>(resp).await?.sections)
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    Ok(check(resp).await?.json().await?)
}

async fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(api_error(status, &body))
}

fn api_error(status: StatusCode, body: &str) -> ClientError {
    let (code, message) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.code, envelope.error.message),
        Err(_) => ("UNKNOWN".to_string(), body.to_string()),
    };
    ClientError::Api {
        status: status.as_u16(),
        code,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.url("/sections"), "http://localhost:8080/sections");
    }

    #[test]
    fn test_api_error_parses_the_server_envelope() {
        let err = api_error(
            StatusCode::NOT_FOUND,
            r#"{"error":{"code":"NOT_FOUND","message":"Section x not found"}}"#,
        );
        let ClientError::Api {
            status,
            code,
            message,
        } = err
        else {
            panic!("expected api error");
        };
        assert_eq!(status, 404);
        assert_eq!(code, "NOT_FOUND");
        assert_eq!(message, "Section x not found");
    }

    #[test]
    fn test_api_error_falls_back_to_raw_body() {
        let err = api_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(
            err,
            ClientError::Api { code, message, .. } if code == "UNKNOWN" && message == "upstream down"
        ));
    }
}
