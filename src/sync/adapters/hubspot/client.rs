//! Reqwest-backed HubSpot CRM client.
//!
//! This adapter owns transport details only: request encoding, paging,
//! timeout and HTTP error mapping, and JSON decoding into contact references.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::dto::{
    BatchResponseDto, BatchUpsertRequestDto, ContactDto, ContactPageDto, PROFILE_PROPERTIES,
    PropertyUpdateDto, property_definition,
};
use crate::sync::{
    domain::{ContactDraft, ContactId, ContactRef, CrmProperties, VALIDATION_PROPERTY_NAMES},
    ports::{CrmClient, CrmError, CrmResult},
};

const MAX_PAGE_SIZE: u32 = 100;

/// HubSpot client using a private-app bearer token.
pub struct HubSpotCrmClient {
    client: Client,
    base_url: Url,
    access_token: String,
    page_size: u32,
}

impl HubSpotCrmClient {
    /// Builds a client with an explicit request timeout.
    ///
    /// `page_size` is clamped to the API's accepted range of 1 to 100.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        access_token: impl Into<String>,
        timeout: Duration,
        page_size: u32,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            access_token: access_token.into(),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    fn authorised(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn execute(&self, request: RequestBuilder) -> CrmResult<(StatusCode, Vec<u8>)> {
        let response = self
            .authorised(request)
            .send()
            .await
            .map_err(CrmError::transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(CrmError::transport)?;
        Ok((status, body.to_vec()))
    }

    async fn execute_checked(&self, request: RequestBuilder) -> CrmResult<Vec<u8>> {
        let (status, body) = self.execute(request).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        Ok(body)
    }

    async fn fetch_page(&self, after: Option<&str>) -> CrmResult<ContactPageDto> {
        let mut query = vec![
            ("limit", self.page_size.to_string()),
            ("properties", PROFILE_PROPERTIES.to_owned()),
            ("archived", "false".to_owned()),
        ];
        if let Some(cursor) = after {
            query.push(("after", cursor.to_owned()));
        }
        let request = self
            .client
            .get(self.endpoint("crm/v3/objects/contacts"))
            .query(&query);
        let body = self.execute_checked(request).await?;
        decode(&body)
    }
}

#[async_trait]
impl CrmClient for HubSpotCrmClient {
    async fn ensure_validation_properties(&self) -> CrmResult<()> {
        let mut created = 0_usize;
        let mut existing = 0_usize;
        for name in VALIDATION_PROPERTY_NAMES {
            let request = self
                .client
                .post(self.endpoint("crm/v3/properties/contacts"))
                .json(&property_definition(name));
            let (status, body) = self.execute(request).await?;
            match status {
                StatusCode::CONFLICT => {
                    debug!(property = name, "property already exists");
                    existing += 1;
                }
                _ if status.is_success() => {
                    info!(property = name, "created CRM property");
                    created += 1;
                }
                _ => return Err(map_status_error(status, &body)),
            }
        }
        info!(created, existing, "CRM validation properties ready");
        Ok(())
    }

    async fn fetch_all_contacts(&self) -> CrmResult<Vec<ContactRef>> {
        let mut contacts = Vec::new();
        let mut after: Option<String> = None;
        loop {
            let page = self.fetch_page(after.as_deref()).await?;
            let next = page.next_after().map(str::to_owned);
            for dto in page.results {
                contacts.push(to_contact(dto)?);
            }
            debug!(total = contacts.len(), "fetched contact page");
            match next {
                Some(cursor) => after = Some(cursor),
                None => break,
            }
        }
        info!(count = contacts.len(), "fetched CRM contacts");
        Ok(contacts)
    }

    async fn upsert_properties(
        &self,
        contact_id: &ContactId,
        properties: &CrmProperties,
    ) -> CrmResult<()> {
        let request = self
            .client
            .patch(self.endpoint(&format!("crm/v3/objects/contacts/{contact_id}")))
            .json(&PropertyUpdateDto { properties });
        self.execute_checked(request).await?;
        debug!(%contact_id, "updated CRM validation properties");
        Ok(())
    }

    async fn create_or_update_contact(
        &self,
        draft: &ContactDraft,
        properties: &CrmProperties,
    ) -> CrmResult<ContactRef> {
        let request = self
            .client
            .post(self.endpoint("crm/v3/objects/contacts/batch/upsert"))
            .json(&BatchUpsertRequestDto::by_email(draft, properties));
        let body = self.execute_checked(request).await?;
        let response: BatchResponseDto = decode(&body)?;
        let dto = response.results.into_iter().next().ok_or_else(|| CrmError::Decode {
            message: "upsert response contained no contact".to_owned(),
        })?;
        let contact = to_contact(dto)?;
        info!(contact_id = %contact.contact_id(), "upserted CRM contact");
        Ok(contact)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> CrmResult<T> {
    serde_json::from_slice(body).map_err(|error| CrmError::Decode {
        message: format!("invalid HubSpot JSON payload: {error}"),
    })
}

fn to_contact(dto: ContactDto) -> CrmResult<ContactRef> {
    dto.into_contact_ref()
        .map_err(|message| CrmError::Decode { message })
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CrmError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => CrmError::RateLimited { message },
        StatusCode::NOT_FOUND => CrmError::NotFound { message },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CrmError::Unavailable {
            status: status.as_u16(),
            message,
        },
        _ if status.is_server_error() => CrmError::Unavailable {
            status: status.as_u16(),
            message,
        },
        _ => CrmError::Rejected {
            status: status.as_u16(),
            message,
        },
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
