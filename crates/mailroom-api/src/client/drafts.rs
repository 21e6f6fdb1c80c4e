//! Draft endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{ApiClient, read_json};
use crate::error::Result;
use crate::model::{Draft, DraftId, Email, MessageFields};
use crate::token::Token;

#[derive(Debug, Deserialize)]
struct DraftEnvelope {
    draft: Draft,
}

#[derive(Debug, Deserialize)]
struct DraftsEnvelope {
    drafts: Vec<Draft>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EmailEnvelope {
    pub(super) email: Email,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateDraftRequest<'a> {
    draft_id: DraftId,
    #[serde(flatten)]
    fields: &'a MessageFields,
}

impl ApiClient {
    /// Creates a draft (`POST /api/drafts`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is invalid.
    pub async fn create_draft(&self, token: &Token, fields: &MessageFields) -> Result<Draft> {
        let request = self
            .request(Method::POST, "api/drafts", Some(token))?
            .json(fields);
        let envelope: DraftEnvelope = read_json(Self::execute(request).await?).await?;
        Ok(envelope.draft)
    }

    /// Replaces the content of an existing draft (`PUT /api/drafts`).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the draft does not exist or is
    /// not owned by the caller.
    pub async fn update_draft(
        &self,
        token: &Token,
        draft_id: DraftId,
        fields: &MessageFields,
    ) -> Result<Draft> {
        let body = UpdateDraftRequest { draft_id, fields };
        let request = self
            .request(Method::PUT, "api/drafts", Some(token))?
            .json(&body);
        let envelope: DraftEnvelope = read_json(Self::execute(request).await?).await?;
        Ok(envelope.draft)
    }

    /// Lists the caller's drafts (`GET /api/drafts`), in server order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is invalid.
    pub async fn list_drafts(&self, token: &Token) -> Result<Vec<Draft>> {
        let request = self.request(Method::GET, "api/drafts", Some(token))?;
        let envelope: DraftsEnvelope = read_json(Self::execute(request).await?).await?;
        Ok(envelope.drafts)
    }

    /// Fetches one draft (`GET /api/drafts/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the draft does not exist.
    pub async fn get_draft(&self, token: &Token, draft_id: DraftId) -> Result<Draft> {
        let request = self.request(Method::GET, &format!("api/drafts/{draft_id}"), Some(token))?;
        let envelope: DraftEnvelope = read_json(Self::execute(request).await?).await?;
        Ok(envelope.draft)
    }

    /// Deletes a draft (`DELETE /api/drafts/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the draft does not exist.
    pub async fn delete_draft(&self, token: &Token, draft_id: DraftId) -> Result<()> {
        let request =
            self.request(Method::DELETE, &format!("api/drafts/{draft_id}"), Some(token))?;
        Self::execute(request).await?;
        Ok(())
    }

    /// Sends a draft and retires it in one call (`POST /api/emails/draft/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Rejected`] if the draft is incomplete and
    /// [`crate::Error::NotFound`] if it does not exist.
    pub async fn send_draft(&self, token: &Token, draft_id: DraftId) -> Result<Email> {
        let request = self.request(
            Method::POST,
            &format!("api/emails/draft/{draft_id}"),
            Some(token),
        )?;
        let envelope: EmailEnvelope = read_json(Self::execute(request).await?).await?;
        Ok(envelope.email)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_is_flat() {
        let fields = MessageFields::new("Hi", "a@b.com", "");
        let body = UpdateDraftRequest {
            draft_id: DraftId::new(5),
            fields: &fields,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "draftId": 5,
                "subject": "Hi",
                "recipientEmail": "a@b.com",
                "body": ""
            })
        );
    }

    #[test]
    fn test_drafts_envelope() {
        let json = r#"{"drafts":[{"draftId":1,"subject":"a","recipientEmail":"","body":""},
                                 {"draftId":2,"subject":"","recipientEmail":"","body":"b"}]}"#;
        let envelope: DraftsEnvelope = serde_json::from_str(json).unwrap();
        let ids: Vec<_> = envelope.drafts.iter().map(|d| d.draft_id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
