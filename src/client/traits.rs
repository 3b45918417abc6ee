use crate::model::{DeleteError, DeleteResponse};

#[async_trait::async_trait]
pub trait VenueApi: Send + Sync {
    /// Issues `DELETE /venues/<id>` and decodes the JSON answer.
    async fn delete_venue(&self, id: &str) -> Result<DeleteResponse, DeleteError>;
}
