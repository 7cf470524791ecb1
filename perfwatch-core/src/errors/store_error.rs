/// Errors raised by an [`IDocumentStore`](crate::traits::IDocumentStore) implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document {id} not found in collection {collection}")]
    NotFound { collection: String, id: String },

    #[error("document {id} already exists in collection {collection}")]
    Conflict { collection: String, id: String },

    #[error("store backend failure: {reason}")]
    Backend { reason: String },

    #[error("document is not a JSON object: {details}")]
    InvalidDocument { details: String },
}
