use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Missing API key. Please set SPOONACULAR_API_KEY in .env")]
    MissingApiKey,

    #[error("Invalid API key (401): Check SPOONACULAR_API_KEY.")]
    InvalidApiKey,

    #[error("Spoonacular quota/billing (402): You've exceeded your plan or billing is required.")]
    QuotaExhausted,

    #[error("{0}")]
    Request(#[from] reqwest::Error),
}

impl CatalogError {
    /// The statuses Spoonacular uses for credential and billing problems get
    /// dedicated messages; anything else is left to the transport error.
    pub fn for_status(status: StatusCode) -> Option<CatalogError> {
        match status {
            StatusCode::UNAUTHORIZED => Some(CatalogError::InvalidApiKey),
            StatusCode::PAYMENT_REQUIRED => Some(CatalogError::QuotaExhausted),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_statuses_get_fixed_messages() {
        let err = CatalogError::for_status(StatusCode::UNAUTHORIZED).unwrap();
        assert!(err.to_string().contains("Invalid API key (401)"));

        let err = CatalogError::for_status(StatusCode::PAYMENT_REQUIRED).unwrap();
        assert!(err.to_string().contains("quota/billing (402)"));
    }

    #[test]
    fn other_statuses_are_not_classified() {
        assert!(CatalogError::for_status(StatusCode::NOT_FOUND).is_none());
        assert!(CatalogError::for_status(StatusCode::INTERNAL_SERVER_ERROR).is_none());
        assert!(CatalogError::for_status(StatusCode::OK).is_none());
    }
}
