use catalog::error::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Local recipe not found.")]
    LocalRecipeNotFound,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
