use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShowroomError {
    #[error("could not parse **Company name:** from issue body")]
    MissingCompanyName,

    #[error("could not parse action or **Company id:** from issue")]
    UnparsableIssue,

    #[error("company id '{0}' not found in assets/sites.json")]
    CompanyNotFound(String),

    #[error("assets/sites.json not found: run 'showroom regenerate' at least once")]
    ManifestMissing,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShowroomError>;
