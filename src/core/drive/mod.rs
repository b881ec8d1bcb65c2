pub mod drive_models;
pub mod query;

pub use drive_models::{
    Credential, CredentialError, CredentialStrategy, DriveClient, DriveFile, SearchError,
    SearchFilter,
};
pub use query::DriveQuery;
