use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TlsError {
    #[error("Couldn't read {context} from {path:?}, {source}")]
    Read {
        context: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Client certificate and client key must be provided together")]
    IncompleteIdentity,
}
