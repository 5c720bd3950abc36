use thiserror::Error;

use crate::factories::tls::error::TlsError;

#[derive(Error, Debug)]
pub enum AmqpError {
    #[error("Lapin error, {0}")]
    LapinError(#[from] lapin::Error),
    #[error("Tls error, {0}")]
    TlsError(#[from] TlsError),
}
