use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("No file selected")]
    NothingSelected,
}
