use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjError {
    #[error("Unknown projection: {0}")]
    UnknownProjection(String),

    #[error("Unknown stroke kind: {0}")]
    UnknownStrokeKind(String),
}

#[derive(Error, Debug)]
pub enum WarpError {
    #[error("Projection error: {0}")]
    Projection(#[from] ProjError),

    #[error("Invalid shape: {0}")]
    Shape(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ProjError::UnknownProjection("robinson".into());
        assert_eq!(err.to_string(), "Unknown projection: robinson");

        let err: WarpError = err.into();
        assert_eq!(err.to_string(), "Projection error: Unknown projection: robinson");

        let err = WarpError::Shape("expected 4 channels, got 3".into());
        assert_eq!(err.to_string(), "Invalid shape: expected 4 channels, got 3");
    }
}
