//! Inspector errors.

use thiserror::Error;

use domlens_protocols::DomError;

/// Errors surfaced by the inspector's public API. The event path itself
/// never returns errors to the host.
#[derive(Debug, Error)]
pub enum InspectorError {
    #[error("Failed to create overlay surfaces: {0}")]
    Surface(#[from] DomError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_error_display() {
        let err = InspectorError::from(DomError::SurfaceFailed("no root".to_string()));
        assert!(err.to_string().contains("overlay surfaces"));
        assert!(err.to_string().contains("no root"));
    }
}
