//! Geocoding errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Geocoding request failed: {0}")]
    Request(String),

    #[error("Geocoding service returned {status}")]
    Status { status: u16 },

    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocode_error_status() {
        let err = GeocodeError::Status { status: 503 };
        assert_eq!(err.to_string(), "Geocoding service returned 503");
    }

    #[test]
    fn test_geocode_error_invalid_response() {
        let err = GeocodeError::InvalidResponse("lat is not a number".to_string());
        assert!(err.to_string().contains("lat is not a number"));
    }
}
