//! The message envelope used by mutating endpoints.

use serde::{Deserialize, Serialize};

/// A JSON object with a single human-readable `message` field. Both
/// success acknowledgments and client errors use this shape; internal
/// faults use it too but with an opaque message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_is_a_single_field_object() {
        let json = serde_json::to_value(MessageResponse::new("user has been created")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "user has been created"})
        );
    }
}
