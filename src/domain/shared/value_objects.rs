//! Shared value objects used across multiple feature areas
//!
//! Identifiers are opaque document ids generated by the backend platform.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

document_id!(
    /// User identifier (shared by the auth account and the profile document)
    UserId
);
document_id!(
    /// Business identifier
    BusinessId
);
document_id!(
    /// Review identifier
    ReviewId
);
document_id!(
    /// Feed post identifier
    PostId
);
document_id!(
    /// Comment identifier
    CommentId
);
document_id!(
    /// Conversation identifier
    ConversationId
);
document_id!(
    /// Chat message identifier
    MessageId
);
document_id!(
    /// Notification identifier
    NotificationId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_and_conversion() {
        let id = UserId::from("u-42");
        assert_eq!(id.to_string(), "u-42");
        assert_eq!(id.as_str(), "u-42");
        assert_eq!(id.clone().into_inner(), "u-42".to_string());
        assert_eq!(id, UserId::new("u-42".to_string()));
    }

    #[test]
    fn test_id_serializes_transparently() {
        let json = serde_json::to_string(&PostId::new("p1")).unwrap();
        assert_eq!(json, "\"p1\"");
        let back: PostId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PostId::new("p1"));
    }
}
