use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Role of a ReviewHub account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Moderator,
    SimpleUser,
    BusinessOwner,
}

/// Permission types for role-based dashboards
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Permission {
    // Dashboards
    AdminDashboard,
    ModerationQueue,
    BusinessDashboard,

    // User management
    ManageRoles,

    // Content
    WriteReviews,
    DeleteAnyReview,
    DeleteAnyPost,
    ManageOwnBusinesses,
}

impl Permission {
    /// Get all available permissions
    pub fn all() -> HashSet<Permission> {
        HashSet::from([
            Permission::AdminDashboard,
            Permission::ModerationQueue,
            Permission::BusinessDashboard,
            Permission::ManageRoles,
            Permission::WriteReviews,
            Permission::DeleteAnyReview,
            Permission::DeleteAnyPost,
            Permission::ManageOwnBusinesses,
        ])
    }

    /// Convert permission to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::AdminDashboard => "dashboard:admin",
            Permission::ModerationQueue => "dashboard:moderation",
            Permission::BusinessDashboard => "dashboard:business",
            Permission::ManageRoles => "user:manage_roles",
            Permission::WriteReviews => "review:write",
            Permission::DeleteAnyReview => "review:delete_any",
            Permission::DeleteAnyPost => "post:delete_any",
            Permission::ManageOwnBusinesses => "business:manage_own",
        }
    }
}

impl UserRole {
    /// The fixed set of recognised roles
    pub const ALL: [UserRole; 4] = [
        UserRole::Admin,
        UserRole::Moderator,
        UserRole::SimpleUser,
        UserRole::BusinessOwner,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Moderator => "moderator",
            UserRole::SimpleUser => "simple_user",
            UserRole::BusinessOwner => "business_owner",
        }
    }

    /// Parse role from its wire representation
    pub fn parse(s: &str) -> Option<UserRole> {
        match s {
            "admin" => Some(UserRole::Admin),
            "moderator" => Some(UserRole::Moderator),
            "simple_user" => Some(UserRole::SimpleUser),
            "business_owner" => Some(UserRole::BusinessOwner),
            _ => None,
        }
    }

    /// Permissions granted to this role
    pub fn permissions(&self) -> HashSet<Permission> {
        match self {
            UserRole::Admin => Permission::all(),
            UserRole::Moderator => HashSet::from([
                Permission::ModerationQueue,
                Permission::WriteReviews,
                Permission::DeleteAnyReview,
                Permission::DeleteAnyPost,
            ]),
            UserRole::BusinessOwner => HashSet::from([
                Permission::BusinessDashboard,
                Permission::WriteReviews,
                Permission::ManageOwnBusinesses,
            ]),
            UserRole::SimpleUser => HashSet::from([Permission::WriteReviews]),
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::SimpleUser
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_string_conversion() {
        for role in UserRole::ALL {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("root"), None);
        assert_eq!(UserRole::parse("Admin"), None);
        assert_eq!(UserRole::parse(""), None);
    }

    #[test]
    fn test_admin_role() {
        let admin = UserRole::Admin;
        assert!(admin.has_permission(Permission::ManageRoles));
        assert!(admin.has_permission(Permission::AdminDashboard));
        assert_eq!(admin.permissions().len(), Permission::all().len());
    }

    #[test]
    fn test_moderator_role() {
        let moderator = UserRole::Moderator;
        assert!(moderator.has_permission(Permission::DeleteAnyReview));
        assert!(!moderator.has_permission(Permission::ManageRoles));
    }

    #[test]
    fn test_business_owner_role() {
        let owner = UserRole::BusinessOwner;
        assert!(owner.has_permission(Permission::BusinessDashboard));
        assert!(!owner.has_permission(Permission::ModerationQueue));
    }

    #[test]
    fn test_simple_user_role() {
        let user = UserRole::default();
        assert_eq!(user, UserRole::SimpleUser);
        assert!(user.has_permission(Permission::WriteReviews));
        assert!(!user.has_permission(Permission::DeleteAnyPost));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&UserRole::BusinessOwner).unwrap();
        assert_eq!(json, "\"business_owner\"");
        assert_eq!(Permission::ManageRoles.as_str(), "user:manage_roles");
    }
}
