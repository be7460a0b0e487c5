//! Domain models for the authn module.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An authenticated principal.
///
/// Produced by a successful [`crate::Authenticator::authenticate`] call and
/// handed to downstream handlers by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable identifier of the principal (user name, subject id).
    id: String,
    /// Roles granted to the principal.
    #[serde(default)]
    roles: Vec<String>,
    /// Free-form attributes (display name, email, tenant...).
    #[serde(default)]
    details: BTreeMap<String, serde_json::Value>,
}

impl Identity {
    /// Identity with no roles and no details.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self::builder(id).build()
    }

    /// Create a new `Identity` builder
    #[must_use]
    pub fn builder(id: impl Into<String>) -> IdentityBuilder {
        IdentityBuilder {
            id: id.into(),
            roles: Vec::new(),
            details: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    #[must_use]
    pub fn details(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.details
    }

    #[must_use]
    pub fn detail(&self, name: &str) -> Option<&serde_json::Value> {
        self.details.get(name)
    }
}

pub struct IdentityBuilder {
    id: String,
    roles: Vec<String>,
    details: BTreeMap<String, serde_json::Value>,
}

impl IdentityBuilder {
    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    #[must_use]
    pub fn roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    #[must_use]
    pub fn detail(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.details.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn details(mut self, details: BTreeMap<String, serde_json::Value>) -> Self {
        self.details = details;
        self
    }

    #[must_use]
    pub fn build(self) -> Identity {
        Identity {
            id: self.id,
            roles: self.roles,
            details: self.details,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_identity_is_bare() {
        let identity = Identity::new("user-42");

        assert_eq!(identity.id(), "user-42");
        assert!(identity.roles().is_empty());
        assert!(identity.details().is_empty());
    }

    #[test]
    fn builder_collects_roles_and_details() {
        let identity = Identity::builder("alice")
            .role("admin")
            .role("editor")
            .detail("email", json!("alice@example.com"))
            .build();

        assert!(identity.has_role("admin"));
        assert!(!identity.has_role("viewer"));
        assert_eq!(identity.roles(), &["admin", "editor"]);
        assert_eq!(identity.detail("email"), Some(&json!("alice@example.com")));
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let identity: Identity = serde_json::from_value(json!({ "id": "svc" })).unwrap();

        assert_eq!(identity, Identity::new("svc"));
    }

    #[test]
    fn serializes_all_fields() {
        let identity = Identity::builder("bob")
            .roles(vec!["reader".to_owned()])
            .detail("tenant", json!("t-1"))
            .build();

        let value = serde_json::to_value(&identity).unwrap();

        assert_eq!(
            value,
            json!({ "id": "bob", "roles": ["reader"], "details": { "tenant": "t-1" } })
        );
    }
}
