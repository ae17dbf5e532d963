//! Session facts: fixed identity/context values sent with every authz request.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Identifier of a session fact, as it appears under `sysinfo`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FactId {
    /// Name of the user being authenticated.
    Username,
    /// Name of the service requesting authentication.
    Service,
    /// Name of the requesting user.
    RequestingUsername,
    /// Host the request originates from.
    RequestingHostname,
}

impl FactId {
    /// All fact ids, in the order they are reported.
    pub const ALL: [FactId; 4] = [
        FactId::Username,
        FactId::Service,
        FactId::RequestingUsername,
        FactId::RequestingHostname,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FactId::Username => "pam_username",
            FactId::Service => "pam_service",
            FactId::RequestingUsername => "pam_req_username",
            FactId::RequestingHostname => "pam_req_hostname",
        }
    }
}

impl core::fmt::Display for FactId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered fact id → value mapping, immutable once built.
///
/// Every known fact is present; unavailable ones hold the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFacts {
    items: Vec<(FactId, String)>,
}

impl SessionFacts {
    /// Build the full fact set from a lookup; missing values become `""`.
    pub fn collect<F>(mut lookup: F) -> Self
    where
        F: FnMut(FactId) -> Option<String>,
    {
        let items = FactId::ALL
            .iter()
            .map(|id| {
                let value = lookup(*id).unwrap_or_default();
                tracing::debug!(fact = %id, value = %value, "loaded session fact");
                (*id, value)
            })
            .collect();

        Self { items }
    }

    pub fn get(&self, id: FactId) -> &str {
        self.items
            .iter()
            .find(|(k, _)| *k == id)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (FactId, &str)> {
        self.items.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Serialize for SessionFacts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (id, value) in &self.items {
            map.serialize_entry(id.as_str(), value)?;
        }
        map.end()
    }
}

/// Source of session facts, consulted once at the start of a session.
pub trait FactsProvider {
    fn facts(&self) -> SessionFacts;
}

/// Facts known up front (e.g. supplied on a command line).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticFacts {
    pub username: Option<String>,
    pub service: Option<String>,
    pub requesting_username: Option<String>,
    pub requesting_hostname: Option<String>,
}

impl FactsProvider for StaticFacts {
    fn facts(&self) -> SessionFacts {
        SessionFacts::collect(|id| match id {
            FactId::Username => self.username.clone(),
            FactId::Service => self.service.clone(),
            FactId::RequestingUsername => self.requesting_username.clone(),
            FactId::RequestingHostname => self.requesting_hostname.clone(),
        })
    }
}
