//! Capability facets composed into concrete resources
//!
//! Each facet is a plain struct flattened into the resource record plus an
//! accessor trait, so generic code can ask "is this archived?" without
//! knowing the concrete resource type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::resource::null_as_default;

/// Who owns a resource, depending on the auth context it was created under
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ownership {
    pub guest_id: Option<i64>,
    pub identity_id: Option<i64>,
    pub organization_id: Option<i64>,
}

/// The single meaningful owner of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Guest(i64),
    Identity(i64),
    Organization(i64),
}

impl Ownership {
    /// First owner identifier that is set, checked guest → identity →
    /// organization.
    pub fn owner(&self) -> Option<Owner> {
        self.guest_id
            .map(Owner::Guest)
            .or(self.identity_id.map(Owner::Identity))
            .or(self.organization_id.map(Owner::Organization))
    }
}

/// Soft-delete markers. Both `None` means the resource is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Archival {
    pub archived_at: Option<DateTime<Utc>>,
    pub archived_by_id: Option<i64>,
}

impl Archival {
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}

/// Server-side asynchronous processing state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundTask {
    /// Free-form label chosen by the server (e.g. "pending", "done")
    pub state: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub error: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl BackgroundTask {
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn failed(&self) -> bool {
        self.error
    }
}

/// Resources that record an owner
pub trait Owned {
    fn ownership(&self) -> &Ownership;

    fn owner(&self) -> Option<Owner> {
        self.ownership().owner()
    }
}

/// Resources that can be archived
pub trait Archivable {
    fn archival(&self) -> &Archival;

    fn is_archived(&self) -> bool {
        self.archival().is_archived()
    }
}

/// Resources processed by a server-side background task
pub trait BackgroundTasked {
    fn background_task(&self) -> &BackgroundTask;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_owner_prefers_guest() {
        let ownership = Ownership { guest_id: Some(4), identity_id: Some(9), organization_id: None };
        assert_eq!(ownership.owner(), Some(Owner::Guest(4)));
    }

    #[test]
    fn test_owner_falls_through_to_organization() {
        let ownership = Ownership { organization_id: Some(12), ..Default::default() };
        assert_eq!(ownership.owner(), Some(Owner::Organization(12)));
        assert_eq!(Ownership::default().owner(), None);
    }

    #[test]
    fn test_null_archival_is_active() {
        let archival: Archival =
            serde_json::from_value(json!({ "archived_at": null, "archived_by_id": null })).unwrap();
        assert!(!archival.is_archived());
    }

    #[test]
    fn test_background_task_decodes_completion() {
        let task: BackgroundTask = serde_json::from_value(json!({
            "state": "done",
            "error": false,
            "completed_at": "2024-06-02T08:30:00Z"
        }))
        .unwrap();

        assert_eq!(task.state.as_deref(), Some("done"));
        assert!(task.is_complete());
        assert!(!task.failed());
    }

    #[test]
    fn test_null_error_flag_is_not_failed() {
        let task: BackgroundTask =
            serde_json::from_value(json!({ "state": null, "error": null })).unwrap();
        assert!(!task.failed());
    }
}
