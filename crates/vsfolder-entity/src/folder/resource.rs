//! Persisted resource record.

use serde::{Deserialize, Serialize};

/// The state of one `vsphere_folder` resource instance as the plugin host
/// stores it.
///
/// Attribute values are kept exactly as configured; [`super::FolderSpec`]
/// is the validated view used by the folder services.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceData {
    /// Resource identity, `"<datacenter>/<path>"`. `None` means the resource
    /// does not exist (never created, deleted, or gone from inventory).
    #[serde(default)]
    pub id: Option<String>,
    /// Datacenter name. Empty selects the default datacenter.
    #[serde(default)]
    pub datacenter: String,
    /// Folder path relative to the datacenter VM folder.
    pub path: String,
    /// Computed on create: the part of `path` that already existed.
    #[serde(default)]
    pub existing_path: Option<String>,
}

impl ResourceData {
    /// Create a new, not-yet-applied record.
    pub fn new(datacenter: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: None,
            datacenter: datacenter.into(),
            path: path.into(),
            existing_path: None,
        }
    }

    /// Set the resource identity.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Clear the resource identity.
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    /// Whether the resource currently exists.
    pub fn exists(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_record() {
        let data: ResourceData = serde_json::from_str(r#"{"path": "dev/team-a"}"#).unwrap();
        assert_eq!(data.datacenter, "");
        assert!(data.existing_path.is_none());
        assert!(!data.exists());
    }

    #[test]
    fn test_empty_id_does_not_exist() {
        let mut data = ResourceData::new("dc1", "dev");
        data.set_id("");
        assert!(!data.exists());
        data.set_id("dc1/dev");
        assert!(data.exists());
        data.clear_id();
        assert_eq!(data.id, None);
    }
}
