//! Attribute schema of the `vsphere_folder` resource.

use serde::Serialize;

/// Resource type name as registered with the plugin host.
pub const RESOURCE_NAME: &str = "vsphere_folder";

/// Value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    /// A string value.
    String,
}

/// Declaration of one resource attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSchema {
    /// Attribute name.
    pub name: &'static str,
    /// Value type.
    pub kind: AttributeType,
    /// Must be set by the user.
    pub required: bool,
    /// May be set by the user.
    pub optional: bool,
    /// Filled in by the resource.
    pub computed: bool,
    /// A change forces the resource to be replaced.
    pub force_new: bool,
    /// Human-readable description.
    pub description: &'static str,
}

/// Full schema of a resource type.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceSchema {
    /// Resource type name.
    pub name: &'static str,
    /// Attribute declarations, in declaration order.
    pub attributes: Vec<AttributeSchema>,
}

impl ResourceSchema {
    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// Schema of the `vsphere_folder` resource.
pub fn folder_schema() -> ResourceSchema {
    ResourceSchema {
        name: RESOURCE_NAME,
        attributes: vec![
            AttributeSchema {
                name: "datacenter",
                kind: AttributeType::String,
                required: false,
                optional: true,
                computed: false,
                force_new: true,
                description: "Datacenter to create the folder in; empty uses the default datacenter",
            },
            AttributeSchema {
                name: "path",
                kind: AttributeType::String,
                required: true,
                optional: false,
                computed: false,
                force_new: true,
                description: "Folder path relative to the datacenter VM folder",
            },
            AttributeSchema {
                name: "existing_path",
                kind: AttributeType::String,
                required: false,
                optional: false,
                computed: true,
                force_new: false,
                description: "Part of path that already existed before the folder was created",
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_schema_attributes() {
        let schema = folder_schema();
        assert_eq!(schema.name, "vsphere_folder");
        assert!(schema.attribute("path").unwrap().required);
        assert!(schema.attribute("datacenter").unwrap().force_new);
        let existing = schema.attribute("existing_path").unwrap();
        assert!(existing.computed && !existing.optional);
        assert!(schema.attribute("id").is_none());
    }
}
