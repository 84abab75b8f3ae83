//! Resource schema CLI command.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use vsfolder_core::error::AppError;
use vsfolder_entity::schema::{AttributeSchema, folder_schema};

/// Attribute display row
#[derive(Debug, Serialize, Tabled)]
struct AttributeRow {
    /// Name
    name: String,
    /// Mode
    mode: String,
    /// Forces replacement
    force_new: bool,
    /// Description
    description: String,
}

impl From<&AttributeSchema> for AttributeRow {
    fn from(attr: &AttributeSchema) -> Self {
        let mode = if attr.required {
            "required"
        } else if attr.optional {
            "optional"
        } else {
            "computed"
        };
        Self {
            name: attr.name.to_string(),
            mode: mode.to_string(),
            force_new: attr.force_new,
            description: attr.description.to_string(),
        }
    }
}

/// Print the `vsphere_folder` schema
pub async fn execute(format: OutputFormat) -> Result<(), AppError> {
    let schema = folder_schema();
    match format {
        OutputFormat::Json => output::print_json(&schema, "{}"),
        OutputFormat::Table => {
            println!("{}", schema.name);
            let rows: Vec<AttributeRow> = schema.attributes.iter().map(Into::into).collect();
            output::print_list(&rows, format);
        }
    }
    Ok(())
}
