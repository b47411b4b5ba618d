//! Registry consistency: write rules and filters must only name declared columns.

use crate::error::ConfigError;
use crate::schema::ResourceSchema;
use std::collections::HashSet;

pub fn validate(resource: &ResourceSchema) -> Result<(), ConfigError> {
    let columns: HashSet<&str> = resource.columns.iter().map(|c| c.name).collect();
    let insertable: HashSet<&str> = resource.insertable.iter().copied().collect();

    if let Some(pk) = resource.primary_key {
        if !columns.contains(pk) {
            return Err(ConfigError::MissingColumn {
                resource: resource.name,
                column: pk.to_string(),
            });
        }
        if insertable.contains(pk) || resource.updatable.contains(&pk) {
            return Err(ConfigError::Invalid(format!(
                "{}: primary key '{}' must not be writable",
                resource.name, pk
            )));
        }
    }

    for col in resource.insertable.iter().chain(resource.updatable) {
        if !columns.contains(col) {
            return Err(ConfigError::MissingColumn {
                resource: resource.name,
                column: (*col).to_string(),
            });
        }
    }

    for col in resource.required {
        if !insertable.contains(col) {
            return Err(ConfigError::Invalid(format!(
                "{}: required column '{}' is not insertable",
                resource.name, col
            )));
        }
    }

    for r in resource.rules {
        if !columns.contains(r.column) {
            return Err(ConfigError::MissingColumn {
                resource: resource.name,
                column: r.column.to_string(),
            });
        }
    }

    for f in resource.filters {
        if !columns.contains(f.column) {
            return Err(ConfigError::MissingColumn {
                resource: resource.name,
                column: f.column.to_string(),
            });
        }
    }

    if resource.primary_key.is_none() && !(resource.insertable.is_empty() && resource.updatable.is_empty()) {
        return Err(ConfigError::Invalid(format!(
            "{}: writable resources need a primary key",
            resource.name
        )));
    }

    Ok(())
}

/// Validate every registered resource; called once at startup.
pub fn validate_registry() -> Result<(), ConfigError> {
    let mut tables = HashSet::new();
    for resource in crate::schema::registry::ALL {
        validate(resource)?;
        if !tables.insert(resource.table) {
            return Err(ConfigError::Invalid(format!("duplicate table: {}", resource.table)));
        }
    }
    Ok(())
}
