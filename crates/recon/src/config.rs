use serde::{Deserialize, Serialize};

use crate::error::ReconError;
use crate::matcher::normalize;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Sheet names and logical column names for one sync run.
///
/// Every section has defaults matching the usual roster export and shorts
/// workbook, so an empty TOML document is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    #[serde(default)]
    pub sheets: SheetNames,
    #[serde(default)]
    pub master: MasterColumns,
    #[serde(default)]
    pub data: DataColumns,
    #[serde(default)]
    pub lookup: LookupColumns,
}

// ---------------------------------------------------------------------------
// Sheets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetNames {
    pub master: String,
    pub data: String,
    pub lookup: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            master: "Sheet1".into(),
            data: "Data".into(),
            lookup: "vlookup".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Column sets
// ---------------------------------------------------------------------------

/// Master roster columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MasterColumns {
    pub identifier: String,
    pub first_name: String,
    pub last_name: String,
    pub manager_name: String,
    /// Leading rows inspected when locating the header. `0` pins it to row 1.
    pub header_scan_rows: usize,
}

impl Default for MasterColumns {
    fn default() -> Self {
        Self {
            identifier: "Colleague ID".into(),
            first_name: "Preferred First Name".into(),
            last_name: "Legal Last Name".into(),
            manager_name: "Manager Name".into(),
            header_scan_rows: 10,
        }
    }
}

impl MasterColumns {
    pub fn fields(&self) -> [&str; 4] {
        [
            self.identifier.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.manager_name.as_str(),
        ]
    }
}

/// Work-list source columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataColumns {
    pub identifier: String,
}

impl Default for DataColumns {
    fn default() -> Self {
        Self { identifier: "Driver ID".into() }
    }
}

/// Lookup table columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LookupColumns {
    pub driver_name: String,
    pub driver_number: String,
    pub supervisor: String,
}

impl Default for LookupColumns {
    fn default() -> Self {
        Self {
            driver_name: "Driver Name".into(),
            driver_number: "Driver Number".into(),
            supervisor: "Supervisor".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl SyncConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: SyncConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        let sheets = [
            ("sheets.master", &self.sheets.master),
            ("sheets.data", &self.sheets.data),
            ("sheets.lookup", &self.sheets.lookup),
        ];
        for (key, name) in sheets {
            if name.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!("{key} must not be empty")));
            }
        }

        // A field that normalizes to nothing would match no header at all.
        let fields = [
            ("master.identifier", &self.master.identifier),
            ("master.first_name", &self.master.first_name),
            ("master.last_name", &self.master.last_name),
            ("master.manager_name", &self.master.manager_name),
            ("data.identifier", &self.data.identifier),
            ("lookup.driver_name", &self.lookup.driver_name),
            ("lookup.driver_number", &self.lookup.driver_number),
            ("lookup.supervisor", &self.lookup.supervisor),
        ];
        for (key, field) in fields {
            if normalize(field).is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "{key} = {field:?} has no letters or digits"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
