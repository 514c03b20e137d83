use adsql_sql::ParamStyle;
use serde::Deserialize;

/// Engine configuration.
///
/// Every field has a default, so an empty document deserializes to
/// `Settings::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Storage format of the tables being queried.
    pub table_type: TableType,

    /// How parameter markers are written.
    pub param_style: ParamStyle,

    /// Whether blank character values read back as null. When unset, this
    /// follows the table type.
    pub blank_as_null: Option<bool>,

    /// Log how long each translation takes.
    pub log_timing: bool,
}

/// Table storage format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableType {
    /// FoxPro-compatible DBF with CDX indexes.
    Cdx,

    /// Visual FoxPro DBF.
    Vfp,

    /// Advantage proprietary tables.
    #[default]
    Adt,
}

impl Settings {
    /// Whether blank character values read back as null.
    ///
    /// DBF formats pad unused character fields with spaces, so blanks are
    /// treated as null for them unless configured otherwise.
    pub fn blank_strings_are_null(&self) -> bool {
        self.blank_as_null
            .unwrap_or(matches!(self.table_type, TableType::Cdx | TableType::Vfp))
    }
}
