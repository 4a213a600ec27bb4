//! Typed attribute and constraint descriptors.
//!
//! A `ColumnDescriptor` stands for anything that carries a type: a table
//! column, a domain, a procedure parameter, a local variable or a function
//! return value. Descriptors are plain values owned by the caller.

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::types;

/// Domains generated by the server for plain-typed columns.
pub const SYSTEM_DOMAIN_PREFIX: &str = "RDB$";

/// Collation value meaning "no explicit collation".
pub const NO_COLLATION: &str = "NONE";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultValue {
    pub value: Option<String>,
    /// Set when the value came from the user rather than from inheritance.
    pub explicit: bool,
}

impl DefaultValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            explicit: true,
        }
    }

    /// The value, if it is set to something other than blanks.
    pub fn get(&self) -> Option<&str> {
        non_blank(self.value.as_deref())
    }
}

/// Autoincrement policy of a table column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Autoincrement {
    /// `GENERATED BY DEFAULT AS IDENTITY` instead of a sequence and trigger.
    pub identity: bool,
    pub start_value: i64,
    pub sequence_name: Option<String>,
    pub create_sequence: bool,
    pub trigger_name: Option<String>,
}

/// Source of a `TYPE OF` reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum TypeOf {
    Domain,
    Column { table: String, column: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorSpec {
    pub scroll: bool,
    pub select: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterDirection {
    #[default]
    Input,
    Output,
    Variable,
}

/// Which attributes were edited since the descriptor was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeFlags {
    pub name: bool,
    pub default: bool,
    pub required: bool,
    pub check: bool,
    #[serde(rename = "type")]
    pub type_: bool,
    pub description: bool,
}

impl ChangeFlags {
    /// Compare two versions of the same attribute field by field.
    pub fn between(before: &ColumnDescriptor, after: &ColumnDescriptor) -> Self {
        Self {
            name: before.name != after.name,
            default: before.default_value.get() != after.default_value.get(),
            required: before.not_null != after.not_null,
            check: non_blank(before.check.as_deref()) != non_blank(after.check.as_deref()),
            type_: before.type_signature() != after.type_signature(),
            description: non_blank(before.description.as_deref())
                != non_blank(after.description.as_deref()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnDescriptor {
    pub name: Option<String>,
    pub sql_type: i32,
    pub type_name: Option<String>,
    pub size: i32,
    pub scale: i32,
    pub subtype: i32,
    pub segment_size: i32,
    pub not_null: bool,
    /// Empty or absent means the attribute has no domain.
    pub domain: Option<String>,
    pub default_value: DefaultValue,
    pub check: Option<String>,
    pub collation: Option<String>,
    pub charset: Option<String>,
    pub description: Option<String>,
    /// Write the description of a local variable as `--` instead of `/* */`.
    pub description_as_single_comment: bool,
    pub computed_by: Option<String>,
    pub autoincrement: Option<Autoincrement>,
    pub primary_key: bool,
    pub changes: ChangeFlags,
    pub cursor: Option<CursorSpec>,
    pub type_of: Option<TypeOf>,
    pub direction: ParameterDirection,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self {
            name: Some(name.into()),
            sql_type: types::code_for_name(&type_name).unwrap_or(types::OTHER),
            type_name: Some(type_name),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn has_name(&self) -> bool {
        non_blank(self.name.as_deref()).is_some()
    }

    /// The domain name when it was chosen by a user rather than generated.
    pub fn user_domain(&self) -> Option<&str> {
        non_blank(self.domain.as_deref()).filter(|d| !d.starts_with(SYSTEM_DOMAIN_PREFIX))
    }

    pub fn computed_by(&self) -> Option<&str> {
        non_blank(self.computed_by.as_deref())
    }

    pub fn check(&self) -> Option<&str> {
        non_blank(self.check.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }

    /// Collation to emit, skipping the "no collation" marker.
    pub fn collation(&self) -> Option<&str> {
        non_blank(self.collation.as_deref()).filter(|c| !c.eq_ignore_ascii_case(NO_COLLATION))
    }

    pub fn is_identity(&self) -> bool {
        self.autoincrement.as_ref().is_some_and(|a| a.identity)
    }

    /// Type code used to pick the literal form of defaults. Descriptors read
    /// from JSON usually carry only `type_name`, so an unset code is resolved
    /// from the name.
    pub fn type_code(&self) -> i32 {
        if self.sql_type != types::NULL && self.sql_type != types::OTHER {
            return self.sql_type;
        }
        self.type_name
            .as_deref()
            .and_then(types::code_for_name)
            .unwrap_or(self.sql_type)
    }

    fn type_signature(&self) -> (i32, Option<String>, i32, i32, i32, Option<&str>, Option<&TypeOf>) {
        (
            self.type_code(),
            self.type_name.as_ref().map(|t| t.trim().to_uppercase()),
            self.size,
            self.scale,
            self.subtype,
            non_blank(self.charset.as_deref()),
            self.type_of.as_ref(),
        )
    }

    /// Record the edits made since `snapshot` in the change flags.
    pub fn track_changes(&mut self, snapshot: &ColumnDescriptor) {
        self.changes = ChangeFlags::between(snapshot, self);
    }

    /// Full type text, e.g. `VARCHAR(40) CHARACTER SET UTF8` or `TYPE OF COLUMN T.C`.
    pub fn formatted_data_type(&self, dialect: &Dialect) -> String {
        match &self.type_of {
            Some(TypeOf::Domain) => {
                return format!("TYPE OF {}", dialect.format(self.domain.as_deref().unwrap_or("")));
            }
            Some(TypeOf::Column { table, column }) => {
                return format!(
                    "TYPE OF COLUMN {}.{}",
                    dialect.format(table),
                    dialect.format(column)
                );
            }
            None => {}
        }

        let Some(type_name) = non_blank(self.type_name.as_deref()) else {
            return String::new();
        };
        let type_name = type_name.trim().to_uppercase();
        if type_name.contains('(') {
            return type_name;
        }

        let charset = non_blank(self.charset.as_deref());
        let mut out = type_name.clone();

        match type_name.as_str() {
            "CHAR" | "VARCHAR" | "NCHAR" | "CHARACTER" | "CHARACTER VARYING" => {
                if self.size > 0 {
                    out.push_str(&format!("({})", self.size));
                }
                if let Some(cs) = charset {
                    out.push_str(&format!(" CHARACTER SET {cs}"));
                }
            }
            "BINARY" | "VARBINARY" => {
                if self.size > 0 {
                    out.push_str(&format!("({})", self.size));
                }
            }
            "NUMERIC" | "DECIMAL" => {
                if self.size > 0 {
                    out.push_str(&format!("({}, {})", self.size, self.scale));
                }
            }
            "BLOB" => {
                out.push_str(&format!(" SUB_TYPE {}", self.subtype));
                if self.segment_size > 0 {
                    out.push_str(&format!(" SEGMENT SIZE {}", self.segment_size));
                }
                if self.subtype == 1 {
                    if let Some(cs) = charset {
                        out.push_str(&format!(" CHARACTER SET {cs}"));
                    }
                }
            }
            _ => {}
        }

        out
    }

    pub fn formatted_domain(&self, dialect: &Dialect) -> String {
        dialect.format(self.domain.as_deref().unwrap_or(""))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    PrimaryKey,
    ForeignKey,
    Unique,
    Check,
}

impl ConstraintKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::PrimaryKey => "PRIMARY KEY",
            Self::ForeignKey => "FOREIGN KEY",
            Self::Unique => "UNIQUE",
            Self::Check => "CHECK",
        }
    }

    /// Prefix of generated constraint names.
    pub fn name_stem(&self) -> &'static str {
        match self {
            Self::PrimaryKey => "PK",
            Self::ForeignKey => "FK",
            Self::Unique => "UQ",
            Self::Check => "CHECK",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferentialAction {
    /// Implicit when nothing is specified, so it is never written out.
    #[default]
    Restrict,
    NoAction,
    Cascade,
    SetNull,
    SetDefault,
}

impl ReferentialAction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintDescriptor {
    pub name: Option<String>,
    pub kind: Option<ConstraintKind>,
    /// Participating columns, unformatted.
    pub columns: Vec<String>,
    pub check: Option<String>,
    pub ref_table: Option<String>,
    pub ref_columns: Vec<String>,
    pub update_rule: Option<ReferentialAction>,
    pub delete_rule: Option<ReferentialAction>,
    pub tablespace: Option<String>,
    pub generated_name: bool,
}

impl ConstraintDescriptor {
    pub fn new(name: Option<&str>, kind: ConstraintKind, column: &str) -> Self {
        Self {
            name: name.map(str::to_string),
            kind: Some(kind),
            columns: vec![column.to_string()],
            ..Self::default()
        }
    }

    pub fn foreign_key(name: Option<&str>, column: &str, ref_table: &str, ref_column: &str) -> Self {
        Self {
            ref_table: Some(ref_table.to_string()),
            ref_columns: vec![ref_column.to_string()],
            ..Self::new(name, ConstraintKind::ForeignKey, column)
        }
    }

    pub fn check(name: Option<&str>, expression: &str) -> Self {
        Self {
            name: name.map(str::to_string),
            kind: Some(ConstraintKind::Check),
            check: Some(expression.to_string()),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Formatted participating columns, comma separated.
    pub fn column_text(&self, dialect: &Dialect) -> String {
        join_formatted(&self.columns, dialect)
    }

    pub fn ref_column_text(&self, dialect: &Dialect) -> String {
        join_formatted(&self.ref_columns, dialect)
    }
}

fn join_formatted(names: &[String], dialect: &Dialect) -> String {
    names
        .iter()
        .map(|n| dialect.format(n))
        .collect::<Vec<_>>()
        .join(",")
}

/// `Some(s)` unless `s` is absent or only whitespace.
pub(crate) fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_code_from_name() {
        let mut status = ColumnDescriptor::default();
        status.type_name = Some("varchar".into());
        assert_eq!(status.type_code(), types::VARCHAR);

        status.sql_type = types::INTEGER;
        assert_eq!(status.type_code(), types::INTEGER);

        status.sql_type = types::OTHER;
        status.type_name = Some("GEOMETRY".into());
        assert_eq!(status.type_code(), types::OTHER);
    }

    #[test]
    fn test_loaded_and_built_descriptors_compare_equal() {
        let built = ColumnDescriptor::new("D_CODE", "VARCHAR");
        let mut loaded = ColumnDescriptor::default();
        loaded.name = Some("D_CODE".into());
        loaded.type_name = Some("VARCHAR".into());
        assert!(ChangeFlags::between(&built, &loaded).is_empty());
    }

    #[test]
    fn test_formatted_data_type() {
        let d = Dialect::default();

        let mut name = ColumnDescriptor::new("NAME", "varchar");
        name.size = 40;
        name.charset = Some("UTF8".into());
        assert_eq!(name.formatted_data_type(&d), "VARCHAR(40) CHARACTER SET UTF8");

        let mut salary = ColumnDescriptor::new("SALARY", "NUMERIC");
        salary.size = 10;
        salary.scale = 2;
        assert_eq!(salary.formatted_data_type(&d), "NUMERIC(10, 2)");

        let mut notes = ColumnDescriptor::new("NOTES", "BLOB");
        notes.subtype = 1;
        notes.segment_size = 80;
        assert_eq!(notes.formatted_data_type(&d), "BLOB SUB_TYPE 1 SEGMENT SIZE 80");

        assert_eq!(ColumnDescriptor::new("ID", "INTEGER").formatted_data_type(&d), "INTEGER");
    }

    #[test]
    fn test_type_of() {
        let d = Dialect::default();

        let mut p = ColumnDescriptor::default();
        p.domain = Some("D_MONEY".into());
        p.type_of = Some(TypeOf::Domain);
        assert_eq!(p.formatted_data_type(&d), "TYPE OF D_MONEY");

        p.type_of = Some(TypeOf::Column {
            table: "EMPLOYEE".into(),
            column: "last name".into(),
        });
        assert_eq!(p.formatted_data_type(&d), "TYPE OF COLUMN EMPLOYEE.\"last name\"");
    }

    #[test]
    fn test_user_domain_skips_system_domains() {
        let mut c = ColumnDescriptor::new("ID", "INTEGER");
        c.domain = Some("RDB$12".into());
        assert_eq!(c.user_domain(), None);
        c.domain = Some("  ".into());
        assert_eq!(c.user_domain(), None);
        c.domain = Some("D_ID".into());
        assert_eq!(c.user_domain(), Some("D_ID"));
    }

    #[test]
    fn test_change_flags() {
        let before = ColumnDescriptor::new("D_CODE", "VARCHAR");
        let mut after = before.clone();
        assert!(ChangeFlags::between(&before, &after).is_empty());

        after.description = Some("".into());
        assert!(ChangeFlags::between(&before, &after).is_empty());

        after.not_null = true;
        after.default_value = DefaultValue::new("X");
        let flags = ChangeFlags::between(&before, &after);
        assert!(flags.required && flags.default);
        assert!(!flags.name && !flags.check && !flags.type_ && !flags.description);

        after.track_changes(&before);
        assert_eq!(after.changes, flags);
    }

    #[test]
    fn test_collation_marker() {
        let mut c = ColumnDescriptor::new("NAME", "VARCHAR");
        c.collation = Some("NONE".into());
        assert_eq!(c.collation(), None);
        c.collation = Some("UNICODE_CI".into());
        assert_eq!(c.collation(), Some("UNICODE_CI"));
    }

    #[test]
    fn test_constraint_column_text() {
        let d = Dialect::default();
        let mut c = ConstraintDescriptor::new(Some("UQ1"), ConstraintKind::Unique, "A");
        c.columns.push("b".into());
        assert_eq!(c.column_count(), 2);
        assert_eq!(c.column_text(&d), "A,\"b\"");
    }
}
