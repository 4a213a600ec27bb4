//! Descriptors of whole database objects.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::descriptor::{ColumnDescriptor, ConstraintDescriptor, ParameterDirection};

/// Metadata category of a database object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Table,
    Column,
    View,
    Procedure,
    Function,
    Parameter,
    Trigger,
    Sequence,
    Domain,
    Exception,
    Index,
    Role,
    User,
    Collation,
    Tablespace,
    Job,
    Package,
}

impl ObjectKind {
    /// Keyword used in `COMMENT ON` and in generated names.
    pub fn meta_tag(&self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::Column => "COLUMN",
            Self::View => "VIEW",
            Self::Procedure => "PROCEDURE",
            Self::Function => "FUNCTION",
            Self::Parameter => "PARAMETER",
            Self::Trigger => "TRIGGER",
            Self::Sequence => "SEQUENCE",
            Self::Domain => "DOMAIN",
            Self::Exception => "EXCEPTION",
            Self::Index => "INDEX",
            Self::Role => "ROLE",
            Self::User => "USER",
            Self::Collation => "COLLATION",
            Self::Tablespace => "TABLESPACE",
            Self::Job => "JOB",
            Self::Package => "PACKAGE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let kind = match s.trim().to_uppercase().as_str() {
            "TABLE" => Self::Table,
            "COLUMN" => Self::Column,
            "VIEW" => Self::View,
            "PROCEDURE" => Self::Procedure,
            "FUNCTION" => Self::Function,
            "PARAMETER" => Self::Parameter,
            "TRIGGER" => Self::Trigger,
            "SEQUENCE" | "GENERATOR" => Self::Sequence,
            "DOMAIN" => Self::Domain,
            "EXCEPTION" => Self::Exception,
            "INDEX" => Self::Index,
            "ROLE" => Self::Role,
            "USER" => Self::User,
            "COLLATION" => Self::Collation,
            "TABLESPACE" => Self::Tablespace,
            "JOB" => Self::Job,
            "PACKAGE" => Self::Package,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlSecurity {
    Definer,
    Invoker,
}

impl SqlSecurity {
    pub fn clause(&self) -> &'static str {
        match self {
            Self::Definer => "SQL SECURITY DEFINER",
            Self::Invoker => "SQL SECURITY INVOKER",
        }
    }
}

/// Lifetime of rows in a global temporary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporaryKind {
    #[default]
    DeleteRows,
    PreserveRows,
}

impl TemporaryKind {
    pub fn clause(&self) -> &'static str {
        match self {
            Self::DeleteRows => "ON COMMIT DELETE ROWS",
            Self::PreserveRows => "ON COMMIT PRESERVE ROWS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
    pub constraints: Vec<ConstraintDescriptor>,
    /// The table is already in the database; its primary key is not redeclared.
    pub exists: bool,
    /// `Some` makes this a global temporary table.
    pub temporary: Option<TemporaryKind>,
    pub external_file: Option<String>,
    pub adapter: Option<String>,
    pub sql_security: Option<SqlSecurity>,
    pub tablespace: Option<String>,
    pub comment: Option<String>,
}

impl TableDescriptor {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            name: name.into(),
            columns,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcedureDescriptor {
    pub name: String,
    pub inputs: Vec<ColumnDescriptor>,
    pub outputs: Vec<ColumnDescriptor>,
    /// Local variables, declared ahead of the body.
    pub variables: Vec<ColumnDescriptor>,
    pub sql_security: Option<SqlSecurity>,
    pub authid: Option<String>,
    /// External routine entry point; replaces the body when set.
    pub entry_point: Option<String>,
    pub engine: Option<String>,
    pub body: String,
    pub comment: Option<String>,
}

impl ProcedureDescriptor {
    /// Build from one parameter list in declaration order, split by direction.
    pub fn from_parameters(name: impl Into<String>, parameters: Vec<ColumnDescriptor>) -> Self {
        let mut procedure = Self {
            name: name.into(),
            ..Self::default()
        };
        for p in parameters {
            match p.direction {
                ParameterDirection::Input => procedure.inputs.push(p),
                ParameterDirection::Output => procedure.outputs.push(p),
                ParameterDirection::Variable => procedure.variables.push(p),
            }
        }
        procedure
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionDescriptor {
    pub name: String,
    pub arguments: Vec<ColumnDescriptor>,
    pub variables: Vec<ColumnDescriptor>,
    pub return_type: Option<ColumnDescriptor>,
    pub deterministic: bool,
    pub sql_security: Option<SqlSecurity>,
    pub entry_point: Option<String>,
    pub engine: Option<String>,
    pub body: String,
    pub comment: Option<String>,
}

impl FunctionDescriptor {
    /// Build from catalog arguments; the output argument is the return type.
    pub fn from_arguments(name: impl Into<String>, arguments: Vec<ColumnDescriptor>) -> Self {
        let mut function = Self {
            name: name.into(),
            ..Self::default()
        };
        for a in arguments {
            match a.direction {
                ParameterDirection::Input => function.arguments.push(a),
                ParameterDirection::Output => function.return_type = Some(a),
                ParameterDirection::Variable => function.variables.push(a),
            }
        }
        function
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerDescriptor {
    pub name: String,
    /// Absent for database and DDL triggers.
    pub table: Option<String>,
    pub active: bool,
    /// Event keywords, e.g. `BEFORE INSERT OR UPDATE` or `ON CONNECT`.
    pub trigger_type: String,
    pub position: i32,
    pub sql_security: Option<SqlSecurity>,
    pub entry_point: Option<String>,
    pub engine: Option<String>,
    /// Full source starting at `AS`.
    pub source: Option<String>,
    pub comment: Option<String>,
}

impl Default for TriggerDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            table: None,
            active: true,
            trigger_type: String::new(),
            position: 0,
            sql_security: None,
            entry_point: None,
            engine: None,
            source: None,
            comment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewDescriptor {
    pub name: String,
    /// Explicit column list, already comma separated.
    pub columns: Option<String>,
    pub select: String,
    pub exists: bool,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceDescriptor {
    pub name: String,
    pub start_value: i64,
    pub increment: i64,
    pub exists: bool,
    pub comment: Option<String>,
}

impl Default for SequenceDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            start_value: 0,
            increment: 1,
            exists: false,
            comment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDescriptor {
    pub name: String,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    /// Empty means "leave unchanged" when altering.
    pub password: Option<String>,
    pub active: bool,
    pub admin: bool,
    pub plugin: Option<String>,
    pub tags: BTreeMap<String, String>,
    pub comment: Option<String>,
}

impl Default for UserDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            first_name: None,
            middle_name: None,
            last_name: None,
            password: None,
            active: true,
            admin: false,
            plugin: None,
            tags: BTreeMap::new(),
            comment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollationDescriptor {
    pub name: String,
    pub charset: String,
    pub base_collation: Option<String>,
    /// The base collation is an ICU/external name wrapped in `EXTERNAL('...')`.
    pub external: bool,
    pub pad_space: bool,
    pub case_sensitive: bool,
    pub accent_sensitive: bool,
    pub attributes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TablespaceDescriptor {
    pub name: String,
    pub file: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// Shell command run by the scheduler.
    Command,
    /// PSQL block.
    #[default]
    Sql,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDescriptor {
    pub name: String,
    /// Cron expression.
    pub schedule: String,
    pub active: bool,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    /// Written as `job_kind` so it does not clash with a request's `kind` tag.
    #[serde(rename = "job_kind")]
    pub kind: JobKind,
    pub source: String,
}

impl Default for JobDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            schedule: String::new(),
            active: true,
            start_date: None,
            end_date: None,
            kind: JobKind::default(),
            source: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, direction: ParameterDirection) -> ColumnDescriptor {
        ColumnDescriptor {
            direction,
            ..ColumnDescriptor::new(name, "INTEGER")
        }
    }

    #[test]
    fn test_object_kind_from_str() {
        assert_eq!(ObjectKind::from_str("table"), Some(ObjectKind::Table));
        assert_eq!(ObjectKind::from_str("GENERATOR"), Some(ObjectKind::Sequence));
        assert_eq!(ObjectKind::from_str("widget"), None);
        assert_eq!(ObjectKind::Sequence.meta_tag(), "SEQUENCE");
    }

    #[test]
    fn test_procedure_from_parameters() {
        let p = ProcedureDescriptor::from_parameters(
            "P",
            vec![
                param("A", ParameterDirection::Input),
                param("R", ParameterDirection::Output),
                param("B", ParameterDirection::Input),
            ],
        );
        assert_eq!(p.inputs.len(), 2);
        assert_eq!(p.inputs[1].name(), "B");
        assert_eq!(p.outputs[0].name(), "R");
    }

    #[test]
    fn test_function_from_arguments() {
        let f = FunctionDescriptor::from_arguments(
            "F",
            vec![param("X", ParameterDirection::Input), param("RES", ParameterDirection::Output)],
        );
        assert_eq!(f.arguments.len(), 1);
        assert_eq!(f.return_type.as_ref().map(|r| r.name()), Some("RES"));
    }
}
