//! Target dialect settings and the identifier/literal formatter.

use serde::{Deserialize, Serialize};

use crate::types;

/// Reserved words of the target grammar family that can never appear unquoted.
pub const DEFAULT_RESERVED: &[&str] = &[
    "ADD", "ADMIN", "ALL", "ALTER", "AND", "ANY", "AS", "AT", "AVG", "BEGIN", "BETWEEN", "BIGINT",
    "BLOB", "BOOLEAN", "BOTH", "BY", "CASE", "CAST", "CHAR", "CHARACTER", "CHECK", "CLOSE",
    "COLLATE", "COLUMN", "COMMIT", "CONNECT", "CONSTRAINT", "COUNT", "CREATE", "CROSS", "CURRENT",
    "CURRENT_DATE", "CURRENT_ROLE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "CURRENT_USER",
    "CURSOR", "DATE", "DAY", "DEC", "DECIMAL", "DECLARE", "DEFAULT", "DELETE", "DISCONNECT",
    "DISTINCT", "DOUBLE", "DROP", "ELSE", "END", "ESCAPE", "EXECUTE", "EXISTS", "EXTERNAL",
    "EXTRACT", "FALSE", "FETCH", "FILTER", "FLOAT", "FOR", "FOREIGN", "FROM", "FULL", "FUNCTION",
    "GLOBAL", "GRANT", "GROUP", "HAVING", "HOUR", "IN", "INDEX", "INNER", "INSERT", "INT",
    "INTEGER", "INTO", "IS", "JOIN", "KEY", "LEADING", "LEFT", "LIKE", "MAX", "MERGE", "MIN",
    "MINUTE", "MONTH", "NATURAL", "NCHAR", "NO", "NOT", "NULL", "NUMERIC", "OF", "ON", "ONLY",
    "OPEN", "OR", "ORDER", "OUTER", "PARAMETER", "POSITION", "PRECISION", "PRIMARY",
    "PROCEDURE", "REAL", "RECORD_VERSION", "REFERENCES", "RELEASE", "RETURN", "RETURNS",
    "REVOKE", "RIGHT", "ROLLBACK", "ROW", "ROWS", "SAVEPOINT", "SECOND", "SELECT", "SET",
    "SIMILAR", "SMALLINT", "SOME", "START", "SUM", "TABLE", "THEN", "TIME", "TIMESTAMP", "TO",
    "TRAILING", "TRIGGER", "TRIM", "TRUE", "UNION", "UNIQUE", "UNKNOWN", "UPDATE", "USER",
    "USING", "VALUE", "VALUES", "VARCHAR", "VARIABLE", "VARYING", "VIEW", "WHEN", "WHERE",
    "WHILE", "WITH", "YEAR",
];

/// Context variables that are valid default values without quoting.
const CONTEXT_VARIABLES: &[&str] = &[
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "CURRENT_USER",
    "CURRENT_ROLE",
    "CURRENT_CONNECTION",
    "CURRENT_TRANSACTION",
    "LOCALTIME",
    "LOCALTIMESTAMP",
    "USER",
];

/// Formatting rules of the target dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    /// Server major version.
    pub version: u32,
    /// Identifier quote character.
    pub quote: char,
    /// Quote every identifier, even the ones that are safe unquoted.
    pub always_quote: bool,
    pub reserved: Vec<String>,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            version: 3,
            quote: '"',
            always_quote: false,
            reserved: DEFAULT_RESERVED.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl Dialect {
    pub fn with_version(version: u32) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    /// Parse a server version such as `3`, `4.0` or `5.0.1`.
    pub fn from_version_str(s: &str) -> Option<Self> {
        let major = s.trim().split('.').next()?;
        major.parse::<u32>().ok().map(Self::with_version)
    }

    /// Servers from version 3 on accept `CREATE OR ALTER` for views and sequences.
    pub fn prefers_create_or_alter(&self) -> bool {
        self.version >= 3
    }

    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved.iter().any(|w| w.eq_ignore_ascii_case(word))
    }

    /// Quote an identifier unless it is already safe to write unquoted.
    ///
    /// Unquoted identifiers fold to upper case on the server, so anything with
    /// lower-case letters, spaces or punctuation keeps its spelling only when
    /// quoted. Already quoted input is returned untouched.
    pub fn format(&self, identifier: &str) -> String {
        if identifier.is_empty() {
            return String::new();
        }
        if self.is_quoted(identifier) {
            return identifier.to_string();
        }
        if !self.always_quote && self.is_safe_unquoted(identifier) {
            return identifier.to_string();
        }

        let q = self.quote;
        let doubled = format!("{q}{q}");
        format!("{q}{}{q}", identifier.replace(q, &doubled))
    }

    fn is_quoted(&self, identifier: &str) -> bool {
        identifier.len() >= 2
            && identifier.starts_with(self.quote)
            && identifier.ends_with(self.quote)
    }

    fn is_safe_unquoted(&self, identifier: &str) -> bool {
        let mut chars = identifier.chars();
        let first_ok = chars.next().map(|c| c.is_ascii_uppercase()).unwrap_or(false);

        first_ok
            && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c == '$')
            && !self.is_reserved(identifier)
    }

    /// Wrap text in single quotes, doubling embedded quotes.
    pub fn quote_literal(&self, text: &str) -> String {
        format!("'{}'", text.replace('\'', "''"))
    }

    /// Render a value as a literal of the given SQL type.
    pub fn format_sql_value(&self, value: &str, sql_type: i32) -> String {
        let trimmed = value.trim();

        if trimmed.eq_ignore_ascii_case("NULL") {
            return "NULL".to_string();
        }
        if trimmed.len() >= 2 && trimmed.starts_with('\'') && trimmed.ends_with('\'') {
            return trimmed.to_string();
        }
        if CONTEXT_VARIABLES
            .iter()
            .any(|v| v.eq_ignore_ascii_case(trimmed))
        {
            return trimmed.to_uppercase();
        }
        if types::needs_quoted_literal(sql_type) {
            return self.quote_literal(value);
        }

        trimmed.to_string()
    }

    /// The ` DEFAULT <literal>` clause for a column or parameter.
    pub fn format_default(&self, value: &str, sql_type: i32) -> String {
        format!(" DEFAULT {}", self.format_sql_value(value, sql_type))
    }
}
