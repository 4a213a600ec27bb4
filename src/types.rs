//! SQL type codes as reported by catalog metadata rows.
//!
//! The values match the JDBC `java.sql.Types` numbering, which is what the
//! metadata loaders hand over when they build descriptors from catalog rows.

pub const BIT: i32 = -7;
pub const TINYINT: i32 = -6;
pub const SMALLINT: i32 = 5;
pub const INTEGER: i32 = 4;
pub const BIGINT: i32 = -5;
pub const FLOAT: i32 = 6;
pub const REAL: i32 = 7;
pub const DOUBLE: i32 = 8;
pub const NUMERIC: i32 = 2;
pub const DECIMAL: i32 = 3;
pub const CHAR: i32 = 1;
pub const VARCHAR: i32 = 12;
pub const LONGVARCHAR: i32 = -1;
pub const NCHAR: i32 = -15;
pub const NVARCHAR: i32 = -9;
pub const DATE: i32 = 91;
pub const TIME: i32 = 92;
pub const TIMESTAMP: i32 = 93;
pub const TIME_WITH_TIMEZONE: i32 = 2013;
pub const TIMESTAMP_WITH_TIMEZONE: i32 = 2014;
pub const BINARY: i32 = -2;
pub const VARBINARY: i32 = -3;
pub const LONGVARBINARY: i32 = -4;
pub const BLOB: i32 = 2004;
pub const CLOB: i32 = 2005;
pub const BOOLEAN: i32 = 16;
pub const OTHER: i32 = 1111;
pub const NULL: i32 = 0;

/// Character-like types whose literals must be quoted.
pub fn is_character(code: i32) -> bool {
    matches!(code, CHAR | VARCHAR | LONGVARCHAR | NCHAR | NVARCHAR | CLOB)
}

pub fn is_temporal(code: i32) -> bool {
    matches!(
        code,
        DATE | TIME | TIMESTAMP | TIME_WITH_TIMEZONE | TIMESTAMP_WITH_TIMEZONE
    )
}

/// Literals of these types are written between single quotes.
pub fn needs_quoted_literal(code: i32) -> bool {
    is_character(code) || is_temporal(code)
}

/// Resolve a type name (as typed into an editor) to its code.
pub fn code_for_name(name: &str) -> Option<i32> {
    let upper = name.trim().to_uppercase();
    let base = upper.split('(').next().unwrap_or(&upper).trim();

    let code = match base {
        "BOOLEAN" => BOOLEAN,
        "SMALLINT" => SMALLINT,
        "INTEGER" | "INT" => INTEGER,
        "BIGINT" | "INT128" => BIGINT,
        "FLOAT" => FLOAT,
        "REAL" => REAL,
        "DOUBLE PRECISION" | "DOUBLE" => DOUBLE,
        "NUMERIC" | "DECFLOAT" => NUMERIC,
        "DECIMAL" => DECIMAL,
        "CHAR" | "CHARACTER" => CHAR,
        "VARCHAR" | "CHARACTER VARYING" => VARCHAR,
        "NCHAR" => NCHAR,
        "DATE" => DATE,
        "TIME" => TIME,
        "TIMESTAMP" => TIMESTAMP,
        "TIME WITH TIME ZONE" => TIME_WITH_TIMEZONE,
        "TIMESTAMP WITH TIME ZONE" => TIMESTAMP_WITH_TIMEZONE,
        "BINARY" => BINARY,
        "VARBINARY" => VARBINARY,
        "BLOB" => BLOB,
        _ => return None,
    };

    Some(code)
}
