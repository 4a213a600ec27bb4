use log::debug;

use super::{SynthError, Synthesizer, BLOCK_DELIMITER};
use crate::constraint::{deduplicate, TABLE_NAME_PLACEHOLDER};
use crate::descriptor::{ColumnDescriptor, ConstraintDescriptor, ConstraintKind, ReferentialAction};
use crate::objects::{ObjectKind, TableDescriptor};

impl Synthesizer {
    /// `CREATE TABLE` with inline constraints, followed by column comments,
    /// autoincrement sequences/triggers and the table comment.
    ///
    /// Generated constraint names refer to the table through
    /// [`TABLE_NAME_PLACEHOLDER`]; it is substituted in those names only, so
    /// user text such as check expressions and comments is written verbatim.
    pub fn create_table(&self, table: &TableDescriptor) -> Result<String, SynthError> {
        let mut sql = String::new();

        sql.push_str(if table.temporary.is_some() {
            "CREATE GLOBAL TEMPORARY TABLE "
        } else {
            "CREATE TABLE "
        });
        sql.push_str(&self.format(&table.name));

        if let Some(file) = table.external_file.as_deref() {
            sql.push_str(&format!("\nEXTERNAL FILE {}", self.dialect.quote_literal(file.trim())));
        }
        if let Some(adapter) = table.adapter.as_deref() {
            sql.push_str(&format!(" ADAPTER {}", self.dialect.quote_literal(adapter.trim())));
        }
        sql.push_str(" (");

        let definitions = table
            .columns
            .iter()
            .map(|cd| self.column_definition(cd).map(|def| format!("\n\t{def}")))
            .collect::<Result<Vec<_>, _>>()?;
        sql.push_str(&definitions.join(","));

        let constraints = deduplicate(&table.constraints)?;

        let pk_columns: Vec<String> = table
            .columns
            .iter()
            .filter(|cd| cd.primary_key)
            .map(|cd| self.format(cd.name()))
            .collect();
        let declares_pk = constraints
            .iter()
            .any(|c| c.kind == Some(ConstraintKind::PrimaryKey));

        if !pk_columns.is_empty() && !table.exists {
            if declares_pk {
                debug!("{}: primary key comes from the constraint list", table.name);
            } else {
                sql.push_str(&format!(
                    ",\n\tCONSTRAINT {} PRIMARY KEY ({})",
                    self.format(&format!("PK_{}", table.name)),
                    pk_columns.join(", ")
                ));
            }
        }

        for (index, constraint) in constraints.iter().enumerate() {
            sql.push_str(",\n\t");
            sql.push_str(&self.constraint_definition(constraint, &table.name, index)?);
        }
        sql.push_str("\n)");

        if let Some(tablespace) = table.tablespace.as_deref() {
            sql.push_str(&format!("\nTABLESPACE {}", self.format(tablespace)));
        }
        if let Some(security) = table.sql_security {
            sql.push_str(&format!("\n{}", security.clause()));
        }
        if let Some(kind) = table.temporary {
            sql.push_str(&format!("\n{}", kind.clause()));
        }
        sql.push_str(";\n");

        sql.push_str(&self.member_comments(&table.name, &table.columns, ObjectKind::Column, ";"));

        for cd in &table.columns {
            sql.push_str(&self.autoincrement_ddl(cd, &table.name));
        }

        sql.push_str(&self.comment(ObjectKind::Table, &table.name, table.comment.as_deref(), ";"));

        Ok(sql)
    }

    /// `CONSTRAINT <name> <body>` for one (already merged) constraint.
    pub fn constraint_definition(
        &self,
        constraint: &ConstraintDescriptor,
        table_name: &str,
        index: usize,
    ) -> Result<String, SynthError> {
        let kind = constraint
            .kind
            .ok_or(SynthError::MalformedConstraint { index })?;
        let name = constraint
            .name()
            .ok_or(SynthError::MalformedConstraint { index })?
            .replace(TABLE_NAME_PLACEHOLDER, table_name);

        let mut sql = format!("CONSTRAINT {} ", self.format(&name));

        match kind {
            ConstraintKind::Check => {
                let expr = constraint.check.as_deref().unwrap_or("").trim();
                sql.push_str(&format!("CHECK ({expr})"));
                return Ok(sql);
            }
            ConstraintKind::Unique | ConstraintKind::PrimaryKey => {
                sql.push_str(&format!(
                    "{} ({})",
                    kind.keyword(),
                    constraint.column_text(&self.dialect)
                ));
            }
            ConstraintKind::ForeignKey => {
                let ref_table = constraint.ref_table.as_deref().unwrap_or("");
                sql.push_str(&format!(
                    "FOREIGN KEY ({}) REFERENCES {} ({})",
                    constraint.column_text(&self.dialect),
                    self.format(ref_table),
                    constraint.ref_column_text(&self.dialect)
                ));
                if let Some(rule) = constraint.update_rule.filter(|r| *r != ReferentialAction::Restrict) {
                    sql.push_str(&format!(" ON UPDATE {}", rule.as_sql()));
                }
                if let Some(rule) = constraint.delete_rule.filter(|r| *r != ReferentialAction::Restrict) {
                    sql.push_str(&format!(" ON DELETE {}", rule.as_sql()));
                }
            }
        }

        if let Some(tablespace) = constraint.tablespace.as_deref().filter(|t| !t.trim().is_empty()) {
            sql.push_str(&format!(" TABLESPACE {}", self.format(tablespace)));
        }

        Ok(sql)
    }

    /// Sequence and `BEFORE INSERT` trigger backing a non-identity
    /// autoincrement column. Empty for every other column.
    ///
    /// Default names carry the column so that several autoincrement columns
    /// of one table get one trigger each.
    fn autoincrement_ddl(&self, cd: &ColumnDescriptor, table_name: &str) -> String {
        let Some(auto) = cd.autoincrement.as_ref().filter(|a| !a.identity) else {
            return String::new();
        };

        let sequence = auto
            .sequence_name
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("GEN_{}_{}", table_name, cd.name()));
        let trigger = auto
            .trigger_name
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("{}_{}_BI", table_name, cd.name()));
        let sequence = self.format(&sequence);
        let column = self.format(cd.name());

        let mut sql = String::new();
        if auto.create_sequence {
            sql.push_str(&format!("CREATE SEQUENCE {sequence};\n"));
            if auto.start_value != 0 {
                sql.push_str(&format!(
                    "ALTER SEQUENCE {sequence} RESTART WITH {};\n",
                    auto.start_value
                ));
            }
        }
        sql.push_str(&format!(
            "CREATE OR ALTER TRIGGER {} FOR {}\n\
             ACTIVE BEFORE INSERT POSITION 0\n\
             AS\n\
             BEGIN\n\
             \tIF (NEW.{column} IS NULL) THEN NEW.{column} = NEXT VALUE FOR {sequence};\n\
             END{}\n",
            self.format(&trigger),
            self.format(table_name),
            BLOCK_DELIMITER
        ));
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Autoincrement;
    use crate::objects::{SqlSecurity, TemporaryKind};
    use crate::synth::testing::assert_balanced;

    fn pk(name: &str) -> ColumnDescriptor {
        ColumnDescriptor {
            primary_key: true,
            not_null: true,
            ..ColumnDescriptor::new(name, "INTEGER")
        }
    }

    #[test]
    fn test_inline_primary_key() {
        let s = Synthesizer::default();
        let table = TableDescriptor::new("ORDER_LINE", vec![pk("ORDER_ID"), pk("LINE_NO")]);

        let sql = s.create_table(&table).unwrap();
        assert_eq!(sql.matches("PRIMARY KEY (ORDER_ID, LINE_NO)").count(), 1);
        assert_eq!(
            sql,
            "CREATE TABLE ORDER_LINE (\n\
             \tORDER_ID INTEGER NOT NULL,\n\
             \tLINE_NO INTEGER NOT NULL,\n\
             \tCONSTRAINT PK_ORDER_LINE PRIMARY KEY (ORDER_ID, LINE_NO)\n\
             );\n"
        );
    }

    #[test]
    fn test_existing_table_keeps_primary_key() {
        let s = Synthesizer::default();
        let mut table = TableDescriptor::new("ORDER_LINE", vec![pk("ORDER_ID"), pk("LINE_NO")]);
        table.exists = true;
        assert!(!s.create_table(&table).unwrap().contains("PRIMARY KEY"));
    }

    #[test]
    fn test_constraints_with_generated_names() {
        let s = Synthesizer::default();
        let mut table = TableDescriptor::new(
            "ORDERS",
            vec![pk("ID"), ColumnDescriptor::new("CUST_ID", "INTEGER")],
        );
        let mut fk = ConstraintDescriptor::foreign_key(None, "CUST_ID", "CUSTOMER", "ID");
        fk.delete_rule = Some(ReferentialAction::Cascade);
        fk.update_rule = Some(ReferentialAction::Restrict);
        table.constraints = vec![fk, ConstraintDescriptor::check(None, "ID > 0")];

        let sql = s.create_table(&table).unwrap();
        assert!(sql.contains(
            "CONSTRAINT FK_ORDERS_1 FOREIGN KEY (CUST_ID) REFERENCES CUSTOMER (ID) ON DELETE CASCADE"
        ));
        assert!(!sql.contains("ON UPDATE"));
        assert!(sql.contains("CONSTRAINT CHECK_ORDERS_1 CHECK (ID > 0)"));
        assert!(!sql.contains(TABLE_NAME_PLACEHOLDER));
    }

    #[test]
    fn test_placeholder_in_quoted_table() {
        let s = Synthesizer::default();
        let mut table = TableDescriptor::new("line items", vec![ColumnDescriptor::new("ID", "INTEGER")]);
        table.constraints = vec![ConstraintDescriptor::new(None, ConstraintKind::Unique, "ID")];

        let sql = s.create_table(&table).unwrap();
        assert!(sql.starts_with("CREATE TABLE \"line items\" ("));
        assert!(sql.contains("CONSTRAINT \"UQ_line items_1\" UNIQUE (ID)"));
    }

    #[test]
    fn test_temporary_table_trailers() {
        let s = Synthesizer::default();
        let mut table = TableDescriptor::new("TMP", vec![ColumnDescriptor::new("ID", "INTEGER")]);
        table.temporary = Some(TemporaryKind::PreserveRows);
        table.sql_security = Some(SqlSecurity::Definer);
        table.tablespace = Some("TS1".into());

        let sql = s.create_table(&table).unwrap();
        assert!(sql.starts_with("CREATE GLOBAL TEMPORARY TABLE TMP ("));
        assert!(sql.ends_with("\n)\nTABLESPACE TS1\nSQL SECURITY DEFINER\nON COMMIT PRESERVE ROWS;\n"));
    }

    #[test]
    fn test_external_file() {
        let s = Synthesizer::default();
        let mut table = TableDescriptor::new("EXT", vec![ColumnDescriptor::new("ID", "INTEGER")]);
        table.external_file = Some(" /data/ext.dat ".into());
        let sql = s.create_table(&table).unwrap();
        assert!(sql.starts_with("CREATE TABLE EXT\nEXTERNAL FILE '/data/ext.dat' ("));
    }

    #[test]
    fn test_comments_and_autoincrement() {
        let s = Synthesizer::default();
        let mut id = pk("ID");
        id.description = Some("Surrogate key".into());
        id.autoincrement = Some(Autoincrement {
            create_sequence: true,
            ..Autoincrement::default()
        });
        let mut table = TableDescriptor::new("CITY", vec![id]);
        table.comment = Some("Cities".into());

        let sql = s.create_table(&table).unwrap();
        let expected_tail = "COMMENT ON COLUMN CITY.ID IS 'Surrogate key';\n\
                             CREATE SEQUENCE GEN_CITY_ID;\n\
                             CREATE OR ALTER TRIGGER CITY_ID_BI FOR CITY\n\
                             ACTIVE BEFORE INSERT POSITION 0\n\
                             AS\n\
                             BEGIN\n\
                             \tIF (NEW.ID IS NULL) THEN NEW.ID = NEXT VALUE FOR GEN_CITY_ID;\n\
                             END^\n\
                             COMMENT ON TABLE CITY IS 'Cities';\n";
        assert!(sql.ends_with(expected_tail), "{sql}");
    }

    #[test]
    fn test_two_autoincrement_columns_keep_both_triggers() {
        let s = Synthesizer::default();
        let auto = || {
            let mut cd = ColumnDescriptor::new("X", "INTEGER");
            cd.autoincrement = Some(Autoincrement::default());
            cd
        };
        let a = ColumnDescriptor { name: Some("A".into()), ..auto() };
        let b = ColumnDescriptor { name: Some("B".into()), ..auto() };
        let table = TableDescriptor::new("T", vec![a, b]);

        let sql = s.create_table(&table).unwrap();
        assert!(sql.contains(
            "CREATE OR ALTER TRIGGER T_A_BI FOR T\n\
             ACTIVE BEFORE INSERT POSITION 0\n\
             AS\n\
             BEGIN\n\
             \tIF (NEW.A IS NULL) THEN NEW.A = NEXT VALUE FOR GEN_T_A;"
        ));
        assert!(sql.contains(
            "CREATE OR ALTER TRIGGER T_B_BI FOR T\n\
             ACTIVE BEFORE INSERT POSITION 0\n\
             AS\n\
             BEGIN\n\
             \tIF (NEW.B IS NULL) THEN NEW.B = NEXT VALUE FOR GEN_T_B;"
        ));
        assert_eq!(sql.matches("CREATE OR ALTER TRIGGER").count(), 2);
    }

    #[test]
    fn test_placeholder_text_in_user_input_is_kept() {
        let s = Synthesizer::default();
        let mut note = ColumnDescriptor::new("NOTE", "VARCHAR");
        note.size = 20;
        note.check = Some("VALUE <> '<TABLE_NAME>'".into());
        let mut table = TableDescriptor::new("MEMO", vec![note]);
        table.constraints = vec![ConstraintDescriptor::check(None, "NOTE <> '<TABLE_NAME>'")];
        table.comment = Some("Rows never hold <TABLE_NAME>".into());

        let sql = s.create_table(&table).unwrap();
        assert!(sql.contains("NOTE VARCHAR(20) CHECK (VALUE <> '<TABLE_NAME>')"));
        assert!(sql.contains("CONSTRAINT CHECK_MEMO_1 CHECK (NOTE <> '<TABLE_NAME>')"));
        assert!(sql.contains("COMMENT ON TABLE MEMO IS 'Rows never hold <TABLE_NAME>';"));
    }

    #[test]
    fn test_merged_unique_constraint() {
        let s = Synthesizer::default();
        let mut table = TableDescriptor::new(
            "T",
            vec![ColumnDescriptor::new("A", "INTEGER"), ColumnDescriptor::new("B", "INTEGER")],
        );
        table.constraints = vec![
            ConstraintDescriptor::new(Some("UQ1"), ConstraintKind::Unique, "A"),
            ConstraintDescriptor::new(Some("UQ1"), ConstraintKind::Unique, "B"),
        ];
        let sql = s.create_table(&table).unwrap();
        assert!(sql.contains("\tCONSTRAINT UQ1 UNIQUE (A,B)\n)"));
    }

    #[test]
    fn test_minimal_table_is_balanced() {
        let s = Synthesizer::default();
        let table = TableDescriptor::new("T", vec![ColumnDescriptor::new("ID", "INTEGER")]);
        assert_balanced(&s.create_table(&table).unwrap(), ";");
    }
}
