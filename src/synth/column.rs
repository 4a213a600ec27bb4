use super::{SynthError, Synthesizer};
use crate::descriptor::{ColumnDescriptor, ParameterDirection};

impl Synthesizer {
    /// Definition of one table column or domain-like attribute:
    /// name, then either `COMPUTED BY (...)` or type, identity, default,
    /// `NOT NULL`, `CHECK` and `COLLATE` in that order.
    pub fn column_definition(&self, cd: &ColumnDescriptor) -> Result<String, SynthError> {
        check_state(cd)?;

        let mut sql = self.format(cd.name());
        sql.push(' ');

        if let Some(expr) = cd.computed_by() {
            sql.push_str(&format!("COMPUTED BY ({expr})"));
            return Ok(sql);
        }

        match cd.user_domain() {
            Some(_) => sql.push_str(&cd.formatted_domain(&self.dialect)),
            None => sql.push_str(&cd.formatted_data_type(&self.dialect)),
        }

        if let Some(auto) = cd.autoincrement.as_ref().filter(|a| a.identity) {
            sql.push_str(" GENERATED BY DEFAULT AS IDENTITY");
            if auto.start_value != 0 {
                sql.push_str(&format!(" (START WITH {})", auto.start_value));
            }
        }

        if let Some(value) = cd.default_value.get() {
            sql.push_str(&self.dialect.format_default(value, cd.type_code()));
        }
        if cd.not_null {
            sql.push_str(" NOT NULL");
        }
        if let Some(check) = cd.check() {
            sql.push_str(&format!(" CHECK ({check})"));
        }
        if let Some(collation) = cd.collation() {
            sql.push_str(&format!(" COLLATE {collation}"));
        }

        Ok(sql)
    }

    /// Type part of a parameter: `TYPE OF` references win over the domain,
    /// the domain over the plain type.
    pub(crate) fn parameter_type(&self, cd: &ColumnDescriptor) -> String {
        match cd.user_domain() {
            Some(_) if cd.type_of.is_some() => cd.formatted_data_type(&self.dialect),
            Some(_) => cd.formatted_domain(&self.dialect),
            None => cd.formatted_data_type(&self.dialect),
        }
    }

    /// Definition of a routine parameter or local variable.
    pub fn parameter_definition(&self, cd: &ColumnDescriptor) -> Result<String, SynthError> {
        check_state(cd)?;

        let mut sql = self.format(cd.name());
        sql.push(' ');

        if let Some(expr) = cd.computed_by() {
            sql.push_str(&format!("COMPUTED BY ({expr})"));
            return Ok(sql);
        }

        sql.push_str(&self.parameter_type(cd));
        if cd.not_null {
            sql.push_str(" NOT NULL");
        }
        if cd.direction != ParameterDirection::Output {
            if let Some(value) = cd.default_value.get() {
                sql.push_str(&self.dialect.format_default(value, cd.type_code()));
            }
        }
        if let Some(check) = cd.check() {
            sql.push_str(&format!(" CHECK ({check})"));
        }

        Ok(sql.trim_end().to_string())
    }

    /// Newline separated parameter list.
    ///
    /// In `variables` mode every entry becomes a `DECLARE ...;` line with its
    /// description as a trailing comment; otherwise entries are tab indented
    /// and comma separated. Unnamed placeholder rows are skipped.
    pub fn formatted_parameters(
        &self,
        params: &[ColumnDescriptor],
        variables: bool,
    ) -> Result<String, SynthError> {
        let named: Vec<&ColumnDescriptor> = params.iter().filter(|p| p.has_name()).collect();
        let mut sql = String::new();

        for (i, cd) in named.iter().enumerate() {
            if variables {
                sql.push_str("DECLARE ");
            }

            match &cd.cursor {
                Some(cursor) => {
                    if cursor.select.trim().is_empty() {
                        return Err(SynthError::invalid(
                            "cursor",
                            format!("{} has no select statement", cd.name()),
                        ));
                    }
                    sql.push_str(&format!("{} CURSOR FOR ", self.format(cd.name())));
                    if cursor.scroll {
                        sql.push_str("SCROLL ");
                    }
                    sql.push_str(&format!("({})", cursor.select.trim()));
                }
                None => {
                    if !variables {
                        sql.push('\t');
                    }
                    sql.push_str(&self.parameter_definition(cd)?);
                }
            }

            if variables {
                sql.push(';');
                if let Some(text) = cd.description() {
                    if cd.description_as_single_comment {
                        sql.push_str(&format!(" --{text}"));
                    } else {
                        sql.push_str(&format!(" /*{text}*/"));
                    }
                }
            } else if i + 1 != named.len() {
                sql.push(',');
            }
            sql.push('\n');
        }

        Ok(sql)
    }
}

/// Reject attribute combinations that cannot be resolved without guessing.
fn check_state(cd: &ColumnDescriptor) -> Result<(), SynthError> {
    if cd.computed_by().is_some() {
        if let Some(domain) = cd.user_domain() {
            return Err(SynthError::invalid(
                "column",
                format!("{} is computed but also uses domain {domain}", cd.name()),
            ));
        }
        if cd.is_identity() {
            return Err(SynthError::invalid(
                "column",
                format!("{} is computed but also an identity column", cd.name()),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Autoincrement, CursorSpec, DefaultValue, TypeOf};

    fn varchar(name: &str, size: i32) -> ColumnDescriptor {
        ColumnDescriptor {
            size,
            ..ColumnDescriptor::new(name, "VARCHAR")
        }
    }

    #[test]
    fn test_column_definition_order() {
        let s = Synthesizer::default();
        let cd = ColumnDescriptor {
            default_value: DefaultValue::new("n/a"),
            not_null: true,
            check: Some("VALUE <> ''".into()),
            collation: Some("UNICODE_CI".into()),
            ..varchar("CODE", 10)
        };
        assert_eq!(
            s.column_definition(&cd).unwrap(),
            "CODE VARCHAR(10) DEFAULT 'n/a' NOT NULL CHECK (VALUE <> '') COLLATE UNICODE_CI"
        );
    }

    #[test]
    fn test_column_identity() {
        let s = Synthesizer::default();
        let mut cd = ColumnDescriptor::new("ID", "BIGINT");
        cd.autoincrement = Some(Autoincrement {
            identity: true,
            start_value: 100,
            ..Autoincrement::default()
        });
        assert_eq!(
            s.column_definition(&cd).unwrap(),
            "ID BIGINT GENERATED BY DEFAULT AS IDENTITY (START WITH 100)"
        );
    }

    #[test]
    fn test_column_domain_and_system_domain() {
        let s = Synthesizer::default();
        let mut cd = ColumnDescriptor::new("AMOUNT", "NUMERIC");
        cd.domain = Some("D_MONEY".into());
        assert_eq!(s.column_definition(&cd).unwrap(), "AMOUNT D_MONEY");

        cd.domain = Some("RDB$55".into());
        assert_eq!(s.column_definition(&cd).unwrap(), "AMOUNT NUMERIC");
    }

    #[test]
    fn test_computed_column() {
        let s = Synthesizer::default();
        let mut cd = ColumnDescriptor::new("FULL_NAME", "VARCHAR");
        cd.computed_by = Some("FIRST_NAME || ' ' || LAST_NAME".into());
        cd.not_null = true;
        assert_eq!(
            s.column_definition(&cd).unwrap(),
            "FULL_NAME COMPUTED BY (FIRST_NAME || ' ' || LAST_NAME)"
        );

        cd.domain = Some("D_NAME".into());
        assert!(matches!(
            s.column_definition(&cd),
            Err(SynthError::InvalidDescriptorState { .. })
        ));
    }

    #[test]
    fn test_parameter_definition() {
        let s = Synthesizer::default();
        let mut p = varchar("p_name", 20);
        p.not_null = true;
        p.default_value = DefaultValue::new("x");
        assert_eq!(
            s.parameter_definition(&p).unwrap(),
            "\"p_name\" VARCHAR(20) NOT NULL DEFAULT 'x'"
        );

        p.direction = ParameterDirection::Output;
        assert_eq!(s.parameter_definition(&p).unwrap(), "\"p_name\" VARCHAR(20) NOT NULL");
    }

    #[test]
    fn test_parameter_type_of_domain() {
        let s = Synthesizer::default();
        let mut p = ColumnDescriptor::default();
        p.name = Some("AMOUNT".into());
        p.domain = Some("D_MONEY".into());
        assert_eq!(s.parameter_definition(&p).unwrap(), "AMOUNT D_MONEY");

        p.type_of = Some(TypeOf::Domain);
        assert_eq!(s.parameter_definition(&p).unwrap(), "AMOUNT TYPE OF D_MONEY");
    }

    #[test]
    fn test_formatted_parameters_plain() {
        let s = Synthesizer::default();
        let params = vec![
            ColumnDescriptor::new("A", "INTEGER"),
            ColumnDescriptor::default(),
            ColumnDescriptor::new("B", "DATE"),
            ColumnDescriptor::default(),
        ];
        assert_eq!(
            s.formatted_parameters(&params, false).unwrap(),
            "\tA INTEGER,\n\tB DATE\n"
        );
    }

    #[test]
    fn test_formatted_parameters_variables() {
        let s = Synthesizer::default();
        let mut counter = ColumnDescriptor::new("CNT", "INTEGER");
        counter.description = Some("rows seen".into());
        counter.description_as_single_comment = true;
        let mut total = ColumnDescriptor::new("TOTAL", "BIGINT");
        total.description = Some("sum".into());
        let mut cur = ColumnDescriptor::default();
        cur.name = Some("C1".into());
        cur.cursor = Some(CursorSpec {
            scroll: true,
            select: "SELECT ID FROM T".into(),
        });

        assert_eq!(
            s.formatted_parameters(&[counter, total, cur], true).unwrap(),
            "DECLARE CNT INTEGER; --rows seen\n\
             DECLARE TOTAL BIGINT; /*sum*/\n\
             DECLARE C1 CURSOR FOR SCROLL (SELECT ID FROM T);\n"
        );
    }

    #[test]
    fn test_cursor_without_select() {
        let s = Synthesizer::default();
        let mut cur = ColumnDescriptor::default();
        cur.name = Some("C1".into());
        cur.cursor = Some(CursorSpec::default());
        assert!(s.formatted_parameters(&[cur], true).is_err());
    }
}
