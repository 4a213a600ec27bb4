use super::{SynthError, Synthesizer, BLOCK_DELIMITER};
use crate::descriptor::{non_blank, ColumnDescriptor};
use crate::objects::{FunctionDescriptor, ObjectKind, ProcedureDescriptor, SqlSecurity};

impl Synthesizer {
    pub fn create_procedure(&self, procedure: &ProcedureDescriptor) -> Result<String, SynthError> {
        let mut sql = self.routine_header(
            ObjectKind::Procedure,
            &procedure.name,
            procedure.authid.as_deref(),
            &procedure.inputs,
        )?;

        let outputs = self.formatted_parameters(&procedure.outputs, false)?;
        if !outputs.trim().is_empty() {
            sql.push_str("\nRETURNS (\n");
            sql.push_str(&outputs);
            sql.push(')');
        }

        sql.push_str(&self.routine_body(
            procedure.sql_security,
            procedure.entry_point.as_deref(),
            procedure.engine.as_deref(),
            &procedure.variables,
            &procedure.body,
        )?);

        sql.push_str(&self.comment(
            ObjectKind::Procedure,
            &procedure.name,
            procedure.comment.as_deref(),
            BLOCK_DELIMITER,
        ));
        sql.push_str(&self.member_comments(
            &procedure.name,
            &procedure.inputs,
            ObjectKind::Parameter,
            BLOCK_DELIMITER,
        ));
        sql.push_str(&self.member_comments(
            &procedure.name,
            &procedure.outputs,
            ObjectKind::Parameter,
            BLOCK_DELIMITER,
        ));

        Ok(sql)
    }

    pub fn create_function(&self, function: &FunctionDescriptor) -> Result<String, SynthError> {
        let mut sql =
            self.routine_header(ObjectKind::Function, &function.name, None, &function.arguments)?;

        if let Some(return_type) = &function.return_type {
            sql.push_str("\nRETURNS ");
            sql.push_str(&self.parameter_type(return_type));
        }
        if function.deterministic {
            sql.push_str(" DETERMINISTIC");
        }

        sql.push_str(&self.routine_body(
            function.sql_security,
            function.entry_point.as_deref(),
            function.engine.as_deref(),
            &function.variables,
            &function.body,
        )?);

        sql.push_str(&self.comment(
            ObjectKind::Function,
            &function.name,
            function.comment.as_deref(),
            BLOCK_DELIMITER,
        ));
        sql.push_str(&self.member_comments(
            &function.name,
            &function.arguments,
            ObjectKind::Parameter,
            BLOCK_DELIMITER,
        ));

        Ok(sql)
    }

    /// `CREATE OR ALTER <KIND> <name>`, optional `AUTHID`, and the input list
    /// in parentheses when at least one input is named.
    fn routine_header(
        &self,
        kind: ObjectKind,
        name: &str,
        authid: Option<&str>,
        inputs: &[ColumnDescriptor],
    ) -> Result<String, SynthError> {
        let mut sql = format!("CREATE OR ALTER {} {}", kind.meta_tag(), self.format(name));

        if let Some(authid) = non_blank(authid) {
            sql.push_str(&format!("\nAUTHID {}", authid.trim()));
        }
        if inputs.iter().any(|p| p.has_name()) {
            sql.push_str(" (\n");
            sql.push_str(&self.formatted_parameters(inputs, false)?);
            sql.push(')');
        }

        Ok(sql)
    }

    /// Security clause, then either the external entry point or `AS` with
    /// the declared variables and the body, closed by the block delimiter.
    fn routine_body(
        &self,
        security: Option<SqlSecurity>,
        entry_point: Option<&str>,
        engine: Option<&str>,
        variables: &[ColumnDescriptor],
        body: &str,
    ) -> Result<String, SynthError> {
        let mut sql = String::new();

        if let Some(security) = security {
            sql.push_str(&format!("\n{}", security.clause()));
        }

        match non_blank(entry_point) {
            Some(entry_point) => {
                sql.push_str(&format!(
                    "\nEXTERNAL NAME {} ENGINE {}",
                    self.dialect.quote_literal(entry_point),
                    engine.unwrap_or("").trim()
                ));
                sql.push_str(BLOCK_DELIMITER);
            }
            None => {
                sql.push_str("\nAS\n");
                sql.push_str(&self.formatted_parameters(variables, true)?);
                sql.push_str(body.trim_end());
                sql.push_str(BLOCK_DELIMITER);
            }
        }
        sql.push('\n');

        Ok(sql)
    }
}
