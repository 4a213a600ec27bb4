use super::{SynthError, Synthesizer, BLOCK_DELIMITER};
use crate::descriptor::non_blank;
use crate::objects::{ObjectKind, TriggerDescriptor};

impl Synthesizer {
    pub fn create_trigger(&self, trigger: &TriggerDescriptor) -> Result<String, SynthError> {
        let mut sql = format!("CREATE OR ALTER TRIGGER {}", self.format(&trigger.name));
        if let Some(table) = non_blank(trigger.table.as_deref()) {
            sql.push_str(&format!(" FOR {}", self.format(table)));
        }
        sql.push('\n');

        sql.push_str(if trigger.active { "ACTIVE" } else { "INACTIVE" });
        if !trigger.trigger_type.trim().is_empty() {
            sql.push(' ');
            sql.push_str(trigger.trigger_type.trim());
        }
        sql.push_str(&format!(" POSITION {}\n", trigger.position));

        if let Some(security) = trigger.sql_security {
            sql.push_str(security.clause());
            sql.push('\n');
        }

        match non_blank(trigger.entry_point.as_deref()) {
            Some(entry_point) => {
                sql.push_str(&format!("EXTERNAL NAME {}", self.dialect.quote_literal(entry_point)));
                if let Some(engine) = non_blank(trigger.engine.as_deref()) {
                    sql.push_str(&format!("\nENGINE {}", engine.trim()));
                }
            }
            None => {
                if let Some(source) = non_blank(trigger.source.as_deref()) {
                    sql.push_str(source.trim_end());
                }
            }
        }
        sql.push_str(BLOCK_DELIMITER);
        sql.push('\n');

        sql.push_str(&self.comment(
            ObjectKind::Trigger,
            &trigger.name,
            trigger.comment.as_deref(),
            BLOCK_DELIMITER,
        ));

        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::SqlSecurity;
    use crate::synth::testing::assert_balanced;

    #[test]
    fn test_table_trigger() {
        let s = Synthesizer::default();
        let trigger = TriggerDescriptor {
            name: "SET_CUST_NO".into(),
            table: Some("CUSTOMER".into()),
            trigger_type: "BEFORE INSERT".into(),
            source: Some("AS\nBEGIN\n  NEW.CUST_NO = GEN_ID(CUST_NO_GEN, 1);\nEND".into()),
            comment: Some("Isn't it nice".into()),
            ..TriggerDescriptor::default()
        };
        assert_eq!(
            s.create_trigger(&trigger).unwrap(),
            "CREATE OR ALTER TRIGGER SET_CUST_NO FOR CUSTOMER\n\
             ACTIVE BEFORE INSERT POSITION 0\n\
             AS\nBEGIN\n  NEW.CUST_NO = GEN_ID(CUST_NO_GEN, 1);\nEND^\n\
             COMMENT ON TRIGGER SET_CUST_NO IS 'Isn''t it nice'^\n"
        );
    }

    #[test]
    fn test_database_trigger_external() {
        let s = Synthesizer::default();
        let trigger = TriggerDescriptor {
            name: "ON_CONNECT_AUDIT".into(),
            active: false,
            trigger_type: "ON CONNECT".into(),
            position: 5,
            sql_security: Some(SqlSecurity::Definer),
            entry_point: Some("audit!connect".into()),
            engine: Some("UDR".into()),
            ..TriggerDescriptor::default()
        };
        assert_eq!(
            s.create_trigger(&trigger).unwrap(),
            "CREATE OR ALTER TRIGGER ON_CONNECT_AUDIT\n\
             INACTIVE ON CONNECT POSITION 5\n\
             SQL SECURITY DEFINER\n\
             EXTERNAL NAME 'audit!connect'\nENGINE UDR^\n"
        );
    }

    #[test]
    fn test_minimal_trigger_is_balanced() {
        let s = Synthesizer::default();
        let trigger = TriggerDescriptor {
            name: "T1".into(),
            ..TriggerDescriptor::default()
        };
        assert_balanced(&s.create_trigger(&trigger).unwrap(), BLOCK_DELIMITER);
    }
}
