use chrono::NaiveDateTime;

use super::{Synthesizer, BLOCK_DELIMITER};
use crate::descriptor::non_blank;
use crate::objects::{
    CollationDescriptor, JobDescriptor, JobKind, ObjectKind, SequenceDescriptor,
    TablespaceDescriptor, ViewDescriptor,
};

/// Date format accepted by `CREATE JOB ... START DATE`.
const JOB_DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

impl Synthesizer {
    pub fn create_view(&self, view: &ViewDescriptor) -> String {
        let verb = if self.dialect.prefers_create_or_alter() {
            "CREATE OR ALTER"
        } else if view.exists {
            "ALTER"
        } else {
            "CREATE"
        };
        let mut sql = format!("{verb} VIEW {}", self.format(&view.name));

        if let Some(columns) = non_blank(view.columns.as_deref()) {
            sql.push_str(&format!(" ({})", columns.trim()));
        }
        sql.push_str("\nAS\n");
        sql.push_str(view.select.trim().trim_end_matches(';').trim_end());
        sql.push_str(";\n");

        sql.push_str(&self.comment(ObjectKind::View, &view.name, view.comment.as_deref(), ";"));
        sql
    }

    /// Old servers have no `CREATE OR ALTER SEQUENCE`; there the sequence is
    /// created when missing and then restarted so its next value is
    /// `start_value + increment`.
    pub fn create_sequence(&self, sequence: &SequenceDescriptor) -> String {
        let name = self.format(&sequence.name);
        let mut sql = String::new();

        if self.dialect.prefers_create_or_alter() {
            sql.push_str(&format!(
                "CREATE OR ALTER SEQUENCE {name} START WITH {} INCREMENT BY {};\n",
                sequence.start_value, sequence.increment
            ));
        } else {
            if !sequence.exists {
                sql.push_str(&format!("CREATE SEQUENCE {name};\n"));
            }
            sql.push_str(&format!(
                "ALTER SEQUENCE {name} RESTART WITH {};\n",
                sequence.start_value + sequence.increment
            ));
        }

        sql.push_str(&self.comment(
            ObjectKind::Sequence,
            &sequence.name,
            sequence.comment.as_deref(),
            ";",
        ));
        sql
    }

    pub fn create_collation(&self, collation: &CollationDescriptor) -> String {
        let mut sql = format!(
            "CREATE COLLATION {}\nFOR {}",
            self.format(&collation.name),
            collation.charset.trim()
        );

        if let Some(base) = non_blank(collation.base_collation.as_deref()) {
            if collation.external {
                sql.push_str(&format!("\nFROM EXTERNAL ({})", self.dialect.quote_literal(base)));
            } else {
                sql.push_str(&format!("\nFROM {}", base.trim()));
            }
        }

        sql.push_str(if collation.pad_space { "\nPAD SPACE" } else { "\nNO PAD" });
        sql.push_str(if collation.case_sensitive {
            "\nCASE SENSITIVE"
        } else {
            "\nCASE INSENSITIVE"
        });
        sql.push_str(if collation.accent_sensitive {
            "\nACCENT SENSITIVE"
        } else {
            "\nACCENT INSENSITIVE"
        });

        if let Some(attributes) = non_blank(collation.attributes.as_deref()) {
            sql.push('\n');
            sql.push_str(&self.dialect.quote_literal(attributes));
        }
        sql.push_str(";\n");
        sql
    }

    pub fn create_tablespace(&self, tablespace: &TablespaceDescriptor) -> String {
        format!(
            "CREATE TABLESPACE {} FILE {};\n",
            self.format(&tablespace.name),
            self.dialect.quote_literal(&tablespace.file)
        )
    }

    pub fn create_job(&self, job: &JobDescriptor) -> String {
        let mut sql = format!(
            "CREATE JOB {}\n{}\n{}\n",
            self.format(&job.name),
            self.dialect.quote_literal(&job.schedule),
            if job.active { "ACTIVE" } else { "INACTIVE" }
        );
        sql.push_str(&format!("START DATE {}\n", self.job_date(job.start_date)));
        sql.push_str(&format!("END DATE {}\n", self.job_date(job.end_date)));

        match job.kind {
            JobKind::Command => {
                sql.push_str("COMMAND ");
                sql.push_str(&self.dialect.quote_literal(job.source.trim()));
            }
            JobKind::Sql => {
                sql.push_str("AS\n");
                sql.push_str(job.source.trim_end());
            }
        }
        sql.push_str(BLOCK_DELIMITER);
        sql.push('\n');
        sql
    }

    fn job_date(&self, date: Option<NaiveDateTime>) -> String {
        match date {
            Some(date) => self.dialect.quote_literal(&date.format(JOB_DATE_FORMAT).to_string()),
            None => "NULL".to_string(),
        }
    }
}
