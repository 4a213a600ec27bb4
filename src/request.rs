//! JSON request documents.
//!
//! A document is either one request object or an array of them. Each request
//! names the builder in its `kind` field and carries the builder's inputs:
//!
//! ```json
//! { "kind": "create_sequence", "name": "GEN_ID", "start_value": 100 }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::descriptor::ColumnDescriptor;
use crate::naming::generate_name_for_object;
use crate::objects::{
    CollationDescriptor, FunctionDescriptor, JobDescriptor, ObjectKind, ProcedureDescriptor,
    SequenceDescriptor, TableDescriptor, TablespaceDescriptor, TriggerDescriptor, UserDescriptor,
    ViewDescriptor,
};
use crate::synth::{SynthError, Synthesizer};

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid request document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Synth(#[from] SynthError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Request {
    CreateTable(TableDescriptor),
    CreateDomain(ColumnDescriptor),
    AlterDomain {
        before: ColumnDescriptor,
        after: ColumnDescriptor,
    },
    /// Alter driven by the change flags of an edited descriptor.
    AlterDomainTracked {
        name: String,
        domain: ColumnDescriptor,
    },
    CreateProcedure(ProcedureDescriptor),
    CreateFunction(FunctionDescriptor),
    CreateTrigger(TriggerDescriptor),
    CreateView(ViewDescriptor),
    CreateSequence(SequenceDescriptor),
    CreateUser(UserDescriptor),
    AlterUser {
        before: UserDescriptor,
        after: UserDescriptor,
    },
    CreateCollation(CollationDescriptor),
    CreateTablespace(TablespaceDescriptor),
    CreateJob(JobDescriptor),
    Insert {
        table: String,
        fields: String,
        values: String,
    },
    InsertPlaceholders {
        table: String,
        columns: Vec<String>,
    },
    Update {
        table: String,
        settings: String,
    },
    Select {
        table: String,
        #[serde(default = "all_fields")]
        fields: String,
    },
    Comment {
        object: ObjectKind,
        name: String,
        text: Option<String>,
        #[serde(default = "statement_delimiter")]
        delimiter: String,
    },
    GenerateName {
        object: ObjectKind,
        #[serde(default)]
        siblings: Vec<String>,
    },
}

fn all_fields() -> String {
    "*".to_string()
}

fn statement_delimiter() -> String {
    ";".to_string()
}

impl Request {
    pub fn synthesize(&self, synth: &Synthesizer) -> Result<String, SynthError> {
        let sql = match self {
            Self::CreateTable(table) => synth.create_table(table)?,
            Self::CreateDomain(domain) => synth.create_domain(domain)?,
            Self::AlterDomain { before, after } => synth.alter_domain(before, after)?,
            Self::AlterDomainTracked { name, domain } => synth.alter_domain_tracked(name, domain)?,
            Self::CreateProcedure(procedure) => synth.create_procedure(procedure)?,
            Self::CreateFunction(function) => synth.create_function(function)?,
            Self::CreateTrigger(trigger) => synth.create_trigger(trigger)?,
            Self::CreateView(view) => synth.create_view(view),
            Self::CreateSequence(sequence) => synth.create_sequence(sequence),
            Self::CreateUser(user) => synth.create_user(user),
            Self::AlterUser { before, after } => synth.alter_user(before, after),
            Self::CreateCollation(collation) => synth.create_collation(collation),
            Self::CreateTablespace(tablespace) => synth.create_tablespace(tablespace),
            Self::CreateJob(job) => synth.create_job(job),
            Self::Insert {
                table,
                fields,
                values,
            } => synth.insert(table, fields, values),
            Self::InsertPlaceholders { table, columns } => {
                synth.insert_placeholders(table, columns.as_slice())
            }
            Self::Update { table, settings } => synth.update(table, settings),
            Self::Select { table, fields } => synth.select(table, fields),
            Self::Comment {
                object,
                name,
                text,
                delimiter,
            } => synth.comment(*object, name, text.as_deref(), delimiter),
            Self::GenerateName { object, siblings } => {
                format!("{}\n", generate_name_for_object(*object, siblings))
            }
        };
        Ok(sql)
    }
}

/// Decode a document holding one request or an array of requests.
pub fn parse_document(input: &str) -> Result<Vec<Request>, RequestError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    let requests = match value {
        serde_json::Value::Array(_) => serde_json::from_value(value)?,
        other => vec![serde_json::from_value(other)?],
    };
    Ok(requests)
}

/// Synthesize every request of a document, concatenating the output in
/// document order. Each statement starts on its own line.
pub fn render_document(input: &str, synth: &Synthesizer) -> Result<String, RequestError> {
    let requests = parse_document(input)?;
    debug!("rendering {} request(s)", requests.len());

    let mut out = String::new();
    for request in &requests {
        let sql = request.synthesize(synth)?;
        out.push_str(&sql);
        if !sql.is_empty() && !sql.ends_with('\n') {
            out.push('\n');
        }
    }
    Ok(out)
}
