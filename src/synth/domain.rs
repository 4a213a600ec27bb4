use super::{AlterStatement, SynthError, Synthesizer};
use crate::descriptor::{ChangeFlags, ColumnDescriptor};
use crate::objects::ObjectKind;

/// One optional `ALTER DOMAIN` clause, built from the edited descriptor.
type DomainClause = fn(&Synthesizer, &ColumnDescriptor, &ChangeFlags) -> Option<String>;

const DOMAIN_CLAUSES: [DomainClause; 5] = [
    rename_clause,
    default_clause,
    required_clause,
    check_clause,
    type_clause,
];

impl Synthesizer {
    pub fn create_domain(&self, domain: &ColumnDescriptor) -> Result<String, SynthError> {
        if !domain.has_name() {
            return Err(SynthError::invalid("domain", "name is empty"));
        }

        let mut sql = format!(
            "CREATE DOMAIN {} AS {}",
            self.format(domain.name()),
            domain.formatted_data_type(&self.dialect)
        );
        if let Some(value) = domain.default_value.get() {
            sql.push_str(&self.dialect.format_default(value, domain.type_code()));
        }
        if domain.not_null {
            sql.push_str(" NOT NULL");
        }
        if let Some(check) = domain.check() {
            sql.push_str(&format!(" CHECK ({check})"));
        }
        if let Some(collation) = domain.collation() {
            sql.push_str(&format!(" COLLATE {collation}"));
        }
        sql.push_str(";\n");

        sql.push_str(&self.comment(ObjectKind::Domain, domain.name(), domain.description(), ";"));
        Ok(sql)
    }

    /// `ALTER DOMAIN` turning `before` into `after`.
    pub fn alter_domain(
        &self,
        before: &ColumnDescriptor,
        after: &ColumnDescriptor,
    ) -> Result<String, SynthError> {
        if !before.has_name() {
            return Err(SynthError::invalid("domain", "original name is empty"));
        }
        self.domain_alter(before.name(), after, &ChangeFlags::between(before, after))
    }

    /// `ALTER DOMAIN` for a descriptor edited in place, driven by its change
    /// flags. `domain_name` is the name the domain had when it was loaded.
    pub fn alter_domain_tracked(
        &self,
        domain_name: &str,
        current: &ColumnDescriptor,
    ) -> Result<String, SynthError> {
        if domain_name.trim().is_empty() {
            return Err(SynthError::invalid("domain", "original name is empty"));
        }
        self.domain_alter(domain_name, current, &current.changes)
    }

    fn domain_alter(
        &self,
        current_name: &str,
        after: &ColumnDescriptor,
        changes: &ChangeFlags,
    ) -> Result<String, SynthError> {
        if changes.name && !after.has_name() {
            return Err(SynthError::invalid("domain", "new name is empty"));
        }

        let mut stmt = AlterStatement::new(format!("ALTER DOMAIN {}", self.format(current_name)), "\n");
        for clause in DOMAIN_CLAUSES {
            stmt.clause(clause(self, after, changes));
        }

        if changes.description {
            let name = if after.has_name() { after.name() } else { current_name };
            stmt.trailer(Some(self.comment_statement(
                ObjectKind::Domain,
                &self.format(name),
                after.description(),
                ";",
            )));
        }

        Ok(stmt.render())
    }
}

fn rename_clause(s: &Synthesizer, after: &ColumnDescriptor, changes: &ChangeFlags) -> Option<String> {
    changes.name.then(|| format!("TO {}", s.format(after.name())))
}

fn default_clause(s: &Synthesizer, after: &ColumnDescriptor, changes: &ChangeFlags) -> Option<String> {
    if !changes.default {
        return None;
    }
    Some(match after.default_value.get() {
        Some(value) => format!("SET DEFAULT {}", s.dialect.format_sql_value(value, after.type_code())),
        None => "DROP DEFAULT".to_string(),
    })
}

fn required_clause(_: &Synthesizer, after: &ColumnDescriptor, changes: &ChangeFlags) -> Option<String> {
    let keyword = if after.not_null { "SET" } else { "DROP" };
    changes.required.then(|| format!("{keyword} NOT NULL"))
}

fn check_clause(_: &Synthesizer, after: &ColumnDescriptor, changes: &ChangeFlags) -> Option<String> {
    if !changes.check {
        return None;
    }
    Some(match after.check() {
        Some(check) => format!("DROP CONSTRAINT\nADD CHECK ({check})"),
        None => "DROP CONSTRAINT".to_string(),
    })
}

fn type_clause(s: &Synthesizer, after: &ColumnDescriptor, changes: &ChangeFlags) -> Option<String> {
    changes
        .type_
        .then(|| format!("TYPE {}", after.formatted_data_type(&s.dialect)))
}
