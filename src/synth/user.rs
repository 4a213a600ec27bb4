use std::collections::BTreeMap;

use super::{AlterStatement, Synthesizer};
use crate::descriptor::non_blank;
use crate::objects::{ObjectKind, UserDescriptor};

impl Synthesizer {
    pub fn create_user(&self, user: &UserDescriptor) -> String {
        let mut sql = format!("CREATE USER {}", self.format(&user.name));

        for (keyword, value) in [
            ("FIRSTNAME", &user.first_name),
            ("MIDDLENAME", &user.middle_name),
            ("LASTNAME", &user.last_name),
            ("PASSWORD", &user.password),
        ] {
            if let Some(value) = non_blank(value.as_deref()) {
                sql.push_str(&format!("\n{keyword} {}", self.dialect.quote_literal(value)));
            }
        }

        sql.push_str(if user.active { "\nACTIVE" } else { "\nINACTIVE" });
        if user.admin {
            sql.push_str("\nGRANT ADMIN ROLE");
        }
        if let Some(plugin) = non_blank(user.plugin.as_deref()) {
            sql.push_str(&format!("\nUSING PLUGIN {}", plugin.trim()));
        }
        if !user.tags.is_empty() {
            let tags: Vec<String> = user.tags.iter().map(|(k, v)| self.tag(k, v)).collect();
            sql.push_str(&format!("\nTAGS ({})", tags.join(", ")));
        }
        sql.push_str(";\n");

        sql.push_str(&self.comment(ObjectKind::User, &user.name, user.comment.as_deref(), ";"));
        sql
    }

    /// `ALTER USER` turning `before` into `after`.
    ///
    /// A blank password in `after` leaves the password as it is.
    pub fn alter_user(&self, before: &UserDescriptor, after: &UserDescriptor) -> String {
        let mut stmt = AlterStatement::new(format!("ALTER USER {}", self.format(&before.name)), "\n\t");

        for (keyword, old, new) in [
            ("FIRSTNAME", &before.first_name, &after.first_name),
            ("MIDDLENAME", &before.middle_name, &after.middle_name),
            ("LASTNAME", &before.last_name, &after.last_name),
        ] {
            let new = non_blank(new.as_deref());
            stmt.clause((non_blank(old.as_deref()) != new).then(|| {
                format!("{keyword} {}", self.dialect.quote_literal(new.unwrap_or("")))
            }));
        }

        let password = non_blank(after.password.as_deref())
            .filter(|p| non_blank(before.password.as_deref()) != Some(*p));
        stmt.clause(password.map(|p| format!("PASSWORD {}", self.dialect.quote_literal(p))));

        let active = if after.active { "ACTIVE" } else { "INACTIVE" };
        stmt.clause((before.active != after.active).then(|| active.to_string()));
        let admin = if after.admin { "GRANT" } else { "REVOKE" };
        stmt.clause((before.admin != after.admin).then(|| format!("{admin} ADMIN ROLE")));

        let plugin = non_blank(after.plugin.as_deref())
            .filter(|p| non_blank(before.plugin.as_deref()) != Some(*p));
        stmt.clause(plugin.map(|p| format!("USING PLUGIN {}", p.trim())));

        stmt.clause(self.tags_diff(&before.tags, &after.tags));

        if non_blank(before.comment.as_deref()) != non_blank(after.comment.as_deref()) {
            stmt.trailer(Some(self.comment_statement(
                ObjectKind::User,
                &self.format(&before.name),
                after.comment.as_deref(),
                ";",
            )));
        }

        stmt.render()
    }

    /// `TAGS (DROP a, b = 'x')`: removed keys first, then every key of `after`.
    fn tags_diff(
        &self,
        before: &BTreeMap<String, String>,
        after: &BTreeMap<String, String>,
    ) -> Option<String> {
        if before == after {
            return None;
        }

        let entries: Vec<String> = before
            .keys()
            .filter(|k| !after.contains_key(*k))
            .map(|k| format!("DROP {k}"))
            .chain(after.iter().map(|(k, v)| self.tag(k, v)))
            .collect();

        Some(format!("TAGS ({})", entries.join(", ")))
    }

    fn tag(&self, key: &str, value: &str) -> String {
        format!("{key} = {}", self.dialect.quote_literal(value))
    }
}
