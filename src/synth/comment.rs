use super::Synthesizer;
use crate::descriptor::{non_blank, ColumnDescriptor};
use crate::objects::ObjectKind;

impl Synthesizer {
    /// `COMMENT ON <KIND> <name> IS '<text>'<delimiter>`, or nothing when the
    /// text is blank. The literal text `NULL` clears the comment.
    pub fn comment(
        &self,
        kind: ObjectKind,
        name: &str,
        text: Option<&str>,
        delimiter: &str,
    ) -> String {
        match non_blank(text) {
            Some(text) => self.comment_statement(kind, &self.format(name), Some(text), delimiter),
            None => String::new(),
        }
    }

    /// Same as [`Synthesizer::comment`] but with an already formatted name,
    /// and `None` writes `IS NULL`.
    pub(crate) fn comment_statement(
        &self,
        kind: ObjectKind,
        formatted_name: &str,
        text: Option<&str>,
        delimiter: &str,
    ) -> String {
        let value = match non_blank(text) {
            Some("NULL") | None => "NULL".to_string(),
            Some(text) => self.dialect.quote_literal(text),
        };
        format!(
            "COMMENT ON {} {} IS {}{}\n",
            kind.meta_tag(),
            formatted_name,
            value,
            delimiter
        )
    }

    /// One comment per described member of a relation or routine.
    pub(crate) fn member_comments(
        &self,
        owner: &str,
        members: &[ColumnDescriptor],
        kind: ObjectKind,
        delimiter: &str,
    ) -> String {
        let owner = self.format(owner);
        members
            .iter()
            .filter(|m| m.has_name())
            .filter_map(|m| {
                m.description().map(|text| {
                    let name = format!("{}.{}", owner, self.format(m.name()));
                    self.comment_statement(kind, &name, Some(text), delimiter)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment() {
        let s = Synthesizer::default();
        assert_eq!(
            s.comment(ObjectKind::Table, "EMPLOYEE", Some("Staff's list"), ";"),
            "COMMENT ON TABLE EMPLOYEE IS 'Staff''s list';\n"
        );
        assert_eq!(
            s.comment(ObjectKind::View, "v", Some("NULL"), ";"),
            "COMMENT ON VIEW \"v\" IS NULL;\n"
        );
        assert_eq!(s.comment(ObjectKind::View, "V", Some("  "), ";"), "");
        assert_eq!(s.comment(ObjectKind::View, "V", None, ";"), "");
    }

    #[test]
    fn test_member_comments() {
        let s = Synthesizer::default();
        let mut id = ColumnDescriptor::new("ID", "INTEGER");
        id.description = Some("Key".into());
        let plain = ColumnDescriptor::new("NAME", "VARCHAR");
        let sql = s.member_comments("T", &[id, plain], ObjectKind::Column, ";");
        assert_eq!(sql, "COMMENT ON COLUMN T.ID IS 'Key';\n");
    }
}
