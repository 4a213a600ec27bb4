use super::Synthesizer;

impl Synthesizer {
    /// `INSERT INTO <table> (<fields>) VALUES (<values>);` with the field and
    /// value lists taken verbatim.
    pub fn insert(&self, table: &str, fields: &str, values: &str) -> String {
        format!(
            "INSERT INTO {} ({}) VALUES ({});\n",
            self.format(table.trim()),
            fields.trim(),
            values.trim()
        )
    }

    /// `INSERT` with one `?` marker per column, for statements whose values
    /// are bound later.
    pub fn insert_placeholders<S: AsRef<str>>(&self, table: &str, columns: &[S]) -> String {
        let names: Vec<String> = columns.iter().map(|c| self.format(c.as_ref().trim())).collect();
        let markers = vec!["?"; names.len()];
        format!(
            "INSERT INTO {} ({}) VALUES ({});\n",
            self.format(table.trim()),
            names.join(","),
            markers.join(",")
        )
    }

    pub fn update(&self, table: &str, settings: &str) -> String {
        format!("UPDATE {} SET {};\n", self.format(table.trim()), settings.trim())
    }

    pub fn select(&self, table: &str, fields: &str) -> String {
        format!("SELECT {} FROM {};\n", fields.trim(), self.format(table.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::testing::assert_balanced;

    #[test]
    fn test_skeletons() {
        let s = Synthesizer::default();
        assert_eq!(
            s.insert("country", " COUNTRY, CURRENCY ", "'Fiji', 'FJD'"),
            "INSERT INTO \"country\" (COUNTRY, CURRENCY) VALUES ('Fiji', 'FJD');\n"
        );
        assert_eq!(
            s.update("COUNTRY", "CURRENCY = 'EUR'"),
            "UPDATE COUNTRY SET CURRENCY = 'EUR';\n"
        );
        assert_eq!(s.select("COUNTRY", "*"), "SELECT * FROM COUNTRY;\n");
    }

    #[test]
    fn test_insert_placeholders() {
        let s = Synthesizer::default();
        assert_eq!(
            s.insert_placeholders("EMPLOYEE", &["EMP_NO", "first name", "DATE"]),
            "INSERT INTO EMPLOYEE (EMP_NO,\"first name\",\"DATE\") VALUES (?,?,?);\n"
        );
    }

    #[test]
    fn test_skeletons_are_balanced() {
        let s = Synthesizer::default();
        assert_balanced(&s.insert("T", "A", "1"), ";");
        assert_balanced(&s.insert_placeholders("T", &["A"]), ";");
        assert_balanced(&s.update("T", "A = 1"), ";");
        assert_balanced(&s.select("T", "*"), ";");
    }
}
