use crate::models::StudentRecord;

/// Static table of valid student identities, loaded once at startup and
/// read-only thereafter. Entries were extracted from the admission list PDF.
pub struct Roster {
    records: Vec<StudentRecord>,
}

impl Roster {
    pub fn preloaded() -> Self {
        let records = [
            // CH1A
            ("25031008956", "2025061001", "ABHISHEK YADAV", "AMARJEET YADAV", "CH1A"),
            ("25031038496", "2025061002", "ADHYAN MODANWAL", "NAVJEET KUMAR GUPTA", "CH1A"),
            ("25031077571", "2025061003", "ADITYA MISHRA", "SHATRUGHAN MISHRA", "CH1A"),
            ("25031125935", "2025061021", "DISHA KEDIA", "MANISH KUMAR KEDIA", "CH1A"),
            // IT1A
            ("25031057496", "2025071001", "ABHISHEK KUMAR", "RANJEET KUMAR CHOUDHARY", "IT1A"),
            ("25031123891", "2025071002", "ADARSH KUMAR PANDEY", "GUNAKESH PANDEY", "IT1A"),
            // IT1B
            ("25031100189", "2025071101", "ABHAY KUMAR", "SUBHASH CHANDRA", "IT1B"),
            ("25031018386", "2025071102", "ABHIJEET SINGH", "DHRUV NARAYAN SINGH", "IT1B"),
            // IOT1A
            ("25031021868", "2025041301", "ABHIMANYU", "ARJUN PRASAD", "IOT1A"),
            ("25031040502", "2025041302", "ABHINAV RAI", "DAYANAND RAI", "IOT1A"),
            // CSE1A
            ("SII", "2025021001", "AADTYA SINGH", "MANISH SINGH", "CSE1A"),
            ("25031001140", "2025021002", "ABHYUDAYA ANAND", "MANOJ KUMAR", "CSE1A"),
        ]
        .into_iter()
        .map(
            |(admission_id, roll_no, name, father_name, section)| StudentRecord {
                admission_id: admission_id.to_string(),
                roll_no: roll_no.to_string(),
                name: name.to_string(),
                father_name: father_name.to_string(),
                section: section.to_string(),
            },
        )
        .collect();

        Self { records }
    }

    /// Exact match on both credentials. No rate limiting or lockout; a miss
    /// is surfaced to the caller as a credentials-mismatch message.
    pub fn authenticate(&self, admission_id: &str, roll_no: &str) -> Option<&StudentRecord> {
        self.records
            .iter()
            .find(|s| s.admission_id == admission_id && s.roll_no == roll_no)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_credentials_resolve_a_student() {
        let roster = Roster::preloaded();
        let student = roster.authenticate("25031008956", "2025061001").unwrap();
        assert_eq!(student.name, "ABHISHEK YADAV");
        assert_eq!(student.section, "CH1A");
    }

    #[test]
    fn both_credentials_must_match() {
        let roster = Roster::preloaded();
        // Valid admission id paired with someone else's roll number.
        assert!(roster.authenticate("25031008956", "2025061002").is_none());
        assert!(roster.authenticate("unknown", "2025061001").is_none());
        assert!(roster.authenticate("", "").is_none());
    }

    #[test]
    fn roster_is_fully_loaded() {
        assert_eq!(Roster::preloaded().len(), 12);
    }
}
