use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Mess,
    Hostel,
    Faculty,
    Facilities,
    Infrastructure,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Mess,
        Category::Hostel,
        Category::Faculty,
        Category::Facilities,
        Category::Infrastructure,
    ];

    /// Faculty and Facilities complaints are routed per department; every
    /// other category is handled institution-wide.
    pub fn requires_department(self) -> bool {
        matches!(self, Category::Faculty | Category::Facilities)
    }

    /// Resolution latency target, in hours, per category.
    pub fn target_hours(self) -> f64 {
        match self {
            Category::Mess => 12.0,
            Category::Hostel => 24.0,
            Category::Faculty => 48.0,
            Category::Facilities => 24.0,
            Category::Infrastructure => 72.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Mess => "Mess",
            Category::Hostel => "Hostel",
            Category::Faculty => "Faculty",
            Category::Facilities => "Facilities",
            Category::Infrastructure => "Infrastructure",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Unknown complaint category: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Computer Science & Engineering")]
    Cse,
    #[serde(rename = "Information Technology")]
    It,
    #[serde(rename = "Electronics & Communication")]
    Ece,
    #[serde(rename = "Electrical Engineering")]
    Ee,
    #[serde(rename = "Mechanical Engineering")]
    Me,
    #[serde(rename = "Civil Engineering")]
    Civil,
    #[serde(rename = "Chemical Engineering")]
    Ce,
    #[serde(rename = "Management Studies (MBA)")]
    Mba,
    #[serde(rename = "Business Administration (BBA)")]
    Bba,
    #[serde(rename = "Pharmacy")]
    Pharmacy,
    #[serde(rename = "School of Law")]
    Law,
    #[serde(rename = "Department of Physics")]
    Physics,
    #[serde(rename = "Department of Chemistry")]
    Chemistry,
    #[serde(rename = "Department of Mathematics")]
    Maths,
    #[serde(rename = "Humanities & Social Sciences")]
    Humanities,
    #[serde(rename = "Training & Placement Cell")]
    Placement,
    #[serde(rename = "General/Administrative")]
    General,
}

impl Department {
    /// Short code used in HOD role names ("HOD - CSE").
    pub fn code(self) -> &'static str {
        match self {
            Department::Cse => "CSE",
            Department::It => "IT",
            Department::Ece => "ECE",
            Department::Ee => "EE",
            Department::Me => "ME",
            Department::Civil => "CIVIL",
            Department::Ce => "CE",
            Department::Mba => "MBA",
            Department::Bba => "BBA",
            Department::Pharmacy => "PHARMACY",
            Department::Law => "LAW",
            Department::Physics => "PHYSICS",
            Department::Chemistry => "CHEMISTRY",
            Department::Maths => "MATHS",
            Department::Humanities => "HUMANITIES",
            Department::Placement => "PLACEMENT",
            Department::General => "GENERAL",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Department::Cse => "Computer Science & Engineering",
            Department::It => "Information Technology",
            Department::Ece => "Electronics & Communication",
            Department::Ee => "Electrical Engineering",
            Department::Me => "Mechanical Engineering",
            Department::Civil => "Civil Engineering",
            Department::Ce => "Chemical Engineering",
            Department::Mba => "Management Studies (MBA)",
            Department::Bba => "Business Administration (BBA)",
            Department::Pharmacy => "Pharmacy",
            Department::Law => "School of Law",
            Department::Physics => "Department of Physics",
            Department::Chemistry => "Department of Chemistry",
            Department::Maths => "Department of Mathematics",
            Department::Humanities => "Humanities & Social Sciences",
            Department::Placement => "Training & Placement Cell",
            Department::General => "General/Administrative",
        }
    }

    const ALL: [Department; 17] = [
        Department::Cse,
        Department::It,
        Department::Ece,
        Department::Ee,
        Department::Me,
        Department::Civil,
        Department::Ce,
        Department::Mba,
        Department::Bba,
        Department::Pharmacy,
        Department::Law,
        Department::Physics,
        Department::Chemistry,
        Department::Maths,
        Department::Humanities,
        Department::Placement,
        Department::General,
    ];
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Department::ALL
            .iter()
            .find(|d| d.code().eq_ignore_ascii_case(s) || d.label().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown department: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Pending,
    Resolved,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Pending => "Pending",
            Status::Resolved => "Resolved",
        })
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("Pending") => Ok(Status::Pending),
            s if s.eq_ignore_ascii_case("Resolved") => Ok(Status::Resolved),
            other => Err(format!("Unknown status: {}", other)),
        }
    }
}

/// Identity record in the preloaded student roster. Static data, never
/// created or mutated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRecord {
    pub admission_id: String,
    pub roll_no: String,
    pub name: String,
    pub father_name: String,
    pub section: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    pub id: String,
    pub student_name: String,
    /// Submitter identifier, equal to the student's roll number.
    pub student_id: String,
    pub category: Category,
    pub department: Department,
    pub subject: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub status: Status,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolution_note: Option<String>,
    /// Base64 data URL of the attached photo, if any.
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Student,
    MessIncharge,
    HostelIncharge,
    InfrastructureIncharge,
    Hod(Department),
    ViceChancellor,
}

impl Role {
    pub fn is_staff(self) -> bool {
        !matches!(self, Role::Student)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => f.write_str("Student"),
            Role::MessIncharge => f.write_str("Mess Incharge"),
            Role::HostelIncharge => f.write_str("Hostel Incharge"),
            Role::InfrastructureIncharge => f.write_str("Infrastructure Incharge"),
            Role::Hod(dept) => write!(f, "HOD - {}", dept.code()),
            Role::ViceChancellor => f.write_str("Vice Chancellor"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(code) = s.strip_prefix("HOD - ") {
            let dept: Department = code.parse()?;
            if dept == Department::General {
                return Err("No HOD role exists for the General department".to_string());
            }
            return Ok(Role::Hod(dept));
        }
        match s {
            "Student" => Ok(Role::Student),
            "Mess Incharge" => Ok(Role::MessIncharge),
            "Hostel Incharge" => Ok(Role::HostelIncharge),
            "Infrastructure Incharge" => Ok(Role::InfrastructureIncharge),
            "Vice Chancellor" => Ok(Role::ViceChancellor),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

/// Ephemeral authenticated identity. Created at login, dropped at logout,
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub role: Role,
    pub name: String,
    pub student: Option<StudentRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSummary {
    pub report: String,
    pub overall_health: f64,
    pub category_scores: Vec<CategoryScore>,
    pub dept_scores: Vec<DeptScore>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeptScore {
    pub category: String,
    pub dept: String,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_required_only_for_faculty_and_facilities() {
        assert!(Category::Faculty.requires_department());
        assert!(Category::Facilities.requires_department());
        assert!(!Category::Mess.requires_department());
        assert!(!Category::Hostel.requires_department());
        assert!(!Category::Infrastructure.requires_department());
    }

    #[test]
    fn category_targets_match_policy() {
        assert_eq!(Category::Mess.target_hours(), 12.0);
        assert_eq!(Category::Hostel.target_hours(), 24.0);
        assert_eq!(Category::Faculty.target_hours(), 48.0);
        assert_eq!(Category::Facilities.target_hours(), 24.0);
        assert_eq!(Category::Infrastructure.target_hours(), 72.0);
    }

    #[test]
    fn roles_round_trip_through_strings() {
        for role in [
            Role::Student,
            Role::MessIncharge,
            Role::HostelIncharge,
            Role::InfrastructureIncharge,
            Role::Hod(Department::Cse),
            Role::Hod(Department::Placement),
            Role::ViceChancellor,
        ] {
            let s = role.to_string();
            assert_eq!(s.parse::<Role>().unwrap(), role, "round trip for {}", s);
        }
    }

    #[test]
    fn no_hod_role_for_general_department() {
        assert!("HOD - GENERAL".parse::<Role>().is_err());
    }

    #[test]
    fn department_parses_code_and_label() {
        assert_eq!("CSE".parse::<Department>().unwrap(), Department::Cse);
        assert_eq!(
            "Information Technology".parse::<Department>().unwrap(),
            Department::It
        );
        assert!("Astrology".parse::<Department>().is_err());
    }
}
