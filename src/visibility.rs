use crate::models::{AuthUser, Category, Complaint, Department, Role};

/// Filter configuration a role maps to. One uniform `permits` check replaces
/// per-role branching at the call sites; this is the portal's sole
/// access-control mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Student: only complaints they submitted, keyed by roll number.
    Owner(String),
    /// Category incharge: everything in one category, institution-wide.
    Category(Category),
    /// HOD: Faculty/Facilities complaints scoped to one department.
    Department(Department),
    /// Vice Chancellor: unrestricted.
    All,
}

impl Scope {
    pub fn for_user(user: &AuthUser) -> Scope {
        match user.role {
            Role::Student => Scope::Owner(
                user.student
                    .as_ref()
                    .map(|s| s.roll_no.clone())
                    .unwrap_or_default(),
            ),
            Role::MessIncharge => Scope::Category(Category::Mess),
            Role::HostelIncharge => Scope::Category(Category::Hostel),
            Role::InfrastructureIncharge => Scope::Category(Category::Infrastructure),
            Role::Hod(dept) => Scope::Department(dept),
            Role::ViceChancellor => Scope::All,
        }
    }

    pub fn permits(&self, complaint: &Complaint) -> bool {
        match self {
            Scope::Owner(roll_no) => !roll_no.is_empty() && complaint.student_id == *roll_no,
            Scope::Category(category) => complaint.category == *category,
            Scope::Department(dept) => {
                complaint.category.requires_department() && complaint.department == *dept
            }
            Scope::All => true,
        }
    }
}

/// Pure function of the current identity and store contents; recomputed on
/// every request, never cached.
pub fn visible(complaints: &[Complaint], scope: &Scope) -> Vec<Complaint> {
    complaints
        .iter()
        .filter(|c| scope.permits(c))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use chrono::Utc;

    fn sample_complaint(
        student_id: &str,
        category: Category,
        department: Department,
    ) -> Complaint {
        Complaint {
            id: uuid::Uuid::new_v4().to_string()[..8].to_string(),
            student_name: "ABHISHEK YADAV".to_string(),
            student_id: student_id.to_string(),
            category,
            department,
            subject: "Water leakage in Room 204".to_string(),
            description: "Continuous leakage near the window.".to_string(),
            timestamp: Utc::now(),
            status: Status::Pending,
            resolved_at: None,
            resolution_note: None,
            image_url: None,
        }
    }

    #[test]
    fn student_sees_only_their_own_complaints() {
        let complaints = vec![
            sample_complaint("2025061001", Category::Mess, Department::General),
            sample_complaint("2025061002", Category::Mess, Department::General),
            sample_complaint("2025061001", Category::Hostel, Department::General),
        ];

        let scope = Scope::Owner("2025061001".to_string());
        let mine = visible(&complaints, &scope);
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|c| c.student_id == "2025061001"));
    }

    #[test]
    fn category_incharge_never_sees_other_categories() {
        let complaints = vec![
            sample_complaint("2025061001", Category::Mess, Department::General),
            sample_complaint("2025061002", Category::Hostel, Department::General),
        ];

        let mess = visible(&complaints, &Scope::Category(Category::Mess));
        assert_eq!(mess.len(), 1);
        assert_eq!(mess[0].category, Category::Mess);

        let hostel = visible(&complaints, &Scope::Category(Category::Hostel));
        assert_eq!(hostel.len(), 1);
        assert_eq!(hostel[0].category, Category::Hostel);
    }

    #[test]
    fn faculty_complaint_routes_to_its_department_hod_only() {
        let complaints = vec![sample_complaint(
            "2025021001",
            Category::Faculty,
            Department::Cse,
        )];

        assert_eq!(visible(&complaints, &Scope::Department(Department::Cse)).len(), 1);
        assert!(visible(&complaints, &Scope::Department(Department::It)).is_empty());
        // The generic category scopes never cover Faculty complaints.
        assert!(visible(&complaints, &Scope::Category(Category::Mess)).is_empty());
    }

    #[test]
    fn hod_scope_covers_facilities_but_not_general_categories() {
        let complaints = vec![
            sample_complaint("2025021001", Category::Facilities, Department::Cse),
            sample_complaint("2025021002", Category::Infrastructure, Department::Cse),
        ];

        let seen = visible(&complaints, &Scope::Department(Department::Cse));
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].category, Category::Facilities);
    }

    #[test]
    fn vice_chancellor_sees_everything() {
        let complaints = vec![
            sample_complaint("2025061001", Category::Mess, Department::General),
            sample_complaint("2025021001", Category::Faculty, Department::Cse),
        ];
        assert_eq!(visible(&complaints, &Scope::All).len(), 2);
    }

    #[test]
    fn student_scope_without_roll_number_sees_nothing() {
        let complaints = vec![sample_complaint("", Category::Mess, Department::General)];
        assert!(visible(&complaints, &Scope::Owner(String::new())).is_empty());
    }
}
