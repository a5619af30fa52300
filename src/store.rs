use chrono::{Duration, Utc};
use std::sync::Mutex;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Category, Complaint, Department, Status};
use crate::visibility::Scope;

/// Submission input. The store assigns the id, timestamp and initial status.
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub student_name: String,
    pub student_id: String,
    pub category: Category,
    pub department: Option<Department>,
    pub subject: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// Authoritative in-memory complaint collection, owned by the composition
/// root and injected into handlers. State is transient and resets on restart.
pub struct ComplaintStore {
    inner: Mutex<Vec<Complaint>>,
}

impl ComplaintStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Vec::new()),
        }
    }

    /// Store preloaded with the demo complaint the portal ships with.
    pub fn seeded() -> Self {
        let store = Self::new();
        {
            let mut complaints = store.inner.lock().expect("complaint store lock poisoned");
            complaints.push(Complaint {
                id: "seed-0001".to_string(),
                student_name: "ABHISHEK YADAV".to_string(),
                student_id: "2025061001".to_string(),
                category: Category::Mess,
                department: Department::General,
                subject: "Quality of breakfast".to_string(),
                description: "The breakfast served today was cold and the bread was stale."
                    .to_string(),
                timestamp: Utc::now() - Duration::hours(24),
                status: Status::Pending,
                resolved_at: None,
                resolution_note: None,
                image_url: None,
            });
        }
        store
    }

    /// Appends a new Pending complaint, newest first. The department is
    /// normalized to General unless the category is routed per department.
    pub fn append(&self, new: NewComplaint) -> Complaint {
        let department = if new.category.requires_department() {
            new.department.unwrap_or(Department::General)
        } else {
            Department::General
        };

        let complaint = Complaint {
            id: Uuid::new_v4().to_string()[..8].to_string(),
            student_name: new.student_name,
            student_id: new.student_id,
            category: new.category,
            department,
            subject: new.subject,
            description: new.description,
            timestamp: Utc::now(),
            status: Status::Pending,
            resolved_at: None,
            resolution_note: None,
            image_url: new.image_url,
        };

        let mut complaints = self.inner.lock().expect("complaint store lock poisoned");
        complaints.insert(0, complaint.clone());
        complaint
    }

    /// The Pending -> Resolved transition. One-way and one-shot: resolving an
    /// already-Resolved complaint is rejected rather than overwriting its
    /// note and timestamp. Authorization is re-checked here against the
    /// caller's scope, not only at the route layer.
    pub fn resolve(&self, id: &str, note: &str, scope: &Scope) -> Result<Complaint, ApiError> {
        let note = note.trim();
        if note.is_empty() {
            return Err(ApiError::Validation(
                "A resolution note is required to close a complaint".to_string(),
            ));
        }

        let mut complaints = self.inner.lock().expect("complaint store lock poisoned");
        let complaint = complaints
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("complaint {}", id)))?;

        if !scope.permits(complaint) {
            return Err(ApiError::Forbidden(
                "Complaint is outside your assigned portfolio".to_string(),
            ));
        }
        if complaint.status == Status::Resolved {
            return Err(ApiError::AlreadyResolved(complaint.id.clone()));
        }

        complaint.status = Status::Resolved;
        complaint.resolution_note = Some(note.to_string());
        complaint.resolved_at = Some(Utc::now());
        Ok(complaint.clone())
    }

    /// Clone of the current contents for filtering and aggregation.
    pub fn snapshot(&self) -> Vec<Complaint> {
        self.inner
            .lock()
            .expect("complaint store lock poisoned")
            .clone()
    }
}

impl Default for ComplaintStore {
    fn default() -> Self {
        Self::new()
    }
}
