use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{AuthUser, Role};
use crate::roster::Roster;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub role: Role,
    pub admission_id: Option<String>,
    pub roll_no: Option<String>,
    pub access_code: Option<String>,
}

/// Validates login input against the roster (students) or the optional staff
/// access code (everyone else). When no access code is configured, any staff
/// or HOD role is granted on selection alone; that bypass matches the
/// portal's current trust model and is logged loudly.
pub fn authenticate(
    request: &LoginRequest,
    roster: &Roster,
    config: &Config,
) -> Result<AuthUser, ApiError> {
    if request.role == Role::Student {
        let admission_id = request.admission_id.as_deref().unwrap_or("");
        let roll_no = request.roll_no.as_deref().unwrap_or("");

        let student = roster
            .authenticate(admission_id, roll_no)
            .ok_or(ApiError::CredentialMismatch)?;

        return Ok(AuthUser {
            role: Role::Student,
            name: student.name.clone(),
            student: Some(student.clone()),
        });
    }

    match &config.staff_access_code {
        Some(expected) => {
            if request.access_code.as_deref() != Some(expected.as_str()) {
                return Err(ApiError::CredentialMismatch);
            }
        }
        None => {
            warn!(role = %request.role, "staff login granted without credential check");
        }
    }

    Ok(AuthUser {
        role: request.role,
        name: request.role.to_string(),
        student: None,
    })
}

/// Process-local session table. Tokens are opaque v4 UUIDs; entries live
/// until logout or process exit, never on disk.
pub struct SessionRegistry {
    inner: Mutex<HashMap<Uuid, AuthUser>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    pub fn create(&self, user: AuthUser) -> Uuid {
        let token = Uuid::new_v4();
        self.inner
            .lock()
            .expect("session registry lock poisoned")
            .insert(token, user);
        token
    }

    pub fn get(&self, token: &Uuid) -> Option<AuthUser> {
        self.inner
            .lock()
            .expect("session registry lock poisoned")
            .get(token)
            .cloned()
    }

    pub fn remove(&self, token: &Uuid) -> bool {
        self.inner
            .lock()
            .expect("session registry lock poisoned")
            .remove(token)
            .is_some()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Department;

    fn open_config() -> Config {
        Config {
            gemini_api_key: None,
            staff_access_code: None,
            host: "127.0.0.1".to_string(),
            port: 0,
        }
    }

    fn login(role: Role) -> LoginRequest {
        LoginRequest {
            role,
            admission_id: None,
            roll_no: None,
            access_code: None,
        }
    }

    #[test]
    fn student_login_requires_a_roster_match() {
        let roster = Roster::preloaded();
        let config = open_config();

        let ok = authenticate(
            &LoginRequest {
                admission_id: Some("25031008956".to_string()),
                roll_no: Some("2025061001".to_string()),
                ..login(Role::Student)
            },
            &roster,
            &config,
        )
        .unwrap();
        assert_eq!(ok.role, Role::Student);
        assert_eq!(ok.name, "ABHISHEK YADAV");
        assert_eq!(ok.student.unwrap().roll_no, "2025061001");

        let err = authenticate(
            &LoginRequest {
                admission_id: Some("25031008956".to_string()),
                roll_no: Some("wrong".to_string()),
                ..login(Role::Student)
            },
            &roster,
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::CredentialMismatch));
    }

    #[test]
    fn staff_roles_are_granted_on_selection_when_no_code_is_set() {
        let roster = Roster::preloaded();
        let config = open_config();

        let user = authenticate(&login(Role::Hod(Department::Cse)), &roster, &config).unwrap();
        assert_eq!(user.role, Role::Hod(Department::Cse));
        assert_eq!(user.name, "HOD - CSE");
        assert!(user.student.is_none());
    }

    #[test]
    fn configured_access_code_gates_staff_logins() {
        let roster = Roster::preloaded();
        let config = Config {
            staff_access_code: Some("warden-pass".to_string()),
            ..open_config()
        };

        let err = authenticate(&login(Role::HostelIncharge), &roster, &config).unwrap_err();
        assert!(matches!(err, ApiError::CredentialMismatch));

        let ok = authenticate(
            &LoginRequest {
                access_code: Some("warden-pass".to_string()),
                ..login(Role::HostelIncharge)
            },
            &roster,
            &config,
        )
        .unwrap();
        assert_eq!(ok.role, Role::HostelIncharge);
    }

    #[test]
    fn sessions_are_created_resolved_and_discarded() {
        let registry = SessionRegistry::new();
        let user = AuthUser {
            role: Role::ViceChancellor,
            name: "Vice Chancellor".to_string(),
            student: None,
        };

        let token = registry.create(user);
        assert_eq!(registry.get(&token).unwrap().role, Role::ViceChancellor);

        assert!(registry.remove(&token));
        assert!(registry.get(&token).is_none());
        // Logging out twice is a no-op.
        assert!(!registry.remove(&token));
    }
}
