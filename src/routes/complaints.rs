use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::models::{Category, Complaint, Department, Status};
use crate::state::AppState;
use crate::store::NewComplaint;
use crate::visibility::{visible, Scope};

use super::current_user;

/// Attachment size bound, checked at submission time.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<Status>,
}

/// The session's visible slice of the store, newest first, optionally
/// narrowed to one status.
pub async fn list_complaints(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<Complaint>>, ApiError> {
    let user = current_user(&state, &headers)?;
    let scope = Scope::for_user(&user);

    let mut complaints = visible(&state.store.snapshot(), &scope);
    if let Some(status) = query.status {
        complaints.retain(|c| c.status == status);
    }
    Ok(Json(complaints))
}

pub async fn submit_complaint(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Complaint>), ApiError> {
    let user = current_user(&state, &headers)?;
    let student = user
        .student
        .as_ref()
        .ok_or_else(|| ApiError::Forbidden("Only students can lodge complaints".to_string()))?;

    let mut category: Option<Category> = None;
    let mut department: Option<Department> = None;
    let mut subject = String::new();
    let mut description = String::new();
    let mut image_url: Option<String> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "category" => {
                let text = field.text().await.unwrap_or_default();
                category = Some(text.parse().map_err(ApiError::Validation)?);
            }
            "department" => {
                let text = field.text().await.unwrap_or_default();
                if !text.trim().is_empty() {
                    department = Some(text.parse().map_err(ApiError::Validation)?);
                }
            }
            "subject" => {
                subject = field.text().await.unwrap_or_default();
            }
            "description" => {
                description = field.text().await.unwrap_or_default();
            }
            "image" => {
                let mime = field
                    .content_type()
                    .map(|m| m.to_string())
                    .or_else(|| {
                        field
                            .file_name()
                            .map(|f| mime_guess::from_path(f).first_or_octet_stream().to_string())
                    })
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let data = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::Validation("Could not read the attached image".to_string()))?;
                if data.is_empty() {
                    continue;
                }
                if data.len() > MAX_IMAGE_BYTES {
                    return Err(ApiError::Validation(
                        "File is too large. Please select an image under 5MB.".to_string(),
                    ));
                }
                image_url = Some(format!("data:{};base64,{}", mime, BASE64.encode(&data)));
            }
            _ => {}
        }
    }

    let category = category
        .ok_or_else(|| ApiError::Validation("A complaint category is required".to_string()))?;
    if subject.trim().is_empty() {
        return Err(ApiError::Validation("Subject must not be empty".to_string()));
    }
    if description.trim().is_empty() {
        return Err(ApiError::Validation("Description must not be empty".to_string()));
    }

    let complaint = state.store.append(NewComplaint {
        student_name: student.name.clone(),
        student_id: student.roll_no.clone(),
        category,
        department,
        subject: subject.trim().to_string(),
        description: description.trim().to_string(),
        image_url,
    });

    info!(id = %complaint.id, category = %complaint.category, "complaint lodged");
    Ok((StatusCode::CREATED, Json(complaint)))
}

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub note: String,
}

/// Pending -> Resolved. Scope membership and the one-shot guard are
/// re-checked inside the store, not only here.
pub async fn resolve_complaint(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<ResolveRequest>,
) -> Result<Json<Complaint>, ApiError> {
    let user = current_user(&state, &headers)?;
    if !user.role.is_staff() {
        return Err(ApiError::Forbidden(
            "Students cannot resolve complaints".to_string(),
        ));
    }

    let scope = Scope::for_user(&user);
    let resolved = state.store.resolve(&id, &request.note, &scope)?;
    info!(id = %resolved.id, by = %user.role, "complaint resolved");
    Ok(Json(resolved))
}
