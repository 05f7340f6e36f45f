//! Author handlers - just enough for posts to have something to reference.

use actix_web::{HttpResponse, web};

use postdesk_core::DomainError;
use postdesk_core::domain::AuthorId;
use postdesk_shared::dto::{AuthorInput, AuthorView};

use crate::middleware::auth::AdminIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/authors - admin only
pub async fn create_author(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    body: web::Json<AuthorInput>,
) -> AppResult<HttpResponse> {
    let author = body.into_inner().validated()?;
    let saved = state.authors.save(author).await?;
    tracing::info!(author_id = ?saved.id, "Author created");

    Ok(HttpResponse::Created().json(AuthorView::from(&saved)))
}

/// GET /api/authors/{id}
pub async fn get_author(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let author = state
        .authors
        .find_by_id(AuthorId(id))
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "Author",
            id,
        })?;

    Ok(HttpResponse::Ok().json(AuthorView::from(&author)))
}
