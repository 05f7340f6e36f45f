//! Post resource handlers.

use actix_web::{HttpResponse, web};

use postdesk_core::DomainError;
use postdesk_core::domain::{AuthorId, PostStatus};
use postdesk_core::ports::PostFilter;
use postdesk_shared::dto::{
    POSTS_PER_PAGE, PostCollectionQuery, PostCollectionView, PostInput, PostItemView,
};
use postdesk_shared::{Paginated, Violation};

use crate::middleware::auth::AdminIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Reject a write whose author reference does not resolve.
async fn ensure_author_exists(state: &AppState, author: AuthorId) -> AppResult<()> {
    if state.authors.find_by_id(author).await?.is_none() {
        return Err(AppError::Validation(vec![Violation::new(
            "author",
            "The author does not exist",
        )]));
    }
    Ok(())
}

/// GET /api/posts?page=N&status=S
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PostCollectionQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = query.page.unwrap_or(1);
    if page < 1 {
        return Err(AppError::BadRequest(
            "Page should not be less than 1".to_string(),
        ));
    }

    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<PostStatus>() {
            Ok(status) => Some(status),
            // an exact-match filter on a value no post can have
            Err(_) => {
                return Ok(HttpResponse::Ok().json(Paginated::<PostCollectionView>::empty(
                    page,
                    POSTS_PER_PAGE,
                )));
            }
        },
    };

    let result = state
        .posts
        .find_page(&PostFilter { status }, page, POSTS_PER_PAGE)
        .await?;

    Ok(HttpResponse::Ok().json(Paginated::from_page(&result, |post| {
        PostCollectionView::from(post)
    })))
}

/// POST /api/posts - admin only
pub async fn create_post(
    admin: AdminIdentity,
    state: web::Data<AppState>,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let valid = body.into_inner().validated()?;
    ensure_author_exists(&state, valid.author).await?;

    let saved = state.posts.save(valid.into_post()).await?;
    tracing::info!(
        post_id = ?saved.id(),
        status = %saved.status(),
        created_by = %admin.0.subject,
        "Post created"
    );

    Ok(HttpResponse::Created().json(PostCollectionView::from(&saved)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "Post",
            id,
        })?;

    Ok(HttpResponse::Ok().json(PostItemView::from(&post)))
}

/// PUT /api/posts/{id}
///
/// Fields missing from the body keep their stored values.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "Post",
            id,
        })?;

    let valid = body.into_inner().merged_onto(&post).validated()?;
    if valid.author != post.author() {
        ensure_author_exists(&state, valid.author).await?;
    }
    valid.apply_to(&mut post);

    let saved = state.posts.save(post).await?;
    tracing::info!(post_id = id, status = %saved.status(), "Post updated");

    Ok(HttpResponse::Ok().json(PostCollectionView::from(&saved)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;
    tracing::info!(post_id = id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
