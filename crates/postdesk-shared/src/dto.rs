//! Data Transfer Objects - request/response types for the API.

use std::borrow::Cow;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use postdesk_core::domain::{Author, AuthorId, Post, PostStatus};

/// Number of posts per collection page.
pub const POSTS_PER_PAGE: u64 = 5;

/// Writable fields of a post, as sent on create and update.
///
/// An `id` in the body is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostInput {
    #[validate(
        required(message = "The title cannot be blank"),
        custom(function = "not_blank", message = "The title cannot be blank"),
        length(
            max = 128,
            message = "The title of the post must be less than 128 characters"
        )
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "The content cannot be blank"),
        custom(function = "not_blank", message = "The content cannot be blank")
    )]
    pub content: Option<String>,

    #[validate(custom(function = "not_before_today"))]
    pub published_at: Option<DateTime<Utc>>,

    #[validate(
        required(message = "The status cannot be blank"),
        custom(function = "known_status")
    )]
    pub status: Option<String>,

    #[validate(required(message = "The author cannot be null"))]
    pub author: Option<i32>,
}

/// Post fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPost {
    pub title: String,
    pub content: String,
    pub published_at: Option<DateTime<Utc>>,
    pub status: PostStatus,
    pub author: AuthorId,
}

impl PostInput {
    /// Fill the fields missing from this body with the stored values of `post`.
    ///
    /// `published_at` is only taken from the body, so a stored timestamp is
    /// never re-validated.
    pub fn merged_onto(self, post: &Post) -> Self {
        Self {
            title: self.title.or_else(|| Some(post.title().to_owned())),
            content: self.content.or_else(|| Some(post.content().to_owned())),
            published_at: self.published_at,
            status: self.status.or_else(|| Some(post.status().as_str().to_owned())),
            author: self.author.or(Some(post.author().0)),
        }
    }

    /// Run every field rule and return the typed fields.
    pub fn validated(self) -> Result<ValidPost, ValidationErrors> {
        self.validate()?;

        let status = self.status.as_deref().map(str::parse::<PostStatus>);
        match (self.title, self.content, status, self.author) {
            (Some(title), Some(content), Some(Ok(status)), Some(author)) => Ok(ValidPost {
                title,
                content,
                published_at: self.published_at,
                status,
                author: AuthorId(author),
            }),
            _ => Err(ValidationErrors::new()),
        }
    }
}

impl ValidPost {
    /// Build a new, unsaved post.
    pub fn into_post(self) -> Post {
        let mut post = Post::new(self.title, self.content, self.status, self.author);
        post.set_published_at(self.published_at);
        post
    }

    /// Write these fields onto an existing post.
    pub fn apply_to(self, post: &mut Post) {
        post.set_title(self.title)
            .set_content(self.content)
            .set_status(self.status)
            .set_author(self.author);
        if let Some(published_at) = self.published_at {
            post.set_published_at(Some(published_at));
        }
    }
}

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

fn known_status(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(violation("not_blank", "The status cannot be blank"));
    }
    if value.parse::<PostStatus>().is_err() {
        return Err(violation(
            "choice",
            "The value you selected is not a valid choice.",
        ));
    }
    Ok(())
}

fn not_before_today(value: &DateTime<Utc>) -> Result<(), ValidationError> {
    let start_of_today = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
    if *value < start_of_today {
        return Err(violation(
            "greater_than_or_equal",
            "This value should be greater than or equal to today.",
        ));
    }
    Ok(())
}

/// Query string of the post collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostCollectionQuery {
    pub page: Option<u64>,
    pub status: Option<String>,
}

/// Post as shown in collections and in write responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCollectionView {
    pub id: Option<i32>,
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub status: PostStatus,
    pub author: AuthorId,
}

impl From<&Post> for PostCollectionView {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id(),
            title: post.title().to_owned(),
            published_at: post.published_at(),
            status: post.status(),
            author: post.author(),
        }
    }
}

/// Post as shown by the item fetch: the collection fields plus `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostItemView {
    pub id: Option<i32>,
    pub title: String,
    pub content: String,
    pub published_at: Option<DateTime<Utc>>,
    pub status: PostStatus,
    pub author: AuthorId,
}

impl From<&Post> for PostItemView {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id(),
            title: post.title().to_owned(),
            content: post.content().to_owned(),
            published_at: post.published_at(),
            status: post.status(),
            author: post.author(),
        }
    }
}

/// Request to create an author.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AuthorInput {
    #[validate(
        required(message = "The name cannot be blank"),
        custom(function = "not_blank", message = "The name cannot be blank"),
        length(max = 255, message = "The name must be less than 255 characters")
    )]
    pub name: Option<String>,
}

impl AuthorInput {
    pub fn validated(self) -> Result<Author, ValidationErrors> {
        self.validate()?;
        match self.name {
            Some(name) => Ok(Author::new(name)),
            None => Err(ValidationErrors::new()),
        }
    }
}

/// Response containing an author's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorView {
    pub id: Option<AuthorId>,
    pub name: String,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            name: author.name.clone(),
        }
    }
}
