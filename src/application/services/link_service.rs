//! Link creation, listing, and maintenance.
//!
//! Creation is the short-code allocation + metadata enrichment flow: a
//! user-supplied code is validated and checked for conflicts, a missing one
//! is allocated from the shared keyspace, and display fields the caller
//! left empty are filled from the target page's metadata.

use std::sync::Arc;

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::listing::ListQuery;
use crate::domain::repositories::{LinkRepository, ShortCodeRepository};
use crate::error::AppError;
use crate::infrastructure::metadata::MetadataProvider;
use crate::utils::short_code::{
    AllocateError, DEFAULT_CODE_LENGTH, DEFAULT_MAX_ATTEMPTS, allocate, is_valid_short_code,
};
use serde_json::json;

/// Validated link-creation input.
#[derive(Debug, Clone, Default)]
pub struct CreateLink {
    pub url: String,
    pub short_code: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub position: Option<i32>,
}

/// Partial link update.
///
/// With `refresh_metadata`, display fields the caller did not set are
/// re-extracted from the (possibly new) target URL.
#[derive(Debug, Clone, Default)]
pub struct UpdateLink {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub position: Option<i32>,
    pub active: Option<bool>,
    pub refresh_metadata: bool,
}

/// Service for managing profile links.
pub struct LinkService<L, C, M>
where
    L: LinkRepository,
    C: ShortCodeRepository,
    M: MetadataProvider,
{
    link_repository: Arc<L>,
    code_repository: Arc<C>,
    metadata: Arc<M>,
}

impl<L, C, M> LinkService<L, C, M>
where
    L: LinkRepository,
    C: ShortCodeRepository,
    M: MetadataProvider,
{
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, code_repository: Arc<C>, metadata: Arc<M>) -> Self {
        Self {
            link_repository,
            code_repository,
            metadata,
        }
    }

    /// Creates a link for a user.
    ///
    /// # Short code
    ///
    /// - A supplied code must match `[A-Za-z0-9_-]{4,20}` and be free
    ///   across all links and products.
    /// - Otherwise an 8-character alphanumeric code is allocated, retrying
    ///   up to 10 collisions before failing.
    ///
    /// # Metadata
    ///
    /// When title, description, or image are not supplied, the target page
    /// is fetched once and the missing fields are filled from its metadata.
    /// The fetch never fails; at worst the fields come from a
    /// hostname-derived placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed code,
    /// [`AppError::Conflict`] for a taken code, and [`AppError::Internal`]
    /// when allocation exhausts its attempts.
    pub async fn create(&self, user_id: i64, input: CreateLink) -> Result<Link, AppError> {
        let short_code = self.resolve_code(input.short_code).await?;

        let needs_metadata =
            input.title.is_none() || input.description.is_none() || input.image.is_none();

        let meta = if needs_metadata {
            self.metadata.fetch(&input.url).await
        } else {
            Default::default()
        };

        let new_link = NewLink {
            user_id,
            short_code,
            url: input.url,
            title: input.title.unwrap_or(meta.title),
            description: input.description.unwrap_or(meta.description),
            image: input.image.unwrap_or(meta.image),
            site_name: meta.site_name,
            position: input.position.unwrap_or(0),
        };

        self.link_repository.create(new_link).await
    }

    /// Retrieves one of the user's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    pub async fn get(&self, id: i64, user_id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
    }

    /// Lists the user's links plus the total count for pagination.
    pub async fn list(&self, user_id: i64, query: ListQuery) -> Result<(Vec<Link>, i64), AppError> {
        let links = self.link_repository.list(user_id, query).await?;
        let total = self.link_repository.count(user_id).await?;

        Ok((links, total))
    }

    /// Applies a partial update, optionally refreshing metadata from the
    /// target page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    pub async fn update(&self, id: i64, user_id: i64, input: UpdateLink) -> Result<Link, AppError> {
        let mut patch = LinkPatch {
            url: input.url,
            title: input.title,
            description: input.description,
            image: input.image,
            site_name: None,
            position: input.position,
            active: input.active,
        };

        if input.refresh_metadata {
            let target = match &patch.url {
                Some(url) => url.clone(),
                None => self.get(id, user_id).await?.url,
            };

            let meta = self.metadata.fetch(&target).await;
            patch.title.get_or_insert(meta.title);
            patch.description.get_or_insert(meta.description);
            patch.image.get_or_insert(meta.image);
            patch.site_name = Some(meta.site_name);
        }

        self.link_repository.update(id, user_id, patch).await
    }

    /// Deletes a link, freeing its short code.
    ///
    /// Returns the link's short code so the caller can invalidate caches.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    pub async fn delete(&self, id: i64, user_id: i64) -> Result<String, AppError> {
        let link = self.get(id, user_id).await?;

        let deleted = self.link_repository.delete(id, user_id).await?;
        if !deleted {
            return Err(AppError::not_found("Link not found", json!({ "id": id })));
        }

        Ok(link.short_code)
    }

    /// Resolves a short code to its redirect target. Inactive links do not
    /// redirect.
    pub async fn resolve(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        let link = self.link_repository.find_by_code(short_code).await?;

        Ok(link.filter(|l| l.active))
    }

    /// Validates a user-supplied code or allocates a fresh one.
    async fn resolve_code(&self, custom: Option<String>) -> Result<String, AppError> {
        if let Some(code) = custom {
            if !is_valid_short_code(&code) {
                return Err(AppError::bad_request(
                    "Short code must be 4-20 characters from [A-Za-z0-9_-]",
                    json!({ "short_code": code }),
                ));
            }

            if self.code_repository.exists(&code).await? {
                return Err(AppError::conflict(
                    "Short code already taken",
                    json!({ "short_code": code }),
                ));
            }

            return Ok(code);
        }

        allocate(DEFAULT_CODE_LENGTH, DEFAULT_MAX_ATTEMPTS, |candidate| async move {
            self.code_repository.exists(&candidate).await
        })
        .await
        .map_err(|e| match e {
            AllocateError::Exhausted { attempts } => AppError::internal(
                "Failed to allocate a unique short code",
                json!({ "reason": "exhausted", "attempts": attempts }),
            ),
            AllocateError::Check(reason) => AppError::internal(
                "Short code uniqueness check failed",
                json!({ "reason": reason }),
            ),
        })
    }
}
