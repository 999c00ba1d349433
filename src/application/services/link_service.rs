//! Link creation, lookup, redirect bookkeeping and deletion.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{Link, LinkIdentifier, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_validator::{UrlValidationError, validate_url};

/// Maximum number of random codes tried before giving up on a create.
const MAX_GENERATE_ATTEMPTS: usize = 10;

/// Service for creating, resolving and deleting shortened links.
///
/// The repository's unique constraint is the final authority on short code
/// ownership. The lookups done here only produce friendlier errors and let
/// generated codes be redrawn before hitting the database constraint.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Creates a short link.
    ///
    /// # Code Resolution
    ///
    /// - A non-blank `custom_code` is validated and used verbatim. If it is
    ///   already taken the call fails with a conflict; there is no fallback.
    /// - Otherwise a random code is drawn, redrawing on collision up to
    ///   10 times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or custom code is invalid.
    /// Returns [`AppError::Conflict`] if the custom code is already in use.
    /// Returns [`AppError::Internal`] on storage errors or if no free random
    /// code was found.
    pub async fn create_link(
        &self,
        long_url: &str,
        custom_code: Option<&str>,
    ) -> Result<Link, AppError> {
        let long_url = validate_url(long_url).map_err(|e| match e {
            UrlValidationError::Empty => AppError::bad_request(e.to_string(), json!({})),
            other => AppError::bad_request(
                "Invalid URL format",
                json!({ "reason": other.to_string() }),
            ),
        })?;

        let custom_code = custom_code.map(str::trim).filter(|c| !c.is_empty());

        let link = match custom_code {
            Some(code) => self.create_with_custom_code(long_url, code).await?,
            None => self.create_with_generated_code(long_url).await?,
        };

        info!(id = link.id, short_code = %link.short_code, "Short link created");
        Ok(link)
    }

    async fn create_with_custom_code(&self, long_url: String, code: &str) -> Result<Link, AppError> {
        validate_custom_code(code)?;

        if self.link_repository.find_by_code(code).await?.is_some() {
            warn!(short_code = code, "Custom short code already in use");
            return Err(short_code_in_use(code));
        }

        let new_link = NewLink {
            long_url,
            short_code: code.to_string(),
        };

        self.link_repository
            .create(new_link)
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => {
                    warn!(short_code = code, "Custom short code taken concurrently");
                    short_code_in_use(code)
                }
                other => other,
            })
    }

    async fn create_with_generated_code(&self, long_url: String) -> Result<Link, AppError> {
        for attempt in 1..=MAX_GENERATE_ATTEMPTS {
            let code = generate_code();

            if self.link_repository.find_by_code(&code).await?.is_some() {
                warn!(attempt, short_code = %code, "Generated short code collided, retrying");
                continue;
            }

            let new_link = NewLink {
                long_url: long_url.clone(),
                short_code: code.clone(),
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => {
                    warn!(attempt, short_code = %code, "Generated short code taken concurrently, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique short code",
            json!({ "attempts": MAX_GENERATE_ATTEMPTS }),
        ))
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn get_link_by_code(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| link_not_found(code))
    }

    /// Resolves a short code for a redirect and records the visit.
    ///
    /// The click is counted by the store in a single atomic update. A link
    /// deleted between the lookup and the update is reported as not found.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    pub async fn follow_link(&self, code: &str) -> Result<Link, AppError> {
        let link = self.get_link_by_code(code).await?;

        if !self.link_repository.increment_clicks(link.id).await? {
            debug!(short_code = code, "Link disappeared before click was recorded");
            return Err(link_not_found(code));
        }

        debug!(id = link.id, short_code = code, "Redirect recorded");
        Ok(link)
    }

    /// Returns all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_all().await
    }

    /// Counts stored links.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }

    /// Deletes a link addressed by id or short code.
    ///
    /// An id-shaped identifier is tried as an id first and, on a miss, as a
    /// short code. Anything else is only tried as a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if neither lookup removed a link.
    pub async fn delete_link(&self, raw_identifier: &str) -> Result<LinkIdentifier, AppError> {
        let identifier = LinkIdentifier::parse(raw_identifier);

        if let LinkIdentifier::Id(id) = identifier
            && self.link_repository.delete_by_id(id).await?
        {
            info!(id, "Short link deleted by id");
            return Ok(identifier);
        }

        if self.link_repository.delete_by_code(raw_identifier).await? {
            info!(short_code = raw_identifier, "Short link deleted by code");
            return Ok(LinkIdentifier::Code(raw_identifier.to_string()));
        }

        Err(AppError::not_found(
            "URL not found",
            json!({ "identifier": raw_identifier }),
        ))
    }

    /// Checks that the backing store is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }
}

fn short_code_in_use(code: &str) -> AppError {
    AppError::conflict("Short code already in use", json!({ "code": code }))
}

fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
