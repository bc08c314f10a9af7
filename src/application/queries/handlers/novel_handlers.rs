//! Novel Query Handlers
//!
//! 读路径全部走投影集；渲染方拿到的永远是完整成形的集合

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::IdentityProviderPort;
use crate::application::projection::NovelProjection;
use crate::application::queries::{BrowseNovels, GetNovel, MyNovels};
use crate::domain::novel::NovelView;

/// BrowseNovels Handler
pub struct BrowseNovelsHandler {
    projection: Arc<NovelProjection>,
}

impl BrowseNovelsHandler {
    pub fn new(projection: Arc<NovelProjection>) -> Self {
        Self { projection }
    }

    pub fn handle(&self, query: BrowseNovels) -> Vec<NovelView> {
        match query.filter.as_deref() {
            Some(filter) if !filter.trim().is_empty() => self.projection.filter(filter),
            _ => self.projection.current().as_ref().clone(),
        }
    }
}

/// GetNovel Handler
pub struct GetNovelHandler {
    projection: Arc<NovelProjection>,
}

impl GetNovelHandler {
    pub fn new(projection: Arc<NovelProjection>) -> Self {
        Self { projection }
    }

    pub fn handle(&self, query: GetNovel) -> Result<NovelView, ApplicationError> {
        self.projection
            .find(&query.key)
            .ok_or_else(|| ApplicationError::not_found("Novel", &query.key))
    }
}

/// MyNovels Handler
pub struct MyNovelsHandler {
    projection: Arc<NovelProjection>,
    identity: Arc<dyn IdentityProviderPort>,
}

impl MyNovelsHandler {
    pub fn new(projection: Arc<NovelProjection>, identity: Arc<dyn IdentityProviderPort>) -> Self {
        Self {
            projection,
            identity,
        }
    }

    pub fn handle(&self, _query: MyNovels) -> Result<Vec<NovelView>, ApplicationError> {
        let viewer = self
            .identity
            .current()
            .ok_or(ApplicationError::AuthRequired)?;

        Ok(self
            .projection
            .current()
            .iter()
            .filter(|v| v.authored_by(&viewer.id))
            .cloned()
            .collect())
    }
}
