use crate::models::SeriesTemplate;
use async_trait::async_trait;
use repost_core::Result;

/// Process-wide store of series templates, keyed by case-sensitive name.
///
/// Implementations serialize `upsert` and only report success once the whole collection is
/// durably written; a failed write leaves the in-memory view unchanged.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Returns the template for `name` or [`repost_core::RepostError::NotFound`].
    async fn get(&self, name: &str) -> Result<SeriesTemplate>;
    /// Template names in insertion order. Empty when no template exists.
    async fn list_names(&self) -> Vec<String>;
    /// All templates in insertion order.
    async fn list(&self) -> Vec<SeriesTemplate>;
    /// Inserts or replaces the template with the same name, then persists.
    async fn upsert(&self, template: SeriesTemplate) -> Result<()>;
}
