//! Column operations.

use crate::board::{
    domain::{Column, ColumnDraft, ColumnId},
    ports::ColumnRepository,
    validation::{ColumnForm, validate_column_form},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

use super::{BoardServiceError, BoardServiceResult};

/// Column orchestration service.
#[derive(Clone)]
pub struct ColumnService<R, C>
where
    R: ColumnRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ColumnService<R, C>
where
    R: ColumnRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new column service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Validates `form` and appends a column after every live column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Validation`] for an invalid form or
    /// [`BoardServiceError::Store`] when persistence fails.
    pub async fn create(&self, form: &ColumnForm) -> BoardServiceResult<Column> {
        let valid = validate_column_form(form)?;
        let draft = ColumnDraft::new(valid.title, valid.description, &*self.clock);
        let column = self.repository.append_column(draft).await?;
        info!(column_id = %column.id(), order = %column.order(), "Created column");
        Ok(column)
    }

    /// Replaces the title and description of a live column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Validation`] for an invalid form or
    /// [`BoardServiceError::ColumnNotFound`] when the column is missing or
    /// deleted.
    pub async fn update(&self, id: ColumnId, form: &ColumnForm) -> BoardServiceResult<Column> {
        let valid = validate_column_form(form)?;
        let column = self
            .repository
            .update_column(id, valid.into(), self.clock.utc())
            .await?;
        info!(column_id = %id, "Updated column");
        Ok(column)
    }

    /// Soft-deletes a column and every live task in it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::ColumnNotFound`] when the column is
    /// missing or already deleted.
    pub async fn delete(&self, id: ColumnId) -> BoardServiceResult<ColumnId> {
        self.repository
            .delete_column_cascade(id, self.clock.utc())
            .await?;
        info!(column_id = %id, "Deleted column and its tasks");
        Ok(id)
    }

    /// Returns a live column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::ColumnNotFound`] when the column is
    /// missing or deleted.
    pub async fn get(&self, id: ColumnId) -> BoardServiceResult<Column> {
        self.repository
            .find_column(id)
            .await?
            .ok_or(BoardServiceError::ColumnNotFound(id))
    }

    /// Lists live columns in display order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when persistence fails.
    pub async fn list(&self) -> BoardServiceResult<Vec<Column>> {
        let columns = self.repository.list_columns().await?;
        debug!(count = columns.len(), "Listed columns");
        Ok(columns)
    }
}
