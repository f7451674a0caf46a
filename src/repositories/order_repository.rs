use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait};
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::entities::order::{ActiveModel as OrderActiveModel, Entity as Order, Model as OrderModel};
use crate::entities::{NewOrder, OrderChanges};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

/// Storage seam for orders.
///
/// `Ok(None)` from `update`/`delete` means no record carries that id.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<OrderModel>, ServiceError>;

    async fn create(&self, order: NewOrder) -> Result<OrderModel, ServiceError>;

    async fn update(
        &self,
        id: &str,
        changes: OrderChanges,
    ) -> Result<Option<OrderModel>, ServiceError>;

    async fn delete(&self, id: &str) -> Result<Option<OrderModel>, ServiceError>;
}

/// Repository for order operations
#[derive(Debug, Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find an order by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<OrderModel>, ServiceError> {
        Order::find_by_id(id)
            .one(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }
}

/// A malformed identifier is a storage-level failure, not a missing record.
fn parse_order_id(id: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(id)
        .map_err(|e| ServiceError::db_error(format!("invalid order id `{id}`: {e}")))
}

#[async_trait]
impl OrderStore for OrderRepository {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<OrderModel>, ServiceError> {
        let orders = Order::find().all(self.base.get_db()).await?;
        debug!(count = orders.len(), "Listed orders");
        Ok(orders)
    }

    #[instrument(skip(self, order), fields(name = %order.name, items = order.items.len()))]
    async fn create(&self, order: NewOrder) -> Result<OrderModel, ServiceError> {
        let saved = order.into_active_model().insert(self.base.get_db()).await?;
        debug!(order_id = %saved.id, "Order inserted");
        Ok(saved)
    }

    #[instrument(skip(self, changes))]
    async fn update(
        &self,
        id: &str,
        changes: OrderChanges,
    ) -> Result<Option<OrderModel>, ServiceError> {
        let id = parse_order_id(id)?;

        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        if changes.is_empty() {
            return Ok(Some(existing));
        }

        let mut active_model: OrderActiveModel = existing.into();
        changes.apply(&mut active_model);

        match active_model.update(self.base.get_db()).await {
            Ok(updated) => Ok(Some(updated)),
            // Removed between the lookup and the write
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(ServiceError::DatabaseError(e)),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<Option<OrderModel>, ServiceError> {
        let id = parse_order_id(id)?;

        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let result = Order::delete_by_id(id).exec(self.base.get_db()).await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        Ok(Some(existing))
    }
}
