use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};

use models::customer;

use crate::customer::domain::{Customer, CustomerDraft};
use crate::customer::repository::CustomerRepository;
use crate::errors::ServiceError;

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn save(&self, draft: CustomerDraft) -> Result<Customer, ServiceError> {
        let Some(id) = draft.id else {
            let created = customer::create(&self.db, &draft.first_name, &draft.last_name).await?;
            return Ok(created.into());
        };

        // update-or-insert under one transaction so a concurrent save of the same id cannot interleave
        let txn = self.db.begin().await?;
        let stored = match customer::update_names(&txn, id, &draft.first_name, &draft.last_name).await? {
            Some(updated) => updated,
            None => customer::create_with_id(&txn, id, &draft.first_name, &draft.last_name).await?,
        };
        txn.commit().await?;
        Ok(stored.into())
    }

    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError> {
        let rows = customer::find_all(&self.db).await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, ServiceError> {
        let row = customer::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Customer::from))
    }

    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Customer>, ServiceError> {
        let rows = customer::find_by_last_name(&self.db, last_name).await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }
}
