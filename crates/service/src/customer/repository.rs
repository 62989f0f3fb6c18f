use async_trait::async_trait;

use super::domain::{Customer, CustomerDraft};
use crate::errors::ServiceError;

/// Repository abstraction for customer persistence.
///
/// Absence is never an error: lookups return `None` or an empty list.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn save(&self, draft: CustomerDraft) -> Result<Customer, ServiceError>;
    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, ServiceError>;
    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Customer>, ServiceError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use models::customer::validate_name;

    struct State {
        next_id: i64,
        rows: BTreeMap<i64, Customer>, // key: id
    }

    pub struct InMemoryCustomerRepository {
        state: Mutex<State>,
    }

    impl Default for InMemoryCustomerRepository {
        fn default() -> Self {
            Self { state: Mutex::new(State { next_id: 1, rows: BTreeMap::new() }) }
        }
    }

    impl InMemoryCustomerRepository {
        fn lock(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    #[async_trait]
    impl CustomerRepository for InMemoryCustomerRepository {
        async fn save(&self, draft: CustomerDraft) -> Result<Customer, ServiceError> {
            validate_name("first_name", &draft.first_name)?;
            validate_name("last_name", &draft.last_name)?;
            let mut state = self.lock();
            let id = match draft.id {
                Some(id) => id,
                // next_id saturates at i64::MAX, which may already be taken
                None if state.rows.contains_key(&state.next_id) => {
                    return Err(ServiceError::Db("customer id space exhausted".into()));
                }
                None => state.next_id,
            };
            state.next_id = state.next_id.max(id.saturating_add(1));
            let customer = Customer { id, first_name: draft.first_name, last_name: draft.last_name };
            state.rows.insert(id, customer.clone());
            Ok(customer)
        }

        async fn find_all(&self) -> Result<Vec<Customer>, ServiceError> {
            Ok(self.lock().rows.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, ServiceError> {
            Ok(self.lock().rows.get(&id).cloned())
        }

        async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Customer>, ServiceError> {
            Ok(self
                .lock()
                .rows
                .values()
                .filter(|c| c.last_name == last_name)
                .cloned()
                .collect())
        }
    }

}
