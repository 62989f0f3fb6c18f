use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{Customer, CustomerDraft};
use super::repository::CustomerRepository;
use crate::errors::ServiceError;

/// Customer business service independent of web framework and storage backend
pub struct CustomerService<R: CustomerRepository> {
    repo: Arc<R>,
}

impl<R: CustomerRepository> Clone for CustomerService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Store a customer, assigning an id when the draft has none.
    ///
    /// # Examples
    /// ```
    /// use service::customer::{CustomerDraft, CustomerService};
    /// use service::customer::repository::memory::InMemoryCustomerRepository;
    /// use std::sync::Arc;
    /// let svc = CustomerService::new(Arc::new(InMemoryCustomerRepository::default()));
    /// let jack = tokio_test::block_on(svc.save(CustomerDraft::new("Jack", "Bauer"))).unwrap();
    /// assert_eq!(jack.id, 1);
    /// assert_eq!(jack.to_string(), "Customer[id=1, firstName='Jack', lastName='Bauer']");
    /// ```
    #[instrument(skip(self, draft), fields(id = ?draft.id, last_name = %draft.last_name))]
    pub async fn save(&self, draft: CustomerDraft) -> Result<Customer, ServiceError> {
        let saved = self.repo.save(draft).await?;
        info!(customer_id = saved.id, "customer_saved");
        Ok(saved)
    }

    /// All customers in insertion order.
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Customer>, ServiceError> {
        let all = self.repo.find_all().await?;
        debug!(count = all.len(), "customers_listed");
        Ok(all)
    }

    /// Look up by id; `Ok(None)` when absent.
    ///
    /// # Examples
    /// ```
    /// use service::customer::CustomerService;
    /// use service::customer::repository::memory::InMemoryCustomerRepository;
    /// use std::sync::Arc;
    /// let svc = CustomerService::new(Arc::new(InMemoryCustomerRepository::default()));
    /// assert!(tokio_test::block_on(svc.find_by_id(999)).unwrap().is_none());
    /// ```
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    /// Exact, case-sensitive last-name match in insertion order.
    #[instrument(skip(self))]
    pub async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Customer>, ServiceError> {
        let found = self.repo.find_by_last_name(last_name).await?;
        debug!(count = found.len(), "customers_by_last_name");
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::repo::seaorm::SeaOrmCustomerRepository;
    use crate::customer::repository::memory::InMemoryCustomerRepository;
    use crate::test_support::get_db;

    const CAST: [(&str, &str); 5] = [
        ("Jack", "Bauer"),
        ("Chloe", "O'Brian"),
        ("Kim", "Bauer"),
        ("David", "Palmer"),
        ("Michelle", "Dessler"),
    ];

    async fn seaorm_service() -> anyhow::Result<CustomerService<SeaOrmCustomerRepository>> {
        let db = get_db().await?;
        Ok(CustomerService::new(Arc::new(SeaOrmCustomerRepository::new(db))))
    }

    fn memory_service() -> CustomerService<InMemoryCustomerRepository> {
        CustomerService::new(Arc::new(InMemoryCustomerRepository::default()))
    }

    async fn seed<R: CustomerRepository>(svc: &CustomerService<R>) -> anyhow::Result<()> {
        for (first, last) in CAST {
            svc.save(CustomerDraft::new(first, last)).await?;
        }
        Ok(())
    }

    async fn assert_cast_queries<R: CustomerRepository>(svc: &CustomerService<R>) -> anyhow::Result<()> {
        seed(svc).await?;

        let all = svc.find_all().await?;
        let got: Vec<(i64, &str, &str)> = all
            .iter()
            .map(|c| (c.id, c.first_name.as_str(), c.last_name.as_str()))
            .collect();
        let want: Vec<(i64, &str, &str)> = CAST
            .iter()
            .enumerate()
            .map(|(i, (f, l))| (i as i64 + 1, *f, *l))
            .collect();
        assert_eq!(got, want);

        let jack = svc.find_by_id(1).await?.unwrap();
        assert_eq!(jack.to_string(), "Customer[id=1, firstName='Jack', lastName='Bauer']");

        let bauers: Vec<i64> = svc.find_by_last_name("Bauer").await?.iter().map(|c| c.id).collect();
        assert_eq!(bauers, vec![1, 3]);

        assert!(svc.find_by_id(999).await?.is_none());
        assert!(svc.find_by_last_name("bauer").await?.is_empty());
        assert_eq!(svc.find_all().await?.len(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_cast_queries() -> anyhow::Result<()> {
        assert_cast_queries(&seaorm_service().await?).await
    }

    #[tokio::test]
    async fn memory_cast_queries() -> anyhow::Result<()> {
        assert_cast_queries(&memory_service()).await
    }

    #[tokio::test]
    async fn empty_store_lookups_are_absent_not_errors() -> anyhow::Result<()> {
        let svc = seaorm_service().await?;
        assert!(svc.find_by_id(999).await?.is_none());
        assert!(svc.find_all().await?.is_empty());
        assert!(svc.find_by_last_name("Bauer").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn save_with_existing_id_updates_names() -> anyhow::Result<()> {
        for svc_is_seaorm in [true, false] {
            let (saved, reloaded, total) = if svc_is_seaorm {
                let svc = seaorm_service().await?;
                run_update(&svc).await?
            } else {
                run_update(&memory_service()).await?
            };
            assert_eq!(saved.id, 1);
            assert_eq!(reloaded.first_name, "Jacob");
            assert_eq!(total, 1);
        }
        Ok(())
    }

    async fn run_update<R: CustomerRepository>(svc: &CustomerService<R>) -> anyhow::Result<(Customer, Customer, usize)> {
        let saved = svc.save(CustomerDraft::new("Jack", "Bauer")).await?;
        let mut draft = CustomerDraft::from(saved.clone());
        draft.first_name = "Jacob".into();
        svc.save(draft).await?;
        let reloaded = svc.find_by_id(saved.id).await?.ok_or_else(|| anyhow::anyhow!("customer {} missing", saved.id))?;
        Ok((saved, reloaded, svc.find_all().await?.len()))
    }

    #[tokio::test]
    async fn save_with_unknown_id_inserts_under_that_id() -> anyhow::Result<()> {
        let svc = seaorm_service().await?;
        let tony = svc.save(CustomerDraft::new("Tony", "Almeida").with_id(10)).await?;
        assert_eq!(tony.id, 10);
        let next = svc.save(CustomerDraft::new("Bill", "Buchanan")).await?;
        assert!(next.id > 10);

        let mem = memory_service();
        mem.save(CustomerDraft::new("Tony", "Almeida").with_id(10)).await?;
        assert_eq!(mem.save(CustomerDraft::new("Bill", "Buchanan")).await?.id, 11);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_saves_get_distinct_ids() -> anyhow::Result<()> {
        let svc = seaorm_service().await?;
        let mut handles = Vec::new();
        for i in 0..20 {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move {
                svc.save(CustomerDraft::new(format!("Agent{i}"), "CTU")).await
            }));
        }
        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await??.id);
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);
        assert_eq!(svc.find_by_last_name("CTU").await?.len(), 20);
        Ok(())
    }
}
