//! One-shot startup runners.
//!
//! `run_customer_demo` seeds the store and logs the canonical queries;
//! `run_quote_demo` fetches and logs a single quote from the outbound client.

use common::{quotes::QuoteClient, types::Quote, CoreError};
use tracing::info;

use crate::customer::{Customer, CustomerDraft, CustomerRepository, CustomerService};
use crate::errors::ServiceError;

pub const DEMO_CUSTOMERS: [(&str, &str); 5] = [
    ("Jack", "Bauer"),
    ("Chloe", "O'Brian"),
    ("Kim", "Bauer"),
    ("David", "Palmer"),
    ("Michelle", "Dessler"),
];

/// What the customer demo saw, for callers that want more than the log lines.
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub all: Vec<Customer>,
    pub first: Option<Customer>,
    pub bauers: Vec<Customer>,
}

pub async fn run_customer_demo<R: CustomerRepository>(svc: &CustomerService<R>) -> Result<DemoReport, ServiceError> {
    for (first, last) in DEMO_CUSTOMERS {
        svc.save(CustomerDraft::new(first, last)).await?;
    }

    let all = svc.find_all().await?;
    info!("Customers found with find_all():");
    for c in &all {
        info!("{c}");
    }

    let first = svc.find_by_id(1).await?;
    info!("Customer found with find_by_id(1):");
    match &first {
        Some(c) => info!("{c}"),
        None => info!("<none>"),
    }

    let bauers = svc.find_by_last_name("Bauer").await?;
    info!("Customers found with find_by_last_name('Bauer'):");
    for c in &bauers {
        info!("{c}");
    }

    Ok(DemoReport { all, first, bauers })
}

pub async fn run_quote_demo(client: &QuoteClient) -> Result<Quote, CoreError> {
    let quote = client.fetch().await?;
    info!(url = %client.url(), "{quote}");
    Ok(quote)
}
