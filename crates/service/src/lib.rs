//! Service layer providing business-oriented customer operations on top of models.
//! - Separates business logic from data access behind `CustomerRepository`.
//! - Reuses validation and entity definitions in `models` crate.
//! - Hosts the one-shot startup runners (customer demo, quote fetch).

pub mod errors;
pub mod customer;
pub mod demo;
#[cfg(test)]
pub mod test_support;
