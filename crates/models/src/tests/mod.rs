
/// CRUD operations tests for the customer entity
pub mod crud_tests;
