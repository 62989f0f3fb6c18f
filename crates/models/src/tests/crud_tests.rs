use crate::customer::{self, NAME_MAX_LEN};
use crate::db::{connect_and_migrate, DatabaseConfig};
use crate::errors::ModelError;
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait};

/// Fresh in-memory database with migrations applied
async fn setup_test_db() -> Result<DatabaseConnection> {
    connect_and_migrate(&DatabaseConfig::default()).await
}

#[tokio::test]
async fn test_create_assigns_sequential_ids() -> Result<()> {
    let db = setup_test_db().await?;

    let jack = customer::create(&db, "Jack", "Bauer").await?;
    let chloe = customer::create(&db, "Chloe", "O'Brian").await?;

    assert_eq!(jack.id, 1);
    assert_eq!(chloe.id, 2);
    assert_eq!(chloe.last_name, "O'Brian");
    Ok(())
}

#[tokio::test]
async fn test_find_by_id() -> Result<()> {
    let db = setup_test_db().await?;
    let created = customer::create(&db, "Kim", "Bauer").await?;

    let found = customer::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found, Some(created));

    let missing = customer::Entity::find_by_id(999).one(&db).await?;
    assert!(missing.is_none());
    Ok(())
}

#[tokio::test]
async fn test_find_by_last_name_is_exact_and_case_sensitive() -> Result<()> {
    let db = setup_test_db().await?;
    customer::create(&db, "Jack", "Bauer").await?;
    customer::create(&db, "David", "Palmer").await?;
    customer::create(&db, "Kim", "Bauer").await?;
    customer::create(&db, "Someone", "bauer").await?;

    let bauers = customer::find_by_last_name(&db, "Bauer").await?;
    let names: Vec<_> = bauers.iter().map(|c| c.first_name.as_str()).collect();
    assert_eq!(names, vec!["Jack", "Kim"]);

    assert!(customer::find_by_last_name(&db, "Baue").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_create_with_id_and_update_names() -> Result<()> {
    let db = setup_test_db().await?;
    let explicit = customer::create_with_id(&db, 42, "Tony", "Almeida").await?;
    assert_eq!(explicit.id, 42);

    let updated = customer::update_names(&db, 42, "Anthony", "Almeida").await?;
    assert_eq!(updated.map(|c| c.first_name), Some("Anthony".to_string()));

    assert!(customer::update_names(&db, 7, "No", "One").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_overlong_name_is_rejected() -> Result<()> {
    let db = setup_test_db().await?;
    let long = "x".repeat(NAME_MAX_LEN + 1);
    let err = customer::create(&db, &long, "Bauer").await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    assert!(customer::find_all(&db).await?.is_empty());
    Ok(())
}

#[test]
fn test_display_and_json_shape() {
    let c = customer::Model { id: 1, first_name: "Jack".into(), last_name: "Bauer".into() };
    assert_eq!(c.to_string(), "Customer[id=1, firstName='Jack', lastName='Bauer']");
    let json = serde_json::to_value(&c).unwrap();
    assert_eq!(json, serde_json::json!({"id": 1, "firstName": "Jack", "lastName": "Bauer"}));
}
