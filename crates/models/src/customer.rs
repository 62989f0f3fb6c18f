use std::fmt;

use sea_orm::{entity::prelude::*, ConnectionTrait, NotSet, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};

/// Matches the `string_len(.., 255)` columns in the migration.
pub const NAME_MAX_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Customer[id={}, firstName='{}', lastName='{}']",
            self.id, self.first_name, self.last_name
        )
    }
}

pub fn validate_name(field: &str, value: &str) -> Result<(), ModelError> {
    if value.chars().count() > NAME_MAX_LEN {
        return Err(ModelError::Validation(format!("{field} longer than {NAME_MAX_LEN} characters")));
    }
    Ok(())
}

/// Insert a customer; the database assigns the id.
pub async fn create<C: ConnectionTrait>(db: &C, first_name: &str, last_name: &str) -> Result<Model, errors::ModelError> {
    validate_name("first_name", first_name)?;
    validate_name("last_name", last_name)?;
    let am = ActiveModel {
        id: NotSet,
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
    };
    Ok(am.insert(db).await?)
}

/// Insert a customer under a caller-chosen id.
pub async fn create_with_id<C: ConnectionTrait>(db: &C, id: i64, first_name: &str, last_name: &str) -> Result<Model, errors::ModelError> {
    validate_name("first_name", first_name)?;
    validate_name("last_name", last_name)?;
    let am = ActiveModel {
        id: Set(id),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite both names of an existing customer; `None` if the id is unknown.
pub async fn update_names<C: ConnectionTrait>(db: &C, id: i64, first_name: &str, last_name: &str) -> Result<Option<Model>, errors::ModelError> {
    validate_name("first_name", first_name)?;
    validate_name("last_name", last_name)?;
    let Some(found) = Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.first_name = Set(first_name.to_string());
    am.last_name = Set(last_name.to_string());
    Ok(Some(am.update(db).await?))
}

/// Exact, case-sensitive match in id order.
pub async fn find_by_last_name<C: ConnectionTrait>(db: &C, last_name: &str) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find()
        .filter(Column::LastName.eq(last_name))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}
