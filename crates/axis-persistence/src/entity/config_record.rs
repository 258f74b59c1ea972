//! Config record entity
//!
//! One row per scope triple, enforced by the `uk_config_scope` unique key
//! created in [`crate::sql::ensure_schema`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "config_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub service_name: String,
    pub environment: String,
    #[sea_orm(column_name = "config_key")]
    pub key: String,
    #[sea_orm(column_type = "Text")]
    pub value: String,
    pub last_updated: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
