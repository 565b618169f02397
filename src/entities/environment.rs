use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::types::EngineKind;

/// A named deployment target with its own independent migration chain.
/// When `connection_string` is null, migrations for this environment run
/// against the local metadata database.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "environments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    pub engine: EngineKind,

    pub connection_string: Option<String>,

    pub description: Option<String>,

    #[sea_orm(default = "chrono::Utc::now().naive_utc()")]
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
