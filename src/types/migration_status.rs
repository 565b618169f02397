use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum MigrationStatus {
    #[sea_orm(string_value = "PENDING")]
    #[default]
    Pending,

    #[sea_orm(string_value = "APPLIED")]
    Applied,

    #[sea_orm(string_value = "FAILED")]
    Failed,

    #[sea_orm(string_value = "ROLLED_BACK")]
    RolledBack,
}
