use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Outcome of one execution attempt against one environment. History rows
/// are append-only, so unlike [`super::MigrationStatus`] these values never
/// transition.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum HistoryStatus {
    #[sea_orm(string_value = "APPLIED")]
    Applied,

    #[sea_orm(string_value = "FAILED")]
    Failed,

    #[sea_orm(string_value = "ROLLED_BACK")]
    RolledBack,

    #[sea_orm(string_value = "ROLLBACK_FAILED")]
    RollbackFailed,
}
