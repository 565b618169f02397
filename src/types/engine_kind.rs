use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Database engines an environment can point at. Redshift speaks the
/// PostgreSQL wire format and normalizes into the same driver configuration.
#[derive(
    Copy,
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
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum EngineKind {
    #[sea_orm(string_value = "postgres")]
    Postgres,

    #[sea_orm(string_value = "mariadb")]
    Mariadb,

    #[sea_orm(string_value = "mssql")]
    Mssql,

    #[sea_orm(string_value = "oracle")]
    Oracle,

    #[sea_orm(string_value = "mongodb")]
    Mongodb,

    #[sea_orm(string_value = "redshift")]
    Redshift,
}
