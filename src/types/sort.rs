use strum_macros::{Display, EnumString};

/// Sort fields the migration list endpoint accepts. Anything outside this
/// enum is rejected before a query is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MigrationSortField {
    Name,
    Version,
    #[default]
    ChainPosition,
    CreatedAt,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}
