use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use chrono::NaiveDateTime;

/// 关联记录：在 `key` 指定的关联类型下，把 `first_id` 与 `second_id` 关联起来
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "relevance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub key: String,        // 关联类型，如 UserRole
    pub first_id: String,
    pub second_id: String,
    pub operate_time: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 关联三元组 (key, first_id, second_id)
    pub fn triple(&self) -> (&str, &str, &str) {
        (&self.key, &self.first_id, &self.second_id)
    }
}
