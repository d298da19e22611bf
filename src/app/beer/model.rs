//! Beer 数据模型

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::{
    patch::PatchField,
    repository::Audited,
    validation::{non_negative_price, not_blank},
};

/// `beer` 表中的一行
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct BeerEntity {
    pub id: Option<i32>,
    pub beer_name: String,
    pub beer_style: String,
    pub upc: Option<String>,
    pub quantity_on_hand: Option<i32>,
    pub price: Option<Decimal>,
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_date: Option<DateTime<Utc>>,
}

impl Audited for BeerEntity {
    fn id(&self) -> Option<i32> {
        self.id
    }

    fn assign_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn created_date(&self) -> Option<DateTime<Utc>> {
        self.created_date
    }

    fn last_modified_date(&self) -> Option<DateTime<Utc>> {
        self.last_modified_date
    }

    fn set_audit_dates(&mut self, created: DateTime<Utc>, last_modified: DateTime<Utc>) {
        self.created_date = Some(created);
        self.last_modified_date = Some(last_modified);
    }
}

/// Beer 请求 / 响应体
///
/// 创建和全量更新时 `id` 与两个时间戳会被忽略。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BeerDto {
    #[serde(default)]
    pub id: Option<i32>,

    #[serde(default)]
    #[validate(
        length(max = 255, message = "must be at most 255 characters"),
        custom(function = "not_blank")
    )]
    pub beer_name: String,

    #[serde(default)]
    #[validate(
        length(max = 255, message = "must be at most 255 characters"),
        custom(function = "not_blank")
    )]
    pub beer_style: String,

    #[serde(default)]
    #[validate(length(max = 25, message = "must be at most 25 characters"))]
    pub upc: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub quantity_on_hand: Option<i32>,

    #[serde(default)]
    #[validate(required(message = "is required"), custom(function = "non_negative_price"))]
    pub price: Option<Decimal>,

    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_modified_date: Option<DateTime<Utc>>,
}

/// PATCH 请求体，每个字段区分 "未提供" / `null` / 有值
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerPatchDto {
    #[serde(default)]
    pub beer_name: PatchField<String>,
    #[serde(default)]
    pub beer_style: PatchField<String>,
    #[serde(default)]
    pub upc: PatchField<String>,
    #[serde(default)]
    pub quantity_on_hand: PatchField<i32>,
    #[serde(default)]
    pub price: PatchField<Decimal>,
}
