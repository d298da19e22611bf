//! Customer 数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::{patch::PatchField, repository::Audited, validation::not_blank};

/// `customer` 表中的一行
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CustomerEntity {
    pub id: Option<i32>,
    pub customer_name: String,
    pub email: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_date: Option<DateTime<Utc>>,
}

impl Audited for CustomerEntity {
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

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[serde(default)]
    pub id: Option<i32>,

    #[serde(default)]
    #[validate(
        length(max = 255, message = "must be at most 255 characters"),
        custom(function = "not_blank")
    )]
    pub customer_name: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub email: Option<String>,

    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_modified_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatchDto {
    #[serde(default)]
    pub customer_name: PatchField<String>,
    #[serde(default)]
    pub email: PatchField<String>,
}
