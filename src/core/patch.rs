//! PATCH 请求的合并规则
//!
//! JSON 中的字段有三种状态：未出现、显式 `null`、有值。
//! [`PatchField`] 保留这三种状态，[`PatchPolicy`] 决定 `null` 与空白值的含义。

use serde::{Deserialize, Deserializer, Serialize};

use super::service::ServiceError;

/// PATCH 字段的三种状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchField<T> {
    /// 请求体中没有这个字段
    Missing,
    /// 字段显式为 `null`
    Null,
    Value(T),
}

impl<T> Default for PatchField<T> {
    fn default() -> Self {
        PatchField::Missing
    }
}

impl<T> From<Option<T>> for PatchField<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => PatchField::Value(value),
            None => PatchField::Null,
        }
    }
}

// 字段缺失时由 `#[serde(default)]` 得到 Missing，出现时才会走到这里
impl<'de, T> Deserialize<'de> for PatchField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(PatchField::from)
    }
}

/// 显式 `null` / 空白字符串的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchPolicy {
    /// `null` 和空白字符串视同未提供，保留原值
    #[default]
    IgnoreBlank,
    /// 按请求原样写入：`null` 清空可选字段，必填字段收到 `null` 或空白则校验失败
    ApplyBlank,
}

impl PatchPolicy {
    /// 合并必填文本字段
    pub fn merge_required_text(
        self,
        field: PatchField<String>,
        target: &mut String,
        name: &str,
    ) -> Result<(), ServiceError> {
        match field {
            PatchField::Missing => Ok(()),
            PatchField::Value(value) if !value.trim().is_empty() => {
                *target = value;
                Ok(())
            }
            _ if self == PatchPolicy::IgnoreBlank => Ok(()),
            _ => Err(ServiceError::Validation(format!("{}: must not be blank", name))),
        }
    }

    /// 合并可选文本字段
    pub fn merge_optional_text(self, field: PatchField<String>, target: &mut Option<String>) {
        match (field, self) {
            (PatchField::Missing, _) => {}
            (PatchField::Value(value), PatchPolicy::ApplyBlank) => *target = Some(value),
            (PatchField::Value(value), PatchPolicy::IgnoreBlank) => {
                if !value.trim().is_empty() {
                    *target = Some(value);
                }
            }
            (PatchField::Null, PatchPolicy::ApplyBlank) => *target = None,
            (PatchField::Null, PatchPolicy::IgnoreBlank) => {}
        }
    }

    /// 合并可选的非文本字段
    pub fn merge_optional<T>(self, field: PatchField<T>, target: &mut Option<T>) {
        match (field, self) {
            (PatchField::Missing, _) | (PatchField::Null, PatchPolicy::IgnoreBlank) => {}
            (PatchField::Value(value), _) => *target = Some(value),
            (PatchField::Null, PatchPolicy::ApplyBlank) => *target = None,
        }
    }

    /// 合并必填的非文本字段
    pub fn merge_required<T>(
        self,
        field: PatchField<T>,
        target: &mut Option<T>,
        name: &str,
    ) -> Result<(), ServiceError> {
        match (field, self) {
            (PatchField::Missing, _) | (PatchField::Null, PatchPolicy::IgnoreBlank) => Ok(()),
            (PatchField::Value(value), _) => {
                *target = Some(value);
                Ok(())
            }
            (PatchField::Null, PatchPolicy::ApplyBlank) => {
                Err(ServiceError::Validation(format!("{}: is required", name)))
            }
        }
    }
}
