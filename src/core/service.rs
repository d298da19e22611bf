//! 核心服务层模块

use validator::ValidationErrors;

use super::repository::StoreError;

/// 服务层错误
///
/// "不存在" 不属于错误，服务通过 `Option` / `bool` 返回。
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| format!("{}: {}", field, msg))
                        .unwrap_or_else(|| format!("{}: invalid value", field))
                })
            })
            .collect();
        messages.sort();

        ServiceError::Validation(messages.join(", "))
    }
}
