//! 仓储抽象
//!
//! 每个资源的持久化访问都通过 [`CrudRepository`] 完成，
//! 服务层只依赖这个 trait，不关心底层是 PostgreSQL 还是内存存储。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;

/// 存储层错误
///
/// 服务层不会转换这些错误，原样向上传播，由 HTTP 层统一映射为 5xx。
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("row {0} disappeared before the write completed")]
    RowMissing(i32),
}

/// 带有存储分配主键和审计时间戳的实体
pub trait Audited: Clone + Send + Sync + 'static {
    fn id(&self) -> Option<i32>;

    /// 由存储层在首次插入时调用
    fn assign_id(&mut self, id: i32);

    fn created_date(&self) -> Option<DateTime<Utc>>;

    fn last_modified_date(&self) -> Option<DateTime<Utc>>;

    fn set_audit_dates(&mut self, created: DateTime<Utc>, last_modified: DateTime<Utc>);
}

/// 非阻塞 CRUD 仓储
#[async_trait]
pub trait CrudRepository<E>: Send + Sync
where
    E: Audited,
{
    /// 按主键查找，不存在时返回 `Ok(None)`
    async fn find_by_id(&self, id: i32) -> Result<Option<E>, StoreError>;

    /// 按主键升序逐行产出所有实体
    ///
    /// 丢弃返回的流即停止读取并释放底层游标。
    fn find_all(&self) -> BoxStream<'static, Result<E, StoreError>>;

    /// `id` 为空时插入，否则更新已有行
    ///
    /// 插入时设置 `created_date`，每次写入都刷新 `last_modified_date`，
    /// 且保证新值严格大于旧值。
    async fn save(&self, entity: E) -> Result<E, StoreError>;

    /// 删除成功返回 `true`，行不存在返回 `false`
    async fn delete_by_id(&self, id: i32) -> Result<bool, StoreError>;
}

/// 计算下一次修改时间，保证严格递增
pub fn next_modified_date(now: DateTime<Utc>, previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    match previous {
        Some(previous) if now <= previous => previous + chrono::Duration::microseconds(1),
        _ => now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_modified_date_moves_forward_on_stalled_clock() {
        let now = Utc::now();
        let next = next_modified_date(now, Some(now));
        assert!(next > now);

        let later = now + chrono::Duration::seconds(5);
        assert_eq!(next_modified_date(later, Some(now)), later);
        assert_eq!(next_modified_date(now, None), now);
    }
}
