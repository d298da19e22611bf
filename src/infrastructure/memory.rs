//! 内存存储
//!
//! 与 PostgreSQL 实现语义相同的 [`CrudRepository`]，用于测试和不依赖数据库的本地运行。

use std::{collections::BTreeMap, ops::Bound, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use futures::{
    stream::{self, BoxStream},
    StreamExt,
};
use tokio::sync::RwLock;

use crate::core::repository::{next_modified_date, Audited, CrudRepository, StoreError};

struct Table<E> {
    rows: BTreeMap<i32, E>,
    last_id: i32,
}

/// 以主键有序的内存表
pub struct InMemoryRepository<E> {
    table: Arc<RwLock<Table<E>>>,
}

impl<E> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table {
                rows: BTreeMap::new(),
                last_id: 0,
            })),
        }
    }

    pub async fn count(&self) -> usize {
        self.table.read().await.rows.len()
    }
}

#[async_trait]
impl<E> CrudRepository<E> for InMemoryRepository<E>
where
    E: Audited,
{
    async fn find_by_id(&self, id: i32) -> Result<Option<E>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    /// 每次只在读锁下取主键大于上一行的下一行，流被丢弃后不再读表
    fn find_all(&self) -> BoxStream<'static, Result<E, StoreError>> {
        let table = Arc::clone(&self.table);

        stream::unfold((table, None), |(table, last_id)| async move {
            let next = {
                let guard = table.read().await;
                let lower = match last_id {
                    Some(id) => Bound::Excluded(id),
                    None => Bound::Unbounded,
                };
                guard
                    .rows
                    .range((lower, Bound::Unbounded))
                    .next()
                    .map(|(id, row)| (*id, row.clone()))
            };

            next.map(|(id, row)| (Ok(row), (table, Some(id))))
        })
        .boxed()
    }

    async fn save(&self, mut entity: E) -> Result<E, StoreError> {
        let mut table = self.table.write().await;
        let now = Utc::now();

        let id = match entity.id() {
            None => {
                table.last_id += 1;
                entity.assign_id(table.last_id);
                entity.set_audit_dates(now, now);
                table.last_id
            }
            Some(id) => {
                let stored = table.rows.get(&id).ok_or(StoreError::RowMissing(id))?;
                let created = stored.created_date().unwrap_or(now);
                let modified = next_modified_date(now, stored.last_modified_date());
                entity.set_audit_dates(created, modified);
                id
            }
        };

        table.rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
