//! Beer 业务服务

use std::sync::Arc;

use futures::{stream::BoxStream, StreamExt};
use tracing::{debug, info};
use validator::Validate;

use super::{
    mapper::{to_dto, to_entity},
    model::{BeerDto, BeerEntity, BeerPatchDto},
};
use crate::core::{
    patch::PatchPolicy,
    repository::{CrudRepository, StoreError},
    service::ServiceError,
};

#[derive(Clone)]
pub struct BeerService {
    repository: Arc<dyn CrudRepository<BeerEntity>>,
    patch_policy: PatchPolicy,
}

impl BeerService {
    pub fn new(repository: Arc<dyn CrudRepository<BeerEntity>>, patch_policy: PatchPolicy) -> Self {
        Self {
            repository,
            patch_policy,
        }
    }

    /// 创建新的 Beer，客户端传入的 id 与时间戳一律丢弃
    pub async fn save_new_beer(&self, beer: BeerDto) -> Result<BeerDto, ServiceError> {
        beer.validate()?;

        let entity = BeerEntity {
            id: None,
            created_date: None,
            last_modified_date: None,
            ..to_entity(beer)
        };

        let saved = self.repository.save(entity).await?;
        info!("Created beer: {} ({:?})", saved.beer_name, saved.id);

        Ok(to_dto(saved))
    }

    pub async fn get_beer_by_id(&self, id: i32) -> Result<Option<BeerDto>, StoreError> {
        Ok(self.repository.find_by_id(id).await?.map(to_dto))
    }

    /// 按主键顺序逐个产出所有 Beer
    pub fn list_beers(&self) -> BoxStream<'static, Result<BeerDto, StoreError>> {
        self.repository
            .find_all()
            .map(|beer| beer.map(to_dto))
            .boxed()
    }

    /// 全量更新；id 不存在时返回 `Ok(None)`，不会新建
    pub async fn update_beer(&self, id: i32, beer: BeerDto) -> Result<Option<BeerDto>, ServiceError> {
        beer.validate()?;

        let Some(mut stored) = self.repository.find_by_id(id).await? else {
            debug!("Update skipped, beer {} not found", id);
            return Ok(None);
        };

        stored.beer_name = beer.beer_name;
        stored.beer_style = beer.beer_style;
        stored.upc = beer.upc;
        stored.quantity_on_hand = beer.quantity_on_hand;
        stored.price = beer.price;

        self.save_existing(stored).await
    }

    /// 部分更新；未出现在请求体中的字段保持不变
    pub async fn patch_beer(
        &self,
        id: i32,
        patch: BeerPatchDto,
    ) -> Result<Option<BeerDto>, ServiceError> {
        let Some(mut stored) = self.repository.find_by_id(id).await? else {
            debug!("Patch skipped, beer {} not found", id);
            return Ok(None);
        };

        let policy = self.patch_policy;
        policy.merge_required_text(patch.beer_name, &mut stored.beer_name, "beer_name")?;
        policy.merge_required_text(patch.beer_style, &mut stored.beer_style, "beer_style")?;
        policy.merge_optional_text(patch.upc, &mut stored.upc);
        policy.merge_optional(patch.quantity_on_hand, &mut stored.quantity_on_hand);
        policy.merge_required(patch.price, &mut stored.price, "price")?;

        to_dto(stored.clone()).validate()?;

        self.save_existing(stored).await
    }

    /// 删除成功返回 `true`，不存在返回 `false`
    pub async fn delete_beer_by_id(&self, id: i32) -> Result<bool, StoreError> {
        let deleted = self.repository.delete_by_id(id).await?;
        if deleted {
            info!("Deleted beer: {}", id);
        }
        Ok(deleted)
    }

    async fn save_existing(&self, entity: BeerEntity) -> Result<Option<BeerDto>, ServiceError> {
        match self.repository.save(entity).await {
            Ok(saved) => {
                info!("Updated beer: {} ({:?})", saved.beer_name, saved.id);
                Ok(Some(to_dto(saved)))
            }
            // 查询与写入之间被并发删除
            Err(StoreError::RowMissing(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::patch::PatchField;
    use crate::infrastructure::memory::InMemoryRepository;
    use futures::TryStreamExt;
    use rust_decimal::Decimal;

    fn service_with(policy: PatchPolicy) -> (BeerService, InMemoryRepository<BeerEntity>) {
        let repository = InMemoryRepository::new();
        let service = BeerService::new(Arc::new(repository.clone()), policy);
        (service, repository)
    }

    fn test_beer() -> BeerDto {
        BeerDto {
            beer_name: "Space Dust".to_string(),
            beer_style: "IPA".to_string(),
            upc: Some("123213".to_string()),
            quantity_on_hand: Some(12),
            price: Some(Decimal::new(1099, 2)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_save_new_then_get() {
        let (service, _) = service_with(PatchPolicy::IgnoreBlank);

        let mut input = test_beer();
        input.id = Some(42);
        let saved = service.save_new_beer(input.clone()).await.unwrap();

        assert_eq!(saved.id, Some(1));
        assert!(saved.created_date.is_some());
        assert_eq!(saved.created_date, saved.last_modified_date);

        let fetched = service.get_beer_by_id(1).await.unwrap().unwrap();
        assert_eq!(fetched, saved);
        assert_eq!(
            BeerDto {
                id: None,
                created_date: None,
                last_modified_date: None,
                ..fetched
            },
            test_beer()
        );
    }

    #[tokio::test]
    async fn test_save_new_rejects_blank_name() {
        let (service, repository) = service_with(PatchPolicy::IgnoreBlank);

        let mut input = test_beer();
        input.beer_name = String::new();
        let result = service.save_new_beer(input).await;

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert_eq!(repository.count().await, 0);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_identity() {
        let (service, _) = service_with(PatchPolicy::IgnoreBlank);
        let saved = service.save_new_beer(test_beer()).await.unwrap();
        let id = saved.id.unwrap();

        let replacement = BeerDto {
            beer_name: "Crank".to_string(),
            beer_style: "Pale Ale".to_string(),
            upc: None,
            quantity_on_hand: Some(392),
            price: Some(Decimal::new(1199, 2)),
            ..Default::default()
        };
        let updated = service
            .update_beer(id, replacement.clone())
            .await
            .unwrap()
            .unwrap();

        let fetched = service.get_beer_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
        assert_eq!(fetched.id, Some(id));
        assert_eq!(fetched.created_date, saved.created_date);
        assert!(fetched.last_modified_date > saved.last_modified_date);
        assert_eq!(fetched.beer_name, replacement.beer_name);
        assert_eq!(fetched.beer_style, replacement.beer_style);
        assert_eq!(fetched.upc, None);
        assert_eq!(fetched.quantity_on_hand, Some(392));
        assert_eq!(fetched.price, replacement.price);
    }

    #[tokio::test]
    async fn test_patch_only_overwrites_present_fields() {
        let (service, _) = service_with(PatchPolicy::IgnoreBlank);
        let saved = service.save_new_beer(test_beer()).await.unwrap();
        let id = saved.id.unwrap();

        let patch = BeerPatchDto {
            beer_name: PatchField::Value("Space Dust Reloaded".to_string()),
            upc: PatchField::Null,
            beer_style: PatchField::Value(String::new()),
            ..Default::default()
        };
        service.patch_beer(id, patch).await.unwrap().unwrap();

        let fetched = service.get_beer_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.beer_name, "Space Dust Reloaded");
        assert_eq!(fetched.beer_style, saved.beer_style);
        assert_eq!(fetched.upc, saved.upc);
        assert_eq!(fetched.quantity_on_hand, saved.quantity_on_hand);
        assert_eq!(fetched.price, saved.price);
        assert!(fetched.last_modified_date > saved.last_modified_date);
    }

    #[tokio::test]
    async fn test_patch_apply_blank_policy() {
        let (service, _) = service_with(PatchPolicy::ApplyBlank);
        let id = service.save_new_beer(test_beer()).await.unwrap().id.unwrap();

        let clear = BeerPatchDto {
            upc: PatchField::Null,
            quantity_on_hand: PatchField::Null,
            ..Default::default()
        };
        let patched = service.patch_beer(id, clear).await.unwrap().unwrap();
        assert_eq!(patched.upc, None);
        assert_eq!(patched.quantity_on_hand, None);

        let blank_name = BeerPatchDto {
            beer_name: PatchField::Value(" ".to_string()),
            ..Default::default()
        };
        let result = service.patch_beer(id, blank_name).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert_eq!(
            service.get_beer_by_id(id).await.unwrap().unwrap().beer_name,
            "Space Dust"
        );
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found_and_never_mutates() {
        let (service, repository) = service_with(PatchPolicy::IgnoreBlank);
        service.save_new_beer(test_beer()).await.unwrap();

        assert!(service.get_beer_by_id(666).await.unwrap().is_none());
        assert!(service.update_beer(666, test_beer()).await.unwrap().is_none());
        assert!(service
            .patch_beer(666, BeerPatchDto::default())
            .await
            .unwrap()
            .is_none());
        assert!(!service.delete_beer_by_id(666).await.unwrap());

        assert_eq!(repository.count().await, 1);
        assert!(service.get_beer_by_id(666).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_yields_every_row() {
        let (service, _) = service_with(PatchPolicy::IgnoreBlank);
        let empty: Vec<BeerDto> = service.list_beers().try_collect().await.unwrap();
        assert!(empty.is_empty());

        for _ in 0..3 {
            service.save_new_beer(test_beer()).await.unwrap();
        }
        let beers: Vec<BeerDto> = service.list_beers().try_collect().await.unwrap();
        let ids: Vec<_> = beers.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let (service, _) = service_with(PatchPolicy::IgnoreBlank);
        let id = service.save_new_beer(test_beer()).await.unwrap().id.unwrap();

        assert!(service.delete_beer_by_id(id).await.unwrap());
        assert!(!service.delete_beer_by_id(id).await.unwrap());
    }
}
