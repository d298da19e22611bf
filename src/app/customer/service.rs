//! Customer 业务服务

use std::sync::Arc;

use futures::{stream::BoxStream, StreamExt};
use tracing::{debug, info};
use validator::Validate;

use super::{
    mapper::{to_dto, to_entity},
    model::{CustomerDto, CustomerEntity, CustomerPatchDto},
};
use crate::core::{
    patch::PatchPolicy,
    repository::{CrudRepository, StoreError},
    service::ServiceError,
};

#[derive(Clone)]
pub struct CustomerService {
    repository: Arc<dyn CrudRepository<CustomerEntity>>,
    patch_policy: PatchPolicy,
}

impl CustomerService {
    pub fn new(
        repository: Arc<dyn CrudRepository<CustomerEntity>>,
        patch_policy: PatchPolicy,
    ) -> Self {
        Self {
            repository,
            patch_policy,
        }
    }

    pub async fn save_new_customer(
        &self,
        customer: CustomerDto,
    ) -> Result<CustomerDto, ServiceError> {
        customer.validate()?;

        let entity = CustomerEntity {
            id: None,
            created_date: None,
            last_modified_date: None,
            ..to_entity(customer)
        };

        let saved = self.repository.save(entity).await?;
        info!("Created customer: {} ({:?})", saved.customer_name, saved.id);

        Ok(to_dto(saved))
    }

    pub async fn get_customer_by_id(&self, id: i32) -> Result<Option<CustomerDto>, StoreError> {
        Ok(self.repository.find_by_id(id).await?.map(to_dto))
    }

    pub fn list_customers(&self) -> BoxStream<'static, Result<CustomerDto, StoreError>> {
        self.repository
            .find_all()
            .map(|customer| customer.map(to_dto))
            .boxed()
    }

    pub async fn update_customer(
        &self,
        id: i32,
        customer: CustomerDto,
    ) -> Result<Option<CustomerDto>, ServiceError> {
        customer.validate()?;

        let Some(mut stored) = self.repository.find_by_id(id).await? else {
            debug!("Update skipped, customer {} not found", id);
            return Ok(None);
        };

        stored.customer_name = customer.customer_name;
        stored.email = customer.email;

        self.save_existing(stored).await
    }

    pub async fn patch_customer(
        &self,
        id: i32,
        patch: CustomerPatchDto,
    ) -> Result<Option<CustomerDto>, ServiceError> {
        let Some(mut stored) = self.repository.find_by_id(id).await? else {
            debug!("Patch skipped, customer {} not found", id);
            return Ok(None);
        };

        let policy = self.patch_policy;
        policy.merge_required_text(
            patch.customer_name,
            &mut stored.customer_name,
            "customer_name",
        )?;
        policy.merge_optional_text(patch.email, &mut stored.email);

        to_dto(stored.clone()).validate()?;

        self.save_existing(stored).await
    }

    pub async fn delete_customer_by_id(&self, id: i32) -> Result<bool, StoreError> {
        let deleted = self.repository.delete_by_id(id).await?;
        if deleted {
            info!("Deleted customer: {}", id);
        }
        Ok(deleted)
    }

    async fn save_existing(
        &self,
        entity: CustomerEntity,
    ) -> Result<Option<CustomerDto>, ServiceError> {
        match self.repository.save(entity).await {
            Ok(saved) => {
                info!("Updated customer: {} ({:?})", saved.customer_name, saved.id);
                Ok(Some(to_dto(saved)))
            }
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

    fn joselito() -> CustomerDto {
        CustomerDto {
            customer_name: "Joselito".to_string(),
            email: Some("Joselito@google.com".to_string()),
            ..Default::default()
        }
    }

    fn service() -> CustomerService {
        CustomerService::new(Arc::new(InMemoryRepository::new()), PatchPolicy::IgnoreBlank)
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let service = service();
        let saved = service.save_new_customer(joselito()).await.unwrap();
        let fetched = service
            .get_customer_by_id(saved.id.unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(fetched.customer_name, "Joselito");
        assert_eq!(fetched.email.as_deref(), Some("Joselito@google.com"));
        assert!(fetched.created_date.is_some());
    }

    #[tokio::test]
    async fn test_update_and_patch() {
        let service = service();
        let saved = service.save_new_customer(joselito()).await.unwrap();
        let id = saved.id.unwrap();

        let updated = service
            .update_customer(
                id,
                CustomerDto {
                    customer_name: "Maria".to_string(),
                    email: None,
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.customer_name, "Maria");
        assert_eq!(updated.email, None);
        assert_eq!(updated.created_date, saved.created_date);
        assert!(updated.last_modified_date > saved.last_modified_date);

        let patched = service
            .patch_customer(
                id,
                CustomerPatchDto {
                    email: PatchField::Value("maria@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(patched.customer_name, "Maria");
        assert_eq!(patched.email.as_deref(), Some("maria@example.com"));
        assert!(patched.last_modified_date > updated.last_modified_date);
    }

    #[tokio::test]
    async fn test_update_blank_name_rejected() {
        let service = service();
        let id = service.save_new_customer(joselito()).await.unwrap().id.unwrap();

        let result = service
            .update_customer(
                id,
                CustomerDto {
                    customer_name: String::new(),
                    ..joselito()
                },
            )
            .await;

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        let stored = service.get_customer_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.customer_name, "Joselito");
    }

    #[tokio::test]
    async fn test_not_found_paths() {
        let service = service();
        assert!(service.get_customer_by_id(666).await.unwrap().is_none());
        assert!(service.update_customer(666, joselito()).await.unwrap().is_none());
        assert!(service
            .patch_customer(666, CustomerPatchDto::default())
            .await
            .unwrap()
            .is_none());
        assert!(!service.delete_customer_by_id(666).await.unwrap());

        let all: Vec<CustomerDto> = service.list_customers().try_collect().await.unwrap();
        assert!(all.is_empty());
    }
}
