//! CustomerEntity 与 CustomerDto 之间的逐字段转换

use super::model::{CustomerDto, CustomerEntity};

pub fn to_dto(entity: CustomerEntity) -> CustomerDto {
    CustomerDto {
        id: entity.id,
        customer_name: entity.customer_name,
        email: entity.email,
        created_date: entity.created_date,
        last_modified_date: entity.last_modified_date,
    }
}

pub fn to_entity(dto: CustomerDto) -> CustomerEntity {
    CustomerEntity {
        id: dto.id,
        customer_name: dto.customer_name,
        email: dto.email,
        created_date: dto.created_date,
        last_modified_date: dto.last_modified_date,
    }
}
