//! BeerEntity 与 BeerDto 之间的逐字段转换，不做校验也不填默认值

use super::model::{BeerDto, BeerEntity};

pub fn to_dto(entity: BeerEntity) -> BeerDto {
    BeerDto {
        id: entity.id,
        beer_name: entity.beer_name,
        beer_style: entity.beer_style,
        upc: entity.upc,
        quantity_on_hand: entity.quantity_on_hand,
        price: entity.price,
        created_date: entity.created_date,
        last_modified_date: entity.last_modified_date,
    }
}

pub fn to_entity(dto: BeerDto) -> BeerEntity {
    BeerEntity {
        id: dto.id,
        beer_name: dto.beer_name,
        beer_style: dto.beer_style,
        upc: dto.upc,
        quantity_on_hand: dto.quantity_on_hand,
        price: dto.price,
        created_date: dto.created_date,
        last_modified_date: dto.last_modified_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_unset_id_stays_unset() {
        let dto = BeerDto {
            beer_name: "Galaxy Cat".to_string(),
            beer_style: "Pale Ale".to_string(),
            upc: None,
            quantity_on_hand: Some(122),
            price: Some(Decimal::new(1299, 2)),
            ..Default::default()
        };

        let entity = to_entity(dto.clone());
        assert_eq!(entity.id, None);
        assert_eq!(entity.created_date, None);
        assert_eq!(to_dto(entity), dto);
    }
}
