use anyhow::Result;
use chrono::Utc;
use contracts::domain::a001_order::aggregate::{
    Order, OrderHeader, OrderId, OrderLine, OrderTimestamps,
};
use contracts::domain::a001_order::error::OrderError;
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::order_status::RecordedStatus;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    /// Хранится как есть, чтобы неизвестные значения не терялись
    pub status: String,
    pub header_json: String,
    pub lines_json: String,
    pub timestamps_json: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Order {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self> {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id)
            .map_err(|e| anyhow::anyhow!("Invalid order id '{}': {}", m.id, e))?;

        let header: OrderHeader = serde_json::from_str(&m.header_json).map_err(|e| {
            anyhow::anyhow!("Failed to deserialize header_json for order {}: {}", m.code, e)
        })?;
        let lines: Vec<OrderLine> = serde_json::from_str(&m.lines_json).map_err(|e| {
            anyhow::anyhow!("Failed to deserialize lines_json for order {}: {}", m.code, e)
        })?;
        let timestamps: OrderTimestamps =
            serde_json::from_str(&m.timestamps_json).map_err(|e| {
                anyhow::anyhow!(
                    "Failed to deserialize timestamps_json for order {}: {}",
                    m.code,
                    e
                )
            })?;

        Ok(Order {
            base: BaseAggregate::with_metadata(
                OrderId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            header,
            lines,
            status: RecordedStatus::from(m.status),
            timestamps,
        })
    }
}

/// Строка таблицы для агрегата
pub fn model_from(aggregate: &Order) -> Result<Model> {
    Ok(Model {
        id: aggregate.base.id.value().to_string(),
        code: aggregate.base.code.clone(),
        description: aggregate.base.description.clone(),
        comment: aggregate.base.comment.clone(),
        status: aggregate.status.as_str().to_string(),
        header_json: serde_json::to_string(&aggregate.header)?,
        lines_json: serde_json::to_string(&aggregate.lines)?,
        timestamps_json: serde_json::to_string(&aggregate.timestamps)?,
        is_deleted: aggregate.base.metadata.is_deleted,
        created_at: Some(aggregate.base.metadata.created_at),
        updated_at: Some(aggregate.base.metadata.updated_at),
        version: aggregate.base.metadata.version,
    })
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn into_orders(models: Vec<Model>) -> Vec<Order> {
    models
        .into_iter()
        .filter_map(|m| {
            let id = m.id.clone();
            match Order::try_from(m) {
                Ok(order) => Some(order),
                Err(e) => {
                    tracing::error!("Skipping broken order row {}: {}", id, e);
                    None
                }
            }
        })
        .collect()
}

/// Заказы, новые сверху; при заданном статусе только с этим кодом
pub async fn list_all(status: Option<&str>) -> Result<Vec<Order>> {
    let mut query = Entity::find().filter(Column::IsDeleted.eq(false));
    if let Some(status) = status {
        query = query.filter(Column::Status.eq(status));
    }
    let models = query
        .order_by_desc(Column::UpdatedAt)
        .limit(1000)
        .all(conn())
        .await?;
    Ok(into_orders(models))
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Order>> {
    get_by_id_on(conn(), id).await
}

pub async fn insert(aggregate: &Order) -> Result<Uuid> {
    insert_on(conn(), aggregate).await
}

/// Записать изменения, если строку никто не изменил после чтения.
///
/// Версия в агрегате должна совпадать с версией в таблице, иначе [`OrderError::Conflict`].
pub async fn update(aggregate: &Order) -> Result<()> {
    update_on(conn(), aggregate).await
}

async fn get_by_id_on(db: &DatabaseConnection, id: Uuid) -> Result<Option<Order>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    result.map(Order::try_from).transpose()
}

async fn insert_on(db: &DatabaseConnection, aggregate: &Order) -> Result<Uuid> {
    let m = model_from(aggregate)?;
    let active = ActiveModel {
        id: Set(m.id),
        code: Set(m.code),
        description: Set(m.description),
        comment: Set(m.comment),
        status: Set(m.status),
        header_json: Set(m.header_json),
        lines_json: Set(m.lines_json),
        timestamps_json: Set(m.timestamps_json),
        is_deleted: Set(m.is_deleted),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
        version: Set(m.version),
    };
    active.insert(db).await?;
    Ok(aggregate.base.id.value())
}

async fn update_on(db: &DatabaseConnection, aggregate: &Order) -> Result<()> {
    let m = model_from(aggregate)?;
    let active = ActiveModel {
        id: NotSet,
        code: Set(m.code),
        description: Set(m.description),
        comment: Set(m.comment),
        status: Set(m.status),
        header_json: Set(m.header_json),
        lines_json: Set(m.lines_json),
        timestamps_json: Set(m.timestamps_json),
        is_deleted: Set(m.is_deleted),
        updated_at: Set(m.updated_at),
        version: Set(m.version + 1),
        created_at: NotSet,
    };
    let result = Entity::update_many()
        .set(active)
        .filter(Column::Id.eq(m.id))
        .filter(Column::Version.eq(m.version))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(OrderError::Conflict(aggregate.base.code.clone()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::Origin;
    use crate::shared::data::db::create_tables;
    use contracts::enums::order_status::OrderStatus;

    async fn temp_db() -> DatabaseConnection {
        let path = std::env::temp_dir().join(format!("a001_order_{}.db", Uuid::new_v4().simple()));
        let url = format!("sqlite://{}?mode=rwc", path.to_string_lossy());
        let db = sea_orm::Database::connect(&url).await.unwrap();
        create_tables(&db).await.unwrap();
        db
    }

    fn sample() -> Order {
        Order::new_for_insert(
            "ORD-9".into(),
            "Sample".into(),
            OrderHeader {
                customer_ref: "c-1".into(),
                customer_name: "Customer".into(),
                vendor_ref: "v-1".into(),
                currency: "USD".into(),
                shipping_address: Some("1 Main St".into()),
                origin: Origin::Vendor,
            },
            vec![OrderLine {
                line_id: "1".into(),
                product_ref: "p-1".into(),
                name: "Lamp".into(),
                qty: 2.0,
                unit_price: 12.5,
                discount: None,
            }],
        )
    }

    #[test]
    fn test_row_keeps_aggregate_fields() {
        let order = sample();
        let model = model_from(&order).unwrap();
        assert_eq!(model.status, "placed");

        let back = Order::try_from(model).unwrap();
        assert_eq!(back.base.id, order.base.id);
        assert_eq!(back.status.known(), Some(OrderStatus::Placed));
        assert_eq!(back.timestamps, order.timestamps);
        assert_eq!(back.header.origin, Origin::Vendor);
        assert_eq!(back.total(), 25.0);
    }

    #[test]
    fn test_unknown_status_survives_load() {
        let mut model = model_from(&sample()).unwrap();
        model.status = "archived".into();
        let order = Order::try_from(model).unwrap();
        assert_eq!(order.status, RecordedStatus::Unrecognized("archived".into()));
    }

    #[test]
    fn test_broken_json_is_an_error() {
        let mut model = model_from(&sample()).unwrap();
        model.lines_json = "{".into();
        assert!(Order::try_from(model).is_err());
    }

    #[tokio::test]
    async fn test_update_from_stale_read_is_a_conflict() {
        let db = temp_db().await;
        let order = sample();
        let id = insert_on(&db, &order).await.unwrap();

        let mut first = get_by_id_on(&db, id).await.unwrap().unwrap();
        let mut second = get_by_id_on(&db, id).await.unwrap().unwrap();
        first.apply_status(OrderStatus::Shipped, Utc::now()).unwrap();
        second.apply_status(OrderStatus::Cancelled, Utc::now()).unwrap();

        update_on(&db, &first).await.unwrap();
        let err = update_on(&db, &second).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<OrderError>(),
            Some(&OrderError::Conflict("ORD-9".into()))
        );

        let stored = get_by_id_on(&db, id).await.unwrap().unwrap();
        assert_eq!(stored.status.known(), Some(OrderStatus::Shipped));
        assert_eq!(stored.base.metadata.version, 1);
        assert!(stored.timestamps.cancelled_at.is_none());
    }

    #[tokio::test]
    async fn test_sequential_updates_bump_version() {
        let db = temp_db().await;
        let id = insert_on(&db, &sample()).await.unwrap();

        let mut order = get_by_id_on(&db, id).await.unwrap().unwrap();
        order.apply_status(OrderStatus::Shipped, Utc::now()).unwrap();
        update_on(&db, &order).await.unwrap();

        let mut order = get_by_id_on(&db, id).await.unwrap().unwrap();
        order.apply_status(OrderStatus::InTransit, Utc::now()).unwrap();
        update_on(&db, &order).await.unwrap();

        let stored = get_by_id_on(&db, id).await.unwrap().unwrap();
        assert_eq!(stored.status.known(), Some(OrderStatus::InTransit));
        assert_eq!(stored.base.metadata.version, 2);
    }
}
