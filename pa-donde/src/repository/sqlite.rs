//! SQLite-backed place store
//!
//! Deleted places are kept with `deleted_at` set and are invisible to every
//! read; deleting a record twice reports it as not found.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::error::{RepositoryError, RepositoryOperation};
use super::pagination::Pagination;
use super::traits::{PlaceRepository, RepositoryResult};
use crate::models::{ContactInfo, Coordinates, Place, PlaceFields, PriceRange};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS places (
        id                INTEGER PRIMARY KEY AUTOINCREMENT,
        created_at        TEXT    NOT NULL,
        updated_at        TEXT    NOT NULL,
        deleted_at        TEXT,
        name              TEXT    NOT NULL DEFAULT '',
        short_description TEXT    NOT NULL DEFAULT '',
        long_description  TEXT    NOT NULL DEFAULT '',
        address           TEXT    NOT NULL DEFAULT '',
        latitude          REAL    NOT NULL DEFAULT 0,
        longitude         REAL    NOT NULL DEFAULT 0,
        min_price         REAL    NOT NULL DEFAULT 0,
        max_price         REAL    NOT NULL DEFAULT 0,
        email             TEXT    NOT NULL DEFAULT '',
        phone             TEXT    NOT NULL DEFAULT '',
        website           TEXT    NOT NULL DEFAULT ''
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_places_deleted_at ON places (deleted_at)",
];

const COLUMNS: &str = "id, created_at, updated_at, name, short_description, long_description, \
    address, latitude, longitude, min_price, max_price, email, phone, website";

#[derive(sqlx::FromRow)]
struct PlaceRow {
    id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
    short_description: String,
    long_description: String,
    address: String,
    latitude: f64,
    longitude: f64,
    min_price: f64,
    max_price: f64,
    email: String,
    phone: String,
    website: String,
}

impl From<PlaceRow> for Place {
    fn from(row: PlaceRow) -> Self {
        Place {
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            fields: PlaceFields {
                name: row.name,
                short_description: row.short_description,
                long_description: row.long_description,
                address: row.address,
                coordinates: Coordinates {
                    latitude: row.latitude,
                    longitude: row.longitude,
                },
                price_range: PriceRange {
                    min_price: row.min_price,
                    max_price: row.max_price,
                },
                contact_info: ContactInfo {
                    email: row.email,
                    phone: row.phone,
                    website: row.website,
                },
            },
        }
    }
}

/// Place store on a sqlx SQLite pool
#[derive(Debug, Clone)]
pub struct SqlitePlaceRepository {
    pool: SqlitePool,
}

impl SqlitePlaceRepository {
    /// Wrap an existing pool; call [`migrate`](Self::migrate) before use
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `places` table and its index if they do not exist
    pub async fn migrate(&self) -> RepositoryResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::Migrate))?;
        }
        tracing::info!("Place schema is up to date");
        Ok(())
    }

    /// The underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl PlaceRepository for SqlitePlaceRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Place>> {
        let sql = format!("SELECT {COLUMNS} FROM places WHERE deleted_at IS NULL ORDER BY id");
        let rows = sqlx::query_as::<_, PlaceRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::FindAll))?;

        Ok(rows.into_iter().map(Place::from).collect())
    }

    async fn find_page(&self, pagination: Pagination) -> RepositoryResult<Vec<Place>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM places WHERE deleted_at IS NULL ORDER BY id LIMIT ? OFFSET ?"
        );
        let rows = sqlx::query_as::<_, PlaceRow>(&sql)
            .bind(pagination.sql_limit())
            .bind(pagination.sql_offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::FindPage))?;

        Ok(rows.into_iter().map(Place::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Place> {
        let sql = format!("SELECT {COLUMNS} FROM places WHERE id = ? AND deleted_at IS NULL");
        sqlx::query_as::<_, PlaceRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from(e)
                    .with_operation(RepositoryOperation::FindById)
                    .with_entity_id(id)
            })?
            .map(Place::from)
            .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::FindById, id))
    }

    async fn insert(&self, fields: PlaceFields) -> RepositoryResult<Place> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO places (created_at, updated_at, name, short_description, \
             long_description, address, latitude, longitude, min_price, max_price, \
             email, phone, website) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PlaceRow>(&sql)
            .bind(now)
            .bind(now)
            .bind(fields.name)
            .bind(fields.short_description)
            .bind(fields.long_description)
            .bind(fields.address)
            .bind(fields.coordinates.latitude)
            .bind(fields.coordinates.longitude)
            .bind(fields.price_range.min_price)
            .bind(fields.price_range.max_price)
            .bind(fields.contact_info.email)
            .bind(fields.contact_info.phone)
            .bind(fields.contact_info.website)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::Insert))?;

        Ok(row.into())
    }

    async fn update_by_id(&self, id: i64, fields: PlaceFields) -> RepositoryResult<Place> {
        let sql = format!(
            "UPDATE places SET updated_at = ?, name = ?, short_description = ?, \
             long_description = ?, address = ?, latitude = ?, longitude = ?, \
             min_price = ?, max_price = ?, email = ?, phone = ?, website = ? \
             WHERE id = ? AND deleted_at IS NULL RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlaceRow>(&sql)
            .bind(Utc::now())
            .bind(fields.name)
            .bind(fields.short_description)
            .bind(fields.long_description)
            .bind(fields.address)
            .bind(fields.coordinates.latitude)
            .bind(fields.coordinates.longitude)
            .bind(fields.price_range.min_price)
            .bind(fields.price_range.max_price)
            .bind(fields.contact_info.email)
            .bind(fields.contact_info.phone)
            .bind(fields.contact_info.website)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from(e)
                    .with_operation(RepositoryOperation::Update)
                    .with_entity_id(id)
            })?
            .map(Place::from)
            .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::Update, id))
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        let affected = sqlx::query(
            "UPDATE places SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from(e)
                .with_operation(RepositoryOperation::Delete)
                .with_entity_id(id)
        })?
        .rows_affected();

        if affected == 0 {
            return Err(RepositoryError::not_found(RepositoryOperation::Delete, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryErrorKind;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn repository() -> SqlitePlaceRepository {
        // A single, never-recycled connection keeps the in-memory database alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let repo = SqlitePlaceRepository::new(pool);
        repo.migrate().await.unwrap();
        repo
    }

    fn cafe() -> PlaceFields {
        PlaceFields {
            name: "Cafe X".to_string(),
            short_description: "Espresso bar".to_string(),
            long_description: "Small espresso bar near the market".to_string(),
            address: "Calle 10 #4-21".to_string(),
            coordinates: Coordinates::new(12.1, -1.2),
            price_range: PriceRange {
                min_price: 2.5,
                max_price: 9.0,
            },
            contact_info: ContactInfo {
                email: "hola@cafex.co".to_string(),
                phone: "+57 300 000 0000".to_string(),
                website: "https://cafex.co".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let repo = repository().await;
        repo.migrate().await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_then_find_round_trip() {
        let repo = repository().await;
        let created = repo.insert(cafe()).await.unwrap();
        assert!(created.id > 0);

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found.fields, cafe());
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn test_find_page_orders_by_id() {
        let repo = repository().await;
        for i in 0..5 {
            repo.insert(PlaceFields::named(format!("p{i}"))).await.unwrap();
        }

        let page = repo.find_page(Pagination::page(2, 2)).await.unwrap();
        let names: Vec<_> = page.iter().map(|p| p.fields.name.as_str()).collect();
        assert_eq!(names, ["p2", "p3"]);

        assert_eq!(repo.find_all().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_update_by_id() {
        let repo = repository().await;
        let created = repo.insert(cafe()).await.unwrap();

        let updated = repo
            .update_by_id(created.id, PlaceFields::named("Cafe Y"))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.fields.name, "Cafe Y");
        assert_eq!(updated.fields.coordinates, Coordinates::default());
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = repository().await;
        let err = repo.update_by_id(404, cafe()).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::NotFound);
        assert_eq!(err.entity_id, Some(404));
    }

    #[tokio::test]
    async fn test_soft_delete_hides_record() {
        let repo = repository().await;
        let created = repo.insert(cafe()).await.unwrap();
        repo.delete_by_id(created.id).await.unwrap();

        assert!(repo.find_by_id(created.id).await.unwrap_err().is_not_found());
        assert!(repo.find_all().await.unwrap().is_empty());
        assert!(repo.delete_by_id(created.id).await.unwrap_err().is_not_found());

        let (kept,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM places")
            .fetch_one(repo.pool())
            .await
            .unwrap();
        assert_eq!(kept, 1);
    }
}
