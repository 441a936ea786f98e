//! Item Repository
//!
//! Short identifiers are allocated here: the INSERT carries the UNIQUE
//! constraint check, and a collision retries the whole insert with a freshly
//! drawn candidate. Check-and-assign therefore happens at the durable write,
//! closing the race between concurrent creations.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{item_image, RepoError, RepoResult};
use crate::utils::shortid::generate_short_id;
use shared::models::{Item, ItemCreate, ItemStatus, ItemUpdate};
use shared::util::now_millis;

/// Draw guard: the base36^7 space never realistically exhausts, so hitting
/// this bound means a broken alphabet/length configuration.
const MAX_SHORT_ID_ATTEMPTS: u32 = 32;

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: String,
    short_id: String,
    title: String,
    description: String,
    tags: String,
    category: Option<String>,
    brand: Option<String>,
    model: Option<String>,
    serial_no: Option<String>,
    location: Option<String>,
    status: String,
    purchase_date: Option<String>,
    warranty_expiry: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl ItemRow {
    fn into_item(self, images: Vec<shared::models::ItemImage>) -> Item {
        Item {
            id: self.id,
            short_id: self.short_id,
            title: self.title,
            description: self.description,
            tags: serde_json::from_str(&self.tags).unwrap_or_default(),
            category: self.category,
            brand: self.brand,
            model: self.model,
            serial_no: self.serial_no,
            location: self.location,
            status: ItemStatus::parse(&self.status).unwrap_or_default(),
            purchase_date: self.purchase_date.and_then(|d| d.parse().ok()),
            warranty_expiry: self.warranty_expiry.and_then(|d| d.parse().ok()),
            created_at: self.created_at,
            updated_at: self.updated_at,
            images,
        }
    }
}

const SELECT_COLUMNS: &str = "id, short_id, title, description, tags, category, brand, model, \
     serial_no, location, status, purchase_date, warranty_expiry, created_at, updated_at";

fn parse_date(field: &str, value: Option<&str>) -> RepoResult<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|_| RepoError::Validation(format!("Invalid {field}"))),
    }
}

fn parse_status(value: &str) -> RepoResult<ItemStatus> {
    ItemStatus::parse(value)
        .ok_or_else(|| RepoError::Validation(format!("Unknown status '{value}'")))
}

/// Create an item, allocating a unique short identifier at insert time
pub async fn create(pool: &SqlitePool, data: ItemCreate) -> RepoResult<Item> {
    let purchase_date = parse_date("purchase_date", data.purchase_date.as_deref())?;
    let warranty_expiry = parse_date("warranty_expiry", data.warranty_expiry.as_deref())?;
    let status = match data.status.as_deref() {
        Some(raw) => parse_status(raw)?,
        None => ItemStatus::default(),
    };

    let id = Uuid::new_v4().to_string();
    let tags = serde_json::to_string(&data.tags)
        .map_err(|e| RepoError::Database(format!("Failed to encode tags: {e}")))?;
    let now = now_millis();

    for attempt in 0..MAX_SHORT_ID_ATTEMPTS {
        let short_id = generate_short_id();
        let result = sqlx::query(
            "INSERT INTO items (id, short_id, title, description, tags, category, brand, model, \
             serial_no, location, status, purchase_date, warranty_expiry, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&short_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&tags)
        .bind(&data.category)
        .bind(&data.brand)
        .bind(&data.model)
        .bind(&data.serial_no)
        .bind(&data.location)
        .bind(status.as_str())
        .bind(purchase_date.map(|d| d.to_string()))
        .bind(warranty_expiry.map(|d| d.to_string()))
        .bind(now)
        .bind(now)
        .execute(pool)
        .await;

        match result {
            Ok(_) => {
                return find_by_id(pool, &id)
                    .await?
                    .ok_or_else(|| RepoError::Database("Insert readback failed".to_string()));
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                // The only unique column besides the uuid PK is short_id
                if db.message().contains("short_id") {
                    tracing::debug!(attempt, "Short id collision, drawing a new candidate");
                    continue;
                }
                return Err(RepoError::Duplicate(db.message().to_string()));
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(RepoError::Database(format!(
        "Short identifier space exhausted after {MAX_SHORT_ID_ATTEMPTS} attempts"
    )))
}

/// List items, newest first, optionally filtered by a search term
pub async fn find_all(pool: &SqlitePool, search: Option<&str>) -> RepoResult<Vec<Item>> {
    let rows: Vec<ItemRow> = match search {
        Some(term) if !term.trim().is_empty() => {
            let pattern = format!("%{}%", term.trim().to_lowercase());
            sqlx::query_as(&format!(
                "SELECT {SELECT_COLUMNS} FROM items \
                 WHERE lower(title) LIKE ? OR lower(description) LIKE ? OR lower(tags) LIKE ? \
                 ORDER BY created_at DESC"
            ))
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(pool)
            .await?
        }
        _ => {
            sqlx::query_as(&format!(
                "SELECT {SELECT_COLUMNS} FROM items ORDER BY created_at DESC"
            ))
            .fetch_all(pool)
            .await?
        }
    };

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        let images = item_image::find_for_item(pool, &row.id).await?;
        items.push(row.into_item(images));
    }
    Ok(items)
}

/// Find item by id
pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Item>> {
    let row: Option<ItemRow> =
        sqlx::query_as(&format!("SELECT {SELECT_COLUMNS} FROM items WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;

    match row {
        Some(row) => {
            let images = item_image::find_for_item(pool, &row.id).await?;
            Ok(Some(row.into_item(images)))
        }
        None => Ok(None),
    }
}

/// Find item by its public short identifier
pub async fn find_by_short_id(pool: &SqlitePool, short_id: &str) -> RepoResult<Option<Item>> {
    let row: Option<ItemRow> = sqlx::query_as(&format!(
        "SELECT {SELECT_COLUMNS} FROM items WHERE short_id = ?"
    ))
    .bind(short_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let images = item_image::find_for_item(pool, &row.id).await?;
            Ok(Some(row.into_item(images)))
        }
        None => Ok(None),
    }
}

/// Update an item in place (absent fields stay unchanged); bumps updated_at
pub async fn update(pool: &SqlitePool, id: &str, data: ItemUpdate) -> RepoResult<Item> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Item {id} not found")))?;

    let purchase_date = match data.purchase_date.as_deref() {
        Some(raw) => parse_date("purchase_date", Some(raw))?,
        None => existing.purchase_date,
    };
    let warranty_expiry = match data.warranty_expiry.as_deref() {
        Some(raw) => parse_date("warranty_expiry", Some(raw))?,
        None => existing.warranty_expiry,
    };
    let status = match data.status.as_deref() {
        Some(raw) => parse_status(raw)?,
        None => existing.status,
    };
    let tags = serde_json::to_string(&data.tags.unwrap_or(existing.tags))
        .map_err(|e| RepoError::Database(format!("Failed to encode tags: {e}")))?;

    sqlx::query(
        "UPDATE items SET title = ?, description = ?, tags = ?, category = ?, brand = ?, \
         model = ?, serial_no = ?, location = ?, status = ?, purchase_date = ?, \
         warranty_expiry = ?, updated_at = ? WHERE id = ?",
    )
    .bind(data.title.unwrap_or(existing.title))
    .bind(data.description.unwrap_or(existing.description))
    .bind(&tags)
    .bind(data.category.or(existing.category))
    .bind(data.brand.or(existing.brand))
    .bind(data.model.or(existing.model))
    .bind(data.serial_no.or(existing.serial_no))
    .bind(data.location.or(existing.location))
    .bind(status.as_str())
    .bind(purchase_date.map(|d| d.to_string()))
    .bind(warranty_expiry.map(|d| d.to_string()))
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Update readback failed".to_string()))
}

/// Delete an item; image rows cascade via the foreign key
pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM items WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
