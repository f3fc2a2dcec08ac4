use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::faculty_wear_repository::FacultyWearRepository;
use crate::domain::faculty_wear::{FacultyWear, WearDraft};
use crate::infrastructure::db::PgPool;

const COLUMNS: &str = "id, title, description, image_url, badge_text, standard_price, \
     custom_price, add_to_cart_text, add_to_cart_link, buy_now_text, buy_now_link, \
     display_order, created_at, updated_at";

const SEARCH_FILTER: &str = r#"($1::text IS NULL
        OR title ILIKE $1 ESCAPE '\'
        OR description ILIKE $1 ESCAPE '\'
        OR badge_text ILIKE $1 ESCAPE '\')"#;

pub struct SqlxFacultyWearRepository {
    pub pool: PgPool,
}

impl SqlxFacultyWearRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Builds an ILIKE pattern matching `term` as a literal substring.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

fn map_row(r: &PgRow) -> FacultyWear {
    FacultyWear {
        id: r.get("id"),
        title: r.get("title"),
        description: r.get("description"),
        image_url: r.get("image_url"),
        badge_text: r.get("badge_text"),
        standard_price: r.get("standard_price"),
        custom_price: r.get("custom_price"),
        add_to_cart_text: r.get("add_to_cart_text"),
        add_to_cart_link: r.get("add_to_cart_link"),
        buy_now_text: r.get("buy_now_text"),
        buy_now_link: r.get("buy_now_link"),
        display_order: r.get("display_order"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl FacultyWearRepository for SqlxFacultyWearRepository {
    async fn list(
        &self,
        search: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<FacultyWear>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM faculty_wear WHERE {SEARCH_FILTER}
             ORDER BY display_order ASC, created_at ASC, id ASC
             OFFSET $2 LIMIT $3"
        );
        let rows = sqlx::query(&sql)
            .bind(search.map(like_pattern))
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(map_row).collect())
    }

    async fn count(&self, search: Option<&str>) -> anyhow::Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM faculty_wear WHERE {SEARCH_FILTER}");
        let total: i64 = sqlx::query_scalar(&sql)
            .bind(search.map(like_pattern))
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<FacultyWear>> {
        let sql = format!("SELECT {COLUMNS} FROM faculty_wear WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_row))
    }

    async fn insert(&self, draft: &WearDraft, image_url: &str) -> anyhow::Result<FacultyWear> {
        let sql = format!(
            "INSERT INTO faculty_wear (title, description, image_url, badge_text, standard_price,
                 custom_price, add_to_cart_text, add_to_cart_link, buy_now_text, buy_now_link,
                 display_order, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, now(), now())
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(image_url)
            .bind(&draft.badge_text)
            .bind(draft.standard_price)
            .bind(draft.custom_price)
            .bind(&draft.add_to_cart_text)
            .bind(&draft.add_to_cart_link)
            .bind(&draft.buy_now_text)
            .bind(&draft.buy_now_link)
            .bind(draft.display_order)
            .fetch_one(&self.pool)
            .await?;
        Ok(map_row(&row))
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &WearDraft,
        image_url: Option<&str>,
    ) -> anyhow::Result<Option<FacultyWear>> {
        let sql = format!(
            "UPDATE faculty_wear SET
                 title = $2,
                 description = $3,
                 badge_text = $4,
                 standard_price = $5,
                 custom_price = $6,
                 add_to_cart_text = $7,
                 add_to_cart_link = $8,
                 buy_now_text = $9,
                 buy_now_link = $10,
                 display_order = $11,
                 image_url = COALESCE($12, image_url),
                 updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(&draft.badge_text)
            .bind(draft.standard_price)
            .bind(draft.custom_price)
            .bind(&draft.add_to_cart_text)
            .bind(&draft.add_to_cart_link)
            .bind(&draft.buy_now_text)
            .bind(&draft.buy_now_link)
            .bind(draft.display_order)
            .bind(image_url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_row))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM faculty_wear WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
