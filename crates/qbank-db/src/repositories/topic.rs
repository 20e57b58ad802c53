use sqlx::PgPool;

use crate::models::{NameOrder, NewTopic, Topic, TopicChanges, TopicFilter};

fn order_clause(order: NameOrder) -> &'static str {
    match order {
        NameOrder::NameAsc => "name ASC",
        NameOrder::NameDesc => "name DESC",
        NameOrder::IdAsc => "id ASC",
        NameOrder::IdDesc => "id DESC",
    }
}

pub async fn insert(pool: &PgPool, new: &NewTopic) -> Result<Topic, sqlx::Error> {
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO topics (name, description, is_active)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, is_active, created_at, updated_at
        "#,
    )
    .bind(&new.name)
    .bind(&new.description)
    .bind(new.is_active)
    .fetch_one(pool)
    .await
}

/// Fetch a topic regardless of its active state.
pub async fn get(pool: &PgPool, id: i64) -> Result<Option<Topic>, sqlx::Error> {
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, name, description, is_active, created_at, updated_at
            FROM topics
            WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List one page of topics plus the total match count.
pub async fn list(pool: &PgPool, filter: &TopicFilter) -> Result<(Vec<Topic>, i64), sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT COUNT(*)
            FROM topics
            WHERE is_active = $1
              AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
        "#,
    )
    .bind(filter.is_active)
    .bind(filter.search.as_deref())
    .fetch_one(pool)
    .await?;

    let sql = format!(
        r#"
            SELECT id, name, description, is_active, created_at, updated_at
            FROM topics
            WHERE is_active = $1
              AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
            ORDER BY {order}
            LIMIT $3 OFFSET $4
        "#,
        order = order_clause(filter.order),
    );

    let topics = sqlx::query_as(&sql)
        .bind(filter.is_active)
        .bind(filter.search.as_deref())
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(pool)
        .await?;

    Ok((topics, count))
}

/// Apply the provided changes; `None` fields keep their stored value.
pub async fn update(
    pool: &PgPool,
    id: i64,
    changes: &TopicChanges,
) -> Result<Option<Topic>, sqlx::Error> {
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE topics
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, is_active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(changes.name.as_deref())
    .bind(changes.description.as_deref())
    .bind(changes.is_active)
    .fetch_optional(pool)
    .await
}

/// Flip the soft-delete marker.
pub async fn set_active(
    pool: &PgPool,
    id: i64,
    active: bool,
) -> Result<Option<Topic>, sqlx::Error> {
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE topics
            SET is_active = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, is_active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(active)
    .fetch_optional(pool)
    .await
}
