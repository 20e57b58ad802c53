use sqlx::PgPool;

use crate::models::{NameOrder, NewTechStack, TechStack, TechStackChanges, TechStackFilter};

fn order_clause(order: NameOrder) -> &'static str {
    match order {
        NameOrder::NameAsc => "name ASC",
        NameOrder::NameDesc => "name DESC",
        NameOrder::IdAsc => "id ASC",
        NameOrder::IdDesc => "id DESC",
    }
}

pub async fn insert(pool: &PgPool, new: &NewTechStack) -> Result<TechStack, sqlx::Error> {
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO tech_stacks (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, is_active
        "#,
    )
    .bind(&new.name)
    .bind(new.description.as_deref())
    .fetch_one(pool)
    .await
}

/// Fetch a tech stack regardless of its active state.
pub async fn get(pool: &PgPool, id: i64) -> Result<Option<TechStack>, sqlx::Error> {
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, name, description, is_active
            FROM tech_stacks
            WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List one page of tech stacks plus the total match count.
pub async fn list(
    pool: &PgPool,
    filter: &TechStackFilter,
) -> Result<(Vec<TechStack>, i64), sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT COUNT(*)
            FROM tech_stacks
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
            SELECT id, name, description, is_active
            FROM tech_stacks
            WHERE is_active = $1
              AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
            ORDER BY {order}
            LIMIT $3 OFFSET $4
        "#,
        order = order_clause(filter.order),
    );

    let stacks = sqlx::query_as(&sql)
        .bind(filter.is_active)
        .bind(filter.search.as_deref())
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(pool)
        .await?;

    Ok((stacks, count))
}

/// Apply the provided changes; `None` fields keep their stored value.
pub async fn update(
    pool: &PgPool,
    id: i64,
    changes: &TechStackChanges,
) -> Result<Option<TechStack>, sqlx::Error> {
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE tech_stacks
            SET name = COALESCE($2, name),
                description = COALESCE($3, description)
            WHERE id = $1
            RETURNING id, name, description, is_active
        "#,
    )
    .bind(id)
    .bind(changes.name.as_deref())
    .bind(changes.description.as_deref())
    .fetch_optional(pool)
    .await
}

/// Flip the soft-delete marker.
pub async fn set_active(
    pool: &PgPool,
    id: i64,
    active: bool,
) -> Result<Option<TechStack>, sqlx::Error> {
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE tech_stacks
            SET is_active = $2
            WHERE id = $1
            RETURNING id, name, description, is_active
        "#,
    )
    .bind(id)
    .bind(active)
    .fetch_optional(pool)
    .await
}
