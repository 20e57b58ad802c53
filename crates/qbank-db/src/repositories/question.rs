use sqlx::PgPool;

use crate::models::{
    NewQuestion, Question, QuestionChanges, QuestionDetail, QuestionFilter, QuestionOrder,
};

const DETAIL_COLUMNS: &str = "q.id, q.question_text, q.difficulty, q.source, q.is_active, \
     q.topic_id, t.name AS topic_name, q.question_author, q.usage_count, \
     q.created_at, q.updated_at";

fn order_clause(order: QuestionOrder) -> &'static str {
    match order {
        QuestionOrder::TopicUsage => "q.topic_id ASC, q.usage_count DESC, q.created_at ASC",
        QuestionOrder::DifficultyAsc => "q.difficulty ASC, q.id ASC",
        QuestionOrder::DifficultyDesc => "q.difficulty DESC, q.id ASC",
        QuestionOrder::UsageAsc => "q.usage_count ASC, q.id ASC",
        QuestionOrder::UsageDesc => "q.usage_count DESC, q.id ASC",
    }
}

pub async fn insert(pool: &PgPool, new: &NewQuestion) -> Result<Question, sqlx::Error> {
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO questions (question_text, topic_id, difficulty, question_author)
            VALUES ($1, $2, $3, $4)
            RETURNING id, question_text, difficulty, source, is_active, topic_id,
                      question_author, usage_count, created_at, updated_at
        "#,
    )
    .bind(&new.question_text)
    .bind(new.topic_id)
    .bind(new.difficulty)
    .bind(new.author)
    .fetch_one(pool)
    .await
}

/// Fetch a question with its topic name, regardless of active state.
pub async fn get_detail(pool: &PgPool, id: i64) -> Result<Option<QuestionDetail>, sqlx::Error> {
    let sql = format!(
        r#"
            SELECT {DETAIL_COLUMNS}
            FROM questions q
            JOIN topics t ON t.id = q.topic_id
            WHERE q.id = $1
        "#,
    );

    sqlx::query_as(&sql).bind(id).fetch_optional(pool).await
}

/// List one page of questions plus the total match count.
pub async fn list(
    pool: &PgPool,
    filter: &QuestionFilter,
) -> Result<(Vec<QuestionDetail>, i64), sqlx::Error> {
    const MATCH: &str = "q.is_active = $1 \
         AND ($2::text IS NULL OR q.question_text ILIKE '%' || $2 || '%') \
         AND ($3::text IS NULL OR t.name ILIKE '%' || $3 || '%') \
         AND ($4::int4 IS NULL OR q.difficulty = $4) \
         AND ($5::text IS NULL OR q.source = $5)";

    let count_sql = format!(
        r#"
            SELECT COUNT(*)
            FROM questions q
            JOIN topics t ON t.id = q.topic_id
            WHERE {MATCH}
        "#,
    );

    let (count,): (i64,) = sqlx::query_as(&count_sql)
        .bind(filter.is_active)
        .bind(filter.search.as_deref())
        .bind(filter.topic_name.as_deref())
        .bind(filter.difficulty)
        .bind(filter.source)
        .fetch_one(pool)
        .await?;

    let sql = format!(
        r#"
            SELECT {DETAIL_COLUMNS}
            FROM questions q
            JOIN topics t ON t.id = q.topic_id
            WHERE {MATCH}
            ORDER BY {order}
            LIMIT $6 OFFSET $7
        "#,
        order = order_clause(filter.order),
    );

    let questions = sqlx::query_as(&sql)
        .bind(filter.is_active)
        .bind(filter.search.as_deref())
        .bind(filter.topic_name.as_deref())
        .bind(filter.difficulty)
        .bind(filter.source)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(pool)
        .await?;

    Ok((questions, count))
}

/// Apply the provided changes; `None` fields keep their stored value.
pub async fn update(
    pool: &PgPool,
    id: i64,
    changes: &QuestionChanges,
) -> Result<Option<Question>, sqlx::Error> {
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE questions
            SET question_text = COALESCE($2, question_text),
                topic_id = COALESCE($3, topic_id),
                difficulty = COALESCE($4, difficulty),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, question_text, difficulty, source, is_active, topic_id,
                      question_author, usage_count, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(changes.question_text.as_deref())
    .bind(changes.topic_id)
    .bind(changes.difficulty)
    .fetch_optional(pool)
    .await
}

/// Flip the soft-delete marker, returning the joined detail row.
pub async fn set_active(
    pool: &PgPool,
    id: i64,
    active: bool,
) -> Result<Option<QuestionDetail>, sqlx::Error> {
    let sql = format!(
        r#"
            UPDATE questions q
            SET is_active = $2,
                updated_at = NOW()
            FROM topics t
            WHERE q.id = $1 AND t.id = q.topic_id
            RETURNING {DETAIL_COLUMNS}
        "#,
    );

    sqlx::query_as(&sql).bind(id).bind(active).fetch_optional(pool).await
}

/// Atomically bump the usage counter, returning the new count.
pub async fn increment_usage(pool: &PgPool, id: i64) -> Result<Option<i32>, sqlx::Error> {
    let row: Option<(i32,)> = sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE questions
            SET usage_count = usage_count + 1
            WHERE id = $1
            RETURNING usage_count
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(count,)| count))
}

/// How many questions (active or not) reference a topic. Used to enforce
/// the referential block before a topic soft delete.
pub async fn count_for_topic(pool: &PgPool, topic_id: i64) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT COUNT(*)
            FROM questions
            WHERE topic_id = $1
        "#,
    )
    .bind(topic_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
