use crate::common::{TestClient, TestStateBuilder, db, jwt, test_data};
use axum::http::StatusCode;
use qbank_api::router;
use serde_json::json;

async fn setup() -> (qbank_api::ApiState, TestClient) {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");

    let client = TestClient::new(router::router().with_state(state.clone()));
    (state, client)
}

/// Create a topic and return its id.
async fn create_topic(client: &TestClient, base: &str) -> (i64, String) {
    let name = test_data::unique_name(base);
    let created: serde_json::Value = client
        .post_json("/topics", &json!({ "name": name }))
        .await
        .json();
    (created["id"].as_i64().unwrap(), name)
}

#[tokio::test]
async fn test_create_question_with_defaults() {
    let (_state, client) = setup().await;
    let (topic_id, _) = create_topic(&client, "qc").await;

    let text = test_data::unique_name("What is a webhook");
    let response = client
        .post_json(
            "/questions",
            &json!({ "question_text": text, "topic": topic_id, "difficulty": 2 }),
        )
        .await;
    response.assert_status(StatusCode::CREATED);

    // The create shape carries the writable fields plus the id.
    let created: serde_json::Value = response.json();
    assert_eq!(created["question_text"].as_str().unwrap(), text);
    assert_eq!(created["topic"].as_i64().unwrap(), topic_id);
    assert_eq!(created["difficulty"].as_i64().unwrap(), 2);

    let id = created["id"].as_i64().unwrap();
    let detail: serde_json::Value = client.get(&format!("/questions/{id}")).await.json();
    assert_eq!(detail["source"].as_str().unwrap(), "template");
    assert_eq!(detail["usage_count"].as_i64().unwrap(), 0);
    assert_eq!(detail["max_score"].as_i64().unwrap(), 6);
    assert!(detail["is_active"].as_bool().unwrap());
    assert!(detail["question_author"].is_null());
}

#[tokio::test]
async fn test_create_question_with_unknown_topic_rejected() {
    let (_state, client) = setup().await;

    let response = client
        .post_json(
            "/questions",
            &json!({
                "question_text": "orphan",
                "topic": 999999999,
                "difficulty": 1
            }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_question_with_invalid_difficulty_rejected() {
    let (_state, client) = setup().await;
    let (topic_id, _) = create_topic(&client, "diff").await;

    let response = client
        .post_json(
            "/questions",
            &json!({ "question_text": "too hard", "topic": topic_id, "difficulty": 7 }),
        )
        .await;
    assert!(
        response.status.is_client_error(),
        "Expected client error, got {}",
        response.status
    );
}

#[tokio::test]
async fn test_author_assigned_from_caller_identity() {
    let (state, client) = setup().await;
    let (topic_id, _) = create_topic(&client, "auth").await;

    let user_id = db::create_test_user(
        &state.pool,
        &test_data::unique_email("author"),
        "author",
        false,
    )
    .await
    .expect("Failed to create test user");
    let token = jwt::token_for(user_id, "author@example.com", false, &state.auth.jwt_secret);

    let created: serde_json::Value = client
        .post_json_with_auth(
            "/questions",
            &json!({
                "question_text": test_data::unique_name("authored"),
                "topic": topic_id,
                "difficulty": 1
            }),
            &token,
        )
        .await
        .json();

    let id = created["id"].as_i64().unwrap();
    let detail: serde_json::Value = client.get(&format!("/questions/{id}")).await.json();
    assert_eq!(
        detail["question_author"].as_str().unwrap(),
        user_id.to_string()
    );
}

#[tokio::test]
async fn test_max_score_per_difficulty() {
    let (_state, client) = setup().await;
    let (topic_id, _) = create_topic(&client, "score").await;

    for (difficulty, expected) in [(1, 3), (2, 6), (3, 9)] {
        let created: serde_json::Value = client
            .post_json(
                "/questions",
                &json!({
                    "question_text": test_data::unique_name("scored"),
                    "topic": topic_id,
                    "difficulty": difficulty
                }),
            )
            .await
            .json();

        let id = created["id"].as_i64().unwrap();
        let detail: serde_json::Value = client.get(&format!("/questions/{id}")).await.json();
        assert_eq!(detail["max_score"].as_i64().unwrap(), expected);
    }
}

#[tokio::test]
async fn test_increment_usage() {
    let (_state, client) = setup().await;
    let (topic_id, _) = create_topic(&client, "usage").await;

    let created: serde_json::Value = client
        .post_json(
            "/questions",
            &json!({
                "question_text": test_data::unique_name("used"),
                "topic": topic_id,
                "difficulty": 2
            }),
        )
        .await
        .json();
    let id = created["id"].as_i64().unwrap();

    let response = client
        .post(&format!("/questions/{id}/increment-usage"))
        .await;
    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["usage_count"].as_i64().unwrap(), 1);

    let body: serde_json::Value = client
        .post(&format!("/questions/{id}/increment-usage"))
        .await
        .json();
    assert_eq!(body["usage_count"].as_i64().unwrap(), 2);

    let response = client.post("/questions/999999999/increment-usage").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_soft_delete_and_restore_lifecycle() {
    let (_state, client) = setup().await;
    let (topic_id, topic_name) = create_topic(&client, "cycle").await;

    let text = test_data::unique_name("deleted");
    let created: serde_json::Value = client
        .post_json(
            "/questions",
            &json!({ "question_text": text, "topic": topic_id, "difficulty": 3 }),
        )
        .await
        .json();
    let id = created["id"].as_i64().unwrap();

    // No admin gate on question destroy/restore.
    let response = client.delete(&format!("/questions/{id}")).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let page: serde_json::Value = client
        .get(&format!("/questions?search={text}"))
        .await
        .json();
    assert_eq!(page["count"].as_i64().unwrap(), 0);

    let detail: serde_json::Value = client.get(&format!("/questions/{id}")).await.json();
    assert!(!detail["is_active"].as_bool().unwrap());

    let response = client.post(&format!("/questions/{id}/restore")).await;
    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert!(body["message"].as_str().unwrap().contains(&text));
    assert_eq!(
        body["question"]["topic_name"].as_str().unwrap(),
        topic_name
    );
    assert!(body["question"]["is_active"].as_bool().unwrap());

    let response = client.post(&format!("/questions/{id}/restore")).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["error"].as_str().unwrap(),
        "Question is already active"
    );
}

#[tokio::test]
async fn test_topic_with_questions_cannot_be_deleted() {
    let (state, client) = setup().await;
    let admin = jwt::admin_token(&state.auth.jwt_secret);

    let (topic_id, _) = create_topic(&client, "blocked").await;
    client
        .post_json(
            "/questions",
            &json!({
                "question_text": test_data::unique_name("blocker"),
                "topic": topic_id,
                "difficulty": 1
            }),
        )
        .await
        .assert_status(StatusCode::CREATED);

    let response = client
        .delete_with_auth(&format!("/topics/{topic_id}"), &admin)
        .await;
    response.assert_status(StatusCode::CONFLICT);

    // The topic survives, still active.
    let fetched: serde_json::Value = client.get(&format!("/topics/{topic_id}")).await.json();
    assert!(fetched["is_active"].as_bool().unwrap());

    // A topic with no questions soft-deletes fine.
    let (empty_topic_id, _) = create_topic(&client, "empty").await;
    let response = client
        .delete_with_auth(&format!("/topics/{empty_topic_id}"), &admin)
        .await;
    response.assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_list_filters() {
    let (_state, client) = setup().await;
    let (topic_id, topic_name) = create_topic(&client, "filter").await;

    let prefix = test_data::unique_name("filtered");
    for difficulty in [1, 2, 3] {
        client
            .post_json(
                "/questions",
                &json!({
                    "question_text": format!("{prefix}_{difficulty}"),
                    "topic": topic_id,
                    "difficulty": difficulty
                }),
            )
            .await
            .assert_status(StatusCode::CREATED);
    }

    // Exact difficulty filter.
    let page: serde_json::Value = client
        .get(&format!("/questions?search={prefix}&difficulty=2"))
        .await
        .json();
    assert_eq!(page["count"].as_i64().unwrap(), 1);
    assert_eq!(page["results"][0]["difficulty"].as_i64().unwrap(), 2);

    // Topic name substring filter.
    let page: serde_json::Value = client
        .get(&format!("/questions?topic_name={topic_name}"))
        .await
        .json();
    assert_eq!(page["count"].as_i64().unwrap(), 3);

    // Source exact filter.
    let page: serde_json::Value = client
        .get(&format!("/questions?search={prefix}&source=template"))
        .await
        .json();
    assert_eq!(page["count"].as_i64().unwrap(), 3);

    let page: serde_json::Value = client
        .get(&format!("/questions?search={prefix}&source=manual"))
        .await
        .json();
    assert_eq!(page["count"].as_i64().unwrap(), 0);
}

#[tokio::test]
async fn test_list_ordering_by_difficulty() {
    let (_state, client) = setup().await;
    let (topic_id, _) = create_topic(&client, "qord").await;

    let prefix = test_data::unique_name("ordered");
    for difficulty in [2, 3, 1] {
        client
            .post_json(
                "/questions",
                &json!({
                    "question_text": format!("{prefix}_{difficulty}"),
                    "topic": topic_id,
                    "difficulty": difficulty
                }),
            )
            .await
            .assert_status(StatusCode::CREATED);
    }

    let page: serde_json::Value = client
        .get(&format!("/questions?search={prefix}&ordering=-difficulty"))
        .await
        .json();
    let difficulties: Vec<i64> = page["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["difficulty"].as_i64().unwrap())
        .collect();
    assert_eq!(difficulties, vec![3, 2, 1]);
}

#[tokio::test]
async fn test_list_shape_and_detail_link() {
    let (_state, client) = setup().await;
    let (topic_id, topic_name) = create_topic(&client, "qshape").await;

    let text = test_data::unique_name("shaped");
    let created: serde_json::Value = client
        .post_json(
            "/questions",
            &json!({ "question_text": text, "topic": topic_id, "difficulty": 1 }),
        )
        .await
        .json();
    let id = created["id"].as_i64().unwrap();

    let page: serde_json::Value = client
        .get(&format!("/questions?search={text}"))
        .await
        .json();
    let item = &page["results"][0];
    assert_eq!(item["topic_name"].as_str().unwrap(), topic_name);
    assert_eq!(item["source"].as_str().unwrap(), "template");
    assert_eq!(item["usage_count"].as_i64().unwrap(), 0);
    assert_eq!(
        item["detail"].as_str().unwrap(),
        format!("/questions/{id}")
    );
    // List entries omit the audit fields.
    assert!(item.get("created_at").is_none());
    assert!(item.get("max_score").is_none());
}

#[tokio::test]
async fn test_update_and_partial_update() {
    let (_state, client) = setup().await;
    let (topic_id, _) = create_topic(&client, "qupd").await;
    let (other_topic_id, _) = create_topic(&client, "qupd2").await;

    let created: serde_json::Value = client
        .post_json(
            "/questions",
            &json!({
                "question_text": test_data::unique_name("before"),
                "topic": topic_id,
                "difficulty": 1
            }),
        )
        .await
        .json();
    let id = created["id"].as_i64().unwrap();

    let new_text = test_data::unique_name("after");
    let updated: serde_json::Value = client
        .put_json(
            &format!("/questions/{id}"),
            &json!({ "question_text": new_text, "topic": other_topic_id, "difficulty": 3 }),
        )
        .await
        .json();
    assert_eq!(updated["question_text"].as_str().unwrap(), new_text);
    assert_eq!(updated["topic"].as_i64().unwrap(), other_topic_id);
    assert_eq!(updated["difficulty"].as_i64().unwrap(), 3);

    let patched: serde_json::Value = client
        .patch_json(&format!("/questions/{id}"), &json!({ "difficulty": 2 }))
        .await
        .json();
    assert_eq!(patched["difficulty"].as_i64().unwrap(), 2);
    assert_eq!(patched["question_text"].as_str().unwrap(), new_text);
}
