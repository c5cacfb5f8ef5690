
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::{education, experience, valid_profile, TestApp};
use uuid::Uuid;

#[actix_rt::test]
async fn protected_routes_require_a_token() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/api/profile/me"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["msg"], "No token, authorization denied");
}

#[actix_rt::test]
async fn invalid_token_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app.get_me("not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["msg"], "Token is not valid");
}

#[actix_rt::test]
async fn legacy_token_header_is_accepted() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");
    app.create_profile(&token).await;

    let response = app
        .client
        .get(app.url("/api/profile/me"))
        .header("x-auth-token", token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn own_profile_missing_is_not_found() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");

    let response = app.get_me(&token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["msg"], "There is no profile for this user");
}

#[actix_rt::test]
async fn missing_required_fields_are_reported_in_order() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");

    let response = app.post_profile(&token, &json!({ "company": "Acme", "status": "" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "errors": [
                { "field": "status", "message": "Status is required" },
                { "field": "skills", "message": "Skills is required" }
            ]
        })
    );

    // Nothing was stored.
    assert_eq!(app.get_me(&token).await.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn create_sanitizes_fields_and_joins_the_owner() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.signed_in_user("Ada");

    let response = app
        .post_profile(
            &token,
            &json!({
                "status": "Developer",
                "skills": " a, b ,c ,, ",
                "company": "   ",
                "githubusername": "octocat",
                "social": { "twitter": "@ada", "youtube": "" }
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let profile: Value = response.json().await.unwrap();
    assert_eq!(profile["skills"], json!(["a", "b", "c"]));
    assert_eq!(profile["githubUsername"], "octocat");
    assert!(profile.get("company").is_none());
    assert_eq!(profile["social"], json!({ "twitter": "@ada" }));
    assert_eq!(profile["user"]["id"], user_id.to_string());
    assert_eq!(profile["user"]["name"], "Ada");
    assert_eq!(profile["experience"], json!([]));
    assert_eq!(profile["education"], json!([]));
}

#[actix_rt::test]
async fn second_post_merges_into_the_existing_profile() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");

    let created: Value = app
        .post_profile(
            &token,
            &json!({ "status": "Developer", "skills": "rust", "company": "Acme", "bio": "Hi" }),
        )
        .await
        .json()
        .await
        .unwrap();

    let updated: Value = app
        .post_profile(&token, &json!({ "status": "Senior Developer", "skills": "rust, go" }))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["status"], "Senior Developer");
    assert_eq!(updated["skills"], json!(["rust", "go"]));
    assert_eq!(updated["company"], "Acme");
    assert_eq!(updated["bio"], "Hi");

    let listed: Value = app
        .client
        .get(app.url("/api/profile"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn public_reads_list_and_fetch_by_user() {
    let app = TestApp::spawn().await;
    let (ada, ada_token) = app.signed_in_user("Ada");
    let (_, bob_token) = app.signed_in_user("Bob");
    app.create_profile(&ada_token).await;
    app.create_profile(&bob_token).await;

    let listed: Value = app
        .client
        .get(app.url("/api/profile"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["user"]["name"].as_str())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Ada") && names.contains(&"Bob"));

    let response = app
        .client
        .get(app.url(&format!("/api/profile/user/{}", ada)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let profile: Value = response.json().await.unwrap();
    assert_eq!(profile["user"]["name"], "Ada");
}

#[actix_rt::test]
async fn unknown_or_malformed_user_id_is_not_found() {
    let app = TestApp::spawn().await;

    for id in [Uuid::new_v4().to_string(), "not-an-id".to_string()] {
        let response = app
            .client
            .get(app.url(&format!("/api/profile/user/{}", id)))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["msg"], "Profile not found");
    }
}

#[actix_rt::test]
async fn experience_requires_an_existing_profile() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");

    let response = app.put_entry("experience", &token, &experience("Engineer")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["msg"], "There is no profile for this user");
}

#[actix_rt::test]
async fn experience_validation_errors() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");
    app.create_profile(&token).await;

    let response = app.put_entry("experience", &token, &json!({ "company": "Acme" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["title", "from"]);
}

#[actix_rt::test]
async fn newest_experience_comes_first() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");
    app.create_profile(&token).await;

    for title in ["First", "Second", "Third"] {
        let response = app.put_entry("experience", &token, &experience(title)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let profile: Value = app.get_me(&token).await.json().await.unwrap();
    let titles: Vec<&str> = profile["experience"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);
    assert_eq!(profile["experience"][0]["from"], "2020-01-01");
    assert_eq!(profile["experience"][0]["current"], false);
}

#[actix_rt::test]
async fn removing_experience_by_id() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");
    app.create_profile(&token).await;
    app.put_entry("experience", &token, &experience("Keep")).await;
    let profile: Value = app
        .put_entry("experience", &token, &experience("Drop"))
        .await
        .json()
        .await
        .unwrap();
    let drop_id = profile["experience"][0]["id"].as_str().unwrap().to_string();

    let response = app.delete_entry("experience", &token, &drop_id).await;

    assert_eq!(response.status(), StatusCode::OK);
    let profile: Value = response.json().await.unwrap();
    let titles: Vec<&str> = profile["experience"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Keep"]);
}

#[actix_rt::test]
async fn removing_an_unknown_entry_changes_nothing() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");
    app.create_profile(&token).await;
    app.put_entry("experience", &token, &experience("Keep")).await;
    app.put_entry("education", &token, &education("MIT")).await;

    for id in [Uuid::new_v4().to_string(), "garbage".to_string()] {
        let response = app.delete_entry("experience", &token, &id).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["msg"], "Experience not found");

        let response = app.delete_entry("education", &token, &id).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["msg"], "Education not found");
    }

    let profile: Value = app.get_me(&token).await.json().await.unwrap();
    assert_eq!(profile["experience"].as_array().unwrap().len(), 1);
    assert_eq!(profile["education"].as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn education_is_added_and_removed() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");
    app.create_profile(&token).await;

    let response = app.put_entry("education", &token, &education("MIT")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile: Value = response.json().await.unwrap();
    let entry = &profile["education"][0];
    assert_eq!(entry["school"], "MIT");
    assert_eq!(entry["fieldOfStudy"], "Computer Science");
    assert_eq!(entry["to"], "2019-06-30");

    let id = entry["id"].as_str().unwrap().to_string();
    let profile: Value = app
        .delete_entry("education", &token, &id)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(profile["education"], json!([]));
}

#[actix_rt::test]
async fn education_validation_follows_field_order() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");
    app.create_profile(&token).await;

    let response = app.put_entry("education", &token, &json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["school", "degree", "fieldOfStudy", "from"]);
}

#[actix_rt::test]
async fn deleting_the_account_removes_profile_and_user() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.signed_in_user("Ada");
    app.create_profile(&token).await;

    let response = app
        .client
        .delete(app.url("/api/profile"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["msg"], "User deleted");
    assert!(!app.store.user_exists(&user_id));

    let response = app
        .client
        .get(app.url(&format!("/api/profile/user/{}", user_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn deleting_an_account_without_profile_succeeds() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.signed_in_user("Ada");

    let response = app
        .client
        .delete(app.url("/api/profile"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!app.store.user_exists(&user_id));
}

#[actix_rt::test]
async fn trailing_slash_is_normalized() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");

    let response = app
        .client
        .post(app.url("/api/profile/"))
        .bearer_auth(&token)
        .json(&valid_profile())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");

    let response = app
        .client
        .post(app.url("/api/profile"))
        .bearer_auth(&token)
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["msg"].is_string());
}

#[actix_rt::test]
async fn health_reports_storage() {
    let app = TestApp::spawn().await;

    let response = app.client.get(app.url("/health")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

fn error_pairs(body: &Value) -> Vec<(String, String)> {
    body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|e| {
            (
                e["field"].as_str().unwrap_or_default().to_string(),
                e["message"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(f, m)| (f.to_string(), m.to_string()))
        .collect()
}

#[actix_rt::test]
async fn whitespace_only_required_fields_are_rejected() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");

    let response = app
        .post_profile(&token, &json!({ "status": "   ", "skills": " , " }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        error_pairs(&body),
        pairs(&[("status", "Status is required"), ("skills", "Skills is required")])
    );
    assert_eq!(app.get_me(&token).await.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn blank_skills_never_wipe_stored_skills() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");
    app.create_profile(&token).await;

    let response = app
        .post_profile(&token, &json!({ "status": "Developer", "skills": "," }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let profile: Value = app.get_me(&token).await.json().await.unwrap();
    assert_eq!(profile["skills"], json!(["rust", "sql"]));
}

#[actix_rt::test]
async fn blank_experience_fields_are_rejected() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");
    app.create_profile(&token).await;

    let response = app
        .put_entry(
            "experience",
            &token,
            &json!({ "title": " ", "company": "\t", "from": "" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        error_pairs(&body),
        pairs(&[
            ("title", "Title is required"),
            ("company", "Company is required"),
            ("from", "From date is required"),
        ])
    );
}

#[actix_rt::test]
async fn empty_start_date_is_a_field_error() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");
    app.create_profile(&token).await;

    let response = app
        .put_entry(
            "experience",
            &token,
            &json!({ "title": "T", "company": "C", "from": "" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(error_pairs(&body), pairs(&[("from", "From date is required")]));

    let profile: Value = app.get_me(&token).await.json().await.unwrap();
    assert_eq!(profile["experience"], json!([]));
}

#[actix_rt::test]
async fn malformed_end_date_is_a_field_error() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");
    app.create_profile(&token).await;

    let response = app
        .put_entry(
            "education",
            &token,
            &json!({
                "school": "MIT",
                "degree": "BSc",
                "fieldofstudy": "CS",
                "from": "2015-09-01",
                "to": "someday"
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(error_pairs(&body), pairs(&[("to", "To date must be a valid date")]));
}

#[actix_rt::test]
async fn blank_education_fields_are_rejected() {
    let app = TestApp::spawn().await;
    let (_, token) = app.signed_in_user("Ada");
    app.create_profile(&token).await;

    let response = app
        .put_entry(
            "education",
            &token,
            &json!({ "school": " ", "degree": "", "fieldofstudy": "  ", "from": " " }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        error_pairs(&body),
        pairs(&[
            ("school", "School is required"),
            ("degree", "Degree is required"),
            ("fieldOfStudy", "Field of Study is required"),
            ("from", "From date is required"),
        ])
    );
}

#[actix_rt::test]
async fn stale_token_does_not_block_public_reads() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.signed_in_user("Ada");
    app.create_profile(&token).await;

    let response = app
        .client
        .get(app.url("/api/profile"))
        .header("x-auth-token", "expired-or-garbage")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .client
        .get(app.url(&format!("/api/profile/user/{}", user_id)))
        .bearer_auth("expired-or-garbage")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .client
        .get(app.url("/"))
        .header("x-auth-token", "expired-or-garbage")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Private routes still refuse the same token.
    let response = app
        .client
        .get(app.url("/api/profile/me"))
        .header("x-auth-token", "expired-or-garbage")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["msg"], "Token is not valid");
}
