mod common;

use common::TestServer;
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn create_project(server: &TestServer, token: &str, body: Value) -> Value {
    let response = server
        .client
        .post(server.url("/api/projects"))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("create project");
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("project body")
}

async fn add_image(server: &TestServer, token: &str, project_id: &str, body: Value) -> Value {
    let response = server
        .client
        .post(server.url(&format!("/api/projects/{project_id}/images")))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("add image");
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("image body")
}

async fn get_project(server: &TestServer, id: &str) -> Value {
    server
        .client
        .get(server.url(&format!("/api/projects/{id}")))
        .send()
        .await
        .expect("get project")
        .json()
        .await
        .expect("project body")
}

// Auth

#[tokio::test]
async fn test_login_and_me() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let response = server
        .client
        .get(server.url("/api/auth/me"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("me");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("me body");
    assert_eq!(body["email"], common::ADMIN_EMAIL);
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = TestServer::start().await;

    let response = server
        .client
        .post(server.url("/api/auth/login"))
        .json(&json!({"email": common::ADMIN_EMAIL, "password": "kriva"}))
        .send()
        .await
        .expect("login");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("body");
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let server = TestServer::start().await;

    let response = server
        .client
        .post(server.url("/api/projects"))
        .json(&json!({"title": "x", "category": "kuhinje"}))
        .send()
        .await
        .expect("unauthenticated create");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("body");
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let response = server
        .client
        .post(server.url("/api/auth/logout"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("logout");
    assert_eq!(response.status(), StatusCode::OK);

    let response = server
        .client
        .get(server.url("/api/auth/me"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("me after logout");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// Projects and slugs

#[tokio::test]
async fn test_slug_diacritics_and_collision() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let first = create_project(
        &server,
        &token,
        json!({"title": "Kuhinja Šišić & Čavlović", "category": "kuhinje"}),
    )
    .await;
    assert_eq!(first["slug"], "kuhinja-sisic-cavlovic");

    let second = create_project(
        &server,
        &token,
        json!({"title": "Kuhinja Šišić & Čavlović", "category": "kuhinje"}),
    )
    .await;
    assert_eq!(second["slug"], "kuhinja-sisic-cavlovic-1");

    let third = create_project(
        &server,
        &token,
        json!({"title": "Kuhinja Šišić & Čavlović", "category": "kuhinje"}),
    )
    .await;
    assert_eq!(third["slug"], "kuhinja-sisic-cavlovic-2");
}

#[tokio::test]
async fn test_slug_recomputed_only_on_title_change() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let project = create_project(
        &server,
        &token,
        json!({"title": "Hrastova vrata", "category": "vrata"}),
    )
    .await;
    let id = project["id"].as_str().unwrap();
    assert_eq!(project["slug"], "hrastova-vrata");

    // Unrelated update keeps the slug.
    let response = server
        .client
        .put(server.url(&format!("/api/projects/{id}")))
        .bearer_auth(&token)
        .json(&json!({"featured": true}))
        .send()
        .await
        .expect("update");
    let body: Value = response.json().await.expect("body");
    assert_eq!(body["slug"], "hrastova-vrata");
    assert_eq!(body["featured"], true);

    // Title change recomputes it.
    let response = server
        .client
        .put(server.url(&format!("/api/projects/{id}")))
        .bearer_auth(&token)
        .json(&json!({"title": "Jelova vrata"}))
        .send()
        .await
        .expect("update title");
    let body: Value = response.json().await.expect("body");
    assert_eq!(body["slug"], "jelova-vrata");
}

#[tokio::test]
async fn test_create_project_requires_title_and_category() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let response = server
        .client
        .post(server.url("/api/projects"))
        .bearer_auth(&token)
        .json(&json!({"category": "kuhinje"}))
        .send()
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("body");
    assert_eq!(body["error"], "Naslov je obavezan");

    let response = server
        .client
        .post(server.url("/api/projects"))
        .bearer_auth(&token)
        .json(&json!({"title": "Stol"}))
        .send()
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("body");
    assert_eq!(body["error"], "Kategorija je obavezna");
}

#[tokio::test]
async fn test_get_missing_project() {
    let server = TestServer::start().await;

    let response = server
        .client
        .get(server.url("/api/projects/nema-me"))
        .send()
        .await
        .expect("get");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("body");
    assert_eq!(body["error"], "Projekt nije pronađen");
}

#[tokio::test]
async fn test_list_projects_filters() {
    let server = TestServer::start().await;
    let token = server.login().await;

    create_project(
        &server,
        &token,
        json!({"title": "Kuhinja A", "category": "kuhinje", "featured": true}),
    )
    .await;
    create_project(
        &server,
        &token,
        json!({"title": "Vrata B", "category": "vrata"}),
    )
    .await;

    let all: Value = server
        .client
        .get(server.url("/api/projects"))
        .send()
        .await
        .expect("list")
        .json()
        .await
        .expect("body");
    assert_eq!(all.as_array().unwrap().len(), 2);

    let kitchens: Value = server
        .client
        .get(server.url("/api/projects?category=kuhinje"))
        .send()
        .await
        .expect("list")
        .json()
        .await
        .expect("body");
    assert_eq!(kitchens.as_array().unwrap().len(), 1);
    assert_eq!(kitchens[0]["title"], "Kuhinja A");

    let featured: Value = server
        .client
        .get(server.url("/api/projects?featured=true"))
        .send()
        .await
        .expect("list")
        .json()
        .await
        .expect("body");
    assert_eq!(featured.as_array().unwrap().len(), 1);
}

// Images and the cover invariant

#[tokio::test]
async fn test_first_cover_and_exclusive_handoff() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let project = create_project(
        &server,
        &token,
        json!({"title": "Galerija", "category": "ostalo"}),
    )
    .await;
    let project_id = project["id"].as_str().unwrap();

    let first = add_image(
        &server,
        &token,
        project_id,
        json!({"filename": "a.jpg", "path": "/images/projekti/a.jpg", "is_cover": true}),
    )
    .await;
    assert_eq!(first["is_cover"], true);

    let second = add_image(
        &server,
        &token,
        project_id,
        json!({"filename": "b.jpg", "path": "/images/projekti/b.jpg", "is_cover": true}),
    )
    .await;
    assert_eq!(second["is_cover"], true);

    let body = get_project(&server, project_id).await;
    let images = body["images"].as_array().unwrap();
    let covers: Vec<&Value> = images
        .iter()
        .filter(|i| i["is_cover"] == true)
        .collect();
    assert_eq!(covers.len(), 1);
    assert_eq!(covers[0]["id"], second["id"]);
}

#[tokio::test]
async fn test_cover_promotion_on_delete() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let project = create_project(
        &server,
        &token,
        json!({"title": "Galerija", "category": "ostalo"}),
    )
    .await;
    let project_id = project["id"].as_str().unwrap();

    let cover = add_image(
        &server,
        &token,
        project_id,
        json!({"filename": "a.jpg", "path": "/images/projekti/a.jpg", "is_cover": true}),
    )
    .await;
    let other = add_image(
        &server,
        &token,
        project_id,
        json!({"filename": "b.jpg", "path": "/images/projekti/b.jpg"}),
    )
    .await;

    let response = server
        .client
        .delete(server.url(&format!("/api/images/{}", cover["id"].as_str().unwrap())))
        .bearer_auth(&token)
        .send()
        .await
        .expect("delete image");
    assert_eq!(response.status(), StatusCode::OK);

    let body = get_project(&server, project_id).await;
    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["id"], other["id"]);
    assert_eq!(images[0]["is_cover"], true);
}

#[tokio::test]
async fn test_demoting_only_cover_keeps_a_cover() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let project = create_project(
        &server,
        &token,
        json!({"title": "Galerija", "category": "ostalo"}),
    )
    .await;
    let project_id = project["id"].as_str().unwrap();

    let cover = add_image(
        &server,
        &token,
        project_id,
        json!({"filename": "a.jpg", "path": "/images/projekti/a.jpg", "is_cover": true}),
    )
    .await;
    add_image(
        &server,
        &token,
        project_id,
        json!({"filename": "b.jpg", "path": "/images/projekti/b.jpg"}),
    )
    .await;

    let response = server
        .client
        .put(server.url(&format!("/api/images/{}", cover["id"].as_str().unwrap())))
        .bearer_auth(&token)
        .json(&json!({"is_cover": false}))
        .send()
        .await
        .expect("update image");
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.expect("image json");
    assert_eq!(updated["is_cover"], true);

    let body = get_project(&server, project_id).await;
    let covers: Vec<&Value> = body["images"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|i| i["is_cover"] == true)
        .collect();
    assert_eq!(covers.len(), 1);
    assert_eq!(covers[0]["id"], cover["id"]);
}

#[tokio::test]
async fn test_reorder_requires_images_array() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let project = create_project(
        &server,
        &token,
        json!({"title": "Galerija", "category": "ostalo"}),
    )
    .await;
    let project_id = project["id"].as_str().unwrap();

    let response = server
        .client
        .put(server.url(&format!("/api/projects/{project_id}/images")))
        .bearer_auth(&token)
        .json(&json!({"nope": 1}))
        .send()
        .await
        .expect("reorder");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("body");
    assert_eq!(body["error"], "images array je obavezan");
}

// Services

#[tokio::test]
async fn test_services_seeded_and_active_filter() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let services: Value = server
        .client
        .get(server.url("/api/services"))
        .send()
        .await
        .expect("list")
        .json()
        .await
        .expect("body");
    assert_eq!(services.as_array().unwrap().len(), 6);

    // Deactivate one and filter.
    let id = services[0]["id"].as_str().unwrap();
    let response = server
        .client
        .put(server.url(&format!("/api/services/{id}")))
        .bearer_auth(&token)
        .json(&json!({"active": false}))
        .send()
        .await
        .expect("update");
    assert_eq!(response.status(), StatusCode::OK);

    let active: Value = server
        .client
        .get(server.url("/api/services?active=true"))
        .send()
        .await
        .expect("list")
        .json()
        .await
        .expect("body");
    assert_eq!(active.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_service_unknown_icon_rejected() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let response = server
        .client
        .post(server.url("/api/services"))
        .bearer_auth(&token)
        .json(&json!({"name": "Nova usluga", "icon": "Rocket"}))
        .send()
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("body");
    assert!(body["error"].as_str().unwrap().contains("ikona"));
}

// Contact form and inquiries

#[tokio::test]
async fn test_contact_validation_errors_joined() {
    let server = TestServer::start().await;

    let response = server
        .client
        .post(server.url("/api/contact"))
        .json(&json!({"email": "nije-email", "message": "kratko"}))
        .send()
        .await
        .expect("contact");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("body");
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("Ime je obavezno"));
    assert!(error.contains("Email nije ispravan"));
    assert!(error.contains("najmanje 10 znakova"));
}

#[tokio::test]
async fn test_contact_creates_new_inquiry() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let response = server
        .client
        .post(server.url("/api/contact"))
        .json(&json!({
            "name": "Ana",
            "email": "ana@example.com",
            "message": "Trebam ponudu za kuhinju po mjeri.",
        }))
        .send()
        .await
        .expect("contact");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("body");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Poruka uspješno poslana");

    let id = body["id"].as_str().unwrap();
    let inquiry: Value = server
        .client
        .get(server.url(&format!("/api/inquiries/{id}")))
        .bearer_auth(&token)
        .send()
        .await
        .expect("get inquiry")
        .json()
        .await
        .expect("body");
    assert_eq!(inquiry["status"], "new");
    assert_eq!(inquiry["name"], "Ana");
}

#[tokio::test]
async fn test_inquiry_transition_rules() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let created: Value = server
        .client
        .post(server.url("/api/contact"))
        .json(&json!({
            "name": "Ana",
            "email": "ana@example.com",
            "message": "Trebam ponudu za kuhinju po mjeri.",
        }))
        .send()
        .await
        .expect("contact")
        .json()
        .await
        .expect("body");
    let id = created["id"].as_str().unwrap();

    let update = |status: &str| {
        let url = server.url(&format!("/api/inquiries/{id}"));
        let client = server.client.clone();
        let token = token.clone();
        let status = status.to_string();
        async move {
            client
                .put(url)
                .bearer_auth(&token)
                .json(&json!({"status": status}))
                .send()
                .await
                .expect("update inquiry")
        }
    };

    let response = update("replied").await;
    assert_eq!(response.status(), StatusCode::OK);

    // A replied inquiry cannot be reopened directly.
    let response = update("new").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = update("archived").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = update("new").await;
    assert_eq!(response.status(), StatusCode::OK);

    // Same-status update is a no-op, not an error.
    let response = update("new").await;
    assert_eq!(response.status(), StatusCode::OK);
}

// Settings

#[tokio::test]
async fn test_settings_batch_upsert_keeps_missing_keys() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let response = server
        .client
        .put(server.url("/api/settings"))
        .bearer_auth(&token)
        .json(&json!({"contact_email": "novi@example.hr"}))
        .send()
        .await
        .expect("update settings");
    assert_eq!(response.status(), StatusCode::OK);

    let settings: Value = response.json().await.expect("body");
    assert_eq!(settings["contact_email"], "novi@example.hr");
    // Seeded keys not named in the batch stay put.
    assert_eq!(
        settings["working_hours"],
        "Pon-Pet: 08:00-16:00, Sub: 08:00-12:00"
    );
}

#[tokio::test]
async fn test_settings_rejects_non_object() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let response = server
        .client
        .put(server.url("/api/settings"))
        .bearer_auth(&token)
        .json(&json!(["not", "an", "object"]))
        .send()
        .await
        .expect("update settings");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// Stats

#[tokio::test]
async fn test_stats_shape() {
    let server = TestServer::start().await;
    let token = server.login().await;

    create_project(
        &server,
        &token,
        json!({"title": "Projekt", "category": "ostalo"}),
    )
    .await;
    server
        .client
        .post(server.url("/api/contact"))
        .json(&json!({
            "name": "Ana",
            "email": "ana@example.com",
            "message": "Trebam ponudu za kuhinju po mjeri.",
        }))
        .send()
        .await
        .expect("contact");

    let stats: Value = server
        .client
        .get(server.url("/api/stats"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("stats")
        .json()
        .await
        .expect("body");

    assert_eq!(stats["stats"]["projects"], 1);
    assert_eq!(stats["stats"]["services"], 6);
    assert_eq!(stats["stats"]["newInquiries"], 1);
    assert_eq!(stats["stats"]["totalInquiries"], 1);
    assert_eq!(stats["recentInquiries"].as_array().unwrap().len(), 1);
    assert_eq!(stats["recentProjects"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_deleting_new_inquiry_decrements_count() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let created: Value = server
        .client
        .post(server.url("/api/contact"))
        .json(&json!({
            "name": "Ana",
            "email": "ana@example.com",
            "message": "Trebam ponudu za kuhinju po mjeri.",
        }))
        .send()
        .await
        .expect("contact")
        .json()
        .await
        .expect("body");
    let id = created["id"].as_str().unwrap();

    let stats: Value = server
        .client
        .get(server.url("/api/stats"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("stats")
        .json()
        .await
        .expect("body");
    assert_eq!(stats["stats"]["newInquiries"], 1);

    let response = server
        .client
        .delete(server.url(&format!("/api/inquiries/{id}")))
        .bearer_auth(&token)
        .send()
        .await
        .expect("delete inquiry");
    assert_eq!(response.status(), StatusCode::OK);

    let stats: Value = server
        .client
        .get(server.url("/api/stats"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("stats")
        .json()
        .await
        .expect("body");
    assert_eq!(stats["stats"]["newInquiries"], 0);
    assert_eq!(stats["stats"]["totalInquiries"], 0);
}

#[tokio::test]
async fn test_short_message_creates_no_inquiry() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let response = server
        .client
        .post(server.url("/api/contact"))
        .json(&json!({"name": "Ana", "email": "ana@example.com", "message": "kratko"}))
        .send()
        .await
        .expect("contact");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let inquiries: Value = server
        .client
        .get(server.url("/api/inquiries"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("list")
        .json()
        .await
        .expect("body");
    assert_eq!(inquiries.as_array().unwrap().len(), 0);
}

// Upload

#[tokio::test]
async fn test_upload_and_serve() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let form = reqwest::multipart::Form::new()
        .part(
            "file",
            reqwest::multipart::Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
                .file_name("kuhinja.jpg")
                .mime_str("image/jpeg")
                .unwrap(),
        )
        .text("folder", "projekti");

    let response = server
        .client
        .post(server.url("/api/upload"))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .expect("upload");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("body");
    assert_eq!(body["success"], true);
    assert_eq!(body["type"], "image/jpeg");
    let path = body["path"].as_str().unwrap();
    assert!(path.starts_with("/images/projekti/"));

    let served = server
        .client
        .get(server.url(path))
        .send()
        .await
        .expect("serve");
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(
        served.headers()["content-type"].to_str().unwrap(),
        "image/jpeg"
    );
}

#[tokio::test]
async fn test_upload_without_folder_uses_uploads() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let form = reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
            .file_name("slika.jpg")
            .mime_str("image/jpeg")
            .unwrap(),
    );

    let response = server
        .client
        .post(server.url("/api/upload"))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .expect("upload");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("body");
    assert!(body["path"].as_str().unwrap().starts_with("/images/uploads/"));
}

#[tokio::test]
async fn test_upload_rejects_disallowed_mime() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let form = reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(b"#!/bin/sh".to_vec())
            .file_name("skripta.sh")
            .mime_str("application/x-sh")
            .unwrap(),
    );

    let response = server
        .client
        .post(server.url("/api/upload"))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .expect("upload");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("body");
    assert!(body["error"].as_str().unwrap().contains("Nedozvoljeni tip"));
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let form = reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(vec![0u8; 10 * 1024 * 1024 + 1])
            .file_name("velika.jpg")
            .mime_str("image/jpeg")
            .unwrap(),
    );

    let response = server
        .client
        .post(server.url("/api/upload"))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .expect("upload");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("body");
    assert!(body["error"].as_str().unwrap().contains("prevelika"));
}

#[tokio::test]
async fn test_upload_requires_file_field() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let form = reqwest::multipart::Form::new().text("folder", "projekti");

    let response = server
        .client
        .post(server.url("/api/upload"))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .expect("upload");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("body");
    assert_eq!(body["error"], "Datoteka nije poslana");
}
