use serde_json::json;

use crate::common::{TestApp, routes, skill_body};

mod create_skill {
    use super::*;

    #[tokio::test]
    async fn accepts_short_and_long_hex_colors() {
        let app = TestApp::spawn().await;

        let long = app
            .create_skill(&skill_body("Rust", "#1a2b3c", "backend"))
            .await;
        let short = app.create_skill(&skill_body("Vue", "#abc", "frontend")).await;

        let res = app.get(&routes::skill(&long)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["hex_color"], "#1a2b3c");
        assert_eq!(res.body["category"], "backend");

        let res = app.get(&routes::skill(&short)).await;
        assert_eq!(res.body["hex_color"], "#abc");
    }

    #[tokio::test]
    async fn rejects_named_color() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::SKILLS, &skill_body("Rust", "red", "backend"))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
        assert!(
            res.message()
                .contains("hex color must be in format #RGB or #RRGGBB"),
            "{}",
            res.text
        );
    }

    #[tokio::test]
    async fn rejects_unknown_category() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::SKILLS, &skill_body("Rust", "#000", "languages"))
            .await;

        assert_eq!(res.status, 400);
        assert!(
            res.message().contains("category invalid = languages"),
            "{}",
            res.text
        );
    }
}

mod list_skills {
    use super::*;

    #[tokio::test]
    async fn filters_by_category() {
        let app = TestApp::spawn().await;
        app.create_skill(&skill_body("Rust", "#000", "backend")).await;
        app.create_skill(&skill_body("Go", "#00add8", "backend")).await;
        app.create_skill(&skill_body("Git", "#f05032", "tools")).await;

        let res = app.get(&format!("{}?category=backend", routes::SKILLS)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        let labels: Vec<&str> = res.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, ["Go", "Rust"]);
        assert_eq!(res.body["pagination"]["total"], 2);
    }

    #[tokio::test]
    async fn sorts_by_updated_at() {
        let app = TestApp::spawn().await;
        let first = app.create_skill(&skill_body("First", "#111", "tools")).await;
        app.create_skill(&skill_body("Second", "#222", "tools")).await;

        let res = app
            .put(&routes::skill(&first), &skill_body("First", "#333", "tools"))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let res = app.get(&format!("{}?sort_by=updated_at", routes::SKILLS)).await;
        let data = res.body["data"].as_array().unwrap();
        assert_eq!(data[0]["label"], "First");
        assert_eq!(data[0]["hex_color"], "#333");

        let res = app.get(routes::SKILLS).await;
        let data = res.body["data"].as_array().unwrap();
        assert_eq!(data[0]["label"], "Second");
    }
}

mod skill_lifecycle {
    use super::*;

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                &routes::skill("0191f6a0-7c5e-7a3b-8f00-000000000000"),
                &skill_body("Rust", "#000", "backend"),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let app = TestApp::spawn().await;
        let id = app.create_skill(&skill_body("Rust", "#000", "backend")).await;

        assert_eq!(app.delete(&routes::skill(&id)).await.status, 204);

        let res = app.get(&routes::skill(&id)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body, json!({"code": "NOT_FOUND", "message": format!("skill {id} not found")}));
    }
}
