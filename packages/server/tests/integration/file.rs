use serde_json::json;

use crate::common::{TestApp, file_body, project_body, routes};

mod create_file {
    use super::*;

    #[tokio::test]
    async fn attaches_to_existing_project() {
        let app = TestApp::spawn().await;
        let project_id = app.create_project(&project_body("Owner")).await;

        let res = app
            .post(routes::FILES, &file_body("projects", &project_id, "shot.png"))
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let file_id = res.id();

        let res = app.get(&routes::file(&file_id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "shot.png");
        assert_eq!(res.body["type"], "image/png");
        assert_eq!(res.body["size"], 512);

        let res = app.get(&routes::project(&project_id)).await;
        assert_eq!(res.body["previews"][0]["id"], file_id.as_str());
    }

    #[tokio::test]
    async fn missing_owner_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::FILES,
                &file_body("projects", "0191f6a0-7c5e-7a3b-8f00-000000000000", "x.png"),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn rejects_bad_metadata() {
        let app = TestApp::spawn().await;
        let project_id = app.create_project(&project_body("Owner")).await;

        let mut body = file_body("projects", &project_id, "x.png");
        body["parent_id"] = json!("nope");
        let res = app.post(routes::FILES, &body).await;
        assert_eq!(res.status, 400);
        assert!(res.message().contains("parent_id invalid"), "{}", res.text);

        let mut body = file_body("projects", &project_id, "x.png");
        body["size"] = json!(-1);
        let res = app.post(routes::FILES, &body).await;
        assert_eq!(res.status, 400);
        assert!(
            res.message().contains("size must be greater than 0"),
            "{}",
            res.text
        );

        let mut body = file_body("projects", &project_id, "x.png");
        body["parent_table"] = json!("users");
        let res = app.post(routes::FILES, &body).await;
        assert_eq!(res.status, 400);
        assert!(
            res.message().contains("parent_table invalid = users"),
            "{}",
            res.text
        );
    }
}

mod files_by_parent {
    use super::*;

    #[tokio::test]
    async fn list_requires_selector() {
        let app = TestApp::spawn().await;

        let res = app.get(&format!("{}?parent_table=projects", routes::FILES)).await;

        assert_eq!(res.status, 400);
        assert!(res.message().contains("parent_id missing"), "{}", res.text);
    }

    #[tokio::test]
    async fn delete_by_parent_reports_count() {
        let app = TestApp::spawn().await;
        let project_id = app.create_project(&project_body("Owner")).await;
        for name in ["a.png", "b.png", "c.png"] {
            let res = app
                .post(routes::FILES, &file_body("projects", &project_id, name))
                .await;
            assert_eq!(res.status, 201, "{}", res.text);
        }

        let selector = format!(
            "{}?parent_table=projects&parent_id={}",
            routes::FILES,
            project_id
        );
        let res = app.delete(&selector).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["deleted"], 3);

        // Nothing left: still a success.
        let res = app.delete(&selector).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["deleted"], 0);

        let res = app.get(&routes::files_of("projects", &project_id)).await;
        assert!(res.body.as_array().unwrap().is_empty());
    }
}

mod file_lifecycle {
    use super::*;

    #[tokio::test]
    async fn update_and_delete() {
        let app = TestApp::spawn().await;
        let project_id = app.create_project(&project_body("Owner")).await;
        let res = app
            .post(routes::FILES, &file_body("projects", &project_id, "old.png"))
            .await;
        let file_id = res.id();

        let res = app
            .put(
                &routes::file(&file_id),
                &file_body("projects", &project_id, "new.png"),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["name"], "new.png");

        assert_eq!(app.delete(&routes::file(&file_id)).await.status, 204);
        assert_eq!(app.get(&routes::file(&file_id)).await.status, 404);
        assert_eq!(app.delete(&routes::file(&file_id)).await.status, 404);
    }

    #[tokio::test]
    async fn update_cannot_move_to_missing_owner() {
        let app = TestApp::spawn().await;
        let project_id = app.create_project(&project_body("Owner")).await;
        let res = app
            .post(routes::FILES, &file_body("projects", &project_id, "a.png"))
            .await;
        let file_id = res.id();

        let res = app
            .put(
                &routes::file(&file_id),
                &file_body("educations", "0191f6a0-7c5e-7a3b-8f00-00000000dead", "a.png"),
            )
            .await;
        assert_eq!(res.status, 404, "{}", res.text);
        assert_eq!(res.code(), "NOT_FOUND");

        let res = app.get(&routes::file(&file_id)).await;
        assert_eq!(res.body["parent_table"], "projects");
        assert_eq!(res.body["parent_id"], project_id.as_str());
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let app = TestApp::spawn().await;
        let project_id = app.create_project(&project_body("Owner")).await;

        let res = app
            .put(
                &routes::file("0191f6a0-7c5e-7a3b-8f00-000000000000"),
                &file_body("projects", &project_id, "x.png"),
            )
            .await;

        assert_eq!(res.status, 404);
    }
}
