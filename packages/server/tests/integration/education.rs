use serde_json::json;
use uuid::Uuid;

use crate::common::{TestApp, education_body, preview_body, project_body, routes, school_body};

mod create_education {
    use super::*;

    #[tokio::test]
    async fn create_and_fetch() {
        let app = TestApp::spawn().await;
        let mut body = education_body("State University");
        body["school_periods"] = json!([school_body("Exchange Semester")]);
        body["main_school"]["honor"] = json!("Cum laude");

        let id = app.create_education(&body).await;
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok(), "not a uuid: {id}");

        let res = app.get(&routes::education(&id)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["id"], id.as_str());
        assert_eq!(res.body["level"], "college");
        assert_eq!(res.body["main_school"]["name"], "State University");
        assert_eq!(res.body["main_school"]["honor"], "Cum laude");
        assert_eq!(res.body["school_periods"][0]["name"], "Exchange Semester");
        assert!(res.body["projects"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn main_school_name_missing() {
        let app = TestApp::spawn().await;
        let mut body = education_body("x");
        body["main_school"]["name"] = json!("");

        let res = app.post(routes::EDUCATIONS, &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
        assert!(
            res.message().contains("main school name missing"),
            "{}",
            res.text
        );
    }

    #[tokio::test]
    async fn main_school_absent() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::EDUCATIONS, &json!({"level": "college"}))
            .await;

        assert_eq!(res.status, 400);
        assert!(res.message().contains("main school missing"), "{}", res.text);
    }

    #[tokio::test]
    async fn school_period_errors_name_the_index() {
        let app = TestApp::spawn().await;
        let mut second = school_body("Summer");
        second["end_date"] = json!("2010-01-01T00:00:00Z");
        let mut body = education_body("Main");
        body["school_periods"] = json!([school_body("Exchange"), second]);

        let res = app.post(routes::EDUCATIONS, &body).await;

        assert_eq!(res.status, 400);
        assert!(
            res.message()
                .contains("school period[1] end date must be after start date"),
            "{}",
            res.text
        );
    }

    #[tokio::test]
    async fn level_aliases_and_unknown_level() {
        let app = TestApp::spawn().await;
        let mut body = education_body("Junior High");
        body["level"] = json!("junior-high");
        let id = app.create_education(&body).await;
        let res = app.get(&routes::education(&id)).await;
        assert_eq!(res.body["level"], "junior-high-school");

        body["level"] = json!("kindergarten");
        let res = app.post(routes::EDUCATIONS, &body).await;
        assert_eq!(res.status, 400);
        assert!(
            res.message().contains("level invalid = kindergarten"),
            "{}",
            res.text
        );
    }
}

mod education_projects {
    use super::*;

    #[tokio::test]
    async fn get_includes_linked_projects_with_previews() {
        let app = TestApp::spawn().await;
        let education_id = app.create_education(&education_body("Uni")).await;

        let mut linked = project_body("Thesis");
        linked["education_id"] = json!(education_id);
        linked["previews"] = json!([preview_body("poster.png")]);
        app.create_project(&linked).await;
        app.create_project(&project_body("Unrelated")).await;

        let res = app.get(&routes::education(&education_id)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        let projects = res.body["projects"].as_array().unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0]["title"], "Thesis");
        assert_eq!(projects[0]["previews"][0]["name"], "poster.png");
    }

    #[tokio::test]
    async fn list_groups_projects_per_education() {
        let app = TestApp::spawn().await;
        let first = app.create_education(&education_body("First")).await;
        let second = app.create_education(&education_body("Second")).await;
        let empty = app.create_education(&education_body("Empty")).await;

        for (title, education_id) in [("A", &first), ("B", &first), ("C", &second)] {
            let mut body = project_body(title);
            body["education_id"] = json!(education_id);
            app.create_project(&body).await;
        }

        let res = app.get(routes::EDUCATIONS).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["pagination"]["total"], 3);

        let data = res.body["data"].as_array().unwrap();
        let projects_of = |id: &str| -> Vec<String> {
            let education = data.iter().find(|e| e["id"] == id).unwrap();
            education["projects"]
                .as_array()
                .unwrap()
                .iter()
                .map(|p| p["title"].as_str().unwrap().to_string())
                .collect()
        };
        assert_eq!(projects_of(first.as_str()), ["B", "A"]);
        assert_eq!(projects_of(second.as_str()), ["C"]);
        assert!(projects_of(empty.as_str()).is_empty());
    }
}

mod delete_education {
    use super::*;

    #[tokio::test]
    async fn detaches_projects_and_removes_attachments() {
        let app = TestApp::spawn().await;
        let education_id = app.create_education(&education_body("Gone")).await;

        let mut body = project_body("Survivor");
        body["education_id"] = json!(education_id);
        let project_id = app.create_project(&body).await;

        let res = app
            .post(
                routes::FILES,
                &crate::common::file_body("educations", &education_id, "diploma.png"),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let res = app.delete(&routes::education(&education_id)).await;
        assert_eq!(res.status, 204);

        assert_eq!(app.get(&routes::education(&education_id)).await.status, 404);

        let res = app.get(&routes::project(&project_id)).await;
        assert_eq!(res.status, 200);
        assert!(res.body.get("education_id").is_none());

        let res = app.get(&routes::files_of("educations", &education_id)).await;
        assert!(res.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .delete(&routes::education("0191f6a0-7c5e-7a3b-8f00-000000000000"))
            .await;

        assert_eq!(res.status, 404);
    }
}

#[tokio::test]
async fn update_replaces_periods() {
    let app = TestApp::spawn().await;
    let mut body = education_body("Uni");
    body["school_periods"] = json!([school_body("Exchange")]);
    let id = app.create_education(&body).await;

    body["school_periods"] = json!([]);
    body["level"] = json!("senior-high-school");
    let res = app.put(&routes::education(&id), &body).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert!(res.body["school_periods"].as_array().unwrap().is_empty());
    assert_eq!(res.body["level"], "senior-high-school");
}
