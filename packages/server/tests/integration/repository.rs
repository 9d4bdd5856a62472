use catalog_common::{
    EducationFilter, EducationLevel, EducationPayload, FilePayload, FileRole, PageQuery,
    ParentTable, ProjectFilter, ProjectPayload, ProjectType, SchoolPeriod, SkillCategory,
    SkillFilter, SkillPayload, SortBy, SortDirection,
};
use chrono::{TimeZone, Utc};
use sea_orm::{DbBackend, MockDatabase, TransactionTrait};

use catalog_server::repository::{
    EducationRepository, FileRepository, ProjectRepository, SkillRepository,
};

use crate::common::{BLURHASH, StepClock, memory_db};

fn project(title: &str, education_id: Option<&str>) -> ProjectPayload {
    ProjectPayload {
        blur_hash: BLURHASH.into(),
        title: title.into(),
        subtitle: "Subtitle".into(),
        description: "Description".into(),
        tags: vec!["rust".into()],
        project_type: ProjectType::Web,
        link: "https://example.com".into(),
        education_id: education_id.map(str::to_owned),
    }
}

fn education(name: &str) -> EducationPayload {
    EducationPayload {
        main_school: SchoolPeriod {
            link: None,
            name: name.into(),
            description: "Description".into(),
            logo: "https://cdn.example.com/logo.png".into(),
            blur_hash: BLURHASH.into(),
            honor: None,
            start_date: Some(Utc.with_ymd_and_hms(2018, 9, 1, 0, 0, 0).unwrap()),
            end_date: Some(Utc.with_ymd_and_hms(2022, 6, 30, 0, 0, 0).unwrap()),
        },
        school_periods: vec![],
        level: EducationLevel::College,
    }
}

fn attachment(parent_table: ParentTable, parent_id: &str, name: &str) -> FilePayload {
    FilePayload {
        parent_table,
        parent_id: parent_id.into(),
        role: FileRole::Image,
        name: name.into(),
        url: format!("https://cdn.example.com/{name}"),
        mime_type: "image/png".into(),
        size: 100,
    }
}

fn skill(label: &str) -> SkillPayload {
    SkillPayload {
        icon: "icon".into(),
        hex_color: "#fff".into(),
        label: label.into(),
        category: SkillCategory::Tools,
    }
}

mod file_repository {
    use super::*;

    #[tokio::test]
    async fn find_by_parents_prefills_every_requested_id() {
        let db = memory_db().await;
        let clock = StepClock::new();
        let projects = ProjectRepository::new(&db, &clock);
        let files = FileRepository::new(&db, &clock);

        let a = projects.create(&project("A", None)).await.unwrap();
        let b = projects.create(&project("B", None)).await.unwrap();
        files
            .create(&attachment(ParentTable::Projects, &a, "1.png"))
            .await
            .unwrap();
        files
            .create(&attachment(ParentTable::Projects, &a, "2.png"))
            .await
            .unwrap();

        let grouped = files
            .find_by_parents(ParentTable::Projects, &[a.clone(), b.clone()], FileRole::Image)
            .await
            .unwrap();

        assert_eq!(grouped.len(), 2);
        let names: Vec<&str> = grouped[&a].iter().map(|f| f.data.name.as_str()).collect();
        assert_eq!(names, ["2.png", "1.png"]);
        assert!(grouped[&b].is_empty());
    }

    #[tokio::test]
    async fn empty_batch_issues_no_query() {
        let db = MockDatabase::new(DbBackend::Postgres).into_connection();
        let clock = StepClock::new();

        let files = FileRepository::new(&db, &clock)
            .find_by_parents(ParentTable::Projects, &[], FileRole::Image)
            .await
            .unwrap();
        let projects = ProjectRepository::new(&db, &clock)
            .list_by_education_ids(&[])
            .await
            .unwrap();

        assert!(files.is_empty());
        assert!(projects.is_empty());
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn blank_parent_id_is_rejected() {
        let db = memory_db().await;
        let clock = StepClock::new();
        let files = FileRepository::new(&db, &clock);

        let err = files
            .find_by_parent(ParentTable::Projects, " ", FileRole::Image)
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let err = files
            .delete_by_parent(ParentTable::Educations, "")
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn delete_by_parent_is_scoped_to_owner_kind() {
        let db = memory_db().await;
        let clock = StepClock::new();
        let files = FileRepository::new(&db, &clock);
        let shared_id = "0191f6a0-7c5e-7a3b-8f00-000000000001";

        files
            .create(&attachment(ParentTable::Projects, shared_id, "p.png"))
            .await
            .unwrap();
        files
            .create(&attachment(ParentTable::Educations, shared_id, "e.png"))
            .await
            .unwrap();

        let removed = files
            .delete_by_parent(ParentTable::Projects, shared_id)
            .await
            .unwrap();
        assert_eq!(removed, 1);

        let left = files
            .find_by_parent(ParentTable::Educations, shared_id, FileRole::Image)
            .await
            .unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].data.name, "e.png");

        let removed = files
            .delete_by_parent(ParentTable::Projects, shared_id)
            .await
            .unwrap();
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn orphan_sweep_is_idempotent() {
        let db = memory_db().await;
        let clock = StepClock::new();
        let projects = ProjectRepository::new(&db, &clock);
        let files = FileRepository::new(&db, &clock);

        let kept = projects.create(&project("Kept", None)).await.unwrap();
        let gone = projects.create(&project("Gone", None)).await.unwrap();
        files
            .create(&attachment(ParentTable::Projects, &kept, "k.png"))
            .await
            .unwrap();
        files
            .create(&attachment(ParentTable::Projects, &gone, "g.png"))
            .await
            .unwrap();
        // Parent removed without its attachments.
        projects.delete(&gone).await.unwrap();

        assert_eq!(files.delete_orphans(ParentTable::Projects).await.unwrap(), 1);
        assert_eq!(files.delete_orphans(ParentTable::Projects).await.unwrap(), 0);

        let left = files
            .find_by_parent(ParentTable::Projects, &kept, FileRole::Image)
            .await
            .unwrap();
        assert_eq!(left.len(), 1);
    }

    #[tokio::test]
    async fn round_trips_attachment_fields() {
        let db = memory_db().await;
        let clock = StepClock::new();
        let files = FileRepository::new(&db, &clock);

        let mut payload = attachment(
            ParentTable::Educations,
            "0191f6a0-7c5e-7a3b-8f00-000000000001",
            " diploma scan.png ",
        );
        payload.url = "https://cdn.example.com/diploma%20scan.png ".into();

        let id = files.create(&payload).await.unwrap();
        let stored = files.find_by_id(&id).await.unwrap();
        assert_eq!(stored.data, payload);
    }

    #[tokio::test]
    async fn update_missing_row_returns_none() {
        let db = memory_db().await;
        let clock = StepClock::new();
        let files = FileRepository::new(&db, &clock);

        let updated = files
            .update(
                "0191f6a0-7c5e-7a3b-8f00-000000000009",
                &attachment(ParentTable::Projects, "0191f6a0-7c5e-7a3b-8f00-000000000001", "x.png"),
            )
            .await
            .unwrap();
        assert!(updated.is_none());

        let err = files
            .delete("0191f6a0-7c5e-7a3b-8f00-000000000009")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}

mod project_repository {
    use super::*;

    #[tokio::test]
    async fn list_by_education_ids_groups_and_prefills() {
        let db = memory_db().await;
        let clock = StepClock::new();
        let educations = EducationRepository::new(&db, &clock);
        let projects = ProjectRepository::new(&db, &clock);

        let uni = educations.create(&education("Uni")).await.unwrap();
        let school = educations.create(&education("School")).await.unwrap();
        projects.create(&project("Old", Some(&uni))).await.unwrap();
        projects.create(&project("New", Some(&uni))).await.unwrap();
        projects.create(&project("Loose", None)).await.unwrap();

        let grouped = projects
            .list_by_education_ids(&[uni.clone(), school.clone()])
            .await
            .unwrap();
        let titles: Vec<&str> = grouped[&uni].iter().map(|p| p.data.title.as_str()).collect();
        assert_eq!(titles, ["New", "Old"]);
        assert!(grouped[&school].is_empty());

        let single = projects.list_by_education_id(&uni).await.unwrap();
        assert_eq!(single.len(), 2);
    }

    #[tokio::test]
    async fn stores_fields_exactly_as_given() {
        let db = memory_db().await;
        let clock = StepClock::new();
        let projects = ProjectRepository::new(&db, &clock);

        let mut payload = project("  Padded title ", None);
        payload.subtitle = " sub ".into();
        payload.link = " https://example.com ".into();
        payload.tags = vec![" spaced tag ".into()];

        let id = projects.create(&payload).await.unwrap();
        let stored = projects.get(&id).await.unwrap();
        assert_eq!(stored.data, payload);

        payload.title = "\tRenamed ".into();
        let updated = projects.update(&id, &payload).await.unwrap().unwrap();
        assert_eq!(updated.data, payload);
    }

    #[tokio::test]
    async fn detach_education_keeps_projects() {
        let db = memory_db().await;
        let clock = StepClock::new();
        let educations = EducationRepository::new(&db, &clock);
        let projects = ProjectRepository::new(&db, &clock);

        let uni = educations.create(&education("Uni")).await.unwrap();
        let id = projects.create(&project("Linked", Some(&uni))).await.unwrap();
        let before = projects.get(&id).await.unwrap();

        assert_eq!(projects.detach_education(&uni).await.unwrap(), 1);

        let after = projects.get(&id).await.unwrap();
        assert_eq!(after.data.education_id, None);
        assert!(after.updated_at > before.updated_at);
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn count_ignores_paging() {
        let db = memory_db().await;
        let clock = StepClock::new();
        let projects = ProjectRepository::new(&db, &clock);
        for i in 0..5 {
            projects.create(&project(&format!("P{i}"), None)).await.unwrap();
        }

        let filter = ProjectFilter {
            page: PageQuery::new(Some(2), Some(2), None, None),
            project_type: None,
        };
        assert_eq!(projects.count(&filter).await.unwrap(), 5);

        let page = projects.list(&filter).await.unwrap();
        let titles: Vec<&str> = page.iter().map(|p| p.data.title.as_str()).collect();
        assert_eq!(titles, ["P2", "P1"]);

        let games = ProjectFilter {
            page: PageQuery::default(),
            project_type: Some(ProjectType::Game),
        };
        assert_eq!(projects.count(&games).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn blank_id_is_a_validation_error() {
        let db = memory_db().await;
        let clock = StepClock::new();

        let err = ProjectRepository::new(&db, &clock).get("").await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn rolled_back_transaction_writes_nothing() {
        let db = memory_db().await;
        let clock = StepClock::new();

        {
            let txn = db.begin().await.unwrap();
            ProjectRepository::new(&txn, &clock)
                .create(&project("Uncommitted", None))
                .await
                .unwrap();
            txn.rollback().await.unwrap();
        }

        let filter = ProjectFilter {
            page: PageQuery::default(),
            project_type: None,
        };
        assert_eq!(
            ProjectRepository::new(&db, &clock)
                .count(&filter)
                .await
                .unwrap(),
            0
        );
    }
}

mod education_repository {
    use super::*;

    #[tokio::test]
    async fn round_trips_school_periods() {
        let db = memory_db().await;
        let clock = StepClock::new();
        let educations = EducationRepository::new(&db, &clock);

        let mut payload = education("Uni");
        let mut exchange = payload.main_school.clone();
        exchange.name = "Exchange".into();
        exchange.honor = Some("Dean's list".into());
        payload.school_periods.push(exchange);

        let id = educations.create(&payload).await.unwrap();
        let stored = educations.get(&id).await.unwrap();

        assert_eq!(stored.data, payload);
        assert_eq!(stored.created_at, stored.updated_at);
    }

    #[tokio::test]
    async fn invalid_payload_is_not_written() {
        let db = memory_db().await;
        let clock = StepClock::new();
        let educations = EducationRepository::new(&db, &clock);

        let mut payload = education("Uni");
        payload.main_school.logo.clear();
        let err = educations.create(&payload).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to validate education: main school logo missing"
        );

        let filter = EducationFilter {
            page: PageQuery::default(),
        };
        assert_eq!(educations.count(&filter).await.unwrap(), 0);
    }
}

mod skill_repository {
    use super::*;

    #[tokio::test]
    async fn sorts_ascending_by_created_at() {
        let db = memory_db().await;
        let clock = StepClock::new();
        let skills = SkillRepository::new(&db, &clock);
        for label in ["a", "b", "c"] {
            skills.create(&skill(label)).await.unwrap();
        }

        let filter = SkillFilter {
            page: PageQuery::new(None, None, Some(SortBy::CreatedAt), Some(SortDirection::Asc)),
            category: Some(SkillCategory::Tools),
        };
        let labels: Vec<String> = skills
            .list(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.data.label)
            .collect();
        assert_eq!(labels, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn update_keeps_created_at() {
        let db = memory_db().await;
        let clock = StepClock::new();
        let skills = SkillRepository::new(&db, &clock);

        let id = skills.create(&skill("before")).await.unwrap();
        let created = skills.get(&id).await.unwrap();

        let updated = skills.update(&id, &skill("after")).await.unwrap().unwrap();
        assert_eq!(updated.data.label, "after");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }
}
