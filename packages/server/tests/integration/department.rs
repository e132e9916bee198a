use serde_json::json;

use crate::common::{TestApp, routes};

mod create {
    use super::*;

    #[tokio::test]
    async fn admin_can_create_a_department_with_a_normalized_code() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::DEPARTMENTS,
                &json!({"code": "  CSE ", "name": "Computer Science"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["code"], "cse");
        assert_eq!(res.body["name"], "Computer Science");
        assert_eq!(res.body["is_active"], true);
    }

    #[tokio::test]
    async fn duplicate_code_is_a_conflict_regardless_of_case() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        app.create_department(&token, "cse", "Computer Science").await;

        let res = app
            .post_with_token(
                routes::DEPARTMENTS,
                &json!({"code": "CSE", "name": "Another"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::DEPARTMENTS,
                &json!({"code": "me", "name": "  "}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn scorer_cannot_create_departments() {
        let app = TestApp::spawn().await;
        let token = app.create_user_with_role("judge", "judgepass", "scorer").await;

        let res = app
            .post_with_token(
                routes::DEPARTMENTS,
                &json!({"code": "me", "name": "Mechanical"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn anonymous_request_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::DEPARTMENTS,
                &json!({"code": "me", "name": "Mechanical"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }
}

mod read {
    use super::*;

    #[tokio::test]
    async fn list_is_public_and_ordered_by_name() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        app.create_department(&token, "me", "Mechanical").await;
        app.create_department(&token, "cse", "Computer Science").await;
        app.create_department(&token, "ee", "Electrical").await;

        let res = app.get_without_token(routes::DEPARTMENTS).await;

        assert_eq!(res.status, 200);
        let names: Vec<&str> = res
            .body
            .as_array()
            .expect("list should be an array")
            .iter()
            .map(|d| d["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Computer Science", "Electrical", "Mechanical"]);
    }

    #[tokio::test]
    async fn get_unknown_department_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::department(999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn patch_changes_only_the_given_fields() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_department(&token, "cse", "Computer Science").await;

        let res = app
            .patch_with_token(
                &routes::department(id),
                &json!({"name": "Computer Engineering"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["code"], "cse");
        assert_eq!(res.body["name"], "Computer Engineering");
    }

    #[tokio::test]
    async fn empty_patch_returns_the_current_record() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_department(&token, "cse", "Computer Science").await;

        let res = app
            .patch_with_token(&routes::department(id), &json!({}), &token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Computer Science");
    }

    #[tokio::test]
    async fn renaming_to_a_taken_code_is_a_conflict() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        app.create_department(&token, "cse", "Computer Science").await;
        let id = app.create_department(&token, "me", "Mechanical").await;

        let res = app
            .patch_with_token(&routes::department(id), &json!({"code": "CSE"}), &token)
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn deleted_department_disappears_and_can_be_restored() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_department(&token, "cse", "Computer Science").await;

        let res = app.delete_with_token(&routes::department(id), &token).await;
        assert_eq!(res.status, 204);

        let res = app.get_without_token(&routes::department(id)).await;
        assert_eq!(res.status, 404);
        let list = app.get_without_token(routes::DEPARTMENTS).await;
        assert_eq!(list.body, json!([]));

        let res = app.delete_with_token(&routes::department(id), &token).await;
        assert_eq!(res.status, 404);

        let res = app
            .patch_with_token(&routes::department(id), &json!({"is_active": true}), &token)
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["is_active"], true);
        let res = app.get_without_token(&routes::department(id)).await;
        assert_eq!(res.status, 200);
    }

    #[tokio::test]
    async fn code_of_a_deleted_department_stays_reserved() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_department(&token, "cse", "Computer Science").await;
        app.delete_with_token(&routes::department(id), &token).await;

        let res = app
            .post_with_token(
                routes::DEPARTMENTS,
                &json!({"code": "cse", "name": "Computer Science"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 409);
    }
}
