use serde_json::json;

use crate::common::{TestApp, routes};

mod bulk_add {
    use super::*;

    #[tokio::test]
    async fn scorer_can_submit_a_batch_with_lowercased_fields() {
        let app = TestApp::spawn().await;
        let admin = app.admin_token().await;
        let dept = app.create_department(&admin, "cse", "Computer Science").await;
        let token = app.create_user_with_role("judge", "judgepass", "scorer").await;

        let res = app
            .post_with_token(
                &routes::scores("arts"),
                &json!({
                    "participants": [
                        {
                            "name": " Asha MENON ",
                            "participant_code": "A102",
                            "event_code": "Solo-Dance",
                            "mark": 10,
                            "department_id": dept,
                            "position": 1,
                        },
                        {
                            "name": "Ravi",
                            "mark": 5,
                            "department_id": dept,
                        },
                    ],
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let created = res.body["created"].as_array().expect("created array");
        assert_eq!(created.len(), 2);
        assert_eq!(created[0]["name"], "asha menon");
        assert_eq!(created[0]["participant_code"], "a102");
        assert_eq!(created[0]["event_code"], "solo-dance");
        assert_eq!(created[0]["category"], "arts");
        assert_eq!(created[0]["department_code"], "cse");
        assert_eq!(created[1]["position"], 0);
        assert_eq!(created[1]["event_code"], "");
    }

    #[tokio::test]
    async fn negative_mark_rejects_the_whole_batch() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let dept = app.create_department(&token, "cse", "Computer Science").await;

        let res = app
            .post_with_token(
                &routes::scores("sports"),
                &json!({
                    "participants": [
                        {"name": "Asha", "mark": 10, "department_id": dept},
                        {"name": "Ravi", "mark": -1, "department_id": dept},
                    ],
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(
            res.body["message"]
                .as_str()
                .unwrap()
                .starts_with("participants[1]")
        );

        let list = app.get_without_token(&routes::scores("sports")).await;
        assert_eq!(list.body["pagination"]["total"], 0);
    }

    #[tokio::test]
    async fn unknown_department_rejects_the_whole_batch() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let dept = app.create_department(&token, "cse", "Computer Science").await;

        let res = app
            .post_with_token(
                &routes::scores("arts"),
                &json!({
                    "participants": [
                        {"name": "Asha", "mark": 10, "department_id": dept},
                        {"name": "Ravi", "mark": 4, "department_id": 999},
                    ],
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        let list = app.get_without_token(&routes::scores("arts")).await;
        assert_eq!(list.body["pagination"]["total"], 0);
    }

    #[tokio::test]
    async fn inactive_department_cannot_receive_scores() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let dept = app.create_department(&token, "cse", "Computer Science").await;
        app.delete_with_token(&routes::department(dept), &token).await;

        let res = app
            .post_with_token(
                &routes::scores("arts"),
                &json!({"participants": [{"name": "Asha", "mark": 10, "department_id": dept}]}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(&routes::scores("arts"), &json!({"participants": []}), &token)
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn unknown_category_is_a_validation_error() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(&routes::scores("music"), &json!({"participants": []}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn anonymous_submission_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(&routes::scores("arts"), &json!({"participants": []}))
            .await;

        assert_eq!(res.status, 401);
    }
}

mod list {
    use super::*;

    #[tokio::test]
    async fn filters_by_event_case_insensitively_and_sorts_by_mark() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let dept = app.create_department(&token, "cse", "Computer Science").await;

        let res = app
            .post_with_token(
                &routes::scores("sports"),
                &json!({
                    "participants": [
                        {"name": "a", "event_code": "100m", "mark": 3, "department_id": dept},
                        {"name": "b", "event_code": "100m", "mark": 9, "department_id": dept},
                        {"name": "c", "event_code": "relay", "mark": 5, "department_id": dept},
                    ],
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let res = app
            .get_without_token(&format!(
                "{}?event_code=100M&sort_by=mark&sort_order=desc",
                routes::scores("sports")
            ))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["pagination"]["total"], 2);
        let marks: Vec<i64> = res.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["mark"].as_i64().unwrap())
            .collect();
        assert_eq!(marks, [9, 3]);
    }

    #[tokio::test]
    async fn categories_are_listed_separately() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let dept = app.create_department(&token, "cse", "Computer Science").await;
        app.add_score(&token, "arts", dept, 10).await;

        let sports = app.get_without_token(&routes::scores("sports")).await;
        assert_eq!(sports.body["pagination"]["total"], 0);
        let arts = app.get_without_token(&routes::scores("arts")).await;
        assert_eq!(arts.body["pagination"]["total"], 1);
    }

    #[tokio::test]
    async fn unknown_sort_field_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_token(&format!("{}?sort_by=name", routes::scores("arts")))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_sort_order_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_token(&format!("{}?sort_order=sideways", routes::scores("arts")))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn page_far_past_the_end_is_empty() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let dept = app.create_department(&token, "cse", "Computer Science").await;
        app.add_score(&token, "arts", dept, 10).await;

        let res = app
            .get_without_token(&format!(
                "{}?page={}&per_page=200",
                routes::scores("arts"),
                u64::MAX
            ))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"], json!([]));
        assert_eq!(res.body["pagination"]["total"], 1);
    }

    #[tokio::test]
    async fn results_of_a_deactivated_department_stay_listed() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let dept = app.create_department(&token, "cse", "Computer Science").await;
        let id = app.add_score(&token, "arts", dept, 10).await;
        app.delete_with_token(&routes::department(dept), &token).await;

        let list = app.get_without_token(&routes::scores("arts")).await;
        assert_eq!(list.body["pagination"]["total"], 1);
        assert_eq!(list.body["data"][0]["department_name"], "Computer Science");

        let res = app.get_without_token(&routes::score("arts", id)).await;
        assert_eq!(res.status, 200);

        let table = app.get_without_token(&routes::point_table("arts")).await;
        assert_eq!(table.body, json!([]));
    }
}

mod update_and_delete {
    use super::*;

    #[tokio::test]
    async fn patch_corrects_a_mark() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let dept = app.create_department(&token, "cse", "Computer Science").await;
        let id = app.add_score(&token, "arts", dept, 10).await;

        let res = app
            .patch_with_token(&routes::score("arts", id), &json!({"mark": 7}), &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["mark"], 7);
        assert_eq!(res.body["department_name"], "Computer Science");
    }

    #[tokio::test]
    async fn patch_rejects_negative_mark() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let dept = app.create_department(&token, "cse", "Computer Science").await;
        let id = app.add_score(&token, "arts", dept, 10).await;

        let res = app
            .patch_with_token(&routes::score("arts", id), &json!({"mark": -3}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn score_is_not_reachable_under_the_other_category() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let dept = app.create_department(&token, "cse", "Computer Science").await;
        let id = app.add_score(&token, "arts", dept, 10).await;

        let res = app.get_without_token(&routes::score("sports", id)).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn deleted_score_disappears_from_reads() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let dept = app.create_department(&token, "cse", "Computer Science").await;
        let id = app.add_score(&token, "arts", dept, 10).await;

        let res = app.delete_with_token(&routes::score("arts", id), &token).await;
        assert_eq!(res.status, 204);

        let res = app.get_without_token(&routes::score("arts", id)).await;
        assert_eq!(res.status, 404);
        let res = app.delete_with_token(&routes::score("arts", id), &token).await;
        assert_eq!(res.status, 404);
        let list = app.get_without_token(&routes::scores("arts")).await;
        assert_eq!(list.body["pagination"]["total"], 0);
    }
}
