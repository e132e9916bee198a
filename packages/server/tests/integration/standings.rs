use serde_json::json;

use crate::common::{TestApp, routes};

/// arts {CS: 40, ME: 10}, sports {CS: 20, EE: 30}
async fn seed_example(app: &TestApp, token: &str) -> (i32, i32, i32) {
    let cs = app.create_department(token, "cs", "CS").await;
    let me = app.create_department(token, "me", "ME").await;
    let ee = app.create_department(token, "ee", "EE").await;

    app.add_score(token, "arts", cs, 25).await;
    app.add_score(token, "arts", cs, 15).await;
    app.add_score(token, "arts", me, 10).await;
    app.add_score(token, "sports", cs, 20).await;
    app.add_score(token, "sports", ee, 30).await;

    (cs, me, ee)
}

fn names(body: &serde_json::Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|e| e["name"].as_str().unwrap().to_string())
        .collect()
}

mod point_table {
    use super::*;

    #[tokio::test]
    async fn sums_marks_per_department() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        seed_example(&app, &token).await;

        let res = app.get_without_token(&routes::point_table("arts")).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(
            res.body,
            json!([
                {"department": "CS", "marks": 40},
                {"department": "ME", "marks": 10},
            ])
        );
    }

    #[tokio::test]
    async fn empty_category_is_an_empty_table() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::point_table("sports")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn unknown_category_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::point_table("music")).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod combined {
    use super::*;

    #[tokio::test]
    async fn merges_categories_and_ranks_by_total() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        seed_example(&app, &token).await;

        let res = app.get_without_token(routes::STANDINGS).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["view"], "total");
        assert_eq!(res.body["max_points"], 60);
        assert_eq!(names(&res.body), ["CS", "EE", "ME"]);

        let data = &res.body["data"];
        assert_eq!(data[0]["rank"], 1);
        assert_eq!(data[0]["arts_points"], 40);
        assert_eq!(data[0]["sports_points"], 20);
        assert_eq!(data[0]["total_points"], 60);
        assert_eq!(data[0]["ratio"], 1.0);
        assert_eq!(data[1]["arts_points"], 0);
        assert_eq!(data[1]["sports_points"], 30);
        assert_eq!(data[1]["ratio"], 0.5);
        assert_eq!(data[2]["sports_points"], 0);
        assert_eq!(data[2]["total_points"], 10);
    }

    #[tokio::test]
    async fn view_selects_the_ranking_metric() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        seed_example(&app, &token).await;

        let arts = app.get_without_token(&routes::standings_view("arts")).await;
        assert_eq!(arts.body["view"], "arts");
        assert_eq!(names(&arts.body), ["CS", "ME", "EE"]);
        assert_eq!(arts.body["data"][2]["ratio"], 0.0);

        let sports = app.get_without_token(&routes::standings_view("SPORTS")).await;
        assert_eq!(sports.status, 400);

        let sports = app.get_without_token(&routes::standings_view("sports")).await;
        assert_eq!(names(&sports.body), ["EE", "CS", "ME"]);
        assert_eq!(sports.body["max_points"], 30);
    }

    #[tokio::test]
    async fn colors_follow_arts_participation() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        seed_example(&app, &token).await;

        let res = app.get_without_token(routes::STANDINGS).await;

        assert_eq!(res.body["data"][0]["color"], "#7f1d1d");
        assert_eq!(res.body["data"][1]["color"], "#991b1b");
        assert_eq!(res.body["data"][0]["short_name"], "CS");
    }

    #[tokio::test]
    async fn all_zero_board_has_zero_ratios() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let cs = app.create_department(&token, "cs", "CS").await;
        let me = app.create_department(&token, "me", "ME").await;
        app.add_score(&token, "arts", cs, 0).await;
        app.add_score(&token, "sports", me, 0).await;

        let res = app.get_without_token(routes::STANDINGS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["max_points"], 0);
        for entry in res.body["data"].as_array().unwrap() {
            assert_eq!(entry["ratio"], 0.0);
        }
        assert_eq!(names(&res.body), ["CS", "ME"]);
    }

    #[tokio::test]
    async fn empty_store_is_an_empty_board() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::STANDINGS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"], json!([]));
        assert_eq!(res.body["max_points"], 0);
    }

    #[tokio::test]
    async fn repeated_reads_are_identical() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        seed_example(&app, &token).await;

        let first = app.get_without_token(routes::STANDINGS).await;
        let second = app.get_without_token(routes::STANDINGS).await;

        assert_eq!(first.body, second.body);
    }
}

mod soft_deletes {
    use super::*;

    #[tokio::test]
    async fn deleted_scores_stop_counting() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let cs = app.create_department(&token, "cs", "CS").await;
        app.add_score(&token, "arts", cs, 25).await;
        let withdrawn = app.add_score(&token, "arts", cs, 15).await;

        app.delete_with_token(&routes::score("arts", withdrawn), &token)
            .await;

        let res = app.get_without_token(&routes::point_table("arts")).await;
        assert_eq!(res.body, json!([{"department": "CS", "marks": 25}]));
    }

    #[tokio::test]
    async fn inactive_departments_drop_off_the_board() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let (cs, _, _) = seed_example(&app, &token).await;

        let res = app.delete_with_token(&routes::department(cs), &token).await;
        assert_eq!(res.status, 204);

        let res = app.get_without_token(routes::STANDINGS).await;
        assert_eq!(names(&res.body), ["EE", "ME"]);
        assert_eq!(res.body["max_points"], 30);
    }

    #[tokio::test]
    async fn corrected_marks_are_reflected_immediately() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let cs = app.create_department(&token, "cs", "CS").await;
        let ee = app.create_department(&token, "ee", "EE").await;
        let id = app.add_score(&token, "sports", cs, 5).await;
        app.add_score(&token, "sports", ee, 10).await;

        app.patch_with_token(&routes::score("sports", id), &json!({"mark": 50}), &token)
            .await;

        let res = app.get_without_token(&routes::standings_view("sports")).await;
        assert_eq!(names(&res.body), ["CS", "EE"]);
        assert_eq!(res.body["data"][1]["ratio"], 0.2);
    }
}
