mod common;

use actix_web::test;
use querydesk_server::routes::configure_routes;

use common::TestApp;

#[actix_rt::test]
async fn test_get_form_data_empty() {
    let test_app = TestApp::new();

    let service = test::init_service(
        actix_web::App::new()
            .app_data(test_app.app_state().clone())
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/form-data").to_request();
    let resp = test::call_service(&service, req).await;

    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["formData"].as_array().unwrap().len(), 0);
}

#[actix_rt::test]
async fn test_rows_without_query_list_null() {
    let test_app = TestApp::new();
    let plain = test_app.seed_form_data("Q1", "A1");
    let annotated = test_app.seed_form_data("Q2", "A2");
    let query = test_app.seed_query(&annotated.id, "Query for Q2");

    let service = test::init_service(
        actix_web::App::new()
            .app_data(test_app.app_state().clone())
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/form-data").to_request();
    let resp = test::call_service(&service, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 2);

    let rows = body["formData"].as_array().unwrap();
    assert_eq!(rows[0]["id"], plain.id.as_str());
    assert_eq!(rows[0]["question"], "Q1");
    assert_eq!(rows[0]["answer"], "A1");
    assert!(rows[0]["query"].is_null());

    assert_eq!(rows[1]["id"], annotated.id.as_str());
    assert_eq!(rows[1]["query"]["id"], query.id.as_str());
    assert_eq!(rows[1]["query"]["status"], "OPEN");
    assert_eq!(rows[1]["query"]["formDataId"], annotated.id.as_str());
}

#[actix_rt::test]
async fn test_health_check() {
    let test_app = TestApp::new();

    let service = test::init_service(
        actix_web::App::new()
            .app_data(test_app.app_state().clone())
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&service, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert!(body["version"].as_str().is_some());
}
