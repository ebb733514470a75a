mod helpers;

use helpers::setup::spawn_app;
use mediscan_api_structs::{calculate_bmi, get_profile, get_service_health};
use mediscan_domain::BmiCategory;
use reqwest::StatusCode;
use serde_json::json;

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let app = spawn_app().await;
    let res = app
        .client
        .get(app.url("/"))
        .send()
        .await
        .expect("To reach the server");
    assert_eq!(res.status(), StatusCode::OK);
    let body = res
        .json::<get_service_health::APIResponse>()
        .await
        .expect("To parse body");
    assert!(!body.message.is_empty());
}

#[actix_web::main]
#[test]
async fn test_requests_without_valid_token_are_rejected() {
    let app = spawn_app().await;

    let res = app.client.get(app.url("/profile")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app
        .client
        .get(app.url("/profile"))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::main]
#[test]
async fn test_token_of_unknown_user_is_rejected() {
    let app = spawn_app().await;
    let token = mediscan_api::create_token(&Default::default(), &app.config.jwt_secret).unwrap();
    let res = app
        .client
        .get(app.url("/profile"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::main]
#[test]
async fn test_token_cookie_is_accepted() {
    let app = spawn_app().await;
    let user = app.create_user("cookie@example.com").await;
    let res = app
        .client
        .get(app.url("/profile"))
        .header("Cookie", format!("token={}", user.token))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::main]
#[test]
async fn test_add_vitals() {
    let app = spawn_app().await;
    let user = app.create_user("patient@example.com").await;

    let res = app
        .client
        .post(app.url("/profile/vitals"))
        .bearer_auth(&user.token)
        .json(&json!({
            "vitals": [
                { "date": 1000, "weight": 72.5, "bloodPressure": "120/80" },
                { "sugar": 95.0 }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .client
        .get(app.url("/profile"))
        .bearer_auth(&user.token)
        .send()
        .await
        .unwrap();
    let profile = res.json::<get_profile::APIResponse>().await.unwrap();
    assert_eq!(profile.user.email, "patient@example.com");
    assert_eq!(profile.user.vitals.len(), 2);
    assert_eq!(profile.user.vitals[0].date, 1000);
    assert_eq!(
        profile.user.vitals[0].blood_pressure.as_deref(),
        Some("120/80")
    );
    // Vitals without a date are logged now
    assert_eq!(profile.user.vitals[1].date, helpers::setup::NOW);
    assert_eq!(profile.user.vitals[1].sugar, Some(95.0));
}

#[actix_web::main]
#[test]
async fn test_calculate_bmi() {
    let app = spawn_app().await;
    let user = app.create_user("patient@example.com").await;

    let res = app
        .client
        .post(app.url("/bmi"))
        .bearer_auth(&user.token)
        .json(&json!({ "height": 170.0, "weight": 65.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<calculate_bmi::APIResponse>().await.unwrap();
    assert_eq!(body.bmi, 22.49);
    assert_eq!(body.category, BmiCategory::Normal);

    let res = app
        .client
        .post(app.url("/bmi"))
        .bearer_auth(&user.token)
        .json(&json!({ "height": 0.0, "weight": 65.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
