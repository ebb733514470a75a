mod helpers;

use chrono::NaiveDate;
use helpers::setup::{spawn_app, TestApp, TestUser};
use mediscan_api_structs::{extract_timeline_events, get_timeline, get_timeline_stats};
use mediscan_domain::{EventType, Severity, ID};
use reqwest::StatusCode;
use serde_json::json;

const DISCHARGE_SUMMARY: &str = "City Hospital discharge summary
EVENT: 2023-04-02 Patient diagnosed with Type 2 Diabetes; prescribed Metformin 500 mg
EVENT: 2022-11-20 Knee surgery, severity high
EVENT: 2023-04-20 Follow-up visit, Metformin 500 mg continued";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn extract(app: &TestApp, user: &TestUser, text: &str) -> reqwest::Response {
    app.client
        .post(app.url("/timeline/extract"))
        .bearer_auth(&user.token)
        .json(&json!({
            "fileId": ID::new(),
            "hospital": "City Hospital",
            "textContent": text
        }))
        .send()
        .await
        .expect("To reach the server")
}

async fn get_timeline(
    app: &TestApp,
    user: &TestUser,
    query: &[(&str, &str)],
) -> reqwest::Response {
    app.client
        .get(app.url("/timeline"))
        .bearer_auth(&user.token)
        .query(query)
        .send()
        .await
        .expect("To reach the server")
}

#[actix_web::main]
#[test]
async fn test_extract_timeline_events() {
    let app = spawn_app().await;
    let user = app.create_user("patient@example.com").await;

    let res = extract(&app, &user, DISCHARGE_SUMMARY).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let events = res
        .json::<extract_timeline_events::APIResponse>()
        .await
        .unwrap()
        .events;
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].event_date, date(2023, 4, 2));
    assert_eq!(events[0].event_type, EventType::Diagnosis);
    assert_eq!(events[0].hospital, "City Hospital");
    assert_eq!(events[0].user_id, user.user.id);
    assert_eq!(events[0].medications[0].name, "Metformin");
    assert_eq!(events[1].event_type, EventType::Surgery);
    assert_eq!(events[1].severity, Severity::High);
    assert_eq!(events[2].event_type, EventType::FollowUp);
}

#[actix_web::main]
#[test]
async fn test_extract_without_markers_stores_default_event() {
    let app = spawn_app().await;
    let user = app.create_user("patient@example.com").await;

    let res = extract(&app, &user, "Scanned page without any recognizable events").await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let events = res
        .json::<extract_timeline_events::APIResponse>()
        .await
        .unwrap()
        .events;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, EventType::Test);
    assert_eq!(events[0].severity, Severity::Low);
    assert_eq!(events[0].description, "Medical document processed and archived");
    // The application clock is frozen at 2023-05-10
    assert_eq!(events[0].event_date, date(2023, 5, 10));
}

#[actix_web::main]
#[test]
async fn test_extract_rejects_short_text() {
    let app = spawn_app().await;
    let user = app.create_user("patient@example.com").await;

    let res = extract(&app, &user, "   too short   ").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = get_timeline(&app, &user, &[]).await;
    let timeline = res.json::<get_timeline::APIResponse>().await.unwrap();
    assert!(timeline.events.is_empty());
}

#[actix_web::main]
#[test]
async fn test_get_timeline() {
    let app = spawn_app().await;
    let user = app.create_user("patient@example.com").await;
    let other_user = app.create_user("other@example.com").await;
    extract(&app, &user, DISCHARGE_SUMMARY).await;
    extract(&app, &other_user, DISCHARGE_SUMMARY).await;

    let res = get_timeline(&app, &user, &[]).await;
    assert_eq!(res.status(), StatusCode::OK);
    let timeline = res.json::<get_timeline::APIResponse>().await.unwrap();
    let dates = timeline
        .events
        .iter()
        .map(|e| e.event_date)
        .collect::<Vec<_>>();
    assert_eq!(
        dates,
        vec![date(2023, 4, 20), date(2023, 4, 2), date(2022, 11, 20)]
    );
    assert_eq!(
        timeline.grouped.keys().copied().collect::<Vec<_>>(),
        vec![2022, 2023]
    );
    assert_eq!(timeline.grouped[&2022][&10].len(), 1);
    let april = &timeline.grouped[&2023][&3];
    assert_eq!(april.len(), 2);
    assert_eq!(april[0].event_date, date(2023, 4, 20));
}

#[actix_web::main]
#[test]
async fn test_get_filtered_timeline() {
    let app = spawn_app().await;
    let user = app.create_user("patient@example.com").await;
    extract(&app, &user, DISCHARGE_SUMMARY).await;

    let res = get_timeline(
        &app,
        &user,
        &[
            ("eventType", "Surgery"),
            ("severity", "All Severities"),
            ("hospital", "city hospital"),
        ],
    )
    .await;
    let timeline = res.json::<get_timeline::APIResponse>().await.unwrap();
    assert_eq!(timeline.events.len(), 1);
    assert_eq!(timeline.events[0].event_type, EventType::Surgery);

    let res = get_timeline(
        &app,
        &user,
        &[
            ("startDate", "2023-04-01"),
            ("endDate", "2023-04-30"),
            ("eventType", "All Types"),
            ("hospital", "All Hospitals"),
        ],
    )
    .await;
    let timeline = res.json::<get_timeline::APIResponse>().await.unwrap();
    assert_eq!(timeline.events.len(), 2);

    let res = get_timeline(&app, &user, &[("hospital", "Other Clinic")]).await;
    let timeline = res.json::<get_timeline::APIResponse>().await.unwrap();
    assert!(timeline.events.is_empty());

    let res = get_timeline(&app, &user, &[("eventType", "Checkup")]).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::main]
#[test]
async fn test_get_timeline_stats() {
    let app = spawn_app().await;
    let user = app.create_user("patient@example.com").await;
    extract(&app, &user, DISCHARGE_SUMMARY).await;

    let res = app
        .client
        .get(app.url("/timeline/stats"))
        .bearer_auth(&user.token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let stats = res.json::<get_timeline_stats::APIResponse>().await.unwrap();

    let counts = stats
        .stats
        .iter()
        .map(|s| (s.event_type, s.severity, s.count))
        .collect::<Vec<_>>();
    assert_eq!(
        counts,
        vec![
            (EventType::Diagnosis, Severity::Low, 1),
            (EventType::Surgery, Severity::High, 1),
            (EventType::FollowUp, Severity::Low, 1),
        ]
    );
    assert_eq!(stats.medications.len(), 1);
    assert_eq!(stats.medications[0].name, "Metformin");
    assert_eq!(stats.medications[0].occurrences, 2);
    assert_eq!(stats.medications[0].last_prescribed, date(2023, 4, 20));
}
