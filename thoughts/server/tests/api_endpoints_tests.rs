use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use insta::assert_json_snapshot;
use thoughts_server::note::NoteService;
use thoughts_server::record::RecordDraft;
use thoughts_server::todo::TodoService;
use thoughts_server::web::create_app;
use tower::ServiceExt;

mod common;

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn draft(title: &str) -> RecordDraft {
    RecordDraft::new(title, "", "").unwrap()
}

#[tokio::test]
async fn can_return_empty_list_for_blank_query() {
    let db = common::setup_db().await.expect("Failed to setup database");
    TodoService::new(&db).create(draft("Shopping list")).await.unwrap();
    let app = create_app(db);

    let (status, missing) = get_json(app.clone(), "/api/search_todo").await;
    assert_eq!(status, StatusCode::OK);
    assert_json_snapshot!(missing, @"[]");

    let (_, blank) = get_json(app, "/api/search_todo?q=%20%20").await;
    assert_json_snapshot!(blank, @"[]");
}

#[tokio::test]
async fn can_search_todo_titles() {
    let db = common::setup_db().await.expect("Failed to setup database");
    let todo_service = TodoService::new(&db);
    todo_service.create(draft("Shopping list")).await.unwrap();
    todo_service.create(draft("Call mom")).await.unwrap();
    todo_service.create(draft("LISTEN to podcast")).await.unwrap();
    let app = create_app(db);

    let (status, matches) = get_json(app, "/api/search_todo?q=lis").await;

    assert_eq!(status, StatusCode::OK);
    assert_json_snapshot!(matches, @r#"
    [
      {
        "id": 1,
        "title": "Shopping list"
      },
      {
        "id": 3,
        "title": "LISTEN to podcast"
      }
    ]
    "#);
}

#[tokio::test]
async fn can_search_note_titles() {
    let db = common::setup_db().await.expect("Failed to setup database");
    let note_service = NoteService::new(&db);
    note_service.create(draft("Checklist")).await.unwrap();
    note_service.create(draft("Travel plans")).await.unwrap();
    TodoService::new(&db).create(draft("Todo list")).await.unwrap();
    let app = create_app(db);

    let (status, matches) = get_json(app, "/api/search_notes?q=LIST").await;

    assert_eq!(status, StatusCode::OK);
    assert_json_snapshot!(matches, @r#"
    [
      {
        "id": 1,
        "title": "Checklist"
      }
    ]
    "#);
}

#[tokio::test]
async fn can_serve_openapi_document() {
    let db = common::setup_db().await.expect("Failed to setup database");
    let app = create_app(db);

    let (status, document) = get_json(app, "/api/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(document["paths"]["/api/search_todo"]["get"].is_object());
    assert!(document["paths"]["/api/search_notes"]["get"].is_object());
    assert!(document["components"]["schemas"]["TitleMatch"].is_object());
}
