use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use sea_orm::{EntityTrait, PaginatorTrait};
use thoughts_server::entities::note;
use thoughts_server::web::create_app;
use tower::ServiceExt;

mod common;

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn can_run_note_lifecycle_through_pages() {
    let db = common::setup_db().await.expect("Failed to setup database");
    let app = create_app(db.clone());

    // Create
    let response = app
        .clone()
        .oneshot(post_form(
            "/notes",
            "title=Reading+list&description=+Dune+&tag=books",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/notes");

    let created = note::Entity::find().one(&db).await.unwrap().unwrap();
    assert_eq!(created.description.as_deref(), Some("Dune"));

    // List
    let listing = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/notes?tag=books&sort=desc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(listing.status(), StatusCode::OK);
    let body = common::body_text(listing).await;
    assert!(body.contains("<title>Notes - Thoughts</title>"));
    assert!(body.contains("<td>Reading list</td>"));
    assert!(body.contains("<td>Dune</td>"));

    // Edit
    let response = app
        .clone()
        .oneshot(post_form(
            &format!("/notes/edit/{}", created.id),
            "title=Reading+list+2026&description=Dune+Messiah&tag=",
        ))
        .await
        .unwrap();
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/notes");
    let edited = note::Entity::find_by_id(created.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(edited.title, "Reading list 2026");
    assert_eq!(edited.description.as_deref(), Some("Dune Messiah"));
    assert_eq!(edited.tag, None);
    assert_eq!(edited.created_at, created.created_at);

    // Delete
    let response = app
        .clone()
        .oneshot(post_form(&format!("/notes/delete/{}", created.id), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(note::Entity::find().count(&db).await.unwrap(), 0);

    let response = app
        .oneshot(post_form(&format!("/notes/delete/{}", created.id), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn can_ignore_blank_note_submissions() {
    let db = common::setup_db().await.expect("Failed to setup database");
    let app = create_app(db.clone());

    let response = app
        .oneshot(post_form("/notes", "title=%20%09&description=orphan"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(note::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn can_rerender_note_edit_form_for_blank_title() {
    let db = common::setup_db().await.expect("Failed to setup database");
    let app = create_app(db.clone());
    app.clone()
        .oneshot(post_form("/notes", "title=Keep+me&description=As+is"))
        .await
        .unwrap();
    let note = note::Entity::find().one(&db).await.unwrap().unwrap();

    let response = app
        .oneshot(post_form(
            &format!("/notes/edit/{}", note.id),
            "title=&description=Changed",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_text(response).await;
    assert!(body.contains("<h1>Edit note</h1>"));
    assert!(body.contains("<textarea name=\"description\">As is</textarea>"));
    let unchanged = note::Entity::find_by_id(note.id).one(&db).await.unwrap();
    assert_eq!(unchanged, Some(note));
}
