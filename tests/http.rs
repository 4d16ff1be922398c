use std::path::Path;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;
use tower::ServiceExt;

use wikid::{app, AppState, Page, PageStore, Templates};

struct TestWiki {
    _dir: TempDir,
    store: PageStore,
    router: Router,
}

fn wiki() -> TestWiki {
    let dir = tempfile::tempdir().unwrap();
    let store = PageStore::new(dir.path().join("data"));
    let templates = Templates::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("tmpl")).unwrap();
    let router = app(AppState::new(store.clone(), templates, "FrontPage"));
    TestWiki { _dir: dir, store, router }
}

async fn get(router: &Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router.clone().oneshot(request).await.unwrap()
}

async fn post_form(router: &Router, uri: &str, form: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    router.clone().oneshot(request).await.unwrap()
}

fn location(resp: &Response) -> &str {
    resp.headers()[header::LOCATION].to_str().unwrap()
}

async fn text(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn root_redirects_to_front_page() {
    let wiki = wiki();
    let resp = get(&wiki.router, "/").await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/view/FrontPage");
}

#[tokio::test]
async fn viewing_a_missing_page_redirects_to_edit() {
    let wiki = wiki();
    let resp = get(&wiki.router, "/view/FooBar").await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/edit/FooBar");
}

#[tokio::test]
async fn editing_a_never_saved_page_shows_an_empty_form() {
    let wiki = wiki();
    let resp = get(&wiki.router, "/edit/123").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let html = text(resp).await;
    assert!(html.contains(r#"action="/save/123""#));
    assert!(html.contains("></textarea>"));
}

#[tokio::test]
async fn view_renders_escaped_body_with_links() {
    let wiki = wiki();
    wiki.store
        .save(&Page::new("Home", "Go to [Other]\n<script>alert(1)</script>"))
        .unwrap();

    let resp = get(&wiki.router, "/view/Home").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));

    let html = text(resp).await;
    assert!(html.contains(r#"Go to <a href="/view/Other">Other</a><br>&lt;script&gt;"#));
    assert!(!html.contains("<script>"));
}

#[tokio::test]
async fn edit_prefills_existing_body() {
    let wiki = wiki();
    wiki.store.save(&Page::new("Notes", "remember [Milk]")).unwrap();

    let html = text(get(&wiki.router, "/edit/Notes").await).await;
    assert!(html.contains(">remember [Milk]</textarea>"));
}

#[tokio::test]
async fn save_persists_and_redirects_to_view() {
    let wiki = wiki();
    let resp = post_form(&wiki.router, "/save/NewPage", "body=Hello+%5BWorld%5D%0Abye").await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/view/NewPage");
    assert_eq!(wiki.store.load("NewPage").unwrap().body, b"Hello [World]\nbye");

    let html = text(get(&wiki.router, "/view/NewPage").await).await;
    assert!(html.contains(r#"Hello <a href="/view/World">World</a><br>bye"#));
}

#[tokio::test]
async fn save_overwrites_previous_content() {
    let wiki = wiki();
    post_form(&wiki.router, "/save/Page", "body=first").await;
    post_form(&wiki.router, "/save/Page", "body=second").await;

    assert_eq!(wiki.store.load("Page").unwrap().body, b"second");
}

#[tokio::test]
async fn save_without_body_field_stores_empty_page() {
    let wiki = wiki();
    let resp = post_form(&wiki.router, "/save/Blank", "other=1").await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(wiki.store.load("Blank").unwrap().body, b"");
}

#[tokio::test]
async fn save_with_unsupported_content_type_is_rejected() {
    let wiki = wiki();
    wiki.store.save(&Page::new("Keep", "original")).unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/save/Keep")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"body":"x"}"#))
        .unwrap();
    let resp = wiki.router.clone().oneshot(request).await.unwrap();

    assert!(resp.status().is_client_error());
    assert_eq!(wiki.store.load("Keep").unwrap().body, b"original");
}

#[tokio::test]
async fn save_failure_is_a_server_error_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("data");
    std::fs::write(&blocker, "not a directory").unwrap();
    let templates = Templates::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("tmpl")).unwrap();
    let router = app(AppState::new(PageStore::new(&blocker), templates, "FrontPage"));

    let resp = post_form(&router, "/save/Page", "body=x").await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!text(resp).await.is_empty());
}

#[rstest]
#[case("/delete/Foo")]
#[case("/view/foo!bar")]
#[case("/view/")]
#[case("/view/Foo/Bar")]
#[case("/FrontPage")]
#[case("/static/style.css")]
#[tokio::test]
async fn unmatched_paths_are_not_found(#[case] uri: &str) {
    let wiki = wiki();
    let resp = get(&wiki.router, uri).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(text(resp).await, "404 page not found");
}

#[tokio::test]
async fn unmatched_save_never_writes() {
    let wiki = wiki();
    let resp = post_form(&wiki.router, "/save/bad!title", "body=x").await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(!wiki.store.data_dir().exists());
}

#[tokio::test]
async fn template_errors_surface_as_server_errors() {
    let dir = tempfile::tempdir().unwrap();
    let store = PageStore::new(dir.path());
    store.save(&Page::new("Home", "x")).unwrap();
    let templates = Templates::from_sources("{{ Missing.field }}", "{{ Body }}").unwrap();
    let router = app(AppState::new(store, templates, "FrontPage"));

    let resp = get(&router, "/view/Home").await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(text(resp).await.contains("Missing"));
}

#[tokio::test]
async fn concurrent_requests_are_served_independently() {
    let wiki = wiki();
    let mut tasks = Vec::new();
    for i in 0..8 {
        let router = wiki.router.clone();
        tasks.push(tokio::spawn(async move {
            let uri = format!("/save/Page{}", i);
            post_form(&router, &uri, &format!("body=content{}", i)).await.status()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::FOUND);
    }
    for i in 0..8 {
        let page = wiki.store.load(&format!("Page{}", i)).unwrap();
        assert_eq!(page.body, format!("content{}", i).into_bytes());
    }
}
