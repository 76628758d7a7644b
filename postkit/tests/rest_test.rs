//! End-to-end tests against a mocked backend.

use postkit::session::EMAIL_NOT_FOUND;
use postkit::validation::login::messages;
use postkit::{
    ComposeOutcome, LoadOutcome, LoaderPhase, LoginOutcome, Post, Postkit, PostkitConfig,
    PostkitError,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Postkit {
    Postkit::new(PostkitConfig {
        api_url: server.uri(),
        search_api_url: server.uri(),
        page_size: 10,
        request_timeout: None,
    })
    .unwrap()
}

fn posts(ids: std::ops::Range<u32>, user_id: u32) -> Value {
    Value::Array(
        ids.map(|id| {
            json!({
                "userId": user_id,
                "id": id,
                "title": format!("post {id}"),
                "body": "lorem ipsum"
            })
        })
        .collect(),
    )
}

fn users() -> Value {
    json!([
        {"id": 1, "name": "Leanne Graham", "username": "Bret", "email": "Sincere@april.biz"},
        {"id": 2, "name": "Ervin Howell", "username": "Antonette", "email": "Shanna@melissa.tv"}
    ])
}

async fn mount_page(server: &MockServer, page: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("_page", page.to_string()))
        .and(query_param("_limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Feed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn feed_loads_until_empty_page() {
    let server = MockServer::start().await;
    mount_page(&server, 1, posts(1..11, 1)).await;
    mount_page(&server, 2, posts(11..14, 2)).await;
    mount_page(&server, 3, json!([])).await;

    let client = client_for(&server);
    let loader = client.feed_loader();

    assert_eq!(loader.load_next().await.unwrap(), LoadOutcome::Appended(10));
    let state = loader.snapshot();
    assert_eq!((state.len(), state.next_page(), state.has_more()), (10, 2, true));

    assert_eq!(loader.load_next().await.unwrap(), LoadOutcome::Appended(3));
    let state = loader.snapshot();
    assert_eq!((state.len(), state.next_page(), state.has_more()), (13, 3, true));

    assert_eq!(loader.load_next().await.unwrap(), LoadOutcome::Exhausted);
    let state = loader.snapshot();
    assert_eq!(state.phase(), LoaderPhase::Exhausted);
    assert_eq!(state.len(), 13);

    // Exhausted: no fourth request reaches the server.
    assert_eq!(loader.load_next().await.unwrap(), LoadOutcome::Skipped);

    let ids: Vec<u32> = state.items().iter().map(|p| p.id).collect();
    assert_eq!(ids, (1..14).collect::<Vec<_>>());
}

#[tokio::test]
async fn feed_retries_same_page_after_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("_page", "1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, 1, posts(1..11, 1)).await;

    let client = client_for(&server);
    let loader = client.feed_loader();

    match loader.load_next().await {
        Err(PostkitError::Http { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
    assert_eq!(loader.snapshot().phase(), LoaderPhase::Idle);
    assert_eq!(loader.snapshot().next_page(), 1);

    assert_eq!(loader.load_next().await.unwrap(), LoadOutcome::Appended(10));
    assert_eq!(loader.snapshot().next_page(), 2);
}

#[tokio::test]
async fn concurrent_load_next_hits_server_once() {
    let server = MockServer::start().await;
    mount_page(&server, 1, posts(1..11, 1)).await;

    let client = client_for(&server);
    let loader = client.feed_loader();

    let (a, b) = tokio::join!(loader.load_next(), loader.load_next());
    let outcomes = [a.unwrap(), b.unwrap()];
    assert!(outcomes.contains(&LoadOutcome::Appended(10)));
    assert!(outcomes.contains(&LoadOutcome::Skipped));
    assert_eq!(loader.snapshot().len(), 10);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_matches_email_case_insensitively() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.login("shanna@MELISSA.tv", "Secret1!").await.unwrap() {
        LoginOutcome::Authenticated(session) => {
            assert_eq!(session.user_id, 2);
            assert_eq!(session.name, "Ervin Howell");
            assert_eq!(session.token, "temp-token");
        }
        other => panic!("expected sign-in, got {other:?}"),
    }
}

#[tokio::test]
async fn login_unknown_email_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.login("nobody@example.com", "Secret1!").await.unwrap() {
        LoginOutcome::Rejected(result) => {
            assert_eq!(result.error("email"), Some(EMAIL_NOT_FOUND));
            assert!(!result.is_valid());
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_login_form_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users()))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.login("bad", "12345").await.unwrap() {
        LoginOutcome::Rejected(result) => {
            assert_eq!(result.error("email"), Some(messages::EMAIL_INVALID));
            assert_eq!(result.error("password"), Some(messages::PASSWORD_MIN));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Posts + profile
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_post_sends_session_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(body_json(json!({"title": "Hello", "body": "World", "userId": 1})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 101, "title": "Hello", "body": "World", "userId": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let session = postkit::Session {
        token: "temp-token".into(),
        name: "Leanne Graham".into(),
        user_id: 1,
    };
    match client.create_post(&session, "Hello", "World").await.unwrap() {
        ComposeOutcome::Saved(post) => assert_eq!(post.id, 101),
        other => panic!("expected saved post, got {other:?}"),
    }

    // Blank body is caught locally.
    match client.create_post(&session, "Hello", "   ").await.unwrap() {
        ComposeOutcome::Rejected(result) => assert!(result.error("body").is_some()),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn edit_post_puts_new_content() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/posts/7"))
        .and(body_json(json!({"title": "Edited", "body": "Body", "userId": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "title": "Edited", "body": "Body", "userId": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let original = Post {
        id: 7,
        user_id: 1,
        title: "Old".into(),
        body: "Old body".into(),
        reactions: None,
    };
    match client.edit_post(&original, "Edited", "Body").await.unwrap() {
        ComposeOutcome::Saved(post) => assert_eq!(post.title, "Edited"),
        other => panic!("expected saved post, got {other:?}"),
    }
}

#[tokio::test]
async fn profile_keeps_only_own_posts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users()[0].clone()))
        .mount(&server)
        .await;
    let mut mixed = posts(1..4, 1);
    mixed.as_array_mut().unwrap().extend(posts(4..6, 2).as_array().unwrap().clone());
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("userId", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mixed))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let profile = client.load_profile(1).await.unwrap();
    assert_eq!(profile.initials(), "LG");
    assert_eq!(profile.posts.len(), 3);
    assert!(profile.posts.iter().all(|p| p.user_id == 1));
}

#[tokio::test]
async fn missing_user_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.load_profile(99).await.unwrap_err();
    assert!(matches!(err, PostkitError::UserNotFound(99)));
}

#[tokio::test]
async fn search_and_comments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/search"))
        .and(query_param("q", "love"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "posts": [{"id": 3, "userId": 9, "title": "love", "body": "b", "reactions": 2}],
            "total": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .and(query_param("postId", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"postId": 3, "id": 11, "name": "n", "email": "e@x.io", "body": "nice"}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let found = client.search_posts("love").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 3);

    let comments = client.get_comments(Some(3)).await.unwrap();
    assert_eq!(comments[0].body, "nice");
}

#[tokio::test]
async fn delete_post_accepts_empty_reply() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/posts/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.delete_post(5).await.unwrap();
}

#[tokio::test]
async fn rich_users_decode_search_backend_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{
                "id": 1,
                "firstName": "Emily",
                "lastName": "Johnson",
                "maidenName": "Smith",
                "age": 28,
                "gender": "female",
                "email": "emily.johnson@x.dummyjson.com",
                "phone": "+81 965-431-3024",
                "username": "emilys",
                "password": "emilyspass",
                "birthDate": "1996-5-30",
                "image": "https://dummyjson.com/icon/emilys/128",
                "bloodGroup": "O-",
                "height": 193.24,
                "weight": 63.16,
                "eyeColor": "Green",
                "hair": {"color": "Brown", "type": "Curly"},
                "ip": "42.48.100.32",
                "address": {
                    "address": "626 Main Street",
                    "city": "Phoenix",
                    "state": "Mississippi",
                    "stateCode": "MS",
                    "postalCode": "29112",
                    "coordinates": {"lat": -77.16213, "lng": -92.084824},
                    "country": "United States"
                },
                "macAddress": "47:fa:41:18:ec:eb",
                "university": "University of Wisconsin--Madison",
                "company": {
                    "department": "Engineering",
                    "name": "Dooley, Kozey and Cronin",
                    "title": "Sales Manager",
                    "address": {
                        "address": "263 Tenth Street",
                        "city": "San Francisco",
                        "state": "Wisconsin",
                        "stateCode": "WI",
                        "postalCode": "37657",
                        "coordinates": {"lat": 71.814525, "lng": -161.150263},
                        "country": "United States"
                    }
                },
                "ein": "977-175",
                "ssn": "900-590-289",
                "userAgent": "Mozilla/5.0",
                "crypto": {"coin": "Bitcoin", "wallet": "0xb9fc", "network": "Ethereum (ERC20)"},
                "role": "admin"
            }],
            "total": 208,
            "skip": 0,
            "limit": 30
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let users = client.get_rich_users().await.unwrap();
    assert_eq!(users.len(), 1);

    let user = &users[0];
    assert_eq!(user.name, "Emily Johnson");
    assert_eq!(user.username, "emilys");
    assert_eq!(user.avatar.as_deref(), Some("https://dummyjson.com/icon/emilys/128"));
    assert_eq!(user.company.as_ref().unwrap().name, "Dooley, Kozey and Cronin");
    let address = user.address.as_ref().unwrap();
    assert_eq!(address.street, "626 Main Street");
    assert_eq!(address.zipcode.as_deref(), Some("29112"));
    assert!(user.has_email("Emily.Johnson@x.dummyjson.com"));
}
