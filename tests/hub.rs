use hubtag::config::Config;
use hubtag::error::Error;
use hubtag::hub::Hub;
use hubtag::models::{Credentials, SourceType};
use hubtag::name::RepositoryName;
use hubtag::repository::Repository;
use mockito::{Matcher, Mock, Server};
use serde_json::{json, Value};
use url::Url;

const TOKEN: &str = "test-jwt";
const LIST_PATH: &str = r"^/v2/repositories/acme/app/autobuild/tags/(\?.*)?$";
const CREATE_PATH: &str = "/v2/repositories/acme/app/autobuild/tags/";

fn credentials() -> Credentials {
    Credentials {
        username: "me".to_string(),
        password: "secret".to_string(),
    }
}

fn record(id: u64, name: &str, source_type: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "source_type": source_type,
        "source_name": name,
        "dockerfile_location": "/",
    })
}

fn page(server: &Server, count: usize, next: Option<u64>, results: Vec<Value>) -> String {
    let next = next
        .map(|page| {
            format!(
                "{}/v2/repositories/acme/app/autobuild/tags/?page={}",
                server.url(),
                page
            )
        })
        .unwrap_or_default();
    json!({
        "count": count,
        "next": next,
        "previous": "",
        "results": results,
    })
    .to_string()
}

async fn mock_page(server: &mut Server, number: u64, body: String) -> Mock {
    server
        .mock("GET", Matcher::Regex(LIST_PATH.to_string()))
        .match_query(Matcher::UrlEncoded("page".into(), number.to_string()))
        .match_header("authorization", format!("JWT {TOKEN}").as_str())
        .with_status(200)
        .with_header("Content-Type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

async fn mock_delete(server: &mut Server, id: u64, expect: usize) -> Mock {
    server
        .mock(
            "DELETE",
            format!("/v2/repositories/acme/app/autobuild/tags/{id}/").as_str(),
        )
        .match_header("authorization", format!("JWT {TOKEN}").as_str())
        .with_status(204)
        .expect(expect)
        .create_async()
        .await
}

async fn session(server: &mut Server) -> Repository {
    let login = server
        .mock("POST", "/v2/users/login")
        .match_body(Matcher::Json(
            json!({"username": "me", "password": "secret"}),
        ))
        .with_status(200)
        .with_header("Content-Type", "application/json")
        .with_body(json!({ "token": TOKEN }).to_string())
        .create_async()
        .await;
    let uri = Url::parse(&server.url()).unwrap();
    let hub = Hub::login(&uri, &credentials()).await.unwrap();
    login.assert_async().await;
    assert_eq!(hub.uri(), &uri);
    Repository::new(&hub, &"acme/app".parse().unwrap())
}

#[tokio::test]
async fn test_login_rejected() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/v2/users/login")
        .with_status(401)
        .with_body(r#"{"detail":"Incorrect authentication credentials"}"#)
        .create_async()
        .await;
    let uri = Url::parse(&server.url()).unwrap();
    let err = Hub::login(&uri, &credentials()).await.unwrap_err();
    login.assert_async().await;
    assert!(matches!(err, Error::LoginStatus { status, .. } if status.as_u16() == 401));
}

#[tokio::test]
async fn test_login_without_token() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/v2/users/login")
        .with_status(200)
        .with_header("Content-Type", "application/json")
        .with_body(r#"{"detail":"ok"}"#)
        .create_async()
        .await;
    let uri = Url::parse(&server.url()).unwrap();
    let err = Hub::login(&uri, &credentials()).await.unwrap_err();
    assert!(matches!(err, Error::TokenMissing));
}

#[tokio::test]
async fn test_missing_username_makes_no_request() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/v2/users/login")
        .expect(0)
        .create_async()
        .await;
    let any = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let err = Config::new(&server.url(), None, Some("secret".to_string())).unwrap_err();
    assert!(matches!(err, Error::MissingCredential { .. }));
    let err = "app".parse::<RepositoryName>().unwrap_err();
    assert!(matches!(err, Error::MalformedRepository { .. }));
    login.assert_async().await;
    any.assert_async().await;
}

#[tokio::test]
async fn test_enumerate_pages_in_order() {
    let mut server = Server::new_async().await;
    let repository = session(&mut server).await;
    let first = page(
        &server,
        5,
        Some(2),
        vec![record(1, "v1", "Tag"), record(2, "v2", "Tag")],
    );
    let second = page(
        &server,
        5,
        Some(3),
        vec![record(3, "main", "Branch"), record(4, "v3", "Tag")],
    );
    let third = page(&server, 5, None, vec![record(5, "v4", "Tag")]);
    let m1 = mock_page(&mut server, 1, first).await;
    let m2 = mock_page(&mut server, 2, second).await;
    let m3 = mock_page(&mut server, 3, third).await;

    let mut visited = Vec::new();
    repository
        .for_each_tag_build(|build| visited.push(build.id))
        .await
        .unwrap();

    m1.assert_async().await;
    m2.assert_async().await;
    m3.assert_async().await;
    assert_eq!(visited, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_enumerate_stops_on_malformed_next() {
    let mut server = Server::new_async().await;
    let repository = session(&mut server).await;
    let body = json!({
        "count": 2,
        "next": "https://hub.docker.com/v2/repositories/acme/app/autobuild/tags/?page=two",
        "results": [record(1, "v1", "Tag")],
    })
    .to_string();
    let m1 = mock_page(&mut server, 1, body).await;

    let builds = repository.tag_builds().await.unwrap();

    m1.assert_async().await;
    assert_eq!(builds.len(), 1);
    assert_eq!(builds[0].name, "v1");
}

#[tokio::test]
async fn test_enumerate_stops_on_repeated_page() {
    let mut server = Server::new_async().await;
    let repository = session(&mut server).await;
    let body = page(&server, 1, Some(1), vec![record(1, "v1", "Tag")]);
    let m1 = mock_page(&mut server, 1, body).await;

    let builds = repository.tag_builds().await.unwrap();

    m1.assert_async().await;
    assert_eq!(builds.len(), 1);
}

#[tokio::test]
async fn test_list_failure_status() {
    let mut server = Server::new_async().await;
    let repository = session(&mut server).await;
    let _m = server
        .mock("GET", Matcher::Regex(LIST_PATH.to_string()))
        .with_status(404)
        .create_async()
        .await;

    let err = repository.tag_builds().await.unwrap_err();
    assert!(matches!(err, Error::ListTagBuilds { status, .. } if status.as_u16() == 404));
}

#[tokio::test]
async fn test_replace_all_keeps_branches() {
    let mut server = Server::new_async().await;
    let repository = session(&mut server).await;
    let body = r#"{"count":2,"next":"","results":[{"Id":1,"Name":"v1","Source_type":"Tag","Source_name":"v1","Dockerfile_location":"/"},{"Id":2,"Name":"main","Source_type":"Branch","Source_name":"main","Dockerfile_location":"/"}]}"#;
    let list = mock_page(&mut server, 1, body.to_string()).await;
    let delete_tag = mock_delete(&mut server, 1, 1).await;
    let delete_branch = mock_delete(&mut server, 2, 0).await;
    let create = server
        .mock("POST", CREATE_PATH)
        .match_header("authorization", format!("JWT {TOKEN}").as_str())
        .match_body(Matcher::PartialJson(json!({
            "source_type": "Tag",
            "name": "release",
            "source_name": "v2",
            "dockerfile_location": "/",
            "namespace": "acme",
            "repoName": "app",
        })))
        .with_status(201)
        .create_async()
        .await;

    repository.replace_all("release", "v2", "/").await.unwrap();

    list.assert_async().await;
    delete_tag.assert_async().await;
    delete_branch.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn test_replace_all_across_pages() {
    let mut server = Server::new_async().await;
    let repository = session(&mut server).await;
    let first = page(
        &server,
        4,
        Some(2),
        vec![record(10, "v1", "Tag"), record(11, "develop", "Branch")],
    );
    let second = page(
        &server,
        4,
        None,
        vec![record(12, "v2", "Tag"), record(13, "main", "Branch")],
    );
    let _m1 = mock_page(&mut server, 1, first).await;
    let _m2 = mock_page(&mut server, 2, second).await;
    let deletes = vec![
        mock_delete(&mut server, 10, 1).await,
        mock_delete(&mut server, 11, 0).await,
        mock_delete(&mut server, 12, 1).await,
        mock_delete(&mut server, 13, 0).await,
    ];
    let create = server
        .mock("POST", CREATE_PATH)
        .with_status(201)
        .create_async()
        .await;

    repository.replace_all("latest", "v3", "/docker").await.unwrap();

    for delete in deletes.iter() {
        delete.assert_async().await;
    }
    create.assert_async().await;
}

#[tokio::test]
async fn test_replace_all_stops_on_failed_delete() {
    let mut server = Server::new_async().await;
    let repository = session(&mut server).await;
    let body = page(&server, 1, None, vec![record(1, "v1", "Tag")]);
    let _list = mock_page(&mut server, 1, body).await;
    let _delete = server
        .mock("DELETE", "/v2/repositories/acme/app/autobuild/tags/1/")
        .with_status(500)
        .create_async()
        .await;
    let create = server
        .mock("POST", CREATE_PATH)
        .expect(0)
        .create_async()
        .await;

    let err = repository.replace_all("latest", "v2", "/").await.unwrap_err();

    create.assert_async().await;
    assert!(matches!(err, Error::DeleteTagBuild { id: 1, .. }));
}

#[tokio::test]
async fn test_delete_by_name_no_match() {
    let mut server = Server::new_async().await;
    let repository = session(&mut server).await;
    let body = page(
        &server,
        2,
        None,
        vec![record(1, "v1", "Tag"), record(2, "main", "Branch")],
    );
    let _list = mock_page(&mut server, 1, body).await;
    let delete = server
        .mock("DELETE", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let deleted = repository.delete_by_name("v9").await.unwrap();

    delete.assert_async().await;
    assert_eq!(deleted, 0);
}

#[tokio::test]
async fn test_delete_by_name_exact_match() {
    let mut server = Server::new_async().await;
    let repository = session(&mut server).await;
    let body = page(
        &server,
        3,
        None,
        vec![
            record(1, "v1", "Tag"),
            record(2, "V1", "Tag"),
            record(3, "v1", "Branch"),
        ],
    );
    let _list = mock_page(&mut server, 1, body).await;
    let d1 = mock_delete(&mut server, 1, 1).await;
    let d2 = mock_delete(&mut server, 2, 0).await;
    let d3 = mock_delete(&mut server, 3, 1).await;

    let deleted = repository.delete_by_name("v1").await.unwrap();

    d1.assert_async().await;
    d2.assert_async().await;
    d3.assert_async().await;
    assert_eq!(deleted, 2);
}

#[tokio::test]
async fn test_create_failure_status() {
    let mut server = Server::new_async().await;
    let repository = session(&mut server).await;
    let create = server
        .mock("POST", CREATE_PATH)
        .with_status(500)
        .create_async()
        .await;

    let err = repository.create("v1", "v1", "/").await.unwrap_err();

    create.assert_async().await;
    assert!(
        matches!(err, Error::CreateTagBuild { ref name, status } if name == "v1" && status.as_u16() == 500)
    );
}

#[tokio::test]
async fn test_delete_by_id_failure_status() {
    let mut server = Server::new_async().await;
    let repository = session(&mut server).await;
    let _delete = server
        .mock("DELETE", "/v2/repositories/acme/app/autobuild/tags/42/")
        .with_status(404)
        .create_async()
        .await;

    let err = repository.delete_by_id(42).await.unwrap_err();

    assert!(matches!(err, Error::DeleteTagBuild { id: 42, status } if status.as_u16() == 404));
    assert!(err.to_string().contains("404 Not Found"));
}

#[tokio::test]
async fn test_source_type_parsed_from_listing() {
    let mut server = Server::new_async().await;
    let repository = session(&mut server).await;
    let body = page(&server, 1, None, vec![record(1, "main", "Branch")]);
    let _list = mock_page(&mut server, 1, body).await;

    let builds = repository.tag_builds().await.unwrap();

    assert_eq!(builds[0].source_type, SourceType::Branch);
}
