use anyhow::Result;
use codrspace_post::config::credentials::load_credentials;
use codrspace_post::{CodrspaceClient, PublishError, PublishOutcome, Publisher};
use httpmock::prelude::*;
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join(name);
    std::fs::write(&path, content)?;
    Ok(path)
}

/// 建立新文章：front matter 全部送到 API
#[tokio::test]
async fn test_publish_file_creates_post() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let post_path = write_fixture(
        &temp_dir,
        "post.txt",
        "Title: Hello World\nSlug: hello-world\nStatus: published\nFirst line.\nSecond line.\n",
    )?;
    let creds_path = write_fixture(&temp_dir, "creds", "username=alice\napi_key=xyz\n")?;

    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/post/")
            .query_param("username", "alice")
            .query_param("api_key", "xyz")
            .json_body(serde_json::json!({
                "title": "Hello World",
                "slug": "hello-world",
                "status": "published",
                "content": "First line.\nSecond line.\n"
            }));
        then.status(201).json_body(serde_json::json!({
            "id": 12,
            "url": "http://codrspace.com/alice/hello-world/"
        }));
    });
    let update_mock = server.mock(|when, then| {
        when.method(PUT);
        then.status(200);
    });

    let credentials = load_credentials(&creds_path)?;
    let publisher = Publisher::new(CodrspaceClient::new(&server.url("/api/v1/"))?);
    let outcome = publisher.publish_file(&post_path, &credentials).await?;

    create_mock.assert();
    update_mock.assert_hits(0);
    assert_eq!(
        outcome.to_string(),
        "New post id 12 created at: http://codrspace.com/alice/hello-world/"
    );
    Ok(())
}

/// 400 衝突：從錯誤內容取得 id 後改用 PUT 更新
#[tokio::test]
async fn test_conflict_falls_back_to_update() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let post_path = write_fixture(&temp_dir, "post.txt", "My Post\nbody text\n")?;

    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/post/");
        then.status(400)
            .body("Post with slug 'my-post' already exists, id: 42, please update");
    });
    let update_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/v1/post/42/")
            .query_param("username", "alice")
            .query_param("api_key", "xyz")
            .json_body(serde_json::json!({
                "title": "My Post",
                "status": "draft",
                "content": "body text\n"
            }));
        then.status(200).json_body(serde_json::json!({
            "id": 42,
            "url": "http://codrspace.com/alice/my-post/"
        }));
    });

    let publisher = Publisher::new(CodrspaceClient::new(&server.url("/api/v1/"))?);
    let credentials = codrspace_post::Credentials::new("alice", "xyz");
    let outcome = publisher.publish_file(&post_path, &credentials).await?;

    create_mock.assert();
    update_mock.assert();
    assert!(matches!(outcome, PublishOutcome::Updated(ref post) if post.id == 42));
    Ok(())
}

/// 500 不做任何補救
#[tokio::test]
async fn test_server_error_propagates_without_update() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let post_path = write_fixture(&temp_dir, "post.txt", "Title: T\nbody\n")?;

    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/post/");
        then.status(500).body("id: 42");
    });
    let update_mock = server.mock(|when, then| {
        when.method(PUT);
        then.status(200);
    });

    let publisher = Publisher::new(CodrspaceClient::new(&server.url("/api/v1/"))?);
    let credentials = codrspace_post::Credentials::new("alice", "xyz");
    let err = publisher
        .publish_file(&post_path, &credentials)
        .await
        .unwrap_err();

    create_mock.assert();
    update_mock.assert_hits(0);
    assert_eq!(err.http_status(), Some(500));
    Ok(())
}

#[tokio::test]
async fn test_conflict_without_id_is_parse_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let post_path = write_fixture(&temp_dir, "post.txt", "Title: T\nbody\n")?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/post/");
        then.status(400).body("Slug already exists");
    });
    let update_mock = server.mock(|when, then| {
        when.method(PUT);
        then.status(200);
    });

    let publisher = Publisher::new(CodrspaceClient::new(&server.url("/api/v1/"))?);
    let credentials = codrspace_post::Credentials::new("alice", "xyz");
    let err = publisher
        .publish_file(&post_path, &credentials)
        .await
        .unwrap_err();

    update_mock.assert_hits(0);
    assert!(matches!(err, PublishError::ParseError { ref body } if body == "Slug already exists"));
    Ok(())
}

#[tokio::test]
async fn test_failed_update_reports_both_errors() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let post_path = write_fixture(&temp_dir, "post.txt", "Title: T\nbody\n")?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/post/");
        then.status(400).body("exists, id: 9");
    });
    let update_mock = server.mock(|when, then| {
        when.method(PUT).path("/api/v1/post/9/");
        then.status(401).body("bad api key");
    });

    let publisher = Publisher::new(CodrspaceClient::new(&server.url("/api/v1/"))?);
    let credentials = codrspace_post::Credentials::new("alice", "xyz");
    let err = publisher
        .publish_file(&post_path, &credentials)
        .await
        .unwrap_err();

    update_mock.assert();
    let message = err.to_string();
    assert!(message.contains("exists, id: 9"));
    assert!(message.contains("Failed creating new post and updating existing post"));
    assert!(message.contains("bad api key"));
    Ok(())
}

#[tokio::test]
async fn test_invalid_status_never_reaches_server() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let post_path = write_fixture(&temp_dir, "post.txt", "Status: scheduled\nTitle: T\nbody\n")?;

    let server = MockServer::start();
    let any_mock = server.mock(|when, then| {
        when.path_contains("/post/");
        then.status(200);
    });

    let publisher = Publisher::new(CodrspaceClient::new(&server.url("/api/v1/"))?);
    let credentials = codrspace_post::Credentials::new("alice", "xyz");
    let err = publisher
        .publish_file(&post_path, &credentials)
        .await
        .unwrap_err();

    any_mock.assert_hits(0);
    assert!(matches!(err, PublishError::ValidationError { .. }));
    Ok(())
}
