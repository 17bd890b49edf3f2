/*!
 * HTTP tests: the WordPress and OpenAI clients against a local stub server
 */

use std::time::Duration;
use tokio_test::assert_err;

use wp_translate::app_config::Config;
use wp_translate::app_controller::{Controller, RunOutcome};
use wp_translate::content_api::{ContentApi, NewPost, WordPressClient};
use wp_translate::errors::{ContentError, ProviderError, TranslationError};
use wp_translate::providers::openai::OpenAI;
use wp_translate::translation::{RecordingSleeper, TranslationService};
use crate::common::stub_server::{StubResponse, StubServer};
use crate::common::{test_config, PARAGRAPH_AND_IMAGE};

/// Basic credentials of `test_config`, editor:secret
const EDITOR_AUTH: &str = "Basic ZWRpdG9yOnNlY3JldA==";

const POST_42: &str = r#"{
    "id": 42,
    "title": {"raw": "hello world", "rendered": "Hello world"},
    "content": {"raw": "<!-- wp:paragraph -->\n<p>Hi</p>\n<!-- /wp:paragraph -->", "rendered": "<p>Hi</p>\n"}
}"#;

fn chat_answer(text: &str) -> String {
    serde_json::json!({
        "choices": [{"index": 0, "finish_reason": "stop", "message": {"role": "assistant", "content": text}}],
        "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
    })
    .to_string()
}

const OVERLOADED: &str = r#"{"error":{"message":"The server is overloaded","type":"server_error"}}"#;

fn wordpress(server: &StubServer) -> WordPressClient {
    let mut config = test_config();
    config.content_api.base_url = server.url("/wp-json/wp/v2/");
    WordPressClient::new(&config.content_api)
}

fn openai(server: &StubServer) -> OpenAI {
    OpenAI::new("sk-test", server.url("/v1"), "gpt-3.5-turbo")
}

/// The raw fields are read with the edit context and basic credentials
#[tokio::test]
async fn test_fetchPost_withOkAnswer_shouldReadRawFieldsWithEditContext() {
    let server = StubServer::start(vec![StubResponse::new(200, POST_42)]).await;

    let post = wordpress(&server).fetch_post(" 42 ").await.unwrap();

    assert_eq!(post.id, "42");
    assert_eq!(post.title, "hello world");
    assert_eq!(post.content, "<!-- wp:paragraph -->\n<p>Hi</p>\n<!-- /wp:paragraph -->");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].target, "/wp-json/wp/v2/posts/42?context=edit");
    assert_eq!(requests[0].header("authorization"), Some(EDITOR_AUTH));
}

/// A missing post is reported with its status and never retried
#[tokio::test]
async fn test_fetchPost_with404_shouldReturnRetrievalError() {
    let server = StubServer::start(vec![StubResponse::new(404, r#"{"code":"rest_post_invalid_id"}"#)]).await;

    let error = assert_err!(wordpress(&server).fetch_post("42").await);

    assert!(matches!(error, ContentError::Retrieval { status_code: 404 }));
    assert_eq!(error.to_string(), "Error retrieving post. Status code: 404");
    assert_eq!(server.request_count(), 1);
}

/// Any success other than 200 still counts as a failed fetch
#[tokio::test]
async fn test_fetchPost_withNon200Success_shouldReturnRetrievalError() {
    let server = StubServer::start(vec![StubResponse::new(203, POST_42)]).await;

    let result = wordpress(&server).fetch_post("42").await;

    assert!(matches!(result, Err(ContentError::Retrieval { status_code: 203 })));
}

/// Path characters in the operator's ID cannot reach another endpoint
#[tokio::test]
async fn test_fetchPost_withSlashInId_shouldRequestSingleEscapedSegment() {
    let server = StubServer::start(vec![StubResponse::new(404, "{}")]).await;

    let result = wordpress(&server).fetch_post("1/revisions").await;

    assert!(matches!(result, Err(ContentError::Retrieval { status_code: 404 })));
    assert_eq!(server.requests()[0].target, "/wp-json/wp/v2/posts/1%2Frevisions?context=edit");
}

/// The draft is posted as JSON with draft status and the created id is read back
#[tokio::test]
async fn test_createPost_with201_shouldSendDraftAndReturnCreatedPost() {
    let server = StubServer::start(vec![StubResponse::new(
        201,
        r#"{"id": 1001, "link": "https://blog.example/?p=1001", "status": "draft"}"#,
    )])
    .await;

    let created = wordpress(&server)
        .create_post(&NewPost::draft("Bonjour", "<p>Salut</p>"))
        .await
        .unwrap();

    assert_eq!(created.id, Some(1001));
    assert_eq!(created.link.as_deref(), Some("https://blog.example/?p=1001"));

    let requests = server.requests();
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.target, "/wp-json/wp/v2/posts");
    assert_eq!(request.header("authorization"), Some(EDITOR_AUTH));
    assert_eq!(
        request.json(),
        serde_json::json!({"title": "Bonjour", "content": "<p>Salut</p>", "status": "draft"})
    );
}

/// A server failure on publish keeps the status and body for the operator
#[tokio::test]
async fn test_createPost_with500_shouldReturnPublishErrorWithBody() {
    let body = r#"{"code":"internal_error","message":"Database gone"}"#;
    let server = StubServer::start(vec![StubResponse::new(500, body)]).await;

    let error = assert_err!(wordpress(&server).create_post(&NewPost::draft("t", "c")).await);

    match error {
        ContentError::Publish { status_code, body: received } => {
            assert_eq!(status_code, 500);
            assert_eq!(received, body);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(server.request_count(), 1);
}

/// Only 201 means the draft was created
#[tokio::test]
async fn test_createPost_with200_shouldReturnPublishError() {
    let server = StubServer::start(vec![StubResponse::new(200, r#"{"id": 5}"#)]).await;

    let result = wordpress(&server).create_post(&NewPost::draft("t", "c")).await;

    assert!(matches!(result, Err(ContentError::Publish { status_code: 200, .. })));
}

/// A created post with an unreadable answer is still a success
#[tokio::test]
async fn test_createPost_with201AndEmptyBody_shouldReturnEmptyDetails() {
    let server = StubServer::start(vec![StubResponse::new(201, "")]).await;

    let created = wordpress(&server).create_post(&NewPost::draft("t", "c")).await.unwrap();

    assert_eq!(created.id, None);
    assert_eq!(created.link, None);
}

/// Two 503 answers are absorbed by the retry and the third answer is used
#[tokio::test]
async fn test_translateText_withTwo503ThenOk_shouldRetryAndSucceed() {
    let server = StubServer::start(vec![
        StubResponse::new(503, OVERLOADED),
        StubResponse::new(503, OVERLOADED),
        StubResponse::new(200, chat_answer("<p>Salut</p>")),
    ])
    .await;
    let sleeper = RecordingSleeper::new();
    let service = TranslationService::with_sleeper(openai(&server), sleeper.clone(), &test_config());

    let text = service.translate_text("<p>Hi</p>", "fr").await.unwrap();

    assert_eq!(text, "<p>Salut</p>");
    assert_eq!(server.request_count(), 3);
    assert_eq!(sleeper.delays(), vec![Duration::from_secs(10); 2]);

    let requests = server.requests();
    let request = &requests[2];
    assert_eq!(request.method, "POST");
    assert_eq!(request.target, "/v1/chat/completions");
    assert_eq!(request.header("authorization"), Some("Bearer sk-test"));
    let body = request.json();
    assert_eq!(body["model"], "gpt-3.5-turbo");
    assert_eq!(body["messages"][0]["role"], "system");
    assert!(body["messages"][1]["content"].as_str().unwrap().contains("<p>Hi</p>"));
}

/// A service that stays at 503 exhausts the attempts
#[tokio::test]
async fn test_translateText_withPersistent503_shouldStopAfterThreeAttempts() {
    let server = StubServer::start(vec![StubResponse::new(503, OVERLOADED)]).await;
    let sleeper = RecordingSleeper::new();
    let service = TranslationService::with_sleeper(openai(&server), sleeper.clone(), &test_config());

    let error = assert_err!(service.translate_text("<p>Hi</p>", "fr").await);

    assert!(matches!(
        error,
        TranslationError::Transient { attempts: 3, source: ProviderError::ServiceUnavailable(ref m) } if m == "The server is overloaded"
    ));
    assert_eq!(server.request_count(), 3);
    assert_eq!(sleeper.count(), 2);
}

/// Other server errors are not retried
#[tokio::test]
async fn test_translateText_with500_shouldFailWithoutRetry() {
    let server = StubServer::start(vec![StubResponse::new(500, r#"{"error":{"message":"boom"}}"#)]).await;
    let sleeper = RecordingSleeper::new();
    let service = TranslationService::with_sleeper(openai(&server), sleeper.clone(), &test_config());

    let result = service.translate_text("<p>Hi</p>", "fr").await;

    assert!(matches!(
        result,
        Err(TranslationError::Fatal(ProviderError::ApiError { status_code: 500, .. }))
    ));
    assert_eq!(server.request_count(), 1);
    assert_eq!(sleeper.count(), 0);
}

/// A filtered answer with null content is reported plainly
#[tokio::test]
async fn test_translateText_withNullContent_shouldExplainMissingText() {
    let server = StubServer::start(vec![StubResponse::new(
        200,
        r#"{"choices":[{"index":0,"finish_reason":"content_filter","message":{"role":"assistant","content":null}}]}"#,
    )])
    .await;
    let service = TranslationService::with_sleeper(openai(&server), RecordingSleeper::new(), &test_config());

    let result = service.translate_text("<p>Hi</p>", "fr").await;

    assert!(matches!(
        result,
        Err(TranslationError::Fatal(ProviderError::ParseError(ref m)))
            if m == "Response message had no content (finish reason: content_filter)"
    ));
}

/// Without HTTP_TIMEOUT_SECS a slow answer is awaited
#[tokio::test]
async fn test_complete_withoutConfiguredTimeout_shouldWaitForSlowAnswer() {
    let server = StubServer::start(vec![
        StubResponse::new(200, chat_answer("Bonjour")).delayed(Duration::from_millis(1500)),
    ])
    .await;
    let endpoint = server.url("/v1");
    let config = Config::from_vars(vec![("OPENAI_TOKEN", "sk-test"), ("OPENAI_API_BASE", endpoint.as_str())]).unwrap();
    assert_eq!(config.translation.timeout_secs, None);
    let service = TranslationService::with_sleeper(OpenAI::from_config(&config.translation), RecordingSleeper::new(), &config);

    let text = service.translate_text("Hello", "fr").await.unwrap();

    assert_eq!(text, "Bonjour");
}

/// HTTP_TIMEOUT_SECS bounds the wait when it is given
#[tokio::test]
async fn test_complete_withConfiguredTimeout_shouldGiveUpOnSlowAnswer() {
    let server = StubServer::start(vec![
        StubResponse::new(200, chat_answer("Bonjour")).delayed(Duration::from_millis(2500)),
    ])
    .await;
    let endpoint = server.url("/v1");
    let config = Config::from_vars(vec![
        ("OPENAI_TOKEN", "sk-test"),
        ("OPENAI_API_BASE", endpoint.as_str()),
        ("HTTP_TIMEOUT_SECS", "1"),
    ])
    .unwrap();
    let service = TranslationService::with_sleeper(OpenAI::from_config(&config.translation), RecordingSleeper::new(), &config);

    let result = service.translate_text("Hello", "fr").await;

    assert!(matches!(result, Err(TranslationError::Fatal(ProviderError::RequestFailed(_)))));
}

/// The whole run over HTTP: fetch, translate the paragraph, post the draft
#[tokio::test]
async fn test_run_withRealClients_shouldPublishDraftOverHttp() {
    let post = serde_json::json!({
        "id": 42,
        "title": {"raw": "hello world"},
        "content": {"raw": PARAGRAPH_AND_IMAGE}
    })
    .to_string();
    let site = StubServer::start(vec![
        StubResponse::new(200, post),
        StubResponse::new(201, r#"{"id": 1001, "link": "https://blog.example/?p=1001"}"#),
    ])
    .await;
    let chat = StubServer::start(vec![
        StubResponse::new(200, chat_answer("bonjour le monde")),
        StubResponse::new(200, chat_answer("<!-- wp:paragraph -->\n<p>Salut</p>\n<!-- /wp:paragraph -->")),
    ])
    .await;

    let config = Config::from_vars(vec![
        ("WP_API_URL", site.url("/wp-json/wp/v2")),
        ("WP_USERNAME", "editor".to_string()),
        ("WP_PASSWORD", "secret".to_string()),
        ("OPENAI_TOKEN", "sk-test".to_string()),
        ("OPENAI_API_BASE", chat.url("/v1")),
    ])
    .unwrap();
    let controller = Controller::with_config(&config);

    let report = controller.run("42", "fr").await.unwrap();

    assert_eq!(
        report.outcome,
        RunOutcome::Published {
            id: Some(1001),
            link: Some("https://blog.example/?p=1001".to_string()),
        }
    );
    assert_eq!(chat.request_count(), 2);

    let requests = site.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].target, "/wp-json/wp/v2/posts/42?context=edit");
    assert_eq!(
        requests[1].json(),
        serde_json::json!({
            "title": "Bonjour Le Monde",
            "content": "<!-- wp:paragraph -->\n<p>Salut</p>\n<!-- /wp:paragraph -->\n\n<!-- wp:image -->\n<img/>\n<!-- /wp:image -->",
            "status": "draft"
        })
    );
}
