//! Provider 适配器与选择测试

use llm_translator::domain::error::{AppError, ProviderError};
use llm_translator::domain::model::{ChatMessage, ProviderKind};
use llm_translator::domain::traits::LlmProvider;
use llm_translator::infrastructure::config::LlmConfig;
use llm_translator::infrastructure::network::anthropic::ClaudeProvider;
use llm_translator::infrastructure::network::create_provider;
use llm_translator::infrastructure::network::http::create_client;
use llm_translator::infrastructure::network::openai::OpenAiProvider;
use mockito::Matcher;
use serde_json::json;

fn messages() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("You are a translator."),
        ChatMessage::user("Chinese text:\n你好"),
    ]
}

fn llm_config(provider: &str, base_url: &str) -> LlmConfig {
    LlmConfig {
        provider: provider.to_string(),
        api_key: "test-key".to_string(),
        model: "test-model".to_string(),
        timeout: 5,
        base_url: base_url.to_string(),
    }
}

#[test]
fn test_claude_request_separates_system_message() {
    let provider = ClaudeProvider::new(create_client(5).unwrap(), "k", "claude-test", "http://x");
    let messages = messages();
    let request = serde_json::to_value(provider.build_request(&messages)).unwrap();

    assert_eq!(request["system"], "You are a translator.");
    assert_eq!(
        request["messages"],
        json!([{ "role": "user", "content": "Chinese text:\n你好" }])
    );
    assert_eq!(request["max_tokens"], 1024);
}

#[test]
fn test_claude_request_without_system_omits_field() {
    let provider = ClaudeProvider::new(create_client(5).unwrap(), "k", "claude-test", "http://x");
    let messages = vec![ChatMessage::user("hi")];
    let request = serde_json::to_value(provider.build_request(&messages)).unwrap();

    assert!(request.get("system").is_none());
    assert_eq!(request["messages"].as_array().unwrap().len(), 1);
}

#[test]
fn test_openai_request_keeps_system_inline() {
    let provider = OpenAiProvider::new(
        "openai",
        create_client(5).unwrap(),
        "k",
        "gpt-test",
        "http://x/v1/",
    );
    let messages = messages();
    let request = serde_json::to_value(provider.build_request(&messages)).unwrap();

    assert_eq!(request["messages"].as_array().unwrap().len(), 2);
    assert_eq!(request["messages"][0]["role"], "system");
    assert_eq!(request["response_format"], json!({ "type": "json_object" }));
    assert_eq!(provider.endpoint(), "http://x/v1/chat/completions");
}

#[tokio::test]
async fn test_claude_adapter_sends_system_separately() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "test-key")
        .match_header("anthropic-version", "2023-06-01")
        .match_body(Matcher::Json(json!({
            "model": "test-model",
            "max_tokens": 1024,
            "temperature": 0.3,
            "system": "You are a translator.",
            "messages": [{ "role": "user", "content": "Chinese text:\n你好" }],
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "msg_1",
                "model": "test-model",
                "content": [{ "type": "text", "text": "{\"translation\": \"Hello\"}" }],
                "usage": { "input_tokens": 10, "output_tokens": 5 },
            })
            .to_string(),
        )
        .create_async()
        .await;

    let provider = create_provider(&llm_config("claude", &server.url())).unwrap();
    let reply = provider.chat(&messages()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(provider.name(), "claude");
    assert_eq!(reply.content, "{\"translation\": \"Hello\"}");
    assert_eq!(reply.raw.unwrap()["usage"]["output_tokens"], 5);
}

#[tokio::test]
async fn test_openai_adapter_requests_json_mode() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "test-model",
            "temperature": 0.3,
            "response_format": { "type": "json_object" },
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "chatcmpl-1",
                "model": "test-model",
                "choices": [{
                    "message": { "role": "assistant", "content": "{}" },
                    "finish_reason": "stop",
                }],
                "usage": { "prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4 },
            })
            .to_string(),
        )
        .create_async()
        .await;

    let provider = create_provider(&llm_config("deepseek", &server.url())).unwrap();
    let reply = provider.chat(&messages()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(provider.name(), "deepseek");
    assert_eq!(reply.content, "{}");
}

#[tokio::test]
async fn test_unauthorized_is_authentication_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body("invalid api key")
        .create_async()
        .await;

    let provider = create_provider(&llm_config("openai", &server.url())).unwrap();
    let err = provider.chat(&messages()).await.unwrap_err();

    assert!(matches!(err, ProviderError::Authentication(_)));
}

#[tokio::test]
async fn test_server_error_is_upstream_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/messages")
        .with_status(529)
        .with_body("overloaded")
        .create_async()
        .await;

    let provider = create_provider(&llm_config("claude", &server.url())).unwrap();
    let err = provider.chat(&messages()).await.unwrap_err();

    assert!(matches!(err, ProviderError::Upstream { status: 529, .. }));
}

#[tokio::test]
async fn test_missing_choices_is_invalid_payload() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "x", "choices": []}"#)
        .create_async()
        .await;

    let provider = create_provider(&llm_config("qwen", &server.url())).unwrap();
    let err = provider.chat(&messages()).await.unwrap_err();

    assert!(matches!(err, ProviderError::InvalidPayload(_)));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    // Accepts connections but never answers
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let mut config = llm_config("openai", &format!("http://{}", addr));
    config.timeout = 1;
    let provider = create_provider(&config).unwrap();
    let err = provider.chat(&messages()).await.unwrap_err();

    assert!(matches!(err, ProviderError::Timeout));
}

#[test]
fn test_unknown_provider_fails_construction() {
    let result = create_provider(&llm_config("gemini", ""));
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn test_blank_api_key_fails_construction() {
    let mut config = llm_config("openai", "");
    config.api_key = "   ".to_string();
    assert!(matches!(create_provider(&config), Err(AppError::Config(_))));
}

#[test]
fn test_each_known_provider_is_constructed() {
    for kind in ProviderKind::ALL {
        let provider = create_provider(&llm_config(kind.as_str(), "")).unwrap();
        assert_eq!(provider.name(), kind.as_str());
    }
}

#[test]
fn test_provider_names_parse_case_insensitively() {
    assert_eq!("Claude".parse::<ProviderKind>(), Ok(ProviderKind::Claude));
    assert_eq!(" DEEPSEEK ".parse::<ProviderKind>(), Ok(ProviderKind::DeepSeek));
    assert!("anthropic".parse::<ProviderKind>().is_err());
}

#[test]
fn test_default_base_urls() {
    assert_eq!(
        ProviderKind::DeepSeek.default_base_url(),
        "https://api.deepseek.com/v1"
    );
    assert_eq!(
        ProviderKind::Qwen.default_base_url(),
        "https://dashscope.aliyuncs.com/compatible-mode/v1"
    );
    assert_eq!(ProviderKind::OpenAi.default_base_url(), "https://api.openai.com/v1");
}
