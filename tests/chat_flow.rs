use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use routewise::Config;
use routewise::assistant::{Orchestrator, TriggeredAction};
use routewise::providers::{FailingProvider, GeminiProvider, Provider, ScriptedProvider};
use routewise::session::{AnalysisResult, SessionState};
use routewise::traffic::types::TrafficLabel;

fn orchestrator_with(provider: Arc<dyn Provider>) -> Orchestrator {
    Orchestrator::new(provider, Config::default())
}

#[tokio::test]
async fn route_request_announces_action_and_carries_destination() {
    let provider = Arc::new(ScriptedProvider::new(["On it, routing you to Andheri."]));
    let mut orchestrator = orchestrator_with(provider.clone());

    let outcome = orchestrator
        .respond("navigate to andheri station", &SessionState::new())
        .await;

    assert_eq!(outcome.reply, "On it, routing you to Andheri.");
    assert_eq!(
        outcome.action,
        Some(TriggeredAction::Route {
            destination: Some("andheri station".into())
        })
    );

    let prompts = provider.recorded_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("User message: navigate to andheri station"));
}

#[tokio::test]
async fn analysis_context_reaches_the_provider_on_general_chat() {
    let provider = Arc::new(ScriptedProvider::new(["Sounds busy out there."]));
    let mut orchestrator = orchestrator_with(provider.clone());

    let mut session = SessionState::new();
    session.record_analysis(AnalysisResult {
        label: TrafficLabel::HeavyTraffic,
        confidence: 0.91,
        vehicle_count: 120,
        clear_time_min: 45,
    });

    orchestrator.respond("how bad is it?", &session).await;

    let prompts = provider.recorded_prompts();
    assert!(prompts[0].contains("Heavy Traffic"));
    assert!(prompts[0].contains("91.0%"));
}

#[tokio::test]
async fn provider_failure_yields_fallback_reply_and_keeps_history() {
    let provider = Arc::new(FailingProvider::new("quota exhausted"));
    let mut orchestrator = orchestrator_with(provider);

    let outcome = orchestrator.respond("hello", &SessionState::new()).await;

    assert!(outcome.reply.starts_with("I'm having trouble connecting"));
    assert!(outcome.reply.contains("quota exhausted"));
    // Both turns land in history even on failure.
    assert_eq!(orchestrator.history().len(), 2);
}

#[tokio::test]
async fn conversation_history_flows_into_later_prompts() {
    let provider = Arc::new(ScriptedProvider::new(["first reply", "second reply"]));
    let mut orchestrator = orchestrator_with(provider.clone());
    let session = SessionState::new();

    orchestrator.respond("remember the word pelican", &session).await;
    orchestrator.respond("what word did I say?", &session).await;

    let prompts = provider.recorded_prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("Recent conversation:"));
    assert!(prompts[1].contains("remember the word pelican"));
    assert!(prompts[1].contains("first reply"));
}

#[tokio::test]
async fn gemini_provider_round_trip_against_mock_server() {
    let server = MockServer::start().await;

    let body = json!({
        "candidates": [
            {"content": {"parts": [{"text": "Traffic looks light right now."}]}}
        ]
    });
    Mock::given(method("POST"))
        .and(path("/models/gemini-pro:generateContent"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config {
        api_key: Some("test-key".into()),
        ..Config::default()
    };
    let provider = GeminiProvider::new(&config).with_base_url(server.uri());

    let reply = provider
        .generate(Some("You are a traffic assistant."), "how is traffic?")
        .await
        .expect("generation succeeds");
    assert_eq!(reply, "Traffic looks light right now.");
    server.verify().await;
}

#[tokio::test]
async fn gemini_api_error_body_surfaces_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"error": {"message": "API key not valid"}})),
        )
        .mount(&server)
        .await;

    let config = Config {
        api_key: Some("bad-key".into()),
        ..Config::default()
    };
    let provider = GeminiProvider::new(&config).with_base_url(server.uri());

    let err = provider
        .generate(None, "hello")
        .await
        .expect_err("error body should fail the call");
    assert!(err.to_string().contains("API key not valid"));
}
