//! End-to-end send scenarios against a scripted transport

use omnichat_core::{
    ChatConfig, ChatService, Command, Message, ProviderName, ScriptedTransport,
    NOT_IMPLEMENTED_TEXT,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn config_with_keys() -> ChatConfig {
    let mut config = ChatConfig::default();
    config.providers.openai.api_key = Some("sk-openai".into());
    config.providers.anthropic.api_key = Some("sk-ant".into());
    config.providers.gemini.api_key = Some("AIza".into());
    config
}

fn send(service: &mut ChatService, text: &str) {
    service.send(Command::set_draft(text)).unwrap();
    service.send(Command::SendDraft).unwrap();
}

fn settle(service: &mut ChatService) {
    while service.is_awaiting_reply() {
        assert!(
            service.wait_for_event(Duration::from_secs(5)),
            "reply never arrived"
        );
    }
}

#[test]
fn chatgpt_hello_scenario() {
    let transport = Arc::new(ScriptedTransport::new().with_json(json!({
        "choices": [{ "message": { "content": "Hi there" } }]
    })));
    let mut service = ChatService::with_transport(&config_with_keys(), transport.clone());

    service.send(Command::select(ProviderName::ChatGpt)).unwrap();
    send(&mut service, "Hello");
    settle(&mut service);

    assert_eq!(
        service.messages(),
        &[
            Message::user("Hello"),
            Message::reply(ProviderName::ChatGpt, "Hi there"),
        ]
    );

    let request = transport.last_request().unwrap();
    assert_eq!(request.url, "https://api.openai.com/v1/chat/completions");
    assert_eq!(request.header("Authorization"), Some("Bearer sk-openai"));
}

#[test]
fn grok_scenario_makes_no_network_call() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut service = ChatService::with_transport(&config_with_keys(), transport.clone());

    service.send(Command::select(ProviderName::Grok)).unwrap();
    send(&mut service, "test");
    settle(&mut service);

    assert_eq!(
        service.messages(),
        &[
            Message::user("test"),
            Message::reply(ProviderName::Grok, NOT_IMPLEMENTED_TEXT),
        ]
    );
    assert_eq!(service.messages()[1].sender().label(), "Grok (XAI)");
    assert_eq!(transport.calls(), 0);
}

#[test]
fn each_cycle_adds_two_messages_across_providers() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .with_json(json!({ "content": [{ "text": "claude says" }] }))
            .with_json(json!({ "candidates": [{ "content": { "parts": [{ "text": "gemini says" }] } }] })),
    );
    let mut service = ChatService::with_transport(&config_with_keys(), transport.clone());

    service.send(Command::select(ProviderName::Claude)).unwrap();
    send(&mut service, "one");
    settle(&mut service);
    assert_eq!(service.messages().len(), 2);

    // An empty draft does not start a cycle
    send(&mut service, "");
    assert_eq!(service.messages().len(), 2);

    service.send(Command::select(ProviderName::Gemini)).unwrap();
    send(&mut service, "two");
    settle(&mut service);
    assert_eq!(service.messages().len(), 4);
    assert_eq!(
        service.messages()[3],
        Message::reply(ProviderName::Gemini, "gemini says")
    );
    assert_eq!(transport.calls(), 2);
}

#[test]
fn failed_call_becomes_conversation_content() {
    // No scripted response: the transport fails like a dead network
    let transport = Arc::new(ScriptedTransport::new());
    let mut service = ChatService::with_transport(&ChatConfig::default(), transport.clone());

    service.send(Command::select(ProviderName::Claude)).unwrap();
    send(&mut service, "anyone there?");
    settle(&mut service);

    assert_eq!(
        service.messages()[1],
        Message::reply(ProviderName::Claude, "Error contacting Claude.")
    );
    // An empty credential is still sent
    assert_eq!(
        transport.last_request().unwrap().header("x-api-key"),
        Some("")
    );
}

#[test]
fn clear_twice_matches_clear_once() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut service = ChatService::with_transport(&config_with_keys(), transport);

    service.send(Command::select(ProviderName::Perplexity)).unwrap();
    send(&mut service, "hi");
    service.send(Command::set_draft("unsent")).unwrap();

    service.send(Command::Clear).unwrap();
    assert!(service.messages().is_empty());
    assert_eq!(service.draft(), "");

    service.send(Command::Clear).unwrap();
    assert!(service.messages().is_empty());
    assert_eq!(service.draft(), "");
}
