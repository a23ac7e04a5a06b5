//! Gemini inference against a local mock server.

use assert_matches::assert_matches;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use mockito::Matcher;
use omniconvert_core::converter::InferenceService;
use omniconvert_core::entry::FilePayload;
use omniconvert_core::error::ConversionError;
use omniconvert_gemini::service::{EMPTY_IMAGE_RESULT, EMPTY_TEXT_RESULT};
use omniconvert_gemini::{GeminiApi, GeminiInference, ModelConfig};
use serde_json::json;

const KEY: &str = "test-key";

fn inference(url: String, key: Option<&str>) -> GeminiInference {
    GeminiInference::new(
        GeminiApi::new(url, key.map(str::to_string)),
        ModelConfig::default(),
    )
}

fn ok_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

#[tokio::test]
async fn text_conversion_sends_prompt_and_content() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-3-flash-preview:generateContent")
        .match_header("x-goog-api-key", KEY)
        .match_body(Matcher::PartialJson(json!({
            "contents": [{
                "parts": [{
                    "text": "Convert the following content into valid YAML. Only output the YAML code block.\n\nContent:\na = 1"
                }]
            }]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ok_body("a: 1"))
        .create_async()
        .await;

    let result = inference(server.url(), Some(KEY))
        .infer_from_text("a = 1", "text/yaml")
        .await
        .unwrap();

    assert_eq!(result, "a: 1");
    mock.assert_async().await;
}

#[tokio::test]
async fn image_conversion_sends_inline_base64() {
    let mut server = mockito::Server::new_async().await;
    let bytes = vec![0x89, b'P', b'N', b'G', 0, 1, 2];
    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.5-flash-image:generateContent")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{
                "parts": [
                    {"inlineData": {"mimeType": "image/png", "data": STANDARD.encode(&bytes)}},
                    {"text": "Describe this image."}
                ]
            }]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ok_body("A tiny image."))
        .create_async()
        .await;

    let payload = FilePayload::new("pic.png", "image/png", bytes);
    let result = inference(server.url(), Some(KEY))
        .infer_from_image(&payload, "image/unknown-ai-target")
        .await
        .unwrap();

    assert_eq!(result, "A tiny image.");
    mock.assert_async().await;
}

#[tokio::test]
async fn document_always_uses_pdf_media_type() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-3-flash-preview:generateContent")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{
                "parts": [{"inlineData": {"mimeType": "application/pdf"}}]
            }]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ok_body("# Title"))
        .create_async()
        .await;

    let payload = FilePayload::new("doc.pdf", "application/x-pdf", b"%PDF-1.7".to_vec());
    let result = inference(server.url(), Some(KEY))
        .infer_from_document(&payload, "text/markdown")
        .await
        .unwrap();

    assert_eq!(result, "# Title");
    mock.assert_async().await;
}

#[tokio::test]
async fn audio_uses_audio_model() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock(
            "POST",
            "/v1beta/models/gemini-2.5-flash-native-audio-preview-09-2025:generateContent",
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ok_body("{\"sentiment\":\"positive\"}"))
        .create_async()
        .await;

    let payload = FilePayload::new("talk.wav", "audio/wav", b"RIFF".to_vec());
    let result = inference(server.url(), Some(KEY))
        .infer_from_audio(&payload, "application/json")
        .await
        .unwrap();

    assert_eq!(result, "{\"sentiment\":\"positive\"}");
    mock.assert_async().await;
}

#[tokio::test]
async fn empty_response_uses_modality_fallback() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#)
        .expect(2)
        .create_async()
        .await;

    let svc = inference(server.url(), Some(KEY));

    let text = svc.infer_from_text("x", "text/summary").await.unwrap();
    assert_eq!(text, EMPTY_TEXT_RESULT);

    let payload = FilePayload::new("a.png", "image/png", b"x".to_vec());
    let image = svc.infer_from_image(&payload, "text/description").await.unwrap();
    assert_eq!(image, EMPTY_IMAGE_RESULT);
}

#[tokio::test]
async fn api_error_maps_to_service_error_with_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", Matcher::Any)
        .with_status(429)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#,
        )
        .create_async()
        .await;

    let err = inference(server.url(), Some(KEY))
        .infer_from_text("x", "text/plain")
        .await
        .unwrap_err();

    assert_matches!(
        err,
        ConversionError::Service(ref msg)
            if msg.contains("429") && msg.contains("Resource has been exhausted")
    );
}

#[tokio::test]
async fn malformed_body_is_service_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json")
        .create_async()
        .await;

    let err = inference(server.url(), Some(KEY))
        .infer_from_text("x", "text/plain")
        .await
        .unwrap_err();

    assert_matches!(err, ConversionError::Service(_));
}

#[tokio::test]
async fn missing_key_fails_without_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = inference(server.url(), None)
        .infer_from_text("x", "text/plain")
        .await
        .unwrap_err();

    assert_matches!(err, ConversionError::Service(ref msg) if msg.contains("GEMINI_API_KEY"));
    mock.assert_async().await;
}
