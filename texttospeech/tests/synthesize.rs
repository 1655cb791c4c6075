use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    http::{HeaderMap, StatusCode, Uri},
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use gcptts_texttospeech::{
    AudioConfig, Client, Credentials, SynthesisInput, SynthesizeSpeechRequest,
    VoiceSelectionParams,
};
use serde_json::{json, Value};

struct Captured {
    path: String,
    headers: HeaderMap,
    body: Value,
}

type Log = Arc<Mutex<Vec<Captured>>>;

/// Starts a mock synthesize endpoint that answers every request with `reply`.
async fn serve(status: StatusCode, reply: String) -> (String, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();

    let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, body: Bytes| {
        let sink = sink.clone();
        let reply = reply.clone();
        async move {
            sink.lock().unwrap().push(Captured {
                path: uri.path().to_string(),
                headers,
                body: serde_json::from_slice(&body).unwrap_or(Value::Null),
            });
            (status, reply)
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), log)
}

fn hello_request() -> SynthesizeSpeechRequest {
    SynthesizeSpeechRequest {
        input: SynthesisInput::Text("Hello, World!".into()),
        voice: VoiceSelectionParams::new("en-US", "en-US-Wavenet-A"),
        audio_config: AudioConfig {
            pitch: Some(-3.0),
            speaking_rate: Some(1.0),
            volume_gain_db: Some(0.0),
            ..Default::default()
        },
    }
}

#[tokio::test]
async fn test_synthesize_decodes_audio() {
    let audio = b"ID3\x04\x00fake-mp3-frames".to_vec();
    let reply = json!({ "audioContent": BASE64.encode(&audio) }).to_string();
    let (endpoint, log) = serve(StatusCode::OK, reply).await;

    let client = Client::builder(Credentials::ApiKey("test-key".into()))
        .endpoint(&endpoint)
        .quota_project("my-project")
        .build()
        .unwrap();
    let resp = client.speech().synthesize(&hello_request()).await.unwrap();
    drop(client);

    assert_eq!(resp.audio, audio);

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    let req = &log[0];
    assert_eq!(req.path, "/v1/text:synthesize");
    assert_eq!(req.headers.get("x-goog-api-key").unwrap(), "test-key");
    assert_eq!(req.headers.get("x-goog-user-project").unwrap(), "my-project");
    assert_eq!(req.body["input"], json!({"text": "Hello, World!"}));
    assert_eq!(req.body["voice"]["languageCode"], "en-US");
    assert_eq!(req.body["voice"]["name"], "en-US-Wavenet-A");
    assert_eq!(req.body["audioConfig"]["audioEncoding"], "MP3");
    assert_eq!(req.body["audioConfig"]["pitch"], -3.0);
}

#[tokio::test]
async fn test_synthesize_bearer_token() {
    let reply = json!({ "audioContent": BASE64.encode(b"x") }).to_string();
    let (endpoint, log) = serve(StatusCode::OK, reply).await;

    let client = Client::builder(Credentials::AccessToken("ya29.token".into()))
        .endpoint(&endpoint)
        .build()
        .unwrap();
    client.speech().synthesize(&hello_request()).await.unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log[0].headers.get("authorization").unwrap(), "Bearer ya29.token");
    assert!(log[0].headers.get("x-goog-api-key").is_none());
}

#[tokio::test]
async fn test_synthesize_api_error() {
    let reply = json!({
        "error": {
            "code": 400,
            "message": "Voice 'xx-XX-Foo' does not exist.",
            "status": "INVALID_ARGUMENT"
        }
    })
    .to_string();
    let (endpoint, log) = serve(StatusCode::BAD_REQUEST, reply).await;

    let client = Client::builder(Credentials::ApiKey("k".into()))
        .endpoint(&endpoint)
        .build()
        .unwrap();
    let err = client
        .speech()
        .synthesize(&hello_request())
        .await
        .unwrap_err();

    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("does not exist"));
    // A failed call is never retried.
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_synthesize_unauthenticated() {
    let reply = json!({
        "error": {"code": 401, "message": "API key not valid.", "status": "UNAUTHENTICATED"}
    })
    .to_string();
    let (endpoint, _log) = serve(StatusCode::UNAUTHORIZED, reply).await;

    let client = Client::builder(Credentials::ApiKey("bad".into()))
        .endpoint(&endpoint)
        .build()
        .unwrap();
    let err = client
        .speech()
        .synthesize(&hello_request())
        .await
        .unwrap_err();
    assert!(err.is_unauthenticated());
}

#[tokio::test]
async fn test_synthesize_empty_audio_is_error() {
    let (endpoint, _log) = serve(StatusCode::OK, "{}".to_string()).await;

    let client = Client::builder(Credentials::ApiKey("k".into()))
        .endpoint(&endpoint)
        .build()
        .unwrap();
    let err = client
        .speech()
        .synthesize(&hello_request())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no audio content"));
}
