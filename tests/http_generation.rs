use std::time::Duration;

use deck_quiz::generator::request::PRESENTATION_MEDIA_TYPE;
use deck_quiz::{
    ClientSettings, GenerateError, HttpQuestionService, QuestionService, ResponseError,
    SessionController, SessionEvent, SessionPhase, UploadedFile,
};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serve exactly one HTTP request with a canned reply and hand back the
/// request body that was received.
async fn serve_once(status: &'static str, body: String) -> (String, oneshot::Receiver<Value>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = Vec::new();
        let mut chunk = [0u8; 8192];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.expect("read");
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
        let content_length: usize = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .map(|v| v.trim().parse().expect("content-length"))
            .unwrap_or(0);
        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.expect("read body");
            assert!(n > 0, "client closed mid-body");
            buf.extend_from_slice(&chunk[..n]);
        }

        let request: Value =
            serde_json::from_slice(&buf[header_end..header_end + content_length]).expect("json");
        let _ = tx.send(request);

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();
    });

    (format!("http://{addr}/v1/messages"), rx)
}

fn service(url: String) -> HttpQuestionService {
    HttpQuestionService::new(ClientSettings {
        api_url: url,
        api_key: Some("test-key".into()),
        model: "test-model".into(),
        max_tokens: 4000,
        timeout: Duration::from_secs(10),
        max_document_bytes: 1024,
    })
    .expect("client")
}

fn questions_text(count: usize) -> String {
    let items: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "question": format!("Slide {i}?"),
                "options": ["A) a", "B) b", "C) c", "D) d", "E) e"],
                "correct": i % 5,
            })
        })
        .collect();
    format!("```json\n{}\n```", Value::Array(items))
}

fn reply_with_text(text: &str) -> String {
    json!({ "content": [{ "type": "text", "text": text }] }).to_string()
}

#[tokio::test]
async fn sends_document_and_parses_questions() {
    let (url, request) = serve_once("200 OK", reply_with_text(&questions_text(25))).await;
    let document = UploadedFile::new("lecture.pptx", b"PK\x03\x04".to_vec());

    let questions = service(url).generate(&document).await.expect("questions");
    assert_eq!(questions.len(), 20);
    assert_eq!(questions[3].question(), "Slide 3?");

    let body = request.await.expect("request body");
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["max_tokens"], 4000);
    let source = &body["messages"][0]["content"][0]["source"];
    assert_eq!(source["type"], "base64");
    assert_eq!(source["media_type"], PRESENTATION_MEDIA_TYPE);
    assert_eq!(source["data"], "UEsDBA==");
    assert_eq!(body["messages"][0]["content"][1]["type"], "text");
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let (url, _request) = serve_once("529 Overloaded", "{}".to_string()).await;
    let document = UploadedFile::new("lecture.pptx", vec![1, 2, 3]);

    let err = service(url).generate(&document).await.unwrap_err();
    assert!(matches!(err, GenerateError::HttpStatus(status) if status.as_u16() == 529));
}

#[tokio::test]
async fn prose_reply_is_malformed() {
    let (url, _request) = serve_once("200 OK", reply_with_text("Sorry, I can't read that.")).await;
    let document = UploadedFile::new("lecture.pptx", vec![1, 2, 3]);

    let err = service(url).generate(&document).await.unwrap_err();
    assert!(matches!(
        err,
        GenerateError::MalformedResponse(ResponseError::Json(_))
    ));
}

#[tokio::test]
async fn oversized_document_is_refused_before_sending() {
    let document = UploadedFile::new("huge.pptx", vec![0; 2048]);
    let err = service("http://127.0.0.1:9/unused".into())
        .generate(&document)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GenerateError::PayloadTooLarge { size: 2048, limit: 1024, .. }
    ));
}

#[tokio::test]
async fn failed_generation_leaves_session_in_intake_with_files() {
    let (url, _request) = serve_once("200 OK", reply_with_text("not json")).await;
    let mut session = SessionController::new();
    session.apply(SessionEvent::AddFiles(vec![UploadedFile::new(
        "lecture.pptx",
        vec![9],
    )]));

    let Some(deck_quiz::Command::Generate(job)) = session.apply(SessionEvent::Generate) else {
        panic!("expected a generation job");
    };
    let result = service(url).generate(&job.document).await;
    session.apply(SessionEvent::GenerationSettled {
        ticket: job.ticket,
        result,
    });

    assert_eq!(session.phase(), SessionPhase::Intake);
    assert_eq!(session.files().len(), 1);
    assert!(session.questions().is_empty());
    assert!(session.notice().is_some());
}
