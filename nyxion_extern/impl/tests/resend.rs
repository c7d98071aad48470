use std::net::SocketAddr;

use nyxion_extern_contracts::resend::{ResendApiService, ResendEmail, ResendSendResponse};
use nyxion_extern_impl::{
    http::HttpClient,
    resend::{ResendApiServiceConfig, ResendApiServiceImpl},
};
use serde_json::{json, Value};

const API_KEY: &str = "re_test";

#[tokio::test]
async fn send_html_email() {
    let (sut, addr) = make_sut().await;

    let result = sut
        .send_email(
            API_KEY,
            ResendEmail {
                from: "Nyxion <info@nyxionsec.com>".into(),
                to: vec!["info@nyxionsec.com".into()],
                subject: "The Subject".into(),
                html: Some("<h1>Hello World!</h1>".into()),
                text: None,
                reply_to: Some("max@example.com".into()),
            },
        )
        .await
        .unwrap();

    let ResendSendResponse::Sent { id } = result else {
        panic!("email was not sent: {result:?}");
    };

    let stored = fetch_email(addr, &id).await;
    assert_eq!(
        stored,
        json!({
            "from": "Nyxion <info@nyxionsec.com>",
            "to": ["info@nyxionsec.com"],
            "subject": "The Subject",
            "html": "<h1>Hello World!</h1>",
            "reply_to": "max@example.com",
        })
    );
}

#[tokio::test]
async fn invalid_api_key() {
    let (sut, _) = make_sut().await;

    let result = sut
        .send_email(
            "re_wrong",
            ResendEmail {
                from: "info@nyxionsec.com".into(),
                to: vec!["info@nyxionsec.com".into()],
                subject: "The Subject".into(),
                html: None,
                text: Some("Hello World!".into()),
                reply_to: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(
        result,
        ResendSendResponse::Rejected {
            status: 401,
            message: "API key is invalid".into()
        }
    );
}

#[tokio::test]
async fn missing_recipient() {
    let (sut, _) = make_sut().await;

    let result = sut
        .send_email(
            API_KEY,
            ResendEmail {
                from: "info@nyxionsec.com".into(),
                to: vec![],
                subject: "The Subject".into(),
                html: None,
                text: Some("Hello World!".into()),
                reply_to: None,
            },
        )
        .await
        .unwrap();

    assert!(matches!(
        result,
        ResendSendResponse::Rejected { status: 422, .. }
    ));
}

async fn make_sut() -> (ResendApiServiceImpl, SocketAddr) {
    let addr = nyxion_testing::spawn(nyxion_testing::resend::router(API_KEY.into()))
        .await
        .unwrap();
    let endpoint = format!("http://{addr}/").parse().unwrap();
    let sut = ResendApiServiceImpl::new(
        ResendApiServiceConfig::new(Some(endpoint)).unwrap(),
        HttpClient::default(),
    );
    (sut, addr)
}

async fn fetch_email(addr: SocketAddr, id: &str) -> Value {
    reqwest::Client::new()
        .get(format!("http://{addr}/emails/{id}"))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .json()
        .await
        .unwrap()
}
