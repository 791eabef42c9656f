//! 使用真实 HTTP 服务端 (wiremock) 验证 reqwest 传输层与请求封装的整体行为

use admin_console::api;
use admin_console::auth;
use admin_console::notify::ReloginAnswer;
use admin_console::{
    ApiError, ClientConfig, MemoryTokenStorage, Notifier, ReqwestHttpClient, RouteTable, Service,
    SessionStore, TokenStorage,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct CollectingNotifier {
    errors: RefCell<Vec<String>>,
}

impl Notifier for CollectingNotifier {
    fn error(&self, message: &str, _duration: Duration) {
        self.errors.borrow_mut().push(message.to_string());
    }

    fn confirm_relogin(&self, on_answer: ReloginAnswer) {
        on_answer(false);
    }

    fn reload(&self) {}
}

fn service(server: &MockServer) -> (Rc<CollectingNotifier>, Service) {
    let config = ClientConfig::new(format!("{}/api", server.uri()));
    let store = Rc::new(SessionStore::new(
        Rc::new(MemoryTokenStorage::new(&config.token_key)),
        Rc::new(RouteTable::default()),
    ));
    let client = Rc::new(ReqwestHttpClient::new(config.timeout).unwrap());
    let notifier = Rc::new(CollectingNotifier::default());
    let svc = Service::new(config, client, notifier.clone(), store);
    (notifier, svc)
}

#[tokio::test]
async fn test_login_then_authorized_profile_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "account": "bob", "password": "x" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200, "msg": "登录成功", "data": { "token": "abc", "res": null }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/info"))
        .and(header("Authorization", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200, "data": {
                "id": "1", "account": "bob", "name": "Bob",
                "email": null, "avatar": null, "role": "admin"
            }
        })))
        .mount(&server)
        .await;

    let (notifier, svc) = service(&server);
    auth::login(&svc, "  bob ", "x").await.unwrap();
    assert_eq!(svc.store().storage().get().as_deref(), Some("abc"));

    let profile = auth::fetch_profile(&svc).await.unwrap();
    assert_eq!(profile.account, "bob");
    assert!(notifier.errors.borrow().is_empty());
}

#[tokio::test]
async fn test_log_export_returns_unparsed_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/log/export"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Disposition", "attachment; filename=\"log.xlsx\"")
                .set_body_bytes(vec![0x50u8, 0x4b, 0x03, 0x04]),
        )
        .mount(&server)
        .await;

    let (_, svc) = service(&server);
    let raw = api::log::admin_export_excel(&svc).await.unwrap();
    assert_eq!(raw.status, 200);
    assert_eq!(raw.body, vec![0x50, 0x4b, 0x03, 0x04]);
    assert_eq!(raw.file_name().as_deref(), Some("log.xlsx"));
}

#[tokio::test]
async fn test_business_error_message_passthrough() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/example/ip2region/region/by/ip"))
        .and(query_param("ip", "127.0.0.1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "code": 500, "msg": "boom" })),
        )
        .mount(&server)
        .await;

    let (notifier, svc) = service(&server);
    let err = api::example::region_by_ip(&svc, "127.0.0.1")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Business { code: 500, .. }));
    assert_eq!(err.message(), "boom");
    assert_eq!(*notifier.errors.borrow(), vec!["boom".to_string()]);
}

#[tokio::test]
async fn test_session_expiry_clears_persisted_token() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/log/clear"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": 401, "msg": "未登录" })),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::new(format!("{}/api", server.uri()));
    let storage = Rc::new(MemoryTokenStorage::new(&config.token_key).with_token("old"));
    let store = Rc::new(SessionStore::new(storage.clone(), Rc::new(RouteTable::default())));
    let svc = Service::new(
        config,
        Rc::new(ReqwestHttpClient::new(None).unwrap()),
        Rc::new(CollectingNotifier::default()),
        store,
    );

    let err = api::log::admin_clear_log(&svc).await.unwrap_err();
    assert!(err.is_session_expired());
    assert_eq!(storage.get(), None);
    assert!(!svc.store().session().has_token());
}
