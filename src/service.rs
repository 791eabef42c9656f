//! 请求封装 - 核心引擎
//!
//! 所有接口调用都经过 `Service::send`：
//! 附加令牌 -> 发送 -> 识别二进制接口 -> 解析 `{code, msg, data}` -> 统一提示。
//! 失败不会重试，每个错误只向调用方抛出一次。

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::notify::Notifier;
use crate::request::{FilePart, HttpClient, HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::session::SessionStore;
use admin_console_shared::{Envelope, HEADER_AUTHORIZATION, is_binary_endpoint};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::rc::Rc;

// =========================================================
// 请求描述 (Request Descriptor)
// =========================================================

/// 单个接口调用的描述：方法、路径、查询参数、请求体、是否期望二进制响应
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub path: String,
    query: Vec<String>,
    body: Option<RequestBody>,
    binary: bool,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            binary: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// 追加查询参数；可多次调用（如筛选条件 + 分页）
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> ApiResult<Self> {
        let encoded = serde_urlencoded::to_string(query)?;
        if !encoded.is_empty() {
            self.query.push(encoded);
        }
        Ok(self)
    }

    /// JSON 请求体
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        let text = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(RequestBody::Json(text));
        Ok(self)
    }

    /// 以 multipart 表单上传文件
    pub fn file(mut self, part: FilePart) -> Self {
        match &mut self.body {
            Some(RequestBody::Multipart(parts)) => parts.push(part),
            _ => self.body = Some(RequestBody::Multipart(vec![part])),
        }
        self
    }

    /// 标记期望二进制响应（responseType: blob）
    pub fn binary(mut self) -> Self {
        self.binary = true;
        self
    }

    pub fn expects_binary(&self) -> bool {
        self.binary
    }

    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query.join("&"))
        }
    }
}

// =========================================================
// 响应 (Reply)
// =========================================================

/// 成功结果：信封中的 `data`，或二进制接口的原始响应
#[derive(Debug, Clone)]
pub enum Reply {
    Data(serde_json::Value),
    Raw(HttpResponse),
}

impl Reply {
    pub fn into_data<T: DeserializeOwned>(self) -> ApiResult<T> {
        match self {
            Reply::Data(value) => serde_json::from_value(value).map_err(ApiError::from),
            Reply::Raw(_) => Err(ApiError::UnexpectedReply {
                expected: "data",
                found: "raw",
            }),
        }
    }

    pub fn into_raw(self) -> ApiResult<HttpResponse> {
        match self {
            Reply::Raw(resp) => Ok(resp),
            Reply::Data(_) => Err(ApiError::UnexpectedReply {
                expected: "raw",
                found: "data",
            }),
        }
    }

    /// 只关心成功与否，忽略 data
    pub fn done(self) -> ApiResult<()> {
        match self {
            Reply::Data(_) => Ok(()),
            Reply::Raw(_) => Err(ApiError::UnexpectedReply {
                expected: "data",
                found: "raw",
            }),
        }
    }
}

// =========================================================
// 服务 (Service)
// =========================================================

/// HTTP 请求封装
///
/// 会话上下文通过 `SessionStore` 显式注入，而不是全局单例。
pub struct Service {
    config: ClientConfig,
    client: Rc<dyn HttpClient>,
    notifier: Rc<dyn Notifier>,
    store: Rc<SessionStore>,
}

impl Service {
    pub fn new(
        config: ClientConfig,
        client: Rc<dyn HttpClient>,
        notifier: Rc<dyn Notifier>,
        store: Rc<SessionStore>,
    ) -> Self {
        Self {
            config,
            client,
            notifier,
            store,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &Rc<SessionStore> {
        &self.store
    }

    pub fn notifier(&self) -> &Rc<dyn Notifier> {
        &self.notifier
    }

    /// 构造实际请求；会话中有令牌时附加 `Authorization`
    pub fn build(&self, spec: RequestSpec) -> HttpRequest {
        let url = self.config.url(&spec.path_and_query());
        let mut req = HttpRequest::new(&url, spec.method);
        req.expect_binary = spec.binary;
        req.body = spec.body;

        let token = self.store.token();
        if !token.is_empty() {
            req = req.with_header(HEADER_AUTHORIZATION, &token);
        }
        req
    }

    pub async fn send(&self, spec: RequestSpec) -> ApiResult<Reply> {
        let req = self.build(spec);
        let url = req.url.clone();
        let method = req.method.as_str();
        tracing::debug!(method, url = %url, "sending request");

        let resp = match self.client.send(req).await {
            Ok(resp) => resp,
            Err(e) => return Err(self.fail_transport(&url, e)),
        };

        if !(200..300).contains(&resp.status) {
            let e = ApiError::Transport(format!("Request failed with status code {}", resp.status));
            return Err(self.fail_transport(&url, e));
        }

        // 二进制接口直接视为成功，原样返回
        if is_binary_endpoint(self.config.endpoint_path(&url)) {
            tracing::debug!(url = %url, bytes = resp.body.len(), "raw response");
            return Ok(Reply::Raw(resp));
        }

        let envelope: Envelope = match serde_json::from_slice(&resp.body) {
            Ok(envelope) => envelope,
            Err(e) => {
                let e = ApiError::Decode(e.to_string());
                tracing::error!(url = %url, error = %e, "malformed envelope");
                self.notifier.error(&e.message(), self.config.notify_duration);
                return Err(e);
            }
        };

        if envelope.is_success() {
            return Ok(Reply::Data(envelope.data.unwrap_or(serde_json::Value::Null)));
        }

        let msg = envelope.message().to_string();
        self.notifier.error(&msg, self.config.notify_duration);

        if envelope.is_unauthorized() {
            tracing::warn!(url = %url, msg = %msg, "session expired");
            self.expire_session();
            return Err(ApiError::SessionExpired { msg });
        }

        tracing::warn!(url = %url, code = envelope.code, msg = %msg, "request rejected");
        Err(ApiError::Business {
            code: envelope.code,
            msg,
        })
    }

    /// 返回 `data` 并反序列化为目标类型
    pub async fn fetch<T: DeserializeOwned>(&self, spec: RequestSpec) -> ApiResult<T> {
        self.send(spec).await?.into_data().map_err(|e| {
            if matches!(e, ApiError::Decode(_)) {
                tracing::error!(error = %e, "unexpected data shape");
                self.notifier.error(&e.message(), self.config.notify_duration);
            }
            e
        })
    }

    /// 只关心是否成功
    pub async fn execute(&self, spec: RequestSpec) -> ApiResult<()> {
        self.send(spec).await?.done()
    }

    /// 二进制接口，返回原始响应
    pub async fn download(&self, spec: RequestSpec) -> ApiResult<HttpResponse> {
        self.send(spec.binary()).await?.into_raw()
    }

    fn fail_transport(&self, url: &str, e: ApiError) -> ApiError {
        tracing::error!(url, error = %e, "request failed");
        self.notifier.error(&e.message(), self.config.notify_duration);
        e
    }

    /// 401：本地会话立即失效，随后弹出确认框但不等待作答；
    /// 确认则重新加载外壳进入登录页，取消则留在当前页面
    fn expire_session(&self) {
        self.store.reset_token();
        let notifier = self.notifier.clone();
        self.notifier.confirm_relogin(Box::new(move |confirmed| {
            if confirmed {
                notifier.reload();
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::request::MockHttpClient;
    use crate::route::{Navigation, RouteDescriptor, RouteTable};
    use crate::storage::{MemoryTokenStorage, TokenStorage};
    use serde_json::json;

    struct Harness {
        client: Rc<MockHttpClient>,
        notifier: Rc<RecordingNotifier>,
        service: Service,
    }

    fn harness(token: Option<&str>) -> Harness {
        let storage = match token {
            Some(t) => MemoryTokenStorage::new("k").with_token(t),
            None => MemoryTokenStorage::new("k"),
        };
        let store = Rc::new(SessionStore::new(
            Rc::new(storage),
            Rc::new(RouteTable::default()),
        ));
        let client = Rc::new(MockHttpClient::new());
        let notifier = Rc::new(RecordingNotifier::new());
        let service = Service::new(
            ClientConfig::new("http://host/api"),
            client.clone(),
            notifier.clone(),
            store,
        );
        Harness {
            client,
            notifier,
            service,
        }
    }

    #[tokio::test]
    async fn test_success_resolves_exactly_data() {
        let h = harness(None);
        h.client.mock_response(
            "http://host/api/example/ip2region/region/by/ip",
            200,
            json!({ "code": 200, "msg": "ok", "data": { "region": "x" } }),
        );
        let reply = h
            .service
            .send(RequestSpec::get("/example/ip2region/region/by/ip"))
            .await
            .unwrap();
        match reply {
            Reply::Data(v) => assert_eq!(v, json!({ "region": "x" })),
            Reply::Raw(_) => panic!("expected data"),
        }
        assert!(h.notifier.errors.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_token_attached_only_when_present() {
        let h = harness(None);
        h.client.mock_response(
            "http://host/api/captcha",
            200,
            json!({ "code": 200, "data": null }),
        );
        h.service.execute(RequestSpec::post("/captcha")).await.unwrap();
        assert!(h.client.last_request().unwrap().header("Authorization").is_none());

        let h = harness(Some("tok-1"));
        h.client.mock_response(
            "http://host/api/captcha",
            200,
            json!({ "code": 200, "data": null }),
        );
        h.service.execute(RequestSpec::post("/captcha")).await.unwrap();
        assert_eq!(
            h.client.last_request().unwrap().header("Authorization"),
            Some("tok-1")
        );
    }

    #[tokio::test]
    async fn test_business_error_rejects_with_msg_and_notifies() {
        let h = harness(Some("t"));
        h.client.mock_response(
            "http://host/api/admin/user/add",
            200,
            json!({ "code": 500, "msg": "boom" }),
        );
        let err = h
            .service
            .send(RequestSpec::post("/admin/user/add"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "boom");
        assert_eq!(err.code(), Some(500));
        assert_eq!(*h.notifier.errors.borrow(), vec!["boom".to_string()]);
        assert_eq!(h.notifier.confirms.get(), 0);
        // 业务错误不影响会话
        assert_eq!(h.service.store().token(), "t");
    }

    #[tokio::test]
    async fn test_binary_endpoints_bypass_envelope() {
        let h = harness(Some("t"));
        for path in admin_console_shared::BINARY_ENDPOINTS {
            let url = format!("http://host/api{}", path);
            h.client.mock_raw(
                &url,
                HttpResponse::new(200, vec![0x50, 0x4b, 0x03, 0x04])
                    .with_header("Content-Type", "application/octet-stream"),
            );
            let reply = h
                .service
                .send(RequestSpec::get(*path).query(&[("v", "1")]).unwrap())
                .await
                .unwrap();
            let raw = reply.into_raw().unwrap();
            assert_eq!(raw.body, vec![0x50, 0x4b, 0x03, 0x04]);
        }
        assert!(h.notifier.errors.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_log_export_resolves_raw_response() {
        let h = harness(Some("t"));
        h.client.mock_raw(
            "http://host/api/admin/log/export",
            HttpResponse::new(200, "not an envelope")
                .with_header("Content-Disposition", "attachment; filename=\"log.xlsx\""),
        );
        let raw = h
            .service
            .download(RequestSpec::get("/admin/log/export"))
            .await
            .unwrap();
        assert_eq!(raw.text(), "not an envelope");
        assert_eq!(raw.file_name().as_deref(), Some("log.xlsx"));
        assert!(h.client.last_request().unwrap().expect_binary);
    }

    #[tokio::test]
    async fn test_unauthorized_resets_session_and_routes() {
        let h = harness(Some("stale"));
        let store = h.service.store().clone();
        store
            .routes()
            .add_routes(vec![RouteDescriptor::new("/extra")]);
        h.client.mock_response(
            "http://host/api/admin/log/page",
            200,
            json!({ "code": 401, "msg": "token invalid" }),
        );

        let err = h
            .service
            .send(RequestSpec::get("/admin/log/page"))
            .await
            .unwrap_err();
        assert!(err.is_session_expired());
        assert_eq!(err.message(), "token invalid");
        assert_eq!(h.notifier.confirms.get(), 1);
        assert_eq!(h.notifier.reloads.get(), 1);
        assert_eq!(store.storage().get(), None);
        assert_eq!(store.routes().dynamic_len(), 0);
        assert_eq!(
            store.routes().guard("/log/manage", &store.session()),
            Navigation::Redirect("/login?redirect=/log/manage".into())
        );
    }

    #[tokio::test]
    async fn test_unauthorized_cancel_stays_without_reload() {
        let h = harness(Some("stale"));
        h.notifier.answer(false);
        h.client.mock_response(
            "http://host/api/auth/info",
            200,
            json!({ "code": 401, "msg": "expired" }),
        );
        let err = h.service.send(RequestSpec::get("/auth/info")).await.unwrap_err();
        assert!(err.is_session_expired());
        assert_eq!(h.notifier.reloads.get(), 0);
        assert!(!h.service.store().session().has_token());
    }

    #[tokio::test]
    async fn test_unauthorized_rejects_while_dialog_unanswered() {
        let h = harness(Some("stale"));
        h.notifier.hold();
        h.client.mock_response(
            "http://host/api/auth/info",
            200,
            json!({ "code": 401 }),
        );

        let result = tokio::time::timeout(
            std::time::Duration::from_millis(500),
            h.service.send(RequestSpec::get("/auth/info")),
        )
        .await
        .expect("send must not wait for the dialog");
        assert!(result.unwrap_err().is_session_expired());
        assert_eq!(h.notifier.confirms.get(), 1);
        assert_eq!(h.notifier.reloads.get(), 0);
        assert!(!h.service.store().session().has_token());

        // 用户稍后确认，外壳才重新加载
        h.notifier.respond(true);
        assert_eq!(h.notifier.reloads.get(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_raw_message_once() {
        let h = harness(None);
        h.client
            .mock_failure("http://host/api/auth/login", "Network Error");
        let err = h
            .service
            .send(RequestSpec::post("/auth/login"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Network Error");
        assert_eq!(*h.notifier.errors.borrow(), vec!["Network Error".to_string()]);
        assert_eq!(h.client.requests.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_http_status_error_is_transport_error() {
        let h = harness(None);
        let err = h
            .service
            .send(RequestSpec::get("/missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(err.message(), "Request failed with status code 404");
    }

    #[tokio::test]
    async fn test_malformed_envelope_is_decode_error() {
        let h = harness(None);
        h.client.mock_raw(
            "http://host/api/user/update/name",
            HttpResponse::new(200, "<html>"),
        );
        let err = h
            .service
            .send(RequestSpec::put("/user/update/name"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(h.notifier.errors.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_data_shape_mismatch_is_reported_once() {
        let h = harness(None);
        h.client.mock_response(
            "http://host/api/auth/info",
            200,
            json!({ "code": 200, "data": { "id": 7 } }),
        );
        let err = h
            .service
            .fetch::<Option<admin_console_shared::dto::AuthProfile>>(RequestSpec::get("/auth/info"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(err.is_reported());
        assert_eq!(h.notifier.errors.borrow().len(), 1);
    }

    #[test]
    fn test_spec_query_and_body_building() {
        let spec = RequestSpec::get("/admin/log/page")
            .query(&[("uri", "/auth/login")])
            .unwrap()
            .query(&admin_console_shared::PageModel::new(2, 20))
            .unwrap();
        assert_eq!(
            spec.path_and_query(),
            "/admin/log/page?uri=%2Fauth%2Flogin&page=2&size=20"
        );

        let upload = RequestSpec::post("/admin/file/add")
            .file(FilePart::new("file", "a.txt", b"hi".to_vec()))
            .file(FilePart::new("file", "b.txt", b"yo".to_vec()));
        assert!(matches!(upload.body, Some(RequestBody::Multipart(ref p)) if p.len() == 2));
    }
}
