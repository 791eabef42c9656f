//! 接口函数
//!
//! 每个后端接口对应一个 async 函数，只负责构造请求描述并交给 `Service`。

pub mod admin;
pub mod auth;
pub mod example;
pub mod file;
pub mod log;
pub mod user;

#[cfg(test)]
mod tests {
    use crate::config::ClientConfig;
    use crate::error::ApiError;
    use crate::notify::RecordingNotifier;
    use crate::request::{FilePart, HttpResponse, MockHttpClient, RequestBody};
    use crate::route::RouteTable;
    use crate::service::Service;
    use crate::session::SessionStore;
    use crate::storage::MemoryTokenStorage;
    use admin_console_shared::PageModel;
    use admin_console_shared::dto::{LogPageQuery, RegisterRequest, UpdateNameRequest, UserPageQuery};
    use chrono::NaiveDate;
    use serde_json::json;
    use std::rc::Rc;

    fn setup() -> (Rc<MockHttpClient>, Service) {
        let store = Rc::new(SessionStore::new(
            Rc::new(MemoryTokenStorage::new("k").with_token("t")),
            Rc::new(RouteTable::default()),
        ));
        let client = Rc::new(MockHttpClient::new());
        let svc = Service::new(
            ClientConfig::new("/api"),
            client.clone(),
            Rc::new(RecordingNotifier::new()),
            store,
        );
        (client, svc)
    }

    #[tokio::test]
    async fn test_log_page_sends_filter_and_paging() {
        let (client, svc) = setup();
        client.mock_response(
            "/api/admin/log/page",
            200,
            json!({ "code": 200, "data": {
                "records": [{ "id": "1", "uri": "/auth/login", "result": 0 }],
                "total": 1, "size": 10, "current": 1, "pages": 1
            } }),
        );
        let query = LogPageQuery {
            user_account: Some("bob".into()),
            ..Default::default()
        };
        let page = super::log::admin_page_log(&svc, &query, PageModel::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.records[0].uri, "/auth/login");
        assert_eq!(
            client.last_request().unwrap().url,
            "/api/admin/log/page?userAccount=bob&page=1&size=10"
        );
    }

    #[tokio::test]
    async fn test_delete_puts_id_in_path() {
        let (client, svc) = setup();
        client.mock_response(
            "/api/admin/user/delete/42",
            200,
            json!({ "code": 200, "msg": "删除成功" }),
        );
        super::user::admin_delete_user(&svc, "42").await.unwrap();
        let req = client.last_request().unwrap();
        assert_eq!(req.method.as_str(), "DELETE");
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn test_update_name_sends_camel_case_body() {
        let (client, svc) = setup();
        client.mock_response("/api/user/update/name", 200, json!({ "code": 200 }));
        let req = UpdateNameRequest {
            new_name: "Alice".into(),
        };
        super::user::update_name(&svc, &req).await.unwrap();
        assert_eq!(
            client.last_request().unwrap().json_body(),
            Some(r#"{"newName":"Alice"}"#)
        );
    }

    #[tokio::test]
    async fn test_conversion_uploads_file_and_returns_raw() {
        let (client, svc) = setup();
        client.mock_raw(
            "/api/example/word/zip/tables",
            HttpResponse::new(200, vec![1u8, 2, 3]),
        );
        let file = FilePart::new("file", "report.docx", vec![9, 9]);
        let raw = super::example::word_tables_zip(&svc, file.clone())
            .await
            .unwrap();
        assert_eq!(raw.body, vec![1, 2, 3]);

        let req = client.last_request().unwrap();
        assert!(req.expect_binary);
        assert_eq!(req.body, Some(RequestBody::Multipart(vec![file])));
    }

    #[tokio::test]
    async fn test_word_template_query_uses_iso_date() {
        let (client, svc) = setup();
        client.mock_raw(
            "/api/example/word/template",
            HttpResponse::new(200, b"docx".to_vec()),
        );
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        super::example::export_word_by_template(&svc, "周报", "bob", date)
            .await
            .unwrap();
        let url = client.last_request().unwrap().url;
        assert!(url.ends_with("&name=bob&date=2024-05-01"), "{}", url);
    }

    #[tokio::test]
    async fn test_legacy_export_is_not_raw() {
        let (client, svc) = setup();
        client.mock_response(
            "/api/admin/export",
            200,
            json!({ "code": 200, "data": null }),
        );
        let err = super::admin::export_excel(&svc).await.unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedReply { .. }));
    }

    #[tokio::test]
    async fn test_legacy_update_state_puts_id_in_path() {
        let (client, svc) = setup();
        client.mock_response("/api/admin/update/state/7", 200, json!({ "code": 200 }));
        super::admin::update_state(&svc, "7").await.unwrap();
        let req = client.last_request().unwrap();
        assert_eq!(req.method.as_str(), "PUT");
        assert_eq!(req.header("Authorization"), Some("t"));
    }

    #[tokio::test]
    async fn test_user_scope_file_upload_is_multipart() {
        let (client, svc) = setup();
        client.mock_response("/api/file/add", 200, json!({ "code": 200, "msg": "上传成功" }));
        let file = FilePart::new("file", "a.png", vec![1, 2]).with_content_type("image/png");
        super::file::add_file(&svc, file.clone()).await.unwrap();

        let req = client.last_request().unwrap();
        assert!(!req.expect_binary);
        assert_eq!(req.body, Some(RequestBody::Multipart(vec![file])));
    }

    #[tokio::test]
    async fn test_admin_user_page_without_filter_sends_paging_only() {
        let (client, svc) = setup();
        client.mock_response(
            "/api/admin/user/page",
            200,
            json!({ "code": 200, "data": { "records": [], "total": 0 } }),
        );
        let page = super::user::admin_page_user(&svc, &UserPageQuery::default(), PageModel::new(2, 20))
            .await
            .unwrap();
        assert!(page.records.is_empty());
        assert_eq!(
            client.last_request().unwrap().url,
            "/api/admin/user/page?page=2&size=20"
        );
    }

    #[tokio::test]
    async fn test_register_sends_camel_case_body() {
        let (client, svc) = setup();
        client.mock_response("/api/auth/register", 200, json!({ "code": 200 }));
        let req = RegisterRequest {
            account: "bob".into(),
            password: "123456".into(),
            check_password: "123456".into(),
            email: "bob@example.com".into(),
        };
        super::auth::register(&svc, &req).await.unwrap();
        let body: serde_json::Value =
            serde_json::from_str(client.last_request().unwrap().json_body().unwrap()).unwrap();
        assert_eq!(body["checkPassword"], "123456");
    }
}
