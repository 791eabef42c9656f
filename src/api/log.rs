use crate::error::ApiResult;
use crate::request::HttpResponse;
use crate::service::{RequestSpec, Service};
use admin_console_shared::dto::{LogPageQuery, LogRecord};
use admin_console_shared::{Page, PageModel};

// =========================================================
// 日志管理 (/admin/log)
// =========================================================

pub async fn admin_page_log(
    svc: &Service,
    query: &LogPageQuery,
    page: PageModel,
) -> ApiResult<Page<LogRecord>> {
    svc.fetch(RequestSpec::get("/admin/log/page").query(query)?.query(&page)?)
        .await
}

pub async fn admin_delete_log(svc: &Service, id: &str) -> ApiResult<()> {
    svc.execute(RequestSpec::delete(format!("/admin/log/delete/{}", id)))
        .await
}

pub async fn admin_clear_log(svc: &Service) -> ApiResult<()> {
    svc.execute(RequestSpec::delete("/admin/log/clear")).await
}

pub async fn admin_export_excel(svc: &Service) -> ApiResult<HttpResponse> {
    svc.download(RequestSpec::get("/admin/log/export")).await
}

// =========================================================
// 个人日志 (/log)
// =========================================================

pub async fn page_log(
    svc: &Service,
    query: &LogPageQuery,
    page: PageModel,
) -> ApiResult<Page<LogRecord>> {
    svc.fetch(RequestSpec::get("/log/page").query(query)?.query(&page)?)
        .await
}

pub async fn delete_log(svc: &Service, id: &str) -> ApiResult<()> {
    svc.execute(RequestSpec::delete(format!("/log/delete/{}", id)))
        .await
}

pub async fn clear_log(svc: &Service) -> ApiResult<()> {
    svc.execute(RequestSpec::delete("/log/clear")).await
}
