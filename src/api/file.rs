use crate::error::ApiResult;
use crate::request::{FilePart, HttpResponse};
use crate::service::{RequestSpec, Service};
use admin_console_shared::dto::{FilePageQuery, FileRecord};
use admin_console_shared::{Page, PageModel};

// =========================================================
// 文件管理 (/admin/file)
// =========================================================

pub async fn admin_page_file(
    svc: &Service,
    query: &FilePageQuery,
    page: PageModel,
) -> ApiResult<Page<FileRecord>> {
    svc.fetch(RequestSpec::get("/admin/file/page").query(query)?.query(&page)?)
        .await
}

pub async fn admin_add_file(svc: &Service, file: FilePart) -> ApiResult<()> {
    svc.execute(RequestSpec::post("/admin/file/add").file(file))
        .await
}

pub async fn admin_delete_file(svc: &Service, id: &str) -> ApiResult<()> {
    svc.execute(RequestSpec::delete(format!("/admin/file/delete/{}", id)))
        .await
}

pub async fn admin_export_excel(svc: &Service) -> ApiResult<HttpResponse> {
    svc.download(RequestSpec::get("/admin/file/export")).await
}

// =========================================================
// 个人文件 (/file)
// =========================================================

pub async fn page_file(
    svc: &Service,
    query: &FilePageQuery,
    page: PageModel,
) -> ApiResult<Page<FileRecord>> {
    svc.fetch(RequestSpec::get("/file/page").query(query)?.query(&page)?)
        .await
}

pub async fn add_file(svc: &Service, file: FilePart) -> ApiResult<()> {
    svc.execute(RequestSpec::post("/file/add").file(file)).await
}

pub async fn delete_file(svc: &Service, id: &str) -> ApiResult<()> {
    svc.execute(RequestSpec::delete(format!("/file/delete/{}", id)))
        .await
}
