//! 旧版管理接口 (/admin)
//!
//! 与 `/admin/user` 功能重叠，仍被部分页面使用。

use crate::error::ApiResult;
use crate::request::HttpResponse;
use crate::service::{RequestSpec, Service};
use admin_console_shared::dto::{
    AddUserRequest, ResetPasswordRequest, UpdateUserInfoRequest, UserPageQuery, UserRecord,
};
use admin_console_shared::{Page, PageModel};

pub async fn page_user(
    svc: &Service,
    query: &UserPageQuery,
    page: PageModel,
) -> ApiResult<Page<UserRecord>> {
    svc.fetch(RequestSpec::get("/admin/page").query(query)?.query(&page)?)
        .await
}

pub async fn add_user(svc: &Service, req: &AddUserRequest) -> ApiResult<()> {
    svc.execute(RequestSpec::post("/admin/add").json(req)?).await
}

pub async fn delete_user(svc: &Service, id: &str) -> ApiResult<()> {
    svc.execute(RequestSpec::delete(format!("/admin/delete/{}", id)))
        .await
}

pub async fn update_info(svc: &Service, req: &UpdateUserInfoRequest) -> ApiResult<()> {
    svc.execute(RequestSpec::put("/admin/update/info").json(req)?).await
}

pub async fn update_state(svc: &Service, id: &str) -> ApiResult<()> {
    svc.execute(RequestSpec::put(format!("/admin/update/state/{}", id)))
        .await
}

pub async fn reset_password(svc: &Service, req: &ResetPasswordRequest) -> ApiResult<()> {
    svc.execute(RequestSpec::put("/admin/reset/password").json(req)?)
        .await
}

/// 该路径不在二进制白名单内，响应按信封解析
pub async fn export_excel(svc: &Service) -> ApiResult<HttpResponse> {
    svc.download(RequestSpec::get("/admin/export")).await
}
