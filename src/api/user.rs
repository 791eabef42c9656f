use crate::error::ApiResult;
use crate::request::{FilePart, HttpResponse};
use crate::service::{RequestSpec, Service};
use admin_console_shared::dto::{
    AddUserRequest, ResetPasswordRequest, UpdateAccountRequest, UpdateEmailRequest,
    UpdateNameRequest, UpdatePasswordRequest, UpdateUserInfoRequest, UpdateUserStateRequest,
    UserPageQuery, UserRecord,
};
use admin_console_shared::{Page, PageModel};

// =========================================================
// 个人信息 (/user)
// =========================================================

pub async fn update_account(svc: &Service, req: &UpdateAccountRequest) -> ApiResult<()> {
    svc.execute(RequestSpec::put("/user/update/account").json(req)?)
        .await
}

pub async fn update_name(svc: &Service, req: &UpdateNameRequest) -> ApiResult<()> {
    svc.execute(RequestSpec::put("/user/update/name").json(req)?).await
}

pub async fn update_email(svc: &Service, req: &UpdateEmailRequest) -> ApiResult<()> {
    svc.execute(RequestSpec::put("/user/update/email").json(req)?).await
}

pub async fn update_password(svc: &Service, req: &UpdatePasswordRequest) -> ApiResult<()> {
    svc.execute(RequestSpec::put("/user/update/password").json(req)?)
        .await
}

/// 上传头像（multipart 字段 `file`）
pub async fn update_avatar(svc: &Service, file_name: &str, bytes: Vec<u8>) -> ApiResult<()> {
    svc.execute(
        RequestSpec::put("/user/update/avatar").file(FilePart::new("file", file_name, bytes)),
    )
    .await
}

// =========================================================
// 用户管理 (/admin/user)
// =========================================================

pub async fn admin_page_user(
    svc: &Service,
    query: &UserPageQuery,
    page: PageModel,
) -> ApiResult<Page<UserRecord>> {
    svc.fetch(
        RequestSpec::get("/admin/user/page")
            .query(query)?
            .query(&page)?,
    )
    .await
}

pub async fn admin_add_user(svc: &Service, req: &AddUserRequest) -> ApiResult<()> {
    svc.execute(RequestSpec::post("/admin/user/add").json(req)?).await
}

pub async fn admin_delete_user(svc: &Service, id: &str) -> ApiResult<()> {
    svc.execute(RequestSpec::delete(format!("/admin/user/delete/{}", id)))
        .await
}

pub async fn admin_update_info(svc: &Service, req: &UpdateUserInfoRequest) -> ApiResult<()> {
    svc.execute(RequestSpec::put("/admin/user/update/info").json(req)?)
        .await
}

pub async fn admin_update_state(svc: &Service, req: &UpdateUserStateRequest) -> ApiResult<()> {
    svc.execute(RequestSpec::put("/admin/user/update/state").json(req)?)
        .await
}

pub async fn admin_reset_password(svc: &Service, req: &ResetPasswordRequest) -> ApiResult<()> {
    svc.execute(RequestSpec::put("/admin/user/reset/password").json(req)?)
        .await
}

/// 导出用户表（Excel 二进制流）
pub async fn admin_export_excel(svc: &Service) -> ApiResult<HttpResponse> {
    svc.download(RequestSpec::get("/admin/user/export")).await
}

/// 下载导入模板
pub async fn admin_export_user_template(svc: &Service) -> ApiResult<HttpResponse> {
    svc.download(RequestSpec::get("/admin/user/template")).await
}

pub async fn admin_import_user(svc: &Service, file_name: &str, bytes: Vec<u8>) -> ApiResult<()> {
    svc.execute(
        RequestSpec::post("/admin/user/import").file(FilePart::new("file", file_name, bytes)),
    )
    .await
}
