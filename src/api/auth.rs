use crate::error::ApiResult;
use crate::service::{RequestSpec, Service};
use admin_console_shared::dto::{
    AuthProfile, EmailCodeRequest, LoginRequest, LoginToken, RegisterRequest,
    RetrievePasswordRequest,
};

pub async fn login(svc: &Service, req: &LoginRequest) -> ApiResult<LoginToken> {
    svc.fetch(RequestSpec::post("/auth/login").json(req)?).await
}

/// 当前登录用户信息；`data` 为空时返回 `None`
pub async fn info(svc: &Service) -> ApiResult<Option<AuthProfile>> {
    svc.fetch(RequestSpec::get("/auth/info")).await
}

pub async fn logout(svc: &Service) -> ApiResult<()> {
    svc.execute(RequestSpec::delete("/auth/logout")).await
}

pub async fn register(svc: &Service, req: &RegisterRequest) -> ApiResult<()> {
    svc.execute(RequestSpec::post("/auth/register").json(req)?).await
}

/// 找回密码：发送邮箱验证码
pub async fn email_code(svc: &Service, req: &EmailCodeRequest) -> ApiResult<()> {
    svc.execute(RequestSpec::post("/auth/email/code").json(req)?).await
}

/// 找回密码：校验验证码并设置新密码
pub async fn check_email_code(svc: &Service, req: &RetrievePasswordRequest) -> ApiResult<()> {
    svc.execute(RequestSpec::post("/auth/check/email/code").json(req)?)
        .await
}
