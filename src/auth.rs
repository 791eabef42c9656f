//! 认证动作
//!
//! 登录 / 拉取资料 / 注销 / 重置令牌。每个动作都是顺序执行的 async 函数，
//! 失败时原样向上抛出错误，不做部分清理。

use crate::api;
use crate::error::{ApiError, ApiResult};
use crate::service::Service;
use crate::session::AuthStatus;
use admin_console_shared::dto::{AuthProfile, LoginRequest};

/// 登录：账号去除首尾空白后提交，成功后令牌同时写入会话与令牌存储
pub async fn login(svc: &Service, account: &str, password: &str) -> ApiResult<()> {
    let store = svc.store();
    let previous = store.status();
    store.set_status(AuthStatus::Authenticating);

    let request = LoginRequest {
        account: account.trim().to_string(),
        password: password.to_string(),
        ..Default::default()
    };

    let token = match api::auth::login(svc, &request).await {
        Ok(data) => data.token,
        Err(e) => {
            store.set_status(previous);
            return Err(e);
        }
    };

    if let Err(e) = store.storage().set(&token) {
        store.set_status(previous);
        return Err(e);
    }
    store.set_token(&token);
    store.set_status(AuthStatus::Authenticated);
    tracing::info!(account = %request.account, "logged in");
    Ok(())
}

/// 拉取当前用户资料；服务端未返回数据时要求重新登录
pub async fn fetch_profile(svc: &Service) -> ApiResult<AuthProfile> {
    let profile = api::auth::info(svc).await?.ok_or(ApiError::ProfileMissing)?;
    svc.store().set_profile(profile.clone());
    tracing::debug!(account = %profile.account, role = %profile.role, "profile loaded");
    Ok(profile)
}

/// 注销：请求成功后依次清除令牌、重置路由表、重置会话
pub async fn logout(svc: &Service) -> ApiResult<()> {
    api::auth::logout(svc).await?;
    svc.store().reset_token();
    tracing::info!("logged out");
    Ok(())
}

/// 仅本地清理，不发请求
pub fn reset_token(svc: &Service) {
    svc.store().reset_token();
}
