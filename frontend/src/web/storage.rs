//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现核心库的 `TokenStorage`，刷新页面后令牌依然可读。

use admin_console::{ApiError, ApiResult, TokenStorage};

/// 以固定键保存令牌的 LocalStorage
pub struct LocalTokenStorage {
    key: String,
}

impl LocalTokenStorage {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    fn require() -> ApiResult<web_sys::Storage> {
        Self::storage().ok_or_else(|| ApiError::Storage("LocalStorage 不可用".to_string()))
    }
}

impl TokenStorage for LocalTokenStorage {
    fn get(&self) -> Option<String> {
        Self::storage()?.get_item(&self.key).ok()?
    }

    fn set(&self, token: &str) -> ApiResult<()> {
        Self::require()?
            .set_item(&self.key, token)
            .map_err(|e| ApiError::Storage(format!("{:?}", e)))
    }

    fn remove(&self) -> ApiResult<()> {
        Self::require()?
            .remove_item(&self.key)
            .map_err(|e| ApiError::Storage(format!("{:?}", e)))
    }
}
