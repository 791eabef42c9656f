use crate::error::ApiResult;
use std::cell::RefCell;
use std::collections::HashMap;

/// 会话令牌的持久化存储
///
/// 浏览器端由 localStorage 实现；刷新页面后凭此恢复令牌。
pub trait TokenStorage {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str) -> ApiResult<()>;
    fn remove(&self) -> ApiResult<()>;
}

/// 进程内存实现，按键保存，便于多个会话共享同一后端
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    key: String,
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryTokenStorage {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// 预置一个已持久化的令牌（模拟刷新前的登录状态）
    pub fn with_token(self, token: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(self.key.clone(), token.to_string());
        self
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn get(&self) -> Option<String> {
        self.entries.borrow().get(&self.key).cloned()
    }

    fn set(&self, token: &str) -> ApiResult<()> {
        self.entries
            .borrow_mut()
            .insert(self.key.clone(), token.to_string());
        Ok(())
    }

    fn remove(&self) -> ApiResult<()> {
        self.entries.borrow_mut().remove(&self.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_lifecycle() {
        let storage = MemoryTokenStorage::new("k");
        assert_eq!(storage.get(), None);
        storage.set("abc").unwrap();
        assert_eq!(storage.get().as_deref(), Some("abc"));
        storage.remove().unwrap();
        assert_eq!(storage.get(), None);
        // 重复删除不报错
        storage.remove().unwrap();
    }

    #[test]
    fn test_preloaded_token() {
        let storage = MemoryTokenStorage::new("k").with_token("persisted");
        assert_eq!(storage.get().as_deref(), Some("persisted"));
    }
}
