//! 会话状态管理
//!
//! `SessionStore` 是会话字段的唯一持有者，令牌存储只保存 `token` 的副本。
//! 所有写操作都通过这里的变更方法完成，动作流程见 `auth` 模块。

use crate::route::RouteTable;
use crate::storage::TokenStorage;
use admin_console_shared::Role;
use admin_console_shared::dto::AuthProfile;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// 会话字段；未登录时为默认值
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub id: String,
    pub account: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub role: Option<Role>,
}

impl Session {
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}

/// 认证状态机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
}

type Listener = Box<dyn Fn(&Session, AuthStatus)>;

/// 会话存储
pub struct SessionStore {
    state: RefCell<Session>,
    status: Cell<AuthStatus>,
    storage: Rc<dyn TokenStorage>,
    routes: Rc<RouteTable>,
    listeners: RefCell<Vec<Listener>>,
}

impl SessionStore {
    /// 创建会话存储；若令牌存储中已有令牌（刷新前已登录），直接恢复
    pub fn new(storage: Rc<dyn TokenStorage>, routes: Rc<RouteTable>) -> Self {
        let state = Self::restored_state(storage.as_ref());
        let status = if state.has_token() {
            AuthStatus::Authenticated
        } else {
            AuthStatus::Anonymous
        };
        Self {
            state: RefCell::new(state),
            status: Cell::new(status),
            storage,
            routes,
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// 启动时的状态：只有令牌来自持久化存储，其余字段为空
    fn restored_state(storage: &dyn TokenStorage) -> Session {
        Session {
            token: storage.get().unwrap_or_default(),
            ..Default::default()
        }
    }

    // --- Accessors ---

    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn token(&self) -> String {
        self.state.borrow().token.clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.state.borrow().role
    }

    pub fn status(&self) -> AuthStatus {
        self.status.get()
    }

    pub fn routes(&self) -> &Rc<RouteTable> {
        &self.routes
    }

    pub fn storage(&self) -> &Rc<dyn TokenStorage> {
        &self.storage
    }

    /// 订阅会话变化（外壳用来驱动界面刷新）
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&Session, AuthStatus) + 'static,
    {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    fn emit(&self) {
        let session = self.session();
        let status = self.status();
        for listener in self.listeners.borrow().iter() {
            listener(&session, status);
        }
    }

    // --- Mutations ---

    pub(crate) fn set_status(&self, status: AuthStatus) {
        self.status.set(status);
        self.emit();
    }

    pub(crate) fn set_token(&self, token: &str) {
        self.state.borrow_mut().token = token.to_string();
    }

    pub(crate) fn set_profile(&self, profile: AuthProfile) {
        {
            let mut state = self.state.borrow_mut();
            state.id = profile.id;
            state.account = profile.account;
            state.name = profile.name;
            state.email = profile.email.unwrap_or_default();
            state.avatar = profile.avatar.unwrap_or_default();
            state.role = Some(profile.role);
        }
        self.emit();
    }

    /// 回到未登录的默认状态；令牌直接置空，不回读存储
    pub(crate) fn reset_state(&self) {
        *self.state.borrow_mut() = Session::default();
        self.status.set(AuthStatus::Anonymous);
        self.emit();
    }

    /// 本地清理：先删令牌，再重置路由表，最后重置会话
    ///
    /// 令牌删除失败只记录日志，清理流程照常完成。
    pub fn reset_token(&self) {
        if let Err(e) = self.storage.remove() {
            tracing::error!(error = %e, "failed to remove persisted token");
        }
        self.routes.reset();
        self.reset_state();
        tracing::debug!("session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ApiResult};
    use crate::route::RouteDescriptor;
    use crate::storage::MemoryTokenStorage;

    fn store_with(storage: MemoryTokenStorage) -> SessionStore {
        SessionStore::new(Rc::new(storage), Rc::new(RouteTable::default()))
    }

    /// 删除总是失败的存储（如浏览器禁用了 localStorage）
    struct StuckStorage(String);

    impl TokenStorage for StuckStorage {
        fn get(&self) -> Option<String> {
            Some(self.0.clone())
        }

        fn set(&self, _token: &str) -> ApiResult<()> {
            Ok(())
        }

        fn remove(&self) -> ApiResult<()> {
            Err(ApiError::Storage("access denied".into()))
        }
    }

    /// 把每次删除记入共享日志
    struct LoggedStorage {
        inner: MemoryTokenStorage,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl TokenStorage for LoggedStorage {
        fn get(&self) -> Option<String> {
            self.inner.get()
        }

        fn set(&self, token: &str) -> ApiResult<()> {
            self.inner.set(token)
        }

        fn remove(&self) -> ApiResult<()> {
            self.log.borrow_mut().push("storage".into());
            self.inner.remove()
        }
    }

    #[test]
    fn test_restores_persisted_token() {
        let store = store_with(MemoryTokenStorage::new("k").with_token("persisted"));
        assert_eq!(store.token(), "persisted");
        assert_eq!(store.status(), AuthStatus::Authenticated);
        assert_eq!(store.session().account, "");
    }

    #[test]
    fn test_fresh_store_is_anonymous() {
        let store = store_with(MemoryTokenStorage::new("k"));
        assert_eq!(store.session(), Session::default());
        assert_eq!(store.status(), AuthStatus::Anonymous);
    }

    #[test]
    fn test_reset_token_clears_everything_and_is_idempotent() {
        let store = store_with(MemoryTokenStorage::new("k").with_token("t"));
        store.set_profile(AuthProfile {
            id: "1".into(),
            account: "bob".into(),
            name: "Bob".into(),
            email: Some("b@x".into()),
            avatar: None,
            role: Role::Admin,
        });
        store.routes().add_routes(vec![RouteDescriptor::new("/extra")]);

        store.reset_token();
        assert_eq!(store.session(), Session::default());
        assert_eq!(store.storage().get(), None);
        assert_eq!(store.routes().dynamic_len(), 0);

        store.reset_token();
        assert_eq!(store.session(), Session::default());
        assert_eq!(store.status(), AuthStatus::Anonymous);
    }

    #[test]
    fn test_listeners_see_changes() {
        let store = store_with(MemoryTokenStorage::new("k").with_token("t"));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |session, status| {
            sink.borrow_mut().push((session.token.clone(), status));
        });

        store.reset_token();
        assert_eq!(
            seen.borrow().last().cloned(),
            Some((String::new(), AuthStatus::Anonymous))
        );
    }

    #[test]
    fn test_reset_clears_token_even_if_storage_removal_fails() {
        let store = SessionStore::new(
            Rc::new(StuckStorage("stale".into())),
            Rc::new(RouteTable::default()),
        );
        assert_eq!(store.token(), "stale");

        store.reset_token();
        assert_eq!(store.token(), "");
        assert!(!store.session().has_token());
        assert_eq!(store.status(), AuthStatus::Anonymous);
    }

    #[test]
    fn test_reset_order_is_storage_then_routes_then_state() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let storage = Rc::new(LoggedStorage {
            inner: MemoryTokenStorage::new("k").with_token("t"),
            log: log.clone(),
        });
        let routes = Rc::new(RouteTable::default());
        routes.add_routes(vec![RouteDescriptor::new("/extra")]);
        let store = SessionStore::new(storage.clone(), routes.clone());

        // 状态重置通知发出时，令牌与动态路由都应已清空
        let sink = log.clone();
        let watched_storage = storage.clone();
        let watched_routes = routes.clone();
        store.subscribe(move |session, _| {
            sink.borrow_mut().push(format!(
                "state stored={:?} routes={} token={:?}",
                watched_storage.get(),
                watched_routes.dynamic_len(),
                session.token
            ));
        });

        store.reset_token();
        assert_eq!(
            *log.borrow(),
            vec![
                "storage".to_string(),
                "state stored=None routes=0 token=\"\"".to_string(),
            ]
        );
    }
}
