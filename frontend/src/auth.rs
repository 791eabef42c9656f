//! 认证模块
//!
//! 把核心库 `SessionStore` 的变化同步到 Leptos 信号，与路由系统解耦。
//! 路由服务通过注入的认证上下文读取会话。

use admin_console::route::RouteTable;
use admin_console::{ApiResult, AuthStatus, Service, Session, auth};
use leptos::prelude::*;
use std::rc::Rc;

/// 认证状态
#[derive(Clone, Default, PartialEq)]
pub struct AuthState {
    pub session: Session,
    pub status: AuthStatus,
}

/// 认证上下文
///
/// 会话信号与服务句柄，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    service: StoredValue<Rc<Service>, LocalStorage>,
}

impl AuthContext {
    /// 创建认证上下文，并订阅会话存储的变化
    pub fn new(service: Rc<Service>) -> Self {
        let store = service.store();
        let (state, set_state) = signal(AuthState {
            session: store.session(),
            status: store.status(),
        });
        store.subscribe(move |session, status| {
            set_state.set(AuthState {
                session: session.clone(),
                status,
            });
        });

        Self {
            state,
            service: StoredValue::new_local(service),
        }
    }

    pub fn service(&self) -> Rc<Service> {
        self.service.get_value()
    }

    pub fn routes(&self) -> Rc<RouteTable> {
        self.service.with_value(|svc| svc.store().routes().clone())
    }

    /// 不追踪依赖地读取当前会话（路由守卫使用）
    pub fn session_untracked(&self) -> Session {
        self.state.with_untracked(|s| s.session.clone())
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.session.has_token()))
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 登录
pub async fn login(ctx: &AuthContext, account: String, password: String) -> ApiResult<()> {
    let svc = ctx.service();
    auth::login(&svc, &account, &password).await
}

/// 拉取用户资料
pub async fn fetch_profile(ctx: &AuthContext) -> ApiResult<()> {
    let svc = ctx.service();
    auth::fetch_profile(&svc).await?;
    Ok(())
}

/// 注销并清除状态
///
/// 导航将由路由服务的认证状态监听自动处理。
pub async fn logout(ctx: &AuthContext) -> ApiResult<()> {
    let svc = ctx.service();
    auth::logout(&svc).await
}
