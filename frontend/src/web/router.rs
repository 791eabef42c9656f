//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 导航流程为"请求 -> 守卫 -> (按需拉取资料) -> 加载"，守卫规则由核心库的
//! `RouteTable::guard` 给出。

use admin_console::Notifier;
use admin_console::route::{LOGIN_PATH, Navigation, Page, ResolvedRoute};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;

use crate::auth::{AuthContext, fetch_profile};

/// 守卫重定向的最大跟随次数
const MAX_HOPS: u8 = 4;

/// 获取当前浏览器路径（含查询串）
fn current_path() -> String {
    web_sys::window()
        .map(|w| {
            let location = w.location();
            let path = location.pathname().unwrap_or_else(|_| "/".to_string());
            let search = location.search().unwrap_or_default();
            format!("{}{}", path, search)
        })
        .unwrap_or_else(|| "/".to_string())
}

/// 写入 History 状态（内部工具函数）
fn write_history(path: &str, use_push: bool) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = if use_push {
                history.push_state_with_url(&JsValue::NULL, "", Some(path))
            } else {
                history.replace_state_with_url(&JsValue::NULL, "", Some(path))
            };
        }
    }
}

/// 当前地址中的 `redirect` 查询参数
pub fn redirect_param() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    search
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| pair.strip_prefix("redirect="))
        .filter(|v| !v.is_empty())
        .map(|v| {
            js_sys::decode_uri_component(v)
                .ok()
                .and_then(|s| s.as_string())
                .unwrap_or_else(|| v.to_string())
        })
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证上下文实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<Option<ResolvedRoute>>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<Option<ResolvedRoute>>,
    /// 认证上下文（注入，实现解耦）
    auth: AuthContext,
}

impl RouterService {
    fn new(auth: AuthContext) -> Self {
        let (current_route, set_route) = signal(None);
        Self {
            current_route,
            set_route,
            auth,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<Option<ResolvedRoute>> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        self.apply(path, true, 0);
    }

    /// 执行守卫并加载页面
    ///
    /// # Arguments
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    /// * `hops` - 已跟随的重定向次数
    fn apply(&self, path: &str, use_push: bool, hops: u8) {
        if hops > MAX_HOPS {
            web_sys::console::warn_1(&format!("[Router] Too many redirects at {}", path).into());
            return;
        }

        let session = self.auth.session_untracked();
        match self.auth.routes().guard(path, &session) {
            Navigation::Redirect(to) => {
                web_sys::console::log_1(&format!("[Router] {} -> {}", path, to).into());
                self.apply(&to, use_push, hops + 1);
            }
            Navigation::Allow(_) if session.has_token() && session.role.is_none() => {
                // 有令牌但资料未加载：先拉取资料再重新守卫
                self.load_profile_then(path.to_string(), use_push, hops);
            }
            Navigation::Allow(route) => {
                write_history(path, use_push);
                self.set_route.set(Some(route));
            }
        }
    }

    fn load_profile_then(&self, path: String, use_push: bool, hops: u8) {
        let router = *self;
        spawn_local(async move {
            match fetch_profile(&router.auth).await {
                Ok(()) => router.apply(&path, use_push, hops + 1),
                Err(e) => {
                    let svc = router.auth.service();
                    svc.store().reset_token();
                    // 请求层已提示过的错误不再重复提示
                    if !e.is_reported() {
                        svc.notifier()
                            .error(&e.message(), svc.config().notify_duration);
                    }
                    web_sys::console::error_1(&format!("[Router] {}", e).into());
                    let login = format!("{}?redirect={}", LOGIN_PATH, path);
                    router.apply(&login, use_push, hops + 1);
                }
            }
        });
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            router.apply(&current_path(), false, 0);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 令牌失效（注销或会话过期）时重新守卫当前页面
    fn setup_auth_redirect(&self) {
        let router = *self;
        let is_authenticated = self.auth.is_authenticated_signal();

        Effect::new(move |prev: Option<bool>| {
            let is_auth = is_authenticated.get();
            if prev == Some(true) && !is_auth {
                web_sys::console::log_1(
                    &"[Router] Auth state changed: logged out, re-checking route.".into(),
                );
                router.apply(&current_path(), true, 0);
            }
            is_auth
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(auth: AuthContext) -> RouterService {
    let router = RouterService::new(auth);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();
    router.apply(&current_path(), false, 0);

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证上下文
    auth: AuthContext,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(auth);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的页面；首次守卫完成前显示加载指示。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前页面，返回对应视图
    matcher: fn(Page) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || match router.current_route().get() {
        Some(route) => matcher(route.page),
        None => view! {
            <div class="flex items-center justify-center min-h-screen">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
    }
}

/// 站内链接；外部地址按普通链接处理
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let external = admin_console::route::is_external(&to);
    let target = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        if !external {
            ev.prevent_default();
            router.navigate(&target);
        }
    };

    view! {
        <a href=to target=if external { Some("_blank") } else { None } on:click=on_click>
            {children()}
        </a>
    }
}
