//! 管理后台前端外壳
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web`: 浏览器适配层（fetch 传输、LocalStorage、提示、路由服务）
//! - `auth`: 认证状态管理
//! - `components`: UI 组件层
//!
//! 请求封装、会话与路由规则全部来自 `admin_console` 核心库。

mod auth;
mod components {
    pub mod layout;
    pub mod login;
    pub mod notice;
    pub mod pages;
}
pub(crate) mod web;

use crate::auth::AuthContext;
use crate::components::login::LoginPage;
use crate::components::notice::NoticeOutlet;
use crate::components::pages::{DashboardPage, ExamplePage, NotFoundPage, PlaceholderPage};
use crate::web::router::{Router, RouterOutlet};
use crate::web::{FetchHttpClient, LocalTokenStorage, NoticeContext, ToastNotifier};

use admin_console::route::{Page, RouteTable};
use admin_console::{ClientConfig, Service, SessionStore};
use leptos::prelude::*;
use std::rc::Rc;

/// 构建期配置：未设置的环境变量使用默认值
fn client_config() -> ClientConfig {
    ClientConfig::from_lookup(|key| {
        match key {
            "ADMIN_CONSOLE_BASE_URL" => option_env!("ADMIN_CONSOLE_BASE_URL"),
            "ADMIN_CONSOLE_TOKEN_KEY" => option_env!("ADMIN_CONSOLE_TOKEN_KEY"),
            "ADMIN_CONSOLE_TIMEOUT_MS" => option_env!("ADMIN_CONSOLE_TIMEOUT_MS"),
            _ => None,
        }
        .map(str::to_string)
    })
}

/// 路由匹配函数
///
/// 根据页面枚举返回对应的视图组件。
fn route_matcher(page: Page) -> AnyView {
    match page {
        Page::Login => view! { <LoginPage /> }.into_any(),
        Page::Dashboard => view! { <DashboardPage /> }.into_any(),
        Page::UserManage => view! { <PlaceholderPage title="用户管理" /> }.into_any(),
        Page::LogManage => view! { <PlaceholderPage title="日志管理" /> }.into_any(),
        Page::FileManage => view! { <PlaceholderPage title="文件管理" /> }.into_any(),
        Page::Example => view! { <ExamplePage /> }.into_any(),
        Page::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 提示上下文与通知实现
    let notice = NoticeContext::new();
    provide_context(notice);

    // 2. 组装核心服务：fetch 传输 + LocalStorage 令牌 + 路由表
    let config = client_config();
    let store = Rc::new(SessionStore::new(
        Rc::new(LocalTokenStorage::new(&config.token_key)),
        Rc::new(RouteTable::default()),
    ));
    let service = Rc::new(Service::new(
        config,
        Rc::new(FetchHttpClient::new()),
        Rc::new(ToastNotifier::new(notice)),
        store,
    ));

    // 3. 认证上下文（订阅会话变化）
    let auth_ctx = AuthContext::new(service);
    provide_context(auth_ctx);

    view! {
        // 4. 路由器组件：注入认证上下文实现守卫
        <Router auth=auth_ctx>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <NoticeOutlet />
    }
}
