//! 后台布局：侧边菜单 + 顶栏 + 内容区

use crate::auth::{logout, use_auth};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let menu = move || {
        let role = auth.state.with(|s| s.session.role)?;
        Some(auth.routes().menu(role))
    };
    let title = move || {
        router
            .current_route()
            .get()
            .and_then(|r| r.meta)
            .map(|m| m.title)
            .unwrap_or_default()
    };
    let display_name = move || {
        auth.state.with(|s| {
            if s.session.name.is_empty() {
                s.session.account.clone()
            } else {
                s.session.name.clone()
            }
        })
    };

    let on_logout = move |_| {
        spawn_local(async move {
            // 失败时请求层已提示，会话保持不变
            if let Err(e) = logout(&auth).await {
                web_sys::console::error_1(&format!("[Auth] logout failed: {}", e).into());
            }
        });
    };

    view! {
        <div class="drawer lg:drawer-open">
            <input id="side-menu" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col min-h-screen bg-base-200">
                <div class="navbar bg-base-100 shadow-sm px-4">
                    <div class="flex-1 text-lg font-semibold">{title}</div>
                    <div class="flex-none gap-2 flex items-center">
                        <span class="text-sm text-base-content/70">{display_name}</span>
                        <button class="btn btn-ghost btn-sm" on:click=on_logout>"退出登录"</button>
                    </div>
                </div>
                <main class="p-6">{children()}</main>
            </div>
            <div class="drawer-side">
                <label for="side-menu" class="drawer-overlay"></label>
                <ul class="menu bg-base-100 w-56 min-h-full p-4">
                    {move || {
                        menu()
                            .unwrap_or_default()
                            .into_iter()
                            .map(|item| view! {
                                <li><Link to=item.path>{item.title}</Link></li>
                            })
                            .collect_view()
                    }}
                </ul>
            </div>
        </div>
    }
}
