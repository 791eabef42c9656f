//! 业务页面
//!
//! 管理类页面目前只有骨架，示例页演示二进制下载与普通查询两类调用。

use crate::auth::use_auth;
use crate::components::layout::Layout;
use crate::web::http::save_file;
use crate::web::router::Link;
use admin_console::api;
use admin_console::route::HOME_PATH;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let name = move || auth.state.with(|s| s.session.name.clone());
    let role = move || {
        auth.state
            .with(|s| s.session.role.map(|r| r.to_string()).unwrap_or_default())
    };

    view! {
        <Layout>
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">"欢迎，" {name}</h2>
                    <p class="text-base-content/70">"当前角色：" {role}</p>
                </div>
            </div>
        </Layout>
    }
}

/// 尚未实现的管理页面
#[component]
pub fn PlaceholderPage(title: &'static str) -> impl IntoView {
    view! {
        <Layout>
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{title}</h2>
                    <p class="text-base-content/70">"页面建设中"</p>
                </div>
            </div>
        </Layout>
    }
}

#[component]
pub fn ExamplePage() -> impl IntoView {
    let auth = use_auth();
    let (region, set_region) = signal(Option::<String>::None);

    let on_region = move |_| {
        spawn_local(async move {
            let svc = auth.service();
            // 失败时请求层已提示
            if let Ok(text) = api::example::ip_and_region_by_request(&svc).await {
                set_region.set(Some(text));
            }
        });
    };

    let on_pdf = move |_| {
        spawn_local(async move {
            let svc = auth.service();
            if let Ok(resp) = api::example::export_pdf_freemarker(&svc).await {
                if let Err(e) = save_file(&resp, "freemarker.pdf") {
                    web_sys::console::error_1(&e);
                }
            }
        });
    };

    view! {
        <Layout>
            <div class="card bg-base-100 shadow">
                <div class="card-body gap-4">
                    <div class="flex gap-2">
                        <button class="btn btn-primary btn-sm" on:click=on_region>"查询本机 IP 归属地"</button>
                        <button class="btn btn-outline btn-sm" on:click=on_pdf>"导出 PDF"</button>
                    </div>
                    <Show when=move || region.get().is_some()>
                        <p>{move || region.get().unwrap_or_default()}</p>
                    </Show>
                </div>
            </div>
        </Layout>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"页面未找到"</p>
                <div class="mt-4">
                    <Link to=HOME_PATH>"返回首页"</Link>
                </div>
            </div>
        </div>
    }
}
