//! 错误提示与重新登录确认框

use crate::web::notify::use_notice;
use admin_console::notify::{RELOGIN_CANCEL, RELOGIN_CONFIRM, RELOGIN_MESSAGE, RELOGIN_TITLE};
use leptos::prelude::*;

#[component]
pub fn NoticeOutlet() -> impl IntoView {
    let notice = use_notice();

    view! {
        <div class="toast toast-top toast-center z-50">
            <For
                each=move || notice.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div role="alert" class="alert alert-error" on:click=move |_| notice.dismiss(id)>
                            <span>{toast.message}</span>
                        </div>
                    }
                }
            />
        </div>

        <Show when=move || notice.confirm_open.get()>
            <div class="modal modal-open">
                <div class="modal-box">
                    <h3 class="font-bold text-lg">{RELOGIN_TITLE}</h3>
                    <p class="py-4">{RELOGIN_MESSAGE}</p>
                    <div class="modal-action">
                        <button class="btn" on:click=move |_| notice.answer(false)>{RELOGIN_CANCEL}</button>
                        <button class="btn btn-primary" on:click=move |_| notice.answer(true)>{RELOGIN_CONFIRM}</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
