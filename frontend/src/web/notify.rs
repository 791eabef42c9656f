//! 界面提示
//!
//! `ToastNotifier` 实现核心库的 `Notifier`：错误提示写入信号，由
//! `components::notice` 渲染；重新登录确认框只负责打开，用户作答时调用请求层交来的回调。

use admin_console::Notifier;
use admin_console::notify::ReloginAnswer;
use leptos::prelude::*;
use std::cell::{Cell, RefCell};
use std::time::Duration;

use super::timer::Timeout;

/// 一条错误提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

/// 提示相关的界面状态，通过 Context 在组件间共享
#[derive(Clone, Copy)]
pub struct NoticeContext {
    pub toasts: RwSignal<Vec<Toast>>,
    /// 重新登录确认框是否打开
    pub confirm_open: RwSignal<bool>,
    on_answer: StoredValue<Option<ReloginAnswer>, LocalStorage>,
}

impl NoticeContext {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            confirm_open: RwSignal::new(false),
            on_answer: StoredValue::new_local(None),
        }
    }

    /// 用户在确认框中做出选择
    pub fn answer(&self, confirmed: bool) {
        self.confirm_open.set(false);
        if let Some(on_answer) = self.on_answer.try_update_value(Option::take).flatten() {
            on_answer(confirmed);
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }
}

/// 从 Context 获取提示上下文
pub fn use_notice() -> NoticeContext {
    use_context::<NoticeContext>().expect("NoticeContext should be provided")
}

pub struct ToastNotifier {
    ctx: NoticeContext,
    next_id: Cell<u64>,
    timers: RefCell<Vec<Timeout>>,
}

impl ToastNotifier {
    pub fn new(ctx: NoticeContext) -> Self {
        Self {
            ctx,
            next_id: Cell::new(0),
            timers: RefCell::new(Vec::new()),
        }
    }
}

impl Notifier for ToastNotifier {
    fn error(&self, message: &str, duration: Duration) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.ctx.toasts.update(|list| {
            list.push(Toast {
                id,
                message: message.to_string(),
            })
        });

        let ctx = self.ctx;
        let mut timers = self.timers.borrow_mut();
        timers.retain(|t| !t.is_fired());
        match Timeout::new(duration.as_millis() as u32, move || ctx.dismiss(id)) {
            Some(timer) => timers.push(timer),
            None => web_sys::console::warn_1(&"[Notice] 无法注册自动关闭定时器".into()),
        }
    }

    fn confirm_relogin(&self, on_answer: ReloginAnswer) {
        // 上一个未回答的确认框视为取消
        let previous = self
            .ctx
            .on_answer
            .try_update_value(|slot| slot.replace(on_answer))
            .flatten();
        if let Some(previous) = previous {
            previous(false);
        }
        self.ctx.confirm_open.set(true);
    }

    fn reload(&self) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().reload() {
                web_sys::console::error_1(&e);
            }
        }
    }
}
