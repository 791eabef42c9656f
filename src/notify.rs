//! 全局提示抽象
//!
//! 请求封装层只依赖此特性，浏览器端用 DOM 实现，测试中用记录型实现。

use std::time::Duration;

#[cfg(test)]
use std::cell::{Cell, RefCell};

/// 登录失效时的确认框文案
pub const RELOGIN_TITLE: &str = "确认注销";
pub const RELOGIN_MESSAGE: &str =
    "您的状态为注销状态，可以选择点击“取消”留在这个页面，也可以重新登录";
pub const RELOGIN_CONFIRM: &str = "重新登陆";
pub const RELOGIN_CANCEL: &str = "取消";

/// 确认框的回调，参数为用户是否选择重新登录
pub type ReloginAnswer = Box<dyn FnOnce(bool)>;

pub trait Notifier {
    /// 短暂展示的错误提示
    fn error(&self, message: &str, duration: Duration);

    /// 弹出重新登录确认框，立即返回；用户作答后调用 `on_answer`
    fn confirm_relogin(&self, on_answer: ReloginAnswer);

    /// 重新加载应用外壳
    fn reload(&self);
}

// =========================================================
// 测试工具: RecordingNotifier
// =========================================================

#[cfg(test)]
pub struct RecordingNotifier {
    pub errors: RefCell<Vec<String>>,
    pub confirms: Cell<usize>,
    pub reloads: Cell<usize>,
    /// `None` 表示用户迟迟不作答
    answer: Cell<Option<bool>>,
    pending: RefCell<Option<ReloginAnswer>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            errors: RefCell::new(Vec::new()),
            confirms: Cell::new(0),
            reloads: Cell::new(0),
            answer: Cell::new(Some(true)),
            pending: RefCell::new(None),
        }
    }

    /// 设置确认框的回答
    pub fn answer(&self, confirm: bool) {
        self.answer.set(Some(confirm));
    }

    /// 确认框保持打开，直到调用 `respond`
    pub fn hold(&self) {
        self.answer.set(None);
    }

    /// 回答一个保持打开的确认框
    pub fn respond(&self, confirm: bool) {
        let pending = self.pending.borrow_mut().take();
        if let Some(on_answer) = pending {
            on_answer(confirm);
        }
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn error(&self, message: &str, _duration: Duration) {
        self.errors.borrow_mut().push(message.to_string());
    }

    fn confirm_relogin(&self, on_answer: ReloginAnswer) {
        self.confirms.set(self.confirms.get() + 1);
        match self.answer.get() {
            Some(confirm) => on_answer(confirm),
            None => *self.pending.borrow_mut() = Some(on_answer),
        }
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }
}
