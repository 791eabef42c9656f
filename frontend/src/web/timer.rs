//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生 `setTimeout`，用于提示框的自动关闭。

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// 一次性定时器
///
/// 当 `Timeout` 被 drop 时，若尚未触发则自动取消。
pub struct Timeout {
    handle: i32,
    fired: Rc<Cell<bool>>,
    #[allow(dead_code)]
    closure: Closure<dyn FnMut()>,
}

impl Timeout {
    /// 创建定时器；无法获取 window 或注册失败时返回 `None`
    pub fn new<F>(millis: u32, callback: F) -> Option<Self>
    where
        F: FnOnce() + 'static,
    {
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let mut callback = Some(callback);
        let closure = Closure::<dyn FnMut()>::new(move || {
            flag.set(true);
            if let Some(callback) = callback.take() {
                callback();
            }
        });

        let handle = web_sys::window()?
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis as i32,
            )
            .ok()?;

        Some(Self {
            handle,
            fired,
            closure,
        })
    }

    /// 是否已经触发
    pub fn is_fired(&self) -> bool {
        self.fired.get()
    }

    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.handle);
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if !self.is_fired() {
            self.cancel();
        }
    }
}
