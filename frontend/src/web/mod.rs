//! 原生 Web API 封装模块
//!
//! 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
//! 以减小 WASM 二进制体积。核心库的传输、令牌存储与提示特性均在此实现。

pub mod http;
pub mod notify;
pub mod router;
mod storage;
mod timer;

pub use http::FetchHttpClient;
pub use notify::{NoticeContext, ToastNotifier};
pub use storage::LocalTokenStorage;
