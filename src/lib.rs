//! 管理后台客户端核心
//!
//! - `service`: 请求封装（令牌注入、信封解析、统一提示）
//! - `session`: 会话存储；`auth`: 登录 / 资料 / 注销等动作
//! - `route`: 路由表与导航守卫
//! - `api`: 每个后端接口一个函数
//!
//! 传输层、令牌持久化与界面提示均为特性 (Trait)，由外壳注入。

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod notify;
pub mod request;
pub mod route;
pub mod service;
pub mod session;
pub mod storage;

pub use admin_console_shared as shared;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use notify::Notifier;
pub use request::{HttpClient, HttpRequest, HttpResponse};
pub use route::{Navigation, Page, RouteTable};
pub use service::{Reply, RequestSpec, Service};
pub use session::{AuthStatus, Session, SessionStore};
pub use storage::{MemoryTokenStorage, TokenStorage};

#[cfg(not(target_arch = "wasm32"))]
pub use request::ReqwestHttpClient;
