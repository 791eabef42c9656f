use thiserror::Error;

// =========================================================
// 核心错误类型
// =========================================================

/// 请求封装层与会话动作产生的全部错误
///
/// - `Business` / `SessionExpired` 来自响应信封，`msg` 原样保留
/// - `Transport` 为网络层失败（连接、超时等），保留原始消息
#[derive(Debug, Error)]
pub enum ApiError {
    /// 非 200、非 401 的业务错误
    #[error("{msg}")]
    Business { code: i32, msg: String },

    /// 401: 登录状态失效
    #[error("{msg}")]
    SessionExpired { msg: String },

    #[error("{0}")]
    Transport(String),

    /// 响应体或 data 字段无法解析
    #[error("响应解析失败: {0}")]
    Decode(String),

    /// 查询参数或请求体无法序列化
    #[error("请求构建失败: {0}")]
    Encode(String),

    #[error("令牌存储失败: {0}")]
    Storage(String),

    /// `/auth/info` 未返回用户数据
    #[error("验证失败，请重新登录")]
    ProfileMissing,

    /// 接口返回的形态与调用方期望不符（原始流 / 信封数据）
    #[error("unexpected {found} reply, expected {expected}")]
    UnexpectedReply {
        expected: &'static str,
        found: &'static str,
    },
}

impl ApiError {
    /// 面向用户展示的消息
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// 信封中的业务码（仅业务错误与会话失效有）
    pub fn code(&self) -> Option<i32> {
        match self {
            ApiError::Business { code, .. } => Some(*code),
            ApiError::SessionExpired { .. } => Some(admin_console_shared::CODE_UNAUTHORIZED),
            _ => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired { .. })
    }

    /// 请求层（`Service`）已经向用户提示过的错误，调用方不应再次提示
    pub fn is_reported(&self) -> bool {
        matches!(
            self,
            ApiError::Business { .. }
                | ApiError::SessionExpired { .. }
                | ApiError::Transport(_)
                | ApiError::Decode(_)
        )
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for ApiError {
    fn from(e: serde_urlencoded::ser::Error) -> Self {
        ApiError::Encode(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
