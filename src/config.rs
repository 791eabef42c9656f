use std::time::Duration;

// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

/// 这些是默认值，如果环境变量中没有定义，则使用这些值
pub const DEFAULT_BASE_URL: &str = "/api";
pub const DEFAULT_TOKEN_KEY: &str = "admin_console_token";
pub const DEFAULT_NOTIFY_DURATION: Duration = Duration::from_millis(5 * 1000);

const ENV_BASE_URL: &str = "ADMIN_CONSOLE_BASE_URL";
const ENV_TOKEN_KEY: &str = "ADMIN_CONSOLE_TOKEN_KEY";
const ENV_TIMEOUT_MS: &str = "ADMIN_CONSOLE_TIMEOUT_MS";

/// 客户端配置
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// 所有接口路径的前缀，url = base url + request url
    pub base_url: String,
    /// 令牌持久化使用的键
    pub token_key: String,
    /// 请求超时，默认关闭
    pub timeout: Option<Duration>,
    /// 错误提示的展示时长
    pub notify_duration: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            timeout: None,
            notify_duration: DEFAULT_NOTIFY_DURATION,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            ..Default::default()
        }
    }

    /// 从进程环境变量读取配置
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意键值来源构建配置，读不到的项使用默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            base_url: lookup(ENV_BASE_URL)
                .map(normalize_base_url)
                .unwrap_or(defaults.base_url),
            token_key: lookup(ENV_TOKEN_KEY)
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.token_key),
            timeout: lookup(ENV_TIMEOUT_MS)
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
            notify_duration: defaults.notify_duration,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// 拼接完整请求地址
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 从完整地址中还原接口路径：去掉 base url 前缀与查询串
    pub fn endpoint_path<'a>(&self, url: &'a str) -> &'a str {
        let rest = match url.find(self.base_url.as_str()) {
            Some(idx) if !self.base_url.is_empty() => &url[idx + self.base_url.len()..],
            _ => url,
        };
        rest.split('?').next().unwrap_or(rest)
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
