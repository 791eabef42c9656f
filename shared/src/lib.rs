use serde::{Deserialize, Serialize};
use std::fmt;

pub mod dto;
pub mod protocol;

pub use protocol::{Envelope, HttpMethod, Page, PageModel};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const CODE_SUCCESS: i32 = 200;
pub const CODE_UNAUTHORIZED: i32 = 401;

/// 后端直接返回二进制流（文件/模板/导出/转换）的接口
///
/// 这些路径不包含 base url 与查询串，命中时跳过 `{code, msg, data}` 解析。
pub const BINARY_ENDPOINTS: &[&str] = &[
    "/admin/user/export",
    "/admin/user/template",
    "/admin/log/export",
    "/admin/file/export",
    "/example/word/template",
    "/example/word/txt/paragraphs",
    "/example/word/zip/tables",
    "/example/word/zip/images",
    "/example/pdf/template/freemarker",
    "/example/pdf/template/thymeleaf",
    "/example/pdf/template/jte",
    "/example/pdf/txt/paragraphs",
    "/example/pdf/zip/images",
];

pub fn is_binary_endpoint(path: &str) -> bool {
    BINARY_ENDPOINTS.contains(&path)
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 粗粒度角色标记，控制路由可见性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub const ALL: &'static [Role] = &[Role::Admin, Role::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Long 类型主键在服务端被序列化为字符串，这里两种形式都接受
pub mod id_string {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Text(s)) => s,
            Some(Raw::Number(n)) => n.to_string(),
            None => String::new(),
        })
    }
}
