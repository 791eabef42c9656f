//! 请求体 / 查询参数 (DTO) 与响应数据 (VO)
//!
//! 字段名与后端保持一致（camelCase），主键统一使用字符串表示。

use crate::{Role, id_string};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// =========================================================
// 认证 (auth)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub account: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

/// 登录成功后 `data` 中携带的令牌
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginToken {
    pub token: String,
}

/// 当前登录用户信息 (`/auth/info`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthProfile {
    #[serde(default, deserialize_with = "id_string::deserialize")]
    pub id: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub account: String,
    pub password: String,
    pub check_password: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailCodeRequest {
    pub account: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievePasswordRequest {
    pub account: String,
    pub email: String,
    pub new_password: String,
    pub check_new_password: String,
    pub password_code: String,
}

// =========================================================
// 用户自助 (user)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub new_account: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNameRequest {
    pub new_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmailRequest {
    pub new_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub check_new_password: String,
}

// =========================================================
// 用户管理 (admin user)
// =========================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(deserialize_with = "id_string::deserialize")]
    pub id: String,
    pub account: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub state: i32,
    #[serde(default)]
    pub create_time: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddUserRequest {
    pub account: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInfoRequest {
    pub id: String,
    pub account: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserStateRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub id: String,
    pub new_password: String,
}

// =========================================================
// 日志 (log)
// =========================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    #[serde(deserialize_with = "id_string::deserialize")]
    pub id: String,
    pub uri: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub request_method: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub user_account: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub param: Option<String>,
    #[serde(default)]
    pub result: Option<i32>,
    #[serde(default)]
    pub json: Option<String>,
    #[serde(default, deserialize_with = "id_string::deserialize")]
    pub time: String,
    #[serde(default)]
    pub create_time: Option<NaiveDateTime>,
}

// =========================================================
// 文件 (file)
// =========================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oss_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    #[serde(deserialize_with = "id_string::deserialize")]
    pub id: String,
    pub original_name: String,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub oss_type: Option<String>,
    #[serde(default)]
    pub create_time: Option<NaiveDateTime>,
}

// =========================================================
// 示例工具 (example)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptchaCheckRequest {
    pub code: String,
    pub uuid: String,
}

/// 示例加密接口的请求体，字段由后端以 RSA 解密
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedBody {
    pub account: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptParam {
    pub example_encrypt_param: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordTemplateQuery {
    pub title: String,
    pub name: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpQuery {
    pub ip: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_from_server_payload() {
        let profile: AuthProfile = serde_json::from_value(json!({
            "id": "1",
            "account": "bob",
            "name": "Bob",
            "email": null,
            "avatarId": "9",
            "avatar": "http://oss/a.png",
            "role": "admin"
        }))
        .unwrap();
        assert_eq!(profile.id, "1");
        assert_eq!(profile.role, Role::Admin);
        assert_eq!(profile.email, None);
    }

    #[test]
    fn test_login_request_omits_captcha_when_absent() {
        let body = serde_json::to_value(LoginRequest {
            account: "bob".into(),
            password: "x".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, json!({ "account": "bob", "password": "x" }));
    }

    #[test]
    fn test_log_record_parses_iso_create_time() {
        let record: LogRecord = serde_json::from_value(json!({
            "id": "3",
            "uri": "/auth/login",
            "time": 12,
            "createTime": "2024-03-01T08:30:00"
        }))
        .unwrap();
        assert_eq!(record.time, "12");
        assert!(record.create_time.is_some());
    }
}
