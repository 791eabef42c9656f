use crate::error::ApiResult;
use crate::request::{FilePart, HttpResponse};
use crate::service::{RequestSpec, Service};
use admin_console_shared::dto::{
    CaptchaCheckRequest, EncryptParam, EncryptedBody, IpQuery, WordTemplateQuery,
};
use chrono::NaiveDate;
use serde_json::Value;

// 验证码
pub async fn captcha(svc: &Service) -> ApiResult<Value> {
    svc.fetch(RequestSpec::post("/captcha")).await
}

pub async fn check_captcha(svc: &Service, req: &CaptchaCheckRequest) -> ApiResult<()> {
    svc.execute(RequestSpec::post("/example/check/captcha").json(req)?)
        .await
}

// 请求加密
pub async fn rsa_public_key(svc: &Service) -> ApiResult<String> {
    svc.fetch(RequestSpec::get("/encrypt/rsa/public/key")).await
}

/// 请求体与查询参数都由调用方用公钥加密后传入
pub async fn decrypt_params(svc: &Service, body: &EncryptedBody, param: &str) -> ApiResult<Value> {
    let query = EncryptParam {
        example_encrypt_param: param.to_string(),
    };
    svc.fetch(
        RequestSpec::post("/example/encrypt")
            .query(&query)?
            .json(body)?,
    )
    .await
}

// =========================================================
// Word 工具
// =========================================================

pub async fn export_word_by_template(
    svc: &Service,
    title: &str,
    name: &str,
    date: NaiveDate,
) -> ApiResult<HttpResponse> {
    let query = WordTemplateQuery {
        title: title.to_string(),
        name: name.to_string(),
        date,
    };
    svc.download(RequestSpec::get("/example/word/template").query(&query)?)
        .await
}

pub async fn word_paragraphs_txt(svc: &Service, file: FilePart) -> ApiResult<HttpResponse> {
    svc.download(RequestSpec::post("/example/word/txt/paragraphs").file(file))
        .await
}

pub async fn word_tables_zip(svc: &Service, file: FilePart) -> ApiResult<HttpResponse> {
    svc.download(RequestSpec::post("/example/word/zip/tables").file(file))
        .await
}

pub async fn word_images_zip(svc: &Service, file: FilePart) -> ApiResult<HttpResponse> {
    svc.download(RequestSpec::post("/example/word/zip/images").file(file))
        .await
}

// =========================================================
// PDF 工具
// =========================================================

pub async fn export_pdf_freemarker(svc: &Service) -> ApiResult<HttpResponse> {
    svc.download(RequestSpec::get("/example/pdf/template/freemarker"))
        .await
}

pub async fn export_pdf_thymeleaf(svc: &Service) -> ApiResult<HttpResponse> {
    svc.download(RequestSpec::get("/example/pdf/template/thymeleaf"))
        .await
}

pub async fn export_pdf_jte(svc: &Service) -> ApiResult<HttpResponse> {
    svc.download(RequestSpec::get("/example/pdf/template/jte")).await
}

pub async fn pdf_paragraphs_txt(svc: &Service, file: FilePart) -> ApiResult<HttpResponse> {
    svc.download(RequestSpec::post("/example/pdf/txt/paragraphs").file(file))
        .await
}

pub async fn pdf_images_zip(svc: &Service, file: FilePart) -> ApiResult<HttpResponse> {
    svc.download(RequestSpec::post("/example/pdf/zip/images").file(file))
        .await
}

// =========================================================
// IP 工具
// =========================================================

pub async fn region_by_ip(svc: &Service, ip: &str) -> ApiResult<String> {
    let query = IpQuery { ip: ip.to_string() };
    svc.fetch(RequestSpec::get("/example/ip2region/region/by/ip").query(&query)?)
        .await
}

pub async fn ip_and_region_by_request(svc: &Service) -> ApiResult<String> {
    svc.fetch(RequestSpec::get("/example/ip2region/ip/region/by/request"))
        .await
}
