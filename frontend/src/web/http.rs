//! HTTP 传输层
//!
//! 使用 `web_sys::fetch` 实现核心库的 `HttpClient`，另提供下载文件的保存。

use admin_console::request::{FilePart, HttpClient, HttpRequest, HttpResponse, RequestBody};
use admin_console::{ApiError, ApiResult};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response};

/// 会被读取并转交给核心库的响应头
const FORWARDED_HEADERS: [&str; 2] = ["content-type", "content-disposition"];

/// JS 异常的原始消息（`Error.message`），非 Error 值退回其字符串形式
fn js_message(e: &JsValue) -> String {
    match e.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => e.as_string().unwrap_or_else(|| format!("{:?}", e)),
    }
}

fn build_failed(e: JsValue) -> ApiError {
    ApiError::Encode(js_message(&e))
}

fn network_error(e: JsValue) -> ApiError {
    ApiError::Transport(js_message(&e))
}

fn part_to_blob(part: &FilePart) -> Result<Blob, JsValue> {
    let bytes = js_sys::Uint8Array::from(part.bytes.as_slice());
    let sequence = js_sys::Array::of1(&bytes);
    let bag = BlobPropertyBag::new();
    if let Some(content_type) = &part.content_type {
        bag.set_type(content_type);
    }
    Blob::new_with_u8_array_sequence_and_options(&sequence, &bag)
}

/// 基于 fetch 的传输实现
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    pub fn new() -> Self {
        Self
    }

    fn build(req: &HttpRequest) -> Result<Request, JsValue> {
        let headers = Headers::new()?;
        for (key, value) in &req.headers {
            headers.set(key, value)?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());

        match &req.body {
            Some(RequestBody::Json(body)) => {
                headers.set("Content-Type", "application/json")?;
                opts.set_body(&JsValue::from_str(body));
            }
            Some(RequestBody::Multipart(parts)) => {
                // Content-Type 交给浏览器生成（带 boundary）
                let form = FormData::new()?;
                for part in parts {
                    let blob = part_to_blob(part)?;
                    form.append_with_blob_and_filename(&part.field, &blob, &part.file_name)?;
                }
                opts.set_body(&JsValue::from(form));
            }
            None => {}
        }
        opts.set_headers(&headers.into());

        Request::new_with_str_and_init(&req.url, &opts)
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let request = Self::build(&req).map_err(build_failed)?;

        let window = web_sys::window()
            .ok_or_else(|| ApiError::Transport("无法获取 window 对象".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network_error)?;
        let response: Response = resp_value.dyn_into().map_err(|e| {
            ApiError::Decode(format!("Response 类型转换失败: {:?}", e))
        })?;

        let buffer = response.array_buffer().map_err(network_error)?;
        let buffer = JsFuture::from(buffer).await.map_err(network_error)?;
        let body = js_sys::Uint8Array::new(&buffer).to_vec();

        let mut out = HttpResponse::new(response.status(), body);
        for name in FORWARDED_HEADERS {
            if let Ok(Some(value)) = response.headers().get(name) {
                out = out.with_header(name, &value);
            }
        }
        Ok(out)
    }
}

/// 将二进制响应保存为本地文件（触发浏览器下载）
pub fn save_file(resp: &HttpResponse, fallback_name: &str) -> Result<(), JsValue> {
    let file_name = resp
        .file_name()
        .unwrap_or_else(|| fallback_name.to_string());

    let part = FilePart {
        field: String::new(),
        file_name: file_name.clone(),
        content_type: resp.content_type().map(str::to_string),
        bytes: resp.body.clone(),
    };
    let blob = part_to_blob(&part)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("无法获取 document 对象"))?;
    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url)
}
