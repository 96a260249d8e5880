//! Remote task client: one function per backend operation, returning the
//! parsed body or the server's error message (with a generic fallback
//! when there is no server response to read).

use serde::de::DeserializeOwned;
use shared::{ApiMessage, NewTask, Task, TaskPatch};
use uuid::Uuid;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Request, RequestInit, Response};

const NETWORK_ERROR: &str = "Could not reach the server";

/// Base URL baked in at build time; empty means same origin.
fn api_url(path: &str) -> String {
    format!("{}{}", option_env!("API_URL").unwrap_or(""), path)
}

async fn send(method: &str, path: &str, body: Option<String>) -> Result<String, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    let has_body = body.is_some();
    if let Some(body) = body {
        opts.set_body(&JsValue::from_str(&body));
    }

    let request = Request::new_with_str_and_init(&api_url(path), &opts)
        .map_err(|_| "Failed to create request".to_string())?;
    if has_body {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|_| "Failed to set header".to_string())?;
    }

    let promise = window()
        .expect("no window")
        .fetch_with_request(&request);
    let response: Response = JsFuture::from(promise)
        .await
        .map_err(|_| NETWORK_ERROR.to_string())?
        .into();

    let ok = response.ok();
    let status = response.status();
    let text_promise = response
        .text()
        .map_err(|_| "Failed to read response".to_string())?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|_| "Failed to read response".to_string())?
        .as_string()
        .ok_or_else(|| "Failed to read response".to_string())?;

    if ok {
        Ok(text)
    } else {
        // Prefer the server's {message} envelope over a status line.
        Err(serde_json::from_str::<ApiMessage>(&text)
            .map(|m| m.message)
            .unwrap_or_else(|_| format!("Request failed with status {}", status)))
    }
}

fn parse<T: DeserializeOwned>(text: String) -> Result<T, String> {
    serde_json::from_str(&text).map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn list_tasks() -> Result<Vec<Task>, String> {
    parse(send("GET", "/tasks", None).await?)
}

pub async fn get_task(id: Uuid) -> Result<Task, String> {
    parse(send("GET", &format!("/tasks/{}", id), None).await?)
}

pub async fn create_task(draft: &NewTask) -> Result<Task, String> {
    let body = serde_json::to_string(draft).map_err(|_| "Failed to serialize request".to_string())?;
    parse(send("POST", "/tasks", Some(body)).await?)
}

pub async fn update_task(id: Uuid, patch: &TaskPatch) -> Result<Task, String> {
    let body = serde_json::to_string(patch).map_err(|_| "Failed to serialize request".to_string())?;
    parse(send("PUT", &format!("/tasks/{}", id), Some(body)).await?)
}

pub async fn delete_task(id: Uuid) -> Result<ApiMessage, String> {
    parse(send("DELETE", &format!("/tasks/{}", id), None).await?)
}
