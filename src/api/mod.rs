//! Backend API Bindings
//!
//! Typed fetch wrappers over the REST backend, organized by domain.
//! All requests funnel through [`request`]: canonical URL, Token auth
//! header, CSRF header from the cookie, JSON in and out.

pub mod auth;
pub mod inventory;
pub mod layout;
pub mod market;
pub mod recipes;
pub mod shopping;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::error::{AppError, Result};
use crate::storage;

pub use auth::*;
pub use inventory::*;
pub use layout::*;
pub use market::*;
pub use recipes::*;
pub use shopping::*;

const CSRF_COOKIE: &str = "csrftoken";

/// Canonical URL for an endpoint: `/api/<path>/<?query>`, exactly one
/// trailing slash before any query string. Callers may pass bare paths,
/// 1–2 leading slashes, an existing `/api/` prefix, or a query string.
pub fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim();
    let (path, query) = match trimmed.find('?') {
        Some(i) => (&trimmed[..i], Some(&trimmed[i..])),
        None => (trimmed, None),
    };
    let path = path.trim_matches('/');
    let path = path.strip_prefix("api/").unwrap_or(path).trim_start_matches('/');

    let mut url = String::from("/api/");
    if !path.is_empty() {
        url.push_str(path);
        url.push('/');
    }
    if let Some(query) = query {
        url.push_str(query);
    }
    url
}

/// Pull one cookie value out of `document.cookie`
fn cookie_value(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header.split(';').find_map(|part| {
        let part = part.trim();
        let value = part.strip_prefix(name)?.strip_prefix('=')?;
        Some(value.to_string())
    })
}

fn csrf_token() -> Option<String> {
    let doc = web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()?;
    let cookies = doc.cookie().ok()?;
    cookie_value(&cookies, CSRF_COOKIE)
}

/// Dead session: wipe local auth state and reload so the page comes back
/// in logged-out mode
fn force_logout() {
    storage::clear_session();
    if let Some(win) = web_sys::window() {
        let _ = win.location().reload();
    }
}

fn js_text(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

/// One round-trip. `Ok(None)` is a 204; 401/403 force a logout before
/// surfacing as `Unauthorized`.
pub(crate) async fn request(
    method: &str,
    endpoint: &str,
    body: Option<String>,
) -> Result<Option<serde_json::Value>> {
    let url = normalize_endpoint(endpoint);

    let headers = Headers::new().map_err(|e| AppError::network(js_text(e)))?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|e| AppError::network(js_text(e)))?;
    if let Some(csrf) = csrf_token() {
        let _ = headers.set("X-CSRFToken", &csrf);
    }
    if let Some(token) = storage::auth_token() {
        let _ = headers.set("Authorization", &format!("Token {token}"));
    }

    let init = RequestInit::new();
    init.set_method(method);
    init.set_headers(&headers);
    if let Some(body) = body {
        init.set_body(&JsValue::from_str(&body));
    }

    let request =
        Request::new_with_str_and_init(&url, &init).map_err(|e| AppError::network(js_text(e)))?;
    let window = web_sys::window().ok_or_else(|| AppError::network("window absent"))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| AppError::network(js_text(e)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| AppError::network("réponse fetch inattendue"))?;

    let status = response.status();
    if status == 401 || status == 403 {
        web_sys::console::warn_1(&format!("[API] {status} sur {url}, déconnexion forcée").into());
        force_logout();
        return Err(AppError::Unauthorized { status });
    }

    if !response.ok() {
        let message = error_message(&response, status).await;
        return Err(AppError::Http { status, message });
    }

    if status == 204 {
        return Ok(None);
    }

    let json = response
        .json()
        .map_err(|e| AppError::decode(js_text(e)))?;
    let js = JsFuture::from(json)
        .await
        .map_err(|e| AppError::decode(js_text(e)))?;
    let value: serde_json::Value =
        serde_wasm_bindgen::from_value(js).map_err(|e| AppError::decode(e.to_string()))?;
    Ok(Some(value))
}

/// Body's `error` (or `detail`) field when the backend sent one,
/// "Erreur {status}" otherwise
async fn error_message(response: &Response, status: u16) -> String {
    let fallback = format!("Erreur {status}");
    let Ok(json) = response.json() else {
        return fallback;
    };
    let Ok(js) = JsFuture::from(json).await else {
        return fallback;
    };
    let Ok(value) = serde_wasm_bindgen::from_value::<serde_json::Value>(js) else {
        return fallback;
    };
    value
        .get("error")
        .or_else(|| value.get("detail"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or(fallback)
}

pub(crate) async fn get_json<T: DeserializeOwned>(endpoint: &str) -> Result<T> {
    let value = request("GET", endpoint, None)
        .await?
        .unwrap_or(serde_json::Value::Null);
    serde_json::from_value(value).map_err(AppError::decode)
}

pub(crate) async fn send_json<T, B>(method: &str, endpoint: &str, body: &B) -> Result<T>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    let body = serde_json::to_string(body).map_err(AppError::decode)?;
    let value = request(method, endpoint, Some(body))
        .await?
        .unwrap_or(serde_json::Value::Null);
    serde_json::from_value(value).map_err(AppError::decode)
}

pub(crate) async fn send_no_content<B>(method: &str, endpoint: &str, body: Option<&B>) -> Result<()>
where
    B: Serialize + ?Sized,
{
    let body = match body {
        Some(body) => Some(serde_json::to_string(body).map_err(AppError::decode)?),
        None => None,
    };
    request(method, endpoint, body).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_path_gets_prefix_and_trailing_slash() {
        assert_eq!(normalize_endpoint("inventory"), "/api/inventory/");
        assert_eq!(
            normalize_endpoint("inventory/categories"),
            "/api/inventory/categories/"
        );
    }

    #[test]
    fn leading_slashes_collapse() {
        assert_eq!(normalize_endpoint("/shopping-list"), "/api/shopping-list/");
        assert_eq!(normalize_endpoint("//shopping-list"), "/api/shopping-list/");
    }

    #[test]
    fn existing_api_prefix_is_not_doubled() {
        assert_eq!(normalize_endpoint("/api/commerces/"), "/api/commerces/");
        assert_eq!(normalize_endpoint("api/commerces"), "/api/commerces/");
    }

    #[test]
    fn trailing_slash_is_exactly_one() {
        assert_eq!(normalize_endpoint("recipes/"), "/api/recipes/");
        assert_eq!(normalize_endpoint("recipes//"), "/api/recipes/");
        assert_eq!(normalize_endpoint("recipes/3"), "/api/recipes/3/");
    }

    #[test]
    fn query_string_sits_after_the_slash() {
        assert_eq!(
            normalize_endpoint("/api/user/layout?page=optimiseur"),
            "/api/user/layout/?page=optimiseur"
        );
        assert_eq!(
            normalize_endpoint("products/search/?q=beurre"),
            "/api/products/search/?q=beurre"
        );
    }

    #[test]
    fn cookie_lookup_handles_spacing_and_order() {
        let header = "theme=dark; csrftoken=abc123; lang=fr";
        assert_eq!(cookie_value(header, "csrftoken").as_deref(), Some("abc123"));
        assert_eq!(cookie_value(header, "lang").as_deref(), Some("fr"));
        assert_eq!(cookie_value(header, "missing"), None);
    }
}
