//! Header set the Connect web client sends with API calls.

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE, ORIGIN,
    REFERER, USER_AGENT,
};

use crate::auth::Credential;

/// Backend routing header the Connect proxy expects on `gc-api` calls.
pub const DI_BACKEND: &str = "di-backend";
pub const DI_BACKEND_VALUE: &str = "connectapi.garmin.com";
/// Legacy marker the web client still sends with API calls.
pub const NK: &str = "nk";

/// Headers for an authenticated workout-service request.
///
/// Values that cannot form a header (e.g. a token containing newlines) are
/// skipped; the provider then rejects the call as unauthenticated.
pub fn connect_headers(
    credential: &Credential,
    web_base_url: &str,
    sport_key: &str,
    user_agent: &str,
) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers.insert(HeaderName::from_static(DI_BACKEND), HeaderValue::from_static(DI_BACKEND_VALUE));
    headers.insert(HeaderName::from_static(NK), HeaderValue::from_static("NT"));
    insert(&mut headers, AUTHORIZATION, &credential.authorization());
    insert(&mut headers, COOKIE, &credential.cookie_header);
    insert(&mut headers, USER_AGENT, user_agent);
    insert(&mut headers, ORIGIN, web_base_url.trim_end_matches('/'));
    insert(&mut headers, REFERER, &referer(web_base_url, sport_key));
    headers
}

/// Workout editor page for a sport, as the web client's referer.
pub fn referer(web_base_url: &str, sport_key: &str) -> String {
    format!(
        "{}/modern/workout/create/{sport_key}",
        web_base_url.trim_end_matches('/')
    )
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    if value.is_empty() {
        return;
    }
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(_) => tracing::warn!(header = %name, "Skipping header with invalid value"),
    }
}
