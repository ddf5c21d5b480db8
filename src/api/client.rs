//! HTTP transport shared by the content and auth backends
//!
//! Mirrors the web client's request helper: an empty body counts as a
//! successful envelope, and non-2xx responses surface the envelope message
//! when the body carried one.

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{ApiError, ApiResponse};

/// A reqwest client bound to one backend base URL
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Build an endpoint URL by appending percent-encoded path segments
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::Transport(format!("{} cannot be a base URL", self.base_url)))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// GET returning a backend envelope
    pub async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, ApiError> {
        let url = self.endpoint(segments)?;
        req_debug!("GET {} {:?}", url, query);
        self.send_enveloped(self.client.get(url).query(query)).await
    }

    /// POST a JSON body, returning a backend envelope
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError> {
        let url = self.endpoint(segments)?;
        req_debug!("POST {}", url);
        self.send_enveloped(self.client.post(url).json(body)).await
    }

    /// POST an `application/x-www-form-urlencoded` body, returning a backend envelope
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        form: &[(&str, &str)],
    ) -> Result<ApiResponse<T>, ApiError> {
        let url = self.endpoint(segments)?;
        req_debug!("POST (form) {}", url);
        self.send_enveloped(self.client.post(url).form(form)).await
    }

    /// GET a bare JSON body (no envelope)
    pub async fn get_raw<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        req_debug!("GET (raw) {}", url);
        self.send_raw(self.client.get(url).query(query)).await
    }

    /// POST a JSON body, expecting a bare JSON body back
    pub async fn post_json_raw<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        req_debug!("POST (raw) {}", url);
        self.send_raw(self.client.post(url).json(body)).await
    }

    async fn send_enveloped<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>, ApiError> {
        let response = request.send().await.map_err(|e| {
            log::error!("API request failed: {}", e);
            ApiError::from(e)
        })?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        req_trace!("<- {} {}", status, text);

        decode_envelope(status, &text)
    }

    async fn send_raw<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            log::error!("API request failed: {}", e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: Some(text).filter(|t| !t.trim().is_empty()),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let url = Url::parse(base_url.trim_end_matches('/'))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::Transport(format!("{} cannot be a base URL", base_url)));
    }
    Ok(url)
}

/// Turn an HTTP status and body into a typed envelope
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    body: &str,
) -> Result<ApiResponse<T>, ApiError> {
    let ok = (200..300).contains(&status);

    if body.trim().is_empty() {
        if ok {
            return Ok(ApiResponse::empty_ok());
        }
        return Err(ApiError::Http { status, message: None });
    }

    let envelope: ApiResponse<Value> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if ok => return Err(ApiError::Malformed(e.to_string())),
        Err(_) => return Err(ApiError::Http { status, message: None }),
    };

    if !ok {
        let message = Some(envelope.message).filter(|m| !m.is_empty());
        log::warn!("Backend returned HTTP {} ({})", status, envelope.code);
        return Err(ApiError::Http { status, message });
    }

    envelope.decode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_ok_envelope() {
        let envelope: ApiResponse<String> = decode_envelope(200, "").unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.data, None);
    }

    #[test]
    fn test_error_status_uses_envelope_message() {
        let result: Result<ApiResponse<String>, _> =
            decode_envelope(409, r#"{"code":"DUPLICATE","message":"이미 존재하는 아이디입니다.","data":null}"#);
        assert_eq!(
            result,
            Err(ApiError::Http { status: 409, message: Some("이미 존재하는 아이디입니다.".into()) })
        );
    }

    #[test]
    fn test_error_status_without_envelope() {
        let result: Result<ApiResponse<String>, _> = decode_envelope(500, "<html>oops</html>");
        assert_eq!(result, Err(ApiError::Http { status: 500, message: None }));
    }

    #[test]
    fn test_non_success_code_is_returned_not_raised() {
        let envelope: ApiResponse<String> =
            decode_envelope(200, r#"{"code":"FAIL","message":"nope","data":null}"#).unwrap();
        assert!(!envelope.is_success());
        assert_eq!(envelope.message, "nope");
    }

    #[test]
    fn test_search_results_with_null_fields() {
        let body = r#"{"code":"OK","message":"","data":[
            {"contentId":"126508","contenttypeid":"12","title":"경복궁","tel":null,"addr1":"서울 종로구 사직로 161","addr2":null,"firstimage":null},
            {"contentId":"126512","contenttypeid":"12","title":"광화문","cat3":null,"zipcode":null}
        ]}"#;
        let records = decode_envelope::<Vec<crate::models::ContentRecord>>(200, body)
            .unwrap()
            .into_data()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tel, "");
        assert_eq!(records[0].full_address(), "서울 종로구 사직로 161");
        assert_eq!(records[0].firstimage, None);
        assert_eq!(records[1].cat3, "");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = HttpClient::new("http://localhost:8085/api/", 5).unwrap();
        let url = client.endpoint(&["search", "12 34"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8085/api/search/12%2034");
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(HttpClient::new("mailto:someone@example.com", 5).is_err());
    }
}
