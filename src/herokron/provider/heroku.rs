use super::{ProcessFormation, Provider, ProviderSession};
use crate::error::{mask_key, HerokronError, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::RANGE;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api.heroku.com";
const ACCEPT: &str = "application/vnd.heroku+json; version=3";
const NEXT_RANGE: &str = "Next-Range";

/// Heroku Platform API v3 over a blocking HTTP client.
pub struct HerokuProvider {
    client: Client,
    base_url: String,
}

impl HerokuProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for HerokuProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for HerokuProvider {
    type Session = HerokuSession;

    fn connect(&self, key: &str) -> HerokuSession {
        HerokuSession {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            key: key.to_string(),
        }
    }
}

pub struct HerokuSession {
    client: Client,
    base_url: String,
    key: String,
}

#[derive(Deserialize)]
struct AppPayload {
    name: String,
}

#[derive(Deserialize)]
struct FormationPayload {
    #[serde(rename = "type")]
    process_type: String,
    quantity: u32,
}

#[derive(Serialize)]
struct ScaleRequest {
    quantity: u32,
}

impl HerokuSession {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Accept", ACCEPT)
            .header("User-Agent", concat!("herokron/", env!("CARGO_PKG_VERSION")))
            .bearer_auth(&self.key)
    }

    fn check(&self, response: Response, app: Option<&str>) -> Result<Response> {
        let status = response.status();
        match classify(status, app, &self.key) {
            None => Ok(response),
            Some(HerokronError::Provider(_)) => {
                let body = response.text().unwrap_or_default();
                Err(HerokronError::Provider(format!("HTTP {} {}", status, body)))
            }
            Some(err) => Err(err),
        }
    }
}

/// Map an HTTP status onto the gateway's error contract. `app` is the app the request
/// was about, if any: a 403 on an app means lost access, a 403 on `/apps` a bad key.
fn classify(status: StatusCode, app: Option<&str>, key: &str) -> Option<HerokronError> {
    if status.is_success() {
        return None;
    }
    Some(match (status, app) {
        (StatusCode::UNAUTHORIZED, _) | (StatusCode::FORBIDDEN, None) => {
            HerokronError::Authentication(mask_key(key))
        }
        (StatusCode::FORBIDDEN | StatusCode::NOT_FOUND, Some(app)) => {
            HerokronError::Authorization(app.to_string())
        }
        _ => HerokronError::Provider(format!("HTTP {}", status)),
    })
}

/// Range to request next. Heroku answers list requests page by page with
/// `206 Partial Content` and a `Next-Range` header until the last page.
fn next_range(response: &Response) -> Option<String> {
    if response.status() != StatusCode::PARTIAL_CONTENT {
        return None;
    }
    response
        .headers()
        .get(NEXT_RANGE)
        .and_then(|value| value.to_str().ok())
        .map(String::from)
}

impl ProviderSession for HerokuSession {
    fn list_apps(&self) -> Result<Vec<String>> {
        let mut apps = Vec::new();
        let mut range: Option<String> = None;

        loop {
            let mut request = self.authorized(self.client.get(self.url("/apps")));
            if let Some(range) = &range {
                request = request.header(RANGE, range);
            }
            let response = self.check(request.send()?, None)?;
            let next = next_range(&response);
            let page: Vec<AppPayload> = response.json()?;
            apps.extend(page.into_iter().map(|a| a.name));

            match next {
                Some(next) => {
                    log::debug!("fetching next page of apps: {}", next);
                    range = Some(next);
                }
                None => break,
            }
        }

        Ok(apps)
    }

    fn formation(&self, app: &str) -> Result<Vec<ProcessFormation>> {
        let response = self
            .authorized(self.client.get(self.url(&format!("/apps/{}/formation", app))))
            .send()?;
        let formation: Vec<FormationPayload> = self.check(response, Some(app))?.json()?;
        Ok(formation
            .into_iter()
            .map(|f| ProcessFormation::new(f.process_type, f.quantity))
            .collect())
    }

    fn scale(&self, app: &str, process_type: &str, quantity: u32) -> Result<()> {
        let url = self.url(&format!("/apps/{}/formation/{}", app, process_type));
        let response = self
            .authorized(self.client.patch(url))
            .json(&ScaleRequest { quantity })
            .send()?;
        self.check(response, Some(app))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    fn http_response(status: &str, headers: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n{}",
            status,
            body.len(),
            headers,
            body
        )
    }

    /// Answer one connection per scripted response, in order. Returns the base URL and a
    /// handle yielding the request heads the server saw.
    fn serve(responses: Vec<String>) -> (String, thread::JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let mut heads = Vec::new();
            for response in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut head = String::new();
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).unwrap();
                    if line.is_empty() || line == "\r\n" {
                        break;
                    }
                    head.push_str(&line);
                }
                stream.write_all(response.as_bytes()).unwrap();
                heads.push(head.to_lowercase());
            }
            heads
        });
        (base_url, handle)
    }

    fn local_provider(base_url: &str) -> HerokuProvider {
        HerokuProvider {
            client: Client::builder().no_proxy().build().unwrap(),
            base_url: base_url.to_string(),
        }
    }

    #[test]
    fn classify_success_is_not_an_error() {
        assert!(classify(StatusCode::OK, None, "key").is_none());
        assert!(classify(StatusCode::PARTIAL_CONTENT, None, "key").is_none());
        assert!(classify(StatusCode::OK, Some("svc"), "key").is_none());
    }

    #[test]
    fn classify_unauthorized_is_authentication() {
        assert!(matches!(
            classify(StatusCode::UNAUTHORIZED, None, "key-1234"),
            Some(HerokronError::Authentication(masked)) if masked == "****1234"
        ));
        assert!(matches!(
            classify(StatusCode::UNAUTHORIZED, Some("svc"), "key-1234"),
            Some(HerokronError::Authentication(_))
        ));
    }

    #[test]
    fn classify_forbidden_depends_on_app() {
        assert!(matches!(
            classify(StatusCode::FORBIDDEN, None, "key"),
            Some(HerokronError::Authentication(_))
        ));
        assert!(matches!(
            classify(StatusCode::FORBIDDEN, Some("svc"), "key"),
            Some(HerokronError::Authorization(app)) if app == "svc"
        ));
    }

    #[test]
    fn classify_not_found_app_is_authorization() {
        assert!(matches!(
            classify(StatusCode::NOT_FOUND, Some("svc"), "key"),
            Some(HerokronError::Authorization(app)) if app == "svc"
        ));
    }

    #[test]
    fn classify_other_statuses_are_provider_errors() {
        assert!(matches!(
            classify(StatusCode::NOT_FOUND, None, "key"),
            Some(HerokronError::Provider(_))
        ));
        assert!(matches!(
            classify(StatusCode::TOO_MANY_REQUESTS, Some("svc"), "key"),
            Some(HerokronError::Provider(_))
        ));
        assert!(matches!(
            classify(StatusCode::INTERNAL_SERVER_ERROR, None, "key"),
            Some(HerokronError::Provider(_))
        ));
    }

    #[test]
    fn list_apps_follows_next_range() {
        let (base_url, server) = serve(vec![
            http_response(
                "206 Partial Content",
                "Next-Range: ]svc-b..; max=2\r\n",
                r#"[{"name": "svc-a"}, {"name": "svc-b"}]"#,
            ),
            http_response("200 OK", "", r#"[{"name": "svc-c"}]"#),
        ]);

        let apps = local_provider(&base_url)
            .connect("key")
            .list_apps()
            .unwrap();

        assert_eq!(apps, vec!["svc-a", "svc-b", "svc-c"]);
        let heads = server.join().unwrap();
        assert!(!heads[0].contains("\nrange:"));
        assert!(heads[1].contains("\nrange: ]svc-b..; max=2"));
        assert!(heads[1].contains("authorization: bearer key"));
    }

    #[test]
    fn list_apps_single_page() {
        let (base_url, server) = serve(vec![http_response(
            "200 OK",
            "",
            r#"[{"name": "svc-a"}]"#,
        )]);

        let apps = local_provider(&base_url)
            .connect("key")
            .list_apps()
            .unwrap();

        assert_eq!(apps, vec!["svc-a"]);
        assert_eq!(server.join().unwrap().len(), 1);
    }

    #[test]
    fn formation_of_missing_app_is_authorization() {
        let (base_url, server) = serve(vec![http_response(
            "404 Not Found",
            "",
            r#"{"id": "not_found"}"#,
        )]);

        let err = local_provider(&base_url)
            .connect("key")
            .formation("svc-gone")
            .unwrap_err();

        assert!(matches!(err, HerokronError::Authorization(app) if app == "svc-gone"));
        assert!(server.join().unwrap()[0].starts_with("get /apps/svc-gone/formation "));
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let provider = HerokuProvider::with_base_url("http://localhost:5000/");
        assert_eq!(provider.base_url(), "http://localhost:5000");
    }

    #[test]
    fn session_builds_formation_urls() {
        let session = HerokuProvider::new().connect("key");
        assert_eq!(
            session.url("/apps/svc-a/formation/worker"),
            "https://api.heroku.com/apps/svc-a/formation/worker"
        );
    }

    #[test]
    fn parses_formation_payload() {
        let payload: Vec<FormationPayload> = serde_json::from_str(
            r#"[{"type": "web", "quantity": 1, "size": "basic"}, {"type": "worker", "quantity": 0}]"#,
        )
        .unwrap();
        assert_eq!(payload[0].process_type, "web");
        assert_eq!(payload[1].quantity, 0);
    }

    #[test]
    fn scale_request_body() {
        let body = serde_json::to_value(ScaleRequest { quantity: 1 }).unwrap();
        assert_eq!(body, serde_json::json!({"quantity": 1}));
    }
}
