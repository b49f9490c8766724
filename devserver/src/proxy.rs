use actix_web::{
    http::{
        header::{HeaderName, HeaderValue},
        StatusCode,
    },
    route, web, HttpRequest, HttpResponse,
};

/// Headers that describe one hop, not the message.
const HOP_BY_HOP: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "content-length",
];

pub struct Upstream {
    target: String,
    client: reqwest::Client,
}

impl Upstream {
    pub fn new(target: &str) -> reqwest::Result<Self> {
        // dev only: the remote origin may sit behind a self-signed certificate
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            target: target.trim_end_matches('/').to_owned(),
            client,
        })
    }

    pub fn url(&self, tail: &str, query: &str) -> String {
        let mut url = format!("{}/{}", self.target, tail.trim_start_matches('/'));
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }
        url
    }
}

/// Whether a request header is passed on to the upstream. `host` is dropped
/// so the upstream sees its own origin.
pub fn forward_request_header(name: &str) -> bool {
    name != "host" && !HOP_BY_HOP.contains(&name)
}

/// Whether an upstream response header is passed back. CORS headers come
/// from this server, not the upstream.
pub fn forward_response_header(name: &str) -> bool {
    !HOP_BY_HOP.contains(&name) && !name.starts_with("access-control-")
}

#[route(
    "/api/{tail:.*}",
    method = "GET",
    method = "POST",
    method = "PUT",
    method = "PATCH",
    method = "DELETE"
)]
async fn forward(
    req: HttpRequest,
    tail: web::Path<String>,
    body: web::Bytes,
    upstream: web::Data<Upstream>,
) -> HttpResponse {
    let url = upstream.url(&tail, req.query_string());
    let Ok(method) = reqwest::Method::from_bytes(req.method().as_str().as_bytes()) else {
        return HttpResponse::MethodNotAllowed().finish();
    };

    let mut outgoing = upstream.client.request(method, &url);
    for (name, value) in req.headers() {
        if forward_request_header(name.as_str()) {
            outgoing = outgoing.header(name.as_str(), value.as_bytes());
        }
    }
    if !body.is_empty() {
        outgoing = outgoing.body(body);
    }

    let resp = match outgoing.send().await {
        Ok(resp) => resp,
        Err(err) => {
            log::warn!("{} {} -> upstream unreachable: {err}", req.method(), url);
            return HttpResponse::BadGateway().body(format!("upstream unreachable: {err}"));
        }
    };
    log::info!("{} {} -> {}", req.method(), url, resp.status());

    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut builder = HttpResponse::build(status);
    for (name, value) in resp.headers() {
        if !forward_response_header(name.as_str()) {
            continue;
        }
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_str().as_bytes()),
            HeaderValue::from_bytes(value.as_bytes()),
        ) {
            builder.append_header((name, value));
        }
    }
    // streamed so server-sent events pass through unbuffered
    builder.streaming(resp.bytes_stream())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(forward);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{
        test::{call_service, init_service, read_body_json, TestRequest},
        web::Data,
        App, HttpServer,
    };
    use common::req::Device;
    use serde_json::{json, Value};

    async fn stub_devices() -> HttpResponse {
        HttpResponse::Ok()
            .insert_header(("set-cookie", "session=abc; Path=/; HttpOnly"))
            .insert_header(("access-control-allow-origin", "*"))
            .json(vec![Device {
                id: "d1".to_owned(),
                name: "Front door".to_owned(),
                status: "active".to_owned(),
            }])
    }

    async fn echo(req: HttpRequest, body: web::Bytes) -> HttpResponse {
        let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        let host = req.connection_info().host().to_owned();
        HttpResponse::Unauthorized().json(json!({
            "query": req.query_string(),
            "host": host,
            "cookie": req.headers().get("cookie").and_then(|v| v.to_str().ok()),
            "body": body,
        }))
    }

    fn spawn_upstream() -> String {
        let server = HttpServer::new(|| {
            App::new()
                .route("/devices/me", web::get().to(stub_devices))
                .route("/auth/login", web::post().to(echo))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{addr}")
    }

    #[test]
    fn url_keeps_path_and_query() {
        let upstream = Upstream::new("https://remote.example/").unwrap();
        assert_eq!(upstream.url("users/me", ""), "https://remote.example/users/me");
        assert_eq!(
            upstream.url("/alerts", "since=5"),
            "https://remote.example/alerts?since=5"
        );
    }

    #[test]
    fn header_filters() {
        assert!(forward_request_header("cookie"));
        assert!(forward_request_header("content-type"));
        assert!(!forward_request_header("host"));
        assert!(!forward_request_header("connection"));

        assert!(forward_response_header("set-cookie"));
        assert!(forward_response_header("content-type"));
        assert!(!forward_response_header("transfer-encoding"));
        assert!(!forward_response_header("access-control-allow-origin"));
    }

    #[actix_web::test]
    async fn forwards_api_prefix_with_cookies() {
        let target = spawn_upstream();
        let app = init_service(
            App::new()
                .app_data(Data::new(Upstream::new(&target).unwrap()))
                .configure(config),
        )
        .await;

        let req = TestRequest::get().uri("/api/devices/me").to_request();
        let resp = call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("set-cookie"));
        assert!(!resp.headers().contains_key("access-control-allow-origin"));
        let devices: Vec<Device> = read_body_json(resp).await;
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].id, "d1");
    }

    #[actix_web::test]
    async fn passes_status_body_and_query_through() {
        let target = spawn_upstream();
        let app = init_service(
            App::new()
                .app_data(Data::new(Upstream::new(&target).unwrap()))
                .configure(config),
        )
        .await;

        let req = TestRequest::post()
            .uri("/api/auth/login?remember=1")
            .insert_header(("cookie", "session=old"))
            .set_json(json!({ "email": "a@b.c", "password": "x" }))
            .to_request();
        let resp = call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let echoed: Value = read_body_json(resp).await;
        assert_eq!(echoed["query"], "remember=1");
        assert_eq!(echoed["cookie"], "session=old");
        assert_eq!(echoed["body"]["email"], "a@b.c");
        assert_eq!(echoed["host"], target.trim_start_matches("http://"));
    }

    #[actix_web::test]
    async fn unreachable_upstream_is_bad_gateway() {
        let app = init_service(
            App::new()
                .app_data(Data::new(Upstream::new("http://127.0.0.1:1").unwrap()))
                .configure(config),
        )
        .await;

        let req = TestRequest::get().uri("/api/users/me").to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }
}
