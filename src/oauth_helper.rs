//! Static file server for the OAuth redirect.
//!
//! The provider sends the browser back to `/callback.html` with the result
//! in the query string; the page itself reads it, so that path is always
//! answered with the same file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use smallvec::SmallVec;

pub const INDEX_FILE: &str = "index.html";
pub const CALLBACK_PATH: &str = "/callback.html";
pub const CALLBACK_FILE: &str = "callback.html";
pub const NOT_FOUND_FILE: &str = "404.html";

const BUILTIN_NOT_FOUND: &str =
    "<!DOCTYPE html><html><head><title>404</title></head><body><h1>404 Not Found</h1></body></html>";

/// Directory files are served from.
#[derive(Debug, Clone)]
pub struct StaticRoot(pub PathBuf);

pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") => "image/jpeg",
        _ => "text/html",
    }
}

/// Maps a request path onto a file under `root`. `None` when the path
/// would leave the root.
pub fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let path = request_path.split(['?', '#']).next().unwrap_or_default();

    match path {
        "" | "/" => return Some(root.join(INDEX_FILE)),
        CALLBACK_PATH => return Some(root.join(CALLBACK_FILE)),
        _ => (),
    }

    let mut segments: SmallVec<[&str; 8]> = SmallVec::new();
    for seg in path.split('/') {
        match seg {
            "" | "." => continue,
            ".." => return None,
            s if s.contains('\\') || s.contains('\0') => return None,
            s => segments.push(s),
        }
    }

    match segments.is_empty() {
        true => Some(root.join(INDEX_FILE)),
        false => Some(segments.iter().fold(root.to_path_buf(), |p, s| p.join(s))),
    }
}

async fn not_found(root: &Path) -> HttpResponse {
    let body = match tokio::fs::read(root.join(NOT_FOUND_FILE)).await {
        Ok(b) => b,
        Err(_) => BUILTIN_NOT_FOUND.as_bytes().to_vec(),
    };

    HttpResponse::build(StatusCode::NOT_FOUND)
        .insert_header((CONTENT_TYPE, "text/html"))
        .body(body)
}

pub async fn serve(req: HttpRequest, root: web::Data<StaticRoot>) -> HttpResponse {
    let root = root.0.as_path();

    let file = match resolve(root, req.path()) {
        Some(f) => f,
        None => {
            tracing::debug!("rejected path {}", req.path());
            return not_found(root).await;
        },
    };

    let is_file = tokio::fs::metadata(&file)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    if !is_file {
        return not_found(root).await;
    }

    match tokio::fs::read(&file).await {
        Ok(body) => HttpResponse::Ok()
            .insert_header((CONTENT_TYPE, content_type_for(&file)))
            .body(body),
        Err(e) if e.kind() == ErrorKind::NotFound => not_found(root).await,
        Err(e) => {
            tracing::error!("cannot read {}: {}", file.display(), e);
            HttpResponse::InternalServerError()
                .insert_header((CONTENT_TYPE, "text/plain"))
                .body(format!("Server Error: {}", e.kind()))
        },
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) { cfg.default_service(web::route().to(serve)); }

#[cfg(test)]
mod tests {
    use std::fs;

    use actix_web::test::{call_service, init_service, read_body, TestRequest};
    use actix_web::App;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("app.js", "text/javascript")]
    #[case("style.css", "text/css")]
    #[case("data.json", "application/json")]
    #[case("logo.png", "image/png")]
    #[case("photo.jpg", "image/jpeg")]
    #[case("index.html", "text/html")]
    #[case("README", "text/html")]
    fn content_types(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(content_type_for(Path::new(name)), expected);
    }

    #[rstest]
    #[case("/", Some("index.html"))]
    #[case("/callback.html?code=abc&state=xyz", Some("callback.html"))]
    #[case("/js/app.js", Some("js/app.js"))]
    #[case("/./a//b.css", Some("a/b.css"))]
    #[case("/../etc/passwd", None)]
    #[case("/a/../../secret", None)]
    fn resolves_under_root(#[case] request: &str, #[case] expected: Option<&str>) {
        let root = Path::new("/srv/public");

        assert_eq!(resolve(root, request), expected.map(|p| root.join(p)));
    }

    fn site(with_404: bool) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(INDEX_FILE), "<h1>home</h1>").unwrap();
        fs::write(dir.path().join(CALLBACK_FILE), "<h1>callback</h1>").unwrap();
        fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();
        if with_404 {
            fs::write(dir.path().join(NOT_FOUND_FILE), "<h1>custom 404</h1>").unwrap();
        }
        dir
    }

    async fn get(dir: &tempfile::TempDir, uri: &str) -> (StatusCode, String, String) {
        let app = init_service(
            App::new()
                .app_data(web::Data::new(StaticRoot(dir.path().to_path_buf())))
                .configure(configure),
        )
        .await;

        let res = call_service(&app, TestRequest::get().uri(uri).to_request()).await;
        let status = res.status();
        let ct = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = String::from_utf8(read_body(res).await.to_vec()).unwrap();

        (status, ct, body)
    }

    #[actix_web::test]
    async fn callback_ignores_query() {
        let dir = site(false);

        for uri in ["/callback.html", "/callback.html?code=1&state=2", "/callback.html?error=denied"] {
            let (status, ct, body) = get(&dir, uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(ct, "text/html");
            assert_eq!(body, "<h1>callback</h1>");
        }
    }

    #[actix_web::test]
    async fn serves_assets_with_their_type() {
        let dir = site(false);

        let (status, ct, _) = get(&dir, "/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ct, "text/javascript");

        let (_, _, body) = get(&dir, "/").await;
        assert_eq!(body, "<h1>home</h1>");
    }

    #[actix_web::test]
    async fn unknown_paths_get_404_page() {
        let (status, _, body) = get(&site(true), "/nope.html").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "<h1>custom 404</h1>");

        let (status, _, body) = get(&site(false), "/nope.html").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("404 Not Found"));
    }
}
