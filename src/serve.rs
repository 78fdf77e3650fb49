//! Read-only JSON API over the content index.
//!
//! Built on `tiny_http`. A fixed pool of worker threads pulls requests from
//! one shared server; every worker reads the same immutable index through an
//! `Arc`, so no locking is involved.
//!
//! # Architecture
//!
//! ```text
//!             ┌──────────────────────┐
//!             │  Arc<Server> (queue) │◄── Ctrl+C: unblock() per worker
//!             └──────────┬───────────┘
//!          ┌─────────────┼─────────────┐
//!          ▼             ▼             ▼
//!     ┌─────────┐   ┌─────────┐   ┌─────────┐
//!     │worker 0 │   │worker 1 │   │worker N │
//!     └────┬────┘   └────┬────┘   └────┬────┘
//!          └─────────────┼─────────────┘
//!                        ▼
//!               Arc<Api> (ContentIndex)
//! ```
//!
//! # Routes
//!
//! | Route                                  | Response                     |
//! |----------------------------------------|------------------------------|
//! | `/api/articles[?featured=true]`        | article summaries            |
//! | `/api/articles/{slug}`                 | full article or 404          |
//! | `/api/articles/{slug}/related?count=N` | related summaries            |
//! | `/api/categories`                      | all categories               |
//! | `/api/categories/{slug}`               | category or 404              |
//! | `/api/categories/{slug}/articles`      | category summaries           |
//! | `/api/tags?limit=N`                    | tag table                    |
//! | `/api/tags/{tag}`                      | tagged summaries or 404      |
//! | `/api/popular?count=N`                 | popular summaries            |
//! | `/api/search?q=...`                    | matching summaries           |

use crate::{
    config::{BlogConfig, SiteConfig},
    log,
    output::{CategoryPage, summaries},
};
use affineur_blog::ContentIndex;
use anyhow::{Context, Result, anyhow};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::{borrow::Cow, net::SocketAddr, sync::Arc, thread};
use tiny_http::{Header, Method, Request, Response, Server};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Everything a worker needs to answer a request.
#[derive(Debug)]
pub struct Api {
    index: ContentIndex,
    blog: BlogConfig,
}

impl Api {
    pub const fn new(index: ContentIndex, blog: BlogConfig) -> Self {
        Self { index, blog }
    }
}

/// Status code and JSON body of a handled request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    fn ok<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status: 200, body },
            Err(e) => Self::error(500, &e.to_string()),
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message }).to_string(),
        }
    }

    fn not_found(what: &str) -> Self {
        Self::error(404, &format!("{what} not found"))
    }
}

// ============================================================================
// Server Entry Point
// ============================================================================

/// Serve the index until Ctrl+C.
pub fn serve_api(config: &SiteConfig, index: ContentIndex) -> Result<()> {
    let interface: std::net::IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("invalid [serve.interface] `{}`", config.serve.interface))?;
    let workers = config.serve.workers.max(1);

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);
    let api = Arc::new(Api::new(index, config.blog.clone()));

    // One unblock() releases one blocked worker
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        for _ in 0..workers {
            server_for_signal.unblock();
        }
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}/api/articles ({} workers)", addr, workers);

    let handles: Vec<_> = (0..workers)
        .map(|_| {
            let server = Arc::clone(&server);
            let api = Arc::clone(&api);
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    if let Err(e) = handle_request(request, &api) {
                        log!("serve"; "request error: {e}");
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow!("server worker panicked"))?;
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: std::net::IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

fn handle_request(request: Request, api: &Api) -> Result<()> {
    let response = route(api, request.method(), request.url());
    if response.status >= 400 {
        log!("serve"; "{} {} -> {}", request.method(), request.url(), response.status);
    }

    let content_type = Header::from_bytes("Content-Type", "application/json; charset=utf-8")
        .map_err(|()| anyhow!("invalid Content-Type header"))?;
    let reply = Response::from_string(response.body)
        .with_status_code(response.status)
        .with_header(content_type);

    request.respond(reply)?;
    Ok(())
}

/// Split a raw request URL into decoded path segments and query parameters.
fn parse_url(url: &str) -> Option<(Vec<String>, FxHashMap<String, String>)> {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));

    let segments = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::decode(s).ok().map(Cow::into_owned))
        .collect::<Option<Vec<_>>>()?;

    let mut params = FxHashMap::default();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = value.replace('+', " ");
        params.insert(
            urlencoding::decode(key).ok()?.into_owned(),
            urlencoding::decode(&value).ok()?.into_owned(),
        );
    }

    Some((segments, params))
}

/// Read a numeric query parameter, `default` when absent.
fn count_param(
    params: &FxHashMap<String, String>,
    name: &str,
    default: usize,
) -> Result<usize, ApiResponse> {
    match params.get(name) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| {
            ApiResponse::error(400, &format!("`{name}` must be a non-negative integer"))
        }),
    }
}

/// Answer one request. Pure apart from reading the index.
pub fn route(api: &Api, method: &Method, url: &str) -> ApiResponse {
    if *method != Method::Get {
        return ApiResponse::error(405, "only GET is supported");
    }
    let Some((segments, params)) = parse_url(url) else {
        return ApiResponse::error(400, "malformed URL encoding");
    };
    let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
    let index = &api.index;

    let result = match segments.as_slice() {
        ["api", "articles"] => {
            let articles = if params.get("featured").is_some_and(|v| v == "true") {
                index.featured_articles()
            } else {
                index.all_articles().iter().collect()
            };
            Ok(ApiResponse::ok(&summaries(&articles)))
        }
        ["api", "articles", slug] => Ok(match index.article_by_slug(slug) {
            Some(article) => ApiResponse::ok(article),
            None => ApiResponse::not_found("article"),
        }),
        ["api", "articles", slug, "related"] => {
            count_param(&params, "count", api.blog.related_count).map(|count| {
                if index.article_by_slug(slug).is_none() {
                    return ApiResponse::not_found("article");
                }
                ApiResponse::ok(&summaries(&index.related_articles(slug, count)))
            })
        }
        ["api", "categories"] => Ok(ApiResponse::ok(index.categories())),
        ["api", "categories", slug] => Ok(match index.category_by_slug(slug) {
            Some(category) => ApiResponse::ok(category),
            None => ApiResponse::not_found("category"),
        }),
        ["api", "categories", slug, "articles"] => Ok(match index.category_by_slug(slug) {
            Some(category) => ApiResponse::ok(&CategoryPage {
                category,
                articles: summaries(&index.articles_by_category(slug)),
            }),
            None => ApiResponse::not_found("category"),
        }),
        ["api", "tags"] => {
            let tags = index.all_tags();
            count_param(&params, "limit", tags.len())
                .map(|limit| ApiResponse::ok(&tags[..limit.min(tags.len())]))
        }
        ["api", "tags", tag] => {
            let articles = index.articles_by_tag(tag);
            Ok(if articles.is_empty() {
                ApiResponse::not_found("tag")
            } else {
                ApiResponse::ok(&summaries(&articles))
            })
        }
        ["api", "popular"] => count_param(&params, "count", api.blog.popular_count)
            .map(|count| ApiResponse::ok(&summaries(&index.popular_articles(count)))),
        ["api", "search"] => {
            let query = params.get("q").map(String::as_str).unwrap_or_default();
            Ok(if api.blog.is_searchable(query) {
                ApiResponse::ok(&summaries(&index.search_articles(query)))
            } else {
                ApiResponse::error(
                    400,
                    &format!(
                        "query must be at least {} characters",
                        api.blog.search_min_chars
                    ),
                )
            })
        }
        _ => Ok(ApiResponse::not_found("route")),
    };

    result.unwrap_or_else(|error| error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{article, category};
    use affineur_blog::{Dataset, IntegrityPolicy, PopularityKind};
    use serde_json::Value;

    fn api() -> Api {
        let articles = vec![
            article("ripening-ai", "technology", "2024-07-01", &["ИИ", "сыр"], true),
            article("sensors", "technology", "2024-06-01", &["датчики", "сыр"], false),
            article("payback", "economy", "2024-05-01", &["ROI"], false),
        ];
        let categories = vec![category("technology"), category("economy")];
        let dataset = Dataset::new(articles, categories, IntegrityPolicy::Strict).unwrap();

        let blog = BlogConfig {
            popular: vec!["payback".into()],
            ..Default::default()
        };
        let index = ContentIndex::new(dataset)
            .with_popularity(PopularityKind::Curated.build(&blog.popular));
        Api::new(index, blog)
    }

    fn get(api: &Api, url: &str) -> (u16, Value) {
        let response = route(api, &Method::Get, url);
        (response.status, serde_json::from_str(&response.body).unwrap())
    }

    fn slugs(value: &Value) -> Vec<&str> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["slug"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_articles() {
        let api = api();
        let (status, body) = get(&api, "/api/articles");
        assert_eq!(status, 200);
        assert_eq!(slugs(&body), ["ripening-ai", "sensors", "payback"]);
        assert!(body[0].get("content").is_none());

        let (_, body) = get(&api, "/api/articles?featured=true");
        assert_eq!(slugs(&body), ["ripening-ai"]);
    }

    #[test]
    fn test_article_by_slug() {
        let api = api();
        let (status, body) = get(&api, "/api/articles/sensors");
        assert_eq!(status, 200);
        assert_eq!(body["slug"], "sensors");
        assert!(body.get("content").is_some());

        let (status, body) = get(&api, "/api/articles/missing");
        assert_eq!(status, 404);
        assert_eq!(body["error"], "article not found");
    }

    #[test]
    fn test_related() {
        let api = api();
        let (status, body) = get(&api, "/api/articles/ripening-ai/related?count=1");
        assert_eq!(status, 200);
        assert_eq!(slugs(&body), ["sensors"]);

        let (status, _) = get(&api, "/api/articles/ripening-ai/related?count=many");
        assert_eq!(status, 400);

        let (status, _) = get(&api, "/api/articles/missing/related");
        assert_eq!(status, 404);
    }

    #[test]
    fn test_categories() {
        let api = api();
        let (status, body) = get(&api, "/api/categories");
        assert_eq!(status, 200);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, body) = get(&api, "/api/categories/economy");
        assert_eq!(status, 200);
        assert_eq!(body["slug"], "economy");

        let (_, body) = get(&api, "/api/categories/technology/articles");
        assert_eq!(body["slug"], "technology");
        assert_eq!(slugs(&body["articles"]), ["ripening-ai", "sensors"]);

        let (status, _) = get(&api, "/api/categories/cooking/articles");
        assert_eq!(status, 404);
    }

    #[test]
    fn test_tags() {
        let api = api();
        let (status, body) = get(&api, "/api/tags?limit=1");
        assert_eq!(status, 200);
        assert_eq!(body[0]["name"], "сыр");
        assert_eq!(body[0]["count"], 2);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (_, body) = get(&api, "/api/tags?limit=100");
        assert_eq!(body.as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_tag_is_percent_decoded() {
        let api = api();
        // "СЫР"
        let (status, body) = get(&api, "/api/tags/%D0%A1%D0%AB%D0%A0");
        assert_eq!(status, 200);
        assert_eq!(slugs(&body), ["ripening-ai", "sensors"]);

        let (status, _) = get(&api, "/api/tags/unknown");
        assert_eq!(status, 404);
    }

    #[test]
    fn test_popular_uses_curated_order() {
        let api = api();
        let (_, body) = get(&api, "/api/popular?count=2");
        assert_eq!(slugs(&body), ["payback", "ripening-ai"]);

        let (_, body) = get(&api, "/api/popular");
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_search() {
        let api = api();
        let (status, body) = get(&api, "/api/search?q=Title+sensors");
        assert_eq!(status, 200);
        assert_eq!(slugs(&body), ["sensors"]);

        let (status, body) = get(&api, "/api/search?q=x");
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().contains("at least 2"));

        let (status, _) = get(&api, "/api/search");
        assert_eq!(status, 400);
    }

    #[test]
    fn test_method_not_allowed() {
        let api = api();
        for method in [Method::Post, Method::Head, Method::Delete] {
            let response = route(&api, &method, "/api/articles");
            assert_eq!(response.status, 405, "{method}");
        }
    }

    #[test]
    fn test_unknown_route() {
        let api = api();
        let (status, _) = get(&api, "/");
        assert_eq!(status, 404);
        let (status, _) = get(&api, "/api/authors");
        assert_eq!(status, 404);
    }

    #[test]
    fn test_malformed_encoding() {
        let api = api();
        let (status, _) = get(&api, "/api/tags/%FF");
        assert_eq!(status, 400);
    }

    #[test]
    fn test_parse_url() {
        let (segments, params) = parse_url("/api/search/?q=%D1%81%D1%8B%D1%80&x").unwrap();
        assert_eq!(segments, ["api", "search"]);
        assert_eq!(params["q"], "сыр");
        assert_eq!(params["x"], "");
    }
}
