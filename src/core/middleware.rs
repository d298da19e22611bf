//! 核心中间件模块

use std::{collections::HashSet, sync::Arc, time::Instant};

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use super::error::CoreError;

/// 请求日志中间件
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    let response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();

    info!(
        "{} {} - {} - {}ms - User-Agent: {:?}",
        method,
        uri,
        status,
        duration.as_millis(),
        user_agent
    );

    response
}

/// 可接受的 bearer token 集合
#[derive(Clone, Debug)]
pub struct BearerAuth {
    tokens: Arc<HashSet<String>>,
}

impl BearerAuth {
    pub fn new<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            tokens: Arc::new(tokens.into_iter().collect()),
        }
    }

    pub fn accepts(&self, token: &str) -> bool {
        !token.is_empty() && self.tokens.contains(token)
    }
}

/// 从 `Authorization` 头中取出 bearer token，scheme 不区分大小写
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("Bearer")
        .then(|| token.trim())
}

/// 认证中间件，挂在所有写操作路由上
pub async fn require_bearer_token(
    State(auth): State<BearerAuth>,
    req: Request,
    next: Next,
) -> Result<Response, CoreError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token);

    let rejection = match token {
        Some(token) if auth.accepts(token) => None,
        Some(_) => Some("unknown bearer token"),
        None => Some("missing bearer token"),
    };

    if let Some(reason) = rejection {
        warn!("Rejected {} {}: {}", req.method(), req.uri(), reason);
        return Err(CoreError::Unauthorized);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_auth_accepts_only_configured_tokens() {
        let auth = BearerAuth::new(vec!["secret".to_string()]);
        assert!(auth.accepts("secret"));
        assert!(!auth.accepts("other"));
        assert!(!auth.accepts(""));
    }

    #[test]
    fn test_bearer_scheme_is_case_insensitive() {
        assert_eq!(bearer_token("Bearer secret"), Some("secret"));
        assert_eq!(bearer_token("bearer secret"), Some("secret"));
        assert_eq!(bearer_token("BEARER  secret "), Some("secret"));
        assert_eq!(bearer_token("Basic c2VjcmV0"), None);
        assert_eq!(bearer_token("Bearer"), None);
    }
}
