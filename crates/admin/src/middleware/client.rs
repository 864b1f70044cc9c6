//! Client context extractor.
//!
//! Captures the peer address and `User-Agent` recorded on every issued
//! session. The peer address is only known when the server is started with
//! `into_make_service_with_connect_info::<SocketAddr>()`.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts},
};

use crate::models::ClientContext;

impl<S> FromRequestParts<S> for ClientContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip_address = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        Ok(Self {
            ip_address,
            user_agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    #[tokio::test]
    async fn test_extracts_peer_and_user_agent() {
        let request = Request::builder()
            .header(header::USER_AGENT, "curl/8.5.0")
            .extension(ConnectInfo(SocketAddr::from(([192, 168, 1, 20], 55000))))
            .body(())
            .unwrap();
        let (mut parts, ()) = request.into_parts();

        let client = ClientContext::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(client.ip_address.as_deref(), Some("192.168.1.20"));
        assert_eq!(client.user_agent, "curl/8.5.0");
    }

    #[tokio::test]
    async fn test_missing_parts_default_to_empty() {
        let (mut parts, ()) = Request::builder().body(()).unwrap().into_parts();

        let client = ClientContext::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(client, ClientContext::default());
    }
}
