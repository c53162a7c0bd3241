//! Property-based tests for query tunneling using proptest.

use proptest::prelude::*;
use restli_sdk::constants::MAX_QUERY_STRING_LENGTH;
use restli_sdk::http_client::{Method, RequestOverrides};
use restli_sdk::restli::RestliMethod;
use restli_sdk::tunnel::{self, TunnelParams};
use serde_json::json;

const URL: &str = "https://api.linkedin.com/v2/testResource";

fn boundary_of(content_type: &str) -> &str {
    content_type
        .strip_prefix("multipart/mixed; boundary=")
        .unwrap_or_default()
}

proptest! {
    /// Only strictly longer than the threshold tunnels
    #[test]
    fn threshold_is_exclusive(len in 0usize..8000) {
        let query = "a".repeat(len);
        prop_assert_eq!(
            tunnel::is_query_tunneling_required(&query),
            len > MAX_QUERY_STRING_LENGTH
        );
    }

    /// Bodyless requests keep the query either on the URL or in the body,
    /// never both and never neither
    #[test]
    fn bodyless_query_lands_once(len in 3990usize..4010) {
        let query = format!("q={}", "x".repeat(len));
        let params = TunnelParams::new(&query, URL, RestliMethod::Finder, "tok");
        let request = tunnel::maybe_apply_query_tunneling_without_body(&params, &RequestOverrides::new());

        if tunnel::is_query_tunneling_required(&query) {
            prop_assert_eq!(request.method(), Method::Post);
            prop_assert_eq!(request.url(), URL);
            prop_assert_eq!(request.body_string(), Some(query));
        } else {
            prop_assert_eq!(request.method(), Method::Get);
            prop_assert_eq!(request.url(), format!("{URL}?{query}"));
            prop_assert!(request.body().is_none());
        }
        prop_assert_eq!(request.header_value("X-RestLi-Method"), Some("finder"));
    }

    /// The multipart boundary never occurs in the query or the JSON body,
    /// even when both are made of the boundary alphabet
    #[test]
    fn multipart_boundary_is_unique(
        filler in "[0-9a-z]{4001,4100}",
        body_text in "[0-9a-z]{0,200}"
    ) {
        let body = json!({"text": body_text});
        let params = TunnelParams::new(&filler, URL, RestliMethod::Update, "tok");
        let request = tunnel::maybe_apply_query_tunneling_with_body(&params, &body, &RequestOverrides::new())
            .unwrap();

        let content_type = request.header_value("Content-Type").unwrap().to_string();
        let boundary = boundary_of(&content_type);
        prop_assert_eq!(boundary.len(), 16);
        prop_assert!(!filler.contains(boundary));
        prop_assert!(!body.to_string().contains(boundary));

        let wire = request.body_string().unwrap();
        prop_assert_eq!(wire.matches(boundary).count(), 3);
        let terminator = format!("--{boundary}--");
        prop_assert!(wire.ends_with(&terminator));
    }
}
