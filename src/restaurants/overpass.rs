use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::{RestaurantError, RestaurantProvider, Result};
use crate::config::OverpassConfig;
use crate::models::RestaurantRecord;

/// Overpass API client
pub struct OverpassClient {
    client: Client,
    endpoint: String,
    query_timeout_seconds: u32,
}

/// Overpass API response
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// A node or way returned by the query
#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    #[serde(default)]
    pub tags: HashMap<String, String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Present on ways queried with `out center`
    pub center: Option<OverpassCenter>,
}

#[derive(Debug, Deserialize)]
pub struct OverpassCenter {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl OverpassClient {
    /// Create a new client
    pub fn new(config: &OverpassConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            query_timeout_seconds: config.query_timeout_seconds,
        })
    }

    /// Overpass QL query for all restaurants inside the named area
    #[must_use]
    pub fn build_query(&self, city: &str) -> String {
        format!(
            r#"[out:json][timeout:{timeout}];
area["name"="{city}"]->.searchArea;
(
  node["amenity"="restaurant"](area.searchArea);
  way["amenity"="restaurant"](area.searchArea);
);
out center;
"#,
            timeout = self.query_timeout_seconds,
            city = escape_ql_string(city),
        )
    }
}

#[async_trait]
impl RestaurantProvider for OverpassClient {
    #[instrument(skip(self))]
    async fn fetch_restaurants(&self, city: &str) -> Result<Vec<RestaurantRecord>> {
        info!("Querying Overpass for restaurants in {}", city);

        let query = self.build_query(city);
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .map_err(|e| RestaurantError::Network(format!("Overpass request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Overpass returned {}", status);
            return Err(RestaurantError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let records = parse_response(&body)?;

        info!("Found {} usable restaurants in {}", records.len(), city);
        Ok(records)
    }
}

/// Parse an Overpass JSON body into usable restaurant records
pub fn parse_response(body: &str) -> Result<Vec<RestaurantRecord>> {
    let response: OverpassResponse = serde_json::from_str(body)
        .map_err(|e| RestaurantError::Parse(format!("Failed to parse Overpass response: {e}")))?;

    let total = response.elements.len();
    let records: Vec<RestaurantRecord> = response
        .elements
        .into_iter()
        .filter_map(OverpassElement::into_record)
        .collect();

    debug!("Dropped {} elements without a name or coordinates", total - records.len());
    Ok(records)
}

impl OverpassElement {
    /// Convert to a record, or `None` when name or coordinates are missing
    pub fn into_record(self) -> Option<RestaurantRecord> {
        let center = self.center.as_ref();
        let lat = self.lat.or_else(|| center.and_then(|c| c.lat))?;
        let lon = self.lon.or_else(|| center.and_then(|c| c.lon))?;

        let mut tags = self.tags;
        let name = tags.remove("name").unwrap_or_default();
        let cuisine = tags.remove("cuisine").unwrap_or_default();

        let record = RestaurantRecord::new(name, cuisine, lat, lon);
        record.is_usable().then_some(record)
    }
}

fn escape_ql_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapMuseConfig;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_build_query() {
        let client = OverpassClient::new(&MapMuseConfig::default().overpass).unwrap();
        let query = client.build_query("Pune");

        assert!(query.starts_with("[out:json][timeout:25];"));
        assert!(query.contains(r#"area["name"="Pune"]->.searchArea;"#));
        assert!(query.contains(r#"node["amenity"="restaurant"](area.searchArea);"#));
        assert!(query.contains(r#"way["amenity"="restaurant"](area.searchArea);"#));
        assert!(query.trim_end().ends_with("out center;"));
    }

    #[test]
    fn test_build_query_escapes_city() {
        let client = OverpassClient::new(&MapMuseConfig::default().overpass).unwrap();
        let query = client.build_query(r#"Foo"]; out; ["#);
        assert!(query.contains(r#"area["name"="Foo\"]; out; ["]"#));
    }

    #[test]
    fn test_parse_response_node_and_way() {
        let body = r#"{
            "version": 0.6,
            "elements": [
                {"type": "node", "id": 1, "lat": 12.9, "lon": 77.6,
                 "tags": {"name": "Spice Hub", "cuisine": "indian", "amenity": "restaurant"}},
                {"type": "way", "id": 2, "center": {"lat": 12.95, "lon": 77.65},
                 "tags": {"name": "Dosa Point"}}
            ]
        }"#;

        let records = parse_response(body).unwrap();
        assert_eq!(
            records,
            vec![
                RestaurantRecord::new("Spice Hub", "indian", 12.9, 77.6),
                RestaurantRecord::new("Dosa Point", "", 12.95, 77.65),
            ]
        );
    }

    #[test]
    fn test_parse_response_drops_unusable_elements() {
        let body = r#"{"elements": [
            {"lat": 12.9, "lon": 77.6, "tags": {"cuisine": "indian"}},
            {"lat": 12.9, "tags": {"name": "No Longitude"}},
            {"tags": {"name": "Nowhere"}},
            {"lat": 12.9, "lon": 77.6, "tags": {"name": ""}},
            {"lat": 12.9, "lon": 77.6},
            {"lat": 12.9, "lon": 77.6, "tags": {"name": "Kept"}}
        ]}"#;

        let records = parse_response(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Kept");
    }

    #[test]
    fn test_parse_response_mixed_coordinate_sources() {
        let body = r#"{"elements": [
            {"lat": 1.0, "center": {"lat": 9.0, "lon": 2.0}, "tags": {"name": "Mixed"}}
        ]}"#;

        let records = parse_response(body).unwrap();
        assert_eq!(records[0].lat, 1.0);
        assert_eq!(records[0].lon, 2.0);
    }

    #[test]
    fn test_parse_response_without_elements() {
        assert!(parse_response("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_response_invalid_json() {
        let err = parse_response("<html>busy</html>").unwrap_err();
        assert!(matches!(err, RestaurantError::Parse(_)));
    }

    fn client_for(server: &MockServer) -> OverpassClient {
        let mut config = MapMuseConfig::default().overpass;
        config.endpoint = format!("{}/api/interpreter", server.uri());
        OverpassClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_posts_form_encoded_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/interpreter"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("data=%5Bout%3Ajson%5D"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"elements": [{"type": "way", "id": 7, "center": {"lat": 1.0, "lon": 2.0},
                    "tags": {"name": "Spice Hub", "cuisine": "indian"}}]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let records = client_for(&server).fetch_restaurants("Pune").await.unwrap();
        assert_eq!(
            records,
            vec![RestaurantRecord::new("Spice Hub", "indian", 1.0, 2.0)]
        );
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_restaurants("Pune").await.unwrap_err();
        match err {
            RestaurantError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "busy");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_unparseable_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_restaurants("Pune").await.unwrap_err();
        assert!(matches!(err, RestaurantError::Parse(_)));
    }
}
