use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use routewise::Config;
use routewise::geo::{GeocodeClient, IpLocateClient, RoutingClient};
use routewise::geo::types::Coordinates;

#[tokio::test]
async fn geocode_resolves_first_hit() {
    let server = MockServer::start().await;

    let body = json!([
        {
            "lat": "19.0546",
            "lon": "72.8406",
            "display_name": "Bandra West, Mumbai, Maharashtra, India"
        },
        {
            "lat": "19.0600",
            "lon": "72.8300",
            "display_name": "Bandra East, Mumbai, Maharashtra, India"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "bandra"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeocodeClient::new(&Config::default()).with_base_url(server.uri());
    let place = client
        .geocode("bandra")
        .await
        .expect("request succeeds")
        .expect("query matches a place");

    assert!((place.coords.lat - 19.0546).abs() < 1e-9);
    assert!((place.coords.lon - 72.8406).abs() < 1e-9);
    assert_eq!(
        place.display_name,
        "Bandra West, Mumbai, Maharashtra, India"
    );
    server.verify().await;
}

#[tokio::test]
async fn geocode_empty_result_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = GeocodeClient::new(&Config::default()).with_base_url(server.uri());
    let place = client.geocode("xyzzy nowhere").await.expect("request succeeds");
    assert!(place.is_none());
}

#[tokio::test]
async fn geocode_unparseable_coordinates_are_an_error() {
    let server = MockServer::start().await;

    let body = json!([
        {"lat": "not-a-number", "lon": "72.84", "display_name": "Broken"}
    ]);
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = GeocodeClient::new(&Config::default()).with_base_url(server.uri());
    assert!(client.geocode("broken").await.is_err());
}

#[tokio::test]
async fn routing_flips_geojson_order_and_marks_primary() {
    let server = MockServer::start().await;

    let body = json!({
        "code": "Ok",
        "routes": [
            {
                "geometry": {"coordinates": [[72.8777, 19.0760], [72.8406, 19.0546]]},
                "distance": 12500.0,
                "duration": 1800.0
            },
            {
                "geometry": {"coordinates": [[72.8777, 19.0760], [72.8500, 19.0400]]},
                "distance": 14000.0,
                "duration": 2100.0
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path(
            "/route/v1/driving/72.8777,19.076;72.8406,19.0546",
        ))
        .and(query_param("overview", "full"))
        .and(query_param("geometries", "geojson"))
        .and(query_param("alternatives", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = RoutingClient::new(&Config::default()).with_base_url(server.uri());
    let routes = client
        .fetch_routes(
            Coordinates::new(19.0760, 72.8777),
            Coordinates::new(19.0546, 72.8406),
            true,
        )
        .await
        .expect("request succeeds")
        .expect("osrm found routes");

    assert_eq!(routes.len(), 2);
    let primary = routes.primary();
    assert!(primary.is_primary);
    // [lon, lat] wire order becomes lat/lon in the domain type.
    assert!((primary.path[0].lat - 19.0760).abs() < 1e-9);
    assert!((primary.path[0].lon - 72.8777).abs() < 1e-9);
    assert!((primary.distance_km - 12.5).abs() < 1e-9);
    assert!((primary.duration_min - 30.0).abs() < 1e-9);
    assert_eq!(routes.alternates().len(), 1);
    assert!(!routes.alternates()[0].is_primary);
    server.verify().await;
}

#[tokio::test]
async fn routing_no_route_code_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": "NoRoute", "routes": []})),
        )
        .mount(&server)
        .await;

    let client = RoutingClient::new(&Config::default()).with_base_url(server.uri());
    let routes = client
        .fetch_routes(
            Coordinates::new(19.0, 72.8),
            Coordinates::new(19.1, 72.9),
            false,
        )
        .await
        .expect("request succeeds");
    assert!(routes.is_none());
}

#[tokio::test]
async fn ip_locate_success_builds_display_name_without_coordinates() {
    let server = MockServer::start().await;

    let body = json!({
        "status": "success",
        "lat": 19.0760,
        "lon": 72.8777,
        "city": "Mumbai",
        "regionName": "Maharashtra",
        "country": "India"
    });
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = IpLocateClient::new(&Config::default()).with_url(server.uri());
    let location = client
        .locate()
        .await
        .expect("request succeeds")
        .expect("lookup succeeded");

    let name = location.display_name();
    assert_eq!(name, "Mumbai, Maharashtra, India");
    assert!(!name.contains("19.0"));
}

#[tokio::test]
async fn ip_locate_failure_falls_back_to_configured_default() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "fail"})))
        .mount(&server)
        .await;

    let config = Config::default();
    let client = IpLocateClient::new(&config).with_url(server.uri());
    let place = client.locate_or_default().await;

    assert_eq!(place.display_name, config.default_location.name);
    assert!((place.coords.lat - config.default_location.lat).abs() < 1e-9);
}

#[tokio::test]
async fn ip_locate_server_error_also_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = Config::default();
    let client = IpLocateClient::new(&config).with_url(server.uri());
    let place = client.locate_or_default().await;
    assert_eq!(place.display_name, config.default_location.name);
}
