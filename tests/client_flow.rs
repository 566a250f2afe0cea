//! End-to-end client flow against a mock PAAPI server

use amz_paapi::paapi::endpoints::EndpointConfigRepository;
use amz_paapi::paapi::{
    ClientOptions, Credentials, Endpoint, HttpTransport, PaapiClient, PaapiResponse,
    TransportOptions,
};
use amz_paapi::PaapiError;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn make_client(server: &MockServer, strict: bool) -> PaapiClient {
    let mut options = ClientOptions::new(Endpoint::Uk, "nager-21");
    options.strict_json_mapping = strict;

    let endpoint = EndpointConfigRepository::new().get(Endpoint::Uk).unwrap().clone();
    let transport = HttpTransport::with_base_url(
        Credentials::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY"),
        &endpoint,
        &TransportOptions::default(),
        Some(server.uri()),
    )
    .unwrap();

    PaapiClient::with_transport(transport, &options).unwrap()
}

#[tokio::test]
async fn test_search_items_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/paapi5/searchitems"))
        .and(header("x-amz-target", "com.amazon.paapi5.v1.ProductAdvertisingAPIv1.SearchItems"))
        .and(header("content-type", "application/json; charset=utf-8"))
        .and(header_exists("authorization"))
        .and(body_partial_json(json!({
            "Keywords": "lego",
            "PartnerTag": "nager-21",
            "PartnerType": "Associates",
            "Marketplace": "www.amazon.co.uk"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "SearchResult": {
                "TotalResultCount": 1,
                "Items": [{
                    "ASIN": "B01N9KSITZ",
                    "DetailPageURL": "https://www.amazon.co.uk/dp/B01N9KSITZ?tag=nager-21",
                    "ItemInfo": {"Title": {"DisplayValue": "LEGO Millennium Falcon"}},
                    "Offers": {"Listings": [{
                        "Price": {"Amount": 149.99, "Currency": "GBP", "DisplayAmount": "£149.99"},
                        "DeliveryInfo": {"IsPrimeEligible": true}
                    }]}
                }]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = make_client(&server, true);
    let response = client.search_items_by_keyword("lego").await.unwrap();

    assert!(response.is_successful());
    assert!(response.error_message().is_none());
    let item = &response.items()[0];
    assert_eq!(item.title(), Some("LEGO Millennium Falcon"));
    assert_eq!(item.price().unwrap().currency, "GBP");
    assert!(item.is_prime());
}

#[tokio::test]
async fn test_authorization_uses_endpoint_region() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/paapi5/getitems"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ItemsResult": {"Items": []}}"#))
        .mount(&server)
        .await;

    let client = make_client(&server, false);
    client.get_items_by_ids(&["B00005N5PF"]).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let auth = requests[0].headers.get("authorization").unwrap().to_str().unwrap();
    assert!(auth.contains("/eu-west-1/ProductAdvertisingAPI/aws4_request"));
    assert!(auth.contains("SignedHeaders=content-encoding;content-type;host;x-amz-date;x-amz-target"));
}

#[tokio::test]
async fn test_payload_errors_are_data_not_failures() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/paapi5/getitems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Errors": [
                {"Code": "InvalidParameterValue", "Message": "ItemId B0BAD is invalid."},
                {"Code": "ItemNotAccessible", "Message": "ItemId B0HIDDEN is not accessible."}
            ]
        })))
        .mount(&server)
        .await;

    let client = make_client(&server, true);
    let response = client.get_items_by_ids(&["B0BAD", "B0HIDDEN"]).await.unwrap();

    assert!(!response.is_successful());
    assert_eq!(
        response.error_message().as_deref(),
        Some("ItemId B0BAD is invalid.\nItemId B0HIDDEN is not accessible.")
    );
}

#[tokio::test]
async fn test_http_failure_surfaces_status_and_body() {
    let server = MockServer::start().await;
    let body = r#"{"__type":"com.amazon.paapi5#TooManyRequestsException","Errors":[{"Code":"TooManyRequests","Message":"Rate exceeded"}]}"#;

    Mock::given(method("POST"))
        .and(path("/paapi5/getvariations"))
        .respond_with(ResponseTemplate::new(429).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = make_client(&server, false);
    let err = client.get_variations_by_asin("B07H65KP63").await.unwrap_err();

    match &err {
        PaapiError::Api { status, body: returned } => {
            assert_eq!(*status, 429);
            assert_eq!(returned, body);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("API request failure 429 "));
}

#[tokio::test]
async fn test_strict_mapping_rejects_unknown_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "VariationsResult": {"Items": [], "SomethingNew": {"A": 1}}
        })))
        .mount(&server)
        .await;

    let strict = make_client(&server, true);
    let err = strict.get_variations_by_asin("B07H65KP63").await.unwrap_err();
    assert!(matches!(err, PaapiError::UnmappedField { ref path } if path == "VariationsResult.SomethingNew"));

    let lenient = make_client(&server, false);
    let response = lenient.get_variations_by_asin("B07H65KP63").await.unwrap();
    assert!(response.is_successful());
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/paapi5/searchitems"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"SearchResult": {"Items": []}}"#))
        .expect(3)
        .mount(&server)
        .await;

    let client = std::sync::Arc::new(make_client(&server, false));
    let handles: Vec<_> = ["a", "b", "c"]
        .into_iter()
        .map(|keyword| {
            let client = client.clone();
            tokio::spawn(async move { client.search_items_by_keyword(keyword).await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap().is_successful());
    }
}
