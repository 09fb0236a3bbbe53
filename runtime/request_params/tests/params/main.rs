use std::error::Error;

use fixtures::{VENUE_CONTENT_TYPE, base64_configuration, venue_configuration};
use googletest::{
    assert_that,
    prelude::{contains_substring, eq, none, some},
};
use helpers::{SpyBody, request};
use request_params::errors::ExtractParamsError;
use request_params::request::body::BodySizeLimit;
use request_params::request::path::PathParams;
use request_params::{Configuration, IncomingRequest, ParamsExtractor};
use serde_json::{Value, json};
use ubyte::ToByteUnit;

mod fixtures;

fn extractor() -> ParamsExtractor {
    ParamsExtractor::new(Configuration::default())
}

#[test]
fn requests_without_content_type_are_not_deserialized() {
    let (body, bytes_read) = SpyBody::new(r#"{ "foo": "bar" }"#);
    let request = http::Request::builder()
        .method("POST")
        .uri("/")
        .header("Content-Length", 16)
        .body(body)
        .unwrap();
    let request = IncomingRequest::from_http(request);

    let params = extractor().get_request_parameters(&request).unwrap();

    assert_that!(params.is_empty(), eq(true));
    assert_that!(bytes_read.get(), eq(0));
}

#[test]
fn requests_with_zero_content_length_are_not_deserialized() {
    let (body, bytes_read) = SpyBody::new(r#"{ "foo": "bar" }"#);
    let request = http::Request::builder()
        .method("POST")
        .uri("/")
        .header("Content-Type", "application/json")
        .header("Content-Length", 0)
        .body(body)
        .unwrap();
    let request = IncomingRequest::from_http(request);

    let params = extractor().get_request_parameters(&request).unwrap();

    assert_that!(params.is_empty(), eq(true));
    assert_that!(bytes_read.get(), eq(0));
}

#[test]
fn unknown_content_types_without_content_yield_the_path_params() {
    let (body, bytes_read) = SpyBody::new("");
    let request = http::Request::builder()
        .method("POST")
        .uri("/venues/42")
        .header("Content-Type", "application/x-nonsense")
        .header("Content-Length", 0)
        .body(body)
        .unwrap();
    let path_params: PathParams = [("venue_id", "42")].into_iter().collect();
    let request = IncomingRequest::from_http(request).with_path_params(path_params);

    let params = extractor().get_request_parameters(&request).unwrap();

    assert_that!(&Value::from(params.clone()), eq(&json!({ "venue_id": "42" })));
    assert_that!(bytes_read.get(), eq(0));
}

#[test]
fn json_bodies_are_deserialized() {
    let request = request(
        "application/json; charset=utf-8",
        r#"{ "foo": "bar", "numbers": [0, 1, 42] }"#,
    );

    let params = extractor().get_request_parameters(&request).unwrap();

    assert_that!(
        &Value::from(params.clone()),
        eq(&json!({ "foo": "bar", "numbers": [0, 1, 42] }))
    );
}

#[test]
fn json_values_that_are_not_objects_are_wrapped() {
    let request = request("application/json", "[0, 1, 42]");

    let params = extractor().get_request_parameters(&request).unwrap();

    assert_that!(
        &Value::from(params.clone()),
        eq(&json!({ "_json": [0, 1, 42] }))
    );
}

#[test]
fn content_types_without_a_deserializer_yield_no_body_params() {
    let (body, bytes_read) = SpyBody::new("<p>Hello</p>");
    let request = http::Request::builder()
        .method("POST")
        .uri("/")
        .header("Content-Type", "text/html")
        .header("Content-Length", 12)
        .body(body)
        .unwrap();
    let request = IncomingRequest::from_http(request);

    let params = extractor().get_request_parameters(&request).unwrap();

    assert_that!(params.is_empty(), eq(true));
    assert_that!(bytes_read.get(), eq(0));
}

#[test]
fn unknown_content_types_are_rejected() {
    let request = request("application/x-nonsense", "whatever");

    let err = extractor().get_request_parameters(&request).unwrap_err();

    let ExtractParamsError::ContentTypeNotRecognised(inner) = &err else {
        panic!("Expected a `ContentTypeNotRecognised` error, got {err:?}");
    };
    assert_that!(inner.content_type.as_str(), eq("application/x-nonsense"));
    assert_that!(err.status_code(), eq(http::StatusCode::UNSUPPORTED_MEDIA_TYPE));
    insta::assert_snapshot!(err.into_response().body(), @"The Content-Type: application/x-nonsense is not recognised or supported");
}

#[test]
fn malformed_json_is_rejected() {
    let request = request("application/json", r#"{ "foo": "#);

    let err = extractor().get_request_parameters(&request).unwrap_err();

    assert!(matches!(err, ExtractParamsError::ContentFormat(_)));
    assert_that!(err.status_code(), eq(http::StatusCode::BAD_REQUEST));
    let message = err.to_string();
    assert_that!(message.as_str(), contains_substring("Body is not valid JSON: "));
    assert_that!(message.as_str(), contains_substring("EOF while parsing a value"));
    assert_that!(err.source().is_some(), eq(true));
}

#[test]
fn retrying_a_failed_extraction_reports_the_same_error() {
    let (body, bytes_read) = SpyBody::new(r#"{ "foo": "#);
    let request = http::Request::builder()
        .method("POST")
        .uri("/")
        .header("Content-Type", "application/json")
        .header("Content-Length", 9)
        .body(body)
        .unwrap();
    let request = IncomingRequest::from_http(request);
    let extractor = extractor();

    let first = extractor.get_request_parameters(&request).unwrap_err();
    let second = extractor.get_request_parameters(&request).unwrap_err();

    assert!(matches!(second, ExtractParamsError::ContentFormat(_)));
    assert_that!(second.to_string(), eq(&first.to_string()));
    assert_that!(bytes_read.get(), eq(9));
    assert_that!(request.cached_params(), none());
}

#[test]
fn parameters_are_computed_once() {
    let (body, bytes_read) = SpyBody::new(r#"{ "foo": "bar" }"#);
    let request = http::Request::builder()
        .method("POST")
        .uri("/")
        .header("Content-Type", "application/json")
        .header("Content-Length", 16)
        .body(body)
        .unwrap();
    let request = IncomingRequest::from_http(request);
    let extractor = extractor();

    assert_that!(request.cached_params(), none());
    let first = extractor.get_request_parameters(&request).unwrap().clone();
    assert_that!(bytes_read.get(), eq(16));

    // The body has been consumed, but the cached value is returned.
    let second = extractor.get_request_parameters(&request).unwrap();
    assert_that!(&first, eq(second));
    assert_that!(bytes_read.get(), eq(16));
    assert_that!(request.cached_params(), some(eq(&first)));
}

#[test]
fn path_params_override_body_fields() {
    let path_params: PathParams = [("id", "42")].into_iter().collect();
    let request = request("application/json", r#"{ "id": 1, "name": "bar" }"#)
        .with_path_params(path_params);

    let params = extractor().get_request_parameters(&request).unwrap();

    assert_that!(
        &Value::from(params.clone()),
        eq(&json!({ "id": "42", "name": "bar" }))
    );
}

#[test]
fn path_params_are_available_without_a_body() {
    let mut router = matchit::Router::new();
    router.insert("/venues/{venue_id}", ()).unwrap();
    let matched = router.at("/venues/the%20corner").unwrap();
    let path_params = PathParams::from_matchit(&matched.params).unwrap();

    let request = IncomingRequest::from_http(
        http::Request::builder()
            .method("GET")
            .uri("/venues/the%20corner")
            .body("")
            .unwrap(),
    )
    .with_path_params(path_params);

    let params = extractor().get_request_parameters(&request).unwrap();
    assert_that!(&Value::from(params.clone()), eq(&json!({ "venue_id": "the corner" })));
}

#[test]
fn params_can_be_converted_into_a_typed_struct() {
    #[derive(serde::Deserialize)]
    struct Filter {
        name: String,
        numbers: Vec<u32>,
    }

    let request = request("application/json", r#"{ "name": "bar", "numbers": [0, 1, 42] }"#);
    let params = extractor().get_request_parameters(&request).unwrap();

    let filter: Filter = params.to_typed().unwrap();
    assert_that!(filter.name.as_str(), eq("bar"));
    assert_that!(&filter.numbers, eq(&vec![0, 1, 42]));
}

#[test]
fn venues_are_validated() {
    let extractor = ParamsExtractor::new(venue_configuration());
    let request = request(
        VENUE_CONTENT_TYPE,
        r#"{ "name": "bar", "_links": { "self": { "href": "https://example.org/venus/1" } } }"#,
    );

    let err = extractor.get_request_parameters(&request).unwrap_err();

    assert!(matches!(err, ExtractParamsError::ContentDoesNotMatchContentType(_)));
    assert_that!(err.status_code(), eq(http::StatusCode::UNPROCESSABLE_ENTITY));
    insta::assert_snapshot!(err, @"`location` is missing or not an object");
    assert_that!(request.cached_params(), none());
}

#[test]
fn valid_venues_are_returned_as_is() {
    let extractor = ParamsExtractor::new(venue_configuration());
    let body = r#"{ "name": "bar", "location": { "latitude": 0.0, "longitude": 0.0 }, "_links": { "self": { "href": "https://example.org/venus/1" } } }"#;
    let request = request(VENUE_CONTENT_TYPE, body);

    let params = extractor.get_request_parameters(&request).unwrap();

    let expected: Value = serde_json::from_str(body).unwrap();
    assert_that!(&Value::from(params.clone()), eq(&expected));
}

#[test]
fn custom_deserializers_are_used() {
    let extractor = ParamsExtractor::new(base64_configuration());
    let request = request("text/x-base64", "VGhpcyBpcyBzb21lIGN1c3RvbSB0ZXh0");

    let params = extractor.get_request_parameters(&request).unwrap();

    assert_that!(
        &Value::from(params.clone()),
        eq(&json!({ "text": "This is some custom text" }))
    );
}

#[test]
fn custom_deserializer_format_errors_are_reported() {
    let extractor = ParamsExtractor::new(base64_configuration());
    let request = request("text/x-base64", "!!! not base64 !!!");

    let err = extractor.get_request_parameters(&request).unwrap_err();

    assert_that!(err.status_code(), eq(http::StatusCode::BAD_REQUEST));
    assert_that!(err.to_string().as_str(), contains_substring("Body is not valid BASE64: "));
}

#[test]
fn oversized_bodies_are_rejected() {
    let extractor = ParamsExtractor::new(Configuration::configure(|c| {
        c.body_size_limit(BodySizeLimit::Enabled {
            max_size: 8.bytes(),
        });
    }));
    let request = request("application/json", r#"{ "foo": "bar" }"#);

    let err = extractor.get_request_parameters(&request).unwrap_err();

    assert_that!(err.status_code(), eq(http::StatusCode::PAYLOAD_TOO_LARGE));
    assert_that!(err.into_response().body().is_empty(), eq(false));
}
