use lambda_http::{Body, Request, Response};
use serde_json::{json, Value};


pub fn contact_request(body: &str) -> Request {
    lambda_http::http::Request::builder()
        .method("POST")
        .uri("/contact")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn valid_body() -> Value {
    json!({
        "to": "owner@example.com",
        "from": "visitor@example.com",
        "subject": "Hello",
        "message": "Nice site"
    })
}

pub fn body_text(response: &Response<Body>) -> String {
    String::from_utf8(response.body().to_vec()).unwrap()
}
