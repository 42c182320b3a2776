//! AWS Lambda handler for the pricing endpoints
//!
//! Routes API Gateway proxy requests:
//! - `POST /pricing/calculate` - validated quote
//! - `POST /pricing/debug` - calculation trace (no range validation)
//! - `POST /pricing/checkout` - server-side recomputation and charge amount
//!
//! Configuration is read from the directory named by `CONFIG_DIR` on every request.

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::encodings::Body;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use premium_quote::config::{ConfigSource, JsonConfigStore};
use premium_quote::{CheckoutRequest, PricingInput, QuoteError, QuoteRequest, QuoteService};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

const DEFAULT_CONFIG_DIR: &str = "config";

/// Status code and JSON body for a routed request
type Reply = (i64, String);

fn error_reply(status: i64, message: &str) -> Reply {
    (status, json!({ "error": message }).to_string())
}

fn ok_reply<T: Serialize>(body: &T) -> Reply {
    match serde_json::to_string(body) {
        Ok(body) => (200, body),
        Err(e) => error_reply(500, &format!("Failed to serialize response: {}", e)),
    }
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T, Reply> {
    serde_json::from_str(body).map_err(|e| error_reply(400, &format!("Invalid JSON: {}", e)))
}

fn quote_error_reply(err: &QuoteError) -> Reply {
    let status = match err {
        QuoteError::Validation(_) | QuoteError::Billing(_) => 400,
        QuoteError::Config(_) => 503,
    };
    error_reply(status, &err.to_string())
}

/// Dispatch one request body to the pricing operation behind `path`
fn route<S: ConfigSource>(service: &QuoteService<S>, path: &str, body: &str) -> Reply {
    match path.trim_end_matches('/') {
        "/pricing/calculate" => {
            let request: QuoteRequest = match parse(body) {
                Ok(r) => r,
                Err(reply) => return reply,
            };
            match service.quote_request(&request) {
                Ok(quote) => ok_reply(&quote),
                Err(e) => quote_error_reply(&e),
            }
        }
        "/pricing/debug" => {
            let request: QuoteRequest = match parse(body) {
                Ok(r) => r,
                Err(reply) => return reply,
            };
            ok_reply(&service.debug(&PricingInput::from(&request)))
        }
        "/pricing/checkout" => {
            let request: CheckoutRequest = match parse(body) {
                Ok(r) => r,
                Err(reply) => return reply,
            };
            match service.checkout(&request) {
                Ok(amount) => ok_reply(&amount),
                Err(e) => quote_error_reply(&e),
            }
        }
        _ => error_reply(404, &format!("No route for {}", path)),
    }
}

fn response(status: i64, body: Option<String>) -> Result<ApiGatewayProxyResponse, Error> {
    let mut response = ApiGatewayProxyResponse::default();
    response.status_code = status;
    response.headers.insert("content-type", "application/json".parse()?);
    response.headers.insert("access-control-allow-origin", "*".parse()?);
    response.headers.insert("access-control-allow-methods", "POST, OPTIONS".parse()?);
    response.headers.insert("access-control-allow-headers", "Content-Type".parse()?);
    response.body = body.map(Body::Text);
    Ok(response)
}

/// Lambda handler function
async fn handler(event: LambdaEvent<ApiGatewayProxyRequest>) -> Result<ApiGatewayProxyResponse, Error> {
    let request = event.payload;

    // CORS preflight
    match request.http_method.as_str() {
        "OPTIONS" => return response(200, None),
        "POST" => {}
        _ => {
            let (status, body) = error_reply(405, "Method not allowed");
            return response(status, Some(body));
        }
    }

    let path = request.path.as_deref().unwrap_or("/");
    let body = request.body.as_deref().unwrap_or("{}");

    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let service = QuoteService::new(JsonConfigStore::new(config_dir));

    let start = std::time::Instant::now();
    let (status, body) = route(&service, path, body);
    log::info!("{} -> {} in {:?}", path, status, start.elapsed());

    response(status, Some(body))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
