//! AWS Lambda handler for the loan and investment calculators
//!
//! Accepts a single calculation request or an array of them as JSON and returns the
//! outcome(s). Requests are tagged by their `calculator` field, e.g.
//! `{"calculator":"sip","monthly_investment":5000,"annual_return_rate_percent":12,"period_months":120}`.
//!
//! Supports Lambda Function URLs for direct HTTP access. Runner behaviour comes from
//! the `ENGINE_*` environment variables.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;

use loan_scenario_engine::{
    CalculationOutcome, CalculationRequest, CalculationRunner, EngineError,
};

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a EngineError>,
}

/// One entry of a batch response
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum BatchEntry {
    Outcome(CalculationOutcome),
    Failed {
        error: String,
        detail: EngineError,
    },
}

#[derive(Debug, Serialize)]
struct BatchResponse {
    results: Vec<BatchEntry>,
    failed: usize,
    execution_time_ms: u64,
}

fn respond(status: u16, body: String) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(body))?)
}

fn error_response(status: u16, message: &str, detail: Option<&EngineError>) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(&ErrorBody {
        error: message,
        detail,
    })?;
    respond(status, body)
}

fn json_response<T: Serialize>(body: &T) -> Result<Response<Body>, Error> {
    respond(200, serde_json::to_string(body)?)
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => return error_response(400, "Request body is required", None),
    };

    let input: Value = match serde_json::from_str(&body_str) {
        Ok(v) => v,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e), None),
    };

    let runner = CalculationRunner::from_env();

    if input.is_array() {
        let requests: Vec<CalculationRequest> = match serde_json::from_value(input) {
            Ok(r) => r,
            Err(e) => return error_response(400, &format!("Invalid request: {}", e), None),
        };

        let results: Vec<BatchEntry> = runner
            .run_batch(&requests)
            .into_iter()
            .map(|result| match result {
                Ok(outcome) => BatchEntry::Outcome(outcome),
                Err(e) => BatchEntry::Failed {
                    error: e.to_string(),
                    detail: e,
                },
            })
            .collect();
        let failed = results
            .iter()
            .filter(|r| matches!(r, BatchEntry::Failed { .. }))
            .count();

        info!("batch of {} requests, {} failed", results.len(), failed);

        return json_response(&BatchResponse {
            results,
            failed,
            execution_time_ms: start.elapsed().as_millis() as u64,
        });
    }

    let request: CalculationRequest = match serde_json::from_value(input) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid request: {}", e), None),
    };

    match runner.run(&request) {
        Ok(outcome) => json_response(&outcome),
        Err(e) => {
            warn!("{} request rejected: {}", request.name(), e);
            error_response(422, &e.to_string(), Some(&e))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
