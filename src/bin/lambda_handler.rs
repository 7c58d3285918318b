//! AWS Lambda handler serving point projections
//!
//! Routes (Lambda Function URL, GET):
//! - `/?player_name=..&opponent_team=..&projected_minutes=..&usage_adjustment=..[&player_position=..]`
//! - `/players?q=..` for name autocomplete
//!
//! Reference data is loaded once per cold start and shared by every invocation.

use std::collections::HashMap;

use anyhow::Context;
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use log::info;

use points_projection::{api::HttpReply, ProjectionEngine, ProjectionService, ReferenceData};

fn cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn json_response(reply: HttpReply) -> Result<Response<Body>, Error> {
    let response = cors(Response::builder())
        .status(reply.status)
        .header("Content-Type", "application/json")
        .body(Body::Text(reply.body))?;
    Ok(response)
}

/// First value of each query parameter
fn query_params(event: &Request) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (key, value) in event.query_string_parameters().iter() {
        params.entry(key.to_string()).or_insert_with(|| value.to_string());
    }
    params
}

/// Lambda handler function
async fn handler(service: &ProjectionService<ReferenceData>, event: Request) -> Result<Response<Body>, Error> {
    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    let params = query_params(&event);
    let path = event.uri().path().trim_end_matches('/');

    let reply = if path.ends_with("/players") {
        service.handle_search(&params)
    } else {
        service.handle_projection(&params)
    };

    json_response(reply)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let data = ReferenceData::load_default().context("loading reference data")?;
    info!("cold start: {} players loaded", data.players().len());

    let service = ProjectionService::new(data, ProjectionEngine::default());
    let service = &service;

    run(service_fn(move |event: Request| async move { handler(service, event).await })).await
}
