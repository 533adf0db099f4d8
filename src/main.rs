//! Strata - AWS Lambda layer builder
//!
//! Lambda bootstrap that serves one layer build per invocation.

use lambda_runtime::{run, service_fn, LambdaEvent};
use strata::builder::LayerBuilder;
use strata::config::BuildEnvironment;
use strata::event::{BuildRequest, BuildResponse};
use strata::installer::PipInstaller;
use strata::storage::S3Store;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    // CloudWatch adds its own timestamps; JSON lines keep fields queryable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .with_target(false)
        .without_time()
        .init();

    // Build environment is required at cold start; a misconfigured
    // function fails here before serving any event.
    let env = BuildEnvironment::from_env()?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = S3Store::new(aws_sdk_s3::Client::new(&aws_config));
    let builder = LayerBuilder::new(env, Box::new(store), Box::new(PipInstaller::new()));
    let builder = &builder;

    run(service_fn(move |event: LambdaEvent<BuildRequest>| async move {
        handle(event, builder).await
    }))
    .await
}

/// Run one build and log the outcome with invocation context
async fn handle(
    event: LambdaEvent<BuildRequest>,
    builder: &LayerBuilder,
) -> Result<BuildResponse, lambda_runtime::Error> {
    let request_id = event.context.request_id.clone();
    info!(
        request_id = %request_id,
        layer_name = event.payload.layer_name.as_deref().unwrap_or("<missing>"),
        "received build request"
    );

    match builder.build(&event.payload).await {
        Ok(response) => {
            info!(request_id = %request_id, key = %response.key, "layer published");
            Ok(response)
        }
        Err(e) => {
            error!(request_id = %request_id, step = e.step(), error = %e, "layer build failed");
            Err(e.into())
        }
    }
}
