//! Connectivity and identity diagnostics.
//!
//! Used by the identity probe Lambda to confirm which IAM principal the
//! function runs as and that API Gateway forwards bodies as expected.

use aws_sdk_sts::error::DisplayErrorContext;
use aws_sdk_sts::Client as StsClient;
use serde::Serialize;
use serde_json::Value;

use crate::http::HttpResponse;
use crate::models::ProbeBody;
use crate::{Error, Result};

pub const PROBE_MESSAGE: &str = "Lambda reached successfully";

/// Principal the function is executing as.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallerIdentity {
    pub account: Option<String>,
    pub arn: Option<String>,
    pub user_id: Option<String>,
}

/// Look up the caller identity through STS.
pub async fn caller_identity(client: &StsClient) -> Result<CallerIdentity> {
    let output = client
        .get_caller_identity()
        .send()
        .await
        .map_err(|e| {
            Error::Aws(format!(
                "Failed to get caller identity: {}",
                DisplayErrorContext(&e)
            ))
        })?;

    Ok(CallerIdentity {
        account: output.account().map(String::from),
        arn: output.arn().map(String::from),
        user_id: output.user_id().map(String::from),
    })
}

/// Echo the inbound `body` back to the caller.
pub fn probe_response(event: &Value) -> Result<HttpResponse> {
    HttpResponse::json(
        200,
        &ProbeBody {
            message: PROBE_MESSAGE.to_string(),
            input: event.get("body").cloned().unwrap_or(Value::Null),
        },
    )
}
