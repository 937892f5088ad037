// ── Derived service addresses ──
//
// The console reports raw links; clients need a gRPC URL and a REST base.
// Both are computed by plain string templating.

use serde::Serialize;

use crate::error::CoreError;

/// Connection strings handed to job workers and the template step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAddresses {
    /// `grpcs://<zeebe link>:443`
    pub grpc: String,
    /// Operate link with every `operate` replaced by `zeebe`.
    pub rest: String,
}

pub fn grpc_address(zeebe_link: &str) -> String {
    format!("grpcs://{zeebe_link}:443")
}

pub fn rest_address(operate_link: &str) -> String {
    operate_link.replace("operate", "zeebe")
}

/// Derive both addresses. Empty links are fatal.
pub fn derive_addresses(zeebe_link: &str, operate_link: &str) -> Result<ResolvedAddresses, CoreError> {
    if zeebe_link.is_empty() {
        return Err(CoreError::MissingLink { link: "zeebe" });
    }
    if operate_link.is_empty() {
        return Err(CoreError::MissingLink { link: "operate" });
    }

    Ok(ResolvedAddresses {
        grpc: grpc_address(zeebe_link),
        rest: rest_address(operate_link),
    })
}
