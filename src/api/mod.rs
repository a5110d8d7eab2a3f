//! Endpoint groups, one per section of the vendor's API reference.
//!
//! Each group borrows the client and maps typed arguments onto one vendor
//! method. Filters documented as optional are omitted when empty (or zero).

pub mod accounts;
pub mod cdr;
pub mod clients;
pub mod dids;
pub mod general;

pub use accounts::AccountsApi;
pub use cdr::CdrApi;
pub use clients::ClientsApi;
pub use dids::DidsApi;
pub use general::GeneralApi;

use serde::de::IgnoredAny;

use crate::encode::Form;
use crate::{Result, VoipMsClient, VoipMsError};

/// Reply of calls that carry nothing beyond the status.
pub(crate) type Ack = IgnoredAny;

/// GET a method whose only parameter is one identifier.
pub(crate) fn simple_call(client: &VoipMsClient, method: &str, key: &str, value: &str) -> Result<()> {
    let mut params = Form::new();
    params.text(key, value);
    client.get::<Ack>(method, &params)?;
    Ok(())
}

pub(crate) fn require(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(VoipMsError::Validation(message.to_string()));
    }
    Ok(())
}
