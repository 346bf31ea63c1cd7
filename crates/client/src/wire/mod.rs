//! Wire message schema for the Lattice services.
//!
//! One module per service, holding the `<Verb><Noun>Request`/`Response`
//! pairs, the enum mapper pairs, and the record converters between wire
//! structs and domain models. Decoding is lenient: every field has a
//! default, unknown enum strings map to the domain sentinel, and absent
//! timestamps stay absent, so a schema-newer server never crashes an old
//! client.

pub(crate) mod datasets;
pub(crate) mod deploy;
pub(crate) mod eval;
pub(crate) mod observe;
pub(crate) mod prompt;
pub(crate) mod runtime;

use serde::Deserialize;

/// Error body carried on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
