use serde::Deserialize;

// Mutation request bodies reuse the kernel's Sent* payloads verbatim:
// the ledger file and the API share one schema, PascalCase field names
// included.
pub use mercury_ledger::event::{SentBurn, SentMint, SentTransfer};

#[derive(Deserialize)]
pub struct HistoryParams {
    pub limit: Option<usize>,
}
