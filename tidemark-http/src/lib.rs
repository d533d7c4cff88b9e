//! tidemark-http
//!
//! Public connectors that implement `FeedConnector` over plain HTTP:
//! - [`LlamaYieldsConnector`]: daily yield and TVL charts keyed by pool id.
//! - [`CoinGeckoConnector`]: daily USD price charts keyed by coin id.
//! - [`SubgraphConnector`]: DEX pool day data from a GraphQL subgraph.
//!
//! Every connector takes a configurable base URL so tests and self-hosted
//! mirrors can stand in for the public endpoints. Payloads are returned as raw
//! JSON arrays; shaping them into records is the orchestrator's job.
#![warn(missing_docs)]

mod client;
/// CoinGecko market chart connector.
pub mod coingecko;
/// DefiLlama yields chart connector.
pub mod llama;
/// Uniswap-style subgraph connector.
pub mod subgraph;

pub use coingecko::CoinGeckoConnector;
pub use llama::LlamaYieldsConnector;
pub use subgraph::SubgraphConnector;
