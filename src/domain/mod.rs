//! Provider-agnostic domain types.

mod analysis;
mod id;
mod key;
mod market;
mod model;
mod provider;
mod reply;
mod request;
mod side;
mod usage;

pub use analysis::{AnalysisResult, Correction, MarketAnalysis, RawRecommendation, SkippedMarket};
pub use id::MarketId;
pub use key::KeyCheck;
pub use market::{ClosedTrade, Market, OpenPosition, TradeHistory};
pub use model::{FreeTier, ModelDescriptor};
pub use provider::{ProviderId, WireFormat};
pub use reply::NormalizedReply;
pub use request::AnalysisRequest;
pub use side::Side;
pub use usage::{Usage, UsageLedger};
