//! Ports & Adapters のポート定義

pub mod inbound;
pub mod outbound;
