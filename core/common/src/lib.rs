//! Word Horizon 共通ライブラリ
//!
//! `horizon` コマンドが使うエラー型・Outbound ポート・標準アダプタ・LLM プロバイダを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// LLM プロバイダ（Gemini / OpenAI 互換）
pub mod llm;

/// Ports & Adapters のポート定義
pub mod ports;

/// 標準アダプタ
pub mod adapter;
