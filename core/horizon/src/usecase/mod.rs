//! ユースケース（ports の trait にのみ依存するロジック）

pub mod analysis_client;
pub mod profiles;
pub mod prompt;
pub mod schema;
pub mod session;
pub mod state_machine;

pub use analysis_client::{AnalysisClient, TransientSignature};
pub use profiles::ProfilesUseCase;
pub use session::{RoundToken, SessionStore};
pub use state_machine::{Action, Effect, ViewStateMachine};
