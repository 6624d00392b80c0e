pub mod gemini;
pub mod http_client;
pub mod mock;
pub mod traits;

pub use gemini::GeminiProvider;
pub use http_client::build_collaborator_client;
pub use mock::{FailingProvider, ScriptedProvider};
pub use traits::Provider;
