pub mod credentials;
pub mod llm;
pub mod logging;
pub mod prompt;
pub mod request;
