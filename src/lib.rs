pub mod download;
pub mod fetch;
pub mod output;
pub mod prompt;
pub mod request;
pub mod transform;
