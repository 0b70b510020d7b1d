mod client;
mod types;

pub use client::{TextGenerator, WatsonxClient};
pub use types::*;
