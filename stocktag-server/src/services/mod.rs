//! Application Services

pub mod suggest;

pub use suggest::{StubSuggestions, SuggestionProvider};
