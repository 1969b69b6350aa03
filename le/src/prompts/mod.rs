//! Prompt Template System
//!
//! Loads and renders the `.pmt` templates that make up an itinerary request.
//!
//! Template loading chain:
//! 1. `{prompts-dir}/{name}.pmt` (configured override)
//! 2. Embedded fallback in code
//!
//! Templates use Handlebars syntax for variable substitution.

pub mod embedded;
mod loader;

pub use loader::{DurationPolicy, ItineraryPrompt, PromptBuilder, PromptLoader};
