//! Prompt Loader
//!
//! Loads prompt templates from an override directory or falls back to the
//! embedded defaults, then renders them into an itinerary request.

use std::path::PathBuf;

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;
use crate::domain::{ItineraryRequest, TripDuration};

const SYSTEM_TEMPLATE: &str = "itinerary-system";
const USER_TEMPLATE: &str = "itinerary-user";

/// Item-count policy for one duration, as rendered into the system directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationPolicy {
    pub name: &'static str,
    pub hours: &'static str,
    pub min: u32,
    pub max: u32,
}

impl From<TripDuration> for DurationPolicy {
    fn from(duration: TripDuration) -> Self {
        let (min, max) = duration.item_range();
        Self {
            name: duration.as_str(),
            hours: duration.hours_label(),
            min,
            max,
        }
    }
}

#[derive(Debug, Serialize)]
struct SystemContext {
    policies: Vec<DurationPolicy>,
}

#[derive(Debug, Serialize)]
struct UserContext<'a> {
    location: &'a str,
    interests: String,
    duration: &'static str,
}

/// The two directives sent to the completion service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryPrompt {
    pub system: String,
    pub user: String,
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// Override directory (config `prompts-dir`)
    override_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a loader that checks `override_dir` before the embedded templates
    pub fn new(override_dir: Option<PathBuf>) -> Self {
        debug!(?override_dir, "PromptLoader::new: called");
        let override_dir = override_dir.filter(|dir| {
            let exists = dir.is_dir();
            if !exists {
                debug!(?dir, "PromptLoader::new: override directory missing, ignoring");
            }
            exists
        });

        let mut hbs = Handlebars::new();
        // Directives are plain text; interpolated values must appear verbatim
        hbs.register_escape_fn(handlebars::no_escape);
        hbs.set_strict_mode(true);

        Self { hbs, override_dir }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self::new(None)
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. Override: `{prompts-dir}/{name}.pmt`
    /// 2. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        if let Some(ref dir) = self.override_dir {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found in override directory");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt {}: {}", path.display(), e));
            }
            debug!(?path, "PromptLoader::load_template: not found in override directory");
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: found in embedded");
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        debug!(%template_name, "PromptLoader::render: called");
        let template = self.load_template(template_name)?;
        self.hbs
            .render_template(&template, context)
            .map(|rendered| rendered.trim().to_string())
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }
}

/// Builds the system and user directives for one request
///
/// The output depends only on the request and the loaded templates.
pub struct PromptBuilder {
    loader: PromptLoader,
}

impl PromptBuilder {
    pub fn new(loader: PromptLoader) -> Self {
        Self { loader }
    }

    /// Item-count policy for every duration, in UI order
    pub fn policies() -> Vec<DurationPolicy> {
        TripDuration::ALL.into_iter().map(DurationPolicy::from).collect()
    }

    pub fn build(&self, request: &ItineraryRequest) -> Result<ItineraryPrompt> {
        debug!(location = %request.location, duration = %request.duration, "PromptBuilder::build: called");
        let system = self.loader.render(
            SYSTEM_TEMPLATE,
            &SystemContext {
                policies: Self::policies(),
            },
        )?;

        let user = self.loader.render(
            USER_TEMPLATE,
            &UserContext {
                location: &request.location,
                interests: request.interests.join(", "),
                duration: request.duration.as_str(),
            },
        )?;

        info!(location = %request.location, duration = %request.duration, "Built itinerary prompt");
        Ok(ItineraryPrompt { system, user })
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(PromptLoader::embedded_only())
    }
}
