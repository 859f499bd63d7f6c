//! Layout generators and the plugins that bind them to element names.

use std::fmt;
use std::sync::Arc;

use agentmarkdown_core::CssBox;

use crate::layout::{LayoutContext, LayoutEngine};
use crate::node::HtmlNode;

/// Error type generators may fail with.
pub type GeneratorError = Box<dyn std::error::Error + Send + Sync>;

/// What a generator produces: a box, nothing, or an error.
pub type GeneratorResult = std::result::Result<Option<CssBox>, GeneratorError>;

/// Type alias for box transform functions
pub type BoxTransform = Arc<dyn Fn(&mut LayoutContext, CssBox) -> CssBox + Send + Sync>;

/// Builds the box for one element.
///
/// Generators recurse into the element's children through
/// [`LayoutEngine::layout_children`]. Returning `Ok(None)` means the element
/// produces no box.
pub trait LayoutGenerator: Send + Sync {
    fn generate(
        &self,
        context: &mut LayoutContext,
        engine: &LayoutEngine,
        element: &HtmlNode,
    ) -> GeneratorResult;
}

impl<F> LayoutGenerator for F
where
    F: Fn(&mut LayoutContext, &LayoutEngine, &HtmlNode) -> GeneratorResult + Send + Sync,
{
    fn generate(
        &self,
        context: &mut LayoutContext,
        engine: &LayoutEngine,
        element: &HtmlNode,
    ) -> GeneratorResult {
        self(context, engine, element)
    }
}

/// Binds a [`LayoutGenerator`] to an element name.
///
/// A plugin registered for an element replaces the built-in generator for
/// that element. The optional transform is applied to every box the
/// plugin's own generator returns.
#[derive(Clone)]
pub struct LayoutPlugin {
    element_name: String,
    generator_name: String,
    generator: Arc<dyn LayoutGenerator>,
    transform: Option<BoxTransform>,
}

impl LayoutPlugin {
    /// Create a plugin from a generator function
    pub fn new<F>(element_name: &str, layout: F) -> Self
    where
        F: Fn(&mut LayoutContext, &LayoutEngine, &HtmlNode) -> GeneratorResult
            + Send
            + Sync
            + 'static,
    {
        Self::from_generator(element_name, Arc::new(layout))
    }

    /// Create a plugin from a shared generator
    pub fn from_generator(element_name: &str, generator: Arc<dyn LayoutGenerator>) -> Self {
        let element_name = element_name.to_lowercase();
        Self {
            generator_name: element_name.clone(),
            element_name,
            generator,
            transform: None,
        }
    }

    /// Create one plugin per element, all sharing `generator`
    pub fn for_elements(
        element_names: &[&str],
        generator_name: &str,
        generator: Arc<dyn LayoutGenerator>,
    ) -> Vec<Self> {
        element_names
            .iter()
            .map(|name| Self::from_generator(name, Arc::clone(&generator)).named(generator_name))
            .collect()
    }

    /// Set the name used to identify the generator in errors and logs.
    pub fn named(mut self, generator_name: &str) -> Self {
        self.generator_name = generator_name.to_string();
        self
    }

    /// Post-process every box this plugin's generator returns.
    pub fn with_transform<T>(mut self, transform: T) -> Self
    where
        T: Fn(&mut LayoutContext, CssBox) -> CssBox + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    pub fn generator_name(&self) -> &str {
        &self.generator_name
    }

    /// Run the generator, then the transform if it produced a box.
    pub fn layout(
        &self,
        context: &mut LayoutContext,
        engine: &LayoutEngine,
        element: &HtmlNode,
    ) -> GeneratorResult {
        let generated = self.generator.generate(context, engine, element)?;
        Ok(match (generated, &self.transform) {
            (Some(b), Some(transform)) => Some(transform(context, b)),
            (generated, _) => generated,
        })
    }
}

impl fmt::Debug for LayoutPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutPlugin")
            .field("element_name", &self.element_name)
            .field("generator_name", &self.generator_name)
            .field("has_transform", &self.transform.is_some())
            .finish()
    }
}
