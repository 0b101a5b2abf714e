//! st-template - Templating layer for stitch
//!
//! This crate finds the file and per-script templates for a database engine
//! (built-in, from an override directory, or both in pecking order) and
//! renders them with minijinja. Context variables are described in
//! [`context`].

pub mod context;
pub mod error;
pub mod locator;
pub mod renderer;

pub use context::{ContextMap, ScriptContext, WriterContext};
pub use error::{TemplateError, TemplateResult};
pub use locator::{
    BuiltinTemplateLocator, DirectoryTemplateLocator, PeckingOrderTemplateLocator,
    TemplateLocator, TemplateSet,
};
pub use renderer::ScriptRenderer;
