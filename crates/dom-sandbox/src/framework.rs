use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::document::Element;

const REACT_ELEMENT_TYPES: &[&str] = &[
    "react.element",
    "react.transitional.element",
    "Symbol(react.element)",
    "Symbol(react.transitional.element)",
];

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Vue,
}

impl Framework {
    /// Recognizes a serialized framework element by the shape tags its
    /// framework stamps on it.
    pub fn recognize(value: &Value) -> Option<Framework> {
        let object = value.as_object()?;
        if object
            .get("$$typeof")
            .and_then(Value::as_str)
            .is_some_and(|tag| REACT_ELEMENT_TYPES.contains(&tag))
        {
            return Some(Framework::React);
        }
        if object.get("__v_isVNode").and_then(Value::as_bool) == Some(true) {
            return Some(Framework::Vue);
        }
        None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Vue => "vue",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An element tree owned by a UI framework. The sandbox only knows which
/// framework it belongs to; turning it into markup is the renderer's job.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameworkElement {
    framework: Framework,
    tree: Value,
}

impl FrameworkElement {
    pub fn new(framework: Framework, tree: Value) -> Self {
        Self { framework, tree }
    }

    pub fn from_value(tree: Value) -> Option<Self> {
        let framework = Framework::recognize(&tree)?;
        Some(Self { framework, tree })
    }

    pub fn framework(&self) -> Framework {
        self.framework
    }

    pub fn tree(&self) -> &Value {
        &self.tree
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RenderedOutput {
    Markup(String),
    Element(Element),
}

#[derive(Debug, Error)]
#[error("{framework} render failed: {message}")]
pub struct RenderError {
    pub framework: Framework,
    pub message: String,
}

impl RenderError {
    pub fn new(framework: Framework, message: impl Into<String>) -> Self {
        Self {
            framework,
            message: message.into(),
        }
    }
}

pub trait FrameworkRenderer: Send + Sync {
    fn supports(&self, framework: Framework) -> bool;

    fn render(&self, element: &FrameworkElement) -> Result<RenderedOutput, RenderError>;
}
