use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::document::Element;
use crate::errors::MountError;
use crate::framework::{FrameworkElement, FrameworkRenderer, RenderedOutput};

// A crude check, not a parser: anything bracketed counts as a tag.
static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(<([^>]+)>)").unwrap());

pub fn contains_markup(text: &str) -> bool {
    TAG_PATTERN.is_match(text)
}

#[derive(Clone, Debug, PartialEq)]
pub enum CheckInput {
    Markup(String),
    Element(Element),
    Framework(FrameworkElement),
}

impl CheckInput {
    pub fn kind(&self) -> &'static str {
        match self {
            CheckInput::Markup(_) => "markup",
            CheckInput::Element(_) => "element",
            CheckInput::Framework(_) => "framework",
        }
    }
}

impl From<&str> for CheckInput {
    fn from(value: &str) -> Self {
        CheckInput::Markup(value.to_string())
    }
}

impl From<String> for CheckInput {
    fn from(value: String) -> Self {
        CheckInput::Markup(value)
    }
}

impl From<Element> for CheckInput {
    fn from(value: Element) -> Self {
        CheckInput::Element(value)
    }
}

impl From<FrameworkElement> for CheckInput {
    fn from(value: FrameworkElement) -> Self {
        CheckInput::Framework(value)
    }
}

impl TryFrom<Value> for CheckInput {
    type Error = MountError;

    /// Classifies an untyped input once, at the boundary.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if let Value::String(markup) = value {
            return Ok(CheckInput::Markup(markup));
        }
        if let Some(element) = FrameworkElement::from_value(value.clone()) {
            return Ok(CheckInput::Framework(element));
        }
        if let Some(element) = element_from_description(&value) {
            return Ok(CheckInput::Element(element));
        }
        Err(MountError::invalid_kind(json_kind(&value)))
    }
}

fn element_from_description(value: &Value) -> Option<Element> {
    let object = value.as_object()?;
    let tag_name = object.get("tagName")?.as_str()?;
    if tag_name.trim().is_empty() {
        return None;
    }
    let mut element = Element::new(tag_name);
    if let Some(attributes) = object.get("attributes").and_then(Value::as_object) {
        for (name, value) in attributes {
            let text = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            element.set_attribute(name.as_str(), text);
        }
    }
    if let Some(inner) = object.get("innerHTML").and_then(Value::as_str) {
        element.set_inner_html(inner);
    }
    Some(element)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Markup that passed the tag check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn parse(text: impl Into<String>) -> Result<Self, MountError> {
        let text = text.into();
        if contains_markup(&text) {
            Ok(Self(text))
        } else {
            Err(MountError::EmptyMarkup { markup: text })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Input after validation and rendering; mounting it can no longer fail.
#[derive(Clone, Debug, PartialEq)]
pub enum PreparedInput {
    Markup(Markup),
    Element(Element),
}

pub fn prepare(
    input: CheckInput,
    renderer: Option<&dyn FrameworkRenderer>,
) -> Result<PreparedInput, MountError> {
    match input {
        CheckInput::Markup(text) => Markup::parse(text).map(PreparedInput::Markup),
        CheckInput::Element(element) => Ok(PreparedInput::Element(element)),
        CheckInput::Framework(element) => {
            let framework = element.framework();
            let renderer = renderer
                .filter(|renderer| renderer.supports(framework))
                .ok_or(MountError::RendererUnavailable(framework))?;
            debug!(%framework, "rendering framework element");
            match renderer.render(&element)? {
                RenderedOutput::Markup(text) => Markup::parse(text).map(PreparedInput::Markup),
                RenderedOutput::Element(element) => Ok(PreparedInput::Element(element)),
            }
        }
    }
}
