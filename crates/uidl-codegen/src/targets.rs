//! Target selectors and the per-framework constants they select.

use crate::error::CodegenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uidl_core::Dependency;

pub const REACT_VERSION: &str = "^17.0.2";
pub const PREACT_VERSION: &str = "^10.5.13";
pub const PROP_TYPES_VERSION: &str = "^15.7.2";
pub const REACT_ROUTER_VERSION: &str = "^5.2.0";

/// The component framework to generate for. React is always available;
/// the other targets are behind the `preact` and `vue` features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    #[default]
    React,
    #[cfg(feature = "preact")]
    Preact,
    #[cfg(feature = "vue")]
    Vue,
}

/// What a JSX target needs in scope: the name JSX compiles against, its
/// package, and where `useState` comes from.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxRuntime {
    pub pragma: &'static str,
    pub runtime: Dependency,
    pub hooks: Dependency,
}

impl ComponentType {
    /// Attribute naming the CSS class of an element.
    pub fn class_attribute(self) -> &'static str {
        match self {
            ComponentType::React => "className",
            #[cfg(feature = "preact")]
            ComponentType::Preact => "class",
            #[cfg(feature = "vue")]
            ComponentType::Vue => "class",
        }
    }

    /// The runtime of a JSX target; `None` for template targets.
    pub fn jsx_runtime(self) -> Option<JsxRuntime> {
        match self {
            ComponentType::React => Some(JsxRuntime {
                pragma: "React",
                runtime: Dependency::package("react", Some(REACT_VERSION)),
                hooks: Dependency::package("react", Some(REACT_VERSION)).named(),
            }),
            #[cfg(feature = "preact")]
            ComponentType::Preact => Some(JsxRuntime {
                pragma: "h",
                runtime: Dependency::package("preact", Some(PREACT_VERSION)).named(),
                hooks: Dependency::package("preact/hooks", Some(PREACT_VERSION)).named(),
            }),
            #[cfg(feature = "vue")]
            ComponentType::Vue => None,
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::React => write!(f, "react"),
            #[cfg(feature = "preact")]
            Self::Preact => write!(f, "preact"),
            #[cfg(feature = "vue")]
            Self::Vue => write!(f, "vue"),
        }
    }
}

/// How element styles are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleVariation {
    #[default]
    InlineStyles,
    CssModules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[default]
    React,
}

/// Where a packed project is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublisherType {
    Zip,
    Disk,
    Github,
    Codesandbox,
}

impl FromStr for ComponentType {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "react" => Ok(ComponentType::React),
            #[cfg(feature = "preact")]
            "preact" => Ok(ComponentType::Preact),
            #[cfg(feature = "vue")]
            "vue" => Ok(ComponentType::Vue),
            _ => Err(invalid("component type", s)),
        }
    }
}

impl FromStr for StyleVariation {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inline-styles" | "inlinestyles" => Ok(StyleVariation::InlineStyles),
            "css-modules" | "cssmodules" => Ok(StyleVariation::CssModules),
            _ => Err(invalid("style variation", s)),
        }
    }
}

impl FromStr for ProjectType {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "react" => Ok(ProjectType::React),
            _ => Err(invalid("project type", s)),
        }
    }
}

impl FromStr for PublisherType {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zip" => Ok(PublisherType::Zip),
            "disk" => Ok(PublisherType::Disk),
            "github" => Ok(PublisherType::Github),
            "codesandbox" => Ok(PublisherType::Codesandbox),
            _ => Err(invalid("publisher type", s)),
        }
    }
}

impl fmt::Display for PublisherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zip => write!(f, "zip"),
            Self::Disk => write!(f, "disk"),
            Self::Github => write!(f, "github"),
            Self::Codesandbox => write!(f, "codesandbox"),
        }
    }
}

fn invalid(kind: &'static str, value: &str) -> CodegenError {
    CodegenError::InvalidSelector {
        kind,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selectors() {
        assert_eq!("React".parse::<ComponentType>().unwrap(), ComponentType::React);
        assert_eq!(
            "css-modules".parse::<StyleVariation>().unwrap(),
            StyleVariation::CssModules
        );
        assert_eq!("react".parse::<ProjectType>().unwrap(), ProjectType::React);
        assert_eq!("github".parse::<PublisherType>().unwrap(), PublisherType::Github);
    }

    #[cfg(feature = "preact")]
    #[test]
    fn test_preact_selector_and_runtime() {
        let preact = "Preact".parse::<ComponentType>().unwrap();
        assert_eq!(preact, ComponentType::Preact);
        assert_eq!(preact.to_string(), "preact");
        assert_eq!(preact.jsx_runtime().unwrap().hooks.path, "preact/hooks");
    }

    #[cfg(feature = "vue")]
    #[test]
    fn test_vue_has_no_jsx_runtime() {
        let vue = "vue".parse::<ComponentType>().unwrap();
        assert_eq!(vue, ComponentType::Vue);
        assert!(vue.jsx_runtime().is_none());
        assert_eq!(serde_json::from_str::<ComponentType>("\"vue\"").unwrap(), vue);
    }

    #[cfg(not(feature = "preact"))]
    #[test]
    fn test_disabled_target_is_rejected() {
        assert!("preact".parse::<ComponentType>().is_err());
        assert!(serde_json::from_str::<ComponentType>("\"preact\"").is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ComponentType::default(), ComponentType::React);
        assert_eq!(StyleVariation::default(), StyleVariation::InlineStyles);
    }

    #[test]
    fn test_unknown_selector() {
        match "angular".parse::<ComponentType>().unwrap_err() {
            CodegenError::InvalidSelector { kind, value } => {
                assert_eq!(kind, "component type");
                assert_eq!(value, "angular");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!("ftp".parse::<PublisherType>().is_err());
        assert!("vue".parse::<ProjectType>().is_err());
    }
}
