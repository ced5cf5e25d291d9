//! Engine-neutral grammar description handed to the external recognizer.

use std::{fmt::Display, sync::Arc};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use crate::rules::Category;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrammarRule {
    /// A fixed phrase, matched word by word.
    Text(String),
    /// Exactly one of the alternatives.
    Choice(Vec<GrammarRule>),
    Sequence(Vec<GrammarRule>),
    Repeat {
        rule: Box<GrammarRule>,
        min: usize,
        max: usize,
    },
    /// A shared sub-grammar built once per configuration.
    Element(Arc<ElementGrammar>),
}

impl GrammarRule {
    pub fn text(text: impl Into<String>) -> Self {
        GrammarRule::Text(text.into())
    }

    pub fn choice_of<I, S>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GrammarRule::Choice(alternatives.into_iter().map(GrammarRule::text).collect())
    }

    pub fn optional(rule: GrammarRule) -> Self {
        Self::repeat(rule, 0, 1)
    }

    pub fn repeat(rule: GrammarRule, min: usize, max: usize) -> Self {
        GrammarRule::Repeat {
            rule: Box::new(rule),
            min,
            max,
        }
    }

    /// Renders the rule as a regex fragment. `\s*` separates the parts so
    /// that both spaced and ideographic text match.
    ///
    /// Returns `None` when the rule can never match (an empty choice).
    pub fn to_pattern(&self) -> Option<String> {
        match self {
            GrammarRule::Text(text) => Some(
                text.split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s*"),
            ),
            GrammarRule::Choice(alternatives) => {
                let patterns: Vec<String> = alternatives
                    .iter()
                    .filter_map(GrammarRule::to_pattern)
                    .collect();
                if patterns.is_empty() {
                    None
                } else {
                    Some(format!("(?:{})", patterns.join("|")))
                }
            }
            GrammarRule::Sequence(rules) => {
                let patterns = rules
                    .iter()
                    .map(GrammarRule::to_pattern)
                    .collect::<Option<Vec<_>>>()?;
                Some(
                    patterns
                        .into_iter()
                        .filter(|pattern| !pattern.is_empty())
                        .collect::<Vec<_>>()
                        .join(r"\s*"),
                )
            }
            GrammarRule::Repeat { rule, min, max } => match rule.to_pattern() {
                Some(pattern) if !pattern.is_empty() => {
                    Some(format!(r"(?:{pattern}\s*){{{min},{max}}}"))
                }
                Some(_) => Some(String::new()),
                None if *min == 0 => Some(String::new()),
                None => None,
            },
            GrammarRule::Element(element) => element.rule.to_pattern(),
        }
    }
}

impl Display for GrammarRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarRule::Text(text) => write!(f, "\"{text}\""),
            GrammarRule::Choice(alternatives) => {
                write!(f, "(")?;
                for (index, alternative) in alternatives.iter().enumerate() {
                    if index > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{alternative}")?;
                }
                write!(f, ")")
            }
            GrammarRule::Sequence(rules) => {
                for (index, rule) in rules.iter().enumerate() {
                    if index > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{rule}")?;
                }
                Ok(())
            }
            GrammarRule::Repeat { rule, min: 0, max: 1 } => write!(f, "[{rule}]"),
            GrammarRule::Repeat { rule, min, max } if min == max => write!(f, "{rule}{{{min}}}"),
            GrammarRule::Repeat { rule, min, max } => write!(f, "{rule}{{{min},{max}}}"),
            GrammarRule::Element(element) => write!(f, "<{}>", element.kind),
        }
    }
}

/// The five placeholder kinds a template may reference as `{Name}`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    AsRefStr,
    StrumDisplay,
    Serialize,
    Deserialize,
)]
pub enum ElementKind {
    Aircraft,
    Runway,
    Heading,
    WaypointNamed,
    WaypointSpelled,
}

impl ElementKind {
    /// The literal placeholder marker, e.g. `{Aircraft}`.
    pub fn marker(&self) -> String {
        format!("{{{}}}", self.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementGrammar {
    pub kind: ElementKind,
    pub rule: GrammarRule,
}

/// A named grammar ready for the recognizer. The name is the only channel
/// that carries the category back with a recognition event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledGrammar {
    pub name: String,
    pub category: Category,
    pub locale: String,
    pub rule: GrammarRule,
}

impl CompiledGrammar {
    /// Anchored, case-insensitive regex accepting every phrase of the grammar.
    pub fn to_regex_pattern(&self) -> Option<String> {
        self.rule
            .to_pattern()
            .map(|pattern| format!(r"(?i)^\s*{pattern}\s*$"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledGrammarSet {
    pub locale: String,
    pub grammars: Vec<CompiledGrammar>,
}

impl CompiledGrammarSet {
    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledGrammar> {
        self.grammars.iter()
    }

    pub fn get(&self, name: &str) -> Option<&CompiledGrammar> {
        self.grammars.iter().find(|grammar| grammar.name == name)
    }
}
