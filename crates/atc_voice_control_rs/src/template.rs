//! Template mini-language.
//!
//! `{Aircraft} cleared <for takeoff|to depart> [runway] {Runway}` reads as:
//! an element reference, a literal, an inline choice, an optional literal and
//! another element reference. Spans never nest; their contents are taken
//! verbatim.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    elements::ElementGrammars,
    grammar::{CompiledGrammar, CompiledGrammarSet, ElementKind, GrammarRule},
    rules::{COMMANDS, CommandTemplate, RuleSet},
};

static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]+\}|<[^>]+>|\[[^\]]+\]").expect("static token regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    Literal(String),
    ElementRef(ElementKind),
    InlineChoice(Vec<String>),
    Optional(String),
}

/// Splits a template into tokens, left to right.
pub fn tokenize(template: &str) -> Vec<TemplateToken> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for span in TOKEN_REGEX.find_iter(template) {
        push_literal(&mut tokens, &template[last..span.start()]);
        last = span.end();

        let raw = span.as_str();
        let inner = &raw[1..raw.len() - 1];
        match raw.chars().next() {
            Some('{') => match inner.trim().parse::<ElementKind>() {
                Ok(kind) => tokens.push(TemplateToken::ElementRef(kind)),
                Err(_) => {
                    log::debug!("Unknown element {raw}, keeping it as text");
                    tokens.push(TemplateToken::Literal(raw.to_owned()));
                }
            },
            Some('<') => {
                let alternatives: Vec<String> = inner
                    .split('|')
                    .map(str::trim)
                    .filter(|alternative| !alternative.is_empty())
                    .map(str::to_owned)
                    .collect();
                if !alternatives.is_empty() {
                    tokens.push(TemplateToken::InlineChoice(alternatives));
                }
            }
            _ => {
                let inner = inner.trim();
                if !inner.is_empty() {
                    tokens.push(TemplateToken::Optional(inner.to_owned()));
                }
            }
        }
    }
    push_literal(&mut tokens, &template[last..]);
    tokens
}

fn push_literal(tokens: &mut Vec<TemplateToken>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        tokens.push(TemplateToken::Literal(text.to_owned()));
    }
}

/// Compiles one template into a grammar named `<category code><index>`.
///
/// Compilation never fails: unknown elements and stray delimiters end up as
/// literal text. Deciding which templates are acceptable is the rule
/// filter's job.
pub fn compile(
    template: &CommandTemplate,
    elements: &ElementGrammars,
    locale: &str,
    index: usize,
) -> CompiledGrammar {
    let rules = tokenize(&template.text)
        .into_iter()
        .map(|token| match token {
            TemplateToken::Literal(text) => GrammarRule::Text(text),
            TemplateToken::ElementRef(kind) => GrammarRule::Element(elements.get(kind).clone()),
            TemplateToken::InlineChoice(alternatives) => GrammarRule::choice_of(alternatives),
            TemplateToken::Optional(text) => GrammarRule::optional(GrammarRule::Text(text)),
        })
        .collect();
    CompiledGrammar {
        name: format!("{}{index}", template.category.code().unwrap_or("INV")),
        category: template.category,
        locale: locale.to_owned(),
        rule: GrammarRule::Sequence(rules),
    }
}

/// Filters the rule set and compiles every accepted template. Indices count
/// per category, so the first status grammar is `AGS0` and the first takeoff
/// grammar `ATO0`.
pub fn compile_rule_set(
    rules: &RuleSet,
    elements: &ElementGrammars,
    locale: &str,
) -> CompiledGrammarSet {
    let accepted = rules.filtered();
    let grammars = COMMANDS
        .into_iter()
        .flat_map(|category| {
            accepted
                .templates(category)
                .iter()
                .enumerate()
                .map(move |(index, text)| {
                    let template = CommandTemplate {
                        category,
                        text: text.clone(),
                    };
                    compile(&template, elements, locale, index)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    log::info!(
        "Compiled {} of {} templates for {locale}",
        grammars.len(),
        rules.len()
    );
    CompiledGrammarSet {
        locale: locale.to_owned(),
        grammars,
    }
}
