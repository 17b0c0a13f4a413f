//! Token replacement for confirmation e-mails and receipts
//!
//! Job administrators write templates like
//! `"Thanks !FAMILY_NAME, your balance is !BALANCE_DUE"`. A token is `!`
//! followed by an upper-case name. When one registered token is a prefix
//! of another (`!TEAM` and `!TEAM_NAME`) the longest one that matches wins.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::html_table::escape_html;

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!([A-Z][A-Z0-9_]*)").expect("static pattern is valid"));

#[derive(Debug, Clone, Default)]
pub struct TokenReplacer {
    values: HashMap<String, String>,
}

impl TokenReplacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a value; the token may be given with or without its `!`
    pub fn insert(&mut self, token: &str, value: impl Into<String>) {
        let name = token.trim_start_matches('!').to_string();
        self.values.insert(name, value.into());
    }

    pub fn with(mut self, token: &str, value: impl Into<String>) -> Self {
        self.insert(token, value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replaces tokens with their values as-is
    pub fn replace(&self, template: &str) -> String {
        self.render(template, |value| value.to_string())
    }

    /// Replaces tokens with HTML-escaped values
    pub fn replace_html(&self, template: &str) -> String {
        self.render(template, escape_html)
    }

    /// Distinct tokens in the template, in order of first appearance
    pub fn tokens_in(template: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        TOKEN
            .find_iter(template)
            .map(|m| m.as_str().to_string())
            .filter(|token| seen.insert(token.clone()))
            .collect()
    }

    fn render(&self, template: &str, encode: impl Fn(&str) -> String) -> String {
        TOKEN
            .replace_all(template, |caps: &Captures| {
                let run = &caps[1];
                match self.longest_registered(run) {
                    Some((len, value)) => format!("{}{}", encode(value), &run[len..]),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Longest registered token name that prefixes `run`
    fn longest_registered(&self, run: &str) -> Option<(usize, &str)> {
        (1..=run.len())
            .rev()
            .find_map(|len| self.values.get(&run[..len]).map(|value| (len, value.as_str())))
    }
}
