// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rules and the rule registry

use crate::ValidationIssue;
use log::debug;
use modelcheck_model::{CheckError, ElementId, Location, Result, Severity};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

/// Element predicate; `Ok(true)` means the element passes
pub type Predicate<T> = Box<dyn Fn(&T) -> Result<bool> + Send + Sync>;

/// A named, severity-tagged check against a single element
pub struct Rule<T> {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub severity: Severity,
    predicate: Predicate<T>,
}

impl<T> Rule<T> {
    /// Rule with an infallible predicate
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        severity: Severity,
        check: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::fallible(id, name, description, category, severity, move |element| {
            Ok(check(element))
        })
    }

    /// Rule whose predicate may fail, aborting validation of the element
    pub fn fallible(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        severity: Severity,
        check: impl Fn(&T) -> Result<bool> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category: category.into(),
            severity,
            predicate: Box::new(check),
        }
    }

    pub fn check(&self, element: &T) -> Result<bool> {
        (self.predicate)(element)
    }

    /// Issue raised when `element_id` fails this rule
    pub fn issue_for(&self, element_id: ElementId, location: Option<Location>) -> ValidationIssue {
        let mut issue = ValidationIssue::new(
            self.id.clone(),
            self.name.clone(),
            self.severity,
            self.category.clone(),
            element_id,
            self.description.clone(),
        );
        issue.location = location;
        issue
    }
}

impl<T> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("category", &self.category)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

/// Evaluate `rules` in order against one element
///
/// Returns one issue per failing rule, in rule order. The first predicate
/// error aborts the element and no issues are returned.
pub fn evaluate_rules<'a, T: 'a>(
    rules: impl IntoIterator<Item = &'a Rule<T>>,
    element: &T,
    element_id: &ElementId,
    location: Option<Location>,
) -> Result<Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    for rule in rules {
        if !rule.check(element)? {
            issues.push(rule.issue_for(element_id.clone(), location));
        }
    }
    Ok(issues)
}

/// Registry of rules keyed by id, kept in registration order
pub struct RuleEngine<T> {
    rules: Vec<Rule<T>>,
    index: FxHashMap<String, usize>,
}

impl<T> Default for RuleEngine<T> {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<T> fmt::Debug for RuleEngine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rules)
            .finish()
    }
}

impl<T> RuleEngine<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule; ids must be unique
    pub fn register(&mut self, rule: Rule<T>) -> Result<()> {
        if self.index.contains_key(&rule.id) {
            return Err(CheckError::invalid_value(
                "rule.id",
                format!("rule `{}` is already registered", rule.id),
            ));
        }
        self.index.insert(rule.id.clone(), self.rules.len());
        self.rules.push(rule);
        Ok(())
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_rule(mut self, rule: Rule<T>) -> Result<Self> {
        self.register(rule)?;
        Ok(self)
    }

    pub fn get(&self, id: &str) -> Option<&Rule<T>> {
        self.index.get(id).map(|&i| &self.rules[i])
    }

    pub fn rules(&self) -> &[Rule<T>] {
        &self.rules
    }

    pub fn rules_by_category(&self, category: &str) -> Vec<&Rule<T>> {
        self.rules
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    /// Distinct categories in order of first registration
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.rules
            .iter()
            .map(|r| r.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every registered rule against one element
    pub fn evaluate(&self, element: &T, element_id: &ElementId) -> Result<Vec<ValidationIssue>> {
        debug!("evaluating {} rules on {}", self.rules.len(), element_id);
        evaluate_rules(&self.rules, element, element_id, None)
    }
}
