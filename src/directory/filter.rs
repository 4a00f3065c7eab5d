//! Discrete constraints / 条件过滤
//!
//! Query parameters are parsed leniently: an absent, empty, `all` or
//! unparseable value means "no constraint" rather than a rejected request.

use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::hash::Hash;
use std::str::FromStr;

/// Sentinel value meaning "unconstrained" / 不限条件
pub const ALL: &str = "all";

/// Single-valued constraint / 单值条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint<T> {
    Any,
    Is(T),
}

impl<T> Default for Constraint<T> {
    fn default() -> Self {
        Constraint::Any
    }
}

impl<T: FromStr> Constraint<T> {
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = match raw.map(str::trim) {
            None => return Constraint::Any,
            Some(v) if v.is_empty() || v.eq_ignore_ascii_case(ALL) => return Constraint::Any,
            Some(v) => v,
        };
        match raw.parse() {
            Ok(value) => Constraint::Is(value),
            Err(_) => {
                tracing::debug!("Ignoring unparseable filter value: {}", raw);
                Constraint::Any
            }
        }
    }
}

impl<T> Constraint<T> {
    pub fn is_active(&self) -> bool {
        matches!(self, Constraint::Is(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Constraint::Any => None,
            Constraint::Is(v) => Some(v),
        }
    }
}

impl<'de, T: FromStr> Deserialize<'de> for Constraint<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Constraint::parse(raw.as_deref()))
    }
}

/// Multi-valued constraint, matched by set membership / 多值条件
///
/// Parsed from a comma-separated list (`1,2,5`). Bad entries are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T: Eq + Hash>(HashSet<T>);

impl<T: Eq + Hash> Default for Selection<T> {
    fn default() -> Self {
        Selection(HashSet::new())
    }
}

impl<T: Eq + Hash + FromStr> Selection<T> {
    pub fn parse(raw: Option<&str>) -> Self {
        let set = raw
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
            .filter_map(|v| v.parse().ok())
            .collect();
        Selection(set)
    }
}

impl<T: Eq + Hash> Selection<T> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.0.contains(value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<T: Eq + Hash> FromIterator<T> for Selection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Selection(iter.into_iter().collect())
    }
}

impl<'de, T: Eq + Hash + FromStr> Deserialize<'de> for Selection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Selection::parse(raw.as_deref()))
    }
}

type Predicate<'q, R> = Box<dyn Fn(&R) -> bool + 'q>;

/// Conjunction of active constraints / 条件组合（与）
pub struct Filter<'q, R> {
    predicates: Vec<Predicate<'q, R>>,
}

impl<'q, R> Default for Filter<'q, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'q, R> Filter<'q, R> {
    pub fn new() -> Self {
        Self { predicates: Vec::new() }
    }

    /// Add a single-valued constraint; `Any` is skipped / 添加单值条件
    pub fn when<T, F>(mut self, constraint: &'q Constraint<T>, pred: F) -> Self
    where
        F: Fn(&R, &T) -> bool + 'q,
    {
        if let Constraint::Is(value) = constraint {
            self.predicates.push(Box::new(move |r| pred(r, value)));
        }
        self
    }

    /// Add a multi-valued constraint; an empty selection is skipped / 添加多值条件
    pub fn when_selected<T, F>(mut self, selection: &'q Selection<T>, pred: F) -> Self
    where
        T: Eq + Hash,
        F: Fn(&R, &Selection<T>) -> bool + 'q,
    {
        if !selection.is_empty() {
            self.predicates.push(Box::new(move |r| pred(r, selection)));
        }
        self
    }

    /// Number of active constraints / 生效条件数
    pub fn active(&self) -> usize {
        self.predicates.len()
    }

    pub fn matches(&self, record: &R) -> bool {
        self.predicates.iter().all(|p| p(record))
    }

    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a R>
    where
        I: IntoIterator<Item = &'a R>,
    {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
