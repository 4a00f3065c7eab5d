//! Directory module - filter, search and projection over fixed record sets / 目录查询模块
//!
//! Every data set (cities, universities, jobs, communities, languages) goes
//! through the same pipeline:
//! - `Filter` narrows by discrete constraints / 按条件过滤
//! - `SearchMatcher` narrows by tokenized free text / 关键词匹配
//! - `project` orders and packages the result / 排序与封装
//!
//! Records are built once and never mutated, so a `Directory` is shared
//! read-only between requests.

pub mod filter;
pub mod matcher;
pub mod projector;
pub mod tokenizer;

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

pub use filter::{Constraint, Filter, Selection};
pub use matcher::SearchMatcher;
pub use projector::{ResultSet, SortOrder};

/// A record that can be listed in a directory / 可查询的记录
pub trait Record {
    type Id: Eq + Hash + Clone + Debug;

    fn id(&self) -> Self::Id;

    /// Name used for ordering / 排序用名称
    fn display_name(&self) -> &str;

    /// Fields the free-text search looks at, in haystack order / 参与搜索的字段
    fn searchable_fields(&self) -> Vec<&str>;
}

/// Fixed, ordered record set plus its projection rule / 固定记录集
pub struct Directory<R> {
    name: &'static str,
    records: Vec<R>,
    order: SortOrder,
}

impl<R: Record> Directory<R> {
    pub fn new(name: &'static str, records: Vec<R>, order: SortOrder) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                tracing::error!("Duplicate id {:?} in {} directory", record.id(), name);
            }
        }
        tracing::debug!("Directory {} ready with {} records", name, records.len());
        Self { name, records, order }
    }

    /// Records in authored order / 按原始顺序返回记录
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.records.iter().find(|r| &r.id() == id)
    }

    /// Run the whole pipeline: filter, search, project / 执行完整查询
    pub fn query(&self, filter: &Filter<'_, R>, search: &str) -> ResultSet<&R> {
        let matcher = SearchMatcher::new(search);
        let filtered = filter.apply(self.records.iter());
        let matched = matcher.apply(filtered);
        tracing::trace!("{} search {:?} kept {} records", self.name, matcher.normalized(), matched.len());
        projector::project(matched, self.order, self.records.len())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Record;

    #[derive(Debug, Clone, PartialEq)]
    pub struct Item {
        pub id: u32,
        pub name: &'static str,
        pub group: &'static str,
        pub note: &'static str,
    }

    impl Record for Item {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }

        fn display_name(&self) -> &str {
            self.name
        }

        fn searchable_fields(&self) -> Vec<&str> {
            vec![self.name, self.group, self.note]
        }
    }

    pub fn items() -> Vec<Item> {
        vec![
            Item { id: 1, name: "Moscow State", group: "central", note: "big campus" },
            Item { id: 2, name: "kazan federal", group: "volga", note: "" },
            Item { id: 3, name: "Tomsk State", group: "siberia", note: "oldest in siberia" },
            Item { id: 4, name: "Kazan Medical", group: "volga", note: "medicine" },
            Item { id: 5, name: "state moscow", group: "central", note: "duplicate-ish name" },
            Item { id: 6, name: "Moscow State", group: "central", note: "same name, later" },
        ]
    }
}
