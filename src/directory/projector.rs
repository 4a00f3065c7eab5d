//! Result projection / 结果排序与封装

use serde::Serialize;

use super::Record;

/// How a directory orders its results / 结果排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Case-insensitive by display name, ties broken by exact name / 按名称排序
    ByName,
    /// Keep filter/search order / 保持原始顺序
    Insertion,
}

/// Result envelope / 查询结果
#[derive(Debug, Clone, Serialize)]
pub struct ResultSet<T> {
    pub data: Vec<T>,
    /// Size of `data` / 结果数量
    pub count: usize,
    /// Size of the whole data set / 数据集总量
    pub total: usize,
}

impl<T> ResultSet<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ResultSet<U> {
        ResultSet {
            data: self.data.into_iter().map(f).collect(),
            count: self.count,
            total: self.total,
        }
    }
}

/// Sort key: lowercase first, exact name as tiebreak / 排序键
fn sort_key(name: &str) -> (String, String) {
    (name.to_lowercase(), name.to_string())
}

pub fn project<'a, R: Record>(mut records: Vec<&'a R>, order: SortOrder, total: usize) -> ResultSet<&'a R> {
    if order == SortOrder::ByName {
        // stable: identical names keep their relative order
        records.sort_by_cached_key(|r| sort_key(r.display_name()));
    }
    let count = records.len();
    ResultSet { data: records, count, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::test_support::{items, Item};

    fn names(r: &ResultSet<&Item>) -> Vec<(u32, &'static str)> {
        r.data.iter().map(|i| (i.id, i.name)).collect()
    }

    #[test]
    fn test_sort_by_name() {
        let data = items();
        let result = project(data.iter().collect(), SortOrder::ByName, data.len());
        assert_eq!(
            names(&result),
            vec![
                (2, "kazan federal"),
                (4, "Kazan Medical"),
                (1, "Moscow State"),
                (6, "Moscow State"),
                (5, "state moscow"),
                (3, "Tomsk State"),
            ]
        );
        assert_eq!(result.count, 6);
        assert_eq!(result.total, 6);
    }

    #[test]
    fn test_projection_is_stable_when_repeated() {
        let data = items();
        let once = project(data.iter().collect(), SortOrder::ByName, data.len());
        let twice = project(once.data.clone(), SortOrder::ByName, data.len());
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn test_insertion_order_untouched() {
        let data = items();
        let subset: Vec<&Item> = data.iter().rev().take(3).collect();
        let result = project(subset, SortOrder::Insertion, data.len());
        assert_eq!(result.data.iter().map(|i| i.id).collect::<Vec<_>>(), vec![6, 5, 4]);
        assert_eq!(result.count, 3);
        assert_eq!(result.total, 6);
    }

    #[test]
    fn test_case_only_difference_is_ordered() {
        let upper = Item { id: 1, name: "Omsk", group: "", note: "" };
        let lower = Item { id: 2, name: "omsk", group: "", note: "" };
        let result = project(vec![&lower, &upper], SortOrder::ByName, 2);
        assert_eq!(result.data[0].id, 1);
        assert_eq!(result.data[1].id, 2);
    }

    #[test]
    fn test_map_keeps_counts() {
        let data = items();
        let result = project(data.iter().take(2).collect(), SortOrder::Insertion, data.len());
        let mapped = result.map(|i| i.id);
        assert_eq!(mapped.data, vec![1, 2]);
        assert_eq!(mapped.count, 2);
        assert_eq!(mapped.total, 6);
    }
}
