//! Hierarchical table input: ordered key trees with leaf values at the last key depth.

use crate::error::{DocumentError, Result};

/// One key in the hierarchy.
///
/// Children sit at `depth + 1`; values are only stored on nodes at depth
/// `column_count - 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNode {
    key: String,
    depth: usize,
    children: Vec<TableNode>,
    values: Vec<String>,
}

impl TableNode {
    fn new(key: &str, depth: usize) -> Self {
        Self {
            key: key.to_string(),
            depth,
            children: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn children(&self) -> &[TableNode] {
        &self.children
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Find the node for `key`, appending a new one when the key is unseen.
///
/// Linear in the sibling count, so building `n` children of one parent is
/// quadratic. Sibling order is first-seen order.
fn entry<'a>(nodes: &'a mut Vec<TableNode>, key: &str, depth: usize) -> &'a mut TableNode {
    let idx = match nodes.iter().position(|node| node.key == key) {
        Some(idx) => idx,
        None => {
            nodes.push(TableNode::new(key, depth));
            nodes.len() - 1
        }
    };
    &mut nodes[idx]
}

/// One flattened `(key path, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafRecord {
    /// Keys for every column but the last.
    pub keys: Vec<String>,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableHierarchy {
    columns: Vec<String>,
    roots: Vec<TableNode>,
    rows_seen: usize,
}

impl TableHierarchy {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            roots: Vec::new(),
            rows_seen: 0,
        }
    }

    /// Build from flat rows; repeated key prefixes share nodes.
    pub fn from_rows<C, R>(columns: C, rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let mut hierarchy = Self::new(columns);
        for row in rows {
            let cells: Vec<R::Item> = row.into_iter().collect();
            hierarchy.push_row(&cells)?;
        }
        Ok(hierarchy)
    }

    /// Add one flat row. Its length must equal the column count.
    ///
    /// With fewer than two columns there is nothing to group and the row is dropped.
    pub fn push_row<S: AsRef<str>>(&mut self, row: &[S]) -> Result<()> {
        let expected = self.columns.len();
        let index = self.rows_seen;
        self.rows_seen += 1;
        if row.len() != expected {
            return Err(DocumentError::RowShape {
                row: index,
                found: row.len(),
                expected,
            });
        }
        if expected < 2 {
            return Ok(());
        }

        let mut node = entry(&mut self.roots, row[0].as_ref(), 0);
        for (depth, key) in row.iter().enumerate().take(expected - 1).skip(1) {
            node = entry(&mut node.children, key.as_ref(), depth);
        }
        node.values.push(row[expected - 1].as_ref().to_string());
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn roots(&self) -> &[TableNode] {
        &self.roots
    }

    /// Depth-first leaf records in insertion order.
    pub fn leaves(&self) -> Vec<LeafRecord> {
        let mut out = Vec::new();
        if self.columns.len() < 2 {
            return out;
        }
        let key_columns = self.columns.len() - 1;
        let mut path = vec![String::new(); key_columns];
        for root in &self.roots {
            collect_leaves(root, key_columns, &mut path, &mut out);
        }
        out
    }
}

fn collect_leaves(
    node: &TableNode,
    key_columns: usize,
    path: &mut Vec<String>,
    out: &mut Vec<LeafRecord>,
) {
    path[node.depth] = node.key.clone();
    if node.depth + 1 == key_columns {
        for value in &node.values {
            out.push(LeafRecord {
                keys: path.clone(),
                value: value.clone(),
            });
        }
        return;
    }
    for child in &node.children {
        collect_leaves(child, key_columns, path, out);
    }
}

#[cfg(test)]
mod tests {
    use super::TableHierarchy;
    use crate::error::DocumentError;
    use proptest::prelude::*;

    #[test]
    fn shared_prefixes_reuse_nodes() {
        let table = TableHierarchy::from_rows(
            ["Region", "Host", "Disk"],
            [["eu", "a", "1"], ["eu", "a", "2"], ["eu", "b", "3"], ["us", "c", "4"]],
        )
        .expect("valid rows");

        assert_eq!(table.roots().len(), 2);
        let eu = &table.roots()[0];
        assert_eq!(eu.key(), "eu");
        assert_eq!(eu.depth(), 0);
        assert_eq!(eu.children().len(), 2);
        assert_eq!(eu.children()[0].depth(), 1);
        assert_eq!(eu.children()[0].values(), ["1", "2"]);
        assert!(eu.values().is_empty());
    }

    #[test]
    fn two_columns_store_values_on_roots() {
        let table = TableHierarchy::from_rows(["Key", "Value"], [["a", "1"], ["a", "2"]])
            .expect("valid rows");
        assert_eq!(table.roots()[0].values(), ["1", "2"]);
    }

    #[test]
    fn wrong_row_length_is_rejected() {
        let err = TableHierarchy::from_rows(
            ["A", "B", "C"],
            vec![vec!["x", "y", "z"], vec!["x", "y"]],
        )
        .expect_err("short row");
        assert!(matches!(
            err,
            DocumentError::RowShape {
                row: 1,
                found: 2,
                expected: 3
            }
        ));
    }

    #[test]
    fn fewer_than_two_columns_is_empty() {
        let table = TableHierarchy::from_rows(["Only"], [["x"], ["y"]]).expect("valid rows");
        assert!(table.roots().is_empty());
        assert!(table.leaves().is_empty());
    }

    #[test]
    fn flatten_walks_depth_first() {
        let table = TableHierarchy::from_rows(
            ["A", "B", "C"],
            [["a", "x", "1"], ["b", "y", "2"], ["a", "z", "3"], ["a", "x", "4"]],
        )
        .expect("valid rows");
        let flat: Vec<(Vec<String>, String)> = table
            .leaves()
            .into_iter()
            .map(|leaf| (leaf.keys, leaf.value))
            .collect();
        let owned = |k: [&str; 2], v: &str| {
            (k.iter().map(|s| s.to_string()).collect(), v.to_string())
        };
        assert_eq!(
            flat,
            vec![
                owned(["a", "x"], "1"),
                owned(["a", "x"], "4"),
                owned(["a", "z"], "3"),
                owned(["b", "y"], "2"),
            ]
        );
    }

    proptest! {
        #[test]
        fn flatten_preserves_insertion_order_of_sorted_rows(
            mut rows in proptest::collection::vec((0u8..3, 0u8..3), 0..30)
        ) {
            // Rows arriving already grouped by key come back in exactly the same order.
            rows.sort_by_key(|&(a, b)| (a, b));
            let flat_rows: Vec<[String; 3]> = rows
                .iter()
                .enumerate()
                .map(|(i, &(a, b))| [format!("k{a}"), format!("s{b}"), i.to_string()])
                .collect();
            let table = TableHierarchy::from_rows(["A", "B", "C"], &flat_rows).expect("valid rows");
            let values: Vec<String> = table.leaves().into_iter().map(|leaf| leaf.value).collect();
            let expected: Vec<String> = (0..rows.len()).map(|i| i.to_string()).collect();
            prop_assert_eq!(values, expected);
        }
    }
}
