/// Connected components of a labelled edge list
///
/// Each line of the input names two nodes; every edge merges their sets in a
/// [`DisjointSetForest`] sized to the number of distinct labels.
use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, Write};

use crate::forest::DisjointSetForest;
use crate::labels::LabelIndex;

/// Edges over labels, with labels already mapped to dense ids
#[derive(Debug, Default)]
pub struct EdgeList {
    pub labels: LabelIndex,
    pub edges: Vec<(usize, usize)>,
}

/// Read a whitespace-separated edge list.
///
/// Blank lines and `#` comments are skipped, fields past the second are
/// ignored.
pub fn read_edge_list<R: BufRead>(reader: R) -> Result<EdgeList> {
    let mut list = EdgeList::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let (a, b) = match (fields.next(), fields.next()) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                return Err(anyhow!(
                    "Line {}: expected two labels, got '{}'",
                    line_no + 1,
                    trimmed
                ))
            }
        };

        let a = list.labels.get_or_insert(a);
        let b = list.labels.get_or_insert(b);
        list.edges.push((a, b));
    }

    log::debug!(
        "Read {} edges over {} labels",
        list.edges.len(),
        list.labels.len()
    );
    Ok(list)
}

/// One connected component, members in id order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub members: Vec<usize>,
}

impl Component {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Result of merging every edge of an [`EdgeList`]
#[derive(Debug)]
pub struct ComponentReport {
    /// Unions that joined two different sets
    pub merges: usize,
    /// Unions whose endpoints were already connected
    pub redundant: usize,
    /// Largest first; equal sizes keep the order of their smallest member
    pub components: Vec<Component>,
}

impl ComponentReport {
    pub fn build(list: &EdgeList) -> Result<Self> {
        let mut forest = DisjointSetForest::new(list.labels.len());
        let mut merges = 0;
        let mut redundant = 0;

        for &(a, b) in &list.edges {
            if forest.union(a, b)? {
                merges += 1;
            } else {
                redundant += 1;
            }
        }

        let mut components: Vec<Component> = forest
            .groups()
            .into_iter()
            .map(|members| Component { members })
            .collect();
        components.sort_by(|a, b| b.size().cmp(&a.size()));

        log::info!(
            "{} labels, {} edges: {} merges, {} redundant, {} components",
            list.labels.len(),
            list.edges.len(),
            merges,
            redundant,
            components.len()
        );

        Ok(ComponentReport {
            merges,
            redundant,
            components,
        })
    }

    /// Write `index\tsize\tlabel,label,...` for every component with at least `min_size` members
    pub fn write_tsv<W: Write>(&self, out: &mut W, labels: &LabelIndex, min_size: usize) -> Result<usize> {
        let mut written = 0;
        for (index, component) in self
            .components
            .iter()
            .filter(|c| c.size() >= min_size)
            .enumerate()
        {
            let names = component
                .members
                .iter()
                .map(|&id| {
                    labels
                        .get_name(id)
                        .ok_or_else(|| anyhow!("No label for element {id}"))
                })
                .collect::<Result<Vec<_>>>()?;
            writeln!(out, "{}\t{}\t{}", index, component.size(), names.join(","))?;
            written += 1;
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDGES: &str = "\
# two clusters and a loner
a b
c d extra-field
b c
e f
a d
g g
";

    #[test]
    fn test_read_edge_list() {
        let list = read_edge_list(EDGES.as_bytes()).unwrap();
        assert_eq!(list.labels.len(), 7);
        assert_eq!(list.edges.len(), 6);
        assert_eq!(list.edges[0], (0, 1));
        assert_eq!(list.edges[5], (6, 6));
    }

    #[test]
    fn test_short_line_is_an_error() {
        let err = read_edge_list("a b\nlonely\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Line 2"), "got: {err}");
    }

    #[test]
    fn test_report_counts_and_order() {
        let list = read_edge_list(EDGES.as_bytes()).unwrap();
        let report = ComponentReport::build(&list).unwrap();

        assert_eq!(report.merges, 4);
        assert_eq!(report.redundant, 2);
        let sizes: Vec<usize> = report.components.iter().map(|c| c.size()).collect();
        assert_eq!(sizes, vec![4, 2, 1]);
        assert_eq!(report.components[0].members, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_write_tsv_with_min_size() {
        let list = read_edge_list(EDGES.as_bytes()).unwrap();
        let report = ComponentReport::build(&list).unwrap();

        let mut out = Vec::new();
        let written = report.write_tsv(&mut out, &list.labels, 2).unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "0\t4\ta,b,c,d\n1\t2\te,f\n");
    }
}
