//! Set comparison between two title collections.
//!
//! Both collections are first collapsed into true sets using [`Record`]
//! equivalence, then the five standard relationships are computed. Only the
//! requested one is returned, but all five feed the textual summary.
//!
//! # Example
//!
//! ```
//! use bibcompare::{Operation, Record, compare};
//!
//! let a = vec![Record::from("Machine Learning for Genomics")];
//! let b = vec![
//!     Record::from("machine learning for genomics"),
//!     Record::from("Deep Learning Basics"),
//! ];
//!
//! let (result, summary) = compare(&a, &b, Operation::Intersection);
//! assert_eq!(result.len(), 1);
//! assert!(summary.contains("Union A ⋃ B: 2"));
//! ```

use crate::Record;
use crate::error::CompareError;
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// The set relationship to extract from a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Operation {
    /// Titles in B that are not in A.
    #[default]
    DifferenceBMinusA,
    /// Titles in A that are not in B.
    DifferenceAMinusB,
    /// Titles in A or B.
    Union,
    /// Titles in exactly one of A and B.
    SymmetricDifference,
    /// Titles in both A and B.
    Intersection,
}

impl Operation {
    /// Every operation, in the order they are usually presented.
    pub const ALL: [Operation; 5] = [
        Operation::DifferenceBMinusA,
        Operation::DifferenceAMinusB,
        Operation::Union,
        Operation::SymmetricDifference,
        Operation::Intersection,
    ];

    /// Short selector string (`B-A`, `A-B`, `AUB`, `A^B`, `A⋂B`).
    pub fn selector(&self) -> &'static str {
        match self {
            Operation::DifferenceBMinusA => "B-A",
            Operation::DifferenceAMinusB => "A-B",
            Operation::Union => "AUB",
            Operation::SymmetricDifference => "A^B",
            Operation::Intersection => "A⋂B",
        }
    }

    /// Kebab-case name, as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::DifferenceBMinusA => "b-minus-a",
            Operation::DifferenceAMinusB => "a-minus-b",
            Operation::Union => "union",
            Operation::SymmetricDifference => "symmetric-difference",
            Operation::Intersection => "intersection",
        }
    }

    /// Human-readable label with set notation.
    pub fn label(&self) -> &'static str {
        match self {
            Operation::DifferenceBMinusA => "Difference: B - A",
            Operation::DifferenceAMinusB => "Difference: A - B",
            Operation::Union => "Union: A ⋃ B",
            Operation::SymmetricDifference => "Symmetric Difference: A ∆ B",
            Operation::Intersection => "Intersection: A ⋂ B",
        }
    }

    /// One-sentence explanation of the resulting set.
    pub fn description(&self) -> &'static str {
        match self {
            Operation::DifferenceBMinusA => "The set of items in B that aren't in A.",
            Operation::DifferenceAMinusB => "The set of items in A that aren't in B.",
            Operation::Union => "The set of all items in A and B.",
            Operation::SymmetricDifference => {
                "The set of items that are in either A or B, but not both."
            }
            Operation::Intersection => "The set of items that are shared between A and B.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Operation {
    type Err = CompareError;

    /// Accepts either the selector (`A^B`) or the kebab-case name
    /// (`symmetric-difference`). Names are matched case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Operation::ALL
            .into_iter()
            .find(|op| op.selector() == trimmed || op.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CompareError::UnknownOperation(s.to_string()))
    }
}

/// Cardinalities of a comparison.
///
/// `total_a` and `total_b` count the input collections as given, duplicates
/// included; the other counts are over the deduplicated sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub total_a: usize,
    pub total_b: usize,
    pub union: usize,
    pub intersection: usize,
    pub symmetric_difference: usize,
    pub a_minus_b: usize,
    pub b_minus_a: usize,
}

impl fmt::Display for ComparisonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total titles in A: {}", self.total_a)?;
        writeln!(f, "Total titles in B: {}", self.total_b)?;
        writeln!(f, "Union A ⋃ B: {}", self.union)?;
        writeln!(f, "Intersection A ⋂ B: {}", self.intersection)?;
        writeln!(f, "Symmetric Difference A ∆ B: {}", self.symmetric_difference)?;
        writeln!(f, "Difference A - B: {}", self.a_minus_b)?;
        write!(f, "Difference B - A: {}", self.b_minus_a)
    }
}

/// All five set relationships between two collections.
///
/// Each collection keeps its first occurrence of every title as the
/// representative. Where a title is present on both sides, the union and the
/// intersection hold the representative from A.
#[derive(Debug, Clone)]
pub struct SetComparison {
    total_a: usize,
    total_b: usize,
    union: HashSet<Record>,
    intersection: HashSet<Record>,
    symmetric_difference: HashSet<Record>,
    a_minus_b: HashSet<Record>,
    b_minus_a: HashSet<Record>,
}

impl SetComparison {
    /// Compare collection `a` against collection `b`.
    pub fn new(a: &[Record], b: &[Record]) -> Self {
        let set_a: HashSet<&Record> = a.iter().collect();
        let set_b: HashSet<&Record> = b.iter().collect();

        let a_minus_b: HashSet<Record> = set_a.difference(&set_b).map(|r| (*r).clone()).collect();
        let b_minus_a: HashSet<Record> = set_b.difference(&set_a).map(|r| (*r).clone()).collect();
        let intersection: HashSet<Record> = set_a
            .iter()
            .filter(|r| set_b.contains(*r))
            .map(|r| (*r).clone())
            .collect();
        // A first, so shared titles keep A's record.
        let union: HashSet<Record> = set_a
            .iter()
            .chain(set_b.iter().filter(|r| !set_a.contains(*r)))
            .map(|r| (*r).clone())
            .collect();
        let symmetric_difference: HashSet<Record> =
            a_minus_b.iter().chain(b_minus_a.iter()).cloned().collect();

        Self {
            total_a: a.len(),
            total_b: b.len(),
            union,
            intersection,
            symmetric_difference,
            a_minus_b,
            b_minus_a,
        }
    }

    /// The set for one operation.
    pub fn get(&self, operation: Operation) -> &HashSet<Record> {
        match operation {
            Operation::DifferenceBMinusA => &self.b_minus_a,
            Operation::DifferenceAMinusB => &self.a_minus_b,
            Operation::Union => &self.union,
            Operation::SymmetricDifference => &self.symmetric_difference,
            Operation::Intersection => &self.intersection,
        }
    }

    /// Consume the comparison, keeping only the set for one operation.
    pub fn take(self, operation: Operation) -> HashSet<Record> {
        match operation {
            Operation::DifferenceBMinusA => self.b_minus_a,
            Operation::DifferenceAMinusB => self.a_minus_b,
            Operation::Union => self.union,
            Operation::SymmetricDifference => self.symmetric_difference,
            Operation::Intersection => self.intersection,
        }
    }

    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary {
            total_a: self.total_a,
            total_b: self.total_b,
            union: self.union.len(),
            intersection: self.intersection.len(),
            symmetric_difference: self.symmetric_difference.len(),
            a_minus_b: self.a_minus_b.len(),
            b_minus_a: self.b_minus_a.len(),
        }
    }
}

/// Compare two collections and return the set for `operation` together with
/// the rendered summary of all five relationships.
///
/// Inputs are not modified. The iteration order of the returned set is
/// unspecified; use [`order_records`] for a stable presentation order.
pub fn compare(a: &[Record], b: &[Record], operation: Operation) -> (HashSet<Record>, String) {
    let comparison = SetComparison::new(a, b);
    let summary = comparison.summary().to_string();
    (comparison.take(operation), summary)
}

/// Like [`compare`], but the operation is given as a selector string.
///
/// An unrecognized selector is not an error: the result set is empty and the
/// summary is still produced. A warning is logged so the silent no-op does not
/// go unnoticed. Parse the selector with [`Operation::from_str`] instead to
/// reject unknown selectors.
pub fn compare_with_selector(
    a: &[Record],
    b: &[Record],
    selector: &str,
) -> (HashSet<Record>, String) {
    let comparison = SetComparison::new(a, b);
    let summary = comparison.summary().to_string();

    match selector.parse::<Operation>() {
        Ok(operation) => (comparison.take(operation), summary),
        Err(err) => {
            warn!(selector, error = %err, "returning an empty result set");
            (HashSet::new(), summary)
        }
    }
}

/// Order records for display or export: by normalized title, then raw title.
pub fn order_records<'a, I>(records: I) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .sorted_by(|x, y| {
            x.normalized_title()
                .cmp(y.normalized_title())
                .then_with(|| x.title().cmp(y.title()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn records(titles: &[&str]) -> Vec<Record> {
        titles.iter().copied().map(Record::from).collect()
    }

    fn titles(set: &HashSet<Record>) -> Vec<&str> {
        order_records(set).into_iter().map(Record::title).collect()
    }

    #[test]
    fn test_end_to_end_intersection() {
        let a = records(&["Machine Learning for Genomics"]);
        let b = records(&["machine learning for genomics", "Deep Learning Basics"]);

        let (result, summary) = compare(&a, &b, Operation::Intersection);
        assert_eq!(result.len(), 1);
        assert_eq!(
            summary,
            "Total titles in A: 1\n\
             Total titles in B: 2\n\
             Union A ⋃ B: 2\n\
             Intersection A ⋂ B: 1\n\
             Symmetric Difference A ∆ B: 1\n\
             Difference A - B: 0\n\
             Difference B - A: 1"
        );
    }

    #[test]
    fn test_each_operation() {
        let a = records(&["Shared", "Only A", "only a"]);
        let b = records(&["shared!", "Only B"]);
        let comparison = SetComparison::new(&a, &b);

        assert_eq!(titles(comparison.get(Operation::DifferenceAMinusB)), vec!["Only A"]);
        assert_eq!(titles(comparison.get(Operation::DifferenceBMinusA)), vec!["Only B"]);
        assert_eq!(titles(comparison.get(Operation::Intersection)), vec!["Shared"]);
        assert_eq!(
            titles(comparison.get(Operation::SymmetricDifference)),
            vec!["Only A", "Only B"]
        );
        assert_eq!(
            titles(comparison.get(Operation::Union)),
            vec!["Only A", "Only B", "Shared"]
        );

        let summary = comparison.summary();
        assert_eq!(summary.total_a, 3);
        assert_eq!(summary.total_b, 2);
        assert_eq!(summary.union, 3);
    }

    #[test]
    fn test_shared_titles_keep_a_representative() {
        let a = records(&["<i>Shared</i> Title"]);
        let b = records(&["shared title", "x", "y", "z"]);
        let comparison = SetComparison::new(&a, &b);

        for op in [Operation::Intersection, Operation::Union] {
            let shared = comparison
                .get(op)
                .get(&Record::from("shared title"))
                .unwrap();
            assert_eq!(shared.title(), "<i>Shared</i> Title");
        }
    }

    #[test]
    fn test_union_keeps_a_representative_when_b_is_larger() {
        let a = records(&["<i>Shared</i> Title"]);
        let b = records(&["shared title", "x", "y"]);

        let (union, _) = compare(&a, &b, Operation::Union);
        let shared = union.get(&Record::from("shared title")).unwrap();
        assert_eq!(shared.title(), "<i>Shared</i> Title");
        assert_eq!(union.len(), 3);
    }

    #[test]
    fn test_inputs_are_not_modified() {
        let a = records(&["One", "one", "Two"]);
        let b = records(&["Two"]);
        let before = (a.clone(), b.clone());
        let _ = compare(&a, &b, Operation::Union);
        assert_eq!(a.len(), before.0.len());
        assert_eq!(b.len(), before.1.len());
        assert_eq!(a[1].title(), "one");
    }

    #[test]
    fn test_empty_collections() {
        let (result, summary) = compare(&[], &[], Operation::Union);
        assert!(result.is_empty());
        assert!(summary.starts_with("Total titles in A: 0\nTotal titles in B: 0\n"));
    }

    #[rstest]
    #[case("B-A", Operation::DifferenceBMinusA)]
    #[case("A-B", Operation::DifferenceAMinusB)]
    #[case("AUB", Operation::Union)]
    #[case("A^B", Operation::SymmetricDifference)]
    #[case("A⋂B", Operation::Intersection)]
    #[case("b-minus-a", Operation::DifferenceBMinusA)]
    #[case("Symmetric-Difference", Operation::SymmetricDifference)]
    #[case(" intersection ", Operation::Intersection)]
    fn test_operation_from_str(#[case] input: &str, #[case] expected: Operation) {
        assert_eq!(input.parse::<Operation>().unwrap(), expected);
    }

    #[test]
    fn test_operation_from_str_unknown() {
        let err = "A*B".parse::<Operation>().unwrap_err();
        assert!(matches!(err, CompareError::UnknownOperation(ref s) if s == "A*B"));
    }

    #[test]
    fn test_unknown_selector_yields_empty_set() {
        // Lenient selector contract: an unknown selector is a silent no-op,
        // not an error. The summary is still computed.
        let a = records(&["One"]);
        let b = records(&["Two"]);

        let (result, summary) = compare_with_selector(&a, &b, "not-an-operation");
        assert!(result.is_empty());
        assert!(summary.contains("Union A ⋃ B: 2"));

        let (result, _) = compare_with_selector(&a, &b, "AUB");
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_operation_default_and_labels() {
        assert_eq!(Operation::default(), Operation::DifferenceBMinusA);
        assert_eq!(Operation::Union.to_string(), "Union: A ⋃ B");
        for op in Operation::ALL {
            assert_eq!(op.selector().parse::<Operation>().unwrap(), op);
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_order_records_is_stable() {
        let set: HashSet<Record> = records(&["b", "A", "c"]).into_iter().collect();
        assert_eq!(titles(&set), vec!["A", "b", "c"]);
    }

    proptest! {
        #[test]
        fn prop_set_algebra(
            a in prop::collection::vec("[a-dA-D .]{0,3}", 0..12),
            b in prop::collection::vec("[a-dA-D .]{0,3}", 0..12),
        ) {
            let a: Vec<Record> = a.into_iter().map(Record::from).collect();
            let b: Vec<Record> = b.into_iter().map(Record::from).collect();
            let set_a: HashSet<&Record> = a.iter().collect();
            let set_b: HashSet<&Record> = b.iter().collect();

            let comparison = SetComparison::new(&a, &b);
            let summary = comparison.summary();

            prop_assert_eq!(summary.union, set_a.len() + set_b.len() - summary.intersection);

            let a_minus_b = comparison.get(Operation::DifferenceAMinusB);
            let b_minus_a = comparison.get(Operation::DifferenceBMinusA);
            let expected_sym: HashSet<Record> = a_minus_b.union(b_minus_a).cloned().collect();
            prop_assert_eq!(comparison.get(Operation::SymmetricDifference), &expected_sym);

            let intersection = comparison.get(Operation::Intersection);
            prop_assert!(intersection.is_disjoint(a_minus_b));
            prop_assert!(intersection.is_disjoint(b_minus_a));
        }
    }
}
