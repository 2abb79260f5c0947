//! Duplicate detection within a single collection.
//!
//! Two records are duplicates when their normalized titles are identical; see
//! [`Record`]. Detection never removes anything from the collection, it only
//! reports. Removal happens when collections are turned into sets for
//! comparison.
//!
//! ## Usage
//!
//! ```rust
//! use bibcompare::{Record, dedupe::{duplicate_groups, find_duplicates}};
//!
//! let records: Vec<Record> = ["Study One", "study one.", "Study Two", "STUDY ONE"]
//!     .into_iter()
//!     .map(Record::from)
//!     .collect();
//!
//! let duplicates = find_duplicates(&records);
//! assert_eq!(duplicates.len(), 1);
//!
//! let groups = duplicate_groups(&records);
//! assert_eq!(groups[0].unique.title(), "Study One");
//! assert_eq!(groups[0].duplicates.len(), 2);
//! ```

use crate::Record;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A title that occurs more than once in a collection.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    /// The first occurrence in input order.
    pub unique: Record,
    /// Every later occurrence, in input order.
    pub duplicates: Vec<Record>,
}

/// Find the records that repeat an earlier record of the same collection.
///
/// Records are scanned in input order. A record goes into the result when an
/// equivalent record has already been seen, and since the result is a set each
/// duplicated title appears once no matter how often it repeats. The retained
/// representative is the second occurrence.
///
/// Returns an empty set when every title is distinct.
pub fn find_duplicates(records: &[Record]) -> HashSet<Record> {
    let mut seen: HashSet<&Record> = HashSet::with_capacity(records.len());
    let mut duplicates = HashSet::new();

    for record in records {
        if !seen.insert(record) && !duplicates.contains(record) {
            duplicates.insert(record.clone());
        }
    }

    duplicates
}

/// Group every occurrence of each duplicated title.
///
/// Groups are ordered by the position of their first occurrence. Titles that
/// occur only once are not reported.
pub fn duplicate_groups(records: &[Record]) -> Vec<DuplicateGroup> {
    let mut index_of: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    let mut groups: Vec<(&Record, Vec<&Record>)> = Vec::new();

    for record in records {
        match index_of.get(record.normalized_title()) {
            Some(&i) => groups[i].1.push(record),
            None => {
                index_of.insert(record.normalized_title(), groups.len());
                groups.push((record, Vec::new()));
            }
        }
    }

    groups
        .into_iter()
        .filter(|(_, duplicates)| !duplicates.is_empty())
        .map(|(unique, duplicates)| DuplicateGroup {
            unique: unique.clone(),
            duplicates: duplicates.into_iter().cloned().collect(),
        })
        .collect()
}
