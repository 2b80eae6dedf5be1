//! ParameterList - ordered collection with physical-equality semantics
//!
//! Membership, removal, and set arithmetic compare by value-and-units
//! equality, never by name or identity. The aggregate `units` and
//! `independent_dimensions` fields are recomputed after every mutation so
//! they can never go stale.

use serde::Serialize;
use std::fmt;
use std::ops::{Add, Index, Sub};
use std::slice::Iter;

use crate::parameter::Parameter;
use crate::units::Units;

/// Ordered, name-addressable parameter collection.
#[derive(Debug, Clone, Serialize, Default)]
pub struct ParameterList {
    items: Vec<Parameter>,
    units: Vec<Units>,
    independent_dimensions: Vec<Units>,
}

impl ParameterList {
    /// Build a collection from parameters or raw `Units` (auto-wrapped into
    /// unit-only parameters).
    pub fn new<I, P>(items: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Parameter>,
    {
        let mut list = Self {
            items: items.into_iter().map(Into::into).collect(),
            units: Vec::new(),
            independent_dimensions: Vec::new(),
        };
        list.recompute();
        list
    }

    fn recompute(&mut self) {
        self.units = self.items.iter().map(|p| p.units).collect();
        self.independent_dimensions.clear();
        for units in &self.units {
            if !self.independent_dimensions.contains(units) {
                self.independent_dimensions.push(*units);
            }
        }
    }

    /// Per-member units, in member order.
    pub fn units(&self) -> &[Units] {
        &self.units
    }

    /// Distinct units across members, in first-seen order. One repeating
    /// variable is needed per entry.
    pub fn independent_dimensions(&self) -> &[Units] {
        &self.independent_dimensions
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Parameter> {
        self.items.get(index)
    }

    /// First member with the given name.
    pub fn get_by_name(&self, name: &str) -> Option<&Parameter> {
        self.items.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn iter(&self) -> Iter<'_, Parameter> {
        self.items.iter()
    }

    pub fn append(&mut self, parameter: Parameter) {
        self.items.push(parameter);
        self.recompute();
    }

    /// Remove the first member equal (by values and units) to `element`.
    /// Removing an absent element is a silent no-op; returns whether a
    /// member was removed. Duplicates beyond the first are left in place.
    pub fn delete(&mut self, element: &Parameter) -> bool {
        if let Some(pos) = self.items.iter().position(|p| p == element) {
            self.items.remove(pos);
            self.recompute();
            true
        } else {
            false
        }
    }

    /// Collapse same-named members down to their first occurrence.
    pub fn dedup_by_name(&mut self) {
        let mut seen: Vec<String> = Vec::new();
        self.items.retain(|p| {
            if seen.iter().any(|n| n == &p.name) {
                false
            } else {
                seen.push(p.name.clone());
                true
            }
        });
        self.recompute();
    }

    /// Membership by value-and-units equality.
    pub fn contains(&self, element: &Parameter) -> bool {
        self.items.iter().any(|p| p == element)
    }

    /// Number of members equal to `element`.
    pub fn count(&self, element: &Parameter) -> usize {
        self.items.iter().filter(|p| *p == element).count()
    }

    /// Number of members sharing a name with `element`.
    pub fn name_count(&self, name: &str) -> usize {
        self.items.iter().filter(|p| p.name == name).count()
    }

    /// Whether any collection in `groups` equals this one.
    pub fn included_within(&self, groups: &[ParameterList]) -> bool {
        groups.iter().any(|g| g == self)
    }
}

impl PartialEq for ParameterList {
    /// Order-insensitive: same length and every member of `self` occurs in
    /// `other` by value-and-units equality.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.items.iter().all(|p| other.contains(p))
    }
}

impl Index<usize> for ParameterList {
    type Output = Parameter;

    fn index(&self, index: usize) -> &Parameter {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a ParameterList {
    type Item = &'a Parameter;
    type IntoIter = Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Add<&ParameterList> for &ParameterList {
    type Output = ParameterList;

    /// Union, duplicates allowed: members of `other` appended in order.
    fn add(self, other: &ParameterList) -> ParameterList {
        ParameterList::new(self.items.iter().chain(other.items.iter()).cloned())
    }
}

impl Add<&Parameter> for &ParameterList {
    type Output = ParameterList;

    fn add(self, other: &Parameter) -> ParameterList {
        ParameterList::new(self.items.iter().cloned().chain(std::iter::once(other.clone())))
    }
}

impl Sub<&ParameterList> for &ParameterList {
    type Output = ParameterList;

    /// List difference: remove one matching instance per element of `other`.
    fn sub(self, other: &ParameterList) -> ParameterList {
        let mut result = self.clone();
        for element in other {
            result.delete(element);
        }
        result
    }
}

impl Sub<&Parameter> for &ParameterList {
    type Output = ParameterList;

    fn sub(self, other: &Parameter) -> ParameterList {
        let mut result = self.clone();
        result.delete(other);
        result
    }
}

impl fmt::Display for ParameterList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Parameter, Parameter, Parameter) {
        (
            Parameter::new("d", vec![1.0, 1.0, 1.0], Units::LENGTH),
            Parameter::new("t", vec![1.0, 1.0, 1.0], Units::TIME),
            Parameter::new("v", vec![1.0, 1.0, 1.0], Units::VELOCITY),
        )
    }

    #[test]
    fn test_independent_dimensions_track_mutations() {
        let (d, t, v) = sample();
        let mut list = ParameterList::new([d.clone(), t.clone()]);
        assert_eq!(list.independent_dimensions().len(), 2);

        list.append(v.clone());
        assert_eq!(list.independent_dimensions().len(), 3);

        // A second length parameter adds no new dimension.
        list.append(Parameter::new("h", vec![2.0, 2.0, 2.0], Units::LENGTH));
        assert_eq!(list.independent_dimensions().len(), 3);

        list.delete(&v);
        assert_eq!(list.independent_dimensions().len(), 2);
        assert_eq!(list.units().len(), 3);
    }

    #[test]
    fn test_delete_removes_first_match_only() {
        let (d, _, _) = sample();
        let dup = Parameter::new("d2", vec![1.0, 1.0, 1.0], Units::LENGTH);
        let mut list = ParameterList::new([d.clone(), dup.clone()]);
        // dup equals d by values and units, so the list holds two matches.
        assert_eq!(list.count(&d), 2);
        assert!(list.delete(&d));
        assert_eq!(list.len(), 1);
        assert_eq!(list.count(&d), 1);
        // Deleting an absent element is a no-op.
        let t = Parameter::new("t", vec![1.0, 1.0, 1.0], Units::TIME);
        assert!(!list.delete(&t));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_list_difference() {
        let (d, t, v) = sample();
        let problem = ParameterList::new([d.clone(), t.clone(), v.clone()]);
        let remaining = &problem - &ParameterList::new([v, t]);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "d");
        assert_eq!(remaining, ParameterList::new([d]));
    }

    #[test]
    fn test_union_keeps_duplicates_and_order() {
        let (d, t, v) = sample();
        let left = ParameterList::new([d.clone(), t.clone()]);
        let joined = &(&left + &ParameterList::new([v])) + &d;
        assert_eq!(joined.len(), 4);
        assert_eq!(joined.names(), vec!["d", "t", "v", "d"]);
        assert_eq!(joined.count(&d), 2);
    }

    #[test]
    fn test_dedup_by_name_keeps_one_representative() {
        let (d, t, _) = sample();
        let mut list = ParameterList::new([d.clone(), t.clone(), d.clone(), d.clone()]);
        list.dedup_by_name();
        assert_eq!(list.len(), 2);
        assert_eq!(list.name_count("d"), 1);
        assert_eq!(list.names(), vec!["d", "t"]);
    }

    #[test]
    fn test_name_addressing_and_counts() {
        let (d, t, v) = sample();
        let list = ParameterList::new([d.clone(), t, v]);
        assert_eq!(list.get_by_name("v").unwrap().units, Units::VELOCITY);
        assert!(list.get_by_name("x").is_none());
        assert_eq!(list.name_count("d"), 1);
        // t and v have identical values, equality is value+units so count
        // only matches same-units members.
        assert_eq!(list.count(&d), 1);
    }

    #[test]
    fn test_raw_units_are_wrapped() {
        let list = ParameterList::new([Units::LENGTH, Units::TIME]);
        assert_eq!(list.len(), 2);
        assert!(list[0].is_empty());
        assert_eq!(list.independent_dimensions().len(), 2);
    }

    #[test]
    fn test_included_within() {
        let (d, t, v) = sample();
        let subset = ParameterList::new([t.clone(), d.clone()]);
        let groups = vec![
            ParameterList::new([d.clone(), t.clone()]),
            ParameterList::new([v]),
        ];
        // Order-insensitive equality against the first group.
        assert!(subset.included_within(&groups));
        assert!(!ParameterList::new([d]).included_within(&groups));
    }
}
