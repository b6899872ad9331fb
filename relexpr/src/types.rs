//! Relational types attached to expressions by the type checker.
//!
//! A [`Type`] is either the formula type or a union of [`ProductType`]s, each being an
//! ordered tuple of signature names. The builders in [`crate::expr`] only need a handful of
//! facts about a type: its arity, whether it is a formula, and the results of the join and
//! product rules.
//!
//! Column matching is by name, with [`UNIV`] acting as a wildcard on either side. Subtype
//! reasoning is the type checker's business and is not modelled here.
use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

/// Name of the universal signature. Matches every column during a join.
pub const UNIV: &str = "univ";

/// An ordered tuple of signature names, e.g. `Person -> Address`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductType {
    columns: SmallVec<[Arc<str>; 2]>,
}

impl ProductType {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Arc<str>] {
        &self.columns
    }

    /// Relational join: drops the last column of `self` and the first of `other`.
    ///
    /// Returns `None` when the joined columns cannot match or the result would have no
    /// columns left.
    fn join(&self, other: &ProductType) -> Option<ProductType> {
        let (last, first) = (self.columns.last()?, other.columns.first()?);
        if self.arity() + other.arity() <= 2 || !columns_match(last, first) {
            return None;
        }
        let columns = self.columns[..self.arity() - 1]
            .iter()
            .chain(other.columns[1..].iter())
            .cloned()
            .collect();
        Some(ProductType { columns })
    }

    fn product(&self, other: &ProductType) -> ProductType {
        ProductType {
            columns: self
                .columns
                .iter()
                .chain(other.columns.iter())
                .cloned()
                .collect(),
        }
    }
}

fn columns_match(a: &str, b: &str) -> bool {
    a == b || a == UNIV || b == UNIV
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str("->")?;
            }
            f.write_str(column)?;
        }
        Ok(())
    }
}

/// The semantic type of an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Type {
    is_formula: bool,
    entries: SmallVec<[ProductType; 1]>,
}

impl Type {
    /// The type of boolean-valued expressions.
    pub fn formula() -> Self {
        Self {
            is_formula: true,
            entries: SmallVec::new(),
        }
    }

    /// The type with no tuples at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A relation type with a single product entry.
    pub fn relation<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self::from_entries([ProductType::new(columns)])
    }

    /// A relation type made of several product entries. Duplicates are dropped.
    pub fn from_entries(entries: impl IntoIterator<Item = ProductType>) -> Self {
        let mut ty = Self::empty();
        for entry in entries {
            ty.push_entry(entry);
        }
        ty
    }

    /// Union of two types. The result is a formula if either side is.
    pub fn union(mut self, other: Type) -> Self {
        self.is_formula |= other.is_formula;
        for entry in other.entries {
            self.push_entry(entry);
        }
        self
    }

    fn push_entry(&mut self, entry: ProductType) {
        if entry.arity() > 0 && !self.entries.contains(&entry) {
            self.entries.push(entry);
        }
    }

    pub fn is_formula(&self) -> bool {
        self.is_formula
    }

    pub fn entries(&self) -> &[ProductType] {
        &self.entries
    }

    /// The common arity of every entry.
    ///
    /// Formulas, empty types, and unions mixing arities all report 0, which no typed
    /// builder accepts as a relation operand.
    pub fn arity(&self) -> usize {
        let mut arities = self.entries.iter().map(ProductType::arity);
        match arities.next() {
            Some(first) if arities.all(|a| a == first) => first,
            _ => 0,
        }
    }

    /// Relational join of every pair of entries. Pairs that cannot join are skipped.
    pub fn join(&self, other: &Type) -> Type {
        Type::from_entries(
            self.entries
                .iter()
                .flat_map(|a| other.entries.iter().filter_map(move |b| a.join(b))),
        )
    }

    /// Cross product of every pair of entries, regardless of whether either side may be
    /// empty at runtime.
    pub fn product(&self, other: &Type) -> Type {
        Type::from_entries(
            self.entries
                .iter()
                .flat_map(|a| other.entries.iter().map(move |b| a.product(b))),
        )
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_formula && self.entries.is_empty() {
            return f.write_str("formula");
        }
        f.write_str("{")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{entry}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_drops_matching_columns() {
        let owns = Type::relation(["Person", "Car"]);
        let made_by = Type::relation(["Car", "Maker"]);
        let joined = owns.join(&made_by);
        assert_eq!(joined, Type::relation(["Person", "Maker"]));
        assert_eq!(joined.arity(), 2);
    }

    #[test]
    fn join_of_two_sets_is_empty() {
        let a = Type::relation(["Person"]);
        assert_eq!(a.join(&a).arity(), 0);
    }

    #[test]
    fn univ_matches_any_column() {
        let field = Type::relation(["univ", "Name"]);
        let people = Type::relation(["Person"]);
        assert_eq!(people.join(&field), Type::relation(["Name"]));
    }

    #[test]
    fn mixed_arity_union_has_no_arity() {
        let t = Type::relation(["A"]).union(Type::relation(["A", "B"]));
        assert_eq!(t.entries().len(), 2);
        assert_eq!(t.arity(), 0);
    }

    #[test]
    fn product_concatenates_all_pairs() {
        let t = Type::relation(["A"])
            .union(Type::relation(["B"]))
            .product(&Type::relation(["C"]));
        assert_eq!(t.entries().len(), 2);
        assert_eq!(t.arity(), 2);
        assert_eq!(t.to_string(), "{A->C, B->C}");
    }
}
