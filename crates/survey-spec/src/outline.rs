//! Dense 1-based ordering for one scope: the top level of a survey, or the
//! questions of a single group.

use std::borrow::Cow;

use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::spec::id::EntryId;

/// Anything that carries a stable key and a rank inside its scope.
pub trait Ordered {
    fn id(&self) -> EntryId;
    fn order(&self) -> u32;
    fn set_order(&mut self, order: u32);
}

/// Ordered collection whose `order` values read `1..=len` once built
/// through [`OrderedList::from_unordered`] or edited through its methods.
///
/// Items are stored in rank order, so a position in the list is the
/// position in the rendered sequence. A deserialized list keeps the host's
/// array order and `order` values untouched until it is normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedList<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Ordered> OrderedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorts by the incoming `order` (stable, so ties keep input order) and
    /// closes any gaps.
    pub fn from_unordered(items: Vec<T>) -> Self {
        let mut list = Self { items };
        list.normalize();
        list
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, position: usize) -> Option<&T> {
        self.items.get(position)
    }

    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn find(&self, id: EntryId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub(crate) fn find_mut(&mut self, id: EntryId) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Rank the next appended item receives.
    pub fn next_order(&self) -> u32 {
        rank(self.items.len())
    }

    /// Appends at the end. Existing ranks are untouched.
    pub fn push(&mut self, mut item: T) -> u32 {
        let order = self.next_order();
        item.set_order(order);
        self.items.push(item);
        order
    }

    /// Removes the item with `id` and closes the gap it leaves.
    pub fn remove(&mut self, id: EntryId) -> Option<T> {
        let position = self.position(id)?;
        self.remove_at(position)
    }

    /// Removes the item at a 0-based position and closes the gap it leaves.
    pub fn remove_at(&mut self, position: usize) -> Option<T> {
        if position >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(position);
        self.renumber();
        Some(removed)
    }

    /// Rewrites every rank from the current position.
    pub fn renumber(&mut self) {
        for (position, item) in self.items.iter_mut().enumerate() {
            item.set_order(rank(position));
        }
    }

    pub fn is_dense(&self) -> bool {
        self.items
            .iter()
            .enumerate()
            .all(|(position, item)| item.order() == rank(position))
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Sorts by the current `order` values and renumbers in place.
    pub fn normalize(&mut self) {
        self.items.sort_by_key(|item| item.order());
        self.renumber();
    }
}

impl<T: Ordered> From<Vec<T>> for OrderedList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_unordered(items)
    }
}

impl<'a, T> IntoIterator for &'a OrderedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for OrderedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for OrderedList<T>
where
    T: Ordered + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(|items| Self { items })
    }
}

impl<T: JsonSchema> JsonSchema for OrderedList<T> {
    fn inline_schema() -> bool {
        Vec::<T>::inline_schema()
    }

    fn schema_name() -> Cow<'static, str> {
        Vec::<T>::schema_name()
    }

    fn schema_id() -> Cow<'static, str> {
        Vec::<T>::schema_id()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        Vec::<T>::json_schema(generator)
    }
}

/// 1-based rank for a 0-based position.
pub(crate) fn rank(position: usize) -> u32 {
    u32::try_from(position).map_or(u32::MAX, |position| position.saturating_add(1))
}
