// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collection iteration.

use super::id::CardId;
use super::store::CardStore;

/// An iterator over cards in collection order.
///
/// Created by [`CardStore::iter`].
#[derive(Debug)]
pub struct Cards<'a> {
    store: &'a CardStore,
    next: usize,
}

impl<'a> Cards<'a> {
    pub(crate) fn new(store: &'a CardStore) -> Self {
        Self { store, next: 0 }
    }
}

impl Iterator for Cards<'_> {
    type Item = CardId;

    fn next(&mut self) -> Option<CardId> {
        let id = self.store.get(self.next)?;
        self.next += 1;
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.store.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cards<'_> {}
