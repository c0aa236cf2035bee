use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::ScreenProfile;
use crate::error::{Result, StorageError};
use crate::widget::{OwnedWidgetRef, WidgetHost, WidgetKind};

/// How many of a set's visible slots hold an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillState {
    Empty,
    Partial,
    Full,
}

impl FillState {
    pub const ALL: [FillState; 3] = [FillState::Empty, FillState::Partial, FillState::Full];

    /// Zero slots count as empty.
    pub fn from_counts(filled: usize, total: usize) -> Self {
        if total == 0 || filled == 0 {
            FillState::Empty
        } else if filled == total {
            FillState::Full
        } else {
            FillState::Partial
        }
    }
}

/// Half of a shared row a set occupies. Full-width sets report `Left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Column {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct StorageSet<W> {
    pub outline: OwnedWidgetRef<W>,
    pub arrow: OwnedWidgetRef<W>,
    pub footer: OwnedWidgetRef<W>,
    pub header: OwnedWidgetRef<W>,
    pub items: Vec<OwnedWidgetRef<W>>,
    pub name: Option<String>,
    pub fill: FillState,
    pub collapsible: bool,
    /// Written by the packer; only meaningful within one pass.
    pub column: Column,
}

impl<W> StorageSet<W> {
    /// Frame widgets first, then the item slots.
    pub fn refs(&self) -> impl Iterator<Item = &OwnedWidgetRef<W>> {
        [&self.outline, &self.arrow, &self.footer, &self.header]
            .into_iter()
            .chain(self.items.iter())
    }

    /// Lexicographic by name; a missing name ties with anything.
    pub fn cmp_name(&self, other: &Self) -> Ordering {
        match (&self.name, &other.name) {
            (Some(a), Some(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Stable insertion sort by [`StorageSet::cmp_name`].
///
/// The name order is not total once unnamed sets appear, so this only ever
/// moves a set past strictly greater neighbours.
pub fn sort_by_name<W>(sets: &[StorageSet<W>], order: &mut [usize]) {
    for i in 1..order.len() {
        let mut j = i;
        while j > 0 && sets[order[j]].cmp_name(&sets[order[j - 1]]) == Ordering::Less {
            order.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Output of one classification scan.
#[derive(Debug, Clone)]
pub struct Classification<W> {
    pub sets: Vec<StorageSet<W>>,
    pub junk: Vec<OwnedWidgetRef<W>>,
}

impl<W: Copy> Classification<W> {
    /// Moves junk widgets out of view.
    pub fn park_junk<H>(&self, host: &mut H, parked_x: i32)
    where
        H: WidgetHost<Handle = W>,
    {
        for junk in &self.junk {
            host.set_x(junk.handle(), parked_x);
            host.revalidate(junk.handle());
        }
    }
}

pub struct Classifier<'a> {
    profile: &'a ScreenProfile,
}

impl<'a> Classifier<'a> {
    pub fn new(profile: &'a ScreenProfile) -> Self {
        Self { profile }
    }

    /// Reads `children` (in container order) into sets and junk.
    ///
    /// Never writes to the host. Fails when a header is not preceded by three
    /// unclaimed frame siblings.
    pub fn classify<H>(&self, host: &H, children: &[H::Handle]) -> Result<Classification<H::Handle>>
    where
        H: WidgetHost,
    {
        let mut claimed = HashSet::new();
        let mut sets = Vec::new();

        for (index, &child) in children.iter().enumerate() {
            if host.kind(child) != WidgetKind::Text {
                continue;
            }
            if index < 3 {
                return Err(StorageError::MalformedSet {
                    header_index: index,
                    reason: "header has fewer than three preceding siblings",
                });
            }
            if (index - 3..index).any(|i| claimed.contains(&i)) {
                return Err(StorageError::MalformedSet {
                    header_index: index,
                    reason: "set frame overlaps the previous set",
                });
            }

            let set = self.read_set(host, children, index, &mut claimed);
            sets.push(set);
        }

        let junk = children
            .iter()
            .enumerate()
            .filter(|(i, child)| {
                !claimed.contains(i) && host.width(**child) == self.profile.junk_width
            })
            .map(|(_, &child)| OwnedWidgetRef::capture(host, child))
            .collect();

        Ok(Classification { sets, junk })
    }

    fn read_set<H>(
        &self,
        host: &H,
        children: &[H::Handle],
        index: usize,
        claimed: &mut HashSet<usize>,
    ) -> StorageSet<H::Handle>
    where
        H: WidgetHost,
    {
        claimed.extend(index - 3..=index);
        let header = children[index];

        let mut items = Vec::new();
        let mut filled = 0;
        for (offset, &slot) in children[index + 1..].iter().enumerate() {
            if host.width(slot) != self.profile.item_width {
                break;
            }
            claimed.insert(index + 1 + offset);
            if host.is_hidden(slot) {
                continue;
            }
            if host.opacity(slot) == 0 {
                filled += 1;
            }
            items.push(OwnedWidgetRef::capture(host, slot));
        }

        StorageSet {
            outline: OwnedWidgetRef::capture(host, children[index - 3]),
            arrow: OwnedWidgetRef::capture(host, children[index - 2]),
            footer: OwnedWidgetRef::capture(host, children[index - 1]),
            header: OwnedWidgetRef::capture(host, header),
            name: host.text(header),
            fill: FillState::from_counts(filled, items.len()),
            collapsible: items.len() <= self.profile.collapsible_max_items,
            column: Column::Left,
            items,
        }
    }
}
