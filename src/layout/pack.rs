//! Row packing.
//!
//! Visible sets are walked in name order and greedily paired: two consecutive
//! collapsible sets share a row, anything else takes a full row. Pairing only
//! ever looks at the immediate neighbour, so a collapsible set next to a large
//! one stays full width.

use crate::classify::{Column, StorageSet, sort_by_name};
use crate::filter::FilterState;

/// Where a set lands within its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSlot {
    Full,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index into the classified set list.
    pub set: usize,
    pub row: usize,
    pub slot: RowSlot,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackPlan {
    /// Visible sets in display order.
    pub placements: Vec<Placement>,
    pub hidden: Vec<usize>,
    pub rows: usize,
}

impl PackPlan {
    /// Scrollable height for the packed rows, or 0 when the container is
    /// already tall enough to show them without scrolling.
    ///
    /// An intrinsic height exactly equal to the rows' height counts as tall
    /// enough. Either way nothing scrolls, so only the reported value differs.
    pub fn content_height(&self, row_height: i32, trim: i32, intrinsic: i32) -> i32 {
        let needed = self.rows as i32 * row_height - trim;
        if intrinsic >= needed { 0 } else { needed }
    }
}

/// Partitions, sorts and packs `sets`, recording each set's column.
pub fn pack_rows<W>(sets: &mut [StorageSet<W>], filters: &FilterState) -> PackPlan {
    let (mut visible, hidden): (Vec<usize>, Vec<usize>) =
        (0..sets.len()).partition(|&i| filters.shows(sets[i].fill));
    sort_by_name(sets, &mut visible);

    for set in sets.iter_mut() {
        set.column = Column::Left;
    }

    let mut plan = PackPlan {
        placements: Vec::with_capacity(visible.len()),
        hidden,
        rows: 0,
    };

    for (pos, &idx) in visible.iter().enumerate() {
        let current = &sets[idx];
        let pairs_with_previous = pos > 0 && {
            let previous = &sets[visible[pos - 1]];
            previous.collapsible && previous.column == Column::Left
        };
        let pairs_with_next = visible
            .get(pos + 1)
            .is_some_and(|&next| sets[next].collapsible);

        let slot = if current.collapsible && pairs_with_previous {
            RowSlot::Right
        } else if current.collapsible && pairs_with_next {
            RowSlot::Left
        } else {
            RowSlot::Full
        };

        let row = match slot {
            RowSlot::Right => {
                sets[idx].column = Column::Right;
                plan.rows - 1
            }
            RowSlot::Left | RowSlot::Full => {
                plan.rows += 1;
                plan.rows - 1
            }
        };

        plan.placements.push(Placement {
            set: idx,
            row,
            slot,
        });
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Classifier, FillState};
    use crate::config::{MemoryStore, ScreenProfile};
    use crate::widget::{SimulatedHost, Slot, WidgetHost, WidgetId};

    fn sets_of(host: &SimulatedHost) -> Vec<StorageSet<WidgetId>> {
        let profile = ScreenProfile::default();
        let container = host.sets_container().unwrap();
        Classifier::new(&profile)
            .classify(host, &host.children(container))
            .unwrap()
            .sets
    }

    fn slots(plan: &PackPlan) -> Vec<(usize, usize, RowSlot)> {
        plan.placements
            .iter()
            .map(|p| (p.set, p.row, p.slot))
            .collect()
    }

    #[test]
    fn two_small_sets_share_a_row() {
        let mut host = SimulatedHost::new("Cape Rack");
        host.push_set("A", &[Slot::Stored; 2]);
        host.push_set("B", &[Slot::Stored; 4]);
        host.push_set("C", &[Slot::Stored; 6]);

        let mut sets = sets_of(&host);
        let plan = pack_rows(&mut sets, &FilterState::default());

        assert_eq!(
            slots(&plan),
            vec![
                (0, 0, RowSlot::Left),
                (1, 0, RowSlot::Right),
                (2, 1, RowSlot::Full)
            ]
        );
        assert_eq!(plan.rows, 2);
        assert_eq!(sets[1].column, Column::Right);
        assert_eq!(sets[0].column, Column::Left);
    }

    #[test]
    fn pairing_never_skips_ahead() {
        let mut host = SimulatedHost::new("Cape Rack");
        host.push_set("A", &[Slot::Stored; 2]);
        host.push_set("B", &[Slot::Stored; 6]);
        host.push_set("C", &[Slot::Stored; 1]);
        host.push_set("D", &[Slot::Stored; 1]);
        host.push_set("E", &[Slot::Stored; 1]);

        let mut sets = sets_of(&host);
        let plan = pack_rows(&mut sets, &FilterState::default());

        assert_eq!(
            slots(&plan),
            vec![
                (0, 0, RowSlot::Full),
                (1, 1, RowSlot::Full),
                (2, 2, RowSlot::Left),
                (3, 2, RowSlot::Right),
                (4, 3, RowSlot::Full)
            ]
        );
    }

    #[test]
    fn visible_sets_pack_in_name_order() {
        let mut host = SimulatedHost::new("Cape Rack");
        host.push_set("Zamorak", &[Slot::Stored; 6]);
        host.push_set("Armadyl", &[Slot::Stored; 6]);

        let mut sets = sets_of(&host);
        let plan = pack_rows(&mut sets, &FilterState::default());
        assert_eq!(plan.placements[0].set, 1);
        assert_eq!(plan.placements[1].set, 0);
    }

    #[test]
    fn hiding_empty_sets_frees_their_rows() {
        use Slot::*;
        let mut host = SimulatedHost::new("Cape Rack");
        host.push_set("A full", &[Stored; 6]);
        host.push_set("B empty", &[Empty; 6]);
        host.push_set("C partial", &[Stored, Empty, Empty, Empty, Empty, Empty]);

        let mut sets = sets_of(&host);
        let all = pack_rows(&mut sets, &FilterState::default());
        assert_eq!(all.rows, 3);

        let mut filters = FilterState::default();
        filters.toggle(FillState::Empty, &mut MemoryStore::new()).unwrap();
        let filtered = pack_rows(&mut sets, &filters);

        assert_eq!(filtered.hidden, vec![1]);
        assert_eq!(filtered.rows, 2);
        assert_eq!(
            slots(&filtered),
            vec![(0, 0, RowSlot::Full), (2, 1, RowSlot::Full)]
        );
    }

    #[test]
    fn columns_reset_between_passes() {
        let mut host = SimulatedHost::new("Cape Rack");
        host.push_set("A", &[Slot::Stored]);
        host.push_set("B", &[Slot::Stored]);

        let mut sets = sets_of(&host);
        pack_rows(&mut sets, &FilterState::default());
        assert_eq!(sets[1].column, Column::Right);

        let mut filters = FilterState::default();
        filters.toggle(FillState::Full, &mut MemoryStore::new()).unwrap();
        pack_rows(&mut sets, &filters);
        assert_eq!(sets[1].column, Column::Left);
    }

    #[test]
    fn content_height_collapses_when_everything_fits() {
        let plan = PackPlan {
            rows: 4,
            ..PackPlan::default()
        };
        assert_eq!(plan.content_height(60, 3, 200), 237);
        assert_eq!(plan.content_height(60, 3, 237), 0);
        assert_eq!(plan.content_height(60, 3, 300), 0);
        assert_eq!(PackPlan::default().content_height(60, 3, 0), 0);
    }
}
