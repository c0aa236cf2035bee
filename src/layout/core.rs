use crate::classify::StorageSet;
use crate::config::{ScreenProfile, ShadingPalette};
use crate::filter::FilterState;
use crate::geometry::{PositionMode, SizeMode, Span};
use crate::widget::{DividerSpec, WidgetHost};

use super::pack::{PackPlan, RowSlot, pack_rows};

/// Result of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    pub visible: usize,
    pub hidden: usize,
    pub rows: usize,
    pub content_height: i32,
}

/// Frame geometry for one row slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameGeometry {
    outline: Span,
    header: Span,
    footer: Span,
    arrow_x: i32,
    items_x: i32,
}

fn frame_geometry(slot: RowSlot, profile: &ScreenProfile) -> FrameGeometry {
    use PositionMode::*;
    use SizeMode::*;

    let half = profile.half_width;
    let header_half = profile.header_half_width;
    match slot {
        RowSlot::Full => FrameGeometry {
            outline: Span::new(0, Minus, Center),
            header: Span::new(profile.header_inset, Minus, Right).at(0),
            footer: Span::new(0, Minus, Center),
            arrow_x: profile.left_column_x,
            items_x: profile.left_column_x,
        },
        RowSlot::Left => FrameGeometry {
            outline: Span::new(half, Absolute, Left),
            header: Span::new(header_half, Absolute, Left).at(profile.left_column_x),
            footer: Span::new(half, Absolute, Left),
            arrow_x: profile.collapsed_arrow_x,
            items_x: profile.left_column_x,
        },
        RowSlot::Right => FrameGeometry {
            outline: Span::new(half, Minus, Right),
            header: Span::new(header_half, Absolute, Left).at(profile.right_column_x),
            footer: Span::new(half, Minus, Right),
            arrow_x: profile.left_column_x,
            items_x: profile.right_column_x,
        },
    }
}

fn apply_span<H: WidgetHost>(host: &mut H, widget: H::Handle, span: Span) {
    host.set_width(widget, span.width);
    host.set_width_mode(widget, span.width_mode);
    host.set_x_position_mode(widget, span.x_mode);
    if let Some(x) = span.x {
        host.set_x(widget, x);
    }
}

/// Vertical dividers drawn between paired sets.
///
/// Dividers are created once and reused across passes; restore only hides
/// them.
#[derive(Debug, Clone)]
pub struct DividerPool<W> {
    dividers: Vec<W>,
    in_use: usize,
}

impl<W> Default for DividerPool<W> {
    fn default() -> Self {
        Self {
            dividers: Vec::new(),
            in_use: 0,
        }
    }
}

impl<W: Copy + PartialEq> DividerPool<W> {
    pub fn contains(&self, widget: &W) -> bool {
        self.dividers.contains(widget)
    }

    pub fn len(&self) -> usize {
        self.dividers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dividers.is_empty()
    }

    pub fn place<H>(&mut self, host: &mut H, container: W, profile: &ScreenProfile, y: i32)
    where
        H: WidgetHost<Handle = W>,
    {
        let divider = match self.dividers.get(self.in_use) {
            Some(&divider) => divider,
            None => {
                let spec = DividerSpec {
                    x: profile.divider_x,
                    width: profile.divider_width,
                    height: profile.divider_height,
                };
                let divider = host.create_divider(container, spec);
                self.dividers.push(divider);
                divider
            }
        };
        self.in_use += 1;

        host.set_x(divider, profile.divider_x);
        host.set_y(divider, y);
        host.set_hidden(divider, false);
        host.revalidate(divider);
    }

    pub fn hide_all<H>(&mut self, host: &mut H)
    where
        H: WidgetHost<Handle = W>,
    {
        for &divider in &self.dividers {
            host.set_hidden(divider, true);
            host.revalidate(divider);
        }
        self.in_use = 0;
    }

    /// Drops every handle, for when the host has destroyed the widgets.
    pub fn forget(&mut self) {
        self.dividers.clear();
        self.in_use = 0;
    }
}

/// Packs classified sets into rows and writes the resulting geometry and
/// shading onto their widgets.
pub struct LayoutEngine<'a> {
    profile: &'a ScreenProfile,
    palette: ShadingPalette,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(profile: &'a ScreenProfile, palette: ShadingPalette) -> Self {
        Self { profile, palette }
    }

    pub fn layout<H>(
        &self,
        host: &mut H,
        container: H::Handle,
        sets: &mut [StorageSet<H::Handle>],
        filters: &FilterState,
        dividers: &mut DividerPool<H::Handle>,
    ) -> PassReport
    where
        H: WidgetHost,
    {
        let plan = pack_rows(sets, filters);

        for &idx in &plan.hidden {
            for widget in sets[idx].refs() {
                host.set_hidden(widget.handle(), true);
                host.revalidate(widget.handle());
            }
        }

        for placement in &plan.placements {
            let top = placement.row as i32 * self.profile.row_height;
            let set = &sets[placement.set];
            self.place_set(host, set, placement.slot, top);
            if placement.slot == RowSlot::Right {
                dividers.place(host, container, self.profile, top);
            }
        }

        let content_height = self.apply_scroll(host, container, &plan);

        PassReport {
            visible: plan.placements.len(),
            hidden: plan.hidden.len(),
            rows: plan.rows,
            content_height,
        }
    }

    fn place_set<H>(&self, host: &mut H, set: &StorageSet<H::Handle>, slot: RowSlot, top: i32)
    where
        H: WidgetHost,
    {
        let profile = self.profile;
        let frame = frame_geometry(slot, profile);
        let outline = set.outline.handle();

        apply_span(host, outline, frame.outline);
        apply_span(host, set.header.handle(), frame.header);
        apply_span(host, set.footer.handle(), frame.footer);
        host.set_x(set.arrow.handle(), frame.arrow_x);

        let pitch = profile.item_pitch();
        for (j, item) in set.items.iter().enumerate() {
            host.set_x(item.handle(), frame.items_x + pitch * j as i32);
            host.set_y(item.handle(), top + profile.item_row_offset);
            host.revalidate(item.handle());
        }

        host.set_y(outline, top);
        if let Some(visual_id) = self.palette.visual_for(set.fill) {
            host.set_visual_id(outline, visual_id);
            host.set_opacity(outline, self.palette.normal_opacity);
            if let Some(shade) = self.palette.hover_for(set.fill) {
                host.set_hover_shade(outline, Some(shade));
            }
        }
        host.revalidate(outline);

        host.set_y(set.header.handle(), top);
        host.revalidate(set.header.handle());
        host.set_y(set.arrow.handle(), top + profile.arrow_row_offset);
        host.revalidate(set.arrow.handle());
        host.set_y(set.footer.handle(), top + profile.footer_row_offset);
        host.revalidate(set.footer.handle());
    }

    fn apply_scroll<H>(&self, host: &mut H, container: H::Handle, plan: &PackPlan) -> i32
    where
        H: WidgetHost,
    {
        let height = plan.content_height(
            self.profile.row_height,
            self.profile.content_trim,
            host.height(container),
        );
        host.set_scroll_height(container, height);
        host.revalidate_scroll(container);
        height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Classifier, FillState};
    use crate::config::{MemoryStore, OutlineColor, StorageConfig};
    use crate::widget::{SimulatedHost, Slot, WidgetId};

    struct Fixture {
        host: SimulatedHost,
        profile: ScreenProfile,
        dividers: DividerPool<WidgetId>,
    }

    impl Fixture {
        fn new(host: SimulatedHost) -> Self {
            Self {
                host,
                profile: ScreenProfile::default(),
                dividers: DividerPool::default(),
            }
        }

        fn run(&mut self, config: &StorageConfig, filters: &FilterState) -> PassReport {
            let container = self.host.sets_container().unwrap();
            let children = self.host.children(container);
            let mut sets = Classifier::new(&self.profile)
                .classify(&self.host, &children)
                .unwrap()
                .sets;
            LayoutEngine::new(&self.profile, ShadingPalette::from_config(config)).layout(
                &mut self.host,
                container,
                &mut sets,
                filters,
                &mut self.dividers,
            )
        }
    }

    #[test]
    fn paired_sets_split_the_row() {
        let mut host = SimulatedHost::new("Toy Box");
        let left = host.push_set("A", &[Slot::Stored; 3]);
        let right = host.push_set("B", &[Slot::Empty; 2]);
        let mut fx = Fixture::new(host);

        let report = fx.run(&StorageConfig::default(), &FilterState::default());
        assert_eq!(report.rows, 1);

        let h = &fx.host;
        assert_eq!(h.widget(left.outline).width, 210);
        assert_eq!(h.widget(left.outline).x_mode, PositionMode::Left);
        assert_eq!(h.widget(left.header).x, 3);
        assert_eq!(h.widget(left.arrow).x, 216);
        assert_eq!(h.widget(left.arrow).y, 5);
        assert_eq!(h.widget(left.footer).y, 40);
        assert_eq!(h.widget(left.items[2]).x, 3 + 2 * 42);
        assert_eq!(h.widget(left.items[2]).y, 20);

        assert_eq!(h.widget(right.outline).width_mode, SizeMode::Minus);
        assert_eq!(h.widget(right.outline).x_mode, PositionMode::Right);
        assert_eq!(h.widget(right.header).x, 213);
        assert_eq!(h.widget(right.header).width, 207);
        assert_eq!(h.widget(right.arrow).x, 3);
        assert_eq!(h.widget(right.items[1]).x, 213 + 42);
        assert_eq!(h.widget(right.outline).y, 0);

        assert_eq!(fx.dividers.len(), 1);
    }

    #[test]
    fn full_width_sets_stack_rows() {
        let mut host = SimulatedHost::new("Toy Box");
        host.push_set("A", &[Slot::Stored; 6]);
        let second = host.push_set("B", &[Slot::Stored; 6]);
        let mut fx = Fixture::new(host);

        fx.run(&StorageConfig::default(), &FilterState::default());

        let h = &fx.host;
        assert_eq!(h.widget(second.outline).y, 60);
        assert_eq!(h.widget(second.outline).width, 0);
        assert_eq!(h.widget(second.outline).x_mode, PositionMode::Center);
        assert_eq!(h.widget(second.header).width, 3);
        assert_eq!(h.widget(second.header).x_mode, PositionMode::Right);
        assert_eq!(h.widget(second.items[5]).x, 3 + 5 * 42);
        assert_eq!(h.widget(second.items[5]).y, 80);
        assert!(fx.dividers.is_empty());
    }

    #[test]
    fn shading_follows_fill_state() {
        use Slot::*;
        let mut host = SimulatedHost::new("Toy Box");
        let empty = host.push_set("A", &[Empty; 6]);
        let partial = host.push_set("B", &[Stored, Empty, Empty, Empty, Empty, Empty]);
        let full = host.push_set("C", &[Stored; 6]);
        let mut fx = Fixture::new(host);

        let config = StorageConfig {
            empty_set_color: OutlineColor::Red,
            ..StorageConfig::default()
        };
        fx.run(&config, &FilterState::default());

        let h = &mut fx.host;
        assert_eq!(h.widget(empty.outline).visual_id, -73105);
        assert_eq!(h.widget(empty.outline).opacity, 230);
        assert!(h.widget(empty.outline).hover.is_none());
        assert_eq!(h.widget(partial.outline).visual_id, -73101);
        assert_eq!(h.widget(full.outline).visual_id, -73102);

        h.hover(full.outline, true);
        assert_eq!(h.widget(full.outline).opacity, 210);
        h.hover(full.outline, false);
        assert_eq!(h.widget(full.outline).opacity, 230);
    }

    #[test]
    fn uncoloured_fill_state_keeps_outline() {
        let mut host = SimulatedHost::new("Toy Box");
        let empty = host.push_set("A", &[Slot::Empty; 6]);
        let mut fx = Fixture::new(host);

        fx.run(&StorageConfig::default(), &FilterState::default());
        assert_eq!(fx.host.widget(empty.outline).visual_id, 1000);
        assert_eq!(fx.host.widget(empty.outline).opacity, 0);
    }

    #[test]
    fn hidden_sets_hide_every_widget() {
        let mut host = SimulatedHost::new("Toy Box");
        let full = host.push_set("A", &[Slot::Stored; 6]);
        let empty = host.push_set("B", &[Slot::Empty; 6]);
        let mut fx = Fixture::new(host);

        let mut filters = FilterState::default();
        filters.toggle(FillState::Full, &mut MemoryStore::new()).unwrap();
        let report = fx.run(&StorageConfig::default(), &filters);

        assert_eq!((report.visible, report.hidden, report.rows), (1, 1, 1));
        assert!(full.all().iter().all(|&w| fx.host.widget(w).hidden));
        assert_eq!(fx.host.widget(empty.outline).y, 0);
    }

    #[test]
    fn scroll_height_tracks_rows() {
        let mut host = SimulatedHost::new("Toy Box").with_container_height(100);
        for name in ["A", "B", "C"] {
            host.push_set(name, &[Slot::Stored; 6]);
        }
        let mut fx = Fixture::new(host);

        let report = fx.run(&StorageConfig::default(), &FilterState::default());
        assert_eq!(report.content_height, 177);
        let container = fx.host.sets_container().unwrap();
        assert_eq!(fx.host.scroll_height(container), 177);
        assert_eq!(fx.host.scroll_refreshes(), 1);
    }
}
