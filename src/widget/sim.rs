//! In-memory widget host.
//!
//! Builds the child sequence a storage screen presents (three frame widgets,
//! a text header and a run of item slots per set) so passes can be driven and
//! inspected without a live client.

use serde::Serialize;

use crate::classify::FillState;
use crate::geometry::{PositionMode, SizeMode};

use super::host::{DividerSpec, HoverShade, WidgetHost, WidgetKind};

const ROW_HEIGHT: i32 = 60;
const ITEM_PITCH: i32 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WidgetId(usize);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimWidget {
    pub kind: WidgetKind,
    pub text: Option<String>,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub opacity: u8,
    pub visual_id: i32,
    pub hidden: bool,
    pub width_mode: SizeMode,
    pub x_mode: PositionMode,
    pub hover: Option<HoverShade>,
    #[serde(skip)]
    pub revalidations: u32,
}

impl SimWidget {
    pub fn new(kind: WidgetKind, width: i32) -> Self {
        Self {
            kind,
            text: None,
            x: 0,
            y: 0,
            width,
            height: 0,
            opacity: 0,
            visual_id: -1,
            hidden: false,
            width_mode: SizeMode::Absolute,
            x_mode: PositionMode::Left,
            hover: None,
            revalidations: 0,
        }
    }

    fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    fn sized(mut self, height: i32) -> Self {
        self.height = height;
        self
    }

    fn stretched(mut self, x_mode: PositionMode) -> Self {
        self.width_mode = SizeMode::Minus;
        self.x_mode = x_mode;
        self
    }
}

/// Item slot state used when building a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Opacity 0: the item is in storage.
    Stored,
    /// Faded placeholder.
    Empty,
    /// Slot widget exists but is hidden.
    Hidden,
}

/// Handles of the widgets making up one pushed set.
#[derive(Debug, Clone)]
pub struct SetWidgets {
    pub outline: WidgetId,
    pub arrow: WidgetId,
    pub footer: WidgetId,
    pub header: WidgetId,
    pub items: Vec<WidgetId>,
}

impl SetWidgets {
    pub fn all(&self) -> Vec<WidgetId> {
        let mut all = vec![self.outline, self.arrow, self.footer, self.header];
        all.extend(&self.items);
        all
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimControl {
    pub fill: FillState,
    pub widget: WidgetId,
    pub checked: bool,
}

#[derive(Debug, Clone)]
pub struct SimulatedHost {
    widgets: Vec<SimWidget>,
    container: Option<WidgetId>,
    children: Vec<WidgetId>,
    title: Option<String>,
    scroll_height: i32,
    chrome_height: i32,
    controls: Vec<SimControl>,
    rows: i32,
    scroll_refreshes: u32,
}

#[derive(Serialize)]
struct TreeView<'a> {
    widgets: &'a [SimWidget],
    children: &'a [WidgetId],
    scroll_height: i32,
    chrome_height: i32,
}

impl SimulatedHost {
    /// A loaded storage screen with the given title and an empty container.
    pub fn new(title: &str) -> Self {
        let container = SimWidget::new(WidgetKind::Layer, 420).sized(300);
        Self {
            widgets: vec![container],
            container: Some(WidgetId(0)),
            children: Vec::new(),
            title: Some(title.to_string()),
            scroll_height: 0,
            chrome_height: 0,
            controls: Vec::new(),
            rows: 0,
            scroll_refreshes: 0,
        }
    }

    pub fn with_container_height(mut self, height: i32) -> Self {
        if let Some(id) = self.container {
            self.widgets[id.0].height = height;
        }
        self
    }

    pub fn with_scroll_height(mut self, height: i32) -> Self {
        self.scroll_height = height;
        self
    }

    pub fn push_set(&mut self, name: &str, slots: &[Slot]) -> SetWidgets {
        self.push_set_titled(Some(name.to_string()), slots)
    }

    pub fn push_unnamed_set(&mut self, slots: &[Slot]) -> SetWidgets {
        self.push_set_titled(None, slots)
    }

    fn push_set_titled(&mut self, name: Option<String>, slots: &[Slot]) -> SetWidgets {
        let top = self.rows * ROW_HEIGHT;
        self.rows += 1;

        let mut outline = SimWidget::new(WidgetKind::Graphic, 0)
            .at(0, top)
            .sized(57)
            .stretched(PositionMode::Center);
        outline.visual_id = 1000;
        let outline = self.push_child(outline);

        let mut arrow = SimWidget::new(WidgetKind::Graphic, 16).at(3, top + 5).sized(16);
        arrow.visual_id = 1001;
        let arrow = self.push_child(arrow);

        let mut footer = SimWidget::new(WidgetKind::Graphic, 0)
            .at(0, top + 40)
            .sized(17)
            .stretched(PositionMode::Center);
        footer.visual_id = 1002;
        let footer = self.push_child(footer);

        let mut header = SimWidget::new(WidgetKind::Text, 3)
            .at(0, top)
            .sized(20)
            .stretched(PositionMode::Right);
        header.text = name;
        let header = self.push_child(header);

        let items = slots
            .iter()
            .enumerate()
            .map(|(j, slot)| {
                let mut item = SimWidget::new(WidgetKind::Graphic, 36)
                    .at(3 + ITEM_PITCH * j as i32, top + 20)
                    .sized(32);
                item.visual_id = 2000 + j as i32;
                match slot {
                    Slot::Stored => item.opacity = 0,
                    Slot::Empty => item.opacity = 150,
                    Slot::Hidden => item.hidden = true,
                }
                self.push_child(item)
            })
            .collect();

        SetWidgets {
            outline,
            arrow,
            footer,
            header,
            items,
        }
    }

    /// Decorative divider the screen places between sets.
    pub fn push_junk(&mut self) -> WidgetId {
        let top = self.rows * ROW_HEIGHT;
        self.push_child(SimWidget::new(WidgetKind::Graphic, 16).at(194, top).sized(57))
    }

    /// Appends an arbitrary widget to the sets container.
    pub fn push_child(&mut self, widget: SimWidget) -> WidgetId {
        let id = self.push_detached(widget);
        self.children.push(id);
        id
    }

    fn push_detached(&mut self, widget: SimWidget) -> WidgetId {
        self.widgets.push(widget);
        WidgetId(self.widgets.len() - 1)
    }

    pub fn widget(&self, id: WidgetId) -> &SimWidget {
        &self.widgets[id.0]
    }

    pub fn set_title(&mut self, title: Option<&str>) {
        self.title = title.map(String::from);
    }

    /// Drops the container, as when the screen is not open.
    pub fn unload(&mut self) {
        self.container = None;
        self.title = None;
    }

    /// Simulates the pointer entering or leaving a widget.
    pub fn hover(&mut self, id: WidgetId, entered: bool) {
        let widget = &mut self.widgets[id.0];
        if let Some(shade) = widget.hover {
            widget.opacity = if entered {
                shade.on_enter()
            } else {
                shade.on_leave()
            };
        }
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn chrome_height(&self) -> i32 {
        self.chrome_height
    }

    pub fn scroll_refreshes(&self) -> u32 {
        self.scroll_refreshes
    }

    pub fn controls(&self) -> &[SimControl] {
        &self.controls
    }

    pub fn control(&self, fill: FillState) -> Option<SimControl> {
        self.controls.iter().copied().find(|c| c.fill == fill)
    }

    /// Hash of every widget attribute plus the scroll and chrome sizes.
    pub fn fingerprint(&self) -> blake3::Hash {
        let view = TreeView {
            widgets: &self.widgets,
            children: &self.children,
            scroll_height: self.scroll_height,
            chrome_height: self.chrome_height,
        };
        let bytes = serde_json::to_vec(&view).unwrap_or_default();
        blake3::hash(&bytes)
    }
}

impl WidgetHost for SimulatedHost {
    type Handle = WidgetId;

    fn sets_container(&self) -> Option<WidgetId> {
        self.container
    }

    fn title_text(&self) -> Option<String> {
        self.title.clone()
    }

    fn children(&self, parent: WidgetId) -> Vec<WidgetId> {
        if Some(parent) == self.container {
            self.children.clone()
        } else {
            Vec::new()
        }
    }

    fn kind(&self, widget: WidgetId) -> WidgetKind {
        self.widgets[widget.0].kind
    }

    fn text(&self, widget: WidgetId) -> Option<String> {
        self.widgets[widget.0].text.clone()
    }

    fn x(&self, widget: WidgetId) -> i32 {
        self.widgets[widget.0].x
    }

    fn y(&self, widget: WidgetId) -> i32 {
        self.widgets[widget.0].y
    }

    fn width(&self, widget: WidgetId) -> i32 {
        self.widgets[widget.0].width
    }

    fn height(&self, widget: WidgetId) -> i32 {
        self.widgets[widget.0].height
    }

    fn opacity(&self, widget: WidgetId) -> u8 {
        self.widgets[widget.0].opacity
    }

    fn visual_id(&self, widget: WidgetId) -> i32 {
        self.widgets[widget.0].visual_id
    }

    fn is_hidden(&self, widget: WidgetId) -> bool {
        self.widgets[widget.0].hidden
    }

    fn width_mode(&self, widget: WidgetId) -> SizeMode {
        self.widgets[widget.0].width_mode
    }

    fn x_position_mode(&self, widget: WidgetId) -> PositionMode {
        self.widgets[widget.0].x_mode
    }

    fn scroll_height(&self, _container: WidgetId) -> i32 {
        self.scroll_height
    }

    fn set_x(&mut self, widget: WidgetId, x: i32) {
        self.widgets[widget.0].x = x;
    }

    fn set_y(&mut self, widget: WidgetId, y: i32) {
        self.widgets[widget.0].y = y;
    }

    fn set_width(&mut self, widget: WidgetId, width: i32) {
        self.widgets[widget.0].width = width;
    }

    fn set_opacity(&mut self, widget: WidgetId, opacity: u8) {
        self.widgets[widget.0].opacity = opacity;
    }

    fn set_visual_id(&mut self, widget: WidgetId, visual_id: i32) {
        self.widgets[widget.0].visual_id = visual_id;
    }

    fn set_hidden(&mut self, widget: WidgetId, hidden: bool) {
        self.widgets[widget.0].hidden = hidden;
    }

    fn set_width_mode(&mut self, widget: WidgetId, mode: SizeMode) {
        self.widgets[widget.0].width_mode = mode;
    }

    fn set_x_position_mode(&mut self, widget: WidgetId, mode: PositionMode) {
        self.widgets[widget.0].x_mode = mode;
    }

    fn set_hover_shade(&mut self, widget: WidgetId, shade: Option<HoverShade>) {
        self.widgets[widget.0].hover = shade;
    }

    fn set_scroll_height(&mut self, _container: WidgetId, height: i32) {
        self.scroll_height = height;
    }

    fn revalidate(&mut self, widget: WidgetId) {
        self.widgets[widget.0].revalidations += 1;
    }

    fn revalidate_scroll(&mut self, _container: WidgetId) {
        self.scroll_refreshes += 1;
    }

    fn create_divider(&mut self, _container: WidgetId, spec: DividerSpec) -> WidgetId {
        self.push_child(
            SimWidget::new(WidgetKind::Graphic, spec.width)
                .at(spec.x, 0)
                .sized(spec.height),
        )
    }

    fn adjust_chrome_height(&mut self, delta: i32) {
        self.chrome_height += delta;
    }

    fn create_filter_control(&mut self, fill: FillState, checked: bool) -> WidgetId {
        let widget = self.push_detached(SimWidget::new(WidgetKind::Graphic, 16).sized(16));
        self.controls.push(SimControl {
            fill,
            widget,
            checked,
        });
        widget
    }

    fn set_filter_control_checked(&mut self, control: WidgetId, checked: bool) {
        if let Some(entry) = self.controls.iter_mut().find(|c| c.widget == control) {
            entry.checked = checked;
        }
    }
}
