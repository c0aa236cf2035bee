use serde::{Deserialize, Serialize};

use crate::classify::FillState;
use crate::filter::Persistence;
use crate::widget::HoverShade;

/// Outline shading choices. Each colour maps to an overriding sprite id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutlineColor {
    Purple,
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    None,
}

impl OutlineColor {
    /// Visual id to paint the outline with, or `None` to leave it untouched.
    pub const fn visual_id(self) -> Option<i32> {
        match self {
            Self::Purple => Some(-73100),
            Self::Blue => Some(-73101),
            Self::Green => Some(-73102),
            Self::Yellow => Some(-73103),
            Self::Orange => Some(-73104),
            Self::Red => Some(-73105),
            Self::None => None,
        }
    }
}

/// User options for the storage screen overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub preserve_filters: Persistence,
    pub full_set_color: OutlineColor,
    pub partial_set_color: OutlineColor,
    pub empty_set_color: OutlineColor,
    /// 0 is fully opaque, 255 fully transparent.
    pub shade_opacity: u8,
    pub show_empty_sets: bool,
    pub show_partial_sets: bool,
    pub show_full_sets: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            preserve_filters: Persistence::WithinSession,
            full_set_color: OutlineColor::Green,
            partial_set_color: OutlineColor::Blue,
            empty_set_color: OutlineColor::None,
            shade_opacity: 230,
            show_empty_sets: true,
            show_partial_sets: true,
            show_full_sets: true,
        }
    }
}

impl StorageConfig {
    pub fn shown(&self, fill: FillState) -> bool {
        match fill {
            FillState::Empty => self.show_empty_sets,
            FillState::Partial => self.show_partial_sets,
            FillState::Full => self.show_full_sets,
        }
    }

    pub fn set_shown(&mut self, fill: FillState, shown: bool) {
        match fill {
            FillState::Empty => self.show_empty_sets = shown,
            FillState::Partial => self.show_partial_sets = shown,
            FillState::Full => self.show_full_sets = shown,
        }
    }
}

/// Names a single config entry, as carried by a config-changed signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    PreserveFilters,
    FullSetColor,
    PartialSetColor,
    EmptySetColor,
    ShadeOpacity,
    ShowEmptySets,
    ShowPartialSets,
    ShowFullSets,
}

impl ConfigKey {
    /// Visibility flags are written by toggles, which already re-layout.
    pub fn affects_layout(self) -> bool {
        !matches!(
            self,
            Self::ShowEmptySets | Self::ShowPartialSets | Self::ShowFullSets
        )
    }
}

/// Outline shading resolved from the config at the start of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadingPalette {
    pub empty: Option<i32>,
    pub partial: Option<i32>,
    pub full: Option<i32>,
    pub normal_opacity: u8,
    pub hover_opacity: u8,
}

impl ShadingPalette {
    pub fn from_config(config: &StorageConfig) -> Self {
        let normal_opacity = config.shade_opacity;
        Self {
            empty: config.empty_set_color.visual_id(),
            partial: config.partial_set_color.visual_id(),
            full: config.full_set_color.visual_id(),
            normal_opacity,
            hover_opacity: normal_opacity.saturating_sub(20),
        }
    }

    pub fn visual_for(&self, fill: FillState) -> Option<i32> {
        match fill {
            FillState::Empty => self.empty,
            FillState::Partial => self.partial,
            FillState::Full => self.full,
        }
    }

    /// Empty sets stay statically shaded.
    pub fn hover_for(&self, fill: FillState) -> Option<HoverShade> {
        match fill {
            FillState::Empty => None,
            FillState::Partial | FillState::Full => Some(HoverShade {
                normal: self.normal_opacity,
                hover: self.hover_opacity,
            }),
        }
    }
}

/// Coordinate constants of the storage screen the engine lays out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenProfile {
    pub titles: Vec<String>,
    pub row_height: i32,
    /// Trimmed off the bottom of the last row when sizing the scroll area.
    pub content_trim: i32,
    pub item_width: i32,
    /// Horizontal margin on each side of an item icon.
    pub item_gap: i32,
    pub item_row_offset: i32,
    pub arrow_row_offset: i32,
    pub footer_row_offset: i32,
    pub half_width: i32,
    pub header_half_width: i32,
    pub header_inset: i32,
    pub left_column_x: i32,
    pub right_column_x: i32,
    pub collapsed_arrow_x: i32,
    pub divider_x: i32,
    pub divider_width: i32,
    pub divider_height: i32,
    pub junk_width: i32,
    pub junk_parked_x: i32,
    pub collapsible_max_items: usize,
    pub controls_height: i32,
}

impl Default for ScreenProfile {
    fn default() -> Self {
        Self {
            titles: [
                "Armour Case",
                "Cape Rack",
                "Toy Box",
                "Fancy Dress Box",
                "Treasure Chest",
                "Magic Wardrobe",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            row_height: 60,
            content_trim: 3,
            item_width: 36,
            item_gap: 3,
            item_row_offset: 20,
            arrow_row_offset: 5,
            footer_row_offset: 40,
            half_width: 210,
            header_half_width: 207,
            header_inset: 3,
            left_column_x: 3,
            right_column_x: 213,
            collapsed_arrow_x: 216,
            divider_x: 194,
            divider_width: 16,
            divider_height: 57,
            junk_width: 16,
            junk_parked_x: -100,
            collapsible_max_items: 4,
            controls_height: 25,
        }
    }
}

impl ScreenProfile {
    /// Matches a displayed title such as `"Cape Rack (12/40)"` against the
    /// known storage units.
    pub fn recognizes(&self, title: &str) -> bool {
        let unit = title.split(['(', '|', ':']).next().unwrap_or("").trim();
        self.titles.iter().any(|t| t == unit)
    }

    pub fn item_pitch(&self) -> i32 {
        self.item_width + 2 * self.item_gap
    }
}
