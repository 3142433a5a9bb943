//! ControlState — the single aggregate value describing the simulated box.
//!
//! Owned by one session, replaced (never mutated in place) on every command.
//! Renderers read it; only the transition function produces new ones.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// Which screen the box is showing. One variant at a time, so two screens
/// can never be open at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// No modal open — the 3×4 icon grid.
    #[default]
    MainGrid,
    ChannelEditor,
    ChannelList,
    Settings,
    Install,
    LanguageSettings,
    AbSettings,
    AccessCard,
    ConaxInfo,
    SubscriptionStatus,
    AntennaSetup,
    SearchSettings,
    SearchProgress,
}

impl Mode {
    /// Screen title for the on-screen header.
    pub fn label(self) -> &'static str {
        match self {
            Mode::MainGrid => "Main Menu",
            Mode::ChannelEditor => "Channel Editor",
            Mode::ChannelList => "TV Channel List",
            Mode::Settings => "System Setup",
            Mode::Install => "Installation",
            Mode::LanguageSettings => "Language",
            Mode::AbSettings => "A/B Setting",
            Mode::AccessCard => "Access Card",
            Mode::ConaxInfo => "Conax Information",
            Mode::SubscriptionStatus => "Subscription Status",
            Mode::AntennaSetup => "Antenna Setup",
            Mode::SearchSettings => "Search Settings",
            Mode::SearchProgress => "Channel Search",
        }
    }
}

/// The five bulk operations available in channel-list mode, armed via the
/// digit keys. Mutually exclusive — arming one disarms the previous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PanelOp {
    Delete,
    Move,
    Skip,
    Lock,
    Favorite,
}

impl PanelOp {
    /// Digit-key binding: `1` = delete … `5` = favorite.
    pub fn from_digit(n: u8) -> Option<Self> {
        match n {
            1 => Some(PanelOp::Delete),
            2 => Some(PanelOp::Move),
            3 => Some(PanelOp::Skip),
            4 => Some(PanelOp::Lock),
            5 => Some(PanelOp::Favorite),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PanelOp::Delete => "Delete",
            PanelOp::Move => "Move",
            PanelOp::Skip => "Skip",
            PanelOp::Lock => "Lock",
            PanelOp::Favorite => "Favorite",
        }
    }

    /// Single-character badge shown next to a marked channel row.
    pub fn badge(self) -> char {
        match self {
            PanelOp::Delete => 'D',
            PanelOp::Move => 'M',
            PanelOp::Skip => 'S',
            PanelOp::Lock => 'L',
            PanelOp::Favorite => '♥',
        }
    }
}

/// Channel-scan simulation state. Fed by an external timed producer through
/// `search-progress` commands; grows monotonically toward 100.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchScan {
    pub progress: f32,
    pub tv_list: Vec<String>,
    pub radio_list: Vec<String>,
}

impl SearchScan {
    pub fn is_complete(&self) -> bool {
        self.progress >= 100.0
    }
}

/// The whole simulated receiver at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    pub power: bool,
    pub mode: Mode,

    /// Index into the fixed 12-icon main grid.
    pub selected_icon: usize,

    // Per-mode selection indices, each bounded by its menu length.
    pub channel_editor_index: usize,
    pub settings_index: usize,
    pub install_index: usize,
    pub language_settings_index: usize,
    pub ab_settings_index: usize,
    pub access_card_index: usize,
    pub antenna_setup_index: usize,
    pub search_settings_index: usize,
    /// Highlight in channel-list mode, wrapping over the full channel count.
    pub selected_channel_index: usize,

    // Per-item option values, one slot per configurable item.
    pub language_settings_values: Vec<usize>,
    pub ab_settings_values: Vec<usize>,
    pub antenna_setup_values: Vec<usize>,

    /// Which bulk operation is armed in channel-list mode.
    pub active_panel: Option<PanelOp>,

    // Per-channel membership sets, keyed by channel index.
    pub favorites: BTreeSet<usize>,
    pub to_delete: BTreeSet<usize>,
    pub to_move: BTreeSet<usize>,
    pub to_skip: BTreeSet<usize>,
    pub to_lock: BTreeSet<usize>,

    pub search: SearchScan,
}

impl ControlState {
    /// Fresh session state: power on, grid showing, all indices at 0, sets
    /// empty, value vectors sized from the catalog.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            power: true,
            mode: Mode::MainGrid,
            selected_icon: 0,
            channel_editor_index: 0,
            settings_index: 0,
            install_index: 0,
            language_settings_index: 0,
            ab_settings_index: 0,
            access_card_index: 0,
            antenna_setup_index: 0,
            search_settings_index: 0,
            selected_channel_index: 0,
            language_settings_values: vec![0; catalog.language_settings.len()],
            ab_settings_values: vec![0; catalog.ab_settings.len()],
            antenna_setup_values: vec![0; catalog.antenna_setup.len()],
            active_panel: None,
            favorites: BTreeSet::new(),
            to_delete: BTreeSet::new(),
            to_move: BTreeSet::new(),
            to_skip: BTreeSet::new(),
            to_lock: BTreeSet::new(),
            search: SearchScan::default(),
        }
    }

    /// The membership set backing a panel operation.
    pub fn panel_set(&self, op: PanelOp) -> &BTreeSet<usize> {
        match op {
            PanelOp::Delete => &self.to_delete,
            PanelOp::Move => &self.to_move,
            PanelOp::Skip => &self.to_skip,
            PanelOp::Lock => &self.to_lock,
            PanelOp::Favorite => &self.favorites,
        }
    }

    pub(crate) fn panel_set_mut(&mut self, op: PanelOp) -> &mut BTreeSet<usize> {
        match op {
            PanelOp::Delete => &mut self.to_delete,
            PanelOp::Move => &mut self.to_move,
            PanelOp::Skip => &mut self.to_skip,
            PanelOp::Lock => &mut self.to_lock,
            PanelOp::Favorite => &mut self.favorites,
        }
    }

    /// All badges applying to a channel, in panel order. Convenience for
    /// renderers drawing the channel list.
    pub fn channel_badges(&self, channel: usize) -> Vec<PanelOp> {
        [
            PanelOp::Delete,
            PanelOp::Move,
            PanelOp::Skip,
            PanelOp::Lock,
            PanelOp::Favorite,
        ]
        .into_iter()
        .filter(|op| self.panel_set(*op).contains(&channel))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_shape() {
        let catalog = Catalog::builtin();
        let state = ControlState::new(&catalog);
        assert!(state.power);
        assert_eq!(state.mode, Mode::MainGrid);
        assert_eq!(state.antenna_setup_values.len(), catalog.antenna_setup.len());
        assert!(state.favorites.is_empty());
        assert_eq!(state.search.progress, 0.0);
    }

    #[test]
    fn digit_bindings() {
        assert_eq!(PanelOp::from_digit(1), Some(PanelOp::Delete));
        assert_eq!(PanelOp::from_digit(5), Some(PanelOp::Favorite));
        assert_eq!(PanelOp::from_digit(0), None);
        assert_eq!(PanelOp::from_digit(6), None);
    }

    #[test]
    fn badges_follow_sets() {
        let catalog = Catalog::builtin();
        let mut state = ControlState::new(&catalog);
        state.to_delete.insert(3);
        state.favorites.insert(3);
        assert_eq!(
            state.channel_badges(3),
            vec![PanelOp::Delete, PanelOp::Favorite]
        );
        assert!(state.channel_badges(4).is_empty());
    }
}
