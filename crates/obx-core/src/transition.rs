//! The command processor.
//!
//! `transition` is a pure function from (catalog, state, command) to the
//! next state: deterministic, no I/O, and total — a command that means
//! nothing in the current mode returns the state unchanged instead of
//! failing. All menu-navigation semantics live here.
//!
//! Dispatch order is the load-bearing rule: an open mode routes the command
//! exclusively through that mode's handler; only the main grid (no modal
//! open) falls through to grid navigation. A command can therefore never
//! affect two screens at once.

use tracing::debug;

use crate::catalog::{
    Catalog, ACCESS_CARD_CONAX, ACCESS_CARD_SUBSCRIPTION, EDITOR_CHANNEL_LIST, GRID_COLS,
    GRID_ICON_COUNT, ICON_CHANNEL_EDITOR, ICON_INSTALL, ICON_SETTINGS, INSTALL_ANTENNA_SETUP,
    SETTINGS_AB, SETTINGS_ACCESS_CARD, SETTINGS_LANGUAGE,
};
use crate::command::{Command, CustomAction};
use crate::state::{ControlState, Mode, PanelOp, SearchScan};

/// Apply one command. The input state is untouched; the caller receives a
/// fully formed replacement value.
pub fn transition(catalog: &Catalog, state: &ControlState, cmd: &Command) -> ControlState {
    // Power gate: an unpowered box ignores everything except the power key.
    if !state.power && !matches!(cmd, Command::Power) {
        return state.clone();
    }

    let mut next = state.clone();
    match cmd {
        // Standby works from any screen and freezes the rest of the state
        // in place — powering back on resumes exactly where the box was.
        Command::Power => {
            next.power = !state.power;
            debug!("power → {}", next.power);
        }

        Command::SearchProgress {
            progress,
            tv_list,
            radio_list,
        } => apply_search_progress(&mut next, *progress, tv_list, radio_list),

        Command::Custom { action } => apply_jump(&mut next, *action),

        button => match state.mode {
            Mode::MainGrid => main_grid(&mut next, button),
            Mode::ChannelEditor => channel_editor(catalog, &mut next, button),
            Mode::ChannelList => channel_list(catalog, &mut next, button),
            Mode::Settings => settings(catalog, &mut next, button),
            Mode::Install => install(catalog, &mut next, button),
            Mode::LanguageSettings => language_settings(catalog, &mut next, button),
            Mode::AbSettings => ab_settings(catalog, &mut next, button),
            Mode::AccessCard => access_card(catalog, &mut next, button),
            Mode::ConaxInfo => info_screen(&mut next, button, Mode::AccessCard),
            Mode::SubscriptionStatus => info_screen(&mut next, button, Mode::AccessCard),
            Mode::AntennaSetup => antenna_setup(catalog, &mut next, button),
            Mode::SearchSettings => search_settings(catalog, &mut next, button),
            Mode::SearchProgress => search_progress(&mut next, button),
        },
    }
    next
}

// ── Index arithmetic ──────────────────────────────────────────────────────────

fn wrap_up(i: usize, len: usize) -> usize {
    if len == 0 {
        i
    } else if i == 0 {
        len - 1
    } else {
        i - 1
    }
}

fn wrap_down(i: usize, len: usize) -> usize {
    if len == 0 {
        i
    } else {
        (i + 1) % len
    }
}

/// Cycle the selected item's option value. `values` may be shorter than the
/// item list if the catalog changed under a stale state; out-of-range slots
/// are left alone.
fn cycle_value(
    values: &mut [usize],
    items: &[crate::catalog::OptionItem],
    item_idx: usize,
    forward: bool,
) {
    let Some(item) = items.get(item_idx) else {
        return;
    };
    let Some(slot) = values.get_mut(item_idx) else {
        return;
    };
    let len = item.options.len();
    *slot = if forward {
        wrap_down(*slot, len)
    } else {
        wrap_up(*slot, len)
    };
}

fn open(next: &mut ControlState, mode: Mode) {
    debug!("mode {:?} → {:?}", next.mode, mode);
    next.mode = mode;
}

// ── Main grid ─────────────────────────────────────────────────────────────────

fn main_grid(next: &mut ControlState, cmd: &Command) {
    match cmd {
        Command::Left => next.selected_icon = wrap_up(next.selected_icon, GRID_ICON_COUNT),
        Command::Right => next.selected_icon = wrap_down(next.selected_icon, GRID_ICON_COUNT),
        // Vertical moves stop at the top/bottom row — no wrap.
        Command::Up => {
            if next.selected_icon >= GRID_COLS {
                next.selected_icon -= GRID_COLS;
            }
        }
        Command::Down => {
            if next.selected_icon + GRID_COLS < GRID_ICON_COUNT {
                next.selected_icon += GRID_COLS;
            }
        }
        Command::Ok => match next.selected_icon {
            ICON_CHANNEL_EDITOR => {
                next.channel_editor_index = 0;
                open(next, Mode::ChannelEditor);
            }
            ICON_SETTINGS => {
                next.settings_index = 0;
                open(next, Mode::Settings);
            }
            ICON_INSTALL => {
                next.install_index = 0;
                open(next, Mode::Install);
            }
            _ => {}
        },
        _ => {}
    }
}

// ── Channel editor and channel list ───────────────────────────────────────────

fn channel_editor(catalog: &Catalog, next: &mut ControlState, cmd: &Command) {
    let len = catalog.channel_editor_menu.len();
    match cmd {
        Command::Exit => open(next, Mode::MainGrid),
        Command::Up => next.channel_editor_index = wrap_up(next.channel_editor_index, len),
        Command::Down => next.channel_editor_index = wrap_down(next.channel_editor_index, len),
        Command::Ok => {
            if next.channel_editor_index == EDITOR_CHANNEL_LIST {
                next.selected_channel_index = 0;
                next.active_panel = None;
                open(next, Mode::ChannelList);
            }
        }
        _ => {}
    }
}

fn channel_list(catalog: &Catalog, next: &mut ControlState, cmd: &Command) {
    let len = catalog.channels.len();
    match cmd {
        Command::Exit => open(next, Mode::ChannelEditor),
        Command::Up => next.selected_channel_index = wrap_up(next.selected_channel_index, len),
        Command::Down => next.selected_channel_index = wrap_down(next.selected_channel_index, len),
        // Digits arm one of the five bulk panels; arming one disarms the rest.
        Command::Digit { n } => {
            if let Some(op) = PanelOp::from_digit(*n) {
                next.active_panel = Some(op);
            }
        }
        Command::Ok => {
            if len == 0 {
                return;
            }
            if let Some(op) = next.active_panel {
                let channel = next.selected_channel_index;
                let set = next.panel_set_mut(op);
                // Membership toggles — a second press undoes the first.
                if !set.remove(&channel) {
                    set.insert(channel);
                }
                debug!("{:?} toggle channel {}", op, channel);
            }
        }
        _ => {}
    }
}

// ── Settings tree ─────────────────────────────────────────────────────────────

fn settings(catalog: &Catalog, next: &mut ControlState, cmd: &Command) {
    let len = catalog.settings_menu.len();
    match cmd {
        Command::Exit => open(next, Mode::MainGrid),
        Command::Up => next.settings_index = wrap_up(next.settings_index, len),
        Command::Down => next.settings_index = wrap_down(next.settings_index, len),
        Command::Ok => match next.settings_index {
            SETTINGS_LANGUAGE => {
                next.language_settings_index = 0;
                open(next, Mode::LanguageSettings);
            }
            SETTINGS_AB => {
                next.ab_settings_index = 0;
                open(next, Mode::AbSettings);
            }
            SETTINGS_ACCESS_CARD => {
                next.access_card_index = 0;
                open(next, Mode::AccessCard);
            }
            _ => {}
        },
        _ => {}
    }
}

fn language_settings(catalog: &Catalog, next: &mut ControlState, cmd: &Command) {
    let items = &catalog.language_settings;
    match cmd {
        Command::Exit => open(next, Mode::Settings),
        Command::Up => {
            next.language_settings_index = wrap_up(next.language_settings_index, items.len())
        }
        Command::Down => {
            next.language_settings_index = wrap_down(next.language_settings_index, items.len())
        }
        Command::Left => cycle_value(
            &mut next.language_settings_values,
            items,
            next.language_settings_index,
            false,
        ),
        Command::Right => cycle_value(
            &mut next.language_settings_values,
            items,
            next.language_settings_index,
            true,
        ),
        _ => {}
    }
}

fn ab_settings(catalog: &Catalog, next: &mut ControlState, cmd: &Command) {
    let items = &catalog.ab_settings;
    match cmd {
        Command::Exit => open(next, Mode::Settings),
        Command::Up => next.ab_settings_index = wrap_up(next.ab_settings_index, items.len()),
        Command::Down => next.ab_settings_index = wrap_down(next.ab_settings_index, items.len()),
        Command::Left => cycle_value(
            &mut next.ab_settings_values,
            items,
            next.ab_settings_index,
            false,
        ),
        Command::Right => cycle_value(
            &mut next.ab_settings_values,
            items,
            next.ab_settings_index,
            true,
        ),
        _ => {}
    }
}

fn access_card(catalog: &Catalog, next: &mut ControlState, cmd: &Command) {
    let len = catalog.access_card_menu.len();
    match cmd {
        Command::Exit => open(next, Mode::Settings),
        Command::Up => next.access_card_index = wrap_up(next.access_card_index, len),
        Command::Down => next.access_card_index = wrap_down(next.access_card_index, len),
        Command::Ok => match next.access_card_index {
            ACCESS_CARD_CONAX => open(next, Mode::ConaxInfo),
            ACCESS_CARD_SUBSCRIPTION => open(next, Mode::SubscriptionStatus),
            _ => {}
        },
        _ => {}
    }
}

/// Read-only detail screens: exit returns to the parent list, everything
/// else is inert.
fn info_screen(next: &mut ControlState, cmd: &Command, parent: Mode) {
    if matches!(cmd, Command::Exit) {
        open(next, parent);
    }
}

// ── Install tree ──────────────────────────────────────────────────────────────

fn install(catalog: &Catalog, next: &mut ControlState, cmd: &Command) {
    let len = catalog.install_menu.len();
    match cmd {
        Command::Exit => open(next, Mode::MainGrid),
        Command::Up => next.install_index = wrap_up(next.install_index, len),
        Command::Down => next.install_index = wrap_down(next.install_index, len),
        Command::Ok => {
            if next.install_index == INSTALL_ANTENNA_SETUP {
                next.antenna_setup_index = 0;
                open(next, Mode::AntennaSetup);
            }
        }
        _ => {}
    }
}

fn antenna_setup(catalog: &Catalog, next: &mut ControlState, cmd: &Command) {
    let items = &catalog.antenna_setup;
    match cmd {
        Command::Exit => open(next, Mode::Install),
        Command::Up => next.antenna_setup_index = wrap_up(next.antenna_setup_index, items.len()),
        Command::Down => {
            next.antenna_setup_index = wrap_down(next.antenna_setup_index, items.len())
        }
        Command::Left => cycle_value(
            &mut next.antenna_setup_values,
            items,
            next.antenna_setup_index,
            false,
        ),
        Command::Right => cycle_value(
            &mut next.antenna_setup_values,
            items,
            next.antenna_setup_index,
            true,
        ),
        Command::Ok => {
            // "Start Search" is the last row. Positional contract:
            // reordering the antenna table moves the trigger with it.
            if !items.is_empty() && next.antenna_setup_index == items.len() - 1 {
                next.search_settings_index = 0;
                open(next, Mode::SearchSettings);
            }
        }
        _ => {}
    }
}

fn search_settings(catalog: &Catalog, next: &mut ControlState, cmd: &Command) {
    let len = catalog.search_settings.len();
    match cmd {
        Command::Exit => open(next, Mode::AntennaSetup),
        Command::Up => next.search_settings_index = wrap_up(next.search_settings_index, len),
        Command::Down => next.search_settings_index = wrap_down(next.search_settings_index, len),
        Command::Ok => {
            // Last entry starts the scan with a clean slate.
            if len != 0 && next.search_settings_index == len - 1 {
                next.search = SearchScan::default();
                open(next, Mode::SearchProgress);
            }
        }
        _ => {}
    }
}

fn search_progress(next: &mut ControlState, cmd: &Command) {
    // Only the exit key does anything here; the screen is driven by
    // `search-progress` payloads from the producer.
    if matches!(cmd, Command::Exit) {
        open(next, Mode::SearchSettings);
    }
}

// ── Structured commands ───────────────────────────────────────────────────────

fn apply_search_progress(next: &mut ControlState, progress: f32, tv: &[String], radio: &[String]) {
    if next.mode != Mode::SearchProgress {
        return;
    }
    let clamped = progress.clamp(0.0, 100.0);
    // Monotonic: a stale or duplicate tick never moves the bar backwards.
    if clamped < next.search.progress {
        return;
    }
    next.search.progress = clamped;
    next.search.tv_list = tv.to_vec();
    next.search.radio_list = radio.to_vec();
}

fn apply_jump(next: &mut ControlState, action: CustomAction) {
    match action {
        CustomAction::OpenInstall => {
            next.install_index = 0;
            open(next, Mode::Install);
        }
        CustomAction::OpenAntennaSetup => {
            next.antenna_setup_index = 0;
            open(next, Mode::AntennaSetup);
        }
    }
}
