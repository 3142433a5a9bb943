//! End-to-end session scripts: whole remote-control sequences applied
//! command by command, the way a host drives the processor.

use obx_core::command::{Command, CustomAction};
use obx_core::state::{Mode, PanelOp};
use obx_core::{transition, Catalog, ControlState};

fn run(catalog: &Catalog, state: ControlState, cmds: &[Command]) -> ControlState {
    cmds.iter()
        .fold(state, |s, cmd| transition(catalog, &s, cmd))
}

fn scan_tick(progress: f32, tv: &[&str], radio: &[&str]) -> Command {
    Command::SearchProgress {
        progress,
        tv_list: tv.iter().map(|s| s.to_string()).collect(),
        radio_list: radio.iter().map(|s| s.to_string()).collect(),
    }
}

/// The full first-installation flow: grid → install → antenna setup →
/// search settings → running scan → completion jump back into antenna
/// setup. This is the longest cross-mode path the receiver has.
#[test]
fn first_installation_flow() {
    let catalog = Catalog::builtin();
    let mut state = ControlState::new(&catalog);

    // Navigate to the Installation icon and open it.
    state = run(&catalog, state, &[Command::Right, Command::Right, Command::Ok]);
    assert_eq!(state.mode, Mode::Install);

    // Antenna setup, pick a satellite and a DiSEqC port.
    state = run(
        &catalog,
        state,
        &[
            Command::Ok,    // install entry 0 → antenna setup
            Command::Right, // Satellite → Hotbird
            Command::Down,
            Command::Down,
            Command::Down,
            Command::Right, // DiSEqC 1.0 → Port 1
        ],
    );
    assert_eq!(state.mode, Mode::AntennaSetup);
    assert_eq!(state.antenna_setup_values[0], 1);
    assert_eq!(state.antenna_setup_values[3], 1);

    // Walk down to the "Start Search" row and confirm through the
    // search-settings screen.
    let antenna_last = catalog.antenna_setup.len() - 1;
    let mut cmds: Vec<Command> =
        std::iter::repeat(Command::Down).take(antenna_last - state.antenna_setup_index).collect();
    cmds.push(Command::Ok);
    cmds.extend(std::iter::repeat(Command::Down).take(catalog.search_settings.len() - 1));
    cmds.push(Command::Ok);
    state = run(&catalog, state, &cmds);
    assert_eq!(state.mode, Mode::SearchProgress);
    assert_eq!(state.search.progress, 0.0);

    // The external producer feeds the scan.
    state = run(
        &catalog,
        state,
        &[
            scan_tick(35.0, &["Perviy Kanal"], &[]),
            scan_tick(70.0, &["Perviy Kanal", "NTV"], &["Radio Mayak"]),
            scan_tick(100.0, &["Perviy Kanal", "NTV", "STS"], &["Radio Mayak"]),
        ],
    );
    assert!(state.search.is_complete());
    assert_eq!(state.search.tv_list.len(), 3);
    assert_eq!(state.search.radio_list.len(), 1);

    // Host acknowledges completion with the two jump directives.
    state = run(
        &catalog,
        state,
        &[
            Command::Custom {
                action: CustomAction::OpenInstall,
            },
            Command::Custom {
                action: CustomAction::OpenAntennaSetup,
            },
        ],
    );
    assert_eq!(state.mode, Mode::AntennaSetup);
    assert_eq!(state.antenna_setup_index, 0);
    // The scan result is still readable after the jump.
    assert!(state.search.is_complete());
}

/// Bulk channel management: arm panels, mark channels, verify the marks
/// survive navigating away.
#[test]
fn channel_housekeeping_session() {
    let catalog = Catalog::builtin();
    let mut state = ControlState::new(&catalog);

    state = run(&catalog, state, &[Command::Ok, Command::Ok]);
    assert_eq!(state.mode, Mode::ChannelList);

    // Mark channels 0 and 2 for deletion, favorite channel 1.
    state = run(
        &catalog,
        state,
        &[
            Command::Digit { n: 1 },
            Command::Ok,
            Command::Down,
            Command::Down,
            Command::Ok,
            Command::Up,
            Command::Digit { n: 5 },
            Command::Ok,
        ],
    );
    assert_eq!(state.active_panel, Some(PanelOp::Favorite));
    assert!(state.to_delete.contains(&0));
    assert!(state.to_delete.contains(&2));
    assert!(state.favorites.contains(&1));

    // Leave to the main grid; the marks persist for the session.
    state = run(&catalog, state, &[Command::Exit, Command::Exit]);
    assert_eq!(state.mode, Mode::MainGrid);
    assert_eq!(state.to_delete.len(), 2);
    assert_eq!(state.favorites.len(), 1);
}

/// Mode mutual exclusion, exercised over a long mixed script: the enum
/// makes two-open-screens unrepresentable, so the invariant reduces to the
/// processor always landing on a legal screen.
#[test]
fn mixed_script_stays_on_one_screen() {
    let catalog = Catalog::builtin();
    let mut state = ControlState::new(&catalog);

    let script = [
        Command::Right,
        Command::Ok, // settings
        Command::Ok, // language
        Command::Right,
        Command::Exit, // back to settings
        Command::Down,
        Command::Exit, // grid
        Command::Right,
        Command::Ok, // install
        Command::Ok, // antenna
        Command::Power,
        Command::Ok, // frozen
        Command::Power,
        Command::Exit, // install
        Command::Exit, // grid
    ];
    for cmd in &script {
        state = transition(&catalog, &state, cmd);
    }
    assert_eq!(state.mode, Mode::MainGrid);
    assert!(state.power);
    // The language change made before standby survived the round trip.
    assert_eq!(state.language_settings_values[0], 1);
}
