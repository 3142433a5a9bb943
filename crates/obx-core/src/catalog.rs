//! Channel catalog and static menu tables.
//!
//! Reference data supplied once at session start: the ordered channel list
//! plus the fixed menu/option tables that bound every selection index and
//! option cycle in the control model. The transition function reads this and
//! never mutates it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One channel entry. Index position within the catalog is its identity;
/// the per-channel operation sets in the control state store those indices.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Channel {
    pub name: String,
    /// Short descriptive blurb shown in the channel list detail row.
    #[serde(default)]
    pub info: String,
}

/// A labeled setting whose current selection is an index into `options`.
/// An empty `options` list marks a pure action row (e.g. "Start Search") —
/// cycling it is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OptionItem {
    pub label: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl OptionItem {
    fn new(label: &str, options: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn action(label: &str) -> Self {
        Self {
            label: label.to_string(),
            options: Vec::new(),
        }
    }
}

// ── Main grid ─────────────────────────────────────────────────────────────────

/// The fixed 3×4 main menu grid.
pub const GRID_ICON_COUNT: usize = 12;
pub const GRID_COLS: usize = 4;

/// Icons that open a mode on `ok`.
pub const ICON_CHANNEL_EDITOR: usize = 0;
pub const ICON_SETTINGS: usize = 1;
pub const ICON_INSTALL: usize = 2;

// ── Menu contract indices ─────────────────────────────────────────────────────
//
// These positions are part of the receiver's documented behavior: `ok` on
// them opens a child screen. The settings menu must therefore carry at least
// 15 entries.

pub const EDITOR_CHANNEL_LIST: usize = 0;
pub const SETTINGS_LANGUAGE: usize = 0;
pub const SETTINGS_AB: usize = 5;
pub const SETTINGS_ACCESS_CARD: usize = 14;
pub const INSTALL_ANTENNA_SETUP: usize = 0;
pub const ACCESS_CARD_CONAX: usize = 0;
pub const ACCESS_CARD_SUBSCRIPTION: usize = 1;

/// The full static catalog for one session.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub channels: Vec<Channel>,
    pub grid_icons: Vec<String>,
    pub channel_editor_menu: Vec<String>,
    pub settings_menu: Vec<String>,
    pub install_menu: Vec<String>,
    pub access_card_menu: Vec<String>,
    pub language_settings: Vec<OptionItem>,
    pub ab_settings: Vec<OptionItem>,
    /// Last item is the "Start Search" action row — `ok` on it hands off to
    /// the search-settings screen. Positional contract, see antenna handling
    /// in the transition module.
    pub antenna_setup: Vec<OptionItem>,
    /// Last entry starts the scan.
    pub search_settings: Vec<String>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("main grid must have exactly {GRID_ICON_COUNT} icons, got {0}")]
    BadGrid(usize),
    #[error("settings menu needs at least {min} entries for the access-card row, got {got}")]
    SettingsTooShort { min: usize, got: usize },
    #[error("{0} menu is empty")]
    EmptyMenu(&'static str),
}

impl Catalog {
    /// The built-in catalog — an OpenBox-style receiver layout. Used when no
    /// `channels.toml` is present, and by tests.
    pub fn builtin() -> Self {
        Self::with_channels(default_channels())
    }

    /// Builtin menu tables around a caller-supplied channel list.
    pub fn with_channels(channels: Vec<Channel>) -> Self {
        Self {
            channels,
            grid_icons: to_strings(&[
                "Channel Editor",
                "System Setup",
                "Installation",
                "EPG",
                "Multimedia",
                "Games",
                "Network",
                "Conditional Access",
                "USB",
                "Weather",
                "Youtube",
                "Information",
            ]),
            channel_editor_menu: to_strings(&[
                "TV Channel List",
                "Radio Channel List",
                "Delete All",
                "Sort Channels",
            ]),
            settings_menu: to_strings(&[
                "Language",
                "TV System",
                "Display Setting",
                "Local Time Setting",
                "Timer Setting",
                "A/B Setting",
                "Parental Lock",
                "OSD Setting",
                "Favorite",
                "Audio Setting",
                "Auto Standby",
                "Factory Setting",
                "Software Upgrade",
                "Network Setting",
                "Access Card",
                "About STB",
            ]),
            install_menu: to_strings(&[
                "Antenna Setup",
                "Satellite List",
                "Auto Scan",
                "TP List",
                "Factory Defaults",
            ]),
            access_card_menu: to_strings(&[
                "Conax Information",
                "Subscription Status",
                "Mail Messages",
                "About Card",
            ]),
            language_settings: vec![
                OptionItem::new(
                    "Menu Language",
                    &["English", "Deutsch", "Français", "Русский", "Español"],
                ),
                OptionItem::new("First Audio", &["English", "Original", "Русский"]),
                OptionItem::new("Second Audio", &["English", "Original", "Русский"]),
                OptionItem::new("Subtitle Language", &["Off", "English", "Русский"]),
                OptionItem::new("Teletext", &["Off", "On"]),
            ],
            ab_settings: vec![
                OptionItem::new("TV Type", &["PAL", "NTSC", "Auto"]),
                OptionItem::new("Screen Ratio", &["4:3 LetterBox", "4:3 PanScan", "16:9"]),
                OptionItem::new("Video Output", &["CVBS", "RGB"]),
                OptionItem::new("RF System", &["PAL-BG", "PAL-I", "PAL-DK", "NTSC"]),
                OptionItem::new("RF Channel", &["CH 36", "CH 37", "CH 38"]),
            ],
            antenna_setup: vec![
                OptionItem::new(
                    "Satellite",
                    &["Astra 19.2E", "Hotbird 13.0E", "Eutelsat 9.0E", "Amos 4.0W"],
                ),
                OptionItem::new(
                    "LNB Frequency",
                    &["Universal (9750-10600)", "9750", "10600", "5150"],
                ),
                OptionItem::new("Transponder", &["11766 H 27500", "12092 H 27500", "12207 V 30000"]),
                OptionItem::new(
                    "DiSEqC 1.0",
                    &["Disable", "Port 1", "Port 2", "Port 3", "Port 4"],
                ),
                OptionItem::new("22K", &["Auto", "On", "Off"]),
                OptionItem::new("Polarity", &["Auto", "H", "V"]),
                OptionItem::action("Start Search"),
            ],
            search_settings: to_strings(&[
                "Satellite",
                "Search Mode",
                "Channel Type",
                "Network Search",
                "Search",
            ]),
        }
    }

    /// Sanity-check the table shapes the transition function relies on.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.grid_icons.len() != GRID_ICON_COUNT {
            return Err(CatalogError::BadGrid(self.grid_icons.len()));
        }
        if self.settings_menu.len() <= SETTINGS_ACCESS_CARD {
            return Err(CatalogError::SettingsTooShort {
                min: SETTINGS_ACCESS_CARD + 1,
                got: self.settings_menu.len(),
            });
        }
        let menus: [(&'static str, usize); 5] = [
            ("channel editor", self.channel_editor_menu.len()),
            ("install", self.install_menu.len()),
            ("access card", self.access_card_menu.len()),
            ("antenna setup", self.antenna_setup.len()),
            ("search settings", self.search_settings.len()),
        ];
        for (name, len) in menus {
            if len == 0 {
                return Err(CatalogError::EmptyMenu(name));
            }
        }
        Ok(())
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_channels() -> Vec<Channel> {
    [
        ("Perviy Kanal", "News and entertainment, Moscow"),
        ("Rossiya 1", "State television, general programming"),
        ("NTV", "News, series and crime drama"),
        ("TNT", "Comedy and reality shows"),
        ("STS", "Family entertainment"),
        ("Kultura", "Arts, classical music and cinema"),
        ("Match TV", "Sports, live events"),
        ("REN TV", "Films and documentary"),
        ("Karusel", "Children's programming"),
        ("Zvezda", "History and military documentary"),
        ("Eurosport 1", "Pan-European sports"),
        ("Discovery Channel", "Science and engineering documentary"),
        ("Animal Planet", "Nature and wildlife"),
        ("National Geographic", "Documentary, exploration"),
        ("TV1000", "International feature films"),
        ("Kino Premiere", "Recent film premieres"),
        ("Nickelodeon", "Cartoons for kids"),
        ("MTV Europe", "Music videos and shows"),
        ("Radio Mayak", "Talk radio and music"),
        ("Radio Orfey", "Classical music radio"),
    ]
    .iter()
    .map(|(name, info)| Channel {
        name: name.to_string(),
        info: info.to_string(),
    })
    .collect()
}

// ── TOML channel loader ───────────────────────────────────────────────────────

/// Intermediate struct that matches the TOML `[[channel]]` table. Kept
/// separate from `Channel` so the file schema can diverge from the runtime
/// type without breaking either.
#[derive(Debug, Deserialize)]
struct TomlChannelFile {
    channel: Vec<TomlChannel>,
}

#[derive(Debug, Deserialize)]
struct TomlChannel {
    name: String,
    #[serde(default)]
    info: String,
}

pub fn parse_channels_from_toml_str(content: &str) -> anyhow::Result<Vec<Channel>> {
    let file: TomlChannelFile = toml::from_str(content)?;
    let channels = file
        .channel
        .into_iter()
        .map(|c| Channel {
            name: c.name,
            info: c.info,
        })
        .collect();
    Ok(channels)
}

pub fn load_channels_from_toml(path: &Path) -> anyhow::Result<Vec<Channel>> {
    let content = std::fs::read_to_string(path)?;
    parse_channels_from_toml_str(&content)
}

/// Load the session catalog: `channels.toml` when present, builtin channels
/// otherwise. Menu tables are always the builtin ones.
pub fn load_catalog(channels_toml: &Path) -> Catalog {
    if channels_toml.exists() {
        match load_channels_from_toml(channels_toml) {
            Ok(channels) if !channels.is_empty() => {
                tracing::info!(
                    "Loaded {} channels from {}",
                    channels.len(),
                    channels_toml.display()
                );
                return Catalog::with_channels(channels);
            }
            Ok(_) => {
                tracing::warn!("{} contains no channels, using builtin list", channels_toml.display());
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", channels_toml.display(), e);
            }
        }
    }
    Catalog::builtin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        assert!(catalog.validate().is_ok());
        // Contract rows the transition function depends on.
        assert_eq!(catalog.settings_menu[SETTINGS_LANGUAGE], "Language");
        assert_eq!(catalog.settings_menu[SETTINGS_AB], "A/B Setting");
        assert_eq!(catalog.settings_menu[SETTINGS_ACCESS_CARD], "Access Card");
        assert_eq!(catalog.install_menu[INSTALL_ANTENNA_SETUP], "Antenna Setup");
        // The last antenna row is the action row with no cycleable options.
        let last = catalog.antenna_setup.last().unwrap();
        assert_eq!(last.label, "Start Search");
        assert!(last.options.is_empty());
    }

    #[test]
    fn parse_channels_toml() {
        let toml = r#"
            [[channel]]
            name = "Test TV"
            info = "A test channel"

            [[channel]]
            name = "Bare"
        "#;
        let channels = parse_channels_from_toml_str(toml).unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].name, "Test TV");
        assert_eq!(channels[0].info, "A test channel");
        assert_eq!(channels[1].info, "");
    }

    #[test]
    fn validate_rejects_short_settings_menu() {
        let mut catalog = Catalog::builtin();
        catalog.settings_menu.truncate(10);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::SettingsTooShort { .. })
        ));
    }
}
