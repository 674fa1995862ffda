/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub timing: TimingConfig,
    pub sound_enabled: bool,
}

/// Frame pacing and the tick counts of the animated phases.
/// These gate presentation only; the logical transitions stay instantaneous.
#[derive(Clone, Debug)]
pub struct TimingConfig {
    pub tick_rate_ms: u64,
    pub intro_ticks: u32,
    pub fall_ticks: u32,
    pub win_ticks: u32,
    pub banner_ticks: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            tick_rate_ms: default_tick_rate(),
            intro_ticks: default_intro_ticks(),
            fall_ticks: default_fall_ticks(),
            win_ticks: default_win_ticks(),
            banner_ticks: default_banner_ticks(),
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    audio: TomlAudio,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_intro_ticks")]
    intro_ticks: u32,
    #[serde(default = "default_fall_ticks")]
    fall_ticks: u32,
    #[serde(default = "default_win_ticks")]
    win_ticks: u32,
    #[serde(default = "default_banner_ticks")]
    banner_ticks: u32,
}

#[derive(Deserialize, Debug)]
struct TomlAudio {
    #[serde(default = "default_sound")]
    enabled: bool,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 55 }
fn default_intro_ticks() -> u32 { 22 }   // level drop-in reveal
fn default_fall_ticks() -> u32 { 14 }    // block sinking after a fall
fn default_win_ticks() -> u32 { 18 }     // block sinking into the goal
fn default_banner_ticks() -> u32 { 70 }  // win/lose screen dwell
fn default_sound() -> bool { true }

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            tick_rate_ms: default_tick_rate(),
            intro_ticks: default_intro_ticks(),
            fall_ticks: default_fall_ticks(),
            win_ticks: default_win_ticks(),
            banner_ticks: default_banner_ticks(),
        }
    }
}

impl Default for TomlAudio {
    fn default() -> Self {
        TomlAudio { enabled: default_sound() }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());
        GameConfig {
            timing: TimingConfig {
                tick_rate_ms: toml_cfg.timing.tick_rate_ms,
                intro_ticks: toml_cfg.timing.intro_ticks,
                fall_ticks: toml_cfg.timing.fall_ticks,
                win_ticks: toml_cfg.timing.win_ticks,
                banner_ticks: toml_cfg.timing.banner_ticks,
            },
            sound_enabled: toml_cfg.audio.enabled,
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        // Resolve symlinks so data is found relative to the real binary.
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }
    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
