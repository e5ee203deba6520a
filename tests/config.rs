use std::path::PathBuf;

use threesat::PuzzleError;
use threesat::config::{CliOverrides, GameConfig, MAX_LIVES, Variant};

fn scratch_file(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("threesat-{}-{name}", std::process::id()));
    std::fs::write(&path, body).expect("write scratch config");
    path
}

#[test]
fn presets_differ_only_in_divisor_and_cap() {
    let classic = GameConfig::for_variant(Variant::Classic);
    let compact = GameConfig::for_variant(Variant::Compact);
    assert_eq!(classic, GameConfig::default());
    assert_eq!((classic.level_divisor, classic.max_vars), (300, 8));
    assert_eq!((compact.level_divisor, compact.max_vars), (500, 7));
    assert_eq!(
        GameConfig {
            level_divisor: 300,
            max_vars: 8,
            ..compact
        },
        classic
    );
    classic.validate().expect("classic valid");
    compact.validate().expect("compact valid");
}

#[test]
fn validate_rejects_bad_values() {
    let cases = [
        GameConfig {
            level_divisor: 0,
            ..GameConfig::classic()
        },
        GameConfig {
            min_vars: 0,
            ..GameConfig::classic()
        },
        GameConfig {
            min_vars: 6,
            max_vars: 5,
            ..GameConfig::classic()
        },
        GameConfig {
            max_vars: 9,
            ..GameConfig::classic()
        },
        GameConfig {
            starting_lives: 0,
            ..GameConfig::classic()
        },
        GameConfig {
            starting_lives: MAX_LIVES + 1,
            ..GameConfig::classic()
        },
        GameConfig {
            base_timeout_secs: u64::MAX,
            ..GameConfig::classic()
        },
        GameConfig {
            floor_timeout_secs: u64::MAX,
            ..GameConfig::classic()
        },
        GameConfig {
            win_delay_ms: u64::MAX,
            ..GameConfig::classic()
        },
        GameConfig {
            lose_delay_ms: u64::MAX,
            ..GameConfig::classic()
        },
        GameConfig {
            tick_interval_ms: 0,
            ..GameConfig::classic()
        },
        GameConfig {
            max_attempts: 0,
            ..GameConfig::classic()
        },
    ];
    for c in cases {
        assert!(matches!(c.validate(), Err(PuzzleError::InvalidConfig(_))), "{c:?}");
    }
}

#[test]
fn yaml_file_overrides_defaults() {
    let path = scratch_file("ok.yaml", "level_divisor: 500\nmax_vars: 7\nwin_bonus: 50\n");
    let c = GameConfig::from_file(&path).expect("load");
    std::fs::remove_file(&path).ok();
    assert_eq!(c.level_divisor, 500);
    assert_eq!(c.max_vars, 7);
    assert_eq!(c.win_bonus, 50);
    assert_eq!(c.starting_lives, 3);
}

#[test]
fn yaml_file_is_validated() {
    let path = scratch_file("bad.yaml", "max_vars: 12\n");
    let err = GameConfig::from_file(&path).expect_err("too many vars");
    std::fs::remove_file(&path).ok();
    assert!(format!("{err:#}").contains("max_vars"));
}

#[test]
fn missing_file_reports_path() {
    let err = GameConfig::from_file(&PathBuf::from("/nonexistent/threesat.yaml"))
        .expect_err("missing");
    assert!(err.to_string().contains("/nonexistent/threesat.yaml"));
}

#[test]
fn cli_overrides_apply() {
    let mut c = GameConfig::classic();
    c.merge_with_cli(&CliOverrides {
        starting_lives: Some(1),
        max_attempts: Some(10),
        ..CliOverrides::default()
    });
    assert_eq!(c.starting_lives, 1);
    assert_eq!(c.max_attempts, 10);
    assert_eq!(c.level_divisor, 300);
}

#[test]
fn lives_override_above_cap_is_rejected() {
    let mut c = GameConfig::classic();
    c.merge_with_cli(&CliOverrides {
        starting_lives: Some(7),
        ..CliOverrides::default()
    });
    assert!(matches!(c.validate(), Err(PuzzleError::InvalidConfig(_))));
}

#[test]
fn huge_timeouts_saturate_instead_of_overflowing() {
    let c = GameConfig {
        base_timeout_secs: u64::MAX,
        timeout_spread_secs: u64::MAX,
        ..GameConfig::classic()
    };
    assert_eq!(c.timeout_for_level(0).as_secs(), u64::MAX);
}

#[test]
fn resolve_picks_preset_or_file() {
    assert_eq!(
        GameConfig::resolve(None, None).expect("default"),
        GameConfig::classic()
    );
    assert_eq!(
        GameConfig::resolve(Some(Variant::Compact), None).expect("compact"),
        GameConfig::compact()
    );

    let path = scratch_file("resolve.yaml", "win_bonus: 10\n");
    let from_file = GameConfig::resolve(None, Some(&path)).expect("file");
    let both = GameConfig::resolve(Some(Variant::Compact), Some(&path));
    std::fs::remove_file(&path).ok();
    assert_eq!(from_file.win_bonus, 10);
    let err = both.expect_err("variant and file together");
    assert!(err.to_string().contains("mutually exclusive"));
}
