use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use water_fill::config::FillerConfig;
use water_fill::playback::{FillPlayer, PlaybackStatus};
use water_fill::wizard::{SetupStep, SetupWizard};

#[test]
fn wizard_to_player_round_trip() {
    let config = FillerConfig::from_toml_str("capacity = 3\ntotal_tubes = 5\nempty_tubes = 2\nseed = 42").unwrap();
    let mut wizard = SetupWizard::new(&config).unwrap();
    wizard.continue_to_colors();
    for name in ["red", "teal", "gold"] {
        assert_eq!(wizard.toggle_color(name), Ok(true));
    }
    assert!(wizard.is_color_selection_complete());

    let mut rng = StdRng::seed_from_u64(config.seed.unwrap());
    let result = wizard.generate_fill(&mut rng).unwrap();
    assert_eq!(wizard.step(), SetupStep::Filling);
    assert_eq!(result.events.len(), 9);

    let mut player = FillPlayer::new(result, config.autoplay_interval());
    assert_eq!(player.status(), PlaybackStatus::Initial);
    player.toggle_play();
    player.update(Duration::from_secs(60));
    assert!(!player.is_playing());
    assert_eq!(player.status(), PlaybackStatus::Complete);
    assert_eq!(
        player.current_state().unwrap().get_text_representation(),
        "red,red,red\nteal,teal,teal\ngold,gold,gold"
    );
}

#[test]
fn seeded_wizards_replay_identically() {
    let config = FillerConfig::default();
    let fill = |seed| {
        let mut wizard = SetupWizard::new(&config).unwrap();
        wizard.toggle_color("navy").unwrap();
        wizard.toggle_color("mint").unwrap();
        wizard.generate_fill(&mut StdRng::seed_from_u64(seed)).unwrap()
    };
    assert_eq!(fill(5), fill(5));
}
