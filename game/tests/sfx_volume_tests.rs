use flappy::session::GameEvent;
use flappy::sfx::{FLAP_SFX_VOLUME, HIT_SFX_VOLUME, POINT_SFX_VOLUME, cue_volume};

#[test]
fn flap_sfx_is_softer_than_other_cues() {
    assert!(
        FLAP_SFX_VOLUME < POINT_SFX_VOLUME,
        "expected FLAP_SFX_VOLUME < POINT_SFX_VOLUME (flap fires every few frames)"
    );
    assert!(
        FLAP_SFX_VOLUME < HIT_SFX_VOLUME,
        "expected FLAP_SFX_VOLUME < HIT_SFX_VOLUME (flap fires every few frames)"
    );
}

#[test]
fn sfx_volumes_are_in_valid_range() {
    for (name, v) in [
        ("flap", FLAP_SFX_VOLUME),
        ("point", POINT_SFX_VOLUME),
        ("hit", HIT_SFX_VOLUME),
    ] {
        assert!(v > 0.0, "{name} volume must be > 0.0, got {v}");
        assert!(v <= 1.0, "{name} volume must be <= 1.0, got {v}");
    }
}

#[test]
fn each_event_uses_its_own_volume() {
    assert_eq!(cue_volume(GameEvent::Flap), FLAP_SFX_VOLUME);
    assert_eq!(cue_volume(GameEvent::Point), POINT_SFX_VOLUME);
    assert_eq!(cue_volume(GameEvent::Hit), HIT_SFX_VOLUME);
}
