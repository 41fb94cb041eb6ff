use skirmish::{MovementSession, SessionConfig};
use validator::ValidationErrors;

#[test]
fn test_session_config_validation() {
    let config = SessionConfig {
        move_radius: 4096, // invalid (too big)
    };

    // Lazy check, but it catches the field names we care about
    let err = MovementSession::new(config).unwrap_err();
    let validation_errors = err.downcast::<ValidationErrors>().unwrap();
    let mut error_fields = validation_errors
        .errors()
        .keys()
        .copied()
        .collect::<Vec<&str>>();
    error_fields.sort_unstable();
    assert_eq!(
        error_fields,
        vec!["move_radius"],
        "incorrect validation errors in {:#?}",
        validation_errors
    );
}

#[test]
fn test_session_config_accepts_full_range() {
    // Both ends of the validation range are legal, including the degenerate
    // radius of 0
    for move_radius in [0, 1, 7, 1024] {
        let config = SessionConfig { move_radius };
        assert!(
            MovementSession::new(config).is_ok(),
            "radius {} should be accepted",
            move_radius
        );
    }
}
