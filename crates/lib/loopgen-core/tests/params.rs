use loopgen_core::context::scenario_name;
use loopgen_core::error::CoreError;
use loopgen_core::params::{NetworkParams, ScenarioParams, ScenarioSettings};

fn missing_field(settings: ScenarioSettings) -> String {
    match ScenarioParams::try_from(&settings) {
        Err(CoreError::Configuration { field, .. }) => field,
        other => panic!("expected configuration error, got {:?}", other),
    }
}

#[test]
fn test_scenario_fields_required() {
    let no_end = ScenarioSettings {
        start_time: Some(0.0),
        end_time: None,
    };
    assert_eq!(missing_field(no_end), "end_time");

    let no_start = ScenarioSettings {
        start_time: None,
        end_time: Some(100.0),
    };
    assert_eq!(missing_field(no_start), "start_time");

    let both = ScenarioSettings {
        start_time: Some(0.0),
        end_time: Some(1500.0),
    };
    let params = ScenarioParams::try_from(&both).unwrap();
    assert_eq!((params.start_time(), params.end_time()), (0.0, 1500.0));
}

#[test]
fn test_scenario_window_order() {
    let reversed = ScenarioSettings {
        start_time: Some(50.0),
        end_time: Some(10.0),
    };
    assert_eq!(missing_field(reversed), "end_time");
}

#[test]
fn test_scenario_name() {
    let params = NetworkParams::new(230.7, 2, 30.0, 40).unwrap();
    assert_eq!(scenario_name("sugiyama", &params), "sugiyama-230m2l");
}

#[test]
fn test_error_names_field() {
    let error = CoreError::configuration("end_time", "end time of the circle not supplied");
    assert!(error.to_string().contains("end_time"));
}
