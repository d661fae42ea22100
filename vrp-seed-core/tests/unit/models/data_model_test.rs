use super::*;
use crate::helpers::models::create_test_data_model;

#[test]
fn can_verify_consistent_model() {
    let mut model = create_test_data_model(3, 2);
    model.paths.set(0, 0, 2);
    model.paths.set(1, 0, 0);
    model.unassigned_services = vec![1];

    assert_eq!(model.verify(), Ok(()));
    assert_eq!(model.num_services(), 3);
    assert_eq!(model.num_vehicle(), 2);
}

parameterized_test! {can_detect_inconsistent_model, (modify, expected), {
    can_detect_inconsistent_model_impl(modify, expected);
}}

can_detect_inconsistent_model! {
    case01_service_array: (|model: &mut DataModel| { model.services.setup_durations.pop(); }, "setup_durations"),
    case02_vehicle_array: (|model: &mut DataModel| { model.vehicles.max_distance.push(-1.); }, "max_distance"),
    case03_paths_rows: (|model: &mut DataModel| { model.paths = Grid::new(1, 4, -1); }, "paths"),
    case04_duplicate_path_entry: (|model: &mut DataModel| {
        model.paths.set(0, 0, 1);
        model.paths.set(1, 2, 1);
    }, "more than once"),
    case05_unknown_path_entry: (|model: &mut DataModel| { model.paths.set(0, 0, 3); }, "unknown service"),
    case06_cycle: (|model: &mut DataModel| { model.vehicles.previous_vehicle = vec![1, 0]; }, "cyclic"),
    case07_rest_order: (|model: &mut DataModel| { model.services.is_break[0] = true; }, "rests"),
    case08_matrix: (|model: &mut DataModel| { model.matrices.distance[0] = Grid::new(4, 3, 0.); }, "square"),
    case09_units: (|model: &mut DataModel| { model.services.num_units = 2; }, "units"),
}

fn can_detect_inconsistent_model_impl(modify: fn(&mut DataModel), expected: &str) {
    let mut model = create_test_data_model(3, 2);
    modify(&mut model);

    let err = model.verify().expect_err("should fail");

    assert!(err.to_string().contains(expected), "unexpected error: {err}");
}

#[test]
fn can_measure_chain_length() {
    let mut model = create_test_data_model(0, 4);
    model.vehicles.previous_vehicle = vec![-1, 0, 1, -1];

    let lengths = (0..4).map(|vehicle| model.vehicles.chain_length(vehicle)).collect::<Vec<_>>();

    assert_eq!(lengths, vec![Some(0), Some(1), Some(2), Some(0)]);
}

parameterized_test! {can_check_vehicle_chains_are_linear, (previous_vehicle, expected), {
    can_check_vehicle_chains_are_linear_impl(previous_vehicle, expected);
}}

can_check_vehicle_chains_are_linear! {
    case01_two_successors: (vec![-1, 0, 0], Some("more than one vehicle")),
    case02_single_chain: (vec![-1, 0, 1], None),
    case03_two_chains: (vec![-1, 0, -1], None),
}

fn can_check_vehicle_chains_are_linear_impl(previous_vehicle: Vec<i32>, expected: Option<&str>) {
    let mut model = create_test_data_model(2, 3);
    model.vehicles.previous_vehicle = previous_vehicle;

    match (model.verify(), expected) {
        (Err(err), Some(expected)) => assert!(err.to_string().contains(expected), "unexpected error: {err}"),
        (Ok(_), None) => {}
        (result, _) => panic!("unexpected result: {result:?}"),
    }
}
