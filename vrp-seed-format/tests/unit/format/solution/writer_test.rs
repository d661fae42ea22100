use super::*;
use crate::helpers::*;
use std::io::BufReader;
use vrp_seed_core::models::Grid;

fn create_routed_problem() -> Problem {
    let mut problem = create_line_problem(&[1., 2., 3.], 2);
    problem.services[1].visits_number = Some(2);
    problem.vehicles[1].rests = Some(vec![create_rest(Some("lunch"), 10., 20., 5.)]);
    problem.routes = Some(vec![create_route("v1", &["s2", "s1_1"])]);

    problem
}

#[test]
fn can_create_solution_from_seed_paths() {
    let problem = create_routed_problem();
    let normalized = run_pipeline(&problem).expect("cannot run pipeline");

    let solution = create_solution(&problem, &normalized.index, &normalized.model).expect("cannot create solution");

    assert_eq!(
        solution,
        Solution {
            routes: vec![create_route("v1", &["s2", "s1_1", "lunch"])],
            unassigned: vec!["s0".to_string(), "s1_0".to_string()],
        }
    );
}

#[test]
fn can_feed_solution_routes_back_as_problem_routes() {
    let mut problem = create_routed_problem();
    let normalized = run_pipeline(&problem).expect("cannot run pipeline");
    let solution = create_solution(&problem, &normalized.index, &normalized.model).expect("cannot create solution");

    problem.routes = Some(solution.routes);
    let replayed = run_pipeline(&problem).expect("cannot run pipeline");

    assert_eq!(replayed.model.paths, normalized.model.paths);
    assert_eq!(replayed.model.unassigned_services, normalized.model.unassigned_services);
}

#[test]
fn can_write_and_read_solution() {
    let solution = Solution { routes: vec![create_route("v0", &["s0", "s1"])], unassigned: vec!["s2".to_string()] };
    let mut writer = BufWriter::new(Vec::new());

    write_solution(&solution, &mut writer).expect("cannot write solution");
    let bytes = writer.into_inner().expect("cannot get buffer");
    let json = String::from_utf8(bytes.clone()).expect("not utf8");

    assert!(json.contains("\"vehicleId\": \"v0\""));
    assert!(json.contains("\"serviceIds\""));
    assert_eq!(deserialize_solution(BufReader::new(bytes.as_slice())).expect("cannot read solution"), solution);
}

#[test]
fn can_reject_invalid_solution_json() {
    let err = deserialize_solution(BufReader::new("{\"routes\": 1}".as_bytes())).expect_err("should fail");

    assert_eq!(err.codes(), vec!["E1702"]);
}

parameterized_test! {can_detect_unknown_indices, (paths, unassigned), {
    can_detect_unknown_indices_impl(paths, unassigned);
}}

can_detect_unknown_indices! {
    case01_unknown_service_in_path: (vec![vec![0, 42]], vec![]),
    case02_unknown_unassigned: (vec![vec![0]], vec![42]),
    case03_unknown_vehicle: (vec![vec![], vec![0], vec![1]], vec![]),
}

fn can_detect_unknown_indices_impl(paths: Vec<Vec<i32>>, unassigned: Vec<usize>) {
    let problem = create_line_problem(&[1., 2.], 2);
    let mut normalized = run_pipeline(&problem).expect("cannot run pipeline");
    normalized.model.paths = Grid::from_rows(paths, -1);
    normalized.model.unassigned_services = unassigned;

    let err = create_solution(&problem, &normalized.index, &normalized.model).expect_err("should fail");

    assert_eq!(err.codes(), vec!["E1701"]);
}
