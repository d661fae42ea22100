use super::*;
use crate::helpers::*;

fn create_multi_visit_problem() -> Problem {
    let mut vehicle = create_vehicle("v1", 0, 0);
    vehicle.rests = Some(vec![create_rest(None, 10., 20., 5.), create_rest(Some("lunch"), 30., 40., 5.)]);

    create_problem(
        vec![create_vehicle("v0", 0, 0), vehicle],
        vec![
            create_service("a", 1),
            Service { visits_number: Some(3), ..create_service("b", 2) },
            create_service("c", 3),
        ],
        vec![create_line_matrix(&[0., 1., 2., 3.])],
    )
}

#[test]
fn can_create_index_with_visits_and_rests() {
    let problem = create_multi_visit_problem();

    let index = ServiceIndex::new(&problem).expect("cannot create index");

    let ids = (0..index.len()).map(|idx| index.get_id(idx).unwrap().to_string()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["a", "b_0", "b_1", "b_2", "c", "rest_0", "lunch"]);
    assert_eq!(index.num_real(), 5);
    assert_eq!(index.get_source(2), Some(ServiceSource::Visit { service: 1, visit: 1 }));
    assert_eq!(index.get_source(6), Some(ServiceSource::Rest { vehicle: 1, rest: 1 }));
    assert_eq!(index.get_visits("b"), Some([1, 2, 3].as_slice()));
    assert_eq!(index.get_rests(1).collect::<Vec<_>>(), vec![5, 6]);
    assert_eq!(index.get_rests(0).count(), 0);
    assert_eq!(index.get_vehicle_index("v1"), Some(1));
}

#[test]
fn can_keep_bijection_and_source_positions() {
    let problem = create_multi_visit_problem();

    let index = ServiceIndex::new(&problem).expect("cannot create index");

    (0..index.len()).for_each(|idx| {
        let id = index.get_id(idx).unwrap();
        assert_eq!(index.get_index(id), Some(idx));
    });
    assert_eq!(index.get_source_position("b_2"), Some(1));
    assert_eq!(index.get_source_position("b"), Some(1));
    assert_eq!(index.get_source_position("c"), Some(2));
    assert_eq!(index.get_index("b"), None);
}

#[test]
fn can_detect_service_without_id() {
    let problem = create_problem(
        vec![create_vehicle("v0", 0, 0)],
        vec![create_service("a", 0), Service { id: None, ..create_service("b", 0) }],
        vec![create_matrix(vec![0.])],
    );

    let err = verify_index(&problem).expect_err("should fail");

    assert_eq!(err.codes(), vec!["E1200"]);
    assert_eq!(err.errors[0].kind, ErrorKind::MissingIdentifier);
}

parameterized_test! {can_detect_duplicated_ids, (services, rest_id, expected), {
    can_detect_duplicated_ids_impl(services, rest_id, expected);
}}

can_detect_duplicated_ids! {
    case01_plain: (vec![("a", 1), ("a", 1)], None, Some("a")),
    case02_visit_collision: (vec![("a", 2), ("a_1", 1)], None, Some("a_1")),
    case03_rest_collision: (vec![("a", 1)], Some("a"), Some("a")),
    case04_rest_synthetic_collision: (vec![("rest_0", 1)], Some("x"), None),
    case05_unique: (vec![("a", 2), ("b", 1)], None, None),
}

fn can_detect_duplicated_ids_impl(services: Vec<(&str, usize)>, rest_id: Option<&str>, expected: Option<&str>) {
    let mut vehicle = create_vehicle("v0", 0, 0);
    vehicle.rests = rest_id.map(|id| vec![create_rest(Some(id), 0., 10., 1.)]);
    let problem = create_problem(
        vec![vehicle],
        services.iter().map(|&(id, visits)| Service { visits_number: Some(visits), ..create_service(id, 0) }).collect(),
        vec![create_matrix(vec![0.])],
    );

    let result = verify_index(&problem);

    match expected {
        Some(duplicate) => {
            let err = result.expect_err("should fail");
            assert_eq!(err.codes(), vec!["E1201"]);
            assert!(err.errors[0].action.contains(duplicate));
        }
        None => assert!(result.is_ok()),
    }
}
