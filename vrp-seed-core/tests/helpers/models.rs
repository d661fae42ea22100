use crate::models::*;
use crate::utils::Environment;
use std::sync::Arc;

pub fn create_test_environment() -> Environment {
    Environment::new_with_seed(0, Environment::silent_logger())
}

pub fn create_grid(rows: &[&[f64]]) -> Grid<f64> {
    Grid::from_rows(rows.iter().map(|row| row.to_vec()).collect(), 0.)
}

pub fn create_logging_environment() -> (Environment, Arc<std::sync::Mutex<Vec<String>>>) {
    let messages = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = messages.clone();
    let environment = Environment::new_with_seed(
        0,
        Arc::new(move |msg: &str| sink.lock().expect("cannot lock").push(msg.to_string())),
    );

    (environment, messages)
}

/// Creates a consistent data model with `num_services` real services, no rests and
/// `num_vehicle` vehicles sharing one depot.
pub fn create_test_data_model(num_services: usize, num_vehicle: usize) -> DataModel {
    let dimension = num_services + 1;

    DataModel {
        services: ServiceAttributes {
            matrix_index: (0..num_services as i32).collect(),
            start_tw: Grid::new(num_services, 1, 0.),
            end_tw: Grid::new(num_services, 1, -1.),
            max_lateness: Grid::new(num_services, 1, 0.),
            durations: vec![0.; num_services],
            setup_durations: vec![0.; num_services],
            volumes: Grid::new(num_services, 1, 0.),
            sticky_vehicles: vec![vec![]; num_services],
            is_break: vec![false; num_services],
            num_units: 1,
            num_real_services: num_services,
        },
        vehicles: VehicleAttributes {
            capacities: Grid::new(num_vehicle, 1, -1.),
            overload_multiplier: Grid::new(num_vehicle, 1, 0.),
            cost_time_multiplier: vec![1.; num_vehicle],
            cost_distance_multiplier: vec![0.; num_vehicle],
            fixed_cost: vec![0.; num_vehicle],
            tw_start: vec![0.; num_vehicle],
            tw_end: vec![-1.; num_vehicle],
            tw_margin: vec![0.; num_vehicle],
            max_distance: vec![-1.; num_vehicle],
            max_duration: vec![-1.; num_vehicle],
            start_index: vec![0; num_vehicle],
            end_index: vec![0; num_vehicle],
            matrix_index: vec![0; num_vehicle],
            start_mode: vec![StartMode::Free; num_vehicle],
            force_end: vec![false; num_vehicle],
            free_approach: vec![false; num_vehicle],
            free_return: vec![false; num_vehicle],
            previous_vehicle: vec![-1; num_vehicle],
            max_capacity: UNLIMITED_CAPACITY,
        },
        matrices: MatrixAttributes {
            time: vec![Grid::new(dimension, dimension, 1.)],
            distance: vec![Grid::new(dimension, dimension, 1.)],
            depot_points: vec![0],
            start_node: vec![num_services; num_vehicle],
            end_node: vec![num_services; num_vehicle],
        },
        paths: Grid::new(num_vehicle, num_services + 1, -1),
        unassigned_services: (0..num_services).collect(),
    }
}
