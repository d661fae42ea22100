use super::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn can_normalize_problem_with_clustering(problem in generate_problem(), path_margin in 0..4usize) {
        check_normalized_problem(&problem, InitialSettings { path_margin, mode: InitialMode::Clustering });
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]
    #[test]
    fn can_cluster_problem_deterministically(problem in generate_problem()) {
        let settings = InitialSettings { path_margin: 0, mode: InitialMode::Clustering };

        let first = run_pipeline_with_settings(&problem, settings).expect("cannot normalize problem");
        let second = run_pipeline_with_settings(&problem, settings).expect("cannot normalize problem");

        prop_assert_eq!(first.model, second.model);
    }
}
