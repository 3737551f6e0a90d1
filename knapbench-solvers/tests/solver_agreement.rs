use knapbench_instance::{generate_items, make_seed, Instance, Item};
use knapbench_solvers::{Algorithm, Skip};

fn seeded_instances(num_items: usize) -> Vec<Instance> {
    let mut instances = Vec::new();
    for seed in 0..10u64 {
        let items = generate_items(&make_seed(seed), num_items);
        for capacity in [100, 500, 1000] {
            instances.push(Instance::new(items.clone(), capacity));
        }
    }
    instances
}

#[test]
fn exact_solvers_agree_up_to_dp_scaling() {
    for num_items in [8, 14, 20] {
        for instance in seeded_instances(num_items) {
            let exhaustive = Algorithm::Exhaustive.solve(&instance).unwrap();
            let dynamic = Algorithm::Dynamic.solve(&instance).unwrap();
            let bb = Algorithm::BranchAndBound.solve(&instance).unwrap();

            assert!(
                (exhaustive.value - bb.value).abs() < 1e-9,
                "n={} C={}: exhaustive {} vs branch_and_bound {}",
                num_items,
                instance.capacity,
                exhaustive.value,
                bb.value
            );
            // DP carries values in cents, so agreement holds to a cent
            assert!(
                (exhaustive.value - dynamic.value).abs() <= 0.01,
                "n={} C={}: exhaustive {} vs dynamic {}",
                num_items,
                instance.capacity,
                exhaustive.value,
                dynamic.value
            );
        }
    }
}

#[test]
fn greedy_never_beats_the_optimum() {
    for num_items in [8, 14, 20] {
        for instance in seeded_instances(num_items) {
            let optimum = Algorithm::Exhaustive.solve(&instance).unwrap().value;
            let greedy = Algorithm::Greedy.solve(&instance).unwrap().value;
            assert!(
                greedy <= optimum + 1e-9,
                "n={} C={}: greedy {} above optimum {}",
                num_items,
                instance.capacity,
                greedy,
                optimum
            );
        }
    }
}

#[test]
fn every_selection_is_feasible_and_consistent() {
    for instance in seeded_instances(16) {
        for algo in Algorithm::ALL {
            let solution = algo.solve(&instance).unwrap();
            let verified = instance
                .verify_selection(&solution.selection)
                .unwrap_or_else(|e| panic!("{}: infeasible selection: {}", algo, e));
            // Reported value matches the selection it reports
            assert!(
                (verified - solution.value).abs() < 1e-6,
                "{}: reported {} but selection sums to {}",
                algo,
                solution.value,
                verified
            );
        }
    }
}

#[test]
fn thresholds_skip_independently() {
    let items = generate_items(&make_seed(1), 35);
    let instance = Instance::new(items, 100);

    match Algorithm::Exhaustive.solve(&instance) {
        Err(Skip::InputTooLarge { num_items, .. }) => assert_eq!(num_items, 35),
        other => panic!("expected InputTooLarge, got {:?}", other),
    }

    // The other solvers still run on the same input
    let dynamic = Algorithm::Dynamic.solve(&instance).unwrap();
    let bb = Algorithm::BranchAndBound.solve(&instance).unwrap();
    let greedy = Algorithm::Greedy.solve(&instance).unwrap();
    assert!(dynamic.value >= 0.0);
    assert!(bb.value >= 0.0);
    assert!((dynamic.value - bb.value).abs() <= 0.01);
    assert!(greedy.value <= bb.value + 1e-9);
}

#[test]
fn zero_capacity_yields_empty_selections_everywhere() {
    let items = vec![
        Item::new(1, 2, 3.0),
        Item::new(2, 3, 4.0),
        Item::new(3, 4, 5.0),
    ];
    let instance = Instance::new(items, 0);
    for algo in Algorithm::ALL {
        let solution = algo.solve(&instance).unwrap();
        assert_eq!(solution.value, 0.0, "{}", algo);
        assert_eq!(solution.selected_count(), 0, "{}", algo);
    }
}
