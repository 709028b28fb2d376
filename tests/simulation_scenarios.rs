use rand::rngs::StdRng;
use rand::SeedableRng;

use motivation_backend::simulation::{find_crossing, Gender, MotivationSimulator, SimulationInput};

fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn study_hours_above_cap_match_cap() {
    let sim = MotivationSimulator::new();
    for hours in [101, 150, 10_000] {
        let (capped, capped_cross) =
            sim.simulate_with_rng(&SimulationInput::new(100, Gender::Male, 3.0), &mut seeded(8));
        let (over, over_cross) =
            sim.simulate_with_rng(&SimulationInput::new(hours, Gender::Male, 3.0), &mut seeded(8));
        assert_eq!(capped, over);
        assert_eq!(capped_cross, over_cross);
    }
}

#[test]
fn unrecognized_gender_behaves_like_other() {
    let sim = MotivationSimulator::new();
    for label in ["", "robot", "MALEish", "null", "Male", "FEMALE", " female "] {
        let input = SimulationInput::new(60, Gender::from_label(label), 3.0);
        let other = SimulationInput::new(60, Gender::Other, 3.0);
        assert_eq!(
            sim.simulate_with_rng(&input, &mut seeded(13)),
            sim.simulate_with_rng(&other, &mut seeded(13))
        );
    }
}

#[test]
fn zero_hours_shows_no_systematic_decline() {
    let sim = MotivationSimulator::new();
    for seed in 0..5 {
        let input = SimulationInput::new(0, Gender::Other, 4.0);
        let (trajectory, crossing) = sim.simulate_with_rng(&input, &mut seeded(seed));

        assert_eq!(trajectory.len(), 70);
        assert!(crossing.is_none());
        let first = trajectory.first().unwrap();
        let last = trajectory.last().unwrap();
        assert!((3.8..=4.2).contains(&first), "week 1 average {first}");
        assert!((first - last).abs() < 0.2, "drifted from {first} to {last}");
    }
}

#[test]
fn heavy_load_from_mid_motivation_crosses_early() {
    let sim = MotivationSimulator::new();
    for seed in 0..5 {
        let input = SimulationInput::new(100, Gender::Female, 1.5);
        let run = sim.run(&input, &mut seeded(seed));

        assert!(run.trajectory.first().unwrap() >= 1.0);
        let crossing = run.crossing.expect("average should cross the threshold");
        assert_eq!(crossing.threshold, 1.0);
        assert!((2..=10).contains(&crossing.week), "crossed at {}", crossing.week);
        assert_eq!(run.history.burnout_summary().burned_out, 1000);
    }
}

// With a starting score of 1.0 the week-1 average already sits below the threshold,
// so there is no at/above sample before the drop and no crossing is reported.
#[test]
fn heavy_load_from_threshold_starts_below_without_crossing() {
    let sim = MotivationSimulator::new();
    for seed in 0..5 {
        let input = SimulationInput::new(100, Gender::Female, 1.0);
        let (trajectory, crossing) = sim.simulate_with_rng(&input, &mut seeded(seed));

        assert!(trajectory.first().unwrap() < 1.0);
        assert!(crossing.is_none());
        assert_eq!(find_crossing(trajectory.as_slice(), 1.0), None);
    }
}

#[test]
fn higher_coefficient_declines_faster() {
    let sim = MotivationSimulator::new();
    let male = sim
        .simulate_with_rng(&SimulationInput::new(60, Gender::Male, 3.5), &mut seeded(2))
        .0;
    let female = sim
        .simulate_with_rng(&SimulationInput::new(60, Gender::Female, 3.5), &mut seeded(2))
        .0;
    assert!(female.week(10).unwrap() < male.week(10).unwrap());
}
