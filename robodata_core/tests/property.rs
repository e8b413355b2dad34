use std::collections::HashSet;

use proptest::prelude::*;
use robodata_core::{
    InputVector, SplitRatios, TargetVector, VelocityCfg, WindowPool, chunk, estimate_velocity,
    partition, shuffle_rng, split_sizes,
};

prop_compose! {
    // strictly increasing timestamps with jittered 5..50 ms steps
    fn timestamps_strategy()(steps in prop::collection::vec(5u32..50, 1..120)) -> Vec<f64> {
        let mut t = 1_000.0;
        steps.into_iter().map(|s| { t += f64::from(s); t }).collect()
    }
}

fn records(len: usize) -> (Vec<InputVector>, Vec<TargetVector>) {
    (
        (0..len).map(|i| [i as f64; 5]).collect(),
        (0..len).map(|i| [i as f64; 3]).collect(),
    )
}

proptest! {
    #[test]
    fn velocity_has_input_length_and_starts_at_zero(
        ts in timestamps_strategy(),
        taps in 1usize..30,
        seed in any::<u32>(),
    ) {
        let x: Vec<f64> = ts.iter().enumerate().map(|(i, _)| ((i as f64) * 0.1 + f64::from(seed % 7)).cos()).collect();
        let cfg = VelocityCfg { filter_taps: taps, ..VelocityCfg::default() };
        let v = estimate_velocity(&x, &ts, &cfg).unwrap();
        prop_assert_eq!(v.len(), ts.len());
        prop_assert_eq!(v[0], 0.0);
        prop_assert!(v.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn chunking_yields_floor_len_over_n_full_windows(len in 0usize..500, n in 1usize..64) {
        let (i, t) = records(len);
        let windows: Vec<_> = chunk(&i, &t, n).unwrap().collect();
        prop_assert_eq!(windows.len(), len / n);
        let covered = (len / n) * n;
        for w in &windows {
            prop_assert_eq!(w.len(), n);
            prop_assert_eq!(w.targets().len(), n);
            prop_assert!(w.id().start + n <= covered);
        }
    }

    #[test]
    fn split_sizes_never_exceed_pool(
        pool in 0usize..10_000,
        train in 0.0f64..=1.0,
        val in 0.0f64..=1.0,
        test in 0.0f64..=1.0,
    ) {
        let s = split_sizes(pool, &SplitRatios::new(train, val, test));
        prop_assert!(s.total() <= pool);
        prop_assert_eq!(s.train, (train * pool as f64).floor() as usize);
        if train + val + test <= 1.0 {
            prop_assert_eq!(s.validation, (val * pool as f64).floor() as usize);
            prop_assert_eq!(s.test, (test * pool as f64).floor() as usize);
        }
    }

    #[test]
    fn partition_is_disjoint(
        windows in 1usize..80,
        train in 0.0f64..=0.6,
        val in 0.0f64..=0.2,
        test in 0.0f64..=0.2,
        seed in any::<u64>(),
    ) {
        let (i, t) = records(windows * 3);
        let mut pool = WindowPool::new(3);
        pool.add_trace(chunk(&i, &t, 3).unwrap());
        let ratios = SplitRatios::new(train, val, test);
        let expected = split_sizes(windows, &ratios);

        let split = partition(pool, &ratios, &mut shuffle_rng(Some(seed))).unwrap();
        prop_assert_eq!(split.train.len(), expected.train);
        prop_assert_eq!(split.validation.len(), expected.validation);
        prop_assert_eq!(split.test.len(), expected.test);

        let mut seen = HashSet::new();
        for id in split.train.ids().chain(split.validation.ids()).chain(split.test.ids()) {
            prop_assert!(seen.insert(id));
        }
    }
}
