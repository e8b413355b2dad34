use robodata_core::error::DatasetError;
use robodata_core::{InputVector, RecordPairs, TargetVector, chunk};
use rstest::rstest;

fn records(len: usize) -> (Vec<InputVector>, Vec<TargetVector>) {
    let inputs = (0..len)
        .map(|i| {
            let f = i as f64;
            [f, f + 0.1, f + 0.2, f + 0.3, -f]
        })
        .collect();
    let targets = (0..len).map(|i| [i as f64, 0.5, -0.5]).collect();
    (inputs, targets)
}

#[rstest]
#[case(37, 10, 3)]
#[case(40, 10, 4)]
#[case(9, 10, 0)]
#[case(0, 3, 0)]
#[case(1, 1, 1)]
#[case(100, 7, 14)]
fn window_count_is_floor_of_length_over_n(
    #[case] len: usize,
    #[case] n: usize,
    #[case] expected: usize,
) {
    let (i, t) = records(len);
    let windows = chunk(&i, &t, n).unwrap();
    assert_eq!(windows.len(), expected);
    assert_eq!(windows.remainder(), len % n);

    let collected: Vec<_> = windows.collect();
    assert_eq!(collected.len(), expected);
    for (k, w) in collected.iter().enumerate() {
        assert_eq!(w.len(), n);
        assert_eq!(w.inputs().len(), w.targets().len());
        assert_eq!(w.id().start, k * n);
        assert_eq!(w.inputs(), &i[k * n..(k + 1) * n]);
        assert_eq!(w.targets(), &t[k * n..(k + 1) * n]);
    }
}

#[test]
fn trailing_records_never_appear() {
    let (i, t) = records(37);
    let seen: Vec<f64> = chunk(&i, &t, 10)
        .unwrap()
        .flat_map(|w| w.targets().iter().map(|v| v[0]).collect::<Vec<_>>())
        .collect();
    assert_eq!(seen.len(), 30);
    assert!(seen.iter().all(|&r| r < 30.0));
}

#[test]
fn windows_do_not_overlap() {
    let (i, t) = records(50);
    let starts: Vec<usize> = chunk(&i, &t, 5).unwrap().map(|w| w.id().start).collect();
    for pair in starts.windows(2) {
        assert_eq!(pair[1] - pair[0], 5);
    }
}

#[test]
fn mismatched_sequences_are_rejected() {
    let (i, _) = records(10);
    let (_, t) = records(9);
    let err = chunk(&i, &t, 3).unwrap_err();
    assert_eq!(
        err,
        DatasetError::LengthMismatch {
            what: "inputs vs targets",
            expected: 10,
            actual: 9
        }
    );
    assert!(RecordPairs::new(i, t).is_err());
}

#[test]
fn record_pairs_rechunk_identically() {
    let (i, t) = records(23);
    let pairs = RecordPairs::new(i, t).unwrap();
    let a: Vec<_> = pairs.windows(4).unwrap().collect();
    let b: Vec<_> = pairs.windows(4).unwrap().collect();
    assert_eq!(a, b);
    assert_eq!(a.len(), 5);
}

#[test]
fn trace_index_tags_windows() {
    let (i, t) = records(6);
    let ids: Vec<_> = chunk(&i, &t, 3)
        .unwrap()
        .with_trace_index(4)
        .map(|w| w.id().trace)
        .collect();
    assert_eq!(ids, vec![4, 4]);
}
