mod common;

use proclab_api::imp::task::{WaitPid, reap};
use proclab_api::scenario::priority::{PriorityConfig, run};
use proclab_process::ProcError;
use std::collections::BTreeSet;

#[test]
fn every_priority_child_completes() {
    let _guard = common::serial();
    let config = PriorityConfig {
        increments: vec![0, 5, 10],
        iterations: 100_000,
        cpu: None,
    };
    let completions = run(&config).unwrap();

    assert_eq!(completions.len(), 3);
    assert_eq!(
        completions.iter().map(|c| c.rank).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(completions.iter().all(|c| c.status.success()));
    let increments: BTreeSet<_> = completions.iter().filter_map(|c| c.increment).collect();
    assert_eq!(increments, BTreeSet::from([0, 5, 10]));
    assert_eq!(
        completions.iter().map(|c| c.pid).collect::<BTreeSet<_>>().len(),
        3
    );
    assert!(matches!(reap(WaitPid::Any), Err(ProcError::NoChildren)));
}

#[test]
fn pinned_children_share_cpu_zero() {
    let _guard = common::serial();
    let completions = run(&PriorityConfig {
        increments: vec![0, 19],
        iterations: 10_000,
        cpu: Some(0),
    })
    .unwrap();
    assert_eq!(completions.len(), 2);
    assert!(completions.iter().all(|c| c.status.success()));
}
