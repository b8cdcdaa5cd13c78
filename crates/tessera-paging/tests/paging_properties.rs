//! Property suites for the paging state machine.
//!
//! Run:
//!   cargo test -p tessera-paging --test paging_properties

use proptest::prelude::*;
use tessera_paging::{
    PageChange, PagePresence, PagingConfig, PagingMachine, PagingOwnership, total_pages,
};

#[derive(Debug, Clone)]
enum Op {
    GoTo(i64),
    Next,
    Prev,
    Drag { from: f64, to: f64, leave: bool },
    SetChildren(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-20i64..20).prop_map(Op::GoTo),
        Just(Op::Next),
        Just(Op::Prev),
        (0u16..800, 0u16..800, any::<bool>()).prop_map(|(from, to, leave)| Op::Drag {
            from: f64::from(from),
            to: f64::from(to),
            leave,
        }),
        (0usize..20).prop_map(Op::SetChildren),
    ]
}

fn apply(machine: &mut PagingMachine, op: &Op) -> Option<PageChange> {
    match *op {
        Op::GoTo(target) => Some(machine.go_to_page(target)),
        Op::Next => Some(machine.next()),
        Op::Prev => Some(machine.prev()),
        Op::Drag { from, to, leave } => {
            machine.pointer_down(from);
            machine.pointer_move(to);
            if leave {
                machine.pointer_leave()
            } else {
                machine.pointer_up()
            }
        }
        Op::SetChildren(n) => {
            machine.set_child_count(n);
            None
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn page_stays_in_bounds(
        page_size in 0usize..5,
        children in 0usize..20,
        looping in any::<bool>(),
        ops in proptest::collection::vec(op(), 0..40),
    ) {
        let cfg = PagingConfig::slider(page_size).looping(looping);
        let mut machine = PagingMachine::new(cfg, children, None);
        for op in &ops {
            if let Some(change) = apply(&mut machine, op) {
                prop_assert!(change.to < machine.total_pages());
                prop_assert_eq!(machine.current_page(), change.to);
            }
            prop_assert!(machine.total_pages() >= 1);
            prop_assert!(machine.current_page() < machine.total_pages());
            prop_assert_eq!(machine.state().drag_delta, 0.0);
        }
    }

    #[test]
    fn external_page_is_never_written(
        start in 0usize..6,
        ops in proptest::collection::vec(op(), 0..40),
    ) {
        let mut machine = PagingMachine::new(PagingConfig::slider(1).looping(true), 6, Some(start));
        for op in &ops {
            apply(&mut machine, op);
            prop_assert_eq!(machine.ownership(), PagingOwnership::External(start));
        }
    }

    #[test]
    fn total_pages_covers_every_child(page_size in 1usize..10, children in 0usize..100) {
        let total = total_pages(page_size, children);
        prop_assert!(total * page_size >= children);
        prop_assert!(total == 1 || (total - 1) * page_size < children);
    }

    #[test]
    fn view_partitions_children(
        page_size in 1usize..5,
        children in 0usize..20,
        page in 0usize..6,
        lazy in any::<bool>(),
    ) {
        let cfg = PagingConfig::pages(page_size).lazy(lazy);
        let mut machine = PagingMachine::new(cfg, children, None);
        machine.go_to_page(i64::try_from(page).unwrap_or(0));
        let view = machine.view();
        let active = view.active().count();
        let expected = children
            .saturating_sub(view.page * page_size)
            .min(page_size);
        prop_assert_eq!(active, expected);
        if lazy {
            prop_assert_eq!(view.slots.len(), active);
        } else {
            prop_assert_eq!(view.slots.len(), children);
            prop_assert!(view.slots.iter().all(|s| s.presence != PagePresence::Track));
        }
    }
}

#[test]
fn seven_children_in_threes_wrap_when_looping() {
    let mut machine = PagingMachine::new(PagingConfig::pages(3).looping(true), 7, None);
    assert_eq!(machine.total_pages(), 3);
    assert_eq!(machine.go_to_page(3).to, 0);
    assert_eq!(machine.go_to_page(-1).to, 2);
}

#[test]
fn swipe_left_navigates_exactly_once() {
    let mut machine = PagingMachine::new(PagingConfig::slider(1), 4, None);
    machine.go_to_page(1);
    machine.pointer_down(100.0);
    machine.pointer_move(40.0);
    let change = machine.pointer_up();
    assert_eq!(change, Some(PageChange { from: 1, to: 2 }));
    assert_eq!(machine.state().drag_delta, 0.0);
    assert_eq!(machine.pointer_up(), None);
    assert_eq!(machine.current_page(), 2);
}
