#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tessera_paging::{PagingConfig, PagingMachine, PagingOwnership};
use web_time::{Duration, Instant};

#[derive(Debug, Arbitrary)]
enum Op {
    GoTo(i16),
    Next,
    Prev,
    Down(u16),
    Move(u16),
    Up,
    Leave,
    SetChildren(u8),
    Tick(u16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    page_size: u8,
    children: u8,
    looping: bool,
    slider: bool,
    lazy: bool,
    controlled: Option<u8>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let base = if input.slider {
        PagingConfig::slider(usize::from(input.page_size % 8))
    } else {
        PagingConfig::pages(usize::from(input.page_size % 8))
    };
    let config = base.looping(input.looping).lazy(input.lazy).autoplay(50);
    let controlled = input.controlled.map(usize::from);
    let mut machine = PagingMachine::new(config, usize::from(input.children % 32), controlled);

    let start = Instant::now();
    let mut elapsed = Duration::ZERO;
    for op in input.ops.iter().take(256) {
        let change = match *op {
            Op::GoTo(n) => Some(machine.go_to_page(i64::from(n))),
            Op::Next => Some(machine.next()),
            Op::Prev => Some(machine.prev()),
            Op::Down(x) => {
                machine.pointer_down(f64::from(x));
                None
            }
            Op::Move(x) => {
                machine.pointer_move(f64::from(x));
                None
            }
            Op::Up => machine.pointer_up(),
            Op::Leave => machine.pointer_leave(),
            Op::SetChildren(n) => {
                machine.set_child_count(usize::from(n % 32));
                None
            }
            Op::Tick(ms) => {
                elapsed += Duration::from_millis(u64::from(ms));
                machine.tick(start + elapsed)
            }
        };

        let total = machine.total_pages();
        assert!(total >= 1);
        assert!(machine.current_page() < total);
        if let Some(change) = change {
            assert!(change.to < total, "{change:?} beyond {total} pages");
        }
        if let (Some(page), PagingOwnership::External(owned)) = (controlled, machine.ownership()) {
            assert_eq!(page, owned, "external page written");
        }

        let view = machine.view();
        assert!(view.slots.len() <= machine.child_count());
        assert!(view.slots.windows(2).all(|w| w[0].child < w[1].child));
    }
});
