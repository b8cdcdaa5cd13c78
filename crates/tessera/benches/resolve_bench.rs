//! Benchmarks for section resolution and validation.
//!
//! Run with: cargo bench -p tessera

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tessera::layout::{
    Breakpoint, LayoutRule, LocatorDescriptor, LogicalRect, LogicalSize, Responsive, SectionMode,
    validate_section,
};
use tessera::paging::PagingConfig;
use tessera::{
    Container, EngineConfig, LayoutEngine, Locator, NoopObserver, Section, SectionContext,
    resolve_section,
};

/// A free section of `n` locators on a staggered grid, so neighbours overlap.
fn free_section(n: usize) -> Section {
    let mut section = Section::free("board", LogicalSize::new(1200.0, 800.0)).snap(8.0);
    for i in 0..n {
        let x = (i % 20) as f64 * 50.0;
        let y = (i / 20) as f64 * 40.0;
        let rect = Responsive::new(LogicalRect::new(x, y, 80.0, 60.0))
            .at(Breakpoint::Lg, LogicalRect::new(x + 4.0, y, 72.0, 60.0));
        section = section.locator(
            Locator::new(format!("l{i}"))
                .logical(rect)
                .rule(LayoutRule::when("<600").hidden(true))
                .rule(LayoutRule::when("1000-1400").offset_x(4.0)),
        );
    }
    section
}

fn bench_resolve_section(c: &mut Criterion) {
    let mut group = c.benchmark_group("tessera/resolve_section");
    let ctx = SectionContext {
        breakpoint: Breakpoint::Lg,
        viewport_width: 1100.0,
    };

    for n in [5, 20, 50, 100] {
        let section = free_section(n);
        group.bench_with_input(BenchmarkId::new("free", n), &section, |b, section| {
            b.iter(|| black_box(resolve_section(section, ctx, None, &mut NoopObserver)))
        });
    }

    group.finish();
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("tessera/validate_overlap");
    let size = Some(LogicalSize::new(1200.0, 800.0));

    for n in [10, 50, 200] {
        let locators: Vec<LocatorDescriptor> = (0..n)
            .map(|i| {
                let x = (i % 20) as f64 * 50.0;
                let y = (i / 20) as f64 * 40.0;
                LocatorDescriptor::new(format!("l{i}"))
                    .with_logical_rect(LogicalRect::new(x, y, 80.0, 60.0))
            })
            .collect();
        group.bench_with_input(BenchmarkId::new("pairs", n), &locators, |b, locators| {
            b.iter(|| black_box(validate_section("board", SectionMode::Free, size, locators)))
        });
    }

    group.finish();
}

fn bench_engine_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("tessera/engine_pass");

    let mut carousel = Section::new("carousel", SectionMode::Row)
        .paging(PagingConfig::slider(4).looping(true).controls(true, true));
    for i in 0..40 {
        carousel = carousel.locator(Locator::new(format!("c{i}")));
    }
    let container = Container::new("page")
        .section(free_section(30))
        .section(carousel);

    let mut engine = LayoutEngine::new(EngineConfig::default());
    engine.set_viewport_width(1100.0);
    group.bench_function("container", |b| {
        b.iter(|| black_box(engine.resolve(&container)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_resolve_section,
    bench_validation,
    bench_engine_pass
);
criterion_main!(benches);
