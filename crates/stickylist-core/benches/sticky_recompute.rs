use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stickylist_core::{StickyHeaderController, StickyListConfig};
use stickylist_testing::TestAdapter;

fn scrolled_controller() -> StickyHeaderController {
    let mut controller = StickyHeaderController::new(StickyListConfig::default());
    controller.set_size(480.0, 800.0);
    controller.set_adapter(Some(TestAdapter::sectioned(10_000, 12)));
    controller.layout();
    controller.scroll_by(5_000.0);
    controller
}

fn recompute_same_position(c: &mut Criterion) {
    let mut controller = scrolled_controller();
    let first = controller.first_visible_position();

    c.bench_function("sticky_recompute_same_position", |b| {
        b.iter(|| controller.update_or_clear_header(black_box(first)));
    });
}

fn scroll_tick(c: &mut Criterion) {
    let mut controller = scrolled_controller();
    let mut direction = 1.0;

    c.bench_function("sticky_scroll_tick", |b| {
        b.iter(|| {
            if !controller.scroll_by(black_box(7.0 * direction)) {
                direction = -direction;
            }
        });
    });
}

criterion_group!(benches, recompute_same_position, scroll_tick);
criterion_main!(benches);
