use std::hint::black_box;
use std::io;

use criterion::{Criterion, criterion_group, criterion_main};
use room_layout::logging::NullSink;
use room_layout::{
    AnsiRenderer, CellSurface, HostConfig, LayoutHost, LayoutLeaf, LayoutNode, LayoutStack,
    Logger, Size, Table, TextBlock, Theme,
};

fn nested_stack_relayout(c: &mut Criterion) {
    c.bench_function("nested_stack_relayout", |b| {
        let mut host = build_host();
        let mut width = 80;
        b.iter(|| {
            width = if width == 80 { 120 } else { 80 };
            host.relayout(black_box(Size::new(width, 40)))
                .expect("relayout");
        });
    });
}

fn table_compute_height(c: &mut Criterion) {
    c.bench_function("table_compute_height", |b| {
        let mut table = build_table(40);
        b.iter(|| table.compute_height(black_box(100)).expect("table height"));
    });
}

fn paint_and_render(c: &mut Criterion) {
    let mut host = build_host();
    host.relayout(Size::new(100, 40)).expect("relayout");
    let mut surface = CellSurface::new(100, 40);
    let mut renderer = AnsiRenderer::with_default();
    c.bench_function("paint_and_render", |b| {
        b.iter(|| {
            surface.clear();
            host.paint(&mut surface);
            renderer.invalidate();
            let mut sink = io::sink();
            renderer.render(&mut sink, &surface).expect("render");
        });
    });
}

fn build_host() -> LayoutHost {
    let sidebar = LayoutStack::vertical(LayoutNode::fixed(24).with_background("panel"))
        .with_margin(1)
        .with_child(LayoutLeaf::new(LayoutNode::fixed(3)))
        .with_child(TextBlock::new(
            LayoutNode::flexible(),
            "Sessions\nqueued\nrunning\nfinished",
        ))
        .with_child(LayoutLeaf::new(LayoutNode::auto()));

    let body = LayoutStack::horizontal(LayoutNode::auto())
        .with_margin(1)
        .with_child(build_table(12))
        .with_child(sidebar);

    let root = LayoutStack::vertical(LayoutNode::auto())
        .with_child(LayoutLeaf::new(LayoutNode::fixed(1).with_background("status")))
        .with_child(body)
        .with_child(LayoutLeaf::new(LayoutNode::percent(10)));

    let config = HostConfig {
        logger: Some(Logger::new(NullSink)),
        theme: Theme::default(),
        ..HostConfig::default()
    };
    let mut host = LayoutHost::new(root, config);
    host.config_mut().enable_metrics();
    host
}

fn build_table(rows: usize) -> Table {
    let mut table = Table::new(LayoutNode::auto()).with_margin(1);
    table.add_column(LayoutNode::fixed(8));
    table.add_column(LayoutNode::flexible());
    table.add_column(LayoutNode::auto());
    for row in 0..rows {
        table.add_row(LayoutNode::auto());
        table
            .push_cell(LayoutLeaf::new(LayoutNode::fixed(1)))
            .expect("cell");
        table
            .push_cell(TextBlock::new(
                LayoutNode::flexible(),
                format!("row {row} with some wrapped description text"),
            ))
            .expect("cell");
        table
            .push_cell(LayoutLeaf::new(LayoutNode::fixed(2)))
            .expect("cell");
    }
    table
}

criterion_group!(benches, nested_stack_relayout, table_compute_height, paint_and_render);
criterion_main!(benches);
