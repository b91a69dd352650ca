use dynscroll::{
    AnchorStrategy, DynScroll, DynScrollOptions, Entry, LoadPoll, LoadRequest, Loaded, SizeUpdate,
};

fn main() {
    // Example: entries are inserted with an estimate and corrected once rendered.
    //
    // Size changes above the anchor are folded into the head padding, so the entry under the
    // user's finger stays put.
    let options = DynScrollOptions::new()
        .with_head_locked(true)
        .with_preload_range(300.0)
        .with_anchor_strategy(AnchorStrategy::Touch);
    let mut ds = DynScroll::with_load_more(options, |req: LoadRequest<'_, u32>| {
        let total = 10;
        let items: Vec<Entry<u32>> = (0..total)
            .map(|i| req.factory.entry(i, total, 50.0, i as u32))
            .collect();
        LoadPoll::Ready(Ok(Loaded::Items(items)))
    });

    ds.mount(400.0);
    ds.tick();
    ds.set_scroll_offset(220.0);
    ds.set_last_touch_position(100.0);
    println!("anchor before: {:?}", ds.current_anchor());

    // The "renderer" measured the first five entries.
    ds.patch((0..5).map(|index| SizeUpdate {
        index,
        size: 80.0,
    }));
    let report = ds.tick();
    println!(
        "correction={:?} anchor after: {:?}",
        report.scroll_correction,
        ds.current_anchor()
    );
}
