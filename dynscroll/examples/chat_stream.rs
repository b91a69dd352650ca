use std::collections::VecDeque;

use dynscroll::{DynScroll, DynScrollOptions, Edge, LoadPoll, LoadRequest, LoadTicket, Loaded};

fn main() {
    // Example: a chat log that starts at the newest message and loads history upward.
    //
    // Older messages are fetched "asynchronously": the item source answers `Pending`, and the
    // example completes the request on the next frame, the way a network callback would.
    let mut inflight: VecDeque<(LoadTicket, Edge, dynscroll::EntryFactory)> = VecDeque::new();
    let requests = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = std::rc::Rc::clone(&requests);

    let options = DynScrollOptions::new()
        .with_foot_locked(true)
        .with_space(2000.0, 0.0)
        .with_on_progress(Some(
            |current: Option<&dynscroll::Entry<String>>, offset: f64, _: &[dynscroll::Entry<String>]| {
                if let Some(entry) = current {
                    println!("  reading {:?} (+{offset})", entry.payload);
                }
            },
        ));
    let mut ds = DynScroll::with_load_more(options, move |req: LoadRequest<'_, String>| {
        sink.borrow_mut().push((req.ticket, req.edge, req.factory));
        LoadPoll::Pending
    });

    let scroll = ds.mount(600.0);
    println!("mounted at {scroll}");

    for frame in 0..8u64 {
        inflight.extend(requests.borrow_mut().drain(..));
        while let Some((ticket, edge, factory)) = inflight.pop_front() {
            // Messages have varying heights; history ends at index -60.
            let items = factory.batch((0..20).filter_map(|i| {
                let index = factory.slot(i, 20).index;
                (index >= -60).then(|| (40.0 + (index.rem_euclid(3) as f64) * 20.0, format!("msg {index}")))
            }));
            let result = if items.is_empty() {
                Ok(Loaded::EndOfStream)
            } else {
                Ok(Loaded::Items(items))
            };
            println!("frame {frame}: {edge:?} load -> {}", ds.complete(ticket, result));
        }

        let report = ds.tick();
        if let Some(correction) = report.scroll_correction {
            println!("frame {frame}: scroll corrected by {correction}");
        }

        // The user keeps scrolling toward older messages.
        let offset = ds.viewport().scroll_offset - 300.0;
        ds.set_scroll_offset(offset.max(0.0));
    }

    let state = ds.state();
    println!(
        "loaded {}..{} prepend={} head_ended={}",
        state.start_index,
        state.end_index(),
        state.prepend_space,
        ds.is_ended(Edge::Prev)
    );
}
