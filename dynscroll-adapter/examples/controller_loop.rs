use dynscroll::{DynScrollOptions, Entry, LoadPoll, LoadRequest, Loaded};
use dynscroll_adapter::{Controller, ScrollHost};

/// A stand-in for a real scroll container.
struct Container {
    offset: f64,
    height: f64,
}

impl ScrollHost for Container {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn viewport_size(&self) -> f64 {
        self.height
    }

    fn write_scroll_offset(&mut self, offset: f64) {
        println!("  host: scroll -> {offset}");
        self.offset = offset;
    }

    fn freeze_scrollbar(&mut self, frozen: bool) {
        println!("  host: freeze={frozen}");
    }
}

fn feed(req: LoadRequest<'_, String>) -> LoadPoll<String> {
    let items: Vec<Entry<String>> = (0..15)
        .map(|i| {
            let slot = req.factory.slot(i, 15);
            Entry::new(slot.index, 60.0, format!("post {}", slot.index))
        })
        .collect();
    LoadPoll::Ready(Ok(Loaded::Items(items)))
}

fn main() {
    // Example: the per-frame loop of a host that scrolls both ways through an endless feed.
    let mut host = Container {
        offset: 0.0,
        height: 500.0,
    };
    let mut c: Controller<String, u32> =
        Controller::with_load_more(DynScrollOptions::new().with_space(5000.0, 5000.0), feed);
    c.mount(&mut host);

    let mut now = 0;
    for step in 0..30 {
        now += 16;
        if step < 20 {
            // User flings upward.
            let offset = host.scroll_offset() - 120.0;
            host.offset = offset;
            c.on_scroll(offset, now);
        }
        let report = c.frame(now, &mut host);
        let state = c.engine().state();
        println!(
            "t={now} window={}..{} prepend={} scrolling={} applied={}",
            state.start_index,
            state.end_index(),
            state.prepend_space,
            c.activity().is_scrolling(),
            report.applied
        );
    }
}
