//! Script replay against the headless host

use anyhow::Result;
use scrollzone::{Scrollzone, ScrollzoneConfig};
use scrollzone_platform::headless::HeadlessHost;
use scrollzone_platform::{Clock, EventScope, InputEvent, Point, ScrollContainer};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

use crate::script::{MoveSource, Script, Step};

/// One `on_scroll_change` notification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRecord {
    /// Frames run so far when the scroll happened
    pub frame: u64,
    /// Simulated time
    pub time: Duration,
    pub left: f32,
    pub top: f32,
}

/// Outcome of a replay
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub records: Vec<ScrollRecord>,
    pub final_left: f32,
    pub final_top: f32,
    pub frames_run: u64,
}

/// Replay `script` with `config`
pub fn run(script: &Script, config: ScrollzoneConfig) -> Result<Report> {
    let spec = &script.container;
    let host = HeadlessHost::new(spec.rect(), spec.content_width, spec.content_height);
    host.root().scroll_to(spec.scroll_left, spec.scroll_top);

    let records: Rc<RefCell<Vec<ScrollRecord>>> = Rc::default();
    let zone = {
        let records = records.clone();
        let frames = host.frame_queue().clone();
        let clock = host.manual_clock().clone();
        Scrollzone::builder(config)
            .on_scroll_change(move |left, top| {
                records.borrow_mut().push(ScrollRecord {
                    frame: frames.frames_run(),
                    time: clock.now(),
                    left,
                    top,
                });
            })
            .mount(&host)?
    };

    for (index, step) in script.steps.iter().enumerate() {
        debug!("step {}: {:?}", index, step);
        apply(&host, step);
    }

    zone.dispose();

    let root = host.root();
    let report = Report {
        records: records.take(),
        final_left: root.scroll_left(),
        final_top: root.scroll_top(),
        frames_run: host.frame_queue().frames_run(),
    };
    Ok(report)
}

fn apply(host: &HeadlessHost, step: &Step) {
    match step {
        Step::DragStart => host.begin_drag(),
        Step::DragEnd => host.end_drag(),
        Step::Move { x, y, source } => {
            let event = match source {
                MoveSource::Drag => InputEvent::drag_over(*x, *y),
                MoveSource::Mouse => InputEvent::mouse_move(*x, *y),
                MoveSource::Touch => InputEvent::touch_move(*x, *y),
            };
            // Touch events stay with the element the touch began on
            let over_container = host.root().bounding_rect().contains(Point::new(*x, *y));
            let origin = if over_container || *source == MoveSource::Touch {
                EventScope::Container
            } else {
                EventScope::Body
            };
            host.dispatch_from(origin, &event);
        }
        Step::Frames { count, ms } => match ms {
            Some(ms) => {
                for _ in 0..*count {
                    host.advance(Duration::from_millis(*ms));
                    host.frame_queue().run_frame();
                }
            }
            None => {
                host.run_frames(*count);
            }
        },
        Step::Wait { ms } => host.advance(Duration::from_millis(*ms)),
        Step::Drop => {
            host.dispatch_from(EventScope::Body, &InputEvent::Drop);
            host.end_drag();
        }
    }
}
