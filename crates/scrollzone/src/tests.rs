//! Controller scenarios driven through the headless host

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use scrollzone_platform::headless::{HeadlessContainer, HeadlessHost};
use scrollzone_platform::{EventScope, InputEvent, PlatformError, Rect, ScrollContainer};

use crate::prelude::*;
use crate::ContainerSource;

const BOX: Rect = Rect::new(0.0, 0.0, 600.0, 600.0);

type ScrollLog = Rc<RefCell<Vec<(f32, f32)>>>;

/// 600x600 viewport over 1200x2400 of content
fn host() -> HeadlessHost {
    HeadlessHost::new(BOX, 1200.0, 2400.0)
}

fn mount(host: &HeadlessHost, config: ScrollzoneConfig) -> (Scrollzone, ScrollLog) {
    let log: ScrollLog = Rc::default();
    let sink = log.clone();
    let zone = Scrollzone::builder(config)
        .on_scroll_change(move |left, top| sink.borrow_mut().push((left, top)))
        .mount(host)
        .unwrap();
    (zone, log)
}

fn all_listeners(host: &HeadlessHost) -> usize {
    EventScope::BUBBLE_ORDER
        .into_iter()
        .map(|scope| host.listener_count(scope))
        .sum()
}

/// Start a drag and move over the left edge, vertically centered
fn drag_to_left_edge(host: &HeadlessHost) {
    host.begin_drag();
    host.dispatch_from(EventScope::Container, &InputEvent::drag_over(0.0, 300.0));
}

// ============================================================================
// Scrolling
// ============================================================================

#[test]
fn test_left_edge_scrolls_after_two_ticks() {
    let host = host();
    host.root().scroll_to(100.0, 500.0);
    let (zone, log) = mount(&host, ScrollzoneConfig::default());

    drag_to_left_edge(&host);

    // First tick ran synchronously and did not scroll
    assert!(zone.is_scrolling());
    assert_eq!(zone.velocity(), Velocity::new(-1.0, 0.0));
    assert!(log.borrow().is_empty());

    host.step_frame();

    assert_eq!(*log.borrow(), vec![(70.0, 500.0)]);
    assert_eq!(host.root().scroll_left(), 70.0);
    assert_eq!(host.root().top_writes(), 0);
}

#[test]
fn test_scroll_is_clamped_at_zero() {
    let host = host();
    host.root().scroll_to(20.0, 0.0);
    let (_zone, log) = mount(&host, ScrollzoneConfig::default());

    drag_to_left_edge(&host);
    host.run_frames(3);

    assert_eq!(*log.borrow(), vec![(0.0, 0.0), (0.0, 0.0)]);
    assert_eq!(host.root().scroll_left(), 0.0);
}

#[test]
fn test_host_writes_between_ticks_are_the_new_base() {
    let host = host();
    host.root().scroll_to(100.0, 0.0);
    let (_zone, log) = mount(&host, ScrollzoneConfig::default());

    drag_to_left_edge(&host);
    host.step_frame();
    host.root().scroll_to(300.0, 0.0);
    host.run_frames(2);

    assert_eq!(*log.borrow(), vec![(70.0, 0.0), (270.0, 0.0)]);
}

#[test]
fn test_drag_end_cancels_loop_synchronously() {
    let host = host();
    host.root().scroll_to(300.0, 0.0);
    let (zone, log) = mount(&host, ScrollzoneConfig::default());

    drag_to_left_edge(&host);
    host.step_frame();
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(host.frame_queue().pending(), 1);

    host.end_drag();

    assert!(!zone.is_scrolling());
    assert!(!zone.is_attached());
    assert!(!zone.is_dragging());
    assert_eq!(zone.velocity(), Velocity::ZERO);
    assert_eq!(host.frame_queue().pending(), 0);
    assert_eq!(host.listener_count(EventScope::Window), 0);

    host.run_frames(5);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_dead_zone_stops_loop() {
    let host = host();
    host.root().scroll_to(300.0, 0.0);
    let (zone, _log) = mount(&host, ScrollzoneConfig::default());

    drag_to_left_edge(&host);
    host.step_frame();

    host.advance(Duration::from_millis(100));
    host.dispatch_to(EventScope::Window, &InputEvent::drag_over(300.0, 300.0));
    assert_eq!(zone.velocity(), Velocity::ZERO);

    // The scheduled tick sees zero velocity and does not reschedule
    host.step_frame();
    assert!(!zone.is_scrolling());
    assert_eq!(host.frame_queue().pending(), 0);
    assert!(zone.is_attached());

    // Back at the edge the loop restarts
    host.advance(Duration::from_millis(100));
    host.dispatch_to(EventScope::Window, &InputEvent::drag_over(0.0, 300.0));
    assert!(zone.is_scrolling());
}

#[test]
fn test_bounding_rect_is_read_per_sample() {
    let host = host();
    host.root().scroll_to(300.0, 0.0);
    let (zone, log) = mount(&host, ScrollzoneConfig::default());

    drag_to_left_edge(&host);
    assert_eq!(zone.velocity(), Velocity::new(-1.0, 0.0));

    // The page scrolled: the same pointer is now mid-container
    host.root().set_rect(Rect::new(-300.0, 0.0, 600.0, 600.0));
    host.advance(Duration::from_millis(100));
    host.dispatch_to(EventScope::Window, &InputEvent::drag_over(0.0, 300.0));
    assert_eq!(zone.velocity(), Velocity::ZERO);

    host.step_frame();
    assert!(!zone.is_scrolling());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_samples_are_throttled() {
    let host = host();
    let (zone, _log) = mount(&host, ScrollzoneConfig::default());

    drag_to_left_edge(&host);
    assert_eq!(zone.velocity(), Velocity::new(-1.0, 0.0));

    host.dispatch_to(EventScope::Window, &InputEvent::drag_over(600.0, 300.0));
    host.advance(Duration::from_millis(50));
    host.dispatch_to(EventScope::Window, &InputEvent::drag_over(600.0, 300.0));
    assert_eq!(zone.velocity(), Velocity::new(-1.0, 0.0));

    host.advance(Duration::from_millis(50));
    host.dispatch_to(EventScope::Window, &InputEvent::drag_over(600.0, 300.0));
    assert_eq!(zone.velocity(), Velocity::new(1.0, 0.0));
}

#[test]
fn test_zero_multiplier_never_scrolls() {
    let host = host();
    host.root().scroll_to(300.0, 300.0);
    let (zone, log) = mount(
        &host,
        ScrollzoneConfig::default().with_strength_multiplier(0.0),
    );

    drag_to_left_edge(&host);
    host.run_frames(4);

    assert!(zone.is_attached());
    assert!(!zone.is_scrolling());
    assert!(log.borrow().is_empty());
    assert_eq!(host.root().left_writes(), 0);
}

#[test]
fn test_custom_strength_functions() {
    let host = host();
    let log: ScrollLog = Rc::default();
    let sink = log.clone();
    let _zone = Scrollzone::builder(ScrollzoneConfig::default())
        .horizontal_strength(|_, _| 0.5)
        .vertical_strength(|_, _| 0.0)
        .on_scroll_change(move |left, top| sink.borrow_mut().push((left, top)))
        .mount(&host)
        .unwrap();

    host.begin_drag();
    host.dispatch_from(EventScope::Container, &InputEvent::drag_over(300.0, 300.0));
    host.run_frames(3);

    assert_eq!(*log.borrow(), vec![(15.0, 0.0), (30.0, 0.0)]);
}

// ============================================================================
// Listener tiers
// ============================================================================

#[test]
fn test_lazy_attach_waits_for_probe() {
    let host = host();
    let (zone, _log) = mount(&host, ScrollzoneConfig::default());

    assert_eq!(host.listener_count(EventScope::Container), 2);
    assert_eq!(host.listener_count(EventScope::Document), 1);
    assert_eq!(host.listener_count(EventScope::Window), 0);

    host.begin_drag();
    assert!(zone.is_dragging());
    assert!(!zone.is_attached());

    host.dispatch_from(EventScope::Container, &InputEvent::drag_over(300.0, 300.0));
    assert!(zone.is_attached());
    assert_eq!(host.listener_count(EventScope::Window), 5);
    // Dead zone: attached but idle
    assert!(!zone.is_scrolling());
}

#[test]
fn test_probe_ignored_without_drag() {
    let host = host();
    let (zone, _log) = mount(&host, ScrollzoneConfig::default());

    host.dispatch_from(EventScope::Container, &InputEvent::drag_over(0.0, 0.0));

    assert!(!zone.is_attached());
    assert!(!zone.is_scrolling());
}

#[test]
fn test_eager_attach_on_drag_start() {
    let host = host();
    host.root().scroll_to(0.0, 300.0);
    let (zone, log) = mount(&host, ScrollzoneConfig::touch());

    host.begin_drag();
    assert!(zone.is_attached());
    assert_eq!(host.listener_count(EventScope::Window), 5);

    // touchmove never reaches the container; the window sees it directly
    host.dispatch_to(EventScope::Window, &InputEvent::touch_move(300.0, 525.0));
    assert_eq!(zone.velocity(), Velocity::new(0.0, 0.5));

    host.step_frame();
    assert_eq!(*log.borrow(), vec![(0.0, 315.0)]);
}

#[test]
fn test_drag_in_progress_at_mount() {
    let host = host();
    host.begin_drag();

    let (zone, _log) = mount(&host, ScrollzoneConfig::touch());

    assert!(zone.is_dragging());
    assert!(zone.is_attached());
}

#[test]
fn test_html5_tracks_on_body() {
    let host = host();
    let (zone, _log) = mount(&host, ScrollzoneConfig::html5());

    assert_eq!(host.listener_count(EventScope::Container), 1);
    assert_eq!(host.listener_count(EventScope::Document), 0);

    host.begin_drag();
    host.dispatch_from(EventScope::Container, &InputEvent::mouse_move(0.0, 300.0));
    assert!(!zone.is_attached());

    host.dispatch_from(EventScope::Container, &InputEvent::drag_over(0.0, 300.0));
    assert!(zone.is_attached());
    assert_eq!(host.listener_count(EventScope::Body), 3);
    assert_eq!(host.listener_count(EventScope::Window), 0);
}

#[test]
fn test_drop_force_stops() {
    let host = host();
    host.root().scroll_to(300.0, 0.0);
    let (zone, log) = mount(&host, ScrollzoneConfig::default());

    drag_to_left_edge(&host);
    assert!(zone.is_scrolling());

    host.dispatch_to(EventScope::Window, &InputEvent::Drop);

    assert!(!zone.is_scrolling());
    assert!(!zone.is_attached());
    assert_eq!(host.frame_queue().pending(), 0);
    host.run_frames(3);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_drag_end_event_force_stops() {
    let host = host();
    host.root().scroll_to(300.0, 0.0);
    let (zone, _log) = mount(&host, ScrollzoneConfig::default());

    drag_to_left_edge(&host);
    host.dispatch_to(EventScope::Window, &InputEvent::DragEnd);

    assert!(!zone.is_scrolling());
    assert!(!zone.is_attached());
    // Probe tier survives for the next drag
    assert_eq!(host.listener_count(EventScope::Container), 2);
}

#[test]
fn test_direct_entry_points() {
    let host = host().without_drag_monitor();
    let (zone, _log) = mount(&host, ScrollzoneConfig::default());

    zone.handle_drag_state_change();
    zone.handle_probe_event(&InputEvent::drag_over(0.0, 300.0));
    assert!(!zone.is_attached());

    zone.handle_tracking_event(&InputEvent::Drop);
    assert!(!zone.is_scrolling());
}

// ============================================================================
// Mounting
// ============================================================================

#[test]
fn test_missing_monitor_stays_inert() {
    let host = host().without_drag_monitor();
    let (zone, log) = mount(&host, ScrollzoneConfig::touch());

    host.dispatch_from(EventScope::Container, &InputEvent::drag_over(0.0, 0.0));
    host.dispatch_to(EventScope::Window, &InputEvent::drag_over(0.0, 0.0));
    host.run_frames(3);

    assert!(!zone.is_dragging());
    assert!(!zone.is_attached());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_scrolling_element_container() {
    let host = host().with_scrolling_element(HeadlessContainer::new(
        Rect::new(0.0, 0.0, 800.0, 600.0),
        800.0,
        5000.0,
    ));
    let scroller = host.document_scroller().unwrap().clone();
    scroller.scroll_to(0.0, 1000.0);

    let (zone, log) = mount(
        &host,
        ScrollzoneConfig::default().with_container(ContainerSource::ScrollingElement),
    );
    assert_eq!(zone.container().bounding_rect().w, 800.0);

    host.begin_drag();
    host.dispatch_from(EventScope::Container, &InputEvent::drag_over(400.0, 600.0));
    host.step_frame();

    assert_eq!(*log.borrow(), vec![(0.0, 1030.0)]);
    assert_eq!(host.root().top_writes(), 0);
}

#[test]
fn test_missing_scrolling_element_fails() {
    let host = host();
    let result = Scrollzone::builder(
        ScrollzoneConfig::default().with_container(ContainerSource::ScrollingElement),
    )
    .mount(&host);

    assert!(matches!(
        result,
        Err(ScrollzoneError::Platform(
            PlatformError::ContainerUnavailable(_)
        ))
    ));
}

#[test]
fn test_missing_target_fails() {
    let host = host().without_target(EventScope::Window);
    let result = Scrollzone::builder(ScrollzoneConfig::default()).mount(&host);

    assert!(matches!(
        result,
        Err(ScrollzoneError::Platform(PlatformError::TargetUnavailable(
            EventScope::Window
        )))
    ));
    // html5 tracks on the body and does not need the window
    assert!(Scrollzone::builder(ScrollzoneConfig::html5())
        .mount(&host)
        .is_ok());
}

#[test]
fn test_invalid_config_fails() {
    let host = host();
    let result = Scrollzone::builder(ScrollzoneConfig::default().with_buffer(-5.0)).mount(&host);
    assert!(matches!(result, Err(ScrollzoneError::InvalidConfig(_))));
}

#[test]
fn test_container_resolver() {
    let host = host();
    let inner = Rc::new(HeadlessContainer::new(
        Rect::new(50.0, 50.0, 300.0, 300.0),
        300.0,
        900.0,
    ));
    let resolved = inner.clone();
    let zone = Scrollzone::builder(ScrollzoneConfig::default())
        .container_resolver(move |_: Rc<dyn ScrollContainer>| -> Rc<dyn ScrollContainer> {
            resolved.clone()
        })
        .mount(&host)
        .unwrap();

    assert_eq!(zone.container().bounding_rect(), Rect::new(50.0, 50.0, 300.0, 300.0));

    host.begin_drag();
    host.dispatch_from(EventScope::Container, &InputEvent::drag_over(200.0, 350.0));
    host.step_frame();

    assert_eq!(inner.scroll_top(), 30.0);
    assert_eq!(host.root().top_writes(), 0);
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_dispose_mid_drag() {
    let host = host();
    host.root().scroll_to(300.0, 0.0);
    let (zone, log) = mount(&host, ScrollzoneConfig::default());

    drag_to_left_edge(&host);
    host.step_frame();
    assert!(zone.is_scrolling());

    zone.dispose();

    assert!(zone.is_disposed());
    assert!(!zone.is_scrolling());
    assert_eq!(all_listeners(&host), 0);
    assert_eq!(host.monitor().unwrap().subscriber_count(), 0);
    assert_eq!(host.frame_queue().pending(), 0);

    zone.dispose();
    host.end_drag();
    host.run_frames(3);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_drop_disposes() {
    let host = host();
    let (zone, _log) = mount(&host, ScrollzoneConfig::touch());
    host.begin_drag();
    assert!(all_listeners(&host) > 0);

    drop(zone);

    assert_eq!(all_listeners(&host), 0);
    assert_eq!(host.monitor().unwrap().subscriber_count(), 0);
    host.dispatch_to(EventScope::Window, &InputEvent::drag_over(0.0, 0.0));
    host.end_drag();
}

#[test]
fn test_dispose_from_scroll_callback() {
    let host = host();
    host.root().scroll_to(300.0, 0.0);
    let slot: Rc<RefCell<Option<Scrollzone>>> = Rc::default();
    let calls = Rc::new(RefCell::new(0));

    let zone = {
        let slot = slot.clone();
        let calls = calls.clone();
        Scrollzone::builder(ScrollzoneConfig::default())
            .on_scroll_change(move |_, _| {
                *calls.borrow_mut() += 1;
                let zone = slot.borrow_mut().take();
                drop(zone);
            })
            .mount(&host)
            .unwrap()
    };
    *slot.borrow_mut() = Some(zone);

    drag_to_left_edge(&host);
    host.run_frames(5);

    assert_eq!(*calls.borrow(), 1);
    assert!(slot.borrow().is_none());
    assert_eq!(all_listeners(&host), 0);
    assert_eq!(host.frame_queue().pending(), 0);
}
