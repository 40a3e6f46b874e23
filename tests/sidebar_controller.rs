use approx::assert_relative_eq;
use sidebar_ui::prelude::*;

const NARROW: f64 = 600.0;
const WIDE: f64 = 1024.0;

fn controller(page: MemoryPage) -> SidebarController<MemoryPage> {
    SidebarController::new(SidebarConfig::default(), page)
}

fn narrow() -> SidebarController<MemoryPage> {
    controller(MemoryPage::new(NARROW))
}

/// Panel, overlay and body markers agree with the controller, and the toggle
/// reflects it too
fn assert_consistent(sidebar: &SidebarController<MemoryPage>) {
    let open = sidebar.is_open();
    assert_eq!(sidebar.page().markers(), [Some(open); 3]);
    assert_eq!(sidebar.page().toggle_expanded(), Some(open));
    let expected_label = sidebar.config().toggle_label(open).to_string();
    assert_eq!(sidebar.page().toggle_label(), Some(expected_label.as_str()));
    if !open {
        assert_eq!(sidebar.page().body_top(), None);
    }
}

fn nav_click(href: &str) -> Trigger {
    Trigger::NavLinkActivated {
        href: Some(href.to_string()),
    }
}

#[test]
fn open_twice_keeps_first_scroll_offset() {
    let mut sidebar = narrow();
    sidebar.page_mut().set_scroll_y(420.0);
    sidebar.open();
    sidebar.page_mut().set_scroll_y(0.0);
    sidebar.open();

    assert!(sidebar.is_open());
    assert_eq!(sidebar.state().saved_scroll_offset(), Some(420.0));
    assert_eq!(sidebar.page().body_top(), Some(-420.0));
    assert_consistent(&sidebar);
}

#[test]
fn close_twice_restores_scroll_once() {
    let mut sidebar = narrow();
    sidebar.page_mut().set_scroll_y(300.0);
    sidebar.open();
    sidebar.page_mut().set_scroll_y(0.0);
    sidebar.close();
    assert_relative_eq!(sidebar.page().scroll_y(), 300.0);

    sidebar.page_mut().set_scroll_y(50.0);
    sidebar.close();
    assert_relative_eq!(sidebar.page().scroll_y(), 50.0);
    assert_consistent(&sidebar);
}

#[test]
fn scroll_position_round_trips_through_open_and_close() {
    let mut sidebar = narrow();
    sidebar.page_mut().set_scroll_y(1250.0);
    sidebar.handle(Trigger::ToggleActivated);
    assert_eq!(sidebar.page().body_top(), Some(-1250.0));

    // the pinned body reports no scroll while open
    sidebar.page_mut().set_scroll_y(0.0);
    sidebar.handle(Trigger::OverlayActivated);

    assert!(!sidebar.is_open());
    assert_relative_eq!(sidebar.page().scroll_y(), 1250.0);
    assert_eq!(sidebar.page().body_top(), None);
    assert_eq!(sidebar.state().saved_scroll_offset(), None);
}

#[test]
fn closing_restores_vertical_scroll_only() {
    let mut sidebar = narrow();
    sidebar.page_mut().set_scroll_x(35.0);
    sidebar.page_mut().set_scroll_y(700.0);
    sidebar.open();
    sidebar.page_mut().set_scroll_y(0.0);
    sidebar.close();

    assert_relative_eq!(sidebar.page().scroll_y(), 700.0);
    assert_relative_eq!(sidebar.page().scroll_x(), 35.0);
}

#[test]
fn escape_hides_every_open_modal() {
    let mut sidebar = narrow();
    sidebar.page_mut().open_modal();
    sidebar.page_mut().open_modal();
    sidebar.handle(Trigger::Key(KeyInput::escape()));
    assert_eq!(sidebar.page().open_modals(), 0);
}

#[test]
fn markers_stay_consistent_over_trigger_sequences() {
    let mut sidebar = narrow();
    let sequence = vec![
        Trigger::ToggleActivated,
        Trigger::PageActivated(Target::Panel),
        Trigger::ToggleActivated,
        Trigger::ToggleActivated,
        Trigger::PageActivated(Target::Outside),
        Trigger::OverlayActivated,
        Trigger::ToggleActivated,
        Trigger::Key(KeyInput::new("a")),
        Trigger::Resized,
        Trigger::Key(KeyInput::escape()),
        Trigger::PageLoaded,
        Trigger::ToggleActivated,
    ];
    for trigger in sequence {
        sidebar.handle(trigger);
        assert_consistent(&sidebar);
    }
    assert!(sidebar.is_open());
}

#[test]
fn toggle_carries_accessible_labels() {
    let mut sidebar = narrow();
    sidebar.toggle();
    assert_eq!(sidebar.page().toggle_expanded(), Some(true));
    assert_eq!(sidebar.page().toggle_label(), Some("close menu"));
    sidebar.toggle();
    assert_eq!(sidebar.page().toggle_expanded(), Some(false));
    assert_eq!(sidebar.page().toggle_label(), Some("open menu"));
}

#[test]
fn localized_labels_are_projected() {
    let config = UiConfig::korean().sidebar;
    let mut sidebar = SidebarController::new(config, MemoryPage::new(NARROW));
    sidebar.open();
    assert_eq!(sidebar.page().toggle_label(), Some("메뉴 닫기"));
}

#[test]
fn toggle_activation_does_not_bubble() {
    let mut sidebar = narrow();
    let outcome = sidebar.handle(Trigger::ToggleActivated);
    assert!(outcome.stop_propagation);
    assert!(outcome.prevent_default);
    assert!(sidebar.is_open());
}

#[test]
fn widening_past_breakpoint_closes() {
    let mut sidebar = narrow();
    sidebar.open();
    sidebar.page_mut().set_viewport_width(800.0);
    sidebar.handle(Trigger::Resized);
    assert!(!sidebar.is_open());
    assert_consistent(&sidebar);
}

#[test]
fn narrowing_never_opens() {
    let mut sidebar = controller(MemoryPage::new(800.0));
    sidebar.page_mut().set_viewport_width(NARROW);
    sidebar.handle(Trigger::Resized);
    assert!(!sidebar.is_open());
}

#[test]
fn resize_within_narrow_range_keeps_panel_open() {
    let mut sidebar = narrow();
    sidebar.open();
    sidebar.page_mut().set_viewport_width(700.0);
    sidebar.handle(Trigger::Resized);
    assert!(sidebar.is_open());
}

#[test]
fn breakpoint_width_itself_counts_as_wide() {
    let mut sidebar = narrow();
    sidebar.open();
    sidebar.page_mut().set_viewport_width(768.0);
    sidebar.handle(Trigger::Resized);
    assert!(!sidebar.is_open());
}

#[test]
fn outside_click_closes_but_panel_click_does_not() {
    let mut sidebar = narrow();
    sidebar.open();
    sidebar.handle(Trigger::PageActivated(Target::Panel));
    assert!(sidebar.is_open());

    let outcome = sidebar.handle(Trigger::PageActivated(Target::Outside));
    assert!(!sidebar.is_open());
    assert!(!outcome.prevent_default);
}

#[test]
fn nav_link_closes_after_delay_on_narrow_viewport() {
    let mut sidebar = controller(MemoryPage::new(500.0));
    sidebar.open();
    sidebar.handle(nav_click("/reports"));
    assert!(sidebar.is_open());

    sidebar.page_mut().advance(99.0);
    assert_eq!(sidebar.run_due(), 0);
    assert!(sidebar.is_open());

    sidebar.page_mut().advance(1.0);
    sidebar.run_due();
    assert!(!sidebar.is_open());
    assert_consistent(&sidebar);
}

#[test]
fn nav_link_on_wide_viewport_schedules_nothing() {
    let mut sidebar = controller(MemoryPage::new(WIDE));
    sidebar.handle(nav_click("/reports"));
    assert_eq!(sidebar.next_due(), None);
}

#[test]
fn placeholder_links_do_not_close() {
    for href in ["#", "", "javascript:void(0)", "JavaScript:alert(1)"] {
        let mut sidebar = controller(MemoryPage::new(500.0));
        sidebar.open();
        sidebar.page_mut().advance(1000.0);
        sidebar.run_due();
        sidebar.handle(nav_click(href));
        sidebar.page_mut().advance(500.0);
        sidebar.run_due();
        assert!(sidebar.is_open(), "href {href:?} closed the sidebar");
    }

    let mut sidebar = controller(MemoryPage::new(500.0));
    sidebar.open();
    sidebar.handle(Trigger::NavLinkActivated { href: None });
    assert!(!sidebar
        .pending()
        .iter()
        .any(|p| p.task == Deferred::CloseAfterNavigation));
}

#[test]
fn reopening_cancels_pending_navigation_close() {
    let mut sidebar = controller(MemoryPage::new(500.0));
    sidebar.open();
    sidebar.handle(nav_click("/reports"));
    sidebar.close();
    sidebar.page_mut().advance(50.0);
    sidebar.open();

    sidebar.page_mut().advance(200.0);
    sidebar.run_due();
    assert!(sidebar.is_open());
}

#[test]
fn escape_closes_and_dismisses_modals() {
    let mut sidebar = narrow();
    sidebar.page_mut().open_modal();
    sidebar.open();

    let outcome = sidebar.handle(Trigger::Key(KeyInput::escape()));
    assert!(!sidebar.is_open());
    assert_eq!(sidebar.page().open_modals(), 0);
    assert!(!outcome.prevent_default);
}

#[test]
fn escape_while_closed_still_dismisses_modals() {
    let mut sidebar = narrow();
    sidebar.page_mut().open_modal();
    sidebar.handle(Trigger::Key(KeyInput {
        key: String::new(),
        key_code: 27,
        ctrl: false,
        meta: false,
    }));
    assert_eq!(sidebar.page().open_modals(), 0);
    assert!(!sidebar.is_open());
    assert_consistent(&sidebar);
}

#[test]
fn page_load_forces_closed_on_narrow_viewport() {
    let mut sidebar = controller(MemoryPage::new(NARROW).with_residual_open_markup());
    assert_eq!(sidebar.page().markers(), [Some(true); 3]);

    sidebar.page_mut().set_scroll_y(90.0);
    sidebar.handle(Trigger::PageLoaded);

    assert_consistent(&sidebar);
    // nothing was open, so nothing to restore
    assert_relative_eq!(sidebar.page().scroll_y(), 90.0);
}

#[test]
fn page_load_on_wide_viewport_clears_residual_markup() {
    let mut sidebar = controller(MemoryPage::new(WIDE).with_residual_open_markup());
    sidebar.page_mut().set_scroll_y(90.0);
    sidebar.handle(Trigger::PageLoaded);

    assert_consistent(&sidebar);
    assert_relative_eq!(sidebar.page().scroll_y(), 90.0);
}

#[test]
fn first_toggle_after_narrowing_opens_a_cleanly_closed_panel() {
    let mut sidebar = controller(MemoryPage::new(WIDE).with_residual_open_markup());
    sidebar.handle(Trigger::PageLoaded);
    sidebar.page_mut().set_viewport_width(NARROW);
    sidebar.handle(Trigger::Resized);
    assert!(!sidebar.is_open());
    assert_eq!(sidebar.page().markers(), [Some(false); 3]);

    sidebar.handle(Trigger::ToggleActivated);
    assert!(sidebar.is_open());
    assert_consistent(&sidebar);

    sidebar.handle(Trigger::ToggleActivated);
    assert!(!sidebar.is_open());
    assert_consistent(&sidebar);
}

#[test]
fn sync_at_bind_time_agrees_before_load_fires() {
    let mut sidebar = controller(MemoryPage::new(WIDE).with_residual_open_markup());
    sidebar.sync();
    assert_consistent(&sidebar);

    sidebar.page_mut().set_viewport_width(NARROW);
    sidebar.handle(Trigger::Resized);
    assert_consistent(&sidebar);
}

#[test]
fn missing_surfaces_are_silent() {
    let page = MemoryPage::new(NARROW)
        .without(Surface::Panel)
        .without(Surface::Overlay)
        .without(Surface::Toggle);
    let mut sidebar = controller(page);

    sidebar.handle(Trigger::ToggleActivated);
    assert!(sidebar.is_open());
    assert_eq!(sidebar.page().markers(), [None, None, Some(true)]);
    assert_eq!(sidebar.page().toggle_expanded(), None);

    sidebar.page_mut().advance(300.0);
    sidebar.run_due();
    assert!(!sidebar.page().link_focused());

    sidebar.handle(Trigger::Key(KeyInput::escape()));
    assert!(!sidebar.is_open());
    assert_eq!(sidebar.page().markers(), [None, None, Some(false)]);
}

#[test]
fn first_link_focused_after_open_delay() {
    let mut sidebar = narrow();
    sidebar.open();
    sidebar.page_mut().advance(299.0);
    sidebar.run_due();
    assert!(!sidebar.page().link_focused());

    sidebar.page_mut().advance(1.0);
    sidebar.run_due();
    assert!(sidebar.page().link_focused());
}

#[test]
fn closing_before_focus_delay_skips_focus() {
    let mut sidebar = narrow();
    sidebar.open();
    sidebar.page_mut().advance(100.0);
    sidebar.close();
    sidebar.page_mut().advance(500.0);
    sidebar.run_due();
    assert!(!sidebar.page().link_focused());
}

#[test]
fn panel_without_links_takes_no_focus() {
    let mut sidebar = controller(MemoryPage::new(NARROW).without_nav_links());
    sidebar.open();
    sidebar.page_mut().advance(300.0);
    sidebar.run_due();
    assert!(sidebar.is_open());
    assert!(!sidebar.page().link_focused());
}

#[test]
fn custom_delays_are_honoured() {
    let config = SidebarConfig::default().with_delays(50, 10);
    let mut sidebar = SidebarController::new(config, MemoryPage::new(500.0));
    sidebar.open();
    assert_eq!(sidebar.next_due(), Some(50.0));
    sidebar.handle(nav_click("/teams"));
    assert_eq!(sidebar.next_due(), Some(10.0));
    sidebar.page_mut().advance(10.0);
    sidebar.run_due();
    assert!(!sidebar.is_open());
}

#[test]
fn search_shortcut_focuses_search_and_suppresses_browser() {
    let mut sidebar = controller(MemoryPage::new(WIDE));
    let outcome = sidebar.handle(Trigger::Key(KeyInput::command("k")));
    assert!(outcome.prevent_default);
    assert!(sidebar.page().search_focused());
    assert!(!sidebar.is_open());
}

#[test]
fn create_shortcut_follows_create_link() {
    let page = MemoryPage::new(WIDE).with_create_link("/reports/create");
    let mut sidebar = controller(page);
    let outcome = sidebar.handle(Trigger::Key(KeyInput {
        key: "N".to_string(),
        key_code: 78,
        ctrl: false,
        meta: true,
    }));
    assert!(outcome.prevent_default);
    assert_eq!(sidebar.page().location(), Some("/reports/create"));
}

#[test]
fn plain_letters_are_not_shortcuts() {
    let mut sidebar = controller(MemoryPage::new(WIDE).with_create_link("/create"));
    let outcome = sidebar.handle(Trigger::Key(KeyInput::new("n")));
    assert_eq!(outcome, EventOutcome::pass());
    assert_eq!(sidebar.page().location(), None);
}

#[test]
fn snapshot_reports_state_as_json() {
    let mut sidebar = narrow();
    sidebar.page_mut().set_scroll_y(64.0);
    sidebar.open();

    let snapshot = sidebar.snapshot();
    assert!(snapshot.is_open);
    assert_eq!(snapshot.saved_scroll_offset, Some(64.0));
    assert_eq!(snapshot.pending.len(), 1);

    let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
    assert_eq!(json["is_open"], true);
    assert_eq!(json["panel_exists"], true);
    assert_relative_eq!(json["viewport_width"].as_f64().unwrap(), NARROW);
}
