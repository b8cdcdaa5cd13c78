//! End-to-end resolution through the engine, driven by JSON and TOML
//! documents the way a host would load them.
//!
//! Run:
//!   cargo test -p tessera --test end_to_end

use tessera::layout::{Breakpoint, Dimension, IssueKind, Position};
use tessera::paging::{PageChange, PagePresence};
use tessera::{
    Container, EngineConfig, FailurePolicy, LayoutEngine, LayoutError, LoadConfig, Notification,
    RecordingObserver, ResolvedSection,
};

fn engine_at(width: f64) -> LayoutEngine<RecordingObserver> {
    let mut engine = LayoutEngine::with_observer(EngineConfig::default(), RecordingObserver::new());
    engine.set_viewport_width(width);
    engine
}

fn only_section(engine: &mut LayoutEngine<RecordingObserver>, json: &str) -> ResolvedSection {
    let container = Container::from_json_str(json).unwrap();
    let resolved = engine.resolve(&container).unwrap();
    resolved.sections.into_iter().next().unwrap().unwrap()
}

#[test]
fn logical_rect_resolves_to_percentages() {
    let mut engine = engine_at(1024.0);
    let section = only_section(
        &mut engine,
        r#"{"id":"page","sections":[{"id":"hero","mode":"free",
            "logicalSize":{"width":800,"height":600},
            "locators":[{"id":"card","logicalRect":{"x":100,"y":120,"w":380,"h":200}}]}]}"#,
    );
    let style = &section.children[0].style;
    assert_eq!(style.position, Some(Position::Absolute));
    assert_eq!(style.left.as_ref().map(ToString::to_string).as_deref(), Some("12.5%"));
    assert_eq!(style.top.as_ref().map(ToString::to_string).as_deref(), Some("20%"));
    assert_eq!(style.width.as_ref().map(ToString::to_string).as_deref(), Some("47.5%"));
    let height = style.height.as_ref().map(ToString::to_string).unwrap_or_default();
    assert!(height.starts_with("33.333"), "height was {height}");
}

#[test]
fn snapping_applies_before_percentages() {
    let mut engine = engine_at(1024.0);
    let section = only_section(
        &mut engine,
        r#"{"id":"page","sections":[{"id":"grid","mode":"free",
            "logicalSize":{"width":1000,"height":1000},"snap":10,
            "locators":[{"id":"a","logicalRect":{"x":17,"y":12,"w":98,"h":41}}]}]}"#,
    );
    let style = &section.children[0].style;
    assert_eq!(style.left, Some(Dimension::Percent(2.0)));
    assert_eq!(style.top, Some(Dimension::Percent(1.0)));
    assert_eq!(style.width, Some(Dimension::Percent(10.0)));
    assert_eq!(style.height, Some(Dimension::Percent(4.0)));
}

#[test]
fn overlapping_pair_reports_one_collision() {
    let mut engine = engine_at(1024.0);
    let section = only_section(
        &mut engine,
        r#"{"id":"page","sections":[{"id":"board","mode":"free",
            "logicalSize":{"width":800,"height":600},
            "locators":[
                {"id":"a","logicalRect":{"x":0,"y":0,"w":100,"h":100}},
                {"id":"b","logicalRect":{"x":50,"y":50,"w":100,"h":100}}
            ]}]}"#,
    );
    let overlaps: Vec<_> = section
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::Overlap)
        .collect();
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].area, Some(2500.0));
    assert_eq!(overlaps[0].locator_id.as_deref(), Some("a"));
    assert_eq!(overlaps[0].other_locator_id.as_deref(), Some("b"));
    assert_eq!(engine.observer().collisions().len(), 1);
    assert_eq!(section.children.len(), 2);
}

#[test]
fn free_section_without_logical_size_produces_no_geometry() {
    let mut engine = engine_at(1024.0);
    let container = Container::from_json_str(
        r#"{"id":"page","sections":[{"id":"broken","mode":"free",
            "locators":[{"id":"a","logicalRect":{"x":0,"y":0,"w":10,"h":10}}]}]}"#,
    )
    .unwrap();
    let err = engine.resolve(&container).unwrap_err();
    assert_eq!(
        err,
        LayoutError::MissingLogicalSize {
            section_id: "broken".into()
        }
    );

    let notes = &engine.observer().notifications;
    let batches: Vec<_> = notes
        .iter()
        .filter_map(|n| match n {
            Notification::LayoutValidation { issues, .. } => Some(issues),
            _ => None,
        })
        .collect();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 1);
    assert_eq!(batches[0][0].kind, IssueKind::MissingLogicalSize);
    assert!(engine.observer().rendered_locators().is_empty());
}

#[test]
fn duplicate_z_index_renders_nothing() {
    let mut engine = engine_at(1024.0);
    let container = Container::from_json_str(
        r#"{"id":"page","sections":[{"id":"stack",
            "locators":[{"id":"a","zIndex":1},{"id":"b","zIndex":{"base":5,"lg":1}}]}]}"#,
    )
    .unwrap();
    let err = engine.resolve(&container).unwrap_err();
    assert!(matches!(err, LayoutError::DuplicateZIndex { z_index: 1, .. }));
    assert!(engine.observer().rendered_locators().is_empty());

    // Below lg the tiers no longer collide.
    let mut engine = engine_at(800.0);
    assert!(engine.resolve(&container).is_ok());
    assert_eq!(engine.observer().rendered_locators(), vec!["a", "b"]);
}

#[test]
fn rules_override_per_width() {
    let json = r#"{"id":"page","sections":[{"id":"s","mode":"free",
        "logicalSize":{"width":1000,"height":500},
        "locators":[{"id":"badge","logicalRect":{"x":0,"y":0,"w":100,"h":100},
            "rules":[
                {"when":"<600","hidden":true},
                {"when":"600-1024","offsetX":100,"zIndex":7},
                {"when":">1024","offsetY":"1rem"}
            ]}]}]}"#;

    let mut narrow = engine_at(599.0);
    assert!(only_section(&mut narrow, json).children.is_empty());

    let mut mid = engine_at(1024.0);
    let section = only_section(&mut mid, json);
    let badge = &section.children[0];
    assert_eq!(badge.style.z_index, Some(7));
    assert_eq!(badge.style.transform.as_deref(), Some("translate(10%, 0px)"));

    let mut wide = engine_at(1025.0);
    let section = only_section(&mut wide, json);
    assert_eq!(
        section.children[0].style.transform.as_deref(),
        Some("translate(0px, 1rem)")
    );
}

#[test]
fn breakpoint_hidden_locator_is_excluded_from_validation() {
    let mut engine = engine_at(500.0);
    assert_eq!(engine.breakpoint(), Breakpoint::Base);
    let section = only_section(
        &mut engine,
        r#"{"id":"page","sections":[{"id":"board","mode":"free",
            "logicalSize":{"width":800,"height":600},
            "locators":[
                {"id":"a","logicalRect":{"x":0,"y":0,"w":100,"h":100}},
                {"id":"b","logicalRect":{"x":50,"y":50,"w":100,"h":100},
                 "hidden":{"base":true,"md":false}}
            ]}]}"#,
    );
    assert!(section.issues.is_empty());
    assert_eq!(section.children.len(), 1);
}

#[test]
fn constraints_shape_absolute_geometry() {
    let mut engine = engine_at(1024.0);
    let section = only_section(
        &mut engine,
        r#"{"id":"page","sections":[{"id":"s","mode":"free",
            "logicalSize":{"width":800,"height":600},
            "locators":[
                {"id":"centered","logicalRect":{"x":10,"y":10,"w":100,"h":100},
                 "constraints":{"centerX":true,"centerY":true}},
                {"id":"pinned","rect":{"left":"5px","width":200},
                 "constraints":{"pinRight":true,"pinBottom":true,"keepAspectRatio":2}}
            ]}]}"#,
    );
    let centered = section.child("centered").unwrap();
    assert_eq!(centered.style.left, Some(Dimension::Percent(50.0)));
    assert_eq!(centered.style.top, Some(Dimension::Percent(50.0)));

    // A literal rect is used as-is when a logical rect is absent.
    let pinned = section.child("pinned").unwrap();
    assert_eq!(pinned.style.right, Some(Dimension::Px(0.0)));
    assert_eq!(pinned.style.bottom, Some(Dimension::Px(0.0)));
    assert_eq!(pinned.style.height, Some(Dimension::Px(100.0)));
}

#[test]
fn flow_sections_emit_flow_styles() {
    let mut engine = engine_at(1024.0);
    let section = only_section(
        &mut engine,
        r#"{"id":"page","sections":[{"id":"row","mode":"row","gap":{"base":8,"lg":24},
            "locators":[
                {"id":"a","order":2,"flex":"1 1 0","alignSelf":"center"},
                {"id":"b","style":{"transform":"scale(1.1)","width":"auto"}}
            ]}]}"#,
    );
    assert_eq!(section.frame.gap, Some(Dimension::Px(24.0)));
    let a = section.child("a").unwrap();
    assert_eq!(a.flow.order, Some(2));
    assert_eq!(a.flow.flex.as_deref(), Some("1 1 0"));
    assert_eq!(a.style.position, None);
    let b = section.child("b").unwrap();
    assert_eq!(b.style.transform.as_deref(), Some("scale(1.1)"));
    assert_eq!(b.style.width, Some(Dimension::Raw("auto".into())));
}

#[test]
fn slider_pages_through_drag_and_controls() {
    let json = r#"{"id":"page","sections":[{"id":"carousel","mode":"row",
        "pagingMode":"slider","pageSize":3,"loop":true,"animation":"slide",
        "showDots":true,"showArrows":true,
        "locators":[{"id":"c0"},{"id":"c1"},{"id":"c2"},{"id":"c3"},
                    {"id":"c4"},{"id":"c5"},{"id":"c6"}]}]}"#;
    let container = Container::from_json_str(json).unwrap();
    let mut engine = engine_at(1024.0);
    let resolved = engine.resolve(&container).unwrap();
    let section = resolved.sections[0].as_ref().unwrap();
    let paging = section.paging.as_ref().unwrap();
    assert_eq!(paging.total_pages, 3);
    assert!(paging.track);
    assert_eq!(paging.controls.dots.as_ref().map(Vec::len), Some(3));
    assert_eq!(section.children.len(), 7);
    assert_eq!(section.active_children().count(), 3);

    assert_eq!(engine.go_to_page("carousel", 3), Some(PageChange { from: 0, to: 0 }));
    assert_eq!(engine.go_to_page("carousel", -1), Some(PageChange { from: 0, to: 2 }));

    engine.pointer_down("carousel", 100.0);
    engine.pointer_move("carousel", 40.0);
    assert_eq!(
        engine.pointer_up("carousel"),
        Some(PageChange { from: 2, to: 0 })
    );
    let machine = engine.paging("carousel").unwrap();
    assert_eq!(machine.state().drag_delta, 0.0);

    let resolved = engine.resolve(&container).unwrap();
    let section = resolved.sections[0].as_ref().unwrap();
    let active: Vec<_> = section
        .children
        .iter()
        .filter(|c| c.presence == PagePresence::Active)
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(active, vec!["c0", "c1", "c2"]);
    assert_eq!(engine.observer().page_changes().len(), 3);
}

#[test]
fn isolated_failure_keeps_other_sections() {
    let toml = r#"
        id = "page"

        [[sections]]
        id = "broken"
        mode = "free"

        [[sections]]
        id = "fine"
        mode = "column"

        [[sections.locators]]
        id = "x"
    "#;
    let container = Container::from_toml_str(toml).unwrap();
    let config = EngineConfig::from_toml_str("failure_policy = \"isolate_section\"").unwrap();
    assert_eq!(config.failure_policy, FailurePolicy::IsolateSection);

    let mut engine = LayoutEngine::with_observer(config, RecordingObserver::new());
    let resolved = engine.resolve(&container).unwrap();
    assert_eq!(resolved.errors().count(), 1);
    assert!(matches!(resolved.section("fine"), Some(Ok(s)) if s.children.len() == 1));
}

#[test]
fn resolved_children_serialize_for_the_render_sink() {
    let mut engine = engine_at(1024.0);
    let section = only_section(
        &mut engine,
        r#"{"id":"page","sections":[{"id":"hero","mode":"free",
            "logicalSize":{"width":800,"height":600},
            "locators":[{"id":"card","zIndex":4,"logicalRect":{"x":0,"y":0,"w":400,"h":300}}]}]}"#,
    );
    let value = serde_json::to_value(&section.children[0]).unwrap();
    assert_eq!(value["id"], "card");
    assert_eq!(value["zIndex"], 4);
    assert_eq!(value["style"]["width"], "50%");
    assert_eq!(value["style"]["position"], "absolute");
}

#[test]
fn default_page_is_honoured_on_first_pass() {
    let mut engine = engine_at(1024.0);
    let section = only_section(
        &mut engine,
        r#"{"id":"page","sections":[{"id":"list","mode":"column",
            "pagingMode":"pages","pageSize":2,"defaultPage":1,
            "locators":[{"id":"c0"},{"id":"c1"},{"id":"c2"},
                        {"id":"c3"},{"id":"c4"},{"id":"c5"}]}]}"#,
    );
    let paging = section.paging.as_ref().unwrap();
    assert_eq!((paging.page, paging.total_pages), (1, 3));
    let active: Vec<_> = section.active_children().map(|c| c.id.as_str()).collect();
    assert_eq!(active, vec!["c2", "c3"]);
    assert_eq!(engine.paging("list").map(|m| m.current_page()), Some(1));
}

#[test]
fn lazy_paging_notifies_only_rendered_children() {
    let mut engine = engine_at(1024.0);
    let section = only_section(
        &mut engine,
        r#"{"id":"page","sections":[{"id":"list","mode":"column",
            "pagingMode":"pages","pageSize":1,"lazy":true,
            "locators":[{"id":"c0"},{"id":"c1"},{"id":"c2"}]}]}"#,
    );
    assert_eq!(section.children.len(), 1);
    assert_eq!(engine.observer().rendered_locators(), vec!["c0"]);
}

#[test]
fn off_page_children_serialize_their_presence() {
    let mut engine = engine_at(1024.0);
    let section = only_section(
        &mut engine,
        r#"{"id":"page","sections":[{"id":"list","mode":"column",
            "pagingMode":"pages","pageSize":1,
            "locators":[{"id":"c0"},{"id":"c1"}]}]}"#,
    );
    assert_eq!(section.children.len(), 2);
    let active = serde_json::to_value(&section.children[0]).unwrap();
    let off_page = serde_json::to_value(&section.children[1]).unwrap();
    assert_eq!(active["presence"], "active");
    assert_eq!(off_page["id"], "c1");
    assert_eq!(off_page["presence"], "inactive");
    assert_eq!(off_page["page"], 1);
}

#[test]
fn empty_literal_rect_is_reported_as_invalid() {
    let mut engine = engine_at(1024.0);
    let section = only_section(
        &mut engine,
        r#"{"id":"page","sections":[{"id":"hero","mode":"free",
            "logicalSize":{"width":800,"height":600},
            "locators":[{"id":"box","rect":{}}]}]}"#,
    );
    let invalid: Vec<_> = section
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::InvalidRect)
        .filter_map(|i| i.locator_id.as_deref())
        .collect();
    assert_eq!(invalid, vec!["box"]);
}
