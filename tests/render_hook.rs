use scene_inspector::properties::PropertyValue;
use scene_inspector::{
    Bounds, HighlightConfig, InspectNode, Inspector, InspectorConfig, NodeHandle, SelectionOverlay,
};
use std::any::Any;
use std::cell::RefCell;
use std::io::Write;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

struct Stage {
    children: Vec<NodeHandle>,
}

impl InspectNode for Stage {
    fn children(&self) -> Vec<NodeHandle> {
        self.children.clone()
    }

    fn properties(&self) -> Vec<(String, PropertyValue)> {
        Vec::new()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct Sprite;

impl InspectNode for Sprite {
    fn children(&self) -> Vec<NodeHandle> {
        Vec::new()
    }

    fn properties(&self) -> Vec<(String, PropertyValue)> {
        Vec::new()
    }

    fn bounds(&self) -> Option<Bounds> {
        Some(Bounds::new(10.0, 20.0, 64.0, 32.0))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Clone, Default)]
struct OverlayLog {
    events: Rc<RefCell<Vec<String>>>,
}

struct RecordingOverlay {
    log: OverlayLog,
}

impl SelectionOverlay for RecordingOverlay {
    fn show(&mut self, bounds: Bounds, style: &HighlightConfig) {
        self.log
            .events
            .borrow_mut()
            .push(format!("show {}x{} color={:#08x}", bounds.width, bounds.height, style.color));
    }

    fn hide(&mut self) {
        self.log.events.borrow_mut().push("hide".to_string());
    }
}

fn inspector_with_selected_sprite() -> (Inspector, NodeHandle, OverlayLog) {
    let mut inspector = Inspector::default();
    inspector.classifier_mut().register_type::<Stage>("Stage");
    inspector.classifier_mut().register_type::<Sprite>("Sprite");
    let log = OverlayLog::default();
    inspector.set_overlay(Box::new(RecordingOverlay { log: log.clone() }));

    let stage: NodeHandle = Rc::new(Stage { children: vec![Rc::new(Sprite)] });
    inspector.register_root(&stage);
    let stage_id = inspector.tree().children.expect("roots")[0].id;
    inspector.expand(stage_id);
    let tree = inspector.tree();
    let stage_node = &tree.children.as_ref().expect("roots")[0];
    let sprite_id = stage_node.children.as_ref().expect("stage children")[0].id;
    inspector.select(sprite_id).expect("sprite should be selectable");
    (inspector, stage, log)
}

#[test]
fn intercept_brackets_the_render_with_show_and_hide() {
    let (mut inspector, stage, log) = inspector_with_selected_sprite();

    let frames = inspector.intercept(&stage, || 3);
    assert_eq!(frames, 3);
    let events = log.events.borrow();
    assert_eq!(events.len(), 2);
    assert!(events[0].starts_with("show 64x32"));
    assert_eq!(events[1], "hide");
}

#[test]
fn overlay_is_released_even_when_the_render_panics() {
    let (mut inspector, stage, log) = inspector_with_selected_sprite();

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        inspector.intercept(&stage, || -> u32 { panic!("render failed") });
    }));
    assert!(outcome.is_err());
    assert_eq!(log.events.borrow().last().map(String::as_str), Some("hide"));

    // The armed flag was cleared: a later bracket starts fresh.
    log.events.borrow_mut().clear();
    inspector.intercept(&stage, || ());
    assert_eq!(log.events.borrow().len(), 2);
}

#[test]
fn boundless_selection_never_arms_the_overlay() {
    let mut inspector = Inspector::default();
    inspector.classifier_mut().register_type::<Stage>("Stage");
    let log = OverlayLog::default();
    inspector.set_overlay(Box::new(RecordingOverlay { log: log.clone() }));

    // The auto-selected stage has no bounds, so no highlight is drawn.
    let stage: NodeHandle = Rc::new(Stage { children: Vec::new() });
    inspector.intercept(&stage, || ());
    assert!(log.events.borrow().is_empty());
}

#[test]
fn repeated_renders_register_the_stage_once() {
    let mut inspector = Inspector::default();
    inspector.classifier_mut().register_type::<Stage>("Stage");
    let stage: NodeHandle = Rc::new(Stage { children: Vec::new() });
    for _ in 0..3 {
        inspector.intercept(&stage, || ());
    }
    assert_eq!(inspector.tree().children.expect("roots").len(), 1);
}

#[test]
fn after_render_without_a_bracket_is_harmless() {
    let mut inspector = Inspector::default();
    inspector.after_render();
    inspector.after_render();
}

#[test]
fn config_loads_with_partial_fields_and_falls_back_on_errors() {
    let mut file = tempfile::NamedTempFile::new().expect("temp config file");
    write!(file, "{{\"highlight\": {{\"color\": 16711680}}, \"auto_select_first_root\": false}}")
        .expect("write config");

    let cfg = InspectorConfig::load(file.path()).expect("config should parse");
    assert_eq!(cfg.highlight.color, 0xff0000);
    assert_eq!(cfg.highlight.fill_alpha, HighlightConfig::default().fill_alpha);
    assert!(!cfg.auto_select_first_root);

    let fallback = InspectorConfig::load_or_default("does/not/exist.json");
    assert_eq!(fallback, InspectorConfig::default());
}
