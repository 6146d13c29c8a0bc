use super::*;

use crate::text::TextMetrics;
use autogrow_core::{DefaultScheduler, Runtime};
use std::cell::Cell;

/// Twenty units per newline-separated line.
struct LineMeasurer;

impl TextMeasurer for LineMeasurer {
    fn measure(&self, text: &str, _available_width: f32, _font: &FontSpec) -> TextMetrics {
        let line_count = text.split('\n').count();
        TextMetrics {
            width: 0.0,
            height: line_count as f32 * 20.0,
            line_height: 20.0,
            line_count,
        }
    }
}

fn options() -> MultilineTextFieldOptions {
    MultilineTextFieldOptions::default()
        .with_placeholder("Write here")
        .with_measurer(LineMeasurer)
}

fn field(
    runtime: &Runtime,
    binding: &MutableState<String>,
    options: MultilineTextFieldOptions,
) -> MultilineTextField {
    MultilineTextField::new(
        binding.clone(),
        runtime.handle(),
        AccessoryContext::compact(),
        options,
    )
    .expect("valid options")
}

#[test]
fn mount_pulls_host_text_and_attaches_accessory() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let binding = MutableState::new("hello".to_string());
    let field = field(&runtime, &binding, options());

    assert_eq!(field.phase(), FieldPhase::Uninitialized);
    assert!(field.accessory().is_none());

    assert!(field.mount());
    let state = field.state();
    assert_eq!(state.text, "hello");
    assert!(!state.placeholder_visible);
    assert_eq!(state.resolved_height, 34.0);
    assert_eq!(field.accessory().map(|a| a.height), Some(44.0));
    assert!(field.has_pending_height_pass());

    assert!(!field.mount(), "second mount is ignored");
}

#[test]
fn edits_within_a_frame_coalesce_into_one_pass() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let binding = MutableState::new(String::new());
    let field = field(&runtime, &binding, options());
    field.mount();
    runtime.drain_frame_callbacks(0);

    let layouts = Rc::new(RefCell::new(Vec::new()));
    let _sub = {
        let layouts = Rc::clone(&layouts);
        field.subscribe_layout(move |layout| layouts.borrow_mut().push(*layout))
    };

    field.type_text("a\nb");
    field.type_text("\nc");
    assert_eq!(binding.get(), "a\nb\nc");
    // Height waits for the next frame.
    assert_eq!(field.state().resolved_height, 34.0);

    runtime.drain_frame_callbacks(16_000_000);
    assert!(!runtime.has_frame_callbacks());
    assert_eq!(
        *layouts.borrow(),
        vec![HeightResolution {
            height: 60.0,
            scrolling_enabled: false
        }]
    );
}

#[test]
fn overflow_enables_scrolling() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let binding = MutableState::new(String::new());
    let field = field(&runtime, &binding, options());
    field.mount();

    binding.set("1\n2\n3\n4\n5\n6".to_string());
    runtime.drain_frame_callbacks(0);

    let state = field.state();
    assert_eq!(state.resolved_height, 85.0);
    assert!(state.scrolling_enabled);

    for _ in 0..4 {
        field.backspace();
    }
    runtime.drain_frame_callbacks(16_000_000);
    let state = field.state();
    assert_eq!(state.text, "1\n2\n3\n4");
    assert_eq!(state.resolved_height, 80.0);
    assert!(!state.scrolling_enabled);
}

#[test]
fn host_assignment_is_silent_and_syncs_placeholder() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let binding = MutableState::new(String::new());
    let field = field(&runtime, &binding, options());
    field.mount();

    let content_changes = Rc::new(Cell::new(0));
    let _sub = {
        let content_changes = Rc::clone(&content_changes);
        field
            .surface()
            .subscribe(move |_| content_changes.set(content_changes.get() + 1))
    };

    assert!(field.state().placeholder_visible);
    field.type_text("a");
    assert!(!field.state().placeholder_visible);
    assert_eq!(content_changes.get(), 1);

    binding.set(String::new());
    assert_eq!(field.surface().text(), "");
    assert!(field.state().placeholder_visible);
    assert_eq!(content_changes.get(), 1);

    binding.set(" ".to_string());
    assert!(!field.state().placeholder_visible);
}

#[test]
fn initial_focus_waits_for_next_tick() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let binding = MutableState::new(String::new());
    let field = field(&runtime, &binding, options());
    field.mount();

    assert!(!field.is_focused());
    runtime.drain_ui();
    assert!(field.is_focused());

    assert!(field.dismiss());
    assert!(!field.is_focused());
    assert!(!field.dismiss(), "dismiss without focus is a no-op");
}

#[test]
fn auto_focus_never_leaves_focus_alone() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let binding = MutableState::new(String::new());
    let field = field(
        &runtime,
        &binding,
        options().with_auto_focus(AutoFocusPolicy::Never),
    );
    field.mount();
    runtime.drain_ui();
    assert!(!field.is_focused());
}

#[test]
fn dismiss_leaves_other_owner_focused() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let binding = MutableState::new(String::new());
    let first = field(&runtime, &binding, options());
    let second = field(
        &runtime,
        &MutableState::new(String::new()),
        options().with_auto_focus(AutoFocusPolicy::Never),
    );
    first.mount();
    second.mount();
    runtime.drain_ui();

    assert!(second.request_focus());
    assert!(!first.dismiss());
    assert!(second.is_focused());
}

#[test]
fn unmount_cancels_deferred_work() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let binding = MutableState::new(String::new());
    let field = field(&runtime, &binding, options());
    field.mount();
    field.unmount();

    assert_eq!(field.phase(), FieldPhase::Unmounted);
    assert!(!runtime.has_frame_callbacks());
    assert!(field.accessory().is_none());

    runtime.drain_ui();
    assert!(!field.is_focused());

    binding.set("late".to_string());
    assert_eq!(field.surface().text(), "");
    assert!(!field.type_text("x"));
    assert!(!field.mount());
}

#[test]
fn dropping_field_releases_binding_listener() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let binding = MutableState::new(String::new());
    {
        let field = field(&runtime, &binding, options());
        field.mount();
        assert_eq!(binding.listener_count(), 1);
    }
    assert_eq!(binding.listener_count(), 0);
    assert!(!runtime.has_frame_callbacks());
}

#[test]
fn accessory_attach_is_idempotent() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let binding = MutableState::new(String::new());
    let field = field(&runtime, &binding, options());
    field.mount();

    assert!(!field.attach_accessory(AccessoryDescriptor::dismiss(70.0)));
    assert_eq!(field.accessory().map(|a| a.height), Some(44.0));
}

#[test]
fn regular_device_without_keyboard_has_no_accessory() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let field = MultilineTextField::new(
        MutableState::new(String::new()),
        runtime.handle(),
        AccessoryContext::regular(false),
        options(),
    )
    .expect("valid options");
    field.mount();
    assert!(field.accessory().is_none());
}

#[test]
fn invalid_options_are_rejected() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let binding = MutableState::new(String::new());
    let result = MultilineTextField::new(
        binding,
        runtime.handle(),
        AccessoryContext::compact(),
        options().with_content_width(0.0),
    );
    assert!(matches!(
        result,
        Err(ConfigError::InvalidContentWidth { .. })
    ));

    let field = field(&runtime, &MutableState::new(String::new()), options());
    assert!(field.set_content_width(f32::NAN).is_err());
    assert!(field.set_content_width(200.0).is_ok());
}

#[test]
fn placeholder_style_option_reaches_controller() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let binding = MutableState::new(String::new());
    let style = PlaceholderStyle {
        insets: autogrow_ui_graphics::EdgeInsets::new(12.0, 10.0, 12.0, 0.0),
    };
    let field = field(
        &runtime,
        &binding,
        options().with_placeholder_style(style.clone()),
    );
    field.mount();

    assert_eq!(field.placeholder().style(), &style);
    assert_eq!(field.placeholder().text(), "Write here");
}
