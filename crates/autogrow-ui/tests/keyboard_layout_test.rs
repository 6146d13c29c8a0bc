use autogrow_core::MutableState;
use autogrow_foundation::{AccessoryContext, KeyboardState, SceneActivity};
use autogrow_testing::{run_input_test, ScriptedMeasurer};
use autogrow_ui::{KeyboardAwareLayout, MultilineTextField, MultilineTextFieldOptions};

#[test]
fn inset_animates_with_keyboard() {
    run_input_test(|rule| {
        let mut layout = KeyboardAwareLayout::new(rule.runtime_handle());
        layout.mount(rule.screen().height).expect("mount");

        rule.show_keyboard(300.0);
        assert_eq!(
            layout.keyboard_state(),
            KeyboardState::Visible {
                occlusion_height: 300.0
            }
        );
        assert_eq!(layout.target_inset(), 300.0);

        // The first frame pins the animation start.
        rule.advance_frame();
        assert_eq!(layout.bottom_inset(), 0.0);

        rule.advance_time_by(125);
        let midway = layout.bottom_inset();
        assert!(midway > 100.0 && midway < 200.0, "midway inset {midway}");
        assert!(layout.is_animating());

        rule.advance_time_by(125);
        assert_eq!(layout.bottom_inset(), 300.0);
        assert!(!layout.is_animating());

        rule.hide_keyboard();
        rule.pump_until_idle();
        assert_eq!(layout.bottom_inset(), 0.0);
        assert_eq!(layout.keyboard_state(), KeyboardState::Hidden);
    });
}

#[test]
fn frame_change_retargets_from_current_inset() {
    run_input_test(|rule| {
        let mut layout = KeyboardAwareLayout::new(rule.runtime_handle());
        layout.mount(rule.screen().height).expect("mount");

        rule.show_keyboard(300.0);
        rule.advance_frame();
        rule.advance_time_by(100);
        let before = layout.bottom_inset();

        rule.change_keyboard_frame(340.0);
        rule.advance_frame();
        assert!((layout.bottom_inset() - before).abs() < 1e-3);
        assert_eq!(layout.target_inset(), 340.0);

        rule.pump_until_idle();
        assert_eq!(layout.bottom_inset(), 340.0);
    });
}

#[test]
fn background_and_scene_changes_end_editing() {
    run_input_test(|rule| {
        let binding = MutableState::new(String::new());
        let field = MultilineTextField::new(
            binding,
            rule.runtime_handle(),
            AccessoryContext::compact(),
            MultilineTextFieldOptions::default().with_measurer(ScriptedMeasurer::new()),
        )
        .expect("valid options");
        let mut layout = KeyboardAwareLayout::new(rule.runtime_handle());
        layout.mount(rule.screen().height).expect("mount");

        field.mount();
        rule.run_ui_tasks();
        assert!(field.is_focused());

        assert_eq!(layout.on_background_tap(), Some(field.focus_id()));
        assert!(!field.is_focused());

        assert!(field.request_focus());
        assert_eq!(layout.on_scene_activity(SceneActivity::Inactive), Some(field.focus_id()));
        assert!(!field.is_focused());
    });
}

#[test]
fn inset_animation_runs_on_host_frame_requests_alone() {
    run_input_test(|rule| {
        let mut layout = KeyboardAwareLayout::new(rule.runtime_handle());
        layout.mount(rule.screen().height).expect("mount");
        assert_eq!(rule.run_requested_frames(), 0);

        rule.show_keyboard(300.0);
        let frames = rule.run_requested_frames();
        // 250 ms at 60 Hz, plus the frame that pins the start.
        assert!(frames >= 15, "keyboard show ran {frames} frames");
        assert_eq!(layout.bottom_inset(), 300.0);
        assert!(!layout.is_animating());
        assert!(rule.is_idle());

        rule.hide_keyboard();
        let frames = rule.run_requested_frames();
        assert!(frames >= 15, "keyboard hide ran {frames} frames");
        assert_eq!(layout.bottom_inset(), 0.0);
        assert!(!layout.is_animating());
    });
}
