use std::time::Duration;

use anyhow::{ensure, Context, Result};
use autogrow_core::MutableState;
use autogrow_foundation::{
    post_keyboard_event, AccessoryContext, KeyboardEvent, KeyboardEventKind, SceneActivity,
};
use autogrow_runtime_std::StdRuntime;
use autogrow_ui::{KeyboardAwareLayout, MultilineTextField, MultilineTextFieldOptions};

const SCREEN_WIDTH: f32 = 390.0;
const SCREEN_HEIGHT: f32 = 844.0;
const KEYBOARD_HEIGHT: f32 = 336.0;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_TIMEOUT: Duration = Duration::from_secs(2);

fn init_logging() {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn settle(runtime: &StdRuntime) -> Result<()> {
    ensure!(
        runtime.run_until_idle(FRAME_INTERVAL, IDLE_TIMEOUT),
        "runtime did not settle within {IDLE_TIMEOUT:?}"
    );
    Ok(())
}

fn keyboard(kind: KeyboardEventKind, top: f32) {
    post_keyboard_event(KeyboardEvent::with_top(kind, top, SCREEN_WIDTH));
}

fn report(step: &str, field: &MultilineTextField, layout: &KeyboardAwareLayout) {
    let state = field.state();
    println!(
        "{step:<28} height={:>5.1} scroll={:<5} placeholder={:<5} focused={:<5} inset={:>5.1}",
        state.resolved_height,
        state.scrolling_enabled,
        state.placeholder_visible,
        field.is_focused(),
        layout.bottom_inset(),
    );
}

fn main() -> Result<()> {
    init_logging();

    println!("=== autogrow console demo ===");
    println!("A multiline note grows from 2 to 5 lines, then scrolls.");
    println!("The screen inset follows the software keyboard.");
    println!();

    let runtime = StdRuntime::new();
    let note = MutableState::new(String::new());

    let mut layout = KeyboardAwareLayout::new(runtime.runtime_handle());
    layout
        .mount(SCREEN_HEIGHT)
        .context("mounting keyboard layout")?;

    let field = MultilineTextField::new(
        note.clone(),
        runtime.runtime_handle(),
        AccessoryContext::compact(),
        MultilineTextFieldOptions::default().with_placeholder("Write a note"),
    )
    .context("creating note field")?;
    ensure!(field.mount(), "note field was already mounted");
    if let Some(accessory) = field.accessory() {
        println!(
            "accessory: {}pt bar, dismiss button at {:?}",
            accessory.height,
            accessory.button_frame(SCREEN_WIDTH)
        );
    }

    keyboard(KeyboardEventKind::WillShow, SCREEN_HEIGHT - KEYBOARD_HEIGHT);
    settle(&runtime)?;
    report("mounted, keyboard up", &field, &layout);

    field.type_text("Groceries:");
    settle(&runtime)?;
    report("typed one line", &field, &layout);

    for item in ["milk", "eggs", "bread", "coffee", "apples"] {
        field.type_text(&format!("\n- {item}"));
    }
    settle(&runtime)?;
    report("typed six lines", &field, &layout);

    note.set(String::new());
    settle(&runtime)?;
    report("host cleared the note", &field, &layout);

    field.dismiss();
    keyboard(KeyboardEventKind::WillHide, SCREEN_HEIGHT);
    settle(&runtime)?;
    report("dismiss tapped", &field, &layout);

    field.request_focus();
    keyboard(KeyboardEventKind::WillShow, SCREEN_HEIGHT - KEYBOARD_HEIGHT);
    settle(&runtime)?;
    layout.on_scene_activity(SceneActivity::Background);
    keyboard(KeyboardEventKind::WillHide, SCREEN_HEIGHT);
    settle(&runtime)?;
    report("app backgrounded", &field, &layout);

    field.unmount();
    layout.unmount();
    println!();
    println!("final note: {:?}", note.get());
    log::info!("demo finished");
    Ok(())
}
