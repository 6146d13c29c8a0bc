//! Keyboard dismiss accessory and the auto-focus companion policy.

use autogrow_ui_graphics::{Rect, Size};

/// Horizontal size class of the device the input runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    /// Phone-sized; always gets the dismiss accessory.
    #[default]
    Compact,
    /// Tablet-sized.
    Regular,
}

/// Snapshot of the device and keyboard situation, taken once per widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessoryContext {
    pub device_class: DeviceClass,
    pub external_keyboard_attached: bool,
}

impl AccessoryContext {
    pub fn compact() -> Self {
        Self {
            device_class: DeviceClass::Compact,
            external_keyboard_attached: false,
        }
    }

    pub fn regular(external_keyboard_attached: bool) -> Self {
        Self {
            device_class: DeviceClass::Regular,
            external_keyboard_attached,
        }
    }
}

/// Accessory height used on regular devices with a hardware keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HardwareKeyboardAccessory {
    #[default]
    Enlarged,
    Standard,
}

/// What pressing the accessory button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessoryAction {
    /// Resigns focus from the owning input.
    DismissKeyboard,
}

/// The accessory bar attached above the keyboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccessoryDescriptor {
    pub height: f32,
    pub action: AccessoryAction,
}

impl AccessoryDescriptor {
    pub const STANDARD_HEIGHT: f32 = 44.0;
    pub const ENLARGED_HEIGHT: f32 = 70.0;
    pub const BUTTON_SIZE: Size = Size::square(30.0);
    pub const BUTTON_TRAILING_INSET: f32 = 16.0;

    pub fn dismiss(height: f32) -> Self {
        Self {
            height,
            action: AccessoryAction::DismissKeyboard,
        }
    }

    /// Frame of the dismiss button in a bar of `bar_width`: trailing aligned
    /// and vertically centered.
    pub fn button_frame(&self, bar_width: f32) -> Rect {
        let size = Self::BUTTON_SIZE;
        Rect::new(
            bar_width - Self::BUTTON_TRAILING_INSET - size.width,
            (self.height - size.height) / 2.0,
            size.width,
            size.height,
        )
    }
}

/// Decides whether an input gets a dismiss accessory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessoryPolicy {
    pub hardware_keyboard: HardwareKeyboardAccessory,
}

impl AccessoryPolicy {
    pub fn with_hardware_keyboard(mut self, variant: HardwareKeyboardAccessory) -> Self {
        self.hardware_keyboard = variant;
        self
    }

    pub fn decide(&self, context: AccessoryContext) -> Option<AccessoryDescriptor> {
        match (context.device_class, context.external_keyboard_attached) {
            (DeviceClass::Compact, _) => Some(AccessoryDescriptor::dismiss(
                AccessoryDescriptor::STANDARD_HEIGHT,
            )),
            (DeviceClass::Regular, false) => None,
            (DeviceClass::Regular, true) => {
                let height = match self.hardware_keyboard {
                    HardwareKeyboardAccessory::Enlarged => AccessoryDescriptor::ENLARGED_HEIGHT,
                    HardwareKeyboardAccessory::Standard => AccessoryDescriptor::STANDARD_HEIGHT,
                };
                Some(AccessoryDescriptor::dismiss(height))
            }
        }
    }
}

/// Holds at most one accessory for a widget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessorySlot {
    current: Option<AccessoryDescriptor>,
}

impl AccessorySlot {
    /// Attaches `descriptor` unless an accessory is already present.
    pub fn attach(&mut self, descriptor: AccessoryDescriptor) -> bool {
        if self.current.is_some() {
            log::trace!("accessory already attached");
            return false;
        }
        self.current = Some(descriptor);
        true
    }

    pub fn detach(&mut self) -> Option<AccessoryDescriptor> {
        self.current.take()
    }

    pub fn current(&self) -> Option<AccessoryDescriptor> {
        self.current
    }

    pub fn is_attached(&self) -> bool {
        self.current.is_some()
    }
}

/// Whether an input grabs focus right after mounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoFocusPolicy {
    #[default]
    Always,
    Never,
    /// Only on compact devices without a hardware keyboard.
    SoftwareKeyboardOnly,
}

impl AutoFocusPolicy {
    pub fn should_focus(&self, context: AccessoryContext) -> bool {
        match self {
            AutoFocusPolicy::Always => true,
            AutoFocusPolicy::Never => false,
            AutoFocusPolicy::SoftwareKeyboardOnly => {
                context.device_class == DeviceClass::Compact
                    && !context.external_keyboard_attached
            }
        }
    }
}
