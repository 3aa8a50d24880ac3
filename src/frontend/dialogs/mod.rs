//! Dialog trait system for unified dialog management
//!
//! Each dialog implements the `Dialog` trait, encapsulating its state,
//! actions, and rendering.

use egui::{Align2, Context, Ui};

/// Actions that a dialog can return after rendering
#[derive(Debug, Clone, Default)]
pub enum DialogAction<A> {
    /// Keep the dialog open, no action needed
    #[default]
    None,
    /// Close the dialog without performing any action
    Close,
    /// Close the dialog and perform the specified action
    CloseWithAction(A),
}

/// Trait for dialog state management
///
/// Dialog state is reset to its default whenever the dialog closes.
pub trait DialogState: Default {
    /// Reset the dialog state to its default values
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Configuration for dialog window appearance and behavior
#[derive(Debug, Clone)]
pub struct DialogWindowConfig {
    /// Default width of the dialog window
    pub default_width: f32,
    /// Whether the dialog can be resized
    pub resizable: bool,
    /// Whether the dialog can be collapsed
    pub collapsible: bool,
    /// Optional anchor position (alignment and offset)
    pub anchor: Option<(Align2, [f32; 2])>,
    /// Dim and block the rest of the window; Escape or a backdrop click closes
    pub modal: bool,
}

impl Default for DialogWindowConfig {
    fn default() -> Self {
        Self {
            default_width: 400.0,
            resizable: true,
            collapsible: false,
            anchor: None,
            modal: false,
        }
    }
}

impl DialogWindowConfig {
    /// Create a centered, fixed-width modal configuration
    pub fn centered_modal(width: f32) -> Self {
        Self {
            default_width: width,
            resizable: false,
            collapsible: false,
            anchor: Some((Align2::CENTER_CENTER, [0.0, 0.0])),
            modal: true,
        }
    }
}

/// Main dialog trait
///
/// The trait uses associated types for type-safe state, actions, and context.
pub trait Dialog {
    /// The state type for this dialog
    type State: DialogState;

    /// The action type this dialog can produce
    type Action;

    /// The context type needed to render this dialog
    type Context<'a>;

    /// Get the window title for this dialog
    fn title(state: &Self::State) -> String;

    /// Get the window configuration for this dialog
    fn window_config() -> DialogWindowConfig {
        DialogWindowConfig::default()
    }

    /// Render the dialog content and report what should happen next
    fn render(
        state: &mut Self::State,
        ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action>;
}

/// Show a dialog using the Dialog trait
///
/// Only renders if `is_open` is true, handles closing and state reset.
/// Returns `Some(action)` if the dialog produced an action.
pub fn show_dialog<D: Dialog>(
    ctx: &Context,
    is_open: &mut bool,
    state: &mut D::State,
    dialog_ctx: D::Context<'_>,
) -> Option<D::Action> {
    if !*is_open {
        return None;
    }

    let config = D::window_config();
    let title = D::title(state);
    let mut action_result: Option<D::Action> = None;
    let mut should_close = false;

    let contents = |ui: &mut Ui| match D::render(state, dialog_ctx, ui) {
        DialogAction::None => {}
        DialogAction::Close => {
            should_close = true;
        }
        DialogAction::CloseWithAction(a) => {
            should_close = true;
            action_result = Some(a);
        }
    };

    if config.modal {
        let response = egui::Modal::new(egui::Id::new(("dialog", std::any::type_name::<D>())))
            .show(ctx, |ui| {
                ui.set_width(config.default_width);
                ui.heading(title);
                ui.add_space(8.0);
                contents(ui);
            });
        if response.should_close() {
            should_close = true;
        }
    } else {
        let mut window = egui::Window::new(title)
            .collapsible(config.collapsible)
            .resizable(config.resizable)
            .default_width(config.default_width);

        if let Some((align, offset)) = config.anchor {
            window = window.anchor(align, offset);
        }

        window.show(ctx, contents);
    }

    if should_close {
        *is_open = false;
        state.reset();
    }

    action_result
}

pub mod port_select;

pub use port_select::{PortSelectAction, PortSelectDialog, PortSelectState};
