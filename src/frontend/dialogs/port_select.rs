//! Port selection dialog
//!
//! A dropdown with the disabled placeholder followed by one entry per known
//! port, and a button that confirms the selection.

use egui::Ui;
use rust_i18n::t;

use crate::frontend::dialogs::{Dialog, DialogAction, DialogState, DialogWindowConfig};
use crate::ports::PortSelector;

/// The dialog keeps no state of its own; the selection lives in the selector.
#[derive(Debug, Clone, Default)]
pub struct PortSelectState;

impl DialogState for PortSelectState {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSelectAction {
    /// Send the selected port to the device
    Confirm,
}

pub struct PortSelectDialog;

impl Dialog for PortSelectDialog {
    type State = PortSelectState;
    type Action = PortSelectAction;
    type Context<'a> = &'a mut PortSelector;

    fn title(_state: &Self::State) -> String {
        t!("port_dialog.title").to_string()
    }

    fn window_config() -> DialogWindowConfig {
        DialogWindowConfig::centered_modal(320.0)
    }

    fn render(
        _state: &mut Self::State,
        selector: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action> {
        let mut action = DialogAction::None;

        let selected_text = selector
            .selected_option()
            .map(|o| o.label.clone())
            .unwrap_or_else(|| selector.placeholder().to_string());

        // A new widget handle means a freshly initialized dropdown
        let widget_id = selector.handle().map(|h| h.id()).unwrap_or_default();

        let mut choice: Option<usize> = None;
        egui::ComboBox::from_id_salt(("port_selector", widget_id))
            .selected_text(selected_text)
            .width(260.0)
            .show_ui(ui, |ui| {
                ui.add_enabled(false, egui::Label::new(selector.placeholder()));
                for (i, option) in selector.options().iter().enumerate() {
                    let is_selected = selector.selected_index() == Some(i);
                    if ui.selectable_label(is_selected, option.label.as_str()).clicked() {
                        choice = Some(i);
                    }
                }
            });
        if let Some(index) = choice {
            selector.select(Some(index));
        }

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            let can_confirm = selector.selected_option().is_some();
            if ui
                .add_enabled(can_confirm, egui::Button::new(t!("port_dialog.connect")))
                .clicked()
            {
                action = DialogAction::CloseWithAction(PortSelectAction::Confirm);
            }
            if ui.button(t!("port_dialog.cancel")).clicked() {
                action = DialogAction::Close;
            }
        });

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::dialogs::show_dialog;
    use crate::types::Port;

    fn selector_with_ports() -> PortSelector {
        let mut selector = PortSelector::new("-");
        selector.refresh(&[Port::new(1, "COM1"), Port::new(2, "COM2")]);
        selector
    }

    fn key_press(key: egui::Key) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn run_frame(
        ctx: &egui::Context,
        input: egui::RawInput,
        open: &mut bool,
        selector: &mut PortSelector,
    ) -> Option<PortSelectAction> {
        let mut action = None;
        let _ = ctx.run(input, |ctx| {
            action = show_dialog::<PortSelectDialog>(ctx, open, &mut PortSelectState, selector);
        });
        action
    }

    #[test]
    fn test_open_dialog_keeps_selection_untouched() {
        let ctx = egui::Context::default();
        let mut selector = selector_with_ports();
        assert!(selector.select(Some(1)));
        let mut open = true;

        for _ in 0..2 {
            let action = run_frame(&ctx, egui::RawInput::default(), &mut open, &mut selector);
            assert!(action.is_none());
        }
        assert!(open);
        assert_eq!(selector.selected_index(), Some(1));
    }

    #[test]
    fn test_escape_closes_modal_without_action() {
        let ctx = egui::Context::default();
        let mut selector = selector_with_ports();
        let mut open = true;

        run_frame(&ctx, egui::RawInput::default(), &mut open, &mut selector);
        let input = egui::RawInput {
            events: vec![key_press(egui::Key::Escape)],
            ..Default::default()
        };
        let action = run_frame(&ctx, input, &mut open, &mut selector);

        assert!(action.is_none());
        assert!(!open);
    }

    #[test]
    fn test_closed_dialog_renders_nothing() {
        let ctx = egui::Context::default();
        let mut selector = selector_with_ports();
        let mut open = false;
        assert!(run_frame(&ctx, egui::RawInput::default(), &mut open, &mut selector).is_none());
        assert!(!open);
    }
}
