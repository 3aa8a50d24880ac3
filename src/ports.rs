//! Port selector controller.
//!
//! Keeps the dropdown's option list in step with the last announced port
//! list and enables the "select port" action once a port is known.
//!
//! The dropdown always starts with a permanently disabled placeholder that
//! is never regenerated. Every refresh rebuilds the generated options and
//! re-initializes the widget, which hands out a fresh [`SelectionHandle`]
//! and clears the selection.
//!
//! ```text
//! Uninitialized --bind--> Initialized --refresh--> Rebuilding --> Initialized
//! ```

use crate::error::Result;
use crate::transport::{Frame, Transport};
use crate::types::Port;

/// Widget lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    Uninitialized,
    Initialized,
    Rebuilding,
}

/// Identity of one initialization of the dropdown widget.
///
/// The UI keys widget memory on it, so a new handle means a fresh widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionHandle(u64);

impl SelectionHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A generated dropdown option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortOption {
    /// Value submitted for the option
    pub value: u32,
    /// Visible text
    pub label: String,
}

/// Result of confirming the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// `select_port` was emitted for this port name
    Sent(String),
    /// Only the placeholder is selected
    NoSelection,
    /// Transport is down; nothing was emitted
    Offline,
}

#[derive(Debug)]
pub struct PortSelector {
    placeholder: String,
    options: Vec<PortOption>,
    selected: Option<usize>,
    handle: Option<SelectionHandle>,
    state: SelectorState,
    action_enabled: bool,
    generation: u64,
}

impl PortSelector {
    /// Create an unbound selector with a disabled action button
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            options: Vec::new(),
            selected: None,
            handle: None,
            state: SelectorState::Uninitialized,
            action_enabled: false,
            generation: 0,
        }
    }

    /// Initialize the widget on first use. Later calls return the current handle.
    pub fn bind(&mut self) -> SelectionHandle {
        match self.handle {
            Some(handle) if self.state == SelectorState::Initialized => handle,
            _ => self.init_widget(),
        }
    }

    fn init_widget(&mut self) -> SelectionHandle {
        self.generation += 1;
        let handle = SelectionHandle(self.generation);
        self.handle = Some(handle);
        self.selected = None;
        self.state = SelectorState::Initialized;
        handle
    }

    /// Replace the generated options with one per port, in order.
    ///
    /// An empty list changes nothing.
    pub fn refresh(&mut self, ports: &[Port]) {
        if ports.is_empty() {
            return;
        }
        if self.state == SelectorState::Uninitialized {
            self.bind();
        }

        self.state = SelectorState::Rebuilding;
        self.options.clear();
        self.options.extend(ports.iter().map(|p| PortOption {
            value: p.index,
            label: p.name.clone(),
        }));
        let handle = self.init_widget();

        if !self.action_enabled {
            tracing::debug!("Enabling port selection action");
            self.action_enabled = true;
        }
        tracing::debug!(
            "Port selector rebuilt with {} options (widget #{})",
            self.options.len(),
            handle.id()
        );
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Generated options (the placeholder is not included)
    pub fn options(&self) -> &[PortOption] {
        &self.options
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn handle(&self) -> Option<SelectionHandle> {
        self.handle
    }

    pub fn is_action_enabled(&self) -> bool {
        self.action_enabled
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Mark a generated option as selected; `None` selects the placeholder
    pub fn select(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) if i >= self.options.len() => false,
            _ => {
                self.selected = index;
                true
            }
        }
    }

    /// Select the option whose label equals `name`
    pub fn select_by_name(&mut self, name: &str) -> bool {
        let index = self.options.iter().position(|o| o.label == name);
        index.is_some() && self.select(index)
    }

    pub fn selected_option(&self) -> Option<&PortOption> {
        self.selected.and_then(|i| self.options.get(i))
    }

    /// Emit `select_port` for the selected option if the transport is up
    pub fn confirm_selection(&self, transport: &dyn Transport) -> Result<SelectionOutcome> {
        let Some(option) = self.selected_option() else {
            tracing::debug!("No port selected, nothing to confirm");
            return Ok(SelectionOutcome::NoSelection);
        };

        if !transport.is_connected() {
            tracing::debug!("Not connected, suppressing select_port for '{}'", option.label);
            return Ok(SelectionOutcome::Offline);
        }

        tracing::info!("Requesting port '{}'", option.label);
        transport.emit(Frame::select_port(&option.label))?;
        Ok(SelectionOutcome::Sent(option.label.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{MockTransport, EVENT_SELECT_PORT};
    use proptest::prelude::*;

    fn ports(names: &[&str]) -> Vec<Port> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Port::new(i as u32 + 1, *n))
            .collect()
    }

    #[test]
    fn test_starts_uninitialized_and_disabled() {
        let selector = PortSelector::new("Choose a port");
        assert_eq!(selector.state(), SelectorState::Uninitialized);
        assert!(!selector.is_action_enabled());
        assert!(selector.options().is_empty());
        assert!(selector.handle().is_none());
    }

    #[test]
    fn test_bind_is_idempotent() {
        let mut selector = PortSelector::new("-");
        let first = selector.bind();
        let second = selector.bind();
        assert_eq!(first, second);
        assert_eq!(selector.state(), SelectorState::Initialized);
    }

    #[test]
    fn test_refresh_rebuilds_options_and_handle() {
        let mut selector = PortSelector::new("-");
        let initial = selector.bind();

        selector.refresh(&ports(&["COM1", "COM2"]));
        let after_first = selector.handle().unwrap();
        assert_ne!(initial, after_first);
        assert_eq!(selector.state(), SelectorState::Initialized);
        assert!(selector.is_action_enabled());

        selector.refresh(&ports(&["COM7"]));
        assert_eq!(
            selector.options(),
            &[PortOption {
                value: 1,
                label: "COM7".to_string()
            }]
        );
        assert_ne!(selector.handle().unwrap(), after_first);
        assert_eq!(selector.placeholder(), "-");
    }

    #[test]
    fn test_refresh_clears_selection() {
        let mut selector = PortSelector::new("-");
        selector.refresh(&ports(&["COM1", "COM2"]));
        assert!(selector.select_by_name("COM2"));
        selector.refresh(&ports(&["COM1", "COM2"]));
        assert_eq!(selector.selected_index(), None);
    }

    #[test]
    fn test_empty_refresh_keeps_previous_state() {
        let mut selector = PortSelector::new("-");
        selector.refresh(&ports(&["COM1"]));
        selector.select(Some(0));
        let handle = selector.handle();

        selector.refresh(&[]);

        assert_eq!(selector.options().len(), 1);
        assert!(selector.is_action_enabled());
        assert_eq!(selector.handle(), handle);
        assert_eq!(selector.selected_index(), Some(0));
    }

    #[test]
    fn test_empty_refresh_before_any_ports() {
        let mut selector = PortSelector::new("-");
        selector.refresh(&[]);
        assert!(!selector.is_action_enabled());
        assert_eq!(selector.state(), SelectorState::Uninitialized);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut selector = PortSelector::new("-");
        selector.refresh(&ports(&["COM1"]));
        assert!(!selector.select(Some(3)));
        assert!(!selector.select_by_name("COM9"));
        assert!(selector.select(None));
    }

    #[test]
    fn test_confirm_while_disconnected_emits_nothing() {
        let mut selector = PortSelector::new("-");
        selector.refresh(&ports(&["COM1"]));
        selector.select(Some(0));

        let mut transport = MockTransport::new();
        transport.expect_is_connected().return_const(false);
        transport.expect_emit().never();

        let outcome = selector.confirm_selection(&transport).unwrap();
        assert_eq!(outcome, SelectionOutcome::Offline);
    }

    #[test]
    fn test_confirm_emits_selected_name() {
        let mut selector = PortSelector::new("-");
        selector.refresh(&ports(&["COM1", "COM2"]));
        selector.select_by_name("COM2");

        let mut transport = MockTransport::new();
        transport.expect_is_connected().return_const(true);
        transport
            .expect_emit()
            .withf(|frame| frame.event == EVENT_SELECT_PORT && frame.data["name"] == "COM2")
            .times(1)
            .returning(|_| Ok(()));

        let outcome = selector.confirm_selection(&transport).unwrap();
        assert_eq!(outcome, SelectionOutcome::Sent("COM2".to_string()));
    }

    #[test]
    fn test_confirm_without_selection() {
        let mut selector = PortSelector::new("-");
        selector.refresh(&ports(&["COM1"]));

        let mut transport = MockTransport::new();
        transport.expect_is_connected().return_const(true);
        transport.expect_emit().never();

        assert_eq!(
            selector.confirm_selection(&transport).unwrap(),
            SelectionOutcome::NoSelection
        );
    }

    proptest! {
        #[test]
        fn test_refresh_mirrors_port_list(
            names in prop::collection::vec("[A-Za-z0-9/]{1,12}", 1..20)
        ) {
            let list: Vec<Port> = names
                .iter()
                .enumerate()
                .map(|(i, n)| Port::new(i as u32, n.clone()))
                .collect();
            let mut selector = PortSelector::new("-");
            selector.refresh(&list);

            prop_assert_eq!(selector.options().len(), list.len());
            for (option, port) in selector.options().iter().zip(&list) {
                prop_assert_eq!(&option.label, &port.name);
                prop_assert_eq!(option.value, port.index);
            }
            prop_assert!(selector.is_action_enabled());
        }
    }
}
