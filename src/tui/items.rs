use super::keymap::{key_label, Binding, Command};

/// What activating a list entry asks the app to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    PlayStation(usize),
    Run(Command),
}

/// A list entry that can be activated with Enter.
pub trait Selectable {
    fn label(&self) -> String;

    fn on_activate(&self) -> Action;
}

#[derive(Clone, Debug)]
pub struct StationItem {
    pub index: usize,
    pub name: String,
}

impl Selectable for StationItem {
    fn label(&self) -> String {
        self.name.clone()
    }

    fn on_activate(&self) -> Action {
        Action::PlayStation(self.index)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CommandItem {
    pub binding: &'static Binding,
}

impl Selectable for CommandItem {
    fn label(&self) -> String {
        format!(
            "({}) {}",
            key_label(self.binding.key),
            self.binding.label.unwrap_or_default()
        )
    }

    fn on_activate(&self) -> Action {
        Action::Run(self.binding.command)
    }
}
