//! Command table and menu layout.
//!
//! Every user-facing action has a [`CommandId`] with a stable string
//! identifier. The event loop never calls handlers directly: key bindings,
//! menu clicks and menu keyboard activation all produce
//! `Message::Command(id)`, and `update` routes it through [`dispatch`].

use crate::app::Model;

/// Handler run when a command is invoked.
pub type Handler = fn(&mut Model);

/// Identifier of a user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    Open,
    Save,
    Exit,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
    Find,
    Replace,
    Font,
    Color,
    About,
}

/// One row of the command table.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub id: CommandId,
    /// Stable identifier, e.g. `file.open`.
    pub name: &'static str,
    /// Menu label.
    pub label: &'static str,
    /// Shortcut shown next to the menu label.
    pub shortcut: Option<&'static str>,
    pub handler: Handler,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        id: CommandId::Open,
        name: "file.open",
        label: "Open...",
        shortcut: Some("Ctrl+O"),
        handler: Model::begin_open,
    },
    CommandSpec {
        id: CommandId::Save,
        name: "file.save",
        label: "Save...",
        shortcut: Some("Ctrl+S"),
        handler: Model::begin_save,
    },
    CommandSpec {
        id: CommandId::Exit,
        name: "file.exit",
        label: "Exit",
        shortcut: Some("Ctrl+Q"),
        handler: Model::request_exit,
    },
    CommandSpec {
        id: CommandId::Undo,
        name: "edit.undo",
        label: "Undo",
        shortcut: Some("Ctrl+Z"),
        handler: Model::undo,
    },
    CommandSpec {
        id: CommandId::Redo,
        name: "edit.redo",
        label: "Redo",
        shortcut: Some("Ctrl+Y"),
        handler: Model::redo,
    },
    CommandSpec {
        id: CommandId::Cut,
        name: "edit.cut",
        label: "Cut",
        shortcut: Some("Ctrl+X"),
        handler: Model::cut,
    },
    CommandSpec {
        id: CommandId::Copy,
        name: "edit.copy",
        label: "Copy",
        shortcut: Some("Ctrl+C"),
        handler: Model::copy,
    },
    CommandSpec {
        id: CommandId::Paste,
        name: "edit.paste",
        label: "Paste",
        shortcut: Some("Ctrl+V"),
        handler: Model::paste,
    },
    CommandSpec {
        id: CommandId::SelectAll,
        name: "edit.select_all",
        label: "Select All",
        shortcut: Some("Ctrl+A"),
        handler: Model::select_all,
    },
    CommandSpec {
        id: CommandId::Find,
        name: "edit.find",
        label: "Find...",
        shortcut: Some("Ctrl+F"),
        handler: Model::begin_find,
    },
    CommandSpec {
        id: CommandId::Replace,
        name: "edit.replace",
        label: "Replace...",
        shortcut: Some("Ctrl+H"),
        handler: Model::begin_replace,
    },
    CommandSpec {
        id: CommandId::Font,
        name: "format.font",
        label: "Font...",
        shortcut: None,
        handler: Model::begin_font,
    },
    CommandSpec {
        id: CommandId::Color,
        name: "format.color",
        label: "Color...",
        shortcut: None,
        handler: Model::begin_color,
    },
    CommandSpec {
        id: CommandId::About,
        name: "help.about",
        label: "About",
        shortcut: Some("F1"),
        handler: Model::show_about,
    },
];

impl CommandId {
    /// Look up the table row for this command.
    ///
    /// `COMMANDS` is laid out in declaration order of `CommandId`.
    pub const fn spec(self) -> &'static CommandSpec {
        &COMMANDS[self as usize]
    }

    pub const fn name(self) -> &'static str {
        self.spec().name
    }

    pub const fn label(self) -> &'static str {
        self.spec().label
    }

    /// Parse a stable identifier such as `edit.find`.
    pub fn from_name(name: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.id)
    }
}

/// Run the handler registered for `id`.
pub fn dispatch(model: &mut Model, id: CommandId) {
    tracing::debug!(command = id.name(), "dispatch");
    (id.spec().handler)(model);
}

/// An entry in a drop-down menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Command(CommandId),
    Separator,
}

/// A top-level menu.
#[derive(Debug, Clone, Copy)]
pub struct Menu {
    pub title: &'static str,
    /// Alt+<key> opens this menu.
    pub accelerator: char,
    pub items: &'static [MenuItem],
}

pub const MENUS: &[Menu] = &[
    Menu {
        title: "File",
        accelerator: 'f',
        items: &[
            MenuItem::Command(CommandId::Open),
            MenuItem::Command(CommandId::Save),
            MenuItem::Separator,
            MenuItem::Command(CommandId::Exit),
        ],
    },
    Menu {
        title: "Edit",
        accelerator: 'e',
        items: &[
            MenuItem::Command(CommandId::Undo),
            MenuItem::Command(CommandId::Redo),
            MenuItem::Separator,
            MenuItem::Command(CommandId::Cut),
            MenuItem::Command(CommandId::Copy),
            MenuItem::Command(CommandId::Paste),
            MenuItem::Separator,
            MenuItem::Command(CommandId::SelectAll),
            MenuItem::Command(CommandId::Find),
            MenuItem::Command(CommandId::Replace),
        ],
    },
    Menu {
        title: "Format",
        accelerator: 'o',
        items: &[
            MenuItem::Command(CommandId::Font),
            MenuItem::Command(CommandId::Color),
        ],
    },
    Menu {
        title: "Help",
        accelerator: 'h',
        items: &[MenuItem::Command(CommandId::About)],
    },
];

/// Index of the menu opened by Alt+`key`.
pub fn menu_for_accelerator(key: char) -> Option<usize> {
    let key = key.to_ascii_lowercase();
    MENUS.iter().position(|menu| menu.accelerator == key)
}

/// Which menu is open and which item is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub menu: usize,
    pub item: usize,
}

impl MenuState {
    /// Open a menu with its first command highlighted.
    pub fn open(menu: usize) -> Self {
        let menu = menu.min(MENUS.len() - 1);
        let item = MENUS[menu]
            .items
            .iter()
            .position(|item| matches!(item, MenuItem::Command(_)))
            .unwrap_or(0);
        Self { menu, item }
    }

    pub fn items(&self) -> &'static [MenuItem] {
        MENUS[self.menu].items
    }

    /// Switch to the next (`forward`) or previous menu, wrapping around.
    pub fn cycle_menu(&mut self, forward: bool) {
        let count = MENUS.len();
        let next = if forward {
            (self.menu + 1) % count
        } else {
            (self.menu + count - 1) % count
        };
        *self = Self::open(next);
    }

    /// Move the highlight down (`forward`) or up, skipping separators.
    pub fn cycle_item(&mut self, forward: bool) {
        let items = self.items();
        let count = items.len();
        let mut idx = self.item;
        for _ in 0..count {
            idx = if forward {
                (idx + 1) % count
            } else {
                (idx + count - 1) % count
            };
            if matches!(items[idx], MenuItem::Command(_)) {
                self.item = idx;
                return;
            }
        }
    }

    /// Highlight an item by row index; separators are ignored.
    pub fn select(&mut self, item: usize) -> bool {
        match self.items().get(item) {
            Some(MenuItem::Command(_)) => {
                self.item = item;
                true
            }
            _ => false,
        }
    }

    /// The highlighted command, if the highlight is on one.
    pub fn current(&self) -> Option<CommandId> {
        match self.items().get(self.item) {
            Some(MenuItem::Command(id)) => Some(*id),
            _ => None,
        }
    }
}
