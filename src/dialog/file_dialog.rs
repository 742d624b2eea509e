use std::path::{Path, PathBuf};

use super::input::{InputEdit, LineInput};

/// Extension appended by Save when the chosen name has none.
pub const DEFAULT_EXTENSION: &str = "txt";

/// A named set of extensions shown in the file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub label: &'static str,
    /// Empty means every file.
    pub extensions: &'static [&'static str],
}

impl FileFilter {
    pub fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}

pub const FILE_FILTERS: [FileFilter; 2] = [
    FileFilter {
        label: "Text Files (*.txt)",
        extensions: &["txt"],
    },
    FileFilter {
        label: "All Files (*.*)",
        extensions: &[],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDialogMode {
    Open,
    Save,
}

/// A directory entry shown in the file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Display name (file name or "..")
    pub name: String,
    /// Full path to the entry
    pub path: PathBuf,
    /// Whether this entry is a directory
    pub is_dir: bool,
}

/// Result of pressing Enter in the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileDialogOutcome {
    /// The dialog moved into another directory and stays open.
    Navigated,
    /// The user picked this path.
    Chosen(PathBuf),
    /// Nothing to act on.
    Nothing,
}

/// File picker used by Open and Save.
#[derive(Debug, Clone)]
pub struct FileDialog {
    pub mode: FileDialogMode,
    dir: PathBuf,
    entries: Vec<DirEntry>,
    selected: usize,
    filter: usize,
    pub input: LineInput,
    /// Last listing or navigation failure, shown inside the dialog.
    pub error: Option<String>,
}

impl FileDialog {
    /// Create a dialog listing `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn new(mode: FileDialogMode, dir: &Path) -> std::io::Result<Self> {
        let mut dialog = Self {
            mode,
            dir: PathBuf::new(),
            entries: Vec::new(),
            selected: 0,
            filter: 0,
            input: LineInput::default(),
            error: None,
        };
        dialog.load_directory(dir)?;
        Ok(dialog)
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FileDialogMode::Open => "Open",
            FileDialogMode::Save => "Save As",
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    pub const fn selected(&self) -> usize {
        self.selected
    }

    pub const fn filter(&self) -> FileFilter {
        FILE_FILTERS[self.filter]
    }

    /// List `dir` through the current filter: `..` first, then
    /// directories, then files, each sorted by name. Hidden entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read; the dialog keeps
    /// its previous listing in that case.
    pub fn load_directory(&mut self, dir: &Path) -> std::io::Result<()> {
        let dir = std::fs::canonicalize(dir)?;
        let filter = self.filter();
        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&dir)?.filter_map(std::result::Result::ok) {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            let is_dir = entry
                .file_type()
                .map(|ft| ft.is_dir() || (ft.is_symlink() && path.is_dir()))
                .unwrap_or(false);
            if is_dir {
                dirs.push(DirEntry { name, path, is_dir });
            } else if filter.accepts(&path) {
                files.push(DirEntry { name, path, is_dir });
            }
        }
        dirs.sort_by(|a, b| a.name.cmp(&b.name));
        files.sort_by(|a, b| a.name.cmp(&b.name));

        let mut entries = Vec::with_capacity(dirs.len() + files.len() + 1);
        if let Some(parent) = dir.parent() {
            entries.push(DirEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
            });
        }
        entries.extend(dirs);
        entries.extend(files);

        self.dir = dir;
        self.entries = entries;
        self.selected = 0;
        self.error = None;
        Ok(())
    }

    /// Move the highlight by `delta` rows, clamped to the list.
    ///
    /// In Save mode a highlighted file's name is copied into the input.
    pub fn move_selection(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let max = self.entries.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(max);
        if self.mode == FileDialogMode::Save
            && let Some(entry) = self.entries.get(self.selected)
            && !entry.is_dir
        {
            self.input.set(&entry.name);
        }
    }

    /// Switch to the next extension filter and re-list.
    pub fn toggle_filter(&mut self) {
        self.filter = (self.filter + 1) % FILE_FILTERS.len();
        let dir = self.dir.clone();
        if let Err(err) = self.load_directory(&dir) {
            self.error = Some(format!("Cannot list {}: {err}", dir.display()));
        }
    }

    pub fn edit_input(&mut self, edit: InputEdit) {
        self.input.apply(edit);
    }

    /// Act on Enter: a typed name wins over the highlighted entry.
    pub fn activate(&mut self) -> FileDialogOutcome {
        if !self.input.is_empty() {
            let typed = self.resolve_input();
            if typed.is_dir() {
                return self.navigate(&typed);
            }
            return FileDialogOutcome::Chosen(self.with_default_extension(typed));
        }
        let Some(entry) = self.entries.get(self.selected).cloned() else {
            return FileDialogOutcome::Nothing;
        };
        if entry.is_dir {
            self.navigate(&entry.path)
        } else {
            FileDialogOutcome::Chosen(entry.path)
        }
    }

    fn navigate(&mut self, dir: &Path) -> FileDialogOutcome {
        match self.load_directory(dir) {
            Ok(()) => {
                self.input.clear();
                FileDialogOutcome::Navigated
            }
            Err(err) => {
                tracing::warn!(path = %dir.display(), %err, "cannot list directory");
                self.error = Some(format!("Cannot open {}: {err}", dir.display()));
                FileDialogOutcome::Nothing
            }
        }
    }

    fn resolve_input(&self) -> PathBuf {
        let typed = PathBuf::from(self.input.text().trim());
        if typed.is_absolute() {
            typed
        } else {
            self.dir.join(typed)
        }
    }

    fn with_default_extension(&self, path: PathBuf) -> PathBuf {
        if self.mode == FileDialogMode::Save && path.extension().is_none() {
            path.with_extension(DEFAULT_EXTENSION)
        } else {
            path
        }
    }
}
