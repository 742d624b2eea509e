use std::sync::LazyLock;

/// Font family and point size requested for the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub family: String,
    pub size: u16,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "monospace".to_string(),
            size: 12,
        }
    }
}

impl std::fmt::Display for FontSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}pt", self.family, self.size)
    }
}

/// Family names of the fonts installed on this machine, loaded on first use.
static SYSTEM_FAMILIES: LazyLock<Vec<String>> = LazyLock::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let mut families: Vec<String> = db
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
        .collect();
    families.sort_unstable();
    families.dedup();
    tracing::debug!(count = families.len(), "loaded system font families");
    families
});

/// Whether a font family with this name is installed.
///
/// Terminals that cannot honor the request fall back to their own font,
/// so a `false` here is only worth a warning.
pub fn font_family_installed(family: &str) -> bool {
    family_in(&SYSTEM_FAMILIES, family)
}

fn family_in(families: &[String], family: &str) -> bool {
    let wanted = family.trim();
    // Generic families are resolved by fontconfig, never listed as faces.
    if ["monospace", "serif", "sans-serif", "sans"]
        .iter()
        .any(|generic| generic.eq_ignore_ascii_case(wanted))
    {
        return true;
    }
    families.iter().any(|name| name.eq_ignore_ascii_case(wanted))
}

/// xterm OSC 50 "set font" request for this font.
pub fn osc50_sequence(font: &FontSpec) -> String {
    format!("\x1b]50;xft:{}:size={}\x07", font.family.trim(), font.size)
}
