use std::fs;
use std::path::Path;

use super::ThemeFileService;
use crate::error::{Result, ThemeError};
use crate::switcher::ThemeDescriptor;

/// Section holding the theme's identity.
const THEME_SECTION: &str = "Theme";
/// Key holding the display name inside [`THEME_SECTION`].
const DISPLAY_NAME_KEY: &str = "DisplayName";
/// Section holding classic system colors.
const COLORS_SECTION: &str = "Control Panel\\Colors";
/// Color entry patched with the variant weights.
const BACKGROUND_KEY: &str = "Background";
/// Private section remembering where a derived file came from.
const ORIGIN_SECTION: &str = "Duskswitch";
/// Key holding the source display name inside [`ORIGIN_SECTION`].
const ORIGINAL_NAME_KEY: &str = "OriginalName";

/// One line of a theme file section.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Line {
    /// `key=value` entry.
    Entry {
        /// Key as written.
        key: String,
        /// Value as written.
        value: String,
    },
    /// Comment, blank line, or anything else kept verbatim.
    Other(String),
}

/// A `[section]` with its lines in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Section {
    /// Section name without brackets; empty for lines before the first header.
    name: String,
    /// Lines in file order.
    lines: Vec<Line>,
}

/// What: Order-preserving model of a `.theme` (INI) file.
///
/// Details:
/// - Section and key lookups are ASCII case-insensitive, like the OS parser.
/// - Untouched lines are written back verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThemeDocument {
    /// Sections in file order.
    sections: Vec<Section>,
}

impl ThemeDocument {
    /// What: Parse theme file text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut sections = vec![Section {
            name: String::new(),
            lines: Vec::new(),
        }];
        for raw in text.lines() {
            let trimmed = raw.trim();
            if let Some(name) = trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            {
                sections.push(Section {
                    name: name.trim().to_string(),
                    lines: Vec::new(),
                });
                continue;
            }
            let line = match trimmed.split_once('=') {
                Some((k, v)) if !trimmed.starts_with(';') => Line::Entry {
                    key: k.trim().to_string(),
                    value: v.trim().to_string(),
                },
                _ => Line::Other(raw.to_string()),
            };
            if let Some(last) = sections.last_mut() {
                last.lines.push(line);
            }
        }
        Self { sections }
    }

    /// Value of `key` in `section`, if present.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .filter(|s| s.name.eq_ignore_ascii_case(section))
            .flat_map(|s| s.lines.iter())
            .find_map(|l| match l {
                Line::Entry { key: k, value } if k.eq_ignore_ascii_case(key) => {
                    Some(value.as_str())
                }
                _ => None,
            })
    }

    /// What: Set `key` in `section`, creating either when missing.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        let idx = if let Some(i) = self
            .sections
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(section))
        {
            i
        } else {
            self.sections.push(Section {
                name: section.to_string(),
                lines: Vec::new(),
            });
            self.sections.len() - 1
        };
        let lines = &mut self.sections[idx].lines;
        for line in lines.iter_mut() {
            if let Line::Entry { key: k, value: v } = line
                && k.eq_ignore_ascii_case(key)
            {
                *v = value.to_string();
                return;
            }
        }
        lines.push(Line::Entry {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    /// The theme's display name from `[Theme] DisplayName`.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.get(THEME_SECTION, DISPLAY_NAME_KEY)
            .filter(|n| !n.is_empty())
    }

    /// What: Render the document with CRLF line endings.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            if !section.name.is_empty() {
                out.push('[');
                out.push_str(&section.name);
                out.push_str("]\r\n");
            }
            for line in &section.lines {
                match line {
                    Line::Entry { key, value } => {
                        out.push_str(key);
                        out.push('=');
                        out.push_str(value);
                    }
                    Line::Other(text) => out.push_str(text),
                }
                out.push_str("\r\n");
            }
        }
        out
    }
}

/// What: Decode theme file bytes.
///
/// Details:
/// - UTF-16LE with BOM is what the OS writes; anything else is read as UTF-8,
///   replacing invalid sequences.
#[must_use]
pub fn decode_theme_bytes(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    let rest = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    String::from_utf8_lossy(rest).into_owned()
}

/// Encode text as UTF-16LE with BOM.
fn encode(text: &str) -> Vec<u8> {
    let mut out = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

/// Read and decode a theme file.
fn read_text(path: &Path) -> Result<String> {
    fs::read(path)
        .map(|b| decode_theme_bytes(&b))
        .map_err(|e| ThemeError::io(path, e))
}

/// Encode and write a theme file, creating parent directories.
fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| ThemeError::io(dir, e))?;
    }
    fs::write(path, encode(text)).map_err(|e| ThemeError::io(path, e))
}

/// What: [`ThemeFileService`] working directly on `.theme` INI files.
#[derive(Clone, Copy, Debug, Default)]
pub struct IniThemeFileService;

impl ThemeFileService for IniThemeFileService {
    fn derive_unmanaged(&self, source: &Path, target: &Path) -> Result<ThemeDescriptor> {
        let text = read_text(source)?;
        let doc = ThemeDocument::parse(&text);
        let name = doc.display_name().map_or_else(
            || {
                source
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default()
            },
            str::to_string,
        );
        write_text(target, &doc.render())?;
        tracing::debug!(
            source = %source.display(),
            target = %target.display(),
            name = %name,
            "derived unmanaged theme"
        );
        Ok(ThemeDescriptor {
            source_path: source.to_path_buf(),
            unmanaged_path: target.to_path_buf(),
            display_name: name.clone(),
            original_display_name: name,
        })
    }

    fn patch_colors_and_save(&self, descriptor: &ThemeDescriptor, weights: &str) -> Result<()> {
        let path = &descriptor.unmanaged_path;
        let mut doc = ThemeDocument::parse(&read_text(path)?);
        doc.set(THEME_SECTION, DISPLAY_NAME_KEY, &descriptor.display_name);
        doc.set(COLORS_SECTION, BACKGROUND_KEY, weights);
        doc.set(
            ORIGIN_SECTION,
            ORIGINAL_NAME_KEY,
            &descriptor.original_display_name,
        );
        write_text(path, &doc.render())
    }

    fn extract_display_name(&self, path: &Path) -> Result<(String, String)> {
        let text = read_text(path)?;
        let name = ThemeDocument::parse(&text)
            .display_name()
            .map(str::to_string)
            .ok_or_else(|| ThemeError::Parse {
                path: path.to_path_buf(),
                reason: "missing [Theme] DisplayName".to_string(),
            })?;
        Ok((text, name))
    }
}
