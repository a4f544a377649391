#![forbid(unsafe_code)]

//! Presentation settings for the checklist view.

/// Glyphs drawn by a [`Switch`](crate::Switch) for its two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwitchGlyphs {
    pub on: &'static str,
    pub off: &'static str,
}

impl Default for SwitchGlyphs {
    fn default() -> Self {
        Self::BRACKETS
    }
}

impl SwitchGlyphs {
    pub const BRACKETS: Self = Self {
        on: "[x]",
        off: "[ ]",
    };
    pub const TRACK: Self = Self {
        on: "(━●)",
        off: "(●━)",
    };
}

/// Layout and text settings for [`ChecklistView`](crate::ChecklistView).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Switch items per row. Values below 1 are treated as 1.
    pub columns: u16,
    /// Blank cells between columns.
    pub column_gap: u16,
    /// Blank rows between verification blocks.
    pub block_gap: u16,
    /// Text before the source name in each block header.
    pub header_prefix: String,
    pub glyphs: SwitchGlyphs,
    /// Marker drawn in the gutter of the focused item.
    pub focus_marker: &'static str,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            columns: 2,
            column_gap: 1,
            block_gap: 1,
            header_prefix: "Verification Source: ".to_string(),
            glyphs: SwitchGlyphs::default(),
            focus_marker: ">",
        }
    }
}

impl ViewConfig {
    #[must_use]
    pub fn with_columns(mut self, columns: u16) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn with_column_gap(mut self, gap: u16) -> Self {
        self.column_gap = gap;
        self
    }

    #[must_use]
    pub fn with_block_gap(mut self, gap: u16) -> Self {
        self.block_gap = gap;
        self
    }

    #[must_use]
    pub fn with_header_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.header_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_glyphs(mut self, glyphs: SwitchGlyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    #[must_use]
    pub fn with_focus_marker(mut self, marker: &'static str) -> Self {
        self.focus_marker = marker;
        self
    }

    /// `columns`, clamped to at least 1.
    #[must_use]
    pub fn effective_columns(&self) -> u16 {
        self.columns.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_never_drop_below_one() {
        assert_eq!(ViewConfig::default().effective_columns(), 2);
        assert_eq!(ViewConfig::default().with_columns(0).effective_columns(), 1);
    }

    #[test]
    fn builders_set_fields() {
        let config = ViewConfig::default()
            .with_glyphs(SwitchGlyphs::TRACK)
            .with_header_prefix("Source: ")
            .with_focus_marker("*")
            .with_block_gap(0);
        assert_eq!(config.glyphs, SwitchGlyphs::TRACK);
        assert_eq!(config.header_prefix, "Source: ");
        assert_eq!(config.focus_marker, "*");
        assert_eq!(config.block_gap, 0);
    }
}
