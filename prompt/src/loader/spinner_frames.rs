// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{BLOCK_DOTS, BRAILLE_DOTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerTemplate {
    #[default]
    Braille,
    Block,
}

impl SpinnerTemplate {
    #[must_use]
    pub fn frames(self) -> &'static [&'static str] {
        match self {
            SpinnerTemplate::Braille => &BRAILLE_DOTS,
            SpinnerTemplate::Block => &BLOCK_DOTS,
        }
    }

    /// Picks the frame for `loading_increment`, wrapping around the frame table.
    #[must_use]
    pub fn glyph_for(self, loading_increment: usize) -> &'static str {
        let frames = self.frames();
        frames[loading_increment % frames.len()]
    }

    /// True if `text` contains any of this template's frames.
    #[must_use]
    pub fn appears_in(self, text: &str) -> bool {
        self.frames().iter().any(|frame| text.contains(frame))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case(SpinnerTemplate::Braille, 0, "⠁")]
    #[test_case(SpinnerTemplate::Braille, 34, "⠁")]
    #[test_case(SpinnerTemplate::Braille, 35, "⠃")]
    #[test_case(SpinnerTemplate::Block, 1, "▓")]
    #[test_case(SpinnerTemplate::Block, 9, "▓")]
    fn test_glyph_for(template: SpinnerTemplate, increment: usize, expected: &str) {
        assert_eq!(template.glyph_for(increment), expected);
    }

    #[test]
    fn test_appears_in() {
        assert!(SpinnerTemplate::Block.appears_in("? █ Name"));
        assert!(!SpinnerTemplate::Block.appears_in("? Name"));
    }
}
