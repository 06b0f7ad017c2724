/// How much of the header to cross-check before reading sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Only failed reads and unresolvable offsets are errors. Declared section
    /// lengths are taken on trust, matching files written by existing tools.
    #[default]
    Lenient,
    /// Additionally require the texture section length to equal
    /// `num_textures * 12` and the frame section length to be a whole number
    /// of frame records.
    Strict,
}

/// Configuration for loading a map file.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub validation: Validation,
}

impl LoadOptions {
    pub fn strict() -> Self {
        Self {
            validation: Validation::Strict,
        }
    }

    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }
}
